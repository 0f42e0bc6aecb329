//! # Chunk Meshing
//!
//! Dirty-tracked mesh building. A chunk keeps one mesh per material and only
//! rebuilds them after [`Chunk::mark_dirty`].
//!
//! ## Face Visibility
//!
//! A face of a block is emitted when the block on the other side
//! - is not solid, and
//! - is not the same translucent material (no seams inside a body of water).
//!
//! Neighbours are resolved with [`Chunk::query_block`], so faces on the chunk
//! border take the adjacent chunk into account.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use cgmath::{EuclideanSpace, Point3};
use log::{debug, info};
use web_time::Instant;

use crate::engine_state::{
    rendering::meshing::{ambient_occlusion, Face, Mesh, MeshHandle},
    voxels::block::{block_side::BlockSide, Block, MaterialIndex},
};

use super::{BlockSource, Chunk};

impl Chunk {
    /// Returns the meshes of this chunk, one per material with visible faces.
    ///
    /// While the chunk is clean this is just the cache. When dirty, the blocks
    /// are scanned once for the distinct non-air materials, each material is
    /// built with [`Chunk::build_mesh_for`] and materials without visible
    /// faces are left out.
    pub fn query_meshes<S>(&mut self, neighbors: &S) -> &BTreeMap<MaterialIndex, MeshHandle>
    where
        S: BlockSource + ?Sized,
    {
        if !self.dirty {
            return &self.meshes;
        }

        let start = Instant::now();
        self.meshes.clear();

        let materials: BTreeSet<MaterialIndex> =
            self.iter_blocks().map(|(_, block)| block.material).collect();

        let mut meshes = BTreeMap::new();
        for material in materials {
            if let Some(mesh) = self.build_mesh_for(material, neighbors) {
                meshes.insert(material, mesh);
            }
        }

        self.meshes = meshes;
        self.dirty = false;
        self.rebuilds += 1;

        info!("Rebuilding mesh for chunk {:?}", self.origin);
        debug!(
            "Chunk {:?}: {} meshes in {:?}",
            self.origin,
            self.meshes.len(),
            start.elapsed()
        );
        &self.meshes
    }

    /// Builds the mesh of all visible faces of `material` in this chunk.
    ///
    /// Returns `None` if no face of that material is visible, never an empty
    /// mesh.
    pub fn build_mesh_for<S>(&self, material: MaterialIndex, neighbors: &S) -> Option<MeshHandle>
    where
        S: BlockSource + ?Sized,
    {
        let query = |pos: Point3<i32>| self.query_block(pos, neighbors);
        let mut mesh = Mesh::new(material);

        for (local, block) in self.iter_blocks() {
            if block.material != material {
                continue;
            }

            let global = self.origin + local.to_vec();
            for side in BlockSide::all() {
                let neighbor = query(global + side.normal());
                if !Self::is_face_visible(block, &neighbor) {
                    continue;
                }

                let face = Face::new(global, material, side);
                let ao = if self.mesh_options.ambient_occlusion {
                    ambient_occlusion::face_ao(&face, global, query)
                } else {
                    [1.0; 4]
                };
                mesh.add_face(&face, ao);
            }
        }

        if mesh.is_empty() {
            return None;
        }

        debug!(
            "Created {} verts for mat {} in chunk {:?}",
            mesh.vertices.len(),
            material,
            self.origin
        );
        Some(Arc::new(mesh))
    }

    /// Whether the face between `block` and `neighbor` has to be drawn.
    pub fn is_face_visible(block: &Block, neighbor: &Block) -> bool {
        if neighbor.is_solid() {
            return false;
        }
        !(block.is_translucent() && block.material == neighbor.material)
    }

    /// Invalidates the mesh cache. The cached meshes are dropped right away.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
        self.meshes.clear();
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The cached meshes without rebuilding. Empty while dirty.
    pub fn cached_meshes(&self) -> &BTreeMap<MaterialIndex, MeshHandle> {
        &self.meshes
    }

    /// Number of times [`Chunk::query_meshes`] actually rebuilt the cache.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::meshing::MeshOptions;

    struct AirOutside;

    impl BlockSource for AirOutside {
        fn query_block(&self, _pos: Point3<i32>) -> Block {
            Block::air()
        }
    }

    struct SolidOutside;

    impl BlockSource for SolidOutside {
        fn query_block(&self, _pos: Point3<i32>) -> Block {
            Block::new(1)
        }
    }

    fn chunk_with(blocks: &[(Point3<i32>, MaterialIndex)]) -> Chunk {
        let mut chunk = Chunk::new(Point3::new(0, 0, 0), 4).unwrap();
        for (pos, material) in blocks {
            chunk.block_mut(*pos).material = *material;
        }
        chunk
    }

    #[test]
    fn lone_block_has_six_faces() {
        let mut chunk = chunk_with(&[(Point3::new(1, 1, 1), 1)]);
        let meshes = chunk.query_meshes(&AirOutside);

        assert_eq!(meshes.len(), 1);
        let mesh = &meshes[&1];
        assert_eq!(mesh.face_count(), 6);
        for side in BlockSide::all() {
            assert_eq!(mesh.face_count_for(side), 1);
        }
    }

    #[test]
    fn touching_solids_hide_the_shared_faces() {
        let mut chunk = chunk_with(&[(Point3::new(1, 1, 1), 1), (Point3::new(2, 1, 1), 2)]);
        let meshes = chunk.query_meshes(&AirOutside);

        assert_eq!(meshes[&1].face_count(), 5);
        assert_eq!(meshes[&1].face_count_for(BlockSide::RIGHT), 0);
        assert_eq!(meshes[&2].face_count(), 5);
        assert_eq!(meshes[&2].face_count_for(BlockSide::LEFT), 0);
    }

    #[test]
    fn same_translucent_material_has_no_seam() {
        let mut chunk = chunk_with(&[(Point3::new(1, 1, 1), -1), (Point3::new(2, 1, 1), -1)]);
        let meshes = chunk.query_meshes(&AirOutside);
        let water = &meshes[&-1];

        assert_eq!(water.face_count(), 10);
        assert_eq!(water.face_count_for(BlockSide::RIGHT), 1);
        assert_eq!(water.face_count_for(BlockSide::LEFT), 1);
    }

    #[test]
    fn different_translucent_materials_keep_their_faces() {
        let mut chunk = chunk_with(&[(Point3::new(1, 1, 1), -1), (Point3::new(2, 1, 1), -2)]);
        let meshes = chunk.query_meshes(&AirOutside);
        assert_eq!(meshes[&-1].face_count(), 6);
        assert_eq!(meshes[&-2].face_count(), 6);
    }

    #[test]
    fn solid_next_to_translucent() {
        let mut chunk = chunk_with(&[(Point3::new(1, 1, 1), 1), (Point3::new(2, 1, 1), -1)]);
        let meshes = chunk.query_meshes(&AirOutside);

        // The solid block shows its face toward the water, the water does not.
        assert_eq!(meshes[&1].face_count(), 6);
        assert_eq!(meshes[&-1].face_count(), 5);
        assert_eq!(meshes[&-1].face_count_for(BlockSide::LEFT), 0);
    }

    #[test]
    fn fully_enclosed_material_is_omitted() {
        let mut chunk = Chunk::new(Point3::new(0, 0, 0), 4).unwrap();
        chunk.fill(Block::new(1));
        chunk.block_mut(Point3::new(1, 1, 1)).material = 2;

        let meshes = chunk.query_meshes(&SolidOutside);
        assert!(meshes.is_empty());
        assert!(chunk.build_mesh_for(2, &SolidOutside).is_none());
        assert!(!chunk.is_dirty());
    }

    #[test]
    fn border_faces_consult_the_neighbors() {
        let mut chunk = chunk_with(&[(Point3::new(0, 0, 0), 1)]);
        assert_eq!(chunk.query_meshes(&SolidOutside)[&1].face_count(), 3);

        chunk.mark_dirty();
        assert_eq!(chunk.query_meshes(&AirOutside)[&1].face_count(), 6);
    }

    #[test]
    fn clean_chunks_return_the_cached_handles() {
        let mut chunk = chunk_with(&[(Point3::new(1, 1, 1), 1)]);

        let first = chunk.query_meshes(&AirOutside)[&1].clone();
        let second = chunk.query_meshes(&AirOutside)[&1].clone();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(chunk.rebuild_count(), 1);
    }

    #[test]
    fn mark_dirty_drops_the_cache_immediately() {
        let mut chunk = chunk_with(&[(Point3::new(1, 1, 1), 1)]);
        let first = chunk.query_meshes(&AirOutside)[&1].clone();

        chunk.mark_dirty();
        assert!(chunk.is_dirty());
        assert!(chunk.cached_meshes().is_empty());

        let rebuilt = chunk.query_meshes(&AirOutside)[&1].clone();
        assert!(!Arc::ptr_eq(&first, &rebuilt));
        assert_eq!(chunk.rebuild_count(), 2);
    }

    #[test]
    fn vertices_are_global_positions() {
        let mut chunk = Chunk::new(Point3::new(-4, 8, 0), 4).unwrap();
        chunk.block_mut(Point3::new(0, 0, 0)).material = 3;

        let meshes = chunk.query_meshes(&AirOutside);
        for vertex in &meshes[&3].vertices {
            let p = vertex.position();
            assert!((-4..=-3).contains(&p.x));
            assert!((8..=9).contains(&p.y));
            assert!((0..=1).contains(&p.z));
        }
    }

    #[test]
    fn ambient_occlusion_darkens_top_faces_under_overhangs() {
        let blocks = [(Point3::new(1, 0, 1), 1), (Point3::new(0, 1, 1), 1)];

        let mut shaded = chunk_with(&blocks);
        let top = shaded.query_meshes(&AirOutside)[&1].clone();
        let darkest = top
            .vertices
            .iter()
            .filter(|v| v.side() == Some(BlockSide::TOP))
            .map(|v| v.ao())
            .fold(1.0f32, f32::min);
        assert!(darkest < 1.0);

        let mut flat = chunk_with(&blocks).with_mesh_options(MeshOptions {
            ambient_occlusion: false,
        });
        let plain = flat.query_meshes(&AirOutside)[&1].clone();
        assert!(plain.vertices.iter().all(|v| v.ao() == 1.0));
    }
}
