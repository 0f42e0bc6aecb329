//! # World Module
//!
//! This module provides the `World` struct which owns every chunk of the voxel
//! world. It serves as the central coordinator for chunk creation, block
//! access, edits and mesh invalidation.
//!
//! ## Architecture
//!
//! The world uses sparse storage: chunks only exist once something referenced
//! them. Reads never allocate; missing chunks read as air. Writes go through
//! [`World::ensure_chunk_at`], which creates and generates the owning chunk on
//! first use.
//!
//! ## Invalidation
//!
//! Editing a block can change the visible faces of up to seven chunks: the
//! chunk itself and any chunk touching the block's faces. [`World::mark_dirty`]
//! marks every chunk in a box around the edit, and creating a chunk marks its
//! 26 existing neighbours, since new solid blocks may cover faces on their
//! borders.

use std::collections::{BTreeMap, HashMap};

use cgmath::{EuclideanSpace, Point3, Vector3};
use log::{debug, info};
use parking_lot::MappedRwLockWriteGuard;
use web_time::Instant;

use crate::core::MtResource;
use crate::engine_state::{
    config::WorldConfig,
    error::{WorldError, WorldResult},
    rendering::meshing::{MeshHandle, MeshOptions},
    voxels::{
        block::{Block, MaterialIndex},
        chunk::{BlockSource, Chunk},
        generation::ChunkGenerator,
        material::{Material, MaterialRegistry},
        ray::RayHit,
    },
};

/// Mesh handles grouped by material, ready to be drawn one material at a time.
pub type RenderJobs = BTreeMap<MaterialIndex, Vec<MeshHandle>>;

/// A voxel world composed of equally sized chunks.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_world::{generation, Block, MaterialRegistry, World};
///
/// let mut materials = MaterialRegistry::new();
/// let stone = materials.add_opaque("stone").unwrap();
/// let mut world = World::new(16, materials, Box::new(generation::empty())).unwrap();
///
/// world.set_block(Point3::new(-1, 0, 0), Block::new(stone)).unwrap();
/// assert_eq!(world.query_block(Point3::new(-1, 0, 0)).material, stone);
/// assert!(world.get_chunk_at(Point3::new(-16, 0, 0)).is_some());
/// ```
pub struct World {
    chunk_size: i32,
    /// Keyed by chunk origin, which always equals the chunk's own origin.
    chunks: HashMap<Point3<i32>, MtResource<Chunk>>,
    materials: MaterialRegistry,
    generator: Box<dyn ChunkGenerator>,
    mesh_options: MeshOptions,
}

impl World {
    /// Creates an empty world.
    ///
    /// The material registry is fixed from here on.
    ///
    /// # Errors
    /// [`WorldError::InvalidChunkSize`] if `chunk_size` is not positive.
    pub fn new(
        chunk_size: i32,
        materials: MaterialRegistry,
        generator: Box<dyn ChunkGenerator>,
    ) -> WorldResult<Self> {
        if chunk_size <= 0 {
            return Err(WorldError::InvalidChunkSize(chunk_size));
        }

        Ok(World {
            chunk_size,
            chunks: HashMap::new(),
            materials,
            generator,
            mesh_options: MeshOptions::default(),
        })
    }

    /// Builds materials, generator and mesh options from a configuration.
    pub fn from_config(config: &WorldConfig) -> WorldResult<Self> {
        let materials = config.build_materials()?;
        let generator = config.generator.build(&materials)?;
        info!(
            "Creating world with chunk size {} and {} materials",
            config.chunk_size,
            materials.len()
        );
        Ok(Self::new(config.chunk_size, materials, generator)?
            .with_mesh_options(config.mesh_options()))
    }

    /// Mesh options for chunks created from now on.
    pub fn with_mesh_options(mut self, mesh_options: MeshOptions) -> Self {
        self.mesh_options = mesh_options;
        self
    }

    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    /// Origin of the chunk containing `pos`.
    ///
    /// Rounds every component down to a multiple of the chunk size, also for
    /// negative coordinates: with size 32, `-1` maps to `-32`.
    pub fn chunk_pos(&self, pos: Point3<i32>) -> Point3<i32> {
        let size = self.chunk_size;
        Point3::new(
            pos.x - pos.x.rem_euclid(size),
            pos.y - pos.y.rem_euclid(size),
            pos.z - pos.z.rem_euclid(size),
        )
    }

    /// Origins of the first and last chunk overlapping `pos ± extent`. The box
    /// is clipped to the `i32` grid.
    fn chunk_box(&self, pos: Point3<i32>, extent: Vector3<i32>) -> (Point3<i32>, Point3<i32>) {
        let min = Point3::new(
            pos.x.saturating_sub(extent.x),
            pos.y.saturating_sub(extent.y),
            pos.z.saturating_sub(extent.z),
        );
        let max = Point3::new(
            pos.x.saturating_add(extent.x),
            pos.y.saturating_add(extent.y),
            pos.z.saturating_add(extent.z),
        );
        (self.chunk_pos(min), self.chunk_pos(max))
    }

    /// Makes sure the chunk containing `pos` exists and returns it.
    ///
    /// A new chunk is generated right away and all of its existing neighbours
    /// are marked dirty. Calling this for an existing chunk does nothing.
    pub fn ensure_chunk_at(&mut self, pos: Point3<i32>) -> WorldResult<&MtResource<Chunk>> {
        let origin = self.chunk_pos(pos);

        if !self.chunks.contains_key(&origin) {
            let start = Instant::now();
            let mut chunk =
                Chunk::new(origin, self.chunk_size)?.with_mesh_options(self.mesh_options);
            self.generator.generate(&mut chunk);
            self.chunks.insert(origin, MtResource::new(chunk));
            self.mark_neighbors_dirty(origin);
            debug!("Generated chunk {:?} in {:?}", origin, start.elapsed());
        }

        Ok(&self.chunks[&origin])
    }

    fn mark_neighbors_dirty(&self, origin: Point3<i32>) {
        for dz in -1..=1 {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if (dx, dy, dz) == (0, 0, 0) {
                        continue;
                    }
                    let offset = |o: i32, d: i32| o.checked_add(d * self.chunk_size);
                    let (Some(x), Some(y), Some(z)) =
                        (offset(origin.x, dx), offset(origin.y, dy), offset(origin.z, dz))
                    else {
                        continue;
                    };
                    if let Some(chunk) = self.chunks.get(&Point3::new(x, y, z)) {
                        chunk.get_mut().mark_dirty();
                    }
                }
            }
        }
    }

    /// The chunk whose origin is exactly `origin`, if it exists.
    pub fn get_chunk_at(&self, origin: Point3<i32>) -> Option<MtResource<Chunk>> {
        self.chunks.get(&origin).cloned()
    }

    /// The chunk containing the block at `pos`, if it exists.
    pub fn query_chunk(&self, pos: Point3<i32>) -> Option<MtResource<Chunk>> {
        self.get_chunk_at(self.chunk_pos(pos))
    }

    /// The block at `pos`. Never creates chunks; missing chunks read as air.
    pub fn query_block(&self, pos: Point3<i32>) -> Block {
        match self.chunks.get(&self.chunk_pos(pos)) {
            Some(chunk) => {
                let chunk = chunk.get();
                *chunk.block(pos - chunk.origin().to_vec())
            }
            None => Block::air(),
        }
    }

    /// Write access to the block at `pos`, creating its chunk if needed.
    ///
    /// Writing through the guard does not mark anything dirty; follow it up
    /// with [`World::mark_dirty`]. The owning chunk stays write-locked while the
    /// guard is alive.
    pub fn query_block_mutable(
        &mut self,
        pos: Point3<i32>,
    ) -> WorldResult<MappedRwLockWriteGuard<'_, Block>> {
        let chunk = self.ensure_chunk_at(pos)?;
        Ok(chunk.map_mut(|chunk| {
            let local = pos - chunk.origin().to_vec();
            chunk.block_mut(local)
        }))
    }

    /// Marks every chunk overlapping the box `pos ± radius` dirty, creating
    /// missing ones. Negative radii count as zero.
    ///
    /// A radius of at least 1 covers all chunks whose meshes can change when
    /// the block at `pos` changes.
    pub fn mark_dirty(&mut self, pos: Point3<i32>, radius: i32) -> WorldResult<()> {
        let radius = radius.max(0);
        let (min, max) = self.chunk_box(pos, Vector3::new(radius, radius, radius));
        let step = self.chunk_size as usize;

        for z in (min.z..=max.z).step_by(step) {
            for y in (min.y..=max.y).step_by(step) {
                for x in (min.x..=max.x).step_by(step) {
                    self.ensure_chunk_at(Point3::new(x, y, z))?
                        .get_mut()
                        .mark_dirty();
                }
            }
        }
        Ok(())
    }

    /// Looks up a material by block index. Air and unknown indices yield `None`.
    pub fn get_material_from_index(&self, index: MaterialIndex) -> Option<&Material> {
        self.materials.from_index(index)
    }

    /// Looks up a material by name; unknown names are logged and returned as
    /// [`WorldError::UnknownMaterial`].
    pub fn get_material_from_name(&self, name: &str) -> WorldResult<&Material> {
        self.materials.from_name(name)
    }

    /// Drops every chunk.
    pub fn clear_chunks(&mut self) {
        info!("Clearing {} chunks", self.chunks.len());
        self.chunks.clear();
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Origins of all existing chunks, sorted by z, then y, then x.
    pub fn chunk_origins(&self) -> Vec<Point3<i32>> {
        let mut origins: Vec<_> = self.chunks.keys().copied().collect();
        origins.sort_by_key(|p| (p.z, p.y, p.x));
        origins
    }

    /// Sets a single block and invalidates every mesh it can affect.
    ///
    /// # Errors
    /// [`WorldError::UnknownMaterial`] if the block's material is not
    /// registered. Nothing is changed in that case.
    pub fn set_block(&mut self, pos: Point3<i32>, block: Block) -> WorldResult<()> {
        if !self.materials.is_valid_index(block.material) {
            return Err(WorldError::UnknownMaterial(block.material.to_string()));
        }

        *self.query_block_mutable(pos)? = block;
        self.mark_dirty(pos, 1)
    }

    /// Turns the block a ray hit into air. Returns `false` for misses.
    pub fn remove_block_at(&mut self, hit: &RayHit) -> WorldResult<bool> {
        if !hit.has_hit {
            return Ok(false);
        }
        self.set_block(hit.block_position, Block::air())?;
        Ok(true)
    }

    /// Places a block in front of the face a ray hit. Returns `false` for
    /// misses and for hits without a face normal, i.e. rays that started
    /// inside a block.
    pub fn place_block_at(&mut self, hit: &RayHit, material: MaterialIndex) -> WorldResult<bool> {
        if !hit.has_hit || hit.hit_normal == Vector3::new(0, 0, 0) {
            return Ok(false);
        }
        self.set_block(hit.block_position + hit.hit_normal, Block::new(material))?;
        Ok(true)
    }

    /// Replaces all chunks by freshly generated ones covering the box
    /// `center ± (radius_xz, radius_y, radius_xz)`.
    pub fn rebuild_region(
        &mut self,
        center: Point3<i32>,
        radius_xz: i32,
        radius_y: i32,
    ) -> WorldResult<()> {
        let start = Instant::now();
        self.clear_chunks();

        let extent = Vector3::new(radius_xz.max(0), radius_y.max(0), radius_xz.max(0));
        let (min, max) = self.chunk_box(center, extent);
        let step = self.chunk_size as usize;

        for z in (min.z..=max.z).step_by(step) {
            for y in (min.y..=max.y).step_by(step) {
                for x in (min.x..=max.x).step_by(step) {
                    self.ensure_chunk_at(Point3::new(x, y, z))?;
                }
            }
        }

        info!(
            "Generated {} chunks around {:?} in {:?}",
            self.chunks.len(),
            center,
            start.elapsed()
        );
        Ok(())
    }

    /// The meshes of the chunk containing `pos`, rebuilt if dirty. `None` if
    /// there is no such chunk.
    pub fn query_meshes_at(&self, pos: Point3<i32>) -> Option<BTreeMap<MaterialIndex, MeshHandle>> {
        let chunk = self.chunks.get(&self.chunk_pos(pos))?;
        let mut chunk = chunk.get_mut();
        let meshes = chunk.query_meshes(self).clone();
        Some(meshes)
    }

    /// Collects the meshes of every chunk accepted by `filter`, rebuilding
    /// dirty chunks on the way.
    ///
    /// Chunks are visited in [`World::chunk_origins`] order, so the handles of
    /// each material are in a stable order.
    pub fn render_jobs<F>(&self, filter: F) -> RenderJobs
    where
        F: Fn(&Chunk) -> bool,
    {
        let mut jobs = RenderJobs::new();
        for origin in self.chunk_origins() {
            let Some(chunk) = self.chunks.get(&origin) else {
                continue;
            };
            let mut chunk = chunk.get_mut();
            if !filter(&*chunk) {
                continue;
            }
            for (material, mesh) in chunk.query_meshes(self) {
                jobs.entry(*material).or_default().push(mesh.clone());
            }
        }
        jobs
    }
}

impl BlockSource for World {
    fn query_block(&self, pos: Point3<i32>) -> Block {
        World::query_block(self, pos)
    }
}
