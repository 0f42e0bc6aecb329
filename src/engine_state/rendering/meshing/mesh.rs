//! Mesh data structures for chunk rendering.
//!
//! A chunk produces one [`Mesh`] per material it contains. Each visible face
//! becomes four vertices and six indices (two triangles).

use std::sync::Arc;

use crate::engine_state::{
    rendering::Vertex,
    voxels::block::{block_side::BlockSide, MaterialIndex},
};

use super::{ambient_occlusion, face::Face};

/// Opaque handle to finished, immutable geometry.
///
/// Handles are what the chunk caches and what the renderer keeps; cloning
/// one never copies the geometry.
pub type MeshHandle = Arc<Mesh>;

/// Renderable geometry for all visible faces of a single material in a chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// The material every face in this mesh belongs to
    pub material: MaterialIndex,
    /// Four vertices per face, in `[ll, lr, ul, ur]` order
    pub vertices: Vec<Vertex>,
    /// Six indices per face, counter-clockwise seen from outside
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Creates an empty mesh for `material`.
    pub fn new(material: MaterialIndex) -> Self {
        Mesh {
            material,
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Appends one face with the given per-corner brightness.
    pub fn add_face(&mut self, face: &Face, ao: [f32; 4]) {
        let flipped = ambient_occlusion::should_flip(&ao);
        let faces_so_far = self.face_count() as u32;
        self.vertices.extend(Self::generate_face_vertices(face, ao));
        self.indices.extend(Self::generate_face_indices(faces_so_far, flipped));
    }

    /// Generates the four corner vertices of a face.
    pub fn generate_face_vertices(face: &Face, ao: [f32; 4]) -> [Vertex; 4] {
        let corners = face.corners();
        [0, 1, 2, 3].map(|i| Vertex::new(corners[i], face.block_side, ao[i]))
    }

    /// Generates index data for a face, offset by the number of faces already
    /// in the mesh.
    ///
    /// The quad is split along `ll`-`ur` unless `flipped`, in which case it is
    /// split along `lr`-`ul`.
    pub fn generate_face_indices(num_faces_generated: u32, flipped: bool) -> [u32; 6] {
        let base = num_faces_generated * 4;
        let pattern = if flipped {
            [0, 1, 2, 1, 3, 2]
        } else {
            [0, 1, 3, 0, 3, 2]
        };
        pattern.map(|i| base + i)
    }

    pub fn face_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Number of faces pointing toward `side`.
    pub fn face_count_for(&self, side: BlockSide) -> usize {
        self.vertices
            .chunks_exact(4)
            .filter(|quad| quad[0].side() == Some(side))
            .count()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
