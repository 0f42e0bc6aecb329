//! Vertex data structures for voxel meshes.
//!
//! This module defines the vertex format handed to the mesh consumer. It is a
//! plain `#[repr(C)]` struct so the consumer can upload a `&[Vertex]` with
//! `bytemuck::cast_slice` without any conversion.

use cgmath::Point3;

use crate::engine_state::voxels::block::block_side::BlockSide;

/// A vertex in a chunk mesh.
///
/// # Memory Layout
/// - Position: 3x i32 (12 bytes), global block-corner coordinates
/// - Face id: i32 (4 bytes), `±(axis + 1)` (see [`BlockSide`])
/// - Ambient occlusion: f32 (4 bytes), 1.0 = fully lit
///
/// Total size: 20 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    x: i32,
    y: i32,
    z: i32,
    face: i32,
    ao: f32,
}

impl Vertex {
    /// Creates a new vertex at a global corner position.
    pub fn new(pos: Point3<i32>, side: BlockSide, ao: f32) -> Self {
        Vertex {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            face: side.face_id(),
            ao,
        }
    }

    pub fn position(&self) -> Point3<i32> {
        Point3::new(self.x, self.y, self.z)
    }

    /// The raw compact face id.
    pub fn face_id(&self) -> i32 {
        self.face
    }

    /// The decoded face. `None` only for vertices not built by this crate.
    pub fn side(&self) -> Option<BlockSide> {
        BlockSide::from_face_id(self.face)
    }

    pub fn ao(&self) -> f32 {
        self.ao
    }
}
