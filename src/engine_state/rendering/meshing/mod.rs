//! Mesh generation for voxel rendering.
//!
//! Converts visible block faces into GPU-friendly vertex and index data. The
//! chunk decides *which* faces are visible; this module decides what a face
//! looks like as geometry.
//!
//! # Architecture
//! - [`Face`]: one unit quad on one side of one block
//! - [`Mesh`]: all faces of one material in one chunk
//! - [`ambient_occlusion`]: optional per-vertex darkening of top faces
//!
//! # Usage
//! ```
//! use cgmath::Point3;
//! use voxel_world::{BlockSide, Face, Mesh};
//!
//! let mut mesh = Mesh::new(1);
//! mesh.add_face(&Face::new(Point3::new(0, 0, 0), 1, BlockSide::TOP), [1.0; 4]);
//! assert_eq!(mesh.face_count(), 1);
//! ```

pub mod ambient_occlusion;
mod face;
mod mesh;

pub use face::Face;
pub use mesh::{Mesh, MeshHandle};

/// Knobs for how chunk meshes are built.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MeshOptions {
    /// Darken top-face corners next to solid blocks one layer up.
    pub ambient_occlusion: bool,
}

impl Default for MeshOptions {
    fn default() -> Self {
        MeshOptions {
            ambient_occlusion: true,
        }
    }
}
