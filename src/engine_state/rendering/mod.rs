//! # Rendering Data
//!
//! The geometry side of the voxel world: vertex layout and mesh building.
//! Uploading and drawing is left to the mesh consumer.

pub mod meshing;
mod vertex;

pub use vertex::Vertex;
