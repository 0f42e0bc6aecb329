//! # Engine State Module
//!
//! Everything the voxel world is made of.
//!
//! ## Key Components
//!
//! * `voxels` - Blocks, materials, chunks, generation, the world and ray casting
//! * `rendering` - Vertex layout and per-material mesh building
//! * `config` - JSON world configuration
//! * `error` - The shared error type

pub mod config;
pub mod error;
pub mod rendering;
pub mod voxels;
