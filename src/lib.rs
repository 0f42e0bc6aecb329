#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A chunked voxel world: sparse chunk storage, lazy chunk generation,
//! dirty-tracked per-material mesh building with face culling across chunk
//! borders, and ray casting for picking blocks.
//!
//! ## Key Modules
//!
//! * `core` - Shared, lock-guarded resource handles
//! * `engine_state` - The world itself: blocks, chunks, meshes, config and errors
//!
//! ## Architecture
//!
//! The [`World`] owns every [`Chunk`] in a registry keyed by chunk origin.
//! Chunks never point back at the world; when a chunk builds its meshes it is
//! handed the world as a [`BlockSource`] for everything outside its bounds.
//! Rendering is left to the caller: [`World::render_jobs`] returns shared
//! [`Mesh`] handles grouped by material.
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::{Point3, Vector3};
//! use voxel_world::{World, WorldConfig};
//!
//! let config = WorldConfig::from_json_str(
//!     r#"{
//!         "chunk_size": 8,
//!         "materials": [{ "name": "stone", "kind": "opaque" }],
//!         "generator": { "method": "flat", "height": 0, "material": "stone" }
//!     }"#,
//! )
//! .unwrap();
//! let mut world = World::from_config(&config).unwrap();
//! world.rebuild_region(Point3::new(0, 0, 0), 8, 8).unwrap();
//!
//! let hit = world
//!     .ray_cast(Point3::new(0.5, 4.5, 0.5), Vector3::new(0.0, -1.0, 0.0), 16.0)
//!     .unwrap();
//! assert!(hit.has_hit);
//! assert_eq!(hit.block_position, Point3::new(0, -1, 0));
//!
//! let jobs = world.render_jobs(|_| true);
//! assert!(jobs.contains_key(&1));
//! ```

use log::info;

pub mod core;
pub mod engine_state;

pub use engine_state::{
    config::{MaterialConfig, WorldConfig},
    error::{WorldError, WorldResult},
    rendering::{
        meshing::{Face, Mesh, MeshHandle, MeshOptions},
        Vertex,
    },
    voxels::{
        block::{block_side::BlockSide, Block, MaterialIndex, AIR},
        chunk::{BlockSource, Chunk},
        generation::{self, ChunkGenerator, GenerationMethod},
        material::{Material, MaterialKind, MaterialRegistry},
        ray::RayHit,
        world::{RenderJobs, World},
    },
};

/// Sets up `env_logger` on stdout, filtered by `RUST_LOG`.
///
/// Only the first call has an effect.
pub fn init_logger() {
    let initialized = env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .try_init()
        .is_ok();

    if initialized {
        info!("Logger initialized");
    }
}
