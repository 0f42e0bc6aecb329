//! # Voxel World Core
//!
//! This module contains the data side of the voxel world: what is stored
//! where, how it is generated and how it is queried.
//!
//! ## Architecture
//!
//! * **Block**: a signed material index, see [`block`]
//! * **Material**: named surface appearance referenced by that index
//! * **Chunk**: fixed-size cube of blocks with its own mesh cache
//! * **Generation**: fills new chunks, pluggable per world
//! * **World**: owns all chunks, creates them lazily and tracks invalidation
//! * **Ray**: voxel traversal for picking and editing
//!
//! ## Data Flow
//!
//! 1. A write to a block makes the world create the owning chunk, which is
//!    generated immediately
//! 2. The edit marks every chunk whose faces it can change as dirty
//! 3. The next mesh query on a dirty chunk rebuilds its meshes, looking
//!    across chunk borders through the world
//! 4. Clean chunks hand out their cached mesh handles

pub mod block;
pub mod chunk;
pub mod generation;
pub mod material;
pub mod ray;
pub mod world;
