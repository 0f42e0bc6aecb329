//! # Core Module
//!
//! Shared resource handles used by the voxel world.
//!
//! ## Key Components
//! - `MtResource`: reference-counted resource with read-write locking and
//!   mapped guards, used for chunk ownership inside the world registry
//!
//! ## Usage
//! ```rust
//! use voxel_world::core::MtResource;
//!
//! let counter = MtResource::new(0);
//! *counter.get_mut() += 1;
//! assert_eq!(*counter.get(), 1);
//! ```

pub mod mt_resource;

pub use mt_resource::MtResource;
