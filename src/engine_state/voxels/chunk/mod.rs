//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a dense cube of `size³` blocks
//! anchored at a world-aligned origin, plus the cache of meshes built from it.
//!
//! ## Addressing
//!
//! Blocks are stored in one flat vector. A local position `(x, y, z)` with
//! every component in `[0, size)` lives at
//!
//! ```text
//! index(x, y, z) = x + y * size + z * size * size
//! ```
//!
//! Storage access, iteration and mesh building all go through
//! [`Chunk::local_index`] / [`Chunk::local_position`], so they can never
//! disagree about where a block is.
//!
//! ## Neighbours
//!
//! A chunk does not keep pointers to the chunks around it. Queries for global
//! positions outside its bounds are forwarded to a [`BlockSource`], normally
//! the owning [`World`](super::world::World), which answers air for regions
//! that were never generated.

use std::collections::BTreeMap;

use cgmath::{EuclideanSpace, Point3};
use log::error;

use crate::engine_state::{
    error::{WorldError, WorldResult},
    rendering::meshing::{MeshHandle, MeshOptions},
};

use super::block::{Block, MaterialIndex};

pub mod chunk_iteration;
mod chunk_meshing;

pub use chunk_iteration::ChunkBlockIterator;

/// Read-only block lookup by global position.
///
/// Implemented by the world so chunks can see across their own borders.
pub trait BlockSource {
    /// Returns the block at `pos`, or air if nothing is stored there.
    fn query_block(&self, pos: Point3<i32>) -> Block;
}

/// A fixed-size cubic region of the voxel grid.
///
/// Chunks are the unit of generation, mesh caching and dirty tracking.
#[derive(Debug)]
pub struct Chunk {
    /// Global position of the block at local `(0, 0, 0)`; a multiple of `size`.
    origin: Point3<i32>,
    /// Edge length in blocks.
    size: i32,
    /// `size³` blocks, see the module docs for the layout.
    blocks: Vec<Block>,
    /// Set whenever the cached meshes may no longer match the blocks.
    dirty: bool,
    /// Visible geometry per material. Only valid while `dirty` is false.
    meshes: BTreeMap<MaterialIndex, MeshHandle>,
    mesh_options: MeshOptions,
    /// How often the mesh cache was rebuilt.
    rebuilds: u64,
}

impl Chunk {
    /// Creates a chunk filled with air.
    ///
    /// # Errors
    /// - [`WorldError::InvalidChunkSize`] if `size` is not positive
    /// - [`WorldError::MisalignedOrigin`] if any origin component is not a
    ///   multiple of `size`
    pub fn new(origin: Point3<i32>, size: i32) -> WorldResult<Self> {
        if size <= 0 {
            return Err(WorldError::InvalidChunkSize(size));
        }
        if origin.x % size != 0 || origin.y % size != 0 || origin.z % size != 0 {
            error!("Chunk origin {:?} must be a multiple of size {}", origin, size);
            return Err(WorldError::MisalignedOrigin { origin, size });
        }

        let volume = (size as usize).pow(3);
        Ok(Chunk {
            origin,
            size,
            blocks: vec![Block::air(); volume],
            dirty: true,
            meshes: BTreeMap::new(),
            mesh_options: MeshOptions::default(),
            rebuilds: 0,
        })
    }

    /// Sets how this chunk builds its meshes. Invalidates the mesh cache.
    pub fn with_mesh_options(mut self, mesh_options: MeshOptions) -> Self {
        self.mesh_options = mesh_options;
        self.mark_dirty();
        self
    }

    pub fn origin(&self) -> Point3<i32> {
        self.origin
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn mesh_options(&self) -> MeshOptions {
        self.mesh_options
    }

    /// Flat storage index of a local position.
    ///
    /// Every component of `local` must lie in `[0, size)`.
    pub fn local_index(&self, local: Point3<i32>) -> usize {
        debug_assert!(
            self.is_local(local),
            "local position {:?} outside chunk of size {}",
            local,
            self.size
        );
        let size = self.size as usize;
        local.x as usize + local.y as usize * size + local.z as usize * size * size
    }

    /// Inverse of [`Chunk::local_index`].
    pub fn local_position(&self, index: usize) -> Point3<i32> {
        let size = self.size as usize;
        Point3::new(
            (index % size) as i32,
            (index / size % size) as i32,
            (index / (size * size)) as i32,
        )
    }

    /// `true` if every component of `local` lies in `[0, size)`.
    pub fn is_local(&self, local: Point3<i32>) -> bool {
        let range = 0..self.size;
        range.contains(&local.x) && range.contains(&local.y) && range.contains(&local.z)
    }

    /// The block at a local position.
    ///
    /// # Panics
    /// Out-of-range positions are a caller bug. They trip a debug assertion
    /// and may otherwise panic on the slice index.
    pub fn block(&self, local: Point3<i32>) -> &Block {
        &self.blocks[self.local_index(local)]
    }

    /// Mutable access to the block at a local position.
    ///
    /// Writing through this reference does not mark the chunk dirty.
    pub fn block_mut(&mut self, local: Point3<i32>) -> &mut Block {
        let index = self.local_index(local);
        &mut self.blocks[index]
    }

    /// `true` if the global position `world_pos` lies inside this chunk.
    pub fn contains(&self, world_pos: Point3<i32>) -> bool {
        self.is_local(world_pos - self.origin.to_vec())
    }

    /// The block at a global position.
    ///
    /// Positions inside this chunk are answered locally; everything else is
    /// forwarded to `neighbors`.
    pub fn query_block<S>(&self, world_pos: Point3<i32>, neighbors: &S) -> Block
    where
        S: BlockSource + ?Sized,
    {
        if self.contains(world_pos) {
            *self.block(world_pos - self.origin.to_vec())
        } else {
            neighbors.query_block(world_pos)
        }
    }

    /// All blocks in storage order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Overwrites every block. Marks the chunk dirty.
    pub fn fill(&mut self, block: Block) {
        self.blocks.fill(block);
        self.mark_dirty();
    }

    /// Iterates over all non-air blocks with their local positions.
    pub fn iter_blocks(&self) -> ChunkBlockIterator<'_> {
        ChunkBlockIterator::new(self)
    }

    /// Geometric center in world space.
    pub fn center(&self) -> Point3<f32> {
        let half = self.size as f32 / 2.0;
        Point3::new(
            self.origin.x as f32 + half,
            self.origin.y as f32 + half,
            self.origin.z as f32 + half,
        )
    }

    /// Horizontal visibility check: a chunk counts as in range while its
    /// center, measured on the xz-plane and padded by `1.9 * size`, is within
    /// `distance` of `pos`.
    pub fn is_within_distance(&self, pos: Point3<f32>, distance: f32) -> bool {
        let center = self.center();
        let dx = center.x - pos.x;
        let dz = center.z - pos.z;
        (dx * dx + dz * dz).sqrt() - self.size as f32 * 1.9 <= distance
    }
}
