//! # Chunk Iteration Module
//!
//! An iterator over the non-air blocks of a chunk, yielding each block with
//! its local position. Positions come from [`Chunk::local_position`], so the
//! iteration order is the storage order: x fastest, then y, then z.

use std::iter::Enumerate;
use std::slice::Iter;

use cgmath::Point3;

use crate::engine_state::voxels::block::Block;

use super::Chunk;

/// An iterator over all non-air blocks in a chunk.
pub struct ChunkBlockIterator<'a> {
    chunk_ref: &'a Chunk,
    blocks: Enumerate<Iter<'a, Block>>,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` positioned before the first block.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkBlockIterator {
            chunk_ref,
            blocks: chunk_ref.blocks().iter().enumerate(),
        }
    }
}

impl<'a> Iterator for ChunkBlockIterator<'a> {
    type Item = (Point3<i32>, &'a Block);

    fn next(&mut self) -> Option<Self::Item> {
        let chunk = self.chunk_ref;
        self.blocks
            .by_ref()
            .find(|(_, block)| !block.is_air())
            .map(|(index, block)| (chunk.local_position(index), block))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.blocks.size_hint().1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_air_and_reports_local_positions() {
        let mut chunk = Chunk::new(Point3::new(8, 0, -8), 8).unwrap();
        chunk.block_mut(Point3::new(1, 2, 3)).material = 4;
        chunk.block_mut(Point3::new(0, 0, 0)).material = -1;
        chunk.block_mut(Point3::new(7, 7, 7)).material = 2;

        let found: Vec<_> = chunk
            .iter_blocks()
            .map(|(pos, block)| (pos, block.material))
            .collect();

        assert_eq!(
            found,
            vec![
                (Point3::new(0, 0, 0), -1),
                (Point3::new(1, 2, 3), 4),
                (Point3::new(7, 7, 7), 2),
            ]
        );
    }

    #[test]
    fn empty_chunk_yields_nothing() {
        let chunk = Chunk::new(Point3::new(0, 0, 0), 4).unwrap();
        assert_eq!(chunk.iter_blocks().count(), 0);
    }
}
