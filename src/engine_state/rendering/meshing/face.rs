//! Quad faces of single blocks, before they are turned into vertices.
//!
//! Corners are stored in global block-corner coordinates, so a face of the
//! block at `p` spans `p` to `p + (1, 1, 1)` along its plane.

use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::block::{block_side::BlockSide, MaterialIndex};

/// Represents a single quad face of a voxel in a mesh.
///
/// A face is defined by four corner points (lower-left, lower-right,
/// upper-left, upper-right) in global block-corner coordinates. Seen from
/// outside the block, `ll -> lr -> ur -> ul` runs counter-clockwise, so
/// `(lr - ll) x (ul - ll)` is the outward normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub ll: Point3<i32>,
    pub lr: Point3<i32>,
    pub ul: Point3<i32>,
    pub ur: Point3<i32>,
    pub material: MaterialIndex,
    pub block_side: BlockSide,
}

impl Face {
    /// Creates the face on `block_side` of the unit cube whose minimum corner
    /// is `block` (a global block position).
    pub fn new(block: Point3<i32>, material: MaterialIndex, block_side: BlockSide) -> Self {
        let [ll, lr, ul, ur] = Self::corner_offsets(block_side).map(|o| block + o);
        Face {
            ll,
            lr,
            ul,
            ur,
            material,
            block_side,
        }
    }

    /// Corners in vertex order: `[ll, lr, ul, ur]`.
    pub fn corners(&self) -> [Point3<i32>; 4] {
        [self.ll, self.lr, self.ul, self.ur]
    }

    fn corner_offsets(block_side: BlockSide) -> [Vector3<i32>; 4] {
        let v = Vector3::new;
        match block_side {
            BlockSide::LEFT => [v(0, 0, 0), v(0, 0, 1), v(0, 1, 0), v(0, 1, 1)],
            BlockSide::RIGHT => [v(1, 0, 1), v(1, 0, 0), v(1, 1, 1), v(1, 1, 0)],
            BlockSide::BOTTOM => [v(0, 0, 0), v(1, 0, 0), v(0, 0, 1), v(1, 0, 1)],
            BlockSide::TOP => [v(0, 1, 1), v(1, 1, 1), v(0, 1, 0), v(1, 1, 0)],
            BlockSide::BACK => [v(1, 0, 0), v(0, 0, 0), v(1, 1, 0), v(0, 1, 0)],
            BlockSide::FRONT => [v(0, 0, 1), v(1, 0, 1), v(0, 1, 1), v(1, 1, 1)],
        }
    }
}
