//! # Block Side Module
//!
//! The six faces of a unit cube and their compact face identifiers.

use cgmath::Vector3;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/// Represents the six possible faces of a voxel block.
///
/// The discriminant of each variant is its compact face id, `±(axis + 1)` with
/// the sign of the face normal. This is the value stored per vertex, letting a
/// shader recover the normal without a full normal vector.
#[repr(i8)]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug, FromPrimitive)]
pub enum BlockSide {
    /// Facing negative X
    LEFT = -1,
    /// Facing positive X
    RIGHT = 1,
    /// Facing negative Y
    BOTTOM = -2,
    /// Facing positive Y
    TOP = 2,
    /// Facing negative Z
    BACK = -3,
    /// Facing positive Z
    FRONT = 3,
}

impl BlockSide {
    /// All six faces. The order matches the neighbour scan of the mesh builder:
    /// negative side first, then positive, for X, Y and Z.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::LEFT,
            BlockSide::RIGHT,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::BACK,
            BlockSide::FRONT,
        ]
    }

    /// The compact face id, `±1`, `±2` or `±3`.
    pub fn face_id(self) -> i32 {
        self as i8 as i32
    }

    /// Decodes a compact face id. Returns `None` for anything but `±1..=±3`.
    pub fn from_face_id(face_id: i32) -> Option<Self> {
        BlockSide::from_i32(face_id)
    }

    /// Axis index of the face normal: 0 = X, 1 = Y, 2 = Z.
    pub fn axis(self) -> usize {
        (self.face_id().unsigned_abs() - 1) as usize
    }

    /// Outward unit normal.
    pub fn normal(self) -> Vector3<i32> {
        let sign = self.face_id().signum();
        match self.axis() {
            0 => Vector3::new(sign, 0, 0),
            1 => Vector3::new(0, sign, 0),
            _ => Vector3::new(0, 0, sign),
        }
    }

    pub fn opposite(self) -> BlockSide {
        match self {
            BlockSide::LEFT => BlockSide::RIGHT,
            BlockSide::RIGHT => BlockSide::LEFT,
            BlockSide::BOTTOM => BlockSide::TOP,
            BlockSide::TOP => BlockSide::BOTTOM,
            BlockSide::BACK => BlockSide::FRONT,
            BlockSide::FRONT => BlockSide::BACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_ids_decode_back() {
        for side in BlockSide::all() {
            assert_eq!(BlockSide::from_face_id(side.face_id()), Some(side));
        }
        assert_eq!(BlockSide::from_face_id(0), None);
        assert_eq!(BlockSide::from_face_id(4), None);
        assert_eq!(BlockSide::from_face_id(-4), None);
    }

    #[test]
    fn normals_are_axis_aligned_and_opposed() {
        assert_eq!(BlockSide::RIGHT.normal(), Vector3::new(1, 0, 0));
        assert_eq!(BlockSide::BOTTOM.normal(), Vector3::new(0, -1, 0));
        assert_eq!(BlockSide::FRONT.normal(), Vector3::new(0, 0, 1));

        for side in BlockSide::all() {
            assert_eq!(side.normal(), -side.opposite().normal());
            assert_eq!(side.axis(), side.opposite().axis());
        }
    }
}
