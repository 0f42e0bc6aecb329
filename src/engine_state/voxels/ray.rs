//! # Ray Casting
//!
//! Voxel traversal (3D DDA) through the world. The ray visits every block it
//! passes through in order, one block per step, and stops at the first
//! non-air block or when its range is used up.
//!
//! Each step moves to the nearest block boundary along the ray. Ties between
//! axes go to X, then Y, then Z. A small epsilon is added to every step so the
//! ray ends up strictly inside the next block instead of on the boundary.

use cgmath::{EuclideanSpace, Point3, Vector3};

use crate::engine_state::{
    error::{WorldError, WorldResult},
    voxels::{block::Block, world::World},
};

/// Distance added to each step to get past the boundary.
const BOUNDARY_EPSILON: f32 = 0.001;

/// Result of [`World::ray_cast`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    /// `true` if the ray stopped at a non-air block.
    pub has_hit: bool,
    /// Where the ray stopped.
    pub hit_position: Point3<f32>,
    /// Axis-aligned normal of the face the ray entered `block_position`
    /// through, pointing back toward the ray origin. Zero if the ray never
    /// left its starting block.
    pub hit_normal: Vector3<i32>,
    /// The block at `block_position`.
    pub block: Block,
    /// The last block visited.
    pub block_position: Point3<i32>,
    /// Parametric distance travelled, in units of `dir`.
    pub distance: f32,
}

impl World {
    /// Casts a ray from `pos` along `dir` for at most `max_range`.
    ///
    /// `dir` does not need to be normalized; the range is measured in
    /// multiples of it. Axes where `dir` is zero are never crossed.
    ///
    /// # Errors
    /// - [`WorldError::DegenerateRay`] if `dir` is zero or not finite
    /// - [`WorldError::InvalidRange`] if `max_range` is not positive and finite
    /// - [`WorldError::RayOutOfBounds`] if `pos` lies outside the `i32` block
    ///   grid
    ///
    /// A ray that would step past the edge of the block grid ends there as a
    /// miss.
    pub fn ray_cast(
        &self,
        pos: Point3<f32>,
        dir: Vector3<f32>,
        max_range: f32,
    ) -> WorldResult<RayHit> {
        let finite = |v: Vector3<f32>| v.x.is_finite() && v.y.is_finite() && v.z.is_finite();
        if !finite(dir) || dir == Vector3::new(0.0, 0.0, 0.0) || !finite(pos.to_vec()) {
            return Err(WorldError::DegenerateRay);
        }
        if !(max_range.is_finite() && max_range > 0.0) {
            return Err(WorldError::InvalidRange(max_range));
        }

        let (Some(x), Some(y), Some(z)) = (
            grid_coordinate(pos.x),
            grid_coordinate(pos.y),
            grid_coordinate(pos.z),
        ) else {
            return Err(WorldError::RayOutOfBounds(pos));
        };

        let step = Vector3::new(sign(dir.x), sign(dir.y), sign(dir.z));
        let mut block_position = Point3::new(x, y, z);
        let mut position = pos;
        let mut remaining = max_range;
        let mut distance = 0.0;
        let mut axis_normal = Vector3::new(0, 0, 0);

        let mut chunk = self.query_chunk(block_position);
        let mut block = self.query_block(block_position);

        while block.is_air() && remaining > 0.0 {
            let next = |axis: usize| {
                if dir[axis] == 0.0 {
                    return f32::INFINITY;
                }
                let boundary = block_position[axis] as f32 + f32::from(u8::from(step[axis] > 0));
                ((boundary - position[axis]) / dir[axis]).max(0.0) + BOUNDARY_EPSILON
            };
            let (tx, ty, tz) = (next(0), next(1), next(2));

            let (axis, t) = if tx <= ty && tx <= tz {
                (0, tx)
            } else if ty <= tz {
                (1, ty)
            } else {
                (2, tz)
            };

            let Some(coordinate) = block_position[axis].checked_add(step[axis]) else {
                break;
            };
            block_position[axis] = coordinate;
            axis_normal = Vector3::new(0, 0, 0);
            axis_normal[axis] = 1;

            let left_chunk = match &chunk {
                Some(current) => !current.get().contains(block_position),
                None => true,
            };
            if left_chunk {
                chunk = self.query_chunk(block_position);
            }

            block = match &chunk {
                Some(current) => {
                    let current = current.get();
                    *current.block(block_position - current.origin().to_vec())
                }
                None => Block::air(),
            };

            position += dir * t;
            distance += t;
            remaining -= t;
        }

        Ok(RayHit {
            has_hit: !block.is_air(),
            hit_position: position,
            hit_normal: Vector3::new(
                -axis_normal.x * step.x,
                -axis_normal.y * step.y,
                -axis_normal.z * step.z,
            ),
            block,
            block_position,
            distance,
        })
    }
}

/// The block coordinate containing `v`, if it fits the `i32` grid.
fn grid_coordinate(v: f32) -> Option<i32> {
    let floor = v.floor();
    if floor >= i32::MIN as f32 && floor < i32::MAX as f32 {
        Some(floor as i32)
    } else {
        None
    }
}

fn sign(v: f32) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}
