//! Fake per-vertex ambient occlusion for top faces.
//!
//! Each corner of a top face looks at the three blocks touching it in the
//! layer above: the two edge neighbours and the diagonal one. Solid blocks
//! there darken the corner. Only top faces are shaded; every other face keeps
//! full brightness.

use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::block::{block_side::BlockSide, Block};

use super::face::Face;

/// Brightness of a corner given which of its three upper neighbours are solid.
///
/// Two solid edge neighbours fully enclose the corner regardless of the
/// diagonal.
pub fn vertex_ao(edge_a: bool, edge_b: bool, diagonal: bool) -> f32 {
    if edge_a && edge_b {
        return 0.0;
    }
    let occluders = u8::from(edge_a) + u8::from(edge_b) + u8::from(diagonal);
    1.0 - f32::from(occluders) / 3.0
}

/// Per-corner brightness for `face`, in vertex order `[ll, lr, ul, ur]`.
///
/// `query` resolves global block positions, possibly across chunk borders.
pub fn face_ao<F>(face: &Face, block: Point3<i32>, query: F) -> [f32; 4]
where
    F: Fn(Point3<i32>) -> Block,
{
    if face.block_side != BlockSide::TOP {
        return [1.0; 4];
    }

    let solid = |offset: Vector3<i32>| query(block + offset).is_solid();
    face.corners().map(|corner| {
        let dx = if corner.x > block.x { 1 } else { -1 };
        let dz = if corner.z > block.z { 1 } else { -1 };
        vertex_ao(
            solid(Vector3::new(dx, 1, 0)),
            solid(Vector3::new(0, 1, dz)),
            solid(Vector3::new(dx, 1, dz)),
        )
    })
}

/// Whether the quad should be split along its `lr`-`ul` diagonal instead of
/// `ll`-`ur`, so that it is always split along its brighter diagonal.
pub fn should_flip(ao: &[f32; 4]) -> bool {
    let [ll, lr, ul, ur] = *ao;
    ll + ur < lr + ul
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_brightness_levels() {
        assert_eq!(vertex_ao(false, false, false), 1.0);
        assert!((vertex_ao(false, false, true) - 2.0 / 3.0).abs() < 1e-6);
        assert!((vertex_ao(true, false, true) - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(vertex_ao(true, true, false), 0.0);
    }

    #[test]
    fn side_faces_are_never_shaded() {
        let block = Point3::new(0, 0, 0);
        let face = Face::new(block, 1, BlockSide::LEFT);
        assert_eq!(face_ao(&face, block, |_| Block::new(1)), [1.0; 4]);
    }

    #[test]
    fn wall_on_one_side_darkens_adjacent_corners() {
        let block = Point3::new(0, 0, 0);
        let face = Face::new(block, 1, BlockSide::TOP);
        // A wall one layer up along x = -1.
        let ao = face_ao(&face, block, |p| {
            if p.x == -1 && p.y == 1 {
                Block::new(1)
            } else {
                Block::air()
            }
        });

        for (corner, value) in face.corners().iter().zip(ao) {
            if corner.x == 0 {
                assert!((value - 1.0 / 3.0).abs() < 1e-6);
            } else {
                assert_eq!(value, 1.0);
            }
        }
    }

    #[test]
    fn splits_along_the_brighter_diagonal() {
        assert!(!should_flip(&[1.0, 1.0, 1.0, 1.0]));
        assert!(should_flip(&[0.0, 1.0, 1.0, 1.0]));
        assert!(!should_flip(&[1.0, 0.0, 1.0, 1.0]));
    }
}
