//! # Block Module
//!
//! The smallest unit of world data: a block is nothing but a signed material
//! index. Classification follows the sign of that index.
//!
//! | index | meaning     |
//! |-------|-------------|
//! | `0`   | air         |
//! | `> 0` | opaque      |
//! | `< 0` | translucent |

pub mod block_side;

/// The integer type used to store material indices inside blocks.
pub type MaterialIndex = i16;

/// Material index reserved for air.
pub const AIR: MaterialIndex = 0;

/// Represents a single voxel block in the world.
///
/// # Memory Layout
/// The `#[repr(C)]` attribute and the `Pod`/`Zeroable` derives make chunk
/// storage a plain slice of `i16`s. An all-zero block is air, so freshly
/// allocated chunk storage is empty.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Block {
    /// Signed material index, see the module docs.
    pub material: MaterialIndex,
}

impl Block {
    /// Creates a block of the given material.
    pub const fn new(material: MaterialIndex) -> Self {
        Block { material }
    }

    /// The air block.
    pub const fn air() -> Self {
        Block { material: AIR }
    }

    pub fn is_air(&self) -> bool {
        self.material == AIR
    }

    pub fn is_solid(&self) -> bool {
        self.material > AIR
    }

    pub fn is_translucent(&self) -> bool {
        self.material < AIR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_follows_sign() {
        assert!(Block::air().is_air());
        assert!(!Block::air().is_solid());
        assert!(!Block::air().is_translucent());

        assert!(Block::new(3).is_solid());
        assert!(!Block::new(3).is_translucent());

        assert!(Block::new(-1).is_translucent());
        assert!(!Block::new(-1).is_solid());
        assert!(!Block::new(-1).is_air());
    }

    #[test]
    fn zeroed_storage_is_air() {
        let blocks: Vec<Block> = vec![bytemuck::Zeroable::zeroed(); 8];
        assert!(blocks.iter().all(Block::is_air));
        assert_eq!(Block::default(), Block::air());
    }
}
