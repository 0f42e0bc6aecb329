//! # Chunk Generation
//!
//! A freshly created chunk is filled exactly once by the world's
//! [`ChunkGenerator`]. Any `Fn(&mut Chunk)` closure works as a generator; the
//! built-in ones are selected through [`GenerationMethod`]:
//!
//! - `terrain`: noise height field with sand, grass, rock, snow and water
//! - `flat`: a single material below a fixed height
//! - `solid`: completely filled chunks
//! - `checkerboard`: alternating material and air, for testing
//! - `random`: scattered blocks, deterministic per chunk
//! - `empty`: air only
//!
//! Generators must only write to the chunk they are given.

use cgmath::{EuclideanSpace, Point3};
use serde::{Deserialize, Serialize};

use crate::engine_state::{
    error::WorldResult,
    voxels::{
        block::{Block, MaterialIndex},
        chunk::Chunk,
        material::MaterialRegistry,
    },
};

mod terrain;

pub use terrain::{TerrainGenerator, TerrainSettings};

/// Fills a newly created chunk.
pub trait ChunkGenerator {
    fn generate(&self, chunk: &mut Chunk);
}

impl<F> ChunkGenerator for F
where
    F: Fn(&mut Chunk),
{
    fn generate(&self, chunk: &mut Chunk) {
        self(chunk)
    }
}

/// The method used to generate new chunks, as read from the configuration.
///
/// Materials are referenced by name and resolved by [`GenerationMethod::build`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum GenerationMethod {
    Terrain(TerrainSettings),
    /// Every block with global `y < height` is `material`.
    Flat { height: i32, material: String },
    Solid { material: String },
    Checkerboard { material: String },
    /// Each block is air with probability `sparseness`.
    Random {
        material: String,
        sparseness: f64,
        #[serde(default)]
        seed: u64,
    },
    Empty,
}

impl Default for GenerationMethod {
    fn default() -> Self {
        GenerationMethod::Terrain(TerrainSettings::default())
    }
}

impl GenerationMethod {
    /// Resolves material names and creates the generator.
    ///
    /// # Errors
    /// [`WorldError::UnknownMaterial`](crate::WorldError::UnknownMaterial) if
    /// a referenced material is not registered.
    pub fn build(&self, materials: &MaterialRegistry) -> WorldResult<Box<dyn ChunkGenerator>> {
        let index = |name: &str| materials.from_name(name).map(|m| m.index);

        let generator: Box<dyn ChunkGenerator> = match self {
            GenerationMethod::Terrain(settings) => {
                Box::new(TerrainGenerator::new(settings.clone(), materials)?)
            }
            GenerationMethod::Flat { height, material } => {
                Box::new(flat(*height, index(material)?))
            }
            GenerationMethod::Solid { material } => Box::new(solid(index(material)?)),
            GenerationMethod::Checkerboard { material } => {
                Box::new(checkerboard(index(material)?))
            }
            GenerationMethod::Random {
                material,
                sparseness,
                seed,
            } => Box::new(random(index(material)?, *sparseness, *seed)),
            GenerationMethod::Empty => Box::new(empty()),
        };
        Ok(generator)
    }
}

/// Assigns every block of `chunk` from its global position.
pub fn fill_by_position<F>(chunk: &mut Chunk, block_at: F)
where
    F: Fn(Point3<i32>) -> Block,
{
    let origin = chunk.origin().to_vec();
    let size = chunk.size();
    for z in 0..size {
        for y in 0..size {
            for x in 0..size {
                let local = Point3::new(x, y, z);
                *chunk.block_mut(local) = block_at(local + origin);
            }
        }
    }
}

/// Leaves chunks as air.
pub fn empty() -> impl Fn(&mut Chunk) {
    |_chunk: &mut Chunk| {}
}

/// Fills chunks completely with `material`.
pub fn solid(material: MaterialIndex) -> impl Fn(&mut Chunk) {
    move |chunk: &mut Chunk| chunk.fill(Block::new(material))
}

/// Fills everything below global `height` with `material`.
pub fn flat(height: i32, material: MaterialIndex) -> impl Fn(&mut Chunk) {
    move |chunk: &mut Chunk| {
        fill_by_position(chunk, |p| {
            if p.y < height {
                Block::new(material)
            } else {
                Block::air()
            }
        })
    }
}

/// 3D checkerboard in global coordinates, so patterns line up across chunks.
pub fn checkerboard(material: MaterialIndex) -> impl Fn(&mut Chunk) {
    move |chunk: &mut Chunk| {
        fill_by_position(chunk, |p| {
            if (p.x + p.y + p.z).rem_euclid(2) == 0 {
                Block::new(material)
            } else {
                Block::air()
            }
        })
    }
}

/// Scatters `material` with density `1 - sparseness`. The pattern only
/// depends on `seed` and the chunk origin.
pub fn random(material: MaterialIndex, sparseness: f64, seed: u64) -> impl Fn(&mut Chunk) {
    move |chunk: &mut Chunk| {
        let mut rng = fastrand::Rng::with_seed(seed ^ origin_hash(chunk.origin()));
        let size = chunk.size();
        for z in 0..size {
            for y in 0..size {
                for x in 0..size {
                    if rng.f64() >= sparseness {
                        chunk.block_mut(Point3::new(x, y, z)).material = material;
                    }
                }
            }
        }
    }
}

fn origin_hash(origin: Point3<i32>) -> u64 {
    let mix = |v: i32, k: u64| (v as u32 as u64).wrapping_mul(k);
    mix(origin.x, 0x9E37_79B9_7F4A_7C15)
        ^ mix(origin.y, 0xC2B2_AE3D_27D4_EB4F)
        ^ mix(origin.z, 0x1656_67B1_9E37_79F9)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> MaterialRegistry {
        let mut registry = MaterialRegistry::new();
        registry.add_opaque("stone").unwrap();
        registry
    }

    fn generated(method: &GenerationMethod, origin: Point3<i32>) -> Chunk {
        let generator = method.build(&registry()).unwrap();
        let mut chunk = Chunk::new(origin, 4).unwrap();
        generator.generate(&mut chunk);
        chunk
    }

    #[test]
    fn flat_uses_global_height() {
        let method = GenerationMethod::Flat {
            height: 2,
            material: "stone".into(),
        };

        let low = generated(&method, Point3::new(0, 0, 0));
        assert!(low.block(Point3::new(3, 1, 3)).is_solid());
        assert!(low.block(Point3::new(3, 2, 3)).is_air());

        let below = generated(&method, Point3::new(0, -4, 0));
        assert!(below.blocks().iter().all(Block::is_solid));
    }

    #[test]
    fn checkerboard_alternates() {
        let chunk = generated(
            &GenerationMethod::Checkerboard {
                material: "stone".into(),
            },
            Point3::new(-4, 0, 0),
        );
        let solid = chunk.iter_blocks().count();
        assert_eq!(solid, 32);
        assert!(chunk.block(Point3::new(0, 0, 0)).is_solid());
        assert!(chunk.block(Point3::new(1, 0, 0)).is_air());
    }

    #[test]
    fn random_is_repeatable_per_chunk() {
        let method = GenerationMethod::Random {
            material: "stone".into(),
            sparseness: 0.5,
            seed: 7,
        };
        let a = generated(&method, Point3::new(4, 0, 0));
        let b = generated(&method, Point3::new(4, 0, 0));
        assert_eq!(a.blocks(), b.blocks());
    }

    #[test]
    fn solid_and_empty() {
        let solid = generated(
            &GenerationMethod::Solid {
                material: "stone".into(),
            },
            Point3::new(0, 0, 0),
        );
        assert!(solid.blocks().iter().all(|b| b.material == 1));

        let empty = generated(&GenerationMethod::Empty, Point3::new(0, 0, 0));
        assert!(empty.blocks().iter().all(Block::is_air));
    }

    #[test]
    fn unknown_material_names_fail_to_build() {
        let method = GenerationMethod::Solid {
            material: "lava".into(),
        };
        assert!(method.build(&registry()).is_err());
    }

    #[test]
    fn closures_are_generators() {
        let generator = |chunk: &mut Chunk| chunk.block_mut(Point3::new(0, 0, 0)).material = 1;
        let mut chunk = Chunk::new(Point3::new(0, 0, 0), 4).unwrap();
        generator.generate(&mut chunk);
        assert_eq!(chunk.iter_blocks().count(), 1);
    }

    #[test]
    fn methods_parse_from_json() {
        let method: GenerationMethod =
            serde_json::from_str(r#"{ "method": "flat", "height": 3, "material": "stone" }"#)
                .unwrap();
        assert_eq!(
            method,
            GenerationMethod::Flat {
                height: 3,
                material: "stone".into()
            }
        );

        let method: GenerationMethod = serde_json::from_str(r#"{ "method": "empty" }"#).unwrap();
        assert_eq!(method, GenerationMethod::Empty);

        let method: GenerationMethod =
            serde_json::from_str(r#"{ "method": "terrain", "seed": 3 }"#).unwrap();
        assert!(matches!(method, GenerationMethod::Terrain(s) if s.seed == 3));
    }
}
