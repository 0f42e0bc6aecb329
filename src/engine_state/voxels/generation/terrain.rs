//! # Terrain Generation
//!
//! Height-field terrain from fractal Perlin noise. The column height is
//!
//! ```text
//! d = 25 * (n(2x, 2z) + 0.15)
//! d < 0:  d *= water_depth_factor
//! d >= 0: d *= mix(flat_land_factor, hill_height_factor,
//!                  smoothstep(0.5, 0.7, 0.5 + 0.5 * n(0.17x, 0.18z)))
//! ```
//!
//! Blocks at or below `d` are sand below `y = 1`, grass up to a noisy tree
//! line, snow above a noisy snow line and rock in between. Remaining air at
//! or below the sea level becomes water.

use cgmath::Point3;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use crate::engine_state::{
    error::WorldResult,
    voxels::{
        block::{MaterialIndex, AIR},
        chunk::Chunk,
        material::MaterialRegistry,
    },
};

use super::ChunkGenerator;

/// Tunables of the terrain generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    pub seed: u32,
    pub sea_level: i32,
    /// Base frequency of the noise in blocks⁻¹.
    pub frequency: f64,
    pub octaves: usize,
    pub water_depth_factor: f64,
    pub hill_height_factor: f64,
    pub flat_land_factor: f64,
    pub grass: String,
    pub rock: String,
    pub sand: String,
    pub snow: String,
    pub water: String,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        TerrainSettings {
            seed: 1337,
            sea_level: 0,
            frequency: 0.01,
            octaves: 3,
            water_depth_factor: 3.0,
            hill_height_factor: 8.0,
            flat_land_factor: 0.3,
            grass: "grass".to_string(),
            rock: "rock".to_string(),
            sand: "sand".to_string(),
            snow: "snow".to_string(),
            water: "water".to_string(),
        }
    }
}

/// Resolved material indices of the terrain layers.
#[derive(Clone, Copy, Debug)]
struct Layers {
    grass: MaterialIndex,
    rock: MaterialIndex,
    sand: MaterialIndex,
    snow: MaterialIndex,
    water: MaterialIndex,
}

/// Noise terrain with sand beaches, grass, rock, snow caps and water.
pub struct TerrainGenerator {
    settings: TerrainSettings,
    layers: Layers,
    noise: Fbm<Perlin>,
}

/// The noise samples a single column depends on.
struct Column {
    height: f64,
    grass_line: f64,
    snow_line: f64,
}

impl TerrainGenerator {
    /// # Errors
    /// [`WorldError::UnknownMaterial`](crate::WorldError::UnknownMaterial) if
    /// one of the layer materials is not registered.
    pub fn new(settings: TerrainSettings, materials: &MaterialRegistry) -> WorldResult<Self> {
        let index = |name: &str| materials.from_name(name).map(|m| m.index);
        let layers = Layers {
            grass: index(&settings.grass)?,
            rock: index(&settings.rock)?,
            sand: index(&settings.sand)?,
            snow: index(&settings.snow)?,
            water: index(&settings.water)?,
        };
        let noise = Fbm::<Perlin>::new(settings.seed)
            .set_octaves(settings.octaves)
            .set_frequency(settings.frequency);

        Ok(TerrainGenerator {
            settings,
            layers,
            noise,
        })
    }

    pub fn settings(&self) -> &TerrainSettings {
        &self.settings
    }

    fn sample(&self, x: f64, z: f64) -> f64 {
        self.noise.get([x, z])
    }

    /// Terrain height at a global column.
    pub fn height_at(&self, x: i32, z: i32) -> f64 {
        self.column(x, z).height
    }

    fn column(&self, x: i32, z: i32) -> Column {
        let (x, z) = (x as f64, z as f64);
        let s = &self.settings;

        let mut height = 25.0 * (self.sample(2.0 * x, 2.0 * z) + 0.15);
        if height < 0.0 {
            height *= s.water_depth_factor;
        } else {
            let hills = smoothstep(0.5, 0.7, 0.5 + 0.5 * self.sample(0.17 * x, 0.18 * z));
            height *= mix(s.flat_land_factor, s.hill_height_factor, hills);
        }

        Column {
            height,
            grass_line: 6.0 + 4.0 * self.sample(15.17 * x, 17.18 * z),
            snow_line: 10.0 + 5.0 * self.sample(5.17 * x, 7.18 * z),
        }
    }

    /// Material for global height `y` in `column`.
    fn material_at(&self, column: &Column, y: i32) -> MaterialIndex {
        let y = y as f64;
        let layers = self.layers;

        if y <= column.height {
            if y < 1.0 {
                layers.sand
            } else if y < column.grass_line {
                layers.grass
            } else if y > column.snow_line {
                layers.snow
            } else {
                layers.rock
            }
        } else if y <= self.settings.sea_level as f64 {
            layers.water
        } else {
            AIR
        }
    }
}

impl ChunkGenerator for TerrainGenerator {
    fn generate(&self, chunk: &mut Chunk) {
        let origin = chunk.origin();
        let size = chunk.size();

        for z in 0..size {
            for x in 0..size {
                let column = self.column(origin.x + x, origin.z + z);
                for y in 0..size {
                    let material = self.material_at(&column, origin.y + y);
                    chunk.block_mut(Point3::new(x, y, z)).material = material;
                }
            }
        }
    }
}

fn mix(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
