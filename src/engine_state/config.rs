//! # World Configuration
//!
//! JSON description of a world: chunk size, mesh options, the material list
//! and how new chunks are generated. Every field is optional, missing ones
//! fall back to [`WorldConfig::default`].
//!
//! ```json
//! {
//!     "chunk_size": 16,
//!     "materials": [
//!         { "name": "stone", "kind": "opaque" },
//!         { "name": "water", "kind": "translucent", "shader": "water" }
//!     ],
//!     "generator": { "method": "flat", "height": 4, "material": "stone" }
//! }
//! ```

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::engine_state::{
    error::WorldResult,
    rendering::meshing::MeshOptions,
    voxels::{
        generation::GenerationMethod,
        material::{MaterialKind, MaterialRegistry},
    },
};

/// Default edge length of a chunk in blocks.
pub const DEFAULT_CHUNK_SIZE: i32 = 32;

/// One entry of the material list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialConfig {
    pub name: String,
    pub kind: MaterialKind,
    /// Defaults to the kind's shader.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shader: Option<String>,
    #[serde(default = "default_texture_scale")]
    pub texture_scale: f32,
    #[serde(default)]
    pub metallic: f32,
}

fn default_texture_scale() -> f32 {
    1.0
}

impl MaterialConfig {
    pub fn new(name: &str, kind: MaterialKind) -> Self {
        MaterialConfig {
            name: name.to_owned(),
            kind,
            shader: None,
            texture_scale: default_texture_scale(),
            metallic: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub chunk_size: i32,
    pub ambient_occlusion: bool,
    /// Registered in list order, so the n-th opaque entry gets index `n`.
    pub materials: Vec<MaterialConfig>,
    pub generator: GenerationMethod,
}

impl Default for WorldConfig {
    fn default() -> Self {
        let opaque = |name: &str| MaterialConfig {
            texture_scale: 3.35,
            ..MaterialConfig::new(name, MaterialKind::Opaque)
        };
        let mut rock = opaque("rock");
        rock.metallic = 0.2;
        let mut water = MaterialConfig::new("water", MaterialKind::Translucent);
        water.shader = Some("water".to_owned());
        water.texture_scale = 10.0;

        WorldConfig {
            chunk_size: DEFAULT_CHUNK_SIZE,
            ambient_occlusion: true,
            materials: vec![
                opaque("grass"),
                rock,
                opaque("sand"),
                opaque("snow"),
                water,
            ],
            generator: GenerationMethod::default(),
        }
    }
}

impl WorldConfig {
    pub fn from_json_str(json: &str) -> WorldResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> WorldResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        info!("Loaded world configuration from {}", path.display());
        Ok(config)
    }

    pub fn mesh_options(&self) -> MeshOptions {
        MeshOptions {
            ambient_occlusion: self.ambient_occlusion,
        }
    }

    /// Registers the configured materials in order.
    ///
    /// # Errors
    /// Duplicate names and registry overflow are reported by the registry.
    pub fn build_materials(&self) -> WorldResult<MaterialRegistry> {
        let mut registry = MaterialRegistry::new();
        for entry in &self.materials {
            let index = registry.add(&entry.name, entry.kind)?;
            if let Some(material) = registry.get_mut(index) {
                if let Some(shader) = &entry.shader {
                    material.shader = shader.clone();
                }
                material.texture_scale = entry.texture_scale;
                material.metallic = entry.metallic;
            }
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::error::WorldError;

    #[test]
    fn empty_json_is_the_default_config() {
        assert_eq!(WorldConfig::from_json_str("{}").unwrap(), WorldConfig::default());
    }

    #[test]
    fn default_materials() {
        let registry = WorldConfig::default().build_materials().unwrap();
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.index_of("grass"), Some(1));
        assert_eq!(registry.index_of("snow"), Some(4));
        assert_eq!(registry.index_of("water"), Some(-1));

        let water = registry.from_name("water").unwrap();
        assert_eq!(water.shader, "water");
        assert_eq!(water.texture_scale, 10.0);
        assert_eq!(registry.from_name("rock").unwrap().metallic, 0.2);
        assert_eq!(registry.from_name("snow").unwrap().texture_scale, 3.35);
        assert_eq!(registry.from_name("sand").unwrap().shader, "opaque");
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = WorldConfig::from_json_str(
            r#"{
                "chunk_size": 16,
                "ambient_occlusion": false,
                "materials": [{ "name": "stone", "kind": "opaque", "texture_scale": 2.0 }],
                "generator": { "method": "solid", "material": "stone" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.chunk_size, 16);
        assert!(!config.mesh_options().ambient_occlusion);
        let registry = config.build_materials().unwrap();
        assert_eq!(registry.from_name("stone").unwrap().texture_scale, 2.0);
        assert!(config.generator.build(&registry).is_ok());
    }

    #[test]
    fn duplicate_material_names_are_rejected() {
        let config = WorldConfig {
            materials: vec![
                MaterialConfig::new("glass", MaterialKind::Opaque),
                MaterialConfig::new("glass", MaterialKind::Translucent),
            ],
            ..WorldConfig::default()
        };
        assert!(matches!(
            config.build_materials(),
            Err(WorldError::DuplicateMaterial(name)) if name == "glass"
        ));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            WorldConfig::from_json_str(r#"{ "chunk_size": "big" }"#),
            Err(WorldError::Config(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            WorldConfig::load("/nonexistent/world.json"),
            Err(WorldError::Io(_))
        ));
    }
}
