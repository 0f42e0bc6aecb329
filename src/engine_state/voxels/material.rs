//! # Material Registry
//!
//! Materials are referenced from blocks by signed index: opaque materials get
//! `1, 2, 3, ...` in registration order, translucent ones `-1, -2, -3, ...`.
//! Index `0` is air and never names a material.
//!
//! The registry is filled once during start-up and then moved into the
//! [`World`](super::world::World), which only exposes it immutably.

use log::error;
use serde::{Deserialize, Serialize};

use crate::engine_state::error::{WorldError, WorldResult};

use super::block::MaterialIndex;

/// Whether blocks of a material let light through.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Opaque,
    Translucent,
}

impl MaterialKind {
    /// Shader used when a material does not name one.
    pub fn default_shader(self) -> &'static str {
        match self {
            MaterialKind::Opaque => "opaque",
            MaterialKind::Translucent => "translucent",
        }
    }
}

/// Named surface appearance of a block.
///
/// Everything besides `name`, `index` and `kind` is passed through untouched
/// to the mesh consumer.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub name: String,
    pub index: MaterialIndex,
    pub kind: MaterialKind,
    /// Name of the shader program the renderer should use.
    pub shader: String,
    pub texture_scale: f32,
    pub metallic: f32,
}

impl Material {
    fn new(name: &str, index: MaterialIndex, kind: MaterialKind) -> Self {
        Material {
            name: name.to_owned(),
            index,
            kind,
            shader: kind.default_shader().to_owned(),
            texture_scale: 1.0,
            metallic: 0.0,
        }
    }
}

/// Ordered lists of opaque and translucent materials.
#[derive(Clone, Debug, Default)]
pub struct MaterialRegistry {
    opaque: Vec<Material>,
    translucent: Vec<Material>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an opaque material and returns its (positive) index.
    pub fn add_opaque(&mut self, name: &str) -> WorldResult<MaterialIndex> {
        self.add(name, MaterialKind::Opaque)
    }

    /// Registers a translucent material and returns its (negative) index.
    pub fn add_translucent(&mut self, name: &str) -> WorldResult<MaterialIndex> {
        self.add(name, MaterialKind::Translucent)
    }

    /// Registers a material of the given kind and returns its index.
    pub fn add(&mut self, name: &str, kind: MaterialKind) -> WorldResult<MaterialIndex> {
        if self.index_of(name).is_some() {
            return Err(WorldError::DuplicateMaterial(name.to_owned()));
        }

        let list = match kind {
            MaterialKind::Opaque => &mut self.opaque,
            MaterialKind::Translucent => &mut self.translucent,
        };

        let limit = MaterialIndex::MAX as usize;
        if list.len() >= limit {
            return Err(WorldError::TooManyMaterials {
                kind: kind.default_shader(),
                limit,
            });
        }

        let ordinal = (list.len() + 1) as MaterialIndex;
        let index = match kind {
            MaterialKind::Opaque => ordinal,
            MaterialKind::Translucent => -ordinal,
        };
        list.push(Material::new(name, index, kind));
        Ok(index)
    }

    /// Mutable access to a registered material, for setting shading
    /// parameters right after registration.
    pub fn get_mut(&mut self, index: MaterialIndex) -> Option<&mut Material> {
        let slot = Self::slot(index)?;
        if index > 0 {
            self.opaque.get_mut(slot)
        } else {
            self.translucent.get_mut(slot)
        }
    }

    /// Looks up a material by block index. Air and unregistered indices yield `None`.
    pub fn from_index(&self, index: MaterialIndex) -> Option<&Material> {
        let slot = Self::slot(index)?;
        if index > 0 {
            self.opaque.get(slot)
        } else {
            self.translucent.get(slot)
        }
    }

    /// Looks up a material by name.
    ///
    /// Materials are set up once at start-up, so an unknown name is a
    /// configuration error.
    pub fn from_name(&self, name: &str) -> WorldResult<&Material> {
        match self.iter().find(|m| m.name == name) {
            Some(material) => Ok(material),
            None => {
                error!("Material `{}' not found", name);
                Err(WorldError::UnknownMaterial(name.to_owned()))
            }
        }
    }

    /// Index of the named material, if registered.
    pub fn index_of(&self, name: &str) -> Option<MaterialIndex> {
        self.iter().find(|m| m.name == name).map(|m| m.index)
    }

    /// `true` for `0` and every registered index.
    pub fn is_valid_index(&self, index: MaterialIndex) -> bool {
        index == 0 || self.from_index(index).is_some()
    }

    /// Opaque materials first, then translucent ones, each in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.opaque.iter().chain(self.translucent.iter())
    }

    pub fn len(&self) -> usize {
        self.opaque.len() + self.translucent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(index: MaterialIndex) -> Option<usize> {
        match index {
            0 => None,
            i => Some(i.unsigned_abs() as usize - 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> MaterialRegistry {
        let mut registry = MaterialRegistry::new();
        registry.add_opaque("grass").unwrap();
        registry.add_opaque("rock").unwrap();
        registry.add_translucent("water").unwrap();
        registry
    }

    #[test]
    fn indices_are_signed_and_one_based() {
        let registry = registry();
        assert_eq!(registry.index_of("grass"), Some(1));
        assert_eq!(registry.index_of("rock"), Some(2));
        assert_eq!(registry.index_of("water"), Some(-1));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn lookup_by_index() {
        let registry = registry();
        assert_eq!(registry.from_index(2).unwrap().name, "rock");
        assert_eq!(registry.from_index(-1).unwrap().name, "water");
        assert_eq!(registry.from_index(-1).unwrap().shader, "translucent");
        assert!(registry.from_index(0).is_none());
        assert!(registry.from_index(3).is_none());
        assert!(registry.from_index(-2).is_none());
        assert!(registry.from_index(MaterialIndex::MIN).is_none());
    }

    #[test]
    fn unknown_name_is_an_error() {
        let registry = registry();
        assert!(matches!(
            registry.from_name("lava"),
            Err(WorldError::UnknownMaterial(name)) if name == "lava"
        ));
        assert_eq!(registry.from_name("water").unwrap().kind, MaterialKind::Translucent);
    }

    #[test]
    fn duplicate_names_are_rejected_across_kinds() {
        let mut registry = registry();
        assert!(matches!(
            registry.add_translucent("grass"),
            Err(WorldError::DuplicateMaterial(_))
        ));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn shading_parameters_can_be_tuned() {
        let mut registry = registry();
        registry.get_mut(2).unwrap().metallic = 0.2;
        assert_eq!(registry.from_index(2).unwrap().metallic, 0.2);
        assert!(registry.get_mut(0).is_none());
    }
}
