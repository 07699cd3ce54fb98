//! BEM entity names and graph vertex keys
//!
//! An entity is a block, an element of a block, or a modifier of either.
//! A vertex key pairs an entity with an optional technology.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::EntityError;

/// Separator between block and element in canonical ids
const ELEM_DELIM: &str = "__";
/// Separator between a name and its modifier name/value
const MOD_DELIM: &str = "_";
/// Separator between an entity id and its technology
const TECH_DELIM: &str = "@";

/// Value of a modifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModValue {
    /// Boolean modifier (`block_mod`)
    True,
    /// Key-value modifier (`block_mod_val`)
    Value(String),
}

impl ModValue {
    /// Whether this is the boolean form
    pub fn is_true(&self) -> bool {
        matches!(self, Self::True)
    }
}

impl From<&str> for ModValue {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl From<String> for ModValue {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl fmt::Display for ModValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::True => write!(f, "true"),
            Self::Value(v) => write!(f, "{v}"),
        }
    }
}

/// A BEM entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "EntityDescriptor", into = "EntityDescriptor")]
pub enum EntityName {
    /// `block`
    Block { block: String },
    /// `block__elem`
    Element { block: String, elem: String },
    /// `block_mod` / `block_mod_val`
    BlockMod {
        block: String,
        mod_name: String,
        mod_val: ModValue,
    },
    /// `block__elem_mod` / `block__elem_mod_val`
    ElementMod {
        block: String,
        elem: String,
        mod_name: String,
        mod_val: ModValue,
    },
}

impl EntityName {
    pub fn block(block: impl Into<String>) -> Self {
        Self::Block {
            block: block.into(),
        }
    }

    pub fn element(block: impl Into<String>, elem: impl Into<String>) -> Self {
        Self::Element {
            block: block.into(),
            elem: elem.into(),
        }
    }

    pub fn block_mod(
        block: impl Into<String>,
        mod_name: impl Into<String>,
        mod_val: impl Into<ModValue>,
    ) -> Self {
        Self::BlockMod {
            block: block.into(),
            mod_name: mod_name.into(),
            mod_val: mod_val.into(),
        }
    }

    pub fn elem_mod(
        block: impl Into<String>,
        elem: impl Into<String>,
        mod_name: impl Into<String>,
        mod_val: impl Into<ModValue>,
    ) -> Self {
        Self::ElementMod {
            block: block.into(),
            elem: elem.into(),
            mod_name: mod_name.into(),
            mod_val: mod_val.into(),
        }
    }

    /// Block name
    pub fn block_name(&self) -> &str {
        match self {
            Self::Block { block }
            | Self::Element { block, .. }
            | Self::BlockMod { block, .. }
            | Self::ElementMod { block, .. } => block,
        }
    }

    /// Element name, if any
    pub fn elem(&self) -> Option<&str> {
        match self {
            Self::Element { elem, .. } | Self::ElementMod { elem, .. } => Some(elem),
            Self::Block { .. } | Self::BlockMod { .. } => None,
        }
    }

    /// Modifier name, if any
    pub fn mod_name(&self) -> Option<&str> {
        match self {
            Self::BlockMod { mod_name, .. } | Self::ElementMod { mod_name, .. } => Some(mod_name),
            Self::Block { .. } | Self::Element { .. } => None,
        }
    }

    /// Modifier value, if any
    pub fn mod_val(&self) -> Option<&ModValue> {
        match self {
            Self::BlockMod { mod_val, .. } | Self::ElementMod { mod_val, .. } => Some(mod_val),
            Self::Block { .. } | Self::Element { .. } => None,
        }
    }

    /// Whether this is a modifier with the boolean value
    pub fn is_boolean_mod(&self) -> bool {
        self.mod_val().is_some_and(ModValue::is_true)
    }

    /// The plain block this entity belongs to
    pub fn block_form(&self) -> Self {
        Self::block(self.block_name())
    }

    /// The plain element this entity belongs to, if it is part of an element
    pub fn element_form(&self) -> Option<Self> {
        self.elem().map(|elem| Self::element(self.block_name(), elem))
    }

    /// The same modifier with the boolean value
    pub fn boolean_form(&self) -> Option<Self> {
        match self {
            Self::BlockMod {
                block, mod_name, ..
            } => Some(Self::block_mod(block.clone(), mod_name.clone(), ModValue::True)),
            Self::ElementMod {
                block,
                elem,
                mod_name,
                ..
            } => Some(Self::elem_mod(
                block.clone(),
                elem.clone(),
                mod_name.clone(),
                ModValue::True,
            )),
            Self::Block { .. } | Self::Element { .. } => None,
        }
    }

    /// Canonical BEM id
    pub fn id(&self) -> String {
        let mut id = self.block_name().to_string();
        if let Some(elem) = self.elem() {
            id.push_str(ELEM_DELIM);
            id.push_str(elem);
        }
        if let (Some(name), Some(val)) = (self.mod_name(), self.mod_val()) {
            id.push_str(MOD_DELIM);
            id.push_str(name);
            if let ModValue::Value(v) = val {
                id.push_str(MOD_DELIM);
                id.push_str(v);
            }
        }
        id
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

/// Modifier value as written in descriptors: `true` or a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawModValue {
    Bool(bool),
    Str(String),
}

/// Nested modifier descriptor (`mod = { name, val }`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub val: Option<RawModValue>,
}

/// Plain descriptor form of an entity
///
/// Accepts both `mod = { name, val }` and flat `mod_name`/`mod_val` fields.
/// A modifier without a value is boolean.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    pub block: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elem: Option<String>,

    #[serde(default, rename = "mod", skip_serializing_if = "Option::is_none")]
    pub modifier: Option<ModDescriptor>,

    #[serde(default, skip_serializing)]
    pub mod_name: Option<String>,

    #[serde(default, skip_serializing)]
    pub mod_val: Option<RawModValue>,
}

impl TryFrom<EntityDescriptor> for EntityName {
    type Error = EntityError;

    fn try_from(desc: EntityDescriptor) -> Result<Self, Self::Error> {
        if desc.block.is_empty() {
            return Err(EntityError::EmptyBlock);
        }

        let (mod_name, raw_val) = match desc.modifier {
            Some(m) => (Some(m.name), m.val),
            None => (desc.mod_name, desc.mod_val),
        };

        let Some(mod_name) = mod_name else {
            if raw_val.is_some() {
                return Err(EntityError::ModValueWithoutName { block: desc.block });
            }
            return Ok(match desc.elem {
                Some(elem) => Self::element(desc.block, elem),
                None => Self::block(desc.block),
            });
        };

        let mod_val = match raw_val {
            None | Some(RawModValue::Bool(true)) => ModValue::True,
            Some(RawModValue::Str(v)) => ModValue::Value(v),
            Some(RawModValue::Bool(false)) => {
                return Err(EntityError::FalseModValue {
                    block: desc.block,
                    mod_name,
                })
            }
        };

        Ok(match desc.elem {
            Some(elem) => Self::elem_mod(desc.block, elem, mod_name, mod_val),
            None => Self::block_mod(desc.block, mod_name, mod_val),
        })
    }
}

impl From<EntityName> for EntityDescriptor {
    fn from(entity: EntityName) -> Self {
        let modifier = match (entity.mod_name(), entity.mod_val()) {
            (Some(name), Some(val)) => Some(ModDescriptor {
                name: name.to_string(),
                val: Some(match val {
                    ModValue::True => RawModValue::Bool(true),
                    ModValue::Value(v) => RawModValue::Str(v.clone()),
                }),
            }),
            _ => None,
        };

        Self {
            block: entity.block_name().to_string(),
            elem: entity.elem().map(str::to_string),
            modifier,
            mod_name: None,
            mod_val: None,
        }
    }
}

/// Vertex identity: an entity with an optional technology
///
/// Equality, hashing and ordering use the canonical id only.
#[derive(Debug, Clone)]
pub struct EntityKey {
    entity: EntityName,
    tech: Option<String>,
    id: String,
}

impl EntityKey {
    pub fn new(entity: EntityName, tech: Option<&str>) -> Self {
        let id = match tech {
            Some(t) => format!("{}{TECH_DELIM}{t}", entity.id()),
            None => entity.id(),
        };
        Self {
            entity,
            tech: tech.map(str::to_string),
            id,
        }
    }

    /// Key without a technology
    pub fn agnostic(entity: EntityName) -> Self {
        Self::new(entity, None)
    }

    pub fn entity(&self) -> &EntityName {
        &self.entity
    }

    pub fn tech(&self) -> Option<&str> {
        self.tech.as_deref()
    }

    /// Canonical id (`entity` or `entity@tech`)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Same entity with another technology (or none)
    pub fn with_tech(&self, tech: Option<&str>) -> Self {
        Self::new(self.entity.clone(), tech)
    }

    /// Same entity without a technology
    pub fn to_agnostic(&self) -> Self {
        self.with_tech(None)
    }
}

impl PartialEq for EntityKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EntityKey {}

impl Hash for EntityKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for EntityKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EntityKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

impl AsRef<EntityKey> for EntityKey {
    fn as_ref(&self) -> &EntityKey {
        self
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl From<EntityName> for EntityKey {
    fn from(entity: EntityName) -> Self {
        Self::agnostic(entity)
    }
}
