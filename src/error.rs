//! Error types for bem-graph
//!
//! Domain-specific error types using thiserror.

use thiserror::Error;

use crate::core::entity::EntityKey;

fn join_cycle(cycle: &[EntityKey]) -> String {
    cycle
        .iter()
        .map(EntityKey::id)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Dependency resolution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolverError {
    /// A cycle made only of strong edges was closed
    #[error("Circular dependency detected: {}", join_cycle(cycle))]
    CircularDependency { cycle: Vec<EntityKey> },
}

impl ResolverError {
    /// Path from the start of the strong trail up to the revisited vertex
    pub fn cycle(&self) -> &[EntityKey] {
        match self {
            Self::CircularDependency { cycle } => cycle,
        }
    }
}

/// Invalid entity descriptors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntityError {
    /// Block name is empty
    #[error("Entity has an empty block name")]
    EmptyBlock,

    /// Modifier value given without a modifier name
    #[error("Entity '{block}' has a modifier value but no modifier name")]
    ModValueWithoutName { block: String },

    /// `false` was used as a modifier value
    #[error("Entity '{block}' uses `false` as value of modifier '{mod_name}'")]
    FalseModValue { block: String, mod_name: String },
}

/// Graph manifest errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// TOML parse error
    #[error("Failed to parse manifest: {source}")]
    Parse { source: toml::de::Error },

    /// TOML serialization error
    #[error("Failed to serialize manifest: {source}")]
    Serialize { source: toml::ser::Error },

    /// One or more validation failures
    #[error("Invalid manifest: {}", errors.join("; "))]
    Invalid { errors: Vec<String> },

    /// Invalid entity descriptor inside the manifest
    #[error("Invalid entity: {0}")]
    Entity(#[from] EntityError),
}

/// Top-level bem-graph error type
#[derive(Error, Debug)]
pub enum BemGraphError {
    /// Resolver error
    #[error("Resolver error: {0}")]
    Resolver(#[from] ResolverError),

    /// Entity error
    #[error("Entity error: {0}")]
    Entity(#[from] EntityError),

    /// Manifest error
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),
}
