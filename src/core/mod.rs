//! Core business logic module
//!
//! This module contains all graph logic for bem-graph.
//! It has NO I/O operations.
//!
//! # Submodules
//!
//! - [`entity`] - BEM entity names and vertex keys
//! - [`vertex_set`] - Insertion-ordered vertex set
//! - [`mixed_graph`] - Graph with strong and weak edges
//! - [`topo_groups`] - Strongly-linked groups used during resolution
//! - [`resolver`] - Dependency resolution
//! - [`natural`] - Default edges and pre-sort from BEM naming
//! - [`bem_graph`] - Builder-style front end
//! - [`manifest`] - TOML graph declarations
//! - [`dot`] - Graphviz export

pub mod bem_graph;
pub mod dot;
pub mod entity;
pub mod manifest;
pub mod mixed_graph;
pub mod natural;
pub mod resolver;
pub mod topo_groups;
pub mod vertex_set;
