//! bem-graph - dependency ordering for BEM entities
//!
//! This library computes a deterministic processing order (a build order)
//! for BEM entities connected by ordered and unordered dependencies.
//!
//! # Architecture
//!
//! The crate is organized into two modules:
//!
//! - [`core`] - Graph storage, resolution and naming heuristics (no I/O)
//! - [`error`] - Error types and handling
//!
//! # Example
//!
//! ```
//! use bem_graph::core::bem_graph::BemGraph;
//! use bem_graph::core::entity::EntityName;
//!
//! let mut graph = BemGraph::new();
//! graph
//!     .vertex(EntityName::element("button", "text"), None)
//!     .depends_on(EntityName::block("button"), None);
//!
//! let order = graph
//!     .dependencies_of(&[EntityName::element("button", "text")], None)
//!     .unwrap();
//! let ids: Vec<_> = order.iter().map(|d| d.entity.id()).collect();
//! assert_eq!(ids, vec!["button", "button__text"]);
//! ```

pub mod core;
pub mod error;

#[cfg(test)]
pub mod test_utils;
