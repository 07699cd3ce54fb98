//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::cmp::Ordering;
use std::sync::Once;

use bem_graph::core::entity::{EntityKey, EntityName};
use bem_graph::core::mixed_graph::{EdgeKind, MixedGraph};

static TRACING: Once = Once::new();

/// Install a test subscriber once per test binary (honors `RUST_LOG`)
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive(tracing::Level::WARN.into()),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Agnostic key for a block
pub fn block(name: &str) -> EntityKey {
    EntityKey::agnostic(EntityName::block(name))
}

/// Agnostic key for an element
#[allow(dead_code)]
pub fn elem(block: &str, elem: &str) -> EntityKey {
    EntityKey::agnostic(EntityName::element(block, elem))
}

/// Build a graph from `(from, to, kind)` triples over blocks
#[allow(dead_code)]
pub fn graph_of(edges: &[(&str, &str, EdgeKind)]) -> MixedGraph {
    let mut graph = MixedGraph::new();
    for &(from, to, kind) in edges {
        graph.add_edge(block(from), block(to), kind);
    }
    graph
}

/// Tie-break by canonical id
#[allow(dead_code)]
pub fn by_id(a: &EntityKey, b: &EntityKey) -> Ordering {
    a.id().cmp(b.id())
}

/// Sample manifest TOML for testing
#[allow(dead_code)]
pub const SAMPLE_MANIFEST: &str = r#"
[settings]
naturalize = true
tech = "css"

[[entity]]
block = "button"
links = [{ block = "icon" }]

[[entity]]
block = "button"
elem = "text"

[[entity]]
block = "button"
mod_name = "size"
mod_val = "l"

[[entity]]
block = "button"
mod_name = "size"

[[entity]]
block = "icon"
tech = "css"
depends_on = [{ block = "sprite", tech = "css" }]
"#;
