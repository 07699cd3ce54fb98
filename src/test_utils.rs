//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    use crate::core::entity::{EntityKey, EntityName, ModValue};
    use crate::core::mixed_graph::{EdgeKind, MixedGraph};

    /// Generate a valid BEM name (lowercase alphanumeric with hyphens)
    pub fn bem_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,8}"
    }

    /// Generate a modifier value: boolean or a short name
    pub fn mod_value() -> impl Strategy<Value = ModValue> {
        prop_oneof![
            Just(ModValue::True),
            prop_oneof![Just("s"), Just("m"), Just("l")].prop_map(ModValue::from),
        ]
    }

    /// Generate an entity from a small alphabet so that related entities collide
    pub fn entity_name() -> impl Strategy<Value = EntityName> {
        let block = prop_oneof![Just("a"), Just("b"), Just("c")];
        let elem = prop_oneof![Just("e"), Just("f")];
        let mod_name = prop_oneof![Just("m"), Just("n")];

        prop_oneof![
            block.clone().prop_map(EntityName::block),
            (block.clone(), elem.clone()).prop_map(|(b, e)| EntityName::element(b, e)),
            (block.clone(), mod_name.clone(), mod_value())
                .prop_map(|(b, m, v)| EntityName::block_mod(b, m, v)),
            (block, elem, mod_name, mod_value())
                .prop_map(|(b, e, m, v)| EntityName::elem_mod(b, e, m, v)),
        ]
    }

    /// Vertex key for the numbered test vertex `i`
    pub fn numbered(i: usize) -> EntityKey {
        EntityKey::agnostic(EntityName::block(format!("v{i}")))
    }

    /// Generate `(vertex count, edges)` where every edge goes from a lower to a
    /// higher vertex number, so strong edges alone never close a cycle
    pub fn acyclic_edges(max_vertices: usize) -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
        (2..max_vertices).prop_flat_map(|n| {
            let edges = prop::collection::vec((0..n, 0..n), 0..n * 2).prop_map(|pairs| {
                pairs
                    .into_iter()
                    .filter(|(a, b)| a != b)
                    .map(|(a, b)| (a.min(b), a.max(b)))
                    .collect::<Vec<_>>()
            });
            (Just(n), edges)
        })
    }

    /// Generate `(vertex count, edges)` with arbitrary strong and weak edges
    pub fn mixed_edges(max_vertices: usize) -> impl Strategy<Value = (usize, Vec<(usize, usize, EdgeKind)>)> {
        (2..max_vertices).prop_flat_map(|n| {
            let kind = prop_oneof![Just(EdgeKind::Strong), Just(EdgeKind::Weak)];
            (Just(n), prop::collection::vec((0..n, 0..n, kind), 0..n * 2))
        })
    }

    /// Build a graph over numbered vertices
    pub fn numbered_graph(n: usize, edges: &[(usize, usize, EdgeKind)]) -> MixedGraph {
        let mut graph = MixedGraph::new();
        for i in 0..n {
            graph.add_vertex(numbered(i));
        }
        for &(from, to, kind) in edges {
            graph.add_edge(numbered(from), numbered(to), kind);
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_bem_name_generator(name in bem_name()) {
            prop_assert!(!name.is_empty());
            prop_assert!(!name.contains('_'));
        }

        #[test]
        fn test_entity_name_generator(entity in entity_name()) {
            prop_assert!(!entity.block_name().is_empty());
            prop_assert_eq!(entity.mod_name().is_some(), entity.mod_val().is_some());
        }

        #[test]
        fn test_acyclic_edges_generator((n, edges) in acyclic_edges(12)) {
            for (from, to) in edges {
                prop_assert!(from < to);
                prop_assert!(to < n);
            }
        }
    }
}
