//! Natural (naming-convention) ordering
//!
//! BEM names already say a lot about dependencies: an element needs its
//! block, a modifier needs what it modifies, and a key-value modifier
//! usually builds on the boolean form of the same modifier.
//!
//! - [`naturalize`] adds those default strong edges to a graph.
//! - [`sort_naturally`] pre-sorts a request so that parents come first.

use std::collections::HashMap;

use crate::core::entity::{EntityKey, EntityName};
use crate::core::mixed_graph::{EdgeKind, MixedGraph};

/// Tie-break tiers for children placed right after their parent.
/// A lower tier sorts closer to the parent.
const ELEMENT_TIER: usize = 2;
const BOOLEAN_MOD_TIER: usize = 1;
const VALUE_MOD_TIER: usize = 0;

/// Add default strong edges derived from entity names
///
/// A default edge is only added when its target is already a vertex of the
/// graph and the target does not itself strongly depend on the vertex.
/// Targets are looked up by their technology-agnostic key.
pub fn naturalize(graph: &mut MixedGraph) {
    let vertices: Vec<EntityKey> = graph.vertices().cloned().collect();

    for vertex in &vertices {
        let entity = vertex.entity();

        match entity {
            EntityName::ElementMod { .. } => {
                if !entity.is_boolean_mod() {
                    if let Some(boolean) = entity.boolean_form() {
                        add_edge_loosely(graph, vertex, &boolean);
                    }
                }
                let linked = entity
                    .element_form()
                    .is_some_and(|elem| add_edge_loosely(graph, vertex, &elem));
                if !linked {
                    add_edge_loosely(graph, vertex, &entity.block_form());
                }
            }
            EntityName::Element { .. } => {
                add_edge_loosely(graph, vertex, &entity.block_form());
            }
            EntityName::BlockMod { .. } => {
                if !entity.is_boolean_mod() {
                    if let Some(boolean) = entity.boolean_form() {
                        add_edge_loosely(graph, vertex, &boolean);
                    }
                }
                add_edge_loosely(graph, vertex, &entity.block_form());
            }
            EntityName::Block { .. } => {}
        }
    }
}

/// Add `vertex => target` unless the target is absent or depends on `vertex`
fn add_edge_loosely(graph: &mut MixedGraph, vertex: &EntityKey, target: &EntityName) -> bool {
    let Some(dependency) = graph.vertex(&target.id()).cloned() else {
        return false;
    };

    let contradicts = graph
        .direct_successors(&dependency, EdgeKind::Strong, None)
        .iter()
        .any(|successor| successor.id() == vertex.id());
    if contradicts {
        return false;
    }

    tracing::debug!("natural link {} => {}", vertex, dependency);
    graph.add_edge(vertex.clone(), dependency, EdgeKind::Strong);
    true
}

/// Sort entities so that each one follows its natural parent
///
/// Every entity starts with its position as key. Children whose parent is in
/// the same batch are moved right after that parent: elements after their
/// block, boolean modifiers after their element (or block), key-value
/// modifiers after the boolean modifier (or element, or block). The sort is
/// stable and the result is advisory only.
pub fn sort_naturally(entities: &[EntityName]) -> Vec<EntityName> {
    let mut order: HashMap<String, Vec<usize>> = entities
        .iter()
        .enumerate()
        .map(|(idx, entity)| (entity.id(), vec![idx]))
        .collect();
    let mut seq = 1;

    let mut place_after = |order: &mut HashMap<String, Vec<usize>>, entity: &EntityName, parents: &[String], tier: usize| {
        let Some(parent_key) = parents.iter().find_map(|id| order.get(id)).cloned() else {
            return;
        };
        let mut key = parent_key;
        key.extend([tier, seq]);
        seq += 1;
        order.insert(entity.id(), key);
    };

    for entity in entities {
        if let EntityName::Element { .. } = entity {
            place_after(&mut order, entity, &[entity.block_form().id()], ELEMENT_TIER);
        }
    }

    for entity in entities.iter().filter(|e| e.is_boolean_mod()) {
        let mut parents = Vec::with_capacity(2);
        if let Some(elem) = entity.element_form() {
            parents.push(elem.id());
        }
        parents.push(entity.block_form().id());
        place_after(&mut order, entity, &parents, BOOLEAN_MOD_TIER);
    }

    for entity in entities
        .iter()
        .filter(|e| e.mod_val().is_some() && !e.is_boolean_mod())
    {
        let mut parents = Vec::with_capacity(3);
        if let Some(boolean) = entity.boolean_form() {
            parents.push(boolean.id());
        }
        if let Some(elem) = entity.element_form() {
            parents.push(elem.id());
        }
        parents.push(entity.block_form().id());
        place_after(&mut order, entity, &parents, VALUE_MOD_TIER);
    }

    let mut keyed: Vec<(Vec<usize>, &EntityName)> = entities
        .iter()
        .map(|entity| (order.get(&entity.id()).cloned().unwrap_or_default(), entity))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    keyed.into_iter().map(|(_, entity)| entity.clone()).collect()
}
