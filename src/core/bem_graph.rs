//! BEM dependency graph
//!
//! Builder-style front end over [`MixedGraph`]: declare vertices and their
//! strong (`depends_on`) and weak (`link_with`) dependencies, then ask for
//! the processing order of a set of entities.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::core::entity::{EntityKey, EntityName};
use crate::core::mixed_graph::{EdgeKind, MixedGraph};
use crate::core::natural::{naturalize, sort_naturally};
use crate::core::resolver::resolve;
use crate::error::ResolverError;

/// One entry of a resolved dependency list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub entity: EntityName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech: Option<String>,
}

impl Dependency {
    pub fn new(entity: EntityName, tech: Option<&str>) -> Self {
        Self {
            entity,
            tech: tech.map(str::to_string),
        }
    }
}

/// Dependency graph of BEM entities
#[derive(Debug, Clone, Default)]
pub struct BemGraph {
    graph: MixedGraph,
}

impl BemGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a vertex and return a handle for declaring its dependencies
    pub fn vertex(&mut self, entity: EntityName, tech: Option<&str>) -> VertexBuilder<'_> {
        let vertex = EntityKey::new(entity, tech);
        self.graph.add_vertex(vertex.clone());
        VertexBuilder {
            graph: &mut self.graph,
            vertex,
        }
    }

    /// Processing order for `entities`
    ///
    /// Each entity is requested in its technology-agnostic form and, when
    /// `tech` is given, in the form for `tech` too. Entries that were only
    /// reached through weak edges keep the request order where possible.
    pub fn dependencies_of(
        &self,
        entities: &[EntityName],
        tech: Option<&str>,
    ) -> Result<Vec<Dependency>, ResolverError> {
        let mut start = Vec::with_capacity(entities.len() * 2);
        for entity in entities {
            start.push(EntityKey::agnostic(entity.clone()));
            if tech.is_some() {
                start.push(EntityKey::new(entity.clone(), tech));
            }
        }

        let positions: HashMap<&str, usize> = start
            .iter()
            .enumerate()
            .map(|(pos, vertex)| (vertex.id(), pos))
            .collect();
        let rank = |vertex: &EntityKey| positions.get(vertex.id()).copied().unwrap_or(usize::MAX);

        let resolved = resolve(&self.graph, &start, tech, |a, b| rank(a).cmp(&rank(b)))?;

        let mut seen = HashSet::new();
        Ok(resolved
            .iter()
            .filter_map(|vertex| {
                let dependency = Dependency::new(vertex.entity().clone(), vertex.tech().or(tech));
                seen.insert((dependency.entity.id(), dependency.tech.clone()))
                    .then_some(dependency)
            })
            .collect())
    }

    /// Like [`Self::dependencies_of`], with the request pre-sorted naturally
    pub fn natural_dependencies_of(
        &self,
        entities: &[EntityName],
        tech: Option<&str>,
    ) -> Result<Vec<Dependency>, ResolverError> {
        self.dependencies_of(&sort_naturally(entities), tech)
    }

    /// Add default strong edges derived from entity names
    pub fn naturalize(&mut self) {
        naturalize(&mut self.graph);
    }

    pub fn mixed_graph(&self) -> &MixedGraph {
        &self.graph
    }

    /// Graphviz rendering of the underlying graph
    pub fn to_dot(&self) -> String {
        self.graph.to_dot()
    }
}

/// Handle for declaring the dependencies of one vertex
#[derive(Debug)]
pub struct VertexBuilder<'g> {
    graph: &'g mut MixedGraph,
    vertex: EntityKey,
}

impl VertexBuilder<'_> {
    /// Weak (unordered) dependency
    pub fn link_with(self, entity: EntityName, tech: Option<&str>) -> Self {
        self.link(entity, tech, EdgeKind::Weak)
    }

    /// Strong (ordered) dependency
    pub fn depends_on(self, entity: EntityName, tech: Option<&str>) -> Self {
        self.link(entity, tech, EdgeKind::Strong)
    }

    fn link(self, entity: EntityName, tech: Option<&str>, kind: EdgeKind) -> Self {
        let dependency = EntityKey::new(entity, tech);
        let arrow = match kind {
            EdgeKind::Strong => "=>",
            EdgeKind::Weak => "->",
        };
        tracing::debug!("link {} {} {}", self.vertex, arrow, dependency);

        self.graph.add_edge(self.vertex.clone(), dependency, kind);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(name: &str) -> EntityName {
        EntityName::block(name)
    }

    fn deps(list: &[(&str, Option<&str>)]) -> Vec<Dependency> {
        list.iter()
            .map(|(name, tech)| Dependency::new(block(name), *tech))
            .collect()
    }

    #[test]
    fn test_ordered_dependency() {
        let mut graph = BemGraph::new();
        graph.vertex(block("a"), None).depends_on(block("b"), None);

        let result = graph.dependencies_of(&[block("a")], None).unwrap();
        assert_eq!(result, deps(&[("b", None), ("a", None)]));
    }

    #[test]
    fn test_unordered_dependency() {
        let mut graph = BemGraph::new();
        graph.vertex(block("a"), None).link_with(block("b"), None);

        let result = graph.dependencies_of(&[block("a")], None).unwrap();
        assert_eq!(result, deps(&[("a", None), ("b", None)]));
    }

    #[test]
    fn test_unknown_entity_is_returned_as_is() {
        let graph = BemGraph::new();
        let result = graph.dependencies_of(&[block("a")], Some("css")).unwrap();
        assert_eq!(result, deps(&[("a", Some("css"))]));
    }

    #[test]
    fn test_tech_dependencies() {
        let mut graph = BemGraph::new();
        graph
            .vertex(block("a"), Some("css"))
            .depends_on(block("b"), Some("css"));

        let result = graph.dependencies_of(&[block("a")], Some("css")).unwrap();
        assert_eq!(result, deps(&[("b", Some("css")), ("a", Some("css"))]));

        let plain = graph.dependencies_of(&[block("a")], None).unwrap();
        assert_eq!(plain, deps(&[("a", None)]));
    }

    #[test]
    fn test_agnostic_dependency_applies_to_every_tech() {
        let mut graph = BemGraph::new();
        graph.vertex(block("a"), None).depends_on(block("b"), None);

        let js = graph.dependencies_of(&[block("a")], Some("js")).unwrap();
        assert_eq!(js, deps(&[("b", Some("js")), ("a", Some("js"))]));
    }

    #[test]
    fn test_weak_entries_follow_request_order() {
        let mut graph = BemGraph::new();
        graph
            .vertex(block("x"), None)
            .link_with(block("b"), None)
            .link_with(block("c"), None);

        let result = graph
            .dependencies_of(&[block("x"), block("c"), block("b")], None)
            .unwrap();
        assert_eq!(result, deps(&[("x", None), ("c", None), ("b", None)]));
    }

    #[test]
    fn test_cycle_is_reported() {
        let mut graph = BemGraph::new();
        graph.vertex(block("a"), None).depends_on(block("b"), None);
        graph.vertex(block("b"), None).depends_on(block("a"), None);

        let err = graph.dependencies_of(&[block("a")], None).unwrap_err();
        assert!(matches!(err, ResolverError::CircularDependency { .. }));
    }

    #[test]
    fn test_natural_dependencies() {
        let mut graph = BemGraph::new();
        graph.vertex(block("b"), None);
        graph.vertex(EntityName::element("b", "e"), None);
        graph.naturalize();

        let result = graph
            .natural_dependencies_of(&[EntityName::element("b", "e"), block("b")], None)
            .unwrap();
        let ids: Vec<_> = result.iter().map(|d| d.entity.id()).collect();
        assert_eq!(ids, vec!["b", "b__e"]);
    }
}
