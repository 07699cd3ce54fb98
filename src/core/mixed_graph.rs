//! Mixed dependency graph
//!
//! A directed graph with two kinds of edges between vertices:
//! strong (ordered) edges that the resolved order must honor, and weak
//! (unordered) edges that only pull the target into the result.

use std::collections::HashMap;

use crate::core::entity::EntityKey;
use crate::core::vertex_set::VertexSet;

/// Edge kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Ordered dependency (`depends_on`)
    Strong,
    /// Unordered relation (`link_with`)
    Weak,
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strong => write!(f, "strong"),
            Self::Weak => write!(f, "weak"),
        }
    }
}

/// Dependency graph with strong and weak adjacency lists
#[derive(Debug, Clone, Default)]
pub struct MixedGraph {
    /// All known vertices, in insertion order
    vertices: VertexSet<EntityKey>,
    /// Adjacency list: vertex id -> strong successor ids
    strong: HashMap<String, Vec<String>>,
    /// Adjacency list: vertex id -> weak successor ids
    weak: HashMap<String, Vec<String>>,
}

impl MixedGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a vertex; re-adding an existing id is a no-op
    pub fn add_vertex(&mut self, vertex: EntityKey) -> &mut Self {
        self.vertices.add(vertex);
        self
    }

    pub fn has_vertex(&self, vertex: &EntityKey) -> bool {
        self.vertices.has(vertex)
    }

    /// Look up a registered vertex by canonical id
    pub fn vertex(&self, id: &str) -> Option<&EntityKey> {
        self.vertices.get(id)
    }

    /// Add an edge, registering both ends if needed
    ///
    /// A successor appears at most once in each adjacency list.
    pub fn add_edge(&mut self, from: EntityKey, to: EntityKey, kind: EdgeKind) -> &mut Self {
        let from_id = from.id().to_string();
        let to_id = to.id().to_string();
        self.vertices.add(from);
        self.vertices.add(to);

        let successors = self.adjacency_mut(kind).entry(from_id).or_default();
        if !successors.contains(&to_id) {
            successors.push(to_id);
        }
        self
    }

    /// Direct successors of `vertex` along edges of `kind`
    ///
    /// Without a technology this is exactly what was declared from `vertex`.
    /// With one, successors declared from the technology-agnostic form come
    /// first, then those declared from the form for `tech`, then (for a
    /// vertex bound to another technology) its own; duplicates are dropped.
    /// Unknown vertices have no successors.
    pub fn direct_successors(
        &self,
        vertex: &EntityKey,
        kind: EdgeKind,
        tech: Option<&str>,
    ) -> Vec<&EntityKey> {
        let adjacency = self.adjacency(kind);

        let Some(tech) = tech else {
            return self.resolve_ids(adjacency.get(vertex.id())).collect();
        };

        let mut sources = vec![vertex.to_agnostic(), vertex.with_tech(Some(tech))];
        if vertex.tech().is_some_and(|own| own != tech) {
            sources.push(vertex.clone());
        }

        let mut successors = VertexSet::new();
        for source in &sources {
            successors.extend(self.resolve_ids(adjacency.get(source.id())));
        }
        successors.into_vec()
    }

    /// All registered vertices, in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = &EntityKey> {
        self.vertices.iter()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    fn adjacency(&self, kind: EdgeKind) -> &HashMap<String, Vec<String>> {
        match kind {
            EdgeKind::Strong => &self.strong,
            EdgeKind::Weak => &self.weak,
        }
    }

    fn adjacency_mut(&mut self, kind: EdgeKind) -> &mut HashMap<String, Vec<String>> {
        match kind {
            EdgeKind::Strong => &mut self.strong,
            EdgeKind::Weak => &mut self.weak,
        }
    }

    fn resolve_ids<'a>(
        &'a self,
        ids: Option<&'a Vec<String>>,
    ) -> impl Iterator<Item = &'a EntityKey> + 'a {
        ids.into_iter()
            .flatten()
            .filter_map(|id| self.vertices.get(id))
    }
}
