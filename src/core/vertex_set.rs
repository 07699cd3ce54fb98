//! Insertion-ordered vertex set
//!
//! Deduplicates vertices by their canonical id and iterates them in the
//! order they were first added.

use indexmap::IndexMap;

use crate::core::entity::EntityKey;

/// Ordered set of vertices, unique by id
///
/// Works for owned keys (graph storage) and borrowed keys (resolver results).
#[derive(Debug, Clone)]
pub struct VertexSet<V> {
    items: IndexMap<String, V>,
}

impl<V> Default for VertexSet<V> {
    fn default() -> Self {
        Self {
            items: IndexMap::new(),
        }
    }
}

impl<V: AsRef<EntityKey>> VertexSet<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex; returns false if one with the same id is already present
    pub fn add(&mut self, vertex: V) -> bool {
        let id = vertex.as_ref().id();
        if self.items.contains_key(id) {
            return false;
        }
        self.items.insert(id.to_string(), vertex);
        true
    }

    pub fn has(&self, vertex: &EntityKey) -> bool {
        self.items.contains_key(vertex.id())
    }

    pub fn get(&self, id: &str) -> Option<&V> {
        self.items.get(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.items.values()
    }

    pub fn into_vec(self) -> Vec<V> {
        self.items.into_values().collect()
    }
}

impl<V: AsRef<EntityKey>> FromIterator<V> for VertexSet<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut set = Self::new();
        for vertex in iter {
            set.add(vertex);
        }
        set
    }
}

impl<V: AsRef<EntityKey>> Extend<V> for VertexSet<V> {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for vertex in iter {
            self.add(vertex);
        }
    }
}
