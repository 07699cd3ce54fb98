//! Strongly-linked vertex groups
//!
//! A partition of vertex ids into groups joined by strong edges, built up
//! during a single resolve call. The resolver uses it to decide which
//! finished vertices must be revisited when a weak edge reaches into an
//! already ordered region.

use std::collections::HashMap;

use indexmap::IndexSet;

/// Index of a group in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(usize);

/// Arena of groups plus an id -> group index
#[derive(Debug, Default)]
pub struct TopoGroups {
    /// Dropped groups are left as `None`
    groups: Vec<Option<IndexSet<String>>>,
    index: HashMap<String, GroupId>,
}

impl TopoGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group containing `id`, if any
    pub fn lookup(&self, id: &str) -> Option<GroupId> {
        self.index.get(id).copied()
    }

    /// Group containing `id`, creating a singleton group if absent
    pub fn lookup_create(&mut self, id: &str) -> GroupId {
        if let Some(group) = self.lookup(id) {
            return group;
        }
        let group = GroupId(self.groups.len());
        self.groups.push(Some(IndexSet::from([id.to_string()])));
        self.index.insert(id.to_string(), group);
        group
    }

    /// Put `child_id` and `parent_id` into one group
    ///
    /// The parent's group (created if needed) absorbs the child's group.
    pub fn merge(&mut self, child_id: &str, parent_id: &str) {
        let parent = self.lookup_create(parent_id);

        match self.lookup(child_id) {
            None => {
                if let Some(members) = self.groups[parent.0].as_mut() {
                    members.insert(child_id.to_string());
                }
                self.index.insert(child_id.to_string(), parent);
            }
            Some(child) if child != parent => {
                let absorbed = self.groups[child.0].take().unwrap_or_default();
                for id in &absorbed {
                    self.index.insert(id.clone(), parent);
                }
                if let Some(members) = self.groups[parent.0].as_mut() {
                    members.extend(absorbed);
                }
            }
            Some(_) => {}
        }
    }

    pub fn contains(&self, group: GroupId, id: &str) -> bool {
        self.lookup(id) == Some(group)
    }

    /// Member ids of a group, in the order they joined it
    pub fn members(&self, group: GroupId) -> impl Iterator<Item = &str> {
        self.groups
            .get(group.0)
            .and_then(Option::as_ref)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Live groups, in creation order
    pub fn groups(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.groups
            .iter()
            .enumerate()
            .filter(|(_, g)| g.is_some())
            .map(|(i, _)| GroupId(i))
    }
}
