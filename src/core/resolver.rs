//! Dependency resolution
//!
//! Turns a set of start vertices into one processing order over a
//! [`MixedGraph`]. Strong edges are honored (a vertex comes after everything
//! it strongly depends on) and closing a cycle of strong edges is an error.
//! Vertices only reachable through weak edges are collected separately and
//! appended after the ordered part, sorted by a caller supplied tie-break.
//!
//! The traversal is a depth-first search driven by an explicit stack of
//! frames. When a vertex reached through a weak edge strongly depends on a
//! region that was already ordered without it, that whole region (its topo
//! group) is marked unvisited again and gets reordered in the new context.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::iter::{Chain, Copied};
use std::slice;

use crate::core::entity::EntityKey;
use crate::core::mixed_graph::{EdgeKind, MixedGraph};
use crate::core::topo_groups::TopoGroups;
use crate::core::vertex_set::VertexSet;
use crate::error::ResolverError;

/// Visit state of a vertex; absent from the map means unvisited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Finished,
}

/// How a vertex was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Strong,
    Weak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    StrongSuccessors,
    WeakSuccessors,
}

#[derive(Debug)]
struct Frame<'g> {
    vertex: &'g EntityKey,
    visit: Visit,
    phase: Phase,
    successors: Vec<&'g EntityKey>,
    cursor: usize,
    /// Trail of this frame's caller, held while a weak excursion runs
    saved_crumbs: Option<Vec<&'g EntityKey>>,
}

enum Step<'g> {
    Descend(Frame<'g>),
    Continue,
    Done,
}

/// Result of a resolve call: the ordered prefix followed by the unordered suffix
///
/// Iterating does not consume or mutate anything, so it can be repeated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<'g> {
    ordered: Vec<&'g EntityKey>,
    unordered: Vec<&'g EntityKey>,
}

impl<'g> Resolved<'g> {
    /// Vertices whose position is constrained by strong edges
    pub fn ordered(&self) -> &[&'g EntityKey] {
        &self.ordered
    }

    /// Vertices reached only through weak edges, in tie-break order
    pub fn unordered(&self) -> &[&'g EntityKey] {
        &self.unordered
    }

    pub fn iter(&self) -> Copied<Chain<slice::Iter<'_, &'g EntityKey>, slice::Iter<'_, &'g EntityKey>>> {
        self.ordered.iter().chain(self.unordered.iter()).copied()
    }

    pub fn len(&self) -> usize {
        self.ordered.len() + self.unordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty() && self.unordered.is_empty()
    }

    /// Canonical ids in result order
    pub fn ids(&self) -> Vec<&'g str> {
        self.iter().map(EntityKey::id).collect()
    }
}

impl<'a, 'g> IntoIterator for &'a Resolved<'g> {
    type Item = &'g EntityKey;
    type IntoIter = Copied<Chain<slice::Iter<'a, &'g EntityKey>, slice::Iter<'a, &'g EntityKey>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Resolve `start` vertices into a single processing order
///
/// `tech` selects technology-aware successor lookup (see
/// [`MixedGraph::direct_successors`]). `weak_tie_break` orders the vertices
/// that were only reached through weak edges.
pub fn resolve<'g, I, F>(
    graph: &'g MixedGraph,
    start: I,
    tech: Option<&str>,
    mut weak_tie_break: F,
) -> Result<Resolved<'g>, ResolverError>
where
    I: IntoIterator<Item = &'g EntityKey>,
    F: FnMut(&EntityKey, &EntityKey) -> Ordering,
{
    let mut traversal = Traversal::new(graph, tech);

    for vertex in start {
        traversal.visit(vertex)?;
    }

    let ordered: VertexSet<&EntityKey> = traversal.ordered.into_iter().collect();
    let mut unordered: Vec<&EntityKey> = traversal
        .unordered
        .into_vec()
        .into_iter()
        .filter(|v| !ordered.has(v))
        .collect();
    unordered.sort_by(|a, b| weak_tie_break(*a, *b));

    tracing::debug!(
        "Resolved {} ordered and {} unordered vertices",
        ordered.len(),
        unordered.len()
    );

    Ok(Resolved {
        ordered: ordered.into_vec(),
        unordered,
    })
}

/// State owned by one resolve call
struct Traversal<'g> {
    graph: &'g MixedGraph,
    tech: Option<String>,
    marks: HashMap<&'g str, Mark>,
    /// Strong results in finishing order (may repeat after invalidation)
    ordered: Vec<&'g EntityKey>,
    ordered_ids: HashSet<&'g str>,
    unordered: VertexSet<&'g EntityKey>,
    /// Current strong path, used for cycle reporting
    crumbs: Vec<&'g EntityKey>,
    topo: TopoGroups,
}

impl<'g> Traversal<'g> {
    fn new(graph: &'g MixedGraph, tech: Option<&str>) -> Self {
        Self {
            graph,
            tech: tech.map(str::to_string),
            marks: HashMap::new(),
            ordered: Vec::new(),
            ordered_ids: HashSet::new(),
            unordered: VertexSet::new(),
            crumbs: Vec::new(),
            topo: TopoGroups::new(),
        }
    }

    fn mark(&self, id: &str) -> Mark {
        self.marks.get(id).copied().unwrap_or(Mark::Unvisited)
    }

    fn successors(&self, vertex: &'g EntityKey, kind: EdgeKind) -> Vec<&'g EntityKey> {
        self.graph
            .direct_successors(vertex, kind, self.tech.as_deref())
    }

    /// Strong visit of a start vertex and everything reachable from it
    fn visit(&mut self, root: &'g EntityKey) -> Result<(), ResolverError> {
        let mut stack = Vec::new();
        if let Some(frame) = self.enter(root, Visit::Strong)? {
            stack.push(frame);
        }

        while let Some(frame) = stack.last_mut() {
            let step = match frame.phase {
                Phase::StrongSuccessors => self.step_strong(frame),
                Phase::WeakSuccessors => self.step_weak(frame),
            };
            match step? {
                Step::Descend(child) => stack.push(child),
                Step::Continue => {}
                Step::Done => {
                    stack.pop();
                }
            }
        }

        Ok(())
    }

    /// Start visiting `vertex`; `None` if it needs no work
    fn enter(&mut self, vertex: &'g EntityKey, visit: Visit) -> Result<Option<Frame<'g>>, ResolverError> {
        let mark = self.mark(vertex.id());

        if visit == Visit::Strong && mark == Mark::InProgress && self.closes_cycle(vertex) {
            let cycle = self
                .crumbs
                .iter()
                .map(|c| (*c).clone())
                .chain(std::iter::once(vertex.clone()))
                .collect();
            return Err(ResolverError::CircularDependency { cycle });
        }

        if mark != Mark::Unvisited {
            return Ok(None);
        }

        tracing::trace!("visit {} ({:?})", vertex, visit);

        self.crumbs.push(vertex);
        self.marks.insert(vertex.id(), Mark::InProgress);
        self.topo.lookup_create(vertex.id());

        Ok(Some(Frame {
            vertex,
            visit,
            phase: Phase::StrongSuccessors,
            successors: self.successors(vertex, EdgeKind::Strong),
            cursor: 0,
            saved_crumbs: None,
        }))
    }

    /// Whether the current trail holds `vertex`'s entity in a compatible technology
    fn closes_cycle(&self, vertex: &EntityKey) -> bool {
        self.crumbs.iter().any(|crumb| {
            crumb.entity() == vertex.entity()
                && crumb.tech().map_or(true, |tech| Some(tech) == vertex.tech())
        })
    }

    fn step_strong(&mut self, frame: &mut Frame<'g>) -> Result<Step<'g>, ResolverError> {
        let vertex = frame.vertex;

        while let Some(&successor) = frame.successors.get(frame.cursor) {
            frame.cursor += 1;

            if successor.id() == vertex.id() {
                continue;
            }

            if frame.visit == Visit::Weak {
                self.invalidate_foreign_group(successor, vertex);
            }

            self.topo.merge(vertex.id(), successor.id());

            if let Some(child) = self.enter(successor, Visit::Strong)? {
                return Ok(Step::Descend(child));
            }
        }

        self.marks.insert(vertex.id(), Mark::Finished);
        match frame.visit {
            Visit::Strong => {
                self.ordered.push(vertex);
                self.ordered_ids.insert(vertex.id());
            }
            Visit::Weak => {
                self.unordered.add(vertex);
            }
        }
        self.crumbs.pop();

        frame.phase = Phase::WeakSuccessors;
        frame.successors = self.successors(vertex, EdgeKind::Weak);
        frame.cursor = 0;

        Ok(Step::Continue)
    }

    fn step_weak(&mut self, frame: &mut Frame<'g>) -> Result<Step<'g>, ResolverError> {
        if let Some(saved) = frame.saved_crumbs.take() {
            self.crumbs = saved;
        }

        let vertex = frame.vertex;

        while let Some(&successor) = frame.successors.get(frame.cursor) {
            frame.cursor += 1;

            if successor.id() == vertex.id()
                || self.mark(successor.id()) == Mark::Finished
                || self.unordered.has(successor)
                || self.ordered_ids.contains(successor.id())
            {
                continue;
            }

            // Weak excursions start a fresh strong trail
            let saved = std::mem::take(&mut self.crumbs);
            match self.enter(successor, Visit::Weak)? {
                Some(child) => {
                    frame.saved_crumbs = Some(saved);
                    return Ok(Step::Descend(child));
                }
                None => self.crumbs = saved,
            }
        }

        Ok(Step::Done)
    }

    /// Forget the order of `successor`'s group if `vertex` is not part of it
    fn invalidate_foreign_group(&mut self, successor: &EntityKey, vertex: &EntityKey) {
        let Some(group) = self.topo.lookup(successor.id()) else {
            return;
        };
        if self.topo.contains(group, vertex.id()) {
            return;
        }

        tracing::debug!(
            "Weak path from {} reaches ordered group of {}, reordering it",
            vertex,
            successor
        );

        for id in self.topo.members(group) {
            self.marks.remove(id);
        }
    }
}
