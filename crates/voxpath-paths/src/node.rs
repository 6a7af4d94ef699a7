use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

// ---------------------------------------------------------------------------
// Path / SearchError
// ---------------------------------------------------------------------------

/// A path found by [`search`](crate::search): nodes from start to goal
/// inclusive.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path<N> {
    nodes: Vec<N>,
    cost: f32,
    visited: usize,
}

impl<N> Path<N> {
    /// The nodes, start first.
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Total cost of the path.
    pub fn cost(&self) -> f32 {
        self.cost
    }

    /// Number of nodes the search took from the open set.
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Number of nodes in the path.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false` for a path returned by the engine.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node.
    pub fn start(&self) -> Option<&N> {
        self.nodes.first()
    }

    /// Last node.
    pub fn goal(&self) -> Option<&N> {
        self.nodes.last()
    }

    /// Iterate over the nodes, start first.
    pub fn iter(&self) -> std::slice::Iter<'_, N> {
        self.nodes.iter()
    }

    /// Consume the path, returning its nodes.
    pub fn into_nodes(self) -> Vec<N> {
        self.nodes
    }
}

impl<N> IntoIterator for Path<N> {
    type Item = N;
    type IntoIter = std::vec::IntoIter<N>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a, N> IntoIterator for &'a Path<N> {
    type Item = &'a N;
    type IntoIter = std::slice::Iter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Why a search produced no path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The open set ran dry before the goal was reached.
    NoPathFound { visited: usize },
    /// The node source's early-exit test aborted the search.
    BudgetExceeded { visited: usize },
}

impl SearchError {
    /// Number of nodes taken from the open set before giving up.
    pub fn visited(self) -> usize {
        match self {
            Self::NoPathFound { visited } | Self::BudgetExceeded { visited } => visited,
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPathFound { visited } => {
                write!(f, "no path found after visiting {visited} nodes")
            }
            Self::BudgetExceeded { visited } => {
                write!(f, "search budget exceeded after visiting {visited} nodes")
            }
        }
    }
}

impl std::error::Error for SearchError {}

// ---------------------------------------------------------------------------
// Internal records for the A* search
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeState {
    Open,
    Closed,
}

/// Per-node bookkeeping, owned by the arena for the duration of one search.
#[derive(Debug, Clone)]
pub(crate) struct SearchNode<N> {
    pub(crate) node: N,
    pub(crate) g: f32,
    pub(crate) h: f32,
    pub(crate) parent: Option<usize>,
    pub(crate) state: NodeState,
}

impl<N> SearchNode<N> {
    #[inline]
    pub(crate) fn f(&self) -> f32 {
        self.g + self.h
    }
}

/// Search records addressed by stable index, with a value-keyed lookup.
pub(crate) struct Arena<N> {
    pub(crate) records: Vec<SearchNode<N>>,
    index: HashMap<N, usize>,
}

impl<N: Clone + Eq + Hash> Arena<N> {
    pub(crate) fn new() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Index of the record for `node`, if the search has seen it.
    #[inline]
    pub(crate) fn find(&self, node: &N) -> Option<usize> {
        self.index.get(node).copied()
    }

    /// Add a fresh open record and return its index.
    pub(crate) fn insert(&mut self, node: N, g: f32, h: f32, parent: Option<usize>) -> usize {
        let idx = self.records.len();
        self.index.insert(node.clone(), idx);
        self.records.push(SearchNode {
            node,
            g,
            h,
            parent,
            state: NodeState::Open,
        });
        idx
    }

    /// Walk parent links back from `idx`, returning nodes start first.
    pub(crate) fn reconstruct(&self, mut idx: usize) -> Vec<N> {
        let mut nodes = Vec::new();
        loop {
            let rec = &self.records[idx];
            nodes.push(rec.node.clone());
            match rec.parent {
                Some(p) => idx = p,
                None => break,
            }
        }
        nodes.reverse();
        nodes
    }
}

/// Open-set heap entry.
///
/// Ordered so that `BinaryHeap` (a max-heap) pops the smallest `f` first,
/// then the largest `g`, then the earliest insertion.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: f32,
    pub(crate) g: f32,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| self.g.total_cmp(&other.g))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeRef {}

impl<N> Path<N> {
    pub(crate) fn new(nodes: Vec<N>, cost: f32, visited: usize) -> Self {
        Self {
            nodes,
            cost,
            visited,
        }
    }
}
