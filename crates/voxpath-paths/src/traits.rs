use std::hash::Hash;

/// Verdict returned by [`NodeSource::early_exit`] for the node about to be
/// expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EarlyExit {
    /// Keep searching.
    #[default]
    Continue,
    /// Abort the search without a path.
    Fail,
    /// Treat the visiting node as the goal and return the path to it.
    Succeed,
}

/// A searchable domain.
///
/// `C` is an opaque context handed unchanged to every call of one search.
/// The engine never inspects it; implementations use it for whatever
/// per-search state they need (a world to query, an agent description).
pub trait NodeSource<C: ?Sized = ()> {
    /// Node value. Nodes are deduplicated by `Eq`/`Hash`, never by identity.
    type Node: Clone + Eq + Hash;

    /// Append the neighbors of `node` with their non-negative step costs into
    /// `buf`. The caller clears `buf` before calling. Must not yield `node`
    /// itself.
    fn neighbors(&self, node: &Self::Node, ctx: &C, buf: &mut Vec<(Self::Node, f32)>);

    /// Estimated remaining cost from `from` to `to`. Must be zero when
    /// `from == to` and must never overestimate for the search to be optimal.
    fn heuristic(&self, from: &Self::Node, to: &Self::Node, ctx: &C) -> f32;

    /// Called once per node taken from the open set, before the goal test.
    /// `visited` counts extracted nodes including this one.
    fn early_exit(
        &self,
        _visited: usize,
        _visiting: &Self::Node,
        _goal: &Self::Node,
        _ctx: &C,
    ) -> EarlyExit {
        EarlyExit::Continue
    }
}
