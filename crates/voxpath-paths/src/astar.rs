use std::collections::BinaryHeap;

use log::trace;

use crate::node::{Arena, NodeRef, NodeState, Path, SearchError};
use crate::traits::{EarlyExit, NodeSource};

/// Compute a shortest path from `start` to `goal` using A*.
///
/// `ctx` is passed unchanged to every [`NodeSource`] call. Among open nodes
/// with equal `f`, the one with greater `g` is expanded first; remaining ties
/// go to the earliest inserted node, so results are deterministic.
///
/// All search state lives for the duration of this call only.
pub fn search<C, S>(
    source: &S,
    ctx: &C,
    start: S::Node,
    goal: S::Node,
) -> Result<Path<S::Node>, SearchError>
where
    C: ?Sized,
    S: NodeSource<C> + ?Sized,
{
    let mut arena = Arena::new();
    let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
    let mut seq: u64 = 0;

    let h = source.heuristic(&start, &goal, ctx);
    let start_idx = arena.insert(start, 0.0, h, None);
    open.push(NodeRef {
        idx: start_idx,
        f: h,
        g: 0.0,
        seq,
    });

    let mut nbuf = Vec::new();
    let mut visited = 0usize;

    while let Some(current) = open.pop() {
        let ci = current.idx;

        // Skip entries superseded by a cheaper push, or already expanded.
        let rec = &arena.records[ci];
        if rec.state == NodeState::Closed || current.g > rec.g {
            continue;
        }

        visited += 1;
        match source.early_exit(visited, &rec.node, &goal, ctx) {
            EarlyExit::Fail => {
                trace!("astar: early exit failed the search after {visited} visits");
                return Err(SearchError::BudgetExceeded { visited });
            }
            EarlyExit::Succeed => {
                return Ok(Path::new(arena.reconstruct(ci), rec.g, visited));
            }
            EarlyExit::Continue => {}
        }
        if rec.node == goal {
            return Ok(Path::new(arena.reconstruct(ci), rec.g, visited));
        }

        arena.records[ci].state = NodeState::Closed;
        let current_g = arena.records[ci].g;

        nbuf.clear();
        source.neighbors(&arena.records[ci].node, ctx, &mut nbuf);

        for (np, cost) in nbuf.drain(..) {
            debug_assert!(cost >= 0.0, "negative step cost");
            let tentative_g = current_g + cost;

            let ni = match arena.find(&np) {
                Some(ni) => {
                    let n = &mut arena.records[ni];
                    if n.state == NodeState::Closed || tentative_g >= n.g {
                        continue;
                    }
                    n.g = tentative_g;
                    n.parent = Some(ci);
                    ni
                }
                None => {
                    let h = source.heuristic(&np, &goal, ctx);
                    arena.insert(np, tentative_g, h, Some(ci))
                }
            };

            seq += 1;
            open.push(NodeRef {
                idx: ni,
                f: arena.records[ni].f(),
                g: tentative_g,
                seq,
            });
        }
    }

    Err(SearchError::NoPathFound { visited })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// A small weighted digraph over `u32` node ids.
    struct Graph {
        edges: HashMap<u32, Vec<(u32, f32)>>,
        estimates: HashMap<u32, f32>,
    }

    impl Graph {
        fn new(edges: &[(u32, u32, f32)]) -> Self {
            let mut map: HashMap<u32, Vec<(u32, f32)>> = HashMap::new();
            for &(a, b, c) in edges {
                map.entry(a).or_default().push((b, c));
            }
            Self {
                edges: map,
                estimates: HashMap::new(),
            }
        }
    }

    impl NodeSource for Graph {
        type Node = u32;

        fn neighbors(&self, node: &u32, _ctx: &(), buf: &mut Vec<(u32, f32)>) {
            if let Some(out) = self.edges.get(node) {
                buf.extend_from_slice(out);
            }
        }

        fn heuristic(&self, from: &u32, to: &u32, _ctx: &()) -> f32 {
            if from == to {
                return 0.0;
            }
            self.estimates.get(from).copied().unwrap_or(0.0)
        }
    }

    #[test]
    fn start_is_goal() {
        let g = Graph::new(&[(0, 1, 1.0)]);
        let path = search(&g, &(), 0, 0).unwrap();
        assert_eq!(path.nodes(), &[0]);
        assert_eq!(path.cost(), 0.0);
        assert_eq!(path.visited(), 1);
    }

    #[test]
    fn prefers_cheaper_longer_route() {
        // 0 -> 3 directly costs 10, through 1 and 2 costs 3.
        let g = Graph::new(&[(0, 3, 10.0), (0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0)]);
        let path = search(&g, &(), 0, 3).unwrap();
        assert_eq!(path.nodes(), &[0, 1, 2, 3]);
        assert_eq!(path.cost(), 3.0);
    }

    #[test]
    fn decrease_key_rewires_parent() {
        // 2 is first reached from 0 at cost 5, later from 1 at cost 2.
        let g = Graph::new(&[(0, 2, 5.0), (0, 1, 1.0), (1, 2, 1.0), (2, 4, 1.0)]);
        let path = search(&g, &(), 0, 4).unwrap();
        assert_eq!(path.nodes(), &[0, 1, 2, 4]);
        assert_eq!(path.cost(), 3.0);
    }

    #[test]
    fn disconnected_goal_reports_no_path() {
        let g = Graph::new(&[(0, 1, 1.0), (1, 0, 1.0), (5, 6, 1.0)]);
        assert_eq!(
            search(&g, &(), 0, 6),
            Err(SearchError::NoPathFound { visited: 2 })
        );
    }

    #[test]
    fn cycles_terminate() {
        let g = Graph::new(&[(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0), (2, 1, 0.5)]);
        assert!(matches!(
            search(&g, &(), 0, 9),
            Err(SearchError::NoPathFound { visited: 3 })
        ));
    }

    #[test]
    fn heuristic_guides_expansion() {
        // Two equal-cost routes; the estimate steers towards the 2-branch.
        let mut g = Graph::new(&[(0, 1, 1.0), (0, 2, 1.0), (1, 3, 1.0), (2, 3, 1.0)]);
        g.estimates.insert(1, 1.5);
        g.estimates.insert(2, 1.0);
        g.estimates.insert(0, 2.0);
        let path = search(&g, &(), 0, 3).unwrap();
        assert_eq!(path.nodes(), &[0, 2, 3]);
        assert_eq!(path.visited(), 3);
    }

    #[test]
    fn ties_break_on_insertion_order() {
        let g = Graph::new(&[(0, 1, 1.0), (0, 2, 1.0), (1, 3, 1.0), (2, 3, 1.0)]);
        let path = search(&g, &(), 0, 3).unwrap();
        assert_eq!(path.nodes(), &[0, 1, 3]);
    }

    /// Records early-exit calls through the context and stops on a chosen
    /// node or visit count.
    struct Probe {
        line: u32,
        fail_after: usize,
        succeed_at: Option<u32>,
    }

    impl NodeSource<RefCell<Vec<(usize, u32)>>> for Probe {
        type Node = u32;

        fn neighbors(&self, node: &u32, _ctx: &RefCell<Vec<(usize, u32)>>, buf: &mut Vec<(u32, f32)>) {
            if *node < self.line {
                buf.push((node + 1, 1.0));
            }
        }

        fn heuristic(&self, from: &u32, to: &u32, _ctx: &RefCell<Vec<(usize, u32)>>) -> f32 {
            to.abs_diff(*from) as f32
        }

        fn early_exit(
            &self,
            visited: usize,
            visiting: &u32,
            _goal: &u32,
            ctx: &RefCell<Vec<(usize, u32)>>,
        ) -> EarlyExit {
            ctx.borrow_mut().push((visited, *visiting));
            if visited > self.fail_after {
                EarlyExit::Fail
            } else if self.succeed_at == Some(*visiting) {
                EarlyExit::Succeed
            } else {
                EarlyExit::Continue
            }
        }
    }

    #[test]
    fn early_exit_sees_every_visit_in_order() {
        let probe = Probe {
            line: 10,
            fail_after: usize::MAX,
            succeed_at: None,
        };
        let log = RefCell::new(Vec::new());
        let path = search(&probe, &log, 0, 3).unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(*log.borrow(), vec![(1, 0), (2, 1), (3, 2), (4, 3)]);
    }

    #[test]
    fn early_exit_fail_discards_path() {
        let probe = Probe {
            line: 10,
            fail_after: 3,
            succeed_at: None,
        };
        let log = RefCell::new(Vec::new());
        assert_eq!(
            search(&probe, &log, 0, 9),
            Err(SearchError::BudgetExceeded { visited: 4 })
        );
        // The goal exactly at the budget still succeeds.
        let path = search(&probe, &RefCell::new(Vec::new()), 0, 2).unwrap();
        assert_eq!(path.visited(), 3);
    }

    #[test]
    fn early_exit_succeed_returns_partial_route() {
        let probe = Probe {
            line: 10,
            fail_after: usize::MAX,
            succeed_at: Some(5),
        };
        let path = search(&probe, &RefCell::new(Vec::new()), 0, 9).unwrap();
        assert_eq!(path.nodes(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(path.cost(), 5.0);
    }
}
