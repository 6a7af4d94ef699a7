//! Walking policy over a 3-D voxel grid.
//!
//! An agent stands on a voxel and moves one step horizontally per move,
//! optionally stepping one level up or down at the same time. Level moves
//! cost 1.0 and moves with a vertical component cost 1.25 by default.

use log::{debug, trace};
use voxpath_core::Voxel;

use crate::astar::search;
use crate::distance::{manhattan, manhattan_xz};
use crate::node::{Path, SearchError};
use crate::traits::{EarlyExit, NodeSource};

/// Default visited-node budget.
pub const DEFAULT_MAX_VISITED: usize = 4096;

/// Answers whether an agent can stand at a voxel.
///
/// Implemented for any `Fn(Voxel) -> bool`. Must be deterministic for the
/// lifetime of one search.
pub trait Walkable {
    fn can_walk_at(&self, v: Voxel) -> bool;
}

impl<F> Walkable for F
where
    F: Fn(Voxel) -> bool + ?Sized,
{
    #[inline]
    fn can_walk_at(&self, v: Voxel) -> bool {
        self(v)
    }
}

/// Remaining-cost estimate used by [`VoxelPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VoxelHeuristic {
    /// `|dx| + |dy| + |dz|`.
    ///
    /// Overestimates when a route climbs while moving horizontally, since a
    /// single 1.25 step covers one unit on two axes.
    #[default]
    Manhattan,
    /// Lower bound for unit offsets: at least `max(|dx| + |dz|, |dy|)` steps,
    /// of which at least `|dy|` change level. Admissible and consistent.
    StepBound,
}

/// Construction-time configuration for a [`VoxelPolicy`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoxelPolicyConfig {
    /// The search fails once more than this many nodes have been visited.
    pub max_visited: usize,
    /// Horizontal `(dx, dz)` offsets, tried in order.
    pub horizontal_offsets: Vec<(i32, i32)>,
    /// Vertical `dy` offsets combined with every horizontal offset, in order.
    pub vertical_offsets: Vec<i32>,
    /// Cost of a move with `dy == 0`.
    pub level_cost: f32,
    /// Cost of a move with `dy != 0`.
    pub vertical_cost: f32,
    pub heuristic: VoxelHeuristic,
}

impl Default for VoxelPolicyConfig {
    fn default() -> Self {
        Self {
            max_visited: DEFAULT_MAX_VISITED,
            horizontal_offsets: vec![(-1, 0), (1, 0), (0, -1), (0, 1)],
            vertical_offsets: vec![0, 1, -1],
            level_cost: 1.0,
            vertical_cost: 1.25,
            heuristic: VoxelHeuristic::Manhattan,
        }
    }
}

impl VoxelPolicyConfig {
    /// Set the visited-node budget.
    pub fn with_max_visited(mut self, max_visited: usize) -> Self {
        self.max_visited = max_visited;
        self
    }

    /// Set the level and vertical move costs.
    pub fn with_costs(mut self, level_cost: f32, vertical_cost: f32) -> Self {
        self.level_cost = level_cost;
        self.vertical_cost = vertical_cost;
        self
    }

    /// Set the remaining-cost estimate.
    pub fn with_heuristic(mut self, heuristic: VoxelHeuristic) -> Self {
        self.heuristic = heuristic;
        self
    }
}

/// [`NodeSource`] over [`Voxel`]s, with any [`Walkable`] world as context.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoxelPolicy {
    config: VoxelPolicyConfig,
}

impl VoxelPolicy {
    /// Create a policy with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a policy from an explicit configuration.
    pub fn with_config(config: VoxelPolicyConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &VoxelPolicyConfig {
        &self.config
    }

    /// Search for a route from `from` to `to` through `world`.
    pub fn find_path<W>(&self, world: &W, from: Voxel, to: Voxel) -> Result<Path<Voxel>, SearchError>
    where
        W: Walkable + ?Sized,
    {
        trace!("voxel path: {from} -> {to}");
        let result = search(self, world, from, to);
        match &result {
            Ok(path) => debug!(
                "voxel path: {from} -> {to}: {} nodes, cost {}, {} visited",
                path.len(),
                path.cost(),
                path.visited()
            ),
            Err(err) => debug!("voxel path: {from} -> {to}: {err}"),
        }
        result
    }
}

impl<W> NodeSource<W> for VoxelPolicy
where
    W: Walkable + ?Sized,
{
    type Node = Voxel;

    fn neighbors(&self, node: &Voxel, world: &W, buf: &mut Vec<(Voxel, f32)>) {
        let cfg = &self.config;
        for &(dx, dz) in &cfg.horizontal_offsets {
            for &dy in &cfg.vertical_offsets {
                let Some(n) = node.checked_shift(dx, dy, dz) else {
                    continue;
                };
                if world.can_walk_at(n) {
                    let cost = if dy == 0 {
                        cfg.level_cost
                    } else {
                        cfg.vertical_cost
                    };
                    buf.push((n, cost));
                }
            }
        }
    }

    fn heuristic(&self, from: &Voxel, to: &Voxel, _world: &W) -> f32 {
        match self.config.heuristic {
            VoxelHeuristic::Manhattan => manhattan(*from, *to) as f32,
            VoxelHeuristic::StepBound => {
                let horizontal = manhattan_xz(*from, *to);
                let vertical = u64::from(from.y.abs_diff(to.y));
                let steps = horizontal.max(vertical) as f32;
                let cfg = &self.config;
                let cheapest = cfg.level_cost.min(cfg.vertical_cost);
                steps * cheapest + vertical as f32 * (cfg.vertical_cost - cfg.level_cost).max(0.0)
            }
        }
    }

    fn early_exit(&self, visited: usize, _visiting: &Voxel, _goal: &Voxel, _world: &W) -> EarlyExit {
        if visited > self.config.max_visited {
            EarlyExit::Fail
        } else {
            EarlyExit::Continue
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let cfg = VoxelPolicyConfig::default()
            .with_max_visited(100)
            .with_heuristic(VoxelHeuristic::StepBound);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: VoxelPolicyConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
