//! Shortest-path search over voxel grids.
//!
//! The crate is split in two layers:
//!
//! - a domain-agnostic **A\*** engine ([`search`]) driven by any
//!   [`NodeSource`] implementation, and
//! - a **voxel walking policy** ([`VoxelPolicy`]) that instantiates the
//!   node source for 3-D integer coordinates, plus the host-facing
//!   [`pathfind`] entry point.
//!
//! Searches own all of their state; nothing is cached between calls, so
//! independent searches may run on separate threads as long as the
//! walkability predicate allows it.
//!
//! # Failure
//!
//! [`search`] reports [`SearchError::NoPathFound`] when the open set runs
//! dry and [`SearchError::BudgetExceeded`] when the node source's early-exit
//! test gives up. Neither carries a partial path. [`pathfind`] folds both
//! into "no results".

mod astar;
mod distance;
mod node;
mod pathfind;
mod traits;
mod voxel;

pub use astar::search;
pub use distance::{manhattan, manhattan_xz};
pub use node::{Path, SearchError};
pub use pathfind::{pathfind, pathfind_with};
pub use traits::{EarlyExit, NodeSource};
pub use voxel::{DEFAULT_MAX_VISITED, VoxelHeuristic, VoxelPolicy, VoxelPolicyConfig, Walkable};
