//! Host-side voxel navigation built on `voxpath-paths`.
//!
//! [`Navigator`] turns a [`VoxelWorld`] into a walkability predicate
//! (solid ground, free headroom, no obstacle), runs the voxel path search,
//! and converts the resulting route into world-space waypoints.

pub mod navigator;
pub mod waypoints;
pub mod world;

pub use navigator::{NavConfig, Navigator};
pub use waypoints::{WaypointBuilder, standing_point, waypoints};
pub use world::VoxelWorld;
