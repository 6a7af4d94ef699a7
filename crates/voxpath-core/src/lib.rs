//! **voxpath-core** — voxel coordinates and grid storage.
//!
//! This crate provides the value types shared across the *voxpath*
//! workspace: the [`Voxel`] coordinate, half-open [`Bounds`] boxes, and a
//! dense [`VoxelGrid`] material store.

pub mod geom;
pub mod grid;

pub use geom::{Bounds, BoundsIter, Voxel};
pub use grid::{EMPTY, GridError, VoxelGrid};
