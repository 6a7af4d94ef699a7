//! Conversion of voxel routes into world-space waypoints.
//!
//! Each voxel maps to the centre of its top face. When consecutive voxels
//! sit on different levels a corner waypoint is inserted so the mover never
//! cuts diagonally through a ledge: dropping down first walks off the edge
//! at the old level, climbing first rises in place.

use glam::Vec3;
use voxpath_core::Voxel;

/// World-space position an agent occupies when standing on `v`.
#[inline]
pub fn standing_point(v: Voxel) -> Vec3 {
    Vec3::new(v.x as f32 + 0.5, v.y as f32, v.z as f32 + 0.5)
}

/// Accumulates waypoints for a route, one voxel at a time.
#[derive(Debug, Default, Clone)]
pub struct WaypointBuilder {
    points: Vec<Vec3>,
}

impl WaypointBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next route voxel.
    pub fn push(&mut self, v: Voxel) {
        let p = standing_point(v);
        if let Some(&last) = self.points.last() {
            if p.y < last.y {
                self.points.push(Vec3::new(p.x, last.y, p.z));
            } else if p.y > last.y {
                self.points.push(Vec3::new(last.x, p.y, last.z));
            }
        }
        self.points.push(p);
    }

    /// All waypoints, including the one for the start voxel.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Waypoints after the start voxel.
    pub fn finish(mut self) -> Vec<Vec3> {
        if !self.points.is_empty() {
            self.points.remove(0);
        }
        self.points
    }
}

/// Waypoints for a full route, excluding the start position.
pub fn waypoints(route: &[Voxel]) -> Vec<Vec3> {
    let mut b = WaypointBuilder::new();
    for &v in route {
        b.push(v);
    }
    b.finish()
}
