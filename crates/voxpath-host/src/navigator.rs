use std::collections::HashSet;

use glam::Vec3;
use log::{debug, trace};
use voxpath_core::Voxel;
use voxpath_paths::{VoxelPolicy, VoxelPolicyConfig, pathfind_with};

use crate::waypoints::WaypointBuilder;
use crate::world::VoxelWorld;

/// Navigation settings.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavConfig {
    /// Empty voxels an agent needs above the voxel it stands on.
    pub agent_height: u32,
    /// Lowest level [`Navigator::ground`] scans down to.
    pub ground_min_y: i32,
    /// Search policy for route finding.
    pub policy: VoxelPolicyConfig,
}

impl NavConfig {
    pub fn with_agent_height(mut self, height: u32) -> Self {
        self.agent_height = height;
        self
    }

    pub fn with_ground_min_y(mut self, min_y: i32) -> Self {
        self.ground_min_y = min_y;
        self
    }

    pub fn with_policy(mut self, policy: VoxelPolicyConfig) -> Self {
        self.policy = policy;
        self
    }
}

/// Finds walkable routes through a [`VoxelWorld`].
///
/// Agents stand on top of solid voxels. A voxel is walkable when it is solid,
/// not marked as an obstacle, and the agent's height worth of voxels above it
/// is empty. The navigator keeps the obstacle set between queries; the world
/// is borrowed per query so the host can edit it freely in between.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    config: NavConfig,
    policy: VoxelPolicy,
    obstacles: HashSet<Voxel>,
}

impl Navigator {
    /// Create a navigator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a navigator with the given settings.
    pub fn with_config(config: NavConfig) -> Self {
        Self {
            policy: VoxelPolicy::with_config(config.policy.clone()),
            config,
            obstacles: HashSet::new(),
        }
    }

    /// The settings in use.
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Mark the voxel containing `position` as blocked.
    ///
    /// Returns `false` if it was already blocked.
    pub fn add_obstacle(&mut self, position: Vec3) -> bool {
        let v = Voxel::from_position(position.x, position.y, position.z);
        trace!("nav: add obstacle at {v}");
        self.obstacles.insert(v)
    }

    /// Unblock the voxel containing `position`.
    ///
    /// Returns `false` if it was not blocked.
    pub fn remove_obstacle(&mut self, position: Vec3) -> bool {
        let v = Voxel::from_position(position.x, position.y, position.z);
        trace!("nav: remove obstacle at {v}");
        self.obstacles.remove(&v)
    }

    /// Remove every obstacle.
    pub fn clear_obstacles(&mut self) {
        self.obstacles.clear();
    }

    /// Whether `v` is blocked by an obstacle.
    pub fn is_obstacle(&self, v: Voxel) -> bool {
        self.obstacles.contains(&v)
    }

    /// Iterate over the blocked voxels.
    pub fn obstacles(&self) -> impl Iterator<Item = Voxel> + '_ {
        self.obstacles.iter().copied()
    }

    /// Whether an agent of `height` can stand on `v`.
    pub fn can_walk_at<W>(&self, world: &W, v: Voxel, height: u32) -> bool
    where
        W: VoxelWorld + ?Sized,
    {
        if !world.is_solid(v) || self.obstacles.contains(&v) {
            return false;
        }
        // Levels above i32::MAX are open sky.
        (1..=height.min(i32::MAX as u32) as i32).all(|dy| {
            v.checked_shift(0, dy, 0)
                .is_none_or(|above| !world.is_solid(above))
        })
    }

    /// Route between two world positions for the configured agent height.
    pub fn path<W>(&self, world: &W, from: Vec3, to: Vec3) -> Vec<Vec3>
    where
        W: VoxelWorld + ?Sized,
    {
        self.path_with_height(world, from, to, self.config.agent_height)
    }

    /// Route between two world positions for an agent of `height`.
    ///
    /// Both positions are floored to voxels. The result lists waypoints after
    /// the start (see [`crate::waypoints`]) and is empty when no route exists.
    pub fn path_with_height<W>(&self, world: &W, from: Vec3, to: Vec3, height: u32) -> Vec<Vec3>
    where
        W: VoxelWorld + ?Sized,
    {
        let start = Voxel::from_position(from.x, from.y, from.z);
        let goal = Voxel::from_position(to.x, to.y, to.z);
        let walkable = |v: Voxel| self.can_walk_at(world, v, height);

        let mut builder = WaypointBuilder::new();
        let n = pathfind_with(&self.policy, start, goal, &walkable, |v| builder.push(v));
        let points = builder.finish();
        debug!(
            "nav: {start} -> {goal} (height {height}): {n} voxels, {} waypoints",
            points.len()
        );
        points
    }

    /// Find the ground below `position` for the configured height and floor.
    pub fn ground<W>(&self, world: &W, position: Vec3) -> Option<Voxel>
    where
        W: VoxelWorld + ?Sized,
    {
        self.ground_with(world, position, self.config.agent_height, self.config.ground_min_y)
    }

    /// Scan down from the voxel containing `position` to `min_y` inclusive,
    /// returning the first voxel an agent of `height` can stand on.
    pub fn ground_with<W>(&self, world: &W, position: Vec3, height: u32, min_y: i32) -> Option<Voxel>
    where
        W: VoxelWorld + ?Sized,
    {
        let top = Voxel::from_position(position.x, position.y, position.z);
        (min_y..=top.y)
            .rev()
            .map(|y| Voxel::new(top.x, y, top.z))
            .find(|&v| self.can_walk_at(world, v, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxpath_core::VoxelGrid;

    /// 6x3x1 strip: floor at y = 0, a raised block at x = 3.
    fn strip() -> VoxelGrid {
        VoxelGrid::from_layers(
            "\
######

...#..

......",
        )
        .unwrap()
    }

    #[test]
    fn walkability_needs_solid_ground_and_headroom() {
        let world = strip();
        let nav = Navigator::new();
        assert!(nav.can_walk_at(&world, Voxel::new(0, 0, 0), 0));
        assert!(!nav.can_walk_at(&world, Voxel::new(0, 1, 0), 0));
        // The raised block covers the floor voxel below it.
        assert!(!nav.can_walk_at(&world, Voxel::new(3, 0, 0), 1));
        assert!(nav.can_walk_at(&world, Voxel::new(3, 1, 0), 1));
        assert!(nav.can_walk_at(&world, Voxel::new(2, 0, 0), 2));
    }

    #[test]
    fn headroom_at_the_top_of_the_i32_range() {
        let top = Voxel::new(0, i32::MAX, 0);
        let below = Voxel::new(0, i32::MAX - 1, 0);
        let world: std::collections::HashMap<Voxel, u16> = [(top, 1), (below, 1)].into();
        let nav = Navigator::new();
        assert!(nav.can_walk_at(&world, top, 3));
        assert!(nav.can_walk_at(&world, top, u32::MAX));
        assert!(!nav.can_walk_at(&world, below, 1));
    }

    #[test]
    fn obstacles_block_and_unblock() {
        let world = strip();
        let mut nav = Navigator::new();
        assert!(nav.add_obstacle(Vec3::new(1.2, 0.9, 0.4)));
        assert!(!nav.add_obstacle(Vec3::new(1.8, 0.1, 0.0)));
        assert!(nav.is_obstacle(Voxel::new(1, 0, 0)));
        assert!(!nav.can_walk_at(&world, Voxel::new(1, 0, 0), 0));
        assert!(nav.path(&world, Vec3::new(0.5, 0.0, 0.5), Vec3::new(5.5, 0.0, 0.5)).is_empty());

        assert!(nav.remove_obstacle(Vec3::new(1.0, 0.0, 0.0)));
        assert!(!nav.remove_obstacle(Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(nav.obstacles().count(), 0);
        assert!(!nav.path(&world, Vec3::new(0.5, 0.0, 0.5), Vec3::new(5.5, 0.0, 0.5)).is_empty());
    }

    #[test]
    fn path_over_block() {
        let world = strip();
        // With one voxel of headroom the floor under the block is closed.
        let nav = Navigator::with_config(NavConfig::default().with_agent_height(1));
        let points = nav.path(&world, Vec3::new(0.5, 0.0, 0.5), Vec3::new(5.5, 0.0, 0.5));
        assert_eq!(
            points,
            vec![
                Vec3::new(1.5, 0.0, 0.5),
                Vec3::new(2.5, 0.0, 0.5),
                // climb in place, then step onto the block
                Vec3::new(2.5, 1.0, 0.5),
                Vec3::new(3.5, 1.0, 0.5),
                // walk off the edge, then drop
                Vec3::new(4.5, 1.0, 0.5),
                Vec3::new(4.5, 0.0, 0.5),
                Vec3::new(5.5, 0.0, 0.5),
            ]
        );
    }

    #[test]
    fn tall_agent_cannot_pass_under_overhang() {
        let world = VoxelGrid::from_layers(
            "\
###

...

.#.",
        )
        .unwrap();
        let nav = Navigator::new();
        let from = Vec3::new(0.5, 0.0, 0.5);
        let to = Vec3::new(2.5, 0.0, 0.5);
        assert_eq!(nav.path_with_height(&world, from, to, 1).len(), 2);
        assert!(nav.path_with_height(&world, from, to, 2).is_empty());
    }

    #[test]
    fn ground_scans_down() {
        let world = strip();
        let nav = Navigator::new();
        assert_eq!(
            nav.ground(&world, Vec3::new(0.5, 2.7, 0.5)),
            Some(Voxel::new(0, 0, 0))
        );
        assert_eq!(
            nav.ground(&world, Vec3::new(3.5, 2.0, 0.5)),
            Some(Voxel::new(3, 1, 0))
        );
        assert_eq!(nav.ground_with(&world, Vec3::new(0.5, 2.0, 0.5), 0, 1), None);
        assert_eq!(nav.ground(&world, Vec3::new(9.0, 2.0, 0.0)), None);
    }

    #[test]
    fn config_builders() {
        let nav = Navigator::with_config(
            NavConfig::default()
                .with_agent_height(2)
                .with_ground_min_y(-4)
                .with_policy(VoxelPolicyConfig::default().with_max_visited(64)),
        );
        assert_eq!(nav.config().agent_height, 2);
        assert_eq!(nav.config().ground_min_y, -4);
        assert_eq!(nav.config().policy.max_visited, 64);
    }
}
