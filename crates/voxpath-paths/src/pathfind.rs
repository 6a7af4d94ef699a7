use voxpath_core::Voxel;

use crate::voxel::{VoxelPolicy, Walkable};

/// Find a route between two voxels and stream it to `add_result`.
///
/// `can_walk_at` is the host's walkability predicate. `add_result` is called
/// once per path voxel, start first and goal last. When no path exists or
/// the default visit budget runs out, it is never called.
#[allow(clippy::too_many_arguments)]
pub fn pathfind(
    from_x: i32,
    from_y: i32,
    from_z: i32,
    to_x: i32,
    to_y: i32,
    to_z: i32,
    can_walk_at: impl Fn(i32, i32, i32) -> bool,
    mut add_result: impl FnMut(i32, i32, i32),
) {
    let world = |v: Voxel| can_walk_at(v.x, v.y, v.z);
    pathfind_with(
        &VoxelPolicy::new(),
        Voxel::new(from_x, from_y, from_z),
        Voxel::new(to_x, to_y, to_z),
        &world,
        |v| add_result(v.x, v.y, v.z),
    );
}

/// Like [`pathfind`], with an explicit policy and world.
///
/// Returns the number of voxels passed to `add_result`.
pub fn pathfind_with<W>(
    policy: &VoxelPolicy,
    from: Voxel,
    to: Voxel,
    world: &W,
    mut add_result: impl FnMut(Voxel),
) -> usize
where
    W: Walkable + ?Sized,
{
    match policy.find_path(world, from, to) {
        Ok(path) => {
            let n = path.len();
            for v in path {
                add_result(v);
            }
            n
        }
        Err(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streams_route_in_order() {
        let mut out = Vec::new();
        pathfind(
            0,
            0,
            0,
            3,
            0,
            0,
            |_, y, z| y == 0 && z == 0,
            |x, y, z| out.push((x, y, z)),
        );
        assert_eq!(out, vec![(0, 0, 0), (1, 0, 0), (2, 0, 0), (3, 0, 0)]);
    }

    #[test]
    fn no_route_emits_nothing() {
        let mut calls = 0;
        pathfind(
            0,
            0,
            0,
            5,
            0,
            0,
            |x, y, z| y == 0 && z == 0 && (0..3).contains(&x),
            |_, _, _| calls += 1,
        );
        assert_eq!(calls, 0);
    }

    #[test]
    fn pathfind_with_reports_count() {
        let world = |v: Voxel| v.y == 0 && (0..4).contains(&v.x) && (0..4).contains(&v.z);
        let mut seen = Vec::new();
        let n = pathfind_with(
            &VoxelPolicy::new(),
            Voxel::ZERO,
            Voxel::new(3, 0, 3),
            &world,
            |v| seen.push(v),
        );
        assert_eq!(n, 7);
        assert_eq!(seen.len(), 7);
        assert_eq!(seen.first(), Some(&Voxel::ZERO));
        assert_eq!(seen.last(), Some(&Voxel::new(3, 0, 3)));
    }
}
