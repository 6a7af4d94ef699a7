//! Shared helpers for the voxpath demos: random terrain and a top-down
//! ASCII view of a route.

use std::collections::HashSet;

use glam::Vec3;
use rand::{Rng, RngExt};
use voxpath_core::{GridError, Voxel, VoxelGrid};

/// Material used for generated ground.
pub const GROUND: u16 = 1;
/// Material used for pillars.
pub const STONE: u16 = 2;

/// Parameters for [`generate_terrain`].
#[derive(Debug, Clone, Copy)]
pub struct TerrainConfig {
    pub width: i32,
    pub depth: i32,
    pub max_height: i32,
    /// Number of neighbor-averaging passes over the random height map.
    pub smoothing: usize,
    /// Percent chance for a column to become a pillar.
    pub pillar_pct: u32,
    /// Extra height of a pillar above the surrounding ground.
    pub pillar_height: i32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 32,
            depth: 16,
            max_height: 6,
            smoothing: 3,
            pillar_pct: 6,
            pillar_height: 3,
        }
    }
}

/// Generate a rolling height-map terrain with scattered pillars.
pub fn generate_terrain(cfg: &TerrainConfig, rng: &mut impl Rng) -> Result<VoxelGrid, GridError> {
    let (w, d) = (cfg.width.max(1), cfg.depth.max(1));
    let base_max = (cfg.max_height - cfg.pillar_height).max(0);
    let mut heights: Vec<i32> = (0..w * d).map(|_| rng.random_range(0..=base_max)).collect();

    let mut scratch = heights.clone();
    for _ in 0..cfg.smoothing {
        for z in 0..d {
            for x in 0..w {
                let mut sum = 0;
                let mut n = 0;
                for (dx, dz) in [(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)] {
                    let (nx, nz) = (x + dx, z + dz);
                    if (0..w).contains(&nx) && (0..d).contains(&nz) {
                        sum += heights[(nz * w + nx) as usize];
                        n += 1;
                    }
                }
                scratch[(z * w + x) as usize] = (sum + n / 2) / n;
            }
        }
        std::mem::swap(&mut heights, &mut scratch);
    }

    let mut pillars = Vec::new();
    for (i, h) in heights.iter_mut().enumerate() {
        if rng.random_range(0..100u32) < cfg.pillar_pct {
            let base = *h;
            *h = (base + cfg.pillar_height).min(cfg.max_height);
            pillars.push((i as i32 % w, i as i32 / w, base));
        }
    }

    let mut grid = VoxelGrid::from_heightmap(w, d, &heights, cfg.max_height, GROUND)?;
    for (x, z, base) in pillars {
        let top = grid.top(x, z).map_or(base, |v| v.y);
        for y in base + 1..=top {
            grid.set(Voxel::new(x, y, z), STONE);
        }
    }
    Ok(grid)
}

/// Render a top-down view of `world`.
///
/// Columns show the surface height as a digit (`+` above 9, space when
/// empty); pillars show `#`. The route is drawn with `*`, its ends with `S`
/// and `G`, obstacles with `X`.
pub fn render_route(
    world: &VoxelGrid,
    start: Voxel,
    goal: Voxel,
    route: &[Vec3],
    obstacles: &[Voxel],
) -> String {
    let b = world.bounds();
    let on_route: HashSet<(i32, i32)> = route
        .iter()
        .map(|p| (p.x.floor() as i32, p.z.floor() as i32))
        .collect();
    let blocked: HashSet<(i32, i32)> = obstacles.iter().map(|v| (v.x, v.z)).collect();

    let mut out = String::with_capacity(((b.width() + 1) * b.depth()) as usize);
    for z in b.min.z..b.max.z {
        for x in b.min.x..b.max.x {
            let ch = if (x, z) == (start.x, start.z) {
                'S'
            } else if (x, z) == (goal.x, goal.z) {
                'G'
            } else if blocked.contains(&(x, z)) {
                'X'
            } else if on_route.contains(&(x, z)) {
                '*'
            } else {
                match world.top(x, z) {
                    None => ' ',
                    Some(v) if world.get(v) == STONE => '#',
                    Some(v) => char::from_digit(v.y as u32, 10).unwrap_or('+'),
                }
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn terrain_fits_config() {
        let cfg = TerrainConfig::default();
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let world = generate_terrain(&cfg, &mut rng).unwrap();
        assert_eq!(world.bounds().size(), Voxel::new(32, 7, 16));
        // Every column has ground at the bottom.
        for z in 0..cfg.depth {
            for x in 0..cfg.width {
                assert!(world.is_solid(Voxel::new(x, 0, z)));
            }
        }
    }

    #[test]
    fn terrain_is_deterministic_per_seed() {
        let cfg = TerrainConfig::default();
        let a = generate_terrain(&cfg, &mut rand::rngs::StdRng::seed_from_u64(5)).unwrap();
        let b = generate_terrain(&cfg, &mut rand::rngs::StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn render_marks_route() {
        let world = VoxelGrid::from_heightmap(3, 2, &[0, 1, 2, 0, 0, 0], 2, GROUND).unwrap();
        let route = [Vec3::new(1.5, 1.0, 0.5), Vec3::new(2.5, 2.0, 0.5)];
        let map = render_route(
            &world,
            Voxel::new(0, 0, 0),
            Voxel::new(2, 2, 0),
            &route,
            &[Voxel::new(0, 0, 1)],
        );
        assert_eq!(map, "S*G\nX00\n");
    }
}
