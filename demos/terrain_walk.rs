//! Generate a random voxel terrain and walk across it.
//!
//! Run: cargo run --bin terrain-walk -- --seed 7 --from 0,0 --to 31,15

use clap::Parser;
use glam::Vec3;
use rand::SeedableRng;
use voxpath_core::Voxel;
use voxpath_demos::{TerrainConfig, generate_terrain, render_route};
use voxpath_host::{NavConfig, Navigator};
use voxpath_paths::VoxelPolicyConfig;

/// Walk a random voxel terrain between two columns.
#[derive(Parser, Debug)]
struct Args {
    /// Terrain seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = 32)]
    width: i32,
    #[arg(long, default_value_t = 16)]
    depth: i32,
    #[arg(long, default_value_t = 6)]
    max_height: i32,
    /// Start column as `x,z`.
    #[arg(long, value_parser = parse_column, default_value = "0,0")]
    from: (i32, i32),
    /// Goal column as `x,z`.
    #[arg(long, value_parser = parse_column, default_value = "31,15")]
    to: (i32, i32),
    /// Free voxels the agent needs above its footing.
    #[arg(long, default_value_t = 1)]
    agent_height: u32,
    /// Visited-node budget for the search.
    #[arg(long, default_value_t = voxpath_paths::DEFAULT_MAX_VISITED)]
    max_visited: usize,
    /// Columns (`x,z`) whose surface voxel is blocked. Repeatable.
    #[arg(long = "obstacle", value_parser = parse_column)]
    obstacles: Vec<(i32, i32)>,
}

fn parse_column(s: &str) -> Result<(i32, i32), String> {
    let (x, z) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,z`, got `{s}`"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in `{s}`: {e}"))?;
    let z = z.trim().parse().map_err(|e| format!("bad z in `{s}`: {e}"))?;
    Ok((x, z))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let cfg = TerrainConfig {
        width: args.width,
        depth: args.depth,
        max_height: args.max_height,
        ..TerrainConfig::default()
    };
    let mut rng = rand::rngs::StdRng::seed_from_u64(args.seed);
    let world = generate_terrain(&cfg, &mut rng)?;

    let mut nav = Navigator::with_config(
        NavConfig::default()
            .with_agent_height(args.agent_height)
            .with_policy(VoxelPolicyConfig::default().with_max_visited(args.max_visited)),
    );

    let mut blocked = Vec::new();
    for &(x, z) in &args.obstacles {
        if let Some(v) = world.top(x, z) {
            nav.add_obstacle(Vec3::new(x as f32, v.y as f32, z as f32));
            blocked.push(v);
        }
    }

    let sky = (cfg.max_height + 1) as f32;
    let column = |(x, z): (i32, i32)| Vec3::new(x as f32 + 0.5, sky, z as f32 + 0.5);
    let Some(start) = nav.ground(&world, column(args.from)) else {
        return Err(format!("no footing at column {:?}", args.from).into());
    };
    let Some(goal) = nav.ground(&world, column(args.to)) else {
        return Err(format!("no footing at column {:?}", args.to).into());
    };

    let centre = |v: Voxel| Vec3::new(v.x as f32 + 0.5, v.y as f32, v.z as f32 + 0.5);
    let route = nav.path(&world, centre(start), centre(goal));

    print!("{}", render_route(&world, start, goal, &route, &blocked));
    if route.is_empty() && start != goal {
        println!("no route from {start} to {goal}");
        return Ok(());
    }
    println!("route from {start} to {goal}: {} waypoints", route.len());
    for p in &route {
        println!("  ({:.1}, {:.1}, {:.1})", p.x, p.y, p.z);
    }
    Ok(())
}
