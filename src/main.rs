//! # Voxel World Driver
//!
//! Headless walk through the world API: generate a region, mesh it, pick a
//! block from above and build on top of it.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- [config.json] [radius]
//! ```

use std::env;

use anyhow::{bail, Context, Result};
use cgmath::{Point3, Vector3};
use log::{info, warn};
use voxel_world::{RenderJobs, World, WorldConfig};

/// Horizontal radius of the generated region when none is given.
const DEFAULT_RADIUS: i32 = 64;

fn main() -> Result<()> {
    voxel_world::init_logger();

    let mut args = env::args().skip(1);
    let config = match args.next() {
        Some(path) => WorldConfig::load(&path)
            .with_context(|| format!("loading world configuration from {path}"))?,
        None => WorldConfig::default(),
    };
    let radius = match args.next() {
        Some(radius) => radius
            .parse::<i32>()
            .with_context(|| format!("invalid radius `{radius}'"))?,
        None => DEFAULT_RADIUS,
    };
    if radius < 0 {
        bail!("radius must not be negative, got {radius}");
    }

    let mut world = World::from_config(&config).context("creating world")?;
    world
        .rebuild_region(Point3::new(0, 0, 0), radius, config.chunk_size)
        .context("generating region")?;

    let eye = Point3::new(0.5, (radius + config.chunk_size) as f32, 0.5);
    let nearby = world.render_jobs(|chunk| chunk.is_within_distance(eye, radius as f32));
    log_jobs(&world, &nearby);

    let down = Vector3::new(0.0, -1.0, 0.0);
    let hit = world
        .ray_cast(eye, down, 4.0 * (radius + config.chunk_size) as f32)
        .context("casting ray")?;
    if !hit.has_hit {
        warn!("Ray from {:?} hit nothing", eye);
        return Ok(());
    }

    let material = world
        .get_material_from_index(hit.block.material)
        .map_or("?", |m| m.name.as_str());
    info!(
        "Ray hit {} at {:?} (normal {:?}, distance {:.2})",
        material, hit.block_position, hit.hit_normal, hit.distance
    );

    let placed = hit.block.material;
    if world.place_block_at(&hit, placed).context("placing block")? {
        info!("Placed block at {:?}", hit.block_position + hit.hit_normal);
        log_jobs(&world, &world.render_jobs(|_| true));
    }

    Ok(())
}

fn log_jobs(world: &World, jobs: &RenderJobs) {
    for (material, meshes) in jobs {
        let name = world
            .get_material_from_index(*material)
            .map_or("?", |m| m.name.as_str());
        let faces: usize = meshes.iter().map(|mesh| mesh.face_count()).sum();
        info!("{:>8}: {} faces in {} meshes", name, faces, meshes.len());
    }
}
