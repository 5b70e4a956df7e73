use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

use ocean_scene::clock::{Clock, SystemClock};
use ocean_scene::export::SceneMaterial;
use ocean_scene::uniform::UniformBank;
use ocean_scene::{ensemble, export, terrain, wave};

/// Command-line tool to generate an ocean scene snapshot: a wave-displaced
/// water surface plus a beach terrain driven by height and normal maps.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Height map image for the beach terrain
    #[arg(long)]
    height_map: Option<PathBuf>,

    /// Tangent-space normal map matching the height map
    #[arg(long)]
    normal_map: Option<PathBuf>,

    /// Terrain extent along X
    #[arg(long, default_value_t = 50.0)]
    terrain_xsize: f32,

    /// Terrain extent along Z
    #[arg(long, default_value_t = 50.0)]
    terrain_zsize: f32,

    /// Water surface extent along X
    #[arg(long, default_value_t = 65.0)]
    water_xsize: f32,

    /// Water surface extent along Z
    #[arg(long, default_value_t = 50.0)]
    water_zsize: f32,

    /// Water surface grid step
    #[arg(long, default_value_t = 0.1)]
    water_step: f32,

    /// Seabed depth at the deep edge of the water plane
    #[arg(long, default_value_t = 10.0)]
    water_depth: f32,

    /// Number of texture-detail wave trains
    #[arg(long, default_value_t = 32)]
    num_tex_waves: usize,

    /// Total chop distributed over the geometry ensemble
    #[arg(long, default_value_t = 0.5)]
    geom_chop: f32,

    /// Total chop distributed over the texture ensemble
    #[arg(long, default_value_t = 0.8)]
    tex_chop: f32,

    /// Snapshot time in seconds
    #[arg(short, long, default_value_t = 0.0)]
    time: f64,

    /// Random seed for wave generation
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output file path
    #[arg(short, long, default_value = "ocean_scene.glb")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let clock = SystemClock::new();
    let mut rng = StdRng::seed_from_u64(args.seed);

    info!(
        "synthesizing {}x{} water surface at step {}",
        args.water_xsize, args.water_zsize, args.water_step
    );
    let mut water = terrain::plane_with_depth(
        args.water_xsize,
        args.water_zsize,
        args.water_step,
        args.water_depth,
    );

    let beach = match (&args.height_map, &args.normal_map) {
        (Some(height_map), Some(normal_map)) => {
            info!(
                "synthesizing terrain from {} and {}",
                height_map.display(),
                normal_map.display()
            );
            terrain::terrain_from_files(
                height_map,
                normal_map,
                args.terrain_xsize,
                args.terrain_zsize,
            )
        }
        _ => {
            info!("no height/normal maps given, falling back to a sloped plane");
            terrain::plane(args.terrain_xsize, args.terrain_zsize, 1.0)
        }
    };
    if beach.is_empty() {
        warn!("beach terrain came out empty, the scene will only hold water");
    }

    // one long swell displaces the geometry, the short trains feed the
    // normal-perturbation texture pass
    let mut geom_waves = wave::geometry_waves(&mut rng, 0.0);
    let mut tex_waves = wave::texture_waves(args.num_tex_waves, &mut rng, 0.0);

    let mut uniforms = UniformBank::new();
    ensemble::init_waves(&mut uniforms, &geom_waves, "geom_waves", args.geom_chop, 0.0);
    ensemble::init_waves(&mut uniforms, &tex_waves, "tex_waves", args.tex_chop, 0.0);
    ensemble::update_waves(
        &mut uniforms,
        &mut geom_waves,
        "geom_waves",
        args.geom_chop,
        &mut rng,
        args.time,
    );
    ensemble::update_waves(
        &mut uniforms,
        &mut tex_waves,
        "tex_waves",
        args.tex_chop,
        &mut rng,
        args.time,
    );
    info!(
        "scheduled {} wave trains ({} uniforms) at t = {}s",
        geom_waves.len() + tex_waves.len(),
        uniforms.len(),
        args.time
    );

    water.apply_waves(&geom_waves, args.geom_chop, args.time);
    water.recalculate_normals();

    info!("exporting scene to {}", args.output.display());
    let mut meshes = vec![("Water", &water, SceneMaterial::Water)];
    if !beach.is_empty() {
        meshes.push(("Beach", &beach, SceneMaterial::Sand));
    }
    export::export_scene_glb(&args.output, &meshes)?;

    info!("done in {:.2}s", clock.now());
    Ok(())
}
