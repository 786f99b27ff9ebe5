use std::path::PathBuf;
use clap::Parser;
use scenesmith::render_modules::render_data_module::{DeviceType, RenderJob, RenderJobParams, RenderMode};
use scenesmith::scene_modules::scene_generator_module::SceneGeneratorModule;
use scenesmith::scene_modules::trajectory_generator_module::{CapTrajectoryParams, TrajectoryGeneratorModule};
use scenesmith::utils::utils_console::{scenesmith_print, PrintColor, PrintMode};
use scenesmith::utils::utils_errors::ScenesmithError;
use scenesmith::utils::utils_sampling::{rng_from_entropy, rng_from_seed};

/// Generates cap-onto-bottle manipulation trajectories as render job
/// documents, one JSON file per trajectory.
#[derive(Debug, Clone, Parser)]
#[clap(author, version, about)]
struct Args {
    /// Blend file the renderer rebuilds reset scenes from.
    #[clap(long)]
    base_scene_blendfile: Option<String>,

    /// Property catalog with the color vocabulary objects sample from.
    #[clap(long, default_value = "data/properties/cap_properties.json")]
    properties_json: String,

    #[clap(long, default_value = "data/shapes")]
    shape_dir: String,

    #[clap(long, default_value = "data/materials")]
    material_dir: String,

    /// Number of independent trajectories to generate.
    #[clap(long, default_value_t = 1)]
    num_renders: usize,

    /// Scenes per trajectory stage; each trajectory has three stages.
    #[clap(long, default_value_t = 10)]
    num_scenes: usize,

    #[clap(long, default_value = "./output/caps_onlycap/")]
    output_dir: String,

    #[clap(long, default_value_t = DeviceType::Optix)]
    device_type: DeviceType,

    /// Image kinds to render for every camera.
    #[clap(long, num_args = 1.., default_values_t = [RenderMode::Rgba, RenderMode::Nocs, RenderMode::Depth])]
    modes: Vec<RenderMode>,

    #[clap(long, default_value_t = 480)]
    width: u32,

    #[clap(long, default_value_t = 320)]
    height: u32,

    #[clap(long, default_value_t = 512)]
    render_num_samples: u32,

    #[clap(long, default_value_t = 8)]
    render_min_bounces: u32,

    #[clap(long, default_value_t = 8)]
    render_max_bounces: u32,

    #[clap(long, default_value_t = 256)]
    render_tile_size: u32,

    /// Generate the smaller, more tightly placed prediction-set variant.
    #[clap(long, default_value_t = false)]
    prediction_set: bool,

    /// Seed for reproducible generation; omitted means an entropy seed.
    #[clap(long)]
    seed: Option<u64>
}

fn main() -> Result<(), ScenesmithError> {
    let args = Args::parse();
    let mut rng = match args.seed {
        Some(seed) => rng_from_seed(seed),
        None => rng_from_entropy()
    };

    let scene_generator = SceneGeneratorModule::new_from_properties_file(&PathBuf::from(&args.properties_json), args.base_scene_blendfile.clone(), &args.shape_dir, &args.material_dir)?;
    let mut trajectory_params = if args.prediction_set { CapTrajectoryParams::new_prediction_set() } else { CapTrajectoryParams::default() };
    trajectory_params.scenes_per_stage = args.num_scenes;
    let mut trajectory_generator = TrajectoryGeneratorModule::new(scene_generator, trajectory_params);

    let render_params = RenderJobParams {
        width: args.width,
        height: args.height,
        render_tile_size: args.render_tile_size,
        device_type: args.device_type,
        render_num_samples: args.render_num_samples,
        render_min_bounces: args.render_min_bounces,
        render_max_bounces: args.render_max_bounces,
        modes: args.modes.clone()
    };

    for render_i in 0..args.num_renders {
        let mut job = RenderJob::new(&format!("{:06}", render_i), &args.output_dir, render_params.clone());
        let scenes = trajectory_generator.build_trajectory(&mut rng)?;
        for scene in scenes {
            job.add_scene(scene);
        }
        job.save_to_output_dir()?;
        scenesmith_print(&format!("Saved render job {:?} with {} scenes to {:?}.", job.name(), job.scenes_data().len(), job.save_path()), PrintMode::Println, PrintColor::Green, false);
    }

    Ok(())
}
