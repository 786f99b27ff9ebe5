use std::path::PathBuf;
use clap::Parser;
use scenesmith::render_modules::render_data_module::{DeviceType, RenderJob, RenderJobParams, RenderMode};
use scenesmith::scene_modules::scene_generator_module::SceneGeneratorModule;
use scenesmith::utils::utils_console::{scenesmith_print, PrintColor, PrintMode};
use scenesmith::utils::utils_errors::ScenesmithError;
use scenesmith::utils::utils_sampling::{rng_from_entropy, rng_from_seed};

/// Generates one scene per orientation on a 90 degree rotation grid for a
/// single sampled object, collected into a single render job document.
#[derive(Debug, Clone, Parser)]
#[clap(author, version, about)]
struct Args {
    /// Blend file the renderer rebuilds reset scenes from.
    #[clap(long)]
    base_scene_blendfile: Option<String>,

    /// Property catalog with the vocabulary and the object pose range.
    #[clap(long, default_value = "data/properties/bunny_easy_properties.json")]
    properties_json: String,

    #[clap(long, default_value = "data/shapes")]
    shape_dir: String,

    #[clap(long, default_value = "data/materials")]
    material_dir: String,

    /// Name of the render job document.
    #[clap(long, default_value = "clevr")]
    render_name: String,

    #[clap(long, default_value = "./output/clevr_discrete_90/")]
    output_dir: String,

    #[clap(long, default_value_t = DeviceType::Optix)]
    device_type: DeviceType,

    /// Image kinds to render for every camera.
    #[clap(long, num_args = 1.., default_values_t = [RenderMode::Rgba, RenderMode::Nocs, RenderMode::Depth])]
    modes: Vec<RenderMode>,

    #[clap(long, default_value_t = 256)]
    width: u32,

    #[clap(long, default_value_t = 256)]
    height: u32,

    #[clap(long, default_value_t = 512)]
    render_num_samples: u32,

    #[clap(long, default_value_t = 8)]
    render_min_bounces: u32,

    #[clap(long, default_value_t = 8)]
    render_max_bounces: u32,

    #[clap(long, default_value_t = 256)]
    render_tile_size: u32,

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

    let mut job = RenderJob::new(&args.render_name, &args.output_dir, render_params);
    let scenes = scene_generator.new_discrete_pose_scenes(&mut rng)?;
    for scene in scenes {
        job.add_scene(scene);
    }
    job.save_to_output_dir()?;
    scenesmith_print(&format!("Saved render job {:?} with {} scenes to {:?}.", job.name(), job.scenes_data().len(), job.save_path()), PrintMode::Println, PrintColor::Green, false);

    Ok(())
}
