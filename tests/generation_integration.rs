//! Integration tests: full dataset generation pipeline
//!
//! These build complete render job documents through the public API, write
//! them to a temp directory, read them back, and check the cross-module
//! contracts a training pipeline relies on: scene naming and reset flags,
//! deterministic regeneration from a seed, deep-copied trajectory history,
//! action labels that invert exactly, and depth values that survive the
//! image codec.

use scenesmith::dataset_modules::action_codec_module::ActionCodec;
use scenesmith::render_modules::render_data_module::{RenderJob, RenderJobParams, RenderMode};
use scenesmith::scene_modules::property_catalog_module::PropertyCatalog;
use scenesmith::scene_modules::scene_generator_module::SceneGeneratorModule;
use scenesmith::scene_modules::trajectory_generator_module::{CapTrajectoryParams, TrajectoryGeneratorModule};
use scenesmith::utils::utils_depth::DepthCodec;
use scenesmith::utils::utils_sampling::rng_from_seed;
use scenesmith::utils::utils_traits::SaveAndLoadable;

fn cap_catalog() -> PropertyCatalog {
    let mut catalog = PropertyCatalog::new_empty();
    catalog.insert_color("gray", [87, 87, 87]);
    catalog.insert_color("red", [173, 35, 35]);
    catalog.insert_color("blue", [42, 75, 215]);
    catalog
}

fn clevr_catalog() -> PropertyCatalog {
    let mut catalog = cap_catalog();
    catalog.insert_shape("cube", "SmoothCube_v2");
    catalog.insert_shape("sphere", "Sphere");
    catalog.insert_material("rubber", "Rubber");
    catalog.insert_material("metal", "MyMetal");
    catalog.insert_size("large", [0.7, 0.7, 0.7]);
    catalog.insert_size("small", [0.35, 0.35, 0.35]);
    catalog
}

fn cap_trajectory_job(seed: u64, output_dir: &str) -> RenderJob {
    let generator = SceneGeneratorModule::new(cap_catalog(), None, "data/shapes", "data/materials");
    let mut trajectories = TrajectoryGeneratorModule::new(generator, CapTrajectoryParams::default());
    let mut rng = rng_from_seed(seed);
    let mut job = RenderJob::new("000000", output_dir, RenderJobParams::default());
    for scene in trajectories.build_trajectory(&mut rng).expect("trajectory") {
        job.add_scene(scene);
    }
    job
}

fn temp_output_dir(test_name: &str) -> String {
    let dir = std::env::temp_dir().join("scenesmith_integration").join(test_name);
    dir.to_str().expect("utf8 path").to_string()
}

#[test]
fn test_cap_trajectory_document_end_to_end() {
    let output_dir = temp_output_dir("cap_trajectory");
    let job = cap_trajectory_job(7, &output_dir);

    assert_eq!(job.scenes_data().len(), 30);
    let names: Vec<&str> = job.scenes_data().keys().map(|k| k.as_str()).collect();
    assert_eq!(names[0], "000000");
    assert_eq!(names[29], "000029");
    for (i, scene) in job.scenes_data().values().enumerate() {
        assert_eq!(scene.reset_scene(), i == 0, "scene {} reset flag", i);
        assert!(scene.object("ground").is_some());
        assert!(scene.object("swell_cap_0").is_some());
        assert!(scene.object("swell_bottle_0").is_some());
        assert_eq!(scene.cameras().len(), 18);
        assert_eq!(scene.lights().len(), 1);
    }

    let image_path = job.image_file_path("000012", "cam07", RenderMode::Nocs);
    assert!(image_path.to_str().expect("utf8 path").ends_with("000000/000012_cam07_nocs.png"));

    job.save_to_output_dir().expect("save");
    let save_path = job.save_path();
    assert!(save_path.ends_with("000000.json"));
    assert!(save_path.exists());
    let loaded = RenderJob::load_from_json_file(&save_path).expect("load");
    assert_eq!(loaded.get_serialization_string(), job.get_serialization_string());
}

#[test]
fn test_same_seed_regenerates_identical_documents() {
    let output_dir = temp_output_dir("determinism");
    let first = cap_trajectory_job(21, &output_dir);
    let second = cap_trajectory_job(21, &output_dir);
    assert_eq!(first.get_serialization_string(), second.get_serialization_string());
    let third = cap_trajectory_job(22, &output_dir);
    assert_ne!(third.get_serialization_string(), first.get_serialization_string());
}

#[test]
fn test_trajectory_scenes_do_not_alias_their_history() {
    let generator = SceneGeneratorModule::new(cap_catalog(), None, "data/shapes", "data/materials");
    let mut trajectories = TrajectoryGeneratorModule::new(generator, CapTrajectoryParams::default());
    let mut rng = rng_from_seed(3);
    let mut scenes = trajectories.build_trajectory(&mut rng).expect("trajectory");

    let before = *scenes[4].object("swell_cap_0").expect("cap").pose().unwrap_euler_data().expect("euler");
    let cap = scenes[5].object_mut("swell_cap_0").expect("cap");
    let data = cap.pose_mut().unwrap_euler_data_mut().expect("euler");
    data[0] += 100.0;
    let after = *scenes[4].object("swell_cap_0").expect("cap").pose().unwrap_euler_data().expect("euler");
    assert_eq!(before, after);
}

#[test]
fn test_actions_invert_across_a_real_trajectory() {
    let output_dir = temp_output_dir("actions");
    let job = cap_trajectory_job(5, &output_dir);
    let keys = ActionCodec::enumerate_transitions(&job);
    assert_eq!(keys.len(), 29 * 18);

    for key in keys.iter().step_by(37) {
        let action = ActionCodec::encode_transition(&job, key, "swell_cap_0").expect("encode");
        let scene = job.scene(key.scene_name()).expect("scene");
        let next_scene = job.scene(key.next_scene_name()).expect("next scene");
        let camera = scene.camera(key.camera_name()).expect("camera");
        let curr = scene.object("swell_cap_0").expect("cap").pose();
        let decoded = ActionCodec::decode_action(&action, curr, camera.pose()).expect("decode");
        let expected = next_scene.object("swell_cap_0").expect("cap").pose();
        let distance = decoded.to_homogeneous_matrix().expect("transform")
            .approximate_distance(&expected.to_homogeneous_matrix().expect("transform"));
        assert!(distance < 1e-9, "transition {:?} decoded {} away from the actual next pose", key, distance);
    }
}

#[test]
fn test_subgoal_labels_cover_three_stages() {
    let output_dir = temp_output_dir("subgoals");
    let job = cap_trajectory_job(9, &output_dir);
    let keys = ActionCodec::enumerate_transitions(&job);

    let labels: Vec<usize> = keys.iter().step_by(18).map(|key| {
        let scene_index: usize = key.scene_name().parse().expect("scene index");
        ActionCodec::subgoal_index(scene_index, 10).expect("subgoal")
    }).collect();
    assert_eq!(labels.len(), 29);
    assert_eq!(labels[0], 0);
    assert_eq!(labels[8], 0);
    assert_eq!(labels[9], 1);
    assert_eq!(labels[19], 2);
    assert_eq!(labels[28], 2);
}

#[test]
fn test_random_scene_job_with_sharded_names() {
    let generator = SceneGeneratorModule::new(clevr_catalog(), Some("data/base_scene.blend".to_string()), "data/shapes", "data/materials");
    let mut rng = rng_from_seed(17);
    let output_dir = temp_output_dir("random_scenes");
    let mut job = RenderJob::new("clevr", &output_dir, RenderJobParams::default());
    for i in 0..5 {
        let scene = generator.new_random_scene(&format!("{:06}", 20 + i), true, &mut rng).expect("scene");
        job.add_scene(scene);
    }

    let names: Vec<&str> = job.scenes_data().keys().map(|k| k.as_str()).collect();
    assert_eq!(names, vec!["000020", "000021", "000022", "000023", "000024"]);
    for scene in job.scenes_data().values() {
        assert!(scene.reset_scene());
        assert_eq!(scene.base_scene_blendfile(), &Some("data/base_scene.blend".to_string()));
        assert_eq!(scene.objects().len(), 2);
        assert_eq!(scene.cameras().len(), 18);
    }
}

#[test]
fn test_depth_values_survive_the_image_codec() {
    assert_eq!(DepthCodec::encode(1.0).expect("encode"), [128, 0, 0, 0]);
    assert_eq!(DepthCodec::decode(&[128, 0, 0, 0]), 1.0);

    let depths: Vec<f64> = (0..64).map(|i| 8.0 + 0.06 * i as f64).collect();
    let encoded = DepthCodec::encode_buffer(&depths).expect("encode");
    assert_eq!(encoded.len(), 64 * 4);
    let decoded = DepthCodec::decode_buffer(&encoded).expect("decode");
    for (z, z_decoded) in depths.iter().zip(decoded.iter()) {
        assert!((z - z_decoded).abs() / z < 1e-6, "depth {} decoded as {}", z, z_decoded);
    }
}
