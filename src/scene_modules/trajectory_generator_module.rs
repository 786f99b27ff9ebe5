use nalgebra::{Rotation3, Vector3};
use rand::Rng;
use crate::scene_modules::scene_data_module::SceneEntity;
use crate::scene_modules::scene_generator_module::SceneGeneratorModule;
use crate::utils::utils_errors::ScenesmithError;
use crate::utils::utils_sampling::SimpleSamplers;
use crate::utils::utils_se3::euler_angles::{euler_angles_in_degrees_from_rotation, rotation_from_euler_angles_in_degrees};

pub const CAP_SHAPE: &str = "swell_cap";
pub const BOTTLE_SHAPE: &str = "swell_bottle";

/// Tuning knobs for the cap-onto-bottle trajectory.
#[derive(Clone, Debug)]
pub struct CapTrajectoryParams {
    /// Scene count per stage; the full trajectory is three stages long.
    pub scenes_per_stage: usize,
    pub object_scale: f64,
    pub placement_half_extent: f64,
    pub resting_height_factor: f64,
    /// Multiplier on the bottle half-height giving the pre-insertion hover
    /// height.
    pub goal_height_factor: f64,
    /// Uniform range of the extra height multiplier for the first approach
    /// waypoint.
    pub approach_range: (f64, f64),
    pub screw_step_degrees: f64,
    pub descent_step: f64
}
impl Default for CapTrajectoryParams {
    fn default() -> Self {
        Self {
            scenes_per_stage: 10,
            object_scale: 0.15,
            placement_half_extent: 2.0,
            resting_height_factor: 0.75,
            goal_height_factor: 1.5,
            approach_range: (1.1, 1.5),
            screw_step_degrees: -10.0,
            descent_step: 0.01
        }
    }
}
impl CapTrajectoryParams {
    /// Smaller, more tightly placed variant used to generate held-out
    /// prediction sets.
    pub fn new_prediction_set() -> Self {
        Self {
            object_scale: 0.10,
            placement_half_extent: 1.5,
            resting_height_factor: 0.5,
            ..Default::default()
        }
    }
}

/// Chains scene generation into a three stage cap-onto-bottle trajectory:
/// a fresh random scene, approach steps that interpolate the cap toward goal
/// waypoints above the bottle, and screwing steps that rotate and lower it.
///
/// Stages are indexed by `i div scenes_per_stage` over `3 * scenes_per_stage`
/// scenes named `{i:06}`.  Every scene after the first is a deep copy of its
/// predecessor with only the cap pose changed and `reset_scene` cleared, so a
/// step never aliases its history.
#[derive(Clone, Debug)]
pub struct TrajectoryGeneratorModule {
    scene_generator: SceneGeneratorModule,
    params: CapTrajectoryParams,
    cap_goal_poses: Option<[[f64; 6]; 2]>
}
impl TrajectoryGeneratorModule {
    pub fn new(mut scene_generator: SceneGeneratorModule, params: CapTrajectoryParams) -> Self {
        scene_generator.set_resting_height_factor(params.resting_height_factor);
        Self { scene_generator, params, cap_goal_poses: None }
    }
    pub fn scene_generator(&self) -> &SceneGeneratorModule { &self.scene_generator }
    pub fn params(&self) -> &CapTrajectoryParams { &self.params }
    /// The two cap goal waypoints recorded while building the most recent
    /// trajectory's first scene.
    pub fn cap_goal_poses(&self) -> Option<[[f64; 6]; 2]> { self.cap_goal_poses }
    pub fn cap_object_name(&self) -> String { format!("{}_0", CAP_SHAPE) }
    pub fn bottle_object_name(&self) -> String { format!("{}_0", BOTTLE_SHAPE) }

    /// Builds one full trajectory of `3 * scenes_per_stage` scenes, in order.
    pub fn build_trajectory<R: Rng>(&mut self, rng: &mut R) -> Result<Vec<SceneEntity>, ScenesmithError> {
        let n = self.params.scenes_per_stage;
        if n == 0 {
            return Err(ScenesmithError::new_generic_error_str("scenes_per_stage must be at least 1", file!(), line!()));
        }
        let mut scenes: Vec<SceneEntity> = vec![];
        for i in 0..3 * n {
            let stage = i / n;
            if i == 0 {
                scenes.push(self.new_initial_scene(rng)?);
            } else {
                let mut scene = scenes[i - 1].clone();
                scene.set_name(&format!("{:06}", i));
                scene.set_reset_scene(false);
                if stage < 2 {
                    self.interpolate_cap_toward_goal(&mut scene, stage, n - i % n)?;
                } else {
                    self.screw_cap_down(&mut scene)?;
                }
                scenes.push(scene);
            }
        }
        return Ok(scenes);
    }

    /// Fresh scene `000000`: ground, one cap, one bottle, the 18 camera rig,
    /// and one light.  Also records the cap's two goal waypoints directly
    /// above wherever the bottle landed.
    fn new_initial_scene<R: Rng>(&mut self, rng: &mut R) -> Result<SceneEntity, ScenesmithError> {
        let mut scene = self.scene_generator.new_scene("000000", true);
        let cap = self.scene_generator.new_shape_object(CAP_SHAPE, self.params.object_scale, self.params.placement_half_extent, &scene, rng)?;
        scene.add_object(cap);
        let bottle = self.scene_generator.new_shape_object(BOTTLE_SHAPE, self.params.object_scale, self.params.placement_half_extent, &scene, rng)?;
        scene.add_object(bottle);
        self.scene_generator.add_hemisphere_camera_grid(&mut scene, 10.0, &[60.0, 30.0, 0.0], &[0.0, 60.0, 120.0, 180.0, 240.0, 300.0]);
        scene.add_light(self.scene_generator.new_point_light("light_0", 1000.0, 10.0, 45.0, 45.0));

        let bottle_data = match scene.object(&self.bottle_object_name()) {
            Some(bottle) => *bottle.pose().unwrap_euler_data()?,
            None => return Err(ScenesmithError::new_inconsistent_trajectory_error(&format!("scene {:?} has no object {:?}", scene.name(), self.bottle_object_name()), file!(), line!()))
        };
        let hover = self.scene_generator.resting_half_height(BOTTLE_SHAPE) * self.params.goal_height_factor;
        let u = SimpleSamplers::uniform_sample(self.params.approach_range, rng);
        self.cap_goal_poses = Some([
            [bottle_data[0], bottle_data[1], hover * u, 0.0, 0.0, 0.0],
            [bottle_data[0], bottle_data[1], hover, 0.0, 0.0, 0.0]
        ]);
        return Ok(scene);
    }

    /// Moves the cap by `(goal - pose) / steps_remaining` componentwise, so
    /// the stage goal is met exactly when `steps_remaining` reaches 1.
    fn interpolate_cap_toward_goal(&self, scene: &mut SceneEntity, stage: usize, steps_remaining: usize) -> Result<(), ScenesmithError> {
        let goal = match &self.cap_goal_poses {
            Some(goals) => goals[stage],
            None => return Err(ScenesmithError::new_inconsistent_trajectory_error("no goal poses have been recorded", file!(), line!()))
        };
        let data = self.cap_pose_mut(scene)?;
        for c in 0..6 {
            data[c] += (goal[c] - data[c]) / steps_remaining as f64;
        }
        return Ok(());
    }

    /// One screwing step: rotation composed with a fixed yaw offset about the
    /// cap's own z axis, height lowered by the descent step.
    fn screw_cap_down(&self, scene: &mut SceneEntity) -> Result<(), ScenesmithError> {
        let offset = Rotation3::from_axis_angle(&Vector3::z_axis(), self.params.screw_step_degrees.to_radians());
        let data = self.cap_pose_mut(scene)?;
        let rotation = rotation_from_euler_angles_in_degrees(data[3], data[4], data[5]);
        let angles = euler_angles_in_degrees_from_rotation(&(rotation * offset));
        data[3] = angles[0];
        data[4] = angles[1];
        data[5] = angles[2];
        data[2] -= self.params.descent_step;
        return Ok(());
    }

    fn cap_pose_mut<'a>(&self, scene: &'a mut SceneEntity) -> Result<&'a mut [f64; 6], ScenesmithError> {
        let name = self.cap_object_name();
        let scene_name = scene.name().to_string();
        return match scene.object_mut(&name) {
            Some(cap) => cap.pose_mut().unwrap_euler_data_mut(),
            None => Err(ScenesmithError::new_inconsistent_trajectory_error(&format!("scene {:?} has no object {:?}", scene_name, name), file!(), line!()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene_modules::property_catalog_module::PropertyCatalog;
    use crate::utils::utils_sampling::rng_from_seed;

    fn test_module(params: CapTrajectoryParams) -> TrajectoryGeneratorModule {
        let mut catalog = PropertyCatalog::new_empty();
        catalog.insert_color("white", [255, 255, 255]);
        catalog.insert_color("blue", [42, 75, 215]);
        let generator = SceneGeneratorModule::new(catalog, None, "data/shapes", "data/materials");
        TrajectoryGeneratorModule::new(generator, params)
    }

    #[test]
    fn test_trajectory_shape_and_reset_flags() {
        let mut module = test_module(CapTrajectoryParams::default());
        let mut rng = rng_from_seed(11);
        let scenes = module.build_trajectory(&mut rng).expect("trajectory");
        assert_eq!(scenes.len(), 30);
        assert_eq!(scenes[0].name(), "000000");
        assert_eq!(scenes[29].name(), "000029");
        assert!(scenes[0].reset_scene());
        assert!(scenes[1..].iter().all(|s| !s.reset_scene()));
        for scene in &scenes {
            assert!(scene.object("swell_cap_0").is_some());
            assert!(scene.object("swell_bottle_0").is_some());
            assert_eq!(scene.cameras().len(), 18);
        }
    }

    #[test]
    fn test_interpolation_reaches_stage_goals_exactly() {
        let mut module = test_module(CapTrajectoryParams::default());
        let mut rng = rng_from_seed(12);
        let scenes = module.build_trajectory(&mut rng).expect("trajectory");
        let goals = module.cap_goal_poses().expect("goals");
        let cap_pose = |scene: &SceneEntity| -> [f64; 6] {
            *scene.object("swell_cap_0").expect("cap").pose().unwrap_euler_data().expect("euler")
        };
        let end_of_stage_0 = cap_pose(&scenes[9]);
        let end_of_stage_1 = cap_pose(&scenes[19]);
        for c in 0..6 {
            assert!((end_of_stage_0[c] - goals[0][c]).abs() < 1e-9);
            assert!((end_of_stage_1[c] - goals[1][c]).abs() < 1e-9);
        }
        let bottle = *scenes[0].object("swell_bottle_0").expect("bottle").pose().unwrap_euler_data().expect("euler");
        assert_eq!(goals[1][0], bottle[0]);
        assert_eq!(goals[1][1], bottle[1]);
        assert!((goals[1][2] - 1.3085 * 1.5).abs() < 1e-12);
        assert!(goals[0][2] >= 1.3085 * 1.5 * 1.1 && goals[0][2] <= 1.3085 * 1.5 * 1.5);
    }

    #[test]
    fn test_single_scene_stages_jump_straight_to_goal() {
        let mut params = CapTrajectoryParams::default();
        params.scenes_per_stage = 1;
        let mut module = test_module(params);
        let mut rng = rng_from_seed(13);
        let scenes = module.build_trajectory(&mut rng).expect("trajectory");
        assert_eq!(scenes.len(), 3);
        let goals = module.cap_goal_poses().expect("goals");
        let cap = scenes[1].object("swell_cap_0").expect("cap").pose().unwrap_euler_data().expect("euler");
        for c in 0..6 {
            assert!((cap[c] - goals[1][c]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_screw_stage_rotates_and_lowers() {
        let mut module = test_module(CapTrajectoryParams::default());
        let mut rng = rng_from_seed(14);
        let scenes = module.build_trajectory(&mut rng).expect("trajectory");
        let cap_pose = |scene: &SceneEntity| -> [f64; 6] {
            *scene.object("swell_cap_0").expect("cap").pose().unwrap_euler_data().expect("euler")
        };
        let before = cap_pose(&scenes[19]);
        for k in 1..=10 {
            let pose = cap_pose(&scenes[19 + k]);
            assert!((pose[5] - (-10.0 * k as f64)).abs() < 1e-9);
            assert!(pose[3].abs() < 1e-9 && pose[4].abs() < 1e-9);
            assert!((pose[2] - (before[2] - 0.01 * k as f64)).abs() < 1e-12);
            assert_eq!(pose[0], before[0]);
            assert_eq!(pose[1], before[1]);
        }
    }

    #[test]
    fn test_same_seed_builds_identical_trajectories() {
        let mut first = test_module(CapTrajectoryParams::default());
        let mut second = test_module(CapTrajectoryParams::default());
        let scenes_a = first.build_trajectory(&mut rng_from_seed(99)).expect("trajectory");
        let scenes_b = second.build_trajectory(&mut rng_from_seed(99)).expect("trajectory");
        assert_eq!(scenes_a, scenes_b);
    }

    #[test]
    fn test_zero_scenes_per_stage_is_rejected() {
        let mut params = CapTrajectoryParams::default();
        params.scenes_per_stage = 0;
        let mut module = test_module(params);
        assert!(module.build_trajectory(&mut rng_from_seed(0)).is_err());
    }

    #[test]
    fn test_prediction_set_params_shrink_the_task() {
        let params = CapTrajectoryParams::new_prediction_set();
        assert_eq!(params.object_scale, 0.10);
        assert_eq!(params.placement_half_extent, 1.5);
        assert_eq!(params.resting_height_factor, 0.5);
        assert_eq!(params.scenes_per_stage, 10);
        let module = test_module(params);
        assert_eq!(module.scene_generator().resting_height(BOTTLE_SHAPE), 1.3085 * 0.5);
    }
}
