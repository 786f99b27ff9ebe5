use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use serde::{Serialize, Deserialize};
use crate::render_modules::render_data_module::RenderJob;
use crate::utils::utils_errors::ScenesmithError;
use crate::utils::utils_se3::euler_angles::euler_angles_in_degrees_from_rotation;
use crate::utils::utils_se3::pose_vector::PoseVector;

/// The supervised-learning action representation: the displacement of an
/// object's origin between two consecutive scenes expressed in camera
/// coordinates, and the object-centric rotation delta as a scalar-first
/// quaternion whose vector part has been rotated into the camera frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoseAction {
    translation: [f64; 3],
    rotation: [f64; 4]
}
impl PoseAction {
    pub fn new(translation: [f64; 3], rotation: [f64; 4]) -> Self {
        Self { translation, rotation }
    }
    pub fn new_from_array(array: &[f64; 7]) -> Self {
        Self {
            translation: [array[0], array[1], array[2]],
            rotation: [array[3], array[4], array[5], array[6]]
        }
    }
    pub fn translation(&self) -> &[f64; 3] { &self.translation }
    pub fn rotation(&self) -> &[f64; 4] { &self.rotation }
    /// Flat `[tx, ty, tz, qw, qx, qy, qz]` layout used by training pipelines.
    pub fn to_array(&self) -> [f64; 7] {
        return [self.translation[0], self.translation[1], self.translation[2],
            self.rotation[0], self.rotation[1], self.rotation[2], self.rotation[3]];
    }
}

/// One adjacent scene pair observed through one camera.  The transition keys
/// of a render job are the training samples a behavior-cloning dataset is
/// built from.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransitionKey {
    scene_name: String,
    next_scene_name: String,
    camera_name: String
}
impl TransitionKey {
    pub fn new(scene_name: &str, next_scene_name: &str, camera_name: &str) -> Self {
        Self {
            scene_name: scene_name.to_string(),
            next_scene_name: next_scene_name.to_string(),
            camera_name: camera_name.to_string()
        }
    }
    pub fn scene_name(&self) -> &str { &self.scene_name }
    pub fn next_scene_name(&self) -> &str { &self.next_scene_name }
    pub fn camera_name(&self) -> &str { &self.camera_name }
}

pub struct ActionCodec;
impl ActionCodec {
    /// Encodes the relative pose action that carries an object from `curr` to
    /// `next` as seen from `camera`.  The translation lives fully in the
    /// camera frame; the rotation delta is object-centric with its quaternion
    /// vector part re-expressed in the camera frame.
    pub fn encode_action(curr: &PoseVector, next: &PoseVector, camera: &PoseVector) -> Result<PoseAction, ScenesmithError> {
        let camera_t_world = camera.to_inverse_homogeneous_matrix()?;
        let world_t_curr = curr.to_homogeneous_matrix()?;
        let world_t_next = next.to_homogeneous_matrix()?;
        let camera_t_curr = camera_t_world.multiply(&world_t_curr);
        let camera_t_next = camera_t_world.multiply(&world_t_next);
        let curr_t_next = curr.to_inverse_homogeneous_matrix()?.multiply(&world_t_next);

        let translation = camera_t_next.translation() - camera_t_curr.translation();
        let quaternion = UnitQuaternion::from_rotation_matrix(&curr_t_next.rotation());
        let vector_part = camera_t_curr.rotation() * Vector3::new(quaternion.i, quaternion.j, quaternion.k);
        return Ok(PoseAction::new(
            [translation[0], translation[1], translation[2]],
            [quaternion.w, vector_part[0], vector_part[1], vector_part[2]]));
    }
    /// Exact inverse of `encode_action`: recovers the object's next world
    /// pose from its current pose, the action, and the camera pose.  The
    /// result is an Euler-degree pose.
    pub fn decode_action(action: &PoseAction, curr: &PoseVector, camera: &PoseVector) -> Result<PoseVector, ScenesmithError> {
        let world_t_camera = camera.to_homogeneous_matrix()?;
        let camera_t_world = camera.to_inverse_homogeneous_matrix()?;
        let world_t_curr = curr.to_homogeneous_matrix()?;
        let camera_t_curr = camera_t_world.multiply(&world_t_curr);

        let translation = action.translation();
        let camera_point = Vector3::new(translation[0], translation[1], translation[2]) + camera_t_curr.translation();
        let world_point = world_t_camera.multiply_by_point(&camera_point);

        let rotation = action.rotation();
        let vector_part = camera_t_curr.rotation().transpose() * Vector3::new(rotation[1], rotation[2], rotation[3]);
        let quaternion = Quaternion::new(rotation[0], vector_part[0], vector_part[1], vector_part[2]);
        if quaternion.norm() < 1e-12 {
            return Err(ScenesmithError::new_invalid_pose_error("action quaternion has a near-zero norm", file!(), line!()));
        }
        let rotation_delta = UnitQuaternion::from_quaternion(quaternion).to_rotation_matrix();
        let rotation_next = world_t_curr.rotation() * rotation_delta;
        let angles = euler_angles_in_degrees_from_rotation(&rotation_next);
        return Ok(PoseVector::new_euler(world_point[0], world_point[1], world_point[2], angles[0], angles[1], angles[2]));
    }
    /// All transition keys of a render job, in order: every scene except the
    /// last, paired with its successor, under each of its cameras.
    pub fn enumerate_transitions(job: &RenderJob) -> Vec<TransitionKey> {
        let scenes: Vec<_> = job.scenes_data().values().collect();
        let mut keys = vec![];
        for i in 0..scenes.len().saturating_sub(1) {
            for camera_name in scenes[i].cameras().keys() {
                keys.push(TransitionKey::new(scenes[i].name(), scenes[i + 1].name(), camera_name));
            }
        }
        return keys;
    }
    /// Stage label of the transition leaving the scene at `scene_index`,
    /// used to tag training samples with the sub-task they belong to.
    pub fn subgoal_index(scene_index: usize, scenes_per_stage: usize) -> Result<usize, ScenesmithError> {
        if scenes_per_stage == 0 {
            return Err(ScenesmithError::new_generic_error_str("scenes_per_stage must be at least 1", file!(), line!()));
        }
        return Ok((scene_index + 1) / scenes_per_stage);
    }
    /// Encodes the action of the named object across the given transition.
    pub fn encode_transition(job: &RenderJob, key: &TransitionKey, object_name: &str) -> Result<PoseAction, ScenesmithError> {
        let scene = match job.scene(key.scene_name()) {
            Some(scene) => scene,
            None => return Err(ScenesmithError::new_inconsistent_trajectory_error(&format!("render job {:?} has no scene {:?}", job.name(), key.scene_name()), file!(), line!()))
        };
        let next_scene = match job.scene(key.next_scene_name()) {
            Some(scene) => scene,
            None => return Err(ScenesmithError::new_inconsistent_trajectory_error(&format!("render job {:?} has no scene {:?}", job.name(), key.next_scene_name()), file!(), line!()))
        };
        let camera = match scene.camera(key.camera_name()) {
            Some(camera) => camera,
            None => return Err(ScenesmithError::new_inconsistent_trajectory_error(&format!("scene {:?} has no camera {:?}", scene.name(), key.camera_name()), file!(), line!()))
        };
        let curr = match scene.object(object_name) {
            Some(object) => object.pose(),
            None => return Err(ScenesmithError::new_inconsistent_trajectory_error(&format!("scene {:?} has no object {:?}", scene.name(), object_name), file!(), line!()))
        };
        let next = match next_scene.object(object_name) {
            Some(object) => object.pose(),
            None => return Err(ScenesmithError::new_inconsistent_trajectory_error(&format!("scene {:?} has no object {:?}", next_scene.name(), object_name), file!(), line!()))
        };
        return Self::encode_action(curr, next, camera.pose());
    }
}
