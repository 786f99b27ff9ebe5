use std::path::PathBuf;
use indexmap::IndexMap;
use itertools::Itertools;
use nalgebra::{Rotation3, Vector3};
use rand::Rng;
use crate::scene_modules::property_catalog_module::PropertyCatalog;
use crate::scene_modules::scene_data_module::{CameraEntity, ColorPair, LightEntity, LightType, MaterialPair, ObjectEntity, ScalePair, SceneEntity, ShapePair};
use crate::utils::utils_errors::ScenesmithError;
use crate::utils::utils_sampling::SimpleSamplers;
use crate::utils::utils_se3::pose_vector::PoseVector;
use crate::utils::utils_traits::SaveAndLoadable;

/// Builds `SceneEntity` values from a property catalog: a ground plane, sampled
/// or explicitly named foreground objects at their analytic resting heights,
/// hemisphere camera rigs, and point lights.
///
/// Every sampling call threads through an explicit `Rng`, so a fixed seed
/// reproduces a scene exactly.  Foreground heights come from a per-shape
/// half-height table rather than from mesh bounds; shapes absent from the
/// table rest at zero.
#[derive(Clone, Debug)]
pub struct SceneGeneratorModule {
    properties: PropertyCatalog,
    base_scene_blendfile: Option<String>,
    shape_dir: String,
    material_dir: String,
    resting_half_heights: IndexMap<String, f64>,
    resting_height_factor: f64
}
impl SceneGeneratorModule {
    pub fn new(properties: PropertyCatalog, base_scene_blendfile: Option<String>, shape_dir: &str, material_dir: &str) -> Self {
        let mut resting_half_heights = IndexMap::new();
        resting_half_heights.insert("plane".to_string(), 0.0);
        resting_half_heights.insert("cube".to_string(), 1.0);
        resting_half_heights.insert("sphere".to_string(), 1.0);
        resting_half_heights.insert("cylinder".to_string(), 1.0);
        resting_half_heights.insert("swell_cap".to_string(), 0.2796);
        resting_half_heights.insert("swell_bottle".to_string(), 1.3085);
        Self {
            properties,
            base_scene_blendfile,
            shape_dir: shape_dir.to_string(),
            material_dir: material_dir.to_string(),
            resting_half_heights,
            resting_height_factor: 0.75
        }
    }
    pub fn new_from_properties_file(path: &PathBuf, base_scene_blendfile: Option<String>, shape_dir: &str, material_dir: &str) -> Result<Self, ScenesmithError> {
        let properties = PropertyCatalog::load_from_json_file(path)?;
        return Ok(Self::new(properties, base_scene_blendfile, shape_dir, material_dir));
    }
    pub fn properties(&self) -> &PropertyCatalog { &self.properties }
    pub fn resting_height_factor(&self) -> f64 { self.resting_height_factor }
    pub fn set_resting_height_factor(&mut self, resting_height_factor: f64) {
        self.resting_height_factor = resting_height_factor;
    }
    pub fn set_resting_half_height(&mut self, shape_name: &str, half_height: f64) {
        self.resting_half_heights.insert(shape_name.to_string(), half_height);
    }
    /// Half-height table value for the given shape, zero when the shape has no
    /// entry.
    pub fn resting_half_height(&self, shape_name: &str) -> f64 {
        return self.resting_half_heights.get(shape_name).copied().unwrap_or(0.0);
    }
    /// Height at which the given shape sits on the ground plane.  Shapes with
    /// no table entry rest at zero.
    pub fn resting_height(&self, shape_name: &str) -> f64 {
        return self.resting_half_height(shape_name) * self.resting_height_factor;
    }
    /// Asset reference of the form `{shape_dir}/{shape}.blend/Object/{shape}`.
    pub fn shape_asset_path(&self, shape_name: &str) -> String {
        return format!("{}/{}.blend/Object/{}", self.shape_dir, shape_name, shape_name);
    }
    /// Empty scene with the catalog embedded and the ground plane already in
    /// place.
    pub fn new_scene(&self, name: &str, reset_scene: bool) -> SceneEntity {
        let mut scene = SceneEntity::new(name, self.base_scene_blendfile.clone(), self.properties.clone(), &self.shape_dir, &self.material_dir, reset_scene);
        scene.add_object(self.new_ground_object());
        return scene;
    }
    pub fn new_ground_object(&self) -> ObjectEntity {
        return ObjectEntity::new(
            "ground",
            ShapePair("plane".to_string(), "plane".to_string()),
            Some(MaterialPair("solid".to_string(), "solid".to_string())),
            ColorPair("white".to_string(), [1.0, 1.0, 1.0, 1.0]),
            ScalePair("1".to_string(), [1.0, 1.0, 1.0]),
            PoseVector::new_euler(0.0, 0.0, 0.0, 0.0, 0.0, 0.0));
    }
    /// Foreground object with a caller-chosen shape, a sampled catalog color,
    /// no material binding, and a uniform scale.  Placed uniformly in the
    /// square of the given half extent, resting on the ground, unrotated.
    pub fn new_shape_object<R: Rng>(&self, shape_name: &str, scale: f64, placement_half_extent: f64, scene: &SceneEntity, rng: &mut R) -> Result<ObjectEntity, ScenesmithError> {
        let shape_pair = ShapePair(shape_name.to_string(), self.shape_asset_path(shape_name));
        let (color_name, _) = self.properties.sample_color(rng)?;
        let color_pair = ColorPair(color_name.clone(), self.properties.color_as_rgba(&color_name)?);
        let scale_pair = ScalePair("scale_down".to_string(), [scale, scale, scale]);
        let x = SimpleSamplers::uniform_sample((-placement_half_extent, placement_half_extent), rng);
        let y = SimpleSamplers::uniform_sample((-placement_half_extent, placement_half_extent), rng);
        let z = self.resting_height(shape_name);
        let pose = PoseVector::new_euler(x, y, z, 0.0, 0.0, 0.0);
        let name = format!("{}_{}", shape_name, scene.count_objects_with_name_prefix(shape_name));
        return Ok(ObjectEntity::new(&name, shape_pair, None, color_pair, scale_pair, pose));
    }
    /// Foreground object with shape, color, material, and scale all sampled
    /// uniformly from the catalog, a uniform planar position, a uniform yaw in
    /// [0, 360), and the analytic resting height.
    pub fn new_sampled_object<R: Rng>(&self, placement_half_extent: f64, scene: &SceneEntity, rng: &mut R) -> Result<ObjectEntity, ScenesmithError> {
        let (shape_name, shape_pair, material_pair, color_pair, scale_pair) = self.sample_object_appearance(rng)?;
        let x = SimpleSamplers::uniform_sample((-placement_half_extent, placement_half_extent), rng);
        let y = SimpleSamplers::uniform_sample((-placement_half_extent, placement_half_extent), rng);
        let z = self.resting_height(&shape_name);
        let r_z = SimpleSamplers::uniform_sample((0.0, 360.0), rng);
        let pose = PoseVector::new_euler(x, y, z, 0.0, 0.0, r_z);
        let name = format!("{}_{}", shape_name, scene.count_objects_with_name_prefix(&shape_name));
        return Ok(ObjectEntity::new(&name, shape_pair, material_pair, color_pair, scale_pair, pose));
    }
    /// Sampled-appearance object whose position draws from the catalog's
    /// `pose_range` translation bounds and whose rotation is fixed by the
    /// caller, for discrete orientation sweeps.
    pub fn new_discrete_pose_object<R: Rng>(&self, rotation_degrees: [f64; 3], scene: &SceneEntity, rng: &mut R) -> Result<ObjectEntity, ScenesmithError> {
        let (shape_name, shape_pair, material_pair, color_pair, scale_pair) = self.sample_object_appearance(rng)?;
        let pose_range = match self.properties.pose_range() {
            Some(pose_range) => *pose_range,
            None => return Err(ScenesmithError::new_missing_catalog_entry_error("properties", "pose_range", file!(), line!()))
        };
        let x = SimpleSamplers::uniform_sample((pose_range[0][0], pose_range[0][1]), rng);
        let y = SimpleSamplers::uniform_sample((pose_range[1][0], pose_range[1][1]), rng);
        let z = SimpleSamplers::uniform_sample((pose_range[2][0], pose_range[2][1]), rng);
        let pose = PoseVector::new_euler(x, y, z, rotation_degrees[0], rotation_degrees[1], rotation_degrees[2]);
        let name = format!("{}_{}", shape_name, scene.count_objects_with_name_prefix(&shape_name));
        return Ok(ObjectEntity::new(&name, shape_pair, material_pair, color_pair, scale_pair, pose));
    }
    fn sample_object_appearance<R: Rng>(&self, rng: &mut R) -> Result<(String, ShapePair, Option<MaterialPair>, ColorPair, ScalePair), ScenesmithError> {
        let (shape_name, _) = self.properties.sample_shape(rng)?;
        let shape_pair = ShapePair(shape_name.clone(), self.shape_asset_path(&shape_name));
        let (color_name, _) = self.properties.sample_color(rng)?;
        let color_pair = ColorPair(color_name.clone(), self.properties.color_as_rgba(&color_name)?);
        let (material_name, material_value) = self.properties.sample_material(rng)?;
        let material_pair = Some(MaterialPair(material_name, material_value));
        let (size_name, size_value) = self.properties.sample_size(rng)?;
        let scale_pair = ScalePair(size_name, size_value);
        return Ok((shape_name, shape_pair, material_pair, color_pair, scale_pair));
    }
    /// Pose on the upper hemisphere of the given radius: the zenith vector
    /// `(0, 0, d)` rotated by `Rz(azimuth) * Rx(polar)`, with the stored Euler
    /// rotation `[polar, 0, azimuth]` in degrees.
    pub fn new_hemisphere_pose(&self, distance: f64, polar_degrees: f64, azimuth_degrees: f64) -> PoseVector {
        let r_z = Rotation3::from_axis_angle(&Vector3::z_axis(), azimuth_degrees.to_radians());
        let r_x = Rotation3::from_axis_angle(&Vector3::x_axis(), polar_degrees.to_radians());
        let position = r_z * r_x * Vector3::new(0.0, 0.0, distance);
        return PoseVector::new_euler(position[0], position[1], position[2], polar_degrees, 0.0, azimuth_degrees);
    }
    /// Adds one camera per (polar, azimuth) pair in the cartesian product, in
    /// iteration order.  Names continue the scene's zero-padded `cam{:02}`
    /// sequence.
    pub fn add_hemisphere_camera_grid(&self, scene: &mut SceneEntity, distance: f64, polar_degrees: &[f64], azimuth_degrees: &[f64]) {
        for (polar, azimuth) in polar_degrees.iter().cartesian_product(azimuth_degrees.iter()) {
            let name = format!("cam{:02}", scene.cameras().len());
            let camera = CameraEntity::new(&name, self.new_hemisphere_pose(distance, *polar, *azimuth));
            scene.add_camera(camera);
        }
    }
    pub fn new_point_light(&self, name: &str, energy: f64, distance: f64, polar_degrees: f64, azimuth_degrees: f64) -> LightEntity {
        return LightEntity::new(name, LightType::Point, energy, self.new_hemisphere_pose(distance, polar_degrees, azimuth_degrees));
    }
    /// One random tabletop scene: ground, one sampled object placed in the
    /// ±2.2 square, an 18 camera hemisphere rig at distance 10, and a single
    /// point light.
    pub fn new_random_scene<R: Rng>(&self, name: &str, reset_scene: bool, rng: &mut R) -> Result<SceneEntity, ScenesmithError> {
        let mut scene = self.new_scene(name, reset_scene);
        let object = self.new_sampled_object(2.2, &scene, rng)?;
        scene.add_object(object);
        self.add_hemisphere_camera_grid(&mut scene, 10.0, &[0.0, 30.0, 60.0], &[0.0, 60.0, 120.0, 180.0, 240.0, 300.0]);
        scene.add_light(self.new_point_light("light_0", 1000.0, 10.0, 60.0, 135.0));
        return Ok(scene);
    }
    /// One scene per point of the 4^3 orientation grid `[0, 90, 180, 270]`
    /// per axis (ry outermost, rx middle, rz innermost).  Each scene holds a
    /// freshly sampled object positioned from the catalog `pose_range`, one
    /// camera at distance 8, and one light.  Only scene `000000` resets the
    /// renderer.
    pub fn new_discrete_pose_scenes<R: Rng>(&self, rng: &mut R) -> Result<Vec<SceneEntity>, ScenesmithError> {
        let groups = [0.0, 90.0, 180.0, 270.0];
        let mut rotations = vec![];
        for r_y in &groups {
            for r_x in &groups {
                for r_z in &groups {
                    rotations.push([*r_x, *r_y, *r_z]);
                }
            }
        }
        let mut scenes = vec![];
        for (scene_i, rotation) in rotations.iter().enumerate() {
            let mut scene = self.new_scene(&format!("{:06}", scene_i), scene_i == 0);
            let object = self.new_discrete_pose_object(*rotation, &scene, rng)?;
            scene.add_object(object);
            self.add_hemisphere_camera_grid(&mut scene, 8.0, &[60.0], &[0.0]);
            scene.add_light(self.new_point_light("light_0", 1000.0, 10.0, 45.0, 45.0));
            scenes.push(scene);
        }
        return Ok(scenes);
    }
}
