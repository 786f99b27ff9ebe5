use indexmap::IndexMap;
use serde::{Serialize, Deserialize};
use strum_macros::{Display, EnumString};
use crate::scene_modules::property_catalog_module::PropertyCatalog;
use crate::utils::utils_se3::pose_vector::PoseVector;

/// A catalog identifier together with the value it resolved to.  Serialized as
/// the bare two-element array that scene files use.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapePair(pub String, pub String);
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialPair(pub String, pub String);
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorPair(pub String, pub [f64; 4]);
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScalePair(pub String, pub [f64; 3]);

/// One renderable object in a scene: a shape asset with its appearance
/// bindings and an SE(3) pose.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectEntity {
    name: String,
    shape_pair: ShapePair,
    material_pair: Option<MaterialPair>,
    color_pair: ColorPair,
    scale_pair: ScalePair,
    pose: PoseVector
}
impl ObjectEntity {
    pub fn new(name: &str, shape_pair: ShapePair, material_pair: Option<MaterialPair>, color_pair: ColorPair, scale_pair: ScalePair, pose: PoseVector) -> Self {
        Self {
            name: name.to_string(),
            shape_pair,
            material_pair,
            color_pair,
            scale_pair,
            pose
        }
    }
    pub fn name(&self) -> &str { &self.name }
    pub fn shape_pair(&self) -> &ShapePair { &self.shape_pair }
    pub fn material_pair(&self) -> &Option<MaterialPair> { &self.material_pair }
    pub fn color_pair(&self) -> &ColorPair { &self.color_pair }
    pub fn scale_pair(&self) -> &ScalePair { &self.scale_pair }
    pub fn pose(&self) -> &PoseVector { &self.pose }
    pub fn pose_mut(&mut self) -> &mut PoseVector { &mut self.pose }
    pub fn set_pose(&mut self, pose: PoseVector) { self.pose = pose; }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraEntity {
    name: String,
    pose: PoseVector
}
impl CameraEntity {
    pub fn new(name: &str, pose: PoseVector) -> Self {
        Self { name: name.to_string(), pose }
    }
    pub fn name(&self) -> &str { &self.name }
    pub fn pose(&self) -> &PoseVector { &self.pose }
}

/// Light sources the renderer understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum LightType {
    Point,
    Sun,
    Spot,
    Area
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightEntity {
    name: String,
    #[serde(rename = "type")]
    light_type: LightType,
    energy: f64,
    pose: PoseVector
}
impl LightEntity {
    pub fn new(name: &str, light_type: LightType, energy: f64, pose: PoseVector) -> Self {
        Self { name: name.to_string(), light_type, energy, pose }
    }
    pub fn name(&self) -> &str { &self.name }
    pub fn light_type(&self) -> LightType { self.light_type }
    pub fn energy(&self) -> f64 { self.energy }
    pub fn pose(&self) -> &PoseVector { &self.pose }
}

/// A full scene description: posed objects, the camera rig, and lights, plus
/// the asset context the renderer needs to instantiate them.
///
/// All contained collections are insertion ordered, which keeps camera
/// enumeration and therefore output file naming stable across runs.  Scene
/// entities are plain owned values; cloning one yields a deep copy that shares
/// nothing with the original.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneEntity {
    name: String,
    base_scene_blendfile: Option<String>,
    properties: PropertyCatalog,
    shape_dir: String,
    material_dir: String,
    objects_data: IndexMap<String, ObjectEntity>,
    cameras_data: IndexMap<String, CameraEntity>,
    lights_data: IndexMap<String, LightEntity>,
    reset_scene: bool
}
impl SceneEntity {
    pub fn new(name: &str, base_scene_blendfile: Option<String>, properties: PropertyCatalog, shape_dir: &str, material_dir: &str, reset_scene: bool) -> Self {
        Self {
            name: name.to_string(),
            base_scene_blendfile,
            properties,
            shape_dir: shape_dir.to_string(),
            material_dir: material_dir.to_string(),
            objects_data: IndexMap::new(),
            cameras_data: IndexMap::new(),
            lights_data: IndexMap::new(),
            reset_scene
        }
    }
    pub fn name(&self) -> &str { &self.name }
    pub fn set_name(&mut self, name: &str) { self.name = name.to_string(); }
    pub fn base_scene_blendfile(&self) -> &Option<String> { &self.base_scene_blendfile }
    pub fn properties(&self) -> &PropertyCatalog { &self.properties }
    pub fn shape_dir(&self) -> &str { &self.shape_dir }
    pub fn material_dir(&self) -> &str { &self.material_dir }
    pub fn reset_scene(&self) -> bool { self.reset_scene }
    pub fn set_reset_scene(&mut self, reset_scene: bool) { self.reset_scene = reset_scene; }
    /// Inserts the object under its own name.  An object with the same name is
    /// replaced in place.
    pub fn add_object(&mut self, object: ObjectEntity) {
        self.objects_data.insert(object.name().to_string(), object);
    }
    pub fn object(&self, name: &str) -> Option<&ObjectEntity> {
        return self.objects_data.get(name);
    }
    pub fn object_mut(&mut self, name: &str) -> Option<&mut ObjectEntity> {
        return self.objects_data.get_mut(name);
    }
    pub fn objects(&self) -> &IndexMap<String, ObjectEntity> { &self.objects_data }
    pub fn add_camera(&mut self, camera: CameraEntity) {
        self.cameras_data.insert(camera.name().to_string(), camera);
    }
    pub fn camera(&self, name: &str) -> Option<&CameraEntity> {
        return self.cameras_data.get(name);
    }
    pub fn cameras(&self) -> &IndexMap<String, CameraEntity> { &self.cameras_data }
    pub fn add_light(&mut self, light: LightEntity) {
        self.lights_data.insert(light.name().to_string(), light);
    }
    pub fn lights(&self) -> &IndexMap<String, LightEntity> { &self.lights_data }
    /// Number of objects whose name starts with the given prefix.  Used to
    /// derive collision-free names of the form `{shape}_{count}`.
    pub fn count_objects_with_name_prefix(&self, prefix: &str) -> usize {
        return self.objects_data.values().filter(|o| o.name().starts_with(prefix)).count();
    }
}
