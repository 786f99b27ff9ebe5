use std::path::PathBuf;
use indexmap::IndexMap;
use serde::{Serialize, Deserialize};
use strum_macros::{Display, EnumString};
use crate::scene_modules::scene_data_module::SceneEntity;
use crate::utils::utils_errors::ScenesmithError;
use crate::utils::utils_files::FileUtils;
use crate::utils::utils_traits::SaveAndLoadable;

/// Image kinds the render collaborator can produce for each camera.  The
/// lowercase serialized names feed both the job document and output image
/// file names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RenderMode {
    Rgba,
    Nocs,
    Depth
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum DeviceType {
    Cpu,
    Cuda,
    Optix
}

/// Image and sampling settings shared by every scene of a render job.
#[derive(Clone, Debug)]
pub struct RenderJobParams {
    pub width: u32,
    pub height: u32,
    pub render_tile_size: u32,
    pub device_type: DeviceType,
    pub render_num_samples: u32,
    pub render_min_bounces: u32,
    pub render_max_bounces: u32,
    pub modes: Vec<RenderMode>
}
impl Default for RenderJobParams {
    fn default() -> Self {
        Self {
            width: 480,
            height: 320,
            render_tile_size: 256,
            device_type: DeviceType::Optix,
            render_num_samples: 512,
            render_min_bounces: 8,
            render_max_bounces: 8,
            modes: vec![RenderMode::Rgba, RenderMode::Nocs, RenderMode::Depth]
        }
    }
}

/// One render job: the full document handed to the render collaborator.  It
/// owns an ordered mapping of scene name to `SceneEntity`; scene order is
/// trajectory order, which the collaborator must respect when chaining
/// non-reset scenes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderJob {
    name: String,
    output_dir: String,
    width: u32,
    height: u32,
    render_tile_size: u32,
    device_type: DeviceType,
    render_num_samples: u32,
    render_min_bounces: u32,
    render_max_bounces: u32,
    modes: Vec<RenderMode>,
    scenes_data: IndexMap<String, SceneEntity>
}
impl RenderJob {
    pub fn new(name: &str, output_dir: &str, params: RenderJobParams) -> Self {
        Self {
            name: name.to_string(),
            output_dir: output_dir.to_string(),
            width: params.width,
            height: params.height,
            render_tile_size: params.render_tile_size,
            device_type: params.device_type,
            render_num_samples: params.render_num_samples,
            render_min_bounces: params.render_min_bounces,
            render_max_bounces: params.render_max_bounces,
            modes: params.modes,
            scenes_data: IndexMap::new()
        }
    }
    pub fn name(&self) -> &str { &self.name }
    pub fn output_dir(&self) -> &str { &self.output_dir }
    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }
    pub fn device_type(&self) -> DeviceType { self.device_type }
    pub fn modes(&self) -> &Vec<RenderMode> { &self.modes }
    /// Inserts the scene under its own name, replacing any scene already
    /// stored under that name.
    pub fn add_scene(&mut self, scene: SceneEntity) {
        self.scenes_data.insert(scene.name().to_string(), scene);
    }
    pub fn scene(&self, name: &str) -> Option<&SceneEntity> {
        return self.scenes_data.get(name);
    }
    pub fn scenes_data(&self) -> &IndexMap<String, SceneEntity> { &self.scenes_data }
    /// Job documents are saved as `{output_dir}/{name}.json`.
    pub fn save_path(&self) -> PathBuf {
        return PathBuf::from(&self.output_dir).join(format!("{}.json", self.name));
    }
    pub fn save_to_output_dir(&self) -> Result<(), ScenesmithError> {
        return self.save_to_json_file(&self.save_path());
    }
    /// File name the render collaborator gives one image:
    /// `{scene}_{camera}_{mode}.png`.
    pub fn image_file_name(scene_name: &str, camera_name: &str, mode: RenderMode) -> String {
        return format!("{}_{}_{}.png", scene_name, camera_name, mode);
    }
    /// Full image path `{output_dir}/{job}/{scene}_{camera}_{mode}.png`.
    pub fn image_file_path(&self, scene_name: &str, camera_name: &str, mode: RenderMode) -> PathBuf {
        return PathBuf::from(&self.output_dir).join(&self.name).join(Self::image_file_name(scene_name, camera_name, mode));
    }
}
impl SaveAndLoadable for RenderJob {
    type SaveType = Self;

    fn get_save_serialization_object(&self) -> Self::SaveType {
        self.clone()
    }

    fn load_from_json_string(json_str: &str) -> Result<Self, ScenesmithError> where Self: Sized {
        FileUtils::load_object_from_json_string(json_str)
    }
}
