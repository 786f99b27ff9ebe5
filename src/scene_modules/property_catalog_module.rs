use indexmap::IndexMap;
use rand::Rng;
use serde::{Serialize, Deserialize};
use crate::utils::utils_errors::ScenesmithError;
use crate::utils::utils_sampling::SimpleSamplers;
use crate::utils::utils_traits::SaveAndLoadable;

/// The asset vocabulary a scene draws from: shape names mapped to asset
/// identifiers, color names mapped to 8-bit RGB triples, material and size
/// names mapped to their renderer-side values, and an optional per-axis pose
/// range for grid style placement.
///
/// The catalog is embedded verbatim into every scene file so a scene is
/// self-describing.  All lookups are strict; asking for an entry that is not
/// present is an error rather than a silent default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertyCatalog {
    #[serde(default)]
    shapes: IndexMap<String, String>,
    #[serde(default)]
    colors: IndexMap<String, [u8; 3]>,
    #[serde(default)]
    materials: IndexMap<String, String>,
    #[serde(default)]
    sizes: IndexMap<String, [f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pose_range: Option<[[f64; 2]; 6]>
}
impl PropertyCatalog {
    pub fn new_empty() -> Self {
        Self {
            shapes: IndexMap::new(),
            colors: IndexMap::new(),
            materials: IndexMap::new(),
            sizes: IndexMap::new(),
            pose_range: None
        }
    }
    pub fn insert_shape(&mut self, name: &str, asset: &str) {
        self.shapes.insert(name.to_string(), asset.to_string());
    }
    pub fn insert_color(&mut self, name: &str, rgb: [u8; 3]) {
        self.colors.insert(name.to_string(), rgb);
    }
    pub fn insert_material(&mut self, name: &str, material: &str) {
        self.materials.insert(name.to_string(), material.to_string());
    }
    pub fn insert_size(&mut self, name: &str, size: [f64; 3]) {
        self.sizes.insert(name.to_string(), size);
    }
    pub fn set_pose_range(&mut self, pose_range: [[f64; 2]; 6]) {
        self.pose_range = Some(pose_range);
    }
    pub fn shapes(&self) -> &IndexMap<String, String> { &self.shapes }
    pub fn colors(&self) -> &IndexMap<String, [u8; 3]> { &self.colors }
    pub fn materials(&self) -> &IndexMap<String, String> { &self.materials }
    pub fn sizes(&self) -> &IndexMap<String, [f64; 3]> { &self.sizes }
    pub fn pose_range(&self) -> &Option<[[f64; 2]; 6]> { &self.pose_range }
    pub fn shape(&self, name: &str) -> Result<String, ScenesmithError> {
        return match self.shapes.get(name) {
            Some(asset) => Ok(asset.clone()),
            None => Err(ScenesmithError::new_missing_catalog_entry_error("shapes", name, file!(), line!()))
        }
    }
    pub fn color(&self, name: &str) -> Result<[u8; 3], ScenesmithError> {
        return match self.colors.get(name) {
            Some(rgb) => Ok(*rgb),
            None => Err(ScenesmithError::new_missing_catalog_entry_error("colors", name, file!(), line!()))
        }
    }
    pub fn material(&self, name: &str) -> Result<String, ScenesmithError> {
        return match self.materials.get(name) {
            Some(material) => Ok(material.clone()),
            None => Err(ScenesmithError::new_missing_catalog_entry_error("materials", name, file!(), line!()))
        }
    }
    pub fn size(&self, name: &str) -> Result<[f64; 3], ScenesmithError> {
        return match self.sizes.get(name) {
            Some(size) => Ok(*size),
            None => Err(ScenesmithError::new_missing_catalog_entry_error("sizes", name, file!(), line!()))
        }
    }
    /// Catalog colors are stored as 8-bit RGB; the renderer wants them as
    /// floats in [0, 1] with an opaque alpha channel.
    pub fn color_as_rgba(&self, name: &str) -> Result<[f64; 4], ScenesmithError> {
        let rgb = self.color(name)?;
        return Ok([rgb[0] as f64 / 255.0, rgb[1] as f64 / 255.0, rgb[2] as f64 / 255.0, 1.0]);
    }
    pub fn sample_shape<R: Rng>(&self, rng: &mut R) -> Result<(String, String), ScenesmithError> {
        let idx = SimpleSamplers::uniform_index(self.shapes.len(), rng)?;
        let (name, asset) = self.shapes.get_index(idx).expect("error");
        return Ok((name.clone(), asset.clone()));
    }
    pub fn sample_color<R: Rng>(&self, rng: &mut R) -> Result<(String, [u8; 3]), ScenesmithError> {
        let idx = SimpleSamplers::uniform_index(self.colors.len(), rng)?;
        let (name, rgb) = self.colors.get_index(idx).expect("error");
        return Ok((name.clone(), *rgb));
    }
    pub fn sample_material<R: Rng>(&self, rng: &mut R) -> Result<(String, String), ScenesmithError> {
        let idx = SimpleSamplers::uniform_index(self.materials.len(), rng)?;
        let (name, material) = self.materials.get_index(idx).expect("error");
        return Ok((name.clone(), material.clone()));
    }
    pub fn sample_size<R: Rng>(&self, rng: &mut R) -> Result<(String, [f64; 3]), ScenesmithError> {
        let idx = SimpleSamplers::uniform_index(self.sizes.len(), rng)?;
        let (name, size) = self.sizes.get_index(idx).expect("error");
        return Ok((name.clone(), *size));
    }
}
impl SaveAndLoadable for PropertyCatalog {
    type SaveType = Self;

    fn get_save_serialization_object(&self) -> Self::SaveType {
        self.clone()
    }

    fn load_from_json_string(json_str: &str) -> Result<Self, ScenesmithError> where Self: Sized {
        crate::utils::utils_files::FileUtils::load_object_from_json_string(json_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::utils_sampling::rng_from_seed;

    fn test_catalog() -> PropertyCatalog {
        let mut catalog = PropertyCatalog::new_empty();
        catalog.insert_shape("cube", "SmoothCube_v2");
        catalog.insert_shape("sphere", "Sphere");
        catalog.insert_color("gray", [87, 87, 87]);
        catalog.insert_color("red", [173, 35, 35]);
        catalog.insert_material("rubber", "Rubber");
        catalog.insert_size("small", [0.35, 0.35, 0.35]);
        catalog
    }

    #[test]
    fn test_strict_lookup_reports_category_and_key() {
        let catalog = test_catalog();
        assert_eq!(catalog.shape("cube").expect("entry"), "SmoothCube_v2");
        let err = catalog.shape("cone").expect_err("missing entry");
        assert!(err.message().contains("\"shapes\""));
        assert!(err.message().contains("\"cone\""));
    }

    #[test]
    fn test_color_as_rgba_scales_to_unit_range() {
        let catalog = test_catalog();
        let rgba = catalog.color_as_rgba("red").expect("color");
        assert!((rgba[0] - 173.0 / 255.0).abs() < 1e-12);
        assert_eq!(rgba[3], 1.0);
    }

    #[test]
    fn test_sampling_returns_catalog_members() {
        let catalog = test_catalog();
        let mut rng = rng_from_seed(7);
        for _ in 0..20 {
            let (name, asset) = catalog.sample_shape(&mut rng).expect("sample");
            assert_eq!(catalog.shape(&name).expect("entry"), asset);
        }
        let empty = PropertyCatalog::new_empty();
        assert!(empty.sample_shape(&mut rng).is_err());
    }

    #[test]
    fn test_pose_range_is_omitted_when_absent() {
        let catalog = test_catalog();
        let json = serde_json::to_string(&catalog).expect("serialize");
        assert!(!json.contains("pose_range"));
        let parsed: PropertyCatalog = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, catalog);
    }
}
