use std::path::PathBuf;
use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::utils::utils_errors::ScenesmithError;
use crate::utils::utils_files::FileUtils;

/// Unified JSON save and load surface for the toolbox's persistent objects.
/// The `SaveType` indirection lets a type serialize through a simpler stand-in
/// object when its in-memory form is not what should land on disk.
pub trait SaveAndLoadable {
    type SaveType: Serialize + DeserializeOwned;

    fn get_save_serialization_object(&self) -> Self::SaveType;
    fn get_serialization_string(&self) -> String {
        serde_json::to_string(&self.get_save_serialization_object()).expect("error")
    }
    fn save_to_json_file(&self, path: &PathBuf) -> Result<(), ScenesmithError> {
        FileUtils::save_object_to_file_as_json(&self.get_save_serialization_object(), path)
    }
    fn load_from_json_file(path: &PathBuf) -> Result<Self, ScenesmithError> where Self: Sized {
        let s = FileUtils::read_file_contents_to_string(path)?;
        return Self::load_from_json_string(&s);
    }
    fn load_from_json_string(json_str: &str) -> Result<Self, ScenesmithError> where Self: Sized;
}
impl <T> SaveAndLoadable for Vec<T> where T: SaveAndLoadable {
    type SaveType = Vec<String>;

    fn get_save_serialization_object(&self) -> Self::SaveType {
        let mut out_vec = vec![];

        for s in self {
            out_vec.push(s.get_serialization_string());
        }

        out_vec
    }

    fn load_from_json_string(json_str: &str) -> Result<Self, ScenesmithError> where Self: Sized {
        let load: Self::SaveType = FileUtils::load_object_from_json_string(json_str)?;

        let mut out_vec = vec![];
        for s in &load {
            out_vec.push(T::load_from_json_string(s)?);
        }

        Ok(out_vec)
    }
}
