use std::fs;
use std::fs::{File, OpenOptions};
use std::io::Read;
use std::path::PathBuf;
use serde::Serialize;
use serde::de::DeserializeOwned;
use crate::utils::utils_errors::ScenesmithError;

/// Convenience struct that holds many class functions related to file utils.
pub struct FileUtils;
impl FileUtils {
    /// Reads contents of file and outputs it to a string.
    pub fn read_file_contents_to_string(p: &PathBuf) -> Result<String, ScenesmithError> {
        let mut file_res = File::open(p);
        return match &mut file_res {
            Ok(f) => {
                let mut contents = String::new();
                f.read_to_string(&mut contents).expect("error");
                Ok(contents)
            }
            Err(e) => {
                Err(ScenesmithError::new_generic_error_str(e.to_string().as_str(), file!(), line!()))
            }
        }
    }
    /// Saves given object to a file as a JSON string.  The object must be serializable using serde json.
    pub fn save_object_to_file_as_json<T: Serialize>(object: &T, p: &PathBuf) -> Result<(), ScenesmithError> {
        let parent_option = p.parent();
        match parent_option {
            None => { return Err(ScenesmithError::new_generic_error_str("Could not get parent of path in save_object_to_file_as_json.", file!(), line!())) }
            Some(parent) => {
                fs::create_dir_all(parent).expect("error");
            }
        }

        let mut file_res = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(p);
        return match &mut file_res {
            Ok(f) => {
                serde_json::to_writer(f, object).expect("error");
                Ok(())
            }
            Err(e) => {
                Err(ScenesmithError::new_generic_error_str(e.to_string().as_str(), file!(), line!()))
            }
        }
    }
    /// Reads object that was serialized by serde JSON from a file.
    /// ## Example
    /// ```
    /// use std::path::Path;
    /// use nalgebra::Vector3;
    /// use scenesmith::utils::utils_files::FileUtils;
    ///
    /// let res = FileUtils::load_object_from_json_file::<Vector3<f64>>(&Path::new("data.json").to_path_buf());
    /// ```
    pub fn load_object_from_json_file<T: DeserializeOwned>(p: &PathBuf) -> Result<T, ScenesmithError> {
        let contents = Self::read_file_contents_to_string(p);
        return match &contents {
            Ok(s) => {
                Self::load_object_from_json_string(s)
            }
            Err(e) => {
                Err(e.clone())
            }
        }
    }

    pub fn load_object_from_json_string<T: DeserializeOwned>(json_str: &str) -> Result<T, ScenesmithError> {
        let o_res = serde_json::from_str(json_str);
        return match o_res {
            Ok(o) => { Ok(o) }
            Err(_) => {
                Err(ScenesmithError::new_generic_error_str("load_object_from_json_string() failed.  The given json_string is incompatible with the requested type.", file!(), line!()))
            }
        }
    }
}
