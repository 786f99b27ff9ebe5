/// A common error type returned by functions throughout the toolbox.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScenesmithError {
    GenericError(String),
    InvalidPoseError(String),
    InvalidDepthError(String),
    MissingCatalogEntryError(String),
    InconsistentTrajectoryError(String)
}
impl ScenesmithError {
    pub fn new_generic_error_str(s: &str, file: &str, line: u32) -> Self {
        let s = format!("ERROR: {} -- File: {}, Line: {}", s, file, line);
        return Self::GenericError(s);
    }
    pub fn new_invalid_pose_error(s: &str, file: &str, line: u32) -> Self {
        let s = format!("ERROR: Invalid pose.  {} -- File: {}, Line: {}", s, file, line);
        return Self::InvalidPoseError(s);
    }
    pub fn new_invalid_depth_error(s: &str, file: &str, line: u32) -> Self {
        let s = format!("ERROR: Invalid depth value.  {} -- File: {}, Line: {}", s, file, line);
        return Self::InvalidDepthError(s);
    }
    pub fn new_missing_catalog_entry_error(category: &str, key: &str, file: &str, line: u32) -> Self {
        let s = format!("ERROR: Catalog category {:?} has no entry {:?} -- File: {}, Line: {}", category, key, file, line);
        return Self::MissingCatalogEntryError(s);
    }
    pub fn new_inconsistent_trajectory_error(s: &str, file: &str, line: u32) -> Self {
        let s = format!("ERROR: Inconsistent trajectory.  {} -- File: {}, Line: {}", s, file, line);
        return Self::InconsistentTrajectoryError(s);
    }
    pub fn message(&self) -> &str {
        return match self {
            ScenesmithError::GenericError(s) => s,
            ScenesmithError::InvalidPoseError(s) => s,
            ScenesmithError::InvalidDepthError(s) => s,
            ScenesmithError::MissingCatalogEntryError(s) => s,
            ScenesmithError::InconsistentTrajectoryError(s) => s
        }
    }
}
impl std::fmt::Display for ScenesmithError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}
impl std::error::Error for ScenesmithError {}
