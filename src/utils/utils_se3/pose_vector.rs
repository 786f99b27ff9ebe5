use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use serde::{Serialize, Deserialize};
use crate::utils::utils_errors::ScenesmithError;
use crate::utils::utils_se3::euler_angles::{euler_angles_in_degrees_from_rotation, rotation_from_euler_angles_in_degrees};
use crate::utils::utils_se3::homogeneous_matrix::HomogeneousMatrix;

/// An SE(3) pose in one of the two flat layouts used by scene files.
///
/// - `Euler`: `[x, y, z, rx, ry, rz]` with rotations in degrees, applied
///   intrinsically about x, then y, then z.
/// - `Quaternion`: `[x, y, z, qw, qx, qy, qz]` with a scalar-first unit
///   quaternion.
///
/// The JSON form is the bare array; the element count selects the variant on
/// load.  Degrees only ever appear in this boundary type.  Everything behind
/// [`Self::to_homogeneous_matrix`] works in radians.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PoseVector {
    Euler([f64; 6]),
    Quaternion([f64; 7])
}
impl PoseVector {
    pub fn new_euler(x: f64, y: f64, z: f64, rx: f64, ry: f64, rz: f64) -> Self {
        return Self::Euler([x, y, z, rx, ry, rz]);
    }
    pub fn new_quaternion(x: f64, y: f64, z: f64, qw: f64, qx: f64, qy: f64, qz: f64) -> Self {
        return Self::Quaternion([x, y, z, qw, qx, qy, qz]);
    }
    pub fn new_identity(pose_vector_type: &PoseVectorType) -> Self {
        return match pose_vector_type {
            PoseVectorType::EulerAngles => { Self::Euler([0.0; 6]) }
            PoseVectorType::UnitQuaternion => { Self::Quaternion([0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]) }
        }
    }
    /// Builds a pose from a raw float slice.  The slice length must match the
    /// requested layout (6 for euler angles, 7 for a quaternion) and all
    /// entries must be finite.
    pub fn new_from_slice(values: &[f64], pose_vector_type: &PoseVectorType) -> Result<Self, ScenesmithError> {
        for v in values {
            if !v.is_finite() {
                return Err(ScenesmithError::new_invalid_pose_error(format!("pose values {:?} contain a non-finite entry.", values).as_str(), file!(), line!()));
            }
        }
        return match pose_vector_type {
            PoseVectorType::EulerAngles => {
                if values.len() != 6 {
                    return Err(ScenesmithError::new_invalid_pose_error(format!("an euler pose takes 6 values, got {}.", values.len()).as_str(), file!(), line!()));
                }
                let mut data = [0.0; 6];
                data.copy_from_slice(values);
                Ok(Self::Euler(data))
            }
            PoseVectorType::UnitQuaternion => {
                if values.len() != 7 {
                    return Err(ScenesmithError::new_invalid_pose_error(format!("a quaternion pose takes 7 values, got {}.", values.len()).as_str(), file!(), line!()));
                }
                let mut data = [0.0; 7];
                data.copy_from_slice(values);
                Ok(Self::Quaternion(data))
            }
        }
    }
    pub fn pose_vector_type(&self) -> PoseVectorType {
        return match self {
            PoseVector::Euler(_) => { PoseVectorType::EulerAngles }
            PoseVector::Quaternion(_) => { PoseVectorType::UnitQuaternion }
        }
    }
    pub fn data(&self) -> &[f64] {
        return match self {
            PoseVector::Euler(data) => { data }
            PoseVector::Quaternion(data) => { data }
        }
    }
    pub fn translation(&self) -> Vector3<f64> {
        let data = self.data();
        return Vector3::new(data[0], data[1], data[2]);
    }
    pub fn unwrap_euler_data(&self) -> Result<&[f64; 6], ScenesmithError> {
        return match self {
            PoseVector::Euler(data) => { Ok(data) }
            PoseVector::Quaternion(_) => { Err(ScenesmithError::new_invalid_pose_error("tried to unwrap a quaternion pose as euler angles.", file!(), line!())) }
        }
    }
    pub fn unwrap_euler_data_mut(&mut self) -> Result<&mut [f64; 6], ScenesmithError> {
        return match self {
            PoseVector::Euler(data) => { Ok(data) }
            PoseVector::Quaternion(_) => { Err(ScenesmithError::new_invalid_pose_error("tried to unwrap a quaternion pose as euler angles.", file!(), line!())) }
        }
    }
    pub fn unwrap_quaternion_data(&self) -> Result<&[f64; 7], ScenesmithError> {
        return match self {
            PoseVector::Euler(_) => { Err(ScenesmithError::new_invalid_pose_error("tried to unwrap an euler pose as a quaternion.", file!(), line!())) }
            PoseVector::Quaternion(data) => { Ok(data) }
        }
    }
    /// Maps the pose to its 4x4 homogeneous transform.
    pub fn to_homogeneous_matrix(&self) -> Result<HomogeneousMatrix, ScenesmithError> {
        for v in self.data() {
            if !v.is_finite() {
                return Err(ScenesmithError::new_invalid_pose_error(format!("pose {:?} contains a non-finite entry.", self).as_str(), file!(), line!()));
            }
        }
        return match self {
            PoseVector::Euler(data) => {
                let rotation = rotation_from_euler_angles_in_degrees(data[3], data[4], data[5]);
                Ok(HomogeneousMatrix::new_from_rotation_and_translation(&rotation, &self.translation()))
            }
            PoseVector::Quaternion(data) => {
                let quaternion = Quaternion::new(data[3], data[4], data[5], data[6]);
                if quaternion.norm() < 1e-12 {
                    return Err(ScenesmithError::new_invalid_pose_error(format!("quaternion part of pose {:?} has near-zero norm.", self).as_str(), file!(), line!()));
                }
                let unit_quaternion = UnitQuaternion::from_quaternion(quaternion);
                Ok(HomogeneousMatrix::new_from_rotation_and_translation(&unit_quaternion.to_rotation_matrix(), &self.translation()))
            }
        }
    }
    /// Maps the pose to the inverse of its transform, T^-1, without going
    /// through a general matrix inverse.
    pub fn to_inverse_homogeneous_matrix(&self) -> Result<HomogeneousMatrix, ScenesmithError> {
        return Ok(self.to_homogeneous_matrix()?.inverse());
    }
    /// Converts the pose to the other supported layout.
    pub fn convert(&self, target_type: &PoseVectorType) -> Result<PoseVector, ScenesmithError> {
        return match (self, target_type) {
            (PoseVector::Euler(_), PoseVectorType::EulerAngles) => { Ok(self.clone()) }
            (PoseVector::Quaternion(_), PoseVectorType::UnitQuaternion) => { Ok(self.clone()) }
            (PoseVector::Euler(data), PoseVectorType::UnitQuaternion) => {
                let rotation = rotation_from_euler_angles_in_degrees(data[3], data[4], data[5]);
                let q = UnitQuaternion::from_rotation_matrix(&rotation);
                Ok(Self::new_quaternion(data[0], data[1], data[2], q.w, q.i, q.j, q.k))
            }
            (PoseVector::Quaternion(_), PoseVectorType::EulerAngles) => {
                let matrix = self.to_homogeneous_matrix()?;
                let euler = euler_angles_in_degrees_from_rotation(&matrix.rotation());
                Ok(Self::new_euler(self.data()[0], self.data()[1], self.data()[2], euler[0], euler[1], euler[2]))
            }
        }
    }
}

/// Layout tags for [`PoseVector`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoseVectorType {
    EulerAngles,
    UnitQuaternion
}
