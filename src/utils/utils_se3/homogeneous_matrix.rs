use nalgebra::{Matrix3, Matrix4, Rotation3, UnitQuaternion, Vector3, Vector4};
use serde::{Serialize, Deserialize};
use crate::utils::utils_se3::euler_angles::euler_angles_in_degrees_from_rotation;
use crate::utils::utils_se3::pose_vector::{PoseVector, PoseVectorType};

/// A representation for an SE(3) transform composed of a 4x4 homogeneous transformation matrix.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HomogeneousMatrix {
    matrix: Matrix4<f64>
}
impl HomogeneousMatrix {
    pub fn new(matrix: Matrix4<f64>) -> Self {
        Self {
            matrix
        }
    }
    pub fn new_from_rotation_and_translation(rotation: &Rotation3<f64>, translation: &Vector3<f64>) -> Self {
        let matrix = Self::rotation_and_translation_to_homogeneous_matrix(rotation, translation);
        return Self::new(matrix);
    }
    /// Returns the rotation component of the homogeneous matrix.
    pub fn rotation(&self) -> Rotation3<f64> {
        let mut mat3 = Matrix3::zeros();

        mat3[(0,0)] = self.matrix[(0,0)];
        mat3[(0,1)] = self.matrix[(0,1)];
        mat3[(0,2)] = self.matrix[(0,2)];

        mat3[(1,0)] = self.matrix[(1,0)];
        mat3[(1,1)] = self.matrix[(1,1)];
        mat3[(1,2)] = self.matrix[(1,2)];

        mat3[(2,0)] = self.matrix[(2,0)];
        mat3[(2,1)] = self.matrix[(2,1)];
        mat3[(2,2)] = self.matrix[(2,2)];

        return Rotation3::from_matrix(&mat3);
    }
    /// Returns the translation component of the homogeneous matrix.
    pub fn translation(&self) -> Vector3<f64> {
        let out_vec = Vector3::new(self.matrix[(0,3)], self.matrix[(1,3)], self.matrix[(2,3)]);
        return out_vec;
    }
    /// multiplication
    pub fn multiply(&self, other: &HomogeneousMatrix) -> HomogeneousMatrix {
        let matrix = self.matrix * &other.matrix;
        return Self::new(matrix);
    }
    /// multiplication by a point
    pub fn multiply_by_point(&self, point: &Vector3<f64>) -> Vector3<f64> {
        let four_point = Vector4::new(point[0], point[1], point[2], 1.0);
        let result_point = self.matrix * &four_point;
        return Vector3::new(result_point[0], result_point[1], result_point[2]);
    }
    /// Inverse multiplies by the given point.  inverse multiplication is useful for placing the
    /// given point in the transform's local coordinate system.
    pub fn inverse_multiply_by_point(&self, point: &Vector3<f64>) -> Vector3<f64> {
        return self.inverse().multiply_by_point(&point);
    }
    /// The inverse transform such that T * T^-1 = I.
    pub fn inverse(&self) -> Self {
        let mut matrix = Matrix4::zeros();
        let rot_mat = self.rotation();
        let rot_mat_transpose = rot_mat.transpose();
        let translation = self.translation();
        let new_translation = rot_mat_transpose * &translation;

        matrix[(0,0)] = rot_mat_transpose[(0,0)];
        matrix[(0,1)] = rot_mat_transpose[(0,1)];
        matrix[(0,2)] = rot_mat_transpose[(0,2)];

        matrix[(1,0)] = rot_mat_transpose[(1,0)];
        matrix[(1,1)] = rot_mat_transpose[(1,1)];
        matrix[(1,2)] = rot_mat_transpose[(1,2)];

        matrix[(2,0)] = rot_mat_transpose[(2,0)];
        matrix[(2,1)] = rot_mat_transpose[(2,1)];
        matrix[(2,2)] = rot_mat_transpose[(2,2)];

        matrix[(0,3)] = -new_translation[0];
        matrix[(1,3)] = -new_translation[1];
        matrix[(2,3)] = -new_translation[2];

        matrix[(3,3)] = 1.0;

        return Self::new(matrix);
    }
    /// The displacement transform such that T_self * T_disp = T_other.
    pub fn displacement(&self, other: &HomogeneousMatrix) -> HomogeneousMatrix {
        return self.inverse().multiply(&other);
    }
    /// Provides an approximate distance between two homogeneous matrices.  This is not an
    /// official distance metric, but works well for closeness checks.
    pub fn approximate_distance(&self, other: &HomogeneousMatrix) -> f64 {
        let angle_between = self.rotation().angle_to(&other.rotation());
        let translation_between = (self.translation() - other.translation()).norm();
        return angle_between + translation_between;
    }
    /// Extracts the transform back into the requested flat pose layout.
    pub fn to_pose_vector(&self, pose_vector_type: &PoseVectorType) -> PoseVector {
        return match pose_vector_type {
            PoseVectorType::EulerAngles => {
                let euler = euler_angles_in_degrees_from_rotation(&self.rotation());
                let translation = self.translation();
                PoseVector::new_euler(translation[0], translation[1], translation[2], euler[0], euler[1], euler[2])
            }
            PoseVectorType::UnitQuaternion => {
                let quaternion = UnitQuaternion::from_rotation_matrix(&self.rotation());
                let translation = self.translation();
                PoseVector::new_quaternion(translation[0], translation[1], translation[2], quaternion.w, quaternion.i, quaternion.j, quaternion.k)
            }
        }
    }
    /// Convenience function for mapping rotation and translation components to a 4x4 matrix.
    pub fn rotation_and_translation_to_homogeneous_matrix(rotation: &Rotation3<f64>, translation: &Vector3<f64>) -> Matrix4<f64> {
        let mut out_mat = Matrix4::zeros();
        out_mat[(0,0)] = rotation[(0,0)];
        out_mat[(0,1)] = rotation[(0,1)];
        out_mat[(0,2)] = rotation[(0,2)];

        out_mat[(1,0)] = rotation[(1,0)];
        out_mat[(1,1)] = rotation[(1,1)];
        out_mat[(1,2)] = rotation[(1,2)];

        out_mat[(2,0)] = rotation[(2,0)];
        out_mat[(2,1)] = rotation[(2,1)];
        out_mat[(2,2)] = rotation[(2,2)];

        out_mat[(0,3)] = translation[0];
        out_mat[(1,3)] = translation[1];
        out_mat[(2,3)] = translation[2];

        out_mat[(3,3)] = 1.0;

        return out_mat;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::utils_se3::euler_angles::rotation_from_euler_angles_in_degrees;

    #[test]
    fn test_rotation_and_translation_round_trip() {
        let rotation = rotation_from_euler_angles_in_degrees(20.0, -35.0, 110.0);
        let translation = Vector3::new(0.5, -2.0, 3.0);
        let t = HomogeneousMatrix::new_from_rotation_and_translation(&rotation, &translation);
        assert!(t.rotation().angle_to(&rotation) < 1e-12);
        assert!((t.translation() - translation).norm() < 1e-12);
    }

    #[test]
    fn test_multiply_by_point_applies_rotation_then_translation() {
        let rotation = rotation_from_euler_angles_in_degrees(0.0, 0.0, 90.0);
        let translation = Vector3::new(1.0, 0.0, 0.0);
        let t = HomogeneousMatrix::new_from_rotation_and_translation(&rotation, &translation);
        let p = t.multiply_by_point(&Vector3::new(1.0, 0.0, 0.0));
        assert!((p - Vector3::new(1.0, 1.0, 0.0)).norm() < 1e-12, "got {:?}", p);
    }

    #[test]
    fn test_inverse_multiply_by_point_returns_local_coordinates() {
        let rotation = rotation_from_euler_angles_in_degrees(45.0, 10.0, -70.0);
        let translation = Vector3::new(2.0, -1.0, 0.5);
        let t = HomogeneousMatrix::new_from_rotation_and_translation(&rotation, &translation);
        let world = t.multiply_by_point(&Vector3::new(0.3, 0.4, 0.5));
        let local = t.inverse_multiply_by_point(&world);
        assert!((local - Vector3::new(0.3, 0.4, 0.5)).norm() < 1e-9);
    }

    #[test]
    fn test_displacement_recomposes_to_other() {
        let a = HomogeneousMatrix::new_from_rotation_and_translation(
            &rotation_from_euler_angles_in_degrees(10.0, 20.0, 30.0), &Vector3::new(1.0, 2.0, 3.0));
        let b = HomogeneousMatrix::new_from_rotation_and_translation(
            &rotation_from_euler_angles_in_degrees(-40.0, 5.0, 160.0), &Vector3::new(-2.0, 0.0, 1.0));
        let disp = a.displacement(&b);
        let recomposed = a.multiply(&disp);
        assert!(recomposed.approximate_distance(&b) < 1e-9);
    }

    #[test]
    fn test_to_pose_vector_round_trip() {
        let pose = PoseVector::new_euler(0.1, 0.2, 0.3, 75.0, -20.0, 190.0);
        let t = pose.to_homogeneous_matrix().expect("valid pose");
        let back = t.to_pose_vector(&PoseVectorType::EulerAngles);
        let t2 = back.to_homogeneous_matrix().expect("valid pose");
        assert!(t.approximate_distance(&t2) < 1e-9);
    }
}
