pub mod euler_angles;
pub mod homogeneous_matrix;
pub mod pose_vector;
