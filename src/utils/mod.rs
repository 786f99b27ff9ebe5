pub mod utils_console;
pub mod utils_depth;
pub mod utils_errors;
pub mod utils_files;
pub mod utils_sampling;
pub mod utils_se3;
pub mod utils_traits;
