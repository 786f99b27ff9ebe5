pub mod property_catalog_module;
pub mod scene_data_module;
pub mod scene_generator_module;
pub mod trajectory_generator_module;
