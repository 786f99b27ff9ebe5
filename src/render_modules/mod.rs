pub mod render_data_module;
