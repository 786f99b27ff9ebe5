pub mod action_codec_module;
