
//! Scenesmith is an easy to set up and easy to use toolbox for generating synthetic
//! multi-view manipulation datasets. Its primary use-case is pose learning for robotic
//! manipulation (e.g., behavior cloning over camera-frame actions), though its underlying
//! structures are general and can describe many tabletop scene distributions.
//! The library produces declarative render job documents consumed by an external
//! rendering collaborator, and provides the pose, depth, and action codecs needed to
//! turn the rendered output into training data.

pub mod dataset_modules;
pub mod render_modules;
pub mod scene_modules;
pub mod utils;
