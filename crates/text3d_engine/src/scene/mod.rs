//! Scene setup: camera, lights and the single live text mesh

pub mod camera;
pub mod lighting;
pub mod scene_manager;

pub use camera::Camera;
pub use lighting::{Light, LightKind};
pub use scene_manager::{MeshHandle, SceneConfig, SceneManager};
