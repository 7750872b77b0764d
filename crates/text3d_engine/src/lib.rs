//! # Text3D Engine
//!
//! Turns a line of text into a rotating, extruded 3D mesh.
//!
//! ## Features
//!
//! - **Animation**: six rotation/scale patterns driven once per display refresh
//! - **Font Cache**: typeface resources fetched once per font id and reused
//! - **Scene Management**: camera, light rig and a single live mesh handle
//! - **Parameter Service**: raw form submissions normalized into model descriptors
//! - **Rendering Boundary**: any [`render::RenderBackend`], with a headless one built in
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use text3d_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::default();
//!     let fonts = FontCache::from_config(&config.fonts);
//!     let backend = HeadlessBackend::new(config.render.width, config.render.height);
//!     let mut viewer = Viewer::new(backend, fonts, SceneConfig::from(&config.render))?;
//!
//!     let descriptor = ParameterService::new().normalize(&GenerateRequest::new("Hello"))?;
//!     viewer.generate(&descriptor)?;
//!     viewer.run_frames(60)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod animation;
pub mod assets;
pub mod render;
pub mod scene;
pub mod params;
pub mod viewer;

pub use viewer::{Viewer, ViewerError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Viewer, ViewerError,
        animation::{
            AnimationDispatcher, AnimationParameters, FrameLoop, LoopState, RotationPattern,
            SpeedPreset, SpeedSetting,
        },
        assets::{FontCache, FontLoadError, FontResource},
        config::{AppConfig, Config, ConfigError},
        foundation::math::{MeshTransform, Vec3},
        params::{GenerateRequest, ModelDescriptor, ParameterError, ParameterService},
        render::{HeadlessBackend, MissingLibraryError, RenderBackend, RenderError},
        scene::{SceneConfig, SceneManager},
    };
}
