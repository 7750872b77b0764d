//! Headless preview: drive the whole pipeline for a fixed number of frames

use clap::Args;
use text3d_engine::config::AppConfig;
use text3d_engine::foundation::math::MeshTransform;
use text3d_engine::assets::FontCache;
use text3d_engine::params::{
    GenerateRequest, LooseValue, ModelDescriptor, ParameterError, ParameterService,
};
use text3d_engine::render::{HeadlessBackend, HeadlessStats};
use text3d_engine::scene::SceneConfig;
use text3d_engine::{Viewer, ViewerError};

use crate::client::{GenerationClient, MalformedRequestError};

/// Options for `text3d preview`
#[derive(Args, Debug, Clone)]
pub struct PreviewArgs {
    /// Text to render
    #[arg(long)]
    pub text: String,

    /// Font id
    #[arg(long)]
    pub font: Option<String>,

    /// Face color, e.g. `#156289`
    #[arg(long)]
    pub color: Option<String>,

    /// Rotation pattern
    #[arg(long)]
    pub pattern: Option<String>,

    /// Rotation speed: slow, normal, fast or a multiplier
    #[arg(long)]
    pub speed: Option<String>,

    /// Number of display refreshes to run
    #[arg(long, default_value_t = 300)]
    pub frames: u64,

    /// Normalize through a running service instead of locally
    #[arg(long)]
    pub server: Option<String>,
}

impl PreviewArgs {
    /// The submission these options describe
    pub fn to_request(&self) -> GenerateRequest {
        GenerateRequest {
            font: self.font.clone(),
            color: self.color.as_deref().map(LooseValue::from),
            rotation_pattern: self.pattern.clone(),
            rotation_speed: self.speed.as_deref().map(LooseValue::from),
            ..GenerateRequest::new(self.text.clone())
        }
    }
}

/// Preview failures
#[derive(thiserror::Error, Debug)]
pub enum PreviewError {
    /// Submission rejected locally
    #[error("Invalid parameters: {0}")]
    Parameters(#[from] ParameterError),

    /// Submission rejected or lost by the service
    #[error(transparent)]
    Request(#[from] MalformedRequestError),

    /// Viewer setup or rendering failed
    #[error(transparent)]
    Viewer(#[from] ViewerError),
}

/// What a preview run did
#[derive(Debug, Clone, Copy)]
pub struct PreviewReport {
    /// Animation ticks executed
    pub ticks: u64,
    /// Mesh transform after the last frame
    pub transform: MeshTransform,
    /// Average refresh rate
    pub average_fps: f32,
    /// Backend counters
    pub stats: HeadlessStats,
}

/// Resolve the descriptor, then render it headlessly
pub async fn run(config: &AppConfig, args: &PreviewArgs) -> Result<PreviewReport, PreviewError> {
    let request = args.to_request();
    let descriptor = match &args.server {
        Some(url) => GenerationClient::new(url).generate(&request).await?,
        None => ParameterService::new().normalize(&request)?,
    };
    render(config, &descriptor, args.frames)
}

/// Render `descriptor` for `frames` refreshes on a headless backend
pub fn render(
    config: &AppConfig,
    descriptor: &ModelDescriptor,
    frames: u64,
) -> Result<PreviewReport, PreviewError> {
    let fonts = FontCache::from_config(&config.fonts);
    let backend = HeadlessBackend::new(config.render.width, config.render.height);
    let mut viewer = Viewer::new(backend, fonts, SceneConfig::from(&config.render))?;

    viewer.generate(descriptor)?;
    let ticks = viewer.run_frames(frames)?;

    let report = PreviewReport {
        ticks,
        transform: *viewer.transform(),
        average_fps: viewer.timer().average_fps(),
        stats: viewer.scene().backend().stats(),
    };
    let rotation = report.transform.rotation;
    log::info!(
        "Preview of '{}': {} ticks over {} frames, rotation ({:.3}, {:.3}, {:.3}), scale {:.3}, {:.0} fps",
        descriptor.text,
        report.ticks,
        report.stats.frames_drawn,
        rotation.x,
        rotation.y,
        rotation.z,
        report.transform.scale,
        report.average_fps
    );

    viewer.shutdown();
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use text3d_engine::assets::FontLoadError;

    const TYPEFACE: &str = r#"{
        "glyphs": {
            "H": { "ha": 760, "x_min": 80, "x_max": 680, "o": "m 80 0 l 80 1000 l 680 1000 l 680 0 z" },
            "i": { "ha": 280, "x_min": 80, "x_max": 200, "o": "m 80 0 l 80 700 l 200 700 l 200 0 z" },
            "?": { "ha": 500, "x_min": 0, "x_max": 500, "o": "m 0 0 l 500 0 l 250 1000 z" }
        },
        "familyName": "Preview Sans",
        "ascender": 900,
        "descender": -100,
        "underlineThickness": 50,
        "boundingBox": { "yMin": -100, "xMin": 0, "yMax": 1000, "xMax": 760 },
        "resolution": 1000
    }"#;

    fn config_with_font(dir: &TempDir) -> AppConfig {
        std::fs::write(dir.path().join("preview.typeface.json"), TYPEFACE).unwrap();
        let mut config = AppConfig::default();
        config.fonts.directory = dir.path().to_path_buf();
        config
            .fonts
            .files
            .insert("helvetiker".to_string(), "preview.typeface.json".to_string());
        config
    }

    fn args(text: &str) -> PreviewArgs {
        PreviewArgs {
            text: text.to_string(),
            font: None,
            color: None,
            pattern: None,
            speed: None,
            frames: 10,
            server: None,
        }
    }

    #[tokio::test]
    async fn preview_runs_every_frame() {
        let dir = TempDir::new().unwrap();
        let config = config_with_font(&dir);

        let report = run(&config, &args("Hi")).await.unwrap();

        assert_eq!(report.ticks, 10);
        assert!((report.transform.rotation.y - 0.1).abs() < 1e-5);
        assert_eq!(report.stats.frames_drawn, 10);
        assert_eq!(report.stats.meshes_created, 1);
    }

    #[tokio::test]
    async fn preview_options_reach_the_dispatcher() {
        let dir = TempDir::new().unwrap();
        let config = config_with_font(&dir);
        let args = PreviewArgs {
            pattern: Some("vertical".to_string()),
            speed: Some("fast".to_string()),
            ..args("Hi")
        };

        let report = run(&config, &args).await.unwrap();

        assert!((report.transform.rotation.x - 0.2).abs() < 1e-5);
        assert!(report.transform.rotation.y.abs() < 1e-6);
    }

    #[tokio::test]
    async fn missing_font_file_fails_generation() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.fonts.directory = dir.path().to_path_buf();

        let err = run(&config, &args("Hi")).await.unwrap_err();
        assert!(matches!(
            err,
            PreviewError::Viewer(ViewerError::FontLoad(FontLoadError::Io { .. }))
        ));
    }

    #[tokio::test]
    async fn invalid_color_rejected_before_rendering() {
        let dir = TempDir::new().unwrap();
        let config = config_with_font(&dir);
        let args = PreviewArgs {
            color: Some("blue".to_string()),
            ..args("Hi")
        };

        let err = run(&config, &args).await.unwrap_err();
        assert!(matches!(err, PreviewError::Parameters(ParameterError::InvalidColor { .. })));
    }
}
