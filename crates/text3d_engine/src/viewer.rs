//! The viewer: one owned context for everything a rendering session needs
//!
//! A [`Viewer`] holds the scene, the font cache, the frame loop and the live
//! mesh transform. [`Viewer::generate`] swaps in a new model and restarts the
//! animation; [`Viewer::frame`] is called once per display refresh.

use crate::animation::{AnimationDispatcher, FrameLoop, LoopState};
use crate::assets::{FontCache, FontLoadError};
use crate::foundation::math::MeshTransform;
use crate::foundation::time::FrameTimer;
use crate::params::{format_hex, ModelDescriptor};
use crate::render::{MissingLibraryError, RenderBackend, RenderError};
use crate::scene::{SceneConfig, SceneManager};

/// Viewer errors
#[derive(thiserror::Error, Debug)]
pub enum ViewerError {
    /// Font could not be fetched or parsed
    #[error("Font load failed: {0}")]
    FontLoad(#[from] FontLoadError),

    /// Backend lacks required primitives
    #[error(transparent)]
    MissingLibrary(#[from] MissingLibraryError),

    /// Backend rejected an operation
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Owned rendering session
pub struct Viewer<B: RenderBackend> {
    scene: SceneManager<B>,
    fonts: FontCache,
    frame_loop: FrameLoop,
    transform: MeshTransform,
    timer: FrameTimer,
    descriptor: Option<ModelDescriptor>,
}

impl<B: RenderBackend> Viewer<B> {
    /// Set up the scene on `backend`
    ///
    /// Fails if the backend is missing any primitive the viewer needs.
    pub fn new(backend: B, fonts: FontCache, config: SceneConfig) -> Result<Self, ViewerError> {
        let scene = SceneManager::new(backend, config).map_err(|e| {
            log::error!("Viewer initialization aborted: {}", e);
            e
        })?;

        Ok(Self {
            scene,
            fonts,
            frame_loop: FrameLoop::new(),
            transform: MeshTransform::identity(),
            timer: FrameTimer::new(),
            descriptor: None,
        })
    }

    /// Build the model described by `descriptor` and start animating it
    ///
    /// The running animation is cancelled first. On failure nothing new is
    /// scheduled and the error is returned; the viewer stays usable.
    pub fn generate(&mut self, descriptor: &ModelDescriptor) -> Result<(), ViewerError> {
        self.frame_loop.cancel();

        let font = self.fonts.resolve(&descriptor.font).map_err(|e| {
            log::error!("Cannot render '{}': {}", descriptor.text, e);
            e
        })?;

        self.scene.replace_mesh(
            &descriptor.text,
            &font,
            &descriptor.text_geometry(),
            &descriptor.material(),
        )?;

        self.transform = MeshTransform::identity();
        self.scene.apply_transform(&self.transform)?;
        self.frame_loop
            .start(AnimationDispatcher::new(descriptor.animation_parameters()));
        self.timer.reset();
        self.descriptor = Some(descriptor.clone());

        log::info!(
            "Rendering '{}' in {} {} ({}, {:.4} rad/tick)",
            descriptor.text,
            descriptor.font,
            format_hex(descriptor.color),
            descriptor.rotation_pattern,
            descriptor.rotation_speed.rate()
        );
        Ok(())
    }

    /// Run one display refresh: animate, push the transform, draw
    ///
    /// Returns `true` if an animation tick ran.
    pub fn frame(&mut self) -> Result<bool, ViewerError> {
        let ticked = self.frame_loop.tick(&mut self.transform);
        if ticked {
            self.scene.apply_transform(&self.transform)?;
        }
        self.scene.draw()?;
        self.timer.update();
        Ok(ticked)
    }

    /// Run `count` refreshes, returning how many animation ticks ran
    pub fn run_frames(&mut self, count: u64) -> Result<u64, ViewerError> {
        let mut ticks = 0;
        for _ in 0..count {
            if self.frame()? {
                ticks += 1;
            }
        }
        Ok(ticks)
    }

    /// Stop animating and dispose the live mesh
    pub fn shutdown(&mut self) {
        self.frame_loop.cancel();
        if self.scene.release_mesh() {
            log::debug!("Viewer shut down");
        }
        self.descriptor = None;
    }

    /// Resize the render surface
    pub fn resize(&mut self, width: u32, height: u32) {
        self.scene.resize(width, height);
    }

    /// Current mesh transform
    pub fn transform(&self) -> &MeshTransform {
        &self.transform
    }

    /// Animation loop state
    pub fn state(&self) -> LoopState {
        self.frame_loop.state()
    }

    /// Frame loop
    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frame_loop
    }

    /// Descriptor of the live model
    pub fn descriptor(&self) -> Option<&ModelDescriptor> {
        self.descriptor.as_ref()
    }

    /// Font cache
    pub fn fonts(&self) -> &FontCache {
        &self.fonts
    }

    /// Scene
    pub fn scene(&self) -> &SceneManager<B> {
        &self.scene
    }

    /// Frame timing
    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::font::tests::TEST_TYPEFACE;
    use crate::assets::{FontFetcher, FontRegistry, FontResource};
    use crate::params::{GenerateRequest, ParameterService};
    use crate::render::{HeadlessBackend, Primitive};
    use approx::assert_relative_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    struct StaticFetcher {
        fetches: Rc<Cell<usize>>,
    }

    impl FontFetcher for StaticFetcher {
        fn fetch(&self, id: &str, _source: &str) -> Result<FontResource, FontLoadError> {
            self.fetches.set(self.fetches.get() + 1);
            FontResource::from_typeface_json(id, TEST_TYPEFACE)
        }
    }

    fn viewer() -> (Viewer<HeadlessBackend>, Rc<Cell<usize>>) {
        let fetches = Rc::new(Cell::new(0));
        let fonts = FontCache::new(
            StaticFetcher {
                fetches: Rc::clone(&fetches),
            },
            FontRegistry::new().with_font("helvetiker", "helvetiker_regular.typeface.json"),
        );
        let viewer =
            Viewer::new(HeadlessBackend::new(800, 600), fonts, SceneConfig::default()).unwrap();
        (viewer, fetches)
    }

    fn descriptor(request: GenerateRequest) -> ModelDescriptor {
        ParameterService::new().normalize(&request).unwrap()
    }

    #[test]
    fn test_generate_and_animate() {
        let (mut viewer, _) = viewer();
        viewer.generate(&descriptor(GenerateRequest::new("AB"))).unwrap();

        assert_eq!(viewer.state(), LoopState::Running);
        assert_eq!(viewer.run_frames(5).unwrap(), 5);
        assert_relative_eq!(viewer.transform().rotation.y, 0.05, epsilon = 1e-6);
        assert_eq!(viewer.scene().backend().stats().frames_drawn, 5);
    }

    #[test]
    fn test_font_fetched_once_across_generations() {
        let (mut viewer, fetches) = viewer();
        viewer.generate(&descriptor(GenerateRequest::new("AB"))).unwrap();
        viewer.generate(&descriptor(GenerateRequest::new("BA"))).unwrap();

        assert_eq!(fetches.get(), 1);
        assert!(viewer.fonts().is_cached("helvetiker"));
    }

    #[test]
    fn test_regeneration_replaces_loop_and_mesh() {
        let (mut viewer, _) = viewer();
        viewer.generate(&descriptor(GenerateRequest::new("AB"))).unwrap();
        viewer.run_frames(3).unwrap();

        let request = GenerateRequest {
            rotation_pattern: Some("vertical".to_string()),
            ..GenerateRequest::new("BA")
        };
        viewer.generate(&descriptor(request)).unwrap();
        assert_eq!(viewer.frame_loop().pending_callbacks(), 1);
        assert_relative_eq!(viewer.transform().rotation.y, 0.0);

        viewer.frame().unwrap();
        // One tick of the new pattern only
        assert_relative_eq!(viewer.transform().rotation.x, 0.01, epsilon = 1e-6);
        assert_relative_eq!(viewer.transform().rotation.y, 0.0);

        let stats = viewer.scene().backend().stats();
        assert_eq!(viewer.scene().backend().live_meshes(), 1);
        assert_eq!(stats.geometries_disposed, 1);
        assert_eq!(stats.materials_disposed, 1);
    }

    #[test]
    fn test_unknown_font_aborts_generation() {
        let (mut viewer, fetches) = viewer();
        let request = GenerateRequest {
            font: Some("comic_sans".to_string()),
            ..GenerateRequest::new("AB")
        };

        let err = viewer.generate(&descriptor(request)).unwrap_err();
        assert!(matches!(err, ViewerError::FontLoad(FontLoadError::UnknownFont(_))));
        assert_eq!(fetches.get(), 0);
        assert_eq!(viewer.state(), LoopState::Idle);
        assert!(!viewer.frame().unwrap());

        viewer.generate(&descriptor(GenerateRequest::new("AB"))).unwrap();
        assert!(viewer.frame().unwrap());
    }

    #[test]
    fn test_missing_library_aborts_setup() {
        let fonts = FontCache::new(
            StaticFetcher {
                fetches: Rc::new(Cell::new(0)),
            },
            FontRegistry::new(),
        );
        let backend = HeadlessBackend::new(800, 600).without(&[Primitive::FontLoader]);
        let result = Viewer::new(backend, fonts, SceneConfig::default());
        assert!(matches!(result, Err(ViewerError::MissingLibrary(_))));
    }

    #[test]
    fn test_shutdown_disposes() {
        let (mut viewer, _) = viewer();
        viewer.generate(&descriptor(GenerateRequest::new("AB"))).unwrap();
        viewer.shutdown();

        assert_eq!(viewer.state(), LoopState::Idle);
        assert_eq!(viewer.scene().backend().live_meshes(), 0);
        assert!(viewer.descriptor().is_none());
    }
}
