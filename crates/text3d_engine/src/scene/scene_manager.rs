//! Scene Manager - Bridge between the viewer and the rendering backend
//!
//! The Scene Manager:
//! 1. Checks at startup that the backend provides every required primitive
//! 2. Owns the camera and light rig
//! 3. Owns the single live text mesh, disposing the old one before a new one
//!    takes its place
//! 4. Pushes per-frame transforms and issues draws

use crate::assets::FontResource;
use crate::config::RenderConfig;
use crate::foundation::math::{MeshTransform, Vec3};
use crate::render::{
    BoundingBox, MaterialDescriptor, MeshId, MissingLibraryError, RenderBackend, RenderError,
    SceneView, TextGeometry,
};
use crate::scene::{Camera, Light};

/// Scene Manager configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Surface width in pixels
    pub width: u32,

    /// Surface height in pixels
    pub height: u32,

    /// Vertical field of view in degrees
    pub fov_degrees: f32,

    /// Camera distance from the origin
    pub camera_distance: f32,

    /// Clear color
    pub background: [f32; 3],

    /// Move each new mesh so its bounds are centered on the origin
    pub center_mesh: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::from(&RenderConfig::default())
    }
}

impl From<&RenderConfig> for SceneConfig {
    fn from(config: &RenderConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            fov_degrees: config.fov_degrees,
            camera_distance: config.camera_distance,
            background: config.background,
            center_mesh: true,
        }
    }
}

/// The live text mesh
///
/// Only the Scene Manager creates or releases handles.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshHandle {
    id: MeshId,
    bounds: BoundingBox,
    offset: Vec3,
}

impl MeshHandle {
    /// Backend identifier
    pub fn id(&self) -> MeshId {
        self.id
    }

    /// Bounds of the geometry before centering
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Translation applied before rotation and scale
    pub fn offset(&self) -> &Vec3 {
        &self.offset
    }
}

/// Scene Manager - owns camera, lights and the current mesh
pub struct SceneManager<B: RenderBackend> {
    backend: B,
    config: SceneConfig,
    camera: Camera,
    lights: Vec<Light>,
    mesh: Option<MeshHandle>,
}

impl<B: RenderBackend> SceneManager<B> {
    /// Create a scene on `backend`
    ///
    /// Fails if the backend lacks any required primitive.
    pub fn new(mut backend: B, config: SceneConfig) -> Result<Self, MissingLibraryError> {
        let missing = backend.missing_primitives();
        if !missing.is_empty() {
            let err = MissingLibraryError {
                backend: backend.name().to_string(),
                missing,
            };
            log::error!("{}", err);
            return Err(err);
        }

        backend.resize(config.width, config.height);
        let aspect = if config.height > 0 {
            config.width as f32 / config.height as f32
        } else {
            1.0
        };
        let camera = Camera::looking_at_origin(config.camera_distance, config.fov_degrees, aspect);
        log::info!(
            "Scene ready on '{}' backend ({}x{})",
            backend.name(),
            config.width,
            config.height
        );

        Ok(Self {
            backend,
            config,
            camera,
            lights: Light::default_rig(),
            mesh: None,
        })
    }

    /// Build a mesh for `text`, replacing (and disposing) the current one
    pub fn replace_mesh(
        &mut self,
        text: &str,
        font: &FontResource,
        geometry: &TextGeometry,
        material: &MaterialDescriptor,
    ) -> Result<&MeshHandle, RenderError> {
        self.release_mesh();

        let built = self.backend.create_text_mesh(text, font, geometry, material)?;
        let offset = if self.config.center_mesh {
            -built.bounds.center()
        } else {
            Vec3::zeros()
        };
        let handle = MeshHandle {
            id: built.id,
            bounds: built.bounds,
            offset,
        };
        let placed = self
            .backend
            .set_transform(handle.id, &MeshTransform::identity().to_matrix(&offset));
        if let Err(err) = placed {
            self.backend.dispose_geometry(handle.id);
            self.backend.dispose_material(handle.id);
            log::error!("Mesh {:?} could not be placed, disposed: {}", handle.id, err);
            return Err(err);
        }
        log::debug!("Mesh {:?} built, bounds {:?}", handle.id, handle.bounds);

        Ok(&*self.mesh.insert(handle))
    }

    /// Dispose the current mesh's geometry and material
    ///
    /// Returns `true` if there was a mesh to release.
    pub fn release_mesh(&mut self) -> bool {
        match self.mesh.take() {
            Some(handle) => {
                self.backend.dispose_geometry(handle.id);
                self.backend.dispose_material(handle.id);
                log::debug!("Mesh {:?} disposed", handle.id);
                true
            }
            None => false,
        }
    }

    /// Push `transform` to the current mesh; no-op without a mesh
    pub fn apply_transform(&mut self, transform: &MeshTransform) -> Result<(), RenderError> {
        match &self.mesh {
            Some(handle) => self
                .backend
                .set_transform(handle.id, &transform.to_matrix(&handle.offset)),
            None => Ok(()),
        }
    }

    /// Draw one frame
    pub fn draw(&mut self) -> Result<(), RenderError> {
        let view = SceneView {
            camera: &self.camera,
            lights: &self.lights,
            background: self.config.background,
        };
        self.backend.draw(&view)
    }

    /// Resize the render surface
    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width;
        self.config.height = height;
        self.camera.set_viewport(width, height);
        self.backend.resize(width, height);
    }

    /// The live mesh, if any
    pub fn mesh(&self) -> Option<&MeshHandle> {
        self.mesh.as_ref()
    }

    /// Camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Lights
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Rendering backend
    pub fn backend(&self) -> &B {
        &self.backend
    }
}
