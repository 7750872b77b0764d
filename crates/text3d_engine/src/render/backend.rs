//! Backend trait and the data crossing it

use std::fmt;

use slotmap::new_key_type;
use thiserror::Error;

use crate::assets::FontResource;
use crate::foundation::math::{Mat4, Vec3};
use crate::scene::{Camera, Light};

new_key_type! {
    /// Backend-side identifier of a constructed text mesh
    pub struct MeshId;
}

/// A capability the engine needs from the rendering library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Loading typeface resources
    FontLoader,
    /// Building extruded text geometry
    TextGeometry,
    /// Per-frame display callback
    FrameCallback,
    /// Freeing geometry and material resources
    Disposal,
}

impl Primitive {
    /// Every primitive the engine relies on
    pub const REQUIRED: [Self; 4] = [
        Self::FontLoader,
        Self::TextGeometry,
        Self::FrameCallback,
        Self::Disposal,
    ];
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FontLoader => "font loader",
            Self::TextGeometry => "text geometry",
            Self::FrameCallback => "frame callback",
            Self::Disposal => "disposal",
        };
        f.write_str(name)
    }
}

/// Required rendering primitives are absent
#[derive(Debug, Error)]
#[error("Rendering backend '{backend}' is missing: {}", list(.missing))]
pub struct MissingLibraryError {
    /// Backend name
    pub backend: String,
    /// Primitives that were not found
    pub missing: Vec<Primitive>,
}

fn list(missing: &[Primitive]) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    /// The handle does not refer to a live mesh
    #[error("Unknown mesh: {0:?}")]
    UnknownMesh(MeshId),

    /// Nothing to build
    #[error("Text is empty")]
    EmptyText,

    /// Backend-specific failure
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Bevel settings along the extrusion boundary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bevel {
    /// Depth of the bevel into the extrusion
    pub thickness: f32,
    /// Distance the bevel extends from the outline
    pub size: f32,
    /// Offset of the bevel start from the outline
    pub offset: f32,
    /// Number of bevel segments
    pub segments: u32,
}

/// Extrusion parameters for text geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextGeometry {
    /// Text size (em height in scene units)
    pub size: f32,
    /// Extrusion depth
    pub depth: f32,
    /// Points per curve segment
    pub curve_segments: u32,
    /// Bevel, if enabled
    pub bevel: Option<Bevel>,
}

/// Face and edge colors as 0xRRGGBB
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialDescriptor {
    /// Front and back faces
    pub face_color: u32,
    /// Extruded sides and bevel
    pub edge_color: u32,
}

/// Axis-aligned bounds in mesh space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl BoundingBox {
    /// Create bounds from two corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Midpoint
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent along each axis
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// What the backend returns for a newly built mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuiltMesh {
    /// Handle for later updates and disposal
    pub id: MeshId,
    /// Bounds of the generated geometry
    pub bounds: BoundingBox,
}

/// Everything the backend needs to draw one frame
pub struct SceneView<'a> {
    /// Active camera
    pub camera: &'a Camera,
    /// Scene lights
    pub lights: &'a [Light],
    /// Clear color
    pub background: [f32; 3],
}

/// The rendering library as seen by the engine
pub trait RenderBackend {
    /// Backend name for logs
    fn name(&self) -> &str;

    /// Primitives this backend cannot provide
    fn missing_primitives(&self) -> Vec<Primitive> {
        Vec::new()
    }

    /// Build extruded text geometry and its material
    fn create_text_mesh(
        &mut self,
        text: &str,
        font: &FontResource,
        geometry: &TextGeometry,
        material: &MaterialDescriptor,
    ) -> Result<BuiltMesh, RenderError>;

    /// Set the model matrix of a mesh
    fn set_transform(&mut self, mesh: MeshId, model: &Mat4) -> Result<(), RenderError>;

    /// Free a mesh's geometry buffers
    fn dispose_geometry(&mut self, mesh: MeshId);

    /// Free a mesh's material
    fn dispose_material(&mut self, mesh: MeshId);

    /// Draw all live meshes
    fn draw(&mut self, view: &SceneView<'_>) -> Result<(), RenderError>;

    /// Resize the render surface
    fn resize(&mut self, width: u32, height: u32);
}
