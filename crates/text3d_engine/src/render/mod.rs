//! Rendering library boundary
//!
//! The engine never draws by itself. Text outlining, extrusion, beveling and
//! drawing go through a [`RenderBackend`]; [`HeadlessBackend`] implements it
//! without a GPU for previews and tests.

pub mod backend;
pub mod headless;

pub use backend::{
    Bevel, BoundingBox, BuiltMesh, MaterialDescriptor, MeshId, MissingLibraryError, Primitive,
    RenderBackend, RenderError, SceneView, TextGeometry,
};
pub use headless::{HeadlessBackend, HeadlessStats};
