//! GPU-less backend
//!
//! Keeps the live mesh table and bookkeeping a real backend would, without
//! producing pixels. Geometry bounds are estimated from glyph advances.

use slotmap::SlotMap;

use super::backend::{
    BuiltMesh, BoundingBox, MaterialDescriptor, MeshId, Primitive, RenderBackend, RenderError,
    SceneView, TextGeometry,
};
use crate::assets::FontResource;
use crate::foundation::math::{Mat4, Point3, Vec3};

/// Counters for everything the backend was asked to do
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadlessStats {
    /// Meshes built
    pub meshes_created: u64,
    /// Geometry disposals
    pub geometries_disposed: u64,
    /// Material disposals
    pub materials_disposed: u64,
    /// Frames drawn
    pub frames_drawn: u64,
    /// Meshes inside the view frustum, summed across all frames
    pub meshes_drawn: u64,
}

#[derive(Debug, Clone)]
struct HeadlessMesh {
    text: String,
    material: Option<MaterialDescriptor>,
    has_geometry: bool,
    model: Mat4,
}

/// Backend that records work instead of drawing
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    meshes: SlotMap<MeshId, HeadlessMesh>,
    stats: HeadlessStats,
    viewport: (u32, u32),
    missing: Vec<Primitive>,
}

impl HeadlessBackend {
    /// Create a backend with a `width` x `height` surface
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: (width, height),
            ..Default::default()
        }
    }

    /// Pretend the given primitives are unavailable
    pub fn without(mut self, missing: &[Primitive]) -> Self {
        self.missing = missing.to_vec();
        self
    }

    /// Work counters
    pub fn stats(&self) -> HeadlessStats {
        self.stats
    }

    /// Meshes holding geometry or material
    pub fn live_meshes(&self) -> usize {
        self.meshes.len()
    }

    /// Text of a live mesh
    pub fn mesh_text(&self, mesh: MeshId) -> Option<&str> {
        self.meshes.get(mesh).map(|m| m.text.as_str())
    }

    /// Material of a live mesh
    pub fn mesh_material(&self, mesh: MeshId) -> Option<MaterialDescriptor> {
        self.meshes.get(mesh).and_then(|m| m.material)
    }

    /// Last model matrix set on a live mesh
    pub fn mesh_model(&self, mesh: MeshId) -> Option<&Mat4> {
        self.meshes.get(mesh).map(|m| &m.model)
    }

    /// Surface size
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    fn release_if_empty(&mut self, mesh: MeshId) {
        if let Some(entry) = self.meshes.get(mesh) {
            if !entry.has_geometry && entry.material.is_none() {
                self.meshes.remove(mesh);
            }
        }
    }
}

fn estimate_bounds(text: &str, font: &FontResource, geometry: &TextGeometry) -> BoundingBox {
    let (width, height) = font.measure(text, geometry.size);
    let (grow, extra_depth) = geometry
        .bevel
        .map_or((0.0, 0.0), |bevel| (bevel.size + bevel.offset, bevel.thickness));

    // First baseline at y = 0, further lines stacked downwards
    let scale = geometry.size / font.resolution();
    let top = font.ascender() * scale;
    let bottom = font.descender() * scale - (height - font.line_height(geometry.size));

    BoundingBox::new(
        Vec3::new(-grow, bottom - grow, -extra_depth),
        Vec3::new(width + grow, top + grow, geometry.depth + extra_depth),
    )
}

impl RenderBackend for HeadlessBackend {
    fn name(&self) -> &str {
        "headless"
    }

    fn missing_primitives(&self) -> Vec<Primitive> {
        self.missing.clone()
    }

    fn create_text_mesh(
        &mut self,
        text: &str,
        font: &FontResource,
        geometry: &TextGeometry,
        material: &MaterialDescriptor,
    ) -> Result<BuiltMesh, RenderError> {
        if text.trim().is_empty() {
            return Err(RenderError::EmptyText);
        }

        let bounds = estimate_bounds(text, font, geometry);
        let id = self.meshes.insert(HeadlessMesh {
            text: text.to_string(),
            material: Some(*material),
            has_geometry: true,
            model: Mat4::identity(),
        });
        self.stats.meshes_created += 1;
        log::trace!("Headless mesh {:?} built for {:?}", id, text);

        Ok(BuiltMesh { id, bounds })
    }

    fn set_transform(&mut self, mesh: MeshId, model: &Mat4) -> Result<(), RenderError> {
        let entry = self.meshes.get_mut(mesh).ok_or(RenderError::UnknownMesh(mesh))?;
        entry.model = *model;
        Ok(())
    }

    fn dispose_geometry(&mut self, mesh: MeshId) {
        if let Some(entry) = self.meshes.get_mut(mesh) {
            if entry.has_geometry {
                entry.has_geometry = false;
                self.stats.geometries_disposed += 1;
            }
        }
        self.release_if_empty(mesh);
    }

    fn dispose_material(&mut self, mesh: MeshId) {
        if let Some(entry) = self.meshes.get_mut(mesh) {
            if entry.material.take().is_some() {
                self.stats.materials_disposed += 1;
            }
        }
        self.release_if_empty(mesh);
    }

    fn draw(&mut self, view: &SceneView<'_>) -> Result<(), RenderError> {
        let visible = self
            .meshes
            .values()
            .filter(|m| m.has_geometry && m.material.is_some())
            .filter(|m| view.camera.sees(&m.model.transform_point(&Point3::origin())))
            .count();
        self.stats.frames_drawn += 1;
        self.stats.meshes_drawn += visible as u64;
        log::trace!(
            "Headless frame {}: {} mesh(es), {} light(s), camera at {:?}",
            self.stats.frames_drawn,
            visible,
            view.lights.len(),
            view.camera.position
        );
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::font::tests::TEST_TYPEFACE;
    use crate::render::Bevel;
    use crate::scene::{Camera, Light};

    fn font() -> FontResource {
        FontResource::from_typeface_json("test", TEST_TYPEFACE).unwrap()
    }

    fn geometry(bevel: Option<Bevel>) -> TextGeometry {
        TextGeometry {
            size: 1.0,
            depth: 0.2,
            curve_segments: 12,
            bevel,
        }
    }

    const MATERIAL: MaterialDescriptor = MaterialDescriptor {
        face_color: 0x15_62_89,
        edge_color: 0xff_00_00,
    };

    #[test]
    fn test_create_and_dispose() {
        let mut backend = HeadlessBackend::new(800, 600);
        let built = backend
            .create_text_mesh("AB", &font(), &geometry(None), &MATERIAL)
            .unwrap();
        assert_eq!(backend.live_meshes(), 1);
        assert_eq!(backend.mesh_text(built.id), Some("AB"));
        assert_eq!(backend.mesh_material(built.id), Some(MATERIAL));

        backend.dispose_geometry(built.id);
        assert_eq!(backend.live_meshes(), 1);
        backend.dispose_material(built.id);
        assert_eq!(backend.live_meshes(), 0);

        // Disposing twice is harmless and not double counted
        backend.dispose_geometry(built.id);
        assert_eq!(backend.stats().geometries_disposed, 1);
        assert_eq!(backend.stats().materials_disposed, 1);
    }

    #[test]
    fn test_bounds_cover_text_and_bevel() {
        let mut backend = HeadlessBackend::new(800, 600);
        let plain = backend
            .create_text_mesh("AB", &font(), &geometry(None), &MATERIAL)
            .unwrap();
        let beveled = backend
            .create_text_mesh(
                "AB",
                &font(),
                &geometry(Some(Bevel {
                    thickness: 0.03,
                    size: 0.02,
                    offset: 0.0,
                    segments: 5,
                })),
                &MATERIAL,
            )
            .unwrap();

        assert!((plain.bounds.size().x - 1.5).abs() < 1e-5);
        assert!((plain.bounds.size().z - 0.2).abs() < 1e-5);
        assert!((beveled.bounds.size().x - 1.54).abs() < 1e-5);
        assert!((beveled.bounds.size().z - 0.26).abs() < 1e-5);
    }

    #[test]
    fn test_empty_text_rejected() {
        let mut backend = HeadlessBackend::new(800, 600);
        assert!(matches!(
            backend.create_text_mesh("  ", &font(), &geometry(None), &MATERIAL),
            Err(RenderError::EmptyText)
        ));
        assert_eq!(backend.live_meshes(), 0);
    }

    #[test]
    fn test_transform_on_released_mesh_fails() {
        let mut backend = HeadlessBackend::new(800, 600);
        let built = backend
            .create_text_mesh("A", &font(), &geometry(None), &MATERIAL)
            .unwrap();
        backend.dispose_geometry(built.id);
        backend.dispose_material(built.id);

        assert!(matches!(
            backend.set_transform(built.id, &Mat4::identity()),
            Err(RenderError::UnknownMesh(_))
        ));
    }

    #[test]
    fn test_draw_skips_meshes_outside_the_frustum() {
        let mut backend = HeadlessBackend::new(800, 600);
        let camera = Camera::looking_at_origin(5.0, 75.0, 800.0 / 600.0);
        let lights = Light::default_rig();
        let view = SceneView {
            camera: &camera,
            lights: &lights,
            background: [0.95; 3],
        };

        let front = backend
            .create_text_mesh("A", &font(), &geometry(None), &MATERIAL)
            .unwrap();
        let behind = backend
            .create_text_mesh("B", &font(), &geometry(None), &MATERIAL)
            .unwrap();
        backend
            .set_transform(behind.id, &Mat4::new_translation(&Vec3::new(0.0, 0.0, 10.0)))
            .unwrap();
        backend.draw(&view).unwrap();
        assert_eq!(backend.stats().meshes_drawn, 1);

        backend
            .set_transform(front.id, &Mat4::new_translation(&Vec3::new(100.0, 0.0, 0.0)))
            .unwrap();
        backend.draw(&view).unwrap();
        assert_eq!(backend.stats().frames_drawn, 2);
        assert_eq!(backend.stats().meshes_drawn, 1);
    }

    #[test]
    fn test_reports_missing_primitives() {
        let backend = HeadlessBackend::new(1, 1).without(&[Primitive::TextGeometry]);
        assert_eq!(backend.missing_primitives(), vec![Primitive::TextGeometry]);
        assert!(HeadlessBackend::new(1, 1).missing_primitives().is_empty());
    }
}
