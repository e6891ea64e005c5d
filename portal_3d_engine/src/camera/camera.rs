/// Camera — low-level data container for a viewpoint.
///
/// The caller (host engine) computes the view and projection matrices.
/// The only derived state the camera keeps is its frustum, which is
/// re-extracted whenever the view or the projection changes so that portal
/// visibility tests never run against a stale frustum.

use bitflags::bitflags;
use glam::{Mat4, Vec3};
use winit::dpi::PhysicalSize;
use super::frustum::Frustum;

bitflags! {
    /// Culling mask: which scene layers a camera renders.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RenderLayers: u32 {
        const DEFAULT = 1 << 0;
        const TRANSPARENT_FX = 1 << 1;
        const IGNORE_RAYCAST = 1 << 2;
        const WATER = 1 << 4;
        const UI = 1 << 5;
        const PORTAL_SURFACE = 1 << 8;
        const TRAVELER = 1 << 9;
        const EVERYTHING = !0;
    }
}

/// Identity of a camera, used to filter host render callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CameraId(pub u32);

/// Low-level camera.
#[derive(Debug, Clone)]
pub struct Camera {
    id: CameraId,
    view_matrix: Mat4,
    projection_matrix: Mat4,
    frustum: Frustum,
    culling_mask: RenderLayers,
    target_size: Option<PhysicalSize<u32>>,
}

impl Camera {
    /// Create a new camera rendering every layer to the display surface.
    pub fn new(id: CameraId, view: Mat4, projection: Mat4) -> Self {
        Self {
            id,
            view_matrix: view,
            projection_matrix: projection,
            frustum: Frustum::from_view_projection(&(projection * view)),
            culling_mask: RenderLayers::EVERYTHING,
            target_size: None,
        }
    }

    // ===== GETTERS =====

    /// Camera identity.
    pub fn id(&self) -> CameraId {
        self.id
    }

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Projection matrix (perspective, possibly with an oblique near plane).
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// Camera-to-world transform.
    pub fn world_matrix(&self) -> Mat4 {
        self.view_matrix.inverse()
    }

    /// World-space eye position.
    pub fn position(&self) -> Vec3 {
        self.world_matrix().w_axis.truncate()
    }

    /// World-space viewing direction (-Z of the camera frame).
    pub fn forward(&self) -> Vec3 {
        (-self.world_matrix().z_axis.truncate()).normalize_or_zero()
    }

    /// Frustum planes for culling.
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Layers rendered by this camera.
    pub fn culling_mask(&self) -> RenderLayers {
        self.culling_mask
    }

    /// Size of the camera's output target, `None` when rendering to the display.
    pub fn target_size(&self) -> Option<PhysicalSize<u32>> {
        self.target_size
    }

    /// Distance from the eye to a corner of the near clip rectangle.
    ///
    /// Used to thicken portal screens so that the near plane never cuts
    /// through a surface the viewer is standing against.
    pub fn near_clip_corner_distance(&self) -> f32 {
        let corner = self
            .projection_matrix
            .inverse()
            .project_point3(Vec3::new(1.0, 1.0, 0.0));
        corner.length()
    }

    // ===== SETTERS =====

    /// Set the view matrix and refresh the frustum.
    pub fn set_view(&mut self, matrix: Mat4) {
        self.view_matrix = matrix;
        self.refresh_frustum();
    }

    /// Set the projection matrix and refresh the frustum.
    pub fn set_projection(&mut self, matrix: Mat4) {
        self.projection_matrix = matrix;
        self.refresh_frustum();
    }

    /// Set both matrices at once (one frustum extraction).
    pub fn set_view_projection(&mut self, view: Mat4, projection: Mat4) {
        self.view_matrix = view;
        self.projection_matrix = projection;
        self.refresh_frustum();
    }

    /// Set the culling mask.
    pub fn set_culling_mask(&mut self, mask: RenderLayers) {
        self.culling_mask = mask;
    }

    /// Set the output target size. `None` means the display surface.
    pub fn set_target_size(&mut self, size: Option<PhysicalSize<u32>>) {
        self.target_size = size;
    }

    fn refresh_frustum(&mut self) {
        self.frustum = Frustum::from_view_projection(&self.view_projection_matrix());
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
