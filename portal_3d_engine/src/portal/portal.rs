/// Portal — a rectangular see-through surface linked to a destination.
///
/// The surface lies in the local XY plane of `transform`, centered on its
/// origin. Local +Z points into the surface: a viewer can see through the
/// portal only from the -Z side. The exit transform is the frame anything
/// leaving through this portal (as a destination) is expressed in; it
/// defaults to the surface transform turned half a turn about local up.

use std::f32::consts::PI;
use std::sync::Arc;
use glam::{Mat4, Vec2, Vec3, Vec4};
use slotmap::new_key_type;
use crate::camera::{plane_from_point_normal, Camera, AABB};
use crate::renderer::RenderTarget;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a Portal within a PortalSet.
    ///
    /// Keys remain valid even after other portals are removed.
    pub struct PortalKey;
}

// ===== SURFACE STATE =====

/// Per-frame state of the visible surface.
#[derive(Clone, Default)]
pub struct PortalSurface {
    texture: Option<Arc<dyn RenderTarget>>,
    viewer_in_front: bool,
    screen_offset: f32,
}

impl PortalSurface {
    /// Render target shown on the surface this frame, if any
    pub fn texture(&self) -> Option<&Arc<dyn RenderTarget>> {
        self.texture.as_ref()
    }

    /// Whether the main viewer stood on the visible side at frame start
    pub fn viewer_in_front(&self) -> bool {
        self.viewer_in_front
    }

    /// Thickness to extrude the screen away from the viewer
    pub fn screen_offset(&self) -> f32 {
        self.screen_offset
    }
}

impl std::fmt::Debug for PortalSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalSurface")
            .field("has_texture", &self.texture.is_some())
            .field("viewer_in_front", &self.viewer_in_front)
            .field("screen_offset", &self.screen_offset)
            .finish()
    }
}

// ===== PORTAL =====

/// A portal surface.
#[derive(Debug, Clone)]
pub struct Portal {
    key: PortalKey,
    transform: Mat4,
    exit_transform: Mat4,
    half_extents: Vec2,
    destination: Option<PortalKey>,
    surface: PortalSurface,
}

impl Portal {
    /// Create an unlinked portal.
    ///
    /// # Arguments
    ///
    /// * `transform` - Surface-to-world transform (rigid)
    /// * `half_extents` - Half width and half height of the quad
    pub fn new(transform: Mat4, half_extents: Vec2) -> Self {
        Self {
            key: PortalKey::default(),
            transform,
            exit_transform: Self::default_exit(&transform),
            half_extents,
            destination: None,
            surface: PortalSurface::default(),
        }
    }

    fn default_exit(transform: &Mat4) -> Mat4 {
        *transform * Mat4::from_rotation_y(PI)
    }

    // ===== GETTERS =====

    /// Key assigned by the owning set (null until inserted)
    pub fn key(&self) -> PortalKey {
        self.key
    }

    /// Surface-to-world transform
    pub fn transform(&self) -> &Mat4 {
        &self.transform
    }

    /// Frame used when this portal is the destination of a link
    pub fn exit_transform(&self) -> &Mat4 {
        &self.exit_transform
    }

    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }

    /// Linked destination, `None` for a one-sided decoration
    pub fn destination(&self) -> Option<PortalKey> {
        self.destination
    }

    pub fn surface(&self) -> &PortalSurface {
        &self.surface
    }

    /// World-space center of the surface
    pub fn center(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }

    /// World-space direction pointing into the surface
    pub fn forward(&self) -> Vec3 {
        self.transform.z_axis.truncate().normalize_or_zero()
    }

    /// World-space position of the exit frame
    pub fn exit_position(&self) -> Vec3 {
        self.exit_transform.w_axis.truncate()
    }

    /// World-space direction things leave along when exiting here
    pub fn exit_forward(&self) -> Vec3 {
        self.exit_transform.z_axis.truncate().normalize_or_zero()
    }

    /// World-space corners of the quad (counter-clockwise seen from the viewer side)
    pub fn corners(&self) -> [Vec3; 4] {
        let h = self.half_extents;
        [
            Vec3::new(-h.x, -h.y, 0.0),
            Vec3::new(-h.x, h.y, 0.0),
            Vec3::new(h.x, h.y, 0.0),
            Vec3::new(h.x, -h.y, 0.0),
        ]
        .map(|corner| self.transform.transform_point3(corner))
    }

    /// World-space bounds of the quad
    pub fn bounds(&self) -> AABB {
        let corners = self.corners();
        let mut aabb = AABB { min: corners[0], max: corners[0] };
        for corner in &corners[1..] {
            aabb.min = aabb.min.min(*corner);
            aabb.max = aabb.max.max(*corner);
        }
        aabb
    }

    /// True if `viewpoint` is on the visible side of the surface
    pub fn faces_viewer(&self, viewpoint: Vec3) -> bool {
        (viewpoint - self.center()).dot(self.forward()) < 0.0
    }

    /// Plane of the exit frame, visible half-space along `exit_forward`
    pub fn exit_plane(&self) -> Vec4 {
        plane_from_point_normal(self.exit_position(), self.exit_forward())
    }

    // ===== SETTERS =====

    pub(crate) fn set_key(&mut self, key: PortalKey) {
        self.key = key;
    }

    /// Move the portal. Resets the exit frame to the default.
    pub fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
        self.exit_transform = Self::default_exit(&transform);
    }

    /// Override the exit frame
    pub fn set_exit_transform(&mut self, exit_transform: Mat4) {
        self.exit_transform = exit_transform;
    }

    pub fn set_half_extents(&mut self, half_extents: Vec2) {
        self.half_extents = half_extents;
    }

    pub fn set_destination(&mut self, destination: Option<PortalKey>) {
        self.destination = destination;
    }

    // ===== PER-FRAME SURFACE =====

    /// Prepare the surface for a new frame seen from `camera`.
    ///
    /// Records the viewer side and the screen thickness that keeps the
    /// camera near plane from cutting the surface when the viewer stands
    /// against it, and drops the previous frame's texture.
    pub fn setup_screen(&mut self, camera: &Camera) {
        self.surface.viewer_in_front = self.faces_viewer(camera.position());
        self.surface.screen_offset = camera.near_clip_corner_distance();
        self.surface.texture = None;
    }

    /// Show `target` on the surface
    pub fn set_surface_texture(&mut self, target: Arc<dyn RenderTarget>) {
        self.surface.texture = Some(target);
    }
}

#[cfg(test)]
#[path = "portal_tests.rs"]
mod tests;
