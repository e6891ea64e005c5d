//! Camera module — camera, frustum, bounds and oblique projection.
//!
//! The portal renderer drives two cameras: the host's main camera and an
//! auxiliary camera reused for every recursive portal view.

mod aabb;
mod camera;
mod frustum;
mod oblique;

pub use aabb::AABB;
pub use camera::{Camera, CameraId, RenderLayers};
pub use frustum::{
    Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
pub use oblique::{oblique_projection, plane_from_point_normal, plane_to_view_space};
