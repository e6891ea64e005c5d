/// Oblique near-plane projection (Lengyel, "Oblique View Frustum Depth
/// Projection and Clipping").
///
/// A recursive portal camera sits behind the destination surface. Replacing
/// the near plane of its projection with the destination plane keeps every
/// piece of geometry between the camera and the exit out of the portal view.
///
/// Planes are `Vec4(nx, ny, nz, d)` with `n·p + d = 0` on the plane and the
/// visible half-space positive.

use glam::{Mat4, Vec3, Vec4};

/// Plane through `point` with normal `normal` (visible side along `normal`).
pub fn plane_from_point_normal(point: Vec3, normal: Vec3) -> Vec4 {
    let normal = normal.normalize_or_zero();
    normal.extend(-normal.dot(point))
}

/// Transform a world-space plane into the space defined by `view`.
///
/// Planes transform with the inverse transpose of the point transform.
pub fn plane_to_view_space(view: &Mat4, plane_world: Vec4) -> Vec4 {
    view.inverse().transpose() * plane_world
}

/// Replace the near plane of `projection` with `clip_plane_view`.
///
/// Works with the [0, 1] depth range of `Mat4::perspective_rh`: points on
/// the plane map to NDC depth 0 and the far corner of the original frustum
/// still maps to depth 1.
///
/// The camera must be strictly behind the plane (`clip_plane_view.w < 0`);
/// otherwise the unmodified projection is returned.
pub fn oblique_projection(projection: &Mat4, clip_plane_view: Vec4) -> Mat4 {
    if clip_plane_view.w >= 0.0 {
        return *projection;
    }

    let q = projection.inverse()
        * Vec4::new(
            clip_plane_view.x.signum(),
            clip_plane_view.y.signum(),
            1.0,
            1.0,
        );
    let denom = clip_plane_view.dot(q);
    if denom.abs() < 1e-6 {
        return *projection;
    }

    let row2 = clip_plane_view * (projection.row(3).dot(q) / denom);

    let mut oblique = *projection;
    oblique.x_axis.z = row2.x;
    oblique.y_axis.z = row2.y;
    oblique.z_axis.z = row2.z;
    oblique.w_axis.z = row2.w;
    oblique
}

#[cfg(test)]
#[path = "oblique_tests.rs"]
mod tests;
