/// Portal link — the transform law shared by recursive cameras, teleports
/// and duplicate placement.
///
/// `P' = destination.exit_transform * source.transform⁻¹ * P`

use glam::{Mat4, Quat, Vec3};
use super::portal::Portal;

/// Rigid mapping from the source side of a portal pair to its exit side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortalLink {
    matrix: Mat4,
}

impl PortalLink {
    /// Link going in through `source` and out through `destination`
    pub fn between(source: &Portal, destination: &Portal) -> Self {
        Self {
            matrix: *destination.exit_transform() * source.transform().inverse(),
        }
    }

    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    /// Map a world pose (object-to-world matrix)
    pub fn transform_pose(&self, pose: &Mat4) -> Mat4 {
        self.matrix * *pose
    }

    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.matrix.transform_point3(point)
    }

    /// Map a direction or velocity (rotation only, translation ignored)
    pub fn transform_direction(&self, direction: Vec3) -> Vec3 {
        self.matrix.transform_vector3(direction)
    }

    /// Rotational part of the link
    pub fn rotation(&self) -> Quat {
        let (_, rotation, _) = self.matrix.to_scale_rotation_translation();
        rotation
    }
}

#[cfg(test)]
#[path = "portal_link_tests.rs"]
mod tests;
