/// Traveler — an object that can pass through portals.
///
/// Two mechanisms:
/// - Teleport: a one-shot jump of the rigid body through the portal link.
/// - Transition: while the traveler overlaps a portal, a duplicate of its
///   graphics is drawn at the exit and both copies are clipped at their
///   portal plane, so exactly one continuous object appears across the seam.
///
/// The host drives the traveler from its zone triggers and physics; the
/// traveler never moves on its own.

use glam::{Mat4, Quat, Vec3};
use crate::error::{Error, Result};
use crate::portal::{Portal, PortalKey, PortalLink, PortalRegistry};
use super::material::{Material, CLIP_PLANE_CENTER, CLIP_PLANE_NORMAL, USE_CLIP_PLANE};

// ===== RIGID BODY =====

/// Physics state moved by teleports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBody {
    pub position: Vec3,
    pub rotation: Quat,
    /// World-space linear velocity
    pub velocity: Vec3,
    /// World-space angular velocity (axis * radians per second)
    pub angular_velocity: Vec3,
}

impl RigidBody {
    /// Body at rest
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
        }
    }

    /// Body-to-world transform
    pub fn pose(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }
}

// ===== GRAPHICS =====

/// Visual representation of a traveler (or of its duplicate).
#[derive(Debug, Clone, PartialEq)]
pub struct TravelerGraphics {
    pose: Mat4,
    materials: Vec<Material>,
    active: bool,
}

impl TravelerGraphics {
    /// Active graphics with world pose `pose` (scale allowed)
    pub fn new(pose: Mat4, materials: Vec<Material>) -> Self {
        Self { pose, materials, active: true }
    }

    pub fn pose(&self) -> &Mat4 {
        &self.pose
    }

    pub fn set_pose(&mut self, pose: Mat4) {
        self.pose = pose;
    }

    pub fn scale(&self) -> Vec3 {
        self.pose.to_scale_rotation_translation().0
    }

    /// Move and orient, keeping the current scale
    pub fn set_position_rotation(&mut self, position: Vec3, rotation: Quat) {
        self.pose = Mat4::from_scale_rotation_translation(self.scale(), rotation, position);
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn materials_mut(&mut self) -> &mut [Material] {
        &mut self.materials
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn set_clip_plane_enabled(&mut self, enabled: bool) {
        for material in &mut self.materials {
            material.set_int(USE_CLIP_PLANE, i32::from(enabled));
        }
    }

    fn set_clip_plane(&mut self, center: Vec3, normal: Vec3) {
        for material in &mut self.materials {
            material.set_vec3(CLIP_PLANE_CENTER, center);
            material.set_vec3(CLIP_PLANE_NORMAL, normal);
        }
    }
}

// ===== TRANSITION & EVENTS =====

/// Portal pair the traveler is currently crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub source: PortalKey,
    pub destination: PortalKey,
}

/// Notification sent to every listener of a traveler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelerEvent {
    EnteredZone { portal: PortalKey },
    LeftZone { portal: PortalKey },
    Teleported { source: PortalKey, destination: PortalKey },
}

/// Receiver of traveler events. Every method defaults to a no-op.
pub trait TravelerListener {
    /// Entry point: dispatches to the specific handler
    fn on_event(&mut self, event: &TravelerEvent) {
        match *event {
            TravelerEvent::EnteredZone { portal } => self.on_enter_portal_zone(portal),
            TravelerEvent::LeftZone { portal } => self.on_leave_portal_zone(portal),
            TravelerEvent::Teleported { source, destination } => self.on_teleport(source, destination),
        }
    }

    fn on_enter_portal_zone(&mut self, _portal: PortalKey) {}

    fn on_leave_portal_zone(&mut self, _portal: PortalKey) {}

    fn on_teleport(&mut self, _source: PortalKey, _destination: PortalKey) {}
}

// ===== TRAVELER =====

/// An object able to cross portals.
pub struct Traveler {
    body: RigidBody,
    graphics: TravelerGraphics,
    duplicate: Option<TravelerGraphics>,
    transition: Option<Transition>,
    teleported_this_frame: bool,
    listeners: Vec<Box<dyn TravelerListener>>,
}

impl Traveler {
    pub fn new(body: RigidBody, graphics: TravelerGraphics) -> Self {
        Self {
            body,
            graphics,
            duplicate: None,
            transition: None,
            teleported_this_frame: false,
            listeners: Vec::new(),
        }
    }

    // ===== ACCESSORS =====

    pub fn body(&self) -> &RigidBody {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut RigidBody {
        &mut self.body
    }

    pub fn graphics(&self) -> &TravelerGraphics {
        &self.graphics
    }

    pub fn graphics_mut(&mut self) -> &mut TravelerGraphics {
        &mut self.graphics
    }

    /// Duplicate graphics, created by the first transition
    pub fn duplicate(&self) -> Option<&TravelerGraphics> {
        self.duplicate.as_ref()
    }

    pub fn transition(&self) -> Option<Transition> {
        self.transition
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// True between a teleport and the next `late_update`
    pub fn teleported_this_frame(&self) -> bool {
        self.teleported_this_frame
    }

    pub fn add_listener(&mut self, listener: Box<dyn TravelerListener>) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // ===== TELEPORT =====

    /// Move the traveler from `source` to `destination`.
    ///
    /// Pose goes through the full link; linear and angular velocity go
    /// through its rotation only.
    pub fn teleport(&mut self, source: &Portal, destination: &Portal) {
        let link = PortalLink::between(source, destination);

        let pose = link.transform_pose(&self.body.pose());
        let (_, rotation, position) = pose.to_scale_rotation_translation();
        self.body.position = position;
        self.body.rotation = rotation.normalize();
        self.body.velocity = link.transform_direction(self.body.velocity);
        self.body.angular_velocity = link.transform_direction(self.body.angular_velocity);

        self.graphics.set_pose(link.transform_pose(self.graphics.pose()));

        self.teleported_this_frame = true;

        crate::engine_trace!("portal3d::Traveler",
            "Teleported to ({:.2}, {:.2}, {:.2})", position.x, position.y, position.z);

        self.emit(TravelerEvent::Teleported {
            source: source.key(),
            destination: destination.key(),
        });
    }

    // ===== TRANSITION =====

    /// Start (or retarget) the crossing of `source` towards `destination`.
    ///
    /// The duplicate is created on first use with its own material
    /// instances and reused afterwards.
    pub fn begin_transition(&mut self, source: &Portal, destination: &Portal) {
        let graphics = &self.graphics;
        let duplicate = self.duplicate.get_or_insert_with(|| graphics.clone());
        duplicate.set_active(true);
        duplicate.set_clip_plane_enabled(true);
        self.graphics.set_clip_plane_enabled(true);

        self.transition = Some(Transition {
            source: source.key(),
            destination: destination.key(),
        });
    }

    /// Finish the crossing: hide the duplicate and disable clipping.
    ///
    /// # Errors
    ///
    /// `Error::InvalidTransitionState` if no transition is active.
    pub fn end_transition(&mut self) -> Result<()> {
        if self.transition.is_none() {
            return Err(Error::InvalidTransitionState(
                "end_transition called without an active transition".to_string(),
            ));
        }

        self.finish_transition();
        Ok(())
    }

    fn finish_transition(&mut self) {
        self.transition = None;
        if let Some(duplicate) = &mut self.duplicate {
            duplicate.set_active(false);
            duplicate.set_clip_plane_enabled(false);
        }
        self.graphics.set_clip_plane_enabled(false);
    }

    /// End-of-frame update.
    ///
    /// While transitioning, places the duplicate through the link and
    /// refreshes both clip planes. Always clears `teleported_this_frame`.
    pub fn late_update(&mut self, portals: &dyn PortalRegistry) {
        if let Some(transition) = self.transition {
            match (portals.get(transition.source), portals.get(transition.destination)) {
                (Some(source), Some(destination)) => self.update_clip_planes(source, destination),
                _ => {
                    crate::engine_warn!("portal3d::Traveler",
                        "Transition portal no longer registered, clip planes not updated");
                }
            }
        }

        self.teleported_this_frame = false;
    }

    fn update_clip_planes(&mut self, source: &Portal, destination: &Portal) {
        let link = PortalLink::between(source, destination);

        self.graphics.set_clip_plane(source.center(), -source.forward());

        if let Some(duplicate) = &mut self.duplicate {
            let (_, rotation, position) = link
                .transform_pose(self.graphics.pose())
                .to_scale_rotation_translation();
            duplicate.set_position_rotation(position, rotation);
            duplicate.set_clip_plane(destination.exit_position(), destination.exit_forward());
        }
    }

    // ===== ZONE TRIGGERS =====

    /// The traveler started overlapping `source`
    pub fn enter_portal_zone(&mut self, source: &Portal, destination: &Portal) {
        self.begin_transition(source, destination);
        self.emit(TravelerEvent::EnteredZone { portal: source.key() });
    }

    /// The traveler stopped overlapping `portal`.
    ///
    /// Ends the transition only if it goes through `portal`; a transition
    /// already retargeted by a crossing is kept.
    pub fn leave_portal_zone(&mut self, portal: &Portal) {
        if self.transition.is_some_and(|transition| transition.source == portal.key()) {
            self.finish_transition();
        }
        self.emit(TravelerEvent::LeftZone { portal: portal.key() });
    }

    /// The traveler's center crossed the plane of `source`.
    ///
    /// Teleports, then flips an active transition through `source` so the
    /// crossing continues from the destination side.
    pub fn cross_portal(&mut self, source: &Portal, destination: &Portal) {
        self.teleport(source, destination);
        if self.transition.is_some_and(|transition| transition.source == source.key()) {
            self.begin_transition(destination, source);
        }
    }

    fn emit(&mut self, event: TravelerEvent) {
        for listener in &mut self.listeners {
            listener.on_event(&event);
        }
    }
}

#[cfg(test)]
#[path = "traveler_tests.rs"]
mod tests;
