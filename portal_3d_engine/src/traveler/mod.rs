//! Traveler module — portal crossing, teleport and the clip-plane duplicate.

mod material;
mod traveler;

pub use material::{
    ClipPlaneUniform, Material, ParamValue,
    CLIP_PLANE_CENTER, CLIP_PLANE_NORMAL, USE_CLIP_PLANE,
};
pub use traveler::{
    RigidBody, Transition, Traveler, TravelerEvent, TravelerGraphics, TravelerListener,
};
