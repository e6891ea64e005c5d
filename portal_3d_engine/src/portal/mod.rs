//! Portal module — portal surfaces, the link transform and the registry.

mod portal;
mod portal_link;
mod portal_registry;

pub use portal::{Portal, PortalKey, PortalSurface};
pub use portal_link::PortalLink;
pub use portal_registry::{PortalRegistry, PortalSet};
