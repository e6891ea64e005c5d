/// Portal registry — the set of portals the renderer iterates each frame.
///
/// Ownership: the caller creates and owns the registry and passes it to
/// `PortalRenderer::on_frame_begin` by mutable reference.

use std::sync::Arc;
use slotmap::SlotMap;
use crate::camera::Camera;
use crate::error::{Error, Result};
use crate::renderer::RenderTarget;
use super::portal::{Portal, PortalKey};

/// Trait for portal storage.
///
/// Iteration order is the candidate order of the visibility graph, so it
/// must be stable between frames.
pub trait PortalRegistry {
    /// Keys of every portal, in iteration order.
    fn keys(&self) -> Vec<PortalKey>;

    fn get(&self, key: PortalKey) -> Option<&Portal>;

    fn get_mut(&mut self, key: PortalKey) -> Option<&mut Portal>;

    /// Prime every portal surface for a frame seen from `camera`.
    fn setup_screens(&mut self, camera: &Camera) {
        for key in self.keys() {
            if let Some(portal) = self.get_mut(key) {
                portal.setup_screen(camera);
            }
        }
    }

    /// Show `target` on the surface of `key`. Returns false if the key is invalid.
    fn assign_surface_texture(&mut self, key: PortalKey, target: Arc<dyn RenderTarget>) -> bool {
        match self.get_mut(key) {
            Some(portal) => {
                portal.set_surface_texture(target);
                true
            }
            None => false,
        }
    }
}

/// SlotMap-backed registry keeping insertion order.
#[derive(Debug, Default)]
pub struct PortalSet {
    portals: SlotMap<PortalKey, Portal>,
    order: Vec<PortalKey>,
}

impl PortalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a portal and return its stable key
    pub fn insert(&mut self, portal: Portal) -> PortalKey {
        let key = self.portals.insert_with_key(|key| {
            let mut portal = portal;
            portal.set_key(key);
            portal
        });
        self.order.push(key);
        key
    }

    /// Remove a portal. Portals linked to it become unlinked.
    pub fn remove(&mut self, key: PortalKey) -> Option<Portal> {
        let removed = self.portals.remove(key)?;
        self.order.retain(|k| *k != key);
        for portal in self.portals.values_mut() {
            if portal.destination() == Some(key) {
                portal.set_destination(None);
            }
        }
        Some(removed)
    }

    /// Link `a` and `b` to each other.
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` if either key is not in the set.
    pub fn link(&mut self, a: PortalKey, b: PortalKey) -> Result<()> {
        self.ensure_contains(a)?;
        self.ensure_contains(b)?;
        self.portals[a].set_destination(Some(b));
        self.portals[b].set_destination(Some(a));
        Ok(())
    }

    /// Link `source` to `destination` without linking back.
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` if either key is not in the set.
    pub fn link_one_way(&mut self, source: PortalKey, destination: PortalKey) -> Result<()> {
        self.ensure_contains(source)?;
        self.ensure_contains(destination)?;
        self.portals[source].set_destination(Some(destination));
        Ok(())
    }

    fn ensure_contains(&self, key: PortalKey) -> Result<()> {
        if self.portals.contains_key(key) {
            Ok(())
        } else {
            Err(Error::InvalidResource(format!("unknown portal {:?}", key)))
        }
    }

    pub fn len(&self) -> usize {
        self.portals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.portals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Portal> + '_ {
        self.order.iter().filter_map(|key| self.portals.get(*key))
    }
}

impl PortalRegistry for PortalSet {
    fn keys(&self) -> Vec<PortalKey> {
        self.order.clone()
    }

    fn get(&self, key: PortalKey) -> Option<&Portal> {
        self.portals.get(key)
    }

    fn get_mut(&mut self, key: PortalKey) -> Option<&mut Portal> {
        self.portals.get_mut(key)
    }
}

#[cfg(test)]
#[path = "portal_registry_tests.rs"]
mod tests;
