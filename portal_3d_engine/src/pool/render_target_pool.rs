/// Bounded pool of offscreen render targets.
///
/// Targets are handed out during the visibility graph build and all marked
/// free again once the main camera has finished rendering. A free target is
/// reused before a new one is created, so steady-state frames allocate
/// nothing. Every target matches the current viewport resolution; a resize
/// drops the whole set because targets have no partial-resize path.

use std::sync::Arc;
use winit::dpi::PhysicalSize;
use crate::error::{Error, Result};
use crate::renderer::{RenderTarget, RenderTargetDesc, Renderer};

struct PoolEntry {
    target: Arc<dyn RenderTarget>,
    in_use: bool,
}

/// Render target pool (owned by `PortalRenderer`)
pub struct RenderTargetPool {
    size: PhysicalSize<u32>,
    max_allocations: usize,
    entries: Vec<PoolEntry>,
    resize_count: u32,
}

impl RenderTargetPool {
    /// Create an empty pool for the given resolution and allocation ceiling
    pub fn new(size: PhysicalSize<u32>, max_allocations: usize) -> Self {
        Self {
            size,
            max_allocations,
            entries: Vec::new(),
            resize_count: 0,
        }
    }

    /// Hand out a free target, creating one if none is free
    ///
    /// # Errors
    ///
    /// - `Error::PoolExhausted` if handing out one more target would put
    ///   more than `max_allocations` in use. Callers stop recursing;
    ///   this is not a frame failure.
    /// - Backend errors from `Renderer::create_render_target`.
    pub fn acquire(&mut self, renderer: &mut dyn Renderer) -> Result<Arc<dyn RenderTarget>> {
        if self.in_use_count() >= self.max_allocations {
            return Err(Error::PoolExhausted { max_allocations: self.max_allocations });
        }

        if let Some(entry) = self.entries.iter_mut().find(|entry| !entry.in_use) {
            entry.in_use = true;
            return Ok(entry.target.clone());
        }

        let desc = RenderTargetDesc::color_depth(self.size.width.max(1), self.size.height.max(1));
        let target = renderer.create_render_target(&desc)?;
        crate::engine_trace!("portal3d::RenderTargetPool",
            "Created render target #{} ({}x{})",
            self.entries.len(), desc.width, desc.height);

        self.entries.push(PoolEntry { target: target.clone(), in_use: true });
        Ok(target)
    }

    /// Drop every target and adopt a new resolution
    ///
    /// Setting the current resolution again is a no-op.
    ///
    /// # Errors
    ///
    /// `Error::ResolutionChangeDuringRecursion` while any target is in use:
    /// dropping it would invalidate a recursion node still being rendered.
    pub fn set_resolution(&mut self, size: PhysicalSize<u32>) -> Result<()> {
        if size == self.size {
            return Ok(());
        }

        let in_use = self.in_use_count();
        if in_use > 0 {
            return Err(Error::ResolutionChangeDuringRecursion { in_use });
        }

        crate::engine_info!("portal3d::RenderTargetPool",
            "Resolution {}x{} -> {}x{}, dropping {} targets",
            self.size.width, self.size.height, size.width, size.height, self.entries.len());

        self.entries.clear();
        self.size = size;
        self.resize_count += 1;
        Ok(())
    }

    /// Mark every target free without destroying it
    pub fn release_all(&mut self) {
        for entry in &mut self.entries {
            entry.in_use = false;
        }
    }

    /// Change the allocation ceiling
    ///
    /// Already-allocated targets are kept even above the new ceiling, but
    /// no more than `max_allocations` of them are handed out at once.
    pub fn set_max_allocations(&mut self, max_allocations: usize) {
        self.max_allocations = max_allocations;
    }

    /// Current target resolution
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Allocation ceiling
    pub fn max_allocations(&self) -> usize {
        self.max_allocations
    }

    /// Number of targets owned by the pool (free or in use)
    pub fn allocated_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of targets currently handed out
    pub fn in_use_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.in_use).count()
    }

    /// Number of targets available for reuse
    pub fn free_count(&self) -> usize {
        self.entries.len() - self.in_use_count()
    }

    /// Number of effective resolution changes since creation
    pub fn resize_count(&self) -> u32 {
        self.resize_count
    }

    /// Targets currently free, in pool order
    pub fn free_targets(&self) -> impl Iterator<Item = &Arc<dyn RenderTarget>> + '_ {
        self.entries
            .iter()
            .filter(|entry| !entry.in_use)
            .map(|entry| &entry.target)
    }
}

#[cfg(test)]
#[path = "render_target_pool_tests.rs"]
mod tests;
