/// Portal renderer — per-frame coordinator of the portal views.
///
/// Reacts to the host's begin/end callbacks for the main camera. On begin
/// it adopts the viewport size, primes the auxiliary camera and every
/// portal surface, then builds the visibility graph. On end it returns all
/// render targets to the pool. It never renders the main camera itself.

use winit::dpi::PhysicalSize;
use glam::Mat4;
use crate::camera::{Camera, CameraId};
use crate::error::{Error, Result};
use crate::pool::RenderTargetPool;
use crate::portal::PortalRegistry;
use crate::visibility::{GraphStats, VisibilityGraph};
use super::Renderer;

/// Portal renderer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortalRendererConfig {
    /// Portal-within-portal levels rendered (0 disables portal views)
    pub max_recursion_depth: u32,
    /// Ceiling on render targets owned by the pool (at least 1)
    pub max_texture_allocations: usize,
}

impl Default for PortalRendererConfig {
    fn default() -> Self {
        Self {
            max_recursion_depth: 5,
            max_texture_allocations: 100,
        }
    }
}

/// Position within the main camera's frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// No main camera frame in flight
    Idle,
    /// Frame begun, preparing the pool and surfaces
    PreRender,
    /// Visibility graph built; the host renders the main camera
    GraphBuilt,
    /// Frame ended, reclaiming targets
    PostRender,
}

/// What one `on_frame_begin` did.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Viewport size used for this frame's targets
    pub viewport: PhysicalSize<u32>,
    /// The pool was resized this frame
    pub resized: bool,
    /// Targets left in use by a frame that never ended, reclaimed this frame
    pub reclaimed_targets: usize,
    /// The graph build failed on a backend error
    pub graph_aborted: bool,
    /// Graph outcome (empty when aborted)
    pub stats: GraphStats,
}

/// Portal renderer.
pub struct PortalRenderer {
    config: PortalRendererConfig,
    main_camera: CameraId,
    aux_camera: Camera,
    display_size: PhysicalSize<u32>,
    pool: RenderTargetPool,
    state: FrameState,
}

impl PortalRenderer {
    /// Create a portal renderer bound to `main_camera`.
    ///
    /// # Arguments
    ///
    /// * `main_camera` - Identity of the camera whose frames drive portal rendering
    /// * `aux_camera` - Identity given to the camera used for every portal view
    /// * `display_size` - Size of the display surface
    /// * `config` - Recursion and allocation limits
    ///
    /// # Errors
    ///
    /// `Error::InvalidConfiguration` if `max_texture_allocations` is 0.
    pub fn new(
        main_camera: CameraId,
        aux_camera: CameraId,
        display_size: PhysicalSize<u32>,
        config: PortalRendererConfig,
    ) -> Result<Self> {
        validate_allocations(config.max_texture_allocations)?;

        crate::engine_info!("portal3d::PortalRenderer",
            "Portal renderer created (depth {}, {} max targets, display {}x{})",
            config.max_recursion_depth, config.max_texture_allocations,
            display_size.width, display_size.height);

        Ok(Self {
            config,
            main_camera,
            aux_camera: Camera::new(aux_camera, Mat4::IDENTITY, Mat4::IDENTITY),
            display_size,
            pool: RenderTargetPool::new(display_size, config.max_texture_allocations),
            state: FrameState::Idle,
        })
    }

    // ===== HOST CALLBACKS =====

    /// Host callback: `camera` is about to render.
    ///
    /// Returns `None` for any camera other than the main camera.
    pub fn on_frame_begin(
        &mut self,
        camera: &Camera,
        renderer: &mut dyn Renderer,
        registry: &mut dyn PortalRegistry,
    ) -> Option<FrameReport> {
        if camera.id() != self.main_camera {
            return None;
        }

        let reclaimed_targets = self.reclaim_leaked_targets();
        self.state = FrameState::PreRender;

        let viewport = self.viewport_size(camera);
        let resized = self.adopt_viewport(viewport);

        self.aux_camera.set_culling_mask(camera.culling_mask());
        self.aux_camera.set_projection(*camera.projection_matrix());
        self.aux_camera.set_target_size(Some(viewport));

        registry.setup_screens(camera);

        let graph = VisibilityGraph::new(self.config.max_recursion_depth);
        let (stats, graph_aborted) = match graph.render(
            camera,
            &mut self.aux_camera,
            &mut self.pool,
            renderer,
            registry,
        ) {
            Ok(stats) => (stats, false),
            Err(err) => {
                crate::engine_error!("portal3d::PortalRenderer",
                    "Portal graph aborted: {}", err);
                (GraphStats::default(), true)
            }
        };

        self.state = FrameState::GraphBuilt;

        Some(FrameReport {
            viewport,
            resized,
            reclaimed_targets,
            graph_aborted,
            stats,
        })
    }

    /// Host callback: `camera` finished rendering.
    ///
    /// Returns every target to the pool when `camera` is the main camera.
    pub fn on_frame_end(&mut self, camera: &Camera) {
        if camera.id() != self.main_camera {
            return;
        }

        self.state = FrameState::PostRender;
        self.pool.release_all();
        self.state = FrameState::Idle;
    }

    /// Host callback: the renderer stops receiving frame callbacks.
    pub fn on_disable(&mut self) {
        let in_use = self.pool.in_use_count();
        if in_use > 0 {
            crate::engine_debug!("portal3d::PortalRenderer",
                "Disabled with {} targets in use, releasing", in_use);
        }
        self.pool.release_all();
        self.state = FrameState::Idle;
    }

    // ===== CONFIGURATION =====

    /// Set the display surface size used when the main camera has no target
    pub fn set_display_size(&mut self, size: PhysicalSize<u32>) {
        self.display_size = size;
    }

    /// Change the pool ceiling.
    ///
    /// # Errors
    ///
    /// `Error::InvalidConfiguration` if `max_texture_allocations` is 0.
    pub fn set_max_texture_allocations(&mut self, max_texture_allocations: usize) -> Result<()> {
        validate_allocations(max_texture_allocations)?;
        self.config.max_texture_allocations = max_texture_allocations;
        self.pool.set_max_allocations(max_texture_allocations);
        Ok(())
    }

    /// Change the recursion bound (applies from the next frame)
    pub fn set_max_recursion_depth(&mut self, max_recursion_depth: u32) {
        self.config.max_recursion_depth = max_recursion_depth;
    }

    // ===== ACCESSORS =====

    pub fn config(&self) -> &PortalRendererConfig {
        &self.config
    }

    pub fn main_camera(&self) -> CameraId {
        self.main_camera
    }

    /// Camera used for every portal view
    pub fn aux_camera(&self) -> &Camera {
        &self.aux_camera
    }

    pub fn pool(&self) -> &RenderTargetPool {
        &self.pool
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    pub fn display_size(&self) -> PhysicalSize<u32> {
        self.display_size
    }

    // ===== INTERNALS =====

    /// Camera output target size, else the display size
    fn viewport_size(&self, camera: &Camera) -> PhysicalSize<u32> {
        camera.target_size().unwrap_or(self.display_size)
    }

    fn reclaim_leaked_targets(&mut self) -> usize {
        let leaked = self.pool.in_use_count();
        if leaked > 0 {
            crate::engine_warn!("portal3d::PortalRenderer",
                "Previous frame never ended, reclaiming {} render targets", leaked);
            self.pool.release_all();
        }
        leaked
    }

    /// Resize the pool if `viewport` changed. Returns true on resize.
    fn adopt_viewport(&mut self, viewport: PhysicalSize<u32>) -> bool {
        if viewport == self.pool.size() {
            return false;
        }
        match self.pool.set_resolution(viewport) {
            Ok(()) => true,
            Err(err) => {
                crate::engine_warn!("portal3d::PortalRenderer",
                    "Viewport resize deferred: {}", err);
                false
            }
        }
    }
}

fn validate_allocations(max_texture_allocations: usize) -> Result<()> {
    if max_texture_allocations == 0 {
        return Err(Error::InvalidConfiguration(
            "max_texture_allocations must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "portal_renderer_tests.rs"]
mod tests;
