/// Renderer trait - the host rendering backend as seen by the portal core

use std::sync::Arc;
use crate::camera::Camera;
use crate::error::Result;
use super::render_target::{RenderTarget, RenderTargetDesc};

/// Host rendering backend
///
/// The portal core never submits draws itself: it asks the backend for
/// offscreen targets and for "render the scene from this camera into this
/// target". Culling, draw submission and shader execution stay on the
/// host side.
pub trait Renderer: Send + Sync {
    /// Create an offscreen color + depth render target
    ///
    /// # Errors
    ///
    /// Backend failures (out of memory, device lost) are reported as
    /// `Error::BackendError` and abort the current frame's graph build.
    fn create_render_target(&mut self, desc: &RenderTargetDesc) -> Result<Arc<dyn RenderTarget>>;

    /// Render the scene as seen by `camera` into `target`
    ///
    /// The camera carries the view matrix, the (possibly oblique) projection
    /// matrix, the frustum and the culling mask to use.
    fn render_to_target(&mut self, camera: &Camera, target: &dyn RenderTarget) -> Result<()>;
}
