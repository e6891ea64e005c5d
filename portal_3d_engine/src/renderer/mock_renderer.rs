/// Mock Renderer for unit tests (no GPU required)
///
/// Records every target creation and every render pass so that tests can
/// count recursive passes and inspect the cameras used.

use std::sync::Arc;
use glam::Mat4;
use crate::camera::{Camera, CameraId, RenderLayers};
use crate::error::Result;
use crate::engine_bail;
use super::{RenderTarget, RenderTargetDesc, Renderer, TextureFormat};

// ============================================================================
// Mock RenderTarget
// ============================================================================

#[derive(Debug)]
pub struct MockRenderTarget {
    pub desc: RenderTargetDesc,
    pub serial: u32,
}

impl RenderTarget for MockRenderTarget {
    fn width(&self) -> u32 {
        self.desc.width
    }

    fn height(&self) -> u32 {
        self.desc.height
    }

    fn color_format(&self) -> TextureFormat {
        self.desc.color_format
    }

    fn depth_format(&self) -> TextureFormat {
        self.desc.depth_format
    }
}

// ============================================================================
// Mock Renderer
// ============================================================================

/// One recorded `render_to_target` call
#[derive(Debug, Clone)]
pub struct RenderRecord {
    pub camera_id: CameraId,
    pub view: Mat4,
    pub projection: Mat4,
    pub culling_mask: RenderLayers,
    pub target_size: (u32, u32),
}

#[derive(Debug, Default)]
pub struct MockRenderer {
    pub created: Vec<RenderTargetDesc>,
    pub renders: Vec<RenderRecord>,
    /// When set, target creation fails once this many targets exist
    pub fail_after: Option<usize>,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_after(count: usize) -> Self {
        Self {
            fail_after: Some(count),
            ..Self::default()
        }
    }
}

impl Renderer for MockRenderer {
    fn create_render_target(&mut self, desc: &RenderTargetDesc) -> Result<Arc<dyn RenderTarget>> {
        if self.fail_after.is_some_and(|limit| self.created.len() >= limit) {
            engine_bail!("portal3d::mock", "create_render_target: device out of memory");
        }
        self.created.push(*desc);
        Ok(Arc::new(MockRenderTarget {
            desc: *desc,
            serial: self.created.len() as u32,
        }))
    }

    fn render_to_target(&mut self, camera: &Camera, target: &dyn RenderTarget) -> Result<()> {
        self.renders.push(RenderRecord {
            camera_id: camera.id(),
            view: *camera.view_matrix(),
            projection: *camera.projection_matrix(),
            culling_mask: camera.culling_mask(),
            target_size: (target.width(), target.height()),
        });
        Ok(())
    }
}
