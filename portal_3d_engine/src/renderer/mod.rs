/// Renderer module - host backend abstraction and the portal renderer

mod portal_renderer;
mod render_target;
mod renderer;
#[cfg(test)]
pub(crate) mod mock_renderer;

pub use portal_renderer::{FrameReport, FrameState, PortalRenderer, PortalRendererConfig};
pub use render_target::{RenderTarget, RenderTargetDesc, TextureFormat};
pub use renderer::Renderer;
