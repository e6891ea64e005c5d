//! Render target pool module
//!
//! Offscreen color + depth targets backing recursive portal views,
//! created on demand, reused across frames and recreated on resize.

mod render_target_pool;

pub use render_target_pool::RenderTargetPool;
