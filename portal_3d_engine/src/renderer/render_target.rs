/// RenderTarget trait - offscreen color + depth surface produced by the backend

/// Pixel format of a render target attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    R8G8B8A8_SRGB,
    R8G8B8A8_UNORM,
    B8G8R8A8_SRGB,
    B8G8R8A8_UNORM,
    D16_UNORM,
    D32_FLOAT,
    D24_UNORM_S8_UINT,
}

impl TextureFormat {
    /// Returns true for depth (and depth/stencil) formats
    pub fn is_depth(&self) -> bool {
        matches!(
            self,
            TextureFormat::D16_UNORM | TextureFormat::D32_FLOAT | TextureFormat::D24_UNORM_S8_UINT
        )
    }
}

/// Descriptor for creating an offscreen render target
///
/// Portal views always need a depth attachment so that the scene seen
/// through a portal is depth tested like the main view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTargetDesc {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Color attachment format
    pub color_format: TextureFormat,
    /// Depth attachment format
    pub depth_format: TextureFormat,
}

impl RenderTargetDesc {
    /// Color + depth target with the default portal formats
    pub fn color_depth(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            color_format: TextureFormat::R8G8B8A8_UNORM,
            depth_format: TextureFormat::D24_UNORM_S8_UINT,
        }
    }
}

/// Render target trait
///
/// Implemented by the host backend. The target is destroyed when the
/// last `Arc` is dropped.
pub trait RenderTarget: Send + Sync {
    /// Width of the render target in pixels
    fn width(&self) -> u32;

    /// Height of the render target in pixels
    fn height(&self) -> u32;

    /// Color attachment format
    fn color_format(&self) -> TextureFormat;

    /// Depth attachment format
    fn depth_format(&self) -> TextureFormat;
}
