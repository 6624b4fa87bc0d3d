/// Offscreen framebuffer descriptors
///
/// A framebuffer has one color attachment and an optional combined
/// depth/stencil attachment. Single-sampled framebuffers expose their
/// color attachment as a texture so a later pass can sample it;
/// multisampled ones keep it in a renderbuffer and must be resolved
/// with `GraphicsDevice::blit_framebuffer`.

use crate::graphics_device::{FramebufferHandle, TextureHandle};

/// Descriptor for creating a framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramebufferDesc {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Samples per pixel (1 for a sampleable color texture)
    pub samples: u32,
    /// Attach a depth24/stencil8 renderbuffer
    pub depth_stencil: bool,
}

impl FramebufferDesc {
    /// Whether the color attachment is multisampled
    pub fn is_multisampled(&self) -> bool {
        self.samples > 1
    }
}

/// Created framebuffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    /// Framebuffer object
    pub handle: FramebufferHandle,
    /// Color texture (None when multisampled)
    pub color_texture: Option<TextureHandle>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Samples per pixel
    pub samples: u32,
}
