/// Texture descriptors

/// Texel format of uploaded pixel data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    /// 8-bit RGB, 3 bytes per texel
    R8G8B8_UNORM,
    /// 8-bit RGBA, 4 bytes per texel
    R8G8B8A8_UNORM,
}

impl TextureFormat {
    /// Bytes per texel
    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            TextureFormat::R8G8B8_UNORM => 3,
            TextureFormat::R8G8B8A8_UNORM => 4,
        }
    }
}

/// Texture coordinate wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureWrap {
    /// Tile the image
    #[default]
    Repeat,
    /// Clamp coordinates to the edge texels
    ClampToEdge,
}

/// Texture sampling filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureFilter {
    /// Nearest texel
    Nearest,
    /// Bilinear (trilinear when mipmapped)
    #[default]
    Linear,
}

/// Descriptor for creating a 2D texture
#[derive(Debug, Clone)]
pub struct TextureDesc<'a> {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel format of `data`
    pub format: TextureFormat,
    /// Row-major pixel data, or None to allocate uninitialized storage
    pub data: Option<&'a [u8]>,
    /// Wrapping on both axes
    pub wrap: TextureWrap,
    /// Minification and magnification filter
    pub filter: TextureFilter,
    /// Generate a full mipmap chain after upload
    pub generate_mipmaps: bool,
}

impl<'a> TextureDesc<'a> {
    /// Mipmapped, repeating, linearly filtered texture from pixel data
    pub fn from_pixels(width: u32, height: u32, format: TextureFormat, data: &'a [u8]) -> Self {
        Self {
            width,
            height,
            format,
            data: Some(data),
            wrap: TextureWrap::Repeat,
            filter: TextureFilter::Linear,
            generate_mipmaps: true,
        }
    }

    /// Expected byte length of `data`
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.format.bytes_per_pixel() as usize
    }
}
