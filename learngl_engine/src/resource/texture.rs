//! Material textures and the per-model texture cache.
//!
//! Files are decoded with the `image` crate into 8-bit RGB and uploaded
//! with a full mipmap chain, repeat wrapping and trilinear filtering.
//! The cache is keyed by the source path string so a file referenced
//! by several meshes is decoded and uploaded once.

use std::path::Path;
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::graphics_device::{GraphicsDevice, TextureDesc, TextureFormat, TextureHandle};
use crate::{engine_debug, engine_error};

/// Role a texture plays in a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    Diffuse,
    Specular,
    Emission,
}

impl TextureKind {
    /// Sampler name prefix inside the `material` uniform struct
    pub fn uniform_prefix(&self) -> &'static str {
        match self {
            TextureKind::Diffuse => "texture_diffuse",
            TextureKind::Specular => "texture_specular",
            TextureKind::Emission => "texture_emission",
        }
    }
}

/// Uploaded texture
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub handle: TextureHandle,
    pub kind: TextureKind,
    /// Source path string (cache key)
    pub path: String,
    pub width: u32,
    pub height: u32,
}

/// Textures uploaded so far, keyed by source path
#[derive(Debug, Default)]
pub struct TextureCache {
    textures: FxHashMap<String, Texture>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode and upload `path`, or reuse the texture already uploaded
    /// for the same path string
    ///
    /// # Errors
    ///
    /// `Error::Io` when the file cannot be opened or decoded.
    pub fn load(
        &mut self,
        device: &mut dyn GraphicsDevice,
        path: impl AsRef<Path>,
        kind: TextureKind,
    ) -> Result<Texture> {
        let path = path.as_ref();
        let key = path.display().to_string();
        if let Some(texture) = self.textures.get(&key) {
            return Ok(Texture { kind, ..texture.clone() });
        }

        let image = image::open(path)
            .map_err(|err| {
                engine_error!("learngl::TextureCache", "Failed to load texture '{}': {}", key, err);
                Error::io(path, err)
            })?
            .to_rgb8();
        let (width, height) = image.dimensions();
        self.insert_pixels(device, &key, width, height, image.as_raw(), kind)
    }

    /// Upload already decoded RGB8 pixels under `key`, or reuse the
    /// texture already stored under it
    pub fn insert_pixels(
        &mut self,
        device: &mut dyn GraphicsDevice,
        key: &str,
        width: u32,
        height: u32,
        pixels: &[u8],
        kind: TextureKind,
    ) -> Result<Texture> {
        if let Some(texture) = self.textures.get(key) {
            return Ok(Texture { kind, ..texture.clone() });
        }

        let desc = TextureDesc::from_pixels(width, height, TextureFormat::R8G8B8_UNORM, pixels);
        if pixels.len() < desc.expected_len() {
            return Err(Error::InvalidResource(format!(
                "texture '{}': {} bytes for {}x{} RGB pixels", key, pixels.len(), width, height
            )));
        }
        let handle = device.create_texture(&desc)?;
        engine_debug!("learngl::TextureCache", "Uploaded '{}' ({}x{})", key, width, height);

        let texture = Texture {
            handle,
            kind,
            path: key.to_string(),
            width,
            height,
        };
        self.textures.insert(key.to_string(), texture.clone());
        Ok(texture)
    }

    pub fn get(&self, key: &str) -> Option<&Texture> {
        self.textures.get(key)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Delete every cached texture
    pub fn release(&mut self, device: &mut dyn GraphicsDevice) {
        for (_, texture) in self.textures.drain() {
            device.delete_texture(texture.handle);
        }
    }
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
