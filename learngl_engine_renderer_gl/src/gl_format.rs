//! Engine enums to OpenGL enums
//!
//! Pure mapping functions, testable without a context.

use learngl_engine::learngl::render::{
    BufferFormat, ClearFlags, CullMode, PrimitiveTopology, ShaderStage, TextureFilter,
    TextureFormat, TextureWrap,
};

/// Shader object type for a stage
pub(crate) fn shader_stage_to_gl(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        ShaderStage::Geometry => glow::GEOMETRY_SHADER,
    }
}

/// (internal format, pixel format) of an 8-bit texture
pub(crate) fn texture_format_to_gl(format: TextureFormat) -> (i32, u32) {
    match format {
        TextureFormat::R8G8B8_UNORM => (glow::RGB8 as i32, glow::RGB),
        TextureFormat::R8G8B8A8_UNORM => (glow::RGBA8 as i32, glow::RGBA),
    }
}

pub(crate) fn texture_wrap_to_gl(wrap: TextureWrap) -> i32 {
    match wrap {
        TextureWrap::Repeat => glow::REPEAT as i32,
        TextureWrap::ClampToEdge => glow::CLAMP_TO_EDGE as i32,
    }
}

/// (min filter, mag filter)
pub(crate) fn texture_filter_to_gl(filter: TextureFilter, mipmapped: bool) -> (i32, i32) {
    match (filter, mipmapped) {
        (TextureFilter::Linear, true) => (glow::LINEAR_MIPMAP_LINEAR as i32, glow::LINEAR as i32),
        (TextureFilter::Linear, false) => (glow::LINEAR as i32, glow::LINEAR as i32),
        (TextureFilter::Nearest, true) => (glow::NEAREST_MIPMAP_NEAREST as i32, glow::NEAREST as i32),
        (TextureFilter::Nearest, false) => (glow::NEAREST as i32, glow::NEAREST as i32),
    }
}

/// Component count of a float vertex attribute
pub(crate) fn buffer_format_components(format: BufferFormat) -> i32 {
    format.component_count() as i32
}

pub(crate) fn topology_to_gl(topology: PrimitiveTopology) -> u32 {
    match topology {
        PrimitiveTopology::TriangleList => glow::TRIANGLES,
        PrimitiveTopology::PointList => glow::POINTS,
    }
}

pub(crate) fn clear_flags_to_gl(flags: ClearFlags) -> u32 {
    let mut mask = 0;
    if flags.contains(ClearFlags::COLOR) {
        mask |= glow::COLOR_BUFFER_BIT;
    }
    if flags.contains(ClearFlags::DEPTH) {
        mask |= glow::DEPTH_BUFFER_BIT;
    }
    if flags.contains(ClearFlags::STENCIL) {
        mask |= glow::STENCIL_BUFFER_BIT;
    }
    mask
}

/// Face to cull, None when culling is disabled
pub(crate) fn cull_mode_to_gl(mode: CullMode) -> Option<u32> {
    match mode {
        CullMode::None => None,
        CullMode::Front => Some(glow::FRONT),
        CullMode::Back => Some(glow::BACK),
    }
}

/// Readable name of a glCheckFramebufferStatus result
pub(crate) fn framebuffer_status_name(status: u32) -> &'static str {
    match status {
        glow::FRAMEBUFFER_COMPLETE => "FRAMEBUFFER_COMPLETE",
        glow::FRAMEBUFFER_UNDEFINED => "FRAMEBUFFER_UNDEFINED",
        glow::FRAMEBUFFER_INCOMPLETE_ATTACHMENT => "FRAMEBUFFER_INCOMPLETE_ATTACHMENT",
        glow::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT => "FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT",
        glow::FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER => "FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER",
        glow::FRAMEBUFFER_INCOMPLETE_READ_BUFFER => "FRAMEBUFFER_INCOMPLETE_READ_BUFFER",
        glow::FRAMEBUFFER_UNSUPPORTED => "FRAMEBUFFER_UNSUPPORTED",
        glow::FRAMEBUFFER_INCOMPLETE_MULTISAMPLE => "FRAMEBUFFER_INCOMPLETE_MULTISAMPLE",
        glow::FRAMEBUFFER_INCOMPLETE_LAYER_TARGETS => "FRAMEBUFFER_INCOMPLETE_LAYER_TARGETS",
        _ => "UNKNOWN_FRAMEBUFFER_STATUS",
    }
}

#[cfg(test)]
#[path = "gl_format_tests.rs"]
mod tests;
