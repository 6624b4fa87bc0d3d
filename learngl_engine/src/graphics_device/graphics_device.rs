/// GraphicsDevice trait - the rasterization backend seam
///
/// The engine never talks to a graphics API directly. Everything that
/// touches the GPU (shader compilation, uniform upload, textures,
/// vertex arrays, framebuffers and fixed-function state) goes through
/// this trait. The OpenGL backend implements it on a current context;
/// unit tests implement it with a recording mock.

use bitflags::bitflags;
use glam::{Mat3, Mat4, Vec3};
use crate::error::Result;
use crate::graphics_device::{
    ShaderStage, ShaderHandle, ProgramHandle, TextureHandle, VertexArrayHandle,
    FramebufferHandle, TextureDesc, VertexArrayDesc, PrimitiveTopology,
    Framebuffer, FramebufferDesc,
};

/// Device configuration
///
/// Window and context parameters requested when the backend starts.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels (the window is not resizable)
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Multisample count for the default framebuffer (0 or 1 disables MSAA)
    pub samples: u8,
    /// Synchronize buffer swaps with the display refresh
    pub vsync: bool,
    /// Route driver debug messages to the engine logger
    pub enable_debug_output: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            title: "LearnGL".to_string(),
            width: 800,
            height: 600,
            samples: 4,
            vsync: true,
            enable_debug_output: cfg!(debug_assertions),
        }
    }
}

impl DeviceConfig {
    /// Width over height of the configured window
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Per-frame device statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceStats {
    /// Number of draw calls since the last `begin_frame`
    pub draw_calls: u32,
    /// Number of primitives (triangles or points) since the last `begin_frame`
    pub primitives: u32,
    /// Number of programs currently alive
    pub programs: u32,
    /// Number of textures currently alive
    pub textures: u32,
}

bitflags! {
    /// Buffers affected by `GraphicsDevice::clear`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearFlags: u32 {
        const COLOR = 0b001;
        const DEPTH = 0b010;
        const STENCIL = 0b100;
    }
}

/// Face culling mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CullMode {
    /// No culling
    #[default]
    None,
    /// Cull front faces
    Front,
    /// Cull back faces
    Back,
}

/// Value uploaded to a named uniform of the active program
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// int / sampler
    Int(i32),
    /// float
    Float(f32),
    /// vec3
    Vec3(Vec3),
    /// mat3 (column-major)
    Mat3(Mat3),
    /// mat4 (column-major)
    Mat4(Mat4),
}

/// Rasterization backend
///
/// All methods must be called from the thread owning the context.
/// Uniform and draw calls act on the currently bound program and
/// framebuffer, mirroring the state machine of the underlying API.
pub trait GraphicsDevice {
    // ===== SHADERS =====

    /// Compile one shader stage
    ///
    /// # Errors
    ///
    /// `Error::ShaderCompilation` carrying the stage and the driver info log.
    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderHandle>;

    /// Link compiled stages into a program
    ///
    /// The stages are attached for the link only; the caller still owns
    /// them and deletes them afterwards.
    ///
    /// # Errors
    ///
    /// `Error::ProgramLink` carrying the driver info log.
    fn link_program(&mut self, shaders: &[ShaderHandle]) -> Result<ProgramHandle>;

    /// Delete a shader stage object
    fn delete_shader(&mut self, shader: ShaderHandle);

    /// Delete a program object
    fn delete_program(&mut self, program: ProgramHandle);

    /// Make a program current (None unbinds)
    fn use_program(&mut self, program: Option<ProgramHandle>);

    /// Upload a uniform on the current program
    ///
    /// Unknown names are ignored, as the driver does for inactive uniforms.
    fn set_uniform(&mut self, program: ProgramHandle, name: &str, value: UniformValue);

    // ===== TEXTURES =====

    /// Create and upload a 2D texture
    fn create_texture(&mut self, desc: &TextureDesc) -> Result<TextureHandle>;

    /// Bind a texture on a texture unit (None unbinds)
    fn bind_texture(&mut self, unit: u32, texture: Option<TextureHandle>);

    /// Delete a texture object
    fn delete_texture(&mut self, texture: TextureHandle);

    // ===== GEOMETRY =====

    /// Upload vertices (and optional indices) into a new vertex array
    fn create_vertex_array(&mut self, desc: &VertexArrayDesc) -> Result<VertexArrayHandle>;

    /// Delete a vertex array and the buffers it owns
    fn delete_vertex_array(&mut self, vertex_array: VertexArrayHandle);

    /// Draw `count` vertices starting at `first` (non-indexed)
    fn draw(&mut self, vertex_array: VertexArrayHandle, topology: PrimitiveTopology, first: u32, count: u32);

    /// Draw `count` indices of the vertex array's index buffer
    fn draw_indexed(&mut self, vertex_array: VertexArrayHandle, topology: PrimitiveTopology, count: u32);

    // ===== FRAMEBUFFERS =====

    /// Create an offscreen framebuffer
    ///
    /// # Errors
    ///
    /// `Error::IncompleteFramebuffer` when the completeness check fails.
    fn create_framebuffer(&mut self, desc: &FramebufferDesc) -> Result<Framebuffer>;

    /// Bind a framebuffer for drawing (None binds the window)
    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferHandle>);

    /// Copy the color buffer of `src` into `dst` (None is the window),
    /// resolving multisampled sources
    fn blit_framebuffer(&mut self, src: FramebufferHandle, dst: Option<FramebufferHandle>, width: u32, height: u32);

    /// Delete a framebuffer and its attachments
    fn delete_framebuffer(&mut self, framebuffer: &Framebuffer);

    // ===== STATE =====

    /// Clear the bound framebuffer
    fn clear(&mut self, flags: ClearFlags, color: [f32; 4]);

    /// Set the viewport rectangle
    fn set_viewport(&mut self, x: i32, y: i32, width: u32, height: u32);

    /// Enable or disable depth testing
    fn set_depth_test(&mut self, enabled: bool);

    /// Select face culling
    fn set_face_culling(&mut self, mode: CullMode);

    // ===== FRAME =====

    /// Reset per-frame statistics
    fn begin_frame(&mut self);

    /// Statistics since the last `begin_frame`
    fn stats(&self) -> DeviceStats;
}

#[cfg(test)]
#[path = "graphics_device_tests.rs"]
mod tests;
