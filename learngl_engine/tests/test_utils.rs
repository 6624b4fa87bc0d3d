#![allow(dead_code)]
//! Test utilities - a minimal in-memory GraphicsDevice for integration tests
//!
//! Integration tests only see the public API, so they cannot use the
//! crate's internal mock. `CountingDevice` hands out ids, rejects shader
//! sources without an entry point, and counts live objects.

use learngl_engine::learngl::{Error, GraphicsDevice, Result};
use learngl_engine::learngl::render::{
    ClearFlags, CullMode, DeviceStats, Framebuffer, FramebufferDesc, FramebufferHandle,
    PrimitiveTopology, ProgramHandle, ShaderHandle, ShaderStage, TextureDesc, TextureHandle,
    UniformValue, VertexArrayDesc, VertexArrayHandle,
};

#[derive(Default)]
pub struct CountingDevice {
    next_id: u32,
    pub live_shaders: u32,
    pub live_programs: u32,
    pub live_textures: u32,
    pub live_vertex_arrays: u32,
    pub current_program: Option<ProgramHandle>,
    pub uniforms: Vec<(String, UniformValue)>,
    pub stats: DeviceStats,
}

impl CountingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl GraphicsDevice for CountingDevice {
    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderHandle> {
        if !source.contains("void main") {
            return Err(Error::ShaderCompilation {
                stage,
                log: "0:1(1): error: no entry point".to_string(),
            });
        }
        self.live_shaders += 1;
        Ok(ShaderHandle::from_raw(self.allocate()))
    }

    fn link_program(&mut self, _shaders: &[ShaderHandle]) -> Result<ProgramHandle> {
        self.live_programs += 1;
        Ok(ProgramHandle::from_raw(self.allocate()))
    }

    fn delete_shader(&mut self, _shader: ShaderHandle) {
        self.live_shaders -= 1;
    }

    fn delete_program(&mut self, _program: ProgramHandle) {
        self.live_programs -= 1;
    }

    fn use_program(&mut self, program: Option<ProgramHandle>) {
        self.current_program = program;
    }

    fn set_uniform(&mut self, _program: ProgramHandle, name: &str, value: UniformValue) {
        self.uniforms.push((name.to_string(), value));
    }

    fn create_texture(&mut self, _desc: &TextureDesc) -> Result<TextureHandle> {
        self.live_textures += 1;
        Ok(TextureHandle::from_raw(self.allocate()))
    }

    fn bind_texture(&mut self, _unit: u32, _texture: Option<TextureHandle>) {}

    fn delete_texture(&mut self, _texture: TextureHandle) {
        self.live_textures -= 1;
    }

    fn create_vertex_array(&mut self, _desc: &VertexArrayDesc) -> Result<VertexArrayHandle> {
        self.live_vertex_arrays += 1;
        Ok(VertexArrayHandle::from_raw(self.allocate()))
    }

    fn delete_vertex_array(&mut self, _vertex_array: VertexArrayHandle) {
        self.live_vertex_arrays -= 1;
    }

    fn draw(&mut self, _vertex_array: VertexArrayHandle, topology: PrimitiveTopology, _first: u32, count: u32) {
        self.stats.draw_calls += 1;
        self.stats.primitives += topology.primitive_count(count);
    }

    fn draw_indexed(&mut self, _vertex_array: VertexArrayHandle, topology: PrimitiveTopology, count: u32) {
        self.stats.draw_calls += 1;
        self.stats.primitives += topology.primitive_count(count);
    }

    fn create_framebuffer(&mut self, desc: &FramebufferDesc) -> Result<Framebuffer> {
        Ok(Framebuffer {
            handle: FramebufferHandle::from_raw(self.allocate()),
            color_texture: None,
            width: desc.width,
            height: desc.height,
            samples: desc.samples,
        })
    }

    fn bind_framebuffer(&mut self, _framebuffer: Option<FramebufferHandle>) {}

    fn blit_framebuffer(&mut self, _src: FramebufferHandle, _dst: Option<FramebufferHandle>, _width: u32, _height: u32) {}

    fn delete_framebuffer(&mut self, _framebuffer: &Framebuffer) {}

    fn clear(&mut self, _flags: ClearFlags, _color: [f32; 4]) {}

    fn set_viewport(&mut self, _x: i32, _y: i32, _width: u32, _height: u32) {}

    fn set_depth_test(&mut self, _enabled: bool) {}

    fn set_face_culling(&mut self, _mode: CullMode) {}

    fn begin_frame(&mut self) {
        self.stats = DeviceStats::default();
    }

    fn stats(&self) -> DeviceStats {
        self.stats
    }
}
