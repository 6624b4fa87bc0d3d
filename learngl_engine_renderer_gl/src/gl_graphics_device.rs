/// OpenGL implementation of the GraphicsDevice trait
///
/// Wraps a `glow::Context` that is current on the calling thread.
/// GL object names travel through the engine as raw `u32` handles and
/// are turned back into glow's native types at each call.

use std::num::NonZeroU32;
use glow::HasContext;
use rustc_hash::FxHashMap;
use learngl_engine::learngl::{Error, Result};
use learngl_engine::learngl::render::{
    GraphicsDevice, DeviceStats, ClearFlags, CullMode, UniformValue,
    ShaderStage, ShaderHandle, ProgramHandle, TextureHandle, VertexArrayHandle,
    FramebufferHandle, TextureDesc, TextureWrap, TextureFilter, TextureFormat,
    VertexArrayDesc, PrimitiveTopology, Framebuffer, FramebufferDesc,
};
use learngl_engine::{engine_bail, engine_debug, engine_err, engine_info, engine_warn};
use crate::gl_format::*;

const SOURCE: &str = "learngl::gl";

/// Buffers owned by one vertex array
struct GlVertexArray {
    vao: glow::NativeVertexArray,
    vbo: glow::NativeBuffer,
    ebo: Option<glow::NativeBuffer>,
}

/// Attachments owned by one framebuffer
struct GlFramebuffer {
    color_renderbuffer: Option<glow::NativeRenderbuffer>,
    depth_stencil: Option<glow::NativeRenderbuffer>,
}

/// OpenGL device
pub struct GlGraphicsDevice {
    gl: glow::Context,
    /// Uniform locations per program, resolved once per name
    uniform_locations: FxHashMap<u32, FxHashMap<String, Option<glow::NativeUniformLocation>>>,
    vertex_arrays: FxHashMap<u32, GlVertexArray>,
    framebuffers: FxHashMap<u32, GlFramebuffer>,
    stats: DeviceStats,
}

fn native<T>(raw: u32, wrap: impl FnOnce(NonZeroU32) -> T) -> Option<T> {
    NonZeroU32::new(raw).map(wrap)
}

impl GlGraphicsDevice {
    /// Wrap a loaded context
    ///
    /// Sets the process-wide pixel store and multisample state the
    /// engine relies on and logs the driver version.
    pub fn new(gl: glow::Context) -> Self {
        unsafe {
            let version = gl.get_parameter_string(glow::VERSION);
            let renderer = gl.get_parameter_string(glow::RENDERER);
            engine_info!(SOURCE, "OpenGL {} on {}", version, renderer);

            // Image rows are tightly packed (RGB rows are not 4-byte aligned)
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.enable(glow::MULTISAMPLE);
        }

        Self {
            gl,
            uniform_locations: FxHashMap::default(),
            vertex_arrays: FxHashMap::default(),
            framebuffers: FxHashMap::default(),
            stats: DeviceStats::default(),
        }
    }

    /// Underlying glow context
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Mutable glow context (debug callback registration needs it)
    pub fn gl_mut(&mut self) -> &mut glow::Context {
        &mut self.gl
    }

    fn uniform_location(&mut self, program: ProgramHandle, name: &str) -> Option<glow::NativeUniformLocation> {
        let native_program = native(program.raw(), glow::NativeProgram)?;
        let locations = self.uniform_locations.entry(program.raw()).or_default();
        if let Some(location) = locations.get(name) {
            return location.clone();
        }
        let location = unsafe { self.gl.get_uniform_location(native_program, name) };
        if location.is_none() {
            engine_debug!(SOURCE, "Uniform '{}' is not active in program {}", name, program.raw());
        }
        locations.insert(name.to_string(), location.clone());
        location
    }

    unsafe fn create_renderbuffer(
        &self,
        samples: u32,
        internal_format: u32,
        width: i32,
        height: i32,
    ) -> Result<glow::NativeRenderbuffer> {
        let renderbuffer = self.gl.create_renderbuffer()
            .map_err(|e| engine_err!(SOURCE, "glGenRenderbuffers failed: {}", e))?;
        self.gl.bind_renderbuffer(glow::RENDERBUFFER, Some(renderbuffer));
        if samples > 1 {
            self.gl.renderbuffer_storage_multisample(
                glow::RENDERBUFFER,
                samples as i32,
                internal_format,
                width,
                height,
            );
        } else {
            self.gl.renderbuffer_storage(glow::RENDERBUFFER, internal_format, width, height);
        }
        self.gl.bind_renderbuffer(glow::RENDERBUFFER, None);
        Ok(renderbuffer)
    }
}

impl GraphicsDevice for GlGraphicsDevice {
    // ===== SHADERS =====

    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderHandle> {
        unsafe {
            let shader = self.gl.create_shader(shader_stage_to_gl(stage))
                .map_err(|e| engine_err!(SOURCE, "glCreateShader({}) failed: {}", stage, e))?;
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);

            if !self.gl.get_shader_compile_status(shader) {
                let log = self.gl.get_shader_info_log(shader);
                self.gl.delete_shader(shader);
                return Err(Error::ShaderCompilation { stage, log });
            }

            Ok(ShaderHandle::from_raw(shader.0.get()))
        }
    }

    fn link_program(&mut self, shaders: &[ShaderHandle]) -> Result<ProgramHandle> {
        let natives: Vec<glow::NativeShader> = shaders
            .iter()
            .filter_map(|s| native(s.raw(), glow::NativeShader))
            .collect();
        if natives.len() != shaders.len() {
            engine_bail!(SOURCE, "Cannot link a program from a null shader handle");
        }

        unsafe {
            let program = self.gl.create_program()
                .map_err(|e| engine_err!(SOURCE, "glCreateProgram failed: {}", e))?;
            for shader in &natives {
                self.gl.attach_shader(program, *shader);
            }
            self.gl.link_program(program);
            for shader in &natives {
                self.gl.detach_shader(program, *shader);
            }

            if !self.gl.get_program_link_status(program) {
                let log = self.gl.get_program_info_log(program);
                self.gl.delete_program(program);
                return Err(Error::ProgramLink(log));
            }

            self.stats.programs += 1;
            Ok(ProgramHandle::from_raw(program.0.get()))
        }
    }

    fn delete_shader(&mut self, shader: ShaderHandle) {
        if let Some(shader) = native(shader.raw(), glow::NativeShader) {
            unsafe { self.gl.delete_shader(shader) };
        }
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        if let Some(native_program) = native(program.raw(), glow::NativeProgram) {
            unsafe { self.gl.delete_program(native_program) };
            self.uniform_locations.remove(&program.raw());
            self.stats.programs = self.stats.programs.saturating_sub(1);
        }
    }

    fn use_program(&mut self, program: Option<ProgramHandle>) {
        let program = program.and_then(|p| native(p.raw(), glow::NativeProgram));
        unsafe { self.gl.use_program(program) };
    }

    fn set_uniform(&mut self, program: ProgramHandle, name: &str, value: UniformValue) {
        let location = self.uniform_location(program, name);
        let location = location.as_ref();
        unsafe {
            match value {
                UniformValue::Int(v) => self.gl.uniform_1_i32(location, v),
                UniformValue::Float(v) => self.gl.uniform_1_f32(location, v),
                UniformValue::Vec3(v) => self.gl.uniform_3_f32(location, v.x, v.y, v.z),
                UniformValue::Mat3(m) => {
                    self.gl.uniform_matrix_3_f32_slice(location, false, &m.to_cols_array())
                }
                UniformValue::Mat4(m) => {
                    self.gl.uniform_matrix_4_f32_slice(location, false, &m.to_cols_array())
                }
            }
        }
    }

    // ===== TEXTURES =====

    fn create_texture(&mut self, desc: &TextureDesc) -> Result<TextureHandle> {
        if let Some(data) = desc.data {
            if data.len() < desc.expected_len() {
                engine_bail!(SOURCE, "Texture {}x{} needs {} bytes, got {}",
                    desc.width, desc.height, desc.expected_len(), data.len());
            }
        }

        let (internal_format, format) = texture_format_to_gl(desc.format);
        let wrap = texture_wrap_to_gl(desc.wrap);
        let (min_filter, mag_filter) = texture_filter_to_gl(desc.filter, desc.generate_mipmaps);

        unsafe {
            let texture = self.gl.create_texture()
                .map_err(|e| engine_err!(SOURCE, "glGenTextures failed: {}", e))?;
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                internal_format,
                desc.width as i32,
                desc.height as i32,
                0,
                format,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(desc.data),
            );
            if desc.generate_mipmaps {
                self.gl.generate_mipmap(glow::TEXTURE_2D);
            }
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, wrap);
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, wrap);
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, min_filter);
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, mag_filter);
            self.gl.bind_texture(glow::TEXTURE_2D, None);

            self.stats.textures += 1;
            Ok(TextureHandle::from_raw(texture.0.get()))
        }
    }

    fn bind_texture(&mut self, unit: u32, texture: Option<TextureHandle>) {
        let texture = texture.and_then(|t| native(t.raw(), glow::NativeTexture));
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, texture);
        }
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        if let Some(texture) = native(texture.raw(), glow::NativeTexture) {
            unsafe { self.gl.delete_texture(texture) };
            self.stats.textures = self.stats.textures.saturating_sub(1);
        }
    }

    // ===== GEOMETRY =====

    fn create_vertex_array(&mut self, desc: &VertexArrayDesc) -> Result<VertexArrayHandle> {
        let layout = desc.layout;
        if layout.stride == 0 || layout.attributes.is_empty() {
            engine_bail!(SOURCE, "Vertex layout has no attributes");
        }

        unsafe {
            let vao = self.gl.create_vertex_array()
                .map_err(|e| engine_err!(SOURCE, "glGenVertexArrays failed: {}", e))?;
            let vbo = match self.gl.create_buffer() {
                Ok(vbo) => vbo,
                Err(e) => {
                    self.gl.delete_vertex_array(vao);
                    engine_bail!(SOURCE, "glGenBuffers failed: {}", e);
                }
            };

            self.gl.bind_vertex_array(Some(vao));
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            self.gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, desc.vertices, glow::STATIC_DRAW);

            let ebo = match desc.indices {
                Some(indices) => match self.gl.create_buffer() {
                    Ok(ebo) => {
                        self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
                        self.gl.buffer_data_u8_slice(
                            glow::ELEMENT_ARRAY_BUFFER,
                            bytemuck::cast_slice(indices),
                            glow::STATIC_DRAW,
                        );
                        Some(ebo)
                    }
                    Err(e) => {
                        self.gl.bind_vertex_array(None);
                        self.gl.delete_buffer(vbo);
                        self.gl.delete_vertex_array(vao);
                        engine_bail!(SOURCE, "glGenBuffers failed: {}", e);
                    }
                },
                None => None,
            };

            for attribute in &layout.attributes {
                self.gl.enable_vertex_attrib_array(attribute.location);
                self.gl.vertex_attrib_pointer_f32(
                    attribute.location,
                    buffer_format_components(attribute.format),
                    glow::FLOAT,
                    false,
                    layout.stride as i32,
                    attribute.offset as i32,
                );
            }

            self.gl.bind_vertex_array(None);
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);

            let handle = VertexArrayHandle::from_raw(vao.0.get());
            self.vertex_arrays.insert(handle.raw(), GlVertexArray { vao, vbo, ebo });
            Ok(handle)
        }
    }

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        if let Some(owned) = self.vertex_arrays.remove(&vertex_array.raw()) {
            unsafe {
                self.gl.delete_vertex_array(owned.vao);
                self.gl.delete_buffer(owned.vbo);
                if let Some(ebo) = owned.ebo {
                    self.gl.delete_buffer(ebo);
                }
            }
        }
    }

    fn draw(&mut self, vertex_array: VertexArrayHandle, topology: PrimitiveTopology, first: u32, count: u32) {
        let Some(vao) = native(vertex_array.raw(), glow::NativeVertexArray) else {
            return;
        };
        unsafe {
            self.gl.bind_vertex_array(Some(vao));
            self.gl.draw_arrays(topology_to_gl(topology), first as i32, count as i32);
            self.gl.bind_vertex_array(None);
        }
        self.stats.draw_calls += 1;
        self.stats.primitives += topology.primitive_count(count);
    }

    fn draw_indexed(&mut self, vertex_array: VertexArrayHandle, topology: PrimitiveTopology, count: u32) {
        let Some(vao) = native(vertex_array.raw(), glow::NativeVertexArray) else {
            return;
        };
        unsafe {
            self.gl.bind_vertex_array(Some(vao));
            self.gl.draw_elements(topology_to_gl(topology), count as i32, glow::UNSIGNED_INT, 0);
            self.gl.bind_vertex_array(None);
        }
        self.stats.draw_calls += 1;
        self.stats.primitives += topology.primitive_count(count);
    }

    // ===== FRAMEBUFFERS =====

    fn create_framebuffer(&mut self, desc: &FramebufferDesc) -> Result<Framebuffer> {
        let width = desc.width as i32;
        let height = desc.height as i32;

        // Sampleable color attachment for single-sampled targets
        let color_texture = if desc.is_multisampled() {
            None
        } else {
            Some(self.create_texture(&TextureDesc {
                width: desc.width,
                height: desc.height,
                format: TextureFormat::R8G8B8A8_UNORM,
                data: None,
                wrap: TextureWrap::ClampToEdge,
                filter: TextureFilter::Linear,
                generate_mipmaps: false,
            })?)
        };

        unsafe {
            let framebuffer = match self.gl.create_framebuffer() {
                Ok(framebuffer) => framebuffer,
                Err(e) => {
                    if let Some(texture) = color_texture {
                        self.delete_texture(texture);
                    }
                    engine_bail!(SOURCE, "glGenFramebuffers failed: {}", e);
                }
            };
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, Some(framebuffer));

            let mut owned = GlFramebuffer { color_renderbuffer: None, depth_stencil: None };
            let attachments = (|| -> Result<()> {
                match color_texture.and_then(|t| native(t.raw(), glow::NativeTexture)) {
                    Some(texture) => self.gl.framebuffer_texture_2d(
                        glow::FRAMEBUFFER,
                        glow::COLOR_ATTACHMENT0,
                        glow::TEXTURE_2D,
                        Some(texture),
                        0,
                    ),
                    None => {
                        let color = self.create_renderbuffer(desc.samples, glow::RGBA8, width, height)?;
                        self.gl.framebuffer_renderbuffer(
                            glow::FRAMEBUFFER,
                            glow::COLOR_ATTACHMENT0,
                            glow::RENDERBUFFER,
                            Some(color),
                        );
                        owned.color_renderbuffer = Some(color);
                    }
                }
                if desc.depth_stencil {
                    let depth = self.create_renderbuffer(desc.samples, glow::DEPTH24_STENCIL8, width, height)?;
                    self.gl.framebuffer_renderbuffer(
                        glow::FRAMEBUFFER,
                        glow::DEPTH_STENCIL_ATTACHMENT,
                        glow::RENDERBUFFER,
                        Some(depth),
                    );
                    owned.depth_stencil = Some(depth);
                }
                Ok(())
            })();

            let status = self.gl.check_framebuffer_status(glow::FRAMEBUFFER);
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, None);

            let failure = match attachments {
                Err(err) => Some(err),
                Ok(()) if status != glow::FRAMEBUFFER_COMPLETE => {
                    let name = framebuffer_status_name(status);
                    engine_warn!(SOURCE, "Framebuffer {}x{} ({} samples) incomplete: {}",
                        desc.width, desc.height, desc.samples, name);
                    Some(Error::IncompleteFramebuffer(name.to_string()))
                }
                Ok(()) => None,
            };

            if let Some(err) = failure {
                self.gl.delete_framebuffer(framebuffer);
                if let Some(renderbuffer) = owned.color_renderbuffer {
                    self.gl.delete_renderbuffer(renderbuffer);
                }
                if let Some(renderbuffer) = owned.depth_stencil {
                    self.gl.delete_renderbuffer(renderbuffer);
                }
                if let Some(texture) = color_texture {
                    self.delete_texture(texture);
                }
                return Err(err);
            }

            let handle = FramebufferHandle::from_raw(framebuffer.0.get());
            self.framebuffers.insert(handle.raw(), owned);
            engine_debug!(SOURCE, "Framebuffer {} created ({}x{}, {} samples)",
                handle.raw(), desc.width, desc.height, desc.samples);

            Ok(Framebuffer {
                handle,
                color_texture,
                width: desc.width,
                height: desc.height,
                samples: desc.samples,
            })
        }
    }

    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferHandle>) {
        let framebuffer = framebuffer.and_then(|f| native(f.raw(), glow::NativeFramebuffer));
        unsafe { self.gl.bind_framebuffer(glow::FRAMEBUFFER, framebuffer) };
    }

    fn blit_framebuffer(&mut self, src: FramebufferHandle, dst: Option<FramebufferHandle>, width: u32, height: u32) {
        let src = native(src.raw(), glow::NativeFramebuffer);
        let dst = dst.and_then(|f| native(f.raw(), glow::NativeFramebuffer));
        let (w, h) = (width as i32, height as i32);
        unsafe {
            self.gl.bind_framebuffer(glow::READ_FRAMEBUFFER, src);
            self.gl.bind_framebuffer(glow::DRAW_FRAMEBUFFER, dst);
            self.gl.blit_framebuffer(0, 0, w, h, 0, 0, w, h, glow::COLOR_BUFFER_BIT, glow::NEAREST);
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, dst);
        }
    }

    fn delete_framebuffer(&mut self, framebuffer: &Framebuffer) {
        if let Some(owned) = self.framebuffers.remove(&framebuffer.handle.raw()) {
            unsafe {
                if let Some(native_fb) = native(framebuffer.handle.raw(), glow::NativeFramebuffer) {
                    self.gl.delete_framebuffer(native_fb);
                }
                if let Some(renderbuffer) = owned.color_renderbuffer {
                    self.gl.delete_renderbuffer(renderbuffer);
                }
                if let Some(renderbuffer) = owned.depth_stencil {
                    self.gl.delete_renderbuffer(renderbuffer);
                }
            }
            if let Some(texture) = framebuffer.color_texture {
                self.delete_texture(texture);
            }
        }
    }

    // ===== STATE =====

    fn clear(&mut self, flags: ClearFlags, color: [f32; 4]) {
        unsafe {
            if flags.contains(ClearFlags::COLOR) {
                self.gl.clear_color(color[0], color[1], color[2], color[3]);
            }
            self.gl.clear(clear_flags_to_gl(flags));
        }
    }

    fn set_viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        unsafe { self.gl.viewport(x, y, width as i32, height as i32) };
    }

    fn set_depth_test(&mut self, enabled: bool) {
        unsafe {
            if enabled {
                self.gl.enable(glow::DEPTH_TEST);
            } else {
                self.gl.disable(glow::DEPTH_TEST);
            }
        }
    }

    fn set_face_culling(&mut self, mode: CullMode) {
        unsafe {
            match cull_mode_to_gl(mode) {
                Some(face) => {
                    self.gl.enable(glow::CULL_FACE);
                    self.gl.cull_face(face);
                }
                None => self.gl.disable(glow::CULL_FACE),
            }
        }
    }

    // ===== FRAME =====

    fn begin_frame(&mut self) {
        self.stats.draw_calls = 0;
        self.stats.primitives = 0;
    }

    fn stats(&self) -> DeviceStats {
        self.stats
    }
}

impl Drop for GlGraphicsDevice {
    fn drop(&mut self) {
        if !self.vertex_arrays.is_empty() || !self.framebuffers.is_empty() {
            engine_warn!(SOURCE, "Device dropped with {} vertex array(s) and {} framebuffer(s) alive",
                self.vertex_arrays.len(), self.framebuffers.len());
        }
        unsafe {
            for (_, owned) in self.vertex_arrays.drain() {
                self.gl.delete_vertex_array(owned.vao);
                self.gl.delete_buffer(owned.vbo);
                if let Some(ebo) = owned.ebo {
                    self.gl.delete_buffer(ebo);
                }
            }
        }
    }
}
