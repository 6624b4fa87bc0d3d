/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Records every call as a short string, hands out increasing handle
/// ids and tracks which objects are still alive so tests can assert
/// that shader stages and programs are released. Failures can be
/// injected per shader stage, at link time, or on framebuffer creation.

use rustc_hash::{FxHashMap, FxHashSet};
use crate::engine_bail;
use crate::error::{Error, Result};
use crate::graphics_device::{
    GraphicsDevice, DeviceStats, ClearFlags, CullMode, UniformValue,
    ShaderStage, ShaderHandle, ProgramHandle, TextureHandle, VertexArrayHandle,
    FramebufferHandle, TextureDesc, VertexArrayDesc, PrimitiveTopology,
    Framebuffer, FramebufferDesc,
};

pub struct MockGraphicsDevice {
    /// Every call, in order
    pub calls: Vec<String>,
    /// Every uniform upload, in order
    pub uniforms: Vec<(ProgramHandle, String, UniformValue)>,
    /// Live shader stages
    pub shaders: FxHashMap<u32, ShaderStage>,
    /// Live programs
    pub programs: FxHashSet<u32>,
    /// Live textures with their size
    pub textures: FxHashMap<u32, (u32, u32)>,
    /// Live vertex arrays with their vertex count
    pub vertex_arrays: FxHashMap<u32, u32>,
    /// Live framebuffers
    pub framebuffers: FxHashSet<u32>,
    /// Texture bound on each unit
    pub bound_textures: FxHashMap<u32, TextureHandle>,
    /// Current program
    pub current_program: Option<ProgramHandle>,
    /// Reject compilation of this stage
    pub fail_stage: Option<ShaderStage>,
    /// Reject every link
    pub fail_link: bool,
    /// Report every framebuffer as incomplete
    pub fail_framebuffer: bool,
    next_id: u32,
    stats: DeviceStats,
}

impl MockGraphicsDevice {
    /// Create a new mock device
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            uniforms: Vec::new(),
            shaders: FxHashMap::default(),
            programs: FxHashSet::default(),
            textures: FxHashMap::default(),
            vertex_arrays: FxHashMap::default(),
            framebuffers: FxHashSet::default(),
            bound_textures: FxHashMap::default(),
            current_program: None,
            fail_stage: None,
            fail_link: false,
            fail_framebuffer: false,
            next_id: 0,
            stats: DeviceStats::default(),
        }
    }

    fn allocate(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    /// Calls whose name starts with `prefix`
    pub fn calls_starting_with(&self, prefix: &str) -> Vec<&str> {
        self.calls
            .iter()
            .filter(|c| c.starts_with(prefix))
            .map(String::as_str)
            .collect()
    }

    /// Last value uploaded to `name`
    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.uniforms
            .iter()
            .rev()
            .find(|(_, n, _)| n == name)
            .map(|(_, _, v)| *v)
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderHandle> {
        self.calls.push(format!("compile_shader {}", stage));
        if self.fail_stage == Some(stage) || !source.contains("void main") {
            return Err(Error::ShaderCompilation {
                stage,
                log: "0:1(1): error: mock compile failure".to_string(),
            });
        }
        let id = self.allocate();
        self.shaders.insert(id, stage);
        Ok(ShaderHandle::from_raw(id))
    }

    fn link_program(&mut self, shaders: &[ShaderHandle]) -> Result<ProgramHandle> {
        self.calls.push(format!("link_program {}", shaders.len()));
        if let Some(dead) = shaders.iter().find(|s| !self.shaders.contains_key(&s.raw())) {
            engine_bail!("learngl::mock", "link_program: shader {} is not alive", dead.raw());
        }
        if self.fail_link {
            return Err(Error::ProgramLink("error: mock link failure".to_string()));
        }
        let id = self.allocate();
        self.programs.insert(id);
        Ok(ProgramHandle::from_raw(id))
    }

    fn delete_shader(&mut self, shader: ShaderHandle) {
        self.calls.push(format!("delete_shader {}", shader.raw()));
        self.shaders.remove(&shader.raw());
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        self.calls.push(format!("delete_program {}", program.raw()));
        self.programs.remove(&program.raw());
        if self.current_program == Some(program) {
            self.current_program = None;
        }
    }

    fn use_program(&mut self, program: Option<ProgramHandle>) {
        self.calls.push(format!("use_program {:?}", program.map(|p| p.raw())));
        self.current_program = program;
    }

    fn set_uniform(&mut self, program: ProgramHandle, name: &str, value: UniformValue) {
        self.calls.push(format!("set_uniform {}", name));
        self.uniforms.push((program, name.to_string(), value));
    }

    fn create_texture(&mut self, desc: &TextureDesc) -> Result<TextureHandle> {
        self.calls.push(format!("create_texture {}x{}", desc.width, desc.height));
        if let Some(data) = desc.data {
            if data.len() < desc.expected_len() {
                engine_bail!("learngl::mock",
                    "create_texture: {} bytes for a {}x{} image", data.len(), desc.width, desc.height);
            }
        }
        let id = self.allocate();
        self.textures.insert(id, (desc.width, desc.height));
        Ok(TextureHandle::from_raw(id))
    }

    fn bind_texture(&mut self, unit: u32, texture: Option<TextureHandle>) {
        self.calls.push(format!("bind_texture {} {:?}", unit, texture.map(|t| t.raw())));
        match texture {
            Some(texture) => self.bound_textures.insert(unit, texture),
            None => self.bound_textures.remove(&unit),
        };
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        self.calls.push(format!("delete_texture {}", texture.raw()));
        self.textures.remove(&texture.raw());
    }

    fn create_vertex_array(&mut self, desc: &VertexArrayDesc) -> Result<VertexArrayHandle> {
        self.calls.push("create_vertex_array".to_string());
        let id = self.allocate();
        self.vertex_arrays.insert(id, desc.layout.vertex_count(desc.vertices.len()));
        Ok(VertexArrayHandle::from_raw(id))
    }

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        self.calls.push(format!("delete_vertex_array {}", vertex_array.raw()));
        self.vertex_arrays.remove(&vertex_array.raw());
    }

    fn draw(&mut self, vertex_array: VertexArrayHandle, topology: PrimitiveTopology, first: u32, count: u32) {
        self.calls.push(format!("draw {} {} {}", vertex_array.raw(), first, count));
        self.stats.draw_calls += 1;
        self.stats.primitives += topology.primitive_count(count);
    }

    fn draw_indexed(&mut self, vertex_array: VertexArrayHandle, topology: PrimitiveTopology, count: u32) {
        self.calls.push(format!("draw_indexed {} {}", vertex_array.raw(), count));
        self.stats.draw_calls += 1;
        self.stats.primitives += topology.primitive_count(count);
    }

    fn create_framebuffer(&mut self, desc: &FramebufferDesc) -> Result<Framebuffer> {
        self.calls.push(format!("create_framebuffer {}x{} x{}", desc.width, desc.height, desc.samples));
        if self.fail_framebuffer {
            return Err(Error::IncompleteFramebuffer("FRAMEBUFFER_INCOMPLETE_ATTACHMENT".to_string()));
        }
        let id = self.allocate();
        self.framebuffers.insert(id);
        let color_texture = if desc.is_multisampled() {
            None
        } else {
            let texture = self.allocate();
            self.textures.insert(texture, (desc.width, desc.height));
            Some(TextureHandle::from_raw(texture))
        };
        Ok(Framebuffer {
            handle: FramebufferHandle::from_raw(id),
            color_texture,
            width: desc.width,
            height: desc.height,
            samples: desc.samples,
        })
    }

    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferHandle>) {
        self.calls.push(format!("bind_framebuffer {:?}", framebuffer.map(|f| f.raw())));
    }

    fn blit_framebuffer(&mut self, src: FramebufferHandle, dst: Option<FramebufferHandle>, width: u32, height: u32) {
        self.calls.push(format!(
            "blit_framebuffer {} {:?} {}x{}", src.raw(), dst.map(|f| f.raw()), width, height
        ));
    }

    fn delete_framebuffer(&mut self, framebuffer: &Framebuffer) {
        self.calls.push(format!("delete_framebuffer {}", framebuffer.handle.raw()));
        self.framebuffers.remove(&framebuffer.handle.raw());
        if let Some(texture) = framebuffer.color_texture {
            self.textures.remove(&texture.raw());
        }
    }

    fn clear(&mut self, flags: ClearFlags, _color: [f32; 4]) {
        self.calls.push(format!("clear {:?}", flags));
    }

    fn set_viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.calls.push(format!("set_viewport {} {} {} {}", x, y, width, height));
    }

    fn set_depth_test(&mut self, enabled: bool) {
        self.calls.push(format!("set_depth_test {}", enabled));
    }

    fn set_face_culling(&mut self, mode: CullMode) {
        self.calls.push(format!("set_face_culling {:?}", mode));
    }

    fn begin_frame(&mut self) {
        self.calls.push("begin_frame".to_string());
        self.stats.draw_calls = 0;
        self.stats.primitives = 0;
    }

    fn stats(&self) -> DeviceStats {
        DeviceStats {
            programs: self.programs.len() as u32,
            textures: self.textures.len() as u32,
            ..self.stats
        }
    }
}
