/// ShaderProgram - compiled and linked GLSL program.
///
/// Built from a vertex and a fragment stage plus an optional geometry
/// stage, read from files or given in memory. Construction either
/// yields a ready program or an error carrying the compiler or linker
/// log; no GPU object outlives a failed construction. The per-stage
/// shader objects are deleted once the program is linked.
///
/// The program is owned by the scope that built it and is released
/// explicitly with `release`. A released program is uninitialized:
/// activating it or setting uniforms does nothing.

use std::fs;
use std::path::Path;
use glam::{Mat3, Mat4, Vec3};
use crate::error::{Error, Result};
use crate::graphics_device::{GraphicsDevice, ProgramHandle, ShaderStage, UniformValue};
use crate::{engine_debug, engine_error};

#[derive(Debug, PartialEq, Eq)]
pub struct ShaderProgram {
    program: Option<ProgramHandle>,
}

impl ShaderProgram {
    /// Read, compile and link shader files
    ///
    /// # Errors
    ///
    /// - `Error::Io` naming the first unreadable path
    /// - `Error::ShaderCompilation` for the first stage that fails
    /// - `Error::ProgramLink` if linking fails
    pub fn from_files(
        device: &mut dyn GraphicsDevice,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
        geometry_path: Option<&Path>,
    ) -> Result<Self> {
        let vertex = read_source(vertex_path.as_ref())?;
        let fragment = read_source(fragment_path.as_ref())?;
        let geometry = geometry_path.map(read_source).transpose()?;

        let origin = vertex_path.as_ref().display().to_string();
        Self::build(device, &vertex, &fragment, geometry.as_deref(), &origin)
    }

    /// Compile and link in-memory sources
    pub fn from_sources(
        device: &mut dyn GraphicsDevice,
        vertex: &str,
        fragment: &str,
        geometry: Option<&str>,
    ) -> Result<Self> {
        Self::build(device, vertex, fragment, geometry, "<memory>")
    }

    fn build(
        device: &mut dyn GraphicsDevice,
        vertex: &str,
        fragment: &str,
        geometry: Option<&str>,
        origin: &str,
    ) -> Result<Self> {
        let mut stages = vec![(ShaderStage::Vertex, vertex), (ShaderStage::Fragment, fragment)];
        if let Some(geometry) = geometry {
            stages.push((ShaderStage::Geometry, geometry));
        }

        let mut compiled = Vec::with_capacity(stages.len());
        for (stage, source) in stages {
            match device.compile_shader(stage, source) {
                Ok(shader) => compiled.push(shader),
                Err(err) => {
                    for shader in compiled {
                        device.delete_shader(shader);
                    }
                    engine_error!("learngl::ShaderProgram",
                        "Program '{}': {}", origin, err);
                    return Err(err);
                }
            }
        }

        let linked = device.link_program(&compiled);
        for shader in compiled {
            device.delete_shader(shader);
        }

        match linked {
            Ok(program) => {
                engine_debug!("learngl::ShaderProgram",
                    "Program '{}' linked (id {})", origin, program.raw());
                Ok(Self { program: Some(program) })
            }
            Err(err) => {
                engine_error!("learngl::ShaderProgram", "Program '{}': {}", origin, err);
                Err(err)
            }
        }
    }

    // ===== STATE =====

    /// Whether every stage compiled and the link succeeded
    pub fn is_initialized(&self) -> bool {
        self.program.is_some()
    }

    /// Program handle, None once released
    pub fn handle(&self) -> Option<ProgramHandle> {
        self.program
    }

    /// Make this program current for subsequent draws
    pub fn activate(&self, device: &mut dyn GraphicsDevice) {
        if let Some(program) = self.program {
            device.use_program(Some(program));
        }
    }

    /// Delete the program object
    pub fn release(&mut self, device: &mut dyn GraphicsDevice) {
        if let Some(program) = self.program.take() {
            device.delete_program(program);
        }
    }

    // ===== UNIFORMS =====

    /// Upload a uniform value by name
    pub fn set_uniform(&self, device: &mut dyn GraphicsDevice, name: &str, value: UniformValue) {
        if let Some(program) = self.program {
            device.set_uniform(program, name, value);
        }
    }

    pub fn set_mat4(&self, device: &mut dyn GraphicsDevice, name: &str, value: &Mat4) {
        self.set_uniform(device, name, UniformValue::Mat4(*value));
    }

    pub fn set_mat3(&self, device: &mut dyn GraphicsDevice, name: &str, value: &Mat3) {
        self.set_uniform(device, name, UniformValue::Mat3(*value));
    }

    pub fn set_vec3(&self, device: &mut dyn GraphicsDevice, name: &str, value: Vec3) {
        self.set_uniform(device, name, UniformValue::Vec3(value));
    }

    pub fn set_f32(&self, device: &mut dyn GraphicsDevice, name: &str, value: f32) {
        self.set_uniform(device, name, UniformValue::Float(value));
    }

    /// Also used for sampler units
    pub fn set_i32(&self, device: &mut dyn GraphicsDevice, name: &str, value: i32) {
        self.set_uniform(device, name, UniformValue::Int(value));
    }
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|err| {
        engine_error!("learngl::ShaderProgram",
            "Unable to read shader source '{}': {}", path.display(), err);
        Error::io(path, err)
    })
}

#[cfg(test)]
#[path = "shader_program_tests.rs"]
mod tests;
