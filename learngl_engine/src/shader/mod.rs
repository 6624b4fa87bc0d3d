//! Shader module - GLSL program wrapper.

mod shader_program;

pub use shader_program::ShaderProgram;
