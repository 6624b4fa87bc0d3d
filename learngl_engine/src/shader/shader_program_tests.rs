//! Unit tests for ShaderProgram
//!
//! Uses MockGraphicsDevice: no GPU required.

use std::fs;
use std::path::PathBuf;
use glam::{Mat4, Vec3};
use crate::error::Error;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
use crate::graphics_device::{ShaderStage, UniformValue};
use super::*;

const VERTEX: &str = "#version 330 core\nlayout (location = 0) in vec3 aPos;\nvoid main() { gl_Position = vec4(aPos, 1.0); }\n";
const FRAGMENT: &str = "#version 330 core\nout vec4 FragColor;\nvoid main() { FragColor = vec4(1.0); }\n";
const GEOMETRY: &str = "#version 330 core\nlayout (points) in;\nlayout (points, max_vertices = 1) out;\nvoid main() { EmitVertex(); }\n";
const BROKEN: &str = "#version 330 core\nout vec4 FragColor;\nvoid mian( { }\n";

/// Writes `contents` into a per-test file under the system temp directory
fn temp_source(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("learngl_shader_tests_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

// ============================================================================
// CONSTRUCTION FROM SOURCES
// ============================================================================

#[test]
fn test_from_sources_links_and_deletes_stages() {
    let mut device = MockGraphicsDevice::new();
    let program = ShaderProgram::from_sources(&mut device, VERTEX, FRAGMENT, None).unwrap();

    assert!(program.is_initialized());
    assert!(device.programs.contains(&program.handle().unwrap().raw()));
    assert!(device.shaders.is_empty());
    assert_eq!(device.calls_starting_with("compile_shader"), vec![
        "compile_shader vertex",
        "compile_shader fragment",
    ]);
    assert_eq!(device.calls_starting_with("delete_shader").len(), 2);
}

#[test]
fn test_geometry_stage_is_compiled_and_linked() {
    let mut device = MockGraphicsDevice::new();
    let program = ShaderProgram::from_sources(&mut device, VERTEX, FRAGMENT, Some(GEOMETRY)).unwrap();

    assert!(program.is_initialized());
    assert!(device.calls.contains(&"compile_shader geometry".to_string()));
    assert!(device.calls.contains(&"link_program 3".to_string()));
    assert!(device.shaders.is_empty());
}

#[test]
fn test_invalid_fragment_returns_error_and_leaks_nothing() {
    let mut device = MockGraphicsDevice::new();
    let result = ShaderProgram::from_sources(&mut device, VERTEX, BROKEN, None);

    match result {
        Err(Error::ShaderCompilation { stage, log }) => {
            assert_eq!(stage, ShaderStage::Fragment);
            assert!(!log.is_empty());
        }
        other => panic!("expected a compilation error, got {:?}", other),
    }
    assert!(device.shaders.is_empty());
    assert!(device.programs.is_empty());
    assert!(device.calls_starting_with("link_program").is_empty());
}

#[test]
fn test_geometry_failure_releases_earlier_stages() {
    let mut device = MockGraphicsDevice::new();
    device.fail_stage = Some(ShaderStage::Geometry);

    let err = ShaderProgram::from_sources(&mut device, VERTEX, FRAGMENT, Some(GEOMETRY)).unwrap_err();
    assert!(matches!(err, Error::ShaderCompilation { stage: ShaderStage::Geometry, .. }));
    assert!(device.shaders.is_empty());
}

#[test]
fn test_link_failure_releases_everything() {
    let mut device = MockGraphicsDevice::new();
    device.fail_link = true;

    let err = ShaderProgram::from_sources(&mut device, VERTEX, FRAGMENT, None).unwrap_err();
    assert!(matches!(err, Error::ProgramLink(_)));
    assert!(device.shaders.is_empty());
    assert!(device.programs.is_empty());
}

// ============================================================================
// CONSTRUCTION FROM FILES
// ============================================================================

#[test]
fn test_from_files() {
    let vertex = temp_source("files_ok.vert", VERTEX);
    let fragment = temp_source("files_ok.frag", FRAGMENT);
    let geometry = temp_source("files_ok.geom", GEOMETRY);
    let mut device = MockGraphicsDevice::new();

    let program = ShaderProgram::from_files(&mut device, &vertex, &fragment, Some(geometry.as_path())).unwrap();
    assert!(program.is_initialized());
    assert!(device.calls.contains(&"link_program 3".to_string()));
}

#[test]
fn test_missing_file_names_path() {
    let vertex = temp_source("missing_case.vert", VERTEX);
    let missing = std::env::temp_dir().join("learngl_no_such_dir").join("missing.frag");
    let mut device = MockGraphicsDevice::new();

    let err = ShaderProgram::from_files(&mut device, &vertex, &missing, None).unwrap_err();
    match err {
        Error::Io { path, .. } => assert!(path.contains("missing.frag")),
        other => panic!("expected an io error, got {:?}", other),
    }
    assert!(device.calls.is_empty());
}

#[test]
fn test_broken_file_fails_to_compile() {
    let vertex = temp_source("broken_case.vert", VERTEX);
    let fragment = temp_source("broken_case.frag", BROKEN);
    let mut device = MockGraphicsDevice::new();

    let err = ShaderProgram::from_files(&mut device, &vertex, &fragment, None).unwrap_err();
    assert!(format!("{}", err).contains("fragment"));
}

// ============================================================================
// ACTIVATION, UNIFORMS, RELEASE
// ============================================================================

#[test]
fn test_activate_uses_program() {
    let mut device = MockGraphicsDevice::new();
    let program = ShaderProgram::from_sources(&mut device, VERTEX, FRAGMENT, None).unwrap();

    program.activate(&mut device);
    assert_eq!(device.current_program, program.handle());
}

#[test]
fn test_uniform_helpers() {
    let mut device = MockGraphicsDevice::new();
    let program = ShaderProgram::from_sources(&mut device, VERTEX, FRAGMENT, None).unwrap();
    let model = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));

    program.set_mat4(&mut device, "model", &model);
    program.set_mat3(&mut device, "normalMatrix", &glam::Mat3::IDENTITY);
    program.set_vec3(&mut device, "viewPos", Vec3::ONE);
    program.set_f32(&mut device, "material.shininess", 32.0);
    program.set_i32(&mut device, "screenTexture", 0);

    assert_eq!(device.uniform("model"), Some(UniformValue::Mat4(model)));
    assert_eq!(device.uniform("normalMatrix"), Some(UniformValue::Mat3(glam::Mat3::IDENTITY)));
    assert_eq!(device.uniform("viewPos"), Some(UniformValue::Vec3(Vec3::ONE)));
    assert_eq!(device.uniform("material.shininess"), Some(UniformValue::Float(32.0)));
    assert_eq!(device.uniform("screenTexture"), Some(UniformValue::Int(0)));
    assert!(device.uniforms.iter().all(|(p, _, _)| Some(*p) == program.handle()));
}

#[test]
fn test_released_program_is_inert() {
    let mut device = MockGraphicsDevice::new();
    let mut program = ShaderProgram::from_sources(&mut device, VERTEX, FRAGMENT, None).unwrap();

    program.release(&mut device);
    assert!(!program.is_initialized());
    assert!(device.programs.is_empty());

    let calls_before = device.calls.len();
    program.activate(&mut device);
    program.set_f32(&mut device, "time", 1.0);
    program.release(&mut device);
    assert_eq!(device.calls.len(), calls_before);
}
