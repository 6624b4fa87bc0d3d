//! Unit tests for error.rs
//!
//! Tests all Error variants and their implementations (Display, Debug, Clone, std::error::Error).

use crate::error::{Error, Result};
use crate::graphics_device::ShaderStage;

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("glCreateProgram returned 0".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Backend error"));
    assert!(display.contains("glCreateProgram returned 0"));
}

#[test]
fn test_initialization_failed_display() {
    let err = Error::InitializationFailed("Failed to create window".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Initialization failed"));
    assert!(display.contains("Failed to create window"));
}

#[test]
fn test_io_display_names_path() {
    let err = Error::io("glsl/vertex.glsl", "No such file or directory");
    let display = format!("{}", err);
    assert!(display.contains("glsl/vertex.glsl"));
    assert!(display.contains("No such file or directory"));
}

#[test]
fn test_shader_compilation_display_contains_stage_and_log() {
    let err = Error::ShaderCompilation {
        stage: ShaderStage::Fragment,
        log: "0:3(1): error: syntax error, unexpected '}'".to_string(),
    };
    let display = format!("{}", err);
    assert!(display.contains("Shader compilation failed"));
    assert!(display.contains("fragment"));
    assert!(display.contains("unexpected '}'"));
}

#[test]
fn test_program_link_display() {
    let err = Error::ProgramLink("error: vertex output 'uv' not read".to_string());
    let display = format!("{}", err);
    assert!(display.starts_with("Shader program link failed"));
    assert!(display.contains("vertex output 'uv'"));
}

#[test]
fn test_incomplete_framebuffer_display() {
    let err = Error::IncompleteFramebuffer("INCOMPLETE_ATTACHMENT".to_string());
    assert!(format!("{}", err).contains("Framebuffer is not complete"));
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::InvalidResource("mesh 3 out of range".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug() {
    let debug = format!("{:?}", Error::ProgramLink("x".to_string()));
    assert!(debug.contains("ProgramLink"));

    let debug = format!("{:?}", Error::ShaderCompilation {
        stage: ShaderStage::Geometry,
        log: String::new(),
    });
    assert!(debug.contains("ShaderCompilation"));
    assert!(debug.contains("Geometry"));
}

#[test]
fn test_error_clone() {
    let err1 = Error::io("assets/container.jpg", "unsupported format");
    let err2 = err1.clone();
    assert_eq!(format!("{}", err1), format!("{}", err2));
}

// ============================================================================
// RESULT TYPE TESTS
// ============================================================================

#[test]
fn test_error_propagation_with_question_mark() {
    fn inner() -> Result<i32> {
        Err(Error::IncompleteFramebuffer("MISSING_ATTACHMENT".to_string()))
    }

    fn outer() -> Result<i32> {
        inner()?;
        Ok(42)
    }

    assert!(matches!(outer(), Err(Error::IncompleteFramebuffer(_))));
}
