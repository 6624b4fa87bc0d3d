//! Error types for the LearnGL engine
//!
//! This module defines the error types used throughout the engine,
//! including backend failures, shader compilation/linking, file access
//! and offscreen framebuffer setup.

use std::fmt;
use crate::graphics_device::ShaderStage;

/// Result type for LearnGL engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// LearnGL engine errors
///
/// Every variant is a setup-time failure: none of them is retried.
/// The entry point decides whether to abort (the demo logs the error
/// and exits with a non-zero status).
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (OpenGL driver, context, etc.)
    BackendError(String),

    /// Invalid resource (texture, mesh, program, etc.)
    InvalidResource(String),

    /// Initialization failed (window, GL context, function loading)
    InitializationFailed(String),

    /// A source or asset file could not be read
    Io {
        /// Path that was being read
        path: String,
        /// OS or decoder message
        message: String,
    },

    /// A shader stage failed to compile
    ShaderCompilation {
        /// Stage that failed
        stage: ShaderStage,
        /// Compiler info log
        log: String,
    },

    /// The program object failed to link
    ProgramLink(String),

    /// The offscreen framebuffer is not complete
    IncompleteFramebuffer(String),
}

impl Error {
    /// Build an `Io` error from a path and any displayable cause
    pub fn io(path: impl AsRef<std::path::Path>, cause: impl fmt::Display) -> Self {
        Error::Io {
            path: path.as_ref().display().to_string(),
            message: cause.to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::Io { path, message } => write!(f, "Unable to read '{}': {}", path, message),
            Error::ShaderCompilation { stage, log } => {
                write!(f, "Shader compilation failed ({} stage)\n{}", stage, log)
            }
            Error::ProgramLink(log) => write!(f, "Shader program link failed\n{}", log),
            Error::IncompleteFramebuffer(status) => {
                write!(f, "Framebuffer is not complete: {}", status)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
