/*!
# LearnGL Engine

Core types for the LearnGL demos: a perspective camera with eased zoom,
a GLSL program wrapper, and the textures/meshes/models the demos draw.

This crate is platform-agnostic. Every GPU call goes through the
`GraphicsDevice` trait; the OpenGL implementation lives in the
`learngl_engine_renderer_gl` crate.

## Architecture

- **Camera**: position + Euler angles to view/projection matrices
- **ShaderProgram**: compile and link vertex/fragment/geometry stages
- **GraphicsDevice**: backend trait (shaders, textures, vertex arrays, framebuffers, state)
- **RenderContext**: camera, input and frame clock owned by the render loop
- **Resources**: texture cache, meshes and models

All public types are re-exported through the `learngl` namespace module.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod camera;
pub mod context;
pub mod graphics_device;
pub mod input;
pub mod resource;
pub mod shader;
pub mod time;
pub mod utils;

// Main learngl namespace module
pub mod learngl {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging hub
    pub use crate::engine::Engine;

    // Backend trait
    pub use crate::graphics_device::GraphicsDevice;

    // Logging sub-module (types only; engine_* macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Render-loop context sub-module
    pub mod context {
        pub use crate::context::*;
        pub use crate::input::*;
        pub use crate::time::*;
    }

    // Graphics device sub-module with all descriptor types
    pub mod render {
        pub use crate::graphics_device::*;
        pub use crate::shader::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }
}

// Re-export math library at crate root
pub use glam;
