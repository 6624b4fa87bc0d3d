//! Render-loop context - camera, input and timing owned by one window.

mod render_context;

pub use render_context::{RenderContext, ControlsConfig};
