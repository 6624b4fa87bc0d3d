//! Camera module - perspective camera, zoom transition and movement flags.
//!
//! The engine does NOT store or manage cameras. They are tools provided
//! by the engine, owned and driven by the render loop.

mod camera;
mod movement;
mod zoom;

pub use camera::{Camera, DEFAULT_PITCH_LIMIT, REFERENCE_FOV};
pub use movement::Movement;
pub use zoom::FovZoom;
