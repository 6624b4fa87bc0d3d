//! Small math helpers shared by the camera and the demos.

mod easing;

pub use easing::ease_out_quart;
