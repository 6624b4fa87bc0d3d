//! Input module - held keys, pointer tracking and scroll accumulation.

mod input_state;

pub use input_state::{InputState, scroll_lines, PIXELS_PER_LINE};
