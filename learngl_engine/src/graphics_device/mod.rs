/// Graphics device module - the seam between the engine and a rasterization backend

// Module declarations
pub mod graphics_device;
pub mod handle;
pub mod shader;
pub mod texture;
pub mod buffer;
pub mod frame_buffer;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use handle::*;
pub use shader::*;
pub use texture::*;
pub use buffer::*;
pub use frame_buffer::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
