/*!
# LearnGL Engine - OpenGL Backend

OpenGL 3.3 core implementation of the `learngl_engine` device trait.

This crate creates the window and context with glutin/glutin-winit and
implements `GraphicsDevice` on top of glow. With the `gl-debug-output`
feature, driver debug messages are printed and counted.
*/

mod gl_format;
mod gl_graphics_device;
mod gl_window;
#[cfg(feature = "gl-debug-output")]
mod debug;

pub use gl_graphics_device::GlGraphicsDevice;
pub use gl_window::{GlWindow, GL_VERSION};

#[cfg(feature = "gl-debug-output")]
pub use debug::{
    DebugConfig, DebugSeverity, DebugStats, get_debug_stats, print_debug_stats_report,
};

use winit::event_loop::ActiveEventLoop;
use learngl_engine::learngl::Result;
use learngl_engine::learngl::render::DeviceConfig;

/// Create the window, its context and the device drawing into it
///
/// # Example
///
/// ```no_run
/// # use winit::event_loop::ActiveEventLoop;
/// # fn resumed(event_loop: &ActiveEventLoop) -> learngl_engine::learngl::Result<()> {
/// use learngl_engine::learngl::render::DeviceConfig;
///
/// let (window, device) = learngl_engine_renderer_gl::create(event_loop, &DeviceConfig::default())?;
/// # Ok(())
/// # }
/// ```
pub fn create(event_loop: &ActiveEventLoop, config: &DeviceConfig) -> Result<(GlWindow, GlGraphicsDevice)> {
    let (window, gl) = GlWindow::new(event_loop, config)?;
    #[allow(unused_mut)]
    let mut device = GlGraphicsDevice::new(gl);

    #[cfg(feature = "gl-debug-output")]
    if config.enable_debug_output {
        debug::install(device.gl_mut(), DebugConfig {
            severity: DebugSeverity::ErrorsAndWarnings,
            panic_on_error: false,
            enable_stats: true,
        });
    }

    Ok((window, device))
}
