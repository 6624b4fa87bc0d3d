/// Window + OpenGL context creation
///
/// Builds a non-resizable winit window with a current core-profile
/// context through glutin-winit, and owns the surface buffer swaps.

use std::ffi::CStr;
use std::num::NonZeroU32;
use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext,
    PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow as _};
use raw_window_handle::HasWindowHandle;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::{CursorGrabMode, Window};
use learngl_engine::learngl::{Error, Result};
use learngl_engine::learngl::render::DeviceConfig;
use learngl_engine::{engine_debug, engine_info, engine_warn};

const SOURCE: &str = "learngl::gl::window";

/// OpenGL core profile version requested for the context
pub const GL_VERSION: (u8, u8) = (3, 3);

fn init_failed(what: &str, err: impl std::fmt::Display) -> Error {
    Error::InitializationFailed(format!("{}: {}", what, err))
}

/// Pick the config with the most samples, never above the requested count
pub(crate) fn pick_config<C: GlConfig>(configs: impl Iterator<Item = C>, samples: u8) -> Option<C> {
    configs
        .filter(|c| c.num_samples() <= samples.max(1))
        .max_by_key(|c| c.num_samples())
}

/// Cursor grab modes, tried in order
pub(crate) const CURSOR_GRAB_ORDER: [CursorGrabMode; 2] = [CursorGrabMode::Locked, CursorGrabMode::Confined];

/// Apply the first grab mode `try_grab` accepts
pub(crate) fn grab_cursor<E>(
    modes: impl IntoIterator<Item = CursorGrabMode>,
    mut try_grab: impl FnMut(CursorGrabMode) -> std::result::Result<(), E>,
) -> Option<CursorGrabMode> {
    modes.into_iter().find(|mode| try_grab(*mode).is_ok())
}

/// Window with a current GL context
///
/// Fields drop in declaration order: the context and surface are
/// released before the window they render to.
pub struct GlWindow {
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    window: Window,
}

impl GlWindow {
    /// Create the window and make its context current
    ///
    /// Returns the window together with a glow context loaded from it.
    ///
    /// # Errors
    ///
    /// `Error::InitializationFailed` when no matching framebuffer config
    /// exists or the window, context or surface cannot be created.
    pub fn new(event_loop: &ActiveEventLoop, config: &DeviceConfig) -> Result<(Self, glow::Context)> {
        let window_attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_resizable(false);

        let mut template = ConfigTemplateBuilder::new().with_depth_size(24).with_stencil_size(8);
        if config.samples > 1 {
            template = template.with_multisampling(config.samples);
        }

        let requested_samples = config.samples;
        let mut picked = true;
        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(window_attributes))
            .build(event_loop, template, |configs| {
                // glutin only calls the picker with at least one config
                let configs: Vec<Config> = configs.collect();
                pick_config(configs.iter().cloned(), requested_samples).unwrap_or_else(|| {
                    picked = false;
                    configs[0].clone()
                })
            })
            .map_err(|e| init_failed("Unable to create window", e))?;

        if !picked {
            engine_warn!(SOURCE, "No config with at most {} samples, using the first offered", requested_samples);
        }

        let window = window.ok_or_else(|| Error::InitializationFailed("Window was not created".to_string()))?;
        engine_debug!(SOURCE, "Framebuffer config: {} samples, depth {}, stencil {}",
            gl_config.num_samples(), gl_config.depth_size(), gl_config.stencil_size());

        let raw_window_handle = window
            .window_handle()
            .map_err(|e| init_failed("Window handle unavailable", e))?
            .as_raw();
        let gl_display = gl_config.display();
        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(GL_VERSION.0, GL_VERSION.1))))
            .with_debug(config.enable_debug_output)
            .build(Some(raw_window_handle));

        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .map_err(|e| init_failed("Unable to create OpenGL context", e))?;

        let surface_attributes = window
            .build_surface_attributes(SurfaceAttributesBuilder::<WindowSurface>::new())
            .map_err(|e| init_failed("Unable to describe window surface", e))?;
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
            .map_err(|e| init_failed("Unable to create window surface", e))?;

        let context = not_current
            .make_current(&surface)
            .map_err(|e| init_failed("Unable to make context current", e))?;

        let interval = if config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            engine_warn!(SOURCE, "Unable to set swap interval: {}", e);
        }

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name: &CStr| gl_display.get_proc_address(name))
        };

        engine_info!(SOURCE, "Window '{}' {}x{} created", config.title, config.width, config.height);

        Ok((Self { context, surface, window }, gl))
    }

    // ===== GETTERS =====

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Drawable size in physical pixels
    pub fn framebuffer_size(&self) -> (u32, u32) {
        let PhysicalSize { width, height } = self.window.inner_size();
        (width.max(1), height.max(1))
    }

    // ===== OPERATIONS =====

    /// Hide the cursor and grab it for looking around
    ///
    /// Locking keeps raw pointer motion unbounded; platforms that cannot
    /// lock fall back to confining. Returns the mode applied, if any.
    pub fn capture_cursor(&self) -> Option<CursorGrabMode> {
        let mode = grab_cursor(CURSOR_GRAB_ORDER, |mode| self.window.set_cursor_grab(mode));
        match mode {
            Some(mode) => engine_debug!(SOURCE, "Cursor grabbed ({:?})", mode),
            None => engine_warn!(SOURCE, "Cursor grab unavailable"),
        }
        self.window.set_cursor_visible(false);
        mode
    }

    /// Show the cursor and release any grab
    pub fn release_cursor(&self) {
        let _ = self.window.set_cursor_grab(CursorGrabMode::None);
        self.window.set_cursor_visible(true);
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    /// Present the back buffer
    pub fn swap_buffers(&self) -> Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .map_err(|e| Error::BackendError(format!("Buffer swap failed: {}", e)))
    }
}

#[cfg(test)]
#[path = "gl_window_tests.rs"]
mod tests;
