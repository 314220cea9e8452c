//! Windowed viewer for robonav maps.
//!
//! Draws a [`MapCanvas`] in a native window using:
//! - [`winit`] for window creation and input events
//! - [`softbuffer`] for CPU-based pixel presentation
//!
//! # Usage
//!
//! ```rust,no_run
//! use robonav_core::MapSpec;
//! use robonav_viewer::{MapCanvas, ViewerConfig, run_viewer};
//!
//! let spec = MapSpec::load("maps/RobotNav-test.txt").unwrap();
//! let canvas = MapCanvas::new(&spec).unwrap();
//! run_viewer(ViewerConfig::default(), canvas).unwrap();
//! ```

mod canvas;

use std::num::NonZeroU32;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

pub use canvas::{BACKGROUND, MapCanvas, Tile, trace_cells};

/// Errors raised while opening or drawing the viewer window.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window creation: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("drawing surface: {0}")]
    Surface(#[from] softbuffer::SoftBufferError),
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Window settings.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Window title.
    pub title: String,
    /// Initial tile size in logical pixels.
    pub cell_size: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Robot Navigation".into(),
            cell_size: 40,
        }
    }
}

/// Open a window showing `canvas` and block until it is closed with the
/// close button, Escape or `q`.
pub fn run_viewer(config: ViewerConfig, canvas: MapCanvas) -> Result<(), ViewerError> {
    let event_loop = EventLoop::new()?;
    let mut app = ViewerApp {
        config,
        canvas,
        state: None,
        error: None,
    };
    event_loop.run_app(&mut app)?;
    match app.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// ViewerApp (ApplicationHandler)
// ---------------------------------------------------------------------------

struct ViewerApp {
    config: ViewerConfig,
    canvas: MapCanvas,
    state: Option<ViewerState>,
    // first error hit inside the event loop, reported by run_viewer
    error: Option<ViewerError>,
}

struct ViewerState {
    window: Arc<Window>,
    surface: softbuffer::Surface<Arc<Window>, Arc<Window>>,
    pixel_width: u32,
    pixel_height: u32,
}

impl ViewerApp {
    fn open(&self, event_loop: &ActiveEventLoop) -> Result<ViewerState, ViewerError> {
        let w = self.canvas.cols() as u32 * self.config.cell_size;
        let h = self.canvas.rows() as u32 * self.config.cell_size;
        let attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(w, h))
            .with_resizable(true);
        let window = Arc::new(event_loop.create_window(attrs)?);

        let context = softbuffer::Context::new(window.clone())?;
        let surface = softbuffer::Surface::new(&context, window.clone())?;
        let size = window.inner_size();
        let mut state = ViewerState {
            window,
            surface,
            pixel_width: 0,
            pixel_height: 0,
        };
        state.resize(size)?;
        Ok(state)
    }

    fn render(&mut self) -> Result<(), ViewerError> {
        let Some(state) = self.state.as_mut() else {
            return Ok(());
        };
        let (w, h) = (state.pixel_width as usize, state.pixel_height as usize);
        if w == 0 || h == 0 {
            return Ok(());
        }
        let mut buf = state.surface.buffer_mut()?;
        self.canvas.draw(&mut buf, w, h);
        buf.present()?;
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: ViewerError) {
        log::error!("viewer: {err}");
        self.error.get_or_insert(err);
        event_loop.exit();
    }
}

impl ViewerState {
    fn resize(&mut self, size: PhysicalSize<u32>) -> Result<(), ViewerError> {
        self.pixel_width = size.width;
        self.pixel_height = size.height;
        let one = NonZeroU32::MIN;
        self.surface.resize(
            NonZeroU32::new(size.width).unwrap_or(one),
            NonZeroU32::new(size.height).unwrap_or(one),
        )?;
        Ok(())
    }
}

fn is_quit_key(event: &KeyEvent) -> bool {
    if event.state != ElementState::Pressed {
        return false;
    }
    match &event.logical_key {
        Key::Named(NamedKey::Escape) => true,
        Key::Character(s) => s.as_str() == "q",
        _ => false,
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match self.open(event_loop) {
            Ok(state) => {
                log::debug!(
                    "viewer window {}x{} for a {}x{} map",
                    state.pixel_width,
                    state.pixel_height,
                    self.canvas.cols(),
                    self.canvas.rows()
                );
                self.state = Some(state);
                if let Err(e) = self.render() {
                    self.fail(event_loop, e);
                }
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let result = match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                Ok(())
            }
            WindowEvent::KeyboardInput { event, .. } if is_quit_key(&event) => {
                event_loop.exit();
                Ok(())
            }
            WindowEvent::Resized(size) => match self.state.as_mut() {
                Some(state) => state.resize(size).map(|()| state.window.request_redraw()),
                None => Ok(()),
            },
            WindowEvent::RedrawRequested => self.render(),
            _ => Ok(()),
        };
        if let Err(e) = result {
            self.fail(event_loop, e);
        }
    }
}
