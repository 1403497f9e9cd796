//=========================================================================
// Winit Compositor
//=========================================================================
//
// Desktop stand-in for the device compositor: one window plays the role of
// the panel, and window events are converted into PlatformEvents.
//
// Architecture:
// ```text
//  RunLoop::tick()
//     └─ poll_event()
//          ├─ queue non-empty → pop
//          └─ queue empty     → pump_app_events(timeout 0)
//                                 └─ WindowState (ApplicationHandler)
//                                      └─ InputProcessor → queue
// ```
//
// The event loop is pumped from the run loop's thread instead of owning
// it, so the run loop keeps control of pacing. Winit requires this to be
// the main thread on macOS.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::VecDeque;
use std::time::Duration;

//=== External Crates =====================================================

use log::{debug, error, info, trace, warn};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use super::input_processor::InputProcessor;
use crate::core::input::PlatformEvent;
use crate::core::platform_bridge::{Compositor, HostError};
use crate::core::surface::{Size, SurfaceGeometry};

//=== Constants ===========================================================

/// Pumps allowed for the window to appear before giving up.
const WINDOW_CREATE_ATTEMPTS: u32 = 100;

const WINDOW_CREATE_POLL: Duration = Duration::from_millis(10);

//=== WinitCompositor =====================================================

/// Window-backed compositor.
///
/// `panel` is the simulated device panel in its natural orientation. The
/// window opens at that size, which makes it the default buffer too.
pub struct WinitCompositor {
    event_loop: EventLoop<()>,
    state: WindowState,
    panel: Size,
    exited: bool,
}

impl WinitCompositor {
    /// Creates the event loop and waits for the window.
    ///
    /// # Errors
    ///
    /// [`HostError::Compositor`] if the event loop or the window cannot
    /// be created.
    pub fn new(title: &str, panel: Size) -> Result<Self, HostError> {
        let event_loop = EventLoop::new().map_err(|e| HostError::Compositor(format!("event loop: {}", e)))?;

        let mut compositor = Self {
            event_loop,
            state: WindowState::new(title, panel),
            panel,
            exited: false,
        };

        for _ in 0..WINDOW_CREATE_ATTEMPTS {
            compositor.pump(Some(WINDOW_CREATE_POLL));
            if let Some(message) = compositor.state.creation_error.take() {
                return Err(HostError::Compositor(message));
            }
            if compositor.state.window.is_some() {
                return Ok(compositor);
            }
            if compositor.exited {
                break;
            }
        }

        Err(HostError::Compositor("window was never created".into()))
    }

    fn pump(&mut self, timeout: Option<Duration>) {
        if self.exited {
            return;
        }
        if let PumpStatus::Exit(code) = self.event_loop.pump_app_events(timeout, &mut self.state) {
            info!(target: "platform", "Event loop exited ({})", code);
            self.exited = true;
            self.state.push(PlatformEvent::ExitRequested);
        }
    }
}

impl Compositor for WinitCompositor {
    fn display_mode(&self) -> Size {
        self.panel
    }

    fn default_buffer_size(&self) -> Size {
        self.state
            .window
            .as_ref()
            .map(|window| to_size(window.inner_size()))
            .unwrap_or(self.panel)
    }

    fn configure_surface(&mut self, geometry: &SurfaceGeometry, buffer_count: u32) -> Result<Size, HostError> {
        let window = self
            .state
            .window
            .as_ref()
            .ok_or_else(|| HostError::SurfaceConfig("no window".into()))?;

        let requested = geometry.buffer_size;
        let applied = window.request_inner_size(PhysicalSize::new(requested.width, requested.height));
        window.set_title(&format!("{} ({}°)", self.state.title, geometry.orientation.degrees()));

        debug!(
            target: "platform",
            "Surface {} requested, {} buffers, rotation {}°",
            requested,
            buffer_count,
            geometry.orientation.degrees()
        );

        // `None` means the resize is applied asynchronously.
        Ok(applied.map(to_size).unwrap_or(requested))
    }

    fn poll_event(&mut self) -> Option<PlatformEvent> {
        if !self.state.accepting {
            return None;
        }
        if self.state.queue.is_empty() {
            self.pump(Some(Duration::ZERO));
        }
        self.state.queue.pop_front()
    }

    fn stop_events(&mut self) {
        self.state.accepting = false;
        let dropped = self.state.queue.len();
        self.state.queue.clear();
        if dropped > 0 {
            debug!(target: "platform", "Dropped {} undelivered events", dropped);
        }
    }

    fn shutdown(&mut self) {
        if self.state.window.take().is_some() {
            info!(target: "platform", "Window destroyed");
        }
        // Let the backend process the destruction.
        self.pump(Some(Duration::ZERO));
    }
}

//=== WindowState =========================================================

/// Event handler state owned by the compositor between pumps.
struct WindowState {
    title: String,
    initial_size: Size,
    window: Option<Window>,
    creation_error: Option<String>,
    processor: InputProcessor,
    queue: VecDeque<PlatformEvent>,
    accepting: bool,
}

impl WindowState {
    fn new(title: &str, initial_size: Size) -> Self {
        Self {
            title: title.to_string(),
            initial_size,
            window: None,
            creation_error: None,
            processor: InputProcessor::new(),
            queue: VecDeque::new(),
            accepting: true,
        }
    }

    fn push(&mut self, event: PlatformEvent) {
        if self.accepting {
            self.queue.push_back(event);
        }
    }

    fn push_some(&mut self, event: Option<PlatformEvent>) {
        if let Some(event) = event {
            self.push(event);
        }
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for WindowState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(PhysicalSize::new(self.initial_size.width, self.initial_size.height))
            .with_resizable(false);

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {} @ {}x DPI",
                    to_size(window.inner_size()),
                    window.scale_factor()
                );
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.creation_error = Some(e.to_string());
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                info!(target: "platform", "Window close requested");
                self.push(PlatformEvent::ExitRequested);
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self.processor.process_cursor_moved(position);
                self.push_some(event);
            }

            WindowEvent::CursorLeft { .. } => {
                let event = self.processor.process_cursor_left();
                self.push_some(event);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.processor.process_mouse_button(button, state);
                self.push_some(event);
            }

            WindowEvent::Touch(touch) => {
                let event = self.processor.process_touch(touch.id, touch.phase, touch.location);
                self.push(event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => match self.processor.process_key_event(&key_event) {
                Some(event) => self.push(event),
                None => trace!(target: "platform", "Key event filtered"),
            },

            WindowEvent::Resized(size) => {
                debug!(target: "platform", "Window resized to {}", to_size(size));
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                warn!(target: "platform", "Scale factor changed to {}; buffer size unchanged", scale_factor);
            }

            _ => {
                // Ignore: Focused, Moved, RedrawRequested, etc.
            }
        }
    }
}

fn to_size(size: PhysicalSize<u32>) -> Size {
    Size::new(size.width, size.height)
}

//=========================================================================
// Unit Tests
//=========================================================================
