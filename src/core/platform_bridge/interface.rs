//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Contracts between the run loop and its external collaborators.
//
// ```text
//   Compositor        display mode, drawable surface, raw events
//   GraphicsProvider  context creation + buffer swap
//   AudioSink         fixed-format output pulling from an AudioSource
//   Application       the portable core: init → update/render → shutdown
// ```
//
// Everything except `AudioSource` lives on the loop thread. The audio
// source is handed to the sink and may be called from the platform's
// audio thread at any time while the sink is open and unpaused.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::error::HostError;
use crate::core::input::{InputSnapshot, PlatformEvent};
use crate::core::surface::{Size, SurfaceGeometry};
use crate::host::LaunchInfo;

//=== PixelFormat =========================================================

/// Attribute request passed to the graphics provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelFormat {
    pub red_bits: u8,
    pub green_bits: u8,
    pub blue_bits: u8,
    pub alpha_bits: u8,

    /// Minimum depth buffer size.
    pub depth_bits: u8,

    /// Minimum stencil buffer size.
    pub stencil_bits: u8,

    /// Number of window buffers (2 = double buffered).
    pub buffer_count: u32,

    /// Vertical blanks per swap.
    pub swap_interval: u32,
}

impl PixelFormat {
    /// RGBA8888 with 24-bit depth and 8-bit stencil, double buffered,
    /// synced to every vertical blank.
    pub const RGBA8888: Self = Self {
        red_bits: 8,
        green_bits: 8,
        blue_bits: 8,
        alpha_bits: 8,
        depth_bits: 24,
        stencil_bits: 8,
        buffer_count: 2,
        swap_interval: 1,
    };
}

impl Default for PixelFormat {
    fn default() -> Self {
        Self::RGBA8888
    }
}

//=== AudioSpec ===========================================================

/// Output format requested from the audio sink.
///
/// Samples are interleaved signed 16-bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioSpec {
    pub sample_rate: u32,
    pub channels: u16,

    /// Frames per callback.
    pub frames: u32,
}

impl AudioSpec {
    /// 44.1 kHz, stereo, 1024-frame callbacks.
    pub const STEREO_44K: Self = Self {
        sample_rate: 44_100,
        channels: 2,
        frames: 1024,
    };

    /// Number of `i16` samples in one callback buffer.
    pub fn samples_per_callback(&self) -> usize {
        self.frames as usize * self.channels as usize
    }
}

impl Default for AudioSpec {
    fn default() -> Self {
        Self::STEREO_44K
    }
}

//=== Compositor ==========================================================

/// Windowing/compositor service.
pub trait Compositor {
    /// Natural (orientation-independent) panel dimensions.
    fn display_mode(&self) -> Size;

    /// Size of the buffer the compositor would allocate by default.
    fn default_buffer_size(&self) -> Size;

    /// Applies the negotiated buffer size and rotation and allocates the
    /// drawable. Returns the buffer size actually achieved, which may be
    /// clamped by the platform.
    fn configure_surface(&mut self, geometry: &SurfaceGeometry, buffer_count: u32) -> Result<Size, HostError>;

    /// Non-blocking poll for the next pending event.
    fn poll_event(&mut self) -> Option<PlatformEvent>;

    /// Stops event delivery. Later polls return `None`.
    fn stop_events(&mut self);

    /// Destroys the drawable and the windowing context.
    fn shutdown(&mut self);
}

//=== GraphicsProvider ====================================================

/// Graphics context/surface creation and presentation.
pub trait GraphicsProvider {
    /// Creates the context for a surface of `buffer_size`. Failure is fatal.
    fn create_context(&mut self, format: &PixelFormat, buffer_size: Size) -> Result<(), HostError>;

    /// Presents the back buffer.
    fn swap_buffers(&mut self) -> Result<(), HostError>;

    /// Releases the context and its surface.
    fn destroy_context(&mut self);
}

//=== Audio ===============================================================

/// Producer side of the audio path, called from the audio thread.
pub trait AudioSource: Send + 'static {
    /// Fills `buffer` (interleaved, `frames * channels` samples) and returns
    /// the number of frames written. Unwritten frames are silenced by the
    /// sink.
    fn mix(&mut self, buffer: &mut [i16], frames: usize) -> usize;
}

/// Fixed-format audio output.
pub trait AudioSink {
    /// Brings up the audio subsystem. Failure is fatal.
    fn initialize(&mut self) -> Result<(), HostError>;

    /// Opens the device paused, pulling from `source`. Failure is fatal.
    fn open(&mut self, spec: &AudioSpec, source: Box<dyn AudioSource>) -> Result<(), HostError>;

    /// Pauses or resumes callbacks. No-op when not open.
    fn set_paused(&mut self, paused: bool);

    /// Stops callbacks and releases the device. Once this returns the
    /// source will not be called again.
    fn close(&mut self);
}

//=== Application =========================================================

/// The portable application core driven by the run loop.
///
/// Call order is fixed: `init`, `init_graphics`, `audio_source`, then
/// `update`/`render` once per tick, then `shutdown_graphics`, `shutdown`.
pub trait Application {
    /// One-time initialization with launch paths and surface geometry.
    fn init(&mut self, launch: &LaunchInfo, geometry: &SurfaceGeometry);

    /// Graphics resources may be created from here on.
    fn init_graphics(&mut self);

    /// Hands out the mixer that the audio thread will call.
    fn audio_source(&mut self) -> Box<dyn AudioSource>;

    /// Advances the application with this tick's input.
    fn update(&mut self, input: &InputSnapshot);

    /// Draws the current frame.
    fn render(&mut self);

    /// Releases graphics resources. The context is still valid here.
    fn shutdown_graphics(&mut self);

    /// Final shutdown. Audio is paused while this runs.
    fn shutdown(&mut self);
}

//=========================================================================
// Unit Tests
//=========================================================================
