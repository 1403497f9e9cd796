//=========================================================================
// Host Configuration
//
// Builder and configuration for the run loop.
//
// Architecture:
// ```text
//     HostBuilder  ──build(compositor, graphics, audio)──>  RunLoop  ──run(app)──>  RunSummary
//         │                                                                │
//         ├─ with_tick_rate()                                              └─ exit_code()
//         ├─ with_event_drain()
//         ├─ with_orientation() / orientation_from_env()
//         └─ with_launch_info()
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::env;
use std::process::ExitCode;

//=== External Dependencies ===============================================

use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::pacing::{Clock, SystemClock};
use crate::core::platform_bridge::{AudioSink, AudioSpec, Compositor, GraphicsProvider, HostError, PixelFormat};
use crate::core::run_loop::{RunLoop, RunSummary};
use crate::core::surface::Orientation;

//=== Constants ===========================================================

/// Environment variable holding the requested orientation in degrees.
pub const ORIENTATION_VAR: &str = "ORIENTATION";

//=== EventDrain ==========================================================

/// How many pending events a single tick consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventDrain {
    /// One event per tick; bursts spread over several ticks.
    #[default]
    OnePerTick,

    /// Everything pending (bounded), in order.
    All,
}

//=== LaunchInfo ==========================================================

/// Arguments handed to [`Application::init`](crate::core::platform_bridge::Application::init).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchInfo {
    pub args: Vec<String>,
    pub data_dir: String,
    pub home_dir: String,
    pub device_id: String,
}

impl Default for LaunchInfo {
    fn default() -> Self {
        Self {
            args: Vec::new(),
            data_dir: "data/".into(),
            home_dir: "/accounts/1000/shared".into(),
            device_id: "BADCOFFEE".into(),
        }
    }
}

//=== HostConfig ==========================================================

/// Resolved configuration consumed by the run loop.
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    pub tick_rate: f64,
    pub event_drain: EventDrain,
    pub orientation: Orientation,
    pub pixel_format: PixelFormat,
    pub audio_spec: AudioSpec,
    pub launch: LaunchInfo,
    pub simulate_gamepad: bool,
}

impl HostConfig {
    /// Reads [`ORIENTATION_VAR`] once. Absent or invalid values yield 0°.
    pub fn orientation_from_env() -> Orientation {
        let raw = env::var(ORIENTATION_VAR).ok();
        Orientation::parse_or_identity(raw.as_deref())
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            event_drain: EventDrain::OnePerTick,
            orientation: Orientation::Deg0,
            pixel_format: PixelFormat::default(),
            audio_spec: AudioSpec::default(),
            launch: LaunchInfo::default(),
            simulate_gamepad: false,
        }
    }
}

//=== HostBuilder =========================================================

/// Builder for configuring and constructing a [`RunLoop`].
///
/// # Default Values
///
/// - **Tick rate**: 60.0 Hz
/// - **Event drain**: one event per tick
/// - **Orientation**: 0°
/// - **Pixel format**: RGBA8888, depth 24, stencil 8, double buffered
/// - **Audio**: 44100 Hz, 16-bit, stereo, 1024 frames
/// - **Gamepad simulation**: off
///
/// # Examples
///
/// ```no_run
/// use handheld_host::prelude::*;
/// use std::process::ExitCode;
///
/// fn launch<C, G, S, A>(compositor: C, graphics: G, audio: S, app: &mut A) -> ExitCode
/// where
///     C: Compositor,
///     G: GraphicsProvider,
///     S: AudioSink,
///     A: Application,
/// {
///     let result = HostBuilder::new()
///         .orientation_from_env()
///         .with_event_drain(EventDrain::All)
///         .build(compositor, graphics, audio)
///         .run(app);
///
///     handheld_host::host::exit_code(&result)
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct HostBuilder {
    config: HostConfig,
}

impl HostBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target ticks per second.
    ///
    /// # Panics
    ///
    /// Panics if `tick_rate <= 0.0`.
    pub fn with_tick_rate(mut self, tick_rate: f64) -> Self {
        assert!(tick_rate > 0.0, "Tick rate must be positive, got {}", tick_rate);
        self.config.tick_rate = tick_rate;
        self
    }

    pub fn with_event_drain(mut self, drain: EventDrain) -> Self {
        self.config.event_drain = drain;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.config.orientation = orientation;
        self
    }

    /// Takes the orientation from the `ORIENTATION` environment variable.
    pub fn orientation_from_env(self) -> Self {
        self.with_orientation(HostConfig::orientation_from_env())
    }

    pub fn with_pixel_format(mut self, format: PixelFormat) -> Self {
        self.config.pixel_format = format;
        self
    }

    /// Overrides the audio format.
    ///
    /// # Panics
    ///
    /// Panics if any field is zero.
    pub fn with_audio_spec(mut self, spec: AudioSpec) -> Self {
        assert!(
            spec.sample_rate > 0 && spec.channels > 0 && spec.frames > 0,
            "Audio spec fields must be positive, got {:?}",
            spec
        );
        self.config.audio_spec = spec;
        self
    }

    pub fn with_launch_info(mut self, launch: LaunchInfo) -> Self {
        self.config.launch = launch;
        self
    }

    /// Replaces only the command-line arguments of the launch info.
    pub fn with_args<I, T>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.config.launch.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_gamepad_simulation(mut self, enabled: bool) -> Self {
        self.config.simulate_gamepad = enabled;
        self
    }

    /// Returns the configuration without building a loop.
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Builds a run loop paced by the system clock.
    pub fn build<C, G, S>(self, compositor: C, graphics: G, audio: S) -> RunLoop<C, G, S, SystemClock>
    where
        C: Compositor,
        G: GraphicsProvider,
        S: AudioSink,
    {
        self.build_with_clock(compositor, graphics, audio, SystemClock::new())
    }

    /// Builds a run loop paced by a custom clock.
    pub fn build_with_clock<C, G, S, K>(self, compositor: C, graphics: G, audio: S, clock: K) -> RunLoop<C, G, S, K>
    where
        C: Compositor,
        G: GraphicsProvider,
        S: AudioSink,
        K: Clock,
    {
        info!(
            target: "host",
            "Building host (tick rate: {}, drain: {:?}, orientation: {}°)",
            self.config.tick_rate,
            self.config.event_drain,
            self.config.orientation.degrees()
        );
        RunLoop::new(self.config, compositor, graphics, audio, clock)
    }
}

//=== Process Exit ========================================================

/// Maps a run result to a process status: `0` on clean shutdown, `1` on
/// any fatal initialization failure.
pub fn exit_status(result: &Result<RunSummary, HostError>) -> u8 {
    match result {
        Ok(summary) => {
            info!(target: "host", "Clean shutdown after {} frames", summary.frames);
            0
        }
        Err(e) => {
            error!(target: "host", "Fatal: {}", e);
            e.exit_code()
        }
    }
}

/// [`exit_status`] as an [`ExitCode`] for `main`.
pub fn exit_code(result: &Result<RunSummary, HostError>) -> ExitCode {
    ExitCode::from(exit_status(result))
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // HostBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = HostBuilder::new();
        let config = builder.config();

        assert_eq!(config.tick_rate, 60.0);
        assert_eq!(config.event_drain, EventDrain::OnePerTick);
        assert_eq!(config.orientation, Orientation::Deg0);
        assert_eq!(config.pixel_format, PixelFormat::RGBA8888);
        assert_eq!(config.audio_spec, AudioSpec::STEREO_44K);
        assert!(!config.simulate_gamepad);
    }

    #[test]
    fn launch_info_defaults() {
        let launch = LaunchInfo::default();
        assert!(launch.args.is_empty());
        assert_eq!(launch.data_dir, "data/");
        assert_eq!(launch.home_dir, "/accounts/1000/shared");
        assert_eq!(launch.device_id, "BADCOFFEE");
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let builder = HostBuilder::new()
            .with_tick_rate(30.0)
            .with_event_drain(EventDrain::All)
            .with_orientation(Orientation::Deg270)
            .with_args(["game", "--fullscreen"])
            .with_gamepad_simulation(true);
        let config = builder.config();

        assert_eq!(config.tick_rate, 30.0);
        assert_eq!(config.event_drain, EventDrain::All);
        assert_eq!(config.orientation, Orientation::Deg270);
        assert_eq!(config.launch.args, vec!["game".to_string(), "--fullscreen".to_string()]);
        assert_eq!(config.launch.data_dir, "data/");
        assert!(config.simulate_gamepad);
    }

    #[test]
    #[should_panic(expected = "Tick rate must be positive")]
    fn builder_with_tick_rate_panics_on_zero() {
        HostBuilder::new().with_tick_rate(0.0);
    }

    #[test]
    #[should_panic(expected = "Audio spec fields must be positive")]
    fn builder_with_audio_spec_panics_on_zero_frames() {
        HostBuilder::new().with_audio_spec(AudioSpec {
            frames: 0,
            ..AudioSpec::STEREO_44K
        });
    }

    //=====================================================================
    // Exit Status Tests
    //=====================================================================

    #[test]
    fn fatal_error_exits_with_one() {
        let result: Result<RunSummary, HostError> = Err(HostError::AudioOpen("busy".into()));
        assert_eq!(exit_status(&result), 1);
    }
}
