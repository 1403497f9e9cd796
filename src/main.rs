//=========================================================================
// handheld-host demo
//
// Runs a small test-pattern application on the desktop backends: a window
// sized like the device panel, a headless graphics context and the
// software audio clock. Touching (clicking) the window plays a tone whose
// pitch follows the pointer; the simulated gamepad's A button holds it.
//
// Exit status is 0 on a clean close and 1 if startup fails.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::f32::consts::TAU;
use std::process::ExitCode;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

//=== Internal Crates =====================================================

use handheld_host::host::exit_code;
use handheld_host::prelude::*;

//=== Constants ===========================================================

/// Simulated panel in its natural orientation.
const PANEL: Size = Size::new(1280, 768);

const BASE_PITCH_HZ: f32 = 220.0;

//=== ToneMixer ===========================================================

/// Sine generator. Pitch is shared with the loop thread as raw `f32` bits;
/// zero means silent.
struct ToneMixer {
    pitch: Arc<AtomicU32>,
    sample_rate: f32,
    channels: usize,
    phase: f32,
}

impl AudioSource for ToneMixer {
    fn mix(&mut self, buffer: &mut [i16], frames: usize) -> usize {
        let pitch = f32::from_bits(self.pitch.load(Ordering::Relaxed));
        if pitch <= 0.0 {
            return 0;
        }

        let step = TAU * pitch / self.sample_rate;
        for frame in buffer.chunks_exact_mut(self.channels).take(frames) {
            let sample = (self.phase.sin() * f32::from(i16::MAX) * 0.25) as i16;
            frame.fill(sample);
            self.phase = (self.phase + step) % TAU;
        }
        frames
    }
}

//=== TestPattern =========================================================

struct TestPattern {
    pitch: Arc<AtomicU32>,
    audio: AudioSpec,
    resolution: Size,
    frames: u64,
    touches: usize,
}

impl TestPattern {
    /// `audio` must be the spec the host opens the device with.
    fn new(audio: AudioSpec) -> Self {
        Self {
            pitch: Arc::new(AtomicU32::new(0)),
            audio,
            resolution: PANEL,
            frames: 0,
            touches: 0,
        }
    }

    fn set_pitch(&self, hz: f32) {
        self.pitch.store(hz.to_bits(), Ordering::Relaxed);
    }
}

impl Application for TestPattern {
    fn init(&mut self, launch: &LaunchInfo, geometry: &SurfaceGeometry) {
        self.resolution = geometry.logical_resolution;
        println!(
            "init: {} logical, {} buffer, {}° (data: {}, home: {}, device: {})",
            geometry.logical_resolution,
            geometry.buffer_size,
            geometry.orientation.degrees(),
            launch.data_dir,
            launch.home_dir,
            launch.device_id
        );
    }

    fn init_graphics(&mut self) {}

    fn audio_source(&mut self) -> Box<dyn AudioSource> {
        Box::new(ToneMixer {
            pitch: Arc::clone(&self.pitch),
            sample_rate: self.audio.sample_rate as f32,
            channels: usize::from(self.audio.channels),
            phase: 0.0,
        })
    }

    fn update(&mut self, input: &InputSnapshot) {
        self.frames += 1;

        let touches = input.pointers.down_count();
        if touches != self.touches {
            println!("frame {}: {} touch(es)", self.frames, touches);
            self.touches = touches;
        }

        let pointer = input.pointers.iter().find(|(_, pointer)| pointer.down);
        let pitch = match pointer {
            Some((_, pointer)) => {
                let span = self.resolution.width.max(1) as f32;
                BASE_PITCH_HZ * (1.0 + pointer.x.max(0) as f32 / span)
            }
            None if input.is_button_down(GamepadButtons::A) => BASE_PITCH_HZ,
            None => 0.0,
        };
        self.set_pitch(pitch);
    }

    fn render(&mut self) {}

    fn shutdown_graphics(&mut self) {}

    fn shutdown(&mut self) {
        self.set_pitch(0.0);
        println!("shutdown after {} frames", self.frames);
    }
}

//=== Entry Point =========================================================

fn main() -> ExitCode {
    let compositor = match WinitCompositor::new("handheld-host", PANEL) {
        Ok(compositor) => compositor,
        Err(e) => {
            eprintln!("handheld-host: {}", e);
            return ExitCode::from(e.exit_code());
        }
    };

    let audio = AudioSpec::default();
    let mut app = TestPattern::new(audio);
    let result = HostBuilder::new()
        .orientation_from_env()
        .with_audio_spec(audio)
        .with_args(std::env::args().skip(1))
        .with_gamepad_simulation(true)
        .build(compositor, HeadlessGraphics::new(), SoftwareAudioSink::new())
        .run(&mut app);

    match &result {
        Ok(summary) => println!("{} frames, {} late", summary.frames, summary.overruns),
        Err(e) => eprintln!("handheld-host: {}", e),
    }
    exit_code(&result)
}
