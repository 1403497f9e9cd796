//=========================================================================
// Handheld Host — Library Root
//
// Adaptation layer between a compositor, a graphics surface and an audio
// device on one side and a portable application core on the other.
//
// Responsibilities:
// - Expose the run loop and its configuration (`HostBuilder`)
// - Define the collaborator traits an application and a backend implement
// - Ship desktop backends for running without the target device
//
// Typical usage:
// ```no_run
// use handheld_host::prelude::*;
// # struct Game;
// # impl Application for Game {
// #     fn init(&mut self, _: &LaunchInfo, _: &SurfaceGeometry) {}
// #     fn init_graphics(&mut self) {}
// #     fn audio_source(&mut self) -> Box<dyn AudioSource> { unimplemented!() }
// #     fn update(&mut self, _: &InputSnapshot) {}
// #     fn render(&mut self) {}
// #     fn shutdown_graphics(&mut self) {}
// #     fn shutdown(&mut self) {}
// # }
//
// fn main() -> Result<(), HostError> {
//     let compositor = WinitCompositor::new("Game", Size::new(1280, 768))?;
//     let summary = HostBuilder::new()
//         .orientation_from_env()
//         .build(compositor, HeadlessGraphics::new(), SoftwareAudioSink::new())
//         .run(&mut Game)?;
//     println!("{} frames", summary.frames);
//     Ok(())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the negotiator, input normalization, pacing and the run
// loop. It has no OS dependencies.
//
// `host` is the configuration layer and process-exit mapping.
//
// `platform` holds the concrete desktop backends.
//
pub mod core;
pub mod host;
pub mod platform;
pub mod prelude;

//--- Public Exports ------------------------------------------------------

pub use crate::core::platform_bridge::HostError;
pub use crate::core::{RunLoop, RunSummary};
pub use host::HostBuilder;
