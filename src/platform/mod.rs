//=========================================================================
// Platform Backends
//
// Concrete collaborators for running the host on a desktop.
//
// Architecture:
// ```text
//  ┌──────────────────────────┐
//  │  RunLoop (loop thread)   │
//  │   ├─ WinitCompositor ────┼── window, pumped once per empty poll
//  │   │    └─ InputProcessor │     winit events → PlatformEvent
//  │   ├─ HeadlessGraphics    │── config check + present counter
//  │   └─ SoftwareAudioSink ──┼── "audio-mix" thread, crossbeam commands
//  │      or CpalAudioSink  ──┼── platform audio thread (feature `cpal`)
//  └──────────────────────────┘
// ```
//
// Responsibilities:
// - Provide a panel-sized window and convert its input
// - Stand in for a GPU context where none is needed
// - Drive the application's mixer at the fixed audio rate
//
//=========================================================================

//=== Submodules ==========================================================

mod audio;
mod graphics;

#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
mod input_processor;
#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
mod winit_compositor;

#[cfg(feature = "cpal")]
mod cpal_audio;

//=== Public API ==========================================================

pub use audio::SoftwareAudioSink;
pub use graphics::HeadlessGraphics;

#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
pub use winit_compositor::WinitCompositor;

#[cfg(feature = "cpal")]
pub use cpal_audio::CpalAudioSink;
