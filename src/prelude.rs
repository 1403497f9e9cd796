//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use handheld_host::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Host configuration
pub use crate::host::{EventDrain, HostBuilder, HostConfig, LaunchInfo};

// Run loop
pub use crate::core::{LoopState, RunLoop, RunSummary};

// Collaborator contracts
pub use crate::core::platform_bridge::{
    Application, AudioSink, AudioSource, AudioSpec, Compositor, GraphicsProvider, HostError,
    PixelFormat,
};

// Surface geometry
pub use crate::core::surface::{Orientation, Size, SurfaceGeometry};

// Input
pub use crate::core::input::{GamepadButtons, InputSnapshot, KeyCode, PlatformEvent, Pointer, Stick};

// Desktop backends
pub use crate::platform::{HeadlessGraphics, SoftwareAudioSink};

#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
pub use crate::platform::WinitCompositor;

#[cfg(feature = "cpal")]
pub use crate::platform::CpalAudioSink;
