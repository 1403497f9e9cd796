//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges platform services (compositor, graphics, audio) with the run
// loop.
//
// This module defines the contract between platform implementations and
// core logic, so backends can be swapped without changing the loop.
//
// Components:
// - `interface`: collaborator traits and fixed formats (the contract)
// - `error`: fatal error taxonomy
// - `event_collector`: core-side event draining per tick
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub mod error;
pub mod interface;

//=== Public API ==========================================================

pub use error::HostError;
pub use interface::{
    Application, AudioSink, AudioSource, AudioSpec, Compositor, GraphicsProvider, PixelFormat,
};

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
