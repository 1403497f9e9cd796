//=========================================================================
// Input
//
// Event-to-snapshot normalization.
//
// Responsibilities:
// - Represent raw platform events in a portable form (`event`)
// - Hold the per-frame input record handed to the application (`snapshot`)
// - Apply events to the record (`translator`)
// - Fold keyboard state into a simulated gamepad (`gamepad`)
//
// Notes:
// Everything here runs on the loop thread. The snapshot is mutated only
// while events are collected and is borrowed immutably by the application
// during update.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
pub mod gamepad;
pub mod snapshot;
pub mod translator;

//=== Public API ==========================================================

pub use event::{KeyCode, PlatformEvent, PointerButtons, TouchPhase};
pub use gamepad::GamepadSimulator;
pub use snapshot::{GamepadButtons, InputSnapshot, Pointer, PointerSlots, Stick, MAX_POINTERS};
pub use translator::{EventTranslator, IgnoreReason, Translation};
