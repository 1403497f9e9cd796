//=========================================================================
// Core
//
// Platform-independent half of the host.
//
// Responsibilities:
// - Reconcile panel, buffer and requested orientation (`surface`)
// - Normalize raw events into the per-frame input snapshot (`input`)
// - Hold the loop to a fixed tick rate without catch-up (`pacing`)
// - Define the collaborator contracts and error taxonomy (`platform_bridge`)
// - Sequence startup, ticks and teardown (`run_loop`)
//
// Notes:
// Nothing here talks to an OS. Every external service is reached through
// a trait in `platform_bridge`, and the run loop owns all handles, so the
// whole lifecycle can be exercised with in-memory fakes.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod input;
pub mod pacing;
pub mod platform_bridge;
pub mod run_loop;
pub mod surface;

#[cfg(test)]
pub(crate) mod testing;

//=== Public API ==========================================================

pub use pacing::{Clock, FramePacer, ManualClock, PaceReport, SystemClock};
pub use run_loop::{LoopState, RunLoop, RunSummary};
pub use surface::{negotiate, Aspect, Orientation, Size, SurfaceGeometry};
