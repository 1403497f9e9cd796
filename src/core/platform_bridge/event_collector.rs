//=========================================================================
// Event Collector
//=========================================================================
//
// Pulls pending compositor events for one tick and feeds them to the
// translator.
//
// Architecture:
//   Compositor::poll_event() → EventTranslator → InputSnapshot → TickControl
//
// Two drain policies: one event per tick (the platform default, bursts
// spread over several ticks) or everything pending, bounded to prevent
// starvation. Nothing is dropped either way; leftovers stay queued.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::interface::Compositor;
use crate::core::input::{EventTranslator, InputSnapshot, Translation};
use crate::host::EventDrain;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Drains compositor events into the live snapshot.
#[derive(Debug)]
pub(crate) struct EventCollector {
    drain: EventDrain,
}

impl EventCollector {
    /// Upper bound for `EventDrain::All` in a single tick.
    pub(crate) const MAX_EVENTS_PER_FRAME: usize = 100;

    pub(crate) fn new(drain: EventDrain) -> Self {
        Self { drain }
    }

    /// Collects this tick's events. Returns `Exit` if any of them asked the
    /// application to quit; the rest of the tick still runs.
    pub(crate) fn collect_frame<C: Compositor>(
        &self,
        compositor: &mut C,
        translator: &mut EventTranslator,
        snapshot: &mut InputSnapshot,
    ) -> TickControl {
        let budget = match self.drain {
            EventDrain::OnePerTick => 1,
            EventDrain::All => Self::MAX_EVENTS_PER_FRAME,
        };

        let mut control = TickControl::Continue;
        let mut drained = 0;

        while drained < budget {
            let Some(event) = compositor.poll_event() else {
                break;
            };
            drained += 1;

            trace!(target: "host::input", "Event: {:?}", event);
            if translator.translate(&event, snapshot) == Translation::ExitRequested {
                control = TickControl::Exit;
            }
        }

        if self.drain == EventDrain::All && drained >= Self::MAX_EVENTS_PER_FRAME {
            warn!(target: "host::input", "Event queue backlog: drained {} events this frame", drained);
        }

        control
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
