//=========================================================================
// Frame Pacing
//=========================================================================
//
// Bounds the run loop to a fixed tick rate with a cooperative spin-yield.
//
// Architecture:
// ```text
//   present ─► pace() ─► deadline = last_tick + 1/tps
//                         while now < deadline { yield }
//                         last_tick = now            (not deadline)
// ```
//
// A slow frame is never made up: the next deadline is measured from when
// the wait actually ended, so an overrun costs one late frame instead of a
// burst of catch-up frames.
//
// Platform sleep granularity can exceed the remaining slack, so the wait
// yields instead of sleeping.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use log::trace;

//=== Clock ===============================================================

/// Monotonic time source plus the primitive used while waiting.
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;

    /// Gives up the processor briefly.
    fn yield_now(&self);
}

//=== SystemClock =========================================================

/// Wall-clock implementation backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn yield_now(&self) {
        thread::yield_now();
    }
}

//=== ManualClock =========================================================

/// Virtual clock for deterministic tests.
///
/// Time only moves through [`advance`](Self::advance) or by `yield_step`
/// on every yield. Clones share the same timeline.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
    yield_step: Duration,
}

impl ManualClock {
    /// `yield_step` must be non-zero or a pending wait never finishes.
    pub fn new(yield_step: Duration) -> Self {
        assert!(!yield_step.is_zero(), "ManualClock yield step must be non-zero");
        Self {
            now: Rc::new(Cell::new(Duration::ZERO)),
            yield_step,
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn yield_now(&self) {
        self.advance(self.yield_step);
    }
}

//=== PaceReport ==========================================================

/// What a single `pace()` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaceReport {
    /// Time spent yielding.
    pub waited: Duration,

    /// How far past the deadline the frame arrived (zero if on time).
    pub late_by: Duration,

    /// Number of yields performed.
    pub yields: u32,
}

impl PaceReport {
    pub fn overran(&self) -> bool {
        !self.late_by.is_zero()
    }
}

//=== FramePacer ==========================================================

/// Fixed-rate, no-catch-up tick limiter.
#[derive(Debug)]
pub struct FramePacer<K: Clock> {
    clock: K,
    tick: Duration,
    last_tick: Duration,
}

impl<K: Clock> FramePacer<K> {
    /// Creates a pacer whose first deadline is one tick from now.
    ///
    /// # Panics
    ///
    /// Panics if `tick_rate <= 0.0`.
    pub fn new(clock: K, tick_rate: f64) -> Self {
        assert!(tick_rate > 0.0, "Tick rate must be positive, got {}", tick_rate);
        let last_tick = clock.now();
        Self {
            clock,
            tick: Duration::from_secs_f64(1.0 / tick_rate),
            last_tick,
        }
    }

    /// Waits until one tick has elapsed since the previous one.
    pub fn pace(&mut self) -> PaceReport {
        let deadline = self.last_tick + self.tick;
        let arrived = self.clock.now();

        let mut now = arrived;
        let mut yields = 0u32;
        while now < deadline {
            self.clock.yield_now();
            yields = yields.saturating_add(1);
            now = self.clock.now();
        }

        self.last_tick = now;

        let report = PaceReport {
            waited: now.saturating_sub(arrived),
            late_by: arrived.saturating_sub(deadline),
            yields,
        };

        if report.overran() {
            trace!(target: "host::pacing", "Frame late by {:?}, not catching up", report.late_by);
        }

        report
    }

    /// Measures the next deadline from now. Called once when the loop
    /// enters steady state so startup work does not count as an overrun.
    pub fn restart(&mut self) {
        self.last_tick = self.clock.now();
    }

    /// Nominal tick duration.
    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Time at which the last tick ended.
    pub fn last_tick(&self) -> Duration {
        self.last_tick
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
