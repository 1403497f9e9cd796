//=========================================================================
// Run Loop
//
// Owns the surface, the live input snapshot and every platform handle,
// and drives the application at a fixed tick rate.
//
// State machine:
// ```text
//   Uninitialized ─► SurfaceReady ─► Running ⟲ ─► Stopping ─► TornDown
//        │               │
//        └── fatal ──────┴──────────────────────────────────► TornDown (Err)
// ```
//
// Tick order (never reordered):
//   collect events → validity flags → update → render → finalize → swap → pace
//
// Notes:
// An exit request only clears the `running` flag. It is observed at the
// top of the next iteration, so the frame in progress always completes.
// Teardown order is fixed: the audio callback is paused before the
// application shuts down and closed only after it returns, and the
// graphics context outlives `shutdown_graphics`.
//
//=========================================================================

//=== External Crates =====================================================

use log::{debug, error, info, trace, warn};

//=== Internal Modules ====================================================

use super::input::{EventTranslator, InputSnapshot};
use super::pacing::{Clock, FramePacer};
use super::platform_bridge::{
    Application, AudioSink, Compositor, EventCollector, GraphicsProvider, HostError, TickControl,
};
use super::surface::{negotiate, SurfaceGeometry};
use crate::host::HostConfig;

//=== LoopState ===========================================================

/// Lifecycle phase of a [`RunLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Uninitialized,
    SurfaceReady,
    Running,
    Stopping,
    TornDown,
}

//=== RunSummary ==========================================================

/// Reported after a clean shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Completed ticks.
    pub frames: u64,

    /// Ticks that arrived after their pacing deadline.
    pub overruns: u64,

    /// Geometry the application rendered against.
    pub geometry: SurfaceGeometry,
}

//=== RunLoop =============================================================

/// Fixed-rate host loop around an [`Application`].
///
/// Built by [`HostBuilder`](crate::host::HostBuilder). A loop runs at most
/// once; all handles are released before [`run`](Self::run) returns.
pub struct RunLoop<C, G, S, K>
where
    C: Compositor,
    G: GraphicsProvider,
    S: AudioSink,
    K: Clock,
{
    config: HostConfig,

    //--- Collaborators ----------------------------------------------------
    compositor: C,
    graphics: G,
    audio: S,

    //--- Per-Tick Machinery -----------------------------------------------
    pacer: FramePacer<K>,
    collector: EventCollector,
    translator: EventTranslator,
    snapshot: InputSnapshot,

    //--- Lifecycle --------------------------------------------------------
    state: LoopState,
    running: bool,
    frames: u64,
    overruns: u64,
}

impl<C, G, S, K> RunLoop<C, G, S, K>
where
    C: Compositor,
    G: GraphicsProvider,
    S: AudioSink,
    K: Clock,
{
    pub(crate) fn new(config: HostConfig, compositor: C, graphics: G, audio: S, clock: K) -> Self {
        let pacer = FramePacer::new(clock, config.tick_rate);
        let collector = EventCollector::new(config.event_drain);
        let translator = EventTranslator::new().with_gamepad_simulation(config.simulate_gamepad);

        Self {
            config,
            compositor,
            graphics,
            audio,
            pacer,
            collector,
            translator,
            snapshot: InputSnapshot::new(),
            state: LoopState::Uninitialized,
            running: false,
            frames: 0,
            overruns: 0,
        }
    }

    //--- run() ------------------------------------------------------------
    //
    // Brings the surface up, initializes the application, ticks until an
    // exit request arrives, then tears everything down in order.
    //
    // # Panics
    //
    // Panics if called more than once.
    //
    pub fn run<A: Application>(&mut self, app: &mut A) -> Result<RunSummary, HostError> {
        assert!(
            self.state == LoopState::Uninitialized,
            "RunLoop can only run once (state: {:?})",
            self.state
        );

        let geometry = self.prepare_surface().inspect_err(|e| {
            error!(target: "host", "Surface setup failed: {}", e);
        })?;

        self.start(app, &geometry).inspect_err(|e| {
            error!(target: "host", "Startup failed: {}", e);
        })?;

        while self.running {
            self.tick(app);
        }

        self.teardown(app);

        Ok(RunSummary {
            frames: self.frames,
            overruns: self.overruns,
            geometry,
        })
    }

    //--- prepare_surface() ------------------------------------------------
    //
    // Uninitialized → SurfaceReady. Negotiates geometry, allocates the
    // drawable, creates the graphics context and brings up audio. Each
    // failure releases what was acquired before it.
    //
    fn prepare_surface(&mut self) -> Result<SurfaceGeometry, HostError> {
        let physical_mode = self.compositor.display_mode();
        let default_buffer = self.compositor.default_buffer_size();
        let mut geometry = negotiate(physical_mode, default_buffer, self.config.orientation);

        info!(
            target: "host::surface",
            "Panel {}, default buffer {}, orientation {}° → buffer {}, logical {}{}",
            physical_mode,
            default_buffer,
            geometry.orientation.degrees(),
            geometry.buffer_size,
            geometry.logical_resolution,
            if geometry.transposed { " (transposed)" } else { "" }
        );

        let achieved = match self
            .compositor
            .configure_surface(&geometry, self.config.pixel_format.buffer_count)
        {
            Ok(size) => size,
            Err(e) => {
                self.release_compositor();
                return Err(e);
            }
        };

        if achieved != geometry.buffer_size {
            warn!(
                target: "host::surface",
                "Compositor clamped buffer {} to {}",
                geometry.buffer_size,
                achieved
            );
            geometry.buffer_size = achieved;
        }

        if let Err(e) = self.graphics.create_context(&self.config.pixel_format, geometry.buffer_size) {
            self.release_compositor();
            return Err(e);
        }

        if let Err(e) = self.audio.initialize() {
            self.graphics.destroy_context();
            self.release_compositor();
            return Err(e);
        }

        self.transition(LoopState::SurfaceReady);
        Ok(geometry)
    }

    //--- start() ----------------------------------------------------------
    //
    // SurfaceReady → Running. Audio opens paused and is only unpaused once
    // the application has been initialized.
    //
    fn start<A: Application>(&mut self, app: &mut A, geometry: &SurfaceGeometry) -> Result<(), HostError> {
        app.init(&self.config.launch, geometry);
        app.init_graphics();

        let source = app.audio_source();
        if let Err(e) = self.audio.open(&self.config.audio_spec, source) {
            app.shutdown_graphics();
            app.shutdown();
            self.audio.close();
            self.graphics.destroy_context();
            self.release_compositor();
            return Err(e);
        }
        info!(
            target: "host",
            "Audio open ({} Hz, {} ch, {} frames)",
            self.config.audio_spec.sample_rate,
            self.config.audio_spec.channels,
            self.config.audio_spec.frames
        );
        self.audio.set_paused(false);

        self.pacer.restart();
        self.running = true;
        self.transition(LoopState::Running);
        Ok(())
    }

    //--- tick() -----------------------------------------------------------
    //
    // One iteration of the steady state.
    //
    fn tick<A: Application>(&mut self, app: &mut A) {
        //--- Step 1: Collect events ---------------------------------------
        let control = self
            .collector
            .collect_frame(&mut self.compositor, &mut self.translator, &mut self.snapshot);
        if control == TickControl::Exit {
            info!(target: "host", "Exit requested at frame {}", self.frames);
            self.running = false;
        }
        self.translator.apply_gamepad(&mut self.snapshot);

        //--- Step 2: Source validity --------------------------------------
        self.snapshot.accelerometer_valid = false;
        self.snapshot.mouse_valid = true;
        self.snapshot.begin_frame();

        //--- Step 3: Application ------------------------------------------
        app.update(&self.snapshot);
        app.render();

        //--- Step 4: Finalize ---------------------------------------------
        self.snapshot.finalize();

        //--- Step 5: Present ----------------------------------------------
        if let Err(e) = self.graphics.swap_buffers() {
            warn!(target: "host", "{}", e);
        }

        //--- Step 6: Pace -------------------------------------------------
        let report = self.pacer.pace();
        if report.overran() {
            self.overruns += 1;
        }

        self.frames += 1;
        let rate = self.config.tick_rate.round().max(1.0) as u64;
        if self.frames % rate == 0 {
            trace!(
                target: "host::pacing",
                "Frame {} ({} overruns so far)",
                self.frames,
                self.overruns
            );
        }
    }

    //--- teardown() -------------------------------------------------------
    //
    // Running → Stopping → TornDown.
    //
    fn teardown<A: Application>(&mut self, app: &mut A) {
        self.transition(LoopState::Stopping);

        self.compositor.stop_events();
        self.audio.set_paused(true);

        app.shutdown_graphics();
        app.shutdown();

        self.audio.close();
        self.graphics.destroy_context();
        self.release_compositor();
    }

    fn release_compositor(&mut self) {
        self.compositor.shutdown();
        self.transition(LoopState::TornDown);
    }

    fn transition(&mut self, next: LoopState) {
        debug!(target: "host", "{:?} → {:?}", self.state, next);
        self.state = next;
    }

    //--- Accessors --------------------------------------------------------

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Ticks completed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
