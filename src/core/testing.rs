//=========================================================================
// Test Fakes
//=========================================================================
//
// Recording stand-ins for every collaborator. All fakes share one
// `CallLog`, so tests can assert on the exact cross-component call order.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::input::{InputSnapshot, PlatformEvent};
use crate::core::pacing::ManualClock;
use crate::core::platform_bridge::{
    Application, AudioSink, AudioSource, AudioSpec, Compositor, GraphicsProvider, HostError,
    PixelFormat,
};
use crate::core::surface::{Size, SurfaceGeometry};
use crate::host::LaunchInfo;

//=== Call ================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    ConfigureSurface(Size),
    StopEvents,
    DestroyWindow,
    CreateContext(Size),
    SwapBuffers,
    DestroyContext,
    AudioInit,
    OpenAudio,
    PauseAudio,
    ResumeAudio,
    CloseAudio,
    Init,
    InitGraphics,
    AudioSource,
    Update,
    Render,
    ShutdownGraphics,
    Shutdown,
}

//=== CallLog =============================================================

#[derive(Debug, Clone, Default)]
pub(crate) struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    pub(crate) fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub(crate) fn count(&self, call: &Call) -> usize {
        self.0.borrow().iter().filter(|c| *c == call).count()
    }

    /// Position of the first occurrence of `call`.
    pub(crate) fn position(&self, call: &Call) -> Option<usize> {
        self.0.borrow().iter().position(|c| c == call)
    }
}

//=== FakeCompositor ======================================================

pub(crate) struct FakeCompositor {
    log: CallLog,
    events: VecDeque<PlatformEvent>,
    pub(crate) mode: Size,
    pub(crate) default_buffer: Size,
    pub(crate) clamp_to: Option<Size>,
    pub(crate) fail_configure: bool,
    stopped: bool,
}

impl FakeCompositor {
    pub(crate) fn with_events(log: CallLog, events: Vec<PlatformEvent>) -> Self {
        Self {
            log,
            events: events.into(),
            mode: Size::new(1280, 768),
            default_buffer: Size::new(768, 1280),
            clamp_to: None,
            fail_configure: false,
            stopped: false,
        }
    }

    pub(crate) fn pending(&self) -> usize {
        self.events.len()
    }
}

impl Compositor for FakeCompositor {
    fn display_mode(&self) -> Size {
        self.mode
    }

    fn default_buffer_size(&self) -> Size {
        self.default_buffer
    }

    fn configure_surface(&mut self, geometry: &SurfaceGeometry, _buffer_count: u32) -> Result<Size, HostError> {
        self.log.push(Call::ConfigureSurface(geometry.buffer_size));
        if self.fail_configure {
            return Err(HostError::SurfaceConfig("rejected".into()));
        }
        Ok(self.clamp_to.unwrap_or(geometry.buffer_size))
    }

    fn poll_event(&mut self) -> Option<PlatformEvent> {
        if self.stopped {
            return None;
        }
        self.events.pop_front()
    }

    fn stop_events(&mut self) {
        self.stopped = true;
        self.log.push(Call::StopEvents);
    }

    fn shutdown(&mut self) {
        self.log.push(Call::DestroyWindow);
    }
}

//=== FakeGraphics ========================================================

pub(crate) struct FakeGraphics {
    log: CallLog,
    pub(crate) fail_create: bool,
    pub(crate) fail_swap: bool,
}

impl FakeGraphics {
    pub(crate) fn new(log: CallLog) -> Self {
        Self {
            log,
            fail_create: false,
            fail_swap: false,
        }
    }
}

impl GraphicsProvider for FakeGraphics {
    fn create_context(&mut self, _format: &PixelFormat, buffer_size: Size) -> Result<(), HostError> {
        self.log.push(Call::CreateContext(buffer_size));
        if self.fail_create {
            return Err(HostError::GraphicsContext("no matching config".into()));
        }
        Ok(())
    }

    fn swap_buffers(&mut self) -> Result<(), HostError> {
        self.log.push(Call::SwapBuffers);
        if self.fail_swap {
            return Err(HostError::Present("surface lost".into()));
        }
        Ok(())
    }

    fn destroy_context(&mut self) {
        self.log.push(Call::DestroyContext);
    }
}

//=== FakeAudio ===========================================================

pub(crate) struct FakeAudio {
    log: CallLog,
    pub(crate) fail_init: bool,
    pub(crate) fail_open: bool,
    source: Option<Box<dyn AudioSource>>,
}

impl FakeAudio {
    pub(crate) fn new(log: CallLog) -> Self {
        Self {
            log,
            fail_init: false,
            fail_open: false,
            source: None,
        }
    }
}

impl AudioSink for FakeAudio {
    fn initialize(&mut self) -> Result<(), HostError> {
        self.log.push(Call::AudioInit);
        if self.fail_init {
            return Err(HostError::AudioInit("no audio driver".into()));
        }
        Ok(())
    }

    fn open(&mut self, _spec: &AudioSpec, source: Box<dyn AudioSource>) -> Result<(), HostError> {
        self.log.push(Call::OpenAudio);
        if self.fail_open {
            return Err(HostError::AudioOpen("device busy".into()));
        }
        self.source = Some(source);
        Ok(())
    }

    fn set_paused(&mut self, paused: bool) {
        self.log.push(if paused { Call::PauseAudio } else { Call::ResumeAudio });
        if let (false, Some(source)) = (paused, self.source.as_mut()) {
            let mut buffer = [0i16; 4];
            source.mix(&mut buffer, 2);
        }
    }

    fn close(&mut self) {
        self.source = None;
        self.log.push(Call::CloseAudio);
    }
}

//=== RecordingApp ========================================================

pub(crate) struct Silence;

impl AudioSource for Silence {
    fn mix(&mut self, buffer: &mut [i16], frames: usize) -> usize {
        buffer.fill(0);
        frames
    }
}

pub(crate) struct RecordingApp {
    log: CallLog,
    pub(crate) launch: Option<LaunchInfo>,
    pub(crate) geometry: Option<SurfaceGeometry>,
    pub(crate) snapshots: Vec<InputSnapshot>,
    render_costs: VecDeque<Duration>,
    clock: Option<ManualClock>,
}

impl RecordingApp {
    pub(crate) fn new(log: CallLog) -> Self {
        Self {
            log,
            launch: None,
            geometry: None,
            snapshots: Vec::new(),
            render_costs: VecDeque::new(),
            clock: None,
        }
    }

    /// Each render advances `clock` by the next cost in the list.
    pub(crate) fn with_render_costs(mut self, clock: ManualClock, costs: Vec<Duration>) -> Self {
        self.clock = Some(clock);
        self.render_costs = costs.into();
        self
    }
}

impl Application for RecordingApp {
    fn init(&mut self, launch: &LaunchInfo, geometry: &SurfaceGeometry) {
        self.log.push(Call::Init);
        self.launch = Some(launch.clone());
        self.geometry = Some(*geometry);
    }

    fn init_graphics(&mut self) {
        self.log.push(Call::InitGraphics);
    }

    fn audio_source(&mut self) -> Box<dyn AudioSource> {
        self.log.push(Call::AudioSource);
        Box::new(Silence)
    }

    fn update(&mut self, input: &InputSnapshot) {
        self.log.push(Call::Update);
        self.snapshots.push(input.clone());
    }

    fn render(&mut self) {
        self.log.push(Call::Render);
        if let (Some(clock), Some(cost)) = (&self.clock, self.render_costs.pop_front()) {
            clock.advance(cost);
        }
    }

    fn shutdown_graphics(&mut self) {
        self.log.push(Call::ShutdownGraphics);
    }

    fn shutdown(&mut self) {
        self.log.push(Call::Shutdown);
    }
}
