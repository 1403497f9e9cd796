//=========================================================================
// Software Audio Sink
//=========================================================================
//
// Clock-driven audio output for machines without a usable device (CI,
// headless simulators).
//
// Architecture:
// ```text
//  Loop Thread                       Mix Thread ("audio-mix")
//  ┌───────────────────┐             ┌─────────────────────────────┐
//  │ set_paused(bool) ─┼── Command ─►│ recv_deadline(next callback)│
//  │ close()          ─┼── Command ─►│   timeout + unpaused:       │
//  └───────────────────┘             │     source.mix(buffer)      │
//                                    │     silence unwritten tail  │
//                                    │     forward to monitor      │
//                                    └─────────────────────────────┘
// ```
//
// Callbacks fire every `frames / sample_rate` seconds. The device opens
// paused. Pause commands are acknowledged by the mix thread, so once
// `set_paused(true)` returns no callback is running or will start until
// the sink is unpaused. `close()` joins the thread, so the source is
// never called after it returns.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender};
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{AudioSink, AudioSource, AudioSpec, HostError};

//=== Command =============================================================

#[derive(Debug)]
enum Command {
    /// New paused state and the acknowledgement channel.
    Pause(bool, Sender<()>),
    Close,
}

//=== SoftwareAudioSink ===================================================

/// Audio sink that runs the mix callback on its own timer thread.
///
/// Mixed buffers are discarded unless a monitor channel is attached with
/// [`with_monitor`](Self::with_monitor).
pub struct SoftwareAudioSink {
    initialized: bool,
    monitor: Option<Sender<Vec<i16>>>,
    callbacks: Arc<AtomicU64>,
    stream: Option<MixThread>,
}

struct MixThread {
    commands: Sender<Command>,
    handle: JoinHandle<()>,
}

impl SoftwareAudioSink {
    pub fn new() -> Self {
        Self {
            initialized: false,
            monitor: None,
            callbacks: Arc::new(AtomicU64::new(0)),
            stream: None,
        }
    }

    /// Forwards every mixed buffer to `monitor`.
    pub fn with_monitor(mut self, monitor: Sender<Vec<i16>>) -> Self {
        self.monitor = Some(monitor);
        self
    }

    /// Number of mix callbacks delivered so far.
    pub fn callbacks(&self) -> u64 {
        self.callbacks.load(Ordering::Relaxed)
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// Sends a pause command and blocks until the mix thread has applied
    /// it. Commands are handled between callbacks, so an in-flight mix
    /// finishes first.
    fn pause(&self, paused: bool) {
        let Some(stream) = &self.stream else {
            return;
        };
        let (ack, acked) = bounded(1);
        if stream.commands.send(Command::Pause(paused, ack)).is_err() {
            warn!(target: "platform::audio", "Mix thread gone, dropping pause({})", paused);
            return;
        }
        // A disconnect means the thread exited and no longer mixes.
        if acked.recv().is_err() {
            warn!(target: "platform::audio", "Mix thread exited before acknowledging pause({})", paused);
        }
    }
}

impl Default for SoftwareAudioSink {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioSink for SoftwareAudioSink {
    fn initialize(&mut self) -> Result<(), HostError> {
        self.initialized = true;
        debug!(target: "platform::audio", "Software audio initialized");
        Ok(())
    }

    fn open(&mut self, spec: &AudioSpec, source: Box<dyn AudioSource>) -> Result<(), HostError> {
        if !self.initialized {
            return Err(HostError::AudioOpen("audio subsystem not initialized".into()));
        }
        if self.stream.is_some() {
            return Err(HostError::AudioOpen("device already open".into()));
        }

        let (commands, receiver) = unbounded();
        let worker = MixWorker {
            spec: *spec,
            source,
            commands: receiver,
            monitor: self.monitor.clone(),
            callbacks: Arc::clone(&self.callbacks),
        };

        let handle = thread::Builder::new()
            .name("audio-mix".into())
            .spawn(move || worker.run())
            .map_err(|e| HostError::AudioOpen(e.to_string()))?;

        info!(
            target: "platform::audio",
            "Software audio open: {} Hz, {} ch, {} frames/callback",
            spec.sample_rate,
            spec.channels,
            spec.frames
        );
        self.stream = Some(MixThread { commands, handle });
        Ok(())
    }

    fn set_paused(&mut self, paused: bool) {
        self.pause(paused);
    }

    fn close(&mut self) {
        let Some(stream) = self.stream.take() else {
            return;
        };
        // A dead thread already stopped calling the source.
        let _ = stream.commands.send(Command::Close);
        if stream.handle.join().is_err() {
            warn!(target: "platform::audio", "Mix thread panicked");
        }
        info!(target: "platform::audio", "Software audio closed after {} callbacks", self.callbacks());
    }
}

impl Drop for SoftwareAudioSink {
    fn drop(&mut self) {
        self.close();
    }
}

//=== MixWorker ===========================================================

struct MixWorker {
    spec: AudioSpec,
    source: Box<dyn AudioSource>,
    commands: Receiver<Command>,
    monitor: Option<Sender<Vec<i16>>>,
    callbacks: Arc<AtomicU64>,
}

impl MixWorker {
    fn run(mut self) {
        let period = Duration::from_secs_f64(f64::from(self.spec.frames) / f64::from(self.spec.sample_rate));
        let frames = self.spec.frames as usize;
        let channels = self.spec.channels as usize;
        let mut buffer = vec![0i16; self.spec.samples_per_callback()];
        let mut paused = true;
        let mut next = Instant::now() + period;

        loop {
            match self.commands.recv_deadline(next) {
                Ok(Command::Pause(p, ack)) => {
                    if paused && !p {
                        next = Instant::now() + period;
                    }
                    paused = p;
                    // The sender may have given up waiting.
                    let _ = ack.send(());
                }
                Ok(Command::Close) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {
                    next += period;
                    if paused {
                        continue;
                    }
                    let written = self.source.mix(&mut buffer, frames).min(frames);
                    buffer[written * channels..].fill(0);
                    self.callbacks.fetch_add(1, Ordering::Relaxed);

                    if let Some(monitor) = &self.monitor {
                        // A closed monitor just means nobody is listening.
                        let _ = monitor.send(buffer.clone());
                    }
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
