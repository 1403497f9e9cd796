//=========================================================================
// Device Audio (cpal)
//=========================================================================
//
// Audio sink on the default output device. The stream is built with the
// fixed host format (interleaved i16) and a fixed callback size, starts
// paused, and is dropped on close, which stops the callback.
//
//=========================================================================

//=== External Crates =====================================================

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use log::{error, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{AudioSink, AudioSource, AudioSpec, HostError};

//=== CpalAudioSink =======================================================

/// Output through the platform's default audio device.
#[derive(Default)]
pub struct CpalAudioSink {
    device: Option<Device>,
    stream: Option<Stream>,
}

impl CpalAudioSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioSink for CpalAudioSink {
    fn initialize(&mut self) -> Result<(), HostError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| HostError::AudioInit("no default output device".to_string()))?;

        info!(
            target: "platform::audio",
            "Audio host {:?}, device {}",
            host.id(),
            device.name().unwrap_or_else(|_| "<unnamed>".to_string())
        );
        self.device = Some(device);
        Ok(())
    }

    fn open(&mut self, spec: &AudioSpec, mut source: Box<dyn AudioSource>) -> Result<(), HostError> {
        let device = self
            .device
            .as_ref()
            .ok_or_else(|| HostError::AudioOpen("audio subsystem not initialized".to_string()))?;

        let config = StreamConfig {
            channels: spec.channels,
            sample_rate: cpal::SampleRate(spec.sample_rate),
            buffer_size: cpal::BufferSize::Fixed(spec.frames),
        };
        let channels = usize::from(spec.channels);

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                    let frames = data.len() / channels;
                    let written = source.mix(data, frames).min(frames);
                    data[written * channels..].fill(0);
                },
                move |err| {
                    error!(target: "platform::audio", "Stream error: {}", err);
                },
                None,
            )
            .map_err(|e| HostError::AudioOpen(format!("failed to build stream: {}", e)))?;

        stream
            .pause()
            .map_err(|e| HostError::AudioOpen(format!("failed to pause stream: {}", e)))?;

        info!(
            target: "platform::audio",
            "Device audio open: {} Hz, {} ch, {} frames/callback",
            spec.sample_rate,
            spec.channels,
            spec.frames
        );
        self.stream = Some(stream);
        Ok(())
    }

    fn set_paused(&mut self, paused: bool) {
        let Some(stream) = &self.stream else {
            return;
        };
        let result = if paused { stream.pause() } else { stream.play() };
        if let Err(e) = result {
            warn!(target: "platform::audio", "Failed to {} stream: {}", if paused { "pause" } else { "play" }, e);
        }
    }

    fn close(&mut self) {
        if self.stream.take().is_some() {
            info!(target: "platform::audio", "Device audio closed");
        }
        self.device = None;
    }
}
