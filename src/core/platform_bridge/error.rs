//=========================================================================
// Host Errors
//=========================================================================
//
// Fatal initialization failures. Per-tick conditions (dropped events,
// late frames, failed swaps) are never surfaced as errors to the
// application; they are logged and absorbed by the run loop.
//
//=========================================================================

//=== External Crates =====================================================

use thiserror::Error;

//=== HostError ===========================================================

/// Errors reported by collaborators.
#[derive(Debug, Error)]
pub enum HostError {
    /// Windowing context or event loop could not be created.
    #[error("compositor unavailable: {0}")]
    Compositor(String),

    /// Buffer size, rotation or window buffers were rejected.
    #[error("surface configuration failed: {0}")]
    SurfaceConfig(String),

    /// No matching config, or context/surface creation failed.
    #[error("graphics context creation failed: {0}")]
    GraphicsContext(String),

    /// Audio subsystem could not be brought up.
    #[error("audio subsystem initialization failed: {0}")]
    AudioInit(String),

    /// Audio device could not be opened with the fixed format.
    #[error("failed to open audio: {0}")]
    AudioOpen(String),

    /// Buffer swap failed. Advisory only; the run loop logs and continues.
    #[error("buffer swap failed: {0}")]
    Present(String),
}

impl HostError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// `true` for errors that abort startup.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Present(_))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
