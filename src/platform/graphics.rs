//=========================================================================
// Headless Graphics
//=========================================================================
//
// Graphics provider without a GPU. It validates the pixel-format request
// the way a config chooser would, tracks the context lifetime and counts
// presented frames. Used by the demo binary and on CI.
//
//=========================================================================

//=== External Crates =====================================================

use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{GraphicsProvider, HostError, PixelFormat};
use crate::core::surface::Size;

//=== Constants ===========================================================

/// Minimum depth bits any matching config provides.
const MIN_DEPTH_BITS: u8 = 24;

/// Minimum stencil bits any matching config provides.
const MIN_STENCIL_BITS: u8 = 8;

//=== HeadlessGraphics ====================================================

/// Context bookkeeping for a surface that is never displayed.
#[derive(Debug, Default)]
pub struct HeadlessGraphics {
    surface: Option<Size>,
    format: Option<PixelFormat>,
    presented: u64,
}

impl HeadlessGraphics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface size of the live context, if any.
    pub fn surface(&self) -> Option<Size> {
        self.surface
    }

    /// Format the live context was chosen for.
    pub fn format(&self) -> Option<&PixelFormat> {
        self.format.as_ref()
    }

    /// Buffers presented since the context was created.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    fn choose_config(format: &PixelFormat) -> Result<(), HostError> {
        let color = [format.red_bits, format.green_bits, format.blue_bits, format.alpha_bits];
        if color != [8, 8, 8, 8] {
            return Err(HostError::GraphicsContext(format!(
                "no config for color channels {:?}",
                color
            )));
        }
        if format.depth_bits < MIN_DEPTH_BITS || format.stencil_bits < MIN_STENCIL_BITS {
            return Err(HostError::GraphicsContext(format!(
                "no config with depth {} / stencil {}",
                format.depth_bits, format.stencil_bits
            )));
        }
        if format.buffer_count == 0 {
            return Err(HostError::GraphicsContext("buffer count must be positive".into()));
        }
        Ok(())
    }
}

impl GraphicsProvider for HeadlessGraphics {
    fn create_context(&mut self, format: &PixelFormat, buffer_size: Size) -> Result<(), HostError> {
        if self.surface.is_some() {
            return Err(HostError::GraphicsContext("context already exists".into()));
        }
        if buffer_size.width == 0 || buffer_size.height == 0 {
            return Err(HostError::GraphicsContext(format!("empty surface {}", buffer_size)));
        }
        Self::choose_config(format)?;

        info!(
            target: "platform",
            "Headless context {} ({} buffers, swap interval {})",
            buffer_size,
            format.buffer_count,
            format.swap_interval
        );
        self.surface = Some(buffer_size);
        self.format = Some(*format);
        self.presented = 0;
        Ok(())
    }

    fn swap_buffers(&mut self) -> Result<(), HostError> {
        if self.surface.is_none() {
            return Err(HostError::Present("no current context".into()));
        }
        self.presented += 1;
        trace!(target: "platform", "Present #{}", self.presented);
        Ok(())
    }

    fn destroy_context(&mut self) {
        if self.surface.take().is_some() {
            debug!(target: "platform", "Headless context destroyed after {} frames", self.presented);
        }
        self.format = None;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
