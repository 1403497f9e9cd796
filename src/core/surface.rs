//=========================================================================
// Surface Negotiation
//=========================================================================
//
// Reconciles the compositor's default buffer allocation with the
// orientation the application asked for.
//
// Architecture:
// ```text
//   physical mode ─┐
//   default buffer ┼─► negotiate() ─► SurfaceGeometry
//   orientation  ──┘                   ├─ buffer_size        (request to compositor)
//                                      └─ logical_resolution (reported to app)
// ```
//
// The compositor may hand out a buffer that is already rotated relative
// to the panel. When the buffer's aspect class disagrees with what the
// requested orientation needs, the buffer is transposed. The logical
// resolution is only turned for a quarter-turn correction; an upright
// correction restores the panel's own shape, which is what the
// application renders against.
//
// Pure computation: the caller applies the sizes to the real surface and
// re-queries the achieved size afterwards.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;

//=== External Crates =====================================================

use log::{debug, trace};

//=== Size ================================================================

/// Width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the same size with width and height exchanged.
    pub const fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Classifies the size by its longer edge.
    pub fn aspect(self) -> Aspect {
        match self.width.cmp(&self.height) {
            std::cmp::Ordering::Greater => Aspect::Landscape,
            std::cmp::Ordering::Less => Aspect::Portrait,
            std::cmp::Ordering::Equal => Aspect::Square,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

//=== Aspect ==============================================================

/// Aspect class of a rectangle.
///
/// Square rectangles belong to neither class, so they never count as a
/// mismatch against anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aspect {
    Landscape,
    Portrait,
    Square,
}

impl Aspect {
    /// `true` when both are non-square and of opposite classes.
    fn opposes(self, other: Aspect) -> bool {
        matches!(
            (self, other),
            (Aspect::Landscape, Aspect::Portrait) | (Aspect::Portrait, Aspect::Landscape)
        )
    }

    /// `true` when both are non-square and of the same class.
    fn agrees(self, other: Aspect) -> bool {
        self != Aspect::Square && self == other
    }
}

//=== Orientation =========================================================

/// Logical display orientation requested by the application.
///
/// Anything other than the four right angles is treated as
/// [`Orientation::Deg0`]; negotiation never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Orientation {
    /// Exact conversion; `None` for anything that isn't 0/90/180/270.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees {
            0 => Some(Self::Deg0),
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }

    /// Lenient conversion used at startup: malformed values fall back to
    /// no rotation.
    pub fn from_degrees_or_identity(degrees: i32) -> Self {
        Self::from_degrees(degrees).unwrap_or_else(|| {
            debug!(target: "host::surface", "Unsupported orientation {}°, assuming 0°", degrees);
            Self::Deg0
        })
    }

    /// Parses a raw textual value such as the `ORIENTATION` variable.
    ///
    /// Absent, non-numeric and unsupported values all yield `Deg0`.
    pub fn parse_or_identity(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None => Self::Deg0,
            Some(text) => match text.parse::<i32>() {
                Ok(degrees) => Self::from_degrees_or_identity(degrees),
                Err(_) => {
                    debug!(target: "host::surface", "Unparseable orientation {:?}, assuming 0°", text);
                    Self::Deg0
                }
            },
        }
    }

    pub const fn degrees(self) -> i32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// `true` for 90° and 270°.
    pub const fn is_quarter_turn(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

//=== SurfaceGeometry =====================================================

/// Result of a negotiation.
///
/// `buffer_size` is derived from the buffer the compositor allocated;
/// `logical_resolution` from the panel's reported mode. The two are
/// independent and may differ when the compositor scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceGeometry {
    /// Backing-store size to request from the compositor.
    pub buffer_size: Size,

    /// Pixel dimensions the application renders against.
    pub logical_resolution: Size,

    /// Rotation forwarded to the compositor.
    pub orientation: Orientation,

    /// Whether the default allocation had to be transposed.
    pub transposed: bool,
}

impl SurfaceGeometry {
    /// Density-independent resolution. Panels driven by this host are 1:1.
    pub fn dp_resolution(&self) -> Size {
        self.logical_resolution
    }
}

//=== negotiate() =========================================================

/// Computes the corrective buffer size and logical resolution.
///
/// | orientation | buffer transposed when                          |
/// |-------------|-------------------------------------------------|
/// | 0° / 180°   | panel and buffer are of opposite aspect classes |
/// | 90° / 270°  | panel and buffer are of the same aspect class   |
///
/// The logical resolution is the panel mode, transposed only when a
/// quarter-turn request transposed the buffer. Without a correction it is
/// the panel mode as-is, even if the compositor already rotated the
/// buffer.
pub fn negotiate(physical_mode: Size, default_buffer: Size, orientation: Orientation) -> SurfaceGeometry {
    let panel = physical_mode.aspect();
    let buffer = default_buffer.aspect();

    let transposed = if orientation.is_quarter_turn() {
        panel.agrees(buffer)
    } else {
        panel.opposes(buffer)
    };

    let buffer_size = if transposed {
        default_buffer.transposed()
    } else {
        default_buffer
    };

    let logical_resolution = if transposed && orientation.is_quarter_turn() {
        physical_mode.transposed()
    } else {
        physical_mode
    };

    trace!(
        target: "host::surface",
        "Negotiated panel {} ({:?}) / buffer {} ({:?}) @ {}° → buffer {}, logical {}",
        physical_mode,
        panel,
        default_buffer,
        buffer,
        orientation.degrees(),
        buffer_size,
        logical_resolution
    );

    SurfaceGeometry {
        buffer_size,
        logical_resolution,
        orientation,
        transposed,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
