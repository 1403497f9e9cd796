//=========================================================================
// Platform Event Types
//
// Normalized representation of what the compositor delivers: touches,
// pointer (mouse/simulator) reports, key transitions and lifecycle
// signals.
//
// Event Flow:
// ```text
// Compositor (winit, native shell, test fake)
//         ↓
//    PlatformEvent (this module)
//         ↓
//    EventTranslator (mutates the live InputSnapshot)
//         ↓
//    Application::update(&InputSnapshot)
// ```
//
// Pointer ids are carried as reported by the platform (`i64`) and only
// validated by the translator, so a bogus id never needs to be rejected
// at the backend.
//
//=========================================================================

//=== External Crates =====================================================

use bitflags::bitflags;

//=== TouchPhase ==========================================================

/// Phase of a multi-touch contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// Finger went down or moved while down.
    Down,

    /// Finger lifted (or the contact was cancelled).
    Up,
}

//=== PointerButtons ======================================================

bitflags! {
    /// Button mask carried by pointer reports.
    ///
    /// Only the primary button drives pointer slots; the others are
    /// carried for completeness.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PointerButtons: u8 {
        const PRIMARY   = 1 << 0;
        const SECONDARY = 1 << 1;
        const MIDDLE    = 1 << 2;
    }
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Covers the keys used by gamepad simulation plus the common alphanumeric
/// set. Anything else arrives as `Unidentified` and is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Numpad -----------------------------------------------------------

    /// Right-stick simulation uses the numpad diamond.
    Numpad2,
    Numpad4,
    Numpad6,
    Numpad8,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Backspace,

    /// Fallback for keys the backend could not map.
    Unidentified,
}

//=== PlatformEvent =======================================================

/// A single raw event pulled from the compositor's queue.
///
/// Coordinates are buffer pixels, top-left origin.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// Multi-touch contact report.
    Touch {
        id: i64,
        x: i32,
        y: i32,
        phase: TouchPhase,
    },

    /// Mouse or simulator pointer report with the current button mask.
    Pointer {
        id: i64,
        x: i32,
        y: i32,
        buttons: PointerButtons,
    },

    /// Key transition.
    Key { key: KeyCode, pressed: bool },

    /// The navigator asked the application to exit.
    ExitRequested,

    /// Anything the backend could not classify. Ignored.
    Unidentified,
}

impl PlatformEvent {
    /// Convenience constructor for a touch-down (or move) report.
    pub fn touch_down(id: i64, x: i32, y: i32) -> Self {
        Self::Touch { id, x, y, phase: TouchPhase::Down }
    }

    /// Convenience constructor for a touch-up report.
    pub fn touch_up(id: i64, x: i32, y: i32) -> Self {
        Self::Touch { id, x, y, phase: TouchPhase::Up }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
