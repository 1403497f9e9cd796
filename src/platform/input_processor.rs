//=========================================================================
// Input Processor
//=========================================================================
//
// Converts Winit window events into portable PlatformEvents.
//
// Architecture:
//   Winit Events → InputProcessor → PlatformEvent → compositor queue
//
// Stateful pointer tracking: Winit reports cursor motion and button
// transitions separately, so the processor caches the last cursor position
// and the button mask and emits one combined pointer report per change.
// The mouse is reported as pointer slot 0. Unmapped keys and key repeats
// are filtered (returns None).
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, TouchPhase as WinitTouchPhase},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{KeyCode, PlatformEvent, PointerButtons, TouchPhase};

//=== Constants ===========================================================

/// Pointer slot used for the mouse.
pub(crate) const MOUSE_POINTER_ID: i64 = 0;

//=== InputProcessor ======================================================

/// Converts Winit events to platform events with cached cursor state.
pub(crate) struct InputProcessor {
    cursor: Option<(i32, i32)>,
    buttons: PointerButtons,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            cursor: None,
            buttons: PointerButtons::empty(),
        }
    }

    //--- Pointer ----------------------------------------------------------

    /// Caches the cursor position. Motion is only reported while a button
    /// is held (a drag); hover does not touch pointer slots.
    pub(crate) fn process_cursor_moved(&mut self, position: PhysicalPosition<f64>) -> Option<PlatformEvent> {
        let (x, y) = to_pixels(position);
        self.cursor = Some((x, y));

        if self.buttons.is_empty() {
            return None;
        }
        Some(self.pointer_event(x, y))
    }

    /// Updates the button mask and reports it at the last cursor position.
    ///
    /// Returns `None` until the cursor has entered the window once.
    pub(crate) fn process_mouse_button(&mut self, button: WinitMouseButton, state: ElementState) -> Option<PlatformEvent> {
        let flag = PointerButtons::from(button);
        if flag.is_empty() {
            return None;
        }
        self.buttons.set(flag, state.is_pressed());

        let (x, y) = self.cursor?;
        Some(self.pointer_event(x, y))
    }

    /// Cursor left the window: any held button is released there.
    pub(crate) fn process_cursor_left(&mut self) -> Option<PlatformEvent> {
        if self.buttons.is_empty() {
            return None;
        }
        self.buttons = PointerButtons::empty();
        let (x, y) = self.cursor.take()?;
        Some(self.pointer_event(x, y))
    }

    #[cfg(test)]
    pub(crate) fn buttons(&self) -> PointerButtons {
        self.buttons
    }

    //--- Touch ------------------------------------------------------------

    /// Converts a touch report. Ids that do not fit `i64` are forwarded as
    /// `i64::MAX` so the translator drops them as out of range.
    pub(crate) fn process_touch(&self, id: u64, phase: WinitTouchPhase, location: PhysicalPosition<f64>) -> PlatformEvent {
        let (x, y) = to_pixels(location);
        let phase = match phase {
            WinitTouchPhase::Started | WinitTouchPhase::Moved => TouchPhase::Down,
            WinitTouchPhase::Ended | WinitTouchPhase::Cancelled => TouchPhase::Up,
        };
        PlatformEvent::Touch {
            id: i64::try_from(id).unwrap_or(i64::MAX),
            x,
            y,
            phase,
        }
    }

    //--- Keyboard ---------------------------------------------------------

    /// Converts Winit KeyEvent to a key transition (filters repeats and
    /// unmapped keys).
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<PlatformEvent> {
        if key_event.repeat {
            return None;
        }
        let PhysicalKey::Code(code) = key_event.physical_key else {
            return None;
        };
        self.key_transition(KeyCode::from(code), key_event.state)
    }

    //--- Internal Helpers -------------------------------------------------

    fn key_transition(&self, key: KeyCode, state: ElementState) -> Option<PlatformEvent> {
        if key == KeyCode::Unidentified {
            return None;
        }
        Some(PlatformEvent::Key {
            key,
            pressed: state.is_pressed(),
        })
    }

    fn pointer_event(&self, x: i32, y: i32) -> PlatformEvent {
        PlatformEvent::Pointer {
            id: MOUSE_POINTER_ID,
            x,
            y,
            buttons: self.buttons,
        }
    }
}

fn to_pixels(position: PhysicalPosition<f64>) -> (i32, i32) {
    (position.x.round() as i32, position.y.round() as i32)
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Left/Right/Middle map to the pointer mask; other buttons are ignored.
impl From<WinitMouseButton> for PointerButtons {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => PointerButtons::PRIMARY,
            WinitMouseButton::Right => PointerButtons::SECONDARY,
            WinitMouseButton::Middle => PointerButtons::MIDDLE,
            _ => PointerButtons::empty(),
        }
    }
}

/// Converts Winit physical key codes to host key codes.
///
/// Maps A-Z, 0-9, arrows, the numpad diamond and a few special keys.
/// Everything else returns `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------

            Digit0 => KeyCode::Digit0,
            Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2,
            Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4,
            Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6,
            Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8,
            Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------

            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            //--- Arrows -------------------------------------------------------

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Numpad -------------------------------------------------------

            Numpad2 => KeyCode::Numpad2,
            Numpad4 => KeyCode::Numpad4,
            Numpad6 => KeyCode::Numpad6,
            Numpad8 => KeyCode::Numpad8,

            //--- Special ------------------------------------------------------

            Space => KeyCode::Space,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Backspace => KeyCode::Backspace,

            //--- Unmapped (return Unidentified) -------------------------------

            _ => KeyCode::Unidentified,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64) -> PhysicalPosition<f64> {
        PhysicalPosition::new(x, y)
    }

    //=====================================================================
    // Pointer Tests
    //=====================================================================

    #[test]
    fn starts_with_no_buttons() {
        let processor = InputProcessor::new();
        assert!(processor.buttons().is_empty());
    }

    #[test]
    fn hover_is_not_reported() {
        let mut processor = InputProcessor::new();
        assert_eq!(processor.process_cursor_moved(at(10.0, 10.0)), None);
    }

    #[test]
    fn click_before_cursor_enters_is_dropped() {
        let mut processor = InputProcessor::new();
        let event = processor.process_mouse_button(WinitMouseButton::Left, ElementState::Pressed);

        assert_eq!(event, None);
        assert_eq!(processor.buttons(), PointerButtons::PRIMARY);
    }

    #[test]
    fn press_drag_release_sequence() {
        let mut processor = InputProcessor::new();
        processor.process_cursor_moved(at(10.4, 20.6));

        let down = processor.process_mouse_button(WinitMouseButton::Left, ElementState::Pressed);
        let drag = processor.process_cursor_moved(at(15.0, 22.0));
        let up = processor.process_mouse_button(WinitMouseButton::Left, ElementState::Released);

        assert_eq!(
            down,
            Some(PlatformEvent::Pointer { id: 0, x: 10, y: 21, buttons: PointerButtons::PRIMARY })
        );
        assert_eq!(
            drag,
            Some(PlatformEvent::Pointer { id: 0, x: 15, y: 22, buttons: PointerButtons::PRIMARY })
        );
        assert_eq!(
            up,
            Some(PlatformEvent::Pointer { id: 0, x: 15, y: 22, buttons: PointerButtons::empty() })
        );
    }

    #[test]
    fn mask_tracks_multiple_buttons() {
        let mut processor = InputProcessor::new();
        processor.process_cursor_moved(at(0.0, 0.0));

        processor.process_mouse_button(WinitMouseButton::Left, ElementState::Pressed);
        processor.process_mouse_button(WinitMouseButton::Right, ElementState::Pressed);
        processor.process_mouse_button(WinitMouseButton::Left, ElementState::Released);

        assert_eq!(processor.buttons(), PointerButtons::SECONDARY);
    }

    #[test]
    fn back_button_is_ignored() {
        let mut processor = InputProcessor::new();
        processor.process_cursor_moved(at(0.0, 0.0));

        assert_eq!(processor.process_mouse_button(WinitMouseButton::Back, ElementState::Pressed), None);
    }

    #[test]
    fn leaving_the_window_releases_held_buttons() {
        let mut processor = InputProcessor::new();
        processor.process_cursor_moved(at(5.0, 6.0));
        processor.process_mouse_button(WinitMouseButton::Left, ElementState::Pressed);

        let event = processor.process_cursor_left();

        assert_eq!(
            event,
            Some(PlatformEvent::Pointer { id: 0, x: 5, y: 6, buttons: PointerButtons::empty() })
        );
        assert!(processor.buttons().is_empty());
    }

    //=====================================================================
    // Touch Tests
    //=====================================================================

    #[test]
    fn touch_phases_collapse_to_down_and_up() {
        let processor = InputProcessor::new();

        let started = processor.process_touch(3, WinitTouchPhase::Started, at(10.0, 20.0));
        let moved = processor.process_touch(3, WinitTouchPhase::Moved, at(11.0, 20.0));
        let cancelled = processor.process_touch(3, WinitTouchPhase::Cancelled, at(11.0, 20.0));

        assert_eq!(started, PlatformEvent::touch_down(3, 10, 20));
        assert_eq!(moved, PlatformEvent::touch_down(3, 11, 20));
        assert_eq!(cancelled, PlatformEvent::touch_up(3, 11, 20));
    }

    #[test]
    fn huge_touch_id_saturates() {
        let processor = InputProcessor::new();
        let event = processor.process_touch(u64::MAX, WinitTouchPhase::Ended, at(0.0, 0.0));
        assert_eq!(event, PlatformEvent::touch_up(i64::MAX, 0, 0));
    }

    //=====================================================================
    // Keyboard Tests
    //=====================================================================

    #[test]
    fn key_transition_carries_state() {
        let processor = InputProcessor::new();

        assert_eq!(
            processor.key_transition(KeyCode::KeyS, ElementState::Pressed),
            Some(PlatformEvent::Key { key: KeyCode::KeyS, pressed: true })
        );
        assert_eq!(
            processor.key_transition(KeyCode::KeyS, ElementState::Released),
            Some(PlatformEvent::Key { key: KeyCode::KeyS, pressed: false })
        );
    }

    #[test]
    fn unidentified_key_is_filtered() {
        let processor = InputProcessor::new();
        assert_eq!(processor.key_transition(KeyCode::Unidentified, ElementState::Pressed), None);
    }

    #[test]
    fn keycode_conversion_filters_unidentified() {
        assert_eq!(KeyCode::from(WinitKeyCode::F13), KeyCode::Unidentified);
    }

    #[test]
    fn keycode_conversion_alphabetic() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyA), KeyCode::KeyA);
        assert_eq!(KeyCode::from(WinitKeyCode::KeyZ), KeyCode::KeyZ);
    }

    #[test]
    fn keycode_conversion_numpad_diamond() {
        assert_eq!(KeyCode::from(WinitKeyCode::Numpad8), KeyCode::Numpad8);
        assert_eq!(KeyCode::from(WinitKeyCode::Numpad4), KeyCode::Numpad4);
        assert_eq!(KeyCode::from(WinitKeyCode::Numpad5), KeyCode::Unidentified);
    }

    #[test]
    fn mouse_button_conversion() {
        assert_eq!(PointerButtons::from(WinitMouseButton::Left), PointerButtons::PRIMARY);
        assert_eq!(PointerButtons::from(WinitMouseButton::Right), PointerButtons::SECONDARY);
        assert_eq!(PointerButtons::from(WinitMouseButton::Middle), PointerButtons::MIDDLE);
    }
}
