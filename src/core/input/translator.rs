//=========================================================================
// Event Translator
//=========================================================================
//
// Applies one raw platform event to the live InputSnapshot.
//
// Architecture:
//   PlatformEvent → translate() → InputSnapshot mutation → Translation
//
// Per-tick errors never escape: out-of-range ids and unclassified events
// are reported as `Translation::Ignored` and logged at debug level.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashSet;

//=== External Crates =====================================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::event::{KeyCode, PlatformEvent, PointerButtons, TouchPhase};
use super::gamepad::GamepadSimulator;
use super::snapshot::{InputSnapshot, Pointer};

//=== Translation =========================================================

/// Outcome of translating a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Translation {
    /// The snapshot (or held-key set) was updated.
    Applied,

    /// The event had no effect.
    Ignored(IgnoreReason),

    /// The navigator asked the application to exit.
    ExitRequested,
}

/// Why an event was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Pointer id outside `[0, MAX_POINTERS)`.
    PointerOutOfRange,

    /// Pointer released while its slot was not down.
    SpuriousRelease,

    /// Key the backend could not map.
    UnmappedKey,

    /// Event the backend could not classify.
    Unidentified,
}

//=== EventTranslator =====================================================

/// Converts platform events into snapshot mutations.
///
/// Also tracks held keys so the optional gamepad simulation can fold them
/// into the snapshot once per tick.
#[derive(Debug, Default)]
pub struct EventTranslator {
    held_keys: HashSet<KeyCode>,
    simulator: Option<GamepadSimulator>,
}

impl EventTranslator {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self::default()
    }

    /// Enables digital gamepad simulation from keyboard events.
    pub fn with_gamepad_simulation(mut self, enabled: bool) -> Self {
        self.simulator = enabled.then(GamepadSimulator::new);
        self
    }

    //--- Translation ------------------------------------------------------

    /// Applies `event` to `snapshot`.
    pub fn translate(&mut self, event: &PlatformEvent, snapshot: &mut InputSnapshot) -> Translation {
        match *event {
            PlatformEvent::Touch { id, x, y, phase } => match phase {
                TouchPhase::Down => press(snapshot, id, x, y),
                TouchPhase::Up => release(snapshot, id, x, y),
            },

            PlatformEvent::Pointer { id, x, y, buttons } => {
                if buttons.contains(PointerButtons::PRIMARY) {
                    press(snapshot, id, x, y)
                } else {
                    release(snapshot, id, x, y)
                }
            }

            PlatformEvent::Key { key, pressed } => self.key(key, pressed),

            PlatformEvent::ExitRequested => {
                debug!(target: "host::input", "Exit requested by navigator");
                Translation::ExitRequested
            }

            PlatformEvent::Unidentified => {
                trace!(target: "host::input", "Unidentified platform event dropped");
                Translation::Ignored(IgnoreReason::Unidentified)
            }
        }
    }

    /// Folds held keys into the snapshot's gamepad fields, if enabled.
    pub fn apply_gamepad(&self, snapshot: &mut InputSnapshot) {
        if let Some(simulator) = &self.simulator {
            simulator.apply(&self.held_keys, snapshot);
        }
    }

    /// Keys currently held.
    pub fn held_keys(&self) -> &HashSet<KeyCode> {
        &self.held_keys
    }

    //--- Internal Helpers -------------------------------------------------

    fn key(&mut self, key: KeyCode, pressed: bool) -> Translation {
        if key == KeyCode::Unidentified {
            debug!(target: "host::input", "Unmapped key ignored");
            return Translation::Ignored(IgnoreReason::UnmappedKey);
        }

        if pressed {
            self.held_keys.insert(key);
        } else {
            self.held_keys.remove(&key);
        }
        Translation::Applied
    }
}

//=== Slot Mutations ======================================================

fn press(snapshot: &mut InputSnapshot, id: i64, x: i32, y: i32) -> Translation {
    match snapshot.pointers.get_mut(id) {
        Some(pointer) => {
            *pointer = Pointer { x, y, down: true };
            Translation::Applied
        }
        None => out_of_range(id),
    }
}

/// Releases a held slot. A slot that is not down is left untouched.
fn release(snapshot: &mut InputSnapshot, id: i64, x: i32, y: i32) -> Translation {
    match snapshot.pointers.get_mut(id) {
        Some(pointer) if pointer.down => {
            *pointer = Pointer { x, y, down: false };
            Translation::Applied
        }
        Some(_) => Translation::Ignored(IgnoreReason::SpuriousRelease),
        None => out_of_range(id),
    }
}

fn out_of_range(id: i64) -> Translation {
    debug!(target: "host::input", "Pointer id {} out of range, event dropped", id);
    Translation::Ignored(IgnoreReason::PointerOutOfRange)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::snapshot::GamepadButtons;

    //--- Test Helpers -----------------------------------------------------

    fn pointer(id: i64, x: i32, y: i32, buttons: PointerButtons) -> PlatformEvent {
        PlatformEvent::Pointer { id, x, y, buttons }
    }

    fn key(key: KeyCode, pressed: bool) -> PlatformEvent {
        PlatformEvent::Key { key, pressed }
    }

    //=====================================================================
    // Touch
    //=====================================================================

    #[test]
    fn touch_down_then_up_keeps_last_position() {
        let mut translator = EventTranslator::new();
        let mut snapshot = InputSnapshot::new();

        translator.translate(&PlatformEvent::touch_down(3, 10, 20), &mut snapshot);
        assert_eq!(snapshot.pointers.get(3), Some(&Pointer { x: 10, y: 20, down: true }));

        translator.translate(&PlatformEvent::touch_up(3, 15, 22), &mut snapshot);
        assert_eq!(snapshot.pointers.get(3), Some(&Pointer { x: 15, y: 22, down: false }));
    }

    #[test]
    fn touch_move_updates_held_slot() {
        let mut translator = EventTranslator::new();
        let mut snapshot = InputSnapshot::new();

        translator.translate(&PlatformEvent::touch_down(0, 1, 1), &mut snapshot);
        translator.translate(&PlatformEvent::touch_down(0, 40, 50), &mut snapshot);

        assert_eq!(snapshot.pointers.get(0), Some(&Pointer { x: 40, y: 50, down: true }));
    }

    #[test]
    fn out_of_range_touch_is_dropped() {
        let mut translator = EventTranslator::new();
        let mut snapshot = InputSnapshot::new();
        let before = snapshot.clone();

        let outcome = translator.translate(&PlatformEvent::touch_down(999, 1, 2), &mut snapshot);
        assert_eq!(outcome, Translation::Ignored(IgnoreReason::PointerOutOfRange));

        let outcome = translator.translate(&PlatformEvent::touch_up(-4, 1, 2), &mut snapshot);
        assert_eq!(outcome, Translation::Ignored(IgnoreReason::PointerOutOfRange));

        assert_eq!(snapshot, before);
    }

    #[test]
    fn spurious_touch_release_leaves_slot_untouched() {
        let mut translator = EventTranslator::new();
        let mut snapshot = InputSnapshot::new();

        let outcome = translator.translate(&PlatformEvent::touch_up(5, 77, 88), &mut snapshot);

        assert_eq!(outcome, Translation::Ignored(IgnoreReason::SpuriousRelease));
        assert_eq!(snapshot.pointers.get(5), Some(&Pointer::default()));
    }

    #[test]
    fn second_touch_release_keeps_first_release_position() {
        let mut translator = EventTranslator::new();
        let mut snapshot = InputSnapshot::new();

        translator.translate(&PlatformEvent::touch_down(2, 1, 1), &mut snapshot);
        translator.translate(&PlatformEvent::touch_up(2, 4, 4), &mut snapshot);
        let outcome = translator.translate(&PlatformEvent::touch_up(2, 9, 9), &mut snapshot);

        assert_eq!(outcome, Translation::Ignored(IgnoreReason::SpuriousRelease));
        assert_eq!(snapshot.pointers.get(2), Some(&Pointer { x: 4, y: 4, down: false }));
    }

    #[test]
    fn multiple_contacts_use_independent_slots() {
        let mut translator = EventTranslator::new();
        let mut snapshot = InputSnapshot::new();

        translator.translate(&PlatformEvent::touch_down(0, 1, 1), &mut snapshot);
        translator.translate(&PlatformEvent::touch_down(1, 2, 2), &mut snapshot);
        translator.translate(&PlatformEvent::touch_up(0, 3, 3), &mut snapshot);

        assert_eq!(snapshot.pointers.down_count(), 1);
        assert_eq!(snapshot.pointers.get(1), Some(&Pointer { x: 2, y: 2, down: true }));
    }

    //=====================================================================
    // Pointer
    //=====================================================================

    #[test]
    fn pointer_press_and_release() {
        let mut translator = EventTranslator::new();
        let mut snapshot = InputSnapshot::new();

        let outcome = translator.translate(&pointer(0, 5, 6, PointerButtons::PRIMARY), &mut snapshot);
        assert_eq!(outcome, Translation::Applied);
        assert_eq!(snapshot.pointers.get(0), Some(&Pointer { x: 5, y: 6, down: true }));

        let outcome = translator.translate(&pointer(0, 7, 8, PointerButtons::empty()), &mut snapshot);
        assert_eq!(outcome, Translation::Applied);
        assert_eq!(snapshot.pointers.get(0), Some(&Pointer { x: 7, y: 8, down: false }));
    }

    #[test]
    fn spurious_pointer_release_leaves_slot_untouched() {
        let mut translator = EventTranslator::new();
        let mut snapshot = InputSnapshot::new();

        let outcome = translator.translate(&pointer(4, 90, 91, PointerButtons::empty()), &mut snapshot);

        assert_eq!(outcome, Translation::Ignored(IgnoreReason::SpuriousRelease));
        assert_eq!(snapshot.pointers.get(4), Some(&Pointer::default()));
    }

    #[test]
    fn secondary_button_alone_does_not_press() {
        let mut translator = EventTranslator::new();
        let mut snapshot = InputSnapshot::new();

        translator.translate(&pointer(0, 1, 1, PointerButtons::SECONDARY), &mut snapshot);

        assert_eq!(snapshot.pointers.down_count(), 0);
    }

    #[test]
    fn out_of_range_pointer_is_dropped() {
        let mut translator = EventTranslator::new();
        let mut snapshot = InputSnapshot::new();

        let press = translator.translate(&pointer(10, 1, 1, PointerButtons::PRIMARY), &mut snapshot);
        let release = translator.translate(&pointer(10, 1, 1, PointerButtons::empty()), &mut snapshot);

        assert_eq!(press, Translation::Ignored(IgnoreReason::PointerOutOfRange));
        assert_eq!(release, Translation::Ignored(IgnoreReason::PointerOutOfRange));
    }

    //=====================================================================
    // Keys, Lifecycle, Gamepad
    //=====================================================================

    #[test]
    fn exit_request_is_reported() {
        let mut translator = EventTranslator::new();
        let mut snapshot = InputSnapshot::new();

        let outcome = translator.translate(&PlatformEvent::ExitRequested, &mut snapshot);

        assert_eq!(outcome, Translation::ExitRequested);
        assert_eq!(snapshot, InputSnapshot::new());
    }

    #[test]
    fn unmapped_and_unidentified_are_ignored() {
        let mut translator = EventTranslator::new();
        let mut snapshot = InputSnapshot::new();

        assert_eq!(
            translator.translate(&key(KeyCode::Unidentified, true), &mut snapshot),
            Translation::Ignored(IgnoreReason::UnmappedKey)
        );
        assert_eq!(
            translator.translate(&PlatformEvent::Unidentified, &mut snapshot),
            Translation::Ignored(IgnoreReason::Unidentified)
        );
        assert!(translator.held_keys().is_empty());
    }

    #[test]
    fn held_keys_track_press_and_release() {
        let mut translator = EventTranslator::new();
        let mut snapshot = InputSnapshot::new();

        translator.translate(&key(KeyCode::KeyX, true), &mut snapshot);
        assert!(translator.held_keys().contains(&KeyCode::KeyX));

        translator.translate(&key(KeyCode::KeyX, false), &mut snapshot);
        assert!(translator.held_keys().is_empty());
    }

    #[test]
    fn gamepad_simulation_is_off_by_default() {
        let mut translator = EventTranslator::new();
        let mut snapshot = InputSnapshot::new();

        translator.translate(&key(KeyCode::KeyX, true), &mut snapshot);
        translator.apply_gamepad(&mut snapshot);

        assert!(snapshot.gamepad_buttons.is_empty());
    }

    #[test]
    fn gamepad_simulation_folds_held_keys() {
        let mut translator = EventTranslator::new().with_gamepad_simulation(true);
        let mut snapshot = InputSnapshot::new();

        translator.translate(&key(KeyCode::KeyX, true), &mut snapshot);
        translator.translate(&key(KeyCode::ArrowUp, true), &mut snapshot);
        translator.apply_gamepad(&mut snapshot);

        assert_eq!(snapshot.gamepad_buttons, GamepadButtons::A | GamepadButtons::UP);
    }
}
