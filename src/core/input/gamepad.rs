//=========================================================================
// Gamepad Simulation
//=========================================================================
//
// Folds a set of held keyboard keys into gamepad buttons and digital
// stick values. Optional source; the host only runs it when configured.
//
// Opposing directions are exclusive: when both are held, the one listed
// first in the table wins (UP over DOWN, LEFT over RIGHT, and likewise for
// both sticks).
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::KeyCode;
use super::snapshot::{GamepadButtons, InputSnapshot, Stick};

//=== Key Tables ==========================================================

/// Key → button table, in bit order.
const BUTTON_MAP: [(KeyCode, GamepadButtons); 14] = [
    (KeyCode::KeyX, GamepadButtons::A),
    (KeyCode::KeyS, GamepadButtons::B),
    (KeyCode::KeyZ, GamepadButtons::X),
    (KeyCode::KeyA, GamepadButtons::Y),
    (KeyCode::KeyW, GamepadButtons::LBUMPER),
    (KeyCode::KeyQ, GamepadButtons::RBUMPER),
    (KeyCode::Digit1, GamepadButtons::START),
    (KeyCode::Digit2, GamepadButtons::SELECT),
    (KeyCode::ArrowUp, GamepadButtons::UP),
    (KeyCode::ArrowDown, GamepadButtons::DOWN),
    (KeyCode::ArrowLeft, GamepadButtons::LEFT),
    (KeyCode::ArrowRight, GamepadButtons::RIGHT),
    (KeyCode::KeyM, GamepadButtons::MENU),
    (KeyCode::Backspace, GamepadButtons::BACK),
];

/// D-pad pairs: the first member wins when both are held.
const DPAD_EXCLUSIONS: [(GamepadButtons, GamepadButtons); 2] = [
    (GamepadButtons::UP, GamepadButtons::DOWN),
    (GamepadButtons::LEFT, GamepadButtons::RIGHT),
];

/// One stick axis driven by two keys; `first` wins when both are held.
struct AxisKeys {
    first: (KeyCode, f32),
    second: (KeyCode, f32),
}

const LEFT_Y: AxisKeys = AxisKeys { first: (KeyCode::KeyI, 1.0), second: (KeyCode::KeyK, -1.0) };
const LEFT_X: AxisKeys = AxisKeys { first: (KeyCode::KeyJ, -1.0), second: (KeyCode::KeyL, 1.0) };
const RIGHT_Y: AxisKeys = AxisKeys { first: (KeyCode::Numpad8, 1.0), second: (KeyCode::Numpad2, -1.0) };
const RIGHT_X: AxisKeys = AxisKeys { first: (KeyCode::Numpad4, -1.0), second: (KeyCode::Numpad6, 1.0) };

impl AxisKeys {
    fn value(&self, held: &HashSet<KeyCode>) -> f32 {
        if held.contains(&self.first.0) {
            self.first.1
        } else if held.contains(&self.second.0) {
            self.second.1
        } else {
            0.0
        }
    }
}

//=== GamepadSimulator ====================================================

/// Stateless mapper from held keys to gamepad state.
#[derive(Debug, Clone, Copy, Default)]
pub struct GamepadSimulator;

impl GamepadSimulator {
    pub fn new() -> Self {
        Self
    }

    /// Maps held keys to the 14-bit button mask.
    pub fn buttons(&self, held: &HashSet<KeyCode>) -> GamepadButtons {
        let mut buttons = BUTTON_MAP
            .iter()
            .filter(|(key, _)| held.contains(key))
            .fold(GamepadButtons::empty(), |acc, (_, button)| acc | *button);

        for (winner, loser) in DPAD_EXCLUSIONS {
            if buttons.contains(winner) {
                buttons.remove(loser);
            }
        }

        buttons
    }

    /// Overwrites the snapshot's gamepad fields from the held keys.
    pub fn apply(&self, held: &HashSet<KeyCode>, snapshot: &mut InputSnapshot) {
        snapshot.gamepad_buttons = self.buttons(held);
        snapshot.stick_left = Stick {
            x: LEFT_X.value(held),
            y: LEFT_Y.value(held),
        };
        snapshot.stick_right = Stick {
            x: RIGHT_X.value(held),
            y: RIGHT_Y.value(held),
        };
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
