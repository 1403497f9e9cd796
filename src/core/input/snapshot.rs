//=========================================================================
// Input Snapshot
//=========================================================================
//
// Per-frame aggregated input state handed to the application.
//
// Frame lifecycle:
// ```text
//   translate events (mutable) → begin_frame() → update(&snapshot) → finalize()
// ```
//
// Persistent state (pointer slots, held gamepad buttons) survives
// `finalize()`; per-frame deltas (buttons pressed/released this tick) do
// not.
//
//=========================================================================

//=== External Crates =====================================================

use bitflags::bitflags;

//=== Constants ===========================================================

/// Number of pointer slots. Platform touch ids index these directly.
pub const MAX_POINTERS: usize = 10;

//=== GamepadButtons ======================================================

bitflags! {
    /// Fourteen logical gamepad buttons.
    ///
    /// Bit positions follow the order of the simulation key table.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GamepadButtons: u16 {
        const A       = 1 << 0;
        const B       = 1 << 1;
        const X       = 1 << 2;
        const Y       = 1 << 3;
        const LBUMPER = 1 << 4;
        const RBUMPER = 1 << 5;
        const START   = 1 << 6;
        const SELECT  = 1 << 7;
        const UP      = 1 << 8;
        const DOWN    = 1 << 9;
        const LEFT    = 1 << 10;
        const RIGHT   = 1 << 11;
        const MENU    = 1 << 12;
        const BACK    = 1 << 13;
    }
}

//=== Pointer =============================================================

/// One pointer slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pointer {
    pub x: i32,
    pub y: i32,
    pub down: bool,
}

//=== PointerSlots ========================================================

/// Fixed-capacity pointer table indexed by platform pointer id.
///
/// Slots are reused across frames. Access with an out-of-range id yields
/// `None` instead of panicking.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PointerSlots {
    slots: [Pointer; MAX_POINTERS],
}

impl PointerSlots {
    /// Maps a raw platform id onto a slot index.
    pub fn index_of(id: i64) -> Option<usize> {
        usize::try_from(id).ok().filter(|&index| index < MAX_POINTERS)
    }

    pub fn get(&self, id: i64) -> Option<&Pointer> {
        Self::index_of(id).map(|index| &self.slots[index])
    }

    pub(crate) fn get_mut(&mut self, id: i64) -> Option<&mut Pointer> {
        Self::index_of(id).map(move |index| &mut self.slots[index])
    }

    /// Iterates `(slot, pointer)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Pointer)> {
        self.slots.iter().enumerate()
    }

    /// Number of slots currently held down.
    pub fn down_count(&self) -> usize {
        self.slots.iter().filter(|pointer| pointer.down).count()
    }

    pub const fn capacity(&self) -> usize {
        MAX_POINTERS
    }
}

//=== Stick ===============================================================

/// Analog stick position, each axis in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stick {
    pub x: f32,
    pub y: f32,
}

//=== InputSnapshot =======================================================

/// The single live input record for a frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputSnapshot {
    //--- Persistent State (survives finalize) -----------------------------
    pub pointers: PointerSlots,
    pub gamepad_buttons: GamepadButtons,
    pub stick_left: Stick,
    pub stick_right: Stick,

    //--- Source Validity --------------------------------------------------
    pub accelerometer_valid: bool,
    pub mouse_valid: bool,

    //--- Frame Deltas (cleared by finalize) -------------------------------
    pub buttons_pressed: GamepadButtons,
    pub buttons_released: GamepadButtons,

    last_gamepad_buttons: GamepadButtons,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes this tick's button deltas against the previous frame.
    ///
    /// Called after event collection, before the application sees the
    /// snapshot.
    pub fn begin_frame(&mut self) {
        let changed = self.last_gamepad_buttons ^ self.gamepad_buttons;
        self.buttons_pressed = changed & self.gamepad_buttons;
        self.buttons_released = changed & self.last_gamepad_buttons;
    }

    /// Closes the frame: clears deltas and remembers current buttons.
    ///
    /// Pointer slots are untouched; a held finger stays down until its
    /// release event arrives.
    pub fn finalize(&mut self) {
        self.last_gamepad_buttons = self.gamepad_buttons;
        self.buttons_pressed = GamepadButtons::empty();
        self.buttons_released = GamepadButtons::empty();
    }

    /// `true` if the button went down this frame.
    pub fn is_button_pressed(&self, button: GamepadButtons) -> bool {
        self.buttons_pressed.contains(button)
    }

    /// `true` while the button is held.
    pub fn is_button_down(&self, button: GamepadButtons) -> bool {
        self.gamepad_buttons.contains(button)
    }

    /// `true` if the button went up this frame.
    pub fn is_button_released(&self, button: GamepadButtons) -> bool {
        self.buttons_released.contains(button)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // PointerSlots
    //=====================================================================

    #[test]
    fn slot_index_is_bounds_checked() {
        assert_eq!(PointerSlots::index_of(0), Some(0));
        assert_eq!(PointerSlots::index_of(9), Some(9));
        assert_eq!(PointerSlots::index_of(10), None);
        assert_eq!(PointerSlots::index_of(999), None);
        assert_eq!(PointerSlots::index_of(-1), None);
    }

    #[test]
    fn slots_start_released_at_origin() {
        let slots = PointerSlots::default();
        assert_eq!(slots.capacity(), MAX_POINTERS);
        assert_eq!(slots.down_count(), 0);
        assert!(slots.iter().all(|(_, p)| *p == Pointer::default()));
    }

    //=====================================================================
    // Frame Lifecycle
    //=====================================================================

    #[test]
    fn begin_frame_reports_new_presses() {
        let mut snapshot = InputSnapshot::new();
        snapshot.gamepad_buttons = GamepadButtons::A | GamepadButtons::START;

        snapshot.begin_frame();

        assert!(snapshot.is_button_pressed(GamepadButtons::A));
        assert!(snapshot.is_button_pressed(GamepadButtons::START));
        assert!(snapshot.buttons_released.is_empty());
    }

    #[test]
    fn held_button_is_not_pressed_twice() {
        let mut snapshot = InputSnapshot::new();
        snapshot.gamepad_buttons = GamepadButtons::B;
        snapshot.begin_frame();
        snapshot.finalize();

        snapshot.begin_frame();

        assert!(snapshot.is_button_down(GamepadButtons::B));
        assert!(!snapshot.is_button_pressed(GamepadButtons::B));
    }

    #[test]
    fn release_shows_up_for_one_frame() {
        let mut snapshot = InputSnapshot::new();
        snapshot.gamepad_buttons = GamepadButtons::X;
        snapshot.begin_frame();
        snapshot.finalize();

        snapshot.gamepad_buttons = GamepadButtons::empty();
        snapshot.begin_frame();
        assert!(snapshot.is_button_released(GamepadButtons::X));
        snapshot.finalize();

        snapshot.begin_frame();
        assert!(!snapshot.is_button_released(GamepadButtons::X));
    }

    #[test]
    fn finalize_preserves_pointer_state() {
        let mut snapshot = InputSnapshot::new();
        if let Some(pointer) = snapshot.pointers.get_mut(2) {
            *pointer = Pointer { x: 5, y: 6, down: true };
        }

        snapshot.begin_frame();
        snapshot.finalize();

        assert_eq!(snapshot.pointers.get(2), Some(&Pointer { x: 5, y: 6, down: true }));
    }

    #[test]
    fn gamepad_has_fourteen_buttons() {
        assert_eq!(GamepadButtons::all().bits().count_ones(), 14);
    }
}
