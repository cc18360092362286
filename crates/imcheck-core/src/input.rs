//! Keyboard and mouse input state.
//!
//! Backends (or a scripted driver) write the *current* device state at any
//! time between frames; [`InputState::begin_frame`] derives the per-frame
//! edges (clicked / released / pressed) by diffing against the previous frame.

use crate::Vec2;

// ─── MouseButton ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton { Left = 0, Right = 1, Middle = 2 }

// ─── Key ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Key {
    Backspace, Delete, Enter, Tab, Escape, Space,
    Left, Right, Up, Down, Home, End,
    A, C, V, X,
    // Sentinel
    COUNT,
}

const KEY_COUNT: usize = Key::COUNT as usize;

// ─── Modifiers ───────────────────────────────────────────────────────────────

bitflags::bitflags! {
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        const CTRL  = 1 << 0;
        const SHIFT = 1 << 1;
        const ALT   = 1 << 2;
        const SUPER = 1 << 3;
    }
}

// ─── InputState ──────────────────────────────────────────────────────────────

/// Snapshot of input for the current frame.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    // Mouse
    pub mouse_pos:      Vec2,
    pub mouse_delta:    Vec2,
    pub mouse_wheel:    f32,
    pub mouse_down:     [bool; 3],
    pub mouse_clicked:  [bool; 3],  // rose this frame
    pub mouse_released: [bool; 3],  // fell this frame

    // Keyboard / text
    pub keys_down:    [bool; KEY_COUNT],
    pub keys_pressed: [bool; KEY_COUNT],
    pub modifiers:    Modifiers,
    /// UTF-8 characters typed since the previous frame.
    pub text_input:   String,

    // Display
    pub display_size: Vec2,
    pub frame_count:  u64,

    prev_mouse_pos:  Vec2,
    prev_mouse_down: [bool; 3],
    // Presses latched between frames so a fast tap is never lost.
    pending_presses: [bool; KEY_COUNT],
    pending_wheel:   f32,
}

impl InputState {
    /// Roll device state into per-frame edges. Called by `Context::new_frame`.
    pub fn begin_frame(&mut self) {
        for i in 0..3 {
            self.mouse_clicked[i]  = self.mouse_down[i] && !self.prev_mouse_down[i];
            self.mouse_released[i] = !self.mouse_down[i] && self.prev_mouse_down[i];
        }
        self.prev_mouse_down = self.mouse_down;

        self.mouse_delta    = self.mouse_pos - self.prev_mouse_pos;
        self.prev_mouse_pos = self.mouse_pos;

        self.keys_pressed    = self.pending_presses;
        self.pending_presses = [false; KEY_COUNT];

        self.mouse_wheel   = self.pending_wheel;
        self.pending_wheel = 0.0;
        self.frame_count  += 1;
    }

    /// Drop the text consumed by this frame's widgets.
    pub fn end_frame(&mut self) {
        self.text_input.clear();
    }

    // ── device writers (call between frames) ──────────────────────────────────

    pub fn set_mouse_pos(&mut self, pos: Vec2) { self.mouse_pos = pos; }

    pub fn set_mouse_button(&mut self, btn: MouseButton, down: bool) {
        self.mouse_down[btn as usize] = down;
    }

    pub fn add_mouse_wheel(&mut self, y: f32) { self.pending_wheel += y; }

    pub fn set_key(&mut self, key: Key, down: bool) {
        let i = key as usize;
        if down && !self.keys_down[i] { self.pending_presses[i] = true; }
        self.keys_down[i] = down;
    }

    pub fn set_modifiers(&mut self, mods: Modifiers) { self.modifiers = mods; }

    pub fn add_text(&mut self, ch: char) {
        if !ch.is_control() { self.text_input.push(ch); }
    }

    pub fn add_text_str(&mut self, s: &str) {
        for ch in s.chars() { self.add_text(ch); }
    }

    /// Forget all held buttons, keys and queued text.
    pub fn release_all(&mut self) {
        self.mouse_down      = [false; 3];
        self.keys_down       = [false; KEY_COUNT];
        self.pending_presses = [false; KEY_COUNT];
        self.modifiers       = Modifiers::empty();
        self.text_input.clear();
    }

    // ── query helpers ─────────────────────────────────────────────────────────

    #[inline] pub fn mouse_down(&self, btn: MouseButton)     -> bool { self.mouse_down[btn as usize] }
    #[inline] pub fn mouse_clicked(&self, btn: MouseButton)  -> bool { self.mouse_clicked[btn as usize] }
    #[inline] pub fn mouse_released(&self, btn: MouseButton) -> bool { self.mouse_released[btn as usize] }

    #[inline] pub fn key_down(&self, k: Key)    -> bool { self.keys_down[k as usize] }
    #[inline] pub fn key_pressed(&self, k: Key) -> bool { self.keys_pressed[k as usize] }

    #[inline] pub fn ctrl(&self)  -> bool { self.modifiers.contains(Modifiers::CTRL)  }
    #[inline] pub fn shift(&self) -> bool { self.modifiers.contains(Modifiers::SHIFT) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_edge_lasts_one_frame() {
        let mut input = InputState::default();
        input.set_mouse_button(MouseButton::Left, true);
        input.begin_frame();
        assert!(input.mouse_clicked(MouseButton::Left));
        input.begin_frame();
        assert!(!input.mouse_clicked(MouseButton::Left));
        assert!(input.mouse_down(MouseButton::Left));

        input.set_mouse_button(MouseButton::Left, false);
        input.begin_frame();
        assert!(input.mouse_released(MouseButton::Left));
    }

    #[test]
    fn tap_between_frames_still_presses() {
        let mut input = InputState::default();
        input.set_key(Key::Enter, true);
        input.set_key(Key::Enter, false);
        input.begin_frame();
        assert!(input.key_pressed(Key::Enter));
        assert!(!input.key_down(Key::Enter));
    }

    #[test]
    fn delta_tracks_previous_frame() {
        let mut input = InputState::default();
        input.set_mouse_pos(Vec2::new(10.0, 5.0));
        input.begin_frame();
        input.set_mouse_pos(Vec2::new(14.0, 2.0));
        input.begin_frame();
        assert_eq!(input.mouse_delta, Vec2::new(4.0, -3.0));
    }

    #[test]
    fn control_chars_are_not_text() {
        let mut input = InputState::default();
        input.add_text_str("a\u{8}b\r");
        assert_eq!(input.text_input, "ab");
        input.end_frame();
        assert!(input.text_input.is_empty());
    }
}
