//! Input model: keys, mouse buttons, and the per-frame input snapshot.
//!
//! The host owns the windowing layer and translates its native input into
//! this module's types. An [`InputState`] is kept alive across frames:
//! [`InputState::begin_frame`] rolls the current key/button sets into the
//! previous-frame sets, which is what makes edge queries such as
//! [`InputState::is_key_newly_pressed`] possible without extra bookkeeping
//! in the router.
//!
//! # Example
//!
//! ```
//! use atrium::input::{InputState, Key, MouseButton};
//! use atrium_render::Point;
//! use std::time::Duration;
//!
//! let mut input = InputState::new();
//! input.begin_frame(Duration::from_millis(16));
//! input.set_cursor(Point::new(40.0, 20.0));
//! input.key_down(Key::Tab);
//! input.set_button(MouseButton::Left, true);
//!
//! assert!(input.is_key_newly_pressed(Key::Tab));
//! assert!(input.is_button_down(MouseButton::Left));
//! ```

use std::time::Duration;

use atrium_render::Point;

/// Keyboard key codes.
///
/// Keys a desktop-editor host is expected to deliver. The host maps its
/// platform key codes onto this enum; anything without a mapping becomes
/// [`Key::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Key {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Numbers (main keyboard)
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Function keys
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    // Navigation
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
    Home, End, PageUp, PageDown,

    // Editing
    Backspace, Delete, Insert,
    Enter, Tab,

    // Whitespace
    Space,

    // Modifiers (also tracked via KeyboardModifiers, but useful as key events)
    ShiftLeft, ShiftRight,
    ControlLeft, ControlRight,
    AltLeft, AltRight,
    MetaLeft, MetaRight,

    // Punctuation and symbols
    Minus, Equal,
    BracketLeft, BracketRight, Backslash,
    Semicolon, Quote,
    Comma, Period, Slash,
    Grave,

    // Control
    Escape,

    // Numpad
    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,
    NumpadAdd, NumpadSubtract, NumpadMultiply, NumpadDivide,
    NumpadDecimal, NumpadEnter,

    // Unknown/unmapped key
    Unknown(u16),
}

impl Key {
    /// Check if this is a modifier key.
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            Key::ShiftLeft
                | Key::ShiftRight
                | Key::ControlLeft
                | Key::ControlRight
                | Key::AltLeft
                | Key::AltRight
                | Key::MetaLeft
                | Key::MetaRight
        )
    }

    /// Check if this is a navigation key.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Key::ArrowUp
                | Key::ArrowDown
                | Key::ArrowLeft
                | Key::ArrowRight
                | Key::Home
                | Key::End
                | Key::PageUp
                | Key::PageDown
        )
    }

    /// Check if this is a letter key.
    pub fn is_letter(&self) -> bool {
        matches!(
            self,
            Key::A
                | Key::B
                | Key::C
                | Key::D
                | Key::E
                | Key::F
                | Key::G
                | Key::H
                | Key::I
                | Key::J
                | Key::K
                | Key::L
                | Key::M
                | Key::N
                | Key::O
                | Key::P
                | Key::Q
                | Key::R
                | Key::S
                | Key::T
                | Key::U
                | Key::V
                | Key::W
                | Key::X
                | Key::Y
                | Key::Z
        )
    }

    /// Check if this is a digit key (main keyboard, not numpad).
    pub fn is_digit(&self) -> bool {
        matches!(
            self,
            Key::Digit0
                | Key::Digit1
                | Key::Digit2
                | Key::Digit3
                | Key::Digit4
                | Key::Digit5
                | Key::Digit6
                | Key::Digit7
                | Key::Digit8
                | Key::Digit9
        )
    }

    /// The character this key produces without Shift held, if any.
    ///
    /// Letters are lowercase; digit and numpad keys produce digits;
    /// punctuation keys produce their US-layout base symbol. Navigation,
    /// editing, and modifier keys produce `None`.
    pub fn unshifted_char(&self) -> Option<char> {
        let c = match self {
            Key::A => 'a',
            Key::B => 'b',
            Key::C => 'c',
            Key::D => 'd',
            Key::E => 'e',
            Key::F => 'f',
            Key::G => 'g',
            Key::H => 'h',
            Key::I => 'i',
            Key::J => 'j',
            Key::K => 'k',
            Key::L => 'l',
            Key::M => 'm',
            Key::N => 'n',
            Key::O => 'o',
            Key::P => 'p',
            Key::Q => 'q',
            Key::R => 'r',
            Key::S => 's',
            Key::T => 't',
            Key::U => 'u',
            Key::V => 'v',
            Key::W => 'w',
            Key::X => 'x',
            Key::Y => 'y',
            Key::Z => 'z',
            Key::Digit0 | Key::Numpad0 => '0',
            Key::Digit1 | Key::Numpad1 => '1',
            Key::Digit2 | Key::Numpad2 => '2',
            Key::Digit3 | Key::Numpad3 => '3',
            Key::Digit4 | Key::Numpad4 => '4',
            Key::Digit5 | Key::Numpad5 => '5',
            Key::Digit6 | Key::Numpad6 => '6',
            Key::Digit7 | Key::Numpad7 => '7',
            Key::Digit8 | Key::Numpad8 => '8',
            Key::Digit9 | Key::Numpad9 => '9',
            Key::Space => ' ',
            Key::Minus | Key::NumpadSubtract => '-',
            Key::Equal => '=',
            Key::BracketLeft => '[',
            Key::BracketRight => ']',
            Key::Backslash => '\\',
            Key::Semicolon => ';',
            Key::Quote => '\'',
            Key::Comma => ',',
            Key::Period | Key::NumpadDecimal => '.',
            Key::Slash | Key::NumpadDivide => '/',
            Key::Grave => '`',
            Key::NumpadAdd => '+',
            Key::NumpadMultiply => '*',
            _ => return None,
        };
        Some(c)
    }

    /// The character this key produces with Shift held, if any.
    ///
    /// Letters are uppercase; digit keys map to the conventional US-layout
    /// shifted symbols (`Digit1` → `!` and so on). Numpad keys are not
    /// affected by Shift and produce their unshifted character.
    pub fn shifted_char(&self) -> Option<char> {
        let c = match self {
            Key::Digit0 => ')',
            Key::Digit1 => '!',
            Key::Digit2 => '@',
            Key::Digit3 => '#',
            Key::Digit4 => '$',
            Key::Digit5 => '%',
            Key::Digit6 => '^',
            Key::Digit7 => '&',
            Key::Digit8 => '*',
            Key::Digit9 => '(',
            Key::Minus => '_',
            Key::Equal => '+',
            Key::BracketLeft => '{',
            Key::BracketRight => '}',
            Key::Backslash => '|',
            Key::Semicolon => ':',
            Key::Quote => '"',
            Key::Comma => '<',
            Key::Period => '>',
            Key::Slash => '?',
            Key::Grave => '~',
            _ => {
                let base = self.unshifted_char()?;
                return Some(base.to_ascii_uppercase());
            }
        };
        Some(c)
    }
}

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held (Windows key, Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Control + Shift modifiers.
    pub const CTRL_SHIFT: Self = Self {
        shift: true,
        control: true,
        alt: false,
        meta: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.any()
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left = 0,
    /// Secondary button (usually right).
    Right = 1,
    /// Middle button (scroll wheel click).
    Middle = 2,
}

impl MouseButton {
    /// Number of tracked buttons.
    pub(crate) const COUNT: usize = 3;

    /// Index into per-button state arrays.
    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Per-frame input snapshot.
///
/// Holds the current and previous key/button sets, the cursor position,
/// the accumulated wheel delta for the frame, and a monotonic timestamp
/// supplied by the host. The timestamp drives double-click detection, so
/// tests can replay input with exact timings.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys: Vec<Key>,
    /// Keys held down during the previous frame.
    prev_keys: Vec<Key>,
    /// Current mouse button states, indexed by [`MouseButton`].
    buttons: [bool; MouseButton::COUNT],
    /// Previous-frame mouse button states.
    prev_buttons: [bool; MouseButton::COUNT],
    /// Current cursor position in window coordinates.
    cursor: Point,
    /// Accumulated scroll-wheel delta for this frame (positive = up).
    wheel: f32,
    /// Monotonic timestamp of this frame.
    time: Duration,
}

impl InputState {
    /// Create an empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Frame Lifecycle
    // =========================================================================

    /// Start a new frame at the given monotonic timestamp.
    ///
    /// The current key and button sets become the previous-frame sets and
    /// the wheel delta resets. Held keys and buttons stay down until the
    /// host reports their release.
    pub fn begin_frame(&mut self, now: Duration) {
        self.prev_keys.clear();
        self.prev_keys.extend_from_slice(&self.keys);
        self.prev_buttons = self.buttons;
        self.wheel = 0.0;
        self.time = now;
    }

    /// Record a key going down.
    pub fn key_down(&mut self, key: Key) {
        if !self.keys.contains(&key) {
            self.keys.push(key);
        }
    }

    /// Record a key coming up.
    pub fn key_up(&mut self, key: Key) {
        self.keys.retain(|&k| k != key);
    }

    /// Record a mouse button state.
    pub fn set_button(&mut self, button: MouseButton, down: bool) {
        self.buttons[button.index()] = down;
    }

    /// Record the cursor position in window coordinates.
    pub fn set_cursor(&mut self, pos: Point) {
        self.cursor = pos;
    }

    /// Accumulate scroll-wheel movement (positive = up/away from user).
    pub fn add_wheel(&mut self, delta: f32) {
        self.wheel += delta;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Check if a key is currently down.
    #[inline]
    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    /// Check if a key was down during the previous frame.
    #[inline]
    pub fn was_key_down(&self, key: Key) -> bool {
        self.prev_keys.contains(&key)
    }

    /// Check if a key went down this frame (edge-triggered).
    #[inline]
    pub fn is_key_newly_pressed(&self, key: Key) -> bool {
        self.is_key_down(key) && !self.was_key_down(key)
    }

    /// Check if a mouse button is currently down.
    #[inline]
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons[button.index()]
    }

    /// Check if a mouse button was down during the previous frame.
    #[inline]
    pub fn was_button_down(&self, button: MouseButton) -> bool {
        self.prev_buttons[button.index()]
    }

    /// Check if a mouse button went down this frame (edge-triggered).
    #[inline]
    pub fn is_button_newly_pressed(&self, button: MouseButton) -> bool {
        self.is_button_down(button) && !self.was_button_down(button)
    }

    /// Current cursor position in window coordinates.
    #[inline]
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Scroll-wheel delta accumulated this frame.
    #[inline]
    pub fn wheel(&self) -> f32 {
        self.wheel
    }

    /// Monotonic timestamp of the current frame.
    #[inline]
    pub fn time(&self) -> Duration {
        self.time
    }

    /// Check if either Shift key is down.
    #[inline]
    pub fn shift(&self) -> bool {
        self.is_key_down(Key::ShiftLeft) || self.is_key_down(Key::ShiftRight)
    }

    /// Check if either Control key is down.
    #[inline]
    pub fn ctrl(&self) -> bool {
        self.is_key_down(Key::ControlLeft) || self.is_key_down(Key::ControlRight)
    }

    /// Check if either Alt key is down.
    #[inline]
    pub fn alt(&self) -> bool {
        self.is_key_down(Key::AltLeft) || self.is_key_down(Key::AltRight)
    }

    /// Check if either Meta key is down.
    #[inline]
    pub fn meta(&self) -> bool {
        self.is_key_down(Key::MetaLeft) || self.is_key_down(Key::MetaRight)
    }

    /// The modifier set derived from the current key-down set.
    pub fn modifiers(&self) -> KeyboardModifiers {
        KeyboardModifiers {
            shift: self.shift(),
            control: self.ctrl(),
            alt: self.alt(),
            meta: self.meta(),
        }
    }

    /// Bitmask of held mouse buttons (bit = [`MouseButton`] discriminant).
    pub(crate) fn button_mask(&self) -> u8 {
        let mut mask = 0u8;
        for (i, &down) in self.buttons.iter().enumerate() {
            if down {
                mask |= 1 << i;
            }
        }
        mask
    }
}

static_assertions::assert_impl_all!(InputState: Send, Sync);
