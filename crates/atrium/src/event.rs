//! Widget-facing event types and the outbound notification queue.
//!
//! Two event families live here:
//!
//! - [`WidgetEvent`] — events the [`Desktop`](crate::widget::Desktop) router
//!   dispatches *into* widgets (mouse, keyboard, focus, hover). Each variant
//!   carries an [`EventBase`] with an accepted flag; a handler may either
//!   return `true` or call [`WidgetEvent::accept`] to consume the event.
//! - [`UiEvent`] — notifications that flow *out* of the toolkit. Widgets and
//!   the router push them onto the desktop's queue and the host drains them
//!   with [`Desktop::poll_event`](crate::widget::Desktop::poll_event) after
//!   each entry-point call. There are no observer callbacks.
//!
//! [`Notice`] is the small third channel: a child widget addressing its
//! configured owner (a popup menu reporting a row choice to its combo box).

use atrium_core::WidgetId;
use atrium_render::Point;

use crate::input::{Key, KeyboardModifiers, MouseButton};

/// Common data for all widget events.
#[derive(Debug, Clone, Copy)]
pub struct EventBase {
    /// Whether the event has been accepted (handled).
    accepted: bool,
}

impl Default for EventBase {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBase {
    /// Create a new event base.
    pub fn new() -> Self {
        Self { accepted: false }
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Accept the event, preventing further propagation.
    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Ignore the event, allowing further propagation.
    pub fn ignore(&mut self) {
        self.accepted = false;
    }
}

/// Mouse press event.
#[derive(Debug, Clone, Copy)]
pub struct MousePressEvent {
    /// Base event data.
    pub base: EventBase,
    /// The button that was pressed.
    pub button: MouseButton,
    /// Position in widget-local coordinates.
    pub local_pos: Point,
    /// Position in window coordinates.
    pub window_pos: Point,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl MousePressEvent {
    /// Create a new mouse press event.
    pub fn new(
        button: MouseButton,
        local_pos: Point,
        window_pos: Point,
        modifiers: KeyboardModifiers,
    ) -> Self {
        Self {
            base: EventBase::new(),
            button,
            local_pos,
            window_pos,
            modifiers,
        }
    }
}

/// Mouse double-click event.
///
/// Dispatched in place of the second [`MousePressEvent`] when the router
/// detects two presses on the same double-click-accepting widget within the
/// desktop's threshold.
#[derive(Debug, Clone, Copy)]
pub struct MouseDoubleClickEvent {
    /// Base event data.
    pub base: EventBase,
    /// The button that was double-clicked.
    pub button: MouseButton,
    /// Position in widget-local coordinates.
    pub local_pos: Point,
    /// Position in window coordinates.
    pub window_pos: Point,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl MouseDoubleClickEvent {
    /// Create a new mouse double-click event.
    pub fn new(
        button: MouseButton,
        local_pos: Point,
        window_pos: Point,
        modifiers: KeyboardModifiers,
    ) -> Self {
        Self {
            base: EventBase::new(),
            button,
            local_pos,
            window_pos,
            modifiers,
        }
    }
}

/// Mouse release event.
///
/// Delivered to the focused widget even when the cursor has left its
/// bounds, so drag interactions always see their terminating release.
#[derive(Debug, Clone, Copy)]
pub struct MouseReleaseEvent {
    /// Base event data.
    pub base: EventBase,
    /// The button that was released.
    pub button: MouseButton,
    /// Position in widget-local coordinates.
    pub local_pos: Point,
    /// Position in window coordinates.
    pub window_pos: Point,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl MouseReleaseEvent {
    /// Create a new mouse release event.
    pub fn new(
        button: MouseButton,
        local_pos: Point,
        window_pos: Point,
        modifiers: KeyboardModifiers,
    ) -> Self {
        Self {
            base: EventBase::new(),
            button,
            local_pos,
            window_pos,
            modifiers,
        }
    }
}

/// Mouse move event, forwarded to the focused widget only.
#[derive(Debug, Clone, Copy)]
pub struct MouseMoveEvent {
    /// Base event data.
    pub base: EventBase,
    /// Position in widget-local coordinates.
    pub local_pos: Point,
    /// Position in window coordinates.
    pub window_pos: Point,
    /// Mouse buttons currently held (bitmask by button discriminant).
    pub buttons: u8,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl MouseMoveEvent {
    /// Create a new mouse move event.
    pub fn new(
        local_pos: Point,
        window_pos: Point,
        buttons: u8,
        modifiers: KeyboardModifiers,
    ) -> Self {
        Self {
            base: EventBase::new(),
            local_pos,
            window_pos,
            buttons,
            modifiers,
        }
    }

    /// Check if a specific button is held during this move.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        (self.buttons & (1 << button as u8)) != 0
    }
}

/// Mouse wheel (scroll) event, dispatched to the hovered widget.
#[derive(Debug, Clone, Copy)]
pub struct WheelEvent {
    /// Base event data.
    pub base: EventBase,
    /// Position in widget-local coordinates.
    pub local_pos: Point,
    /// Position in window coordinates.
    pub window_pos: Point,
    /// Vertical scroll delta (positive = up/away from user).
    pub delta: f32,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl WheelEvent {
    /// Create a new wheel event.
    pub fn new(local_pos: Point, window_pos: Point, delta: f32, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            local_pos,
            window_pos,
            delta,
            modifiers,
        }
    }
}

/// Enter event, sent when the widget becomes the hovered widget.
#[derive(Debug, Clone, Copy)]
pub struct EnterEvent {
    /// Base event data.
    pub base: EventBase,
    /// The position where the cursor entered, in widget-local coordinates.
    pub local_pos: Point,
}

impl EnterEvent {
    /// Create a new enter event.
    pub fn new(local_pos: Point) -> Self {
        Self {
            base: EventBase::new(),
            local_pos,
        }
    }
}

/// Leave event, sent when the widget stops being the hovered widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaveEvent {
    /// Base event data.
    pub base: EventBase,
}

impl LeaveEvent {
    /// Create a new leave event.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Reason for a focus change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusReason {
    /// Focus changed due to a mouse click.
    Mouse,
    /// Focus changed due to the Tab key.
    Tab,
    /// Focus changed due to Shift+Tab (backtab).
    Backtab,
    /// Focus changed programmatically.
    #[default]
    Other,
}

/// Focus in event, sent when the widget gains keyboard focus.
#[derive(Debug, Clone, Copy)]
pub struct FocusInEvent {
    /// Base event data.
    pub base: EventBase,
    /// The reason focus was gained.
    pub reason: FocusReason,
}

impl FocusInEvent {
    /// Create a new focus in event.
    pub fn new(reason: FocusReason) -> Self {
        Self {
            base: EventBase::new(),
            reason,
        }
    }
}

/// Focus out event, sent when the widget loses keyboard focus.
#[derive(Debug, Clone, Copy)]
pub struct FocusOutEvent {
    /// Base event data.
    pub base: EventBase,
    /// The reason focus was lost.
    pub reason: FocusReason,
}

impl FocusOutEvent {
    /// Create a new focus out event.
    pub fn new(reason: FocusReason) -> Self {
        Self {
            base: EventBase::new(),
            reason,
        }
    }
}

/// Key press event, sent to the focused widget for each newly pressed key.
///
/// There is no text payload: widgets derive characters from the key and the
/// modifier state through [`Key::unshifted_char`] / [`Key::shifted_char`],
/// which keeps input acceptance rules (character filters, shifted-digit
/// fallbacks) inside the widget that applies them.
#[derive(Debug, Clone, Copy)]
pub struct KeyPressEvent {
    /// Base event data.
    pub base: EventBase,
    /// The key that was pressed.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl KeyPressEvent {
    /// Create a new key press event.
    pub fn new(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            key,
            modifiers,
        }
    }
}

/// An event dispatched to a widget by the desktop router.
#[derive(Debug)]
pub enum WidgetEvent {
    /// Mouse press event.
    MousePress(MousePressEvent),
    /// Mouse double-click event.
    DoubleClick(MouseDoubleClickEvent),
    /// Mouse release event.
    MouseRelease(MouseReleaseEvent),
    /// Mouse move event.
    MouseMove(MouseMoveEvent),
    /// Mouse wheel event.
    Wheel(WheelEvent),
    /// Mouse enter event.
    Enter(EnterEvent),
    /// Mouse leave event.
    Leave(LeaveEvent),
    /// Focus in event.
    FocusIn(FocusInEvent),
    /// Focus out event.
    FocusOut(FocusOutEvent),
    /// Key press event.
    KeyPress(KeyPressEvent),
}

impl WidgetEvent {
    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        match self {
            Self::MousePress(e) => e.base.is_accepted(),
            Self::DoubleClick(e) => e.base.is_accepted(),
            Self::MouseRelease(e) => e.base.is_accepted(),
            Self::MouseMove(e) => e.base.is_accepted(),
            Self::Wheel(e) => e.base.is_accepted(),
            Self::Enter(e) => e.base.is_accepted(),
            Self::Leave(e) => e.base.is_accepted(),
            Self::FocusIn(e) => e.base.is_accepted(),
            Self::FocusOut(e) => e.base.is_accepted(),
            Self::KeyPress(e) => e.base.is_accepted(),
        }
    }

    /// Accept the event.
    pub fn accept(&mut self) {
        match self {
            Self::MousePress(e) => e.base.accept(),
            Self::DoubleClick(e) => e.base.accept(),
            Self::MouseRelease(e) => e.base.accept(),
            Self::MouseMove(e) => e.base.accept(),
            Self::Wheel(e) => e.base.accept(),
            Self::Enter(e) => e.base.accept(),
            Self::Leave(e) => e.base.accept(),
            Self::FocusIn(e) => e.base.accept(),
            Self::FocusOut(e) => e.base.accept(),
            Self::KeyPress(e) => e.base.accept(),
        }
    }

    /// Ignore the event.
    pub fn ignore(&mut self) {
        match self {
            Self::MousePress(e) => e.base.ignore(),
            Self::DoubleClick(e) => e.base.ignore(),
            Self::MouseRelease(e) => e.base.ignore(),
            Self::MouseMove(e) => e.base.ignore(),
            Self::Wheel(e) => e.base.ignore(),
            Self::Enter(e) => e.base.ignore(),
            Self::Leave(e) => e.base.ignore(),
            Self::FocusIn(e) => e.base.ignore(),
            Self::FocusOut(e) => e.base.ignore(),
            Self::KeyPress(e) => e.base.ignore(),
        }
    }
}

/// Outbound notification drained by the host.
///
/// Pushed onto the desktop's queue during the entry-point calls; the host
/// reads them in order with
/// [`Desktop::poll_event`](crate::widget::Desktop::poll_event). Press,
/// release, double-click, and focus notifications come from the router
/// itself; the rest come from the widget the notification names.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// A widget handled a mouse press.
    Pressed {
        /// The widget that was pressed.
        widget: WidgetId,
        /// The button involved.
        button: MouseButton,
    },
    /// A widget handled a mouse release.
    Released {
        /// The widget that was released.
        widget: WidgetId,
        /// The button involved.
        button: MouseButton,
    },
    /// A widget handled a double-click.
    DoubleClicked {
        /// The widget that was double-clicked.
        widget: WidgetId,
        /// The button involved.
        button: MouseButton,
    },
    /// A button-style widget completed a press-release cycle inside its bounds.
    Clicked {
        /// The clicked widget.
        widget: WidgetId,
    },
    /// A checkable widget changed its checked state.
    Toggled {
        /// The toggled widget.
        widget: WidgetId,
        /// The new checked state.
        checked: bool,
    },
    /// A widget gained keyboard focus.
    FocusGained {
        /// The widget that gained focus.
        widget: WidgetId,
    },
    /// A widget lost keyboard focus.
    FocusLost {
        /// The widget that lost focus.
        widget: WidgetId,
    },
    /// A selection widget changed its selected index.
    SelectionChanged {
        /// The widget whose selection changed.
        widget: WidgetId,
        /// The new selected index, `None` when nothing is selected.
        index: Option<usize>,
    },
    /// A scrollable widget changed its scroll position.
    ScrollChanged {
        /// The widget that scrolled.
        widget: WidgetId,
        /// The new scroll offset in content units.
        scroll: f32,
    },
    /// A text widget's buffer changed.
    TextChanged {
        /// The widget whose text changed.
        widget: WidgetId,
    },
    /// A single-line text widget committed its value (Enter or focus loss).
    TextCommitted {
        /// The widget that committed.
        widget: WidgetId,
        /// The committed text.
        text: String,
    },
    /// A drag-style widget was dragged.
    Dragged {
        /// The dragged widget.
        widget: WidgetId,
        /// Cursor movement since the previous move event, window coordinates.
        delta: Point,
    },
    /// A popup menu row was chosen (menus without an owner only).
    MenuItemSelected {
        /// The menu.
        menu: WidgetId,
        /// The chosen row index.
        index: usize,
    },
    /// The open popup menu was closed.
    MenuClosed {
        /// The menu that closed.
        menu: WidgetId,
    },
}

/// A message routed from a widget to its configured owner.
///
/// Owners are set through
/// [`WidgetBase::set_owner`](crate::widget::WidgetBase::set_owner); the
/// router delivers the notice to the owner's
/// [`Widget::notice`](crate::widget::Widget::notice) hook after the
/// originating event dispatch returns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notice {
    /// A popup menu row was chosen.
    MenuItemChosen {
        /// The chosen row index.
        index: usize,
    },
    /// A drag-style child moved; owners typically shift their geometry.
    Dragged {
        /// Cursor movement since the previous move event, window coordinates.
        delta: Point,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_flag_round_trip() {
        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(Key::A, KeyboardModifiers::NONE));
        assert!(!event.is_accepted());
        event.accept();
        assert!(event.is_accepted());
        event.ignore();
        assert!(!event.is_accepted());
    }

    #[test]
    fn test_move_event_button_mask() {
        let event = MouseMoveEvent::new(Point::ZERO, Point::ZERO, 0b001, KeyboardModifiers::NONE);
        assert!(event.is_button_pressed(MouseButton::Left));
        assert!(!event.is_button_pressed(MouseButton::Right));
    }
}
