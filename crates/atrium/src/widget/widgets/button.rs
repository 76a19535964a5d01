//! Push button widget.
//!
//! # Example
//!
//! ```
//! use atrium::widget::widgets::Button;
//!
//! let button = Button::new().with_checkable(true);
//! assert!(!button.is_checked());
//! ```

use std::any::Any;

use crate::error::{WidgetError, WidgetResult};
use crate::event::{UiEvent, WidgetEvent};
use crate::input::Key;
use crate::style::Theme;
use crate::widget::{EventCtx, PaintContext, Widget, WidgetBase, WidgetKind};

/// A clickable button painted with the theme's state colors.
///
/// A click is a press followed by a release inside the button's bounds;
/// dragging off before releasing cancels it. Checkable buttons flip their
/// checked state on each click and report it with [`UiEvent::Toggled`].
pub struct Button {
    /// Widget base for common functionality.
    base: WidgetBase,

    /// Whether clicks toggle a persistent checked state.
    checkable: bool,

    /// Current checked state (checkable buttons only).
    checked: bool,

    /// Whether a press is currently held on the button.
    pressed: bool,
}

impl Default for Button {
    fn default() -> Self {
        Self::new()
    }
}

impl Button {
    /// Create a new button.
    pub fn new() -> Self {
        let mut base = WidgetBase::new();
        base.set_draw_back(false);

        Self {
            base,
            checkable: false,
            checked: false,
            pressed: false,
        }
    }

    /// Check if clicks toggle a persistent checked state.
    pub fn is_checkable(&self) -> bool {
        self.checkable
    }

    /// Set whether clicks toggle a persistent checked state.
    pub fn set_checkable(&mut self, checkable: bool) {
        self.checkable = checkable;
        if !checkable {
            self.checked = false;
        }
    }

    /// Set checkable using builder pattern.
    pub fn with_checkable(mut self, checkable: bool) -> Self {
        self.set_checkable(checkable);
        self
    }

    /// Check if the button is currently checked.
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Set the checked state directly (emits nothing).
    ///
    /// Fails on a non-checkable button, which has no checked state to set.
    pub fn set_checked(&mut self, checked: bool) -> WidgetResult<()> {
        if !self.checkable {
            return Err(WidgetError::UnsupportedOperation(
                "set_checked on a non-checkable button",
            ));
        }
        self.checked = checked;
        Ok(())
    }

    /// Check if a press is currently held on the button.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Complete a click: toggle if checkable and report it.
    fn click(&mut self, ctx: &mut EventCtx<'_>) {
        let widget = self.base.id();
        if self.checkable {
            self.checked = !self.checked;
            ctx.push_event(UiEvent::Toggled { widget, checked: self.checked });
        }
        ctx.push_event(UiEvent::Clicked { widget });
    }

    // =========================================================================
    // Event Handlers
    // =========================================================================

    fn handle_mouse_press(&mut self, ctx: &mut EventCtx<'_>) {
        self.pressed = true;
        ctx.request_focus();
    }

    fn handle_mouse_release(&mut self, inside: bool, ctx: &mut EventCtx<'_>) {
        if self.pressed {
            self.pressed = false;
            if inside {
                self.click(ctx);
            }
        }
    }

    fn handle_key_press(&mut self, key: Key, ctx: &mut EventCtx<'_>) -> bool {
        match key {
            Key::Enter | Key::Space => {
                self.click(ctx);
                true
            }
            _ => false,
        }
    }
}

impl Widget for Button {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Button
    }

    fn paint(&self, ctx: &mut PaintContext<'_>, theme: &Theme) {
        let back = if self.pressed {
            theme.back.pressed
        } else if self.checked {
            theme.back.toggled
        } else if self.base.is_hovered() {
            theme.back.hovered
        } else {
            self.base.back_color().unwrap_or(theme.back.normal)
        };
        let rect = ctx.rect();
        ctx.renderer().fill_rect(rect, back);
        ctx.renderer().stroke_rect(rect, theme.border, 1.0);
    }

    fn event(&mut self, event: &mut WidgetEvent, ctx: &mut EventCtx<'_>) -> bool {
        match event {
            WidgetEvent::MousePress(_) => {
                self.handle_mouse_press(ctx);
                event.accept();
                true
            }
            WidgetEvent::MouseRelease(e) => {
                let inside = self.base.rect().contains(e.local_pos);
                self.handle_mouse_release(inside, ctx);
                event.accept();
                true
            }
            WidgetEvent::KeyPress(e) => {
                let key = e.key;
                if self.handle_key_press(key, ctx) {
                    event.accept();
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

static_assertions::assert_impl_all!(Button: Send);

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use atrium_render::{FixedMetrics, Point, Rect};

    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::event::{MousePressEvent, MouseReleaseEvent};
    use crate::input::{KeyboardModifiers, MouseButton};

    fn setup() -> Button {
        let mut button = Button::new();
        button
            .widget_base_mut()
            .set_geometry(Rect::new(0.0, 0.0, 80.0, 24.0));
        button
    }

    fn press_release(button: &mut Button, release_at: Point, events: &mut VecDeque<UiEvent>) {
        let theme = Theme::default();
        let metrics = FixedMetrics::default();
        let mut clipboard = MemoryClipboard::new();

        let mut ctx = EventCtx::new(button.base.id(), None, &metrics, &theme, &mut clipboard, events);
        let mut press = WidgetEvent::MousePress(MousePressEvent::new(
            MouseButton::Left,
            Point::new(5.0, 5.0),
            Point::new(5.0, 5.0),
            KeyboardModifiers::NONE,
        ));
        assert!(button.event(&mut press, &mut ctx));

        let mut ctx = EventCtx::new(button.base.id(), None, &metrics, &theme, &mut clipboard, events);
        let mut release = WidgetEvent::MouseRelease(MouseReleaseEvent::new(
            MouseButton::Left,
            release_at,
            release_at,
            KeyboardModifiers::NONE,
        ));
        assert!(button.event(&mut release, &mut ctx));
    }

    #[test]
    fn test_click_emits_on_release_inside() {
        let mut button = setup();
        let mut events = VecDeque::new();
        press_release(&mut button, Point::new(10.0, 10.0), &mut events);
        assert!(events.contains(&UiEvent::Clicked { widget: button.base.id() }));
    }

    #[test]
    fn test_release_outside_cancels_click() {
        let mut button = setup();
        let mut events = VecDeque::new();
        press_release(&mut button, Point::new(200.0, 200.0), &mut events);
        assert!(!events.iter().any(|e| matches!(e, UiEvent::Clicked { .. })));
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_checkable_toggles_on_click() {
        let mut button = setup().with_checkable(true);
        let mut events = VecDeque::new();

        press_release(&mut button, Point::new(10.0, 10.0), &mut events);
        assert!(button.is_checked());
        assert!(events.contains(&UiEvent::Toggled { widget: button.base.id(), checked: true }));

        events.clear();
        press_release(&mut button, Point::new(10.0, 10.0), &mut events);
        assert!(!button.is_checked());
        assert!(events.contains(&UiEvent::Toggled { widget: button.base.id(), checked: false }));
    }

    #[test]
    fn test_disabling_checkable_clears_checked() {
        let mut button = setup().with_checkable(true);
        button.set_checked(true).unwrap();
        assert!(button.is_checked());
        button.set_checkable(false);
        assert!(!button.is_checked());
    }

    #[test]
    fn test_set_checked_requires_checkable() {
        let mut button = setup();
        let err = button.set_checked(true).unwrap_err();
        assert!(matches!(err, WidgetError::UnsupportedOperation(_)));
        assert!(!button.is_checked());
    }
}
