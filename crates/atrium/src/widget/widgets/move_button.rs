//! Drag handle widget.

use std::any::Any;

use atrium_render::Point;

use crate::event::{Notice, UiEvent, WidgetEvent};
use crate::input::MouseButton;
use crate::style::Theme;
use crate::widget::{EventCtx, PaintContext, Widget, WidgetBase, WidgetKind};

/// A grip that turns mouse drags into movement deltas.
///
/// While the left button is held on the grip, every cursor move produces a
/// [`Notice::Dragged`] to the grip's owner (a
/// [`Container`](super::Container) moves itself by the delta) and a
/// [`UiEvent::Dragged`] for the host. Deltas are measured in window
/// coordinates, so moving the owner underneath the grip does not feed back
/// into the next delta.
pub struct MoveButton {
    /// Widget base for common functionality.
    base: WidgetBase,

    /// Whether a drag is in progress.
    dragging: bool,

    /// Cursor position at the last drag step, window coordinates.
    last_cursor: Point,
}

impl Default for MoveButton {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveButton {
    /// Create a new drag handle.
    pub fn new() -> Self {
        let mut base = WidgetBase::new();
        base.set_draw_back(false);

        Self {
            base,
            dragging: false,
            last_cursor: Point::ZERO,
        }
    }

    /// Check if a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn handle_mouse_move(&mut self, window_pos: Point, ctx: &mut EventCtx<'_>) {
        let delta = Point::new(
            window_pos.x - self.last_cursor.x,
            window_pos.y - self.last_cursor.y,
        );
        self.last_cursor = window_pos;
        if delta.x == 0.0 && delta.y == 0.0 {
            return;
        }
        if let Some(owner) = self.base.owner() {
            ctx.send_notice(owner, Notice::Dragged { delta });
        }
        ctx.push_event(UiEvent::Dragged { widget: self.base.id(), delta });
    }
}

impl Widget for MoveButton {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::MoveButton
    }

    fn paint(&self, ctx: &mut PaintContext<'_>, theme: &Theme) {
        let back = if self.dragging {
            theme.back.pressed
        } else if self.base.is_hovered() {
            theme.back.hovered
        } else {
            self.base.back_color().unwrap_or(theme.back.normal)
        };
        let rect = ctx.rect();
        ctx.renderer().fill_rect(rect, back);

        // Grip lines across the middle third.
        let inset = rect.width() / 4.0;
        let mid = rect.height() / 2.0;
        for offset in [-3.0, 0.0, 3.0] {
            let y = mid + offset;
            if y > 1.0 && y < rect.height() - 1.0 {
                ctx.renderer().draw_line(
                    Point::new(inset, y),
                    Point::new(rect.width() - inset, y),
                    theme.border,
                    1.0,
                );
            }
        }
    }

    fn event(&mut self, event: &mut WidgetEvent, ctx: &mut EventCtx<'_>) -> bool {
        match event {
            WidgetEvent::MousePress(e) => {
                self.dragging = true;
                self.last_cursor = e.window_pos;
                ctx.request_focus();
                event.accept();
                true
            }
            WidgetEvent::MouseMove(e) => {
                if self.dragging && e.is_button_pressed(MouseButton::Left) {
                    let window_pos = e.window_pos;
                    self.handle_mouse_move(window_pos, ctx);
                }
                true
            }
            WidgetEvent::MouseRelease(_) => {
                self.dragging = false;
                event.accept();
                true
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

static_assertions::assert_impl_all!(MoveButton: Send);
