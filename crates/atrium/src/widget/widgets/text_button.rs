//! Push button with a text caption.

use std::any::Any;

use atrium_render::{Color, Point};

use crate::event::{Notice, WidgetEvent};
use crate::style::{Alignment, Theme};
use crate::widget::{EventCtx, PaintContext, Widget, WidgetBase, WidgetKind};

use super::Button;

/// A [`Button`] that draws a caption over its face.
///
/// Wraps a plain button for all press/click behavior; only the painting
/// differs.
pub struct TextButton {
    /// The wrapped button (shares the widget base).
    button: Button,

    /// The caption text.
    text: String,

    /// Alignment override; `None` centers the caption.
    alignment: Option<Alignment>,

    /// Caption color override; `None` follows the theme state colors.
    text_color: Option<Color>,
}

impl TextButton {
    /// Create a new text button with the given caption.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            button: Button::new(),
            text: text.into(),
            alignment: None,
            text_color: None,
        }
    }

    /// Get the caption text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set the caption text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Set the caption using builder pattern.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Override the default centered caption alignment.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = Some(alignment);
    }

    /// Set the alignment using builder pattern.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Override the theme caption color.
    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = Some(color);
    }

    /// Set checkable using builder pattern.
    pub fn with_checkable(mut self, checkable: bool) -> Self {
        self.button.set_checkable(checkable);
        self
    }

    /// The wrapped button (checked state, pressed state).
    pub fn button(&self) -> &Button {
        &self.button
    }

    /// The wrapped button, mutably.
    pub fn button_mut(&mut self) -> &mut Button {
        &mut self.button
    }

    /// Check if the button is currently checked.
    pub fn is_checked(&self) -> bool {
        self.button.is_checked()
    }
}

impl Widget for TextButton {
    fn widget_base(&self) -> &WidgetBase {
        self.button.widget_base()
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        self.button.widget_base_mut()
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::TextButton
    }

    fn paint(&self, ctx: &mut PaintContext<'_>, theme: &Theme) {
        self.button.paint(ctx, theme);
        if self.text.is_empty() {
            return;
        }

        let fore = if let Some(color) = self.text_color {
            color
        } else if self.button.is_pressed() {
            theme.fore.pressed
        } else if self.button.is_checked() {
            theme.fore.toggled
        } else if self.widget_base().is_hovered() {
            theme.fore.hovered
        } else {
            theme.fore.normal
        };

        let text_size = ctx.renderer().measure(&theme.font, &self.text);
        let x = match self.alignment {
            Some(Alignment::Left) => theme.padding,
            Some(Alignment::Right) => ctx.width() - text_size.width - theme.padding,
            Some(Alignment::Center) | None => (ctx.width() - text_size.width) / 2.0,
        };
        let y = (ctx.height() - text_size.height) / 2.0;
        ctx.renderer()
            .draw_text(Point::new(x, y), &self.text, &theme.font, fore);
    }

    fn event(&mut self, event: &mut WidgetEvent, ctx: &mut EventCtx<'_>) -> bool {
        self.button.event(event, ctx)
    }

    fn notice(&mut self, notice: Notice, ctx: &mut EventCtx<'_>) {
        self.button.notice(notice, ctx);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

static_assertions::assert_impl_all!(TextButton: Send);

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use atrium_render::{FixedMetrics, Rect};

    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::event::{MousePressEvent, MouseReleaseEvent, UiEvent};
    use crate::input::{KeyboardModifiers, MouseButton};

    #[test]
    fn test_caption_access() {
        let mut button = TextButton::new("OK");
        assert_eq!(button.text(), "OK");
        button.set_text("Cancel");
        assert_eq!(button.text(), "Cancel");
    }

    #[test]
    fn test_click_behavior_is_delegated() {
        let mut button = TextButton::new("OK");
        button
            .widget_base_mut()
            .set_geometry(Rect::new(0.0, 0.0, 80.0, 24.0));

        let theme = Theme::default();
        let metrics = FixedMetrics::default();
        let mut clipboard = MemoryClipboard::new();
        let mut events = VecDeque::new();
        let at = Point::new(5.0, 5.0);

        let mut ctx = EventCtx::new(
            button.widget_base().id(),
            None,
            &metrics,
            &theme,
            &mut clipboard,
            &mut events,
        );
        let mut press = WidgetEvent::MousePress(MousePressEvent::new(
            MouseButton::Left,
            at,
            at,
            KeyboardModifiers::NONE,
        ));
        assert!(button.event(&mut press, &mut ctx));
        assert!(button.button().is_pressed());

        let mut ctx = EventCtx::new(
            button.widget_base().id(),
            None,
            &metrics,
            &theme,
            &mut clipboard,
            &mut events,
        );
        let mut release = WidgetEvent::MouseRelease(MouseReleaseEvent::new(
            MouseButton::Left,
            at,
            at,
            KeyboardModifiers::NONE,
        ));
        assert!(button.event(&mut release, &mut ctx));
        assert!(events.contains(&UiEvent::Clicked { widget: button.widget_base().id() }));
    }
}
