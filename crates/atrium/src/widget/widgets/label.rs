//! Label widget for static text display.
//!
//! # Example
//!
//! ```
//! use atrium::widget::widgets::Label;
//! use atrium::style::Alignment;
//!
//! let label = Label::new("Ready.").with_alignment(Alignment::Right);
//! assert_eq!(label.text(), "Ready.");
//! ```

use std::any::Any;

use atrium_render::{Color, Point};

use crate::style::{Alignment, Theme};
use crate::widget::{LayoutCtx, PaintContext, Widget, WidgetBase, WidgetKind};

/// A widget that displays a single line of text.
///
/// Labels are transparent to the mouse by default (ignored during
/// hit-testing), so a label layered over a button does not steal its
/// clicks. They auto-size to their text on layout unless told otherwise.
#[derive(Debug)]
pub struct Label {
    /// Widget base for common functionality.
    base: WidgetBase,

    /// The text to display.
    text: String,

    /// Alignment override; `None` uses the theme alignment.
    alignment: Option<Alignment>,

    /// Text color override; `None` uses the theme foreground.
    text_color: Option<Color>,

    /// Whether layout resizes the label to fit its text.
    auto_size: bool,
}

impl Label {
    /// Create a new label with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        let mut base = WidgetBase::new();
        base.set_ignore(true);
        base.set_draw_back(false);

        Self {
            base,
            text: text.into(),
            alignment: None,
            text_color: None,
            auto_size: true,
        }
    }

    /// Get the current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set the text to display.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Set the text using builder pattern.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Get the alignment override, if any.
    pub fn alignment(&self) -> Option<Alignment> {
        self.alignment
    }

    /// Override the theme alignment.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = Some(alignment);
    }

    /// Set the alignment using builder pattern.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Get the text color override, if any.
    pub fn text_color(&self) -> Option<Color> {
        self.text_color
    }

    /// Override the theme text color.
    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = Some(color);
    }

    /// Set the text color using builder pattern.
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }

    /// Check if the label auto-sizes to its text.
    pub fn auto_size(&self) -> bool {
        self.auto_size
    }

    /// Set whether layout resizes the label to fit its text.
    pub fn set_auto_size(&mut self, auto_size: bool) {
        self.auto_size = auto_size;
    }

    /// Set auto-sizing using builder pattern.
    pub fn with_auto_size(mut self, auto_size: bool) -> Self {
        self.auto_size = auto_size;
        self
    }
}

impl Widget for Label {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Label
    }

    fn layout(&mut self, ctx: &LayoutCtx<'_>) {
        if self.auto_size {
            let size = ctx.text().measure(&ctx.theme().font, &self.text);
            self.base.set_size(size);
        }
    }

    fn paint(&self, ctx: &mut PaintContext<'_>, theme: &Theme) {
        if self.text.is_empty() {
            return;
        }

        let text_size = ctx.renderer().measure(&theme.font, &self.text);
        let x = match self.alignment.unwrap_or(theme.alignment) {
            Alignment::Left => 0.0,
            Alignment::Center => (ctx.width() - text_size.width) / 2.0,
            Alignment::Right => ctx.width() - text_size.width,
        };
        let y = (ctx.height() - text_size.height) / 2.0;
        let color = self.text_color.unwrap_or(theme.fore.normal);
        ctx.renderer()
            .draw_text(Point::new(x, y), &self.text, &theme.font, color);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

static_assertions::assert_impl_all!(Label: Send);

#[cfg(test)]
mod tests {
    use atrium_render::FixedMetrics;

    use super::*;

    #[test]
    fn test_label_defaults() {
        let label = Label::new("Hello");
        assert_eq!(label.text(), "Hello");
        assert!(label.widget_base().is_ignored());
        assert!(!label.widget_base().draws_back());
        assert!(label.auto_size());
        assert_eq!(label.alignment(), None);
    }

    #[test]
    fn test_auto_size_follows_text() {
        let mut label = Label::new("abcd");
        let theme = Theme::default();
        let metrics = FixedMetrics::default();
        let ctx = LayoutCtx::new(&metrics, &theme, atrium_render::Size::ZERO);

        label.layout(&ctx);
        assert_eq!(label.widget_base().size().width, 4.0 * 7.0);
        assert_eq!(label.widget_base().size().height, 14.0);
    }

    #[test]
    fn test_builder_pattern() {
        let label = Label::new("x")
            .with_alignment(Alignment::Center)
            .with_text_color(Color::RED)
            .with_auto_size(false);
        assert_eq!(label.alignment(), Some(Alignment::Center));
        assert_eq!(label.text_color(), Some(Color::RED));
        assert!(!label.auto_size());
    }
}
