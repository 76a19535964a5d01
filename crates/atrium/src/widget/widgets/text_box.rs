//! Single-line text input widget.
//!
//! A `TextBox` keeps one line of text with a caret, scrolls horizontally to
//! keep the caret visible, and filters typed characters through a
//! [`CharFilter`]. Enter and focus loss commit the value; in numeric mode a
//! value that fails to parse reverts to the text the edit started from.
//!
//! # Example
//!
//! ```
//! use atrium::widget::widgets::TextBox;
//!
//! let mut input = TextBox::new().with_text("41");
//! input.set_digits_allowed(true);
//! input.set_letters_allowed(false);
//! assert_eq!(input.text(), "41");
//! ```

use std::any::Any;

use atrium_render::{Point, TextMeasure};

use crate::event::{UiEvent, WidgetEvent};
use crate::input::{Key, KeyboardModifiers};
use crate::style::Theme;
use crate::widget::widgets::text_edit::{
    CharFilter, index_at_x, next_char, next_word, prefix_width, prev_char, prev_word,
    reveal_offset,
};
use crate::widget::{EventCtx, PaintContext, Widget, WidgetBase, WidgetKind};

/// A single-line text input with caret, filtering, and commit-on-Enter.
pub struct TextBox {
    /// Widget base for common functionality.
    base: WidgetBase,

    /// The edited text. Never contains newlines.
    text: String,

    /// Caret byte index, always on a char boundary.
    cursor: usize,

    /// Horizontal scroll offset in pixels.
    scroll: f32,

    /// Which typed characters are accepted.
    filter: CharFilter,

    /// When set, commits must parse as a number or the text reverts.
    numeric: bool,

    /// The text as of the last focus gain or commit; the revert target.
    pre_edit: String,
}

impl TextBox {
    /// Create a new empty text box.
    pub fn new() -> Self {
        let mut base = WidgetBase::new();
        base.set_draw_back(false);
        base.set_stop_on_tab(true);

        Self {
            base,
            text: String::new(),
            cursor: 0,
            scroll: 0.0,
            filter: CharFilter::new(),
            numeric: false,
            pre_edit: String::new(),
        }
    }

    /// Set the initial text using builder pattern.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Set numeric commit mode using builder pattern.
    pub fn with_numeric(mut self, numeric: bool) -> Self {
        self.numeric = numeric;
        self
    }

    // =========================================================================
    // Text and Caret
    // =========================================================================

    /// Get the current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text, dropping anything the filter rejects.
    ///
    /// The caret moves to the end and the scroll re-homes. The new text also
    /// becomes the revert target for numeric commits.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = self.filter.filter_text(&text.into(), false);
        self.cursor = self.text.len();
        self.scroll = 0.0;
        self.pre_edit = self.text.clone();
    }

    /// Get the caret byte index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the caret, snapping into range and onto a char boundary.
    pub fn set_cursor(&mut self, index: usize) {
        let mut i = index.min(self.text.len());
        while !self.text.is_char_boundary(i) {
            i -= 1;
        }
        self.cursor = i;
    }

    /// Get the horizontal scroll offset in pixels.
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    // =========================================================================
    // Filtering and Numeric Mode
    // =========================================================================

    /// Set whether alphabetic characters are accepted.
    pub fn set_letters_allowed(&mut self, allow: bool) {
        self.filter.set_letters(allow);
    }

    /// Set whether numeric characters are accepted.
    pub fn set_digits_allowed(&mut self, allow: bool) {
        self.filter.set_digits(allow);
    }

    /// Restrict special characters to the given set, or allow all with
    /// `None`.
    pub fn set_special_chars(&mut self, specials: Option<&str>) {
        self.filter.set_specials(specials);
    }

    /// Check whether numeric commit mode is on.
    pub fn is_numeric(&self) -> bool {
        self.numeric
    }

    /// Set numeric commit mode: committed text must parse as a number or it
    /// reverts to the pre-edit value.
    pub fn set_numeric(&mut self, numeric: bool) {
        self.numeric = numeric;
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Pixel width of the text area between the horizontal paddings.
    fn view_width(&self, theme: &Theme) -> f32 {
        (self.base.width() - 2.0 * theme.padding).max(0.0)
    }

    /// Caret pixel offset from the start of the text.
    fn caret_x(&self, measure: &dyn TextMeasure, theme: &Theme) -> f32 {
        prefix_width(measure, &theme.font, &self.text, self.cursor)
    }

    /// Scroll just enough to bring the caret back into view.
    fn reveal(&mut self, measure: &dyn TextMeasure, theme: &Theme) {
        let caret = self.caret_x(measure, theme);
        self.scroll = reveal_offset(self.scroll, caret, self.view_width(theme), 0.0);
    }

    /// Replace `range` with `insert`, landing the caret after the insertion.
    fn splice(&mut self, range: std::ops::Range<usize>, insert: &str, ctx: &mut EventCtx<'_>) {
        self.cursor = range.start + insert.len();
        self.text.replace_range(range, insert);
        ctx.push_event(UiEvent::TextChanged { widget: self.base.id() });
    }

    /// Commit the current value, reverting unparseable numeric input.
    fn commit(&mut self, ctx: &mut EventCtx<'_>) {
        if self.numeric && self.text.trim().parse::<f64>().is_err() && self.text != self.pre_edit {
            self.text = self.pre_edit.clone();
            self.set_cursor(self.cursor);
            self.reveal(ctx.text(), ctx.theme());
            ctx.push_event(UiEvent::TextChanged { widget: self.base.id() });
        }
        self.pre_edit = self.text.clone();
        ctx.push_event(UiEvent::TextCommitted {
            widget: self.base.id(),
            text: self.text.clone(),
        });
    }

    // =========================================================================
    // Event Handlers
    // =========================================================================

    fn handle_mouse_press(&mut self, local_pos: Point, ctx: &mut EventCtx<'_>) {
        ctx.request_focus();
        let theme = ctx.theme();
        let x = local_pos.x - theme.padding + self.scroll;
        self.cursor = index_at_x(ctx.text(), &theme.font, &self.text, x);
        self.reveal(ctx.text(), ctx.theme());
    }

    fn handle_key_press(
        &mut self,
        key: Key,
        modifiers: KeyboardModifiers,
        ctx: &mut EventCtx<'_>,
    ) -> bool {
        match key {
            Key::ArrowLeft => {
                self.cursor = if modifiers.control {
                    prev_word(&self.text, self.cursor)
                } else {
                    prev_char(&self.text, self.cursor)
                };
            }
            Key::ArrowRight => {
                self.cursor = if modifiers.control {
                    next_word(&self.text, self.cursor)
                } else {
                    next_char(&self.text, self.cursor)
                };
            }
            Key::Home => self.cursor = 0,
            Key::End => self.cursor = self.text.len(),
            Key::Backspace => {
                if self.cursor > 0 {
                    let start = prev_char(&self.text, self.cursor);
                    self.splice(start..self.cursor, "", ctx);
                    self.rehome_if_fitting(ctx);
                }
            }
            Key::Delete => {
                if self.cursor < self.text.len() {
                    let end = next_char(&self.text, self.cursor);
                    self.splice(self.cursor..end, "", ctx);
                    self.rehome_if_fitting(ctx);
                }
            }
            Key::Enter | Key::NumpadEnter => {
                self.commit(ctx);
                return true;
            }
            _ => {
                let Some(c) = self.filter.char_for_key(key, modifiers) else {
                    return false;
                };
                let mut buf = [0u8; 4];
                let insert = c.encode_utf8(&mut buf);
                self.splice(self.cursor..self.cursor, insert, ctx);
            }
        }
        self.reveal(ctx.text(), ctx.theme());
        true
    }

    /// After a deletion, re-home the scroll when the whole string fits.
    fn rehome_if_fitting(&mut self, ctx: &mut EventCtx<'_>) {
        let full = prefix_width(ctx.text(), &ctx.theme().font, &self.text, self.text.len());
        if full <= self.view_width(ctx.theme()) {
            self.scroll = 0.0;
        }
    }
}

impl Default for TextBox {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for TextBox {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::TextBox
    }

    fn paint(&self, ctx: &mut PaintContext<'_>, theme: &Theme) {
        let rect = ctx.rect();
        ctx.renderer().fill_rect(rect, theme.field_back);
        let border = if self.base.has_focus() {
            theme.selection
        } else {
            theme.border
        };
        ctx.renderer().stroke_rect(rect, border, 1.0);

        let renderer = ctx.renderer();
        renderer.save();
        renderer.clip_rect(rect.deflate(1.0));

        let line_height = renderer.line_height(&theme.font);
        let origin = Point::new(
            theme.padding - self.scroll,
            (rect.height() - line_height) / 2.0,
        );
        renderer.draw_text(origin, &self.text, &theme.font, theme.fore.normal);

        if self.base.has_focus() {
            let caret_x = origin.x + prefix_width(&*renderer, &theme.font, &self.text, self.cursor);
            renderer.draw_line(
                Point::new(caret_x, origin.y),
                Point::new(caret_x, origin.y + line_height),
                theme.caret,
                1.0,
            );
        }
        renderer.restore();
    }

    fn event(&mut self, event: &mut WidgetEvent, ctx: &mut EventCtx<'_>) -> bool {
        match event {
            WidgetEvent::MousePress(e) => {
                let local_pos = e.local_pos;
                self.handle_mouse_press(local_pos, ctx);
                event.accept();
                true
            }
            WidgetEvent::KeyPress(e) => {
                let (key, modifiers) = (e.key, e.modifiers);
                if self.handle_key_press(key, modifiers, ctx) {
                    event.accept();
                    true
                } else {
                    false
                }
            }
            WidgetEvent::FocusIn(_) => {
                self.pre_edit = self.text.clone();
                true
            }
            WidgetEvent::FocusOut(_) => {
                // Focus loss commits, however it came about.
                self.commit(ctx);
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

static_assertions::assert_impl_all!(TextBox: Send);

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use atrium_render::{FixedMetrics, Rect};

    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::event::{FocusInEvent, FocusOutEvent, FocusReason, KeyPressEvent, MousePressEvent};
    use crate::input::MouseButton;

    /// 60px wide box: view width 52 with the default 4px padding, so seven
    /// 7px glyphs fit.
    fn setup() -> TextBox {
        let mut input = TextBox::new();
        input
            .widget_base_mut()
            .set_geometry(Rect::new(0.0, 0.0, 60.0, 20.0));
        input
    }

    fn send(input: &mut TextBox, event: &mut WidgetEvent, events: &mut VecDeque<UiEvent>) -> bool {
        let theme = Theme::default();
        let metrics = FixedMetrics::default();
        let mut clipboard = MemoryClipboard::new();
        let mut ctx = EventCtx::new(
            input.base.id(),
            None,
            &metrics,
            &theme,
            &mut clipboard,
            events,
        );
        input.event(event, &mut ctx)
    }

    fn press_key(
        input: &mut TextBox,
        key: Key,
        modifiers: KeyboardModifiers,
        events: &mut VecDeque<UiEvent>,
    ) -> bool {
        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(key, modifiers));
        send(input, &mut event, events)
    }

    #[test]
    fn test_typing_inserts_at_cursor() {
        let mut input = setup();
        let mut events = VecDeque::new();

        press_key(&mut input, Key::A, KeyboardModifiers::NONE, &mut events);
        press_key(&mut input, Key::C, KeyboardModifiers::NONE, &mut events);
        press_key(&mut input, Key::ArrowLeft, KeyboardModifiers::NONE, &mut events);
        press_key(&mut input, Key::B, KeyboardModifiers::SHIFT, &mut events);

        assert_eq!(input.text(), "aBc");
        assert_eq!(input.cursor(), 2);
        assert!(events.contains(&UiEvent::TextChanged { widget: input.base.id() }));
    }

    #[test]
    fn test_filter_rejects_typed_chars() {
        let mut input = setup();
        input.set_letters_allowed(false);
        let mut events = VecDeque::new();

        assert!(!press_key(&mut input, Key::A, KeyboardModifiers::NONE, &mut events));
        assert!(press_key(&mut input, Key::Digit7, KeyboardModifiers::NONE, &mut events));
        assert_eq!(input.text(), "7");
        assert!(events.iter().all(|e| matches!(e, UiEvent::TextChanged { .. })));
    }

    #[test]
    fn test_click_places_cursor_by_half_glyph() {
        let mut input = setup().with_text("abcdef");
        let mut events = VecDeque::new();

        // Padding 4, glyphs 7px: x = 4 + 2*7 + 3 is just inside glyph 2.
        let at = Point::new(21.0, 10.0);
        let mut event = WidgetEvent::MousePress(MousePressEvent::new(
            MouseButton::Left,
            at,
            at,
            KeyboardModifiers::NONE,
        ));
        send(&mut input, &mut event, &mut events);
        assert_eq!(input.cursor(), 2);

        // One more pixel crosses the half-glyph point.
        let at = Point::new(22.0, 10.0);
        let mut event = WidgetEvent::MousePress(MousePressEvent::new(
            MouseButton::Left,
            at,
            at,
            KeyboardModifiers::NONE,
        ));
        send(&mut input, &mut event, &mut events);
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_scroll_reveals_caret_and_rehomes() {
        let mut input = setup().with_text("abcdefghijkl");
        let mut events = VecDeque::new();

        // Caret at the end: 12 glyphs = 84px against a 52px view.
        assert_eq!(input.scroll(), 0.0);
        press_key(&mut input, Key::End, KeyboardModifiers::NONE, &mut events);
        assert_eq!(input.scroll(), 84.0 - 52.0);

        // Deleting down to seven chars makes the string fit: scroll re-homes.
        for _ in 0..5 {
            press_key(&mut input, Key::Backspace, KeyboardModifiers::NONE, &mut events);
        }
        assert_eq!(input.text(), "abcdefg");
        assert_eq!(input.scroll(), 0.0);
    }

    #[test]
    fn test_home_end_and_word_navigation() {
        let mut input = setup().with_text("one two");
        let mut events = VecDeque::new();

        press_key(&mut input, Key::Home, KeyboardModifiers::NONE, &mut events);
        assert_eq!(input.cursor(), 0);
        press_key(&mut input, Key::ArrowRight, KeyboardModifiers::CTRL, &mut events);
        assert_eq!(input.cursor(), 4);
        press_key(&mut input, Key::End, KeyboardModifiers::NONE, &mut events);
        assert_eq!(input.cursor(), 7);
        press_key(&mut input, Key::ArrowLeft, KeyboardModifiers::CTRL, &mut events);
        assert_eq!(input.cursor(), 4);
    }

    #[test]
    fn test_numeric_commit_reverts_bad_input() {
        let mut input = setup().with_text("42").with_numeric(true);
        let mut events = VecDeque::new();

        let mut event = WidgetEvent::FocusIn(FocusInEvent::new(FocusReason::Mouse));
        send(&mut input, &mut event, &mut events);

        press_key(&mut input, Key::X, KeyboardModifiers::NONE, &mut events);
        assert_eq!(input.text(), "42x");

        press_key(&mut input, Key::Enter, KeyboardModifiers::NONE, &mut events);
        assert_eq!(input.text(), "42");
        assert!(events.contains(&UiEvent::TextCommitted {
            widget: input.base.id(),
            text: "42".to_owned(),
        }));
    }

    #[test]
    fn test_numeric_commit_keeps_good_input() {
        let mut input = setup().with_text("42").with_numeric(true);
        let mut events = VecDeque::new();

        press_key(&mut input, Key::Digit7, KeyboardModifiers::NONE, &mut events);
        press_key(&mut input, Key::Enter, KeyboardModifiers::NONE, &mut events);
        assert_eq!(input.text(), "427");
        assert!(events.contains(&UiEvent::TextCommitted {
            widget: input.base.id(),
            text: "427".to_owned(),
        }));
    }

    #[test]
    fn test_focus_out_commits() {
        let mut input = setup().with_text("9").with_numeric(true);
        let mut events = VecDeque::new();

        press_key(&mut input, Key::Backspace, KeyboardModifiers::NONE, &mut events);
        assert_eq!(input.text(), "");

        let mut event = WidgetEvent::FocusOut(FocusOutEvent::new(FocusReason::Other));
        send(&mut input, &mut event, &mut events);
        // Empty text is not a number: reverts to the pre-edit value.
        assert_eq!(input.text(), "9");
    }

    #[test]
    fn test_unused_events_fall_through() {
        let mut input = setup();
        let mut events = VecDeque::new();
        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(Key::F5, KeyboardModifiers::NONE));
        assert!(!send(&mut input, &mut event, &mut events));
    }
}
