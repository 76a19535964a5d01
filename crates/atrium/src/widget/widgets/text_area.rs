//! Multi-line text editing widget.
//!
//! `TextArea` extends the single-line editing model with a selection
//! anchor, line-aware vertical movement that remembers the pixel column it
//! started from, per-line selection highlight rectangles, clipboard
//! cut/copy/paste, and Tab indentation in three-space steps. Every buffer
//! mutation funnels through one splice primitive that shifts the cursor and
//! anchor by the exact lengths inserted or removed.
//!
//! # Example
//!
//! ```
//! use atrium::widget::widgets::TextArea;
//!
//! let mut editor = TextArea::new().with_text("fn main() {\n}\n");
//! editor.select_all();
//! assert_eq!(editor.selection(), Some((0, 14)));
//! ```

use std::any::Any;
use std::ops::Range;

use atrium_render::{Point, Rect, TextMeasure};

use crate::event::{UiEvent, WidgetEvent};
use crate::input::{Key, KeyboardModifiers};
use crate::style::Theme;
use crate::widget::widgets::text_edit::{
    CharFilter, index_at_x, line_end, line_start, next_char, next_word, prefix_width, prev_char,
    prev_word, reveal_offset, word_range,
};
use crate::widget::{EventCtx, PaintContext, Widget, WidgetBase, WidgetKind};

/// Indentation step for Tab, in space characters.
const INDENT: usize = 3;

/// A multi-line text editor with selection, clipboard, and indentation.
pub struct TextArea {
    /// Widget base for common functionality.
    base: WidgetBase,

    /// The edited text. Lines are separated by `\n`.
    text: String,

    /// Caret byte index, always on a char boundary.
    cursor: usize,

    /// Selection anchor; the selection spans anchor..cursor in either
    /// direction. `None` means no selection is in progress.
    anchor: Option<usize>,

    /// Scroll offsets in pixels, horizontal and vertical.
    scroll: Point,

    /// Which typed and pasted characters are accepted.
    filter: CharFilter,

    /// Whether Enter and pasted newlines insert line breaks.
    multi_line: bool,

    /// Pixel column captured when a run of Up/Down movement starts; keeps
    /// traversal of ragged lines visually straight.
    desired_x: Option<f32>,

    /// Selection highlight rectangles in text space, one per line span,
    /// rebuilt whenever the selection changes.
    highlight: Vec<Rect>,
}

impl TextArea {
    /// Create a new empty text area.
    pub fn new() -> Self {
        let mut base = WidgetBase::new();
        base.set_draw_back(false);
        base.set_accepts_double_clicks(true);

        Self {
            base,
            text: String::new(),
            cursor: 0,
            anchor: None,
            scroll: Point::ZERO,
            filter: CharFilter::new(),
            multi_line: true,
            desired_x: None,
            highlight: Vec::new(),
        }
    }

    /// Set the initial text using builder pattern.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    // =========================================================================
    // Text, Caret, and Selection
    // =========================================================================

    /// Get the current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text, dropping anything the filter rejects.
    ///
    /// The caret moves to the end; selection and scroll reset.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = self.filter.filter_text(&text.into(), self.multi_line);
        self.cursor = self.text.len();
        self.anchor = None;
        self.scroll = Point::ZERO;
        self.desired_x = None;
        self.highlight.clear();
    }

    /// Get the caret byte index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The selected byte range in ascending order, if any text is selected.
    pub fn selection(&self) -> Option<(usize, usize)> {
        let anchor = self.anchor?;
        if anchor == self.cursor {
            return None;
        }
        Some((anchor.min(self.cursor), anchor.max(self.cursor)))
    }

    /// Select the whole buffer.
    pub fn select_all(&mut self) {
        self.anchor = Some(0);
        self.cursor = self.text.len();
        self.highlight.clear();
    }

    /// Drop any selection, keeping the caret where it is.
    pub fn clear_selection(&mut self) {
        self.anchor = None;
        self.highlight.clear();
    }

    /// Selection highlight rectangles in text space, one per line span.
    pub fn selection_rects(&self) -> &[Rect] {
        &self.highlight
    }

    /// Get the scroll offsets in pixels.
    pub fn scroll(&self) -> Point {
        self.scroll
    }

    /// Check whether Enter inserts line breaks.
    pub fn is_multi_line(&self) -> bool {
        self.multi_line
    }

    /// Set whether Enter and pasted newlines insert line breaks.
    pub fn set_multi_line(&mut self, multi_line: bool) {
        self.multi_line = multi_line;
    }

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

    // =========================================================================
    // Splice Primitive
    // =========================================================================

    /// Replace `range` with `insert`, shifting the caret and anchor by the
    /// exact lengths removed and inserted. Indices inside the removed range
    /// collapse to the end of the insertion.
    fn splice(&mut self, range: Range<usize>, insert: &str, ctx: &mut EventCtx<'_>) {
        let shift = |i: usize| {
            if i <= range.start {
                i
            } else if i >= range.end {
                i - range.len() + insert.len()
            } else {
                range.start + insert.len()
            }
        };
        self.cursor = shift(self.cursor);
        self.anchor = self.anchor.map(shift);
        self.text.replace_range(range, insert);
        ctx.push_event(UiEvent::TextChanged { widget: self.base.id() });
    }

    /// Replace the selection (or insert at the caret) with `insert`,
    /// landing the caret after it.
    fn replace_selection(&mut self, insert: &str, ctx: &mut EventCtx<'_>) {
        let range = self
            .selection()
            .map_or(self.cursor..self.cursor, |(s, e)| s..e);
        let start = range.start;
        self.splice(range, insert, ctx);
        self.anchor = None;
        self.cursor = start + insert.len();
    }

    // =========================================================================
    // Movement
    // =========================================================================

    /// Move the caret; with `select` the anchor stays (or is planted at the
    /// old caret), without it any selection is dropped.
    fn move_cursor(&mut self, to: usize, select: bool) {
        if select {
            if self.anchor.is_none() {
                self.anchor = Some(self.cursor);
            }
        } else {
            self.anchor = None;
        }
        self.cursor = to;
    }

    /// Line number of a byte index, counting from zero.
    fn line_of(&self, i: usize) -> usize {
        self.text[..i].matches('\n').count()
    }

    /// Move to the neighboring line, re-measuring against the pixel column
    /// the vertical run started from.
    fn vertical_move(
        &mut self,
        down: bool,
        select: bool,
        measure: &dyn TextMeasure,
        theme: &Theme,
    ) {
        let ls = line_start(&self.text, self.cursor);
        let le = line_end(&self.text, self.cursor);
        let desired = self.desired_x.unwrap_or_else(|| {
            prefix_width(measure, &theme.font, &self.text[ls..le], self.cursor - ls)
        });
        self.desired_x = Some(desired);

        let target_start = if down {
            if le >= self.text.len() {
                return;
            }
            le + 1
        } else {
            if ls == 0 {
                return;
            }
            line_start(&self.text, ls - 1)
        };
        let target_end = line_end(&self.text, target_start);
        let line = &self.text[target_start..target_end];
        let to = target_start + index_at_x(measure, &theme.font, line, desired);
        self.move_cursor(to, select);
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Pixel size of the text viewport between the paddings.
    fn view_size(&self, theme: &Theme) -> (f32, f32) {
        (
            (self.base.width() - 2.0 * theme.padding).max(0.0),
            (self.base.height() - 2.0 * theme.padding).max(0.0),
        )
    }

    /// Caret position in text space.
    fn caret_pos(&self, measure: &dyn TextMeasure, theme: &Theme) -> Point {
        let ls = line_start(&self.text, self.cursor);
        let le = line_end(&self.text, self.cursor);
        let x = prefix_width(measure, &theme.font, &self.text[ls..le], self.cursor - ls);
        let y = self.line_of(self.cursor) as f32 * measure.line_height(&theme.font);
        Point::new(x, y)
    }

    /// Scroll just enough to bring the caret line back into view.
    fn reveal(&mut self, measure: &dyn TextMeasure, theme: &Theme) {
        let caret = self.caret_pos(measure, theme);
        let line_height = measure.line_height(&theme.font);
        let (view_w, view_h) = self.view_size(theme);

        self.scroll.x = reveal_offset(self.scroll.x, caret.x, view_w, 0.0);
        if caret.y < self.scroll.y {
            self.scroll.y = caret.y;
        } else if caret.y + line_height > self.scroll.y + view_h {
            self.scroll.y = (caret.y + line_height - view_h).max(0.0);
        }
    }

    /// The char boundary nearest to a widget-local position.
    fn index_at_point(&self, local: Point, measure: &dyn TextMeasure, theme: &Theme) -> usize {
        let line_height = measure.line_height(&theme.font);
        let y = local.y - theme.padding + self.scroll.y;
        let line_no = ((y / line_height).floor().max(0.0) as usize).min(self.line_of(self.text.len()));

        let mut start = 0;
        for _ in 0..line_no {
            start = line_end(&self.text, start) + 1;
        }
        let end = line_end(&self.text, start);
        let x = local.x - theme.padding + self.scroll.x;
        start + index_at_x(measure, &theme.font, &self.text[start..end], x)
    }

    /// Rebuild the selection highlight rectangles, one per line span.
    fn refresh_highlight(&mut self, measure: &dyn TextMeasure, theme: &Theme) {
        self.highlight.clear();
        let Some((start, end)) = self.selection() else {
            return;
        };
        let line_height = measure.line_height(&theme.font);
        let mut line_no = self.line_of(start);
        let mut pos = start;
        while pos < end {
            let ls = line_start(&self.text, pos);
            let le = line_end(&self.text, pos);
            let span_end = le.min(end);
            let line = &self.text[ls..le];
            let x0 = prefix_width(measure, &theme.font, line, pos - ls);
            let x1 = prefix_width(measure, &theme.font, line, span_end - ls);
            // Fully-selected empty lines keep a sliver so they stay visible.
            let width = (x1 - x0).max(2.0);
            self.highlight
                .push(Rect::new(x0, line_no as f32 * line_height, width, line_height));
            if span_end >= end {
                break;
            }
            pos = le + 1;
            line_no += 1;
        }
    }

    // =========================================================================
    // Clipboard and Indentation
    // =========================================================================

    fn copy_selection(&mut self, ctx: &mut EventCtx<'_>) {
        if let Some((start, end)) = self.selection() {
            let text = self.text[start..end].to_owned();
            ctx.clipboard().set_text(&text);
        }
    }

    fn paste(&mut self, ctx: &mut EventCtx<'_>) {
        let Some(raw) = ctx.clipboard().get_text() else {
            return;
        };
        let insert = self.filter.filter_text(&raw, self.multi_line);
        if !insert.is_empty() {
            self.replace_selection(&insert, ctx);
        }
    }

    /// Starts of every line the range `[start, end)` touches. A range
    /// ending exactly at a line start leaves that line untouched.
    fn touched_line_starts(&self, start: usize, end: usize) -> Vec<usize> {
        let mut starts = Vec::new();
        let mut pos = line_start(&self.text, start);
        loop {
            starts.push(pos);
            let le = line_end(&self.text, pos);
            if le >= end || le >= self.text.len() {
                break;
            }
            pos = le + 1;
            if pos >= end {
                break;
            }
        }
        starts
    }

    /// Tab indentation: a bare Tab pads the caret out to the next
    /// three-column stop; with a selection every touched line gains or
    /// loses (Shift) one indent step at its start.
    fn handle_tab(&mut self, shift: bool, ctx: &mut EventCtx<'_>) {
        match self.selection() {
            Some((start, end)) => {
                // Last line first, so earlier starts stay valid.
                for ls in self.touched_line_starts(start, end).into_iter().rev() {
                    if shift {
                        let le = line_end(&self.text, ls);
                        let leading = self.text[ls..le]
                            .chars()
                            .take(INDENT)
                            .take_while(|c| *c == ' ')
                            .count();
                        if leading > 0 {
                            self.splice(ls..ls + leading, "", ctx);
                        }
                    } else {
                        self.splice(ls..ls, &" ".repeat(INDENT), ctx);
                    }
                }
            }
            None => {
                if shift {
                    let ls = line_start(&self.text, self.cursor);
                    let le = line_end(&self.text, self.cursor);
                    let leading = self.text[ls..le]
                        .chars()
                        .take(INDENT)
                        .take_while(|c| *c == ' ')
                        .count();
                    if leading > 0 {
                        self.splice(ls..ls + leading, "", ctx);
                    }
                } else {
                    let ls = line_start(&self.text, self.cursor);
                    let column = self.text[ls..self.cursor].chars().count();
                    let pad = INDENT - column % INDENT;
                    self.replace_selection(&" ".repeat(pad), ctx);
                }
            }
        }
    }

    // =========================================================================
    // Event Handlers
    // =========================================================================

    fn handle_mouse_press(
        &mut self,
        local_pos: Point,
        modifiers: KeyboardModifiers,
        ctx: &mut EventCtx<'_>,
    ) {
        ctx.request_focus();
        let to = self.index_at_point(local_pos, ctx.text(), ctx.theme());
        self.move_cursor(to, modifiers.shift);
        self.desired_x = None;
        self.refresh_highlight(ctx.text(), ctx.theme());
        self.reveal(ctx.text(), ctx.theme());
    }

    fn handle_double_click(&mut self, local_pos: Point, ctx: &mut EventCtx<'_>) {
        let at = self.index_at_point(local_pos, ctx.text(), ctx.theme());
        let (start, end) = word_range(&self.text, at);
        self.anchor = Some(start);
        self.cursor = end;
        self.desired_x = None;
        self.refresh_highlight(ctx.text(), ctx.theme());
    }

    fn handle_wheel(&mut self, delta: f32, ctx: &mut EventCtx<'_>) {
        let line_height = ctx.text().line_height(&ctx.theme().font);
        let (_, view_h) = self.view_size(ctx.theme());
        let total = (self.line_of(self.text.len()) + 1) as f32 * line_height;
        let max = (total - view_h).max(0.0);
        self.scroll.y = (self.scroll.y - delta * line_height * 3.0).clamp(0.0, max);
    }

    fn handle_key_press(
        &mut self,
        key: Key,
        modifiers: KeyboardModifiers,
        ctx: &mut EventCtx<'_>,
    ) -> bool {
        let vertical = matches!(key, Key::ArrowUp | Key::ArrowDown);
        let handled = match key {
            Key::ArrowLeft => {
                let to = if modifiers.control {
                    prev_word(&self.text, self.cursor)
                } else {
                    prev_char(&self.text, self.cursor)
                };
                self.move_cursor(to, modifiers.shift);
                true
            }
            Key::ArrowRight => {
                let to = if modifiers.control {
                    next_word(&self.text, self.cursor)
                } else {
                    next_char(&self.text, self.cursor)
                };
                self.move_cursor(to, modifiers.shift);
                true
            }
            Key::ArrowUp => {
                self.vertical_move(false, modifiers.shift, ctx.text(), ctx.theme());
                true
            }
            Key::ArrowDown => {
                self.vertical_move(true, modifiers.shift, ctx.text(), ctx.theme());
                true
            }
            Key::Home => {
                self.move_cursor(line_start(&self.text, self.cursor), modifiers.shift);
                true
            }
            Key::End => {
                self.move_cursor(line_end(&self.text, self.cursor), modifiers.shift);
                true
            }
            Key::Backspace => {
                if self.selection().is_some() {
                    self.replace_selection("", ctx);
                } else if self.cursor > 0 {
                    let start = prev_char(&self.text, self.cursor);
                    self.splice(start..self.cursor, "", ctx);
                }
                true
            }
            Key::Delete => {
                if self.selection().is_some() {
                    self.replace_selection("", ctx);
                } else if self.cursor < self.text.len() {
                    let end = next_char(&self.text, self.cursor);
                    self.splice(self.cursor..end, "", ctx);
                }
                true
            }
            Key::Enter | Key::NumpadEnter => {
                if self.multi_line {
                    self.replace_selection("\n", ctx);
                    true
                } else {
                    false
                }
            }
            Key::Tab => {
                self.handle_tab(modifiers.shift, ctx);
                true
            }
            Key::A if modifiers.control => {
                self.select_all();
                true
            }
            Key::C if modifiers.control => {
                self.copy_selection(ctx);
                true
            }
            Key::X if modifiers.control => {
                self.copy_selection(ctx);
                if self.selection().is_some() {
                    self.replace_selection("", ctx);
                }
                true
            }
            Key::V if modifiers.control => {
                self.paste(ctx);
                true
            }
            _ => {
                if let Some(c) = self.filter.char_for_key(key, modifiers) {
                    let mut buf = [0u8; 4];
                    self.replace_selection(c.encode_utf8(&mut buf), ctx);
                    true
                } else {
                    false
                }
            }
        };

        if handled {
            if !vertical {
                self.desired_x = None;
            }
            self.refresh_highlight(ctx.text(), ctx.theme());
            self.reveal(ctx.text(), ctx.theme());
        }
        handled
    }
}

impl Default for TextArea {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for TextArea {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::TextArea
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
        let origin = Point::new(theme.padding - self.scroll.x, theme.padding - self.scroll.y);

        for highlight in &self.highlight {
            let rect = Rect::new(
                origin.x + highlight.left(),
                origin.y + highlight.top(),
                highlight.width(),
                highlight.height(),
            );
            renderer.fill_rect(rect, theme.selection);
        }

        for (line_no, line) in self.text.split('\n').enumerate() {
            let y = origin.y + line_no as f32 * line_height;
            if y + line_height < 0.0 {
                continue;
            }
            if y > rect.height() {
                break;
            }
            renderer.draw_text(Point::new(origin.x, y), line, &theme.font, theme.fore.normal);
        }

        if self.base.has_focus() {
            let ls = line_start(&self.text, self.cursor);
            let le = line_end(&self.text, self.cursor);
            let caret_x = origin.x
                + prefix_width(&*renderer, &theme.font, &self.text[ls..le], self.cursor - ls);
            let caret_y = origin.y
                + self.text[..self.cursor].matches('\n').count() as f32 * line_height;
            renderer.draw_line(
                Point::new(caret_x, caret_y),
                Point::new(caret_x, caret_y + line_height),
                theme.caret,
                1.0,
            );
        }
        renderer.restore();
    }

    fn event(&mut self, event: &mut WidgetEvent, ctx: &mut EventCtx<'_>) -> bool {
        match event {
            WidgetEvent::MousePress(e) => {
                let (local_pos, modifiers) = (e.local_pos, e.modifiers);
                self.handle_mouse_press(local_pos, modifiers, ctx);
                event.accept();
                true
            }
            WidgetEvent::DoubleClick(e) => {
                let local_pos = e.local_pos;
                self.handle_double_click(local_pos, ctx);
                event.accept();
                true
            }
            WidgetEvent::Wheel(e) => {
                let delta = e.delta;
                self.handle_wheel(delta, ctx);
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

static_assertions::assert_impl_all!(TextArea: Send);

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use atrium_render::FixedMetrics;

    use super::*;
    use crate::clipboard::{Clipboard, MemoryClipboard};
    use crate::event::{KeyPressEvent, MouseDoubleClickEvent, MousePressEvent};
    use crate::input::MouseButton;

    fn setup() -> TextArea {
        let mut editor = TextArea::new();
        editor
            .widget_base_mut()
            .set_geometry(Rect::new(0.0, 0.0, 120.0, 64.0));
        editor
    }

    fn send_with(
        editor: &mut TextArea,
        event: &mut WidgetEvent,
        events: &mut VecDeque<UiEvent>,
        clipboard: &mut MemoryClipboard,
    ) -> bool {
        let theme = Theme::default();
        let metrics = FixedMetrics::default();
        let mut ctx = EventCtx::new(editor.base.id(), None, &metrics, &theme, clipboard, events);
        editor.event(event, &mut ctx)
    }

    fn press_key(
        editor: &mut TextArea,
        key: Key,
        modifiers: KeyboardModifiers,
        events: &mut VecDeque<UiEvent>,
    ) -> bool {
        let mut clipboard = MemoryClipboard::new();
        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(key, modifiers));
        send_with(editor, &mut event, events, &mut clipboard)
    }

    fn click_at(editor: &mut TextArea, at: Point, modifiers: KeyboardModifiers) {
        let mut events = VecDeque::new();
        let mut clipboard = MemoryClipboard::new();
        let mut event = WidgetEvent::MousePress(MousePressEvent::new(
            MouseButton::Left,
            at,
            at,
            modifiers,
        ));
        send_with(editor, &mut event, &mut events, &mut clipboard);
    }

    #[test]
    fn test_enter_inserts_newline_in_multi_line() {
        let mut editor = setup();
        let mut events = VecDeque::new();

        press_key(&mut editor, Key::A, KeyboardModifiers::NONE, &mut events);
        press_key(&mut editor, Key::Enter, KeyboardModifiers::NONE, &mut events);
        press_key(&mut editor, Key::B, KeyboardModifiers::NONE, &mut events);
        assert_eq!(editor.text(), "a\nb");

        editor.set_multi_line(false);
        assert!(!press_key(&mut editor, Key::Enter, KeyboardModifiers::NONE, &mut events));
        assert_eq!(editor.text(), "a\nb");
    }

    #[test]
    fn test_shift_navigation_builds_selection() {
        let mut editor = setup().with_text("one two");
        let mut events = VecDeque::new();

        press_key(&mut editor, Key::Home, KeyboardModifiers::NONE, &mut events);
        for _ in 0..3 {
            press_key(&mut editor, Key::ArrowRight, KeyboardModifiers::SHIFT, &mut events);
        }
        assert_eq!(editor.selection(), Some((0, 3)));

        // Unmodified movement clears it.
        press_key(&mut editor, Key::ArrowRight, KeyboardModifiers::NONE, &mut events);
        assert_eq!(editor.selection(), None);
    }

    #[test]
    fn test_click_and_shift_click() {
        let mut editor = setup().with_text("abcdef\nghijkl");

        // Padding 4, glyph 7, line height 14: line 1, third boundary.
        click_at(&mut editor, Point::new(4.0 + 14.0, 4.0 + 20.0), KeyboardModifiers::NONE);
        assert_eq!(editor.cursor(), 9);
        assert_eq!(editor.selection(), None);

        click_at(&mut editor, Point::new(4.0 + 35.0, 4.0 + 20.0), KeyboardModifiers::SHIFT);
        assert_eq!(editor.selection(), Some((9, 12)));
    }

    #[test]
    fn test_vertical_movement_keeps_desired_column() {
        let mut editor = setup().with_text("abcdef\nab\nabcdef");
        let mut events = VecDeque::new();

        // Caret starts at the buffer end; walk it to the end of the first
        // line (column 6, 42px).
        press_key(&mut editor, Key::ArrowUp, KeyboardModifiers::NONE, &mut events);
        press_key(&mut editor, Key::ArrowUp, KeyboardModifiers::NONE, &mut events);
        press_key(&mut editor, Key::Home, KeyboardModifiers::NONE, &mut events);
        for _ in 0..6 {
            press_key(&mut editor, Key::ArrowRight, KeyboardModifiers::NONE, &mut events);
        }
        assert_eq!(editor.cursor(), 6);

        // Down onto the short line clamps to its end...
        press_key(&mut editor, Key::ArrowDown, KeyboardModifiers::NONE, &mut events);
        assert_eq!(editor.cursor(), 9);

        // ...but the remembered column carries to the third line.
        press_key(&mut editor, Key::ArrowDown, KeyboardModifiers::NONE, &mut events);
        assert_eq!(editor.cursor(), 16);
    }

    #[test]
    fn test_home_end_stop_at_line_boundaries() {
        let mut editor = setup().with_text("ab\ncd");
        let mut events = VecDeque::new();

        click_at(&mut editor, Point::new(4.0 + 7.0, 4.0 + 20.0), KeyboardModifiers::NONE);
        assert_eq!(editor.cursor(), 4);

        press_key(&mut editor, Key::Home, KeyboardModifiers::NONE, &mut events);
        assert_eq!(editor.cursor(), 3);
        press_key(&mut editor, Key::End, KeyboardModifiers::NONE, &mut events);
        assert_eq!(editor.cursor(), 5);
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut editor = setup().with_text("ab\ncd");
        let mut events = VecDeque::new();

        click_at(&mut editor, Point::new(4.0, 4.0 + 20.0), KeyboardModifiers::NONE);
        assert_eq!(editor.cursor(), 3);
        press_key(&mut editor, Key::Backspace, KeyboardModifiers::NONE, &mut events);
        assert_eq!(editor.text(), "abcd");
        assert_eq!(editor.cursor(), 2);
    }

    #[test]
    fn test_typing_replaces_selection() {
        let mut editor = setup().with_text("abcd");
        let mut events = VecDeque::new();

        press_key(&mut editor, Key::Home, KeyboardModifiers::NONE, &mut events);
        press_key(&mut editor, Key::ArrowRight, KeyboardModifiers::NONE, &mut events);
        press_key(&mut editor, Key::ArrowRight, KeyboardModifiers::SHIFT, &mut events);
        press_key(&mut editor, Key::ArrowRight, KeyboardModifiers::SHIFT, &mut events);
        assert_eq!(editor.selection(), Some((1, 3)));

        press_key(&mut editor, Key::X, KeyboardModifiers::SHIFT, &mut events);
        assert_eq!(editor.text(), "aXd");
        assert_eq!(editor.cursor(), 2);
        assert_eq!(editor.selection(), None);
    }

    #[test]
    fn test_double_click_selects_word() {
        let mut editor = setup().with_text("hello world");
        let mut events = VecDeque::new();
        let mut clipboard = MemoryClipboard::new();

        let at = Point::new(4.0 + 7.0 * 8.0, 10.0);
        let mut event = WidgetEvent::DoubleClick(MouseDoubleClickEvent::new(
            MouseButton::Left,
            at,
            at,
            KeyboardModifiers::NONE,
        ));
        send_with(&mut editor, &mut event, &mut events, &mut clipboard);
        assert_eq!(editor.selection(), Some((6, 11)));
    }

    #[test]
    fn test_tab_pads_to_three_column_stop() {
        let mut editor = setup().with_text("ab");
        let mut events = VecDeque::new();

        press_key(&mut editor, Key::Tab, KeyboardModifiers::NONE, &mut events);
        assert_eq!(editor.text(), "ab ");
        assert_eq!(editor.cursor(), 3);

        press_key(&mut editor, Key::Tab, KeyboardModifiers::NONE, &mut events);
        assert_eq!(editor.text(), "ab    ");
        assert_eq!(editor.cursor(), 6);
    }

    #[test]
    fn test_tab_reindents_selected_lines() {
        let mut editor = setup().with_text("one\ntwo\nthree");
        let mut events = VecDeque::new();

        // Select from inside the first line into the last.
        editor.anchor = Some(1);
        editor.cursor = 9;
        press_key(&mut editor, Key::Tab, KeyboardModifiers::NONE, &mut events);
        assert_eq!(editor.text(), "   one\n   two\n   three");
        // Both ends shifted by the inserts before them.
        assert_eq!(editor.selection(), Some((4, 18)));

        press_key(&mut editor, Key::Tab, KeyboardModifiers::SHIFT, &mut events);
        assert_eq!(editor.text(), "one\ntwo\nthree");
        assert_eq!(editor.selection(), Some((1, 9)));
    }

    #[test]
    fn test_shift_tab_clamps_at_column_zero() {
        let mut editor = setup().with_text("  a\nb");
        let mut events = VecDeque::new();

        editor.anchor = Some(0);
        editor.cursor = editor.text().len();
        press_key(&mut editor, Key::Tab, KeyboardModifiers::SHIFT, &mut events);
        assert_eq!(editor.text(), "a\nb");
    }

    #[test]
    fn test_selection_ending_at_line_start_leaves_it_alone() {
        let mut editor = setup().with_text("one\ntwo");
        let mut events = VecDeque::new();

        // Selection ends exactly where the second line starts.
        editor.anchor = Some(0);
        editor.cursor = 4;
        press_key(&mut editor, Key::Tab, KeyboardModifiers::NONE, &mut events);
        assert_eq!(editor.text(), "   one\ntwo");
    }

    #[test]
    fn test_cut_copy_paste_round_trip() {
        let mut editor = setup().with_text("hello world");
        let mut events = VecDeque::new();
        let mut clipboard = MemoryClipboard::new();

        editor.anchor = Some(0);
        editor.cursor = 5;
        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(Key::X, KeyboardModifiers::CTRL));
        send_with(&mut editor, &mut event, &mut events, &mut clipboard);
        assert_eq!(editor.text(), " world");
        assert_eq!(clipboard.get_text().as_deref(), Some("hello"));

        // Paste it back at the end.
        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(Key::End, KeyboardModifiers::NONE));
        send_with(&mut editor, &mut event, &mut events, &mut clipboard);
        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(Key::V, KeyboardModifiers::CTRL));
        send_with(&mut editor, &mut event, &mut events, &mut clipboard);
        assert_eq!(editor.text(), " worldhello");
    }

    #[test]
    fn test_paste_filters_control_chars_and_newlines() {
        let mut editor = setup();
        let mut events = VecDeque::new();
        let mut clipboard = MemoryClipboard::new();
        clipboard.set_text("x\r\ny\x07z");

        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(Key::V, KeyboardModifiers::CTRL));
        send_with(&mut editor, &mut event, &mut events, &mut clipboard);
        assert_eq!(editor.text(), "x\nyz");

        editor.set_multi_line(false);
        editor.set_text("");
        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(Key::V, KeyboardModifiers::CTRL));
        send_with(&mut editor, &mut event, &mut events, &mut clipboard);
        assert_eq!(editor.text(), "xyz");
    }

    #[test]
    fn test_highlight_rects_one_per_line_span() {
        let mut editor = setup().with_text("abc\nde");
        let mut events = VecDeque::new();

        press_key(&mut editor, Key::Home, KeyboardModifiers::NONE, &mut events);
        // Caret is on the second line after with_text; go to the top first.
        press_key(&mut editor, Key::ArrowUp, KeyboardModifiers::NONE, &mut events);
        press_key(&mut editor, Key::Home, KeyboardModifiers::NONE, &mut events);
        press_key(&mut editor, Key::ArrowRight, KeyboardModifiers::NONE, &mut events);
        press_key(&mut editor, Key::ArrowDown, KeyboardModifiers::SHIFT, &mut events);
        assert_eq!(editor.selection(), Some((1, 5)));

        let rects = editor.selection_rects();
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0], Rect::new(7.0, 0.0, 14.0, 14.0));
        assert_eq!(rects[1], Rect::new(0.0, 14.0, 7.0, 14.0));
    }

    #[test]
    fn test_select_all_and_delete() {
        let mut editor = setup().with_text("abc\ndef");
        let mut events = VecDeque::new();

        press_key(&mut editor, Key::A, KeyboardModifiers::CTRL, &mut events);
        assert_eq!(editor.selection(), Some((0, 7)));
        press_key(&mut editor, Key::Delete, KeyboardModifiers::NONE, &mut events);
        assert_eq!(editor.text(), "");
        assert_eq!(editor.cursor(), 0);
    }

    #[test]
    fn test_reveal_scrolls_vertically() {
        let mut editor = setup().with_text("a\nb\nc\nd\ne\nf\ng\nh");
        let mut events = VecDeque::new();

        // View height 56, line height 14: four lines fit. Caret starts on
        // line 7 after with_text, so End-of-buffer must have scrolled.
        press_key(&mut editor, Key::ArrowDown, KeyboardModifiers::NONE, &mut events);
        let bottom = editor.scroll().y;
        assert!(bottom > 0.0);

        // Walk back to the top: scroll returns to zero.
        for _ in 0..8 {
            press_key(&mut editor, Key::ArrowUp, KeyboardModifiers::NONE, &mut events);
        }
        assert_eq!(editor.scroll().y, 0.0);
    }
}
