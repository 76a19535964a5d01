//! Scrollable selection list widget.
//!
//! A `ListBox` keeps parallel item and row-height lists, derives the total
//! content extent from them, and feeds that into an embedded vertical
//! [`ScrollBar`] drawn in a strip along its right edge. Mouse input inside
//! the strip is forwarded to the bar; everywhere else a click selects the
//! row under the cursor, and clicking the selected row again deselects it
//! unless the click is part of a double-click.
//!
//! # Example
//!
//! ```
//! use atrium::widget::widgets::ListBoxText;
//!
//! let mut list = ListBoxText::new().with_items(["north", "south", "east"]);
//! list.set_selected_index(Some(2))?;
//! assert_eq!(list.selected_item().map(String::as_str), Some("east"));
//! # Ok::<(), atrium::WidgetError>(())
//! ```

use std::any::Any;

use atrium_render::{Point, Rect};

use crate::error::{WidgetError, WidgetResult};
use crate::event::{
    MouseMoveEvent, MousePressEvent, MouseReleaseEvent, UiEvent, WheelEvent, WidgetEvent,
};
use crate::input::Key;
use crate::style::Theme;
use crate::widget::widgets::{Orientation, ScrollBar};
use crate::widget::{EventCtx, LayoutCtx, PaintContext, Widget, WidgetBase, WidgetKind};

/// Width of the scroll bar strip along the right edge.
const BAR_WIDTH: f32 = 16.0;

/// Border thickness around the rows.
const FRAME: f32 = 1.0;

/// An entry a [`ListBox`] can display.
pub trait ListEntry: Send {
    /// The caption drawn for this entry.
    fn text(&self) -> &str;
}

impl ListEntry for String {
    fn text(&self) -> &str {
        self
    }
}

/// A list box over plain strings, the common case.
pub type ListBoxText = ListBox<String>;

/// A scrollable single-selection list.
pub struct ListBox<T: ListEntry> {
    /// Widget base for common functionality.
    base: WidgetBase,

    /// The entries, top to bottom.
    items: Vec<T>,

    /// Per-entry row heights, parallel to `items`.
    item_heights: Vec<f32>,

    /// Index of the selected entry, if any.
    selected: Option<usize>,

    /// Row height given to newly added entries.
    item_height: f32,

    /// The embedded scroll bar, drawn in the right-edge strip. It is not
    /// part of the widget tree; the list forwards its input and borrows
    /// the list's identity for its events.
    scroll_bar: ScrollBar,
}

impl<T: ListEntry> ListBox<T> {
    /// Create a new empty list box.
    pub fn new() -> Self {
        let mut base = WidgetBase::new();
        base.set_draw_back(false);
        base.set_stop_on_tab(true);
        base.set_accepts_double_clicks(true);

        Self {
            base,
            items: Vec::new(),
            item_heights: Vec::new(),
            selected: None,
            item_height: 18.0,
            scroll_bar: ScrollBar::new(Orientation::Vertical),
        }
    }

    /// Set the items using builder pattern. A non-empty list starts with
    /// its first entry selected.
    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<T>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self.item_heights = vec![self.item_height; self.items.len()];
        self.selected = (!self.items.is_empty()).then_some(0);
        self
    }

    /// Set the default row height using builder pattern.
    pub fn with_item_height(mut self, height: f32) -> Self {
        self.item_height = height;
        for slot in &mut self.item_heights {
            *slot = height;
        }
        self
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Get the entries.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check whether the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an entry with the default row height.
    pub fn add_item(&mut self, item: impl Into<T>) {
        self.items.push(item.into());
        self.item_heights.push(self.item_height);
        if self.selected.is_none() {
            self.selected = Some(0);
        }
    }

    /// Insert an entry at `index` with the default row height.
    ///
    /// Follows the combo box shift policy: inserting at or before the
    /// selected index pushes the selection along with its entry, and an
    /// unselected list seeds its selection at 0.
    pub fn insert_item(&mut self, index: usize, item: impl Into<T>) -> WidgetResult<()> {
        if index > self.items.len() {
            return Err(WidgetError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.items.insert(index, item.into());
        self.item_heights.insert(index, self.item_height);
        self.selected = match self.selected {
            Some(selected) if index <= selected => Some(selected + 1),
            Some(selected) => Some(selected),
            None => Some(0),
        };
        Ok(())
    }

    /// Remove and return the entry at `index`.
    ///
    /// Removing the selected entry resets the selection to the first entry
    /// (or clears it when the list empties).
    pub fn remove_item(&mut self, index: usize) -> WidgetResult<T> {
        if index >= self.items.len() {
            return Err(WidgetError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let removed = self.items.remove(index);
        self.item_heights.remove(index);
        self.selected = match self.selected {
            Some(selected) if index == selected => (!self.items.is_empty()).then_some(0),
            Some(selected) if index < selected => Some(selected - 1),
            other => other,
        };
        Ok(removed)
    }

    /// Remove all entries and clear the selection.
    pub fn clear_items(&mut self) {
        self.items.clear();
        self.item_heights.clear();
        self.selected = None;
    }

    /// Get the row height of the entry at `index`.
    pub fn item_height(&self, index: usize) -> Option<f32> {
        self.item_heights.get(index).copied()
    }

    /// Set the row height of the entry at `index`.
    pub fn set_item_height(&mut self, index: usize, height: f32) -> WidgetResult<()> {
        match self.item_heights.get_mut(index) {
            Some(slot) => {
                *slot = height;
                Ok(())
            }
            None => Err(WidgetError::IndexOutOfRange {
                index,
                len: self.items.len(),
            }),
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Index of the selected entry, if any.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Select by index. `None` clears the selection.
    pub fn set_selected_index(&mut self, index: Option<usize>) -> WidgetResult<()> {
        if let Some(i) = index {
            if i >= self.items.len() {
                return Err(WidgetError::IndexOutOfRange {
                    index: i,
                    len: self.items.len(),
                });
            }
        }
        self.selected = index;
        Ok(())
    }

    /// The selected entry, if any.
    pub fn selected_item(&self) -> Option<&T> {
        self.selected.and_then(|i| self.items.get(i))
    }

    /// Get the scroll offset in content pixels.
    pub fn scroll(&self) -> f32 {
        self.scroll_bar.scroll()
    }

    /// Set the scroll offset, clamped to the content extent.
    pub fn set_scroll(&mut self, scroll: f32) {
        self.scroll_bar.set_scroll(scroll);
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Total height of all rows.
    fn content_height(&self) -> f32 {
        self.item_heights.iter().sum()
    }

    /// The scroll bar strip in local coordinates.
    fn bar_rect(&self) -> Rect {
        Rect::new(
            self.base.width() - BAR_WIDTH,
            0.0,
            BAR_WIDTH,
            self.base.height(),
        )
    }

    /// The row at a local position, accounting for the scroll offset.
    fn row_at(&self, local: Point) -> Option<usize> {
        if local.x < FRAME || local.x >= self.base.width() - BAR_WIDTH {
            return None;
        }
        let mut y = local.y - FRAME + self.scroll_bar.scroll();
        if y < 0.0 {
            return None;
        }
        for (row, height) in self.item_heights.iter().enumerate() {
            if y < *height {
                return Some(row);
            }
            y -= height;
        }
        None
    }

    /// Scroll the selected row into view.
    fn reveal_selected(&mut self) {
        let Some(selected) = self.selected else {
            return;
        };
        let top: f32 = self.item_heights[..selected].iter().sum();
        let bottom = top + self.item_heights[selected];
        let view = self.base.height() - 2.0 * FRAME;
        let scroll = self.scroll_bar.scroll();
        if top < scroll {
            self.scroll_bar.set_scroll(top);
        } else if bottom > scroll + view {
            self.scroll_bar.set_scroll(bottom - view);
        }
    }

    // =========================================================================
    // Event Handlers
    // =========================================================================

    /// Change the selection and report it, if it actually moved.
    fn select(&mut self, index: Option<usize>, ctx: &mut EventCtx<'_>) {
        if index != self.selected {
            self.selected = index;
            ctx.push_event(UiEvent::SelectionChanged {
                widget: self.base.id(),
                index,
            });
        }
    }

    /// Re-base a local position into the scroll bar's coordinates.
    fn to_bar(&self, local: Point) -> Point {
        let strip = self.bar_rect();
        Point::new(local.x - strip.left(), local.y - strip.top())
    }

    fn handle_mouse_press(&mut self, event: MousePressEvent, ctx: &mut EventCtx<'_>) -> bool {
        if self.bar_rect().contains(event.local_pos) {
            let mut forwarded = WidgetEvent::MousePress(MousePressEvent::new(
                event.button,
                self.to_bar(event.local_pos),
                event.window_pos,
                event.modifiers,
            ));
            return self.scroll_bar.event(&mut forwarded, ctx);
        }

        ctx.request_focus();
        if let Some(row) = self.row_at(event.local_pos) {
            // A second click on the selected row clears the selection.
            if self.selected == Some(row) {
                self.select(None, ctx);
            } else {
                self.select(Some(row), ctx);
            }
        }
        true
    }

    fn handle_key_press(&mut self, key: Key, ctx: &mut EventCtx<'_>) -> bool {
        match key {
            Key::ArrowDown => {
                let next = match self.selected {
                    Some(selected) => (selected + 1).min(self.items.len().saturating_sub(1)),
                    None if !self.items.is_empty() => 0,
                    None => return true,
                };
                self.select(Some(next), ctx);
                self.reveal_selected();
                true
            }
            Key::ArrowUp => {
                if let Some(selected) = self.selected {
                    self.select(Some(selected.saturating_sub(1)), ctx);
                    self.reveal_selected();
                }
                true
            }
            Key::Home => {
                if !self.items.is_empty() {
                    self.select(Some(0), ctx);
                    self.reveal_selected();
                }
                true
            }
            Key::End => {
                if !self.items.is_empty() {
                    self.select(Some(self.items.len() - 1), ctx);
                    self.reveal_selected();
                }
                true
            }
            _ => false,
        }
    }
}

impl<T: ListEntry> Default for ListBox<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ListEntry + 'static> Widget for ListBox<T> {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::ListBox
    }

    fn layout(&mut self, _ctx: &LayoutCtx<'_>) {
        // The embedded bar borrows the list's identity so its scroll events
        // arrive under the list's id.
        self.scroll_bar.widget_base_mut().set_id(self.base.id());
        let strip = self.bar_rect();
        self.scroll_bar.widget_base_mut().set_geometry(strip);
        self.scroll_bar.set_range(self.content_height());
        self.scroll_bar
            .set_active_range(self.base.height() - 2.0 * FRAME);
        self.scroll_bar.set_jump_amount(self.item_height);
    }

    fn paint(&self, ctx: &mut PaintContext<'_>, theme: &Theme) {
        let rect = ctx.rect();
        ctx.renderer().fill_rect(rect, theme.field_back);
        ctx.renderer().stroke_rect(rect, theme.border, FRAME);

        let strip = self.bar_rect();
        let scroll = self.scroll_bar.scroll();
        let renderer = ctx.renderer();
        renderer.save();
        renderer.clip_rect(Rect::new(
            FRAME,
            FRAME,
            (strip.left() - 2.0 * FRAME).max(0.0),
            rect.height() - 2.0 * FRAME,
        ));

        // Visible-window loop: skip rows above the viewport, stop past it.
        let line_height = renderer.line_height(&theme.font);
        let mut top = FRAME - scroll;
        for (row, item) in self.items.iter().enumerate() {
            let height = self.item_heights[row];
            let bottom = top + height;
            if bottom < 0.0 {
                top = bottom;
                continue;
            }
            if top > rect.height() {
                break;
            }
            let row_rect = Rect::new(FRAME, top, strip.left() - 2.0 * FRAME, height);
            if self.selected == Some(row) {
                renderer.fill_rect(row_rect, theme.selection);
            }
            let origin = Point::new(
                FRAME + theme.padding,
                top + (height - line_height) / 2.0,
            );
            renderer.draw_text(origin, item.text(), &theme.font, theme.fore.normal);
            top = bottom;
        }
        renderer.restore();

        // The bar paints in its own strip.
        renderer.save();
        renderer.translate(strip.left(), strip.top());
        renderer.clip_rect(Rect::new(0.0, 0.0, strip.width(), strip.height()));
        {
            let mut bar_ctx =
                PaintContext::new(&mut *renderer, Rect::new(0.0, 0.0, strip.width(), strip.height()));
            self.scroll_bar.paint(&mut bar_ctx, theme);
        }
        renderer.restore();
    }

    fn event(&mut self, event: &mut WidgetEvent, ctx: &mut EventCtx<'_>) -> bool {
        match event {
            WidgetEvent::MousePress(e) => {
                let press = *e;
                if self.handle_mouse_press(press, ctx) {
                    event.accept();
                    true
                } else {
                    false
                }
            }
            WidgetEvent::DoubleClick(e) => {
                // In the bar strip a double-click is just another press.
                if self.bar_rect().contains(e.local_pos) {
                    let mut forwarded = WidgetEvent::MousePress(MousePressEvent::new(
                        e.button,
                        self.to_bar(e.local_pos),
                        e.window_pos,
                        e.modifiers,
                    ));
                    let handled = self.scroll_bar.event(&mut forwarded, ctx);
                    if handled {
                        event.accept();
                    }
                    return handled;
                }
                // On a row the selection stays; the router reports the
                // double-click itself.
                if let Some(row) = self.row_at(e.local_pos) {
                    self.select(Some(row), ctx);
                }
                event.accept();
                true
            }
            WidgetEvent::MouseMove(e) => {
                if self.scroll_bar.is_dragging() || self.bar_rect().contains(e.local_pos) {
                    let mut forwarded = WidgetEvent::MouseMove(MouseMoveEvent::new(
                        self.to_bar(e.local_pos),
                        e.window_pos,
                        e.buttons,
                        e.modifiers,
                    ));
                    return self.scroll_bar.event(&mut forwarded, ctx);
                }
                false
            }
            WidgetEvent::MouseRelease(e) => {
                if self.scroll_bar.is_dragging() || self.bar_rect().contains(e.local_pos) {
                    let mut forwarded = WidgetEvent::MouseRelease(MouseReleaseEvent::new(
                        e.button,
                        self.to_bar(e.local_pos),
                        e.window_pos,
                        e.modifiers,
                    ));
                    let handled = self.scroll_bar.event(&mut forwarded, ctx);
                    if handled {
                        event.accept();
                    }
                    return handled;
                }
                false
            }
            WidgetEvent::Wheel(e) => {
                let mut forwarded = WidgetEvent::Wheel(WheelEvent::new(
                    self.to_bar(e.local_pos),
                    e.window_pos,
                    e.delta,
                    e.modifiers,
                ));
                let handled = self.scroll_bar.event(&mut forwarded, ctx);
                if handled {
                    event.accept();
                }
                handled
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

static_assertions::assert_impl_all!(ListBoxText: Send);
