//! Floating popup menu widget.
//!
//! A `PopUpMenu` is a detached root that the desktop overlays on top of the
//! widget tree while it is open. It owns a flat list of item captions,
//! highlights the row under the cursor, and reports a click on a row to its
//! owner widget (a combo box, usually) or, when it has no owner, straight to
//! the host as a [`UiEvent::MenuItemSelected`]. Choosing a row also asks the
//! desktop to close the menu; clicks elsewhere close it through the router's
//! click-outside rule.

use std::any::Any;

use atrium_render::{Point, Rect, TextMeasure};

use crate::event::{Notice, UiEvent, WidgetEvent};
use crate::style::Theme;
use crate::widget::{EventCtx, PaintContext, Widget, WidgetBase, WidgetKind};

/// Border thickness around the item rows.
const FRAME: f32 = 1.0;

/// A floating list of choosable items.
///
/// Menus start hidden; [`Desktop::show_menu`](crate::widget::Desktop::show_menu)
/// makes one visible and routes input to it first.
pub struct PopUpMenu {
    /// Widget base for common functionality.
    base: WidgetBase,

    /// The item captions, top to bottom.
    items: Vec<String>,

    /// The row drawn as the current value, if any.
    selected: Option<usize>,

    /// The row under the cursor, if any.
    hover_row: Option<usize>,
}

impl PopUpMenu {
    /// Create a new hidden, empty menu.
    pub fn new() -> Self {
        let mut base = WidgetBase::new();
        base.set_draw_back(false);
        base.hide();

        Self {
            base,
            items: Vec::new(),
            selected: None,
            hover_row: None,
        }
    }

    /// Set the items using builder pattern.
    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_items(items.into_iter().map(Into::into).collect());
        self
    }

    // =========================================================================
    // Items and Selection
    // =========================================================================

    /// Get the item captions.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Replace the item captions, dropping row state that no longer fits.
    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
        if self.selected.is_some_and(|row| row >= self.items.len()) {
            self.selected = None;
        }
        if self.hover_row.is_some_and(|row| row >= self.items.len()) {
            self.hover_row = None;
        }
    }

    /// Get the row drawn as the current value.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Set the row drawn as the current value; out-of-range rows clear it.
    pub fn set_selected(&mut self, selected: Option<usize>) {
        self.selected = selected.filter(|row| *row < self.items.len());
    }

    /// The row currently under the cursor, if any.
    pub fn hover_row(&self) -> Option<usize> {
        self.hover_row
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Height of one item row.
    fn row_height(&self, measure: &dyn TextMeasure, theme: &Theme) -> f32 {
        measure.line_height(&theme.font) + theme.padding
    }

    /// Size the menu to fit its items.
    pub fn resize_to_content(&mut self, measure: &dyn TextMeasure, theme: &Theme) {
        let widest = self
            .items
            .iter()
            .map(|item| measure.measure(&theme.font, item).width)
            .fold(0.0, f32::max);
        let width = widest + 2.0 * theme.padding + 2.0 * FRAME;
        let height = self.items.len() as f32 * self.row_height(measure, theme) + 2.0 * FRAME;
        self.base.resize(width, height);
    }

    /// The rectangle of a row in local coordinates.
    fn row_rect(&self, row: usize, measure: &dyn TextMeasure, theme: &Theme) -> Rect {
        let row_height = self.row_height(measure, theme);
        Rect::new(
            FRAME,
            FRAME + row as f32 * row_height,
            self.base.width() - 2.0 * FRAME,
            row_height,
        )
    }

    /// The row at a local position, if any.
    fn row_at(&self, local: Point, measure: &dyn TextMeasure, theme: &Theme) -> Option<usize> {
        if !self.base.rect().contains(local) {
            return None;
        }
        let row = ((local.y - FRAME) / self.row_height(measure, theme)).floor();
        (row >= 0.0 && (row as usize) < self.items.len()).then_some(row as usize)
    }

    // =========================================================================
    // Event Handlers
    // =========================================================================

    /// A row was clicked: remember it, tell the owner (or the host), and
    /// ask the desktop to close the menu.
    fn choose(&mut self, row: usize, ctx: &mut EventCtx<'_>) {
        self.selected = Some(row);
        match self.base.owner() {
            Some(owner) => ctx.send_notice(owner, Notice::MenuItemChosen { index: row }),
            None => ctx.push_event(UiEvent::MenuItemSelected {
                menu: self.base.id(),
                index: row,
            }),
        }
        ctx.close_menu();
    }

    fn handle_mouse_press(&mut self, local_pos: Point, ctx: &mut EventCtx<'_>) {
        if let Some(row) = self.row_at(local_pos, ctx.text(), ctx.theme()) {
            self.choose(row, ctx);
        }
    }
}

impl Default for PopUpMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for PopUpMenu {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::PopUpMenu
    }

    fn paint(&self, ctx: &mut PaintContext<'_>, theme: &Theme) {
        let rect = ctx.rect();
        ctx.renderer().fill_rect(rect, theme.back.normal);
        ctx.renderer().stroke_rect(rect, theme.border, FRAME);

        let renderer = ctx.renderer();
        let row_height = renderer.line_height(&theme.font) + theme.padding;
        for (row, item) in self.items.iter().enumerate() {
            let row_rect = Rect::new(
                FRAME,
                FRAME + row as f32 * row_height,
                rect.width() - 2.0 * FRAME,
                row_height,
            );
            if self.hover_row == Some(row) {
                renderer.fill_rect(row_rect, theme.back.hovered);
            } else if self.selected == Some(row) {
                renderer.fill_rect(row_rect, theme.selection);
            }
            let line_height = renderer.line_height(&theme.font);
            let origin = Point::new(
                row_rect.left() + theme.padding,
                row_rect.top() + (row_height - line_height) / 2.0,
            );
            renderer.draw_text(origin, item, &theme.font, theme.fore.normal);
        }
    }

    fn event(&mut self, event: &mut WidgetEvent, ctx: &mut EventCtx<'_>) -> bool {
        match event {
            WidgetEvent::MousePress(e) => {
                let local_pos = e.local_pos;
                self.handle_mouse_press(local_pos, ctx);
                event.accept();
                true
            }
            WidgetEvent::MouseMove(e) => {
                let local_pos = e.local_pos;
                self.hover_row = self.row_at(local_pos, ctx.text(), ctx.theme());
                true
            }
            WidgetEvent::Leave(_) => {
                self.hover_row = None;
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

static_assertions::assert_impl_all!(PopUpMenu: Send);
