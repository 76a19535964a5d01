//! Drop-down selection widget.
//!
//! A `ComboBox` shows its selected value on a button face and opens an
//! owned [`PopUpMenu`] below itself when clicked. "Open" is not a local
//! flag: the face draws pressed exactly when the desktop's open popup is
//! this combo's menu, and toggling goes through
//! [`show_menu`](crate::widget::Desktop::show_menu) /
//! [`hide_menu`](crate::widget::Desktop::hide_menu). A chosen menu row comes
//! back as a notice, updates the selection, and closes the menu.
//!
//! # Example
//!
//! ```
//! use atrium::widget::widgets::ComboBox;
//!
//! let mut combo = ComboBox::new().with_items(["small", "medium", "large"]);
//! combo.set_selected_value("medium")?;
//! assert_eq!(combo.selected_index(), Some(1));
//! # Ok::<(), atrium::WidgetError>(())
//! ```

use std::any::Any;

use atrium_core::WidgetId;
use atrium_render::Point;

use crate::error::{WidgetError, WidgetResult};
use crate::event::{Notice, UiEvent, WidgetEvent};
use crate::input::Key;
use crate::style::Theme;
use crate::widget::widgets::PopUpMenu;
use crate::widget::{Desktop, EventCtx, PaintContext, Widget, WidgetBase, WidgetKind};

/// A drop-down selector backed by an owned popup menu.
pub struct ComboBox {
    /// Widget base for common functionality.
    base: WidgetBase,

    /// The selectable values.
    items: Vec<String>,

    /// Index of the selected value, `None` when the list is empty.
    selected: Option<usize>,

    /// The owned popup menu, once wired up.
    menu: Option<WidgetId>,
}

impl ComboBox {
    /// Create a new combo box with no items and no menu.
    ///
    /// Most callers want [`ComboBox::spawn`], which also creates and wires
    /// the popup menu.
    pub fn new() -> Self {
        let mut base = WidgetBase::new();
        base.set_draw_back(false);
        base.set_stop_on_tab(true);

        Self {
            base,
            items: Vec::new(),
            selected: None,
            menu: None,
        }
    }

    /// Set the items using builder pattern. A non-empty list starts with
    /// its first item selected.
    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self.selected = (!self.items.is_empty()).then_some(0);
        self
    }

    /// Spawn a combo box and its owned popup menu into a desktop.
    ///
    /// The menu is a hidden detached root owned by the combo; despawning
    /// the combo takes the menu with it. The combo itself starts detached,
    /// ready to be attached wherever it should live.
    pub fn spawn<I, S>(
        desktop: &mut Desktop,
        name: impl Into<String>,
        items: I,
    ) -> WidgetResult<WidgetId>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let menu_name = format!("{name}-menu");
        let combo = desktop.spawn(ComboBox::new().with_items(items), name);
        let menu = desktop.spawn(PopUpMenu::new(), menu_name);
        desktop
            .tree_mut()
            .widget_mut(menu)?
            .widget_base_mut()
            .set_owner(Some(combo));
        desktop.typed_mut::<ComboBox>(combo)?.menu = Some(menu);
        Ok(combo)
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Get the selectable values.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Append a value at the end of the list.
    pub fn add_item(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
        if self.selected.is_none() {
            self.selected = Some(0);
        }
    }

    /// Insert a value at `index`.
    ///
    /// Inserting at or before the selected index pushes the selection along
    /// with its item; an unselected list seeds its selection at 0.
    pub fn insert_item(&mut self, index: usize, item: impl Into<String>) -> WidgetResult<()> {
        if index > self.items.len() {
            return Err(WidgetError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.items.insert(index, item.into());
        self.selected = match self.selected {
            Some(selected) if index <= selected => Some(selected + 1),
            Some(selected) => Some(selected),
            None => Some(0),
        };
        Ok(())
    }

    /// Remove and return the value at `index`.
    ///
    /// Removing the selected item resets the selection to the first item
    /// (or clears it when the list empties); removing an earlier item
    /// shifts the selection down with its item.
    pub fn remove_item(&mut self, index: usize) -> WidgetResult<String> {
        if index >= self.items.len() {
            return Err(WidgetError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let removed = self.items.remove(index);
        self.selected = match self.selected {
            Some(selected) if index == selected => {
                (!self.items.is_empty()).then_some(0)
            }
            Some(selected) if index < selected => Some(selected - 1),
            other => other,
        };
        Ok(removed)
    }

    /// Remove all values and clear the selection.
    pub fn clear_items(&mut self) {
        self.items.clear();
        self.selected = None;
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Index of the selected value, if any.
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

    /// The selected value, if any.
    pub fn selected_value(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.items.get(i))
            .map(String::as_str)
    }

    /// Select by value. The value must be one of the items.
    pub fn set_selected_value(&mut self, value: &str) -> WidgetResult<()> {
        match self.items.iter().position(|item| item == value) {
            Some(index) => {
                self.selected = Some(index);
                Ok(())
            }
            None => Err(WidgetError::UnknownValue(value.to_owned())),
        }
    }

    /// The owned popup menu, once wired up.
    pub fn menu(&self) -> Option<WidgetId> {
        self.menu
    }

    /// Wire up the popup menu this combo opens.
    pub fn set_menu(&mut self, menu: Option<WidgetId>) {
        self.menu = menu;
    }

    // =========================================================================
    // Event Handlers
    // =========================================================================

    /// Open the menu if it is closed, close it if it is ours and open.
    fn toggle_menu(&mut self, ctx: &mut EventCtx<'_>) {
        let Some(menu) = self.menu else {
            return;
        };
        if ctx.open_menu() == Some(menu) {
            ctx.close_menu();
        } else {
            ctx.show_menu(menu);
        }
    }

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

    fn handle_key_press(&mut self, key: Key, ctx: &mut EventCtx<'_>) -> bool {
        match key {
            Key::Enter | Key::Space => {
                self.toggle_menu(ctx);
                true
            }
            Key::ArrowDown => {
                let next = match self.selected {
                    Some(selected) => (selected + 1).min(self.items.len().saturating_sub(1)),
                    None if !self.items.is_empty() => 0,
                    None => return true,
                };
                self.select(Some(next), ctx);
                true
            }
            Key::ArrowUp => {
                if let Some(selected) = self.selected {
                    self.select(Some(selected.saturating_sub(1)), ctx);
                }
                true
            }
            _ => false,
        }
    }
}

impl Default for ComboBox {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for ComboBox {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::ComboBox
    }

    fn paint(&self, ctx: &mut PaintContext<'_>, theme: &Theme) {
        let rect = ctx.rect();
        let open = self.menu.is_some() && ctx.open_menu() == self.menu;
        let back = if open {
            theme.back.pressed
        } else if self.base.is_hovered() {
            theme.back.hovered
        } else {
            self.base.back_color().unwrap_or(theme.back.normal)
        };
        ctx.renderer().fill_rect(rect, back);
        ctx.renderer().stroke_rect(rect, theme.border, 1.0);

        let renderer = ctx.renderer();
        let line_height = renderer.line_height(&theme.font);
        if let Some(value) = self.selected_value() {
            let origin = Point::new(theme.padding, (rect.height() - line_height) / 2.0);
            renderer.draw_text(origin, value, &theme.font, theme.fore.normal);
        }

        // Drop-down chevron at the right edge.
        let cx = rect.width() - theme.padding - 4.0;
        let cy = rect.height() / 2.0;
        let tip = Point::new(cx, cy + 2.0);
        renderer.draw_line(Point::new(cx - 3.0, cy - 2.0), tip, theme.fore.normal, 1.0);
        renderer.draw_line(tip, Point::new(cx + 3.0, cy - 2.0), theme.fore.normal, 1.0);
    }

    fn event(&mut self, event: &mut WidgetEvent, ctx: &mut EventCtx<'_>) -> bool {
        match event {
            WidgetEvent::MousePress(_) => {
                ctx.request_focus();
                self.toggle_menu(ctx);
                event.accept();
                true
            }
            // Claim the release, otherwise the router treats it as stray and
            // closes the menu the press just opened.
            WidgetEvent::MouseRelease(_) => {
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

    fn notice(&mut self, notice: Notice, ctx: &mut EventCtx<'_>) {
        if let Notice::MenuItemChosen { index } = notice {
            if index < self.items.len() {
                self.select(Some(index), ctx);
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

static_assertions::assert_impl_all!(ComboBox: Send);
