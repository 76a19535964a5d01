//! The desktop: widget tree ownership and event routing.
//!
//! [`Desktop`] owns the [`WidgetTree`], the theme, the input snapshot, and
//! the three exclusivity slots — at most one widget focused, at most one
//! hovered, at most one popup menu open. All input enters through the
//! entry points ([`mouse_move`](Desktop::mouse_move),
//! [`mouse_press`](Desktop::mouse_press),
//! [`mouse_release`](Desktop::mouse_release), [`wheel`](Desktop::wheel),
//! [`key_press`](Desktop::key_press)), and everything observable comes
//! back out through [`poll_event`](Desktop::poll_event).
//!
//! # Routing rules
//!
//! - Presses go to the widget under the cursor; a press nothing handles
//!   clears focus.
//! - Releases and moves go to the *focused* widget, releases even when the
//!   cursor has left its bounds, so drags always terminate. Moves inside
//!   the open popup menu go to the popup instead, driving its highlight.
//! - Key presses go to the focused widget, except that Tab cycles focus
//!   through tab-stop siblings before the widget ever sees it.
//! - A press that does not itself open or close the popup menu closes it
//!   (click-outside-closes).
//!
//! # Example
//!
//! ```
//! use atrium::widget::{Desktop, Widget};
//! use atrium::widget::widgets::Button;
//! use atrium_render::{Point, Rect, Size};
//! use std::time::Duration;
//!
//! let mut desktop = Desktop::new(Size::new(640.0, 480.0));
//! let mut button = Button::new();
//! button.widget_base_mut().set_geometry(Rect::new(10.0, 10.0, 80.0, 24.0));
//! let button_id = desktop.spawn(button, "ok");
//! desktop.attach(button_id, desktop.root()).unwrap();
//!
//! desktop.begin_frame(Duration::from_millis(16));
//! desktop.mouse_move(Point::new(20.0, 20.0)).unwrap();
//! desktop.mouse_press(atrium::input::MouseButton::Left).unwrap();
//! assert_eq!(desktop.focused(), Some(button_id));
//! ```

use std::collections::VecDeque;
use std::time::Duration;

use atrium_core::WidgetId;
use atrium_render::{FixedMetrics, FrameStats, Point, Rect, Renderer, Size, TextMeasure};

use super::context::{DeferredAction, EventCtx};
use super::focus::next_tab_stop;
use super::traits::Widget;
use super::tree::WidgetTree;
use super::widgets::{ComboBox, Container, PopUpMenu};
use crate::clipboard::{Clipboard, MemoryClipboard};
use crate::error::{WidgetError, WidgetResult};
use crate::event::{
    EnterEvent, FocusInEvent, FocusOutEvent, FocusReason, KeyPressEvent, LeaveEvent,
    MouseDoubleClickEvent, MouseMoveEvent, MousePressEvent, MouseReleaseEvent, Notice, UiEvent,
    WheelEvent, WidgetEvent,
};
use crate::input::{InputState, Key, MouseButton};
use crate::style::Theme;

/// Default interval within which a second press upgrades to a double-click.
pub const DEFAULT_DOUBLE_CLICK_THRESHOLD: Duration = Duration::from_millis(175);

/// The top-level widget-tree host and event router.
pub struct Desktop {
    /// The widget tree.
    tree: WidgetTree,

    /// The root container covering the whole desktop.
    root: WidgetId,

    /// Desktop size in window coordinates.
    size: Size,

    /// The active theme.
    theme: Theme,

    /// Text measurement backend.
    text: Box<dyn TextMeasure + Send>,

    /// Clipboard backend for text widgets.
    clipboard: Box<dyn Clipboard>,

    /// Outbound notification queue, drained by the host.
    events: VecDeque<UiEvent>,

    /// Current and previous-frame input snapshot.
    input: InputState,

    /// The widget holding keyboard focus.
    focused: Option<WidgetId>,

    /// The widget under the cursor.
    hovered: Option<WidgetId>,

    /// The open popup menu.
    open_menu: Option<WidgetId>,

    /// The widget last pressed, for double-click detection.
    last_pressed: Option<WidgetId>,

    /// Timestamp of the last press.
    last_press_time: Option<Duration>,

    /// Maximum interval between presses that still counts as a double-click.
    double_click_threshold: Duration,
}

impl Desktop {
    /// Create a desktop of the given size.
    ///
    /// Spawns a root [`Container`] covering the whole area. Starts with
    /// the dark theme, fixed-advance text metrics, and an in-process
    /// clipboard; use the `with_*` builders to swap backends in.
    pub fn new(size: Size) -> Self {
        let mut tree = WidgetTree::new();
        let mut root = Container::new();
        root.widget_base_mut()
            .set_geometry(Rect::from_origin(Point::ZERO, size));
        // The frame clear paints the desktop background.
        root.widget_base_mut().set_draw_back(false);
        let root_id = tree.spawn(root, "desktop");

        Self {
            tree,
            root: root_id,
            size,
            theme: Theme::default(),
            text: Box::new(FixedMetrics::default()),
            clipboard: Box::new(MemoryClipboard::new()),
            events: VecDeque::new(),
            input: InputState::new(),
            focused: None,
            hovered: None,
            open_menu: None,
            last_pressed: None,
            last_press_time: None,
            double_click_threshold: DEFAULT_DOUBLE_CLICK_THRESHOLD,
        }
    }

    /// Use the given text measurement backend.
    pub fn with_text_measure(mut self, text: impl TextMeasure + Send + 'static) -> Self {
        self.text = Box::new(text);
        self
    }

    /// Use the given clipboard backend.
    pub fn with_clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    /// Use the given theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Use the given double-click interval.
    pub fn with_double_click_threshold(mut self, threshold: Duration) -> Self {
        self.double_click_threshold = threshold;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The root container's ID.
    #[inline]
    pub fn root(&self) -> WidgetId {
        self.root
    }

    /// The desktop size.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Resize the desktop (and its root container).
    pub fn set_size(&mut self, size: Size) -> WidgetResult<()> {
        self.size = size;
        self.tree
            .widget_mut(self.root)?
            .set_geometry(Rect::from_origin(Point::ZERO, size));
        Ok(())
    }

    /// The widget holding keyboard focus, if any.
    #[inline]
    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// The widget under the cursor, if any.
    #[inline]
    pub fn hovered(&self) -> Option<WidgetId> {
        self.hovered
    }

    /// The open popup menu, if any.
    #[inline]
    pub fn open_menu(&self) -> Option<WidgetId> {
        self.open_menu
    }

    /// The active theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Replace the theme. Takes effect on the next draw.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// The current input snapshot.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// The widget tree.
    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// The widget tree, mutably.
    ///
    /// Removal should go through [`Desktop::despawn`] instead, so the
    /// focus/hover/menu slots cannot be left pointing at dead widgets.
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    /// Add a widget to the tree as a detached root. See
    /// [`WidgetTree::spawn`].
    pub fn spawn(&mut self, widget: impl Widget + 'static, name: impl Into<String>) -> WidgetId {
        self.tree.spawn(widget, name)
    }

    /// Attach `child` as the back-most child of `parent`. See
    /// [`WidgetTree::attach`].
    pub fn attach(&mut self, child: WidgetId, parent: WidgetId) -> WidgetResult<()> {
        self.tree.attach(child, parent)
    }

    /// Get a widget downcast to its concrete type. See
    /// [`WidgetTree::typed`].
    pub fn typed<W: Widget + 'static>(&self, id: WidgetId) -> WidgetResult<&W> {
        self.tree.typed(id)
    }

    /// Get a widget downcast to its concrete type, mutably. See
    /// [`WidgetTree::typed_mut`].
    pub fn typed_mut<W: Widget + 'static>(&mut self, id: WidgetId) -> WidgetResult<&mut W> {
        self.tree.typed_mut(id)
    }

    /// Pop the oldest outbound notification, if any.
    pub fn poll_event(&mut self) -> Option<UiEvent> {
        self.events.pop_front()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Remove a widget and its subtree, releasing any router slots that
    /// pointed into it.
    ///
    /// Detached roots owned by a removed widget (a combo box's popup menu)
    /// are removed along with it. Returns every removed ID.
    pub fn despawn(&mut self, id: WidgetId) -> WidgetResult<Vec<WidgetId>> {
        if id == self.root {
            return Err(WidgetError::UnsupportedOperation(
                "the desktop root cannot be despawned",
            ));
        }
        let mut removed = self.tree.despawn(id)?;

        // Detached roots die with their owner.
        loop {
            let orphan = self.tree.registry().roots().find(|&root| {
                self.tree
                    .widget(root)
                    .ok()
                    .and_then(|w| w.widget_base().owner())
                    .is_some_and(|owner| !self.tree.contains(owner))
            });
            match orphan {
                Some(orphan) => removed.extend(self.tree.despawn(orphan)?),
                None => break,
            }
        }

        tracing::debug!(count = removed.len(), "despawned widget subtree");
        self.forget_removed(&removed);
        Ok(removed)
    }

    /// Drop router references into a removed set. No events are dispatched
    /// to removed widgets; only the menu closure is reported.
    fn forget_removed(&mut self, removed: &[WidgetId]) {
        if self.focused.is_some_and(|id| removed.contains(&id)) {
            self.focused = None;
        }
        if self.hovered.is_some_and(|id| removed.contains(&id)) {
            self.hovered = None;
        }
        if self.last_pressed.is_some_and(|id| removed.contains(&id)) {
            self.last_pressed = None;
        }
        if let Some(menu) = self.open_menu {
            if removed.contains(&menu) {
                self.open_menu = None;
                self.events.push_back(UiEvent::MenuClosed { menu });
            }
        }
    }

    // =========================================================================
    // Frame Driving
    // =========================================================================

    /// Start an input frame at the given timestamp.
    ///
    /// Rolls the input snapshot so edge queries (newly pressed) compare
    /// against the previous frame. Call once per host frame, before
    /// feeding that frame's input.
    pub fn begin_frame(&mut self, now: Duration) {
        self.input.begin_frame(now);
    }

    /// Run the layout pass over the tree (and the open popup).
    pub fn layout(&mut self) -> WidgetResult<()> {
        self.tree.layout(self.root, self.text.as_ref(), &self.theme)?;
        if let Some(menu) = self.open_menu {
            self.tree.layout(menu, self.text.as_ref(), &self.theme)?;
        }
        Ok(())
    }

    /// Lay out and draw the frame.
    ///
    /// The tree paints back-to-front from the root; the open popup menu
    /// paints after everything else, so it floats above the tree exactly
    /// as it hit-tests above it.
    pub fn draw(&mut self, renderer: &mut dyn Renderer) -> WidgetResult<FrameStats> {
        self.layout()?;
        renderer.begin_frame(self.theme.back.normal, self.size);
        self.tree.draw(self.root, renderer, &self.theme, self.open_menu)?;
        if let Some(menu) = self.open_menu {
            self.tree.draw(menu, renderer, &self.theme, self.open_menu)?;
        }
        Ok(renderer.end_frame())
    }

    // =========================================================================
    // Entry Points
    // =========================================================================

    /// Report a cursor move.
    ///
    /// Recomputes the hovered widget (the open popup is consulted first,
    /// since it floats above the tree) and delivers enter/leave to widgets
    /// whose hover state changed. While the cursor is inside the open
    /// popup the move is forwarded to the popup, which tracks it for its
    /// row highlight; otherwise it goes to the focused widget only —
    /// drag-style widgets depend on seeing moves that leave their bounds.
    pub fn mouse_move(&mut self, pos: Point) -> WidgetResult<()> {
        self.input.set_cursor(pos);
        self.update_hover()?;

        let target = match self.open_menu {
            Some(menu) if self.tree.window_rect(menu)?.contains(pos) => Some(menu),
            _ => self.focused,
        };
        if let Some(target) = target {
            let local = self.tree.window_to_local(target, pos)?;
            let mut event = WidgetEvent::MouseMove(MouseMoveEvent::new(
                local,
                pos,
                self.input.button_mask(),
                self.input.modifiers(),
            ));
            self.dispatch(target, &mut event, FocusReason::Other)?;
        }
        Ok(())
    }

    /// Report a mouse button press at the current cursor position.
    ///
    /// Returns whether a widget handled it.
    pub fn mouse_press(&mut self, button: MouseButton) -> WidgetResult<bool> {
        self.input.set_button(button, true);
        let now = self.input.time();
        let pos = self.input.cursor();
        let target = self.hovered;
        let menu_before = self.open_menu;

        let mut handled = false;
        let mut was_double = false;
        if let Some(target) = target {
            let within_interval = self
                .last_press_time
                .is_some_and(|t| now.saturating_sub(t) <= self.double_click_threshold);
            let is_double = self.last_pressed == Some(target)
                && within_interval
                && self.tree.widget(target)?.widget_base().accepts_double_clicks();

            let local = self.tree.window_to_local(target, pos)?;
            let modifiers = self.input.modifiers();
            let mut event = if is_double {
                WidgetEvent::DoubleClick(MouseDoubleClickEvent::new(button, local, pos, modifiers))
            } else {
                WidgetEvent::MousePress(MousePressEvent::new(button, local, pos, modifiers))
            };
            handled = self.dispatch(target, &mut event, FocusReason::Mouse)?;
            was_double = is_double;

            if handled {
                self.events.push_back(if is_double {
                    UiEvent::DoubleClicked { widget: target, button }
                } else {
                    UiEvent::Pressed { widget: target, button }
                });
            }
        }

        // A press that did not itself open or close the popup closes it.
        if self.open_menu == menu_before && self.open_menu.is_some() {
            self.hide_menu()?;
        }

        if !handled {
            self.apply_focus(None, FocusReason::Mouse)?;
            self.last_pressed = None;
        } else if was_double {
            // A third rapid click starts over instead of chaining.
            self.last_pressed = None;
        } else {
            self.last_pressed = target;
        }
        self.last_press_time = Some(now);
        Ok(handled)
    }

    /// Report a mouse button release at the current cursor position.
    ///
    /// The release is forwarded to the focused widget even when the cursor
    /// is outside its bounds. Returns whether the focused widget accepted
    /// a release within its bounds; a rejected release also closes the
    /// popup menu.
    pub fn mouse_release(&mut self, button: MouseButton) -> WidgetResult<bool> {
        self.input.set_button(button, false);
        let pos = self.input.cursor();

        if let Some(menu) = self.open_menu {
            let owner = self.tree.widget(menu)?.widget_base().owner();
            if owner != self.focused {
                self.hide_menu()?;
            }
        }

        let Some(focused) = self.focused else {
            self.hide_menu()?;
            return Ok(false);
        };

        let inside = self.tree.window_rect(focused)?.contains(pos);
        let local = self.tree.window_to_local(focused, pos)?;
        let mut event = WidgetEvent::MouseRelease(MouseReleaseEvent::new(
            button,
            local,
            pos,
            self.input.modifiers(),
        ));
        let handled = self.dispatch(focused, &mut event, FocusReason::Mouse)?;
        if handled {
            self.events.push_back(UiEvent::Released { widget: focused, button });
        }

        if !handled || !inside {
            self.hide_menu()?;
        }
        Ok(handled && inside)
    }

    /// Report a wheel scroll over the hovered widget.
    ///
    /// Returns whether the hovered widget handled it.
    pub fn wheel(&mut self, delta: f32) -> WidgetResult<bool> {
        self.input.add_wheel(delta);
        let Some(hovered) = self.hovered else {
            return Ok(false);
        };
        let pos = self.input.cursor();
        let local = self.tree.window_to_local(hovered, pos)?;
        let mut event =
            WidgetEvent::Wheel(WheelEvent::new(local, pos, delta, self.input.modifiers()));
        self.dispatch(hovered, &mut event, FocusReason::Other)
    }

    /// Report a key press.
    ///
    /// Tab is routed to focus traversal when the focused widget stops on
    /// Tab (Shift reverses direction, newly-pressed only, so holding Tab
    /// does not cycle); every other key is forwarded to the focused
    /// widget. Returns whether the key was consumed.
    pub fn key_press(&mut self, key: Key) -> WidgetResult<bool> {
        self.input.key_down(key);
        let Some(focused) = self.focused else {
            return Ok(false);
        };

        if key == Key::Tab
            && self.input.is_key_newly_pressed(Key::Tab)
            && self.tree.widget(focused)?.widget_base().stops_on_tab()
        {
            let backwards = self.input.modifiers().shift;
            if let Some(next) = next_tab_stop(&self.tree, focused, backwards)? {
                let reason = if backwards {
                    FocusReason::Backtab
                } else {
                    FocusReason::Tab
                };
                self.apply_focus(Some(next), reason)?;
            }
            return Ok(true);
        }

        let mut event = WidgetEvent::KeyPress(KeyPressEvent::new(key, self.input.modifiers()));
        self.dispatch(focused, &mut event, FocusReason::Other)
    }

    /// Report a key release. Updates the input snapshot only.
    pub fn key_release(&mut self, key: Key) {
        self.input.key_up(key);
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Move keyboard focus.
    ///
    /// The previous holder is always notified of the loss before the new
    /// holder hears of the gain.
    pub fn set_focus(&mut self, widget: Option<WidgetId>) -> WidgetResult<()> {
        self.apply_focus(widget, FocusReason::Other)
    }

    fn apply_focus(&mut self, target: Option<WidgetId>, reason: FocusReason) -> WidgetResult<()> {
        if self.focused == target {
            return Ok(());
        }
        if let Some(id) = target {
            // Validate before disturbing the current holder.
            self.tree.widget(id)?;
        }
        tracing::trace!(?target, ?reason, "focus change");

        if let Some(old) = self.focused.take() {
            if self.tree.contains(old) {
                self.tree.widget_mut(old)?.widget_base_mut().set_focused(false);
                let mut event = WidgetEvent::FocusOut(FocusOutEvent::new(reason));
                self.dispatch(old, &mut event, reason)?;
                self.events.push_back(UiEvent::FocusLost { widget: old });
            }
        }

        self.focused = target;
        if let Some(new) = target {
            self.tree.widget_mut(new)?.widget_base_mut().set_focused(true);
            let mut event = WidgetEvent::FocusIn(FocusInEvent::new(reason));
            self.dispatch(new, &mut event, reason)?;
            self.events.push_back(UiEvent::FocusGained { widget: new });
        }
        Ok(())
    }

    // =========================================================================
    // Popup Menus
    // =========================================================================

    /// Open a popup menu, closing any other popup first.
    ///
    /// When the menu is owned by a [`ComboBox`], its rows and highlight
    /// are refreshed from the owner and it is placed directly below it, at
    /// least as wide. Hover is recomputed immediately in case the cursor
    /// already lies within the menu.
    pub fn show_menu(&mut self, menu: WidgetId) -> WidgetResult<()> {
        if self.open_menu == Some(menu) {
            return Ok(());
        }
        if self.open_menu.is_some() {
            self.hide_menu()?;
        }

        let owner = self.tree.widget(menu)?.widget_base().owner();
        if let Some(owner_id) = owner {
            if let Ok(combo) = self.tree.typed::<ComboBox>(owner_id) {
                let items = combo.items().to_vec();
                let selected = combo.selected_index();
                let owner_rect = self.tree.window_rect(owner_id)?;

                let popup = self.tree.typed_mut::<PopUpMenu>(menu)?;
                popup.set_items(items);
                popup.set_selected(selected);
                popup.resize_to_content(self.text.as_ref(), &self.theme);
                let size = popup.widget_base().size();
                if size.width < owner_rect.width() {
                    popup.widget_base_mut().resize(owner_rect.width(), size.height);
                }
                popup
                    .widget_base_mut()
                    .set_pos(Point::new(owner_rect.left(), owner_rect.bottom()));
            }
        }

        tracing::debug!(?menu, "popup menu opened");
        self.tree.widget_mut(menu)?.set_visible(true);
        self.open_menu = Some(menu);
        self.update_hover()?;
        Ok(())
    }

    /// Close the open popup menu, if any.
    ///
    /// Hover pointing into the popup is dropped (with a leave
    /// notification) so a stale highlight cannot survive the menu.
    pub fn hide_menu(&mut self) -> WidgetResult<()> {
        let Some(menu) = self.open_menu.take() else {
            return Ok(());
        };

        if let Some(hovered) = self.hovered {
            let in_popup =
                hovered == menu || self.tree.registry().is_ancestor_of(menu, hovered)?;
            if in_popup {
                self.tree
                    .widget_mut(hovered)?
                    .widget_base_mut()
                    .set_hovered(false);
                self.hovered = None;
                let mut event = WidgetEvent::Leave(LeaveEvent::new());
                self.dispatch(hovered, &mut event, FocusReason::Other)?;
            }
        }

        tracing::debug!(?menu, "popup menu closed");
        self.tree.widget_mut(menu)?.set_visible(false);
        self.events.push_back(UiEvent::MenuClosed { menu });
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Recompute the hovered widget from the current cursor position and
    /// deliver enter/leave to the widgets whose state changed.
    fn update_hover(&mut self) -> WidgetResult<()> {
        let pos = self.input.cursor();
        let new_hover = self.compute_hover(pos)?;
        if new_hover == self.hovered {
            return Ok(());
        }

        if let Some(old) = self.hovered {
            if self.tree.contains(old) {
                self.tree.widget_mut(old)?.widget_base_mut().set_hovered(false);
                let mut event = WidgetEvent::Leave(LeaveEvent::new());
                self.dispatch(old, &mut event, FocusReason::Other)?;
            }
        }

        self.hovered = new_hover;
        if let Some(new) = new_hover {
            self.tree.widget_mut(new)?.widget_base_mut().set_hovered(true);
            let local = self.tree.window_to_local(new, pos)?;
            let mut event = WidgetEvent::Enter(EnterEvent::new(local));
            self.dispatch(new, &mut event, FocusReason::Other)?;
        }
        Ok(())
    }

    /// Hit-test the cursor position. The open popup floats above the
    /// normal tree and is consulted first.
    fn compute_hover(&self, pos: Point) -> WidgetResult<Option<WidgetId>> {
        if let Some(menu) = self.open_menu {
            if let Some(hit) = self.tree.hit_test(menu, pos)? {
                return Ok(Some(hit));
            }
        }
        self.tree.hit_test(self.root, pos)
    }

    /// Dispatch one event to one widget, then apply whatever the widget
    /// asked the desktop to do.
    fn dispatch(
        &mut self,
        id: WidgetId,
        event: &mut WidgetEvent,
        focus_reason: FocusReason,
    ) -> WidgetResult<bool> {
        let open_menu = self.open_menu;
        let (handled, actions, notices) = {
            let Self {
                tree,
                text,
                theme,
                clipboard,
                events,
                ..
            } = self;
            let widget = tree.widget_mut(id)?;
            let mut ctx = EventCtx::new(
                id,
                open_menu,
                text.as_ref(),
                theme,
                clipboard.as_mut(),
                events,
            );
            let handled = widget.event(event, &mut ctx);
            let (actions, notices) = ctx.take_deferred();
            (handled || event.is_accepted(), actions, notices)
        };
        self.apply_deferred(actions, notices, focus_reason)?;
        Ok(handled)
    }

    /// Deliver a notice to its target widget, then apply its requests.
    fn deliver_notice(&mut self, target: WidgetId, notice: Notice) -> WidgetResult<()> {
        if !self.tree.contains(target) {
            return Ok(());
        }
        let open_menu = self.open_menu;
        let (actions, notices) = {
            let Self {
                tree,
                text,
                theme,
                clipboard,
                events,
                ..
            } = self;
            let widget = tree.widget_mut(target)?;
            let mut ctx = EventCtx::new(
                target,
                open_menu,
                text.as_ref(),
                theme,
                clipboard.as_mut(),
                events,
            );
            widget.notice(notice, &mut ctx);
            ctx.take_deferred()
        };
        self.apply_deferred(actions, notices, FocusReason::Other)
    }

    fn apply_deferred(
        &mut self,
        actions: Vec<DeferredAction>,
        notices: Vec<(WidgetId, Notice)>,
        focus_reason: FocusReason,
    ) -> WidgetResult<()> {
        for (target, notice) in notices {
            self.deliver_notice(target, notice)?;
        }
        for action in actions {
            match action {
                DeferredAction::SetFocus(widget) => self.apply_focus(widget, focus_reason)?,
                DeferredAction::ShowMenu(menu) => self.show_menu(menu)?,
                DeferredAction::HideMenu => self.hide_menu()?,
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Desktop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Desktop")
            .field("size", &self.size)
            .field("focused", &self.focused)
            .field("hovered", &self.hovered)
            .field("open_menu", &self.open_menu)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(Desktop: Send);

#[cfg(test)]
mod tests {
    use std::any::Any;

    use super::*;
    use crate::widget::{PaintContext, WidgetBase, WidgetKind};

    /// Test widget that records what it receives and optionally handles
    /// presses (requesting focus like interactive widgets do).
    struct Probe {
        base: WidgetBase,
        handle_press: bool,
        log: Vec<String>,
    }

    impl Probe {
        fn new(handle_press: bool) -> Self {
            Self {
                base: WidgetBase::new(),
                handle_press,
                log: Vec::new(),
            }
        }
    }

    impl Widget for Probe {
        fn widget_base(&self) -> &WidgetBase {
            &self.base
        }

        fn widget_base_mut(&mut self) -> &mut WidgetBase {
            &mut self.base
        }

        fn kind(&self) -> WidgetKind {
            WidgetKind::Custom("Probe")
        }

        fn paint(&self, _ctx: &mut PaintContext<'_>, _theme: &Theme) {}

        fn event(&mut self, event: &mut WidgetEvent, ctx: &mut EventCtx<'_>) -> bool {
            match event {
                WidgetEvent::MousePress(_) => {
                    self.log.push("press".into());
                    if self.handle_press {
                        ctx.request_focus();
                        event.accept();
                    }
                    self.handle_press
                }
                WidgetEvent::DoubleClick(_) => {
                    self.log.push("double".into());
                    event.accept();
                    true
                }
                WidgetEvent::MouseRelease(_) => {
                    self.log.push("release".into());
                    event.accept();
                    true
                }
                WidgetEvent::MouseMove(e) => {
                    self.log.push(format!("move {} {}", e.local_pos.x, e.local_pos.y));
                    true
                }
                WidgetEvent::Enter(_) => {
                    self.log.push("enter".into());
                    false
                }
                WidgetEvent::Leave(_) => {
                    self.log.push("leave".into());
                    false
                }
                WidgetEvent::FocusIn(_) => {
                    self.log.push("focus-in".into());
                    false
                }
                WidgetEvent::FocusOut(_) => {
                    self.log.push("focus-out".into());
                    false
                }
                WidgetEvent::KeyPress(e) => {
                    self.log.push(format!("key {:?}", e.key));
                    true
                }
                WidgetEvent::Wheel(_) => false,
            }
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn setup() -> Desktop {
        Desktop::new(Size::new(400.0, 300.0))
    }

    fn spawn_probe(desktop: &mut Desktop, name: &str, rect: Rect, handle_press: bool) -> WidgetId {
        let mut probe = Probe::new(handle_press);
        probe.base.set_geometry(rect);
        let id = desktop.spawn(probe, name);
        desktop.attach(id, desktop.root()).unwrap();
        id
    }

    fn log(desktop: &Desktop, id: WidgetId) -> Vec<String> {
        desktop.typed::<Probe>(id).unwrap().log.clone()
    }

    #[test]
    fn test_press_focuses_handling_widget() {
        let mut desktop = setup();
        let a = spawn_probe(&mut desktop, "a", Rect::new(10.0, 10.0, 50.0, 20.0), true);

        desktop.begin_frame(Duration::from_millis(0));
        desktop.mouse_move(Point::new(20.0, 15.0)).unwrap();
        assert_eq!(desktop.hovered(), Some(a));
        assert!(desktop.mouse_press(MouseButton::Left).unwrap());
        assert_eq!(desktop.focused(), Some(a));

        assert_eq!(desktop.poll_event(), Some(UiEvent::FocusGained { widget: a }));
        assert_eq!(
            desktop.poll_event(),
            Some(UiEvent::Pressed { widget: a, button: MouseButton::Left })
        );
    }

    #[test]
    fn test_unhandled_press_clears_focus() {
        let mut desktop = setup();
        let a = spawn_probe(&mut desktop, "a", Rect::new(10.0, 10.0, 50.0, 20.0), true);

        desktop.begin_frame(Duration::from_millis(0));
        desktop.mouse_move(Point::new(20.0, 15.0)).unwrap();
        desktop.mouse_press(MouseButton::Left).unwrap();
        desktop.mouse_release(MouseButton::Left).unwrap();
        assert_eq!(desktop.focused(), Some(a));

        // The root container handles nothing: focus is cleared.
        desktop.mouse_move(Point::new(300.0, 200.0)).unwrap();
        assert!(!desktop.mouse_press(MouseButton::Left).unwrap());
        assert_eq!(desktop.focused(), None);
        assert!(log(&desktop, a).contains(&"focus-out".to_string()));
    }

    #[test]
    fn test_focus_loss_precedes_gain() {
        let mut desktop = setup();
        let a = spawn_probe(&mut desktop, "a", Rect::new(10.0, 10.0, 50.0, 20.0), true);
        let b = spawn_probe(&mut desktop, "b", Rect::new(10.0, 50.0, 50.0, 20.0), true);

        desktop.set_focus(Some(a)).unwrap();
        while desktop.poll_event().is_some() {}
        desktop.set_focus(Some(b)).unwrap();

        assert_eq!(desktop.poll_event(), Some(UiEvent::FocusLost { widget: a }));
        assert_eq!(desktop.poll_event(), Some(UiEvent::FocusGained { widget: b }));
        assert!(!desktop.tree().widget(a).unwrap().has_focus());
        assert!(desktop.tree().widget(b).unwrap().has_focus());
    }

    #[test]
    fn test_release_reaches_focused_outside_bounds() {
        let mut desktop = setup();
        let a = spawn_probe(&mut desktop, "a", Rect::new(10.0, 10.0, 50.0, 20.0), true);

        desktop.begin_frame(Duration::from_millis(0));
        desktop.mouse_move(Point::new(20.0, 15.0)).unwrap();
        desktop.mouse_press(MouseButton::Left).unwrap();

        // Drag far outside, then release: the widget still sees it, but
        // the router reports the release as rejected.
        desktop.mouse_move(Point::new(300.0, 200.0)).unwrap();
        let outcome = desktop.mouse_release(MouseButton::Left).unwrap();
        assert!(!outcome);
        assert!(log(&desktop, a).contains(&"release".to_string()));
    }

    #[test]
    fn test_moves_go_to_focused_not_hovered() {
        let mut desktop = setup();
        let a = spawn_probe(&mut desktop, "a", Rect::new(10.0, 10.0, 50.0, 20.0), true);
        let b = spawn_probe(&mut desktop, "b", Rect::new(100.0, 10.0, 50.0, 20.0), true);

        desktop.begin_frame(Duration::from_millis(0));
        desktop.mouse_move(Point::new(20.0, 15.0)).unwrap();
        desktop.mouse_press(MouseButton::Left).unwrap();

        // Move over b: b gets enter, but the move itself goes to a.
        desktop.mouse_move(Point::new(110.0, 15.0)).unwrap();
        assert!(log(&desktop, b).contains(&"enter".to_string()));
        assert!(log(&desktop, a).iter().any(|entry| entry.starts_with("move")));
        assert!(!log(&desktop, b).iter().any(|entry| entry.starts_with("move")));
    }

    #[test]
    fn test_double_click_within_threshold() {
        let mut desktop = setup();
        let a = spawn_probe(&mut desktop, "a", Rect::new(10.0, 10.0, 50.0, 20.0), true);
        desktop
            .typed_mut::<Probe>(a)
            .unwrap()
            .widget_base_mut()
            .set_accepts_double_clicks(true);

        desktop.begin_frame(Duration::from_millis(0));
        desktop.mouse_move(Point::new(20.0, 15.0)).unwrap();
        desktop.mouse_press(MouseButton::Left).unwrap();
        desktop.mouse_release(MouseButton::Left).unwrap();

        desktop.begin_frame(Duration::from_millis(100));
        desktop.mouse_press(MouseButton::Left).unwrap();
        assert_eq!(log(&desktop, a).iter().filter(|e| *e == "double").count(), 1);

        // The third rapid press does not chain into another double-click.
        desktop.begin_frame(Duration::from_millis(150));
        desktop.mouse_press(MouseButton::Left).unwrap();
        assert_eq!(log(&desktop, a).iter().filter(|e| *e == "double").count(), 1);
    }

    #[test]
    fn test_slow_second_click_is_not_double() {
        let mut desktop = setup();
        let a = spawn_probe(&mut desktop, "a", Rect::new(10.0, 10.0, 50.0, 20.0), true);
        desktop
            .typed_mut::<Probe>(a)
            .unwrap()
            .widget_base_mut()
            .set_accepts_double_clicks(true);

        desktop.begin_frame(Duration::from_millis(0));
        desktop.mouse_move(Point::new(20.0, 15.0)).unwrap();
        desktop.mouse_press(MouseButton::Left).unwrap();

        desktop.begin_frame(Duration::from_millis(200));
        desktop.mouse_press(MouseButton::Left).unwrap();
        assert!(!log(&desktop, a).contains(&"double".to_string()));
    }

    #[test]
    fn test_tab_cycles_between_stops() {
        let mut desktop = setup();
        let a = spawn_probe(&mut desktop, "a", Rect::new(10.0, 10.0, 50.0, 20.0), true);
        let b = spawn_probe(&mut desktop, "b", Rect::new(10.0, 40.0, 50.0, 20.0), true);
        for id in [a, b] {
            desktop
                .typed_mut::<Probe>(id)
                .unwrap()
                .widget_base_mut()
                .set_stop_on_tab(true);
        }

        desktop.set_focus(Some(a)).unwrap();
        desktop.begin_frame(Duration::from_millis(0));
        assert!(desktop.key_press(Key::Tab).unwrap());
        assert_eq!(desktop.focused(), Some(b));
        desktop.key_release(Key::Tab);

        // Shift+Tab goes back.
        desktop.begin_frame(Duration::from_millis(16));
        desktop.key_press(Key::ShiftLeft).unwrap();
        assert!(desktop.key_press(Key::Tab).unwrap());
        assert_eq!(desktop.focused(), Some(a));

        // The widget never saw the Tab key itself.
        assert!(!log(&desktop, a).contains(&format!("key {:?}", Key::Tab)));
        assert!(!log(&desktop, b).contains(&format!("key {:?}", Key::Tab)));
    }

    #[test]
    fn test_held_tab_does_not_cycle_again() {
        let mut desktop = setup();
        let a = spawn_probe(&mut desktop, "a", Rect::new(10.0, 10.0, 50.0, 20.0), true);
        let b = spawn_probe(&mut desktop, "b", Rect::new(10.0, 40.0, 50.0, 20.0), true);
        for id in [a, b] {
            desktop
                .typed_mut::<Probe>(id)
                .unwrap()
                .widget_base_mut()
                .set_stop_on_tab(true);
        }

        desktop.set_focus(Some(a)).unwrap();
        desktop.begin_frame(Duration::from_millis(0));
        desktop.key_press(Key::Tab).unwrap();
        assert_eq!(desktop.focused(), Some(b));

        // Tab still held in the next frame: repeat does not navigate.
        desktop.begin_frame(Duration::from_millis(16));
        desktop.key_press(Key::Tab).unwrap();
        assert_eq!(desktop.focused(), Some(b));
    }

    #[test]
    fn test_keys_without_focus_are_unhandled() {
        let mut desktop = setup();
        desktop.begin_frame(Duration::from_millis(0));
        assert!(!desktop.key_press(Key::A).unwrap());
    }

    #[test]
    fn test_despawn_clears_router_slots() {
        let mut desktop = setup();
        let a = spawn_probe(&mut desktop, "a", Rect::new(10.0, 10.0, 50.0, 20.0), true);

        desktop.begin_frame(Duration::from_millis(0));
        desktop.mouse_move(Point::new(20.0, 15.0)).unwrap();
        desktop.mouse_press(MouseButton::Left).unwrap();
        assert_eq!(desktop.focused(), Some(a));
        assert_eq!(desktop.hovered(), Some(a));

        desktop.despawn(a).unwrap();
        assert_eq!(desktop.focused(), None);
        assert_eq!(desktop.hovered(), None);
        assert!(!desktop.tree().contains(a));

        // The router keeps working afterwards.
        desktop.mouse_move(Point::new(20.0, 15.0)).unwrap();
        assert_eq!(desktop.hovered(), Some(desktop.root()));
    }

    #[test]
    fn test_root_cannot_be_despawned() {
        let mut desktop = setup();
        let root = desktop.root();
        assert!(matches!(
            desktop.despawn(root),
            Err(WidgetError::UnsupportedOperation(_))
        ));
    }
}
