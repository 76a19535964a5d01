//! Contexts passed into widget hooks.
//!
//! [`LayoutCtx`] feeds the pre-draw layout pass; [`EventCtx`] accompanies
//! every event and notice dispatch. Widgets never hold references to the
//! desktop — anything they need from it (text metrics, the clipboard, the
//! outbound queue) arrives on the context, and anything they want the
//! desktop to do (focus changes, menu open/close) is recorded on the
//! context and applied after the dispatch returns.

use std::collections::VecDeque;

use atrium_core::WidgetId;
use atrium_render::{Size, TextMeasure};

use crate::clipboard::Clipboard;
use crate::event::{Notice, UiEvent};
use crate::style::Theme;

/// Context for the layout pass.
pub struct LayoutCtx<'a> {
    /// Text measurement for content-driven sizing.
    text: &'a dyn TextMeasure,

    /// The active theme.
    theme: &'a Theme,

    /// Bounding size of the widget's laid-out children.
    children_extent: Size,
}

impl<'a> LayoutCtx<'a> {
    /// Create a new layout context.
    pub fn new(text: &'a dyn TextMeasure, theme: &'a Theme, children_extent: Size) -> Self {
        Self {
            text,
            theme,
            children_extent,
        }
    }

    /// Get the text measurement interface.
    pub fn text(&self) -> &dyn TextMeasure {
        self.text
    }

    /// Get the active theme.
    pub fn theme(&self) -> &Theme {
        self.theme
    }

    /// Bounding size of the widget's children, in the widget's local space.
    ///
    /// Children lay out before their parent, so this is current when the
    /// parent's [`layout`](super::Widget::layout) runs. Zero for leaves.
    pub fn children_extent(&self) -> Size {
        self.children_extent
    }
}

/// A desktop-level action requested by a widget during event handling.
///
/// Applied by the desktop after the dispatch that requested it returns, so
/// widgets never re-enter the router.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum DeferredAction {
    /// Move keyboard focus.
    SetFocus(Option<WidgetId>),
    /// Open a popup menu.
    ShowMenu(WidgetId),
    /// Close the open popup menu.
    HideMenu,
}

/// Context for event and notice dispatch.
pub struct EventCtx<'a> {
    /// The widget being dispatched to.
    widget: WidgetId,

    /// The popup menu currently open on the desktop, if any.
    open_menu: Option<WidgetId>,

    /// Text measurement, for caret positioning and hit math.
    text: &'a dyn TextMeasure,

    /// The active theme.
    theme: &'a Theme,

    /// The clipboard backend.
    clipboard: &'a mut dyn Clipboard,

    /// The desktop's outbound notification queue.
    events: &'a mut VecDeque<UiEvent>,

    /// Desktop actions recorded during this dispatch.
    actions: Vec<DeferredAction>,

    /// Notices addressed to other widgets during this dispatch.
    notices: Vec<(WidgetId, Notice)>,
}

impl<'a> EventCtx<'a> {
    /// Create a context for dispatching to `widget`.
    pub(crate) fn new(
        widget: WidgetId,
        open_menu: Option<WidgetId>,
        text: &'a dyn TextMeasure,
        theme: &'a Theme,
        clipboard: &'a mut dyn Clipboard,
        events: &'a mut VecDeque<UiEvent>,
    ) -> Self {
        Self {
            widget,
            open_menu,
            text,
            theme,
            clipboard,
            events,
            actions: Vec::new(),
            notices: Vec::new(),
        }
    }

    /// The widget this dispatch targets.
    #[inline]
    pub fn widget_id(&self) -> WidgetId {
        self.widget
    }

    /// The popup menu currently open on the desktop, if any.
    #[inline]
    pub fn open_menu(&self) -> Option<WidgetId> {
        self.open_menu
    }

    /// Get the text measurement interface.
    pub fn text(&self) -> &dyn TextMeasure {
        self.text
    }

    /// Get the active theme.
    pub fn theme(&self) -> &Theme {
        self.theme
    }

    /// Get the clipboard backend.
    pub fn clipboard(&mut self) -> &mut dyn Clipboard {
        self.clipboard
    }

    /// Push a notification onto the desktop's outbound queue.
    pub fn push_event(&mut self, event: UiEvent) {
        self.events.push_back(event);
    }

    /// Request keyboard focus for the current widget.
    pub fn request_focus(&mut self) {
        self.actions.push(DeferredAction::SetFocus(Some(self.widget)));
    }

    /// Ask the desktop to open `menu` as the popup, owned by the current
    /// widget.
    pub fn show_menu(&mut self, menu: WidgetId) {
        self.actions.push(DeferredAction::ShowMenu(menu));
    }

    /// Ask the desktop to close the open popup menu.
    pub fn close_menu(&mut self) {
        self.actions.push(DeferredAction::HideMenu);
    }

    /// Send a notice to another widget, delivered after this dispatch
    /// returns.
    pub fn send_notice(&mut self, target: WidgetId, notice: Notice) {
        self.notices.push((target, notice));
    }

    /// Drain the recorded actions and notices.
    pub(crate) fn take_deferred(&mut self) -> (Vec<DeferredAction>, Vec<(WidgetId, Notice)>) {
        (
            std::mem::take(&mut self.actions),
            std::mem::take(&mut self.notices),
        )
    }
}
