//! Core widget traits.
//!
//! This module defines the [`Widget`] trait implemented by every widget,
//! the [`WidgetKind`] tag used for cheap kind checks without downcasting,
//! and the [`PaintContext`] handed to paint methods.

use std::any::Any;

use atrium_core::WidgetId;
use atrium_render::{Point, Rect, Renderer, Size};

use super::base::WidgetBase;
use super::context::{EventCtx, LayoutCtx};
use crate::event::{Notice, WidgetEvent};
use crate::style::Theme;

/// Identifies a widget's concrete kind without downcasting.
///
/// Kind checks are for routing decisions (is this a container? a popup
/// menu?); use [`WidgetTree::typed`](super::WidgetTree::typed) when the
/// concrete type's API is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    /// A plain grouping widget.
    Container,
    /// A static text widget.
    Label,
    /// A clickable colored button.
    Button,
    /// A clickable text button.
    TextButton,
    /// A draggable handle.
    MoveButton,
    /// A scroll bar.
    ScrollBar,
    /// A single-line text editor.
    TextBox,
    /// A multi-line text editor.
    TextArea,
    /// A transient item list.
    PopUpMenu,
    /// A drop-down selector.
    ComboBox,
    /// A scrollable selection list.
    ListBox,
    /// A host-defined widget.
    Custom(&'static str),
}

impl WidgetKind {
    /// Human-readable kind name, used in logs and debug output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Container => "Container",
            Self::Label => "Label",
            Self::Button => "Button",
            Self::TextButton => "TextButton",
            Self::MoveButton => "MoveButton",
            Self::ScrollBar => "ScrollBar",
            Self::TextBox => "TextBox",
            Self::TextArea => "TextArea",
            Self::PopUpMenu => "PopUpMenu",
            Self::ComboBox => "ComboBox",
            Self::ListBox => "ListBox",
            Self::Custom(name) => name,
        }
    }
}

/// Context passed to widget paint methods.
///
/// Provides access to the renderer and information about the widget being
/// painted. The renderer arrives translated so that (0, 0) is the widget's
/// top-left corner and clipped to the widget's bounds.
pub struct PaintContext<'a> {
    /// The renderer to paint with.
    renderer: &'a mut dyn Renderer,

    /// The widget's bounds in local coordinates (origin at 0,0).
    widget_rect: Rect,

    /// The popup menu currently open on the desktop, if any.
    open_menu: Option<WidgetId>,
}

impl<'a> PaintContext<'a> {
    /// Create a new paint context.
    pub fn new(renderer: &'a mut dyn Renderer, widget_rect: Rect) -> Self {
        Self {
            renderer,
            widget_rect,
            open_menu: None,
        }
    }

    /// Set the open popup menu.
    pub fn with_open_menu(mut self, open_menu: Option<WidgetId>) -> Self {
        self.open_menu = open_menu;
        self
    }

    /// Get the renderer.
    pub fn renderer(&mut self) -> &mut dyn Renderer {
        self.renderer
    }

    /// Get the widget's bounds in local coordinates.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.widget_rect
    }

    /// Get the widget's width.
    #[inline]
    pub fn width(&self) -> f32 {
        self.widget_rect.width()
    }

    /// Get the widget's height.
    #[inline]
    pub fn height(&self) -> f32 {
        self.widget_rect.height()
    }

    /// Get the widget's size.
    #[inline]
    pub fn size(&self) -> Size {
        self.widget_rect.size
    }

    /// The popup menu currently open on the desktop, if any.
    ///
    /// Widgets that own a menu use this to paint their open state without
    /// mirroring router bookkeeping.
    #[inline]
    pub fn open_menu(&self) -> Option<WidgetId> {
        self.open_menu
    }
}

/// The trait implemented by all widgets.
///
/// Required methods are [`widget_base`](Widget::widget_base),
/// [`widget_base_mut`](Widget::widget_base_mut), [`kind`](Widget::kind),
/// and [`paint`](Widget::paint); everything else has a default that
/// delegates to the base or does nothing.
pub trait Widget: Send {
    /// Get the widget base (common state).
    fn widget_base(&self) -> &WidgetBase;

    /// Get the widget base mutably.
    fn widget_base_mut(&mut self) -> &mut WidgetBase;

    /// The widget's kind tag.
    fn kind(&self) -> WidgetKind;

    /// Recompute derived geometry before a draw pass.
    ///
    /// Called bottom-up: children have already laid themselves out and
    /// their combined extent is available on the context. Auto-sizing
    /// widgets resize themselves here.
    fn layout(&mut self, _ctx: &LayoutCtx<'_>) {}

    /// Paint the widget.
    ///
    /// The renderer is already translated so that (0, 0) is the top-left
    /// corner of the widget, and clipped to its bounds. Use `ctx.rect()`
    /// for the full bounds. The background fill (when
    /// [`WidgetBase::draws_back`] is set) has already happened.
    fn paint(&self, ctx: &mut PaintContext<'_>, theme: &Theme);

    /// Handle an event dispatched by the desktop router.
    ///
    /// Return `true` if the event was handled.
    fn event(&mut self, _event: &mut WidgetEvent, _ctx: &mut EventCtx<'_>) -> bool {
        false
    }

    /// Handle a notice from an owned widget.
    ///
    /// Delivered after the event dispatch that produced the notice
    /// returns; see [`WidgetBase::set_owner`].
    fn notice(&mut self, _notice: Notice, _ctx: &mut EventCtx<'_>) {}

    /// The widget as `Any`, for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// The widget as mutable `Any`, for downcasting to the concrete type.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    // =========================================================================
    // Geometry (default implementations delegate to WidgetBase)
    // =========================================================================

    /// Get the widget's tree identity.
    fn id(&self) -> WidgetId {
        self.widget_base().id()
    }

    /// Get the widget's geometry (position relative to parent, and size).
    fn geometry(&self) -> Rect {
        self.widget_base().geometry()
    }

    /// Set the widget's geometry.
    fn set_geometry(&mut self, rect: Rect) {
        self.widget_base_mut().set_geometry(rect);
    }

    /// Get the widget's position relative to its parent.
    fn pos(&self) -> Point {
        self.widget_base().pos()
    }

    /// Get the widget's size.
    fn size(&self) -> Size {
        self.widget_base().size()
    }

    /// Get the widget's local-space rectangle (origin at 0,0).
    fn rect(&self) -> Rect {
        self.widget_base().rect()
    }

    // =========================================================================
    // State (default implementations delegate to WidgetBase)
    // =========================================================================

    /// Check if the widget is visible.
    fn is_visible(&self) -> bool {
        self.widget_base().is_visible()
    }

    /// Set whether the widget is visible.
    fn set_visible(&mut self, visible: bool) {
        self.widget_base_mut().set_visible(visible);
    }

    /// Check if the widget is skipped during hit-testing.
    fn is_ignored(&self) -> bool {
        self.widget_base().is_ignored()
    }

    /// Check if the widget currently has keyboard focus.
    fn has_focus(&self) -> bool {
        self.widget_base().has_focus()
    }

    /// Check if the cursor is currently over this widget.
    fn is_hovered(&self) -> bool {
        self.widget_base().is_hovered()
    }
}
