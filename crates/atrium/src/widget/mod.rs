//! Widget system for Atrium.
//!
//! This module provides the retained-mode widget architecture:
//!
//! - [`Widget`] trait: The base trait for all UI elements
//! - [`WidgetBase`]: Common state every widget embeds
//! - [`WidgetTree`]: Arena storage and parent/child structure
//! - [`Desktop`]: The event router and frame driver
//! - [`widgets`]: The built-in widget set
//!
//! # Overview
//!
//! Widgets live in a [`WidgetTree`] keyed by [`WidgetId`] handles. The
//! [`Desktop`] owns the tree, routes host input to the right widget, and
//! collects the [`UiEvent`]s widgets emit in response. Each widget
//! implements the [`Widget`] trait over an embedded [`WidgetBase`] that
//! handles geometry, visibility, and focus flags.
//!
//! # Creating a Widget
//!
//! ```
//! use atrium::style::Theme;
//! use atrium::widget::{
//!     EventCtx, PaintContext, Widget, WidgetBase, WidgetKind,
//! };
//! use atrium::event::{UiEvent, WidgetEvent};
//! use std::any::Any;
//!
//! struct Swatch {
//!     base: WidgetBase,
//! }
//!
//! impl Widget for Swatch {
//!     fn widget_base(&self) -> &WidgetBase {
//!         &self.base
//!     }
//!
//!     fn widget_base_mut(&mut self) -> &mut WidgetBase {
//!         &mut self.base
//!     }
//!
//!     fn kind(&self) -> WidgetKind {
//!         WidgetKind::Custom("Swatch")
//!     }
//!
//!     fn paint(&self, ctx: &mut PaintContext<'_>, theme: &Theme) {
//!         let rect = ctx.rect();
//!         ctx.renderer().fill_rect(rect, theme.selection);
//!     }
//!
//!     fn event(&mut self, event: &mut WidgetEvent, ctx: &mut EventCtx<'_>) -> bool {
//!         match event {
//!             WidgetEvent::MousePress(_) => {
//!                 ctx.push_event(UiEvent::Clicked {
//!                     widget: ctx.widget_id(),
//!                 });
//!                 event.accept();
//!                 true
//!             }
//!             _ => false,
//!         }
//!     }
//!
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//!
//!     fn as_any_mut(&mut self) -> &mut dyn Any {
//!         self
//!     }
//! }
//! ```
//!
//! # Coordinate Systems
//!
//! Widget geometry is stored relative to the parent. Events carry both a
//! widget-local and a window position; hit-testing walks the tree mapping
//! window coordinates down front-to-back, where a child's index 0 is the
//! frontmost sibling.
//!
//! [`WidgetId`]: atrium_core::WidgetId
//! [`UiEvent`]: crate::event::UiEvent

mod base;
mod context;
mod desktop;
mod focus;
mod traits;
mod tree;
pub mod widgets;

pub use base::WidgetBase;
pub use context::{EventCtx, LayoutCtx};
pub use desktop::Desktop;
pub use traits::{PaintContext, Widget, WidgetKind};
pub use tree::WidgetTree;
