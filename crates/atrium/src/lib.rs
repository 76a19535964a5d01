//! Atrium: a retained-mode widget toolkit for embedding in host applications.
//!
//! Atrium owns a widget tree and its interaction state, but no window, no
//! event loop, and no GPU surface. The host feeds input into a [`Desktop`],
//! lets it paint through the [`Renderer`] trait, and drains the
//! [`UiEvent`]s the widgets produced. That makes the toolkit equally at
//! home inside a game overlay, an editor side panel, or a headless test.
//!
//! - [`widget`]: the [`Widget`] trait, the [`Desktop`] router, and the
//!   built-in widget set
//! - [`event`]: inbound widget events and outbound [`UiEvent`]s
//! - [`input`]: keys, mouse buttons, modifiers, and the input snapshot
//! - [`style`]: the [`Theme`] every widget paints with
//! - [`clipboard`]: clipboard backends for the text widgets
//!
//! # Example
//!
//! ```
//! use atrium::event::UiEvent;
//! use atrium::input::MouseButton;
//! use atrium::widget::widgets::Button;
//! use atrium::widget::{Desktop, Widget};
//! use atrium_render::{Point, Rect, Size};
//! use std::time::Duration;
//!
//! let mut desktop = Desktop::new(Size::new(640.0, 480.0));
//!
//! let mut button = Button::new();
//! button.widget_base_mut().set_geometry(Rect::new(10.0, 10.0, 80.0, 24.0));
//! let button_id = desktop.spawn(button, "ok");
//! desktop.attach(button_id, desktop.root())?;
//!
//! desktop.begin_frame(Duration::from_millis(16));
//! desktop.mouse_move(Point::new(40.0, 20.0))?;
//! desktop.mouse_press(MouseButton::Left)?;
//! desktop.mouse_release(MouseButton::Left)?;
//!
//! let events: Vec<_> = std::iter::from_fn(|| desktop.poll_event()).collect();
//! assert!(events.contains(&UiEvent::Clicked { widget: button_id }));
//! # Ok::<(), atrium::WidgetError>(())
//! ```
//!
//! # Feature Flags
//!
//! - `system-clipboard` (default): OS clipboard integration via `arboard`.
//!   Without it only the in-process [`MemoryClipboard`] is available.
//!
//! [`Desktop`]: widget::Desktop
//! [`Widget`]: widget::Widget
//! [`UiEvent`]: event::UiEvent
//! [`Theme`]: style::Theme
//! [`Renderer`]: atrium_render::Renderer
//! [`MemoryClipboard`]: clipboard::MemoryClipboard

pub mod clipboard;
pub mod error;
pub mod event;
pub mod input;
pub mod prelude;
pub mod style;
pub mod widget;

pub use atrium_core::{TreeError, WidgetId};
pub use error::{WidgetError, WidgetResult};

/// Rendering interface re-export.
pub mod render {
    pub use atrium_render::*;
}
