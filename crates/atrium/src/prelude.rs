//! Prelude module for Atrium.
//!
//! Re-exports the most commonly used types for convenient importing:
//!
//! ```
//! use atrium::prelude::*;
//!
//! let desktop = Desktop::new(Size::new(640.0, 480.0));
//! assert!(desktop.focused().is_none());
//! ```

// ============================================================================
// Desktop and Widget Foundation
// ============================================================================

pub use crate::widget::{
    Desktop, EventCtx, LayoutCtx, PaintContext, Widget, WidgetBase, WidgetKind, WidgetTree,
};
pub use crate::{WidgetError, WidgetId, WidgetResult};

// ============================================================================
// Built-in Widgets
// ============================================================================

pub use crate::widget::widgets::{
    Button, CharFilter, ComboBox, Container, Label, ListBox, ListBoxText, ListEntry, MoveButton,
    Orientation, PopUpMenu, ScrollBar, TextArea, TextBox, TextButton,
};

// ============================================================================
// Events and Input
// ============================================================================

pub use crate::event::{Notice, UiEvent, WidgetEvent};
pub use crate::input::{Key, KeyboardModifiers, MouseButton};

// ============================================================================
// Styling and Clipboard
// ============================================================================

pub use crate::clipboard::{Clipboard, MemoryClipboard};
pub use crate::style::{Alignment, StateColors, Theme};

// ============================================================================
// Geometry and Rendering Types
// ============================================================================

pub use atrium_render::{
    Color, DisplayListRenderer, FixedMetrics, Font, Point, Rect, Renderer, Size, TextMeasure,
};
