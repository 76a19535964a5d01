//! Error types for the widget registry.

use std::fmt;

use crate::registry::WidgetId;

/// Errors that can occur during widget tree operations.
///
/// These are caller bugs, not runtime conditions: the correct response to any
/// of them is to fix the calling code, never to retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The widget ID is invalid or the widget has been removed.
    InvalidWidgetId(WidgetId),
    /// Attempted to attach a widget that is already in a child list.
    AlreadyAttached(WidgetId),
    /// Attempted to attach a widget to itself or one of its descendants.
    CircularAttachment,
    /// A child-list position was out of range.
    IndexOutOfRange {
        /// The requested position.
        index: usize,
        /// The length of the child list.
        len: usize,
    },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWidgetId(id) => write!(f, "Invalid or removed widget ID {id:?}"),
            Self::AlreadyAttached(id) => {
                write!(f, "Widget {id:?} is already attached; detach it first")
            }
            Self::CircularAttachment => {
                write!(f, "Cannot attach a widget to itself or one of its descendants")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "Child index {index} out of range for list of length {len}")
            }
        }
    }
}

impl std::error::Error for TreeError {}

/// Result type for widget tree operations.
pub type TreeResult<T> = std::result::Result<T, TreeError>;
