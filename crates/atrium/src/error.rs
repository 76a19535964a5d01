//! Error types for widget operations.

use atrium_core::TreeError;
use thiserror::Error;

/// Errors produced by widget and desktop operations.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// An index was outside the valid range for an item collection.
    #[error("index {index} out of range for {len} items")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The number of items available.
        len: usize,
    },

    /// The operation is not supported by this widget.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    /// A typed widget lookup found a widget of a different concrete type.
    #[error("widget is not a {expected}")]
    WrongWidgetType {
        /// The requested concrete type.
        expected: &'static str,
    },

    /// A value was not found among a widget's items.
    #[error("value not found: {0:?}")]
    UnknownValue(String),

    /// The system clipboard could not be opened.
    #[error("system clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    /// A widget tree operation failed.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Result alias for widget operations.
pub type WidgetResult<T> = Result<T, WidgetError>;
