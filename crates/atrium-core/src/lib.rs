//! Core systems for Atrium.
//!
//! This crate provides the structural foundation of the Atrium widget
//! toolkit:
//!
//! - **Widget Registry**: arena-based tree storage with stable handles
//! - **Tree Errors**: the fail-fast precondition taxonomy for structure ops
//! - **Diagnostics**: tracing targets and a widget tree formatter
//!
//! The registry deliberately knows nothing about widget behavior. It stores
//! names and parent/child structure keyed by [`WidgetId`]; the toolkit crate
//! keeps the actual widget state in a secondary map under the same keys.
//!
//! # Example
//!
//! ```
//! use atrium_core::{TreeError, WidgetRegistry};
//!
//! let mut registry = WidgetRegistry::new();
//! let root = registry.insert("root");
//! let label = registry.insert("title");
//! registry.attach(label, root).unwrap();
//!
//! // A widget can only sit in one child list at a time
//! let other = registry.insert("other");
//! assert_eq!(
//!     registry.attach(label, other),
//!     Err(TreeError::AlreadyAttached(label)),
//! );
//!
//! // Front of the child list wins hit-testing and paints on top
//! registry.detach(label).unwrap();
//! registry.attach_front(label, other).unwrap();
//! assert_eq!(registry.children(other).unwrap()[0], label);
//! ```

mod error;
pub mod logging;
pub mod registry;

pub use error::{TreeError, TreeResult};
pub use logging::{TreeFormatOptions, TreeStyle, WidgetTreeDebug};
pub use registry::{WidgetId, WidgetRegistry};
