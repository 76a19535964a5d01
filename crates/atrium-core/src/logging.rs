//! Logging and debugging facilities.
//!
//! This module provides:
//! - `tracing` target names for filtering toolkit logs by subsystem
//! - Debug visualization for widget trees
//!
//! # Tracing Integration
//!
//! Atrium logs through the `tracing` crate. Install a subscriber in the host
//! to see output:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! # Debug Visualization
//!
//! Use [`WidgetTreeDebug`] to render the hierarchy in a human-readable form:
//!
//! ```
//! use atrium_core::{WidgetRegistry, WidgetTreeDebug};
//!
//! let mut registry = WidgetRegistry::new();
//! let root = registry.insert("root");
//! let tree = WidgetTreeDebug::new().format_subtree(&registry, root).unwrap();
//! assert!(tree.contains("root"));
//! ```

use std::fmt::Write as FmtWrite;

use crate::error::TreeResult;
use crate::registry::{WidgetId, WidgetRegistry};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "atrium_core";
    /// Widget registry target.
    pub const REGISTRY: &str = "atrium_core::registry";
}

/// Style options for widget tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
}

/// Configuration for widget tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show widget IDs.
    pub show_ids: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            max_depth: None,
        }
    }
}

/// Debug utility for visualizing widget trees.
#[derive(Debug, Clone, Default)]
pub struct WidgetTreeDebug {
    options: TreeFormatOptions,
}

impl WidgetTreeDebug {
    /// Create a new visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format every tree in the registry, one root after another.
    pub fn format_all(&self, registry: &WidgetRegistry) -> TreeResult<String> {
        let mut output = String::new();
        writeln!(output, "Widget Tree ({} total widgets):", registry.len())
            .expect("write to String");

        let mut roots: Vec<_> = registry.roots().collect();
        if roots.is_empty() {
            writeln!(output, "  (empty)").expect("write to String");
        } else {
            roots.sort();
            for root in roots {
                self.format_node(registry, root, "", true, 0, &mut output)?;
            }
        }
        Ok(output)
    }

    /// Format a single subtree.
    pub fn format_subtree(&self, registry: &WidgetRegistry, root: WidgetId) -> TreeResult<String> {
        let mut output = String::new();
        self.format_node(registry, root, "", true, 0, &mut output)?;
        Ok(output)
    }

    fn format_node(
        &self,
        registry: &WidgetRegistry,
        id: WidgetId,
        prefix: &str,
        is_last: bool,
        depth: usize,
        output: &mut String,
    ) -> TreeResult<()> {
        if let Some(max) = self.options.max_depth {
            if depth > max {
                return Ok(());
            }
        }

        let (branch, continuation) = match (depth, self.options.style) {
            (0, _) => ("", ""),
            (_, TreeStyle::Unicode) if is_last => ("└─ ", "   "),
            (_, TreeStyle::Unicode) => ("├─ ", "│  "),
            (_, TreeStyle::Ascii) if is_last => ("`- ", "   "),
            (_, TreeStyle::Ascii) => ("|- ", "|  "),
        };

        let name = registry.name(id)?;
        let name = if name.is_empty() { "(unnamed)" } else { name };
        if self.options.show_ids {
            writeln!(output, "{prefix}{branch}{name} [{id:?}]").expect("write to String");
        } else {
            writeln!(output, "{prefix}{branch}{name}").expect("write to String");
        }

        let children = registry.children(id)?.to_vec();
        let child_prefix = format!("{prefix}{continuation}");
        for (i, child) in children.iter().enumerate() {
            let last = i + 1 == children.len();
            self.format_node(registry, *child, &child_prefix, last, depth + 1, output)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (WidgetRegistry, WidgetId) {
        let mut registry = WidgetRegistry::new();
        let root = registry.insert("desktop");
        let panel = registry.insert("panel");
        let button = registry.insert("ok");
        registry.attach(panel, root).unwrap();
        registry.attach(button, panel).unwrap();
        (registry, root)
    }

    #[test]
    fn test_format_subtree_shows_hierarchy() {
        let (registry, root) = setup();
        let out = WidgetTreeDebug::new().format_subtree(&registry, root).unwrap();

        let desktop_line = out.lines().position(|l| l.contains("desktop")).unwrap();
        let panel_line = out.lines().position(|l| l.contains("panel")).unwrap();
        let ok_line = out.lines().position(|l| l.contains("ok")).unwrap();
        assert!(desktop_line < panel_line);
        assert!(panel_line < ok_line);
    }

    #[test]
    fn test_max_depth_limits_output() {
        let (registry, root) = setup();
        let debug = WidgetTreeDebug::with_options(TreeFormatOptions {
            max_depth: Some(1),
            ..Default::default()
        });
        let out = debug.format_subtree(&registry, root).unwrap();
        assert!(out.contains("panel"));
        assert!(!out.contains("ok"));
    }

    #[test]
    fn test_format_all_counts_widgets() {
        let (registry, _) = setup();
        let out = WidgetTreeDebug::new().format_all(&registry).unwrap();
        assert!(out.starts_with("Widget Tree (3 total widgets):"));
    }
}
