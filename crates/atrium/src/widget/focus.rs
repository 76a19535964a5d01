//! Tab-order navigation.
//!
//! Tab order is sibling order: the Tab key cycles focus through the
//! widgets sharing the focused widget's parent, front to back, wrapping at
//! the ends. Only widgets that stop on Tab participate; everything else is
//! skipped.

use atrium_core::WidgetId;

use super::tree::WidgetTree;
use crate::error::WidgetResult;

/// Find the next tab stop among `from`'s siblings.
///
/// Walks the sibling list starting after `from` (before it when
/// `backwards`), wrapping around, and returns the first visible,
/// non-ignored widget with the tab-stop flag. Returns `None` when `from`
/// is a root or no other sibling qualifies.
pub(crate) fn next_tab_stop(
    tree: &WidgetTree,
    from: WidgetId,
    backwards: bool,
) -> WidgetResult<Option<WidgetId>> {
    let Some(parent) = tree.registry().parent(from)? else {
        return Ok(None);
    };
    let siblings = tree.registry().children(parent)?;
    let Some(idx) = siblings.iter().position(|&s| s == from) else {
        return Ok(None);
    };

    let n = siblings.len();
    for step in 1..n {
        let j = if backwards {
            (idx + n - step) % n
        } else {
            (idx + step) % n
        };
        let candidate = siblings[j];
        let base = tree.widget(candidate)?.widget_base();
        if base.stops_on_tab() && base.is_visible() && !base.is_ignored() {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use atrium_render::Rect;

    use super::*;
    use crate::widget::widgets::Container;
    use crate::widget::Widget;

    fn spawn_stop(tree: &mut WidgetTree, parent: WidgetId, name: &str, stop: bool) -> WidgetId {
        let mut child = Container::new();
        child.widget_base_mut().set_geometry(Rect::new(0.0, 0.0, 10.0, 10.0));
        child.widget_base_mut().set_stop_on_tab(stop);
        let id = tree.spawn(child, name);
        tree.attach(id, parent).unwrap();
        id
    }

    fn setup() -> (WidgetTree, WidgetId) {
        let mut tree = WidgetTree::new();
        let root_id = tree.spawn(Container::new(), "root");
        (tree, root_id)
    }

    #[test]
    fn test_forward_cycle_wraps() {
        let (mut tree, root_id) = setup();
        let a = spawn_stop(&mut tree, root_id, "a", true);
        let b = spawn_stop(&mut tree, root_id, "b", true);
        let c = spawn_stop(&mut tree, root_id, "c", true);

        assert_eq!(next_tab_stop(&tree, a, false).unwrap(), Some(b));
        assert_eq!(next_tab_stop(&tree, b, false).unwrap(), Some(c));
        assert_eq!(next_tab_stop(&tree, c, false).unwrap(), Some(a));
    }

    #[test]
    fn test_backward_cycle_wraps() {
        let (mut tree, root_id) = setup();
        let a = spawn_stop(&mut tree, root_id, "a", true);
        let b = spawn_stop(&mut tree, root_id, "b", true);
        let c = spawn_stop(&mut tree, root_id, "c", true);

        assert_eq!(next_tab_stop(&tree, a, true).unwrap(), Some(c));
        assert_eq!(next_tab_stop(&tree, c, true).unwrap(), Some(b));
        assert_eq!(next_tab_stop(&tree, b, true).unwrap(), Some(a));
    }

    #[test]
    fn test_skips_non_stops_and_hidden() {
        let (mut tree, root_id) = setup();
        let a = spawn_stop(&mut tree, root_id, "a", true);
        spawn_stop(&mut tree, root_id, "plain", false);
        let hidden = spawn_stop(&mut tree, root_id, "hidden", true);
        let d = spawn_stop(&mut tree, root_id, "d", true);
        tree.widget_mut(hidden).unwrap().set_visible(false);

        assert_eq!(next_tab_stop(&tree, a, false).unwrap(), Some(d));
    }

    #[test]
    fn test_lone_stop_has_no_next() {
        let (mut tree, root_id) = setup();
        let a = spawn_stop(&mut tree, root_id, "a", true);
        spawn_stop(&mut tree, root_id, "plain", false);

        assert_eq!(next_tab_stop(&tree, a, false).unwrap(), None);
        assert_eq!(next_tab_stop(&tree, root_id, false).unwrap(), None);
    }
}
