//! Widget tree storage.
//!
//! Provides arena-based storage for a widget hierarchy:
//! - Stable [`WidgetId`] handles via slotmap
//! - Parent/child links held as handle fields, never owning references
//! - Front-to-back sibling ordering with z-order operations
//! - Widget naming and lookup
//!
//! The registry stores structure only. Widget state lives beside it in a
//! secondary map owned by the toolkit crate, keyed by the same [`WidgetId`],
//! so structural traversal never needs access to widget internals.
//!
//! # Ordering
//!
//! A child list is ordered front-to-back: **index 0 is the front**, meaning
//! it wins hit-testing and paints on top. Callers that paint must therefore
//! iterate child lists in reverse so the front child is drawn last.
//!
//! # Key Types
//!
//! - [`WidgetId`] - Unique stable identifier for each widget
//! - [`WidgetRegistry`] - Owns the tree structure
//! - [`TreeError`](crate::TreeError) - Structural precondition violations

use slotmap::{SlotMap, new_key_type};

use crate::error::{TreeError, TreeResult};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a widget in the registry.
    ///
    /// `WidgetId`s are stable handles that remain valid as the tree is
    /// rearranged. They become invalid when the widget is removed; a stale
    /// id is reported as [`TreeError::InvalidWidgetId`], never reused.
    pub struct WidgetId;
}

/// Internal record stored for each widget.
#[derive(Debug, Default)]
struct NodeData {
    /// Human-readable name for debugging and lookup.
    name: String,
    /// Parent widget (if attached).
    parent: Option<WidgetId>,
    /// Child widgets, index 0 = front.
    children: Vec<WidgetId>,
}

/// Arena storage for the widget hierarchy.
///
/// The registry is an owned value, typically embedded in whatever type
/// drives the widget tree. It is deliberately not global and not internally
/// locked: all mutation happens from the single thread that owns it.
///
/// # Example
///
/// ```
/// use atrium_core::WidgetRegistry;
///
/// let mut registry = WidgetRegistry::new();
/// let root = registry.insert("root");
/// let child = registry.insert("child");
/// registry.attach(child, root).unwrap();
/// assert_eq!(registry.parent(child).unwrap(), Some(root));
/// ```
#[derive(Debug, Default)]
pub struct WidgetRegistry {
    nodes: SlotMap<WidgetId, NodeData>,
}

impl WidgetRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Insert a new detached widget node and return its ID.
    pub fn insert(&mut self, name: impl Into<String>) -> WidgetId {
        let name = name.into();
        let id = self.nodes.insert(NodeData {
            name: name.clone(),
            ..NodeData::default()
        });
        tracing::trace!(target: targets::REGISTRY, ?id, name, "inserted widget node");
        id
    }

    /// Remove a widget and its whole subtree.
    ///
    /// Returns every removed id (descendants first, the removed widget
    /// last), so callers can invalidate any state they keyed by those ids.
    pub fn remove(&mut self, id: WidgetId) -> TreeResult<Vec<WidgetId>> {
        let mut removed = self.descendants_postorder(id)?;
        removed.push(id);
        tracing::trace!(
            target: targets::REGISTRY,
            ?id,
            subtree_len = removed.len(),
            "removing widget subtree"
        );

        // Unlink from the parent's child list first.
        if let Some(parent) = self.nodes.get(id).and_then(|n| n.parent) {
            if let Some(parent_node) = self.nodes.get_mut(parent) {
                parent_node.children.retain(|&c| c != id);
            }
        }

        for &doomed in &removed {
            self.nodes.remove(doomed);
        }
        Ok(removed)
    }

    /// Check if a widget exists in the registry.
    #[inline]
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of widgets in the registry.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the registry is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // =========================================================================
    // Attachment
    // =========================================================================

    /// Attach a widget to the back of a parent's child list.
    ///
    /// New children join at the back, so widgets attached earlier stay in
    /// front of widgets attached later.
    pub fn attach(&mut self, child: WidgetId, parent: WidgetId) -> TreeResult<()> {
        let back = self.child_count(parent)?;
        self.attach_at(child, parent, back)
    }

    /// Attach a widget to the front (index 0) of a parent's child list.
    pub fn attach_front(&mut self, child: WidgetId, parent: WidgetId) -> TreeResult<()> {
        self.attach_at(child, parent, 0)
    }

    /// Attach a widget at a specific position in a parent's child list.
    ///
    /// `index` may equal the current child count (attach at the back).
    /// Fails with [`TreeError::AlreadyAttached`] if the child already has a
    /// parent; callers detach first. Attaching a widget to itself or to one
    /// of its own descendants fails with [`TreeError::CircularAttachment`].
    pub fn attach_at(&mut self, child: WidgetId, parent: WidgetId, index: usize) -> TreeResult<()> {
        if !self.nodes.contains_key(child) {
            return Err(TreeError::InvalidWidgetId(child));
        }
        if !self.nodes.contains_key(parent) {
            return Err(TreeError::InvalidWidgetId(parent));
        }
        if self.nodes[child].parent.is_some() {
            return Err(TreeError::AlreadyAttached(child));
        }
        if child == parent || self.is_ancestor_of(child, parent)? {
            return Err(TreeError::CircularAttachment);
        }

        let len = self.nodes[parent].children.len();
        if index > len {
            return Err(TreeError::IndexOutOfRange { index, len });
        }

        self.nodes[parent].children.insert(index, child);
        self.nodes[child].parent = Some(parent);
        tracing::trace!(target: targets::REGISTRY, ?child, ?parent, index, "attached widget");
        Ok(())
    }

    /// Detach a widget from its parent, leaving it in the registry as a
    /// free-floating node. Detaching an already-detached widget is a no-op.
    pub fn detach(&mut self, child: WidgetId) -> TreeResult<()> {
        let parent = self
            .nodes
            .get(child)
            .ok_or(TreeError::InvalidWidgetId(child))?
            .parent;

        if let Some(parent) = parent {
            if let Some(parent_node) = self.nodes.get_mut(parent) {
                parent_node.children.retain(|&c| c != child);
            }
            self.nodes[child].parent = None;
            tracing::trace!(target: targets::REGISTRY, ?child, ?parent, "detached widget");
        }
        Ok(())
    }

    // =========================================================================
    // Structure Queries
    // =========================================================================

    /// Get the parent of a widget.
    pub fn parent(&self, id: WidgetId) -> TreeResult<Option<WidgetId>> {
        self.nodes
            .get(id)
            .map(|n| n.parent)
            .ok_or(TreeError::InvalidWidgetId(id))
    }

    /// Get the children of a widget, front first.
    pub fn children(&self, id: WidgetId) -> TreeResult<&[WidgetId]> {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .ok_or(TreeError::InvalidWidgetId(id))
    }

    /// Number of children of a widget.
    pub fn child_count(&self, id: WidgetId) -> TreeResult<usize> {
        self.nodes
            .get(id)
            .map(|n| n.children.len())
            .ok_or(TreeError::InvalidWidgetId(id))
    }

    /// Get a widget's name.
    pub fn name(&self, id: WidgetId) -> TreeResult<&str> {
        self.nodes
            .get(id)
            .map(|n| n.name.as_str())
            .ok_or(TreeError::InvalidWidgetId(id))
    }

    /// Set a widget's name.
    pub fn set_name(&mut self, id: WidgetId, name: impl Into<String>) -> TreeResult<()> {
        self.nodes
            .get_mut(id)
            .map(|n| n.name = name.into())
            .ok_or(TreeError::InvalidWidgetId(id))
    }

    /// Check if `ancestor` is an ancestor of `id` (not counting `id` itself).
    pub fn is_ancestor_of(&self, ancestor: WidgetId, id: WidgetId) -> TreeResult<bool> {
        if !self.nodes.contains_key(id) {
            return Err(TreeError::InvalidWidgetId(id));
        }
        let mut current = self.nodes[id].parent;
        while let Some(current_id) = current {
            if current_id == ancestor {
                return Ok(true);
            }
            current = self.nodes.get(current_id).and_then(|n| n.parent);
        }
        Ok(false)
    }

    /// Get all ancestors of a widget from immediate parent to root.
    pub fn ancestors(&self, id: WidgetId) -> TreeResult<Vec<WidgetId>> {
        if !self.nodes.contains_key(id) {
            return Err(TreeError::InvalidWidgetId(id));
        }

        let mut result = Vec::new();
        let mut current = self.nodes[id].parent;
        while let Some(current_id) = current {
            result.push(current_id);
            current = self.nodes.get(current_id).and_then(|n| n.parent);
        }
        Ok(result)
    }

    /// Iterate over all widgets with no parent.
    pub fn roots(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(id, _)| id)
    }

    // =========================================================================
    // Z-Order
    // =========================================================================

    /// Get the index of a widget among its siblings (0 = front).
    ///
    /// Returns `None` for a detached widget.
    pub fn sibling_index(&self, id: WidgetId) -> TreeResult<Option<usize>> {
        let node = self.nodes.get(id).ok_or(TreeError::InvalidWidgetId(id))?;
        match node.parent {
            Some(parent) => {
                let parent_node = self
                    .nodes
                    .get(parent)
                    .ok_or(TreeError::InvalidWidgetId(parent))?;
                Ok(parent_node.children.iter().position(|&c| c == id))
            }
            None => Ok(None),
        }
    }

    /// Move a widget to the front of its sibling list (index 0).
    ///
    /// A front widget wins hit-testing and paints on top of its siblings.
    pub fn move_to_front(&mut self, id: WidgetId) -> TreeResult<()> {
        let node = self.nodes.get(id).ok_or(TreeError::InvalidWidgetId(id))?;
        if let Some(parent) = node.parent {
            let parent_node = self
                .nodes
                .get_mut(parent)
                .ok_or(TreeError::InvalidWidgetId(parent))?;
            parent_node.children.retain(|&c| c != id);
            parent_node.children.insert(0, id);
        }
        Ok(())
    }

    /// Move a widget to the back of its sibling list.
    pub fn move_to_back(&mut self, id: WidgetId) -> TreeResult<()> {
        let node = self.nodes.get(id).ok_or(TreeError::InvalidWidgetId(id))?;
        if let Some(parent) = node.parent {
            let parent_node = self
                .nodes
                .get_mut(parent)
                .ok_or(TreeError::InvalidWidgetId(parent))?;
            parent_node.children.retain(|&c| c != id);
            parent_node.children.push(id);
        }
        Ok(())
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Find a direct child by name.
    pub fn find_child_by_name(&self, id: WidgetId, name: &str) -> TreeResult<Option<WidgetId>> {
        for &child in self.children(id)? {
            if self.nodes.get(child).is_some_and(|n| n.name == name) {
                return Ok(Some(child));
            }
        }
        Ok(None)
    }

    /// Find the first descendant with the given name, searching depth-first
    /// in front-to-back order.
    pub fn find_descendant_by_name(&self, id: WidgetId, name: &str) -> TreeResult<Option<WidgetId>> {
        for &child in self.children(id)? {
            if self.nodes.get(child).is_some_and(|n| n.name == name) {
                return Ok(Some(child));
            }
            if let Some(found) = self.find_descendant_by_name(child, name)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// Collect all descendants of a widget, children before parents.
    pub fn descendants_postorder(&self, id: WidgetId) -> TreeResult<Vec<WidgetId>> {
        let mut result = Vec::new();
        self.descendants_postorder_recursive(id, &mut result)?;
        Ok(result)
    }

    fn descendants_postorder_recursive(
        &self,
        id: WidgetId,
        result: &mut Vec<WidgetId>,
    ) -> TreeResult<()> {
        let node = self.nodes.get(id).ok_or(TreeError::InvalidWidgetId(id))?;
        for &child in &node.children {
            self.descendants_postorder_recursive(child, result)?;
            result.push(child);
        }
        Ok(())
    }
}

static_assertions::assert_impl_all!(WidgetRegistry: Send);
static_assertions::assert_impl_all!(WidgetId: Send, Sync, Copy);

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (WidgetRegistry, WidgetId) {
        let mut registry = WidgetRegistry::new();
        let root = registry.insert("root");
        (registry, root)
    }

    #[test]
    fn test_insert_and_contains() {
        let (registry, root) = setup();
        assert!(registry.contains(root));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.name(root).unwrap(), "root");
    }

    #[test]
    fn test_attach_appends_to_back() {
        let (mut registry, root) = setup();
        let a = registry.insert("a");
        let b = registry.insert("b");

        registry.attach(a, root).unwrap();
        registry.attach(b, root).unwrap();

        // earlier attachment stays in front
        assert_eq!(registry.children(root).unwrap(), &[a, b]);
        assert_eq!(registry.sibling_index(a).unwrap(), Some(0));
        assert_eq!(registry.parent(b).unwrap(), Some(root));
    }

    #[test]
    fn test_attach_front() {
        let (mut registry, root) = setup();
        let a = registry.insert("a");
        let b = registry.insert("b");

        registry.attach(a, root).unwrap();
        registry.attach_front(b, root).unwrap();

        assert_eq!(registry.children(root).unwrap(), &[b, a]);
    }

    #[test]
    fn test_attach_twice_is_error() {
        let (mut registry, root) = setup();
        let a = registry.insert("a");
        let other = registry.insert("other");

        registry.attach(a, root).unwrap();
        assert_eq!(
            registry.attach(a, other),
            Err(TreeError::AlreadyAttached(a))
        );

        // detach then reattach is the supported path
        registry.detach(a).unwrap();
        registry.attach(a, other).unwrap();
        assert_eq!(registry.parent(a).unwrap(), Some(other));
    }

    #[test]
    fn test_attach_at_bounds() {
        let (mut registry, root) = setup();
        let a = registry.insert("a");
        let b = registry.insert("b");
        registry.attach(a, root).unwrap();

        assert_eq!(
            registry.attach_at(b, root, 2),
            Err(TreeError::IndexOutOfRange { index: 2, len: 1 })
        );
        registry.attach_at(b, root, 1).unwrap();
        assert_eq!(registry.children(root).unwrap(), &[a, b]);
    }

    #[test]
    fn test_circular_attachment_rejected() {
        let (mut registry, root) = setup();
        let a = registry.insert("a");
        let b = registry.insert("b");
        registry.attach(a, root).unwrap();
        registry.attach(b, a).unwrap();

        let free = registry.insert("free");
        assert_eq!(registry.attach(free, free), Err(TreeError::CircularAttachment));

        registry.detach(root).unwrap(); // root has no parent, no-op
        assert_eq!(
            registry.attach(root, b),
            Err(TreeError::CircularAttachment)
        );
    }

    #[test]
    fn test_detach_clears_links() {
        let (mut registry, root) = setup();
        let a = registry.insert("a");
        registry.attach(a, root).unwrap();

        registry.detach(a).unwrap();
        assert_eq!(registry.parent(a).unwrap(), None);
        assert!(registry.children(root).unwrap().is_empty());

        // idempotent
        registry.detach(a).unwrap();
    }

    #[test]
    fn test_remove_cascades() {
        let (mut registry, root) = setup();
        let a = registry.insert("a");
        let b = registry.insert("b");
        let grandchild = registry.insert("grandchild");
        registry.attach(a, root).unwrap();
        registry.attach(b, root).unwrap();
        registry.attach(grandchild, a).unwrap();

        let removed = registry.remove(a).unwrap();
        assert_eq!(removed, vec![grandchild, a]);

        assert!(!registry.contains(a));
        assert!(!registry.contains(grandchild));
        assert!(registry.contains(b));
        assert_eq!(registry.children(root).unwrap(), &[b]);
    }

    #[test]
    fn test_stale_id_reports_invalid() {
        let (mut registry, root) = setup();
        let a = registry.insert("a");
        registry.attach(a, root).unwrap();
        registry.remove(a).unwrap();

        assert_eq!(registry.parent(a), Err(TreeError::InvalidWidgetId(a)));
        assert_eq!(registry.children(a), Err(TreeError::InvalidWidgetId(a)));
    }

    #[test]
    fn test_move_to_front_and_back() {
        let (mut registry, root) = setup();
        let a = registry.insert("a");
        let b = registry.insert("b");
        let c = registry.insert("c");
        registry.attach(a, root).unwrap();
        registry.attach(b, root).unwrap();
        registry.attach(c, root).unwrap();

        registry.move_to_front(c).unwrap();
        assert_eq!(registry.children(root).unwrap(), &[c, a, b]);

        registry.move_to_back(c).unwrap();
        assert_eq!(registry.children(root).unwrap(), &[a, b, c]);
    }

    #[test]
    fn test_find_by_name() {
        let (mut registry, root) = setup();
        let a = registry.insert("panel");
        let nested = registry.insert("ok_button");
        registry.attach(a, root).unwrap();
        registry.attach(nested, a).unwrap();

        assert_eq!(registry.find_child_by_name(root, "panel").unwrap(), Some(a));
        assert_eq!(registry.find_child_by_name(root, "ok_button").unwrap(), None);
        assert_eq!(
            registry.find_descendant_by_name(root, "ok_button").unwrap(),
            Some(nested)
        );
    }

    #[test]
    fn test_ancestors() {
        let (mut registry, root) = setup();
        let a = registry.insert("a");
        let b = registry.insert("b");
        registry.attach(a, root).unwrap();
        registry.attach(b, a).unwrap();

        assert_eq!(registry.ancestors(b).unwrap(), vec![a, root]);
        assert!(registry.is_ancestor_of(root, b).unwrap());
        assert!(!registry.is_ancestor_of(b, root).unwrap());
    }

    #[test]
    fn test_roots() {
        let (mut registry, root) = setup();
        let floating = registry.insert("floating");
        let attached = registry.insert("attached");
        registry.attach(attached, root).unwrap();

        let mut roots: Vec<_> = registry.roots().collect();
        roots.sort();
        let mut expected = vec![root, floating];
        expected.sort();
        assert_eq!(roots, expected);
    }
}
