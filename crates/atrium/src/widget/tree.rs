//! Widget storage and tree traversals.
//!
//! [`WidgetTree`] pairs the structural registry from `atrium-core` with the
//! widgets themselves, stored as boxed trait objects in a secondary map
//! keyed by the same IDs. The traversals that give the tree its meaning
//! live here:
//!
//! - **Hit-testing** walks front-to-back: a child at index 0 is checked
//!   before its later siblings, and children before their parent.
//! - **Drawing** walks back-to-front, the exact reverse, so whatever would
//!   be hit first is painted last and therefore on top.
//!
//! Keeping the two walks as mirror images of one another is what makes
//! "what you click is what you see" hold for overlapping siblings.

use atrium_core::{TreeError, WidgetId, WidgetRegistry};
use atrium_render::{Point, Rect, Renderer, Size, TextMeasure};
use slotmap::SecondaryMap;

use super::context::LayoutCtx;
use super::traits::{PaintContext, Widget};
use crate::error::{WidgetError, WidgetResult};
use crate::style::Theme;

/// Owns the widgets and their parent/child structure.
///
/// IDs are stable handles: they survive any mutation except the despawn of
/// the widget itself, after which every operation on the ID reports
/// [`TreeError::InvalidWidgetId`].
pub struct WidgetTree {
    /// Parent/child structure and names.
    registry: WidgetRegistry,

    /// The widgets, keyed by the registry's IDs.
    widgets: SecondaryMap<WidgetId, Box<dyn Widget>>,
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            registry: WidgetRegistry::new(),
            widgets: SecondaryMap::new(),
        }
    }

    // =========================================================================
    // Spawning and Structure
    // =========================================================================

    /// Add a widget to the tree as a detached root.
    ///
    /// Returns the widget's ID, which is also written into its base.
    pub fn spawn(&mut self, mut widget: impl Widget + 'static, name: impl Into<String>) -> WidgetId {
        let id = self.registry.insert(name);
        widget.widget_base_mut().set_id(id);
        self.widgets.insert(id, Box::new(widget));
        id
    }

    /// Remove a widget and its whole subtree.
    ///
    /// Returns the removed IDs (the subtree in children-first order, the
    /// removed widget last). All returned IDs are invalid afterwards.
    pub fn despawn(&mut self, id: WidgetId) -> WidgetResult<Vec<WidgetId>> {
        let removed = self.registry.remove(id)?;
        for &gone in &removed {
            self.widgets.remove(gone);
        }
        Ok(removed)
    }

    /// Attach `child` as the back-most child of `parent`.
    pub fn attach(&mut self, child: WidgetId, parent: WidgetId) -> WidgetResult<()> {
        Ok(self.registry.attach(child, parent)?)
    }

    /// Attach `child` as the front-most child of `parent`.
    pub fn attach_front(&mut self, child: WidgetId, parent: WidgetId) -> WidgetResult<()> {
        Ok(self.registry.attach_front(child, parent)?)
    }

    /// Attach `child` at a specific position in `parent`'s child list.
    ///
    /// Position 0 is the front.
    pub fn attach_at(&mut self, child: WidgetId, parent: WidgetId, index: usize) -> WidgetResult<()> {
        Ok(self.registry.attach_at(child, parent, index)?)
    }

    /// Detach a widget from its parent, making it a root.
    ///
    /// Detaching a root is a no-op.
    pub fn detach(&mut self, child: WidgetId) -> WidgetResult<()> {
        Ok(self.registry.detach(child)?)
    }

    /// Move a widget to the front of its siblings.
    pub fn move_to_front(&mut self, id: WidgetId) -> WidgetResult<()> {
        Ok(self.registry.move_to_front(id)?)
    }

    /// Move a widget to the back of its siblings.
    pub fn move_to_back(&mut self, id: WidgetId) -> WidgetResult<()> {
        Ok(self.registry.move_to_back(id)?)
    }

    /// Read-only access to the structural registry (parents, children,
    /// names, ancestry queries).
    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    /// Check whether an ID refers to a live widget.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(id)
    }

    // =========================================================================
    // Widget Access
    // =========================================================================

    /// Get a widget by ID.
    pub fn widget(&self, id: WidgetId) -> WidgetResult<&dyn Widget> {
        self.widgets
            .get(id)
            .map(|w| w.as_ref())
            .ok_or_else(|| TreeError::InvalidWidgetId(id).into())
    }

    /// Get a widget by ID, mutably.
    pub fn widget_mut(&mut self, id: WidgetId) -> WidgetResult<&mut dyn Widget> {
        self.widgets
            .get_mut(id)
            .map(|w| &mut **w as &mut dyn Widget)
            .ok_or_else(|| TreeError::InvalidWidgetId(id).into())
    }

    /// Get a widget downcast to its concrete type.
    pub fn typed<W: Widget + 'static>(&self, id: WidgetId) -> WidgetResult<&W> {
        self.widget(id)?
            .as_any()
            .downcast_ref::<W>()
            .ok_or(WidgetError::WrongWidgetType {
                expected: std::any::type_name::<W>(),
            })
    }

    /// Get a widget downcast to its concrete type, mutably.
    pub fn typed_mut<W: Widget + 'static>(&mut self, id: WidgetId) -> WidgetResult<&mut W> {
        self.widget_mut(id)?
            .as_any_mut()
            .downcast_mut::<W>()
            .ok_or(WidgetError::WrongWidgetType {
                expected: std::any::type_name::<W>(),
            })
    }

    // =========================================================================
    // Coordinate Mapping
    // =========================================================================

    /// Get a widget's position in window coordinates.
    pub fn window_pos(&self, id: WidgetId) -> WidgetResult<Point> {
        let mut pos = self.widget(id)?.pos();
        for ancestor in self.registry.ancestors(id)? {
            let origin = self.widget(ancestor)?.pos();
            pos = pos.offset(origin.x, origin.y);
        }
        Ok(pos)
    }

    /// Get a widget's bounds in window coordinates.
    pub fn window_rect(&self, id: WidgetId) -> WidgetResult<Rect> {
        let pos = self.window_pos(id)?;
        Ok(Rect::from_origin(pos, self.widget(id)?.size()))
    }

    /// Map a window-coordinate point into a widget's local space.
    pub fn window_to_local(&self, id: WidgetId, point: Point) -> WidgetResult<Point> {
        let pos = self.window_pos(id)?;
        Ok(Point::new(point.x - pos.x, point.y - pos.y))
    }

    // =========================================================================
    // Hit-Testing
    // =========================================================================

    /// Find the front-most widget at a point.
    ///
    /// `point` is in the coordinate space `root`'s geometry lives in (its
    /// parent's space, or window space when `root` is a tree root).
    /// Children are consulted front-to-back before their parent claims the
    /// hit. Invisible and ignored widgets exclude their whole subtree.
    pub fn hit_test(&self, root: WidgetId, point: Point) -> WidgetResult<Option<WidgetId>> {
        let widget = self.widget(root)?;
        if !widget.widget_base().contains_point(point) {
            return Ok(None);
        }
        let local = widget.widget_base().map_from_parent(point);
        for &child in self.registry.children(root)? {
            if let Some(hit) = self.hit_test(child, local)? {
                return Ok(Some(hit));
            }
        }
        Ok(Some(root))
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Run the layout pass over a subtree, children before parents.
    ///
    /// Each widget sees the bounding extent of its (visible) children, so
    /// auto-sizing parents can wrap laid-out content.
    pub fn layout(&mut self, root: WidgetId, text: &dyn TextMeasure, theme: &Theme) -> WidgetResult<()> {
        let children = self.registry.children(root)?.to_vec();
        for &child in &children {
            self.layout(child, text, theme)?;
        }

        let mut extent = Size::ZERO;
        for &child in &children {
            let widget = self.widget(child)?;
            if widget.is_visible() {
                let geometry = widget.geometry();
                extent.width = extent.width.max(geometry.right());
                extent.height = extent.height.max(geometry.bottom());
            }
        }

        let ctx = LayoutCtx::new(text, theme, extent);
        self.widget_mut(root)?.layout(&ctx);
        Ok(())
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Draw a subtree, back-to-front.
    ///
    /// The renderer is translated and clipped to each widget's bounds
    /// before its `paint` runs; the background is filled first when the
    /// widget asks for it. Invisible widgets skip their whole subtree.
    pub fn draw(
        &self,
        root: WidgetId,
        renderer: &mut dyn Renderer,
        theme: &Theme,
        open_menu: Option<WidgetId>,
    ) -> WidgetResult<()> {
        let widget = self.widget(root)?;
        let base = widget.widget_base();
        if !base.is_visible() {
            return Ok(());
        }

        renderer.save();
        renderer.translate(base.pos().x, base.pos().y);
        renderer.clip_rect(base.rect());

        if base.draws_back() {
            let color = base.back_color().unwrap_or(theme.back.normal);
            renderer.fill_rect(base.rect(), color);
        }

        {
            let mut ctx = PaintContext::new(&mut *renderer, base.rect()).with_open_menu(open_menu);
            widget.paint(&mut ctx, theme);
        }

        for &child in self.registry.children(root)?.iter().rev() {
            self.draw(child, renderer, theme, open_menu)?;
        }

        renderer.restore();
        Ok(())
    }
}

impl std::fmt::Debug for WidgetTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetTree")
            .field("len", &self.registry.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::widgets::Container;
    use crate::widget::WidgetKind;

    fn setup() -> (WidgetTree, WidgetId) {
        let mut tree = WidgetTree::new();
        let mut root = Container::new();
        root.widget_base_mut()
            .set_geometry(Rect::new(0.0, 0.0, 200.0, 200.0));
        let root_id = tree.spawn(root, "root");
        (tree, root_id)
    }

    fn spawn_child(tree: &mut WidgetTree, parent: WidgetId, name: &str, rect: Rect) -> WidgetId {
        let mut child = Container::new();
        child.widget_base_mut().set_geometry(rect);
        let id = tree.spawn(child, name);
        tree.attach(id, parent).unwrap();
        id
    }

    #[test]
    fn test_spawn_assigns_id() {
        let (tree, root_id) = setup();
        assert_eq!(tree.widget(root_id).unwrap().id(), root_id);
        assert_eq!(tree.widget(root_id).unwrap().kind(), WidgetKind::Container);
    }

    #[test]
    fn test_despawn_invalidates_subtree() {
        let (mut tree, root_id) = setup();
        let a = spawn_child(&mut tree, root_id, "a", Rect::new(0.0, 0.0, 50.0, 50.0));
        let b = spawn_child(&mut tree, a, "b", Rect::new(0.0, 0.0, 10.0, 10.0));

        let removed = tree.despawn(a).unwrap();
        assert_eq!(removed, vec![b, a]);
        assert!(tree.widget(a).is_err());
        assert!(tree.widget(b).is_err());
        assert!(tree.widget(root_id).is_ok());
    }

    #[test]
    fn test_hit_prefers_front_sibling() {
        let (mut tree, root_id) = setup();
        // Attached in order: first child ends up in front of the second.
        let front = spawn_child(&mut tree, root_id, "front", Rect::new(10.0, 10.0, 60.0, 60.0));
        let back = {
            let mut child = Container::new();
            child
                .widget_base_mut()
                .set_geometry(Rect::new(10.0, 10.0, 60.0, 60.0));
            let id = tree.spawn(child, "back");
            tree.attach(id, root_id).unwrap();
            id
        };

        // Both cover the point; the front sibling wins.
        let hit = tree.hit_test(root_id, Point::new(20.0, 20.0)).unwrap();
        assert_eq!(hit, Some(front));

        tree.move_to_front(back).unwrap();
        let hit = tree.hit_test(root_id, Point::new(20.0, 20.0)).unwrap();
        assert_eq!(hit, Some(back));
    }

    #[test]
    fn test_hit_falls_through_to_parent() {
        let (mut tree, root_id) = setup();
        spawn_child(&mut tree, root_id, "child", Rect::new(10.0, 10.0, 20.0, 20.0));

        let hit = tree.hit_test(root_id, Point::new(150.0, 150.0)).unwrap();
        assert_eq!(hit, Some(root_id));
    }

    #[test]
    fn test_ignored_subtree_never_hits() {
        let (mut tree, root_id) = setup();
        let group = spawn_child(&mut tree, root_id, "group", Rect::new(0.0, 0.0, 100.0, 100.0));
        spawn_child(&mut tree, group, "inner", Rect::new(10.0, 10.0, 50.0, 50.0));

        tree.widget_mut(group).unwrap().widget_base_mut().set_ignore(true);

        // The inner child is covered by the ignored group, so the hit
        // falls through to the root.
        let hit = tree.hit_test(root_id, Point::new(20.0, 20.0)).unwrap();
        assert_eq!(hit, Some(root_id));
    }

    #[test]
    fn test_hidden_widget_never_hits() {
        let (mut tree, root_id) = setup();
        let child = spawn_child(&mut tree, root_id, "child", Rect::new(10.0, 10.0, 50.0, 50.0));
        tree.widget_mut(child).unwrap().set_visible(false);

        let hit = tree.hit_test(root_id, Point::new(20.0, 20.0)).unwrap();
        assert_eq!(hit, Some(root_id));
    }

    #[test]
    fn test_hit_point_translation_through_nesting() {
        let (mut tree, root_id) = setup();
        let outer = spawn_child(&mut tree, root_id, "outer", Rect::new(50.0, 50.0, 100.0, 100.0));
        let inner = spawn_child(&mut tree, outer, "inner", Rect::new(20.0, 20.0, 30.0, 30.0));

        // Window (75, 75) = outer-local (25, 25), inside inner.
        assert_eq!(tree.hit_test(root_id, Point::new(75.0, 75.0)).unwrap(), Some(inner));
        // Window (55, 55) = outer-local (5, 5), outside inner.
        assert_eq!(tree.hit_test(root_id, Point::new(55.0, 55.0)).unwrap(), Some(outer));
    }

    #[test]
    fn test_window_pos_accumulates_ancestors() {
        let (mut tree, root_id) = setup();
        let outer = spawn_child(&mut tree, root_id, "outer", Rect::new(50.0, 50.0, 100.0, 100.0));
        let inner = spawn_child(&mut tree, outer, "inner", Rect::new(20.0, 20.0, 30.0, 30.0));

        assert_eq!(tree.window_pos(inner).unwrap(), Point::new(70.0, 70.0));
        assert_eq!(
            tree.window_to_local(inner, Point::new(75.0, 80.0)).unwrap(),
            Point::new(5.0, 10.0)
        );
    }

    #[test]
    fn test_typed_downcast() {
        let (mut tree, root_id) = setup();
        assert!(tree.typed::<Container>(root_id).is_ok());

        let err = tree
            .typed::<crate::widget::widgets::Label>(root_id)
            .unwrap_err();
        assert!(matches!(err, WidgetError::WrongWidgetType { .. }));
    }
}
