//! Plain grouping widget.

use std::any::Any;

use atrium_render::Point;

use crate::event::Notice;
use crate::style::Theme;
use crate::widget::{EventCtx, LayoutCtx, PaintContext, Widget, WidgetBase, WidgetKind};

/// A widget that groups children without behavior of its own.
///
/// Containers establish a local coordinate space for their children and
/// optionally fill a background. A container owning a
/// [`MoveButton`](super::MoveButton) follows the handle's drag notices,
/// which is how draggable panels are assembled.
pub struct Container {
    /// Widget base for common functionality.
    base: WidgetBase,

    /// Whether layout shrinks/grows the height to wrap the children.
    auto_height: bool,
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Container {
    /// Create a new empty container.
    pub fn new() -> Self {
        Self {
            base: WidgetBase::new(),
            auto_height: false,
        }
    }

    /// Check if the container sizes its height to its children.
    pub fn auto_height(&self) -> bool {
        self.auto_height
    }

    /// Set whether layout sizes the height to wrap the children.
    pub fn set_auto_height(&mut self, auto_height: bool) {
        self.auto_height = auto_height;
    }

    /// Set auto-height using builder pattern.
    pub fn with_auto_height(mut self, auto_height: bool) -> Self {
        self.auto_height = auto_height;
        self
    }
}

impl Widget for Container {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Container
    }

    fn layout(&mut self, ctx: &LayoutCtx<'_>) {
        if self.auto_height {
            let width = self.base.width();
            self.base.resize(width, ctx.children_extent().height);
        }
    }

    fn paint(&self, _ctx: &mut PaintContext<'_>, _theme: &Theme) {
        // Background only, which the tree has already filled.
    }

    fn notice(&mut self, notice: Notice, _ctx: &mut EventCtx<'_>) {
        if let Notice::Dragged { delta } = notice {
            let pos = self.base.pos();
            self.base.set_pos(Point::new(pos.x + delta.x, pos.y + delta.y));
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

static_assertions::assert_impl_all!(Container: Send);

#[cfg(test)]
mod tests {
    use atrium_render::{FixedMetrics, Rect, Size};

    use super::*;

    #[test]
    fn test_auto_height_wraps_children() {
        let mut container = Container::new().with_auto_height(true);
        container
            .widget_base_mut()
            .set_geometry(Rect::new(0.0, 0.0, 100.0, 10.0));

        let theme = Theme::default();
        let metrics = FixedMetrics::default();
        let ctx = LayoutCtx::new(&metrics, &theme, Size::new(80.0, 64.0));
        container.layout(&ctx);

        assert_eq!(container.widget_base().size(), Size::new(100.0, 64.0));
    }

    #[test]
    fn test_drag_notice_moves_container() {
        let mut container = Container::new();
        container
            .widget_base_mut()
            .set_geometry(Rect::new(10.0, 20.0, 100.0, 50.0));

        let theme = Theme::default();
        let metrics = FixedMetrics::default();
        let mut clipboard = crate::clipboard::MemoryClipboard::new();
        let mut events = std::collections::VecDeque::new();
        let mut ctx = EventCtx::new(
            container.widget_base().id(),
            None,
            &metrics,
            &theme,
            &mut clipboard,
            &mut events,
        );

        container.notice(Notice::Dragged { delta: Point::new(5.0, -3.0) }, &mut ctx);
        assert_eq!(container.widget_base().pos(), Point::new(15.0, 17.0));
    }
}
