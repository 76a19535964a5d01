//! Widget base implementation.
//!
//! This module provides `WidgetBase`, the common state shared by all
//! widgets: identity, geometry, visibility, hit-test participation, and the
//! focus/hover flags the desktop router maintains.

use atrium_core::WidgetId;
use atrium_render::{Color, Point, Rect, Size};

/// The base implementation for all widgets.
///
/// Widget implementations include this as a field and delegate common
/// operations to it through the [`Widget`](super::Widget) trait's default
/// methods.
///
/// # Example
///
/// ```ignore
/// use atrium::widget::{Widget, WidgetBase, WidgetKind};
///
/// struct Badge {
///     base: WidgetBase,
///     count: u32,
/// }
///
/// impl Widget for Badge {
///     fn widget_base(&self) -> &WidgetBase { &self.base }
///     fn widget_base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
///     fn kind(&self) -> WidgetKind { WidgetKind::Custom("Badge") }
///     // ... paint
/// }
/// ```
#[derive(Debug)]
pub struct WidgetBase {
    /// The widget's identity in the tree. Assigned on spawn.
    id: WidgetId,

    /// The widget's geometry (position relative to parent and size).
    geometry: Rect,

    /// Whether the widget is visible.
    visible: bool,

    /// Whether the widget is skipped during hit-testing.
    ///
    /// An ignored widget excludes its whole subtree from hit-testing but
    /// still paints.
    ignore: bool,

    /// Whether the widget fills its background before painting content.
    draw_back: bool,

    /// Background override; `None` paints the theme background.
    back_color: Option<Color>,

    /// Whether Tab moves focus away from this widget instead of being
    /// forwarded to it.
    stop_on_tab: bool,

    /// Whether a rapid second press on this widget becomes a double-click.
    accepts_double_clicks: bool,

    /// Whether the widget currently has keyboard focus.
    focused: bool,

    /// Whether the cursor is currently over this widget.
    hovered: bool,

    /// The widget this one reports notices to, if any.
    owner: Option<WidgetId>,
}

impl Default for WidgetBase {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetBase {
    /// Create a new widget base with default flags.
    pub fn new() -> Self {
        Self {
            id: WidgetId::default(),
            geometry: Rect::ZERO,
            visible: true,
            ignore: false,
            draw_back: true,
            back_color: None,
            stop_on_tab: false,
            accepts_double_clicks: false,
            focused: false,
            hovered: false,
            owner: None,
        }
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Get the widget's tree identity.
    ///
    /// The null ID until the widget is spawned into a
    /// [`WidgetTree`](super::WidgetTree).
    #[inline]
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Assign the tree identity. Called once on spawn.
    pub(crate) fn set_id(&mut self, id: WidgetId) {
        self.id = id;
    }

    /// Get the owner widget this one reports notices to.
    #[inline]
    pub fn owner(&self) -> Option<WidgetId> {
        self.owner
    }

    /// Set the owner widget notices are routed to.
    pub fn set_owner(&mut self, owner: Option<WidgetId>) {
        self.owner = owner;
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Get the widget's geometry (position relative to parent, and size).
    #[inline]
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// Set the widget's geometry.
    pub fn set_geometry(&mut self, rect: Rect) {
        self.geometry = rect;
    }

    /// Get the widget's position relative to its parent.
    #[inline]
    pub fn pos(&self) -> Point {
        self.geometry.origin
    }

    /// Set the widget's position relative to its parent.
    pub fn set_pos(&mut self, pos: Point) {
        self.geometry.origin = pos;
    }

    /// Move the widget to the specified position.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.set_pos(Point::new(x, y));
    }

    /// Get the widget's size.
    #[inline]
    pub fn size(&self) -> Size {
        self.geometry.size
    }

    /// Set the widget's size.
    pub fn set_size(&mut self, size: Size) {
        self.geometry.size = size;
    }

    /// Resize the widget.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.set_size(Size::new(width, height));
    }

    /// Get the widget's width.
    #[inline]
    pub fn width(&self) -> f32 {
        self.geometry.size.width
    }

    /// Get the widget's height.
    #[inline]
    pub fn height(&self) -> f32 {
        self.geometry.size.height
    }

    /// Get a rectangle covering the widget's local coordinate space.
    ///
    /// Always positioned at (0, 0) with the widget's size.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_origin(Point::ZERO, self.geometry.size)
    }

    // =========================================================================
    // Visibility and Hit-Testing
    // =========================================================================

    /// Check if the widget is visible.
    ///
    /// A widget may be visible but still off screen if an ancestor is
    /// hidden.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Set whether the widget is visible.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Show the widget.
    pub fn show(&mut self) {
        self.set_visible(true);
    }

    /// Hide the widget.
    pub fn hide(&mut self) {
        self.set_visible(false);
    }

    /// Check if the widget is skipped during hit-testing.
    #[inline]
    pub fn is_ignored(&self) -> bool {
        self.ignore
    }

    /// Set whether the widget is skipped during hit-testing.
    ///
    /// Ignoring a container widget excludes its whole subtree.
    pub fn set_ignore(&mut self, ignore: bool) {
        self.ignore = ignore;
    }

    /// Check whether a point in parent coordinates hits this widget.
    ///
    /// Invisible and ignored widgets never hit.
    pub fn contains_point(&self, parent_point: Point) -> bool {
        !self.ignore && self.visible && self.geometry.contains(parent_point)
    }

    // =========================================================================
    // Background
    // =========================================================================

    /// Check if the widget fills its background before painting content.
    #[inline]
    pub fn draws_back(&self) -> bool {
        self.draw_back
    }

    /// Set whether the widget fills its background before painting content.
    pub fn set_draw_back(&mut self, draw_back: bool) {
        self.draw_back = draw_back;
    }

    /// Get the background color override.
    #[inline]
    pub fn back_color(&self) -> Option<Color> {
        self.back_color
    }

    /// Override the theme background color for this widget.
    pub fn set_back_color(&mut self, color: Option<Color>) {
        self.back_color = color;
    }

    // =========================================================================
    // Focus and Hover
    // =========================================================================

    /// Check whether Tab moves focus away from this widget.
    ///
    /// When false, Tab key presses are forwarded to the widget like any
    /// other key (multi-line editors insert indentation instead).
    #[inline]
    pub fn stops_on_tab(&self) -> bool {
        self.stop_on_tab
    }

    /// Set whether Tab moves focus away from this widget.
    pub fn set_stop_on_tab(&mut self, stop: bool) {
        self.stop_on_tab = stop;
    }

    /// Check whether a rapid second press becomes a double-click.
    #[inline]
    pub fn accepts_double_clicks(&self) -> bool {
        self.accepts_double_clicks
    }

    /// Set whether a rapid second press becomes a double-click.
    pub fn set_accepts_double_clicks(&mut self, accepts: bool) {
        self.accepts_double_clicks = accepts;
    }

    /// Check if the widget currently has keyboard focus.
    #[inline]
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    /// Set the focused state (used by the desktop router).
    pub(crate) fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Check if the cursor is currently over this widget.
    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Set the hover state (used by the desktop router).
    pub(crate) fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    // =========================================================================
    // Coordinate Mapping
    // =========================================================================

    /// Map a point from widget-local coordinates to parent coordinates.
    #[inline]
    pub fn map_to_parent(&self, point: Point) -> Point {
        Point::new(
            point.x + self.geometry.origin.x,
            point.y + self.geometry.origin.y,
        )
    }

    /// Map a point from parent coordinates to widget-local coordinates.
    #[inline]
    pub fn map_from_parent(&self, point: Point) -> Point {
        Point::new(
            point.x - self.geometry.origin.x,
            point.y - self.geometry.origin.y,
        )
    }
}
