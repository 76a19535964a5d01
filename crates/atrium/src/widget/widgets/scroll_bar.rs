//! Scroll bar widget.
//!
//! A scroll bar maps a content extent onto a track: the thumb's length is
//! the visible share of the content, its position the scroll offset's
//! share of what remains. Jump buttons at the ends step the offset, the
//! thumb drags, and the track pages.
//!
//! # Example
//!
//! ```
//! use atrium::widget::widgets::{Orientation, ScrollBar};
//!
//! let mut bar = ScrollBar::new(Orientation::Vertical);
//! bar.set_range(500.0);
//! bar.set_active_range(100.0);
//! bar.set_scroll(9999.0);
//! assert_eq!(bar.scroll(), 400.0); // clamped to range - active_range
//! ```

use std::any::Any;

use atrium_render::{Point, Rect};

use crate::event::{UiEvent, WidgetEvent};
use crate::input::Key;
use crate::style::Theme;
use crate::widget::{EventCtx, PaintContext, Widget, WidgetBase, WidgetKind};

/// Scroll bar orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Horizontal scroll bar (left to right).
    Horizontal,
    /// Vertical scroll bar (top to bottom).
    Vertical,
}

/// The part of the scroll bar at a given position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScrollBarPart {
    /// The decrement jump button (left/top).
    DecrementButton,
    /// The increment jump button (right/bottom).
    IncrementButton,
    /// The draggable thumb.
    Thumb,
    /// Track between the decrement button and the thumb.
    TrackBefore,
    /// Track between the thumb and the increment button.
    TrackAfter,
    /// Not on any part.
    None,
}

/// Minimum thumb length in pixels, so a huge range stays grabbable.
const MIN_THUMB: f32 = 8.0;

/// A scroll bar with two jump buttons and a proportional thumb.
///
/// `range` is the total content extent, `active_range` the visible
/// portion, and `scroll` the current offset in `0..=range - active_range`.
/// When the whole content fits (`active_range >= range`) the thumb fills
/// the track and nothing moves.
pub struct ScrollBar {
    /// Widget base for common functionality.
    base: WidgetBase,

    /// The scroll bar's orientation.
    orientation: Orientation,

    /// Total content extent, in content units.
    range: f32,

    /// Visible content extent, in content units.
    active_range: f32,

    /// Current scroll offset, clamped to `0..=max_scroll`.
    scroll: f32,

    /// Offset change per jump-button press, in content units.
    jump_amount: f32,

    /// While dragging, the grab offset from the thumb's leading edge.
    drag_grab: Option<f32>,

    /// The part a press is currently held on, for painting.
    pressed_part: Option<ScrollBarPart>,
}

impl ScrollBar {
    /// Create a new scroll bar.
    pub fn new(orientation: Orientation) -> Self {
        let mut base = WidgetBase::new();
        base.set_draw_back(false);

        Self {
            base,
            orientation,
            range: 0.0,
            active_range: 0.0,
            scroll: 0.0,
            jump_amount: 10.0,
            drag_grab: None,
            pressed_part: None,
        }
    }

    // =========================================================================
    // Range and Value
    // =========================================================================

    /// Get the orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Get the total content extent.
    pub fn range(&self) -> f32 {
        self.range
    }

    /// Set the total content extent. Re-clamps the offset.
    pub fn set_range(&mut self, range: f32) {
        self.range = range.max(0.0);
        self.scroll = self.clamp_scroll(self.scroll);
    }

    /// Get the visible content extent.
    pub fn active_range(&self) -> f32 {
        self.active_range
    }

    /// Set the visible content extent. Re-clamps the offset.
    pub fn set_active_range(&mut self, active_range: f32) {
        self.active_range = active_range.max(0.0);
        self.scroll = self.clamp_scroll(self.scroll);
    }

    /// Get the current scroll offset.
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Set the scroll offset, clamped to `0..=max_scroll`.
    pub fn set_scroll(&mut self, scroll: f32) {
        self.scroll = self.clamp_scroll(scroll);
    }

    /// The largest valid scroll offset.
    pub fn max_scroll(&self) -> f32 {
        (self.range - self.active_range).max(0.0)
    }

    /// Get the offset change per jump-button press.
    pub fn jump_amount(&self) -> f32 {
        self.jump_amount
    }

    /// Set the offset change per jump-button press.
    pub fn set_jump_amount(&mut self, amount: f32) {
        self.jump_amount = amount.max(0.0);
    }

    /// Set the jump amount using builder pattern.
    pub fn with_jump_amount(mut self, amount: f32) -> Self {
        self.set_jump_amount(amount);
        self
    }

    /// Check if the thumb is being dragged.
    pub fn is_dragging(&self) -> bool {
        self.drag_grab.is_some()
    }

    fn clamp_scroll(&self, scroll: f32) -> f32 {
        scroll.clamp(0.0, self.max_scroll())
    }

    /// Clamp, store, and report an offset change.
    fn apply_scroll(&mut self, scroll: f32, ctx: &mut EventCtx<'_>) {
        let clamped = self.clamp_scroll(scroll);
        if clamped != self.scroll {
            self.scroll = clamped;
            ctx.push_event(UiEvent::ScrollChanged {
                widget: self.base.id(),
                scroll: clamped,
            });
        }
    }

    // =========================================================================
    // Geometry Helpers
    // =========================================================================

    /// Position along the scroll axis.
    fn axis(&self, point: Point) -> f32 {
        match self.orientation {
            Orientation::Horizontal => point.x,
            Orientation::Vertical => point.y,
        }
    }

    /// Extent along the scroll axis.
    fn length(&self) -> f32 {
        match self.orientation {
            Orientation::Horizontal => self.base.width(),
            Orientation::Vertical => self.base.height(),
        }
    }

    /// Extent across the scroll axis; also the jump buttons' length.
    fn thickness(&self) -> f32 {
        match self.orientation {
            Orientation::Horizontal => self.base.height(),
            Orientation::Vertical => self.base.width(),
        }
    }

    /// Jump button length along the axis, shrunk when the bar is tiny.
    fn button_extent(&self) -> f32 {
        self.thickness().min(self.length() / 2.0)
    }

    /// Track length between the two buttons.
    fn track_length(&self) -> f32 {
        (self.length() - 2.0 * self.button_extent()).max(0.0)
    }

    /// A rectangle spanning `[start, start + extent)` along the axis and
    /// the full thickness across it.
    fn axis_rect(&self, start: f32, extent: f32) -> Rect {
        match self.orientation {
            Orientation::Horizontal => Rect::new(start, 0.0, extent, self.base.height()),
            Orientation::Vertical => Rect::new(0.0, start, self.base.width(), extent),
        }
    }

    /// Thumb length along the axis.
    fn thumb_length(&self) -> f32 {
        let track = self.track_length();
        if self.range <= 0.0 || self.active_range >= self.range {
            return track;
        }
        (track * self.active_range / self.range).clamp(MIN_THUMB.min(track), track)
    }

    /// Thumb leading edge along the axis.
    fn thumb_start(&self) -> f32 {
        let button = self.button_extent();
        let slack = self.track_length() - self.thumb_length();
        let max = self.max_scroll();
        if max <= 0.0 || slack <= 0.0 {
            return button;
        }
        button + slack * (self.scroll / max)
    }

    /// The thumb's rectangle in local coordinates.
    fn thumb_rect(&self) -> Rect {
        self.axis_rect(self.thumb_start(), self.thumb_length())
    }

    /// Classify a local position.
    fn hit_test(&self, point: Point) -> ScrollBarPart {
        if !self.base.rect().contains(point) {
            return ScrollBarPart::None;
        }
        let pos = self.axis(point);
        let button = self.button_extent();
        if pos < button {
            return ScrollBarPart::DecrementButton;
        }
        if pos >= self.length() - button {
            return ScrollBarPart::IncrementButton;
        }
        let thumb_start = self.thumb_start();
        if pos < thumb_start {
            ScrollBarPart::TrackBefore
        } else if pos < thumb_start + self.thumb_length() {
            ScrollBarPart::Thumb
        } else {
            ScrollBarPart::TrackAfter
        }
    }

    /// Invert the thumb-position formula: a thumb leading edge back to a
    /// scroll offset.
    fn position_to_scroll(&self, thumb_start: f32) -> f32 {
        let button = self.button_extent();
        let slack = self.track_length() - self.thumb_length();
        if slack <= 0.0 {
            return 0.0;
        }
        let clamped = (thumb_start - button).clamp(0.0, slack);
        self.max_scroll() * clamped / slack
    }

    // =========================================================================
    // Event Handlers
    // =========================================================================

    fn handle_mouse_press(&mut self, local_pos: Point, ctx: &mut EventCtx<'_>) {
        ctx.request_focus();
        let part = self.hit_test(local_pos);
        self.pressed_part = Some(part);
        match part {
            ScrollBarPart::DecrementButton => {
                self.apply_scroll(self.scroll - self.jump_amount, ctx);
            }
            ScrollBarPart::IncrementButton => {
                self.apply_scroll(self.scroll + self.jump_amount, ctx);
            }
            ScrollBarPart::Thumb => {
                if self.track_length() > self.thumb_length() {
                    self.drag_grab = Some(self.axis(local_pos) - self.thumb_start());
                }
            }
            ScrollBarPart::TrackBefore => {
                self.apply_scroll(self.scroll - self.active_range, ctx);
            }
            ScrollBarPart::TrackAfter => {
                self.apply_scroll(self.scroll + self.active_range, ctx);
            }
            ScrollBarPart::None => {}
        }
    }

    fn handle_mouse_move(&mut self, local_pos: Point, ctx: &mut EventCtx<'_>) {
        if let Some(grab) = self.drag_grab {
            let scroll = self.position_to_scroll(self.axis(local_pos) - grab);
            self.apply_scroll(scroll, ctx);
        }
    }

    fn handle_mouse_release(&mut self) {
        self.drag_grab = None;
        self.pressed_part = None;
    }

    fn handle_wheel(&mut self, delta: f32, ctx: &mut EventCtx<'_>) {
        // Wheel-up moves toward the start.
        self.apply_scroll(self.scroll - delta * self.jump_amount, ctx);
    }

    fn handle_key_press(&mut self, key: Key, ctx: &mut EventCtx<'_>) -> bool {
        let (decrement, increment) = match self.orientation {
            Orientation::Horizontal => (Key::ArrowLeft, Key::ArrowRight),
            Orientation::Vertical => (Key::ArrowUp, Key::ArrowDown),
        };
        if key == decrement {
            self.apply_scroll(self.scroll - self.jump_amount, ctx);
        } else if key == increment {
            self.apply_scroll(self.scroll + self.jump_amount, ctx);
        } else if key == Key::PageUp {
            self.apply_scroll(self.scroll - self.active_range, ctx);
        } else if key == Key::PageDown {
            self.apply_scroll(self.scroll + self.active_range, ctx);
        } else if key == Key::Home {
            self.apply_scroll(0.0, ctx);
        } else if key == Key::End {
            self.apply_scroll(self.max_scroll(), ctx);
        } else {
            return false;
        }
        true
    }

    // =========================================================================
    // Painting
    // =========================================================================

    fn paint_track(&self, ctx: &mut PaintContext<'_>, theme: &Theme) {
        let rect = ctx.rect();
        ctx.renderer().fill_rect(rect, theme.field_back);
    }

    fn paint_thumb(&self, ctx: &mut PaintContext<'_>, theme: &Theme) {
        let color = if self.drag_grab.is_some() {
            theme.back.pressed
        } else if self.base.is_hovered() {
            theme.back.hovered
        } else {
            theme.back.normal
        };
        ctx.renderer().fill_rect(self.thumb_rect().deflate(1.0), color);
    }

    fn paint_button(
        &self,
        ctx: &mut PaintContext<'_>,
        theme: &Theme,
        part: ScrollBarPart,
        rect: Rect,
    ) {
        let color = if self.pressed_part == Some(part) {
            theme.back.pressed
        } else {
            theme.back.normal
        };
        ctx.renderer().fill_rect(rect.deflate(1.0), color);

        // Chevron pointing out of the track.
        let center = rect.center();
        let arm = (self.thickness() / 4.0).max(2.0);
        let (a, tip, b) = match (self.orientation, part) {
            (Orientation::Horizontal, ScrollBarPart::DecrementButton) => (
                Point::new(center.x + arm / 2.0, center.y - arm),
                Point::new(center.x - arm / 2.0, center.y),
                Point::new(center.x + arm / 2.0, center.y + arm),
            ),
            (Orientation::Horizontal, _) => (
                Point::new(center.x - arm / 2.0, center.y - arm),
                Point::new(center.x + arm / 2.0, center.y),
                Point::new(center.x - arm / 2.0, center.y + arm),
            ),
            (Orientation::Vertical, ScrollBarPart::DecrementButton) => (
                Point::new(center.x - arm, center.y + arm / 2.0),
                Point::new(center.x, center.y - arm / 2.0),
                Point::new(center.x + arm, center.y + arm / 2.0),
            ),
            (Orientation::Vertical, _) => (
                Point::new(center.x - arm, center.y - arm / 2.0),
                Point::new(center.x, center.y + arm / 2.0),
                Point::new(center.x + arm, center.y - arm / 2.0),
            ),
        };
        ctx.renderer().draw_line(a, tip, theme.fore.normal, 1.0);
        ctx.renderer().draw_line(tip, b, theme.fore.normal, 1.0);
    }
}

impl Widget for ScrollBar {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::ScrollBar
    }

    fn paint(&self, ctx: &mut PaintContext<'_>, theme: &Theme) {
        self.paint_track(ctx, theme);
        let button = self.button_extent();
        self.paint_button(
            ctx,
            theme,
            ScrollBarPart::DecrementButton,
            self.axis_rect(0.0, button),
        );
        self.paint_button(
            ctx,
            theme,
            ScrollBarPart::IncrementButton,
            self.axis_rect(self.length() - button, button),
        );
        self.paint_thumb(ctx, theme);
    }

    fn event(&mut self, event: &mut WidgetEvent, ctx: &mut EventCtx<'_>) -> bool {
        match event {
            WidgetEvent::MousePress(e) => {
                let local_pos = e.local_pos;
                self.handle_mouse_press(local_pos, ctx);
                event.accept();
                true
            }
            WidgetEvent::MouseMove(e) => {
                let local_pos = e.local_pos;
                self.handle_mouse_move(local_pos, ctx);
                true
            }
            WidgetEvent::MouseRelease(_) => {
                self.handle_mouse_release();
                event.accept();
                true
            }
            WidgetEvent::Wheel(e) => {
                let delta = e.delta;
                self.handle_wheel(delta, ctx);
                event.accept();
                true
            }
            WidgetEvent::KeyPress(e) => {
                let key = e.key;
                if self.handle_key_press(key, ctx) {
                    event.accept();
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

static_assertions::assert_impl_all!(ScrollBar: Send);

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use atrium_render::FixedMetrics;

    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::event::{MouseMoveEvent, MousePressEvent, MouseReleaseEvent, WheelEvent};
    use crate::input::{KeyboardModifiers, MouseButton};

    /// Vertical bar: 16 wide, 132 tall. Buttons 16 each, track 100.
    fn setup() -> ScrollBar {
        let mut bar = ScrollBar::new(Orientation::Vertical);
        bar.widget_base_mut()
            .set_geometry(Rect::new(0.0, 0.0, 16.0, 132.0));
        bar.set_range(400.0);
        bar.set_active_range(100.0);
        bar
    }

    fn send(bar: &mut ScrollBar, event: &mut WidgetEvent, events: &mut VecDeque<UiEvent>) -> bool {
        let theme = Theme::default();
        let metrics = FixedMetrics::default();
        let mut clipboard = MemoryClipboard::new();
        let mut ctx = EventCtx::new(bar.base.id(), None, &metrics, &theme, &mut clipboard, events);
        bar.event(event, &mut ctx)
    }

    fn press_at(bar: &mut ScrollBar, at: Point, events: &mut VecDeque<UiEvent>) {
        let mut event = WidgetEvent::MousePress(MousePressEvent::new(
            MouseButton::Left,
            at,
            at,
            KeyboardModifiers::NONE,
        ));
        send(bar, &mut event, events);
    }

    #[test]
    fn test_thumb_proportions() {
        let bar = setup();
        // Visible 100 of 400 over a 100px track: thumb is a quarter.
        assert_eq!(bar.thumb_length(), 25.0);
        // scroll 0: thumb sits against the decrement button.
        assert_eq!(bar.thumb_start(), 16.0);
    }

    #[test]
    fn test_thumb_position_tracks_scroll() {
        let mut bar = setup();
        bar.set_scroll(150.0);
        // Slack is 75px for 300 units of scroll: 150 units = 37.5px.
        assert_eq!(bar.thumb_start(), 16.0 + 37.5);

        bar.set_scroll(300.0);
        assert_eq!(bar.thumb_start(), 16.0 + 75.0);
    }

    #[test]
    fn test_scroll_clamps_to_range() {
        let mut bar = setup();
        bar.set_scroll(1000.0);
        assert_eq!(bar.scroll(), 300.0);
        bar.set_scroll(-50.0);
        assert_eq!(bar.scroll(), 0.0);

        // Shrinking the range re-clamps.
        bar.set_scroll(300.0);
        bar.set_range(150.0);
        assert_eq!(bar.scroll(), 50.0);
    }

    #[test]
    fn test_degenerate_thumb_fills_track() {
        let mut bar = setup();
        bar.set_active_range(400.0);
        assert_eq!(bar.thumb_length(), bar.track_length());
        assert_eq!(bar.max_scroll(), 0.0);

        // Not draggable: pressing the thumb starts no drag.
        let mut events = VecDeque::new();
        press_at(&mut bar, Point::new(8.0, 60.0), &mut events);
        assert!(!bar.is_dragging());
    }

    #[test]
    fn test_jump_buttons_step_scroll() {
        let mut bar = setup().with_jump_amount(30.0);
        let mut events = VecDeque::new();

        // Increment button at the bottom.
        press_at(&mut bar, Point::new(8.0, 125.0), &mut events);
        assert_eq!(bar.scroll(), 30.0);
        assert!(events.contains(&UiEvent::ScrollChanged { widget: bar.base.id(), scroll: 30.0 }));

        // Decrement button at the top, clamped at zero.
        press_at(&mut bar, Point::new(8.0, 5.0), &mut events);
        assert_eq!(bar.scroll(), 0.0);
        press_at(&mut bar, Point::new(8.0, 5.0), &mut events);
        assert_eq!(bar.scroll(), 0.0);
    }

    #[test]
    fn test_track_press_pages() {
        let mut bar = setup();
        let mut events = VecDeque::new();

        // Below the thumb: page down by the visible extent.
        press_at(&mut bar, Point::new(8.0, 100.0), &mut events);
        assert_eq!(bar.scroll(), 100.0);
    }

    #[test]
    fn test_thumb_drag_recomputes_scroll() {
        let mut bar = setup();
        let mut events = VecDeque::new();

        // Grab the middle of the thumb (thumb at 16..41).
        press_at(&mut bar, Point::new(8.0, 28.0), &mut events);
        assert!(bar.is_dragging());

        // Drag down 37.5px: thumb start 53.5 over 75px slack = 150 units.
        let at = Point::new(8.0, 65.5);
        let mut event = WidgetEvent::MouseMove(MouseMoveEvent::new(
            at,
            at,
            0b001,
            KeyboardModifiers::NONE,
        ));
        send(&mut bar, &mut event, &mut events);
        assert_eq!(bar.scroll(), 150.0);

        // Dragging far past the end clamps at max.
        let at = Point::new(8.0, 500.0);
        let mut event = WidgetEvent::MouseMove(MouseMoveEvent::new(
            at,
            at,
            0b001,
            KeyboardModifiers::NONE,
        ));
        send(&mut bar, &mut event, &mut events);
        assert_eq!(bar.scroll(), 300.0);

        let mut event = WidgetEvent::MouseRelease(MouseReleaseEvent::new(
            MouseButton::Left,
            at,
            at,
            KeyboardModifiers::NONE,
        ));
        send(&mut bar, &mut event, &mut events);
        assert!(!bar.is_dragging());
    }

    #[test]
    fn test_wheel_steps_scroll() {
        let mut bar = setup().with_jump_amount(20.0);
        let mut events = VecDeque::new();

        let mut event = WidgetEvent::Wheel(WheelEvent::new(
            Point::new(8.0, 50.0),
            Point::new(8.0, 50.0),
            -2.0,
            KeyboardModifiers::NONE,
        ));
        send(&mut bar, &mut event, &mut events);
        assert_eq!(bar.scroll(), 40.0);
    }

    #[test]
    fn test_home_and_end_keys() {
        let mut bar = setup();
        let mut events = VecDeque::new();

        let mut event = WidgetEvent::KeyPress(crate::event::KeyPressEvent::new(
            Key::End,
            KeyboardModifiers::NONE,
        ));
        assert!(send(&mut bar, &mut event, &mut events));
        assert_eq!(bar.scroll(), 300.0);

        let mut event = WidgetEvent::KeyPress(crate::event::KeyPressEvent::new(
            Key::Home,
            KeyboardModifiers::NONE,
        ));
        assert!(send(&mut bar, &mut event, &mut events));
        assert_eq!(bar.scroll(), 0.0);
    }
}
