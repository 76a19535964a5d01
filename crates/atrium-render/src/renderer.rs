//! Renderer and text-measurement traits.
//!
//! The widget toolkit never draws pixels itself. It emits drawing operations
//! through the [`Renderer`] trait and asks for text extents through
//! [`TextMeasure`]; the host supplies implementations backed by whatever
//! graphics and font stack it owns. [`DisplayListRenderer`] in this crate is
//! one such implementation, recording operations into an inspectable list.
//!
//! # Frame Lifecycle
//!
//! A typical frame looks like:
//!
//! ```ignore
//! renderer.begin_frame(clear_color, viewport_size);
//!
//! renderer.save();
//! renderer.translate(10.0, 10.0);
//! renderer.fill_rect(rect, Color::RED);
//! renderer.restore();
//!
//! let stats = renderer.end_frame();
//! ```
//!
//! # State Stack
//!
//! The renderer maintains a state stack of translation offset and clip
//! region, saved and restored as a unit. Clips only ever shrink: each
//! `clip_rect` intersects with the clip already in effect.
//!
//! [`DisplayListRenderer`]: crate::DisplayListRenderer

use crate::font::Font;
use crate::types::{Color, Point, Rect, Size};

/// Text extent queries.
///
/// Measurement must agree with how the renderer will later draw the same
/// text, since cursor placement and scrolling arithmetic in the toolkit is
/// derived entirely from these answers.
pub trait TextMeasure {
    /// Measure a single-line run of text in the given font.
    fn measure(&self, font: &Font, text: &str) -> Size;

    /// Height of one line of text in the given font, including leading.
    fn line_height(&self, font: &Font) -> f32;
}

/// Statistics from a frame render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Number of drawing operations submitted.
    pub draw_calls: u32,
    /// Number of operations dropped because they fell entirely outside the clip.
    pub culled: u32,
}

/// The 2D drawing interface the toolkit renders through.
///
/// Coordinates passed to drawing methods are local to the current
/// translation offset; implementations resolve them against the state stack.
pub trait Renderer: TextMeasure {
    /// Begin a new frame, cleared to the given color.
    fn begin_frame(&mut self, clear_color: Color, viewport_size: Size);

    /// End the current frame, returning its statistics.
    fn end_frame(&mut self) -> FrameStats;

    // =========================================================================
    // State Management
    // =========================================================================

    /// Save the current render state (offset and clip).
    fn save(&mut self);

    /// Restore the previously saved render state.
    fn restore(&mut self);

    /// Apply a translation to the current offset.
    fn translate(&mut self, tx: f32, ty: f32);

    /// Intersect the clip region with a rectangle (in local coordinates).
    fn clip_rect(&mut self, rect: Rect);

    /// Get the current clip bounds in device coordinates, if any.
    fn clip_bounds(&self) -> Option<Rect>;

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke the outline of a rectangle.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);

    /// Draw a line between two points.
    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32);

    /// Draw a single-line run of text with its top-left corner at `pos`.
    fn draw_text(&mut self, pos: Point, text: &str, font: &Font, color: Color);
}

/// Saved renderer state for save/restore operations.
#[derive(Debug, Clone, Copy, Default)]
struct RenderState {
    /// Accumulated translation offset.
    offset: (f32, f32),
    /// Clip rect in device coordinates.
    clip: Option<Rect>,
}

/// Common state management for renderers.
///
/// Reusable implementation of the offset/clip stack that [`Renderer`]
/// implementations can delegate to.
#[derive(Debug, Clone, Default)]
pub struct RenderStateStack {
    stack: Vec<RenderState>,
    current: RenderState,
}

impl RenderStateStack {
    /// Create a new state stack with identity offset and no clip.
    pub fn new() -> Self {
        Self::default()
    }

    /// Save the current state.
    pub fn save(&mut self) {
        self.stack.push(self.current);
    }

    /// Restore the previously saved state. A restore without a matching save
    /// is ignored.
    pub fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.current = state;
        }
    }

    /// Reset to default state and clear the stack.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.current = RenderState::default();
    }

    /// Apply a translation.
    #[inline]
    pub fn translate(&mut self, tx: f32, ty: f32) {
        self.current.offset.0 += tx;
        self.current.offset.1 += ty;
    }

    /// Intersect the clip with a rect given in local coordinates.
    pub fn clip_rect(&mut self, rect: Rect) {
        let device = self.to_device_rect(rect);
        self.current.clip = match self.current.clip {
            // A disjoint intersection leaves an empty clip that swallows
            // everything, not a cleared clip
            Some(existing) => existing.intersect(&device).or(Some(Rect::ZERO)),
            None => Some(device),
        };
    }

    /// Get the current clip bounds in device coordinates.
    #[inline]
    pub fn clip_bounds(&self) -> Option<Rect> {
        self.current.clip
    }

    /// Translate a local point into device coordinates.
    #[inline]
    pub fn to_device_point(&self, point: Point) -> Point {
        point.offset(self.current.offset.0, self.current.offset.1)
    }

    /// Translate a local rect into device coordinates.
    #[inline]
    pub fn to_device_rect(&self, rect: Rect) -> Rect {
        rect.offset(self.current.offset.0, self.current.offset.1)
    }

    /// Get the stack depth.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// Deterministic text metrics with a fixed advance per character.
///
/// Useful for tests and headless hosts: every character is `advance` pixels
/// wide regardless of font, so measurement arithmetic is exact.
///
/// # Example
///
/// ```
/// use atrium_render::{FixedMetrics, TextMeasure, Font};
///
/// let metrics = FixedMetrics::new(7.0, 14.0);
/// let size = metrics.measure(&Font::default(), "hello");
/// assert_eq!(size.width, 35.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedMetrics {
    advance: f32,
    line_height: f32,
}

impl FixedMetrics {
    /// Create metrics with the given per-character advance and line height.
    pub fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self::new(7.0, 14.0)
    }
}

impl TextMeasure for FixedMetrics {
    fn measure(&self, _font: &Font, text: &str) -> Size {
        Size::new(
            text.chars().count() as f32 * self.advance,
            self.line_height,
        )
    }

    fn line_height(&self, _font: &Font) -> f32 {
        self.line_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_stack_save_restore() {
        let mut stack = RenderStateStack::new();

        stack.translate(10.0, 20.0);
        stack.save();
        stack.translate(5.0, 5.0);

        assert_eq!(stack.to_device_point(Point::ZERO), Point::new(15.0, 25.0));

        stack.restore();
        assert_eq!(stack.to_device_point(Point::ZERO), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_clip_intersection() {
        let mut stack = RenderStateStack::new();

        stack.clip_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(stack.clip_bounds(), Some(Rect::new(0.0, 0.0, 100.0, 100.0)));

        stack.clip_rect(Rect::new(50.0, 50.0, 100.0, 100.0));
        assert_eq!(stack.clip_bounds(), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));
    }

    #[test]
    fn test_clip_respects_offset() {
        let mut stack = RenderStateStack::new();
        stack.translate(100.0, 0.0);
        stack.clip_rect(Rect::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(stack.clip_bounds(), Some(Rect::new(100.0, 0.0, 50.0, 50.0)));
    }

    #[test]
    fn test_disjoint_clip_is_empty_not_cleared() {
        let mut stack = RenderStateStack::new();
        stack.clip_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        stack.clip_rect(Rect::new(50.0, 50.0, 10.0, 10.0));
        assert_eq!(stack.clip_bounds(), Some(Rect::ZERO));
    }

    #[test]
    fn test_fixed_metrics() {
        let metrics = FixedMetrics::new(8.0, 16.0);
        let font = Font::default();
        assert_eq!(metrics.measure(&font, "abcd").width, 32.0);
        assert_eq!(metrics.measure(&font, "").width, 0.0);
        assert_eq!(metrics.line_height(&font), 16.0);
    }
}
