//! A recording renderer that captures drawing operations into a list.
//!
//! [`DisplayListRenderer`] implements [`Renderer`] by resolving every call
//! against the state stack and appending a [`DrawOp`] with device-space
//! coordinates and the clip in effect at record time. Hosts replay the list
//! against their own graphics API; tests inspect it directly to assert paint
//! order and clipping.
//!
//! # Example
//!
//! ```
//! use atrium_render::{
//!     Color, DisplayListRenderer, DrawCmd, FixedMetrics, Rect, Renderer, Size,
//! };
//!
//! let mut renderer = DisplayListRenderer::new(FixedMetrics::default());
//! renderer.begin_frame(Color::WHITE, Size::new(640.0, 480.0));
//! renderer.fill_rect(Rect::new(10.0, 10.0, 50.0, 20.0), Color::RED);
//! renderer.end_frame();
//!
//! let list = renderer.finish().unwrap();
//! assert_eq!(list.ops().len(), 1);
//! assert!(matches!(list.ops()[0].cmd, DrawCmd::FillRect { .. }));
//! ```

use crate::error::{RenderError, RenderResult};
use crate::font::Font;
use crate::renderer::{FrameStats, RenderStateStack, Renderer, TextMeasure};
use crate::types::{Color, Point, Rect, Size};

/// A single drawing command in device coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill a rectangle with a solid color.
    FillRect { rect: Rect, color: Color },
    /// Stroke the outline of a rectangle.
    StrokeRect { rect: Rect, color: Color, width: f32 },
    /// Draw a line between two points.
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: f32,
    },
    /// Draw a single-line run of text with its top-left corner at `pos`.
    Text {
        pos: Point,
        text: String,
        font: Font,
        color: Color,
    },
}

/// A recorded drawing command plus the clip that was active when it was
/// issued. `clip` is in device coordinates; `None` means unclipped.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOp {
    pub cmd: DrawCmd,
    pub clip: Option<Rect>,
}

/// A complete recorded frame.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    clear_color: Color,
    viewport: Size,
    ops: Vec<DrawOp>,
}

impl DisplayList {
    /// The color the frame was cleared to.
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// The viewport size the frame was recorded for.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// The recorded operations, in paint order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Iterate the text runs in the list, in paint order.
    pub fn text_runs(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match &op.cmd {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Find the paint-order position of the first op whose text equals `text`.
    pub fn text_index(&self, text: &str) -> Option<usize> {
        self.ops.iter().position(|op| {
            matches!(&op.cmd, DrawCmd::Text { text: t, .. } if t == text)
        })
    }
}

/// A [`Renderer`] that records operations into a [`DisplayList`].
///
/// Operations that fall entirely outside the active clip are dropped at
/// record time and counted in [`FrameStats::culled`].
#[derive(Debug)]
pub struct DisplayListRenderer<M = crate::renderer::FixedMetrics> {
    metrics: M,
    state: RenderStateStack,
    list: DisplayList,
    frame_open: bool,
    stats: FrameStats,
}

impl<M: TextMeasure> DisplayListRenderer<M> {
    /// Create a recording renderer measuring text with `metrics`.
    pub fn new(metrics: M) -> Self {
        Self {
            metrics,
            state: RenderStateStack::new(),
            list: DisplayList::default(),
            frame_open: false,
            stats: FrameStats::default(),
        }
    }

    /// Take the recorded frame.
    ///
    /// Fails if the frame is still open or the save/restore stack is
    /// unbalanced, both of which indicate a bug in the caller's draw pass.
    pub fn finish(&mut self) -> RenderResult<DisplayList> {
        if self.frame_open {
            return Err(RenderError::FrameOpen);
        }
        if self.state.depth() != 0 {
            return Err(RenderError::UnbalancedState {
                depth: self.state.depth(),
            });
        }
        Ok(std::mem::take(&mut self.list))
    }

    /// Push an op, culling it when `bounds` misses the active clip entirely.
    fn record(&mut self, bounds: Rect, cmd: DrawCmd) {
        let clip = self.state.clip_bounds();
        if let Some(clip) = clip {
            if clip.intersect(&bounds).is_none() {
                self.stats.culled += 1;
                return;
            }
        }
        self.stats.draw_calls += 1;
        self.list.ops.push(DrawOp { cmd, clip });
    }
}

impl<M: TextMeasure> TextMeasure for DisplayListRenderer<M> {
    fn measure(&self, font: &Font, text: &str) -> Size {
        self.metrics.measure(font, text)
    }

    fn line_height(&self, font: &Font) -> f32 {
        self.metrics.line_height(font)
    }
}

impl<M: TextMeasure> Renderer for DisplayListRenderer<M> {
    fn begin_frame(&mut self, clear_color: Color, viewport_size: Size) {
        self.state.reset();
        self.list = DisplayList {
            clear_color,
            viewport: viewport_size,
            ops: Vec::new(),
        };
        self.stats = FrameStats::default();
        self.frame_open = true;
    }

    fn end_frame(&mut self) -> FrameStats {
        self.frame_open = false;
        tracing::trace!(
            draw_calls = self.stats.draw_calls,
            culled = self.stats.culled,
            "display list frame closed"
        );
        self.stats
    }

    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.state.translate(tx, ty);
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.state.clip_rect(rect);
    }

    fn clip_bounds(&self) -> Option<Rect> {
        self.state.clip_bounds()
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let rect = self.state.to_device_rect(rect);
        self.record(rect, DrawCmd::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        let rect = self.state.to_device_rect(rect);
        self.record(rect, DrawCmd::StrokeRect { rect, color, width });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32) {
        let from = self.state.to_device_point(from);
        let to = self.state.to_device_point(to);
        let bounds = Rect::new(
            from.x.min(to.x),
            from.y.min(to.y),
            (to.x - from.x).abs().max(width),
            (to.y - from.y).abs().max(width),
        );
        self.record(
            bounds,
            DrawCmd::Line {
                from,
                to,
                color,
                width,
            },
        );
    }

    fn draw_text(&mut self, pos: Point, text: &str, font: &Font, color: Color) {
        if text.is_empty() {
            return;
        }
        let pos = self.state.to_device_point(pos);
        let extent = self.metrics.measure(font, text);
        self.record(
            Rect::from_origin(pos, extent),
            DrawCmd::Text {
                pos,
                text: text.to_owned(),
                font: font.clone(),
                color,
            },
        );
    }
}

impl Default for DisplayListRenderer {
    fn default() -> Self {
        Self::new(crate::renderer::FixedMetrics::default())
    }
}

static_assertions::assert_impl_all!(DisplayList: Send);
static_assertions::assert_impl_all!(DisplayListRenderer: Send);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::FixedMetrics;

    fn setup() -> DisplayListRenderer {
        let mut renderer = DisplayListRenderer::default();
        renderer.begin_frame(Color::WHITE, Size::new(640.0, 480.0));
        renderer
    }

    #[test]
    fn test_records_in_device_coordinates() {
        let mut r = setup();
        r.save();
        r.translate(100.0, 50.0);
        r.fill_rect(Rect::new(10.0, 10.0, 20.0, 20.0), Color::RED);
        r.restore();
        r.end_frame();

        let list = r.finish().unwrap();
        assert_eq!(list.ops().len(), 1);
        match &list.ops()[0].cmd {
            DrawCmd::FillRect { rect, .. } => {
                assert_eq!(*rect, Rect::new(110.0, 60.0, 20.0, 20.0));
            }
            other => panic!("unexpected op: {other:?}"),
        }
    }

    #[test]
    fn test_clip_attached_to_ops() {
        let mut r = setup();
        r.save();
        r.clip_rect(Rect::new(0.0, 0.0, 50.0, 50.0));
        r.fill_rect(Rect::new(10.0, 10.0, 100.0, 100.0), Color::BLUE);
        r.restore();
        r.end_frame();

        let list = r.finish().unwrap();
        assert_eq!(list.ops()[0].clip, Some(Rect::new(0.0, 0.0, 50.0, 50.0)));
    }

    #[test]
    fn test_culls_fully_clipped_ops() {
        let mut r = setup();
        r.save();
        r.clip_rect(Rect::new(0.0, 0.0, 50.0, 50.0));
        r.fill_rect(Rect::new(200.0, 200.0, 10.0, 10.0), Color::BLUE);
        r.restore();
        let stats = r.end_frame();

        assert_eq!(stats.draw_calls, 0);
        assert_eq!(stats.culled, 1);
        assert!(r.finish().unwrap().ops().is_empty());
    }

    #[test]
    fn test_text_measured_for_culling() {
        let mut r = DisplayListRenderer::new(FixedMetrics::new(10.0, 20.0));
        r.begin_frame(Color::WHITE, Size::new(100.0, 100.0));
        r.save();
        r.clip_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        // 5 chars * 10px starts at x=95, so it still touches the clip
        r.draw_text(Point::new(95.0, 0.0), "hello", &Font::default(), Color::BLACK);
        r.restore();
        r.end_frame();

        let list = r.finish().unwrap();
        assert_eq!(list.text_runs().collect::<Vec<_>>(), vec!["hello"]);
    }

    #[test]
    fn test_finish_rejects_open_frame() {
        let mut r = setup();
        assert!(matches!(r.finish(), Err(RenderError::FrameOpen)));
    }

    #[test]
    fn test_finish_rejects_unbalanced_saves() {
        let mut r = setup();
        r.save();
        r.end_frame();
        assert!(matches!(
            r.finish(),
            Err(RenderError::UnbalancedState { depth: 1 })
        ));
    }

    #[test]
    fn test_paint_order_preserved() {
        let mut r = setup();
        r.draw_text(Point::ZERO, "below", &Font::default(), Color::BLACK);
        r.draw_text(Point::ZERO, "above", &Font::default(), Color::BLACK);
        r.end_frame();

        let list = r.finish().unwrap();
        assert!(list.text_index("below").unwrap() < list.text_index("above").unwrap());
    }
}
