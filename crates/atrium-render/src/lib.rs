//! Rendering interface for Atrium.
//!
//! This crate defines the boundary between the widget toolkit and the host's
//! graphics stack. The toolkit draws through the [`Renderer`] trait and
//! measures text through [`TextMeasure`]; implementing those two traits is
//! all a host needs to do to paint a widget tree with its own backend.
//!
//! For hosts that would rather consume draw commands than implement the
//! trait call-by-call, and for tests, [`DisplayListRenderer`] records a frame
//! into an inspectable [`DisplayList`].
//!
//! # Example
//!
//! ```
//! use atrium_render::{Color, DisplayListRenderer, Rect, Renderer, Size};
//!
//! let mut renderer = DisplayListRenderer::default();
//! renderer.begin_frame(Color::WHITE, Size::new(800.0, 600.0));
//!
//! renderer.save();
//! renderer.translate(200.0, 100.0);
//! renderer.fill_rect(Rect::new(0.0, 0.0, 80.0, 80.0), Color::BLUE);
//! renderer.restore();
//!
//! let stats = renderer.end_frame();
//! assert_eq!(stats.draw_calls, 1);
//! ```

mod display_list;
mod error;
mod font;
mod renderer;
mod types;

// Renderer API
pub use renderer::{FixedMetrics, FrameStats, RenderStateStack, Renderer, TextMeasure};

// Recorded frames
pub use display_list::{DisplayList, DisplayListRenderer, DrawCmd, DrawOp};

// Drawing types
pub use error::{RenderError, RenderResult};
pub use font::{Font, FontFamily, FontStyle, FontWeight};
pub use types::{Color, Point, Rect, Size};
