//! Error types for the rendering interface.

use thiserror::Error;

/// Errors reported by renderer implementations.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A display list was taken while a frame was still open.
    #[error("frame still open: call end_frame before taking the display list")]
    FrameOpen,

    /// save/restore calls were unbalanced when the frame ended.
    #[error("unbalanced render state stack: {depth} save(s) without a matching restore")]
    UnbalancedState {
        /// Number of saves left on the stack.
        depth: usize,
    },
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
