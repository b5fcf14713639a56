//! Page canvases
//!
//! The document writer drives a [`PageCanvas`]; this module provides the
//! PDF backend and a recording backend that keeps draw calls in memory.

mod canvas;
mod pdf;

pub use canvas::*;
pub use pdf::PdfCanvas;
