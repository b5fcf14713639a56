//! Layout calculation for the image grid
//!
//! This module handles all the geometric calculations for a conversion:
//! - Pagination (which image lands on which page and slot)
//! - Grid layout (cell dimensions and positions)
//! - Content placement (fit scale, upscale cap, centering)

mod grid;
mod paginate;
mod placement;
mod types;

pub use grid::*;
pub use paginate::*;
pub use placement::*;
pub use types::*;
