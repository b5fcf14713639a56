//! Shared constants for grid conversion
//!
//! This module centralizes the magic numbers used by the layout engine.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Grid
// =============================================================================

/// Columns of the page grid
pub const GRID_COLS: usize = 3;

/// Rows of the page grid
pub const GRID_ROWS: usize = 3;

/// Number of cells the grid can hold
pub const GRID_CELLS: usize = GRID_COLS * GRID_ROWS;

/// Default number of images placed on a page
pub const DEFAULT_IMAGES_PER_PAGE: usize = GRID_CELLS;

/// Upper bound accepted for images per page
pub const MAX_IMAGES_PER_PAGE: usize = 12;

// =============================================================================
// Framed Layout
// =============================================================================

/// Page margin of the framed layout (points)
pub const FRAMED_MARGIN_PT: f32 = 20.0;

/// Space kept free inside every framed cell (points)
pub const FRAMED_PADDING_PT: f32 = 10.0;

/// Largest enlargement applied to vector images in high quality mode
pub const MAX_UPSCALE_FACTOR: f32 = 2.0;

// =============================================================================
// Rendering
// =============================================================================

/// DPI handed to the PDF backend so that one source pixel maps to one point
pub const POINT_DPI: f32 = 72.0;

/// Tolerance used when comparing geometry
pub const GEOMETRY_EPSILON: f32 = 1e-3;

// =============================================================================
// Output
// =============================================================================

/// Title written into the document metadata
pub const DOCUMENT_TITLE: &str = "Image Grid";

/// Default output file stem for mixed image batches
pub const DEFAULT_OUTPUT_STEM: &str = "converted_images";

/// Default output file stem for SVG-only batches
pub const SVG_OUTPUT_STEM: &str = "converted_svgs";
