//! Grid layout calculation
//!
//! This module handles the geometric layout of the image grid on a page:
//! cell dimensions, cell positions and the slot-to-cell mapping.

use crate::constants::{GRID_COLS, GRID_ROWS};
use crate::options::ConversionOptions;

use super::{GridLayout, GridPosition, Rect};

// =============================================================================
// Grid Creation
// =============================================================================

/// Divide the usable page area evenly into `cols x rows` cells.
///
/// The usable area is the page minus `margin_pt` on every side.
///
/// # Returns
/// `(cell_width, cell_height)` in points
pub fn cell_geometry(
    page_size_pt: (f32, f32),
    margin_pt: f32,
    cols: usize,
    rows: usize,
) -> (f32, f32) {
    let (page_width, page_height) = page_size_pt;
    let usable_width = page_width - 2.0 * margin_pt;
    let usable_height = page_height - 2.0 * margin_pt;

    (usable_width / cols as f32, usable_height / rows as f32)
}

/// Create the grid layout used by every page of a run.
pub fn create_grid_layout(options: &ConversionOptions) -> GridLayout {
    let margin = options.layout.margin_pt();
    let (cell_width_pt, cell_height_pt) = cell_geometry(
        options.page_size.dimensions_pt(),
        margin,
        GRID_COLS,
        GRID_ROWS,
    );

    GridLayout {
        cols: GRID_COLS,
        rows: GRID_ROWS,
        cell_width_pt,
        cell_height_pt,
        origin: (margin, margin),
    }
}

// =============================================================================
// Cell Calculations
// =============================================================================

/// Map a slot index within a page to its grid position.
///
/// Slots fill the grid row by row. Returns `None` for slots past the last cell.
pub fn grid_position(slot: usize, grid: &GridLayout) -> Option<GridPosition> {
    let pos = GridPosition::new(slot / grid.cols, slot % grid.cols);
    (pos.row < grid.rows).then_some(pos)
}

/// Calculate the bounds of a cell at the given grid position.
///
/// Row 0 is the top row; the returned rectangle uses PDF coordinates
/// (origin at the bottom-left of the page).
pub fn cell_bounds(grid: &GridLayout, pos: GridPosition) -> Rect {
    let (grid_x, grid_y) = grid.origin;

    let cell_x = grid_x + pos.col as f32 * grid.cell_width_pt;
    let cell_y = grid_y + (grid.rows - pos.row - 1) as f32 * grid.cell_height_pt;

    Rect::new(cell_x, cell_y, grid.cell_width_pt, grid.cell_height_pt)
}

// =============================================================================
// Tests
// =============================================================================
