//! Content placement within cells
//!
//! Images keep their aspect ratio: the scale is the smaller of the two
//! axis ratios, so nothing is ever cropped. The scaled image is centered
//! in its cell.

use crate::constants::GEOMETRY_EPSILON;

use super::{PlacementResult, Rect, Size};

/// Calculate the placement of an image inside a cell.
///
/// # Arguments
/// * `cell` - The cell bounds
/// * `intrinsic` - Natural image size; `None` or a zero side falls back to
///   the cell size minus padding
/// * `padding_pt` - Space kept free inside the cell (split across both sides)
/// * `upscale_limit` - When set, enlargement beyond the natural size is capped
///   at this factor
pub fn place_in_cell(
    cell: &Rect,
    intrinsic: Option<Size>,
    padding_pt: f32,
    upscale_limit: Option<f32>,
) -> PlacementResult {
    let available = Size::new(
        (cell.width - padding_pt).max(0.0),
        (cell.height - padding_pt).max(0.0),
    );
    debug_assert!(available.is_drawable(), "cell smaller than its padding");

    let source = intrinsic
        .filter(|size| size.width > GEOMETRY_EPSILON && size.height > GEOMETRY_EPSILON)
        .unwrap_or(available);

    let scale = effective_scale(fit_scale(source, available), upscale_limit);

    let scaled_width = source.width * scale;
    let scaled_height = source.height * scale;

    PlacementResult {
        scale,
        origin_x: cell.x + (cell.width - scaled_width) / 2.0,
        origin_y: cell.y + (cell.height - scaled_height) / 2.0,
        scaled_width,
        scaled_height,
    }
}

/// Largest uniform scale that keeps `source` inside `target` on both axes.
pub fn fit_scale(source: Size, target: Size) -> f32 {
    let scale_w = target.width / source.width;
    let scale_h = target.height / source.height;
    scale_w.min(scale_h)
}

/// Apply the upscale cap to a fit scale.
///
/// Shrinking is never affected; enlargement stops at `limit`.
fn effective_scale(fit: f32, upscale_limit: Option<f32>) -> f32 {
    match upscale_limit {
        Some(limit) if fit > 1.0 => fit.min(limit.max(1.0)),
        _ => fit,
    }
}
