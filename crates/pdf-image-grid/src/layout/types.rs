//! Layout data types
//!
//! These types carry the geometry between pagination and rendering.

/// Cell address on the page grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    /// 0 is the top row
    pub row: usize,
    /// 0 is the left column
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Grid layout of one page
///
/// Every page of a run shares the same grid, so it is computed once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub cols: usize,
    pub rows: usize,
    pub cell_width_pt: f32,
    pub cell_height_pt: f32,
    /// Bottom-left corner of the grid area (x, y) in points
    pub origin: (f32, f32),
}

impl GridLayout {
    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }
}

/// Width and height in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when both sides are strictly positive and finite
    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Axis-aligned rectangle in page coordinates (points)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Bottom edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Where and how large an image is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementResult {
    /// Uniform scale applied to the intrinsic size
    pub scale: f32,
    /// Left edge of the drawn image
    pub origin_x: f32,
    /// Bottom edge of the drawn image
    pub origin_y: f32,
    pub scaled_width: f32,
    pub scaled_height: f32,
}

impl PlacementResult {
    /// Destination rectangle on the page
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.origin_x,
            self.origin_y,
            self.scaled_width,
            self.scaled_height,
        )
    }
}
