use crate::layout::Rect;
use crate::source::{RasterImage, VectorImage};
use crate::types::Result;

/// Page-based drawing surface
///
/// Pages are opened in order with `start_page`; draw calls always target the
/// most recently opened page.
pub trait PageCanvas {
    /// Open a new, blank page
    fn start_page(&mut self);

    /// Render a vector drawing scaled uniformly by `scale`, with its
    /// bottom-left corner at `origin`
    fn draw_vector(&mut self, image: &VectorImage, origin: (f32, f32), scale: f32) -> Result<()>;

    /// Blit a raster image into `dest`, resampling as needed
    fn draw_raster(&mut self, image: &RasterImage, dest: Rect) -> Result<()>;

    /// Number of pages opened so far
    fn page_count(&self) -> usize;

    /// Serialize everything drawn so far
    fn finish(&mut self, compress: bool) -> Result<Vec<u8>>;
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Vector {
        name: String,
        origin: (f32, f32),
        scale: f32,
    },
    Raster {
        name: String,
        dest: Rect,
    },
}

impl DrawCommand {
    pub fn name(&self) -> &str {
        match self {
            DrawCommand::Vector { name, .. } | DrawCommand::Raster { name, .. } => name,
        }
    }
}

/// Canvas that keeps draw calls per page instead of producing PDF bytes
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pages: Vec<Vec<DrawCommand>>,
    compressed: Option<bool>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls grouped by page
    pub fn pages(&self) -> &[Vec<DrawCommand>] {
        &self.pages
    }

    /// Compression flag passed to `finish`, if it was called
    pub fn compressed(&self) -> Option<bool> {
        self.compressed
    }

    pub fn draw_count(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }

    fn current_page(&mut self) -> &mut Vec<DrawCommand> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

impl PageCanvas for RecordingCanvas {
    fn start_page(&mut self) {
        self.pages.push(Vec::new());
    }

    fn draw_vector(&mut self, image: &VectorImage, origin: (f32, f32), scale: f32) -> Result<()> {
        self.current_page().push(DrawCommand::Vector {
            name: image.name.clone(),
            origin,
            scale,
        });
        Ok(())
    }

    fn draw_raster(&mut self, image: &RasterImage, dest: Rect) -> Result<()> {
        self.current_page().push(DrawCommand::Raster {
            name: image.name.clone(),
            dest,
        });
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn finish(&mut self, compress: bool) -> Result<Vec<u8>> {
        self.compressed = Some(compress);
        Ok(Vec::new())
    }
}
