//! Document writer
//!
//! Owns the page lifecycle of the output document:
//! `Empty -> HasPage(n) -> Saved`. The first page is implicit; it is opened
//! by the first draw, the first `new_page`, or `save` on an empty document.

use crate::layout::PlacementResult;
use crate::render::{PageCanvas, PdfCanvas};
use crate::source::ImageSource;
use crate::types::*;
use std::path::{Path, PathBuf};

/// Lifecycle state of a [`DocumentWriter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    /// Nothing drawn yet; page 1 is pending
    Empty,
    /// Page `n` (1-based) is open
    HasPage(usize),
    /// Output written; no further operations are valid
    Saved,
}

pub struct DocumentWriter<C: PageCanvas> {
    canvas: C,
    output_path: PathBuf,
    compress: bool,
    state: WriterState,
}

impl DocumentWriter<PdfCanvas> {
    /// Writer producing a PDF with pages of `page_size`
    pub fn pdf(output_path: impl Into<PathBuf>, page_size: PageSize, compress: bool) -> Self {
        Self::new(
            PdfCanvas::new(page_size.dimensions_pt()),
            output_path,
            compress,
        )
    }
}

impl<C: PageCanvas> DocumentWriter<C> {
    pub fn new(canvas: C, output_path: impl Into<PathBuf>, compress: bool) -> Self {
        Self {
            canvas,
            output_path: output_path.into(),
            compress,
            state: WriterState::Empty,
        }
    }

    pub fn state(&self) -> WriterState {
        self.state
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Pages opened so far
    pub fn page_count(&self) -> usize {
        self.canvas.page_count()
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// Close the current page and open the next one.
    pub fn new_page(&mut self) -> Result<()> {
        let current = self.ensure_page()?;
        self.canvas.start_page();
        self.state = WriterState::HasPage(current + 1);
        Ok(())
    }

    /// Draw `source` on the current page.
    pub fn draw(&mut self, source: &ImageSource, placement: &PlacementResult) -> Result<()> {
        self.ensure_page()?;
        source.draw(&mut self.canvas, placement)
    }

    /// Serialize the document and write it to the output path.
    pub fn save(&mut self) -> Result<()> {
        let pages = self.ensure_page()?;
        let bytes = self.canvas.finish(self.compress)?;

        std::fs::write(&self.output_path, bytes).map_err(|source| ConvertError::Write {
            path: self.output_path.clone(),
            source,
        })?;

        log::info!("Saved {} page(s) to {}", pages, self.output_path.display());
        self.state = WriterState::Saved;
        Ok(())
    }

    /// Open the implicit first page if needed and return the current page number.
    fn ensure_page(&mut self) -> Result<usize> {
        match self.state {
            WriterState::Saved => Err(ConvertError::AlreadySaved),
            WriterState::HasPage(n) => Ok(n),
            WriterState::Empty => {
                self.canvas.start_page();
                self.state = WriterState::HasPage(1);
                Ok(1)
            }
        }
    }
}
