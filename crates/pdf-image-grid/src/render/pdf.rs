//! printpdf backend

use crate::constants::{DOCUMENT_TITLE, POINT_DPI};
use crate::layout::Rect;
use crate::source::{RasterImage, VectorImage};
use crate::types::Result;
use printpdf::*;

use super::PageCanvas;

/// Canvas that builds a PDF document with printpdf
pub struct PdfCanvas {
    doc: PdfDocument,
    page_width_pt: f32,
    page_height_pt: f32,
    pages: Vec<Vec<Op>>,
}

impl PdfCanvas {
    pub fn new(page_size_pt: (f32, f32)) -> Self {
        let (page_width_pt, page_height_pt) = page_size_pt;
        Self {
            doc: PdfDocument::new(DOCUMENT_TITLE),
            page_width_pt,
            page_height_pt,
            pages: Vec::new(),
        }
    }

    fn current_ops(&mut self) -> &mut Vec<Op> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

impl PageCanvas for PdfCanvas {
    fn start_page(&mut self) {
        self.pages.push(Vec::new());
    }

    fn draw_vector(&mut self, image: &VectorImage, origin: (f32, f32), scale: f32) -> Result<()> {
        let size = image.size();
        let id = self.doc.add_xobject(&image.xobject);
        self.current_ops().push(Op::UseXobject {
            id,
            transform: placement_transform(origin, (size.width * scale, size.height * scale)),
        });
        Ok(())
    }

    fn draw_raster(&mut self, image: &RasterImage, dest: Rect) -> Result<()> {
        let raw = image.decode()?;
        // Images are scaled from their pixel size at POINT_DPI
        let scale = (dest.width / raw.width as f32, dest.height / raw.height as f32);
        let id = self.doc.add_image(&raw);
        self.current_ops().push(Op::UseXobject {
            id,
            transform: placement_transform((dest.x, dest.y), scale),
        });
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn finish(&mut self, compress: bool) -> Result<Vec<u8>> {
        let width = Mm::from(Pt(self.page_width_pt));
        let height = Mm::from(Pt(self.page_height_pt));

        self.doc.pages = self
            .pages
            .iter()
            .map(|ops| PdfPage::new(width, height, ops.clone()))
            .collect();

        let options = PdfSaveOptions {
            optimize: compress,
            ..Default::default()
        };
        let mut warnings = Vec::new();
        let bytes = self.doc.save(&options, &mut warnings);

        if !warnings.is_empty() {
            log::debug!("PDF writer reported {} warnings", warnings.len());
        }

        Ok(bytes)
    }
}

/// Translate to `origin`, then scale by `scale` per axis
fn placement_transform(origin: (f32, f32), scale: (f32, f32)) -> XObjectTransform {
    XObjectTransform {
        translate_x: Some(Pt(origin.0)),
        translate_y: Some(Pt(origin.1)),
        scale_x: Some(scale.0),
        scale_y: Some(scale.1),
        dpi: Some(POINT_DPI),
        ..Default::default()
    }
}
