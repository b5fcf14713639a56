//! Image sources
//!
//! Every input file is opened as one of two variants. Both report an
//! intrinsic size and know how to put themselves on a page canvas; the
//! variant is chosen from the file extension.

use crate::layout::{PlacementResult, Size};
use crate::render::PageCanvas;
use crate::types::*;
use printpdf::{ExternalXObject, RawImage, Svg};
use std::io::Cursor;
use std::path::Path;

/// A loaded input image
#[derive(Debug, Clone)]
pub enum ImageSource {
    Vector(VectorImage),
    Raster(RasterImage),
}

impl ImageSource {
    /// Open an entry, dispatching on its extension.
    ///
    /// Unknown extensions yield `UnsupportedFormat`; unreadable or malformed
    /// files yield `ImageLoad`.
    pub fn open(entry: &ImageEntry) -> Result<Self> {
        let name = entry.display_name();
        let kind = entry
            .kind()
            .ok_or_else(|| ConvertError::UnsupportedFormat(name.clone()))?;

        match kind {
            ImageKind::Svg => VectorImage::load(&entry.path).map(ImageSource::Vector),
            ImageKind::Png | ImageKind::Jpeg | ImageKind::WebP => {
                RasterImage::load(&entry.path).map(ImageSource::Raster)
            }
        }
    }

    pub fn kind(&self) -> ImageKind {
        match self {
            ImageSource::Vector(_) => ImageKind::Svg,
            ImageSource::Raster(image) => image.kind,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ImageSource::Vector(image) => &image.name,
            ImageSource::Raster(image) => &image.name,
        }
    }

    /// Natural size in points
    pub fn intrinsic_size(&self) -> Option<Size> {
        match self {
            ImageSource::Vector(image) => Some(image.size),
            ImageSource::Raster(image) => Some(image.size),
        }
    }

    /// Draw the image at its computed placement.
    pub fn draw<C: PageCanvas + ?Sized>(
        &self,
        canvas: &mut C,
        placement: &PlacementResult,
    ) -> Result<()> {
        match self {
            ImageSource::Vector(image) => canvas.draw_vector(
                image,
                (placement.origin_x, placement.origin_y),
                placement.scale,
            ),
            ImageSource::Raster(image) => canvas.draw_raster(image, placement.rect()),
        }
    }
}

// =============================================================================
// Vector
// =============================================================================

/// SVG drawing converted into a reusable PDF form object
///
/// The form spans a unit square; the canvas scales it to the drawn size.
#[derive(Debug, Clone)]
pub struct VectorImage {
    pub name: String,
    pub(crate) xobject: ExternalXObject,
    size: Size,
}

impl VectorImage {
    pub fn load(path: &Path) -> Result<Self> {
        let name = file_name(path);
        let markup = std::fs::read_to_string(path).map_err(|e| load_error(&name, e))?;
        Self::parse(name, &markup)
    }

    /// Parse SVG markup; one user unit becomes one point
    pub fn parse(name: impl Into<String>, markup: &str) -> Result<Self> {
        let name = name.into();

        // printpdf only reports whole pixels, so measure the tree ourselves
        let tree = usvg::Tree::from_str(markup, &usvg::Options::default())
            .map_err(|e| load_error(&name, e))?;
        let size = Size::new(tree.size().width(), tree.size().height());
        if !size.is_drawable() {
            return Err(load_error(&name, "drawing has no area"));
        }

        let mut warnings = Vec::new();
        let mut xobject = Svg::parse(markup, &mut warnings).map_err(|e| load_error(&name, e))?;
        if !warnings.is_empty() {
            log::debug!("{}: {} SVG warnings", name, warnings.len());
        }

        // Without a pixel size printpdf applies the placement scale as is
        xobject.width = None;
        xobject.height = None;

        Ok(Self {
            name,
            xobject,
            size,
        })
    }

    /// Size in user units (points)
    pub fn size(&self) -> Size {
        self.size
    }
}

// =============================================================================
// Raster
// =============================================================================

/// PNG, JPEG or WebP file; pixels are decoded only when drawn
#[derive(Debug, Clone)]
pub struct RasterImage {
    pub name: String,
    pub kind: ImageKind,
    bytes: Vec<u8>,
    size: Size,
}

impl RasterImage {
    /// Read the file and probe its dimensions from the header.
    pub fn load(path: &Path) -> Result<Self> {
        let name = file_name(path);
        let kind = ImageKind::from_path(path)
            .filter(|kind| !kind.is_vector())
            .ok_or_else(|| ConvertError::UnsupportedFormat(name.clone()))?;
        let bytes = std::fs::read(path).map_err(|e| load_error(&name, e))?;
        Self::from_bytes(name, kind, bytes)
    }

    pub fn from_bytes(name: impl Into<String>, kind: ImageKind, bytes: Vec<u8>) -> Result<Self> {
        let name = name.into();
        let (width, height) = image::ImageReader::new(Cursor::new(&bytes))
            .with_guessed_format()
            .map_err(|e| load_error(&name, e))?
            .into_dimensions()
            .map_err(|e| load_error(&name, e))?;

        let size = Size::new(width as f32, height as f32);
        if !size.is_drawable() {
            return Err(load_error(&name, "image has no pixels"));
        }

        Ok(Self {
            name,
            kind,
            bytes,
            size,
        })
    }

    /// Size in points; one pixel becomes one point
    pub fn size(&self) -> Size {
        self.size
    }

    /// Fully decode the pixels for embedding.
    pub(crate) fn decode(&self) -> Result<RawImage> {
        let mut warnings = Vec::new();
        let raw = RawImage::decode_from_bytes(&self.bytes, &mut warnings)
            .map_err(|e| load_error(&self.name, e))?;
        if !warnings.is_empty() {
            log::debug!("{}: {} decode warnings", self.name, warnings.len());
        }
        Ok(raw)
    }
}

fn file_name(path: &Path) -> String {
    ImageEntry::new(path).display_name()
}

fn load_error(name: &str, reason: impl std::fmt::Display) -> ConvertError {
    ConvertError::ImageLoad {
        file: name.to_string(),
        reason: reason.to_string(),
    }
}
