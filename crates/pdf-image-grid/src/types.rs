use crate::constants::{
    DEFAULT_OUTPUT_STEM, FRAMED_MARGIN_PT, FRAMED_PADDING_PT, SVG_OUTPUT_STEM, mm_to_pt,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("No files selected")]
    EmptyInput,
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Failed to load {file}: {reason}")]
    ImageLoad { file: String, reason: String },
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Document already saved")]
    AlreadySaved,
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ConvertError {
    /// Per-image failures are reported and skipped; everything else ends the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ConvertError::UnsupportedFormat(_) | ConvertError::ImageLoad { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Standard page sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageSize {
    #[default]
    A4,
    A3,
    A2,
    A1,
    A0,
    Letter,
    Legal,
}

impl PageSize {
    pub const ALL: [PageSize; 7] = [
        PageSize::A4,
        PageSize::A3,
        PageSize::A2,
        PageSize::A1,
        PageSize::A0,
        PageSize::Letter,
        PageSize::Legal,
    ];

    /// Portrait dimensions in millimeters
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::A3 => (297.0, 420.0),
            PageSize::A2 => (420.0, 594.0),
            PageSize::A1 => (594.0, 841.0),
            PageSize::A0 => (841.0, 1189.0),
            PageSize::Letter => (215.9, 279.4),
            PageSize::Legal => (215.9, 355.6),
        }
    }

    /// Portrait dimensions in points
    pub fn dimensions_pt(self) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        (mm_to_pt(w), mm_to_pt(h))
    }

    pub fn name(self) -> &'static str {
        match self {
            PageSize::A4 => "A4",
            PageSize::A3 => "A3",
            PageSize::A2 => "A2",
            PageSize::A1 => "A1",
            PageSize::A0 => "A0",
            PageSize::Letter => "Letter",
            PageSize::Legal => "Legal",
        }
    }
}

/// Source image format, resolved from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Svg,
    Png,
    Jpeg,
    WebP,
}

impl ImageKind {
    /// Resolve the format of a path by its (case-insensitive) extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "svg" => Some(ImageKind::Svg),
            "png" => Some(ImageKind::Png),
            "jpg" | "jpeg" => Some(ImageKind::Jpeg),
            "webp" => Some(ImageKind::WebP),
            _ => None,
        }
    }

    pub fn is_vector(self) -> bool {
        matches!(self, ImageKind::Svg)
    }

    pub fn label(self) -> &'static str {
        if self.is_vector() { "SVG" } else { "raster" }
    }
}

/// How the grid sits on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutStyle {
    /// Page margin and cell padding around SVG drawings; high quality mode
    /// may enlarge small drawings
    Framed,
    /// Cells cover the whole page edge to edge; accepts SVG and raster images
    #[default]
    Borderless,
}

impl LayoutStyle {
    pub fn margin_pt(self) -> f32 {
        match self {
            LayoutStyle::Framed => FRAMED_MARGIN_PT,
            LayoutStyle::Borderless => 0.0,
        }
    }

    pub fn padding_pt(self) -> f32 {
        match self {
            LayoutStyle::Framed => FRAMED_PADDING_PT,
            LayoutStyle::Borderless => 0.0,
        }
    }

    /// Whether this layout draws the given format
    pub fn accepts(self, kind: ImageKind) -> bool {
        match self {
            LayoutStyle::Framed => kind.is_vector(),
            LayoutStyle::Borderless => true,
        }
    }

    /// Whether high quality mode may enlarge images of this format
    pub fn upscales(self, kind: ImageKind) -> bool {
        self == LayoutStyle::Framed && kind.is_vector()
    }

    /// File stem callers use when they pick the output name
    pub fn default_output_stem(self) -> &'static str {
        match self {
            LayoutStyle::Framed => SVG_OUTPUT_STEM,
            LayoutStyle::Borderless => DEFAULT_OUTPUT_STEM,
        }
    }
}

/// One source image of a conversion run
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageEntry {
    pub path: PathBuf,
}

impl ImageEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Build entries from paths, dropping later duplicates of a path
    pub fn collect_unique<I, P>(paths: I) -> Vec<ImageEntry>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut seen = HashSet::new();
        paths
            .into_iter()
            .map(Into::into)
            .filter(|path: &PathBuf| seen.insert(path.clone()))
            .map(ImageEntry::new)
            .collect()
    }

    /// File name used in status messages
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn kind(&self) -> Option<ImageKind> {
        ImageKind::from_path(&self.path)
    }
}

/// Terminal outcome of a conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub success: bool,
    pub message: String,
    /// Counters of the run; all zero when it failed before drawing
    pub statistics: ConversionStatistics,
}

impl ConversionResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            statistics: ConversionStatistics::default(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            statistics: ConversionStatistics::default(),
        }
    }

    pub fn with_statistics(mut self, statistics: ConversionStatistics) -> Self {
        self.statistics = statistics;
        self
    }
}

/// Counters collected while a conversion runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversionStatistics {
    /// Entries handed to the run
    pub total: usize,
    /// Images placed on a page
    pub drawn: usize,
    /// Entries skipped for format or grid reasons
    pub skipped: usize,
    /// Entries that failed to load or draw
    pub failed: usize,
    /// Physical pages in the document
    pub pages: usize,
}
