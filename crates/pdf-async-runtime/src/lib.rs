use std::path::PathBuf;

mod worker;

pub use worker::worker_task;

// Re-export types from the library crate
pub use pdf_image_grid::{
    ConversionEvent, ConversionOptions, ConversionResult, ImageEntry, LayoutStyle, PageSize,
};

/// Commands sent from a front end to the worker
#[derive(Debug)]
pub enum PdfCommand {
    Convert {
        entries: Vec<ImageEntry>,
        options: ConversionOptions,
        output_path: PathBuf,
    },
    LoadConfig {
        path: PathBuf,
    },
    SaveConfig {
        options: ConversionOptions,
        path: PathBuf,
    },
}

/// Updates sent from the worker to the front end
#[derive(Debug, Clone, PartialEq)]
pub enum PdfUpdate {
    /// Event of the conversion writing `output_path`
    Conversion {
        output_path: PathBuf,
        event: ConversionEvent,
    },
    ConfigLoaded {
        options: ConversionOptions,
    },
    ConfigSaved {
        path: PathBuf,
    },
    Error {
        message: String,
    },
}
