pub mod constants;
pub mod convert;
pub mod layout;
mod options;
pub mod render;
pub mod source;
mod types;
pub mod writer;

pub use convert::{
    ConversionEvent, ConversionHandle, EventSink, convert, convert_with, run_conversion,
    spawn_conversion,
};
pub use options::*;
pub use source::ImageSource;
pub use types::*;
pub use writer::{DocumentWriter, WriterState};
