//! Image grid conversion
//!
//! This module orchestrates a conversion run:
//! 1. Validate the input list and options
//! 2. Split the images into page batches
//! 3. Place every image in its grid cell
//! 4. Draw through the document writer and save
//!
//! Per-image problems are reported as status events and skipped. Only
//! validation and save failures end the run, and even those come back as a
//! failed [`ConversionResult`] rather than an error.

mod events;

pub use events::{ConversionEvent, EventSink};

use crate::constants::{GRID_CELLS, MAX_UPSCALE_FACTOR};
use crate::layout::{
    GridLayout, PlacementResult, SlotAssignment, cell_bounds, create_grid_layout, paginate,
    place_in_cell,
};
use crate::options::ConversionOptions;
use crate::render::PageCanvas;
use crate::source::ImageSource;
use crate::types::*;
use crate::writer::DocumentWriter;
use events::ProgressTracker;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const SUCCESS_MESSAGE: &str = "Conversion completed successfully!";

/// Convert `entries` into a PDF at `output_path`.
///
/// Blocks until the document is saved; run it off the caller's thread
/// (see [`spawn_conversion`]).
pub fn convert<S: EventSink>(
    entries: &[ImageEntry],
    output_path: impl Into<PathBuf>,
    options: &ConversionOptions,
    events: &mut S,
) -> ConversionResult {
    // The writer is only built for input that passed validation
    let outcome = preflight(entries, options).and_then(|()| {
        let mut writer = DocumentWriter::pdf(output_path, options.page_size, options.high_quality);
        run(entries, &mut writer, options, events)
    });
    report(outcome, events)
}

/// Convert `entries` through an existing writer.
pub fn convert_with<C: PageCanvas, S: EventSink>(
    entries: &[ImageEntry],
    writer: &mut DocumentWriter<C>,
    options: &ConversionOptions,
    events: &mut S,
) -> ConversionResult {
    let outcome = preflight(entries, options).and_then(|()| run(entries, writer, options, events));
    report(outcome, events)
}

fn preflight(entries: &[ImageEntry], options: &ConversionOptions) -> Result<()> {
    if entries.is_empty() {
        return Err(ConvertError::EmptyInput);
    }
    options.validate()
}

fn run<C: PageCanvas, S: EventSink>(
    entries: &[ImageEntry],
    writer: &mut DocumentWriter<C>,
    options: &ConversionOptions,
    events: &mut S,
) -> Result<ConversionStatistics> {
    if options.images_per_page != GRID_CELLS {
        log::warn!(
            "{} images per page on a {}-cell grid",
            options.images_per_page,
            GRID_CELLS
        );
        events.status(format!(
            "Warning: images per page is not {}. Layout may be unexpected.",
            GRID_CELLS
        ));
    }

    let grid = create_grid_layout(options);
    let mut progress = ProgressTracker::new(entries.len());
    let mut stats = ConversionStatistics {
        total: entries.len(),
        ..Default::default()
    };

    for batch in paginate(entries, options.images_per_page) {
        if !batch.is_first() {
            writer.new_page()?;
        }
        log::info!("Processing page {}", batch.page_number);
        events.status(format!("Processing page {}...", batch.page_number));

        for slot in batch.slots(&grid) {
            let name = slot.item.display_name();
            match process_slot(&slot, &grid, writer, options) {
                Ok((source, placement)) => {
                    stats.drawn += 1;
                    events.status(format!(
                        "Processed: {} ({} scale: {:.2}x)",
                        name,
                        source.kind().label(),
                        placement.scale
                    ));
                }
                Err(SlotError::NoCell) => {
                    stats.skipped += 1;
                    events.status(format!(
                        "Skipped: {} (no free cell on page {})",
                        name, batch.page_number
                    ));
                }
                Err(SlotError::Convert(ConvertError::UnsupportedFormat(_))) => {
                    stats.skipped += 1;
                    events.status(format!("Skipped: {} (unsupported format)", name));
                }
                Err(SlotError::Convert(e)) if e.is_recoverable() => {
                    stats.failed += 1;
                    log::warn!("{}", e);
                    events.status(format!("Error processing {}: {}", name, failure_reason(&e)));
                }
                Err(SlotError::Convert(e)) => return Err(e),
            }
            progress.advance(events);
        }
    }

    writer.save()?;
    stats.pages = writer.page_count();
    log::info!(
        "Converted {} of {} images onto {} page(s)",
        stats.drawn,
        stats.total,
        stats.pages
    );
    Ok(stats)
}

enum SlotError {
    /// Slot lies outside the grid
    NoCell,
    Convert(ConvertError),
}

impl From<ConvertError> for SlotError {
    fn from(e: ConvertError) -> Self {
        SlotError::Convert(e)
    }
}

/// Load, place and draw the image of one slot.
fn process_slot<C: PageCanvas>(
    slot: &SlotAssignment<'_, ImageEntry>,
    grid: &GridLayout,
    writer: &mut DocumentWriter<C>,
    options: &ConversionOptions,
) -> std::result::Result<(ImageSource, PlacementResult), SlotError> {
    let pos = slot.grid_pos.ok_or(SlotError::NoCell)?;

    let kind = slot
        .item
        .kind()
        .filter(|kind| options.layout.accepts(*kind))
        .ok_or_else(|| ConvertError::UnsupportedFormat(slot.item.display_name()))?;

    let source = ImageSource::open(slot.item)?;

    let upscale_limit = (options.high_quality && options.layout.upscales(kind))
        .then_some(MAX_UPSCALE_FACTOR);
    let placement = place_in_cell(
        &cell_bounds(grid, pos),
        source.intrinsic_size(),
        options.layout.padding_pt(),
        upscale_limit,
    );

    writer.draw(&source, &placement)?;
    Ok((source, placement))
}

fn failure_reason(e: &ConvertError) -> String {
    match e {
        ConvertError::ImageLoad { reason, .. } => reason.clone(),
        other => other.to_string(),
    }
}

/// Turn the run outcome into the terminal result and emit it.
fn report<S: EventSink>(
    outcome: Result<ConversionStatistics>,
    events: &mut S,
) -> ConversionResult {
    let result = match outcome {
        Ok(stats) => ConversionResult::success(SUCCESS_MESSAGE).with_statistics(stats),
        Err(e) => {
            log::error!("Conversion failed: {}", e);
            ConversionResult::failure(format!("Conversion failed: {}", e))
        }
    };
    events.emit(ConversionEvent::Complete(result.clone()));
    result
}

// =============================================================================
// Background Execution
// =============================================================================

/// Run a conversion on the blocking thread pool, streaming events to `events`.
///
/// If the blocking task dies, a failed completion is still delivered through
/// a clone of the sink.
pub async fn run_conversion<S>(
    entries: Vec<ImageEntry>,
    output_path: PathBuf,
    options: ConversionOptions,
    events: S,
) -> ConversionResult
where
    S: EventSink + Clone + Send + 'static,
{
    let mut fallback = events.clone();
    let task = tokio::task::spawn_blocking(move || {
        let mut events = events;
        convert(&entries, output_path, &options, &mut events)
    });

    match task.await {
        Ok(result) => result,
        Err(e) => report(Err(ConvertError::from(e)), &mut fallback),
    }
}

/// A conversion running in the background
pub struct ConversionHandle {
    /// Progress, status and completion events, in emission order
    pub events: mpsc::UnboundedReceiver<ConversionEvent>,
    task: JoinHandle<ConversionResult>,
}

impl ConversionHandle {
    /// Wait for the terminal result.
    pub async fn wait(self) -> ConversionResult {
        match self.task.await {
            Ok(result) => result,
            Err(e) => ConversionResult::failure(format!(
                "Conversion failed: {}",
                ConvertError::from(e)
            )),
        }
    }
}

/// Start a conversion without blocking the caller.
///
/// Must be called from within a tokio runtime.
pub fn spawn_conversion(
    entries: Vec<ImageEntry>,
    output_path: PathBuf,
    options: ConversionOptions,
) -> ConversionHandle {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(run_conversion(entries, output_path, options, events_tx));

    ConversionHandle {
        events: events_rx,
        task,
    }
}
