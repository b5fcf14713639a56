use crate::{PdfCommand, PdfUpdate};
use pdf_image_grid::{ConversionEvent, ConversionOptions, EventSink, ImageEntry, run_conversion};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// Process commands one at a time until the command channel closes.
///
/// Conversions never overlap: the next command is only read after the
/// current conversion has completed.
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<PdfCommand>,
    update_tx: mpsc::UnboundedSender<PdfUpdate>,
) {
    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &update_tx).await;
    }
    log::debug!("Command channel closed, worker exiting");
}

async fn process_command(cmd: PdfCommand, update_tx: &mpsc::UnboundedSender<PdfUpdate>) {
    match cmd {
        PdfCommand::Convert {
            entries,
            options,
            output_path,
        } => {
            handle_convert(entries, options, output_path, update_tx).await;
        }
        PdfCommand::LoadConfig { path } => {
            handle_load_config(&path, update_tx).await;
        }
        PdfCommand::SaveConfig { options, path } => {
            handle_save_config(options, path, update_tx).await;
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Forwards conversion events tagged with their output path
#[derive(Clone)]
struct UpdateSink {
    output_path: PathBuf,
    update_tx: mpsc::UnboundedSender<PdfUpdate>,
}

impl EventSink for UpdateSink {
    fn emit(&mut self, event: ConversionEvent) {
        let _ = self.update_tx.send(PdfUpdate::Conversion {
            output_path: self.output_path.clone(),
            event,
        });
    }
}

async fn handle_convert(
    entries: Vec<ImageEntry>,
    options: ConversionOptions,
    output_path: PathBuf,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    log::debug!(
        "Converting {} images to {}",
        entries.len(),
        output_path.display()
    );

    let sink = UpdateSink {
        output_path: output_path.clone(),
        update_tx: update_tx.clone(),
    };
    let result = run_conversion(entries, output_path, options, sink).await;
    log::debug!("Conversion finished: {}", result.message);
}

async fn handle_load_config(path: &Path, update_tx: &mpsc::UnboundedSender<PdfUpdate>) {
    let update = match ConversionOptions::load(path).await {
        Ok(options) => PdfUpdate::ConfigLoaded { options },
        Err(e) => PdfUpdate::Error {
            message: format!("Failed to load config: {e}"),
        },
    };
    let _ = update_tx.send(update);
}

async fn handle_save_config(
    options: ConversionOptions,
    path: PathBuf,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    let update = match options.save(&path).await {
        Ok(()) => PdfUpdate::ConfigSaved { path },
        Err(e) => PdfUpdate::Error {
            message: format!("Failed to save config: {e}"),
        },
    };
    let _ = update_tx.send(update);
}
