//! Events reported to the caller while a conversion runs

use crate::types::ConversionResult;
use tokio::sync::mpsc;

/// Updates sent from a running conversion to its caller
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionEvent {
    /// Percentage of entries processed (0-100, never decreasing)
    Progress(u8),
    /// Human-readable note about a page, an image or an error
    Status(String),
    /// Terminal outcome; always the last event of a run
    Complete(ConversionResult),
}

/// Receiver side of conversion events
pub trait EventSink {
    fn emit(&mut self, event: ConversionEvent);

    fn progress(&mut self, percent: u8) {
        self.emit(ConversionEvent::Progress(percent));
    }

    fn status(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        let message = message.into();
        log::debug!("{}", message);
        self.emit(ConversionEvent::Status(message));
    }
}

impl EventSink for mpsc::UnboundedSender<ConversionEvent> {
    fn emit(&mut self, event: ConversionEvent) {
        // The caller may stop listening; the run still completes
        let _ = self.send(event);
    }
}

impl EventSink for Vec<ConversionEvent> {
    fn emit(&mut self, event: ConversionEvent) {
        self.push(event);
    }
}

/// Tracks processed entries and emits the integer percentage
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    processed: usize,
    total: usize,
}

impl ProgressTracker {
    pub(crate) fn new(total: usize) -> Self {
        Self {
            processed: 0,
            total,
        }
    }

    /// Count one more entry and report the new percentage
    pub(crate) fn advance<S: EventSink>(&mut self, events: &mut S) {
        self.processed = (self.processed + 1).min(self.total);
        events.progress(self.percent());
    }

    pub(crate) fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        (self.processed * 100 / self.total) as u8
    }
}
