//! Defines the abstractions over the host-provided collaborators.

use super::events::StatusEvent;
use crate::history::HistoryError;

/// A trait that abstracts the sending of status events to the host.
/// This is "fire-and-forget" and doesn't return a result, simplifying its use.
pub trait StatusSink: Send + Sync + Clone + 'static {
    fn send_event(&self, event: StatusEvent);
}

/// The append-only record store for removed entries.
///
/// The sink stamps its own timestamp and id. Append failures are diagnostic
/// only and never interrupt a running batch.
pub trait HistorySink: Send + Sync {
    fn append(&self, title: &str, url: &str) -> Result<(), HistoryError>;
}

/// Presents the synchronous yes/no decision before a batch starts.
pub trait ConfirmationProvider: Send + Sync {
    /// `count` is the number of entries about to be removed.
    fn confirm_cleanup(&self, count: usize) -> bool;
}
