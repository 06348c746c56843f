//! Defines the event structures reported to the hosting environment.

use crate::core::{CleanupResult, SummaryState};

/// Events sent from the core to the host's status panel / toast widget.
///
/// The host owns all presentation and localization; free-text payloads are
/// progress detail, the structured variants are what the host is expected to
/// render persistently.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusEvent {
    /// A free-text progress message for the status panel.
    Status(String),
    /// A lazy-load iteration finished.
    LoadProgress {
        entries: usize,
        attempt: u32,
        max_attempts: u32,
    },
    /// An entry was walked through the viewport during the render sweep.
    RenderProgress { rendered: usize, total: usize },
    /// The persistent candidate-count summary after a scan or a toggle.
    Summary(SummaryState),
    /// A transient per-item notification. Only emitted when enabled in
    /// settings.
    Toast(String),
    /// The final summary of a cleanup batch.
    BatchFinished(CleanupResult),
}
