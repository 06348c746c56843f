//! Drives a cleanup batch end to end: confirmation, sequential removal,
//! pacing, failure bookkeeping and the final summary.

use std::sync::Mutex;

use tokio::time::sleep;

use crate::app::events::StatusEvent;
use crate::app::proxy::{ConfirmationProvider, HistorySink, StatusSink};
use crate::config::Settings;

use super::remover::RemovalExecutor;
use super::{CleanupResult, PlaylistEntry, CLEANUP_PACING};

/// The orchestrator's lifecycle. `Confirming` is only entered when the
/// settings require a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Confirming,
    Running,
}

/// The batch state machine: `Idle → (Confirming) → Running → Idle`.
///
/// The phase doubles as the single in-progress flag of the whole pipeline:
/// scanning and cleaning both have to acquire it, which makes them mutually
/// exclusive over the shared session state. There is no cancellation path; a
/// batch runs to completion or until the hosting page is destroyed.
pub struct CleanupOrchestrator {
    phase: Mutex<Phase>,
}

impl Default for CleanupOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl CleanupOrchestrator {
    pub fn new() -> Self {
        Self {
            phase: Mutex::new(Phase::Idle),
        }
    }

    pub fn phase(&self) -> Phase {
        *self.phase.lock().expect("Phase lock was poisoned")
    }

    pub fn is_busy(&self) -> bool {
        self.phase() != Phase::Idle
    }

    /// Attempts the `Idle → to` transition. Any start request while not idle
    /// is rejected without a state change.
    pub(crate) fn try_begin(&self, to: Phase) -> bool {
        let mut phase = self.phase.lock().expect("Phase lock was poisoned");
        if *phase != Phase::Idle {
            return false;
        }
        *phase = to;
        true
    }

    pub(crate) fn transition(&self, to: Phase) {
        *self.phase.lock().expect("Phase lock was poisoned") = to;
    }

    /// Runs one batch over `candidates`, strictly in the given order.
    ///
    /// Returns `None` if the batch never started: empty candidate set, a
    /// scan or another batch already in progress, or the user declining the
    /// confirmation. Per-item failures never abort the loop; they are
    /// collected in the returned [`CleanupResult`].
    pub async fn run<P: StatusSink>(
        &self,
        remover: &RemovalExecutor,
        candidates: Vec<PlaylistEntry>,
        settings: &Settings,
        status: &P,
        history: &dyn HistorySink,
        confirmer: &dyn ConfirmationProvider,
    ) -> Option<CleanupResult> {
        if candidates.is_empty() {
            return None;
        }

        let initial = if settings.require_confirmation {
            Phase::Confirming
        } else {
            Phase::Running
        };
        if !self.try_begin(initial) {
            tracing::info!("Cleanup start rejected, pipeline is busy");
            return None;
        }

        if initial == Phase::Confirming {
            if !confirmer.confirm_cleanup(candidates.len()) {
                self.transition(Phase::Idle);
                return None;
            }
            self.transition(Phase::Running);
        }

        tracing::info!("Cleaning {} entries", candidates.len());
        let mut result = CleanupResult::default();

        for entry in &candidates {
            match remover.remove(entry).await {
                Ok(()) => {
                    result.succeeded += 1;
                    if let Err(e) = history.append(&entry.title, &entry.url) {
                        // Diagnostic only; the batch keeps going.
                        tracing::warn!("Failed to log removed entry: {}", e);
                    }
                    if settings.enable_toast {
                        status.send_event(StatusEvent::Toast(entry.title.clone()));
                    }
                }
                Err(e) => {
                    tracing::warn!("Removal failed for {}: {}", entry.title, e);
                    result.failed.push(entry.clone());
                }
            }

            // Let the surface settle and avoid rapid consecutive mutations.
            sleep(CLEANUP_PACING).await;
        }

        self.transition(Phase::Idle);
        tracing::info!(
            "Batch finished: {} removed, {} failed",
            result.succeeded,
            result.failed.len()
        );
        status.send_event(StatusEvent::BatchFinished(result.clone()));

        Some(result)
    }
}
