//! Defines the central, mutable state of the pipeline.

use crate::config::Settings;
use crate::core::{CleanupResult, SelectionModel, SummaryState};

/// Holds the mutable state shared between scans and cleanup batches.
///
/// This struct is wrapped in an `Arc<Mutex<...>>`. Mutual exclusion of the
/// operations themselves is enforced separately by the orchestrator's phase;
/// this lock only protects the data.
pub struct AppState {
    /// The user settings in effect, read once at attach time.
    pub settings: Settings,
    /// The current scan session and its selection overrides.
    pub session: SelectionModel,
    /// The result of the most recent cleanup batch, if any.
    pub last_result: Option<CleanupResult>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            session: SelectionModel::new(),
            last_result: None,
        }
    }

    pub fn summary_state(&self) -> SummaryState {
        self.session.summary_state()
    }
}
