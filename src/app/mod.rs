//! The host-facing surface of the pipeline.
//!
//! The hosting environment constructs one [`Sweeper`] per playlist page from
//! its own lifecycle hook and forwards user interactions (clean request,
//! per-entry toggles, structural mutations) to it. There is no process-wide
//! singleton; all state is scoped to the one active instance.

pub mod events;
pub mod proxy;
pub mod state;
pub mod tasks;

use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use crate::config::Settings;
use crate::core::{CleanupOrchestrator, CleanupResult, PlaylistSurface, SummaryState};

use events::StatusEvent;
use proxy::{ConfirmationProvider, HistorySink, StatusSink};
use state::AppState;
use tasks::TaskContext;

pub struct Sweeper<P: StatusSink> {
    ctx: TaskContext<P>,
}

impl<P: StatusSink> Sweeper<P> {
    /// Attaches to a playlist page, loading settings from the settings store.
    ///
    /// Settings failures fall back to the defaults and never block
    /// initialization. Must be called within a tokio runtime: the initial
    /// scan is spawned as a background task.
    pub fn attach(
        surface: Arc<dyn PlaylistSurface>,
        status: P,
        history: Arc<dyn HistorySink>,
        confirmer: Arc<dyn ConfirmationProvider>,
    ) -> Self {
        let settings = Settings::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load settings: {}. Using defaults.", e);
            Settings::default()
        });
        Self::attach_with_settings(settings, surface, status, history, confirmer)
    }

    /// Attaches with explicit settings, bypassing the settings store.
    pub fn attach_with_settings(
        settings: Settings,
        surface: Arc<dyn PlaylistSurface>,
        status: P,
        history: Arc<dyn HistorySink>,
        confirmer: Arc<dyn ConfirmationProvider>,
    ) -> Self {
        let enabled = settings.enabled;
        let ctx = TaskContext {
            surface,
            state: Arc::new(Mutex::new(AppState::new(settings))),
            orchestrator: Arc::new(CleanupOrchestrator::new()),
            status,
            history,
            confirmer,
            rescan_pending: Arc::new(AtomicBool::new(false)),
        };

        let sweeper = Self { ctx };
        if enabled {
            sweeper.start_scan();
        } else {
            tracing::info!("Sweeper is disabled in settings. No actions will be performed.");
        }
        sweeper
    }

    /// Starts a fresh scan session in the background. A no-op while a scan
    /// or a cleanup batch is running.
    pub fn start_scan(&self) {
        if !self.enabled() {
            return;
        }
        tasks::start_scan(self.ctx.clone());
    }

    /// Starts a cleanup batch over the current candidates in the background.
    pub fn start_cleanup(&self) {
        if !self.enabled() {
            return;
        }
        tasks::start_cleanup(self.ctx.clone());
    }

    /// Forwarded from the host's structural-mutation observer when new
    /// entries were appended to the document.
    pub fn notify_entries_appended(&self) {
        if !self.enabled() {
            return;
        }
        tasks::notify_entries_appended(&self.ctx);
    }

    /// Toggles the user override for the entry at `index` and republishes
    /// the candidate summary.
    pub fn toggle_deselect(&self, index: usize) {
        let summary = {
            let mut state = self.ctx.state.lock().expect("State lock was poisoned");
            if state.session.toggle_deselect(index).is_none() {
                tracing::warn!("Toggle for unknown entry index {}", index);
                return;
            }
            state.summary_state()
        };
        self.ctx.status.send_event(StatusEvent::Summary(summary));
    }

    /// The session index of the next removal candidate after `index`, for
    /// the host's jump control.
    pub fn next_candidate_after(&self, index: usize) -> Option<usize> {
        let state = self.ctx.state.lock().expect("State lock was poisoned");
        state.session.next_candidate_after(index)
    }

    pub fn summary_state(&self) -> SummaryState {
        let state = self.ctx.state.lock().expect("State lock was poisoned");
        state.summary_state()
    }

    pub fn last_result(&self) -> Option<CleanupResult> {
        let state = self.ctx.state.lock().expect("State lock was poisoned");
        state.last_result.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.ctx.orchestrator.is_busy()
    }

    fn enabled(&self) -> bool {
        let state = self.ctx.state.lock().expect("State lock was poisoned");
        state.settings.enabled
    }

    /// The task context, for hosts that drive the tasks directly.
    pub fn context(&self) -> &TaskContext<P> {
        &self.ctx
    }
}
