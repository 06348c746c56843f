//! The long-running scan and cleanup tasks, plus the append-observer hook.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tokio::time::sleep;

use super::events::StatusEvent;
use super::proxy::{ConfirmationProvider, HistorySink, StatusSink};
use super::state::AppState;

use crate::core::orchestrator::Phase;
use crate::core::{
    CleanupOrchestrator, CleanupResult, ContentLoader, EntryRef, PlaylistEntry, PlaylistSurface,
    RemovalExecutor, RenderForcer, WatchedDetector, OBSERVER_DEBOUNCE, RESCAN_DELAY,
};

/// Everything a task needs, bundled so spawned tasks can own a clone.
pub struct TaskContext<P: StatusSink> {
    pub surface: Arc<dyn PlaylistSurface>,
    pub state: Arc<Mutex<AppState>>,
    pub orchestrator: Arc<CleanupOrchestrator>,
    pub status: P,
    pub history: Arc<dyn HistorySink>,
    pub confirmer: Arc<dyn ConfirmationProvider>,
    /// `true` while an observer-triggered re-scan is waiting out its
    /// debounce delay.
    pub rescan_pending: Arc<AtomicBool>,
}

impl<P: StatusSink> Clone for TaskContext<P> {
    fn clone(&self) -> Self {
        Self {
            surface: self.surface.clone(),
            state: self.state.clone(),
            orchestrator: self.orchestrator.clone(),
            status: self.status.clone(),
            history: self.history.clone(),
            confirmer: self.confirmer.clone(),
            rescan_pending: self.rescan_pending.clone(),
        }
    }
}

/// Spawns a full scan as a background task.
pub fn start_scan<P: StatusSink>(ctx: TaskContext<P>) -> JoinHandle<()> {
    tokio::spawn(async move {
        run_scan(&ctx).await;
    })
}

/// Runs a full scan: load, render sweep, detection, session replacement.
///
/// Returns `false` without side effects if the pipeline is busy.
pub async fn run_scan<P: StatusSink>(ctx: &TaskContext<P>) -> bool {
    if !ctx.orchestrator.try_begin(Phase::Running) {
        tracing::info!("Scan request rejected, pipeline is busy");
        return false;
    }

    let threshold = {
        let state = ctx.state.lock().expect("State lock was poisoned");
        state.settings.threshold
    };

    ctx.status
        .send_event(StatusEvent::Status("Scrolling to load entries...".into()));

    let loader = ContentLoader::new(ctx.surface.clone());
    let load_status = ctx.status.clone();
    let outcome = loader
        .load(move |p| {
            load_status.send_event(StatusEvent::LoadProgress {
                entries: p.entries,
                attempt: p.attempt,
                max_attempts: p.max_attempts,
            });
        })
        .await;

    let loaded_message = if outcome.reached_stability {
        format!("Loaded {} entries, preparing detailed scan...", outcome.entry_count)
    } else {
        format!(
            "Max scroll attempts reached while loading. Found {} entries.",
            outcome.entry_count
        )
    };
    ctx.status.send_event(StatusEvent::Status(loaded_message));

    let forcer = RenderForcer::new(ctx.surface.clone());
    let render_status = ctx.status.clone();
    forcer
        .force_render(outcome.entry_count, move |p| {
            render_status.send_event(StatusEvent::RenderProgress {
                rendered: p.rendered,
                total: p.total,
            });
        })
        .await;

    ctx.status
        .send_event(StatusEvent::Status("Analyzing entries...".into()));

    let detector = WatchedDetector::new(threshold);
    let mut entries = Vec::new();
    // Re-query the count; the render sweep can have triggered late appends.
    let count = ctx.surface.entry_count().await;
    for index in 0..count {
        let Some(snapshot) = ctx.surface.entry_snapshot(index).await else {
            continue;
        };
        let entry_ref = EntryRef {
            index,
            url: snapshot.url.clone(),
        };
        let watched = detector
            .is_watched(ctx.surface.as_ref(), &entry_ref, &snapshot)
            .await;
        entries.push(PlaylistEntry {
            index,
            title: snapshot.title,
            url: snapshot.url,
            watched,
            deselected: false,
        });
    }

    let summary = {
        let mut state = ctx.state.lock().expect("State lock was poisoned");
        state.session.replace_session(entries);
        state.summary_state()
    };

    ctx.orchestrator.transition(Phase::Idle);
    ctx.status.send_event(StatusEvent::Summary(summary));
    tracing::info!("Scan complete: {:?}", summary);
    true
}

/// Spawns a cleanup batch as a background task.
pub fn start_cleanup<P: StatusSink>(ctx: TaskContext<P>) -> JoinHandle<()> {
    tokio::spawn(async move {
        run_cleanup(&ctx).await;
    })
}

/// Runs a cleanup batch over the current candidate set.
///
/// Returns `None` if the batch never started (busy pipeline, empty candidate
/// set, or declined confirmation). On completion, schedules the automatic
/// re-scan when the settings ask for one.
pub async fn run_cleanup<P: StatusSink>(ctx: &TaskContext<P>) -> Option<CleanupResult> {
    let (candidates, settings) = {
        let state = ctx.state.lock().expect("State lock was poisoned");
        (state.session.candidates(), state.settings.clone())
    };

    let remover = RemovalExecutor::new(ctx.surface.clone());
    let result = ctx
        .orchestrator
        .run(
            &remover,
            candidates,
            &settings,
            &ctx.status,
            ctx.history.as_ref(),
            ctx.confirmer.as_ref(),
        )
        .await?;

    {
        let mut state = ctx.state.lock().expect("State lock was poisoned");
        state.last_result = Some(result.clone());
    }

    if settings.auto_rescan_after_cleaning {
        // The list was just mutated; refresh the session once it settles.
        let rescan_ctx = ctx.clone();
        tokio::spawn(async move {
            sleep(RESCAN_DELAY).await;
            run_scan(&rescan_ctx).await;
        });
    }

    Some(result)
}

/// Handles a structural-mutation notification: newly appended entries
/// trigger a fresh scan after a debounce delay, but never while a scan or a
/// batch is in progress.
pub fn notify_entries_appended<P: StatusSink>(ctx: &TaskContext<P>) {
    if ctx.orchestrator.is_busy() {
        return;
    }
    if ctx.rescan_pending.swap(true, Ordering::SeqCst) {
        // A re-scan is already waiting out its debounce.
        return;
    }

    let ctx = ctx.clone();
    tokio::spawn(async move {
        sleep(OBSERVER_DEBOUNCE).await;
        ctx.rescan_pending.store(false, Ordering::SeqCst);
        run_scan(&ctx).await;
    });
}
