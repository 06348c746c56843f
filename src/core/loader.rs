//! Forces the lazily paginated playlist to fully materialize.

use std::sync::Arc;

use tokio::time::sleep;

use super::surface::PlaylistSurface;
use super::{
    LoadOutcome, LOAD_INITIAL_SETTLE, LOAD_MAX_ATTEMPTS, LOAD_SETTLE, LOAD_STABLE_ITERATIONS,
};

/// A progress update emitted after each lazy-load iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadProgress {
    pub entries: usize,
    pub attempt: u32,
    pub max_attempts: u32,
}

/// Repeatedly scrolls the playlist's scrollable region to its bottom edge so
/// that asynchronous pagination appends the remaining entries.
///
/// Loading is best-effort: the list length is unbounded and unknown in
/// advance, so the loop stops after [`LOAD_STABLE_ITERATIONS`] consecutive
/// iterations without growth, or fails open once the attempt budget is
/// exhausted. The caller proceeds with whatever was loaded either way.
pub struct ContentLoader {
    surface: Arc<dyn PlaylistSurface>,
}

impl ContentLoader {
    pub fn new(surface: Arc<dyn PlaylistSurface>) -> Self {
        Self { surface }
    }

    /// Runs the loading loop with the default attempt budget.
    pub async fn load<F>(&self, progress: F) -> LoadOutcome
    where
        F: Fn(LoadProgress),
    {
        self.load_with_budget(LOAD_MAX_ATTEMPTS, progress).await
    }

    /// Runs the loading loop with an explicit attempt budget.
    pub async fn load_with_budget<F>(&self, max_attempts: u32, progress: F) -> LoadOutcome
    where
        F: Fn(LoadProgress),
    {
        // Initial scroll to the current bottom, in case content is already
        // partially there.
        self.surface.scroll_to_bottom().await;
        sleep(LOAD_INITIAL_SETTLE).await;

        let mut last_count = self.surface.entry_count().await;
        let mut stable_iterations: u32 = 0;
        let mut attempts: u32 = 0;

        while stable_iterations < LOAD_STABLE_ITERATIONS && attempts < max_attempts {
            attempts += 1;
            let extent_before = self.surface.scroll_extent().await;

            self.surface.scroll_to_bottom().await;
            sleep(LOAD_SETTLE).await;

            let count = self.surface.entry_count().await;
            let extent_after = self.surface.scroll_extent().await;

            if count > last_count || extent_after > extent_before {
                // New entries appeared or the region got longer, implying
                // more content may still be pending.
                stable_iterations = 0;
            } else {
                stable_iterations += 1;
            }
            last_count = count;

            progress(LoadProgress {
                entries: count,
                attempt: attempts,
                max_attempts,
            });
        }

        let reached_stability = stable_iterations >= LOAD_STABLE_ITERATIONS;
        if reached_stability {
            tracing::info!(
                "Content loading stable after {} attempts, {} entries",
                attempts,
                last_count
            );
        } else {
            tracing::warn!(
                "Attempt budget ({}) exhausted while loading, proceeding with {} entries",
                max_attempts,
                last_count
            );
        }

        LoadOutcome {
            entry_count: last_count,
            reached_stability,
            attempts,
        }
    }
}
