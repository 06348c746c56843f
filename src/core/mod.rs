pub mod detector;
pub mod error;
pub mod loader;
pub mod orchestrator;
pub mod remover;
pub mod render;
pub mod selection;
pub mod surface;

use std::time::Duration;

/// One entry of the playlist as captured during a scan session.
///
/// `index` is the entry's position at detection time and is only meaningful
/// within the session that produced it. The live document is never referenced
/// directly; operations re-resolve the entry through an [`EntryRef`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistEntry {
    pub index: usize,
    pub title: String,
    pub url: String,
    pub watched: bool,
    pub deselected: bool,
}

impl PlaylistEntry {
    /// Returns the non-owning handle used to re-resolve this entry against
    /// the live document.
    pub fn entry_ref(&self) -> EntryRef {
        EntryRef {
            index: self.index,
            url: self.url.clone(),
        }
    }
}

/// A non-owning handle into the live document.
///
/// The underlying structure can be mutated or destroyed externally at any
/// time, so this is a lookup key, not a pointer: the surface resolves it
/// fresh on every call and reports absence instead of panicking.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryRef {
    pub index: usize,
    pub url: String,
}

/// The outcome of one content-loading pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    /// Number of entries present when loading stopped.
    pub entry_count: usize,
    /// `false` if the attempt budget ran out before the list stopped growing.
    /// The caller proceeds with partial data in that case.
    pub reached_stability: bool,
    /// How many scroll iterations were performed.
    pub attempts: u32,
}

/// The outcome of one cleanup batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanupResult {
    pub succeeded: usize,
    /// Entries whose removal failed, in batch order. These were never
    /// actually removed, so a re-scan will detect them again.
    pub failed: Vec<PlaylistEntry>,
}

/// Settle interval after each lazy-load scroll iteration.
pub const LOAD_SETTLE: Duration = Duration::from_millis(2000);
/// Settle interval before the first lazy-load comparison.
pub const LOAD_INITIAL_SETTLE: Duration = Duration::from_millis(500);
/// Consecutive no-growth iterations required to call the list fully loaded.
pub const LOAD_STABLE_ITERATIONS: u32 = 3;
/// Default attempt budget for the lazy-load loop.
pub const LOAD_MAX_ATTEMPTS: u32 = 20;

/// Settle interval after scrolling one entry into the viewport.
pub const RENDER_SETTLE: Duration = Duration::from_millis(250);
/// Poll tick for the return-to-top stabilization loop.
pub const RENDER_POLL_TICK: Duration = Duration::from_millis(150);
/// Consecutive unchanged poll ticks treated as scroll-settled.
pub const RENDER_IDLE_TICKS: u32 = 5;
/// Fixed part of the return-to-top hard deadline.
pub const RENDER_DEADLINE_BASE: Duration = Duration::from_millis(3000);
/// Per-entry part of the return-to-top hard deadline.
pub const RENDER_DEADLINE_PER_ENTRY: Duration = Duration::from_millis(50);

/// Settle interval after opening an entry's action menu or activating an item.
pub const MENU_SETTLE: Duration = Duration::from_millis(500);
/// Pacing interval between consecutive removals in a batch.
pub const CLEANUP_PACING: Duration = Duration::from_millis(1000);
/// Delay before the automatic re-scan that follows a finished batch.
pub const RESCAN_DELAY: Duration = Duration::from_millis(2000);
/// Debounce applied to append-observer notifications before re-scanning.
pub const OBSERVER_DEBOUNCE: Duration = Duration::from_millis(1000);

pub use detector::WatchedDetector;
pub use error::RemovalError;
pub use loader::{ContentLoader, LoadProgress};
pub use orchestrator::{CleanupOrchestrator, Phase};
pub use remover::RemovalExecutor;
pub use render::{RenderForcer, RenderProgress};
pub use selection::{SelectionModel, SummaryState};
pub use surface::{EntrySnapshot, MenuItem, PlaylistSurface, ProgressSignal};
