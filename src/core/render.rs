//! Walks every loaded entry through the viewport so the rendering engine
//! computes the visual metrics the detector reads.
//!
//! Progress-bar widths are measured lazily and are unreliable for entries
//! never actually laid out in the viewport, hence the two phases: a forward
//! sweep that centers each entry once, then a stabilized return to the top so
//! the page is back in a usable position before detection runs.

use std::sync::Arc;

use tokio::time::{sleep, Instant};

use super::surface::PlaylistSurface;
use super::{
    EntryRef, RENDER_DEADLINE_BASE, RENDER_DEADLINE_PER_ENTRY, RENDER_IDLE_TICKS,
    RENDER_POLL_TICK, RENDER_SETTLE,
};

/// A progress update emitted after each entry of the forward sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderProgress {
    pub rendered: usize,
    pub total: usize,
}

pub struct RenderForcer {
    surface: Arc<dyn PlaylistSurface>,
}

impl RenderForcer {
    pub fn new(surface: Arc<dyn PlaylistSurface>) -> Self {
        Self { surface }
    }

    /// Centers each of the first `total` entries in the viewport in order,
    /// then scrolls back to the top and waits for the position to settle.
    pub async fn force_render<F>(&self, total: usize, progress: F)
    where
        F: Fn(RenderProgress),
    {
        if total == 0 {
            return;
        }

        for index in 0..total {
            // The document can shrink mid-sweep; skip entries that are gone.
            let Some(snapshot) = self.surface.entry_snapshot(index).await else {
                continue;
            };
            let entry = EntryRef {
                index,
                url: snapshot.url,
            };
            self.surface.scroll_entry_into_view(&entry).await;
            sleep(RENDER_SETTLE).await;

            progress(RenderProgress {
                rendered: index + 1,
                total,
            });
        }

        self.surface.scroll_to_top().await;
        self.wait_for_scroll_settled(total).await;
    }

    /// Polls the scroll position until it reaches the origin or stops moving
    /// for [`RENDER_IDLE_TICKS`] consecutive ticks. A hard deadline
    /// proportional to the entry count bounds the wait in case the position
    /// never settles.
    async fn wait_for_scroll_settled(&self, total: usize) {
        let deadline =
            Instant::now() + RENDER_DEADLINE_BASE + RENDER_DEADLINE_PER_ENTRY * total as u32;

        let mut last_position = self.surface.scroll_position().await;
        let mut idle_ticks: u32 = 0;

        while last_position > 0.0 {
            if Instant::now() >= deadline {
                tracing::warn!("Return-to-top did not settle before the deadline, continuing");
                return;
            }

            sleep(RENDER_POLL_TICK).await;

            let position = self.surface.scroll_position().await;
            if position == last_position {
                idle_ticks += 1;
            } else {
                idle_ticks = 0;
            }
            last_position = position;

            if idle_ticks >= RENDER_IDLE_TICKS {
                return;
            }
        }
    }
}
