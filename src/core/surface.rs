//! Defines the abstraction over the live playlist document.
//!
//! The core never holds references into the hosting page. Every operation
//! goes through this trait and is resolved against the live structure at call
//! time, because the page can re-render, reorder or drop entries at any
//! moment. Implementations are expected to answer "not there anymore" (empty
//! results, `false`) rather than fail hard.

use async_trait::async_trait;

use super::EntryRef;

/// A point-in-time view of one entry's identifying data.
#[derive(Debug, Clone, PartialEq)]
pub struct EntrySnapshot {
    pub title: String,
    pub url: String,
    /// `true` if the entry carries a private/unavailable marker.
    pub unavailable: bool,
}

/// One rendered progress indicator, measured by the rendering engine.
///
/// Measurements are only meaningful after the entry has been laid out in the
/// viewport at least once; see [`crate::core::RenderForcer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSignal {
    pub width: f64,
    pub parent_width: f64,
}

/// One item of the currently open action menu.
///
/// Items are addressed by their position in the snapshot that returned them.
/// The snapshot is only valid until the menu is activated or dismissed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuItem {
    /// The `d` attribute of the item's icon path, if it renders one.
    pub icon_path: Option<String>,
    /// The item's accessible label, if present.
    pub aria_label: Option<String>,
    /// The item's visible text content.
    pub text: String,
}

/// The live playlist document, as seen by the core.
///
/// Scroll operations and menu activations are synthetic interactions with
/// discovered controls; the core never edits the structure directly.
#[async_trait]
pub trait PlaylistSurface: Send + Sync {
    /// Number of entries currently materialized in the document.
    async fn entry_count(&self) -> usize;

    /// Total scroll extent of the playlist's scrollable region.
    async fn scroll_extent(&self) -> f64;

    /// Current scroll position of the viewport.
    async fn scroll_position(&self) -> f64;

    /// Scrolls the playlist region to its current bottom edge.
    async fn scroll_to_bottom(&self);

    /// Starts a scroll back to the top of the page. Completion is detected by
    /// polling [`Self::scroll_position`], not by this call returning.
    async fn scroll_to_top(&self);

    /// Scrolls the referenced entry into the vertical center of the viewport.
    async fn scroll_entry_into_view(&self, entry: &EntryRef);

    /// Resolves the entry at `index`, if it still exists.
    async fn entry_snapshot(&self, index: usize) -> Option<EntrySnapshot>;

    /// All progress indicators currently rendered for the entry.
    async fn progress_signals(&self, entry: &EntryRef) -> Vec<ProgressSignal>;

    /// `true` if the entry renders a resume-playback overlay.
    async fn has_resume_overlay(&self, entry: &EntryRef) -> bool;

    /// Locates and activates the entry's action-menu trigger. Returns `false`
    /// if no trigger could be found.
    async fn open_entry_menu(&self, entry: &EntryRef) -> bool;

    /// Snapshot of the currently open menu's items, in render order.
    async fn menu_items(&self) -> Vec<MenuItem>;

    /// Activates the menu item at `index` in the last snapshot. Returns
    /// `false` if the item no longer exists.
    async fn activate_menu_item(&self, index: usize) -> bool;

    /// Best-effort dismissal of an open menu (clicks a detected backdrop).
    async fn dismiss_menu(&self);
}
