//! Performs the multi-step menu interaction that removes one entry.

use std::sync::Arc;

use tokio::time::sleep;

use super::error::RemovalError;
use super::surface::{MenuItem, PlaylistSurface};
use super::{PlaylistEntry, MENU_SETTLE};

/// Known icon-path fingerprints for the remove/trash menu entry. The target
/// surface offers no stable identifier for the action, so these are matched
/// byte-for-byte against the rendered icon data.
const REMOVE_ICON_PATHS: [&str; 3] = [
    "M15 4H9v2h6V4zm0 4H9v2h6V8zm0 4H9v2h6v-2zM7 4H5v14h2V4zm14-2H3v18h18V2zM5 16V4h2v12H5zm12-10h-2V4h2v2zm0 4h-2V8h2v2zm0 4h-2v-2h2v2z",
    "M6 19c0 1.1.9 2 2 2h8c1.1 0 2-.9 2-2V7H6v12zm2.46-7.12l1.41-1.41L12 12.59l2.12-2.12 1.41 1.41L13.41 14l2.12 2.12-1.41 1.41L12 15.41l-2.12 2.12-1.41-1.41L10.59 14l-2.13-2.12zM15.5 4l-1-1h-5l-1 1H5v2h14V4z",
    "M11 17H9V8h2v9zm4-9h-2v9h2V8zm4-4v1h-1v16H6V5H5V4h4V3h6v1h4zm-2 1H7v15h10V5z",
];

/// Non-English fallback phrasing for playlists rendered in French.
const REMOVE_PHRASE_FR: &str = "supprimer de \"à regarder plus tard\"";

/// Removes one entry through its contextual action menu.
///
/// Matching is layered: icon fingerprints first, then accessible labels,
/// then literal text. Every failure reduces to a [`RemovalError`]; no
/// partial state is retained.
pub struct RemovalExecutor {
    surface: Arc<dyn PlaylistSurface>,
}

impl RemovalExecutor {
    pub fn new(surface: Arc<dyn PlaylistSurface>) -> Self {
        Self { surface }
    }

    pub async fn remove(&self, entry: &PlaylistEntry) -> Result<(), RemovalError> {
        let entry_ref = entry.entry_ref();

        if !self.surface.open_entry_menu(&entry_ref).await {
            tracing::warn!("Menu trigger not found for entry: {}", entry.title);
            return Err(RemovalError::ControlMissing);
        }
        sleep(MENU_SETTLE).await;

        let items = self.surface.menu_items().await;
        let Some(index) = find_remove_option(&items) else {
            tracing::warn!("Remove option not found for entry: {}", entry.title);
            self.surface.dismiss_menu().await;
            return Err(RemovalError::OptionMissing);
        };

        if !self.surface.activate_menu_item(index).await {
            // The menu re-rendered between the snapshot and the activation.
            self.surface.dismiss_menu().await;
            return Err(RemovalError::OptionMissing);
        }
        sleep(MENU_SETTLE).await;

        Ok(())
    }
}

/// Locates the remove option among the open menu's items, trying each
/// matching layer in priority order.
pub(crate) fn find_remove_option(items: &[MenuItem]) -> Option<usize> {
    // Layer 1: icon fingerprint.
    if let Some(index) = items.iter().position(|item| {
        item.icon_path
            .as_deref()
            .is_some_and(|path| REMOVE_ICON_PATHS.contains(&path))
    }) {
        return Some(index);
    }

    // Layer 2: accessible-label keywords, which survive partial translation
    // better than visible text.
    if let Some(index) = items.iter().position(|item| {
        item.aria_label.as_deref().is_some_and(|label| {
            let label = label.to_lowercase();
            let playlist_removal = (label.contains("remove") || label.contains("delete"))
                && label.contains("playlist");
            playlist_removal || label.contains("trash") || label.contains("delete")
        })
    }) {
        return Some(index);
    }

    // Layer 3: literal text, for menus without accessible labels.
    items.iter().position(|item| {
        let text = item.text.to_lowercase();
        text.contains("remove from watch later")
            || ((text.contains("remove") || text.contains("delete")) && text.contains("playlist"))
            || text.contains(REMOVE_PHRASE_FR)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_item(text: &str) -> MenuItem {
        MenuItem {
            text: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn icon_fingerprint_wins_over_text() {
        let items = vec![
            text_item("Remove from Watch later"),
            MenuItem {
                icon_path: Some(REMOVE_ICON_PATHS[1].to_string()),
                aria_label: None,
                text: "Something opaque".to_string(),
            },
        ];
        assert_eq!(find_remove_option(&items), Some(1));
    }

    #[test]
    fn aria_label_keywords_match() {
        let items = vec![
            text_item("Save to playlist"),
            MenuItem {
                icon_path: None,
                aria_label: Some("Remove from playlist".to_string()),
                text: String::new(),
            },
        ];
        assert_eq!(find_remove_option(&items), Some(1));
    }

    #[test]
    fn bare_trash_label_matches() {
        let items = vec![MenuItem {
            icon_path: None,
            aria_label: Some("Trash".to_string()),
            text: String::new(),
        }];
        assert_eq!(find_remove_option(&items), Some(0));
    }

    #[test]
    fn literal_text_fallbacks_match() {
        assert_eq!(
            find_remove_option(&[text_item("Remove from Watch later")]),
            Some(0)
        );
        assert_eq!(
            find_remove_option(&[text_item("Delete from this playlist")]),
            Some(0)
        );
        assert_eq!(
            find_remove_option(&[text_item("Supprimer de \"à regarder plus tard\"")]),
            Some(0)
        );
    }

    #[test]
    fn unrelated_items_do_not_match() {
        let items = vec![
            text_item("Add to queue"),
            text_item("Save to Watch later"),
            text_item("Share"),
        ];
        assert_eq!(find_remove_option(&items), None);
    }
}
