//! Holds the current scan session and its user-driven selection state.

use super::PlaylistEntry;

/// The persistent summary shown next to the clean action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryState {
    /// The scan found no watched entries at all.
    NoneDetected,
    /// Watched entries exist, but the user deselected every one of them.
    NoneSelected,
    /// This many entries are currently selected for removal.
    Selected(usize),
}

/// The entries of one scan session plus per-entry user overrides.
///
/// A session is created fresh by each scan and replaced wholesale by the
/// next; entry indices are stable only within one session, and deselection
/// never survives a re-scan.
#[derive(Debug, Default)]
pub struct SelectionModel {
    entries: Vec<PlaylistEntry>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the session with a freshly scanned one. All entries start
    /// selected.
    pub fn replace_session(&mut self, mut entries: Vec<PlaylistEntry>) {
        for entry in &mut entries {
            entry.deselected = false;
        }
        self.entries = entries;
    }

    pub fn entries(&self) -> &[PlaylistEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flips the deselection flag of the entry at `index`. Returns the new
    /// flag value, or `None` if the index is not part of this session.
    pub fn toggle_deselect(&mut self, index: usize) -> Option<bool> {
        let entry = self.entries.iter_mut().find(|e| e.index == index)?;
        entry.deselected = !entry.deselected;
        Some(entry.deselected)
    }

    /// The exact input to a cleanup batch: watched entries not deselected by
    /// the user, in detection order. Re-derived on every call, never cached.
    pub fn candidates(&self) -> Vec<PlaylistEntry> {
        self.entries
            .iter()
            .filter(|e| e.watched && !e.deselected)
            .cloned()
            .collect()
    }

    /// The session index of the first candidate after `index`, wrapping
    /// around to the front. Used by the host's "jump to next candidate"
    /// control.
    pub fn next_candidate_after(&self, index: usize) -> Option<usize> {
        let candidates = self.candidates();
        candidates
            .iter()
            .map(|e| e.index)
            .find(|i| *i > index)
            .or_else(|| candidates.first().map(|e| e.index))
    }

    pub fn summary_state(&self) -> SummaryState {
        let watched = self.entries.iter().filter(|e| e.watched).count();
        if watched == 0 {
            return SummaryState::NoneDetected;
        }
        match self.candidates().len() {
            0 => SummaryState::NoneSelected,
            n => SummaryState::Selected(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(index: usize, watched: bool) -> PlaylistEntry {
        PlaylistEntry {
            index,
            title: format!("Entry {}", index),
            url: format!("https://example.com/watch?v={}", index),
            watched,
            deselected: false,
        }
    }

    fn model(entries: Vec<PlaylistEntry>) -> SelectionModel {
        let mut model = SelectionModel::new();
        model.replace_session(entries);
        model
    }

    #[test]
    fn candidates_keep_detection_order() {
        let model = model(vec![entry(0, true), entry(1, false), entry(2, true)]);
        let indices: Vec<usize> = model.candidates().iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn double_toggle_restores_original_state() {
        let mut model = model(vec![entry(0, true)]);
        assert_eq!(model.toggle_deselect(0), Some(true));
        assert_eq!(model.toggle_deselect(0), Some(false));
        assert_eq!(model.candidates().len(), 1);
    }

    #[test]
    fn toggle_of_unknown_index_is_rejected() {
        let mut model = model(vec![entry(0, true)]);
        assert_eq!(model.toggle_deselect(7), None);
    }

    #[test]
    fn summary_states() {
        assert_eq!(
            model(vec![entry(0, false)]).summary_state(),
            SummaryState::NoneDetected
        );

        let mut m = model(vec![entry(0, true), entry(1, true)]);
        assert_eq!(m.summary_state(), SummaryState::Selected(2));

        assert_eq!(m.toggle_deselect(0), Some(true));
        assert_eq!(m.summary_state(), SummaryState::Selected(1));
        assert_eq!(m.toggle_deselect(1), Some(true));
        assert_eq!(m.summary_state(), SummaryState::NoneSelected);
    }

    #[test]
    fn new_session_resets_deselection() {
        let mut m = model(vec![entry(0, true), entry(1, true)]);
        let _ = m.toggle_deselect(1);
        assert_eq!(m.candidates().len(), 1);

        m.replace_session(vec![entry(0, true), entry(1, true)]);
        assert_eq!(m.candidates().len(), 2);
        assert!(m.entries().iter().all(|e| !e.deselected));
    }

    #[test]
    fn next_candidate_wraps_around() {
        let mut m = model(vec![entry(0, true), entry(3, true), entry(5, false)]);
        assert_eq!(m.next_candidate_after(0), Some(3));
        assert_eq!(m.next_candidate_after(3), Some(0));
        assert_eq!(m.next_candidate_after(4), Some(0));

        let _ = m.toggle_deselect(0);
        let _ = m.toggle_deselect(3);
        assert_eq!(m.next_candidate_after(0), None);
    }
}
