//! Classifies entries as watched from their rendered signals.

use super::surface::{EntrySnapshot, PlaylistSurface, ProgressSignal};
use super::EntryRef;

/// The watched heuristic.
///
/// An entry is a removal candidate if it is marked private/unavailable, or if
/// any of its rendered progress indicators covers at least `threshold`
/// percent of its container. Malformed measurements count as no signal,
/// never as fully watched.
pub struct WatchedDetector {
    threshold: u8,
}

impl WatchedDetector {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    pub async fn is_watched(
        &self,
        surface: &dyn PlaylistSurface,
        entry: &EntryRef,
        snapshot: &EntrySnapshot,
    ) -> bool {
        // Private or unavailable entries cannot be usefully kept; clear them
        // regardless of progress.
        if snapshot.unavailable {
            return true;
        }

        let signals = surface.progress_signals(entry).await;
        if signals.is_empty() && !surface.has_resume_overlay(entry).await {
            return false;
        }

        meets_threshold(&signals, self.threshold)
    }
}

/// `true` if any signal's rendered percentage reaches the threshold.
pub(crate) fn meets_threshold(signals: &[ProgressSignal], threshold: u8) -> bool {
    signals
        .iter()
        .filter_map(percentage)
        .any(|pct| pct >= threshold as f64)
}

/// Converts one measurement into a percentage, or `None` for zero-width or
/// non-finite values.
fn percentage(signal: &ProgressSignal) -> Option<f64> {
    if !signal.width.is_finite() || !signal.parent_width.is_finite() {
        return None;
    }
    if signal.width <= 0.0 || signal.parent_width <= 0.0 {
        return None;
    }
    Some((signal.width / signal.parent_width) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(width: f64, parent_width: f64) -> ProgressSignal {
        ProgressSignal {
            width,
            parent_width,
        }
    }

    #[test]
    fn percentage_relative_to_parent() {
        assert!(meets_threshold(&[signal(90.0, 100.0)], 75));
        assert!(!meets_threshold(&[signal(60.0, 100.0)], 75));
        // Parent width scales the measurement.
        assert!(meets_threshold(&[signal(380.0, 400.0)], 75));
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        assert!(meets_threshold(&[signal(75.0, 100.0)], 75));
    }

    #[test]
    fn any_matching_signal_suffices() {
        let signals = [signal(10.0, 100.0), signal(99.0, 100.0)];
        assert!(meets_threshold(&signals, 75));
    }

    #[test]
    fn malformed_measurements_are_no_signal() {
        assert!(!meets_threshold(&[signal(0.0, 100.0)], 0));
        assert!(!meets_threshold(&[signal(50.0, 0.0)], 10));
        assert!(!meets_threshold(&[signal(f64::NAN, 100.0)], 10));
        assert!(!meets_threshold(&[signal(50.0, f64::INFINITY)], 10));
        assert!(!meets_threshold(&[], 0));
    }

    #[test]
    fn raising_threshold_never_grows_the_watched_set() {
        let fixture = [90.0_f64, 60.0, 10.0, 100.0, 0.0];
        let watched_at = |threshold: u8| -> Vec<usize> {
            fixture
                .iter()
                .enumerate()
                .filter(|(_, pct)| meets_threshold(&[signal(**pct, 100.0)], threshold))
                .map(|(i, _)| i)
                .collect()
        };

        let mut previous = watched_at(0);
        for threshold in 1..=100 {
            let current = watched_at(threshold);
            assert!(
                current.iter().all(|i| previous.contains(i)),
                "threshold {} grew the watched set",
                threshold
            );
            previous = current;
        }
    }
}
