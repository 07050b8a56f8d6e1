//! Highlight/label reconciliation.
//!
//! After every fetch or selection event the listing's highlight labels are
//! recomputed from two inputs: the most recently clicked entry name and the
//! final breadcrumb segment (the folder we descended through and later
//! backtracked past). Both get the active highlight label; every other
//! entry is restored to the label the backend reported for it, recorded in
//! a name-to-label backup when the listing arrived.

use std::collections::HashMap;

use crate::models::Entry;

/// Backup of backend-reported labels, keyed by entry name.
///
/// Rebuilt from every fresh listing (entries are replaced wholesale on
/// fetch, so the backup always reflects server state, never client-side
/// highlight edits).
#[derive(Debug, Default)]
pub struct LabelBackup {
    labels: HashMap<String, String>,
}

impl LabelBackup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the labels of a freshly fetched listing.
    pub fn record(&mut self, entries: &[Entry]) {
        for entry in entries {
            self.labels
                .insert(entry.name.clone(), entry.meta.label.clone());
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.labels.get(name).map(String::as_str)
    }
}

/// Recompute highlight labels for the current listing.
///
/// An entry is highlighted when its name matches `last_touched` or the
/// breadcrumb tail; this is what shows both "the thing you just clicked"
/// and "the folder you are currently inside" at once when backtracking.
pub fn recompute(
    entries: &mut [Entry],
    last_touched: &str,
    breadcrumb_tail: Option<&str>,
    backup: &LabelBackup,
    highlight_label: &str,
) {
    for entry in entries.iter_mut() {
        let is_last_touched = !last_touched.is_empty() && entry.name == last_touched;
        let is_crumb_tail = breadcrumb_tail.is_some_and(|tail| entry.name == tail);
        if is_last_touched || is_crumb_tail {
            entry.meta.label = highlight_label.to_string();
        } else {
            entry.meta.label = backup.get(&entry.name).unwrap_or_default().to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, label: &str) -> Entry {
        Entry {
            name: name.to_string(),
            meta: crate::models::MetaInfo {
                label: label.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_highlights_last_touched_and_crumb_tail() {
        let mut entries = vec![entry("X", "info"), entry("Y", ""), entry("Z", "warning")];
        let mut backup = LabelBackup::new();
        backup.record(&entries);

        recompute(&mut entries, "X", Some("Y"), &backup, "dark");
        assert_eq!(entries[0].meta.label, "dark");
        assert_eq!(entries[1].meta.label, "dark");
        assert_eq!(entries[2].meta.label, "warning");
    }

    #[test]
    fn test_restores_backup_after_highlight_moves() {
        let mut entries = vec![entry("A", "info"), entry("B", "")];
        let mut backup = LabelBackup::new();
        backup.record(&entries);

        recompute(&mut entries, "A", None, &backup, "dark");
        assert_eq!(entries[0].meta.label, "dark");

        // The highlight moves; A must fall back to its recorded label,
        // not keep the highlight it was given above.
        recompute(&mut entries, "B", None, &backup, "dark");
        assert_eq!(entries[0].meta.label, "info");
        assert_eq!(entries[1].meta.label, "dark");
    }

    #[test]
    fn test_empty_last_touched_matches_nothing() {
        let mut entries = vec![entry("", "info")];
        let mut backup = LabelBackup::new();
        backup.record(&entries);

        recompute(&mut entries, "", None, &backup, "dark");
        assert_eq!(entries[0].meta.label, "info");
    }

    #[test]
    fn test_unknown_entry_falls_back_to_no_label() {
        let mut entries = vec![entry("new", "stale-label")];
        let backup = LabelBackup::new();

        recompute(&mut entries, "other", None, &backup, "dark");
        assert_eq!(entries[0].meta.label, "");
    }
}
