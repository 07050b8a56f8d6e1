//! Sparse subtree expansion: at most one open sibling at a time.
//!
//! Tracks which single directory path is expanded in place and the fetched
//! children for it. The open set is an `Option<String>`, so the "at most
//! one open path" invariant holds by construction: opening a path closes
//! whatever else was open as a side effect of assignment.

use std::collections::HashSet;

use crate::models::Listing;

/// What the caller must do after a toggle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToggleAction {
    /// Path is now open and its children must be fetched.
    OpenFetch,
    /// Path is now open; a fetch for it is already in flight, do nothing.
    OpenPending,
    /// Path is now closed.
    Closed,
}

/// Expansion state for the in-place subtree preview.
#[derive(Debug, Default)]
pub struct ExpansionModel {
    open: Option<String>,
    children: Option<(String, Listing)>,
    pending: HashSet<String>,
}

impl ExpansionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a path open or closed.
    ///
    /// Closing discards the cached children (a reopen refetches). Opening
    /// closes every other path and requests a children fetch unless one is
    /// already in flight for this path; the in-flight guard is what makes a
    /// rapid double toggle issue a single network call.
    pub fn toggle(&mut self, path: &str) -> ToggleAction {
        if self.open.as_deref() == Some(path) {
            self.open = None;
            self.children = None;
            return ToggleAction::Closed;
        }

        self.open = Some(path.to_string());
        if let Some((cached, _)) = &self.children
            && cached != path
        {
            self.children = None;
        }
        if self.pending.contains(path) {
            ToggleAction::OpenPending
        } else {
            self.pending.insert(path.to_string());
            ToggleAction::OpenFetch
        }
    }

    /// Apply a completed children fetch.
    ///
    /// If the path was closed (or superseded) while the fetch was in
    /// flight, the result is stale and dropped.
    pub fn complete_fetch(&mut self, path: &str, listing: Listing) {
        self.pending.remove(path);
        if self.open.as_deref() == Some(path) {
            self.children = Some((path.to_string(), listing));
        }
    }

    /// Clear the in-flight marker after a failed fetch so that the next
    /// open retries.
    pub fn fetch_failed(&mut self, path: &str) {
        self.pending.remove(path);
    }

    pub fn is_open(&self, path: &str) -> bool {
        self.open.as_deref() == Some(path)
    }

    /// Fetched children of the open path, if both are present.
    pub fn children_of(&self, path: &str) -> Option<&Listing> {
        match &self.children {
            Some((cached, listing)) if cached == path => Some(listing),
            _ => None,
        }
    }

    /// All currently open paths. The length is at most 1; exposed so tests
    /// can assert the invariant directly.
    pub fn open_paths(&self) -> Vec<&str> {
        self.open.as_deref().into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(dir: &str) -> Listing {
        Listing {
            dir: dir.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_toggle_open_close() {
        let mut model = ExpansionModel::new();
        assert_eq!(model.toggle("/a"), ToggleAction::OpenFetch);
        assert!(model.is_open("/a"));
        assert_eq!(model.toggle("/a"), ToggleAction::Closed);
        assert!(!model.is_open("/a"));
    }

    #[test]
    fn test_at_most_one_open_after_arbitrary_sequence() {
        let mut model = ExpansionModel::new();
        let paths = ["/a", "/b", "/a", "/c", "/c", "/b", "/a", "/a", "/b"];
        for path in paths {
            model.toggle(path);
            assert!(model.open_paths().len() <= 1, "invariant broken at {path}");
        }
    }

    #[test]
    fn test_opening_second_path_closes_first() {
        let mut model = ExpansionModel::new();
        model.toggle("/a");
        model.complete_fetch("/a", listing("/a"));
        assert_eq!(model.toggle("/b"), ToggleAction::OpenFetch);
        assert!(!model.is_open("/a"));
        assert!(model.is_open("/b"));
        assert!(model.children_of("/a").is_none());
    }

    #[test]
    fn test_double_toggle_before_fetch_resolves_is_single_flight() {
        let mut model = ExpansionModel::new();
        assert_eq!(model.toggle("/a"), ToggleAction::OpenFetch);
        // Close and reopen while the first fetch is still pending: the
        // reopen must not issue a second fetch.
        assert_eq!(model.toggle("/a"), ToggleAction::Closed);
        assert_eq!(model.toggle("/a"), ToggleAction::OpenPending);
        assert_eq!(model.open_paths(), vec!["/a"]);

        model.complete_fetch("/a", listing("/a"));
        assert_eq!(model.children_of("/a").unwrap().dir, "/a");
    }

    #[test]
    fn test_stale_fetch_result_dropped_after_close() {
        let mut model = ExpansionModel::new();
        model.toggle("/a");
        model.toggle("/a"); // closed before fetch resolves
        model.complete_fetch("/a", listing("/a"));
        assert!(model.children_of("/a").is_none());
        // The pending marker was cleared, so a reopen fetches again.
        assert_eq!(model.toggle("/a"), ToggleAction::OpenFetch);
    }

    #[test]
    fn test_stale_fetch_result_dropped_after_supersede() {
        let mut model = ExpansionModel::new();
        model.toggle("/a");
        model.toggle("/b"); // /a superseded while its fetch is in flight
        model.complete_fetch("/a", listing("/a"));
        assert!(model.children_of("/a").is_none());
        model.complete_fetch("/b", listing("/b"));
        assert_eq!(model.children_of("/b").unwrap().dir, "/b");
    }

    #[test]
    fn test_failed_fetch_allows_retry() {
        let mut model = ExpansionModel::new();
        assert_eq!(model.toggle("/a"), ToggleAction::OpenFetch);
        model.fetch_failed("/a");
        model.toggle("/a"); // close
        assert_eq!(model.toggle("/a"), ToggleAction::OpenFetch);
    }

    #[test]
    fn test_closing_discards_children() {
        let mut model = ExpansionModel::new();
        model.toggle("/a");
        model.complete_fetch("/a", listing("/a"));
        assert!(model.children_of("/a").is_some());
        model.toggle("/a");
        assert!(model.children_of("/a").is_none());
    }
}
