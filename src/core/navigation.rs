//! Top-level navigation state machine.
//!
//! [`NavigationEngine`] owns the mutable view of the remote namespace: the
//! current listing, breadcrumb stack, search term, selection, expansion
//! state and label backup. All mutation happens on the single UI thread;
//! interior mutability is never held across an await point, and completed
//! fetches are applied only if they are still the latest issue for their
//! kind (stale results are discarded silently, never surfaced as errors).
//!
//! Click disambiguation lives in [`ClickArbiter`]: the first click on a
//! directory row defers an expand/collapse toggle behind a debounce timer
//! owned by the caller; a second directory click inside the window cancels
//! the timer and navigates instead, so a rapid double-click always wins
//! over the deferred single-click effect.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use super::api::{ApiClient, HistoryPort};
use super::error::FetchError;
use super::expansion::{ExpansionModel, ToggleAction};
use super::highlight::{self, LabelBackup};
use super::path;
use crate::config::HIGHLIGHT_LABEL;
use crate::models::{Entry, Listing, SortField};

/// Navigation-related state snapshot.
#[derive(Clone, Debug)]
pub struct NavigationState {
    /// Current remote directory path.
    pub current_path: String,
    /// Path segments backing the "jump to ancestor" UI. Rebuilt on
    /// navigate, popped on up-navigation.
    pub breadcrumbs: Vec<String>,
    /// Most recently clicked entry name, read by the reconciler.
    pub last_touched: String,
    /// Substring filter forwarded to the backend; empty when inactive.
    pub search: String,
    /// Current sort direction for the session endpoint. Sessions start
    /// descending, so the first toggle requests ascending order.
    pub sort_descending: bool,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            current_path: String::new(),
            breadcrumbs: Vec::new(),
            last_touched: String::new(),
            search: String::new(),
            sort_descending: true,
        }
    }
}

/// How a completed navigation fetch was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavOutcome {
    /// The result replaced the visible directory state.
    Applied,
    /// A newer fetch was issued in the meantime; the result was dropped.
    Superseded,
}

/// What the view layer must do with a directory-row click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickDecision {
    /// Non-directory entry: selection/highlight only, no timer involved.
    SelectionOnly,
    /// First click: schedule the debounce timer; on expiry call
    /// [`NavigationEngine::resolve_pending_click`].
    Defer,
    /// Second click inside the window: cancel the timer and navigate into
    /// the clicked entry.
    Navigate,
}

/// Single- vs. double-click disambiguation.
///
/// States: `Idle -> PendingSingle -> (Idle | consumed-by-double)`. The
/// pending slot holds the first-clicked entry so the deferred toggle
/// applies to it even if the timer outlives a listing refresh.
#[derive(Debug, Default)]
pub struct ClickArbiter {
    pending: Option<Entry>,
}

impl ClickArbiter {
    /// Register a click on a directory entry.
    pub fn register(&mut self, entry: &Entry) -> ClickDecision {
        if self.pending.is_some() {
            // Double-click wins: discard the deferred single-click action.
            self.pending = None;
            ClickDecision::Navigate
        } else {
            self.pending = Some(entry.clone());
            ClickDecision::Defer
        }
    }

    /// Consume the deferred entry when the debounce timer fires.
    pub fn take_pending(&mut self) -> Option<Entry> {
        self.pending.take()
    }
}

/// Multi-select state, scoped to the current directory.
#[derive(Clone, Debug, Default)]
pub struct SelectionSet {
    files: HashMap<String, bool>,
}

impl SelectionSet {
    pub fn set(&mut self, name: &str, selected: bool) {
        self.files.insert(name.to_string(), selected);
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.files.get(name).copied().unwrap_or(false)
    }

    /// Names currently selected, sorted for stable display.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .files
            .iter()
            .filter(|(_, on)| **on)
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    pub fn is_empty(&self) -> bool {
        !self.files.values().any(|on| *on)
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    fn as_request(&self) -> HashMap<String, bool> {
        self.files.clone()
    }
}

enum CrumbUpdate {
    /// Rebuild the stack by splitting the new path.
    Rebuild,
    /// Keep the stack for reconciliation, then pop the tail (up-nav).
    Pop,
}

/// Orchestrates listing fetches, click intent, expansion, selection and
/// highlight reconciliation against injected backend and history
/// collaborators.
pub struct NavigationEngine<A, H> {
    api: Rc<A>,
    history: Rc<H>,
    state: RefCell<NavigationState>,
    listing: RefCell<Option<Listing>>,
    expansion: RefCell<ExpansionModel>,
    selection: RefCell<SelectionSet>,
    backup: RefCell<LabelBackup>,
    arbiter: RefCell<ClickArbiter>,
    /// Monotonic issue counter for listing fetches; a completed fetch is
    /// applied only while it is still the latest issue.
    seq: Cell<u64>,
}

impl<A: ApiClient, H: HistoryPort> NavigationEngine<A, H> {
    pub fn new(api: Rc<A>, history: Rc<H>) -> Self {
        Self {
            api,
            history,
            state: RefCell::new(NavigationState::default()),
            listing: RefCell::new(None),
            expansion: RefCell::new(ExpansionModel::new()),
            selection: RefCell::new(SelectionSet::default()),
            backup: RefCell::new(LabelBackup::new()),
            arbiter: RefCell::new(ClickArbiter::default()),
            seq: Cell::new(0),
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Navigate to `path`, replacing the visible directory state and
    /// pushing the new location into browser history.
    pub async fn navigate_to(&self, path: &str) -> Result<NavOutcome, FetchError> {
        self.load(path, CrumbUpdate::Rebuild, true).await
    }

    /// Resolve a browser back/forward event: same as a navigate but
    /// without pushing history again.
    pub async fn sync_from_history(&self, path: &str) -> Result<NavOutcome, FetchError> {
        self.load(path, CrumbUpdate::Rebuild, false).await
    }

    /// Re-fetch the current directory (after an operation or sort change).
    pub async fn refresh(&self) -> Result<NavOutcome, FetchError> {
        let path = self.state.borrow().current_path.clone();
        self.load(&path, CrumbUpdate::Rebuild, false).await
    }

    /// Navigate to the parent reported by the last listing.
    ///
    /// The backend is authoritative about the parent: virtual roots need
    /// not match string slicing of the current path. When a search filter
    /// is active, the first up-navigation clears it and re-lists instead
    /// of leaving the directory.
    pub async fn navigate_up(&self) -> Result<NavOutcome, FetchError> {
        if !self.state.borrow().search.is_empty() {
            self.state.borrow_mut().search.clear();
            return self.refresh().await;
        }
        let Some(up) = self.listing.borrow().as_ref().map(|l| l.up_dir.clone()) else {
            return Ok(NavOutcome::Applied);
        };
        let up = if up.is_empty() { "/".to_string() } else { up };
        self.load(&up, CrumbUpdate::Pop, true).await
    }

    async fn load(
        &self,
        path: &str,
        crumbs: CrumbUpdate,
        push_history: bool,
    ) -> Result<NavOutcome, FetchError> {
        let search = {
            let state = self.state.borrow();
            (!state.search.is_empty()).then(|| state.search.clone())
        };
        let seq = self.seq.get() + 1;
        self.seq.set(seq);

        // No optimistic update: state is untouched until the fetch lands.
        let listing = self.api.list(path, search.as_deref()).await?;

        if seq != self.seq.get() {
            return Ok(NavOutcome::Superseded);
        }
        self.apply(path, listing, crumbs);
        if push_history {
            self.history.push(path);
        }
        Ok(NavOutcome::Applied)
    }

    fn apply(&self, path: &str, listing: Listing, crumbs: CrumbUpdate) {
        {
            let mut state = self.state.borrow_mut();
            state.current_path = path.to_string();
            if let CrumbUpdate::Rebuild = crumbs {
                state.breadcrumbs = path::segments(path);
            }
        }
        self.backup.borrow_mut().record(&listing.files);
        *self.listing.borrow_mut() = Some(listing);
        // For up-navigation the reconciler must still see the child we
        // backtracked out of as the breadcrumb tail; pop afterwards.
        self.reconcile();
        if let CrumbUpdate::Pop = crumbs {
            self.state.borrow_mut().breadcrumbs.pop();
        }
    }

    // =========================================================================
    // Click handling
    // =========================================================================

    /// Dispatch a row click. Directory clicks run through the debounce
    /// arbiter; file clicks only move the highlight.
    pub fn handle_entry_click(&self, entry: &Entry) -> ClickDecision {
        if !entry.is_dir {
            self.touch(&entry.name);
            return ClickDecision::SelectionOnly;
        }
        self.arbiter.borrow_mut().register(entry)
    }

    /// The debounce timer fired without a second click: execute the
    /// deferred expand/collapse toggle.
    pub async fn resolve_pending_click(&self) -> Result<(), FetchError> {
        let Some(entry) = self.arbiter.borrow_mut().take_pending() else {
            return Ok(());
        };
        self.toggle_expansion(&entry).await
    }

    /// Expand or collapse an entry's subtree in place, fetching children
    /// on open (single-flight per path, see [`ExpansionModel`]).
    pub async fn toggle_expansion(&self, entry: &Entry) -> Result<(), FetchError> {
        self.state.borrow_mut().last_touched = entry.name.clone();
        let action = self.expansion.borrow_mut().toggle(&entry.path);
        self.reconcile();

        if action != ToggleAction::OpenFetch {
            return Ok(());
        }
        match self.api.list_children(&entry.path).await {
            Ok(children) => {
                self.expansion
                    .borrow_mut()
                    .complete_fetch(&entry.path, children);
                self.reconcile();
                Ok(())
            }
            Err(err) => {
                self.expansion.borrow_mut().fetch_failed(&entry.path);
                Err(err)
            }
        }
    }

    /// Record a name as the most recently clicked entry and rerun the
    /// highlight pass.
    pub fn touch(&self, name: &str) {
        self.state.borrow_mut().last_touched = name.to_string();
        self.reconcile();
    }

    fn reconcile(&self) {
        let (last_touched, tail) = {
            let state = self.state.borrow();
            (state.last_touched.clone(), state.breadcrumbs.last().cloned())
        };
        if let Some(listing) = self.listing.borrow_mut().as_mut() {
            highlight::recompute(
                &mut listing.files,
                &last_touched,
                tail.as_deref(),
                &self.backup.borrow(),
                HIGHLIGHT_LABEL,
            );
        }
    }

    // =========================================================================
    // Search, sort, operations
    // =========================================================================

    /// Set the substring filter and re-list the current directory.
    pub async fn set_search(&self, term: &str) -> Result<NavOutcome, FetchError> {
        self.state.borrow_mut().search = term.to_string();
        self.refresh().await
    }

    /// Set the filter without refetching; used for the initial `?search=`
    /// URL parameter before the first listing is loaded.
    pub fn preset_search(&self, term: &str) {
        self.state.borrow_mut().search = term.to_string();
    }

    /// Flip the sort direction for `field`, persist it server-side, then
    /// re-fetch the listing (sort order is applied by the backend).
    pub async fn toggle_sort(&self, field: SortField) -> Result<NavOutcome, FetchError> {
        let descending = {
            let mut state = self.state.borrow_mut();
            state.sort_descending = !state.sort_descending;
            state.sort_descending
        };
        self.api.sort_preference(field, descending).await?;
        self.refresh().await
    }

    /// Apply a bulk operation to the current selection. On success the
    /// selection is cleared and the listing refreshed; on failure both
    /// are left untouched for a manual retry.
    pub async fn run_operation(&self, action: &str) -> Result<NavOutcome, FetchError> {
        let (files, dir) = {
            let selection = self.selection.borrow();
            let state = self.state.borrow();
            (selection.as_request(), state.current_path.clone())
        };
        self.api.operation(action, &dir, &files).await?;
        self.selection.borrow_mut().clear();
        self.refresh().await
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> NavigationState {
        self.state.borrow().clone()
    }

    pub fn current_path(&self) -> String {
        self.state.borrow().current_path.clone()
    }

    pub fn listing(&self) -> Option<Listing> {
        self.listing.borrow().clone()
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expansion.borrow().is_open(path)
    }

    pub fn expansion_children(&self, path: &str) -> Option<Listing> {
        self.expansion.borrow().children_of(path).cloned()
    }

    pub fn select(&self, name: &str, selected: bool) {
        self.selection.borrow_mut().set(name, selected);
    }

    pub fn selection(&self) -> SelectionSet {
        self.selection.borrow().clone()
    }
}
