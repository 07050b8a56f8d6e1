//! Navigation/cache/state engine for the file browser.
//!
//! Everything in this module is platform-neutral: the browser enters only
//! through the injected [`ApiClient`] and [`HistoryPort`] collaborators,
//! so the state machines run unchanged under native tests.

pub mod api;
pub mod error;
pub mod expansion;
pub mod highlight;
pub mod lazy;
pub mod navigation;
pub mod path;
pub mod thumbs;

pub use api::{ApiClient, BrowserHistory, HistoryPort, HttpApiClient};
pub use error::FetchError;
pub use expansion::{ExpansionModel, ToggleAction};
pub use lazy::{LazyImageLoader, LoaderStep, Placement, WidthSpec};
pub use navigation::{ClickDecision, NavOutcome, NavigationEngine, SelectionSet};
pub use thumbs::ThumbnailCache;
