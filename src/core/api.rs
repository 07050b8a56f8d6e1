//! Backend API collaborator.
//!
//! The navigation engine consumes the backend through the narrow
//! [`ApiClient`] trait so the state machines can be driven by a mock in
//! tests. [`HttpApiClient`] is the production implementation: JSON over
//! HTTP against the single `/api` endpoint, action-multiplexed via the
//! query string the way the backend expects.

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::FetchError;
use crate::config::API_URL;
use crate::models::{DiskStat, Listing, Resp, SortField, Thumb};
use crate::utils::{fetch_json, post_json};

/// Async backend interface consumed by the navigation engine.
pub trait ApiClient {
    /// Read a directory, optionally filtered by a substring match on name.
    async fn list(&self, path: &str, search: Option<&str>) -> Result<Listing, FetchError>;

    /// Shallow read used for the in-place subtree preview.
    async fn list_children(&self, path: &str) -> Result<Listing, FetchError>;

    /// Generate or fetch a preview descriptor. `Ok(None)` means "no
    /// preview available" and must not be cached as a permanent negative.
    async fn thumbnail(&self, path: &str) -> Result<Option<Thumb>, FetchError>;

    /// Apply a bulk operation to the given selection in `dir`.
    async fn operation(
        &self,
        action: &str,
        dir: &str,
        files: &HashMap<String, bool>,
    ) -> Result<(), FetchError>;

    /// Advisory disk usage; callers degrade silently on failure.
    async fn disk_usage(&self) -> Result<Vec<DiskStat>, FetchError>;

    /// Session-scoped sort order, persisted server-side; callers must
    /// re-fetch the listing afterwards.
    async fn sort_preference(&self, field: SortField, descending: bool)
    -> Result<(), FetchError>;
}

/// Browser-history collaborator: navigation pushes the new path as the
/// visible location so native back/forward works. Expand/collapse never
/// pushes.
pub trait HistoryPort {
    fn push(&self, path: &str);
}

/// `HistoryPort` backed by `history.pushState`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserHistory;

impl HistoryPort for BrowserHistory {
    fn push(&self, path: &str) {
        crate::utils::dom::push_location(path);
    }
}

// =============================================================================
// HTTP implementation
// =============================================================================

#[derive(Serialize)]
struct ListRequest<'a> {
    path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    list: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    listdir: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
}

#[derive(Serialize)]
struct ThumbRequest<'a> {
    path: &'a str,
}

#[derive(Serialize)]
struct OperationRequest<'a> {
    files: &'a HashMap<String, bool>,
    dir: &'a str,
    action: &'a str,
}

/// JSON-over-HTTP `ApiClient` against the backend's `/api` endpoint.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpApiClient;

impl HttpApiClient {
    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        action: &str,
        body: &B,
    ) -> Result<T, FetchError> {
        let url = format!("{}?action={}", API_URL, action);
        let resp: Resp<serde_json::Value> = post_json(&url, body).await?;
        unwrap_envelope(resp)
    }
}

/// Check the `{Code, Data}` envelope; a non-zero code carries an error
/// message in place of data.
fn unwrap_envelope<T: DeserializeOwned>(resp: Resp<serde_json::Value>) -> Result<T, FetchError> {
    if resp.code != 0 {
        let msg = resp.data.as_str().unwrap_or_default().to_string();
        return Err(FetchError::ApiError(resp.code, msg));
    }
    serde_json::from_value(resp.data).map_err(|e| FetchError::JsonParseError(e.to_string()))
}

impl ApiClient for HttpApiClient {
    async fn list(&self, path: &str, search: Option<&str>) -> Result<Listing, FetchError> {
        let body = ListRequest {
            path,
            list: Some("read"),
            listdir: None,
            search,
        };
        self.post("list", &body).await
    }

    async fn list_children(&self, path: &str) -> Result<Listing, FetchError> {
        let body = ListRequest {
            path,
            list: None,
            listdir: Some("find"),
            search: None,
        };
        self.post("list", &body).await
    }

    async fn thumbnail(&self, path: &str) -> Result<Option<Thumb>, FetchError> {
        let resp: Resp<serde_json::Value> = post_json(
            &format!("{}?action=thumb", API_URL),
            &ThumbRequest { path },
        )
        .await?;
        if resp.code != 0 {
            let msg = resp.data.as_str().unwrap_or_default().to_string();
            return Err(FetchError::ApiError(resp.code, msg));
        }
        // The backend answers with an empty string when it has no preview.
        if resp.data.as_str().is_some_and(str::is_empty) {
            return Ok(None);
        }
        serde_json::from_value(resp.data)
            .map(Some)
            .map_err(|e| FetchError::JsonParseError(e.to_string()))
    }

    async fn operation(
        &self,
        action: &str,
        dir: &str,
        files: &HashMap<String, bool>,
    ) -> Result<(), FetchError> {
        let body = OperationRequest { files, dir, action };
        let resp: Resp<serde_json::Value> =
            post_json(&format!("{}?action=operation", API_URL), &body).await?;
        if resp.code != 0 {
            let msg = resp.data.as_str().unwrap_or_default().to_string();
            return Err(FetchError::ApiError(resp.code, msg));
        }
        Ok(())
    }

    async fn disk_usage(&self) -> Result<Vec<DiskStat>, FetchError> {
        // The df endpoint writes the raw stats array without the
        // `{Code, Data}` envelope the other endpoints use.
        fetch_json(&format!("{}?action=df", API_URL)).await
    }

    async fn sort_preference(
        &self,
        field: SortField,
        descending: bool,
    ) -> Result<(), FetchError> {
        let desc = if descending { "1" } else { "0" };
        let url = format!(
            "{}?action=session&sortby={}&desc={}",
            API_URL,
            field.as_str(),
            desc
        );
        let _: Resp<serde_json::Value> = fetch_json(&url).await?;
        Ok(())
    }
}
