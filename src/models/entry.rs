//! Wire types for the file-browsing backend.
//!
//! Field names mirror the backend's JSON: listing payloads use PascalCase
//! keys inside a `{Code, Data}` envelope, disk-usage stats use the
//! camelCase keys of the stats library the backend wraps.

use serde::{Deserialize, Serialize};

/// Response envelope used by every API endpoint.
///
/// A non-zero `code` carries an error message in place of real data on the
/// backend side; callers treat it as a failed fetch.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Resp<T> {
    #[serde(default)]
    pub code: i32,
    pub data: T,
}

/// Per-entry metadata stored next to the files on the backend.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MetaInfo {
    /// Display-highlight tag (Bootstrap table class suffix). Mutable on the
    /// client: the highlight reconciler rewrites it after every state change.
    pub label: String,
    pub tags: Vec<String>,
    pub star: bool,
}

/// One listed file-system object.
///
/// Identity is `path`; `name` is unique only within its parent directory.
/// `hash` is a stable content key used as scroll anchor and thumbnail
/// cache key.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Entry {
    pub name: String,
    pub path: String,
    pub hash: String,
    pub size: i64,
    #[serde(rename = "SizeH")]
    pub size_h: String,
    pub is_dir: bool,
    pub is_image: bool,
    /// RFC3339 modification time as reported by the backend.
    pub mod_time: String,
    #[serde(rename = "ModTimeH")]
    pub mod_time_h: String,
    /// Optional precomputed link; empty when absent.
    pub short_cut: String,
    pub thumb_link: String,
    pub description: String,
    pub tags: Vec<String>,
    pub meta: MetaInfo,
}

impl Entry {
    /// Tags sorted for display; the backend does not guarantee order.
    pub fn sorted_tags(&self) -> Vec<String> {
        let mut tags = self.tags.clone();
        tags.sort();
        tags
    }
}

/// Result of listing one directory.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Listing {
    pub dir: String,
    /// Backend-reported parent path; empty at a virtual root. Authoritative
    /// for up-navigation (virtual roots need not match string slicing).
    pub up_dir: String,
    pub hash: String,
    pub files: Vec<Entry>,
}

/// Thumbnail descriptor returned by the thumb endpoint.
///
/// `width`/`height` are zero when the backend could not decode the image.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Thumb {
    pub path: String,
    pub width: u32,
    pub height: u32,
}

/// One mount's usage as reported by the disk-usage endpoint.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiskStat {
    pub path: String,
    pub fstype: String,
    pub total: u64,
    pub free: u64,
    pub used: u64,
    pub used_percent: f64,
}

/// Sortable listing fields accepted by the session endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Name,
    Size,
    Time,
}

impl SortField {
    /// Query-parameter value for the session endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Size => "size",
            Self::Time => "time",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_deserializes_backend_shape() {
        let json = r#"{
            "Code": 0,
            "Data": {
                "Dir": "/movies",
                "UpDir": "/",
                "Hash": "abc",
                "Files": [
                    {
                        "Name": "clip",
                        "Path": "/movies/clip",
                        "Hash": "h1",
                        "Size": 42,
                        "SizeH": "42B",
                        "IsDir": true,
                        "IsImage": false,
                        "ModTime": "2024-01-01T00:00:00Z",
                        "ModTimeH": "3 days",
                        "ShortCut": "",
                        "Tags": ["b", "a"],
                        "Meta": {"Label": "info", "Tags": ["m"], "Star": true}
                    }
                ]
            }
        }"#;
        let resp: Resp<Listing> = serde_json::from_str(json).unwrap();
        assert_eq!(resp.code, 0);
        assert_eq!(resp.data.dir, "/movies");
        assert_eq!(resp.data.up_dir, "/");
        let entry = &resp.data.files[0];
        assert!(entry.is_dir);
        assert_eq!(entry.meta.label, "info");
        assert!(entry.meta.star);
        assert_eq!(entry.meta.tags, vec!["m"]);
        assert_eq!(entry.sorted_tags(), vec!["a", "b"]);
    }

    #[test]
    fn test_missing_fields_default() {
        let entry: Entry = serde_json::from_str(r#"{"Name": "x"}"#).unwrap();
        assert_eq!(entry.name, "x");
        assert!(!entry.is_dir);
        assert_eq!(entry.meta, MetaInfo::default());
    }

    #[test]
    fn test_disk_stat_keys() {
        let json = r#"{"path": "/", "fstype": "ext4", "total": 100, "free": 5,
                       "used": 95, "usedPercent": 95.0}"#;
        let stat: DiskStat = serde_json::from_str(json).unwrap();
        assert_eq!(stat.used_percent, 95.0);
    }

    #[test]
    fn test_disk_stats_arrive_as_bare_array() {
        // Unlike every other endpoint, df answers without the
        // `{Code, Data}` envelope.
        let json = r#"[
            {"path": "/", "fstype": "ext4", "total": 100, "free": 5,
             "used": 95, "usedPercent": 95.0},
            {"path": "/mnt", "fstype": "xfs", "total": 10, "free": 9,
             "used": 1, "usedPercent": 10.0}
        ]"#;
        let stats: Vec<DiskStat> = serde_json::from_str(json).unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[1].path, "/mnt");
        assert!(serde_json::from_str::<Resp<Vec<DiskStat>>>(json).is_err());
    }
}
