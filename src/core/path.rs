//! Pure path helpers for remote directory paths.
//!
//! These operate on the backend's slash-separated namespace, never on the
//! local filesystem. `parent` is advisory only: up-navigation trusts the
//! parent reported by the last listing, because virtual roots need not
//! match string slicing.

use crate::models::Entry;

/// Last non-empty path segment ("/a/b/" -> "b", "/a/b" -> "b").
pub fn dir_name(path: &str) -> &str {
    path.rsplit('/').find(|seg| !seg.is_empty()).unwrap_or("")
}

/// String-split parent path ("/a/b" -> "/a", "/a" -> "").
pub fn parent(path: &str) -> String {
    let trimmed = trim_trailing_slashes(path);
    match trimmed.rfind('/') {
        Some(idx) => trimmed[..idx].to_string(),
        None => String::new(),
    }
}

/// Strip trailing slashes without touching a lone root slash's emptiness
/// semantics ("/a/b///" -> "/a/b", "///" -> "").
pub fn trim_trailing_slashes(path: &str) -> &str {
    path.trim_end_matches('/')
}

/// Join a directory path and a child name with exactly one slash.
pub fn join(dir: &str, name: &str) -> String {
    format!("{}/{}", trim_trailing_slashes(dir), name)
}

/// Breadcrumb segments of a path ("/a/b/c" -> ["a", "b", "c"]).
pub fn segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|seg| !seg.is_empty())
        .map(String::from)
        .collect()
}

/// Path prefix for the first `count` breadcrumb segments
/// (["a","b","c"], 2 -> "/a/b").
pub fn prefix_of(segments: &[String], count: usize) -> String {
    let mut path = String::new();
    for seg in segments.iter().take(count) {
        path.push('/');
        path.push_str(seg);
    }
    if path.is_empty() {
        path.push('/');
    }
    path
}

/// Link target for an entry listed inside an expanded subtree.
///
/// Directories resolve to their browseable path under the parent entry;
/// files use their shortcut URL when present, else the statics path.
pub fn sub_link(dir: &str, parent_entry: &Entry, sub: &Entry, statics_prefix: &str) -> String {
    if sub.is_dir {
        format!(
            "{}/{}{}",
            trim_trailing_slashes(dir),
            parent_entry.name,
            sub.name
        )
    } else if !sub.short_cut.is_empty() {
        sub.short_cut.clone()
    } else {
        format!(
            "{}{}/{}{}",
            statics_prefix,
            trim_trailing_slashes(dir),
            parent_entry.name,
            sub.path
        )
    }
}
