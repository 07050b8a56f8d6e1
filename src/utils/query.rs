//! Query-string helpers.
//!
//! Minimal read/update of `?key=value` pairs; values are percent-decoded
//! on read. Used for the `q` (scroll-to) and `search` (filter) parameters
//! the page honors on load and keeps in sync while filtering.

/// Read one parameter from a query string (with or without leading '?').
pub fn get_param(search: &str, name: &str) -> Option<String> {
    let search = search.trim_start_matches('?');
    for pair in search.split('&') {
        let mut parts = pair.splitn(2, '=');
        if parts.next() == Some(name) {
            let raw = parts.next().unwrap_or("");
            return Some(decode(raw));
        }
    }
    None
}

/// Rebuild a query string with `name` set to `value`, preserving every
/// other pair.
pub fn set_param(search: &str, name: &str, value: &str) -> String {
    let search = search.trim_start_matches('?');
    let mut pairs: Vec<String> = search
        .split('&')
        .filter(|pair| !pair.is_empty() && pair.splitn(2, '=').next() != Some(name))
        .map(String::from)
        .collect();
    pairs.push(format!("{}={}", name, value));
    format!("?{}", pairs.join("&"))
}

/// Percent-decode a query value ('+' treated as space). Malformed escapes
/// are passed through untouched.
fn decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8(out).unwrap_or_else(|_| raw.to_string())
}

fn hex_val(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_param() {
        assert_eq!(get_param("?q=clip&search=mkv", "q").as_deref(), Some("clip"));
        assert_eq!(
            get_param("q=clip&search=mkv", "search").as_deref(),
            Some("mkv")
        );
        assert_eq!(get_param("?q=clip", "missing"), None);
        assert_eq!(get_param("", "q"), None);
    }

    #[test]
    fn test_get_param_empty_value() {
        assert_eq!(get_param("?q=", "q").as_deref(), Some(""));
    }

    #[test]
    fn test_get_param_decodes() {
        assert_eq!(
            get_param("?search=two+words", "search").as_deref(),
            Some("two words")
        );
        assert_eq!(
            get_param("?q=a%2Fb%20c", "q").as_deref(),
            Some("a/b c")
        );
        // Malformed escape passes through.
        assert_eq!(get_param("?q=100%", "q").as_deref(), Some("100%"));
    }

    #[test]
    fn test_set_param_replaces_existing() {
        assert_eq!(set_param("?q=a&search=x", "search", "y"), "?q=a&search=y");
    }

    #[test]
    fn test_set_param_appends_new() {
        assert_eq!(set_param("?q=a", "search", "y"), "?q=a&search=y");
        assert_eq!(set_param("", "search", "y"), "?search=y");
    }
}
