//! Formatting utilities for display values.

/// Format a byte count for display (e.g., "1.2K", "3.4M", "5.6G").
///
/// Fallback for entries where the backend omitted the human-readable size.
pub fn format_size(bytes: i64) -> String {
    const G: f64 = 1_000_000_000.0;
    const M: f64 = 1_000_000.0;
    const K: f64 = 1_000.0;
    let b = bytes as f64;
    if b >= G {
        format!("{:.1}G", b / G)
    } else if b >= M {
        format!("{:.1}M", b / M)
    } else if b >= K {
        format!("{:.1}K", b / K)
    } else {
        format!("{}B", bytes)
    }
}

/// Format a disk-usage percentage for the header table.
pub fn format_percent(percent: f64) -> String {
    format!("{:.1}%", percent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "500B");
        assert_eq!(format_size(1_500), "1.5K");
        assert_eq!(format_size(1_500_000), "1.5M");
        assert_eq!(format_size(2_500_000_000), "2.5G");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(94.25), "94.2%");
    }
}
