//! Small helpers shared across the agent.

const KB: i64 = 1024;
const MB: i64 = KB * 1024;
const GB: i64 = MB * 1024;
const TB: i64 = GB * 1024;

/// Format a byte count the way the panel's usage log expects it
/// ("1.50GB", "512B", "0"). Whole values drop the ".00" suffix.
pub fn format_size(bytes: i64) -> String {
    if bytes == 0 {
        return "0".to_string();
    }

    let (value, unit) = if bytes >= TB {
        (bytes as f64 / TB as f64, "TB")
    } else if bytes >= GB {
        (bytes as f64 / GB as f64, "GB")
    } else if bytes >= MB {
        (bytes as f64 / MB as f64, "MB")
    } else if bytes >= KB {
        (bytes as f64 / KB as f64, "KB")
    } else {
        (bytes as f64, "B")
    };

    let mut formatted = format!("{:.2}", value);
    if let Some(stripped) = formatted.strip_suffix(".00") {
        formatted = stripped.to_string();
    }
    format!("{}{}", formatted, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_zero() {
        assert_eq!(format_size(0), "0");
    }

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(512), "512B");
    }

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(1024), "1KB");
        assert_eq!(format_size(1536), "1.50KB");
        assert_eq!(format_size(3 * MB), "3MB");
        assert_eq!(format_size(GB + GB / 2), "1.50GB");
        assert_eq!(format_size(2 * TB), "2TB");
    }

    #[test]
    fn test_format_size_trims_whole_values() {
        assert_eq!(format_size(5 * GB), "5GB");
        assert!(!format_size(5 * GB).contains(".00"));
    }
}
