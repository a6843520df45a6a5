use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format a backend date string as e.g. "May 01, 2024".
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS` and `YYYY-MM-DD`; anything else
/// is returned unchanged.
pub fn format_date(date: &str) -> String {
    const DISPLAY: &str = "%b %d, %Y";

    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        dt.format(DISPLAY).to_string()
    } else if let Ok(dt) = NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%.f") {
        dt.format(DISPLAY).to_string()
    } else if let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        d.format(DISPLAY).to_string()
    } else {
        date.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
        assert_eq!(truncate_string("Hello", 3), "Hel");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-05-01"), "May 01, 2024");
        assert_eq!(format_date("2024-05-01T10:30:00Z"), "May 01, 2024");
        assert_eq!(format_date("2024-05-01T10:30:00.123"), "May 01, 2024");
        assert_eq!(format_date("next week"), "next week");
    }
}
