use chrono::{DateTime, Local, NaiveDateTime};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Compact a counter for display: anything from 1,000 up is shown in
/// whole thousands with a `k` suffix (`1500` -> `1k`, `123456` -> `123k`).
pub fn format_count(count: u64) -> String {
    if count >= 1_000 {
        format!("{}k", count / 1_000)
    } else {
        count.to_string()
    }
}

/// Render a server timestamp as `YYYY-MM-DD HH:MM:SS`.
///
/// Offset-carrying timestamps are converted to local time; naive ones are
/// shown as-is. Empty input renders empty and anything unparseable is
/// passed through untouched.
pub fn format_datetime(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(DISPLAY_FORMAT).to_string();
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format(DISPLAY_FORMAT).to_string();
        }
    }

    raw.to_string()
}

/// Keep at most `max_chars` characters.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
