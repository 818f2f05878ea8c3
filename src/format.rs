use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x250?text=Event+Image";
pub const FALLBACK_LOCATION: &str = "Location not set";
pub const FALLBACK_TIME: &str = "Time not set";

static PUBLIC_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^public[\\/]").expect("valid prefix regex"));

// Long en-US date ("October 5, 2025") from the backend's ISO date string.
// Unparseable input passes through untouched.
pub fn long_date(iso: &str) -> String {
    parse_naive_date(iso)
        .map(|date| date.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| iso.to_string())
}

fn parse_naive_date(input: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}

// 12-hour clock ("7:00 PM") from a backend "HH:mm" value
pub fn time_ampm(time: Option<&str>) -> String {
    time.and_then(|t| NaiveTime::parse_from_str(t.trim(), "%H:%M").ok())
        .map(|t| t.format("%-I:%M %p").to_string())
        .unwrap_or_else(|| FALLBACK_TIME.to_string())
}

// Backend-relative paths lose their leading `public/` (or `public\`) segment
// and have backslash separators normalized before being joined onto the base
// URL. Absent paths get the fixed placeholder image.
pub fn image_url(base_url: &str, path: Option<&str>) -> String {
    let path = match path.map(str::trim) {
        Some(p) if !p.is_empty() => p,
        _ => return PLACEHOLDER_IMAGE.to_string(),
    };
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let stripped = PUBLIC_PREFIX_RE.replace(path, "");
    let normalized = stripped.replace('\\', "/");
    format!("{}/{}", base_url.trim_end_matches('/'), normalized.trim_start_matches('/'))
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
