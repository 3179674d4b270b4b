use chrono::{DateTime, Utc};

pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_display(dt: Option<&DateTime<Utc>>) -> String {
    dt.map(|dt| dt.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn from_unix(secs: i64, nanos: u32) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(secs, nanos)
}
