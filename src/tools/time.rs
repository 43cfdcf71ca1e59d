// src/tools/time.rs
use chrono::{FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;

use crate::core::error::{Result, ToolError};

/// Selectable zones with their fixed standard-time offsets in hours.
/// Daylight saving is not modelled.
pub const TIMEZONES: &[(&str, i32)] = &[
    ("Asia/Shanghai", 8),
    ("Asia/Tokyo", 9),
    ("Asia/Seoul", 9),
    ("Asia/Singapore", 8),
    ("Asia/Hong_Kong", 8),
    ("America/New_York", -5),
    ("America/Los_Angeles", -8),
    ("America/Chicago", -6),
    ("Europe/London", 0),
    ("Europe/Paris", 1),
    ("Europe/Berlin", 1),
    ("Australia/Sydney", 11),
    ("UTC", 0),
];

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    pub timestamp: i64,
    pub timezone: String,
    pub datetime: String,
}

pub fn zone_offset(zone: &str) -> Result<FixedOffset> {
    let hours = TIMEZONES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(zone.trim()))
        .map(|(_, hours)| *hours)
        .ok_or_else(|| ToolError::UnknownTimezone(zone.to_string()))?;
    FixedOffset::east_opt(hours * 3600).ok_or_else(|| ToolError::UnknownTimezone(zone.to_string()))
}

pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Renders Unix seconds as `YYYY-MM-DD HH:MM:SS` in `zone`.
pub fn format_timestamp(secs: i64, zone: &str) -> Result<String> {
    let offset = zone_offset(zone)?;
    let datetime = offset
        .timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| ToolError::MalformedInput(format!("timestamp {} is out of range", secs)))?;
    Ok(datetime.format(DISPLAY_FORMAT).to_string())
}

pub fn convert(secs: i64, zone: &str) -> Result<Conversion> {
    Ok(Conversion {
        timestamp: secs,
        timezone: zone.to_string(),
        datetime: format_timestamp(secs, zone)?,
    })
}

/// Inverse of [`format_timestamp`]. A bare date means midnight.
pub fn parse_datetime(text: &str, zone: &str) -> Result<i64> {
    let offset = zone_offset(zone)?;
    let text = text.trim();

    let naive = NaiveDateTime::parse_from_str(text, DISPLAY_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map(|date| date.and_hms_opt(0, 0, 0).unwrap_or_default())
        })
        .map_err(|_| {
            ToolError::MalformedInput(format!(
                "expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS, got '{}'",
                text
            ))
        })?;

    offset
        .from_local_datetime(&naive)
        .single()
        .map(|datetime| datetime.timestamp())
        .ok_or_else(|| ToolError::MalformedInput(format!("'{}' is not representable", text)))
}

/// Absolute distance between two timestamps, e.g. `1d 2h 3m 4s`.
/// Zero units are skipped, but seconds are shown when nothing else is.
pub fn format_time_diff(a: i64, b: i64) -> String {
    let diff = a.abs_diff(b);
    let days = diff / 86_400;
    let hours = (diff % 86_400) / 3_600;
    let minutes = (diff % 3_600) / 60;
    let seconds = diff % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if seconds > 0 || parts.is_empty() {
        parts.push(format!("{}s", seconds));
    }
    parts.join(" ")
}
