//! Display helpers shared by the link list, all-links and dashboard views.

use chrono::{DateTime, Local, TimeZone, Utc};
use url::Url;

use crate::models::{LinkRecord, RegistryEntry, build_short_url};

pub const NEVER: &str = "Never";

/// Host of `url` with its first `www.` removed, or `"link"` if it does not parse.
pub fn domain_label(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.replacen("www.", "", 1)))
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| "link".to_string())
}

/// `Jan 5, 2024, 09:30 AM`
pub fn format_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format("%b %-d, %Y, %I:%M %p").to_string()
}

/// Local-time rendering; `"Never"` when absent.
pub fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => format_datetime(&ts.with_timezone(&Local)),
        None => NEVER.to_string(),
    }
}

/// Month and day only, e.g. `Jan 5`.
pub fn format_date_short(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%b %-d").to_string()
}

/// One rendered link row.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkCard {
    pub title: String,
    pub short_code: String,
    pub short_url: String,
    pub long_url: String,
    pub created: String,
    pub last_clicked: String,
    /// `None` until live data is available.
    pub clicks: Option<u64>,
}

impl LinkCard {
    /// Registry row, optionally enriched with the live record.
    pub fn from_entry(entry: &RegistryEntry, live: Option<&LinkRecord>) -> Self {
        Self {
            title: format!("{} – link", domain_label(&entry.long_url)),
            short_code: entry.short_code.clone(),
            short_url: entry.short_url.clone(),
            long_url: entry.long_url.clone(),
            created: live
                .map(|r| format_timestamp(Some(r.created_at)))
                .unwrap_or_else(|| NEVER.to_string()),
            last_clicked: format_timestamp(live.and_then(|r| r.last_clicked_at)),
            clicks: live.map(|r| r.clicks),
        }
    }

    /// Row from the server-wide listing.
    pub fn from_record(record: &LinkRecord, base_url: &str) -> Self {
        Self {
            title: format!("{} – link", domain_label(&record.long_url)),
            short_code: record.short_code.clone(),
            short_url: build_short_url(base_url, &record.short_code),
            long_url: record.long_url.clone(),
            created: format_timestamp(Some(record.created_at)),
            last_clicked: format_timestamp(record.last_clicked_at),
            clicks: Some(record.clicks),
        }
    }
}
