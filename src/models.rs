//! Shared data types
//!
//! `LinkRecord` mirrors the server's JSON (snake_case). `RegistryEntry` is the
//! client-owned projection persisted in the local registry document.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned identifier. Kept in the JSON form it arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkId {
    Numeric(u64),
    Text(String),
}

impl LinkId {
    /// Compare by rendered value, so `1` and `"1"` name the same link.
    pub fn same_as(&self, other: &LinkId) -> bool {
        match (self, other) {
            (LinkId::Numeric(a), LinkId::Numeric(b)) => a == b,
            (LinkId::Text(a), LinkId::Text(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkId::Numeric(n) => write!(f, "{}", n),
            LinkId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for LinkId {
    fn from(n: u64) -> Self {
        LinkId::Numeric(n)
    }
}

impl From<&str> for LinkId {
    fn from(s: &str) -> Self {
        LinkId::Text(s.to_string())
    }
}

impl FromStr for LinkId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<u64>()
            .map(LinkId::Numeric)
            .unwrap_or_else(|_| LinkId::Text(s.to_string())))
    }
}

/// Authoritative link as returned by the link API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: LinkId,
    pub short_code: String,
    pub long_url: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub clicks: u64,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "lenient_optional_timestamp")]
    pub last_clicked_at: Option<DateTime<Utc>>,
}

/// Body of a 201 from `POST /api/links`. Only the id is needed; any other
/// fields the server sends are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedLink {
    pub id: LinkId,
}

/// RFC 3339, or a zone-less `YYYY-MM-DD HH:MM:SS[.fff]` (with a space or a
/// `T`) taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
}

fn lenient_optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw))),
        None => Ok(None),
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or(0))
}

/// One row of the local registry, created when the server acknowledges a create.
///
/// Older documents used lowercase `shortcode`/`longurl` keys; both are read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEntry {
    pub id: LinkId,
    #[serde(alias = "shortcode")]
    pub short_code: String,
    #[serde(alias = "longurl")]
    pub long_url: String,
    pub short_url: String,
}

impl RegistryEntry {
    pub fn from_record(record: &LinkRecord, base_url: &str) -> Self {
        Self {
            id: record.id.clone(),
            short_code: record.short_code.clone(),
            long_url: record.long_url.clone(),
            short_url: build_short_url(base_url, &record.short_code),
        }
    }
}

/// POST /api/links body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkBody<'a> {
    pub long_url: &'a str,
    pub short_code: &'a str,
}

/// Error payload the link API sends with non-success statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error_msg: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthBody {
    #[serde(default)]
    pub version: Option<String>,
}

/// Result of `GET /healthz` plus the measured round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthReport {
    pub version: String,
    pub latency: Duration,
    pub checked_at: DateTime<Utc>,
}

pub fn build_short_url(base_url: &str, short_code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), short_code)
}

/// Anything listable by short code / destination search.
pub trait Searchable {
    fn short_code(&self) -> &str;
    fn long_url(&self) -> &str;

    /// Case-insensitive substring match on either field. Empty term matches all.
    fn matches_term(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        self.short_code().to_lowercase().contains(&needle)
            || self.long_url().to_lowercase().contains(&needle)
    }
}

impl Searchable for RegistryEntry {
    fn short_code(&self) -> &str {
        &self.short_code
    }
    fn long_url(&self) -> &str {
        &self.long_url
    }
}

impl Searchable for LinkRecord {
    fn short_code(&self) -> &str {
        &self.short_code
    }
    fn long_url(&self) -> &str {
        &self.long_url
    }
}

/// Keep original order, drop non-matching items.
pub fn filter_by_term<T: Searchable + Clone>(items: &[T], term: &str) -> Vec<T> {
    items
        .iter()
        .filter(|item| item.matches_term(term))
        .cloned()
        .collect()
}
