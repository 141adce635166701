//! Feed types
//!
//! Domain types for feed queries and results, plus the serde model of the
//! blog platform's JSON feed they are decoded from.

use crate::error::{Error, Result};
use crate::pagination::{parse_count, parse_int};
use chrono::{DateTime, Datelike, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Query
// ============================================================================

/// Parameters of a single feed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedQuery {
    /// Restrict the feed to one label
    pub label: Option<String>,
    /// Offset into the dataset (`start-index`), omitted when `None`
    pub start_index: Option<u32>,
    /// Page size (`max-results`)
    pub max_results: u32,
}

impl FeedQuery {
    /// Query that only asks for the total item count
    pub fn count(label: Option<&str>) -> Self {
        Self {
            label: label.map(str::to_string),
            start_index: None,
            max_results: 1,
        }
    }

    /// Query for one page of entries
    pub fn page(label: Option<&str>, start_index: u32, max_results: u32) -> Self {
        Self {
            label: label.map(str::to_string),
            start_index: Some(start_index),
            max_results,
        }
    }

    /// Query for the newest `max_results` entries
    pub fn latest(label: Option<&str>, max_results: u32) -> Self {
        Self {
            label: label.map(str::to_string),
            start_index: None,
            max_results,
        }
    }
}

// ============================================================================
// Results
// ============================================================================

/// Summary of one feed entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    /// Permalink (the last link of the entry)
    pub url: String,
    /// Entry title
    pub title: String,
    /// Trimmed summary text
    pub summary: String,
    /// Thumbnail image URL
    pub thumbnail: Option<String>,
    /// First author's display name
    pub author: Option<String>,
    /// Comment count
    pub comments: Option<u32>,
    /// Labels attached to the entry
    pub labels: Vec<String>,
    /// Publication timestamp
    pub published: Option<DateTime<FixedOffset>>,
}

impl FeedEntry {
    /// Publication date as `Y/M/D` without zero padding, e.g. `2024/3/7`
    pub fn date_path(&self) -> Option<String> {
        self.published
            .map(|p| format!("{}/{}/{}", p.year(), p.month(), p.day()))
    }
}

/// One decoded feed response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedPage {
    /// Total number of items matching the query
    pub total_items: u32,
    /// Labels known to the feed
    pub labels: Vec<String>,
    /// Entries in feed order
    pub entries: Vec<FeedEntry>,
}

impl FeedPage {
    /// Decode a feed response body.
    ///
    /// A body without a `feed` object is a decode error; missing counts or
    /// entries decode as zero and empty.
    pub fn from_json(body: &Value) -> Result<Self> {
        let raw: RawResponse = serde_json::from_value(body.clone())
            .map_err(|e| Error::decode(format!("unexpected feed shape: {e}")))?;
        let feed = raw
            .feed
            .ok_or_else(|| Error::decode("response has no 'feed' object"))?;
        Ok(feed.into())
    }

    /// Whether the page has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Wire Model
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    feed: Option<RawFeed>,
}

#[derive(Debug, Default, Deserialize)]
struct RawFeed {
    #[serde(rename = "openSearch$totalResults", default)]
    total_results: Option<RawText>,
    #[serde(default)]
    category: Vec<RawCategory>,
    #[serde(default)]
    entry: Vec<RawEntry>,
}

/// `{"$t": ...}` wrapper; the value may be a string or a number
#[derive(Debug, Deserialize)]
struct RawText {
    #[serde(rename = "$t", default)]
    text: Value,
}

impl RawText {
    fn as_string(&self) -> String {
        match &self.text {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    term: String,
}

#[derive(Debug, Deserialize)]
struct RawLink {
    href: String,
}

#[derive(Debug, Deserialize)]
struct RawThumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct RawAuthor {
    #[serde(default)]
    name: Option<RawText>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    link: Vec<RawLink>,
    #[serde(default)]
    title: Option<RawText>,
    #[serde(default)]
    summary: Option<RawText>,
    #[serde(rename = "media$thumbnail", default)]
    thumbnail: Option<RawThumbnail>,
    #[serde(default)]
    author: Vec<RawAuthor>,
    #[serde(rename = "thr$total", default)]
    comments: Option<RawText>,
    #[serde(default)]
    category: Vec<RawCategory>,
    #[serde(default)]
    published: Option<RawText>,
}

impl RawEntry {
    fn into_entry(self) -> Option<FeedEntry> {
        let url = self.link.into_iter().last()?.href;

        Some(FeedEntry {
            url,
            title: self.title.map(|t| t.as_string()).unwrap_or_default(),
            summary: self
                .summary
                .map(|s| s.as_string().trim().to_string())
                .unwrap_or_default(),
            thumbnail: self.thumbnail.map(|t| t.url),
            author: self
                .author
                .into_iter()
                .next()
                .and_then(|a| a.name)
                .map(|n| n.as_string()),
            comments: self
                .comments
                .and_then(|c| u32::try_from(parse_int(&c.as_string())?).ok()),
            labels: self.category.into_iter().map(|c| c.term).collect(),
            published: self
                .published
                .and_then(|p| DateTime::parse_from_rfc3339(&p.as_string()).ok()),
        })
    }
}

impl From<RawFeed> for FeedPage {
    fn from(feed: RawFeed) -> Self {
        Self {
            total_items: feed
                .total_results
                .map_or(0, |t| parse_count(&t.as_string(), 0)),
            labels: feed.category.into_iter().map(|c| c.term).collect(),
            entries: feed
                .entry
                .into_iter()
                .filter_map(RawEntry::into_entry)
                .collect(),
        }
    }
}
