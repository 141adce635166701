//! Feed sources
//!
//! [`FeedSource`] is the seam between the pager and the network. The HTTP
//! implementation, [`BloggerFeed`], talks to the blog platform's summary feed.

use super::types::{FeedPage, FeedQuery};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Asynchronous provider of feed pages
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch one page of the feed
    async fn fetch(&self, query: &FeedQuery) -> Result<FeedPage>;
}

/// Summary feed of a hosted blog
#[derive(Debug)]
pub struct BloggerFeed {
    client: HttpClient,
    base_url: Url,
}

impl BloggerFeed {
    /// Create a feed for the blog at `base_url` (e.g. `https://example.blogspot.com`)
    pub fn new(base_url: &str, http: HttpClientConfig) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::invalid_value(
                "base_url",
                format!("'{base_url}' cannot carry a path"),
            ));
        }

        Ok(Self {
            client: HttpClient::with_config(http)?,
            base_url,
        })
    }

    /// Blog base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Feed URL, label-scoped when a label is given:
    /// `{base}/feeds/posts/summary/` or `{base}/feeds/posts/summary/-/{label}/`
    pub fn feed_url(&self, label: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["feeds", "posts", "summary"]);
            if let Some(label) = label.filter(|l| !l.is_empty()) {
                segments.push("-").push(label);
            }
            segments.push("");
        }
        url
    }

    /// Request parameters for a query
    pub fn request_config(query: &FeedQuery) -> RequestConfig {
        let mut config = RequestConfig::new().query("alt", "json");
        if let Some(start) = query.start_index {
            config = config.query("start-index", start);
        }
        config.query("max-results", query.max_results)
    }
}

#[async_trait]
impl FeedSource for BloggerFeed {
    async fn fetch(&self, query: &FeedQuery) -> Result<FeedPage> {
        let url = self.feed_url(query.label.as_deref());
        debug!(
            "Fetching feed {} (start-index={:?}, max-results={})",
            url, query.start_index, query.max_results
        );

        let body: Value = self
            .client
            .get_json(url.as_str(), Self::request_config(query))
            .await?;
        let page = FeedPage::from_json(&body)?;

        debug!(
            "Feed returned {} entries of {} total",
            page.entries.len(),
            page.total_items
        );
        Ok(page)
    }
}
