//! Custom post list loader

use crate::config::PostListConfig;
use crate::error::Result;
use crate::feed::{FeedEntry, FeedQuery, FeedSource};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A post prepared for a list widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    /// Feed entry the post was built from
    #[serde(flatten)]
    pub entry: FeedEntry,
    /// Publication date as `Y/M/D`
    pub date: Option<String>,
}

impl From<FeedEntry> for PostSummary {
    fn from(entry: FeedEntry) -> Self {
        Self {
            date: entry.date_path(),
            entry,
        }
    }
}

/// Result of loading a custom post list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostCollection {
    /// Heading from the list config
    pub title: Option<String>,
    /// Posts in display order
    pub posts: Vec<PostSummary>,
    /// Labels known to the feed
    pub categories: Vec<String>,
}

impl PostCollection {
    /// Whether the collection has no posts
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// Pick the label a list is scoped to.
///
/// Several comma-separated labels yield one at random; `"false"` or an empty
/// value means the list is not scoped.
pub fn pick_label<R: Rng + ?Sized>(label: Option<&str>, rng: &mut R) -> Option<String> {
    let labels: Vec<&str> = label?
        .split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty() && *l != "false")
        .collect();

    labels.choose(rng).map(|l| (*l).to_string())
}

/// Load a custom post list.
///
/// Returns `None` when the feed reports no items. When `no_item` is set one
/// extra entry is requested, so leaving that URL out still fills the list.
pub async fn load_custom_posts<S, R>(
    source: &S,
    config: &PostListConfig,
    rng: &mut R,
) -> Result<Option<PostCollection>>
where
    S: FeedSource + ?Sized,
    R: Rng + ?Sized,
{
    let label = pick_label(config.label.as_deref(), rng);
    let max_results = if config.no_item.is_some() {
        config.items.saturating_add(1)
    } else {
        config.items
    };

    let page = source
        .fetch(&FeedQuery::latest(label.as_deref(), max_results))
        .await?;

    if page.total_items == 0 {
        debug!(list = %config.name, "Feed is empty, skipping post list");
        return Ok(None);
    }

    let mut posts: Vec<PostSummary> = page
        .entries
        .into_iter()
        .filter(|entry| config.no_item.as_deref() != Some(entry.url.as_str()))
        .take(config.items as usize)
        .map(PostSummary::from)
        .collect();

    if let Some(keep) = config.shuffle {
        posts.shuffle(rng);
        posts.truncate(keep);
    }

    debug!(list = %config.name, label = ?label, posts = posts.len(), "Loaded post list");

    Ok(Some(PostCollection {
        title: config.title.clone(),
        posts,
        categories: page.labels,
    }))
}
