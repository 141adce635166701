//! Feed module
//!
//! Count and page queries against the blog's JSON summary feed.
//!
//! # Overview
//!
//! - [`FeedQuery`] - label, `start-index` and `max-results` of one request
//! - [`FeedPage`] - total item count plus the decoded entries
//! - [`FeedSource`] - async trait the pager fetches through
//! - [`BloggerFeed`] - HTTP implementation

mod source;
mod types;

pub use source::{BloggerFeed, FeedSource};
pub use types::{FeedEntry, FeedPage, FeedQuery};
