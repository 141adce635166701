// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Jetpager
//!
//! Numbered pagination for blog listings backed by a JSON summary feed.
//!
//! ## Features
//!
//! - **Page Windows**: Bounded, centred window of page numbers with item bounds
//! - **Pager Controller**: Count fetch, control rendering, in-place page fetches
//! - **Stale Response Handling**: Superseded page fetches are discarded
//! - **Custom Post Lists**: Related-post widgets with label pick and shuffle
//! - **Theme Helpers**: Thumbnail resizing, TOC anchors, paged titles
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use jetpager::{BloggerFeed, PagerConfig, PagerController, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let base = "https://example.blogspot.com";
//!     let feed = BloggerFeed::new(base, Default::default())?;
//!
//!     let config = PagerConfig::new(base)
//!         .with_current_url("https://example.blogspot.com/search?max-results=10&page=3");
//!     let mut pager = PagerController::new(config);
//!
//!     // Fetch the count and draw the controls
//!     let controls = pager.load(&feed).await;
//!
//!     // Page 1 navigates, anything else is fetched in place
//!     let action = pager.select(4, &feed).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        PagerController                          │
//! │  begin() → count request    complete() → window    render()     │
//! │  action_for(page) → Navigate | Fetch    request_page(page)      │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴───────┬──────────────┬──────────┐
//! │  Pagination  │         Feed          │     HTTP     │  Theme   │
//! ├──────────────┼───────────────────────┼──────────────┼──────────┤
//! │ PageWindow   │ FeedSource            │ Retry        │ Thumbs   │
//! │ Controls     │ BloggerFeed           │ Rate Limit   │ TOC      │
//! │              │ Custom posts          │ Backoff      │ Titles   │
//! └──────────────┴───────────────────────┴──────────────┴──────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod feed;
pub mod http;
pub mod pagination;
pub mod posts;
pub mod theme;
pub mod types;

// Re-exports for convenience
pub use config::{ContainerConfig, PagerConfig, PostListConfig, SiteConfig};
pub use controller::{load_all, PageAction, PagerController, PagerState, RequestId};
pub use error::{Error, Result};
pub use feed::{BloggerFeed, FeedEntry, FeedPage, FeedQuery, FeedSource};
pub use http::{HttpClient, HttpClientConfig};
pub use pagination::{build_controls, PageControl, PageWindow};
pub use posts::{load_custom_posts, PostCollection};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
