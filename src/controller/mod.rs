//! Pager controller
//!
//! One [`PagerController`] per paginated container. Each controller owns its
//! state and its registry of pending feed requests, so responses can arrive in
//! any order and several pagers on a page never share state.
//!
//! # Example
//!
//! ```rust,ignore
//! use jetpager::config::PagerConfig;
//! use jetpager::controller::PagerController;
//! use jetpager::feed::BloggerFeed;
//!
//! let feed = BloggerFeed::new("https://example.blogspot.com", Default::default())?;
//! let mut pager = PagerController::new(PagerConfig::new("https://example.blogspot.com"));
//!
//! let controls = pager.load(&feed).await;
//! let action = pager.select(3, &feed).await?;
//! ```

mod pager;
mod state;

pub use pager::{load_all, PagerController};
pub use state::{Completion, FeedRequest, PageAction, PagerState, PendingRequests, RequestId};
