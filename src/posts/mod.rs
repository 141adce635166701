//! Custom post lists
//!
//! Related-post and label widgets: a single feed request for the newest
//! posts of a label, optionally excluding the post being viewed and
//! shuffled.

mod loader;

pub use loader::{load_custom_posts, pick_label, PostCollection, PostSummary};
