//! Theme helpers
//!
//! Small string-level helpers the theme applies to feed data and to the
//! current location: query parameter lookup, site URL normalisation,
//! thumbnail resizing, TOC anchors and paged titles.

mod image;
mod title;
mod toc;
mod url;

pub use image::{resize_thumbnail, scaled_size, DEFAULT_PIXEL_RATIO};
pub use title::paged_title;
pub use toc::{build_toc, toc_anchor, TocItem};
pub use url::{normalize_site_url, url_param};
