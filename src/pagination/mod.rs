//! Pagination module
//!
//! Computes the bounded window of page numbers shown for a paged dataset and
//! projects it onto navigation controls.
//!
//! # Overview
//!
//! - [`PageWindow`] - page-number window and item-index bounds for one page
//! - [`build_controls`] - previous / first / numbers / last / next controls
//!
//! The window is centred on the current page when it fits and pinned to the
//! first or last page range otherwise.

mod controls;
mod window;

pub use controls::{build_controls, render_text, ControlKind, PageControl};
pub use window::{
    parse_count, parse_int, PageWindow, DEFAULT_PAGE_SIZE, DEFAULT_WINDOW_SIZE, MAX_WINDOW_SIZE,
};
