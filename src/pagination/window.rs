//! Page window calculation
//!
//! A [`PageWindow`] is recomputed from four integers on every call: total item
//! count, requested page, page size and window size. It never fails; inputs
//! that arrive as strings go through [`parse_int`] and are defaulted first.

use serde::{Deserialize, Serialize};

/// Default number of items per page when none is configured
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Default number of page-number controls shown at once
pub const DEFAULT_WINDOW_SIZE: u32 = 5;

/// Largest window accepted; bigger values are clamped
pub const MAX_WINDOW_SIZE: u32 = 100;

/// Bounded window of page numbers and item-index bounds for the current page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    /// Total number of items in the dataset
    pub total_items: u32,
    /// Current page, clamped into `[1, total_pages]`
    pub current_page: u32,
    /// Items per page
    pub page_size: u32,
    /// Maximum number of page-number controls
    pub max_window: u32,
    /// Number of pages, at least 1
    pub total_pages: u32,
    /// First page number in the window
    pub start_page: u32,
    /// Last page number in the window
    pub end_page: u32,
    /// Zero-based index of the first item on the current page
    pub start_index: u32,
    /// Zero-based index of the last item on the current page, `None` for an empty dataset
    pub end_index: Option<u32>,
    /// Page numbers from `start_page` to `end_page` inclusive
    pub pages: Vec<u32>,
}

impl PageWindow {
    /// Compute the window for the given inputs.
    ///
    /// A zero `page_size` or `max_window` is treated as 1 and `max_window` is
    /// clamped to [`MAX_WINDOW_SIZE`]. An empty dataset has a single empty
    /// page.
    pub fn compute(total_items: u32, current_page: u32, page_size: u32, max_window: u32) -> Self {
        let page_size = page_size.max(1);
        let max_window = max_window.clamp(1, MAX_WINDOW_SIZE);

        let total_pages = total_items.div_ceil(page_size).max(1);
        let current_page = current_page.clamp(1, total_pages);
        let half = max_window / 2;

        let (start_page, end_page) = if total_pages <= max_window {
            (1, total_pages)
        } else if current_page <= half {
            (1, max_window)
        } else if current_page >= total_pages.saturating_sub(half) {
            (total_pages - max_window + 1, total_pages)
        } else {
            // Even windows would otherwise span max_window + 1 pages
            let start = current_page - half;
            (start, start + max_window - 1)
        };

        let start_index = (current_page - 1).saturating_mul(page_size);
        let end_index = total_items
            .checked_sub(1)
            .map(|last| current_page.saturating_mul(page_size).saturating_sub(1).min(last));

        Self {
            total_items,
            current_page,
            page_size,
            max_window,
            total_pages,
            start_page,
            end_page,
            start_index,
            end_index,
            pages: (start_page..=end_page).collect(),
        }
    }

    /// Compute the window from loosely-typed inputs (URL parameters,
    /// container attributes). Malformed values fall back to defaults.
    pub fn from_strs(total_items: &str, current_page: &str, page_size: &str, max_window: &str) -> Self {
        Self::compute(
            parse_count(total_items, 0),
            parse_count(current_page, 1),
            parse_count(page_size, DEFAULT_PAGE_SIZE),
            parse_count(max_window, DEFAULT_WINDOW_SIZE),
        )
    }

    /// Whether the window contains the given page
    pub fn contains(&self, page: u32) -> bool {
        (self.start_page..=self.end_page).contains(&page)
    }

    /// Whether the current page is the first page
    pub fn is_first(&self) -> bool {
        self.current_page == 1
    }

    /// Whether the current page is the last page
    pub fn is_last(&self) -> bool {
        self.current_page == self.total_pages
    }

    /// Number of items shown on the current page
    pub fn item_count(&self) -> u32 {
        self.end_index
            .map_or(0, |end| end.saturating_sub(self.start_index) + 1)
    }
}

/// Parse the integer prefix of a string.
///
/// Accepts leading whitespace, an optional sign and then leading digits,
/// ignoring whatever follows (`"12px"` parses as 12). Returns `None` when no
/// digits are present or the value overflows.
pub fn parse_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Parse a non-negative count, falling back to `default` when the value is
/// malformed, negative or does not fit.
pub fn parse_count(value: &str, default: u32) -> u32 {
    parse_int(value)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(default)
}
