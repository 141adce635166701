//! Paged content controller
//!
//! Drives one paginated container: fetches the total count once, computes the
//! page window, and decides what each page control does. Network I/O goes
//! through a [`FeedSource`]; the synchronous `begin` / `complete` / `fail`
//! steps can also be driven by hand.

use super::state::{Completion, FeedRequest, PageAction, PagerState, PendingRequests, RequestId};
use crate::config::PagerConfig;
use crate::error::{Error, Result};
use crate::feed::{FeedPage, FeedQuery, FeedSource};
use crate::pagination::{build_controls, parse_count, PageControl, PageWindow};
use crate::theme::url_param;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::{debug, info, warn};

/// Bytes escaped in a label path segment: everything except ASCII
/// alphanumerics and `- _ . ! ~ * ' ( )`
const LABEL_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Controller for one paginated container
#[derive(Debug)]
pub struct PagerController {
    config: PagerConfig,
    state: PagerState,
    pending: PendingRequests,
    /// Page requested by the current location
    initial_page: u32,
    /// Page size used for the window; the location's `max-results` wins
    page_size: u32,
}

impl PagerController {
    /// Create a controller; the location's `page` and `max-results`
    /// parameters are read once here
    pub fn new(config: PagerConfig) -> Self {
        let location = config.current_url.as_deref().unwrap_or_default();

        let initial_page = url_param("page", location)
            .map_or(1, |p| parse_count(&p, 1))
            .max(1);
        let page_size = url_param("max-results", location)
            .map_or(config.page_size, |m| parse_count(&m, config.page_size))
            .max(1);

        Self {
            config,
            state: PagerState::Uninitialized,
            pending: PendingRequests::new(),
            initial_page,
            page_size,
        }
    }

    /// Controller configuration
    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    /// Current state
    pub fn state(&self) -> &PagerState {
        &self.state
    }

    /// Page size used for the window and page fetches
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Page requested by the current location
    pub fn initial_page(&self) -> u32 {
        self.initial_page
    }

    /// Number of requests still in flight
    pub fn pending_requests(&self) -> usize {
        self.pending.len()
    }

    // ========================================================================
    // Count
    // ========================================================================

    /// Start the pager.
    ///
    /// Returns the count request to issue, or `None` when pagination is
    /// disabled or the pager has already started.
    pub fn begin(&mut self) -> Option<FeedRequest> {
        if self.state != PagerState::Uninitialized {
            return None;
        }

        if !self.config.pagination {
            info!(pager = %self.config.name, "Pagination disabled");
            self.state = PagerState::Suppressed { total_items: None };
            return None;
        }

        let id = self.pending.issue(Completion::Count);
        self.state = PagerState::AwaitingCount;
        debug!(pager = %self.config.name, request = %id, "Issuing count request");

        Some(FeedRequest {
            id,
            query: FeedQuery::count(self.config.label.as_deref()),
        })
    }

    // ========================================================================
    // Page Fetches
    // ========================================================================

    /// What selecting `page` does, or `None` for the current page and pages
    /// outside the dataset
    pub fn action_for(&self, page: u32) -> Option<PageAction> {
        let window = self.state.window()?;
        if page == window.current_page || page == 0 || page > window.total_pages {
            return None;
        }

        if page == 1 {
            return Some(PageAction::Navigate {
                url: self.first_page_url(),
            });
        }

        Some(PageAction::Fetch {
            page,
            start_index: (page - 1).saturating_mul(self.page_size),
            max_results: self.page_size,
        })
    }

    /// Start an in-place fetch of `page`.
    ///
    /// Returns `None` when selecting the page does not fetch (current page,
    /// page 1, no window yet). Any older page request still in flight is
    /// cancelled; its response will be ignored.
    pub fn request_page(&mut self, page: u32) -> Option<FeedRequest> {
        let Some(PageAction::Fetch {
            page,
            start_index,
            max_results,
        }) = self.action_for(page)
        else {
            return None;
        };

        let cancelled = self.pending.cancel_pages();
        if cancelled > 0 {
            debug!(pager = %self.config.name, cancelled, "Superseding pending page requests");
        }

        let (window, items) = match std::mem::replace(&mut self.state, PagerState::Uninitialized) {
            PagerState::WindowComputed { window, items }
            | PagerState::Idle { window, items }
            | PagerState::AwaitingPageFetch { window, items, .. } => (window, items),
            // action_for only succeeds with a window
            other => {
                self.state = other;
                return None;
            }
        };

        let id = self.pending.issue(Completion::Page { page });
        self.state = PagerState::AwaitingPageFetch {
            window,
            items,
            requested_page: page,
        };
        debug!(pager = %self.config.name, request = %id, page, "Issuing page request");

        Some(FeedRequest {
            id,
            query: FeedQuery::page(self.config.label.as_deref(), start_index, max_results),
        })
    }

    // ========================================================================
    // Completion
    // ========================================================================

    /// Apply a response. Returns `false` when the request is unknown or was
    /// superseded, in which case the response is ignored.
    pub fn complete(&mut self, id: RequestId, response: FeedPage) -> bool {
        let Some(completion) = self.pending.take(id) else {
            debug!(pager = %self.config.name, request = %id, "Ignoring stale response");
            return false;
        };

        match completion {
            Completion::Count => self.apply_count(response.total_items),
            Completion::Page { page } => self.apply_page(page, response),
        }
        true
    }

    /// Record a failed request. The state is left as it was.
    pub fn fail(&mut self, id: RequestId, error: &Error) {
        if self.pending.take(id).is_some() {
            warn!(
                pager = %self.config.name,
                request = %id,
                state = %self.state,
                retryable = error.is_retryable(),
                "Feed request failed: {error}"
            );
        }
    }

    fn apply_count(&mut self, total_items: u32) {
        if self.state != PagerState::AwaitingCount {
            return;
        }

        if self.config.page_size >= total_items {
            info!(pager = %self.config.name, total_items, "Single page, pagination not needed");
            self.state = PagerState::Suppressed {
                total_items: Some(total_items),
            };
            return;
        }

        let window = PageWindow::compute(
            total_items,
            self.initial_page,
            self.page_size,
            self.config.window_size,
        );
        debug!(
            pager = %self.config.name,
            total_pages = window.total_pages,
            current_page = window.current_page,
            "Window computed"
        );
        self.state = PagerState::WindowComputed {
            window,
            items: Vec::new(),
        };
    }

    fn apply_page(&mut self, page: u32, response: FeedPage) {
        let PagerState::AwaitingPageFetch { window, .. } = &self.state else {
            return;
        };

        let total_items = if response.total_items > 0 {
            response.total_items
        } else {
            window.total_items
        };

        let window = PageWindow::compute(total_items, page, self.page_size, self.config.window_size);
        debug!(
            pager = %self.config.name,
            page = window.current_page,
            expected = window.item_count(),
            received = response.entries.len(),
            "Page applied"
        );
        self.state = PagerState::WindowComputed {
            window,
            items: response.entries,
        };
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Controls for the current window, without changing state
    pub fn controls(&self) -> Vec<PageControl> {
        self.state.window().map(build_controls).unwrap_or_default()
    }

    /// Hand the controls to the renderer; moves `WindowComputed` to `Idle`
    pub fn render(&mut self) -> Vec<PageControl> {
        if matches!(self.state, PagerState::WindowComputed { .. }) {
            if let PagerState::WindowComputed { window, items } =
                std::mem::replace(&mut self.state, PagerState::Uninitialized)
            {
                self.state = PagerState::Idle { window, items };
            }
        }
        self.controls()
    }

    /// Bookmarkable URL of page 1:
    /// `{base}[/search/label/{label}]?max-results={size}&page=1`
    pub fn first_page_url(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let label_path = self
            .config
            .label
            .as_deref()
            .map(|label| format!("/search/label/{}", utf8_percent_encode(label, LABEL_SEGMENT)))
            .unwrap_or_default();
        format!("{base}{label_path}?max-results={}&page=1", self.page_size)
    }

    // ========================================================================
    // Drivers
    // ========================================================================

    /// Start the pager against a feed and return the controls to draw.
    ///
    /// Never fails: a failed count fetch leaves the pager in `AwaitingCount`
    /// with no controls.
    pub async fn load<S: FeedSource + ?Sized>(&mut self, source: &S) -> Vec<PageControl> {
        if let Some(request) = self.begin() {
            match source.fetch(&request.query).await {
                Ok(page) => {
                    self.complete(request.id, page);
                }
                Err(e) => self.fail(request.id, &e),
            }
        }
        self.render()
    }

    /// Select a page control.
    ///
    /// Page 1 returns a `Navigate` action for the caller to follow; other
    /// pages are fetched in place and their action is returned once the page
    /// is shown. `Ok(None)` means the control has no action. A failed fetch
    /// is returned as the error and leaves the previous page displayed.
    pub async fn select<S: FeedSource + ?Sized>(
        &mut self,
        page: u32,
        source: &S,
    ) -> Result<Option<PageAction>> {
        let Some(action) = self.action_for(page) else {
            return Ok(None);
        };

        if let Some(request) = self.request_page(page) {
            let response = match source.fetch(&request.query).await {
                Ok(response) => response,
                Err(e) => {
                    self.fail(request.id, &e);
                    return Err(e);
                }
            };
            if !self.complete(request.id, response) {
                return Ok(None);
            }
            self.render();
        }

        Ok(Some(action))
    }
}

/// Load several pagers concurrently. A failure in one pager never affects the
/// others.
pub async fn load_all<S: FeedSource + ?Sized>(
    pagers: &mut [PagerController],
    source: &S,
) -> Vec<Vec<PageControl>> {
    futures::future::join_all(pagers.iter_mut().map(|pager| pager.load(source))).await
}
