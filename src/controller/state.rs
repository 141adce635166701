//! Pager state and pending request registry

use crate::feed::{FeedEntry, FeedQuery};
use crate::pagination::PageWindow;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// State Machine
// ============================================================================

/// State of one pager instance.
///
/// ```text
/// Uninitialized ──► AwaitingCount ──► WindowComputed ──► Idle
///       │                 │                  ▲             │
///       │                 │                  │             ▼
///       └──► Suppressed ◄─┘                  └── AwaitingPageFetch
/// ```
///
/// A failed fetch leaves `AwaitingCount` or `AwaitingPageFetch` in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PagerState {
    /// Nothing fetched yet
    Uninitialized,
    /// Count fetch in flight
    AwaitingCount,
    /// Window known, controls not yet rendered
    WindowComputed {
        /// Computed window
        window: PageWindow,
        /// Items fetched for the current page
        items: Vec<FeedEntry>,
    },
    /// Controls rendered and wired
    Idle {
        /// Rendered window
        window: PageWindow,
        /// Items fetched for the current page
        items: Vec<FeedEntry>,
    },
    /// Page fetch in flight; the previous window and items stay displayed
    AwaitingPageFetch {
        /// Window still displayed
        window: PageWindow,
        /// Items still displayed
        items: Vec<FeedEntry>,
        /// Page being fetched
        requested_page: u32,
    },
    /// Pagination not needed or turned off; the container is shown as is
    Suppressed {
        /// Item count, when it was fetched
        total_items: Option<u32>,
    },
}

impl PagerState {
    /// Short state name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::AwaitingCount => "awaiting_count",
            Self::WindowComputed { .. } => "window_computed",
            Self::Idle { .. } => "idle",
            Self::AwaitingPageFetch { .. } => "awaiting_page_fetch",
            Self::Suppressed { .. } => "suppressed",
        }
    }

    /// Current window, if one has been computed
    pub fn window(&self) -> Option<&PageWindow> {
        match self {
            Self::WindowComputed { window, .. }
            | Self::Idle { window, .. }
            | Self::AwaitingPageFetch { window, .. } => Some(window),
            _ => None,
        }
    }

    /// Items currently displayed in place of the server-rendered list
    pub fn items(&self) -> &[FeedEntry] {
        match self {
            Self::WindowComputed { items, .. }
            | Self::Idle { items, .. }
            | Self::AwaitingPageFetch { items, .. } => items,
            _ => &[],
        }
    }

    /// Whether a fetch is in flight
    pub fn is_awaiting(&self) -> bool {
        matches!(self, Self::AwaitingCount | Self::AwaitingPageFetch { .. })
    }
}

impl fmt::Display for PagerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Actions
// ============================================================================

/// What selecting a page control does
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PageAction {
    /// Full navigation to a bookmarkable URL
    Navigate {
        /// Target URL
        url: String,
    },
    /// In-place fetch of one page
    Fetch {
        /// Page being fetched
        page: u32,
        /// Zero-based offset of its first item
        start_index: u32,
        /// Page size
        max_results: u32,
    },
}

// ============================================================================
// Pending Requests
// ============================================================================

/// Identifier of one feed request issued by a pager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What to do with a response when it arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Total count for the window
    Count,
    /// Items of the given page
    Page {
        /// Requested page
        page: u32,
    },
}

/// A feed request the pager wants issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    /// Id to report the outcome under
    pub id: RequestId,
    /// Query to send
    pub query: FeedQuery,
}

/// Registry of in-flight requests, keyed by request id.
///
/// Entries are removed when their request completes, fails or is superseded,
/// so the registry only ever holds live requests.
#[derive(Debug, Default)]
pub struct PendingRequests {
    next_id: u64,
    pending: HashMap<RequestId, Completion>,
}

impl PendingRequests {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a request and return its id
    pub fn issue(&mut self, completion: Completion) -> RequestId {
        self.next_id += 1;
        let id = RequestId(self.next_id);
        self.pending.insert(id, completion);
        id
    }

    /// Remove and return the completion for a request
    pub fn take(&mut self, id: RequestId) -> Option<Completion> {
        self.pending.remove(&id)
    }

    /// Drop every pending page request, returning how many were dropped
    pub fn cancel_pages(&mut self) -> usize {
        let before = self.pending.len();
        self.pending
            .retain(|_, completion| matches!(completion, Completion::Count));
        before - self.pending.len()
    }

    /// Whether a request is still pending
    pub fn contains(&self, id: RequestId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Number of pending requests
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
