//! Pagination controls
//!
//! Projects a [`PageWindow`] onto the ordered list of controls a renderer
//! draws. Controls carry only the target page; what selecting one does is
//! decided by the pager controller.

use super::window::PageWindow;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of pagination control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    /// Step back one page
    Previous,
    /// Jump to page 1 when the window does not include it
    First,
    /// A page number inside the window
    Number,
    /// Jump to the last page when the window does not include it
    Last,
    /// Step forward one page
    Next,
}

/// A single pagination control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageControl {
    /// Control kind
    pub kind: ControlKind,
    /// Page this control points at
    pub page: u32,
    /// Whether this control points at the current page
    pub is_current: bool,
}

impl PageControl {
    fn new(kind: ControlKind, page: u32, current_page: u32) -> Self {
        Self {
            kind,
            page,
            // Arrows always act, even though they are never the current page
            is_current: matches!(kind, ControlKind::First | ControlKind::Number | ControlKind::Last)
                && page == current_page,
        }
    }

    /// Text shown on the control
    pub fn label(&self) -> String {
        match self.kind {
            ControlKind::Previous => "\u{2039}".to_string(),
            ControlKind::Next => "\u{203a}".to_string(),
            ControlKind::First => format!("{} . .", self.page),
            ControlKind::Last => format!(". . {}", self.page),
            ControlKind::Number => self.page.to_string(),
        }
    }

    /// Whether selecting this control triggers an action
    pub fn is_actionable(&self) -> bool {
        !self.is_current
    }
}

impl fmt::Display for PageControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_current {
            write!(f, "[{}]", self.label())
        } else {
            write!(f, "{}", self.label())
        }
    }
}

/// Build the controls for a window.
///
/// Order: previous, jump-to-first, page numbers, jump-to-last, next.
pub fn build_controls(window: &PageWindow) -> Vec<PageControl> {
    let current = window.current_page;
    let mut controls = Vec::with_capacity(window.pages.len() + 4);

    if !window.is_first() {
        controls.push(PageControl::new(ControlKind::Previous, current - 1, current));
    }

    if !window.contains(1) {
        controls.push(PageControl::new(ControlKind::First, 1, current));
    }

    controls.extend(
        window
            .pages
            .iter()
            .map(|&page| PageControl::new(ControlKind::Number, page, current)),
    );

    if !window.contains(window.total_pages) {
        controls.push(PageControl::new(
            ControlKind::Last,
            window.total_pages,
            current,
        ));
    }

    if !window.is_last() {
        controls.push(PageControl::new(ControlKind::Next, current + 1, current));
    }

    controls
}

/// Render controls as a single line of text, e.g. `‹ 1 . . 3 4 [5] 6 7 . . 10 ›`
pub fn render_text(controls: &[PageControl]) -> String {
    controls
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
