//! Pager helpers: page-number window, row range and page-size options.

use serde::{Deserialize, Serialize};
use std::fmt;
use tabula_core::PaginationState;

/// Page numbers to render, at most `max_buttons` of them.
///
/// With the default window of 5:
/// - `total_pages <= 5`: every page
/// - `page <= 3`: pages `1..=5`
/// - `page >= total_pages - 2`: the last 5 pages
/// - otherwise `page - 2..=page + 2`
#[must_use]
pub fn page_window(page: usize, total_pages: usize, max_buttons: usize) -> Vec<usize> {
    if total_pages == 0 || max_buttons == 0 {
        return Vec::new();
    }
    if total_pages <= max_buttons {
        return (1..=total_pages).collect();
    }

    let page = page.clamp(1, total_pages);
    let before = max_buttons / 2;
    let after = max_buttons - 1 - before;

    let start = if page <= before + 1 {
        1
    } else if page.saturating_add(after) >= total_pages {
        total_pages - max_buttons + 1
    } else {
        page - before
    };
    (start..=start + (max_buttons - 1)).collect()
}

/// 1-based inclusive range of rows shown on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// First row ordinal, 0 when there are no rows
    pub first: usize,
    /// Last row ordinal, 0 when there are no rows
    pub last: usize,
    /// Total rows
    pub total: usize,
}

impl PageInfo {
    /// Row range for a pagination state.
    #[must_use]
    pub fn from_state(state: &PaginationState) -> Self {
        let range = state.slice_range(state.total);
        if range.is_empty() {
            return Self {
                first: 0,
                last: 0,
                total: state.total,
            };
        }
        Self {
            first: range.start + 1,
            last: range.end,
            total: state.total,
        }
    }

    /// Check if the page shows no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.last == 0
    }
}

impl fmt::Display for PageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "0 of {}", self.total)
        } else {
            write!(f, "{}-{} of {}", self.first, self.last, self.total)
        }
    }
}

/// Page-size selector options, always including the current limit.
#[must_use]
pub fn page_size_options(configured: &[usize], current: usize) -> Vec<usize> {
    let mut options: Vec<usize> = configured.iter().copied().filter(|&n| n > 0).collect();
    if current > 0 && !options.contains(&current) {
        options.push(current);
    }
    options.sort_unstable();
    options.dedup();
    options
}
