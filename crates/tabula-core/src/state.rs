//! Table state and the ports that carry it.
//!
//! Every piece of mutable table state is read and written through a
//! [`StatePort`]. The port is either owned by the table ([`LocalState`]) or
//! lifted into the caller ([`LiftedState`]); engine logic never branches on
//! which one it was given.
//!
//! # Examples
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use tabula_core::{ColumnSizingState, LiftedState, LocalState, StatePort};
//!
//! let mut local = LocalState::new(ColumnSizingState::default());
//! local.update(&mut |s: &mut ColumnSizingState| s.set("name", 120.0));
//! assert_eq!(local.get().get("name"), Some(120.0));
//!
//! let store = Rc::new(RefCell::new(ColumnSizingState::default()));
//! let (read, write) = (Rc::clone(&store), Rc::clone(&store));
//! let mut lifted = LiftedState::new(
//!     move || read.borrow().clone(),
//!     move |next| *write.borrow_mut() = next,
//! );
//! lifted.update(&mut |s: &mut ColumnSizingState| s.set("name", 120.0));
//! assert_eq!(store.borrow().get("name"), Some(120.0));
//! ```

use crate::row::RowId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// =============================================================================
// State ports
// =============================================================================

/// Read/write access to one piece of table state.
pub trait StatePort<T> {
    /// Current value.
    fn get(&self) -> T;

    /// Replace the value.
    fn set(&mut self, value: T);

    /// Read, modify and write back in one step.
    fn update(&mut self, f: &mut dyn FnMut(&mut T)) {
        let mut value = self.get();
        f(&mut value);
        self.set(value);
    }
}

/// State owned by the table instance. Reset whenever the table is rebuilt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalState<T> {
    value: T,
}

impl<T> LocalState<T> {
    /// Create local state with an initial value.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Clone> StatePort<T> for LocalState<T> {
    fn get(&self) -> T {
        self.value.clone()
    }

    fn set(&mut self, value: T) {
        self.value = value;
    }
}

type Getter<T> = Box<dyn Fn() -> T>;
type Setter<T> = Box<dyn FnMut(T)>;

/// State owned by the caller and forwarded through a getter/setter pair.
pub struct LiftedState<T> {
    getter: Getter<T>,
    setter: Setter<T>,
}

impl<T> LiftedState<T> {
    /// Wire the port to caller storage.
    pub fn new(getter: impl Fn() -> T + 'static, setter: impl FnMut(T) + 'static) -> Self {
        Self {
            getter: Box::new(getter),
            setter: Box::new(setter),
        }
    }
}

impl<T> StatePort<T> for LiftedState<T> {
    fn get(&self) -> T {
        (self.getter)()
    }

    fn set(&mut self, value: T) {
        (self.setter)(value);
    }
}

impl<T> fmt::Debug for LiftedState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiftedState").finish_non_exhaustive()
    }
}

/// Boxed port, as stored by the table.
pub type BoxedPort<T> = Box<dyn StatePort<T>>;

// =============================================================================
// Column sizing
// =============================================================================

/// Width overrides by column id.
///
/// Columns without an entry use their default width.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSizingState {
    widths: BTreeMap<String, f32>,
}

impl ColumnSizingState {
    /// Override width for a column.
    pub fn set(&mut self, id: impl Into<String>, width: f32) {
        self.widths.insert(id.into(), width);
    }

    /// Get the override for a column, if any.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<f32> {
        self.widths.get(id).copied()
    }

    /// Drop the override for a column.
    pub fn remove(&mut self, id: &str) -> Option<f32> {
        self.widths.remove(id)
    }

    /// Drop every override.
    pub fn clear(&mut self) {
        self.widths.clear();
    }

    /// Number of overridden columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// Check if no column is overridden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Iterate overrides ordered by column id.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.widths.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

// =============================================================================
// Column visibility
// =============================================================================

/// Visibility flags by column id. Absent means visible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnVisibilityState {
    flags: BTreeMap<String, bool>,
}

impl ColumnVisibilityState {
    /// Set visibility for a column.
    pub fn set(&mut self, id: impl Into<String>, visible: bool) {
        self.flags.insert(id.into(), visible);
    }

    /// Check whether a column is visible.
    #[must_use]
    pub fn is_visible(&self, id: &str) -> bool {
        self.flags.get(id).copied().unwrap_or(true)
    }

    /// Iterate explicit entries ordered by column id.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.flags.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

// =============================================================================
// Row expansion
// =============================================================================

/// Ids of currently expanded rows.
///
/// Ids that are not in the current row set are kept but have no effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionState {
    expanded: BTreeSet<RowId>,
}

impl ExpansionState {
    /// Check whether a row is expanded.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Mark a row expanded or collapsed.
    pub fn set(&mut self, id: impl Into<RowId>, expanded: bool) {
        let id = id.into();
        if expanded {
            self.expanded.insert(id);
        } else {
            self.expanded.remove(&id);
        }
    }

    /// Collapse every row.
    pub fn clear(&mut self) {
        self.expanded.clear();
    }

    /// Number of expanded ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    /// Check if nothing is expanded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

// =============================================================================
// Sorting
// =============================================================================

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// One sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortEntry {
    /// Sorted column id
    pub column_id: String,
    /// Whether the order is reversed
    pub descending: bool,
}

impl SortEntry {
    /// Ascending sort on a column.
    #[must_use]
    pub fn ascending(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            descending: false,
        }
    }

    /// Descending sort on a column.
    #[must_use]
    pub fn descending(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            descending: true,
        }
    }

    /// Direction of this entry.
    #[must_use]
    pub const fn direction(&self) -> SortDirection {
        if self.descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }
}

/// Ordered sort keys. Only the first entry is produced by header toggling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortState {
    entries: Vec<SortEntry>,
}

impl SortState {
    /// No sorting.
    #[must_use]
    pub const fn unsorted() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Sort by a single entry.
    #[must_use]
    pub fn single(entry: SortEntry) -> Self {
        Self {
            entries: vec![entry],
        }
    }

    /// Sort by several entries, highest priority first.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = SortEntry>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Primary sort entry.
    #[must_use]
    pub fn primary(&self) -> Option<&SortEntry> {
        self.entries.first()
    }

    /// All entries.
    #[must_use]
    pub fn entries(&self) -> &[SortEntry] {
        &self.entries
    }

    /// Check if unsorted.
    #[must_use]
    pub fn is_unsorted(&self) -> bool {
        self.entries.is_empty()
    }

    /// Direction applied to a column, if it is sorted.
    #[must_use]
    pub fn direction_of(&self, column_id: &str) -> Option<SortDirection> {
        self.entries
            .iter()
            .find(|e| e.column_id == column_id)
            .map(SortEntry::direction)
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Page position and totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    /// Current page, 1-based
    pub page: usize,
    /// Rows per page
    pub limit: usize,
    /// Total row count
    pub total: usize,
    /// Total page count
    pub total_pages: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(1, 10, 0)
    }
}

impl PaginationState {
    /// Build state with `total_pages` derived from `total` and `limit`.
    ///
    /// A zero limit is treated as one.
    #[must_use]
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let limit = limit.max(1);
        Self {
            page: page.max(1),
            limit,
            total,
            total_pages: total_pages(total, limit),
        }
    }

    /// Use a server-computed page count as-is.
    #[must_use]
    pub const fn with_total_pages(mut self, total_pages: usize) -> Self {
        self.total_pages = total_pages;
        self
    }

    /// Clamp a requested page into `1..=max(total_pages, 1)`.
    #[must_use]
    pub fn clamp_page(&self, page: usize) -> usize {
        page.clamp(1, self.total_pages.max(1))
    }

    /// Check whether a previous page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Check whether a next page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Previous page, clamped.
    #[must_use]
    pub fn previous_page(&self) -> usize {
        self.clamp_page(self.page.saturating_sub(1))
    }

    /// Next page, clamped.
    #[must_use]
    pub fn next_page(&self) -> usize {
        self.clamp_page(self.page.saturating_add(1))
    }

    /// Index range of the current page within a row set of `len` rows.
    #[must_use]
    pub fn slice_range(&self, len: usize) -> std::ops::Range<usize> {
        let start = self.page.saturating_sub(1).saturating_mul(self.limit).min(len);
        let end = start.saturating_add(self.limit).min(len);
        start..end
    }
}

/// `ceil(total / limit)`, zero when `limit` is zero.
#[must_use]
pub const fn total_pages(total: usize, limit: usize) -> usize {
    if limit == 0 {
        0
    } else {
        total.div_ceil(limit)
    }
}
