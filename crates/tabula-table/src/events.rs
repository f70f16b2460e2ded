//! Messages emitted by the table and the callback types that receive them.

use serde::{Deserialize, Serialize};
use tabula_core::{ColumnSizingState, ColumnVisibilityState, PaginationState, RowId, SortState};

/// Message emitted when the sort state changes or should change.
///
/// In caller-driven sorting this is an intent only: the table keeps its
/// current order until [`set_sort_state`](crate::BaseTable::set_sort_state).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSortChanged {
    /// Requested sort state
    pub sort: SortState,
    /// Generation the caller's response must answer
    pub generation: u64,
}

/// Message emitted when the page or page size changes or should change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablePageChanged {
    /// Requested page, 1-based
    pub page: usize,
    /// Requested rows per page
    pub limit: usize,
    /// Generation the caller's response must answer
    pub generation: u64,
}

/// Message emitted when a column width override changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSizingChanged {
    /// Resized column, `None` when every override was reset
    pub column_id: Option<String>,
    /// New width, `None` when the override was removed
    pub width: Option<f32>,
    /// Full sizing state after the change
    pub sizing: ColumnSizingState,
}

/// Message emitted when a column is shown or hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableVisibilityChanged {
    /// Affected column
    pub column_id: String,
    /// Whether it is now visible
    pub visible: bool,
    /// Full visibility state after the change
    pub visibility: ColumnVisibilityState,
}

/// Message emitted when a row is about to expand or collapse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRowToggled {
    /// Toggled row
    pub row_id: RowId,
    /// State the row will have after the toggle
    pub expanded: bool,
}

/// Read-only view of the table, handed to the ready callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// Ids of the rows on the current page, in display order
    pub visible_row_ids: Vec<RowId>,
    /// Grid template shared by header and body
    pub template: String,
    /// Ids of the visible columns in order
    pub visible_columns: Vec<String>,
    /// Pagination after derivation and clamping
    pub pagination: PaginationState,
    /// Active sort
    pub sort: SortState,
    /// Current generation
    pub generation: u64,
}

/// Callback receiving one message type.
pub type Callback<E> = Box<dyn FnMut(&E)>;

/// Callback for row toggles. The row is `None` when the id is not in the
/// current row set.
pub type RowToggleCallback<R> = Box<dyn FnMut(&TableRowToggled, Option<&R>)>;

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_core::SortEntry;

    #[test]
    fn test_table_sort_changed() {
        let msg = TableSortChanged {
            sort: SortState::single(SortEntry::descending("price")),
            generation: 3,
        };
        assert_eq!(msg.sort.primary().map(|e| e.column_id.as_str()), Some("price"));
        assert_eq!(msg.generation, 3);
    }

    #[test]
    fn test_table_row_toggled_serializes() {
        let msg = TableRowToggled {
            row_id: "r1".to_string(),
            expanded: true,
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"row_id":"r1","expanded":true}"#);
    }

    #[test]
    fn test_snapshot_roundtrips_through_json() {
        let snapshot = TableSnapshot {
            visible_row_ids: vec!["a".to_string(), "b".to_string()],
            template: "40px 120px".to_string(),
            visible_columns: vec!["name".to_string()],
            pagination: PaginationState::new(1, 10, 2),
            sort: SortState::unsorted(),
            generation: 0,
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: TableSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
