#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
//! Headless data-table engine.
//!
//! [`BaseTable`] holds caller rows and column descriptors and answers the
//! questions a renderer asks: which rows are on this page, in what order,
//! which are expanded, and what grid template the header and body share.
//! Interactions (header clicks, pager buttons, resize handles, expand
//! toggles) go through its operations and come back out as messages.
//!
//! # Example
//!
//! ```
//! use tabula_core::{ColumnDescriptor, Record};
//! use tabula_table::BaseTable;
//!
//! let rows: Vec<Record> = (1..=23)
//!     .map(|i| Record::new(format!("r{i}")).cell("n", i))
//!     .collect();
//!
//! let mut table = BaseTable::builder([
//!     ColumnDescriptor::new("n", "Number").sortable().width(80.0),
//! ])
//! .rows(rows)
//! .build()
//! .unwrap();
//!
//! assert_eq!(table.pagination().total_pages, 3);
//! table.set_page(3);
//! assert_eq!(table.visible_rows().len(), 3);
//! assert_eq!(table.page_info().to_string(), "21-23 of 23");
//! assert_eq!(table.template().to_css(), "80px");
//! ```

mod content;
mod events;
mod expansion;
mod pagination;
mod sort;
mod table;

pub use content::{CellContent, PlainText};
pub use events::{
    Callback, RowToggleCallback, TablePageChanged, TableRowToggled, TableSizingChanged,
    TableSnapshot, TableSortChanged, TableVisibilityChanged,
};
pub use expansion::{ExpandPredicate, ExpandedRenderer, ExpansionTracker};
pub use pagination::{page_size_options, page_window, PageInfo};
pub use sort::{next_sort, sort_rows, sorted_indices, validate_sort};
pub use table::{BaseTable, RowView, TableBuilder};
