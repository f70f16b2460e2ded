//! Core types and traits for the Tabula table engine.
//!
//! This crate provides the foundational pieces shared by the sizing, layout
//! and table crates:
//! - Column model: [`ColumnDescriptor`], [`normalize`], [`OrderedColumns`]
//! - Row access: [`TableRow`], [`CellValue`], [`Record`]
//! - State: sizing, visibility, expansion, sort and pagination state
//! - State ports: [`StatePort`] with [`LocalState`] and [`LiftedState`]
//! - Configuration: [`TableConfig`]
//! - Errors: [`ConfigurationError`]

mod column;
mod config;
mod error;
mod row;
mod state;

pub use column::{normalize, ColumnDescriptor, OrderedColumns, DEFAULT_COLUMN_WIDTH};
pub use config::{
    TableConfig, AFFORDANCE_WIDTH, AUTO_FIT_PADDING, DEFAULT_PAGE_SIZE, MIN_COLUMN_WIDTH,
    PAGE_WINDOW,
};
pub use error::ConfigurationError;
pub use row::{CellValue, Record, RowId, TableRow};
pub use state::{
    total_pages, BoxedPort, ColumnSizingState, ColumnVisibilityState, ExpansionState,
    LiftedState, LocalState, PaginationState, SortDirection, SortEntry, SortState, StatePort,
};
