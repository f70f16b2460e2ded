//! Integration tests for tabula-core.
//!
//! These exercise the column model, state types and configuration together,
//! the way the table crate consumes them.

use proptest::prelude::*;
use tabula_core::{
    normalize, CellValue, ColumnDescriptor, ColumnSizingState, ColumnVisibilityState,
    ConfigurationError, PaginationState, Record, SortState, TableConfig, TableRow,
};

// =============================================================================
// Column model
// =============================================================================

#[test]
fn test_visibility_projection_restores_position() {
    let columns = normalize([
        ColumnDescriptor::new("a", "A"),
        ColumnDescriptor::new("b", "B"),
        ColumnDescriptor::new("c", "C"),
    ])
    .unwrap();

    let mut visibility = ColumnVisibilityState::default();
    visibility.set("b", false);
    let ids: Vec<&str> = columns.visible(&visibility).iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);

    visibility.set("b", true);
    let ids: Vec<&str> = columns.visible(&visibility).iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(columns.position("b"), Some(1));
}

#[test]
fn test_normalize_rejects_zero_width() {
    let err = normalize([ColumnDescriptor::new("a", "A").width(0.0)]).unwrap_err();
    assert!(matches!(err, ConfigurationError::InvalidWidth { .. }));
    assert!(err.to_string().contains("'a'"));
}

#[test]
fn test_min_width_raises_floor() {
    let column = ColumnDescriptor::new("a", "A").min_width(80.0);
    assert_eq!(column.floor(50.0), 80.0);
    assert_eq!(ColumnDescriptor::new("b", "B").min_width(20.0).floor(50.0), 50.0);
}

// =============================================================================
// Rows
// =============================================================================

#[test]
fn test_record_cells() {
    let row = Record::new("r1").cell("name", "Ada").cell("age", 36).cell("admin", true);
    assert_eq!(row.row_id(), "r1");
    assert_eq!(row.cell_value("name"), CellValue::Text("Ada".to_string()));
    assert_eq!(row.cell_value("age"), CellValue::Number(36.0));
    assert_eq!(row.cell_value("missing"), CellValue::Empty);
    assert_eq!(row.cell_value("admin").display(), "Yes");
}

// =============================================================================
// State serialization
// =============================================================================

#[test]
fn test_state_json_shapes() {
    let mut sizing = ColumnSizingState::default();
    sizing.set("name", 140.0);
    let json = serde_json::to_string(&sizing).unwrap();
    let back: ColumnSizingState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, sizing);

    let sort: SortState =
        serde_json::from_str(r#"[{"column_id":"name","descending":true}]"#).unwrap();
    assert_eq!(sort.primary().map(|e| e.descending), Some(true));

    let pagination = PaginationState::new(2, 25, 60);
    let json = serde_json::to_value(pagination).unwrap();
    assert_eq!(json["total_pages"], 3);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_full_yaml_config() {
    let yaml = r"
manual_sorting: true
manual_pagination: false
enable_column_resizing: true
page_size: 25
page_size_options: [25, 50]
page_window: 7
min_column_width: 64
auto_fit_padding: 12
affordance_width: 32
";
    let config = TableConfig::from_yaml(yaml).unwrap();
    assert!(config.manual_sorting);
    assert_eq!(config.page_size_options, vec![25, 50]);
    assert_eq!(config.page_window, 7);
    assert_eq!(config.min_column_width, 64.0);
    assert_eq!(config.affordance_width, 32.0);
}

#[test]
fn test_empty_yaml_is_default() {
    assert_eq!(TableConfig::from_yaml("{}").unwrap(), TableConfig::default());
}

proptest! {
    #[test]
    fn prop_total_pages_covers_total(total in 0usize..10_000, limit in 1usize..500) {
        let state = PaginationState::new(1, limit, total);
        prop_assert!(state.total_pages * limit >= total);
        prop_assert!(state.total_pages == 0 || (state.total_pages - 1) * limit < total);
    }

    #[test]
    fn prop_clamped_page_is_in_range(
        total in 0usize..1_000,
        limit in 1usize..50,
        page in 0usize..200,
    ) {
        let state = PaginationState::new(1, limit, total);
        let clamped = state.clamp_page(page);
        prop_assert!(clamped >= 1);
        prop_assert!(clamped <= state.total_pages.max(1));
    }
}
