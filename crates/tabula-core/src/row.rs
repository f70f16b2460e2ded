//! Row access and cell values.
//!
//! The engine never owns rows or knows their shape. A row only has to expose
//! a stable identifier and a cell accessor per column id.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Stable, caller-supplied row identifier.
pub type RowId = String;

/// A cell value in the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum CellValue {
    /// Text value
    Text(String),
    /// Numeric value
    Number(f64),
    /// Boolean value
    Bool(bool),
    /// Empty cell
    #[default]
    Empty,
}

impl CellValue {
    /// Get display text for the cell.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => format!("{n}"),
            Self::Bool(b) => if *b { "Yes" } else { "No" }.to_string(),
            Self::Empty => String::new(),
        }
    }

    /// Check if the cell is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Number(_) => 1,
            Self::Text(_) => 2,
            Self::Empty => 3,
        }
    }

    /// Total ordering used for ascending sorts.
    ///
    /// Mixed kinds order as `Bool < Number < Text < Empty`.
    #[must_use]
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<Self>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// Accessor contract between the engine and caller rows.
pub trait TableRow {
    /// Stable identifier used for expansion tracking.
    fn row_id(&self) -> RowId;

    /// Value of the cell under `column_id`, used for sorting.
    fn cell_value(&self, column_id: &str) -> CellValue;
}

/// A generic keyed row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Row identifier
    pub id: RowId,
    /// Cell values by column id
    pub cells: HashMap<String, CellValue>,
}

impl Record {
    /// Create a new empty row.
    #[must_use]
    pub fn new(id: impl Into<RowId>) -> Self {
        Self {
            id: id.into(),
            cells: HashMap::new(),
        }
    }

    /// Add a cell value.
    #[must_use]
    pub fn cell(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.insert(key.into(), value.into());
        self
    }

    /// Get a cell value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.get(key)
    }
}

impl TableRow for Record {
    fn row_id(&self) -> RowId {
        self.id.clone()
    }

    fn cell_value(&self, column_id: &str) -> CellValue {
        self.cells.get(column_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== CellValue Tests =====

    #[test]
    fn test_cell_value_display() {
        assert_eq!(CellValue::Text("Hello".to_string()).display(), "Hello");
        assert_eq!(CellValue::Number(42.5).display(), "42.5");
        assert_eq!(CellValue::Bool(true).display(), "Yes");
        assert_eq!(CellValue::Bool(false).display(), "No");
        assert_eq!(CellValue::Empty.display(), "");
    }

    #[test]
    fn test_cell_value_conversions() {
        assert_eq!(CellValue::from("a"), CellValue::Text("a".to_string()));
        assert_eq!(CellValue::from(3), CellValue::Number(3.0));
        assert_eq!(CellValue::from(1.5f64), CellValue::Number(1.5));
        assert_eq!(CellValue::from(true), CellValue::Bool(true));
        assert_eq!(CellValue::from(None::<i32>), CellValue::Empty);
        assert_eq!(CellValue::from(Some("x")), CellValue::Text("x".to_string()));
    }

    #[test]
    fn test_sort_cmp_same_kind() {
        assert_eq!(CellValue::from(1).sort_cmp(&CellValue::from(2)), Ordering::Less);
        assert_eq!(CellValue::from("b").sort_cmp(&CellValue::from("a")), Ordering::Greater);
        assert_eq!(CellValue::from(false).sort_cmp(&CellValue::from(true)), Ordering::Less);
        assert_eq!(CellValue::Empty.sort_cmp(&CellValue::Empty), Ordering::Equal);
    }

    #[test]
    fn test_sort_cmp_numbers_not_lexicographic() {
        assert_eq!(CellValue::from(10).sort_cmp(&CellValue::from(9)), Ordering::Greater);
    }

    #[test]
    fn test_sort_cmp_mixed_kinds() {
        assert_eq!(CellValue::from(true).sort_cmp(&CellValue::from(0)), Ordering::Less);
        assert_eq!(CellValue::from(99).sort_cmp(&CellValue::from("a")), Ordering::Less);
        assert_eq!(CellValue::from("z").sort_cmp(&CellValue::Empty), Ordering::Less);
    }

    // ===== Record Tests =====

    #[test]
    fn test_record_builder() {
        let row = Record::new("r1").cell("name", "Alice").cell("age", 30);
        assert_eq!(row.row_id(), "r1");
        assert_eq!(row.get("name"), Some(&CellValue::Text("Alice".to_string())));
        assert_eq!(row.cell_value("age"), CellValue::Number(30.0));
    }

    #[test]
    fn test_record_missing_cell_is_empty() {
        let row = Record::new("r1");
        assert!(row.get("nonexistent").is_none());
        assert!(row.cell_value("nonexistent").is_empty());
    }
}
