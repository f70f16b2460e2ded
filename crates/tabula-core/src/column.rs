//! Column descriptors and the normalized column model.

use crate::error::ConfigurationError;
use crate::state::ColumnVisibilityState;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Width used when a descriptor does not specify one.
pub const DEFAULT_COLUMN_WIDTH: f32 = 150.0;

/// Column definition supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column identifier, unique within a table
    pub id: String,
    /// Header content
    pub header: String,
    /// Whether the header toggles sorting
    pub sortable: bool,
    /// Whether the column exposes a resize handle
    pub resizable: bool,
    /// Width used when no override exists
    pub default_width: f32,
    /// Per-column lower bound, raised to the table floor if smaller
    pub min_width: Option<f32>,
}

impl ColumnDescriptor {
    /// Create a new column.
    #[must_use]
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            sortable: false,
            resizable: true,
            default_width: DEFAULT_COLUMN_WIDTH,
            min_width: None,
        }
    }

    /// Set default width.
    #[must_use]
    pub const fn width(mut self, width: f32) -> Self {
        self.default_width = width;
        self
    }

    /// Set minimum width.
    #[must_use]
    pub const fn min_width(mut self, width: f32) -> Self {
        self.min_width = Some(width);
        self
    }

    /// Make column sortable.
    #[must_use]
    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Disable the resize handle.
    #[must_use]
    pub const fn fixed(mut self) -> Self {
        self.resizable = false;
        self
    }

    /// Lower bound for this column given the table-wide floor.
    #[must_use]
    pub fn floor(&self, table_floor: f32) -> f32 {
        self.min_width.map_or(table_floor, |min| min.max(table_floor))
    }
}

/// Columns after validation, in caller order.
///
/// Visibility is applied as a projection over this list; the base order is
/// never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderedColumns {
    columns: Vec<ColumnDescriptor>,
}

/// Validate descriptors and freeze their order.
pub fn normalize(
    descriptors: impl IntoIterator<Item = ColumnDescriptor>,
) -> Result<OrderedColumns, ConfigurationError> {
    let columns: Vec<ColumnDescriptor> = descriptors.into_iter().collect();
    let mut seen = HashSet::with_capacity(columns.len());

    for column in &columns {
        if !seen.insert(column.id.as_str()) {
            return Err(ConfigurationError::DuplicateColumn {
                id: column.id.clone(),
            });
        }
        if !column.default_width.is_finite() || column.default_width <= 0.0 {
            return Err(ConfigurationError::InvalidWidth {
                id: column.id.clone(),
                width: column.default_width,
            });
        }
    }

    tracing::trace!(target: "tabula::column", count = columns.len(), "normalized columns");
    Ok(OrderedColumns { columns })
}

impl OrderedColumns {
    /// Get a column by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Position of a column in the base order.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    /// Check whether a column exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Get column count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if there are no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate columns in base order.
    pub fn iter(&self) -> std::slice::Iter<'_, ColumnDescriptor> {
        self.columns.iter()
    }

    /// Columns that are visible under `visibility`, in base order.
    #[must_use]
    pub fn visible<'a>(&'a self, visibility: &ColumnVisibilityState) -> Vec<&'a ColumnDescriptor> {
        self.columns
            .iter()
            .filter(|c| visibility.is_visible(&c.id))
            .collect()
    }

    /// Require that `id` names an existing column.
    pub fn require(
        &self,
        id: &str,
        context: &'static str,
    ) -> Result<&ColumnDescriptor, ConfigurationError> {
        self.get(id).ok_or_else(|| ConfigurationError::UnknownColumn {
            id: id.to_string(),
            context,
        })
    }
}

impl<'a> IntoIterator for &'a OrderedColumns {
    type Item = &'a ColumnDescriptor;
    type IntoIter = std::slice::Iter<'a, ColumnDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
