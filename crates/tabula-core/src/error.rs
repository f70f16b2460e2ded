//! Error types for table construction and configuration.

use thiserror::Error;

/// Errors raised while building a table or applying caller-supplied state.
///
/// These are fatal to construction: they surface from the builder, not from
/// the first interaction that happens to touch the bad reference.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Two descriptors share the same identifier.
    #[error("duplicate column id: {id}")]
    DuplicateColumn { id: String },

    /// A sort, visibility or sizing entry references a column that does not exist.
    #[error("unknown column '{id}' referenced by {context}")]
    UnknownColumn { id: String, context: &'static str },

    /// A sort entry targets a column that is not sortable.
    #[error("column '{id}' is not sortable")]
    NotSortable { id: String },

    /// A descriptor default width is zero, negative or not finite.
    #[error("column '{id}' has invalid default width {width}")]
    InvalidWidth { id: String, width: f32 },

    /// A configuration value is out of range.
    #[error("invalid value for '{field}': {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },

    /// The supplied visibility state hides every column.
    #[error("at least one column must remain visible")]
    NoVisibleColumns,

    /// The YAML configuration could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl ConfigurationError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}
