//! Table configuration.
//!
//! Configuration can be built in code or loaded from a YAML document:
//!
//! ```yaml
//! manual_sorting: true
//! manual_pagination: true
//! page_size: 25
//! min_column_width: 60
//! ```

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};

/// Hard lower bound for any column width.
pub const MIN_COLUMN_WIDTH: f32 = 50.0;
/// Padding added to measured content during auto-fit.
pub const AUTO_FIT_PADDING: f32 = 16.0;
/// Width of the leading expand-toggle column.
pub const AFFORDANCE_WIDTH: f32 = 40.0;
/// Maximum page-number buttons in the pager.
pub const PAGE_WINDOW: usize = 5;
/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Engine options shared by every table instance built from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Sorting is done by the caller; the table only emits intents
    pub manual_sorting: bool,
    /// Pagination is done by the caller; the table only emits intents
    pub manual_pagination: bool,
    /// Whether resize handles are active at all
    pub enable_column_resizing: bool,
    /// Initial rows per page
    pub page_size: usize,
    /// Page sizes offered by the page-size selector
    pub page_size_options: Vec<usize>,
    /// Maximum number of page buttons
    pub page_window: usize,
    /// Floor applied to every column width, never below [`MIN_COLUMN_WIDTH`]
    pub min_column_width: f32,
    /// Padding added to auto-fit measurements
    pub auto_fit_padding: f32,
    /// Width of the expand-toggle column
    pub affordance_width: f32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            manual_sorting: false,
            manual_pagination: false,
            enable_column_resizing: true,
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: vec![10, 25, 50, 100],
            page_window: PAGE_WINDOW,
            min_column_width: MIN_COLUMN_WIDTH,
            auto_fit_padding: AUTO_FIT_PADDING,
            affordance_width: AFFORDANCE_WIDTH,
        }
    }
}

impl TableConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigurationError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigurationError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.page_size == 0 {
            return Err(ConfigurationError::invalid("page_size", "must be positive"));
        }
        if self.page_size_options.contains(&0) {
            return Err(ConfigurationError::invalid(
                "page_size_options",
                "page sizes must be positive",
            ));
        }
        if self.page_window == 0 {
            return Err(ConfigurationError::invalid("page_window", "must be positive"));
        }
        if !self.min_column_width.is_finite() || self.min_column_width < MIN_COLUMN_WIDTH {
            return Err(ConfigurationError::invalid(
                "min_column_width",
                format!("must be at least {MIN_COLUMN_WIDTH}, got {}", self.min_column_width),
            ));
        }
        if !self.auto_fit_padding.is_finite() || self.auto_fit_padding < 0.0 {
            return Err(ConfigurationError::invalid(
                "auto_fit_padding",
                "must be non-negative",
            ));
        }
        if !self.affordance_width.is_finite() || self.affordance_width <= 0.0 {
            return Err(ConfigurationError::invalid(
                "affordance_width",
                "must be positive",
            ));
        }
        Ok(())
    }

    /// Enable caller-driven sorting.
    #[must_use]
    pub const fn manual_sorting(mut self, manual: bool) -> Self {
        self.manual_sorting = manual;
        self
    }

    /// Enable caller-driven pagination.
    #[must_use]
    pub const fn manual_pagination(mut self, manual: bool) -> Self {
        self.manual_pagination = manual;
        self
    }

    /// Toggle column resizing.
    #[must_use]
    pub const fn column_resizing(mut self, enabled: bool) -> Self {
        self.enable_column_resizing = enabled;
        self
    }

    /// Set rows per page.
    #[must_use]
    pub const fn page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    /// Set width floor.
    #[must_use]
    pub const fn min_column_width(mut self, width: f32) -> Self {
        self.min_column_width = width;
        self
    }
}
