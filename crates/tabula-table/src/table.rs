//! The table facade.
//!
//! [`BaseTable`] ties the column model, sizing, sorting, pagination, expansion
//! and grid layout together behind one set of operations. It owns no
//! rendering: callers read [`BaseTable::visible_rows`] and
//! [`BaseTable::template`] and paint them however they like.
//!
//! # Self-driven vs caller-driven
//!
//! Sorting and pagination are each either self-driven (the table sorts and
//! slices the rows it holds) or caller-driven (`manual_sorting` /
//! `manual_pagination`). In caller-driven mode header and pager interactions
//! only emit intents tagged with a generation; the caller fetches new rows
//! and applies the new state with [`BaseTable::set_sort_state`] /
//! [`BaseTable::set_pagination`], using [`BaseTable::accept_response`] to
//! drop responses that a newer intent has superseded.

use crate::content::CellContent;
use crate::events::{
    Callback, RowToggleCallback, TablePageChanged, TableRowToggled, TableSizingChanged,
    TableSnapshot, TableSortChanged, TableVisibilityChanged,
};
use crate::expansion::{ExpandPredicate, ExpandedRenderer, ExpansionTracker};
use crate::pagination::{page_size_options, page_window, PageInfo};
use crate::sort::{next_sort, sorted_indices, validate_sort};
use std::fmt;
use tabula_core::{
    normalize, BoxedPort, ColumnDescriptor, ColumnSizingState, ColumnVisibilityState,
    ConfigurationError, ExpansionState, LocalState, OrderedColumns, PaginationState, RowId,
    SortDirection, SortState, StatePort, TableConfig, TableRow,
};
use tabula_layout::{
    compose_with, GridTemplate, MeasureNode, MeasureSurface, ResizeGesture, SizingEngine,
};

/// One row as it should be displayed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowView<'a, R> {
    /// The caller's row
    pub row: &'a R,
    /// Whether the detail area is open
    pub expanded: bool,
    /// Whether the row shows an expand toggle
    pub can_expand: bool,
    /// 1-based position across all pages
    pub ordinal: usize,
}

fn emit<E>(callback: &mut Option<Callback<E>>, event: &E) {
    if let Some(callback) = callback.as_mut() {
        callback(event);
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`BaseTable`].
pub struct TableBuilder<R> {
    columns: Vec<ColumnDescriptor>,
    config: TableConfig,
    rows: Vec<R>,
    sort: SortState,
    pagination: Option<PaginationState>,
    sizing: Option<BoxedPort<ColumnSizingState>>,
    visibility: Option<BoxedPort<ColumnVisibilityState>>,
    expansion: Option<BoxedPort<ExpansionState>>,
    predicate: Option<ExpandPredicate<R>>,
    renderer: Option<ExpandedRenderer<R>>,
    on_sort_change: Option<Callback<TableSortChanged>>,
    on_page_change: Option<Callback<TablePageChanged>>,
    on_sizing_change: Option<Callback<TableSizingChanged>>,
    on_visibility_change: Option<Callback<TableVisibilityChanged>>,
    on_row_toggle: Option<RowToggleCallback<R>>,
    on_ready: Option<Callback<TableSnapshot>>,
}

impl<R: TableRow> TableBuilder<R> {
    fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            columns,
            config: TableConfig::default(),
            rows: Vec::new(),
            sort: SortState::unsorted(),
            pagination: None,
            sizing: None,
            visibility: None,
            expansion: None,
            predicate: None,
            renderer: None,
            on_sort_change: None,
            on_page_change: None,
            on_sizing_change: None,
            on_visibility_change: None,
            on_row_toggle: None,
            on_ready: None,
        }
    }

    /// Use a configuration.
    #[must_use]
    pub fn config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Let the caller sort rows.
    #[must_use]
    pub fn manual_sorting(mut self, manual: bool) -> Self {
        self.config.manual_sorting = manual;
        self
    }

    /// Let the caller paginate rows.
    #[must_use]
    pub fn manual_pagination(mut self, manual: bool) -> Self {
        self.config.manual_pagination = manual;
        self
    }

    /// Initial rows.
    #[must_use]
    pub fn rows(mut self, rows: Vec<R>) -> Self {
        self.rows = rows;
        self
    }

    /// Initial sort state.
    #[must_use]
    pub fn sort(mut self, sort: SortState) -> Self {
        self.sort = sort;
        self
    }

    /// Initial pagination. In self-driven mode only `page` and `limit` are
    /// used; totals come from the rows.
    #[must_use]
    pub fn pagination(mut self, pagination: PaginationState) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Read and write column widths through a caller port.
    #[must_use]
    pub fn sizing_state(mut self, port: impl StatePort<ColumnSizingState> + 'static) -> Self {
        self.sizing = Some(Box::new(port));
        self
    }

    /// Read and write column visibility through a caller port.
    #[must_use]
    pub fn visibility_state(
        mut self,
        port: impl StatePort<ColumnVisibilityState> + 'static,
    ) -> Self {
        self.visibility = Some(Box::new(port));
        self
    }

    /// Read and write row expansion through a caller port.
    #[must_use]
    pub fn expansion_state(mut self, port: impl StatePort<ExpansionState> + 'static) -> Self {
        self.expansion = Some(Box::new(port));
        self
    }

    /// Decide per row whether it may expand.
    #[must_use]
    pub fn can_expand(mut self, predicate: impl Fn(&R) -> bool + 'static) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Detail content for expanded rows.
    #[must_use]
    pub fn render_expanded(mut self, renderer: impl Fn(&R) -> MeasureNode + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    /// Called on sort changes and sort intents.
    #[must_use]
    pub fn on_sort_change(mut self, f: impl FnMut(&TableSortChanged) + 'static) -> Self {
        self.on_sort_change = Some(Box::new(f));
        self
    }

    /// Called on page changes and page intents.
    #[must_use]
    pub fn on_page_change(mut self, f: impl FnMut(&TablePageChanged) + 'static) -> Self {
        self.on_page_change = Some(Box::new(f));
        self
    }

    /// Called after a column width override changes.
    #[must_use]
    pub fn on_sizing_change(mut self, f: impl FnMut(&TableSizingChanged) + 'static) -> Self {
        self.on_sizing_change = Some(Box::new(f));
        self
    }

    /// Called after a column is shown or hidden.
    #[must_use]
    pub fn on_visibility_change(
        mut self,
        f: impl FnMut(&TableVisibilityChanged) + 'static,
    ) -> Self {
        self.on_visibility_change = Some(Box::new(f));
        self
    }

    /// Called before a row expands or collapses.
    #[must_use]
    pub fn on_row_toggle(
        mut self,
        f: impl FnMut(&TableRowToggled, Option<&R>) + 'static,
    ) -> Self {
        self.on_row_toggle = Some(Box::new(f));
        self
    }

    /// Called once when the table is built.
    #[must_use]
    pub fn on_ready(mut self, f: impl FnMut(&TableSnapshot) + 'static) -> Self {
        self.on_ready = Some(Box::new(f));
        self
    }

    /// Validate everything and build the table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] for invalid configuration, duplicate
    /// or badly sized columns, sort entries on unknown or unsortable
    /// columns, state entries for unknown columns, and visibility that hides
    /// every column.
    pub fn build(self) -> Result<BaseTable<R>, ConfigurationError> {
        self.config.validate()?;
        let columns = normalize(self.columns)?;
        validate_sort(&self.sort, &columns)?;

        let sizing = self
            .sizing
            .unwrap_or_else(|| Box::new(LocalState::new(ColumnSizingState::default())));
        for (id, width) in sizing.get().iter() {
            columns.require(id, "sizing state")?;
            if !width.is_finite() || width <= 0.0 {
                return Err(ConfigurationError::InvalidWidth {
                    id: id.to_string(),
                    width,
                });
            }
        }

        let visibility = self
            .visibility
            .unwrap_or_else(|| Box::new(LocalState::new(ColumnVisibilityState::default())));
        let visibility_state = visibility.get();
        for (id, _) in visibility_state.iter() {
            columns.require(id, "visibility state")?;
        }
        if columns.visible(&visibility_state).is_empty() {
            return Err(ConfigurationError::NoVisibleColumns);
        }

        let expansion = ExpansionTracker::from_parts(
            self.expansion
                .unwrap_or_else(|| Box::new(LocalState::new(ExpansionState::default()))),
            self.predicate,
            self.renderer,
        );

        let requested = self
            .pagination
            .unwrap_or_else(|| PaginationState::new(1, self.config.page_size, self.rows.len()));
        let pagination = if self.config.manual_pagination {
            PaginationState {
                page: requested.page.max(1),
                limit: requested.limit.max(1),
                ..requested
            }
        } else {
            derive_pagination(requested.page, requested.limit, self.rows.len())
        };

        let table = BaseTable {
            engine: SizingEngine::from_config(&self.config),
            config: self.config,
            columns,
            rows: self.rows,
            sort: self.sort,
            pagination,
            sizing,
            visibility,
            expansion,
            gesture: None,
            generation: 0,
            on_sort_change: self.on_sort_change,
            on_page_change: self.on_page_change,
            on_sizing_change: self.on_sizing_change,
            on_visibility_change: self.on_visibility_change,
            on_row_toggle: self.on_row_toggle,
        };

        tracing::debug!(
            target: "tabula::table",
            columns = table.columns.len(),
            rows = table.rows.len(),
            manual_sorting = table.config.manual_sorting,
            manual_pagination = table.config.manual_pagination,
            "table built"
        );

        let mut on_ready = self.on_ready;
        emit(&mut on_ready, &table.snapshot());
        Ok(table)
    }
}

fn derive_pagination(page: usize, limit: usize, total: usize) -> PaginationState {
    let state = PaginationState::new(page, limit, total);
    PaginationState {
        page: state.clamp_page(state.page),
        ..state
    }
}

// =============================================================================
// Table
// =============================================================================

/// Headless data table over caller rows of type `R`.
pub struct BaseTable<R> {
    config: TableConfig,
    columns: OrderedColumns,
    engine: SizingEngine,
    rows: Vec<R>,
    sort: SortState,
    pagination: PaginationState,
    sizing: BoxedPort<ColumnSizingState>,
    visibility: BoxedPort<ColumnVisibilityState>,
    expansion: ExpansionTracker<R>,
    gesture: Option<ResizeGesture>,
    generation: u64,
    on_sort_change: Option<Callback<TableSortChanged>>,
    on_page_change: Option<Callback<TablePageChanged>>,
    on_sizing_change: Option<Callback<TableSizingChanged>>,
    on_visibility_change: Option<Callback<TableVisibilityChanged>>,
    on_row_toggle: Option<RowToggleCallback<R>>,
}

impl<R: TableRow> BaseTable<R> {
    /// Start building a table over these columns.
    #[must_use]
    pub fn builder(columns: impl IntoIterator<Item = ColumnDescriptor>) -> TableBuilder<R> {
        TableBuilder::new(columns.into_iter().collect())
    }

    // ----- accessors -----

    /// Table configuration.
    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// All columns in base order.
    #[must_use]
    pub fn columns(&self) -> &OrderedColumns {
        &self.columns
    }

    /// Visible columns in base order.
    #[must_use]
    pub fn visible_columns(&self) -> Vec<&ColumnDescriptor> {
        self.columns.visible(&self.visibility.get())
    }

    /// Check whether a column is visible.
    #[must_use]
    pub fn is_column_visible(&self, column_id: &str) -> bool {
        self.columns.contains(column_id) && self.visibility.get().is_visible(column_id)
    }

    /// All rows as supplied.
    #[must_use]
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Active sort.
    #[must_use]
    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    /// Sort indicator for a header.
    #[must_use]
    pub fn sort_direction(&self, column_id: &str) -> Option<SortDirection> {
        self.sort.direction_of(column_id)
    }

    /// Pagination state.
    #[must_use]
    pub fn pagination(&self) -> PaginationState {
        self.pagination
    }

    /// Current width overrides.
    #[must_use]
    pub fn sizing_state(&self) -> ColumnSizingState {
        self.sizing.get()
    }

    /// Current visibility flags.
    #[must_use]
    pub fn visibility_state(&self) -> ColumnVisibilityState {
        self.visibility.get()
    }

    /// Current expansion state.
    #[must_use]
    pub fn expansion_state(&self) -> ExpansionState {
        self.expansion.state()
    }

    /// Generation of the latest sort or page intent.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a caller response answering `generation` is still current.
    ///
    /// A response to an intent that a newer intent has superseded returns
    /// `false` and should be dropped.
    #[must_use]
    pub fn accept_response(&self, generation: u64) -> bool {
        let current = generation == self.generation;
        if !current {
            tracing::debug!(
                target: "tabula::table",
                generation,
                current = self.generation,
                "stale response"
            );
        }
        current
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    // ----- rows & pagination -----

    /// Replace the rows.
    ///
    /// Self-driven pagination recomputes totals and clamps the page.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        if !self.config.manual_pagination {
            self.pagination =
                derive_pagination(self.pagination.page, self.pagination.limit, self.rows.len());
        }
        tracing::debug!(target: "tabula::table", rows = self.rows.len(), "rows replaced");
    }

    /// Apply pagination state, typically a caller response.
    ///
    /// In self-driven mode the total is taken from the rows and the page is
    /// clamped.
    pub fn set_pagination(&mut self, pagination: PaginationState) {
        self.pagination = if self.config.manual_pagination {
            PaginationState {
                page: pagination.page.max(1),
                limit: pagination.limit.max(1),
                ..pagination
            }
        } else {
            derive_pagination(pagination.page, pagination.limit, self.rows.len())
        };
        tracing::trace!(
            target: "tabula::table",
            page = self.pagination.page,
            limit = self.pagination.limit,
            "pagination applied"
        );
    }

    /// Go to a page, clamped to the valid range.
    ///
    /// Returns the emitted message, or `None` when already on that page.
    pub fn set_page(&mut self, page: usize) -> Option<TablePageChanged> {
        let page = self.pagination.clamp_page(page);
        if page == self.pagination.page {
            return None;
        }
        let event = TablePageChanged {
            page,
            limit: self.pagination.limit,
            generation: self.next_generation(),
        };
        if !self.config.manual_pagination {
            self.pagination.page = page;
        }
        tracing::debug!(
            target: "tabula::table",
            page,
            manual = self.config.manual_pagination,
            "page changed"
        );
        emit(&mut self.on_page_change, &event);
        Some(event)
    }

    /// Go to the next page, if any.
    pub fn next_page(&mut self) -> Option<TablePageChanged> {
        self.set_page(self.pagination.next_page())
    }

    /// Go to the previous page, if any.
    pub fn previous_page(&mut self) -> Option<TablePageChanged> {
        self.set_page(self.pagination.previous_page())
    }

    /// Change rows per page. The page resets to 1.
    ///
    /// Returns `None` for a zero limit or when nothing changes.
    pub fn set_limit(&mut self, limit: usize) -> Option<TablePageChanged> {
        if limit == 0 || (limit == self.pagination.limit && self.pagination.page == 1) {
            return None;
        }
        let event = TablePageChanged {
            page: 1,
            limit,
            generation: self.next_generation(),
        };
        if !self.config.manual_pagination {
            self.pagination = derive_pagination(1, limit, self.rows.len());
        }
        tracing::debug!(
            target: "tabula::table",
            limit,
            manual = self.config.manual_pagination,
            "page size changed"
        );
        emit(&mut self.on_page_change, &event);
        Some(event)
    }

    /// Page numbers for the pager.
    #[must_use]
    pub fn page_window(&self) -> Vec<usize> {
        page_window(
            self.pagination.page,
            self.pagination.total_pages,
            self.config.page_window,
        )
    }

    /// Row range shown on the current page.
    #[must_use]
    pub fn page_info(&self) -> PageInfo {
        PageInfo::from_state(&self.pagination)
    }

    /// Choices for the page-size selector.
    #[must_use]
    pub fn page_size_options(&self) -> Vec<usize> {
        page_size_options(&self.config.page_size_options, self.pagination.limit)
    }

    // ----- sorting -----

    /// Apply a sort state, typically a caller response.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if an entry names an unknown or
    /// unsortable column; the current sort is kept.
    pub fn set_sort_state(&mut self, sort: SortState) -> Result<(), ConfigurationError> {
        validate_sort(&sort, &self.columns)?;
        self.sort = sort;
        Ok(())
    }

    /// Activate a column header.
    ///
    /// Cycles `unsorted → ascending → descending → unsorted`. Unknown and
    /// unsortable columns are ignored. Caller-driven sorting only emits the
    /// intent.
    pub fn toggle_sort(&mut self, column_id: &str) -> Option<TableSortChanged> {
        match self.columns.get(column_id) {
            Some(column) if column.sortable => {}
            Some(_) => {
                tracing::debug!(
                    target: "tabula::table",
                    column = column_id,
                    "sort ignored: column is not sortable"
                );
                return None;
            }
            None => {
                tracing::warn!(
                    target: "tabula::table",
                    column = column_id,
                    "sort ignored: unknown column"
                );
                return None;
            }
        }

        let event = TableSortChanged {
            sort: next_sort(&self.sort, column_id),
            generation: self.next_generation(),
        };
        if !self.config.manual_sorting {
            self.sort = event.sort.clone();
        }
        tracing::debug!(
            target: "tabula::table",
            column = column_id,
            direction = ?event.sort.direction_of(column_id),
            manual = self.config.manual_sorting,
            "sort cycled"
        );
        emit(&mut self.on_sort_change, &event);
        Some(event)
    }

    // ----- visibility -----

    /// Show or hide a column.
    ///
    /// Returns `false` when nothing changed: unknown column, already in that
    /// state, or hiding the last visible column.
    pub fn set_column_visible(&mut self, column_id: &str, visible: bool) -> bool {
        if !self.columns.contains(column_id) {
            tracing::warn!(
                target: "tabula::table",
                column = column_id,
                "visibility ignored: unknown column"
            );
            return false;
        }
        let mut state = self.visibility.get();
        if state.is_visible(column_id) == visible {
            return false;
        }
        if !visible && self.columns.visible(&state).len() <= 1 {
            tracing::warn!(
                target: "tabula::table",
                column = column_id,
                "refusing to hide the last visible column"
            );
            return false;
        }

        state.set(column_id, visible);
        self.visibility.set(state.clone());
        if !visible && self.gesture.as_ref().is_some_and(|g| g.column_id == column_id) {
            self.gesture = None;
        }
        tracing::debug!(
            target: "tabula::table",
            column = column_id,
            visible,
            "column visibility changed"
        );
        emit(
            &mut self.on_visibility_change,
            &TableVisibilityChanged {
                column_id: column_id.to_string(),
                visible,
                visibility: state,
            },
        );
        true
    }

    /// Flip a column's visibility.
    pub fn toggle_column_visibility(&mut self, column_id: &str) -> bool {
        let visible = self.visibility.get().is_visible(column_id);
        self.set_column_visible(column_id, !visible)
    }

    // ----- sizing -----

    /// Resolved width of a column.
    #[must_use]
    pub fn column_width(&self, column_id: &str) -> Option<f32> {
        let column = self.columns.get(column_id)?;
        Some(self.engine.resolve_width(column, &self.sizing.get()))
    }

    fn store_width(&mut self, column_id: &str, width: Option<f32>, sizing: ColumnSizingState) {
        self.sizing.set(sizing.clone());
        emit(
            &mut self.on_sizing_change,
            &TableSizingChanged {
                column_id: Some(column_id.to_string()),
                width,
                sizing,
            },
        );
    }

    /// Start dragging a column's resize handle.
    pub fn begin_resize(&mut self, column_id: &str) -> bool {
        let Some(column) = self.columns.get(column_id) else {
            return false;
        };
        self.gesture = self.engine.begin_resize(column, &self.sizing.get());
        self.gesture.is_some()
    }

    /// Apply a pointer delta to a column.
    ///
    /// During a gesture on this column `delta` is cumulative from the
    /// gesture start; otherwise it is added to the current width. Returns
    /// the stored width, or `None` when the column cannot be resized.
    pub fn drag_resize(&mut self, column_id: &str, delta: f32) -> Option<f32> {
        let column = self.columns.get(column_id)?;
        let mut sizing = self.sizing.get();
        let width = match &self.gesture {
            Some(gesture) if gesture.column_id == column_id => {
                self.engine.drag(gesture, column, &mut sizing, delta)
            }
            _ => self.engine.on_drag_resize(column, &mut sizing, delta),
        }?;
        self.store_width(column_id, Some(width), sizing);
        Some(width)
    }

    /// Finish the current drag gesture.
    pub fn end_resize(&mut self) -> Option<ResizeGesture> {
        self.gesture.take()
    }

    /// Set a column's width directly.
    pub fn set_column_width(&mut self, column_id: &str, width: f32) -> Option<f32> {
        let column = self.columns.get(column_id)?;
        let mut sizing = self.sizing.get();
        let width = self.engine.set_width(column, &mut sizing, width)?;
        self.store_width(column_id, Some(width), sizing);
        Some(width)
    }

    /// Size a column to fit its header and the cells on the current page.
    ///
    /// Measurement failures leave the width unchanged and return `None`.
    pub fn auto_fit<S, C>(&mut self, column_id: &str, surface: &mut S, content: &C) -> Option<f32>
    where
        S: MeasureSurface + ?Sized,
        C: CellContent<R> + ?Sized,
    {
        let column = self.columns.get(column_id)?;
        let header = content.header(column);
        let body: Vec<MeasureNode> = self
            .page_indices()
            .into_iter()
            .map(|i| content.cell(column, &self.rows[i]))
            .collect();
        let mut sizing = self.sizing.get();
        let width = self
            .engine
            .auto_fit(column, &mut sizing, surface, &header, &body)?;
        self.store_width(column_id, Some(width), sizing);
        Some(width)
    }

    /// Pointer activation of a column's resize handle.
    ///
    /// A double activation auto-fits the column; a single one starts a drag
    /// gesture and returns the width it started from.
    pub fn activate_resize_handle<S, C>(
        &mut self,
        column_id: &str,
        clicks: u32,
        surface: &mut S,
        content: &C,
    ) -> Option<f32>
    where
        S: MeasureSurface + ?Sized,
        C: CellContent<R> + ?Sized,
    {
        match clicks {
            0 => None,
            1 => {
                self.begin_resize(column_id);
                self.gesture.as_ref().map(|g| g.start_width)
            }
            _ => {
                self.gesture = None;
                self.auto_fit(column_id, surface, content)
            }
        }
    }

    /// Drop a column's override so its default width applies.
    pub fn reset_size(&mut self, column_id: &str) -> bool {
        let Some(column) = self.columns.get(column_id) else {
            return false;
        };
        let mut sizing = self.sizing.get();
        if !self.engine.reset(column, &mut sizing) {
            return false;
        }
        self.store_width(column_id, None, sizing);
        true
    }

    /// Drop every width override.
    pub fn reset_all_sizes(&mut self) -> bool {
        if self.sizing.get().is_empty() {
            return false;
        }
        self.sizing.set(ColumnSizingState::default());
        self.gesture = None;
        emit(
            &mut self.on_sizing_change,
            &TableSizingChanged {
                column_id: None,
                width: None,
                sizing: ColumnSizingState::default(),
            },
        );
        true
    }

    // ----- layout -----

    /// Grid template shared by the header and every body row.
    #[must_use]
    pub fn template(&self) -> GridTemplate {
        let visibility = self.visibility.get();
        let visible = self.columns.visible(&visibility);
        let affordance = self
            .expansion
            .is_enabled()
            .then_some(self.config.affordance_width);
        compose_with(&self.engine, &visible, &self.sizing.get(), affordance)
    }

    // ----- rows -----

    fn page_indices(&self) -> Vec<usize> {
        let order = if self.config.manual_sorting {
            (0..self.rows.len()).collect()
        } else {
            sorted_indices(&self.rows, &self.sort)
        };
        if self.config.manual_pagination {
            order
        } else {
            let range = self.pagination.slice_range(order.len());
            order[range].to_vec()
        }
    }

    fn first_ordinal(&self) -> usize {
        if self.config.manual_pagination {
            self.pagination
                .page
                .saturating_sub(1)
                .saturating_mul(self.pagination.limit)
                .saturating_add(1)
        } else {
            self.pagination.slice_range(self.rows.len()).start + 1
        }
    }

    /// Rows on the current page, in display order.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<RowView<'_, R>> {
        let first = self.first_ordinal();
        let expansion = self.expansion.state();
        self.page_indices()
            .into_iter()
            .enumerate()
            .map(|(i, index)| {
                let row = &self.rows[index];
                let can_expand = self.expansion.can_expand(row);
                RowView {
                    row,
                    expanded: can_expand && expansion.contains(&row.row_id()),
                    can_expand,
                    ordinal: first.saturating_add(i),
                }
            })
            .collect()
    }

    fn find_row(&self, row_id: &str) -> Option<&R> {
        self.rows.iter().find(|r| r.row_id() == row_id)
    }

    /// Expand or collapse a row.
    ///
    /// The row-toggle callback runs before the state changes. Returns the
    /// new expanded flag, or `None` when the row cannot expand.
    pub fn toggle_expanded(&mut self, row_id: &str) -> Option<bool> {
        let row = self.rows.iter().find(|r| r.row_id() == row_id);
        let callback = &mut self.on_row_toggle;
        self.expansion.toggle(row_id, row, |event| {
            if let Some(callback) = callback.as_mut() {
                callback(event, row);
            }
        })
    }

    /// Collapse every row.
    pub fn collapse_all(&mut self) -> usize {
        self.expansion.collapse_all()
    }

    /// Detail content of an expanded row.
    #[must_use]
    pub fn expanded_content(&self, row_id: &str) -> Option<MeasureNode> {
        self.expansion.expanded_content(self.find_row(row_id)?)
    }

    /// Read-only view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> TableSnapshot {
        let visible_row_ids: Vec<RowId> = self
            .page_indices()
            .into_iter()
            .map(|i| self.rows[i].row_id())
            .collect();
        TableSnapshot {
            visible_row_ids,
            template: self.template().to_css(),
            visible_columns: self
                .visible_columns()
                .into_iter()
                .map(|c| c.id.clone())
                .collect(),
            pagination: self.pagination,
            sort: self.sort.clone(),
            generation: self.generation,
        }
    }
}

impl<R> fmt::Debug for BaseTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseTable")
            .field("columns", &self.columns.len())
            .field("rows", &self.rows.len())
            .field("sort", &self.sort)
            .field("pagination", &self.pagination)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
