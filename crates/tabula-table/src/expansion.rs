//! Row expansion: which rows are open and what they show.

use crate::events::TableRowToggled;
use std::fmt;
use tabula_core::{BoxedPort, ExpansionState, LocalState, TableRow};
use tabula_layout::MeasureNode;

/// Decides whether a row may expand.
pub type ExpandPredicate<R> = Box<dyn Fn(&R) -> bool>;

/// Produces the detail content of an expanded row.
pub type ExpandedRenderer<R> = Box<dyn Fn(&R) -> MeasureNode>;

/// Tracks expanded rows through a state port.
pub struct ExpansionTracker<R> {
    port: BoxedPort<ExpansionState>,
    predicate: Option<ExpandPredicate<R>>,
    renderer: Option<ExpandedRenderer<R>>,
}

impl<R: TableRow> Default for ExpansionTracker<R> {
    fn default() -> Self {
        Self::new(Box::new(LocalState::new(ExpansionState::default())))
    }
}

impl<R: TableRow> ExpansionTracker<R> {
    /// Track expansion through a port.
    #[must_use]
    pub fn new(port: BoxedPort<ExpansionState>) -> Self {
        Self {
            port,
            predicate: None,
            renderer: None,
        }
    }

    pub(crate) fn from_parts(
        port: BoxedPort<ExpansionState>,
        predicate: Option<ExpandPredicate<R>>,
        renderer: Option<ExpandedRenderer<R>>,
    ) -> Self {
        Self {
            port,
            predicate,
            renderer,
        }
    }

    /// Decide per row whether it may expand.
    #[must_use]
    pub fn predicate(mut self, predicate: impl Fn(&R) -> bool + 'static) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Render expanded rows.
    #[must_use]
    pub fn renderer(mut self, renderer: impl Fn(&R) -> MeasureNode + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    /// Whether rows can expand at all, i.e. the table needs a toggle column.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.predicate.is_some() || self.renderer.is_some()
    }

    /// Check whether a row is expanded.
    #[must_use]
    pub fn is_expanded(&self, row_id: &str) -> bool {
        self.port.get().contains(row_id)
    }

    /// Whether a row may expand. Without a predicate, rows may expand iff a
    /// renderer was supplied.
    #[must_use]
    pub fn can_expand(&self, row: &R) -> bool {
        self.predicate
            .as_ref()
            .map_or(self.renderer.is_some(), |predicate| predicate(row))
    }

    /// Flip a row's expansion.
    ///
    /// `notify` receives the toggle before the state changes. Rows that
    /// cannot expand are ignored. An id missing from the current rows may
    /// still be toggled when expansion is enabled; it stays inert until a
    /// row with that id shows up.
    ///
    /// Returns the new expanded flag, or `None` when ignored.
    pub fn toggle(
        &mut self,
        row_id: &str,
        row: Option<&R>,
        notify: impl FnOnce(&TableRowToggled),
    ) -> Option<bool> {
        let allowed = row.map_or_else(|| self.is_enabled(), |r| self.can_expand(r));
        if !allowed {
            tracing::debug!(
                target: "tabula::table",
                row = row_id,
                "toggle ignored: row cannot expand"
            );
            return None;
        }

        let expanded = !self.is_expanded(row_id);
        notify(&TableRowToggled {
            row_id: row_id.to_string(),
            expanded,
        });
        self.port.update(&mut |state| state.set(row_id, expanded));
        tracing::debug!(target: "tabula::table", row = row_id, expanded, "row toggled");
        Some(expanded)
    }

    /// Collapse every row. Returns how many were expanded.
    pub fn collapse_all(&mut self) -> usize {
        let mut collapsed = 0;
        self.port.update(&mut |state| {
            collapsed = state.len();
            state.clear();
        });
        collapsed
    }

    /// Detail content for an expanded row, `None` when collapsed or when
    /// there is no renderer.
    #[must_use]
    pub fn expanded_content(&self, row: &R) -> Option<MeasureNode> {
        let renderer = self.renderer.as_ref()?;
        self.is_expanded(&row.row_id()).then(|| renderer(row))
    }

    /// Current expansion state.
    #[must_use]
    pub fn state(&self) -> ExpansionState {
        self.port.get()
    }
}

impl<R> fmt::Debug for ExpansionTracker<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpansionTracker")
            .field("predicate", &self.predicate.is_some())
            .field("renderer", &self.renderer.is_some())
            .finish_non_exhaustive()
    }
}
