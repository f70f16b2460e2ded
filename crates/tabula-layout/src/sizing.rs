//! Column width resolution, drag-resize and auto-fit.
//!
//! All operations write to a [`ColumnSizingState`] and touch exactly one
//! column. Overrides are always clamped to the column floor.

use crate::measure::{MeasureNode, MeasureSurface, MeasurementError, Sandbox};
use tabula_core::{ColumnDescriptor, ColumnSizingState, TableConfig, MIN_COLUMN_WIDTH};

/// An in-progress drag on a column's resize handle.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeGesture {
    /// Column being resized
    pub column_id: String,
    /// Width when the drag started
    pub start_width: f32,
}

/// Resolves and updates column widths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingEngine {
    floor: f32,
    padding: f32,
    enabled: bool,
}

impl Default for SizingEngine {
    fn default() -> Self {
        Self::from_config(&TableConfig::default())
    }
}

impl SizingEngine {
    /// Build from table configuration. The configured floor can only raise
    /// the built-in [`MIN_COLUMN_WIDTH`].
    #[must_use]
    pub fn from_config(config: &TableConfig) -> Self {
        Self {
            floor: config.min_column_width.max(MIN_COLUMN_WIDTH),
            padding: config.auto_fit_padding,
            enabled: config.enable_column_resizing,
        }
    }

    /// Table-wide width floor.
    #[must_use]
    pub const fn floor(&self) -> f32 {
        self.floor
    }

    /// Override if present, otherwise the descriptor default.
    ///
    /// Overrides are clamped on read as well, so a caller-owned sizing state
    /// holding a narrower value still renders at the floor.
    #[must_use]
    pub fn resolve_width(&self, column: &ColumnDescriptor, sizing: &ColumnSizingState) -> f32 {
        sizing
            .get(&column.id)
            .map_or(column.default_width, |width| self.clamp(column, width))
    }

    /// Clamp a requested width to the column floor.
    #[must_use]
    pub fn clamp(&self, column: &ColumnDescriptor, width: f32) -> f32 {
        if width.is_nan() {
            return column.floor(self.floor);
        }
        width.max(column.floor(self.floor))
    }

    /// Whether resize operations apply to this column.
    #[must_use]
    pub const fn can_resize(&self, column: &ColumnDescriptor) -> bool {
        self.enabled && column.resizable
    }

    /// Set an explicit width. Returns the stored width, or `None` when the
    /// column cannot be resized.
    pub fn set_width(
        &self,
        column: &ColumnDescriptor,
        sizing: &mut ColumnSizingState,
        width: f32,
    ) -> Option<f32> {
        if !self.can_resize(column) {
            tracing::debug!(
                target: "tabula::sizing",
                column = %column.id,
                "resize ignored: column is not resizable"
            );
            return None;
        }
        let width = self.clamp(column, width);
        sizing.set(column.id.clone(), width);
        tracing::trace!(target: "tabula::sizing", column = %column.id, width, "column width set");
        Some(width)
    }

    /// Start a drag gesture on a column.
    #[must_use]
    pub fn begin_resize(
        &self,
        column: &ColumnDescriptor,
        sizing: &ColumnSizingState,
    ) -> Option<ResizeGesture> {
        self.can_resize(column).then(|| ResizeGesture {
            column_id: column.id.clone(),
            start_width: self.resolve_width(column, sizing),
        })
    }

    /// Apply a cumulative pointer delta measured from the gesture start.
    pub fn drag(
        &self,
        gesture: &ResizeGesture,
        column: &ColumnDescriptor,
        sizing: &mut ColumnSizingState,
        delta: f32,
    ) -> Option<f32> {
        if gesture.column_id != column.id {
            return None;
        }
        self.set_width(column, sizing, gesture.start_width + delta)
    }

    /// Apply an incremental delta to the current width.
    pub fn on_drag_resize(
        &self,
        column: &ColumnDescriptor,
        sizing: &mut ColumnSizingState,
        delta: f32,
    ) -> Option<f32> {
        let current = self.resolve_width(column, sizing);
        self.set_width(column, sizing, current + delta)
    }

    /// Widest natural width of the header and body content, plus padding,
    /// floored.
    pub fn measure_content<S: MeasureSurface + ?Sized>(
        &self,
        column: &ColumnDescriptor,
        surface: &mut S,
        header: &MeasureNode,
        body: &[MeasureNode],
    ) -> Result<f32, MeasurementError> {
        let mut sandbox = Sandbox::acquire(surface)?;
        let widest = sandbox
            .measure_max(std::iter::once(header).chain(body))?
            .unwrap_or(0.0);
        Ok(self.clamp(column, widest + self.padding))
    }

    /// Size a column to fit its content.
    ///
    /// Returns the new width, or `None` when the column cannot be resized or
    /// measurement failed. Failures leave the current width untouched.
    pub fn auto_fit<S: MeasureSurface + ?Sized>(
        &self,
        column: &ColumnDescriptor,
        sizing: &mut ColumnSizingState,
        surface: &mut S,
        header: &MeasureNode,
        body: &[MeasureNode],
    ) -> Option<f32> {
        if !self.can_resize(column) {
            return None;
        }
        match self.measure_content(column, surface, header, body) {
            Ok(width) => {
                tracing::debug!(
                    target: "tabula::sizing",
                    column = %column.id,
                    width,
                    cells = body.len(),
                    "auto-fit"
                );
                self.set_width(column, sizing, width)
            }
            Err(err) => {
                tracing::warn!(
                    target: "tabula::sizing",
                    column = %column.id,
                    error = %err,
                    "auto-fit failed, keeping current width"
                );
                None
            }
        }
    }

    /// Drop the override so the default width applies again.
    pub fn reset(&self, column: &ColumnDescriptor, sizing: &mut ColumnSizingState) -> bool {
        sizing.remove(&column.id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::{MonospaceMeasurer, TextSurface};
    use proptest::prelude::*;

    fn col() -> ColumnDescriptor {
        ColumnDescriptor::new("name", "Name").width(120.0)
    }

    fn surface() -> TextSurface<MonospaceMeasurer> {
        TextSurface::new(MonospaceMeasurer::default())
    }

    /// Surface whose root is gone: attach always fails.
    struct DetachedSurface;

    impl MeasureSurface for DetachedSurface {
        fn attach(&mut self) -> Result<(), MeasurementError> {
            Err(MeasurementError::SandboxUnavailable("detached root".to_string()))
        }

        fn measure(&mut self, _node: &MeasureNode) -> Result<f32, MeasurementError> {
            Ok(0.0)
        }

        fn detach(&mut self) {}
    }

    // ===== Resolve Tests =====

    #[test]
    fn test_resolve_uses_default_then_override() {
        let engine = SizingEngine::default();
        let mut sizing = ColumnSizingState::default();
        assert_eq!(engine.resolve_width(&col(), &sizing), 120.0);
        sizing.set("name", 200.0);
        assert_eq!(engine.resolve_width(&col(), &sizing), 200.0);
    }

    #[test]
    fn test_resolve_floors_narrow_override() {
        let engine = SizingEngine::default();
        let mut sizing = ColumnSizingState::default();
        sizing.set("name", 10.0);
        assert_eq!(engine.resolve_width(&col(), &sizing), 50.0);
        assert_eq!(engine.resolve_width(&col().min_width(90.0), &sizing), 90.0);

        // a drag starts from the floored width, not the stored one
        let gesture = engine.begin_resize(&col(), &sizing).unwrap();
        assert_eq!(gesture.start_width, 50.0);
        assert_eq!(engine.drag(&gesture, &col(), &mut sizing, 5.0), Some(55.0));
    }

    #[test]
    fn test_config_cannot_lower_floor() {
        let engine = SizingEngine::from_config(&TableConfig::new().min_column_width(1.0));
        assert_eq!(engine.floor(), 50.0);
        let mut sizing = ColumnSizingState::default();
        assert_eq!(engine.on_drag_resize(&col(), &mut sizing, -119.0), Some(50.0));
    }

    // ===== Drag Tests =====

    #[test]
    fn test_drag_resize_incremental() {
        let engine = SizingEngine::default();
        let mut sizing = ColumnSizingState::default();
        assert_eq!(engine.on_drag_resize(&col(), &mut sizing, 30.0), Some(150.0));
        assert_eq!(engine.on_drag_resize(&col(), &mut sizing, -20.0), Some(130.0));
        assert_eq!(sizing.get("name"), Some(130.0));
    }

    #[test]
    fn test_drag_clamps_to_floor() {
        let engine = SizingEngine::default();
        let mut sizing = ColumnSizingState::default();
        assert_eq!(engine.on_drag_resize(&col(), &mut sizing, -500.0), Some(50.0));
    }

    #[test]
    fn test_drag_respects_column_min_width() {
        let engine = SizingEngine::default();
        let mut sizing = ColumnSizingState::default();
        let column = col().min_width(90.0);
        assert_eq!(engine.on_drag_resize(&column, &mut sizing, -100.0), Some(90.0));
    }

    #[test]
    fn test_gesture_uses_start_width() {
        let engine = SizingEngine::default();
        let mut sizing = ColumnSizingState::default();
        let gesture = engine.begin_resize(&col(), &sizing).unwrap();
        assert_eq!(gesture.start_width, 120.0);

        // pointer reports cumulative deltas
        engine.drag(&gesture, &col(), &mut sizing, 10.0);
        engine.drag(&gesture, &col(), &mut sizing, 20.0);
        assert_eq!(sizing.get("name"), Some(140.0));
    }

    #[test]
    fn test_gesture_for_other_column_ignored() {
        let engine = SizingEngine::default();
        let mut sizing = ColumnSizingState::default();
        let gesture = engine.begin_resize(&col(), &sizing).unwrap();
        let other = ColumnDescriptor::new("other", "Other");
        assert_eq!(engine.drag(&gesture, &other, &mut sizing, 10.0), None);
        assert!(sizing.is_empty());
    }

    #[test]
    fn test_non_resizable_is_noop() {
        let engine = SizingEngine::default();
        let mut sizing = ColumnSizingState::default();
        let fixed = col().fixed();
        assert!(engine.begin_resize(&fixed, &sizing).is_none());
        assert_eq!(engine.on_drag_resize(&fixed, &mut sizing, 40.0), None);
        assert_eq!(
            engine.auto_fit(&fixed, &mut sizing, &mut surface(), &MeasureNode::text("x"), &[]),
            None
        );
        assert!(sizing.is_empty());
    }

    #[test]
    fn test_resizing_disabled_is_noop() {
        let engine = SizingEngine::from_config(&TableConfig::new().column_resizing(false));
        let mut sizing = ColumnSizingState::default();
        assert_eq!(engine.on_drag_resize(&col(), &mut sizing, 40.0), None);
        assert!(sizing.is_empty());
    }

    // ===== Auto-fit Tests =====

    #[test]
    fn test_auto_fit_takes_widest_cell() {
        let engine = SizingEngine::default();
        let mut sizing = ColumnSizingState::default();
        let header = MeasureNode::text("Name");
        let body = vec![
            MeasureNode::text("Al"),
            MeasureNode::text("A considerably longer name").truncate(60.0),
        ];
        let mut s = surface();
        let width = engine.auto_fit(&col(), &mut sizing, &mut s, &header, &body).unwrap();
        // 26 columns * 8.4px + 16px padding
        assert!((width - 234.4).abs() < 0.01);
        assert_eq!(sizing.get("name"), Some(width));
        assert!(!s.is_attached());
        assert_eq!(s.attach_count(), 1);
    }

    #[test]
    fn test_auto_fit_header_only() {
        let engine = SizingEngine::default();
        let mut sizing = ColumnSizingState::default();
        let header = MeasureNode::text("A very long header title");
        let width = engine
            .auto_fit(&col(), &mut sizing, &mut surface(), &header, &[])
            .unwrap();
        // 24 columns * 8.4px + 16px padding
        assert!((width - 217.6).abs() < 0.01);
    }

    #[test]
    fn test_auto_fit_floors_narrow_content() {
        let engine = SizingEngine::default();
        let mut sizing = ColumnSizingState::default();
        let width = engine
            .auto_fit(&col(), &mut sizing, &mut surface(), &MeasureNode::text("#"), &[])
            .unwrap();
        assert_eq!(width, 50.0);
    }

    #[test]
    fn test_auto_fit_failure_keeps_width() {
        let engine = SizingEngine::default();
        let mut sizing = ColumnSizingState::default();
        sizing.set("name", 180.0);
        let result = engine.auto_fit(
            &col(),
            &mut sizing,
            &mut DetachedSurface,
            &MeasureNode::text("Name"),
            &[],
        );
        assert_eq!(result, None);
        assert_eq!(sizing.get("name"), Some(180.0));
    }

    #[test]
    fn test_auto_fit_node_failure_detaches() {
        let engine = SizingEngine::default();
        let mut sizing = ColumnSizingState::default();
        let mut s = surface();
        let bad = MeasureNode::text("x").style(crate::measure::TextStyle {
            size: f32::INFINITY,
            ..Default::default()
        });
        let header = MeasureNode::text("Name");
        let result = engine.auto_fit(&col(), &mut sizing, &mut s, &header, &[bad]);
        assert_eq!(result, None);
        assert!(sizing.is_empty());
        assert!(!s.is_attached());

        // the surface is reusable afterwards
        assert!(engine
            .auto_fit(&col(), &mut sizing, &mut s, &MeasureNode::text("Name"), &[])
            .is_some());
        assert_eq!(s.attach_count(), 2);
    }

    // ===== Reset Tests =====

    #[test]
    fn test_reset() {
        let engine = SizingEngine::default();
        let mut sizing = ColumnSizingState::default();
        engine.set_width(&col(), &mut sizing, 300.0);
        assert!(engine.reset(&col(), &mut sizing));
        assert!(!engine.reset(&col(), &mut sizing));
        assert_eq!(engine.resolve_width(&col(), &sizing), 120.0);
    }

    proptest! {
        #[test]
        fn prop_requested_width_below_floor_is_floor(requested in -1000.0f32..50.0) {
            let engine = SizingEngine::default();
            let mut sizing = ColumnSizingState::default();
            let stored = engine.set_width(&col(), &mut sizing, requested);
            prop_assert_eq!(stored, Some(50.0));
            prop_assert_eq!(sizing.get("name"), Some(50.0));
        }

        #[test]
        fn prop_stored_width_never_below_floor(
            deltas in prop::collection::vec(-300.0f32..300.0, 1..20),
        ) {
            let engine = SizingEngine::default();
            let mut sizing = ColumnSizingState::default();
            for delta in deltas {
                engine.on_drag_resize(&col(), &mut sizing, delta);
                prop_assert!(sizing.get("name").unwrap_or(120.0) >= 50.0);
            }
        }
    }
}
