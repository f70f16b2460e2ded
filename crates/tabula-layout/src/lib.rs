#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]
//! Column sizing and grid layout for the Tabula table engine.
//!
//! # Sizing
//!
//! [`SizingEngine`] resolves each column's width (override, else default),
//! applies drag-resize gestures and auto-fits columns to their content. Every
//! override is clamped to a floor so columns never collapse.
//!
//! # Measurement
//!
//! Auto-fit measures content through a [`MeasureSurface`] held in a scoped
//! [`Sandbox`]: attach on acquire, detach on drop, including when a
//! measurement fails. [`TextSurface`] + [`MonospaceMeasurer`] give a headless
//! surface.
//!
//! # Grid template
//!
//! [`compose`] turns the visible columns into one [`GridTemplate`] shared by
//! the header and every body row.

mod grid;
mod measure;
mod sizing;

pub use grid::{compose, compose_with, GridTemplate, Track, TrackKind};
pub use measure::{
    MeasureNode, MeasureSurface, MeasurementError, MonospaceMeasurer, Sandbox, TextMeasurer,
    TextStyle, TextSurface,
};
pub use sizing::{ResizeGesture, SizingEngine};
