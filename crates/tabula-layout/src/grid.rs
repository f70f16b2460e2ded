//! Shared column template for header and body rows.
//!
//! The template is a pure function of the visible columns, the sizing
//! overrides and the optional expand-toggle column. Header and every body row
//! consume the same template, so tracks always line up.

use crate::sizing::SizingEngine;
use serde::{Deserialize, Serialize};
use std::fmt;
use tabula_core::{ColumnDescriptor, ColumnSizingState};

/// What a track holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackKind {
    /// Leading expand-toggle column
    Affordance,
    /// Data column with this id
    Column(String),
}

/// One column track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Track content
    pub kind: TrackKind,
    /// Width in pixels
    pub width: f32,
}

impl Track {
    /// CSS length for this track.
    #[must_use]
    pub fn css(&self) -> String {
        format!("{}px", self.width)
    }

    /// Column id, `None` for the affordance track.
    #[must_use]
    pub fn column_id(&self) -> Option<&str> {
        match &self.kind {
            TrackKind::Column(id) => Some(id),
            TrackKind::Affordance => None,
        }
    }
}

/// Ordered column tracks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridTemplate {
    tracks: Vec<Track>,
}

impl GridTemplate {
    /// All tracks in order.
    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Get number of tracks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the template has no tracks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Whether the first track is the expand-toggle column.
    #[must_use]
    pub fn has_affordance(&self) -> bool {
        matches!(
            self.tracks.first(),
            Some(Track {
                kind: TrackKind::Affordance,
                ..
            })
        )
    }

    /// Per-track CSS lengths.
    #[must_use]
    pub fn track_strings(&self) -> Vec<String> {
        self.tracks.iter().map(Track::css).collect()
    }

    /// Space-separated template, e.g. `"40px 120px 80px"`.
    #[must_use]
    pub fn to_css(&self) -> String {
        self.track_strings().join(" ")
    }

    /// Track widths in order.
    #[must_use]
    pub fn widths(&self) -> Vec<f32> {
        self.tracks.iter().map(|t| t.width).collect()
    }

    /// Sum of all track widths.
    #[must_use]
    pub fn total_width(&self) -> f32 {
        self.tracks.iter().map(|t| t.width).sum()
    }

    /// `(start, width)` of every track.
    #[must_use]
    pub fn offsets(&self) -> Vec<(f32, f32)> {
        let mut position = 0.0;
        self.tracks
            .iter()
            .map(|t| {
                let start = position;
                position += t.width;
                (start, t.width)
            })
            .collect()
    }

    /// Column ids in track order, excluding the affordance.
    #[must_use]
    pub fn column_ids(&self) -> Vec<&str> {
        self.tracks.iter().filter_map(Track::column_id).collect()
    }

    /// Track index of a column.
    #[must_use]
    pub fn track_index(&self, column_id: &str) -> Option<usize> {
        self.tracks
            .iter()
            .position(|t| t.column_id() == Some(column_id))
    }
}

impl fmt::Display for GridTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Compose the template for the visible columns.
///
/// `affordance` is the width of the leading expand-toggle column, if the
/// table has one. Hidden columns must already be filtered out of `visible`;
/// they get no track at all.
#[must_use]
pub fn compose(
    visible: &[&ColumnDescriptor],
    sizing: &ColumnSizingState,
    affordance: Option<f32>,
) -> GridTemplate {
    compose_with(&SizingEngine::default(), visible, sizing, affordance)
}

/// [`compose`] with an explicit sizing engine.
#[must_use]
pub fn compose_with(
    engine: &SizingEngine,
    visible: &[&ColumnDescriptor],
    sizing: &ColumnSizingState,
    affordance: Option<f32>,
) -> GridTemplate {
    let mut tracks = Vec::with_capacity(visible.len() + usize::from(affordance.is_some()));
    if let Some(width) = affordance {
        tracks.push(Track {
            kind: TrackKind::Affordance,
            width,
        });
    }
    tracks.extend(visible.iter().map(|column| Track {
        kind: TrackKind::Column(column.id.clone()),
        width: engine.resolve_width(column, sizing),
    }));
    GridTemplate { tracks }
}
