//! Content measurement for column auto-fit.
//!
//! Auto-fit needs the natural, unwrapped width of rendered cell content. The
//! rendering surface is abstracted behind [`MeasureSurface`]; a [`Sandbox`]
//! is the scoped acquisition of that surface for one measurement pass:
//!
//! - acquiring attaches the surface,
//! - every node is cloned with truncation constraints stripped before it is
//!   measured,
//! - dropping the guard detaches the surface, on every exit path.
//!
//! [`TextSurface`] implements the surface on top of any [`TextMeasurer`], so
//! the sizing algorithm runs headless.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_width::UnicodeWidthStr;

/// Errors raised while measuring content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeasurementError {
    /// The sandbox could not be attached (e.g. the root is detached).
    #[error("measurement sandbox unavailable: {0}")]
    SandboxUnavailable(String),

    /// A sandbox is already attached to this surface.
    #[error("measurement sandbox already attached")]
    SandboxBusy,

    /// A single node could not be measured.
    #[error("failed to measure node: {0}")]
    NodeFailed(String),
}

/// Font parameters relevant to text width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font family name
    pub family: String,
    /// Font size in pixels
    pub size: f32,
    /// Bold weight
    pub bold: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 14.0,
            bold: false,
        }
    }
}

/// A rendered piece of cell or header content.
///
/// Nodes form a tree laid out inline: a node's natural width is its own
/// text, its children and its horizontal padding on both sides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasureNode {
    /// Text content
    pub text: String,
    /// Font used for `text`
    pub style: TextStyle,
    /// Horizontal padding on each side
    pub padding: f32,
    /// Truncation width; content beyond it is clipped when rendered
    pub max_width: Option<f32>,
    /// Inline children
    pub children: Vec<MeasureNode>,
}

impl MeasureNode {
    /// Create a text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the text style.
    #[must_use]
    pub fn style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Set horizontal padding.
    #[must_use]
    pub const fn padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Truncate to a width.
    #[must_use]
    pub const fn truncate(mut self, max_width: f32) -> Self {
        self.max_width = Some(max_width);
        self
    }

    /// Add an inline child.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Clone with every truncation constraint removed, recursively.
    #[must_use]
    pub fn unconstrained(&self) -> Self {
        Self {
            text: self.text.clone(),
            style: self.style.clone(),
            padding: self.padding,
            max_width: None,
            children: self.children.iter().map(Self::unconstrained).collect(),
        }
    }
}

/// Text width capability.
pub trait TextMeasurer {
    /// Width of `text` rendered with `style`, in pixels.
    fn text_width(&self, text: &str, style: &TextStyle) -> Result<f32, MeasurementError>;
}

/// Fixed-advance measurer based on terminal display width.
///
/// Each display column advances by `size * advance_ratio`; bold text is
/// slightly wider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    /// Advance per display column as a fraction of font size
    pub advance_ratio: f32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self { advance_ratio: 0.6 }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn text_width(&self, text: &str, style: &TextStyle) -> Result<f32, MeasurementError> {
        if !style.size.is_finite() || style.size < 0.0 {
            return Err(MeasurementError::NodeFailed(format!(
                "invalid font size {}",
                style.size
            )));
        }
        let weight = if style.bold { 1.05 } else { 1.0 };
        Ok(text.width() as f32 * style.size * self.advance_ratio * weight)
    }
}

/// A rendering surface that can host a measurement sandbox.
pub trait MeasureSurface {
    /// Attach the off-screen container.
    fn attach(&mut self) -> Result<(), MeasurementError>;

    /// Width of `node` as the surface would render it.
    fn measure(&mut self, node: &MeasureNode) -> Result<f32, MeasurementError>;

    /// Detach the off-screen container. Must tolerate being called once per
    /// successful `attach`.
    fn detach(&mut self);
}

/// Exclusive, scoped use of a [`MeasureSurface`].
///
/// The guard holds the surface mutably, so two sandboxes can never overlap
/// on the same surface.
pub struct Sandbox<'a, S: MeasureSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: MeasureSurface + ?Sized> Sandbox<'a, S> {
    /// Attach the surface and take the guard.
    pub fn acquire(surface: &'a mut S) -> Result<Self, MeasurementError> {
        surface.attach()?;
        tracing::trace!(target: "tabula::measure", "sandbox attached");
        Ok(Self { surface })
    }

    /// Natural width of a node with truncation removed.
    pub fn measure(&mut self, node: &MeasureNode) -> Result<f32, MeasurementError> {
        let clone = node.unconstrained();
        self.surface.measure(&clone)
    }

    /// Widest natural width over all nodes, `None` for an empty input.
    pub fn measure_max<'n>(
        &mut self,
        nodes: impl IntoIterator<Item = &'n MeasureNode>,
    ) -> Result<Option<f32>, MeasurementError> {
        let mut widest: Option<f32> = None;
        for node in nodes {
            let width = self.measure(node)?;
            widest = Some(widest.map_or(width, |w| w.max(width)));
        }
        Ok(widest)
    }
}

impl<S: MeasureSurface + ?Sized> Drop for Sandbox<'_, S> {
    fn drop(&mut self) {
        self.surface.detach();
        tracing::trace!(target: "tabula::measure", "sandbox detached");
    }
}

/// Headless surface that lays nodes out with a [`TextMeasurer`].
#[derive(Debug, Clone, Default)]
pub struct TextSurface<M> {
    measurer: M,
    attached: bool,
    attach_count: usize,
}

impl<M: TextMeasurer> TextSurface<M> {
    /// Create a surface over a measurer.
    #[must_use]
    pub const fn new(measurer: M) -> Self {
        Self {
            measurer,
            attached: false,
            attach_count: 0,
        }
    }

    /// Whether a sandbox is currently attached.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.attached
    }

    /// Number of sandboxes attached over the surface lifetime.
    #[must_use]
    pub const fn attach_count(&self) -> usize {
        self.attach_count
    }

    fn layout_width(&self, node: &MeasureNode) -> Result<f32, MeasurementError> {
        let own = if node.text.is_empty() {
            0.0
        } else {
            self.measurer.text_width(&node.text, &node.style)?
        };
        let mut children = 0.0;
        for child in &node.children {
            children += self.layout_width(child)?;
        }
        let natural = node.padding.mul_add(2.0, own + children);
        Ok(node.max_width.map_or(natural, |max| natural.min(max)))
    }
}

impl<M: TextMeasurer> MeasureSurface for TextSurface<M> {
    fn attach(&mut self) -> Result<(), MeasurementError> {
        if self.attached {
            return Err(MeasurementError::SandboxBusy);
        }
        self.attached = true;
        self.attach_count += 1;
        Ok(())
    }

    fn measure(&mut self, node: &MeasureNode) -> Result<f32, MeasurementError> {
        if !self.attached {
            return Err(MeasurementError::SandboxUnavailable(
                "surface is not attached".to_string(),
            ));
        }
        self.layout_width(node)
    }

    fn detach(&mut self) {
        self.attached = false;
    }
}
