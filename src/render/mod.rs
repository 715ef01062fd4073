//! SVG rendering for diagrams
//!
//! This module is organized into submodules:
//! - `defaults`: Default sizes and settings
//! - `types`: Presentation types like Style
//! - `geometry`: Ray intersection and rounded polylines
//! - `shapes`: The Shape trait and its implementations
//! - `path_builder`: Connector construction
//! - `fit`: Container boxes and canvas sizing
//! - `svg`: SVG generation

pub mod defaults;
pub mod fit;
pub mod geometry;
pub mod path_builder;
pub mod shapes;
pub mod svg;
pub mod types;

use std::fmt;

pub use fit::{FitBox, Viewport, canvas_size, fit, union_bbox};
pub use path_builder::{Path, PathBuilder};
pub use shapes::{Circle, Label, Shape, ShapeEnum, Square};
pub use types::Style;

use crate::errors::{GeometryError, RenderError};
use crate::types::BoundingBox;
use svg::SvgWriter;

/// Document-level settings for [`render`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Space around the content in the viewport
    pub margin: f64,
    /// Extra space added to the content box before the margin
    pub padding: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            margin: defaults::CANVAS_MARGIN,
            padding: 0.0,
        }
    }
}

impl RenderOptions {
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }
}

/// Render shapes to an SVG document, in order, into `out`.
///
/// The viewport covers the union of the shapes' boxes plus the margin.
pub fn render<S: Shape>(shapes: &[S], out: &mut impl fmt::Write, options: &RenderOptions) -> Result<(), RenderError> {
    let boxes: Vec<BoundingBox> = shapes.iter().map(|shape| shape.bbox()).collect();
    let content = canvas_size(&boxes)?.padded(options.padding);
    let viewport = Viewport::new(&content, options.margin);
    let bounds = viewport.bounds();

    crate::log::debug!(
        shapes = shapes.len(),
        x = bounds.origin().x(),
        y = bounds.origin().y(),
        w = bounds.width(),
        h = bounds.height(),
        "render viewport"
    );

    let mut svg = SvgWriter::new(out);
    svg.preamble(&bounds)?;
    for shape in shapes {
        shape.render(&mut svg)?;
    }
    svg.tail()?;
    Ok(())
}

/// A caller-owned list of shapes, drawn in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    shapes: Vec<ShapeEnum>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, shape: impl Into<ShapeEnum>) {
        self.shapes.push(shape.into());
    }

    /// Push a copy of `shape` and hand it back, so its anchors can still be
    /// queried for later connectors.
    pub fn add<S: Clone + Into<ShapeEnum>>(&mut self, shape: S) -> S {
        self.shapes.push(shape.clone().into());
        shape
    }

    pub fn shapes(&self) -> &[ShapeEnum] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Box covering every shape.
    pub fn bbox(&self) -> Result<BoundingBox, GeometryError> {
        union_bbox(&self.shapes)
    }

    /// Container around every shape so far, grown by `pad`.
    pub fn fit(&self, pad: f64) -> Result<FitBox, GeometryError> {
        fit(&self.shapes, pad)
    }

    pub fn render(&self, out: &mut impl fmt::Write, options: &RenderOptions) -> Result<(), RenderError> {
        render(&self.shapes, out, options)
    }

    /// The whole document as a string, with default options.
    pub fn render_svg(&self) -> Result<String, RenderError> {
        let mut out = String::new();
        self.render(&mut out, &RenderOptions::default())?;
        Ok(out)
    }
}

impl<S: Into<ShapeEnum>> Extend<S> for Scene {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.shapes.extend(iter.into_iter().map(Into::into));
    }
}
