//! Path builder for connectors.
//!
//! A connector is a polyline through anchor points with rounded interior
//! corners and, by default, an arrowhead on its final segment.
//!
//! ```
//! use figura::{Alignment, PathBuilder, p};
//!
//! let path = PathBuilder::new(&p(0.0, 0.0, Alignment::RIGHT))
//!     .to_hv(&p(100.0, 50.0, Alignment::BELOW))
//!     .radius(8.0)
//!     .build()
//!     .unwrap();
//! assert_eq!(path.points().len(), 3);
//! ```

use std::fmt;

use crate::anchor::{AnchorPoint, AnchorSpec};
use crate::errors::GeometryError;
use crate::types::{BoundingBox, Vector};

use super::defaults;
use super::geometry::{PathCommand, rounded_polyline};
use super::shapes::Shape;
use super::svg::{PathData, SvgWriter};
use super::types::Style;

/// Collects the vertices of a connector.
#[derive(Debug, Clone)]
pub struct PathBuilder {
    points: Vec<Vector>,
    radius: f64,
    arrow: bool,
    style: Style,
}

impl PathBuilder {
    pub fn new(start: &AnchorPoint) -> Self {
        Self::from_points([start.point()])
    }

    /// Builder over plain points. Fewer than two fail at [`PathBuilder::build`].
    pub fn from_points(points: impl IntoIterator<Item = Vector>) -> Self {
        Self {
            points: points.into_iter().collect(),
            radius: defaults::CORNER_RADIUS,
            arrow: true,
            style: Style::default(),
        }
    }

    /// Straight run to `next`.
    pub fn to(mut self, next: &AnchorPoint) -> Self {
        self.points.push(next.point());
        self
    }

    /// Horizontal run, then vertical into `next`.
    pub fn to_hv(self, next: &AnchorPoint) -> Self {
        let (head, to) = (self.head(), next.point());
        self.via([Vector::new(to.x(), head.y())], to)
    }

    /// Vertical run, then horizontal into `next`.
    pub fn to_vh(self, next: &AnchorPoint) -> Self {
        let (head, to) = (self.head(), next.point());
        self.via([Vector::new(head.x(), to.y())], to)
    }

    /// Horizontal, vertical at the midpoint, horizontal again.
    pub fn to_hvh(self, next: &AnchorPoint) -> Self {
        let (head, to) = (self.head(), next.point());
        let mid = (head.x() + to.x()) / 2.0;
        self.via([Vector::new(mid, head.y()), Vector::new(mid, to.y())], to)
    }

    /// Vertical, horizontal at the midpoint, vertical again.
    pub fn to_vhv(self, next: &AnchorPoint) -> Self {
        let (head, to) = (self.head(), next.point());
        let mid = (head.y() + to.y()) / 2.0;
        self.via([Vector::new(head.x(), mid), Vector::new(to.x(), mid)], to)
    }

    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Whether the final segment ends in an arrowhead.
    pub fn arrow(mut self, arrow: bool) -> Self {
        self.arrow = arrow;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn build(self) -> Result<Path, GeometryError> {
        let head = self.arrow.then_some(defaults::ARROWHEAD_LENGTH);
        let commands = rounded_polyline(&self.points, self.radius, head)?;

        crate::log::debug!(
            points = self.points.len(),
            radius = self.radius,
            arrow = self.arrow,
            "built path"
        );

        Ok(Path {
            points: self.points,
            data: PathData::from_commands(commands),
            arrow: self.arrow,
            style: self.style,
        })
    }

    fn head(&self) -> Vector {
        self.points.last().copied().unwrap_or_default()
    }

    fn via<const N: usize>(mut self, elbows: [Vector; N], to: Vector) -> Self {
        self.points.extend(elbows);
        self.points.push(to);
        self
    }
}

/// A built connector. Its commands are computed once, at build time.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    points: Vec<Vector>,
    data: PathData,
    arrow: bool,
    style: Style,
}

impl Path {
    /// The vertices, without rounding or arrowhead clipping.
    pub fn points(&self) -> &[Vector] {
        &self.points
    }

    pub fn commands(&self) -> &[PathCommand] {
        self.data.commands()
    }

    pub fn has_arrow(&self) -> bool {
        self.arrow
    }

    pub fn segments(&self) -> usize {
        self.points.len() - 1
    }

    /// Point at fraction `t` along straight segment `segment`, tagged with
    /// the compass alignment of the segment's direction. Corner rounding is
    /// ignored.
    pub fn edge(&self, segment: usize, t: f64) -> Result<AnchorPoint, GeometryError> {
        let segments = self.segments();
        if segment >= segments {
            return Err(GeometryError::SegmentOutOfRange { index: segment, segments });
        }
        if !(0.0..=1.0).contains(&t) {
            return Err(GeometryError::FractionOutOfRange { t });
        }

        let start = self.points[segment];
        let line = self.points[segment + 1] - start;
        Ok(AnchorPoint::facing(start + line * t, line))
    }
}

impl Shape for Path {
    /// Box over the vertices. Rounded corners stay inside it; an arrowhead
    /// marker may poke out by its own size.
    fn bbox(&self) -> BoundingBox {
        BoundingBox::from_points(self.points.iter().copied())
            .unwrap_or_else(|| BoundingBox::new(Vector::ZERO, Vector::ZERO))
    }

    fn anchor(&self, spec: AnchorSpec) -> Result<AnchorPoint, GeometryError> {
        match spec {
            AnchorSpec::Align(a) => {
                let bb = self.bbox();
                let frac = (a.direction() + Vector::new(1.0, 1.0)) / 2.0;
                Ok(AnchorPoint::at(bb.origin() + bb.extent() * frac, a))
            }
            AnchorSpec::Angle(_) => Err(GeometryError::UnsupportedAnchor {
                shape: self.name(),
                anchor: spec.to_string(),
            }),
        }
    }

    fn render(&self, svg: &mut SvgWriter<'_>) -> fmt::Result {
        if self.arrow {
            svg.ensure_arrowhead()?;
        }
        svg.path(&self.data, &self.style, self.arrow)
    }

    fn name(&self) -> &'static str {
        "path"
    }
}
