//! Shape types for diagram rendering
//!
//! Each shape is its own type that knows how to:
//! - Calculate its bounding box
//! - Resolve anchors on its outline
//! - Render itself to SVG

use std::fmt;

use enum_dispatch::enum_dispatch;

use crate::anchor::{Alignment, AnchorPoint, AnchorSpec, discretize_angle, discretize_direction};
use crate::errors::GeometryError;
use crate::types::{AffineTransform, BoundingBox, Color, Vector};

use super::defaults;
use super::geometry::{ray_direction, ray_edge_intersect};
use super::path_builder::Path;
use super::svg::{PathData, SvgWriter};
use super::types::Style;

/// Slack on a side's edge parameter, so a ray through a corner lands on the
/// first side tested instead of on rounding noise.
const SIDE_TOLERANCE: f64 = 1e-9;

/// Common behavior for all shapes
#[enum_dispatch]
pub trait Shape {
    /// Axis-aligned box in world coordinates
    fn bbox(&self) -> BoundingBox;

    /// Resolve an alignment or an angle to a point on the shape
    fn anchor(&self, spec: AnchorSpec) -> Result<AnchorPoint, GeometryError>;

    /// Write this shape's SVG element(s)
    fn render(&self, svg: &mut SvgWriter<'_>) -> fmt::Result;

    /// Short name used in error messages
    fn name(&self) -> &'static str;
}

/// Any shape a scene can hold.
#[enum_dispatch(Shape)]
#[derive(Debug, Clone)]
pub enum ShapeEnum {
    Circle(Circle),
    Square(Square),
    Path(Path),
    Label(Label),
}

fn unsupported(shape: &'static str, spec: AnchorSpec) -> GeometryError {
    GeometryError::UnsupportedAnchor {
        shape,
        anchor: spec.to_string(),
    }
}

/// Where a shape of the given size starts so that it extends from `at` in
/// the direction of `at`'s alignment. Middle centers it on that axis.
pub(super) fn placed_origin(at: &AnchorPoint, width: f64, height: f64) -> Vector {
    let a = at.alignment();
    let dx = width * (1.0 - a.h.direction()) / 2.0;
    let dy = height * (1.0 - a.v.direction()) / 2.0;
    at.point() - Vector::new(dx, dy)
}

// ============================================================================
// Square
// ============================================================================

/// Rectangle given by its top-left corner and size, optionally transformed.
#[derive(Debug, Clone, PartialEq)]
pub struct Square {
    origin: Vector,
    width: f64,
    height: f64,
    transform: Option<AffineTransform>,
    style: Style,
}

impl Square {
    pub fn new(origin: impl Into<Vector>, width: f64, height: f64) -> Self {
        Self {
            origin: origin.into(),
            width,
            height,
            transform: None,
            style: Style::filled(Color::WHITE),
        }
    }

    /// Square extending away from `at` in the direction of its alignment:
    /// (Right, Below) puts `at` on the top-left corner, (Middle, Middle)
    /// centers the square on it.
    pub fn placed(at: &AnchorPoint, width: f64, height: f64) -> Self {
        Self::new(placed_origin(at, width, height), width, height)
    }

    /// Apply `transform` to the square's corners and anchors. Use
    /// [`AffineTransform::around`] to rotate about the square's own center.
    pub fn with_transform(mut self, transform: AffineTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn origin(&self) -> Vector {
        self.origin
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn transform(&self) -> Option<AffineTransform> {
        self.transform
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Untransformed center.
    pub fn center(&self) -> Vector {
        self.local_bbox().center()
    }

    fn local_bbox(&self) -> BoundingBox {
        BoundingBox::new(self.origin, Vector::new(self.width, self.height))
    }

    /// Where a ray from the center at `theta` leaves the square.
    ///
    /// Sides are tested top, right, left, bottom and the first hit wins. The
    /// alignment is that of the side. Under a transform the ray is cast in
    /// the square's own frame.
    pub fn edge(&self, theta: f64) -> Result<AnchorPoint, GeometryError> {
        let (point, alignment) = self.local_edge(theta)?;
        Ok(self.to_world(point, alignment))
    }

    fn local_edge(&self, theta: f64) -> Result<(Vector, Alignment), GeometryError> {
        let miss = GeometryError::NoEdgeIntersection { shape: "square", theta };
        if !theta.is_finite() {
            return Err(miss);
        }

        let (o, w, h) = (self.origin, self.width, self.height);
        let sides = [
            (o, Vector::new(w, 0.0), Alignment::ABOVE),
            (o + Vector::new(w, 0.0), Vector::new(0.0, h), Alignment::RIGHT),
            (o, Vector::new(0.0, h), Alignment::LEFT),
            (o + Vector::new(0.0, h), Vector::new(w, 0.0), Alignment::BELOW),
        ];
        let center = self.center();

        sides
            .into_iter()
            .find_map(|(start, side, alignment)| {
                let t = ray_edge_intersect(start, side, center, theta)?;
                (-SIDE_TOLERANCE..=1.0 + SIDE_TOLERANCE)
                    .contains(&t)
                    .then(|| (start + side * t.clamp(0.0, 1.0), alignment))
            })
            .ok_or(miss)
    }

    fn local_anchor(&self, alignment: Alignment) -> Result<(Vector, Alignment), GeometryError> {
        let (h, v) = (alignment.h.direction(), alignment.v.direction());
        if h != 0.0 && v != 0.0 {
            // Corners are exact
            let corner = Vector::new(self.width * (h + 1.0) / 2.0, self.height * (v + 1.0) / 2.0);
            return Ok((self.origin + corner, alignment));
        }
        match alignment.compass_angle() {
            Some(theta) => self.local_edge(theta),
            None => Ok((self.center(), Alignment::CENTER)),
        }
    }

    fn to_world(&self, point: Vector, alignment: Alignment) -> AnchorPoint {
        match self.transform {
            None => AnchorPoint::at(point, alignment),
            Some(t) if t.is_translation() => AnchorPoint::at(t.apply(point), alignment),
            Some(t) => AnchorPoint::new(
                t * AffineTransform::translation_of(point),
                discretize_direction(t.apply_direction(alignment.direction())),
            ),
        }
    }
}

impl Shape for Square {
    fn bbox(&self) -> BoundingBox {
        let local = self.local_bbox();
        match self.transform {
            None => local,
            Some(t) if t.is_translation() => BoundingBox::new(t.apply(local.origin()), local.extent()),
            Some(t) => local.transformed(t),
        }
    }

    fn anchor(&self, spec: AnchorSpec) -> Result<AnchorPoint, GeometryError> {
        let (point, alignment) = match spec {
            AnchorSpec::Align(a) => self.local_anchor(a)?,
            AnchorSpec::Angle(theta) if theta.is_finite() => self.local_edge(theta)?,
            AnchorSpec::Angle(_) => return Err(unsupported(self.name(), spec)),
        };
        Ok(self.to_world(point, alignment))
    }

    fn render(&self, svg: &mut SvgWriter<'_>) -> fmt::Result {
        let t = self.transform.unwrap_or_default();
        let [a, b, c, d] = self.local_bbox().corners().map(|p| t.apply(p));
        let path = PathData::new().m(a).l(b).l(c).l(d).z();
        svg.path(&path, &self.style, false)
    }

    fn name(&self) -> &'static str {
        "square"
    }
}

// ============================================================================
// Circle
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    center: Vector,
    radius: f64,
    style: Style,
}

impl Circle {
    pub fn new(center: impl Into<Vector>, radius: f64) -> Self {
        Self {
            center: center.into(),
            radius,
            style: Style::default(),
        }
    }

    /// Circle extending away from `at` in the direction of its alignment,
    /// like [`Square::placed`].
    pub fn placed(at: &AnchorPoint, radius: f64) -> Self {
        let origin = placed_origin(at, 2.0 * radius, 2.0 * radius);
        Self::new(origin + radius, radius)
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn center(&self) -> Vector {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Point on the circle at `theta`, tagged with the compass alignment of
    /// that direction. Periodic in `τ`.
    pub fn edge(&self, theta: f64) -> AnchorPoint {
        AnchorPoint::at(self.center + ray_direction(theta) * self.radius, discretize_angle(theta))
    }
}

impl Shape for Circle {
    fn bbox(&self) -> BoundingBox {
        BoundingBox::from_corners(self.center - self.radius, self.center + self.radius)
    }

    fn anchor(&self, spec: AnchorSpec) -> Result<AnchorPoint, GeometryError> {
        match spec {
            // Unit alignment vectors keep the cardinal points exact
            AnchorSpec::Align(a) => Ok(AnchorPoint::at(self.center + a.direction().unit() * self.radius, a)),
            AnchorSpec::Angle(theta) if theta.is_finite() => Ok(self.edge(theta)),
            AnchorSpec::Angle(_) => Err(unsupported(self.name(), spec)),
        }
    }

    fn render(&self, svg: &mut SvgWriter<'_>) -> fmt::Result {
        svg.circle(self.center, self.radius, &self.style)
    }

    fn name(&self) -> &'static str {
        "circle"
    }
}

// ============================================================================
// Label
// ============================================================================

/// Text at a point. Text is not measured, so a label's box has zero size.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    text: String,
    position: Vector,
    alignment: Alignment,
    fill: String,
}

impl Label {
    /// Label at `at`, anchored by `at`'s alignment: (Middle, Above) centers
    /// the text above the point.
    pub fn new(text: impl Into<String>, at: &AnchorPoint) -> Self {
        Self {
            text: text.into(),
            position: at.point(),
            alignment: at.alignment(),
            fill: defaults::LABEL_FILL.to_string(),
        }
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = fill.into();
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Vector {
        self.position
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }
}

impl Shape for Label {
    fn bbox(&self) -> BoundingBox {
        BoundingBox::new(self.position, Vector::ZERO)
    }

    fn anchor(&self, spec: AnchorSpec) -> Result<AnchorPoint, GeometryError> {
        match spec {
            AnchorSpec::Align(a) => Ok(AnchorPoint::at(self.position, a)),
            AnchorSpec::Angle(theta) if theta.is_finite() => Ok(AnchorPoint::at(self.position, discretize_angle(theta))),
            AnchorSpec::Angle(_) => Err(unsupported(self.name(), spec)),
        }
    }

    fn render(&self, svg: &mut SvgWriter<'_>) -> fmt::Result {
        svg.text(self.position, self.alignment, &self.fill, &self.text)
    }

    fn name(&self) -> &'static str {
        "label"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::{Horizontal, Vertical, p};
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    const EPS: f64 = 1e-9;

    fn assert_near(actual: Vector, expected: Vector) {
        assert!(
            actual.abs_diff_eq(expected, EPS),
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    fn render_to_string(shape: &impl Shape) -> String {
        let mut out = String::new();
        shape.render(&mut SvgWriter::new(&mut out)).unwrap();
        out
    }

    // ==================== Square tests ====================

    #[test]
    fn square_right_anchor_is_mid_right_edge() {
        let sq = Square::new((0.0, 0.0), 100.0, 50.0);
        let a = sq.anchor(Alignment::RIGHT.into()).unwrap();
        assert_eq!(a.point(), Vector::new(100.0, 25.0));
        assert_eq!(a.alignment(), Alignment::RIGHT);
    }

    #[test]
    fn square_right_anchor_is_relative_to_origin() {
        let sq = Square::new((30.0, 40.0), 80.0, 20.0);
        let a = sq.anchor(Horizontal::Right.into()).unwrap();
        assert_eq!(a.point(), Vector::new(110.0, 50.0));
    }

    #[test]
    fn square_mid_edges_and_corners() {
        let sq = Square::new((0.0, 0.0), 100.0, 50.0);
        let cases = [
            (Alignment::ABOVE, Vector::new(50.0, 0.0)),
            (Alignment::LEFT, Vector::new(0.0, 25.0)),
            (Alignment::BELOW, Vector::new(50.0, 50.0)),
            (Alignment::ABOVE_LEFT, Vector::new(0.0, 0.0)),
            (Alignment::ABOVE_RIGHT, Vector::new(100.0, 0.0)),
            (Alignment::BELOW_RIGHT, Vector::new(100.0, 50.0)),
            (Alignment::BELOW_LEFT, Vector::new(0.0, 50.0)),
            (Alignment::CENTER, Vector::new(50.0, 25.0)),
        ];
        for (alignment, expected) in cases {
            let a = sq.anchor(alignment.into()).unwrap();
            assert_near(a.point(), expected);
            assert_eq!(a.alignment(), alignment);
        }
    }

    #[test]
    fn square_edge_hits_sides() {
        let sq = Square::new((0.0, 0.0), 100.0, 50.0);

        let up = sq.edge(FRAC_PI_2).unwrap();
        assert_near(up.point(), Vector::new(50.0, 0.0));
        assert_eq!(up.alignment(), Alignment::ABOVE);

        // Shallow angle stays on the right side, above the middle
        let shallow = sq.edge(0.2).unwrap();
        assert_eq!(shallow.alignment(), Alignment::RIGHT);
        assert!((shallow.point().x() - 100.0).abs() < EPS);
        assert!(shallow.point().y() < 25.0);
    }

    #[test]
    fn square_corner_goes_to_first_side_in_order() {
        // top, right, left, bottom
        let expected = [
            (1.0, Alignment::ABOVE, (1.0, 0.0)),
            (3.0, Alignment::ABOVE, (0.0, 0.0)),
            (5.0, Alignment::LEFT, (0.0, 1.0)),
            (7.0, Alignment::RIGHT, (1.0, 1.0)),
        ];
        for size in [1.0, 3.0, 64.0, 100.0, 257.0, 1000.0] {
            let sq = Square::new((0.0, 0.0), size, size);
            for (eighths, alignment, (cx, cy)) in expected {
                let a = sq.edge(eighths * PI / 4.0).unwrap();
                assert_eq!(a.alignment(), alignment, "size {size}, {eighths}τ/8");
                assert_near(a.point(), Vector::new(cx * size, cy * size));
            }
        }
    }

    #[test]
    fn square_angle_anchor_matches_edge() {
        let sq = Square::new((0.0, 0.0), 100.0, 50.0);
        assert_eq!(sq.anchor(AnchorSpec::Angle(2.0)), sq.edge(2.0));
    }

    #[test]
    fn square_rejects_non_finite_angles() {
        let sq = Square::new((0.0, 0.0), 10.0, 10.0);
        assert!(matches!(
            sq.anchor(AnchorSpec::Angle(f64::NAN)),
            Err(GeometryError::UnsupportedAnchor { shape: "square", .. })
        ));
        assert!(matches!(
            sq.edge(f64::INFINITY),
            Err(GeometryError::NoEdgeIntersection { .. })
        ));
    }

    #[test]
    fn degenerate_square_has_no_edge() {
        let sq = Square::new((5.0, 5.0), 0.0, 0.0);
        assert!(matches!(
            sq.edge(1.0),
            Err(GeometryError::NoEdgeIntersection { .. })
        ));
    }

    #[test]
    fn square_placed_by_alignment() {
        let top_left = Square::placed(&p(10.0, 10.0, Alignment::BELOW_RIGHT), 40.0, 20.0);
        assert_eq!(top_left.origin(), Vector::new(10.0, 10.0));

        let centered = Square::placed(&p(10.0, 10.0, Alignment::CENTER), 40.0, 20.0);
        assert_eq!(centered.origin(), Vector::new(-10.0, 0.0));

        let above_left = Square::placed(&p(10.0, 10.0, Alignment::ABOVE_LEFT), 40.0, 20.0);
        assert_eq!(above_left.origin(), Vector::new(-30.0, -10.0));
    }

    #[test]
    fn rotated_square_bbox_covers_transformed_corners() {
        let sq = Square::new((0.0, 0.0), 100.0, 50.0);
        let t = AffineTransform::rotate_z(0.5).around(sq.center());
        let rotated = sq.clone().with_transform(t);

        let corners = BoundingBox::new(Vector::ZERO, Vector::new(100.0, 50.0))
            .corners()
            .map(|c| t.apply(c));
        let expected = BoundingBox::from_points(corners).unwrap();
        assert_eq!(rotated.bbox(), expected);
        assert!(rotated.bbox().width() > 100.0);
    }

    #[test]
    fn translated_square_moves_bbox_and_anchors() {
        let sq = Square::new((0.0, 0.0), 100.0, 50.0).with_transform(AffineTransform::translate(10.0, 20.0, 0.0));
        assert_eq!(sq.bbox().origin(), Vector::new(10.0, 20.0));
        let right = sq.anchor(Alignment::RIGHT.into()).unwrap();
        assert_eq!(right.point(), Vector::new(110.0, 45.0));
        assert_eq!(right.alignment(), Alignment::RIGHT);
    }

    #[test]
    fn rotated_square_realigns_anchors() {
        // A quarter turn about the center maps the right side to the bottom
        let sq = Square::new((0.0, 0.0), 100.0, 100.0);
        let t = AffineTransform::rotate_z(FRAC_PI_2).around(sq.center());
        let rotated = sq.with_transform(t);

        let a = rotated.anchor(Alignment::RIGHT.into()).unwrap();
        assert_near(a.point(), Vector::new(50.0, 100.0));
        assert_eq!(a.alignment(), Alignment::BELOW);
    }

    #[test]
    fn square_renders_closed_path() {
        let sq = Square::new((0.0, 0.0), 100.0, 50.0);
        assert_eq!(
            render_to_string(&sq),
            "<path d=\"M 0 0 L 100 0 L 100 50 L 0 50 Z\" fill=\"rgb(255, 255, 255)\" fill-opacity=\"1\" stroke=\"black\" stroke-width=\"1\" />\n"
        );
    }

    // ==================== Circle tests ====================

    #[test]
    fn circle_bbox() {
        let c = Circle::new((0.0, 0.0), 20.0);
        let bb = c.bbox();
        assert_eq!(bb.origin(), Vector::new(-20.0, -20.0));
        assert_eq!(bb.extent(), Vector::new(40.0, 40.0));
    }

    #[test]
    fn circle_edge_is_periodic() {
        let c = Circle::new((3.0, -4.0), 20.0);
        for i in 0..32 {
            let theta = i as f64 * 0.37 - 5.0;
            let a = c.edge(theta).point();
            let b = c.edge(theta + TAU).point();
            assert!(a.abs_diff_eq(b, 1e-9), "theta {theta}: {a:?} vs {b:?}");
        }
    }

    #[test]
    fn circle_edge_alignment_agrees_with_direction() {
        let c = Circle::new((0.0, 0.0), 10.0);
        // Sample away from the sector boundaries
        for k in 0..8 {
            for nudge in [-0.3, 0.0, 0.3] {
                let theta = k as f64 * TAU / 8.0 + nudge;
                let a = c.edge(theta);
                assert_eq!(a.alignment(), discretize_direction(a.point() - c.center()), "theta {theta}");
            }
        }
    }

    #[test]
    fn circle_edge_points_up_on_screen() {
        let c = Circle::new((0.0, 0.0), 10.0);
        let a = c.edge(FRAC_PI_2);
        assert_near(a.point(), Vector::new(0.0, -10.0));
        assert_eq!(a.alignment(), Alignment::ABOVE);

        let right = c.edge(0.0);
        assert_eq!(right.point(), Vector::new(10.0, 0.0));
        assert_eq!(right.alignment(), Alignment::RIGHT);
    }

    #[test]
    fn circle_alignment_anchors() {
        let c = Circle::new((300.0, 25.0), 20.0);
        assert_eq!(c.anchor(Alignment::LEFT.into()).unwrap().point(), Vector::new(280.0, 25.0));
        assert_eq!(c.anchor(Vertical::Above.into()).unwrap().point(), Vector::new(300.0, 5.0));
        assert_eq!(c.anchor(Alignment::CENTER.into()).unwrap().point(), Vector::new(300.0, 25.0));

        let diag = c.anchor(Alignment::BELOW_RIGHT.into()).unwrap();
        assert!(((diag.point() - c.center()).length() - 20.0).abs() < EPS);
        assert_eq!(diag.alignment(), Alignment::BELOW_RIGHT);
    }

    #[test]
    fn circle_negative_angle_wraps() {
        let c = Circle::new((0.0, 0.0), 10.0);
        let a = c.anchor(AnchorSpec::Angle(-FRAC_PI_2)).unwrap();
        assert_near(a.point(), Vector::new(0.0, 10.0));
        assert_eq!(a.alignment(), Alignment::BELOW);
        assert!(c.anchor(AnchorSpec::Angle(f64::NAN)).is_err());
    }

    #[test]
    fn circle_placed_extends_away_from_point() {
        let c = Circle::placed(&p(0.0, 0.0, Alignment::BELOW_RIGHT), 10.0);
        assert_eq!(c.center(), Vector::new(10.0, 10.0));
        let c = Circle::placed(&p(0.0, 0.0, Alignment::ABOVE), 10.0);
        assert_eq!(c.center(), Vector::new(0.0, -10.0));
    }

    #[test]
    fn circle_renders_without_fill() {
        let c = Circle::new((300.0, 25.0), 20.0);
        assert_eq!(
            render_to_string(&c),
            "<circle cx=\"300\" cy=\"25\" r=\"20\" fill=\"none\" stroke=\"black\" stroke-width=\"1\" />\n"
        );
    }

    // ==================== Label tests ====================

    #[test]
    fn label_is_a_point() {
        let l = Label::new("hi", &p(5.0, 6.0, Alignment::ABOVE));
        assert_eq!(l.bbox().origin(), Vector::new(5.0, 6.0));
        assert_eq!(l.bbox().extent(), Vector::ZERO);

        let a = l.anchor(Alignment::LEFT.into()).unwrap();
        assert_eq!(a.point(), Vector::new(5.0, 6.0));
        assert_eq!(a.alignment(), Alignment::LEFT);
    }

    #[test]
    fn label_renders_text_keywords() {
        let l = Label::new("A", &p(50.0, -10.0, Alignment::ABOVE));
        assert_eq!(
            render_to_string(&l),
            "<text x=\"50\" y=\"-10\" fill=\"black\" dominant-baseline=\"alphabetic\" text-anchor=\"middle\">A</text>\n"
        );
    }

    // ==================== Dispatch ====================

    #[test]
    fn shape_enum_dispatches() {
        let shapes: Vec<ShapeEnum> = vec![
            Square::new((0.0, 0.0), 10.0, 10.0).into(),
            Circle::new((0.0, 0.0), 5.0).into(),
            Label::new("x", &p(1.0, 1.0, Alignment::CENTER)).into(),
        ];
        let names: Vec<_> = shapes.iter().map(|s| s.name()).collect();
        assert_eq!(names, ["square", "circle", "label"]);
        assert_eq!(shapes[1].bbox().origin(), Vector::new(-5.0, -5.0));
    }

    #[test]
    fn shapes_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ShapeEnum>();
    }
}
