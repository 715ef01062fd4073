//! Bounding-box aggregation: containers around shapes and canvas sizing

use crate::anchor::{Alignment, AnchorPoint, Horizontal, Vertical};
use crate::errors::{GeometryError, RenderError};
use crate::types::{BoundingBox, Vector};

use super::shapes::{Shape, Square, placed_origin};

/// Smallest box covering every shape.
pub fn union_bbox<S: Shape>(shapes: &[S]) -> Result<BoundingBox, GeometryError> {
    let (first, rest) = shapes.split_first().ok_or(GeometryError::EmptyShapeList)?;
    Ok(rest.iter().fold(first.bbox(), |acc, shape| acc.union(&shape.bbox())))
}

/// Box around `shapes` grown by `pad` on every side.
pub fn fit<S: Shape>(shapes: &[S], pad: f64) -> Result<FitBox, GeometryError> {
    let bounds = union_bbox(shapes)?.padded(pad);

    crate::log::debug!(
        shapes = shapes.len(),
        pad,
        x = bounds.origin().x(),
        y = bounds.origin().y(),
        w = bounds.width(),
        h = bounds.height(),
        "fit"
    );

    Ok(FitBox::new(
        AnchorPoint::at(bounds.origin(), Alignment::BELOW_RIGHT),
        bounds.width(),
        bounds.height(),
    ))
}

/// A box placed by an anchor: the anchor's alignment says which way the box
/// extends from it, as with [`Square::placed`]. [`fit`] anchors at the
/// top-left corner, tagged (Right, Below).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitBox {
    anchor: AnchorPoint,
    width: f64,
    height: f64,
}

impl FitBox {
    pub fn new(anchor: AnchorPoint, width: f64, height: f64) -> Self {
        Self { anchor, width, height }
    }

    pub fn anchor(&self) -> AnchorPoint {
        self.anchor
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn bbox(&self) -> BoundingBox {
        let origin = placed_origin(&self.anchor, self.width, self.height);
        BoundingBox::new(origin, Vector::new(self.width, self.height))
    }

    /// The container shape.
    pub fn to_square(&self) -> Square {
        Square::placed(&self.anchor, self.width, self.height)
    }

    /// Push the side(s) named by `toward` outward by `distance`; negative
    /// distances pull them in, down to zero size. The opposite side stays
    /// where it is.
    pub fn grow(&self, distance: f64, toward: impl Into<Alignment>) -> FitBox {
        let toward = toward.into();
        let alignment = self.anchor.alignment();
        let mut grown = *self;

        if toward.h != Horizontal::Middle {
            let d = distance.max(-self.width);
            grown.width += d;
            let shift = anchor_shift(alignment.h.direction(), toward.h.direction()) * d;
            grown.anchor = grown.anchor.adjust(Vector::new(shift, 0.0));
        }
        if toward.v != Vertical::Middle {
            let d = distance.max(-self.height);
            grown.height += d;
            let shift = anchor_shift(alignment.v.direction(), toward.v.direction()) * d;
            grown.anchor = grown.anchor.adjust(Vector::new(0.0, shift));
        }

        grown
    }

    /// Move the side(s) named by `toward` to the matching coordinate of
    /// `target`.
    pub fn grow_to(&self, target: Vector, toward: impl Into<Alignment>) -> FitBox {
        let toward = toward.into();
        let bounds = self.bbox();
        let mut grown = *self;

        if toward.h != Horizontal::Middle {
            let side = match toward.h {
                Horizontal::Right => bounds.max().x(),
                _ => bounds.origin().x(),
            };
            grown = grown.grow((target.x() - side) * toward.h.direction(), toward.h);
        }
        if toward.v != Vertical::Middle {
            let side = match toward.v {
                Vertical::Below => bounds.max().y(),
                _ => bounds.origin().y(),
            };
            grown = grown.grow((target.y() - side) * toward.v.direction(), toward.v);
        }

        grown
    }
}

/// How far the anchor moves, per unit of growth, when growing toward
/// `toward`. An anchor already on the far side stays, a centered one
/// follows half way.
fn anchor_shift(anchor: f64, toward: f64) -> f64 {
    if anchor == toward {
        0.0
    } else if anchor == 0.0 {
        toward / 2.0
    } else {
        toward
    }
}

/// Box covering every input box.
pub fn canvas_size(bboxes: &[BoundingBox]) -> Result<BoundingBox, RenderError> {
    let (first, rest) = bboxes.split_first().ok_or(RenderError::EmptyDiagram)?;
    let bounds = rest.iter().fold(*first, |acc, bb| acc.union(bb));
    if !bounds.is_finite() {
        return Err(RenderError::InvalidBounds);
    }
    Ok(bounds)
}

/// The visible area of a document: content plus a margin on every side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    content: BoundingBox,
    margin: f64,
}

impl Viewport {
    pub fn new(content: &BoundingBox, margin: f64) -> Self {
        Self {
            content: *content,
            margin,
        }
    }

    pub fn content(&self) -> BoundingBox {
        self.content
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// The `viewBox` rectangle.
    pub fn bounds(&self) -> BoundingBox {
        self.content.padded(self.margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::p;
    use crate::render::defaults::CANVAS_MARGIN;
    use crate::render::shapes::{Circle, ShapeEnum};

    fn v(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }

    fn two_squares() -> Vec<Square> {
        vec![
            Square::new((0.0, 0.0), 100.0, 50.0),
            Square::new((300.0, 200.0), 100.0, 50.0),
        ]
    }

    #[test]
    fn union_covers_all_shapes() {
        let bb = union_bbox(&two_squares()).unwrap();
        assert_eq!(bb.origin(), v(0.0, 0.0));
        assert_eq!(bb.extent(), v(400.0, 250.0));
    }

    #[test]
    fn union_of_one_is_its_bbox() {
        let shapes = [Circle::new((7.0, -3.0), 12.5)];
        assert_eq!(union_bbox(&shapes).unwrap(), shapes[0].bbox());
    }

    #[test]
    fn union_of_none_fails() {
        let shapes: [Square; 0] = [];
        assert_eq!(union_bbox(&shapes), Err(GeometryError::EmptyShapeList));
        assert!(fit(&shapes, 10.0).is_err());
    }

    #[test]
    fn union_mixes_shape_kinds() {
        let shapes: Vec<ShapeEnum> = vec![
            Square::new((0.0, 0.0), 10.0, 10.0).into(),
            Circle::new((50.0, 50.0), 5.0).into(),
        ];
        let bb = union_bbox(&shapes).unwrap();
        assert_eq!(bb.max(), v(55.0, 55.0));
    }

    #[test]
    fn fit_pads_every_side() {
        let shapes = two_squares();
        let union = union_bbox(&shapes).unwrap();
        let boxed = fit(&shapes, 10.0).unwrap();

        assert_eq!(boxed.anchor().point(), v(-10.0, -10.0));
        assert_eq!(boxed.anchor().alignment(), Alignment::BELOW_RIGHT);
        assert_eq!(boxed.width(), union.width() + 20.0);
        assert_eq!(boxed.height(), union.height() + 20.0);
        assert_eq!(boxed.bbox(), BoundingBox::new(v(-10.0, -10.0), v(420.0, 270.0)));
    }

    #[test]
    fn fit_box_becomes_container_square() {
        let boxed = fit(&two_squares(), 10.0).unwrap();
        let container = boxed.to_square();
        assert_eq!(container.bbox(), boxed.bbox());
    }

    #[test]
    fn grow_moves_only_the_named_side() {
        let boxed = fit(&two_squares(), 10.0).unwrap();

        let up = boxed.grow(30.0, Vertical::Above);
        assert_eq!(up.height(), 300.0);
        assert_eq!(up.anchor().point(), v(-10.0, -40.0));
        assert_eq!(up.bbox().max(), boxed.bbox().max());

        let down = boxed.grow(30.0, Vertical::Below);
        assert_eq!(down.anchor().point(), boxed.anchor().point());
        assert_eq!(down.bbox().max().y(), 290.0);

        let corner = boxed.grow(5.0, Alignment::ABOVE_LEFT);
        assert_eq!(corner.bbox().origin(), v(-15.0, -15.0));
        assert_eq!(corner.bbox().max(), boxed.bbox().max());
    }

    #[test]
    fn grow_with_centered_anchor_follows_half_way() {
        let boxed = FitBox::new(p(0.0, 0.0, Alignment::CENTER), 100.0, 50.0);
        let grown = boxed.grow(20.0, Horizontal::Right);
        assert_eq!(grown.anchor().point(), v(10.0, 0.0));
        assert_eq!(grown.bbox().origin().x(), -50.0);
        assert_eq!(grown.bbox().max().x(), 70.0);
    }

    #[test]
    fn shrinking_stops_at_zero() {
        let boxed = FitBox::new(p(0.0, 0.0, Alignment::BELOW_RIGHT), 100.0, 50.0);
        let shrunk = boxed.grow(-500.0, Horizontal::Left);
        assert_eq!(shrunk.width(), 0.0);
        assert_eq!(shrunk.anchor().point(), v(100.0, 0.0));
    }

    #[test]
    fn grow_to_reaches_target_coordinate() {
        let boxed = fit(&two_squares(), 10.0).unwrap();

        let right = boxed.grow_to(v(500.0, 0.0), Horizontal::Right);
        assert_eq!(right.bbox().max().x(), 500.0);
        assert_eq!(right.anchor().point(), boxed.anchor().point());

        let up = boxed.grow_to(v(0.0, -100.0), Vertical::Above);
        assert_eq!(up.bbox().origin().y(), -100.0);
        assert_eq!(up.height(), 360.0);
    }

    #[test]
    fn canvas_size_unions_boxes() {
        let boxes = [
            BoundingBox::new(v(0.0, 0.0), v(10.0, 10.0)),
            BoundingBox::new(v(-5.0, 20.0), v(10.0, 10.0)),
        ];
        let bounds = canvas_size(&boxes).unwrap();
        assert_eq!(bounds, BoundingBox::from_corners(v(-5.0, 0.0), v(10.0, 30.0)));
    }

    #[test]
    fn canvas_size_errors() {
        assert!(matches!(canvas_size(&[]), Err(RenderError::EmptyDiagram)));
        let bad = [BoundingBox::new(v(f64::NAN, 0.0), v(1.0, 1.0))];
        assert!(matches!(canvas_size(&bad), Err(RenderError::InvalidBounds)));
    }

    #[test]
    fn viewport_adds_margin_without_touching_content() {
        let content = BoundingBox::new(v(0.0, -10.0), v(320.0, 60.0));
        let viewport = Viewport::new(&content, CANVAS_MARGIN);
        assert_eq!(viewport.bounds(), BoundingBox::new(v(-20.0, -30.0), v(360.0, 100.0)));
        assert_eq!(viewport.content(), content);
        assert_eq!(content.origin(), v(0.0, -10.0));
    }
}
