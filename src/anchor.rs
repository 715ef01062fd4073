//! Anchors: positions tagged with the side of a shape they face.
//!
//! An [`AnchorPoint`] carries its position as an [`AffineTransform`] so that
//! anchors can be pushed through rotated frames; [`AnchorPoint::point`] gives
//! the plain coordinates. The alignment tag doubles as an offset direction
//! (see [`offset`] and [`grid_offset`]) and as text anchoring for labels.
//!
//! # Angle convention
//!
//! Angles are radians measured counter-clockwise on screen: `0` points right,
//! `τ/4` points up. With y growing downward a ray at angle `θ` has direction
//! `(cos θ, −sin θ)`.

use std::f64::consts::TAU;
use std::fmt;

use crate::types::{AffineTransform, Vector};

/// Horizontal side of an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Horizontal {
    Left,
    Middle,
    Right,
}

impl Horizontal {
    /// Mirror image: left and right swap, middle stays.
    pub fn inv(self) -> Self {
        match self {
            Horizontal::Left => Horizontal::Right,
            Horizontal::Middle => Horizontal::Middle,
            Horizontal::Right => Horizontal::Left,
        }
    }

    /// Sign along the x axis.
    pub fn direction(self) -> f64 {
        match self {
            Horizontal::Left => -1.0,
            Horizontal::Middle => 0.0,
            Horizontal::Right => 1.0,
        }
    }
}

/// Vertical side of an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vertical {
    Above,
    Middle,
    Below,
}

impl Vertical {
    /// Mirror image: above and below swap, middle stays.
    pub fn inv(self) -> Self {
        match self {
            Vertical::Above => Vertical::Below,
            Vertical::Middle => Vertical::Middle,
            Vertical::Below => Vertical::Above,
        }
    }

    /// Sign along the y axis. Above is negative since y grows downward.
    pub fn direction(self) -> f64 {
        match self {
            Vertical::Above => -1.0,
            Vertical::Middle => 0.0,
            Vertical::Below => 1.0,
        }
    }
}

/// A (horizontal, vertical) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alignment {
    pub h: Horizontal,
    pub v: Vertical,
}

impl Alignment {
    pub const CENTER: Alignment = Alignment::new(Horizontal::Middle, Vertical::Middle);
    pub const RIGHT: Alignment = Alignment::new(Horizontal::Right, Vertical::Middle);
    pub const ABOVE_RIGHT: Alignment = Alignment::new(Horizontal::Right, Vertical::Above);
    pub const ABOVE: Alignment = Alignment::new(Horizontal::Middle, Vertical::Above);
    pub const ABOVE_LEFT: Alignment = Alignment::new(Horizontal::Left, Vertical::Above);
    pub const LEFT: Alignment = Alignment::new(Horizontal::Left, Vertical::Middle);
    pub const BELOW_LEFT: Alignment = Alignment::new(Horizontal::Left, Vertical::Below);
    pub const BELOW: Alignment = Alignment::new(Horizontal::Middle, Vertical::Below);
    pub const BELOW_RIGHT: Alignment = Alignment::new(Horizontal::Right, Vertical::Below);

    pub const fn new(h: Horizontal, v: Vertical) -> Self {
        Alignment { h, v }
    }

    /// Both axes mirrored.
    pub fn inv(self) -> Self {
        Alignment::new(self.h.inv(), self.v.inv())
    }

    /// Unnormalized offset direction, e.g. `(1, -1)` for above-right.
    pub fn direction(self) -> Vector {
        Vector::new(self.h.direction(), self.v.direction())
    }

    /// Angle of the compass direction this alignment names, `None` for the
    /// center.
    pub fn compass_angle(self) -> Option<f64> {
        SECTOR_TABLE
            .iter()
            .position(|a| *a == self)
            .map(|sector| sector as f64 * SECTOR)
    }
}

impl From<Horizontal> for Alignment {
    fn from(h: Horizontal) -> Self {
        Alignment::new(h, Vertical::Middle)
    }
}

impl From<Vertical> for Alignment {
    fn from(v: Vertical) -> Self {
        Alignment::new(Horizontal::Middle, v)
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.h, self.v)
    }
}

// ============================================================================
// Direction bucketing
// ============================================================================

const SECTOR: f64 = TAU / 8.0;

/// Phase added before bucketing the horizontal axis. Floor bucketing: a
/// boundary angle belongs to the counter-clockwise sector.
const H_PHASE: f64 = TAU / 16.0;

/// Phase added before bucketing the vertical axis. Ceil bucketing: a
/// boundary angle belongs to the clockwise sector.
const V_PHASE: f64 = -TAU / 16.0;

/// Alignment of the compass direction at `k·τ/8`, counter-clockwise from
/// pointing right.
const SECTOR_TABLE: [Alignment; 8] = [
    Alignment::RIGHT,
    Alignment::ABOVE_RIGHT,
    Alignment::ABOVE,
    Alignment::ABOVE_LEFT,
    Alignment::LEFT,
    Alignment::BELOW_LEFT,
    Alignment::BELOW,
    Alignment::BELOW_RIGHT,
];

/// Bucket an angle into one of the 8 compass alignments.
///
/// Each axis is bucketed separately with its own phase: the horizontal axis
/// resolves boundary ties counter-clockwise, the vertical axis clockwise.
/// So `τ/16` maps to `(Right, Middle)` while `−τ/16` maps to `(Right, Below)`.
/// Non-finite angles map to the center.
pub fn discretize_angle(theta: f64) -> Alignment {
    if !theta.is_finite() {
        return Alignment::CENTER;
    }
    let h_sector = ((theta + H_PHASE) / SECTOR).floor() as i64;
    let v_sector = ((theta + V_PHASE) / SECTOR).ceil() as i64;
    Alignment::new(
        SECTOR_TABLE[h_sector.rem_euclid(8) as usize].h,
        SECTOR_TABLE[v_sector.rem_euclid(8) as usize].v,
    )
}

/// Bucket a screen-space direction vector. The zero vector maps to the
/// center.
pub fn discretize_direction(v: Vector) -> Alignment {
    if v.x() == 0.0 && v.y() == 0.0 {
        return Alignment::CENTER;
    }
    discretize_angle(v.screen_angle())
}

// ============================================================================
// Anchor points
// ============================================================================

/// What a shape's anchor lookup is asked for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorSpec {
    /// One of the nine alignments.
    Align(Alignment),
    /// An angle in radians; cast a ray from the shape's center.
    Angle(f64),
}

impl From<Alignment> for AnchorSpec {
    fn from(a: Alignment) -> Self {
        AnchorSpec::Align(a)
    }
}

impl From<Horizontal> for AnchorSpec {
    fn from(h: Horizontal) -> Self {
        AnchorSpec::Align(h.into())
    }
}

impl From<Vertical> for AnchorSpec {
    fn from(v: Vertical) -> Self {
        AnchorSpec::Align(v.into())
    }
}

impl From<f64> for AnchorSpec {
    fn from(theta: f64) -> Self {
        AnchorSpec::Angle(theta)
    }
}

impl fmt::Display for AnchorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnchorSpec::Align(a) => write!(f, "alignment {}", a),
            AnchorSpec::Angle(theta) => write!(f, "angle {}", theta),
        }
    }
}

/// A point on or near a shape, tagged with the side it faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorPoint {
    position: AffineTransform,
    alignment: Alignment,
}

impl AnchorPoint {
    pub fn new(position: AffineTransform, alignment: Alignment) -> Self {
        Self { position, alignment }
    }

    /// Anchor at a plain point.
    pub fn at(point: Vector, alignment: Alignment) -> Self {
        Self::new(AffineTransform::translation_of(point), alignment)
    }

    /// Anchor whose alignment is derived from a direction vector.
    pub fn facing(point: Vector, direction: Vector) -> Self {
        Self::at(point, discretize_direction(direction))
    }

    /// The full position transform.
    pub fn position(&self) -> AffineTransform {
        self.position
    }

    /// Plain coordinates of the anchor.
    pub fn point(&self) -> Vector {
        self.position.translation()
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn horizontal(&self) -> Horizontal {
        self.alignment.h
    }

    pub fn vertical(&self) -> Vertical {
        self.alignment.v
    }

    /// Same position, alignment replaced per axis where given.
    pub fn realign(&self, h: Option<Horizontal>, v: Option<Vertical>) -> Self {
        Self::new(
            self.position,
            Alignment::new(h.unwrap_or(self.alignment.h), v.unwrap_or(self.alignment.v)),
        )
    }

    pub fn with_alignment(&self, alignment: Alignment) -> Self {
        Self::new(self.position, alignment)
    }

    /// Same alignment at a new position.
    pub fn with_position(&self, position: AffineTransform) -> Self {
        Self::new(position, self.alignment)
    }

    /// Moved by `delta` in the outer (world) frame.
    pub fn adjust(&self, delta: Vector) -> Self {
        Self::new(AffineTransform::translation_of(delta) * self.position, self.alignment)
    }

    /// Position pushed through `transform`; alignment kept.
    pub fn transformed(&self, transform: AffineTransform) -> Self {
        Self::new(transform * self.position, self.alignment)
    }
}

/// Shorthand for an anchor at `(x, y)`.
pub fn p(x: f64, y: f64, alignment: Alignment) -> AnchorPoint {
    AnchorPoint::at(Vector::new(x, y), alignment)
}

/// Move `anchor` by `distance` along the unit vector of its alignment.
///
/// A diagonal alignment moves `distance` in total, not per axis. The center
/// alignment does not move.
pub fn offset(anchor: &AnchorPoint, distance: f64) -> AnchorPoint {
    let unit = anchor.alignment().direction().unit();
    anchor.adjust(unit * distance)
}

/// Move `anchor` by `h_dist` horizontally and `v_dist` vertically, each
/// signed by its alignment axis. Not normalized.
pub fn grid_offset(anchor: &AnchorPoint, h_dist: f64, v_dist: f64) -> AnchorPoint {
    let a = anchor.alignment();
    anchor.adjust(Vector::new(h_dist * a.h.direction(), v_dist * a.v.direction()))
}
