//! Value types for the layout kernel: vectors, affine transforms, bounding
//! boxes and colors.
//!
//! Everything here is an immutable `Copy` value. Operations return fresh
//! values; nothing is mutated in place.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use glam::{DMat4, DVec3, DVec4};

/// A 2- or 3-component vector. 2-D vectors carry `z = 0`.
///
/// Screen convention: x grows to the right, y grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[repr(transparent)]
pub struct Vector(DVec3);

impl Vector {
    pub const ZERO: Vector = Vector(DVec3::ZERO);

    /// Create a 2-D vector.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Vector {
        Vector(DVec3::new(x, y, 0.0))
    }

    /// Create a 3-D vector.
    #[inline]
    pub const fn new3(x: f64, y: f64, z: f64) -> Vector {
        Vector(DVec3::new(x, y, z))
    }

    #[inline]
    pub fn x(self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(self) -> f64 {
        self.0.z
    }

    pub fn dot(self, other: Vector) -> f64 {
        self.0.dot(other.0)
    }

    /// Euclidean length.
    pub fn length(self) -> f64 {
        self.0.length()
    }

    /// Unit vector in the same direction, or the zero vector when the length
    /// is zero.
    pub fn unit(self) -> Vector {
        Vector(self.0.normalize_or_zero())
    }

    /// `atan2(y, x)` in raw screen coordinates.
    pub fn angle(self) -> f64 {
        self.0.y.atan2(self.0.x)
    }

    /// Angle measured counter-clockwise on screen, i.e. with y flipped so
    /// that "up" is `τ/4`. This is the convention edge rays use.
    pub fn screen_angle(self) -> f64 {
        (-self.0.y).atan2(self.0.x)
    }

    /// Componentwise minimum.
    pub fn min(self, other: Vector) -> Vector {
        Vector(self.0.min(other.0))
    }

    /// Componentwise maximum.
    pub fn max(self, other: Vector) -> Vector {
        Vector(self.0.max(other.0))
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Approximate equality, for tests and degenerate-geometry checks.
    pub fn abs_diff_eq(self, other: Vector, epsilon: f64) -> bool {
        self.0.abs_diff_eq(other.0, epsilon)
    }

    pub(crate) fn as_dvec3(self) -> DVec3 {
        self.0
    }
}

impl From<DVec3> for Vector {
    fn from(v: DVec3) -> Self {
        Vector(v)
    }
}

impl From<(f64, f64)> for Vector {
    fn from((x, y): (f64, f64)) -> Self {
        Vector::new(x, y)
    }
}

impl Add for Vector {
    type Output = Vector;
    fn add(self, rhs: Vector) -> Vector { Vector(self.0 + rhs.0) }
}
impl Sub for Vector {
    type Output = Vector;
    fn sub(self, rhs: Vector) -> Vector { Vector(self.0 - rhs.0) }
}
impl Mul for Vector {
    type Output = Vector;
    fn mul(self, rhs: Vector) -> Vector { Vector(self.0 * rhs.0) }
}
impl Div for Vector {
    type Output = Vector;
    fn div(self, rhs: Vector) -> Vector { Vector(self.0 / rhs.0) }
}
impl Mul<f64> for Vector {
    type Output = Vector;
    fn mul(self, rhs: f64) -> Vector { Vector(self.0 * rhs) }
}
impl Div<f64> for Vector {
    type Output = Vector;
    fn div(self, rhs: f64) -> Vector { Vector(self.0 / rhs) }
}
impl Add<f64> for Vector {
    type Output = Vector;
    fn add(self, rhs: f64) -> Vector { Vector(self.0 + DVec3::new(rhs, rhs, 0.0)) }
}
impl Sub<f64> for Vector {
    type Output = Vector;
    fn sub(self, rhs: f64) -> Vector { Vector(self.0 - DVec3::new(rhs, rhs, 0.0)) }
}
impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector { Vector(-self.0) }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0.x, self.0.y)
    }
}

/// A homogeneous 4×4 affine transform.
///
/// Composition follows function composition: in `a * b`, `b` is applied to a
/// raw point first and `a` second, so `b` describes a local frame placed
/// inside `a`'s.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(transparent)]
pub struct AffineTransform(DMat4);

impl Default for AffineTransform {
    fn default() -> Self {
        AffineTransform::IDENTITY
    }
}

impl AffineTransform {
    pub const IDENTITY: AffineTransform = AffineTransform(DMat4::IDENTITY);

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn translate(dx: f64, dy: f64, dz: f64) -> Self {
        AffineTransform(DMat4::from_translation(DVec3::new(dx, dy, dz)))
    }

    /// Translation by a vector.
    pub fn translation_of(v: Vector) -> Self {
        AffineTransform(DMat4::from_translation(v.as_dvec3()))
    }

    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        AffineTransform(DMat4::from_scale(DVec3::new(sx, sy, sz)))
    }

    pub fn rotate_x(theta: f64) -> Self {
        AffineTransform(DMat4::from_rotation_x(theta))
    }

    pub fn rotate_y(theta: f64) -> Self {
        AffineTransform(DMat4::from_rotation_y(theta))
    }

    pub fn rotate_z(theta: f64) -> Self {
        AffineTransform(DMat4::from_rotation_z(theta))
    }

    /// 2-D shear: `x' = x + ax·y`, `y' = y + ay·x`.
    pub fn skew(ax: f64, ay: f64) -> Self {
        AffineTransform(DMat4::from_cols(
            DVec4::new(1.0, ay, 0.0, 0.0),
            DVec4::new(ax, 1.0, 0.0, 0.0),
            DVec4::Z,
            DVec4::W,
        ))
    }

    /// `self` composed with `inner`; `inner` is applied first.
    pub fn compose(self, inner: AffineTransform) -> AffineTransform {
        AffineTransform(self.0 * inner.0)
    }

    /// Apply to a point; translation is included.
    pub fn apply(self, point: Vector) -> Vector {
        Vector(self.0.transform_point3(point.as_dvec3()))
    }

    /// Apply to a direction; translation is ignored.
    pub fn apply_direction(self, direction: Vector) -> Vector {
        Vector(self.0.transform_vector3(direction.as_dvec3()))
    }

    /// Same rotation/scale, translation zeroed.
    pub fn linear(self) -> AffineTransform {
        AffineTransform(DMat4::from_cols(self.0.x_axis, self.0.y_axis, self.0.z_axis, DVec4::W))
    }

    /// Translation only, rotation/scale dropped.
    pub fn affine(self) -> AffineTransform {
        AffineTransform(DMat4::from_translation(self.0.w_axis.truncate()))
    }

    /// The translation component as a plain vector.
    pub fn translation(self) -> Vector {
        Vector(self.0.w_axis.truncate())
    }

    /// Same transform, applied about `pivot` instead of the origin.
    pub fn around(self, pivot: Vector) -> AffineTransform {
        AffineTransform::translation_of(pivot) * self * AffineTransform::translation_of(-pivot)
    }

    /// True when the linear part is the identity.
    pub fn is_translation(self) -> bool {
        self.linear() == AffineTransform::IDENTITY
    }
}

impl Mul for AffineTransform {
    type Output = AffineTransform;
    fn mul(self, rhs: AffineTransform) -> AffineTransform {
        self.compose(rhs)
    }
}

impl Mul<Vector> for AffineTransform {
    type Output = Vector;
    fn mul(self, rhs: Vector) -> Vector {
        self.apply(rhs)
    }
}

/// Axis-aligned bounding box as (origin, extent).
///
/// The extent is never negative: boxes are only built from min/max of
/// points, never by subtracting corners in an unchecked order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    origin: Vector,
    extent: Vector,
}

impl BoundingBox {
    /// Box spanning two opposite corners given in any order.
    pub fn from_corners(a: Vector, b: Vector) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        BoundingBox { origin: min, extent: max - min }
    }

    /// Box from an origin and a size; negative sizes are folded back so the
    /// extent stays non-negative.
    pub fn new(origin: Vector, extent: Vector) -> Self {
        Self::from_corners(origin, origin + extent)
    }

    /// Smallest box containing every point, or `None` for no points.
    pub fn from_points<I: IntoIterator<Item = Vector>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(BoundingBox { origin: min, extent: max - min })
    }

    pub fn origin(&self) -> Vector {
        self.origin
    }

    pub fn extent(&self) -> Vector {
        self.extent
    }

    /// The corner opposite the origin.
    pub fn max(&self) -> Vector {
        self.origin + self.extent
    }

    pub fn width(&self) -> f64 {
        self.extent.x()
    }

    pub fn height(&self) -> f64 {
        self.extent.y()
    }

    pub fn center(&self) -> Vector {
        self.origin + self.extent / 2.0
    }

    /// The 4 corners, clockwise from the origin.
    pub fn corners(&self) -> [Vector; 4] {
        let (w, h) = (self.extent.x(), self.extent.y());
        [
            self.origin,
            self.origin + Vector::new(w, 0.0),
            self.origin + Vector::new(w, h),
            self.origin + Vector::new(0.0, h),
        ]
    }

    /// Smallest box covering both.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let min = self.origin.min(other.origin);
        let max = self.max().max(other.max());
        BoundingBox { origin: min, extent: max - min }
    }

    /// Grown by `pad` on every side.
    pub fn padded(&self, pad: f64) -> BoundingBox {
        BoundingBox::from_corners(self.origin - pad, self.max() + pad)
    }

    /// Box around the 4 corners after pushing them through `transform`.
    pub fn transformed(&self, transform: AffineTransform) -> BoundingBox {
        let [a, b, c, d] = self.corners().map(|p| transform.apply(p));
        let min = a.min(b).min(c).min(d);
        let max = a.max(b).max(c).max(d);
        BoundingBox { origin: min, extent: max - min }
    }

    pub fn is_finite(&self) -> bool {
        self.origin.is_finite() && self.extent.is_finite()
    }
}

/// RGBA color with 0–255 channels and an alpha in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255.0, 255.0, 255.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Color { r, g, b, a }
    }

    /// Linear interpolation; `factor = 0` is `self`, `1` is `other`.
    pub fn lerp(self, other: Color, factor: f64) -> Color {
        let mix = |a: f64, b: f64| (1.0 - factor) * a + factor * b;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}
