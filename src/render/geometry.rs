//! Geometry functions: ray/edge intersection and rounded polylines

use std::f64::consts::PI;
use std::fmt;

use crate::errors::GeometryError;
use crate::types::Vector;

use super::svg::fmt_num;

/// Turn angles below this are treated as a straight pass-through.
const COLLINEAR_EPSILON: f64 = 1e-6;

/// Unit direction of a ray at `theta` (counter-clockwise, y down).
pub fn ray_direction(theta: f64) -> Vector {
    Vector::new(theta.cos(), -theta.sin())
}

/// Intersect a ray with the infinite line through an edge.
///
/// The edge is `edge_start + t·edge_vec`; the ray starts at `ray_origin` and
/// points along [`ray_direction`]`(ray_angle)`. Returns the edge parameter `t`,
/// or `None` when the two are parallel or the crossing lies behind the ray.
/// `t` is not clamped, so callers check `0 ≤ t ≤ 1` to stay on the segment.
pub fn ray_edge_intersect(
    edge_start: Vector,
    edge_vec: Vector,
    ray_origin: Vector,
    ray_angle: f64,
) -> Option<f64> {
    let d = ray_direction(ray_angle);
    let e = edge_vec;

    let det = d.x() * e.y() - e.x() * d.y();
    if det == 0.0 {
        return None;
    }

    let w = ray_origin - edge_start;
    let u = (e.x() * w.y() - e.y() * w.x()) / det;
    if u < 0.0 {
        return None;
    }

    Some((d.x() * w.y() - d.y() * w.x()) / det)
}

/// Distance from a corner vertex to where the rounding starts and ends.
///
/// `a` and `b` point from the vertex to its two neighbours. The turn angle is
/// half the supplement of the angle between them, so a right angle gives a
/// tangent length equal to the radius and a straight pass-through gives
/// exactly zero. The length never exceeds the shorter neighbour, which keeps
/// a hairpin (the path doubling back on itself) finite.
pub fn tangent_length(a: Vector, b: Vector, radius: f64) -> f64 {
    let (la, lb) = (a.length(), b.length());
    if la == 0.0 || lb == 0.0 {
        return 0.0;
    }

    let cos = (a.dot(b) / (la * lb)).clamp(-1.0, 1.0);
    let turn = (PI - cos.acos()) / 2.0;
    if turn.abs() < COLLINEAR_EPSILON {
        return 0.0;
    }

    (radius * turn.tan()).min(la.min(lb))
}

/// Where the rounding of the corner at `vertex` starts and ends.
pub fn round_corner(prev: Vector, vertex: Vector, next: Vector, radius: f64) -> (Vector, Vector) {
    let a = prev - vertex;
    let b = next - vertex;
    let len = tangent_length(a, b, radius);
    (vertex + a.unit() * len, vertex + b.unit() * len)
}

/// One command of an SVG path `d` attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Vector),
    LineTo(Vector),
    /// Quadratic Bézier
    QuadTo { control: Vector, end: Vector },
}

impl PathCommand {
    /// The point the pen ends up at.
    pub fn end(&self) -> Vector {
        match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p,
            PathCommand::QuadTo { end, .. } => end,
        }
    }
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pt = |p: &Vector| format!("{} {}", fmt_num(p.x()), fmt_num(p.y()));
        match self {
            PathCommand::MoveTo(p) => write!(f, "M {}", pt(p)),
            PathCommand::LineTo(p) => write!(f, "L {}", pt(p)),
            PathCommand::QuadTo { control, end } => write!(f, "Q {} {}", pt(control), pt(end)),
        }
    }
}

/// Build the commands of a polyline with rounded interior corners.
///
/// Every interior vertex becomes a straight run up to the rounding start and
/// a quadratic curve with the vertex as control point. A zero radius emits
/// straight segments only. With `head = Some(h)` the final segment is
/// shortened by `h` to leave room for an arrowhead, which fails when that
/// segment is not longer than `h`.
pub fn rounded_polyline(points: &[Vector], radius: f64, head: Option<f64>) -> Result<Vec<PathCommand>, GeometryError> {
    let [.., before_last, last] = points else {
        return Err(GeometryError::TooFewPoints { count: points.len() });
    };
    if !radius.is_finite() || radius < 0.0 {
        return Err(GeometryError::InvalidRadius { radius });
    }

    let end = match head {
        Some(head) => {
            let delta = *last - *before_last;
            let length = delta.length();
            if length <= head {
                return Err(GeometryError::PathTooShort { length, head });
            }
            *last - delta.unit() * head
        }
        None => *last,
    };

    let mut commands = Vec::with_capacity(points.len() * 2);
    commands.push(PathCommand::MoveTo(points[0]));

    for corner in points.windows(3) {
        let [prev, vertex, next] = [corner[0], corner[1], corner[2]];
        if radius == 0.0 {
            commands.push(PathCommand::LineTo(vertex));
            continue;
        }
        let (start, finish) = round_corner(prev, vertex, next, radius);
        let reach = (start - vertex).length();
        if reach > (prev - vertex).length() / 2.0 || reach > (next - vertex).length() / 2.0 {
            crate::log::warn!(%vertex, reach, radius, "corner rounding overshoots its segments");
        }
        commands.push(PathCommand::LineTo(start));
        commands.push(PathCommand::QuadTo {
            control: vertex,
            end: finish,
        });
    }

    commands.push(PathCommand::LineTo(end));
    Ok(commands)
}
