//! Error types with diagnostic codes using miette
//!
//! Degenerate geometry (parallel rays, zero-length vectors) is not an error;
//! those cases come back as `None` or the zero vector. What remains here are
//! scene-construction defects, surfaced to the caller immediately.

use miette::Diagnostic;
use thiserror::Error;

// ============================================================================
// Geometry Errors
// ============================================================================

/// Errors raised by shape and path queries
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("unsupported anchor for {shape}: {anchor}")]
    #[diagnostic(
        code(figura::anchor::unsupported),
        help("use one of the nine alignments or a finite angle in radians")
    )]
    UnsupportedAnchor { shape: &'static str, anchor: String },

    #[error("no edge of the {shape} is hit by a ray at angle {theta}")]
    #[diagnostic(code(figura::anchor::no_edge))]
    NoEdgeIntersection { shape: &'static str, theta: f64 },

    #[error("final path segment is {length} long, arrowhead needs more than {head}")]
    #[diagnostic(
        code(figura::path::too_short),
        help("move the last two points further apart or disable the arrowhead")
    )]
    PathTooShort { length: f64, head: f64 },

    #[error("a path needs at least 2 points, got {count}")]
    #[diagnostic(code(figura::path::too_few_points))]
    TooFewPoints { count: usize },

    #[error("invalid corner radius: {radius}")]
    #[diagnostic(code(figura::path::invalid_radius), help("the radius must be finite and non-negative"))]
    InvalidRadius { radius: f64 },

    #[error("segment {index} out of range, path has {segments} segments")]
    #[diagnostic(code(figura::path::segment_out_of_range))]
    SegmentOutOfRange { index: usize, segments: usize },

    #[error("fraction {t} along a segment must be within [0, 1]")]
    #[diagnostic(code(figura::path::fraction_out_of_range))]
    FractionOutOfRange { t: f64 },

    #[error("cannot fit an empty list of shapes")]
    #[diagnostic(code(figura::fit::empty))]
    EmptyShapeList,
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that occur during rendering
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error("empty diagram")]
    #[diagnostic(code(figura::render::empty_diagram), help("push at least one shape before rendering"))]
    EmptyDiagram,

    #[error("infinite or NaN in bounds")]
    #[diagnostic(code(figura::render::invalid_bounds))]
    InvalidBounds,

    #[error("failed to write SVG output")]
    #[diagnostic(code(figura::render::write))]
    Write(#[from] std::fmt::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Geometry(#[from] GeometryError),
}
