//! Default sizes and settings (in user units, i.e. SVG pixels)

/// Length cut from a connector's final segment to make room for the arrowhead.
pub const ARROWHEAD_LENGTH: f64 = 10.0;
/// Margin added on every side of the content when writing the viewport.
pub const CANVAS_MARGIN: f64 = 20.0;
/// Corner radius used by connectors unless overridden.
pub const CORNER_RADIUS: f64 = 5.0;
pub const STROKE: &str = "black";
pub const STROKE_WIDTH: f64 = 1.0;
pub const LABEL_FILL: &str = "black";

/// Arrowhead marker glyph
pub const MARKER_ID: &str = "arrowhead";
pub const MARKER_WIDTH: f64 = 10.0;
pub const MARKER_HEIGHT: f64 = 7.0;
