//! figura: build 2D diagrams in code and render them to SVG.
//!
//! Shapes are placed relative to each other through anchors: every shape can
//! be asked for a point on its outline by alignment (`RIGHT`, `ABOVE_LEFT`,
//! ...) or by angle, and connectors are routed between those points with
//! rounded corners and an arrowhead.
//!
//! ```
//! use figura::{Alignment, Circle, Label, PathBuilder, Scene, Shape, Square, p};
//!
//! let mut scene = Scene::new();
//! let node = scene.add(Square::new((0.0, 0.0), 100.0, 50.0));
//! let dot = scene.add(Circle::new((300.0, 25.0), 20.0));
//!
//! let arrow = PathBuilder::new(&node.anchor(Alignment::RIGHT.into())?)
//!     .to(&dot.anchor(Alignment::LEFT.into())?)
//!     .build()?;
//! scene.push(arrow);
//! scene.push(Label::new("A", &p(50.0, -10.0, Alignment::ABOVE)));
//!
//! let svg = scene.render_svg()?;
//! assert!(svg.contains("marker-end"));
//! # Ok::<(), miette::Report>(())
//! ```

pub mod anchor;
pub mod errors;
pub mod log;
pub mod render;
pub mod types;

pub use anchor::{
    Alignment, AnchorPoint, AnchorSpec, Horizontal, Vertical, discretize_angle, discretize_direction, grid_offset,
    offset, p,
};
pub use errors::{GeometryError, RenderError};
pub use render::{
    Circle, FitBox, Label, Path, PathBuilder, RenderOptions, Scene, Shape, ShapeEnum, Square, Style, Viewport,
    canvas_size, fit, render, union_bbox,
};
pub use types::{AffineTransform, BoundingBox, Color, Vector};
