//! Presentation types shared by the shapes

use crate::types::Color;

use super::defaults;

/// Fill and stroke of a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// `None` renders as `fill="none"`.
    pub fill: Option<Color>,
    pub stroke: String,
    pub stroke_width: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: defaults::STROKE.to_string(),
            stroke_width: defaults::STROKE_WIDTH,
        }
    }
}

impl Style {
    /// Default style with a solid fill.
    pub fn filled(fill: Color) -> Self {
        Self {
            fill: Some(fill),
            ..Self::default()
        }
    }

    pub fn with_fill(mut self, fill: Option<Color>) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_stroke(mut self, stroke: impl Into<String>, width: f64) -> Self {
        self.stroke = stroke.into();
        self.stroke_width = width;
        self
    }
}
