//! SVG generation
//!
//! [`SvgWriter`] wraps the caller's `fmt::Write` sink and knows the few
//! element shapes a diagram needs. Shapes call into it from their `render`.

use std::fmt::{self, Write as _};

use crate::anchor::{Alignment, Horizontal, Vertical};
use crate::types::{BoundingBox, Color, Vector};

use super::defaults;
use super::geometry::PathCommand;
use super::types::Style;

/// Path `d` attribute builder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    commands: Vec<PathCommand>,
    closed: bool,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        Self {
            commands,
            closed: false,
        }
    }

    pub fn m(mut self, p: Vector) -> Self {
        self.commands.push(PathCommand::MoveTo(p));
        self
    }

    pub fn l(mut self, p: Vector) -> Self {
        self.commands.push(PathCommand::LineTo(p));
        self
    }

    pub fn q(mut self, control: Vector, end: Vector) -> Self {
        self.commands.push(PathCommand::QuadTo { control, end });
        self
    }

    /// Close the subpath.
    pub fn z(mut self) -> Self {
        self.closed = true;
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        for command in &self.commands {
            write!(f, "{sep}{command}")?;
            sep = " ";
        }
        if self.closed {
            write!(f, "{sep}Z")?;
        }
        Ok(())
    }
}

/// Streaming SVG writer over a caller-supplied sink.
pub struct SvgWriter<'a> {
    out: &'a mut dyn fmt::Write,
    arrowhead_defined: bool,
}

impl<'a> SvgWriter<'a> {
    pub fn new(out: &'a mut dyn fmt::Write) -> Self {
        Self {
            out,
            arrowhead_defined: false,
        }
    }

    /// XML prolog and the opening `<svg>` tag.
    pub fn preamble(&mut self, viewport: &BoundingBox) -> fmt::Result {
        let origin = viewport.origin();
        writeln!(self.out, "<?xml version=\"1.0\" standalone=\"no\"?>")?;
        writeln!(
            self.out,
            "<svg viewBox=\"{} {} {} {}\" xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\">",
            fmt_num(origin.x()),
            fmt_num(origin.y()),
            fmt_num(viewport.width()),
            fmt_num(viewport.height()),
        )
    }

    pub fn tail(&mut self) -> fmt::Result {
        writeln!(self.out, "</svg>")
    }

    /// Emit the arrowhead marker definition unless this document already has it.
    pub fn ensure_arrowhead(&mut self) -> fmt::Result {
        if self.arrowhead_defined {
            return Ok(());
        }
        self.arrowhead_defined = true;

        let (w, h) = (defaults::MARKER_WIDTH, defaults::MARKER_HEIGHT);
        writeln!(self.out, "<defs>")?;
        writeln!(
            self.out,
            "<marker id=\"{}\" markerWidth=\"{}\" markerHeight=\"{}\" refX=\"0\" refY=\"{}\" orient=\"auto\">",
            defaults::MARKER_ID,
            fmt_num(w),
            fmt_num(h),
            fmt_num(h / 2.0),
        )?;
        writeln!(
            self.out,
            "<polygon points=\"0 0, {} {}, 0 {}\" />",
            fmt_num(w),
            fmt_num(h / 2.0),
            fmt_num(h)
        )?;
        writeln!(self.out, "</marker>")?;
        writeln!(self.out, "</defs>")
    }

    /// A `<path>` element. `marker_end` attaches the shared arrowhead, which
    /// must already be defined (see [`SvgWriter::ensure_arrowhead`]).
    pub fn path(&mut self, d: &PathData, style: &Style, marker_end: bool) -> fmt::Result {
        write!(self.out, "<path d=\"{}\" ", d)?;
        self.paint(style)?;
        if marker_end {
            write!(self.out, " marker-end=\"url(#{})\"", defaults::MARKER_ID)?;
        }
        writeln!(self.out, " />")
    }

    pub fn circle(&mut self, center: Vector, radius: f64, style: &Style) -> fmt::Result {
        write!(
            self.out,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" ",
            fmt_num(center.x()),
            fmt_num(center.y()),
            fmt_num(radius)
        )?;
        self.paint(style)?;
        writeln!(self.out, " />")
    }

    pub fn text(&mut self, position: Vector, alignment: Alignment, fill: &str, content: &str) -> fmt::Result {
        writeln!(
            self.out,
            "<text x=\"{}\" y=\"{}\" fill=\"{}\" dominant-baseline=\"{}\" text-anchor=\"{}\">{}</text>",
            fmt_num(position.x()),
            fmt_num(position.y()),
            escape_attr(fill),
            dominant_baseline(alignment.v),
            text_anchor(alignment.h),
            escape_text(content),
        )
    }

    fn paint(&mut self, style: &Style) -> fmt::Result {
        match style.fill {
            Some(fill) => write!(self.out, "fill=\"{}\" fill-opacity=\"{}\"", fill_color(fill), fmt_num(fill.a))?,
            None => write!(self.out, "fill=\"none\"")?,
        }
        write!(
            self.out,
            " stroke=\"{}\" stroke-width=\"{}\"",
            escape_attr(&style.stroke),
            fmt_num(style.stroke_width)
        )
    }
}

fn fill_color(color: Color) -> String {
    format!(
        "rgb({}, {}, {})",
        fmt_num(color.r),
        fmt_num(color.g),
        fmt_num(color.b)
    )
}

/// `text-anchor` keyword: a label aligned to the right of its point starts there.
pub fn text_anchor(h: Horizontal) -> &'static str {
    match h {
        Horizontal::Left => "end",
        Horizontal::Middle => "middle",
        Horizontal::Right => "start",
    }
}

/// `dominant-baseline` keyword: a label above its point sits on it.
pub fn dominant_baseline(v: Vertical) -> &'static str {
    match v {
        Vertical::Above => "alphabetic",
        Vertical::Middle => "middle",
        Vertical::Below => "hanging",
    }
}

/// Escape XML special characters in text content.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a caller-supplied string for use inside a double-quoted attribute.
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Format a coordinate: rounded to 6 decimal places, trailing zeros trimmed,
/// negative zero printed as `0`.
pub(crate) fn fmt_num(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let mut s = String::new();
    let _ = write!(s, "{:.6}", rounded);
    let s = s.trim_end_matches('0');
    let s = s.trim_end_matches('.');
    s.to_string()
}
