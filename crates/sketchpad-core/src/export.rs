//! SVG export.

use crate::shapes::{Element, Ellipse, Freehand, Rectangle, Shape, Text};
use kurbo::Point;
use std::fmt::Write;

/// Suggested file name for a downloaded export.
pub const EXPORT_FILE_NAME: &str = "design.svg";

/// MIME type of the exported markup.
pub const EXPORT_MIME_TYPE: &str = "image/svg+xml";

/// Width of the exported frame. Not derived from content bounds.
pub const FRAME_WIDTH: u32 = 800;

/// Height of the exported frame. Not derived from content bounds.
pub const FRAME_HEIGHT: u32 = 600;

/// Serialize elements, in painter's order, to an SVG document.
///
/// Hidden elements and paths with fewer than two points are skipped.
pub fn to_svg<'a>(elements: impl IntoIterator<Item = &'a Element>) -> String {
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{FRAME_WIDTH}\" height=\"{FRAME_HEIGHT}\" viewBox=\"0 0 {FRAME_WIDTH} {FRAME_HEIGHT}\">\n"
    );

    for element in elements {
        if !element.visible {
            continue;
        }
        match &element.shape {
            Shape::Rectangle(rect) => write_rect(&mut svg, element.position, rect),
            Shape::Ellipse(circle) => write_circle(&mut svg, element.position, circle),
            Shape::Text(text) => write_text(&mut svg, element.position, text),
            Shape::Freehand(path) => write_path(&mut svg, path),
        }
    }

    svg.push_str("</svg>");
    svg
}

fn write_rect(out: &mut String, position: Point, rect: &Rectangle) {
    let _ = writeln!(
        out,
        "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\" />",
        num(position.x),
        num(position.y),
        num(rect.width),
        num(rect.height),
        rect.fill,
        rect.stroke,
        num(rect.stroke_width),
    );
}

fn write_circle(out: &mut String, position: Point, circle: &Ellipse) {
    let center = circle.center(position);
    let _ = writeln!(
        out,
        "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\" />",
        num(center.x),
        num(center.y),
        num(circle.radius),
        circle.fill,
        circle.stroke,
        num(circle.stroke_width),
    );
}

fn write_text(out: &mut String, position: Point, text: &Text) {
    // Baseline sits one font size below the top of the text box.
    let baseline = position.y + text.effective_font_size();
    let _ = writeln!(
        out,
        "  <text x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        num(position.x),
        num(baseline),
        num(text.font_size),
        text.fill,
        escape_text(&text.content),
    );
}

fn write_path(out: &mut String, path: &Freehand) {
    let Some((first, rest)) = path.points.split_first() else {
        return;
    };
    if rest.is_empty() {
        return;
    }

    let mut d = format!("M {} {}", num(first.x), num(first.y));
    for p in rest {
        let _ = write!(d, " L {} {}", num(p.x), num(p.y));
    }
    let _ = writeln!(
        out,
        "  <path d=\"{}\" stroke=\"{}\" stroke-width=\"{}\" fill=\"none\" stroke-linecap=\"round\" stroke-linejoin=\"round\" />",
        d,
        path.stroke,
        num(path.stroke_width),
    );
}

/// Format a number without unit suffix or trailing `.0`.
///
/// Magnitudes of `1e21` and above or below `1e-6` switch to exponent form
/// with an explicit exponent sign (`1e+21`, `1e-7`).
fn num(value: f64) -> String {
    if value == 0.0 {
        // Covers -0.0 as well.
        "0".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value.abs() >= 1e21 || value.abs() < 1e-6 {
        let exp = format!("{value:e}");
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        }
    } else {
        value.to_string()
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
