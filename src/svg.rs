//! SVG document serialization.
//!
//! Turns the projected path plus canvas settings into a standalone
//! SVG string. Writing into a `String` is infallible, so the
//! formatting calls unwrap.

use std::fmt::Write;
use std::path::Path;

use kurbo::{BezPath, PathEl};

use crate::config::RenderConfig;
use crate::error::RenderError;

/// Serialize a projected track path into a complete SVG document.
pub fn document(path: &BezPath, config: &RenderConfig) -> String {
    let mut svg = String::new();
    writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#).unwrap();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = config.width,
        h = config.height,
    )
    .unwrap();

    if let Some(background) = &config.background {
        writeln!(
            svg,
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            background
        )
        .unwrap();
    }

    writeln!(
        svg,
        r#"  <path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linejoin="round" stroke-linecap="round"/>"#,
        path_data(path),
        config.stroke_color,
        config.stroke_width,
    )
    .unwrap();

    writeln!(svg, "</svg>").unwrap();
    svg
}

/// Serialize and persist in one step.
pub fn save(path: &BezPath, config: &RenderConfig, output: &Path) -> Result<(), RenderError> {
    std::fs::write(output, document(path, config))?;
    Ok(())
}

/// The `d` attribute: M for the first point, L for the rest, two
/// decimal places as plenty for pixel coordinates.
fn path_data(path: &BezPath) -> String {
    let mut d = String::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                if !d.is_empty() {
                    d.push(' ');
                }
                write!(d, "M {:.2} {:.2}", p.x, p.y).unwrap();
            }
            PathEl::LineTo(p) => {
                write!(d, " L {:.2} {:.2}", p.x, p.y).unwrap();
            }
            // The projector only emits straight segments.
            _ => {}
        }
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn sample_path() -> BezPath {
        let mut path = BezPath::new();
        path.move_to(Point::new(10.0, 20.0));
        path.line_to(Point::new(30.5, 40.25));
        path.line_to(Point::new(50.0, 60.0));
        path
    }

    #[test]
    fn path_data_uses_move_then_line() {
        assert_eq!(
            path_data(&sample_path()),
            "M 10.00 20.00 L 30.50 40.25 L 50.00 60.00"
        );
    }

    #[test]
    fn document_declares_canvas_and_stroke() {
        let config = RenderConfig {
            width: 256,
            height: 128,
            stroke_color: "red".to_string(),
            stroke_width: 3.0,
            background: Some("white".to_string()),
            ..RenderConfig::default()
        };
        let svg = document(&sample_path(), &config);
        assert!(svg.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(svg.contains(r#"width="256" height="128" viewBox="0 0 256 128""#));
        assert!(svg.contains(r#"<rect width="100%" height="100%" fill="white"/>"#));
        assert!(svg.contains(r#"stroke="red" stroke-width="3""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn no_background_rect_without_fill() {
        let config = RenderConfig {
            background: None,
            ..RenderConfig::default()
        };
        let svg = document(&sample_path(), &config);
        assert!(!svg.contains("<rect"));
    }
}
