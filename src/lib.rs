//! tcx2svg: GPS activity traces → clean SVG line drawings.
//!
//! Reduces a recorded track to its essential shape, optionally
//! smooths it into a continuous curve, and projects it onto a canvas
//! as a scalable vector path.
//!
//! # Example
//!
//! ```no_run
//! use tcx2svg::{render_tcx_file, RenderConfig};
//! use std::path::Path;
//!
//! let config = RenderConfig::default();
//! render_tcx_file(Path::new("run.tcx"), Path::new("run.svg"), &config)?;
//! # Ok::<(), tcx2svg::RenderError>(())
//! ```

#![forbid(unsafe_code)]

mod geom;

pub mod config;
pub mod error;
pub mod project;
pub mod simplify;
pub mod smooth;
pub mod svg;
pub mod tcx;

pub mod fit;

// Re-export kurbo so downstream users get the same Point and BezPath
// types the pipeline produces.
pub use kurbo;

pub use config::RenderConfig;
pub use error::RenderError;

use std::path::Path;

use kurbo::Point;

/// Tracks at or below this size are too sparse for simplification to
/// be worth anything.
const SIMPLIFY_MIN_POINTS: usize = 100;

/// Full pipeline: track coordinates → SVG document string.
///
/// Simplification only runs when enabled and the track exceeds
/// [`SIMPLIFY_MIN_POINTS`]; smoothing only runs when enabled and more
/// than two points remain after simplification.
pub fn render_track(coordinates: &[Point], config: &RenderConfig) -> Result<String, RenderError> {
    config.validate()?;

    let mut processed: Vec<Point> = coordinates.to_vec();

    if config.simplify && processed.len() > SIMPLIFY_MIN_POINTS {
        let before = processed.len();
        processed = simplify::simplify(&processed, config.simplify_tolerance, config.high_quality);
        eprintln!(
            "  Simplify    {} \u{2192} {} points (tolerance {}{})",
            before,
            processed.len(),
            config.simplify_tolerance,
            if config.high_quality { ", high quality" } else { "" },
        );
    }

    if config.smooth && processed.len() > 2 {
        let before = processed.len();
        processed = smooth::smooth(&processed, config.smoothing_factor, config.target_points);
        eprintln!(
            "  Smooth      {} \u{2192} {} points (factor {})",
            before,
            processed.len(),
            config.smoothing_factor,
        );
    }

    let path = project::build_path(
        &processed,
        config.width as f64,
        config.height as f64,
        config.margin as f64,
    )?;
    eprintln!(
        "  Project     {}x{} canvas, margin {}",
        config.width, config.height, config.margin,
    );

    Ok(svg::document(&path, config))
}

/// Convenience: parse a TCX file and write the rendered SVG next to
/// wherever the caller points.
pub fn render_tcx_file(
    input: &Path,
    output: &Path,
    config: &RenderConfig,
) -> Result<(), RenderError> {
    let coordinates = tcx::parse_file(input)?;
    eprintln!("  Parse       {} trackpoints", coordinates.len());
    let document = render_track(&coordinates, config)?;
    std::fs::write(output, document)?;
    Ok(())
}
