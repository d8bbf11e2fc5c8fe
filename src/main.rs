use clap::Parser;
use std::path::PathBuf;

use tcx2svg::RenderConfig;

#[derive(Parser)]
#[command(name = "tcx2svg", about = "GPS activity traces to clean SVG line drawings")]
struct Cli {
    /// Input TCX file
    #[arg(short, long)]
    input: PathBuf,

    /// Output SVG path
    #[arg(short, long)]
    output: PathBuf,

    /// Canvas width in pixels
    #[arg(long, default_value = "800")]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value = "600")]
    height: u32,

    /// Border inset on every side, in pixels
    #[arg(long, default_value = "10")]
    margin: u32,

    /// Skip Douglas-Peucker point reduction
    #[arg(long)]
    no_simplify: bool,

    /// Simplification tolerance (coordinate units; degrees for GPS)
    #[arg(long, default_value = "0.0001")]
    tolerance: f64,

    /// Radial pre-filter before simplification (slower, higher fidelity)
    #[arg(long)]
    high_quality: bool,

    /// Skip spline smoothing
    #[arg(long)]
    no_smooth: bool,

    /// Smoothing strength (0.0-1.0); 0 stays on the original points
    #[arg(long, default_value = "0.5")]
    smoothing: f64,

    /// Resampled point count after smoothing (defaults to input count)
    #[arg(long)]
    points: Option<usize>,

    /// Stroke color (any SVG color)
    #[arg(long, default_value = "blue")]
    color: String,

    /// Stroke width in pixels
    #[arg(long, default_value = "2")]
    stroke_width: f64,

    /// Background fill; "none" leaves the canvas transparent
    #[arg(long, default_value = "white")]
    background: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let config = RenderConfig {
        simplify: !cli.no_simplify,
        simplify_tolerance: cli.tolerance,
        high_quality: cli.high_quality,
        smooth: !cli.no_smooth,
        smoothing_factor: cli.smoothing,
        target_points: cli.points,
        width: cli.width,
        height: cli.height,
        margin: cli.margin,
        stroke_color: cli.color,
        stroke_width: cli.stroke_width,
        background: match cli.background.as_str() {
            "none" => None,
            fill => Some(fill.to_string()),
        },
    };

    // Header
    eprintln!();
    eprintln!("  tcx2svg \u{00b7} {}", cli.input.display());
    eprintln!();

    // Pipeline (lib prints step-by-step progress to stderr)
    tcx2svg::render_tcx_file(&cli.input, &cli.output, &config)?;

    // Footer
    eprintln!();
    eprintln!("  \u{2713} {}", cli.output.display());
    eprintln!();

    Ok(())
}
