use crate::error::RenderError;

/// All rendering parameters in one struct.
/// Designed to be filled from CLI flags and passed through the
/// pipeline unchanged.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    // -- Simplification stage --
    /// Whether to run Douglas-Peucker point reduction. Only applied
    /// when the track has more than 100 points; sparser tracks gain
    /// nothing from it.
    pub simplify: bool,
    /// Maximum perpendicular deviation from a straight chord, in the
    /// same units as the coordinates (degrees for GPS input).
    pub simplify_tolerance: f64,
    /// Run a radial pre-filter before the recursive pass. Slower but
    /// reduces dense near-duplicate points with less shape error.
    pub high_quality: bool,

    // -- Smoothing stage --
    /// Whether to fit a spline through the (reduced) points.
    pub smooth: bool,
    /// Smoothing strength in [0, 1]. 0 keeps the curve on the
    /// original points; higher values trade fidelity for smoothness.
    /// Rescaled internally by track complexity so the same nominal
    /// value behaves consistently across tracks of different scale.
    pub smoothing_factor: f64,
    /// Resampled point count. None keeps the input count.
    pub target_points: Option<usize>,

    // -- Canvas / output --
    /// SVG canvas width in pixels.
    pub width: u32,
    /// SVG canvas height in pixels.
    pub height: u32,
    /// Border inset subtracted from the usable drawing area on every
    /// side before normalization.
    pub margin: u32,
    /// Stroke color (any SVG color string).
    pub stroke_color: String,
    /// Stroke width in pixels.
    pub stroke_width: f64,
    /// Background fill. None leaves the canvas transparent.
    pub background: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            simplify: true,
            simplify_tolerance: 0.0001,
            high_quality: false,
            smooth: true,
            smoothing_factor: 0.5,
            target_points: None,
            width: 800,
            height: 600,
            margin: 10,
            stroke_color: "blue".to_string(),
            stroke_width: 2.0,
            background: Some("white".to_string()),
        }
    }
}

impl RenderConfig {
    /// Basic range checks. The pipeline assumes these hold.
    pub fn validate(&self) -> Result<(), RenderError> {
        if !self.simplify_tolerance.is_finite() || self.simplify_tolerance < 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "simplify tolerance must be >= 0, got {}",
                self.simplify_tolerance
            )));
        }
        if !self.smoothing_factor.is_finite() || !(0.0..=1.0).contains(&self.smoothing_factor) {
            return Err(RenderError::InvalidConfig(format!(
                "smoothing factor must be within [0, 1], got {}",
                self.smoothing_factor
            )));
        }
        if self.width <= 2 * self.margin || self.height <= 2 * self.margin {
            return Err(RenderError::InvalidConfig(format!(
                "canvas {}x{} leaves no drawing area inside margin {}",
                self.width, self.height, self.margin
            )));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "stroke width must be positive, got {}",
                self.stroke_width
            )));
        }
        Ok(())
    }
}
