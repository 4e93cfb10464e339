use crate::config::ConfigError;
use bon::Builder;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CAPTION: &str = "Wind speeds are in m/s";

/// Largest canvas edge, in pixels, the renderer will allocate.
pub(crate) const MAX_CANVAS_EDGE: u32 = 16_384;

/// Visual settings for a rendered windrose.
///
/// Sizes follow print conventions: the square figure is
/// `figure_size_inches` wide, rasterized at `dpi`, and fonts are given in
/// points (1/72 inch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(default)]
pub struct RenderOptions {
    #[builder(default = 8.0)]
    pub figure_size_inches: f64,

    #[builder(default = 300)]
    pub dpi: u32,

    /// Fraction of a sector's width covered by its bar.
    #[builder(default = 0.8)]
    pub opening: f64,

    /// RGB outline color of the bars.
    #[builder(default = [255, 255, 255])]
    pub edge_color: [u8; 3],

    /// Note centered below the plot.
    #[builder(into, default = DEFAULT_CAPTION.to_string())]
    pub caption: String,

    #[builder(default = 10.0)]
    pub caption_font_pt: f64,

    #[builder(default = 14.0)]
    pub title_font_pt: f64,

    /// Crop the image to its drawn content plus `pad_inches`.
    #[builder(default = true)]
    pub tight_bbox: bool,

    #[builder(default = 0.1)]
    pub pad_inches: f64,

    /// Express bars as percentages of the bucket instead of raw counts.
    #[builder(default = true)]
    pub normalize: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RenderOptions {
    /// Edge length of the square canvas in pixels.
    pub fn canvas_size(&self) -> u32 {
        (self.figure_size_inches * self.dpi as f64).round() as u32
    }

    pub fn points_to_pixels(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }

    pub fn pad_pixels(&self) -> u32 {
        (self.pad_inches * self.dpi as f64).round() as u32
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::InvalidRenderOption(msg));
        if !(self.figure_size_inches.is_finite() && self.figure_size_inches > 0.0) {
            return invalid(format!(
                "figure_size_inches must be positive, got {}",
                self.figure_size_inches
            ));
        }
        if self.dpi == 0 {
            return invalid("dpi must be positive".to_string());
        }
        if !(self.opening > 0.0 && self.opening <= 1.0) {
            return invalid(format!("opening must be in (0, 1], got {}", self.opening));
        }
        if !(self.pad_inches.is_finite() && self.pad_inches >= 0.0) {
            return invalid(format!("pad_inches must be >= 0, got {}", self.pad_inches));
        }
        if !(self.caption_font_pt > 0.0 && self.title_font_pt > 0.0) {
            return invalid("font sizes must be positive".to_string());
        }
        let size = self.canvas_size();
        if size == 0 || size > MAX_CANVAS_EDGE {
            return invalid(format!(
                "canvas of {} pixels is outside 1..={}",
                size, MAX_CANVAS_EDGE
            ));
        }
        Ok(())
    }
}
