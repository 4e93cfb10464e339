//! Pixel geometry of the polar plot: compass bearings map to screen points
//! with North up and angles increasing clockwise.

/// Points used to approximate a full circle.
const CIRCLE_STEPS: usize = 180;

/// Points used per degree of arc on bar edges.
const ARC_STEPS_PER_DEGREE: f64 = 0.5;

pub(crate) const COMPASS_LABELS: [&str; 8] = ["N", "N-E", "E", "S-E", "S", "S-W", "W", "N-W"];

/// Bearing along which the radial ring labels are placed.
pub(crate) const RING_LABEL_BEARING: f64 = 67.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PolarLayout {
    pub center: (f64, f64),
    /// Radius of the outermost ring in pixels.
    pub radius: f64,
    /// Data value drawn at `radius`.
    pub rmax: f64,
}

impl PolarLayout {
    pub fn new(center: (f64, f64), radius: f64, rmax: f64) -> Self {
        let rmax = if rmax.is_finite() && rmax > 0.0 { rmax } else { 1.0 };
        Self {
            center,
            radius,
            rmax,
        }
    }

    /// Screen point at `pixels` from the center along `bearing` degrees.
    pub fn point_at(&self, bearing: f64, pixels: f64) -> (i32, i32) {
        let theta = bearing.to_radians();
        (
            (self.center.0 + pixels * theta.sin()).round() as i32,
            (self.center.1 - pixels * theta.cos()).round() as i32,
        )
    }

    /// Pixel distance from the center for a data value.
    pub fn scale(&self, value: f64) -> f64 {
        value / self.rmax * self.radius
    }

    /// Closed outline of a circle at data value `value`.
    pub fn ring(&self, value: f64) -> Vec<(i32, i32)> {
        let pixels = self.scale(value);
        (0..=CIRCLE_STEPS)
            .map(|i| self.point_at(360.0 * i as f64 / CIRCLE_STEPS as f64, pixels))
            .collect()
    }

    /// Outline of an annular wedge between two data values, centered on
    /// `bearing` and `span` degrees wide. Starts and ends at the same point.
    pub fn wedge(&self, bearing: f64, span: f64, inner: f64, outer: f64) -> Vec<(i32, i32)> {
        let steps = ((span * ARC_STEPS_PER_DEGREE).ceil() as usize).max(2);
        let from = bearing - span / 2.0;
        let angle = |i: usize| from + span * i as f64 / steps as f64;

        let outer_px = self.scale(outer);
        let inner_px = self.scale(inner);
        let mut points: Vec<(i32, i32)> =
            (0..=steps).map(|i| self.point_at(angle(i), outer_px)).collect();
        if inner_px < 0.5 {
            points.push(self.point_at(0.0, 0.0));
        } else {
            points.extend((0..=steps).rev().map(|i| self.point_at(angle(i), inner_px)));
        }
        if let Some(first) = points.first().copied() {
            points.push(first);
        }
        points
    }
}

/// Five evenly spaced ring values up to `rmax`, excluding zero.
pub(crate) fn ring_values(rmax: f64) -> Vec<f64> {
    (1..=5).map(|i| rmax * i as f64 / 5.0).collect()
}
