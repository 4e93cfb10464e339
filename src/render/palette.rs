use plotters::style::RGBColor;

// Viridis sampled at 0, 0.25, 0.5, 0.75 and 1.
const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

/// Viridis color at position `t` in `[0, 1]`, linearly interpolated.
pub(crate) fn viridis(t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let index = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let fraction = scaled - index as f64;
    let (r0, g0, b0) = VIRIDIS[index];
    let (r1, g1, b1) = VIRIDIS[index + 1];
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * fraction).round() as u8;
    RGBColor(mix(r0, r1), mix(g0, g1), mix(b0, b1))
}

/// One color per speed bin, spread evenly over the colormap.
pub(crate) fn bin_colors(count: usize) -> Vec<RGBColor> {
    match count {
        0 => Vec::new(),
        1 => vec![viridis(0.0)],
        _ => (0..count)
            .map(|i| viridis(i as f64 / (count - 1) as f64))
            .collect(),
    }
}
