use crate::render::encode::encode_png;
use crate::render::error::RenderError;
use crate::render::geometry::{ring_values, PolarLayout, COMPASS_LABELS, RING_LABEL_BEARING};
use crate::render::options::{RenderOptions, MAX_CANVAS_EDGE};
use crate::render::palette::bin_colors;
use crate::render::request::ChartRequest;
use crate::render::PolarHistogramRenderer;
use log::debug;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle};

const GRID_COLOR: RGBColor = RGBColor(200, 200, 200);

/// Renders windroses with plotters onto an in-memory bitmap.
///
/// The layout follows the classic polar bar chart: North up, sectors running
/// clockwise, speed bins stacked outwards from the center.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlottersRenderer;

impl PlottersRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl PolarHistogramRenderer for PlottersRenderer {
    fn render(
        &self,
        request: &ChartRequest,
        options: &RenderOptions,
    ) -> Result<Vec<u8>, RenderError> {
        let size = options.canvas_size();
        if size == 0 || size > MAX_CANVAS_EDGE {
            return Err(RenderError::InvalidCanvas {
                width: size,
                height: size,
            });
        }

        let mut buffer = vec![255u8; size as usize * size as usize * 3];
        draw_windrose(&mut buffer, size, request, options)?;
        debug!("Rendered '{}' on a {}x{} canvas", request.label, size, size);

        let crop_pad = options.tight_bbox.then(|| options.pad_pixels());
        encode_png(buffer, (size, size), crop_pad)
    }
}

fn drawing<E>(err: DrawingAreaErrorKind<E>) -> RenderError
where
    E: std::error::Error + Send + Sync + 'static,
{
    RenderError::Drawing(Box::new(err))
}

fn text_style(px: f64, style: FontStyle, pos: Pos) -> TextStyle<'static> {
    FontDesc::new(FontFamily::SansSerif, px, style)
        .color(&BLACK)
        .pos(pos)
}

/// Ring annotation: percentages for normalized charts, counts otherwise.
fn ring_label(value: f64, normalized: bool) -> String {
    if normalized {
        format!("{:.1}%", value)
    } else if value.fract().abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

fn draw_windrose(
    buffer: &mut [u8],
    size: u32,
    request: &ChartRequest,
    options: &RenderOptions,
) -> Result<(), RenderError> {
    let root = BitMapBackend::with_buffer(buffer, (size, size)).into_drawing_area();
    root.fill(&WHITE).map_err(drawing)?;

    let s = size as f64;
    let histogram = &request.histogram;
    let layout = PolarLayout::new((s * 0.5, s * 0.45), s * 0.34, histogram.max_sector_total());

    draw_grid(&root, &layout, options)?;
    draw_bars(&root, &layout, request, options)?;
    draw_annotations(&root, &layout, request, options, s)?;
    draw_legend(&root, request, options, s)?;

    root.present().map_err(drawing)
}

fn draw_grid(
    root: &DrawingArea<BitMapBackend, Shift>,
    layout: &PolarLayout,
    options: &RenderOptions,
) -> Result<(), RenderError> {
    let grid = ShapeStyle {
        color: GRID_COLOR.to_rgba(),
        filled: false,
        stroke_width: options.points_to_pixels(0.5).round().max(1.0) as u32,
    };

    for value in ring_values(layout.rmax) {
        root.draw(&PathElement::new(layout.ring(value), grid))
            .map_err(drawing)?;
    }
    for spoke in 0..8 {
        let bearing = spoke as f64 * 45.0;
        let path = vec![
            layout.point_at(bearing, 0.0),
            layout.point_at(bearing, layout.radius),
        ];
        root.draw(&PathElement::new(path, grid)).map_err(drawing)?;
    }
    Ok(())
}

fn draw_bars(
    root: &DrawingArea<BitMapBackend, Shift>,
    layout: &PolarLayout,
    request: &ChartRequest,
    options: &RenderOptions,
) -> Result<(), RenderError> {
    let histogram = &request.histogram;
    let colors = bin_colors(histogram.bins().len());
    let [r, g, b] = options.edge_color;
    let edge = ShapeStyle {
        color: RGBColor(r, g, b).to_rgba(),
        filled: false,
        stroke_width: options.points_to_pixels(0.5).round().max(1.0) as u32,
    };
    let span = histogram.sector_width() * options.opening;

    for sector in 0..histogram.sectors() {
        let bearing = histogram.sector_center(sector);
        for (bin, (bottom, top)) in histogram.stacked(sector).into_iter().enumerate() {
            if top <= bottom {
                continue;
            }
            let outline = layout.wedge(bearing, span, bottom, top);
            root.draw(&Polygon::new(outline.clone(), colors[bin].filled()))
                .map_err(drawing)?;
            root.draw(&PathElement::new(outline, edge))
                .map_err(drawing)?;
        }
    }
    Ok(())
}

fn draw_annotations(
    root: &DrawingArea<BitMapBackend, Shift>,
    layout: &PolarLayout,
    request: &ChartRequest,
    options: &RenderOptions,
    s: f64,
) -> Result<(), RenderError> {
    let centered = Pos::new(HPos::Center, VPos::Center);
    let label_px = options.points_to_pixels(options.caption_font_pt);

    let compass = text_style(label_px, FontStyle::Normal, centered);
    for (i, label) in COMPASS_LABELS.iter().enumerate() {
        let at = layout.point_at(i as f64 * 45.0, layout.radius + s * 0.035);
        root.draw(&Text::new(*label, at, compass.clone()))
            .map_err(drawing)?;
    }

    let rings = text_style(label_px * 0.9, FontStyle::Normal, centered);
    let normalized = request.histogram.is_normalized();
    for value in ring_values(layout.rmax) {
        let at = layout.point_at(RING_LABEL_BEARING, layout.scale(value));
        root.draw(&Text::new(ring_label(value, normalized), at, rings.clone()))
            .map_err(drawing)?;
    }

    let title = text_style(
        options.points_to_pixels(options.title_font_pt),
        FontStyle::Bold,
        Pos::new(HPos::Center, VPos::Top),
    );
    root.draw(&Text::new(
        request.title.as_str(),
        (layout.center.0.round() as i32, (s * 0.02).round() as i32),
        title,
    ))
    .map_err(drawing)?;

    if !options.caption.is_empty() {
        let caption = text_style(label_px, FontStyle::Normal, Pos::new(HPos::Center, VPos::Top));
        let y = layout.center.1 + layout.radius + s * 0.05;
        root.draw(&Text::new(
            options.caption.as_str(),
            (layout.center.0.round() as i32, y.round() as i32),
            caption,
        ))
        .map_err(drawing)?;
    }
    Ok(())
}

/// Speed-bin legend anchored at the lower-left corner, outside the plot.
fn draw_legend(
    root: &DrawingArea<BitMapBackend, Shift>,
    request: &ChartRequest,
    options: &RenderOptions,
    s: f64,
) -> Result<(), RenderError> {
    let bins = request.histogram.bins();
    let colors = bin_colors(bins.len());
    let font_px = options.points_to_pixels(options.caption_font_pt);
    let row = (font_px * 1.3).round() as i32;
    let swatch = (font_px * 0.9).round() as i32;
    let left = (s * 0.02).round() as i32;
    let bottom = (s * 0.97).round() as i32;
    let top = bottom - row * bins.len() as i32;

    let style = text_style(font_px, FontStyle::Normal, Pos::new(HPos::Left, VPos::Center));
    for (i, label) in bins.labels().into_iter().enumerate() {
        let y = top + row * i as i32;
        root.draw(&Rectangle::new(
            [(left, y), (left + swatch, y + swatch)],
            colors[i].filled(),
        ))
        .map_err(drawing)?;
        root.draw(&Text::new(
            label,
            (left + swatch + swatch / 2, y + swatch / 2),
            style.clone(),
        ))
        .map_err(drawing)?;
    }
    Ok(())
}
