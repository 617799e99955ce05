use crate::canvas::Canvas;
use crate::color::Color;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

pub struct LegendEntry {
    pub label: String,
    pub color: Color,
    pub kind: LegendKind,
}

pub enum LegendKind {
    /// Stacked background.
    FilledRect,
    /// Unstacked step line.
    Line,
    /// Data marker with error bar.
    Marker,
    /// Translucent uncertainty band.
    Band,
}

/// Draw a legend in the top-right corner of the plot area.
pub fn draw_legend(canvas: &mut Canvas, area: &PlotArea, entries: &[LegendEntry], font_size: f64) {
    if entries.is_empty() {
        return;
    }

    let row_height = font_size + 4.0;
    let swatch_w = 14.0;
    let swatch_h = font_size - 2.0;
    let gap = 6.0;
    let padding = 6.0;

    let text_style =
        TextStyle { size: font_size * 0.85, baseline: TextBaseline::Central, ..Default::default() };

    let max_w = entries
        .iter()
        .map(|e| canvas.measure_text(&e.label, &text_style).width)
        .fold(0.0_f64, f64::max);

    let legend_w = padding + swatch_w + gap + max_w + padding;
    let legend_h = padding + entries.len() as f64 * row_height + padding;
    let lx = area.right() - legend_w - 5.0;
    let ly = area.top + 5.0;

    canvas.rect(lx, ly, legend_w, legend_h, &Style::filled(Color::rgba(255, 255, 255, 0.85)));

    for (i, entry) in entries.iter().enumerate() {
        let ey = ly + padding + i as f64 * row_height + row_height / 2.0;
        let sx = lx + padding;
        let swatch_top = ey - swatch_h / 2.0;

        match entry.kind {
            LegendKind::FilledRect => {
                let style = Style::filled_outlined(entry.color, entry.color.darken(0.3), 0.5);
                canvas.rect(sx, swatch_top, swatch_w, swatch_h, &style);
            }
            LegendKind::Line => {
                canvas.line(sx, ey, sx + swatch_w, ey, &LineStyle::solid(entry.color, 1.5));
            }
            LegendKind::Marker => {
                let cx = sx + swatch_w / 2.0;
                let err = LineStyle::solid(entry.color, 1.0);
                canvas.error_bar(cx, swatch_top, swatch_top + swatch_h, 0.0, &err);
                canvas.marker(cx, ey, &MarkerStyle { color: entry.color, size: 2.5, fill: true });
            }
            LegendKind::Band => {
                let style = Style { opacity: 0.35, ..Style::filled(entry.color) };
                canvas.rect(sx, swatch_top, swatch_w, swatch_h, &style);
            }
        }

        canvas.text(sx + swatch_w + gap, ey, &entry.label, &text_style);
    }
}
