use fp_viz::{Hist1dArtifact, RatioSeries, YScale};

use crate::RenderError;
use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::VizConfig;
use crate::header::draw_experiment_header;
use crate::layout::axes::Axis;
use crate::layout::legend::{self, LegendEntry, LegendKind};
use crate::layout::margins::PlotArea;
use crate::layout::multi_panel::MainRatioLayout;
use crate::plots::axes_draw::draw_axes;
use crate::primitives::*;

/// Share of the content height given to the ratio panel.
const RATIO_FRACTION: f64 = 0.28;

pub fn render(artifact: &Hist1dArtifact, config: &VizConfig) -> crate::Result<String> {
    let n_bins = artifact.n_bins();
    let show_ratio = config.hist1d.show_ratio && artifact.ratio.is_some();
    let fig_h = if show_ratio { config.figure.height * 1.25 } else { config.figure.height };
    let mut canvas = Canvas::new(config.figure.width, fig_h);

    if n_bins == 0 {
        let style = TextStyle { anchor: TextAnchor::Middle, ..Default::default() };
        canvas.text(canvas.width / 2.0, canvas.height / 2.0, "No bins to draw", &style);
        return canvas.finish_svg();
    }

    let edges = &artifact.bin_edges;
    let x_axis = match &artifact.bin_labels {
        Some(labels) => Axis::categorical(labels),
        None => Axis::exact_linear(edges[0], edges[n_bins], 6),
    }
    .with_label(artifact.dimension.as_str());
    let y_axis = y_axis_for(artifact)?.with_label(config.hist1d.y_label.as_str());
    let r_range = config.hist1d.ratio_y_range;
    let ratio_axis = Axis::exact_linear(r_range[0], r_range[1], 3)
        .with_label(config.hist1d.ratio_label.as_str());

    let y_axes: Vec<&Axis> = if show_ratio { vec![&y_axis, &ratio_axis] } else { vec![&y_axis] };
    let content = PlotArea::auto(&canvas, &y_axes, &x_axis, config);
    let (main, ratio_area) = if show_ratio {
        let layout = MainRatioLayout::split(content, 4.0, RATIO_FRACTION);
        (layout.main, Some(layout.ratio))
    } else {
        (content, None)
    };

    draw_experiment_header(&mut canvas, &main, config);
    draw_axes(&mut canvas, &main, &x_axis, &y_axis, config, !show_ratio);

    let palette = config.palette_colors();
    let bkg_colors: Vec<Color> = artifact
        .backgrounds
        .iter()
        .enumerate()
        .map(|(i, s)| config.series_color(&s.name, i, &palette))
        .collect();
    let sig_colors: Vec<Color> = artifact
        .signals
        .iter()
        .enumerate()
        .map(|(i, s)| config.series_color(&s.name, artifact.backgrounds.len() + i, &palette))
        .collect();

    let px = |x: f64| x_axis.data_to_pixel(x, main.left, main.right());
    let py = |y: f64| y_axis.data_to_pixel(y_axis.clamp(y), main.bottom(), main.top);

    canvas.push_clip(main.left, main.top, main.width, main.height);

    // Stack, bottom entry first.
    let mut cumulative = vec![0.0_f64; n_bins];
    for (series, color) in artifact.backgrounds.iter().zip(&bkg_colors) {
        let style = Style::filled_outlined(*color, color.darken(0.3), 0.5);
        for bi in 0..n_bins {
            let base = cumulative[bi];
            let top = base + series.y[bi];
            cumulative[bi] = top;
            if series.y[bi] <= 0.0 {
                continue;
            }
            let (x_lo, x_hi) = (px(edges[bi]), px(edges[bi + 1]));
            let (y_base, y_top) = (py(base), py(top));
            canvas.rect(x_lo, y_top, x_hi - x_lo, y_base - y_top, &style);
        }
    }

    let show_band = config.hist1d.show_band && !artifact.backgrounds.is_empty();
    if show_band {
        let style = Style { opacity: 0.35, ..Style::filled(config.colors.band) };
        for bi in 0..n_bins {
            let (total, err) = (artifact.total_background[bi], artifact.total_background_err[bi]);
            if err <= 0.0 {
                continue;
            }
            let (x_lo, x_hi) = (px(edges[bi]), px(edges[bi + 1]));
            let (y_lo, y_hi) = (py(total - err), py(total + err));
            canvas.rect(x_lo, y_hi, x_hi - x_lo, y_lo - y_hi, &style);
        }
    }

    for (series, color) in artifact.signals.iter().zip(&sig_colors) {
        let points: Vec<(f64, f64)> = (0..n_bins)
            .flat_map(|bi| {
                let y = py(series.y[bi]);
                [(px(edges[bi]), y), (px(edges[bi + 1]), y)]
            })
            .collect();
        canvas.polyline(&points, &LineStyle::solid(*color, 1.5));
    }

    if let Some(data) = &artifact.data {
        let marker = MarkerStyle { color: config.colors.data, size: 2.5, fill: true };
        let err_style = LineStyle::solid(config.colors.data, 1.0);
        for bi in 0..n_bins {
            let y = data.y[bi];
            if y <= 0.0 && artifact.yscale == YScale::Log {
                continue;
            }
            let x = px(0.5 * (edges[bi] + edges[bi + 1]));
            canvas.error_bar(x, py(y - data.yerr[bi]), py(y + data.yerr[bi]), 0.0, &err_style);
            canvas.marker(x, py(y), &marker);
        }
    }

    canvas.pop_clip();

    let title_style = TextStyle {
        size: config.font.size,
        weight: FontWeight::Bold,
        baseline: TextBaseline::Hanging,
        ..Default::default()
    };
    canvas.text(main.left + 6.0, main.top + 6.0, &artifact.title, &title_style);

    let mut entries = Vec::new();
    if let Some(data) = &artifact.data {
        entries.push(LegendEntry {
            label: data.name.clone(),
            color: config.colors.data,
            kind: LegendKind::Marker,
        });
    }
    // Legend lists the stack top-down, as it is seen.
    for (series, color) in artifact.backgrounds.iter().zip(&bkg_colors).rev() {
        entries.push(LegendEntry {
            label: series.name.clone(),
            color: *color,
            kind: LegendKind::FilledRect,
        });
    }
    for (series, color) in artifact.signals.iter().zip(&sig_colors) {
        entries.push(LegendEntry { label: series.name.clone(), color: *color, kind: LegendKind::Line });
    }
    if show_band {
        entries.push(LegendEntry {
            label: "Bkg. uncertainty".into(),
            color: config.colors.band,
            kind: LegendKind::Band,
        });
    }
    legend::draw_legend(&mut canvas, &main, &entries, config.font.size);

    if let (Some(area), Some(ratio)) = (ratio_area, &artifact.ratio) {
        draw_ratio_panel(&mut canvas, &area, &x_axis, &ratio_axis, edges, ratio, config);
    }

    canvas.finish_svg()
}

/// Log axes start at the smallest positive content; linear axes at zero.
fn y_axis_for(artifact: &Hist1dArtifact) -> crate::Result<Axis> {
    let mut contents: Vec<f64> = artifact.total_background.clone();
    for s in artifact.backgrounds.iter().chain(&artifact.signals).chain(&artifact.data) {
        contents.extend(&s.y);
    }
    let mut y_max = contents.iter().copied().fold(0.0_f64, f64::max);
    if let Some(data) = &artifact.data {
        for (y, e) in data.y.iter().zip(&data.yerr) {
            y_max = y_max.max(y + e);
        }
    }
    for (y, e) in artifact.total_background.iter().zip(&artifact.total_background_err) {
        y_max = y_max.max(y + e);
    }

    if !y_max.is_finite() || contents.iter().any(|v| !v.is_finite()) {
        return Err(RenderError::Layout(format!(
            "'{}': bin contents are not finite",
            artifact.dimension
        )));
    }

    let axis = match artifact.yscale {
        YScale::Linear => Axis::auto_linear(0.0, if y_max > 0.0 { y_max * 1.3 } else { 1.0 }, 5),
        YScale::Log => {
            let min_pos = contents.iter().copied().filter(|v| *v > 0.0).fold(f64::INFINITY, f64::min);
            if !min_pos.is_finite() {
                return Ok(Axis::auto_log(0.1, 1.0));
            }
            // Leave about a third of the decades free for the legend.
            let decades = (y_max / min_pos).log10().max(1.0);
            Axis::auto_log(min_pos, y_max * 10f64.powf(decades * 0.4))
        }
    };
    Ok(axis)
}

fn draw_ratio_panel(
    canvas: &mut Canvas,
    area: &PlotArea,
    x_axis: &Axis,
    y_axis: &Axis,
    edges: &[f64],
    ratio: &RatioSeries,
    config: &VizConfig,
) {
    draw_axes(canvas, area, x_axis, y_axis, config, true);

    let px = |x: f64| x_axis.data_to_pixel(x, area.left, area.right());
    let py = |y: f64| y_axis.data_to_pixel(y_axis.clamp(y), area.bottom(), area.top);

    canvas.push_clip(area.left, area.top, area.width, area.height);

    if config.hist1d.show_band {
        let style = Style { opacity: 0.35, ..Style::filled(config.colors.band) };
        for (bi, band) in ratio.band.iter().enumerate() {
            if band.is_nan() || *band <= 0.0 {
                continue;
            }
            let (x_lo, x_hi) = (px(edges[bi]), px(edges[bi + 1]));
            let (y_lo, y_hi) = (py(1.0 - band), py(1.0 + band));
            canvas.rect(x_lo, y_hi, x_hi - x_lo, y_lo - y_hi, &style);
        }
    }

    let ref_y = py(1.0);
    canvas.line(area.left, ref_y, area.right(), ref_y, &LineStyle::dashed(config.colors.reference, 0.8));

    let marker = MarkerStyle { color: config.colors.data, size: 2.0, fill: true };
    let err_style = LineStyle::solid(config.colors.data, 0.8);
    for (bi, (&y, &err)) in ratio.y.iter().zip(&ratio.yerr).enumerate() {
        if !y.is_finite() {
            continue;
        }
        let x = px(0.5 * (edges[bi] + edges[bi + 1]));
        canvas.error_bar(x, py(y - err), py(y + err), 0.0, &err_style);
        canvas.marker(x, py(y), &marker);
    }

    canvas.pop_clip();
}
