use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::VizConfig;
use crate::layout::axes::Axis;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

/// Draw a box frame with ticks, optional grid and labels.
///
/// `show_x_labels = false` suppresses x tick labels and the x axis label, for
/// a main panel stacked above a ratio panel.
pub fn draw_axes(
    canvas: &mut Canvas,
    area: &PlotArea,
    x_axis: &Axis,
    y_axis: &Axis,
    config: &VizConfig,
    show_x_labels: bool,
) {
    let frame_color = Color::BLACK;
    let frame_style = LineStyle::solid(frame_color, 0.8);
    let tick_line = LineStyle::solid(frame_color, 0.6);
    let minor_tick_line = LineStyle::solid(frame_color, 0.4);
    let grid_style = LineStyle {
        color: config.grid.color.with_alpha(config.grid.alpha),
        width: 0.5,
        dash: Some("3 3".into()),
    };

    // +1 draws ticks into the plot area, -1 away from it.
    let dir = if config.axes.tick_direction == "in" { 1.0 } else { -1.0 };
    let outward = if dir > 0.0 { 0.0 } else { config.axes.tick_length };
    let tl = config.axes.tick_length * dir;
    let mtl = config.axes.minor_tick_length * dir;

    canvas.line(area.left, area.top, area.right(), area.top, &frame_style);
    canvas.line(area.left, area.bottom(), area.right(), area.bottom(), &frame_style);
    canvas.line(area.left, area.top, area.left, area.bottom(), &frame_style);
    canvas.line(area.right(), area.top, area.right(), area.bottom(), &frame_style);

    // --- X axis ---
    let x_tick_label_style = TextStyle {
        size: config.font.tick_size,
        anchor: TextAnchor::Middle,
        baseline: TextBaseline::Hanging,
        ..Default::default()
    };
    for (i, &val) in x_axis.tick_positions.iter().enumerate() {
        let px = x_axis.data_to_pixel(val, area.left, area.right());
        if px < area.left - 0.5 || px > area.right() + 0.5 {
            continue;
        }
        if config.grid.show {
            canvas.line(px, area.top, px, area.bottom(), &grid_style);
        }
        canvas.line(px, area.bottom(), px, area.bottom() - tl, &tick_line);
        if config.axes.show_top_ticks {
            canvas.line(px, area.top, px, area.top + tl, &tick_line);
        }
        if show_x_labels && let Some(label) = x_axis.tick_labels.get(i) {
            canvas.text(px, area.bottom() + outward + 3.0, label, &x_tick_label_style);
        }
    }
    for &val in &x_axis.minor_ticks {
        let px = x_axis.data_to_pixel(val, area.left, area.right());
        if px < area.left - 0.5 || px > area.right() + 0.5 {
            continue;
        }
        canvas.line(px, area.bottom(), px, area.bottom() - mtl, &minor_tick_line);
        if config.axes.show_top_ticks {
            canvas.line(px, area.top, px, area.top + mtl, &minor_tick_line);
        }
    }

    // --- Y axis ---
    let y_tick_label_style = TextStyle {
        size: config.font.tick_size,
        anchor: TextAnchor::End,
        baseline: TextBaseline::Central,
        ..Default::default()
    };
    let mut max_label_w = 0.0_f64;
    for (i, &val) in y_axis.tick_positions.iter().enumerate() {
        let py = y_axis.data_to_pixel(val, area.bottom(), area.top);
        if py < area.top - 0.5 || py > area.bottom() + 0.5 {
            continue;
        }
        if config.grid.show {
            canvas.line(area.left, py, area.right(), py, &grid_style);
        }
        canvas.line(area.left, py, area.left + tl, py, &tick_line);
        if config.axes.show_right_ticks {
            canvas.line(area.right(), py, area.right() - tl, py, &tick_line);
        }
        if let Some(label) = y_axis.tick_labels.get(i) {
            max_label_w = max_label_w.max(canvas.measure_text(label, &y_tick_label_style).width);
            canvas.text(area.left - outward - 4.0, py, label, &y_tick_label_style);
        }
    }
    for &val in &y_axis.minor_ticks {
        let py = y_axis.data_to_pixel(val, area.bottom(), area.top);
        if py < area.top - 0.5 || py > area.bottom() + 0.5 {
            continue;
        }
        canvas.line(area.left, py, area.left + mtl, py, &minor_tick_line);
        if config.axes.show_right_ticks {
            canvas.line(area.right(), py, area.right() - mtl, py, &minor_tick_line);
        }
    }

    // --- Axis labels ---
    let label_style =
        TextStyle { size: config.font.label_size, anchor: TextAnchor::Middle, ..Default::default() };

    if show_x_labels && !x_axis.label.is_empty() {
        let label_y = area.bottom() + outward + config.font.tick_size + 6.0 + config.font.label_size;
        canvas.text(area.left + area.width / 2.0, label_y, &x_axis.label, &label_style);
    }
    if !y_axis.label.is_empty() {
        let label_x = area.left - outward - max_label_w - 10.0;
        let label_y = area.top + area.height / 2.0;
        canvas.text_rotated(label_x, label_y, &y_axis.label, &label_style, -90.0);
    }
}
