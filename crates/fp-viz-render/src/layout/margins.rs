use crate::canvas::Canvas;
use crate::config::VizConfig;
use crate::header::has_header;
use crate::layout::axes::Axis;
use crate::primitives::TextStyle;

/// Rectangular plot area within the canvas.
#[derive(Debug, Clone, Copy)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Area left for the axes once tick labels, axis labels and the header
    /// have their room. All `y_axes` share the left margin.
    pub fn auto(canvas: &Canvas, y_axes: &[&Axis], x_axis: &Axis, config: &VizConfig) -> Self {
        let tick_style = TextStyle { size: config.font.tick_size, ..Default::default() };
        let label_size = config.font.label_size;
        let outward_ticks = if config.axes.tick_direction == "in" { 0.0 } else { config.axes.tick_length };

        let max_tick_w = y_axes
            .iter()
            .flat_map(|y| y.tick_labels.iter())
            .map(|l| canvas.measure_text(l, &tick_style).width)
            .fold(0.0_f64, f64::max);
        let mut left = 12.0 + outward_ticks + max_tick_w + 6.0;
        if y_axes.iter().any(|y| !y.label.is_empty()) {
            left += label_size + 6.0;
        }

        let mut bottom = 12.0 + outward_ticks + tick_style.size + 6.0;
        if !x_axis.label.is_empty() {
            bottom += label_size + 6.0;
        }

        let top = if has_header(config) { label_size * 1.3 + 16.0 } else { 12.0 };
        let right = 15.0;

        let width = canvas.width - left - right;
        let height = canvas.height - top - bottom;
        Self { left, top, width: width.max(50.0), height: height.max(50.0) }
    }

    pub fn manual(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }
}
