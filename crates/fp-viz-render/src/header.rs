use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::VizConfig;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

/// Whether the theme puts anything above the plot area.
pub fn has_header(config: &VizConfig) -> bool {
    !config.experiment.name.is_empty() || !header_info(config).is_empty()
}

/// Draw the experiment label (e.g. **CMS** *Preliminary*) at the top left and
/// the energy/luminosity line at the top right of `area`.
pub fn draw_experiment_header(canvas: &mut Canvas, area: &PlotArea, config: &VizConfig) {
    let header_size = config.font.label_size * 1.3;
    let x = area.left;
    let y = area.top - 6.0;

    if !config.experiment.name.is_empty() {
        let bold_style = TextStyle {
            size: header_size,
            weight: FontWeight::Bold,
            ..Default::default()
        };
        canvas.text(x, y, &config.experiment.name, &bold_style);

        if !config.experiment.status.is_empty() {
            let name_w = canvas.measure_text(&config.experiment.name, &bold_style).width;
            let italic_style = TextStyle {
                size: header_size * 0.85,
                style: FontStyle::Italic,
                ..Default::default()
            };
            canvas.text(x + name_w + 5.0, y, &config.experiment.status, &italic_style);
        }
    }

    let info = header_info(config);
    if !info.is_empty() {
        let info_style = TextStyle {
            size: config.font.tick_size,
            color: Color::rgb(60, 60, 60),
            anchor: TextAnchor::End,
            ..Default::default()
        };
        canvas.text(area.right(), y, &info, &info_style);
    }
}

fn header_info(config: &VizConfig) -> String {
    let exp = &config.experiment;
    let lumi = (exp.lumi > 0.0).then(|| format!("{} {}", exp.lumi, exp.lumi_unit));
    let energy = (exp.sqrt_s_tev > 0.0).then(|| format!("{} TeV", exp.sqrt_s_tev));
    match (lumi, energy) {
        (Some(l), Some(e)) => format!("{l} ({e})"),
        (Some(l), None) => l,
        (None, Some(e)) => format!("\u{221A}s = {e}"),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::BuiltinTheme;

    #[test]
    fn info_line_combines_lumi_and_energy() {
        let mut config = BuiltinTheme::Cms.base_config();
        assert_eq!(header_info(&config), "\u{221A}s = 13 TeV");
        config.experiment.lumi = 138.0;
        assert_eq!(header_info(&config), "138 fb\u{207B}\u{00B9} (13 TeV)");
    }

    #[test]
    fn default_theme_has_no_header_until_lumi_is_known() {
        let mut config = VizConfig::default();
        assert!(!has_header(&config));
        config.experiment.lumi = 41.5;
        assert!(has_header(&config));
    }
}
