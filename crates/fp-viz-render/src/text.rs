use ab_glyph::{Font, FontVec, ScaleFont};

use crate::font::FontHandle;
use crate::primitives::{FontWeight, TextStyle};

#[derive(Debug, Clone, Copy)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub ascent: f64,
}

/// Average advance of a sans-serif glyph, in ems.
const FALLBACK_ADVANCE: f64 = 0.55;

/// Measure text width and height in points.
///
/// Without a font face the width is estimated from the character count.
pub fn measure_text(font: Option<&FontVec>, text: &str, size_pt: f64) -> TextMetrics {
    let Some(font) = font else {
        let chars = text.chars().count() as f64;
        return TextMetrics {
            width: chars * size_pt * FALLBACK_ADVANCE,
            height: size_pt * 1.2,
            ascent: size_pt * 0.95,
        };
    };

    let scaled = font.as_scaled(ab_glyph::PxScale::from(size_pt as f32));
    let mut width: f32 = 0.0;
    let mut prev = None;
    for ch in text.chars() {
        let id = font.glyph_id(ch);
        if let Some(prev) = prev {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        prev = Some(id);
    }

    let ascent = scaled.ascent();
    let height = ascent - scaled.descent();
    TextMetrics { width: width as f64, height: height as f64, ascent: ascent as f64 }
}

/// Measure text with a [`TextStyle`], picking the matching face.
pub fn measure_styled(fonts: &FontHandle, text: &str, style: &TextStyle) -> TextMetrics {
    let mut m = measure_text(fonts.select(style.weight, style.style), text, style.size);
    if style.weight == FontWeight::Bold && fonts.bold.is_none() {
        m.width *= 1.08;
    }
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_metrics_scale_with_length_and_size() {
        let short = measure_text(None, "ab", 10.0);
        let long = measure_text(None, "abcd", 10.0);
        let big = measure_text(None, "ab", 20.0);
        assert!((long.width - 2.0 * short.width).abs() < 1e-9);
        assert!((big.width - 2.0 * short.width).abs() < 1e-9);
        assert!(short.ascent > 0.0 && short.height > short.ascent);
    }

    #[test]
    fn bold_is_never_narrower() {
        let fonts = FontHandle::empty();
        let regular = TextStyle::default();
        let bold = TextStyle { weight: FontWeight::Bold, ..TextStyle::default() };
        let r = measure_styled(&fonts, "Events", &regular);
        let b = measure_styled(&fonts, "Events", &bold);
        assert!(b.width >= r.width);
    }

    #[test]
    fn system_font_measures_something() {
        let fonts = FontHandle::system();
        let m = measure_styled(&fonts, "Hello", &TextStyle { size: 12.0, ..Default::default() });
        assert!(m.width > 10.0);
        assert!(m.height > 8.0);
    }
}
