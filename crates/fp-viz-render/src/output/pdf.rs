use crate::RenderError;
use crate::font::font_database;

/// Convert an SVG string to a single-page PDF.
pub fn svg_to_pdf(svg: &str) -> crate::Result<Vec<u8>> {
    let opt = usvg::Options { fontdb: font_database(), ..usvg::Options::default() };
    let tree = usvg::Tree::from_str(svg, &opt).map_err(|e| RenderError::Pdf(e.to_string()))?;

    svg2pdf::to_pdf(&tree, svg2pdf::ConversionOptions::default(), svg2pdf::PageOptions::default())
        .map_err(|e| RenderError::Pdf(e.to_string()))
}
