use std::sync::{Arc, OnceLock};

use ab_glyph::FontVec;
use usvg::fontdb::{self, Database, Family, Query};

use crate::primitives::{FontStyle, FontWeight};

/// Preferred families, in order, for both measurement and the SVG `font-family`.
pub const FAMILIES: &[&str] = &["DejaVu Sans", "Liberation Sans", "Arial"];

/// Value of the SVG `font-family` attribute.
pub const SVG_FONT_FAMILY: &str = "DejaVu Sans, Liberation Sans, Arial, sans-serif";

static FONT_DB: OnceLock<Arc<Database>> = OnceLock::new();
static FONTS: OnceLock<Arc<FontHandle>> = OnceLock::new();

/// System font database, loaded once per process.
pub fn font_database() -> Arc<Database> {
    FONT_DB
        .get_or_init(|| {
            let mut db = Database::new();
            db.load_system_fonts();
            tracing::debug!("loaded {} system font faces", db.len());
            Arc::new(db)
        })
        .clone()
}

/// Faces used for text measurement. Any of them may be missing on a bare
/// system, in which case measurement falls back to an average glyph width.
pub struct FontHandle {
    pub regular: Option<FontVec>,
    pub bold: Option<FontVec>,
    pub italic: Option<FontVec>,
}

impl FontHandle {
    /// Shared handle resolved from the system font database.
    pub fn system() -> Arc<FontHandle> {
        FONTS
            .get_or_init(|| {
                let db = font_database();
                let handle = FontHandle {
                    regular: load_face(&db, fontdb::Weight::NORMAL, fontdb::Style::Normal),
                    bold: load_face(&db, fontdb::Weight::BOLD, fontdb::Style::Normal),
                    italic: load_face(&db, fontdb::Weight::NORMAL, fontdb::Style::Italic),
                };
                if handle.regular.is_none() {
                    tracing::warn!("no usable system font found; text metrics are approximate");
                }
                Arc::new(handle)
            })
            .clone()
    }

    /// A handle without any faces (approximate metrics only).
    pub fn empty() -> Self {
        Self { regular: None, bold: None, italic: None }
    }

    pub fn select(&self, weight: FontWeight, style: FontStyle) -> Option<&FontVec> {
        let face = match (weight, style) {
            (FontWeight::Bold, _) => self.bold.as_ref(),
            (_, FontStyle::Italic) => self.italic.as_ref(),
            _ => None,
        };
        face.or(self.regular.as_ref())
    }
}

fn load_face(db: &Database, weight: fontdb::Weight, style: fontdb::Style) -> Option<FontVec> {
    let mut families: Vec<Family<'_>> = FAMILIES.iter().map(|f| Family::Name(*f)).collect();
    families.push(Family::SansSerif);
    let query = Query { families: &families, weight, stretch: fontdb::Stretch::Normal, style };

    let id = db.query(&query).or_else(|| db.faces().next().map(|face| face.id))?;
    db.with_face_data(id, |data, index| FontVec::try_from_vec_and_index(data.to_vec(), index).ok())
        .flatten()
}
