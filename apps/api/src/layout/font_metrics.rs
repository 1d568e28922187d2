//! Report fonts, glyph coverage, and advance-width measurement.
//!
//! The report font is a TrueType/OpenType file (e.g. NanumGothic) loaded at startup.
//! Coverage and widths come from the face's own `cmap`/`hmtx` tables, so "this font can
//! render the report" is checked per character instead of assumed.
//!
//! Widths are in em units (relative to font size).

use std::path::Path;
use std::sync::Arc;

use ttf_parser::Face;

use crate::layout::pdf::ExportError;

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

const MM_PER_PT: f32 = 25.4 / 72.0;

/// Layout parameters for the exported document. Single column, fixed line height.
#[derive(Debug, Clone)]
pub struct PageConfig {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub font_size_pt: f32,
    pub line_height_mm: f32,
}

impl PageConfig {
    pub fn text_width_mm(&self) -> f32 {
        self.page_width_mm - 2.0 * self.margin_mm
    }

    /// Width of one em at the configured font size.
    pub fn em_mm(&self) -> f32 {
        self.font_size_pt * MM_PER_PT
    }

    /// Line slots between the top and bottom margins. Never less than one.
    pub fn lines_per_page(&self) -> usize {
        let usable = self.page_height_mm - 2.0 * self.margin_mm;
        ((usable / self.line_height_mm).floor() as usize).max(1)
    }
}

/// A4 portrait, 15mm margins, 11pt text on a 7mm line.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        page_width_mm: 210.0,
        page_height_mm: 297.0,
        margin_mm: 15.0,
        font_size_pt: 11.0,
        line_height_mm: 7.0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font source
// ────────────────────────────────────────────────────────────────────────────

/// The embedded export font. Validated once at load; cheap to clone.
#[derive(Debug, Clone)]
pub struct ReportFont {
    name: String,
    data: Arc<Vec<u8>>,
}

impl ReportFont {
    /// Loads and validates a font file. The face must parse and map Hangul syllables.
    pub fn load(path: &Path) -> Result<Self, ExportError> {
        let data = std::fs::read(path).map_err(|e| ExportError::FontLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_bytes(name, data).map_err(|e| match e {
            ExportError::FontLoad { reason, .. } => ExportError::FontLoad {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    pub fn from_bytes(name: String, data: Vec<u8>) -> Result<Self, ExportError> {
        let metrics = FontMetrics::parse(&name, &data)?;
        if !metrics.covers('가') {
            return Err(ExportError::FontLoad {
                path: name,
                reason: "font has no Hangul glyphs".to_string(),
            });
        }
        Ok(ReportFont {
            name,
            data: Arc::new(data),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw font program, embedded as-is into exported documents.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Borrows a measurer over this font's tables.
    pub fn metrics(&self) -> Result<FontMetrics<'_>, ExportError> {
        FontMetrics::parse(&self.name, &self.data)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Metrics
// ────────────────────────────────────────────────────────────────────────────

pub struct FontMetrics<'a> {
    face: Face<'a>,
}

impl<'a> FontMetrics<'a> {
    pub fn parse(name: &str, data: &'a [u8]) -> Result<Self, ExportError> {
        let face = Face::parse(data, 0).map_err(|e| ExportError::FontLoad {
            path: name.to_string(),
            reason: e.to_string(),
        })?;
        Ok(FontMetrics { face })
    }
}

impl FontMetrics<'_> {
    /// Whether the font can draw `c`. Whitespace is handled by layout, not glyphs.
    pub fn covers(&self, c: char) -> bool {
        if c == '\n' || c == '\r' || c == '\t' {
            return true;
        }
        self.face.glyph_index(c).is_some()
    }

    /// Characters in `text` the font cannot draw, each once, in first-seen order.
    pub fn missing_glyphs<'t>(&self, texts: impl IntoIterator<Item = &'t str>) -> Vec<char> {
        let mut missing = Vec::new();
        for text in texts {
            for c in text.chars() {
                if !self.covers(c) && !missing.contains(&c) {
                    missing.push(c);
                }
            }
        }
        missing
    }

    /// Horizontal advance from `hmtx`. Unmapped characters count as one em.
    pub fn char_width_em(&self, c: char) -> f32 {
        let units = self.face.units_per_em().max(1) as f32;
        self.face
            .glyph_index(c)
            .and_then(|g| self.face.glyph_hor_advance(g))
            .map(|adv| adv as f32 / units)
            .unwrap_or(1.0)
    }

    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width_em(c)).sum()
    }

    pub fn space_width(&self) -> f32 {
        self.char_width_em(' ')
    }
}


// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::testing::{test_font, test_metrics, HANGUL_ADVANCE_EM, TEST_FONT};
    use super::*;

    const LATIN_ONLY_FONT: &[u8] = include_bytes!("../../testdata/latin-only-test-font.ttf");

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(test_metrics().measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_reads_hmtx_advances() {
        let metrics = test_metrics();
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        assert!((metrics.measure_str("Rust") - 2.056).abs() < 1e-3);
        assert!((metrics.measure_str("강점") - 2.0 * HANGUL_ADVANCE_EM).abs() < 1e-3);
    }

    #[test]
    fn test_coverage_follows_cmap() {
        let metrics = test_metrics();
        assert!(metrics.covers('A'));
        assert!(metrics.covers('가'));
        assert!(metrics.covers('\n'));
        assert!(!metrics.covers('學'));
        assert!(!metrics.covers('✔'));
    }

    #[test]
    fn test_missing_glyphs_deduplicated_in_order() {
        let missing = test_metrics().missing_glyphs(["강점 ✔ ok", "學 ✔"]);
        assert_eq!(missing, vec!['✔', '學']);
    }

    #[test]
    fn test_default_page_config_sanity() {
        let config = default_page_config();
        assert!((config.text_width_mm() - 180.0).abs() < 1e-4);
        assert_eq!(config.lines_per_page(), 38);
        assert!((config.em_mm() - 3.8806).abs() < 1e-3);
    }

    #[test]
    fn test_load_font_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TEST_FONT).unwrap();
        let font = ReportFont::load(file.path()).unwrap();
        assert_eq!(font.data(), TEST_FONT);
        let file_name = file.path().file_name().unwrap().to_string_lossy().into_owned();
        assert_eq!(font.name(), file_name);
        assert_ne!(font.name(), test_font().name());
        assert!(font.metrics().unwrap().covers('가'));
    }

    #[test]
    fn test_font_without_hangul_is_rejected() {
        let err = ReportFont::from_bytes("latin.ttf".into(), LATIN_ONLY_FONT.to_vec()).unwrap_err();
        match err {
            ExportError::FontLoad { path, reason } => {
                assert_eq!(path, "latin.ttf");
                assert!(reason.contains("Hangul"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_font_file_fails() {
        let err = ReportFont::load(Path::new("/nonexistent/NanumGothic.ttf")).unwrap_err();
        assert!(matches!(err, ExportError::FontLoad { .. }));
    }

    #[test]
    fn test_load_garbage_font_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not a font").unwrap();
        let err = ReportFont::load(file.path()).unwrap_err();
        match err {
            ExportError::FontLoad { path, .. } => {
                assert_eq!(path, file.path().display().to_string())
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
