//! PDF export: serializes a `Report` into a paginated, in-memory document.
//!
//! Pure and local: no retries and no I/O. The caller supplies the font bytes. Glyph
//! coverage is verified against the chosen font before anything is drawn.

use printpdf::{Mm, PdfDocument};
use thiserror::Error;
use tracing::debug;

use crate::layout::font_metrics::{PageConfig, ReportFont};
use crate::layout::paginate::paginate;
use crate::models::report::Report;

pub const REPORT_FILENAME: &str = "student_analysis_report.pdf";
pub const PDF_MEDIA_TYPE: &str = "application/pdf";
const DOCUMENT_TITLE: &str = "학생부 분석 보고서";
const LAYER_NAME: &str = "Layer 1";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("font '{font}' cannot render: {}", .chars.iter().collect::<String>())]
    UnsupportedGlyphs { font: String, chars: Vec<char> },

    #[error("failed to load font '{path}': {reason}")]
    FontLoad { path: String, reason: String },

    #[error("PDF rendering failed: {0}")]
    Render(String),
}

#[derive(Debug)]
pub struct ExportedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Renders the report's text blocks, one column, fixed line height.
///
/// CPU-bound: async callers run this inside `spawn_blocking`.
pub fn export_pdf(
    report: &Report,
    font: &ReportFont,
    config: &PageConfig,
) -> Result<ExportedPdf, ExportError> {
    let blocks = report.text_blocks();
    let metrics = font.metrics()?;

    let missing = metrics.missing_glyphs(blocks.iter().map(String::as_str));
    if !missing.is_empty() {
        return Err(ExportError::UnsupportedGlyphs {
            font: font.name().to_string(),
            chars: missing,
        });
    }

    let pages = paginate(&blocks, &metrics, config);
    let page_count = pages.len();
    debug!("Laid out {} blocks on {} pages", blocks.len(), page_count);

    let (width, height) = (Mm(config.page_width_mm), Mm(config.page_height_mm));
    let (doc, first_page, first_layer) = PdfDocument::new(DOCUMENT_TITLE, width, height, LAYER_NAME);

    let font_ref = doc
        .add_external_font(font.data())
        .map_err(|e| ExportError::Render(format!("font embedding failed: {e:?}")))?;

    for (index, lines) in pages.into_iter().enumerate() {
        let (page, layer) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(width, height, LAYER_NAME)
        };
        let canvas = doc.get_page(page).get_layer(layer);

        for (row, line) in lines.into_iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let baseline =
                config.page_height_mm - config.margin_mm - config.line_height_mm * (row as f32 + 1.0);
            canvas.use_text(
                line,
                config.font_size_pt,
                Mm(config.margin_mm),
                Mm(baseline),
                &font_ref,
            );
        }
    }

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| ExportError::Render(format!("{e:?}")))?;

    Ok(ExportedPdf { bytes, page_count })
}
