//! Axum route handler for the report download.

use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::info;

use crate::errors::AppError;
use crate::layout::pdf::{export_pdf, PDF_MEDIA_TYPE, REPORT_FILENAME};
use crate::models::report::Report;
use crate::state::AppState;

/// POST /api/v1/analysis/report.pdf
///
/// Body: the `report` object returned by the analysis endpoint.
/// Renders it with the configured font and answers with the PDF as an attachment.
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Json(report): Json<Report>,
) -> Result<Response, AppError> {
    let font = state.report_font.clone();
    let config = state.page_config.clone();

    // Layout and serialization are CPU-bound.
    let exported = tokio::task::spawn_blocking(move || export_pdf(&report, &font, &config))
        .await
        .map_err(|e| anyhow::anyhow!("PDF export task failed: {e}"))??;

    info!(
        "Exported report: {} pages, {} bytes",
        exported.page_count,
        exported.bytes.len()
    );

    Ok((
        [
            (CONTENT_TYPE, PDF_MEDIA_TYPE.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILENAME}\""),
            ),
        ],
        exported.bytes,
    )
        .into_response())
}
