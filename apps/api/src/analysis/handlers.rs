//! Axum route handlers for the Analysis API.

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::analysis::pipeline::run_analysis;
use crate::analysis::presenter::{present, SectionPanel};
use crate::analysis::validation::{
    validate_submission, FIELD_DESIRED_MAJOR, FIELD_FILE, FIELD_UNIVERSITY_LEVEL,
};
use crate::analysis::AnalysisError;
use crate::errors::AppError;
use crate::models::record::UniversityLevel;
use crate::models::report::Report;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct SubmissionForm {
    file: Option<Bytes>,
    desired_major: Option<String>,
    university_level: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub desired_major: String,
    pub university_level: UniversityLevel,
    pub sections: Vec<SectionPanel>,
    pub overall_strategy: Option<String>,
    /// Post this back to the export endpoint to download the PDF.
    pub report: Report,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analysis
///
/// Multipart form: `file` (JSON record), `desired_major`, `university_level`.
/// Validates, runs one analysis call, and returns the per-section view plus the report.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let form = read_form(multipart).await?;
    let request = validate_submission(
        form.file.as_deref(),
        form.desired_major.as_deref(),
        form.university_level.as_deref(),
    )?;

    let analysis_id = Uuid::new_v4();
    let span = info_span!("analysis", id = %analysis_id);
    span.in_scope(|| {
        info!(
            "Accepted analysis {analysis_id}: {} sections, level {}",
            request.record().len(),
            request.university_level().label()
        )
    });

    // Dropping this handler (client went away) cancels the upstream call.
    let cancel = CancellationToken::new();
    let _abort_on_drop = cancel.clone().drop_guard();

    let report = run_analysis(state.analysis.as_ref(), &request, &cancel)
        .instrument(span)
        .await?;

    let view = present(&report);

    Ok(Json(AnalyzeResponse {
        analysis_id,
        generated_at: Utc::now(),
        desired_major: request.desired_major().to_string(),
        university_level: request.university_level(),
        sections: view.sections,
        overall_strategy: view.overall_strategy,
        report,
    }))
}

async fn read_form(mut multipart: Multipart) -> Result<SubmissionForm, AnalysisError> {
    let mut form = SubmissionForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AnalysisError::invalid(FIELD_FILE, format!("unreadable form data: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            FIELD_FILE => {
                let data = field.bytes().await.map_err(|e| {
                    AnalysisError::invalid(FIELD_FILE, format!("upload interrupted: {e}"))
                })?;
                form.file = Some(data);
            }
            FIELD_DESIRED_MAJOR => {
                let text = field.text().await.map_err(|e| {
                    AnalysisError::invalid(FIELD_DESIRED_MAJOR, e.to_string())
                })?;
                form.desired_major = Some(text);
            }
            FIELD_UNIVERSITY_LEVEL => {
                let text = field.text().await.map_err(|e| {
                    AnalysisError::invalid(FIELD_UNIVERSITY_LEVEL, e.to_string())
                })?;
                form.university_level = Some(text);
            }
            _ => {}
        }
    }

    Ok(form)
}
