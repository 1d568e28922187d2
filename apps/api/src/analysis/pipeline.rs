//! Analysis pipeline: orchestrates one request end to end.
//!
//! Flow: build_prompt → backend.complete (the only network effect) →
//!       parse_response → aggregate.
//!
//! The request arrives already validated. The intermediate `AnalysisResult` is
//! dropped once the `Report` exists.

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::analysis::aggregator::aggregate;
use crate::analysis::parser::parse_response;
use crate::analysis::prompt_builder::build_prompt;
use crate::analysis::AnalysisError;
use crate::llm_client::AnalysisBackend;
use crate::models::analysis::PriorityLevel;
use crate::models::record::AnalysisRequest;
use crate::models::report::Report;

pub async fn run_analysis(
    backend: &dyn AnalysisBackend,
    request: &AnalysisRequest,
    cancel: &CancellationToken,
) -> Result<Report, AnalysisError> {
    let prompt = build_prompt(request);
    info!(
        "Analyzing {} sections for '{}' ({}), prompt {} chars",
        request.record().len(),
        request.desired_major(),
        request.university_level().label(),
        prompt.chars().count()
    );

    let raw = backend.complete(&prompt, cancel).await?;

    let result = parse_response(&raw, request.record())?;
    let urgent = result
        .iter()
        .filter(|(_, s)| s.priority.level == Some(PriorityLevel::High))
        .count();
    let report = aggregate(&result);
    info!(
        "Analysis parsed: {} sections ({} high priority), overall strategy {}",
        result.len(),
        urgent,
        if report.summary.is_some() { "present" } else { "absent" }
    );

    Ok(report)
}
