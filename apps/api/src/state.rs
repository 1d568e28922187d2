use std::sync::Arc;

use crate::layout::{PageConfig, ReportFont};
use crate::llm_client::AnalysisBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Generation service. `LlmClient` in production, a scripted fake in tests.
    pub analysis: Arc<dyn AnalysisBackend>,
    /// Font embedded into exported PDFs, loaded from `REPORT_FONT_PATH`.
    pub report_font: Arc<ReportFont>,
    pub page_config: PageConfig,
}
