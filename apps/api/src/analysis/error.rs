use thiserror::Error;

use crate::llm_client::LlmError;

/// Fatal pipeline failures. Each one halts the current request and nothing else.
///
/// Field-level gaps in an otherwise valid reply are not errors; the parser
/// resolves them to defaults.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The upload or a form field is unusable. The generation service is never called.
    #[error("Invalid input for '{field}': {message}")]
    InvalidInput { field: &'static str, message: String },

    /// The generation service failed, after bounded retries where they apply.
    #[error("Analysis service error: {0}")]
    Service(#[from] LlmError),

    /// The reply is not a JSON object or its sections do not match the record.
    /// `raw` keeps the reply text for manual inspection.
    #[error("Malformed analysis response: {reason}")]
    MalformedResponse { reason: String, raw: String },
}

impl AnalysisError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        AnalysisError::InvalidInput {
            field,
            message: message.into(),
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>, raw: &str) -> Self {
        AnalysisError::MalformedResponse {
            reason: reason.into(),
            raw: raw.to_string(),
        }
    }
}
