// Student record analysis pipeline.
// raw upload → validation → prompt → one generation call → parse → aggregate → present.
// All generation calls go through llm_client::AnalysisBackend.

pub mod aggregator;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod pipeline;
pub mod presenter;
pub mod prompt_builder;
pub mod prompts;
pub mod validation;

pub use error::AnalysisError;
