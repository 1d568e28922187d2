//! The flattened, render-ready report shared by the JSON view and the PDF export.
//!
//! A `Report` is transient: built per request from an `AnalysisResult`, handed to the
//! client, and posted back verbatim when the client asks for a PDF.

use serde::{Deserialize, Serialize};

/// Heading of the trailing overall-strategy block.
pub const SUMMARY_HEADING: &str = "종합 전략 제안";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportField {
    pub label: String,
    pub value: FieldValue,
}

/// One section of the report, with its facets under fixed labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportBlock {
    pub section: String,
    pub category: String,
    pub fields: Vec<ReportField>,
}

impl ReportBlock {
    /// Plain-text rendering: a `[section - category]` heading, then one line per text
    /// field and a `- item` line per list entry.
    pub fn render(&self) -> String {
        let mut lines = vec![format!("[{} - {}]", self.section, self.category)];
        for field in &self.fields {
            match &field.value {
                FieldValue::Text(text) => lines.push(format!("{}: {}", field.label, text)),
                FieldValue::List(items) => {
                    lines.push(format!("{}:", field.label));
                    lines.extend(items.iter().map(|item| format!("- {item}")));
                }
            }
        }
        lines.join("\n")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub blocks: Vec<ReportBlock>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl Report {
    /// One text block per section in order, then the summary block if present.
    pub fn text_blocks(&self) -> Vec<String> {
        let mut blocks: Vec<String> = self.blocks.iter().map(ReportBlock::render).collect();
        if let Some(summary) = &self.summary {
            blocks.push(format!("[{SUMMARY_HEADING}]\n{summary}"));
        }
        blocks
    }
}
