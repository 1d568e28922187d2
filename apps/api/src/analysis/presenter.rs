//! Presenter: the interactive view contract handed to the UI shell.
//!
//! Read-only over the `Report`: one panel per section in order, then the
//! overall strategy once if present.

use serde::Serialize;

use crate::models::report::{FieldValue, Report};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanelItem {
    Bullets { label: String, items: Vec<String> },
    Text { label: String, text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionPanel {
    /// `section (category)`, the expander heading.
    pub title: String,
    pub section: String,
    pub category: String,
    pub items: Vec<PanelItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisView {
    pub sections: Vec<SectionPanel>,
    pub overall_strategy: Option<String>,
}

pub fn present(report: &Report) -> AnalysisView {
    let sections = report
        .blocks
        .iter()
        .map(|block| SectionPanel {
            title: format!("{} ({})", block.section, block.category),
            section: block.section.clone(),
            category: block.category.clone(),
            items: block
                .fields
                .iter()
                .map(|field| match &field.value {
                    FieldValue::List(items) => PanelItem::Bullets {
                        label: field.label.clone(),
                        items: items.clone(),
                    },
                    FieldValue::Text(text) => PanelItem::Text {
                        label: field.label.clone(),
                        text: text.clone(),
                    },
                })
                .collect(),
        })
        .collect();

    AnalysisView {
        sections,
        overall_strategy: report.summary.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::{ReportBlock, ReportField};

    fn report() -> Report {
        Report {
            blocks: vec![ReportBlock {
                section: "자율활동".into(),
                category: "창의적 체험활동".into(),
                fields: vec![
                    ReportField {
                        label: "강점".into(),
                        value: FieldValue::List(vec!["리더십".into()]),
                    },
                    ReportField {
                        label: "추천 전공".into(),
                        value: FieldValue::Text("경영학, 행정학".into()),
                    },
                ],
            }],
            summary: Some("리더십 강조".into()),
        }
    }

    #[test]
    fn test_panels_mirror_report_blocks() {
        let view = present(&report());
        assert_eq!(view.sections.len(), 1);
        let panel = &view.sections[0];
        assert_eq!(panel.title, "자율활동 (창의적 체험활동)");
        assert_eq!(
            panel.items[0],
            PanelItem::Bullets {
                label: "강점".into(),
                items: vec!["리더십".into()]
            }
        );
        assert_eq!(
            panel.items[1],
            PanelItem::Text {
                label: "추천 전공".into(),
                text: "경영학, 행정학".into()
            }
        );
        assert_eq!(view.overall_strategy.as_deref(), Some("리더십 강조"));
    }

    #[test]
    fn test_presenting_does_not_change_report() {
        let original = report();
        let copy = original.clone();
        let _ = present(&original);
        assert_eq!(original, copy);
    }

    #[test]
    fn test_view_serializes_item_kind() {
        let json = serde_json::to_value(present(&report())).unwrap();
        assert_eq!(json["sections"][0]["items"][0]["kind"], "bullets");
        assert_eq!(json["sections"][0]["items"][1]["kind"], "text");
    }
}
