//! Report aggregation: flattens an `AnalysisResult` into the shared `Report`.
//!
//! Both sinks (JSON view and PDF) read the `Report`; neither goes back to the
//! `AnalysisResult`. Rendering is a pure function of its input.

use crate::models::analysis::{AnalysisResult, SectionAnalysis};
use crate::models::report::{FieldValue, Report, ReportBlock, ReportField};

pub const LABEL_STRENGTHS: &str = "강점";
pub const LABEL_WEAKNESS: &str = "약점";
pub const LABEL_SUGGESTION: &str = "제안";
pub const LABEL_COMPETENCIES: &str = "핵심역량";
pub const LABEL_MAJORS: &str = "추천 전공";
pub const LABEL_MAJOR_FIT: &str = "적합성 평가";
pub const LABEL_PRIORITY: &str = "우선순위";
/// Category shown when the service gave none or an unrecognized one.
pub const UNCLASSIFIED: &str = "미분류";

pub fn aggregate(result: &AnalysisResult) -> Report {
    Report {
        blocks: result
            .iter()
            .map(|(section, analysis)| section_block(section, analysis))
            .collect(),
        summary: result.overall_strategy().map(str::to_string),
    }
}

fn section_block(section: &str, analysis: &SectionAnalysis) -> ReportBlock {
    let text = |label: &str, value: &str| ReportField {
        label: label.to_string(),
        value: FieldValue::Text(value.to_string()),
    };

    ReportBlock {
        section: section.to_string(),
        category: analysis
            .category
            .map(|c| c.label())
            .unwrap_or(UNCLASSIFIED)
            .to_string(),
        fields: vec![
            ReportField {
                label: LABEL_STRENGTHS.to_string(),
                value: FieldValue::List(analysis.strengths.clone()),
            },
            text(LABEL_WEAKNESS, &analysis.weakness),
            text(LABEL_SUGGESTION, &analysis.suggestion),
            text(LABEL_COMPETENCIES, &analysis.competencies),
            text(LABEL_MAJORS, &analysis.recommended_majors.join(", ")),
            text(LABEL_MAJOR_FIT, &analysis.major_fit),
            text(LABEL_PRIORITY, &analysis.priority.rationale),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::parser::parse_response;
    use crate::models::record::StudentRecord;
    use serde_json::json;

    fn parsed(reply: serde_json::Value, keys: &[&str]) -> AnalysisResult {
        let record = StudentRecord::from_sections(keys.iter().map(|k| (*k, "내용"))).unwrap();
        parse_response(&reply.to_string(), &record).unwrap()
    }

    fn reply() -> serde_json::Value {
        json!({
            "자율활동": {
                "type": "창의적 체험활동",
                "strengths": ["리더십", "기획력"],
                "weakness": "성과 서술 부족",
                "suggestion": "수치 제시",
                "core_competencies": "공동체역량",
                "majors": ["경영학", "행정학"],
                "major_fit": "보통",
                "priority": "중 - 보조 자료",
                "strategy_summary": "리더십 중심 서류 전략"
            },
            "개인세특": {
                "type": "세특",
                "strengths": ["탐구력"],
                "weakness": "심화 부족",
                "suggestion": "후속 탐구",
                "core_competencies": "문제해결력",
                "majors": ["컴퓨터공학"],
                "major_fit": "높음",
                "priority": "상 - 핵심 근거",
                "strategy_summary": "탐구 중심 전략"
            }
        })
    }

    #[test]
    fn test_blocks_follow_record_order() {
        let report = aggregate(&parsed(reply(), &["개인세특", "자율활동"]));
        let sections: Vec<_> = report.blocks.iter().map(|b| b.section.as_str()).collect();
        assert_eq!(sections, vec!["개인세특", "자율활동"]);
    }

    #[test]
    fn test_summary_is_first_non_empty_in_key_order() {
        let a = aggregate(&parsed(reply(), &["자율활동", "개인세특"]));
        assert_eq!(a.summary.as_deref(), Some("리더십 중심 서류 전략"));
        let b = aggregate(&parsed(reply(), &["개인세특", "자율활동"]));
        assert_eq!(b.summary.as_deref(), Some("탐구 중심 전략"));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let result = parsed(reply(), &["자율활동", "개인세특"]);
        assert_eq!(aggregate(&result).text_blocks(), aggregate(&result).text_blocks());
    }

    #[test]
    fn test_rendered_block_contains_every_facet() {
        let report = aggregate(&parsed(reply(), &["자율활동", "개인세특"]));
        assert_eq!(
            report.text_blocks()[0],
            "[자율활동 - 창의적 체험활동]\n\
             강점:\n- 리더십\n- 기획력\n\
             약점: 성과 서술 부족\n\
             제안: 수치 제시\n\
             핵심역량: 공동체역량\n\
             추천 전공: 경영학, 행정학\n\
             적합성 평가: 보통\n\
             우선순위: 중 - 보조 자료"
        );
        assert_eq!(report.text_blocks()[2], "[종합 전략 제안]\n리더십 중심 서류 전략");
    }

    #[test]
    fn test_missing_majors_render_as_empty_join() {
        let result = parsed(json!({ "자율활동": { "type": "창체" } }), &["자율활동"]);
        let block = &aggregate(&result).text_blocks()[0];
        assert!(block.lines().any(|l| l == "추천 전공: "));
        assert!(block.lines().any(|l| l == "강점:"));
    }

    #[test]
    fn test_no_summary_block_without_strategy() {
        let result = parsed(json!({ "자율활동": {} }), &["자율활동"]);
        let report = aggregate(&result);
        assert!(report.summary.is_none());
        assert_eq!(report.text_blocks().len(), 1);
        assert!(report.text_blocks()[0].starts_with("[자율활동 - 미분류]"));
    }
}
