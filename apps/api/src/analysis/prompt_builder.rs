//! Prompt builder: renders a request into the single instruction string.
//!
//! Pure function of its input: the same request always yields the same text.
//! The record is embedded in full, keys verbatim, without truncation.

use crate::analysis::prompts::{FACET_INSTRUCTIONS, KEY_RULE, RESPONSE_SHAPE_EXAMPLE};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::models::record::AnalysisRequest;

pub fn build_prompt(request: &AnalysisRequest) -> String {
    format!(
        "희망 학과는 '{major}'이고, 목표 대학 수준은 '{level}'입니다. \
         다음은 학생부 항목별 텍스트입니다. \
         각 항목을 '창의적 체험활동' 또는 '세특' 중 하나로 분류하고,\n\
         {facets}\n\
         형식은 JSON으로, {key_rule} 예시: {example}\n\
         {json_only}\n\n\
         {record}",
        major = request.desired_major(),
        level = request.university_level().label(),
        facets = FACET_INSTRUCTIONS,
        key_rule = KEY_RULE,
        example = RESPONSE_SHAPE_EXAMPLE,
        json_only = JSON_ONLY_INSTRUCTION,
        record = request.record().to_json(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::validation::validate_submission;

    fn request(raw: &str, major: &str) -> AnalysisRequest {
        validate_submission(Some(raw.as_bytes()), Some(major), Some("상위권")).unwrap()
    }

    #[test]
    fn test_prompt_embeds_major_level_and_keys() {
        let req = request(
            r#"{"자율활동": "학급 회장으로 토론회 기획", "개인세특": "정보 과목 알고리즘 탐구"}"#,
            "컴퓨터공학과",
        );
        let prompt = build_prompt(&req);
        assert!(prompt.contains("'컴퓨터공학과'"));
        assert!(prompt.contains("'상위권'"));
        assert!(prompt.contains("\"자율활동\": \"학급 회장으로 토론회 기획\""));
        assert!(prompt.contains("\"개인세특\": \"정보 과목 알고리즘 탐구\""));
        assert!(prompt.find("\"자율활동\": \"학급").unwrap() < prompt.find("\"개인세특\": \"정보").unwrap());
    }

    #[test]
    fn test_prompt_lists_nine_facets_and_shape() {
        let prompt = build_prompt(&request(r#"{"a": "b"}"#, "물리학과"));
        for n in 1..=9 {
            assert!(prompt.contains(&format!("\n{n}. ")), "facet {n} missing");
        }
        assert!(!prompt.contains("\n10. "));
        assert!(prompt.contains("'창의적 체험활동' 또는 '세특'"));
        for key in [
            "\"type\"",
            "\"strengths\"",
            "\"weakness\"",
            "\"suggestion\"",
            "\"core_competencies\"",
            "\"majors\"",
            "\"major_fit\"",
            "\"priority\"",
            "\"strategy_summary\"",
        ] {
            assert!(prompt.contains(key), "{key} missing from example");
        }
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let raw = r#"{"자율활동": "x", "동아리활동": "y"}"#;
        assert_eq!(
            build_prompt(&request(raw, "컴퓨터공학과")),
            build_prompt(&request(raw, "컴퓨터공학과"))
        );
    }

    #[test]
    fn test_prompt_does_not_truncate_long_sections() {
        let long = "탐구".repeat(5000);
        let raw = format!(r#"{{"진로활동": "{long}"}}"#);
        let prompt = build_prompt(&request(&raw, "화학과"));
        assert!(prompt.contains(&long));
    }

    #[test]
    fn test_placeholder_like_input_is_embedded_literally() {
        let req = request(r#"{"{major}": "{record}"}"#, "{level}");
        let prompt = build_prompt(&req);
        assert!(prompt.contains("'{level}'"));
        assert!(prompt.contains(r#"{"{major}": "{record}"}"#));
    }
}
