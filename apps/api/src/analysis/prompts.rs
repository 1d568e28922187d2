// Prompt constants for the record analysis call.
// Facet keys in RESPONSE_SHAPE_EXAMPLE are the keys the parser reads.

/// The nine facets requested for every section. The ninth is synthesized once
/// across the whole record.
pub const FACET_INSTRUCTIONS: &str = "\
각 항목에 대해 다음을 작성해줘:
1. 분류 결과 (창의적 체험활동 / 세특)
2. 핵심 강점 여러 가지 (5개 이상)
3. 약점 또는 보완점
4. 추가 제안 (입시나 자기소개서 활용 관점에서)
5. 해당 활동/세특이 드러내는 교육부 핵심역량 (문제해결력, 의사소통능력, 정보처리능력, 공동체역량, 자기관리역량, 창의적사고력 중 해당되는 것들을 나열하고 이유 설명)
6. 이 항목이 유리한 전공 분야 추천 (2~3개)
7. 추천 전공과 희망 학과 간의 적합성 평가
8. 이 항목이 전체 학생부에서 차지하는 입시 전략상 우선순위 (상 / 중 / 하)와 그 이유
9. 전체 학생부 내용을 종합해 학생에게 효과적인 입시 전략 방향 제안 (최종적으로 1개만)";

/// Literal example of the required reply shape.
pub const RESPONSE_SHAPE_EXAMPLE: &str = r#"{"자율활동": {"type": "창의적 체험활동", "strengths": ["...", "...", "...", "...", "..."], "weakness": "...", "suggestion": "...", "core_competencies": "...", "majors": ["...", "..."], "major_fit": "...", "priority": "상 - ...", "strategy_summary": "..."}}"#;

/// Key-preservation rule. Key matching downstream depends on it.
pub const KEY_RULE: &str = "최상위 키는 아래 학생부의 항목 이름을 글자 하나 바꾸지 말고 그대로 사용해. \
    항목을 빠뜨리거나 새 항목을 추가하지 마.";
