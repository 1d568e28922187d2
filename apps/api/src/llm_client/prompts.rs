// Shared prompt fragments for generation-service calls.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// Appended to every prompt. The API call carries no system message, so the
/// JSON-only rule travels inside the user message.
pub const JSON_ONLY_INSTRUCTION: &str = "반드시 유효한 JSON 객체 하나만 응답해. \
    JSON 바깥에 설명, 인사말, 마크다운 코드 펜스를 붙이지 마.";
