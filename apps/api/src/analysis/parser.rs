//! Response parser: turns the raw reply into a typed `AnalysisResult`.
//!
//! Structural problems are fatal (`MalformedResponse`): the reply is not a JSON
//! object, its section keys differ from the record's, or a section is not an object.
//! Facet-level gaps are not: each missing or unusable facet falls back to the
//! default documented on `SectionAnalysis`.

use serde::de::IgnoredAny;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::analysis::AnalysisError;
use crate::llm_client::strip_json_fences;
use crate::models::analysis::{
    AnalysisResult, Category, Priority, PriorityLevel, SectionAnalysis,
};
use crate::models::record::{StudentRecord, UniqueKeyMap};

/// Strength count the prompt asks for. Advisory only.
pub const REQUESTED_MIN_STRENGTHS: usize = 5;

mod keys {
    pub const TYPE: &str = "type";
    pub const STRENGTHS: &str = "strengths";
    pub const WEAKNESS: &str = "weakness";
    pub const SUGGESTION: &str = "suggestion";
    pub const COMPETENCIES: &str = "core_competencies";
    pub const MAJORS: &str = "majors";
    pub const MAJOR_FIT: &str = "major_fit";
    pub const PRIORITY: &str = "priority";
    pub const STRATEGY: &str = "strategy_summary";
}

pub fn parse_response(raw: &str, record: &StudentRecord) -> Result<AnalysisResult, AnalysisError> {
    let body = strip_json_fences(raw);

    let value: Value = serde_json::from_str(body)
        .map_err(|e| AnalysisError::malformed(format!("reply is not valid JSON: {e}"), raw))?;
    let Value::Object(sections) = value else {
        return Err(AnalysisError::malformed("reply is not a JSON object", raw));
    };
    // `Value` keeps only the last of a repeated key.
    serde_json::from_str::<UniqueKeyMap<IgnoredAny>>(body)
        .map_err(|e| AnalysisError::malformed(format!("reply repeats a section: {e}"), raw))?;

    check_key_set(&sections, record, raw)?;

    let mut ordered = Vec::with_capacity(record.len());
    for key in record.keys() {
        let Some(Value::Object(facets)) = sections.get(key) else {
            return Err(AnalysisError::malformed(
                format!("section '{key}' is not an object"),
                raw,
            ));
        };
        ordered.push((key.to_string(), extract_section(key, facets)));
    }

    Ok(AnalysisResult::from_ordered(ordered))
}

fn check_key_set(
    sections: &Map<String, Value>,
    record: &StudentRecord,
    raw: &str,
) -> Result<(), AnalysisError> {
    let missing: Vec<&str> = record.keys().filter(|k| !sections.contains_key(*k)).collect();
    let unexpected: Vec<&str> = sections
        .keys()
        .map(String::as_str)
        .filter(|k| !record.contains_key(k))
        .collect();

    if missing.is_empty() && unexpected.is_empty() {
        return Ok(());
    }
    Err(AnalysisError::malformed(
        format!(
            "reply sections do not match the record (missing: {missing:?}, unexpected: {unexpected:?})"
        ),
        raw,
    ))
}

fn extract_section(section: &str, facets: &Map<String, Value>) -> SectionAnalysis {
    let defaults = SectionAnalysis::default();
    let mut defaulted: Vec<&str> = Vec::new();

    let category = facets.get(keys::TYPE).and_then(as_text).and_then(|t| {
        let category = Category::from_label(&t);
        if category.is_none() {
            debug!("section '{section}': unrecognized category label {t:?}");
        }
        category
    });
    if category.is_none() {
        defaulted.push(keys::TYPE);
    }

    let mut list = |key: &'static str| match facets.get(key).map(as_list) {
        Some(items) if !items.is_empty() => items,
        _ => {
            defaulted.push(key);
            Vec::new()
        }
    };
    let strengths = list(keys::STRENGTHS);
    let recommended_majors = list(keys::MAJORS);

    let mut text = |key: &'static str, fallback: &str| match facets.get(key).and_then(as_text) {
        Some(t) => t,
        None => {
            defaulted.push(key);
            fallback.to_string()
        }
    };
    let weakness = text(keys::WEAKNESS, &defaults.weakness);
    let suggestion = text(keys::SUGGESTION, &defaults.suggestion);
    let major_fit = text(keys::MAJOR_FIT, &defaults.major_fit);

    let competencies = match facets.get(keys::COMPETENCIES).and_then(as_competencies) {
        Some(t) => t,
        None => {
            defaulted.push(keys::COMPETENCIES);
            defaults.competencies.clone()
        }
    };

    let priority = match facets.get(keys::PRIORITY).and_then(as_priority) {
        Some(p) => p,
        None => {
            defaulted.push(keys::PRIORITY);
            defaults.priority.clone()
        }
    };

    let strategy_summary = facets.get(keys::STRATEGY).and_then(as_text);

    if !defaulted.is_empty() {
        debug!("section '{section}': defaults applied for {defaulted:?}");
    }
    if strengths.len() < REQUESTED_MIN_STRENGTHS {
        warn!(
            "section '{section}': {} strengths returned, {} requested",
            strengths.len(),
            REQUESTED_MIN_STRENGTHS
        );
    }

    SectionAnalysis {
        category,
        strengths,
        weakness,
        suggestion,
        competencies,
        recommended_majors,
        major_fit,
        priority,
        strategy_summary,
    }
}

/// Non-blank scalar text. Lists of scalars are joined with ", ".
fn as_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(_) => as_list(value).join(", "),
        Value::Null | Value::Object(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// A list of non-blank items. A lone string counts as a one-item list.
fn as_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(_) => Some(item.to_string()),
                other => as_text(other),
            })
            .collect(),
        other => as_text(other).into_iter().collect(),
    }
}

/// Competency rationale. Lists and `{name: reason}` objects are flattened to
/// `name: reason` pairs joined with "; ".
fn as_competencies(value: &Value) -> Option<String> {
    let text = match value {
        Value::Object(map) => map
            .iter()
            .filter_map(|(name, reason)| named_reason(name, reason))
            .collect::<Vec<_>>()
            .join("; "),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(map) => {
                    let name = first_text(map, &["competency", "name", "역량"]);
                    let reason = first_text(map, &["reason", "rationale", "이유"]);
                    match (name, reason) {
                        (Some(n), Some(r)) => Some(format!("{n}: {r}")),
                        (Some(n), None) => Some(n),
                        (None, Some(r)) => Some(r),
                        (None, None) => None,
                    }
                }
                other => as_text(other),
            })
            .collect::<Vec<_>>()
            .join("; "),
        other => return as_text(other),
    };
    (!text.is_empty()).then_some(text)
}

fn named_reason(name: &str, reason: &Value) -> Option<String> {
    match as_text(reason) {
        Some(r) => Some(format!("{name}: {r}")),
        None => (!name.trim().is_empty()).then(|| name.trim().to_string()),
    }
}

fn first_text(map: &Map<String, Value>, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .find_map(|key| map.get(*key).and_then(as_text))
}

/// Priority from free text (`"상 - 이유"`) or `{level, reason}`.
fn as_priority(value: &Value) -> Option<Priority> {
    match value {
        Value::Object(map) => {
            let level_text = first_text(map, &["level", "priority", "우선순위"]);
            let reason = first_text(map, &["reason", "rationale", "이유"]);
            let level = level_text.as_deref().and_then(PriorityLevel::detect);
            let rationale = match (level_text, reason) {
                (Some(l), Some(r)) => format!("{l} - {r}"),
                (Some(l), None) => l,
                (None, Some(r)) => r,
                (None, None) => return None,
            };
            Some(Priority { level, rationale })
        }
        other => as_text(other).map(|rationale| Priority {
            level: PriorityLevel::detect(&rationale),
            rationale,
        }),
    }
}
