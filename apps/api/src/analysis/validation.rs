//! Input validation: runs before any expensive work.

use crate::analysis::AnalysisError;
use crate::models::record::{AnalysisRequest, StudentRecord, UniversityLevel};

pub const FIELD_FILE: &str = "file";
pub const FIELD_DESIRED_MAJOR: &str = "desired_major";
pub const FIELD_UNIVERSITY_LEVEL: &str = "university_level";

/// Checks the uploaded document and form fields, in that order, and builds the
/// immutable request. The error names the first field that failed.
///
/// - `file`: JSON object of unique section names → text, at least one section,
///   no blank section names
/// - `desired_major`: non-empty after trimming
/// - `university_level`: one of the three tiers
pub fn validate_submission(
    raw_record: Option<&[u8]>,
    desired_major: Option<&str>,
    university_level: Option<&str>,
) -> Result<AnalysisRequest, AnalysisError> {
    let record = parse_record(raw_record)?;

    let desired_major = desired_major.map(str::trim).unwrap_or_default();
    if desired_major.is_empty() {
        return Err(AnalysisError::invalid(
            FIELD_DESIRED_MAJOR,
            "desired major cannot be empty",
        ));
    }

    let university_level = university_level
        .ok_or_else(|| AnalysisError::invalid(FIELD_UNIVERSITY_LEVEL, "university level is required"))?
        .parse::<UniversityLevel>()
        .map_err(|e| AnalysisError::invalid(FIELD_UNIVERSITY_LEVEL, e))?;

    Ok(AnalysisRequest::new(
        desired_major.to_string(),
        university_level,
        record,
    ))
}

fn parse_record(raw: Option<&[u8]>) -> Result<StudentRecord, AnalysisError> {
    let raw = raw.ok_or_else(|| AnalysisError::invalid(FIELD_FILE, "no record file was uploaded"))?;

    let record: StudentRecord = serde_json::from_slice(raw).map_err(|e| {
        AnalysisError::invalid(FIELD_FILE, format!("not a valid JSON record: {e}"))
    })?;

    if record.is_empty() {
        return Err(AnalysisError::invalid(
            FIELD_FILE,
            "record contains no sections",
        ));
    }
    if record.keys().any(|k| k.trim().is_empty()) {
        return Err(AnalysisError::invalid(
            FIELD_FILE,
            "section names cannot be blank",
        ));
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &[u8] = "{\"자율활동\": \"학급 회장\", \"개인세특\": \"정보 과목 탐구\"}".as_bytes();

    fn field_of(err: AnalysisError) -> &'static str {
        match err {
            AnalysisError::InvalidInput { field, .. } => field,
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_submission_builds_request() {
        let request =
            validate_submission(Some(RECORD), Some("  컴퓨터공학과 "), Some("상위권")).unwrap();
        assert_eq!(request.desired_major(), "컴퓨터공학과");
        assert_eq!(request.university_level(), UniversityLevel::High);
        assert_eq!(request.record().len(), 2);
    }

    #[test]
    fn test_invalid_json_names_file_field() {
        let err = validate_submission(Some(b"{not json"), Some("컴퓨터공학과"), Some("상위권"))
            .unwrap_err();
        assert_eq!(field_of(err), FIELD_FILE);
    }

    #[test]
    fn test_missing_file_names_file_field() {
        let err = validate_submission(None, Some("컴퓨터공학과"), Some("상위권")).unwrap_err();
        assert_eq!(field_of(err), FIELD_FILE);
    }

    #[test]
    fn test_empty_record_rejected() {
        let err = validate_submission(Some(b"{}"), Some("컴퓨터공학과"), Some("상위권"))
            .unwrap_err();
        assert_eq!(field_of(err), FIELD_FILE);
    }

    #[test]
    fn test_nested_values_rejected() {
        let raw = "{\"자율활동\": {\"내용\": \"x\"}}".as_bytes();
        let err = validate_submission(Some(raw), Some("컴퓨터공학과"), Some("상위권"))
            .unwrap_err();
        assert_eq!(field_of(err), FIELD_FILE);
    }

    #[test]
    fn test_blank_major_rejected() {
        let err = validate_submission(Some(RECORD), Some("   "), Some("상위권")).unwrap_err();
        assert_eq!(field_of(err), FIELD_DESIRED_MAJOR);
    }

    #[test]
    fn test_unknown_level_rejected() {
        let err =
            validate_submission(Some(RECORD), Some("컴퓨터공학과"), Some("최상위")).unwrap_err();
        assert_eq!(field_of(err), FIELD_UNIVERSITY_LEVEL);
    }

    #[test]
    fn test_missing_level_rejected() {
        let err = validate_submission(Some(RECORD), Some("컴퓨터공학과"), None).unwrap_err();
        assert_eq!(field_of(err), FIELD_UNIVERSITY_LEVEL);
    }
}
