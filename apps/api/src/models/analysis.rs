//! Typed per-section evaluation produced by the response parser.
//!
//! Every facet has a documented default so that a partially-populated reply
//! still yields a complete `SectionAnalysis`:
//! - list facets (`strengths`, `recommended_majors`) → empty
//! - text facets → [`NOT_AVAILABLE`]
//! - `category` → `None` (rendered as unclassified)
//! - `strategy_summary` → `None`

/// Placeholder for a text facet the service left out.
pub const NOT_AVAILABLE: &str = "정보 없음";

/// The two mutually exclusive section classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    CreativeActivity,
    SubjectSpecialty,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::CreativeActivity => "창의적 체험활동",
            Category::SubjectSpecialty => "세특",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let normalized: String = label.split_whitespace().collect::<String>().to_lowercase();
        match normalized.as_str() {
            "창의적체험활동" | "창체" | "creativeactivity" | "creative_activity" => {
                Some(Category::CreativeActivity)
            }
            "세특" | "세부능력및특기사항" | "subjectspecialty" | "subject_specialty" => {
                Some(Category::SubjectSpecialty)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityLevel {
    High,
    Medium,
    Low,
}

impl PriorityLevel {
    /// Reads a level from the start of `text`: 상/중/하 or High/Medium/Low.
    pub fn detect(text: &str) -> Option<Self> {
        let head = text
            .trim_start()
            .trim_start_matches(['(', '[', '*', '"', '\''])
            .trim_start();
        let lower = head.to_lowercase();
        for (token, level) in [
            ("상", PriorityLevel::High),
            ("중", PriorityLevel::Medium),
            ("하", PriorityLevel::Low),
            ("high", PriorityLevel::High),
            ("medium", PriorityLevel::Medium),
            ("low", PriorityLevel::Low),
        ] {
            if let Some(rest) = lower.strip_prefix(token) {
                // "상위", "하지만" and "lower" are words, not level tokens.
                if rest.chars().next().map_or(true, |c| !c.is_alphanumeric()) {
                    return Some(level);
                }
            }
        }
        None
    }
}

/// Strategic priority of a section, with the service's rationale.
///
/// `rationale` is the full display text; `level` is whatever could be read from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Priority {
    pub level: Option<PriorityLevel>,
    pub rationale: String,
}

impl Default for Priority {
    fn default() -> Self {
        Self {
            level: None,
            rationale: NOT_AVAILABLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionAnalysis {
    pub category: Option<Category>,
    pub strengths: Vec<String>,
    pub weakness: String,
    pub suggestion: String,
    /// Free-form rationale referencing the core competency set.
    pub competencies: String,
    pub recommended_majors: Vec<String>,
    pub major_fit: String,
    pub priority: Priority,
    pub strategy_summary: Option<String>,
}

impl Default for SectionAnalysis {
    fn default() -> Self {
        Self {
            category: None,
            strengths: Vec::new(),
            weakness: NOT_AVAILABLE.to_string(),
            suggestion: NOT_AVAILABLE.to_string(),
            competencies: NOT_AVAILABLE.to_string(),
            recommended_majors: Vec::new(),
            major_fit: NOT_AVAILABLE.to_string(),
            priority: Priority::default(),
            strategy_summary: None,
        }
    }
}

/// Section name → analysis, in the originating record's key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisResult {
    sections: Vec<(String, SectionAnalysis)>,
}

impl AnalysisResult {
    pub(crate) fn from_ordered(sections: Vec<(String, SectionAnalysis)>) -> Self {
        Self { sections }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SectionAnalysis)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[cfg(test)]
    pub fn get(&self, section: &str) -> Option<&SectionAnalysis> {
        self.sections
            .iter()
            .find(|(k, _)| k == section)
            .map(|(_, v)| v)
    }

    /// The first non-blank `strategy_summary` in key order. Later ones are ignored.
    pub fn overall_strategy(&self) -> Option<&str> {
        self.sections.iter().find_map(|(_, s)| {
            s.strategy_summary
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
        })
    }
}
