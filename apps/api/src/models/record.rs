//! The uploaded student record and the immutable request built around it.

use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Section name → free-text content, kept in upload order.
///
/// Section names are unique; a document that repeats a key is rejected at
/// deserialization rather than silently keeping the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentRecord {
    sections: Vec<(String, String)>,
}

impl StudentRecord {
    /// Builds a record from ordered pairs. Fails on the first repeated section name.
    pub fn from_sections<I, K, V>(sections: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        for (key, value) in sections {
            let key = key.into();
            if !seen.insert(key.clone()) {
                return Err(format!("duplicate section '{key}'"));
            }
            ordered.push((key, value.into()));
        }
        Ok(Self { sections: ordered })
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(k, _)| k.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.sections.iter().any(|(k, _)| k == key)
    }

    /// Compact JSON object text in section order, non-ASCII left unescaped.
    pub fn to_json(&self) -> String {
        let body = self
            .sections
            .iter()
            .map(|(k, v)| format!("{}: {}", Value::from(k.as_str()), Value::from(v.as_str())))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{{{body}}}")
    }
}

impl Serialize for StudentRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for (k, v) in &self.sections {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StudentRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let UniqueKeyMap(sections) = UniqueKeyMap::<String>::deserialize(deserializer)?;
        Ok(StudentRecord { sections })
    }
}

/// A JSON object read entry by entry, in document order.
///
/// A repeated key is an error instead of last-one-wins.
#[derive(Debug)]
pub(crate) struct UniqueKeyMap<V>(pub(crate) Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for UniqueKeyMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct UniqueKeyVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for UniqueKeyVisitor<V> {
            type Value = UniqueKeyMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object with unique keys")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut seen = HashSet::new();
                let mut entries = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, V>()? {
                    if !seen.insert(key.clone()) {
                        return Err(de::Error::custom(format!("duplicate section '{key}'")));
                    }
                    entries.push((key, value));
                }
                Ok(UniqueKeyMap(entries))
            }
        }

        deserializer.deserialize_map(UniqueKeyVisitor(PhantomData))
    }
}

/// Target university tier chosen on the submission form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniversityLevel {
    High,
    Mid,
    Low,
}

impl UniversityLevel {
    pub fn label(&self) -> &'static str {
        match self {
            UniversityLevel::High => "상위권",
            UniversityLevel::Mid => "중위권",
            UniversityLevel::Low => "하위권",
        }
    }
}

impl FromStr for UniversityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "상위권" | "high" => Ok(UniversityLevel::High),
            "중위권" | "mid" => Ok(UniversityLevel::Mid),
            "하위권" | "low" => Ok(UniversityLevel::Low),
            other => Err(format!(
                "'{other}' is not one of 상위권, 중위권, 하위권 (high, mid, low)"
            )),
        }
    }
}

/// A validated submission. Built once by the validator and never mutated.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    desired_major: String,
    university_level: UniversityLevel,
    record: StudentRecord,
}

impl AnalysisRequest {
    pub(crate) fn new(
        desired_major: String,
        university_level: UniversityLevel,
        record: StudentRecord,
    ) -> Self {
        Self {
            desired_major,
            university_level,
            record,
        }
    }

    pub fn desired_major(&self) -> &str {
        &self.desired_major
    }

    pub fn university_level(&self) -> UniversityLevel {
        self.university_level
    }

    pub fn record(&self) -> &StudentRecord {
        &self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_preserves_upload_order() {
        let raw = r#"{"진로활동": "a", "자율활동": "b", "개인세특": "c"}"#;
        let record: StudentRecord = serde_json::from_str(raw).unwrap();
        let keys: Vec<_> = record.keys().collect();
        assert_eq!(keys, vec!["진로활동", "자율활동", "개인세특"]);
    }

    #[test]
    fn test_record_rejects_duplicate_keys() {
        let raw = r#"{"자율활동": "a", "자율활동": "b"}"#;
        let err = serde_json::from_str::<StudentRecord>(raw).unwrap_err();
        assert!(err.to_string().contains("duplicate section"));
    }

    #[test]
    fn test_record_rejects_non_string_values() {
        let raw = r#"{"자율활동": 3}"#;
        assert!(serde_json::from_str::<StudentRecord>(raw).is_err());
    }

    #[test]
    fn test_record_rejects_top_level_array() {
        assert!(serde_json::from_str::<StudentRecord>(r#"["자율활동"]"#).is_err());
    }

    #[test]
    fn test_to_json_keeps_order_and_hangul() {
        let record =
            StudentRecord::from_sections([("자율활동", "토론 \"리더\""), ("개인세특", "코딩")])
                .unwrap();
        assert_eq!(
            record.to_json(),
            r#"{"자율활동": "토론 \"리더\"", "개인세특": "코딩"}"#
        );
        let back: StudentRecord = serde_json::from_str(&record.to_json()).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_from_sections_rejects_duplicates() {
        assert!(StudentRecord::from_sections([("a", "1"), ("a", "2")]).is_err());
    }

    #[test]
    fn test_university_level_parses_korean_and_english() {
        assert_eq!("상위권".parse::<UniversityLevel>().unwrap(), UniversityLevel::High);
        assert_eq!(" Mid ".parse::<UniversityLevel>().unwrap(), UniversityLevel::Mid);
        assert_eq!("하위권".parse::<UniversityLevel>().unwrap(), UniversityLevel::Low);
        assert!("최상위".parse::<UniversityLevel>().is_err());
    }
}
