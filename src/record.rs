//! The Resume Record: structured data extracted from a source page.
//!
//! Every field carries a default so a record is always complete, even when
//! the source page lacks the matching structure.

use serde::{Deserialize, Serialize};

/// Contact details from the page header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub location: String,
}

/// One item within a section (a job, a degree, a publication...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
    pub title: String,
    pub date: String,
    pub subtitle: String,
    pub description: String,
}

/// A named group of skills
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillCategory {
    pub category: String,
    pub skills: Vec<String>,
}

/// A spoken language and the holder's level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    pub language: String,
    pub level: String,
}

/// The aggregate produced by one extraction pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeRecord {
    pub personal_info: PersonalInfo,
    pub profile: String,
    pub education: Vec<Entry>,
    pub experience: Vec<Entry>,
    pub skills: Vec<SkillCategory>,
    pub publications: Vec<Entry>,
    pub certifications: Vec<Entry>,
    pub languages: Vec<Language>,
    pub references: Vec<Entry>,
}

impl ResumeRecord {
    /// True when extraction found nothing at all.
    pub fn is_empty(&self) -> bool {
        *self == ResumeRecord::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_is_empty() {
        let r = ResumeRecord::default();
        assert!(r.is_empty());
        assert_eq!(r.personal_info.name, "");
        assert!(r.references.is_empty());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let r: ResumeRecord =
            serde_json::from_str(r#"{"personalInfo":{"name":"Ana"},"profile":"x"}"#).unwrap();
        assert_eq!(r.personal_info.name, "Ana");
        assert_eq!(r.personal_info.email, "");
        assert!(r.education.is_empty());
        assert!(!r.is_empty());
    }

    #[test]
    fn serializes_camel_case_keys() {
        let v = serde_json::to_value(ResumeRecord::default()).unwrap();
        assert!(v.get("personalInfo").is_some());
        assert!(v.get("certifications").is_some());
    }
}
