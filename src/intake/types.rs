use serde::{Deserialize, Serialize};

use crate::models::enums::{Sex, Urgency};
use crate::models::TestResult;

/// Patient block as the extractor reported it. Every field is free text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    /// Raw sex string ("M", "F", "Unknown", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    /// Collection date, usually YYYY-MM-DD.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl PatientInfo {
    /// Sex usable for band selection; `None` for "Unknown" or anything unreadable.
    pub fn sex(&self) -> Option<Sex> {
        self.sex.as_deref().and_then(Sex::from_report)
    }

    /// Read the block leniently: numbers become text, other shapes are dropped.
    pub(crate) fn from_value(value: &serde_json::Value) -> Self {
        let field = |key: &str| match value.get(key)? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        };
        Self {
            name: field("name"),
            age: field("age"),
            sex: field("sex"),
            date: field("date"),
        }
    }
}

/// Structured content of one extractor response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedReport {
    pub report_type: Option<String>,
    pub patient: PatientInfo,
    /// The extractor's own risk call ("Low" / "Moderate" / "High"), if any.
    pub overall_risk: Option<String>,
    pub summary: Option<String>,
    pub tests: Vec<TestResult>,
    /// Rows in `tests` that could not be read as a test result.
    pub skipped_rows: usize,
    pub lifestyle: Vec<String>,
    pub specialist: Option<String>,
    pub urgency: Option<Urgency>,
}
