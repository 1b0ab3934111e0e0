use serde::{Deserialize, Serialize};

use super::enums::LabStatus;

/// A reported magnitude as the extractor produced it: a bare number or
/// free text such as "9,600", "2.48 lakhs" or "Negative".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TestValue {
    Number(f64),
    Text(String),
}

impl TestValue {
    /// Text form fed to the value parser.
    pub fn as_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for TestValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for TestValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// One test row handed over by the OCR/LLM extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub name: String,
    #[serde(default)]
    pub value: Option<TestValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Printed reference range; informational only.
    #[serde(default, alias = "ref_range", skip_serializing_if = "Option::is_none")]
    pub ref_range: Option<String>,
    /// Status the extractor assigned, used only when the name is not in the catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl TestResult {
    pub fn new(name: impl Into<String>, value: impl Into<TestValue>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            unit: None,
            ref_range: None,
            status: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// How a parsed value was rescaled before comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rescale {
    /// Declared unit found in the conversion table.
    UnitTable { from_unit: String, factor: f64 },
    /// No usable unit; value exceeded the high bound by the configured ratio.
    MagnitudeHeuristic { divisor: f64 },
}

/// A classified copy of a [`TestResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedTest {
    pub name: String,
    pub value: Option<TestValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_range: Option<String>,
    /// Display status: the classification, or the caller's status for unclassified tests.
    pub status: String,
    pub classification: LabStatus,
    pub abnormal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rescale: Option<Rescale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_fragment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialist: Option<String>,
}

impl AnnotatedTest {
    /// Annotated copy carrying only the input fields; classification fills the rest.
    pub fn from_input(test: &TestResult, classification: LabStatus) -> Self {
        Self {
            name: test.name.clone(),
            value: test.value.clone(),
            unit: test.unit.clone(),
            ref_range: test.ref_range.clone(),
            status: classification.as_str().to_string(),
            classification,
            abnormal: classification.is_abnormal(),
            normalized_value: None,
            rescale: None,
            matched_fragment: None,
            category: None,
            specialist: None,
        }
    }
}
