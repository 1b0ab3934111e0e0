use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::enums::{BannerColor, Priority, RiskLevel, Sex};
use crate::models::{AnnotatedTest, TestResult};

// ---------------------------------------------------------------------------
// ReferenceBand
// ---------------------------------------------------------------------------

/// Clinically normal `[low, high]` interval for one sex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct ReferenceBand {
    pub low: f64,
    pub high: f64,
}

impl ReferenceBand {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn is_valid(&self) -> bool {
        self.low.is_finite() && self.high.is_finite() && self.low < self.high
    }
}

impl From<[f64; 2]> for ReferenceBand {
    fn from([low, high]: [f64; 2]) -> Self {
        Self { low, high }
    }
}

impl From<ReferenceBand> for [f64; 2] {
    fn from(band: ReferenceBand) -> Self {
        [band.low, band.high]
    }
}

// ---------------------------------------------------------------------------
// ReferenceEntry
// ---------------------------------------------------------------------------

/// One catalog row: a lowercase name fragment and its reference bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub fragment: String,
    /// `None` when the test has no meaningful band for that sex (e.g. PSA for women).
    #[serde(default, rename = "M", skip_serializing_if = "Option::is_none")]
    pub male: Option<ReferenceBand>,
    #[serde(default, rename = "F", skip_serializing_if = "Option::is_none")]
    pub female: Option<ReferenceBand>,
    pub unit: String,
    pub category: String,
    pub specialist: String,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// Binary detected/not-detected marker without a numeric band.
    #[serde(default)]
    pub qualitative: bool,
}

impl ReferenceEntry {
    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }

    pub fn band_for(&self, sex: Sex) -> Option<ReferenceBand> {
        match sex {
            Sex::Male => self.male,
            Sex::Female => self.female,
        }
    }
}

// ---------------------------------------------------------------------------
// RiskSummary & Analysis
// ---------------------------------------------------------------------------

/// Overall verdict for one batch of tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSummary {
    pub overall_risk: RiskLevel,
    pub banner_message: String,
    pub severity_banner_color: BannerColor,
    pub recommended_specialist: String,
    pub abnormal_count: usize,
    /// Names of abnormal tests that matched a high-acuity marker.
    #[serde(default)]
    pub severe_flags: Vec<String>,
}

/// Core output contract: the summary plus one annotated record per input row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub risk_summary: RiskSummary,
    pub tests: Vec<AnnotatedTest>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Reference data load failed ({0}): {1}")]
    ReferenceDataLoad(String, String),

    #[error("Reference data parse failed ({0}): {1}")]
    ReferenceDataParse(String, String),

    #[error("Catalog entry has an empty name fragment")]
    EmptyFragment,

    #[error("Catalog fragment must be lowercase: {0}")]
    UppercaseFragment(String),

    #[error("Duplicate catalog fragment: {0}")]
    DuplicateFragment(String),

    #[error("Invalid {sex} band for {fragment}: [{low}, {high}]")]
    InvalidBand {
        fragment: String,
        sex: Sex,
        low: f64,
        high: f64,
    },

    #[error("Numeric catalog entry has no band for either sex: {0}")]
    MissingBands(String),
}

// ---------------------------------------------------------------------------
// LabAnalyzer trait
// ---------------------------------------------------------------------------

/// Classify a batch of extracted tests and summarise the risk.
pub trait LabAnalyzer {
    /// `sex` of `None` falls back to the policy default (male bands).
    fn analyze(&self, tests: &[TestResult], sex: Option<Sex>) -> Analysis;
}
