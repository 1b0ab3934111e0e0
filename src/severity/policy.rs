//! Tunables for classification and aggregation.
//!
//! Every field has a default matching the shipped behaviour; a JSON policy
//! file may override any subset of them.

use serde::{Deserialize, Serialize};

use crate::models::enums::Sex;

use super::types::ReferenceBand;

/// How a free-text test name is matched against catalog fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Longest contained fragment wins, ties to catalog order. Short
    /// fragments must sit on word boundaries.
    Ranked,
    /// First catalog fragment that is a plain substring of the name.
    FirstInOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityPolicy {
    pub match_policy: MatchPolicy,
    /// Fragments up to this many characters need word boundaries under `Ranked`.
    pub short_fragment_len: usize,
    /// Fraction of each edge treated as borderline (0.10 = within 10%).
    pub borderline_margin: f64,
    /// Rescale when the value exceeds `high * magnitude_ratio` and no unit applies.
    pub magnitude_heuristic: bool,
    pub magnitude_ratio: f64,
    pub magnitude_divisor: f64,
    /// Qualitative readings at or above this are positive. Words read as 0 or 1;
    /// bare numbers are taken as a signal-to-cutoff index.
    pub qualitative_cutoff: f64,
    /// Band used when an entry has none for the requested sex.
    pub permissive_band: ReferenceBand,
    pub default_sex: Sex,
    /// Lowercase substrings of test names whose abnormality forces High risk.
    pub severe_markers: Vec<String>,
    /// Caller statuses (lowercase) that do not count as abnormal.
    pub normal_statuses: Vec<String>,
    /// Status assumed for unclassified tests that carry none.
    pub missing_status: String,
    pub default_specialist: String,
    /// Abnormal count at which deviations become "multiple".
    pub multiple_abnormal_threshold: usize,
}

impl Default for SeverityPolicy {
    fn default() -> Self {
        Self {
            match_policy: MatchPolicy::Ranked,
            short_fragment_len: 3,
            borderline_margin: 0.10,
            magnitude_heuristic: true,
            magnitude_ratio: 100.0,
            magnitude_divisor: 1000.0,
            qualitative_cutoff: 1.0,
            permissive_band: ReferenceBand::new(0.0, 1000.0),
            default_sex: Sex::Male,
            severe_markers: ["crp", "creatinine", "hiv", "hbsag", "troponin", "psa", "cea"]
                .into_iter()
                .map(String::from)
                .collect(),
            normal_statuses: vec!["normal".into(), "optimal".into()],
            missing_status: "Normal".into(),
            default_specialist: "General Physician".into(),
            multiple_abnormal_threshold: 3,
        }
    }
}

impl SeverityPolicy {
    /// Lowercase the marker and status lists so file entries like "CRP" match.
    pub fn normalize_lists(&mut self) {
        for item in self.severe_markers.iter_mut().chain(self.normal_statuses.iter_mut()) {
            *item = item.trim().to_lowercase();
        }
    }

    /// Whether a caller-supplied status reads as clinically normal.
    pub fn is_normal_status(&self, status: &str) -> bool {
        let lower = status.trim().to_lowercase();
        self.normal_statuses.iter().any(|s| *s == lower)
    }

    /// Whether a test name contains one of the high-acuity markers.
    pub fn is_severe_marker(&self, test_name: &str) -> bool {
        let lower = test_name.to_lowercase();
        self.severe_markers.iter().any(|m| lower.contains(m.as_str()))
    }
}
