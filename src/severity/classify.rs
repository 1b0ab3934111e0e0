use crate::models::enums::{LabStatus, Sex};
use crate::models::{AnnotatedTest, TestResult};

use super::catalog::ReferenceCatalog;
use super::helpers::{has_magnitude_word, normalize_test_name, parse_qualitative, parse_value};
use super::policy::SeverityPolicy;
use super::types::{ReferenceBand, ReferenceEntry};
use super::units::{strip_magnitude_word, UnitConverter};

/// Everything a single classification needs, borrowed from the analyzer.
pub struct ClassifyContext<'a> {
    pub catalog: &'a ReferenceCatalog,
    pub converter: &'a UnitConverter,
    pub policy: &'a SeverityPolicy,
    pub sex: Sex,
}

/// Compare an already-normalized value against a band.
///
/// Out-of-range checks run before the borderline check, so a value below
/// `low` is always `Low` even when it also sits inside the borderline margin.
pub fn classify_value(value: f64, band: ReferenceBand, margin: f64) -> LabStatus {
    if value < band.low {
        return LabStatus::Low;
    }
    if value > band.high {
        return LabStatus::High;
    }
    if value <= band.low * (1.0 + margin) || value >= band.high * (1.0 - margin) {
        return LabStatus::Borderline;
    }
    LabStatus::Normal
}

/// Classify one test row into a new annotated record.
pub fn classify_test(test: &TestResult, ctx: &ClassifyContext<'_>) -> AnnotatedTest {
    let key = normalize_test_name(&test.name);
    let policy = ctx.policy;

    let Some(entry) = ctx
        .catalog
        .resolve(&key, policy.match_policy, policy.short_fragment_len)
    else {
        return fallback(test, policy);
    };

    let raw = test.value.as_ref().map(|v| v.as_text()).unwrap_or_default();
    let mut annotated = if entry.qualitative {
        classify_qualitative(test, &raw, policy.qualitative_cutoff)
    } else {
        classify_numeric(test, entry, &raw, ctx)
    };
    annotated.matched_fragment = Some(entry.fragment.clone());
    annotated.category = Some(entry.category.clone());
    annotated.specialist = Some(entry.specialist.clone());
    annotated
}

fn classify_numeric(
    test: &TestResult,
    entry: &ReferenceEntry,
    raw: &str,
    ctx: &ClassifyContext<'_>,
) -> AnnotatedTest {
    let Some(parsed) = parse_value(raw) else {
        tracing::debug!(test = %test.name, "Unparseable value");
        return AnnotatedTest::from_input(test, LabStatus::InvalidData);
    };

    let band = entry
        .band_for(ctx.sex)
        .unwrap_or(ctx.policy.permissive_band);
    // The parser already applied a multiplier written in the value itself.
    let unit = test.unit.as_deref().map(|u| {
        if has_magnitude_word(raw) {
            strip_magnitude_word(u)
        } else {
            u.to_string()
        }
    });
    let normalized = ctx
        .converter
        .normalize(entry, band, parsed, unit.as_deref(), ctx.policy);
    let status = classify_value(normalized.value, band, ctx.policy.borderline_margin);

    let mut annotated = AnnotatedTest::from_input(test, status);
    annotated.normalized_value = Some(normalized.value);
    annotated.rescale = normalized.rescale;
    annotated
}

fn classify_qualitative(test: &TestResult, raw: &str, cutoff: f64) -> AnnotatedTest {
    let Some(reading) = parse_qualitative(raw) else {
        tracing::debug!(test = %test.name, "Unreadable qualitative result");
        return AnnotatedTest::from_input(test, LabStatus::InvalidData);
    };
    let status = if reading >= cutoff {
        LabStatus::Positive
    } else {
        LabStatus::Normal
    };
    let mut annotated = AnnotatedTest::from_input(test, status);
    annotated.normalized_value = Some(reading);
    annotated
}

/// Unknown test: keep the extractor's status and judge it by wording alone.
fn fallback(test: &TestResult, policy: &SeverityPolicy) -> AnnotatedTest {
    let status = test
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(&policy.missing_status)
        .to_string();
    tracing::debug!(test = %test.name, status = %status, "Test not in reference catalog");

    let mut annotated = AnnotatedTest::from_input(test, LabStatus::NotClassified);
    annotated.abnormal = !policy.is_normal_status(&status);
    annotated.status = status;
    annotated
}
