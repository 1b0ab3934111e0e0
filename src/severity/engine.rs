use std::time::Instant;

use crate::models::enums::Sex;
use crate::models::TestResult;

use super::aggregate::aggregate;
use super::catalog::ReferenceCatalog;
use super::classify::{classify_test, ClassifyContext};
use super::policy::SeverityPolicy;
use super::types::{Analysis, LabAnalyzer};
use super::units::UnitConverter;

/// Default implementation of the lab analyzer.
/// Holds the catalog, unit table and policy it was built with; no state
/// changes between calls, so one instance can serve concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct DefaultLabAnalyzer {
    pub(crate) catalog: ReferenceCatalog,
    pub(crate) converter: UnitConverter,
    pub(crate) policy: SeverityPolicy,
}

impl DefaultLabAnalyzer {
    pub fn new(catalog: ReferenceCatalog, converter: UnitConverter, policy: SeverityPolicy) -> Self {
        Self {
            catalog,
            converter,
            policy,
        }
    }

    pub fn catalog(&self) -> &ReferenceCatalog {
        &self.catalog
    }
}

impl LabAnalyzer for DefaultLabAnalyzer {
    fn analyze(&self, tests: &[TestResult], sex: Option<Sex>) -> Analysis {
        let start = Instant::now();

        let ctx = ClassifyContext {
            catalog: &self.catalog,
            converter: &self.converter,
            policy: &self.policy,
            sex: sex.unwrap_or(self.policy.default_sex),
        };
        let annotated: Vec<_> = tests.iter().map(|t| classify_test(t, &ctx)).collect();
        let risk_summary = aggregate(&annotated, &self.policy);

        let processing_time_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            tests = annotated.len(),
            abnormal = risk_summary.abnormal_count,
            severe = risk_summary.severe_flags.len(),
            risk = risk_summary.overall_risk.as_str(),
            processing_ms = processing_time_ms,
            "Lab analysis complete"
        );

        Analysis {
            risk_summary,
            tests: annotated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{BannerColor, LabStatus, RiskLevel};

    fn analyzer() -> DefaultLabAnalyzer {
        DefaultLabAnalyzer::default()
    }

    #[test]
    fn hemoglobin_scenario() {
        let analysis = analyzer().analyze(&[TestResult::new("Hemoglobin", "8.0")], None);
        assert_eq!(analysis.tests[0].status, "Low");
        assert_eq!(analysis.risk_summary.abnormal_count, 1);
        assert_eq!(analysis.risk_summary.overall_risk, RiskLevel::Moderate);
        assert_eq!(analysis.risk_summary.severity_banner_color, BannerColor::Yellow);
        assert_eq!(analysis.risk_summary.banner_message, "MINOR DEVIATIONS FOUND");
    }

    #[test]
    fn creatinine_scenario() {
        let analysis = analyzer().analyze(&[TestResult::new("Creatinine", "2.8")], None);
        assert_eq!(analysis.tests[0].status, "High");
        assert_eq!(analysis.risk_summary.overall_risk, RiskLevel::High);
        assert_eq!(analysis.risk_summary.severity_banner_color, BannerColor::Red);
        assert_eq!(analysis.risk_summary.banner_message, "CRITICAL MARKERS DETECTED");
        assert_eq!(analysis.risk_summary.recommended_specialist, "Nephrologist");
    }

    #[test]
    fn empty_scenario() {
        let analysis = analyzer().analyze(&[], Some(Sex::Female));
        assert!(analysis.tests.is_empty());
        assert_eq!(analysis.risk_summary.overall_risk, RiskLevel::Low);
        assert_eq!(analysis.risk_summary.banner_message, "OPTIMAL HEALTH PROFILE");
        assert_eq!(analysis.risk_summary.abnormal_count, 0);
    }

    #[test]
    fn output_preserves_input_order_and_fields() {
        let input = vec![
            TestResult::new("WBC", "pending").with_unit("x10^9/L"),
            TestResult::new("Vitamin K2", "40").with_status("Optimal"),
            TestResult::new("Hemoglobin", 14.7),
        ];
        let analysis = analyzer().analyze(&input, None);
        let statuses: Vec<LabStatus> = analysis.tests.iter().map(|t| t.classification).collect();
        assert_eq!(
            statuses,
            vec![LabStatus::InvalidData, LabStatus::NotClassified, LabStatus::Normal]
        );
        for (out, inp) in analysis.tests.iter().zip(&input) {
            assert_eq!(out.name, inp.name);
            assert_eq!(out.value, inp.value);
        }
        assert_eq!(analysis.tests[1].status, "Optimal");
        assert_eq!(analysis.risk_summary.abnormal_count, 0);
    }

    #[test]
    fn missing_sex_uses_male_bands() {
        let tests = [TestResult::new("Hemoglobin", "12.5")];
        let a = analyzer();
        assert_eq!(a.analyze(&tests, None), a.analyze(&tests, Some(Sex::Male)));
        assert_ne!(
            a.analyze(&tests, None).tests[0].classification,
            a.analyze(&tests, Some(Sex::Female)).tests[0].classification
        );
    }

    #[test]
    fn injected_catalog_is_used() {
        let analyzer = DefaultLabAnalyzer::new(
            ReferenceCatalog::load_test(),
            UnitConverter::builtin(),
            SeverityPolicy::default(),
        );
        // The test catalog has no platelet entry.
        let analysis = analyzer.analyze(&[TestResult::new("Platelet Count", "250")], None);
        assert_eq!(analysis.tests[0].classification, LabStatus::NotClassified);
        assert_eq!(analyzer.catalog().len(), 5);
    }

    #[test]
    fn analysis_serializes_to_contract() {
        let analysis = analyzer().analyze(&[TestResult::new("Creatinine", "2.8")], None);
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["riskSummary"]["overallRisk"], "High");
        assert_eq!(json["riskSummary"]["severityBannerColor"], "red");
        assert_eq!(json["tests"][0]["status"], "High");
        assert_eq!(json["tests"][0]["abnormal"], true);
    }
}
