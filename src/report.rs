//! Final report assembly.
//!
//! Joins the extractor's narrative fields with the engine's classification
//! and produces the document handed to presentation and storage.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::intake::{ExtractedReport, PatientInfo};
use crate::models::enums::{BannerColor, RiskLevel, RiskSource, Urgency};
use crate::models::AnnotatedTest;
use crate::severity::{BannerMessages, LabAnalyzer, ReportMessages, RiskSummary};

/// Caller choices for one report build.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Let the extractor's `overall_risk` replace the engine verdict.
    pub trust_model_risk: bool,
    /// Original upload name, echoed into the report.
    pub filename: Option<String>,
    /// Specialist used by the safety fallback.
    pub fallback_specialist: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            trust_model_risk: true,
            filename: None,
            fallback_specialist: "General Physician".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedReport {
    pub id: Uuid,
    /// Same value as `id`; both keys are read by clients.
    pub report_id: Uuid,
    pub patient: PatientInfo,
    pub tests: Vec<AnnotatedTest>,
    pub risk_summary: RiskSummary,
    pub risk_source: RiskSource,
    pub recommended_specialist: String,
    pub summary: String,
    pub lifestyle: Vec<String>,
    pub urgency: Urgency,
    pub report_type: String,
    pub disclaimer: String,
    pub created_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Extractor rows dropped before analysis.
    #[serde(default)]
    pub skipped_rows: usize,
}

/// Analyze the extracted tests and assemble the final report.
pub fn build_report(
    extracted: ExtractedReport,
    analyzer: &impl LabAnalyzer,
    options: &ReportOptions,
) -> AnalyzedReport {
    let extracted = if extracted.tests.is_empty() {
        tracing::warn!("No tests extracted, using neutral fallback report");
        safety_fallback(extracted, options)
    } else {
        extracted
    };

    let analysis = analyzer.analyze(&extracted.tests, extracted.patient.sex());
    let mut risk_summary = analysis.risk_summary;

    let risk_source = match extracted.overall_risk.as_deref() {
        Some(model_risk) if options.trust_model_risk => {
            apply_model_risk(&mut risk_summary, model_risk);
            RiskSource::Model
        }
        _ => RiskSource::Engine,
    };

    let recommended_specialist = extracted
        .specialist
        .clone()
        .unwrap_or_else(|| risk_summary.recommended_specialist.clone());

    let summary = extracted.summary.clone().unwrap_or_else(|| {
        ReportMessages::engine_summary(
            risk_summary.abnormal_count,
            analysis.tests.len(),
            &risk_summary.recommended_specialist,
        )
    });

    let id = Uuid::new_v4();
    tracing::info!(
        report_id = %id,
        risk = risk_summary.overall_risk.as_str(),
        source = risk_source.as_str(),
        tests = analysis.tests.len(),
        "Report assembled"
    );

    AnalyzedReport {
        id,
        report_id: id,
        patient: extracted.patient,
        tests: analysis.tests,
        risk_summary,
        risk_source,
        recommended_specialist,
        summary,
        lifestyle: extracted.lifestyle,
        urgency: extracted.urgency.unwrap_or(Urgency::Routine),
        report_type: extracted
            .report_type
            .unwrap_or_else(|| ReportMessages::DEFAULT_REPORT_TYPE.to_string()),
        disclaimer: ReportMessages::DISCLAIMER.to_string(),
        created_at: chrono::Local::now().naive_local(),
        filename: options.filename.clone(),
        skipped_rows: extracted.skipped_rows,
    }
}

/// Neutral report for responses with no usable tests. Patient details are kept.
fn safety_fallback(extracted: ExtractedReport, options: &ReportOptions) -> ExtractedReport {
    ExtractedReport {
        report_type: Some(ReportMessages::FALLBACK_REPORT_TYPE.to_string()),
        overall_risk: Some(RiskLevel::Low.as_str().to_string()),
        summary: Some(ReportMessages::FALLBACK_SUMMARY.to_string()),
        tests: vec![],
        lifestyle: ReportMessages::fallback_lifestyle(),
        specialist: Some(options.fallback_specialist.clone()),
        urgency: Some(Urgency::Routine),
        ..extracted
    }
}

/// Replace the engine's level and banner with the extractor's risk call.
fn apply_model_risk(summary: &mut RiskSummary, model_risk: &str) {
    let (level, color, message) = if model_risk.contains("High") {
        (RiskLevel::High, BannerColor::Red, BannerMessages::CRITICAL_FINDINGS)
    } else if model_risk.contains("Moderate") {
        (
            RiskLevel::Moderate,
            BannerColor::Yellow,
            BannerMessages::MODERATE_DEVIATIONS,
        )
    } else {
        (RiskLevel::Low, BannerColor::Green, BannerMessages::OPTIMAL_PROFILE)
    };
    if level != summary.overall_risk {
        tracing::debug!(
            engine = summary.overall_risk.as_str(),
            model = level.as_str(),
            "Extractor risk overrides engine verdict"
        );
    }
    summary.overall_risk = level;
    summary.severity_banner_color = color;
    summary.banner_message = message.to_string();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::parse_model_response;
    use crate::models::enums::{LabStatus, Sex};
    use crate::models::TestResult;
    use crate::severity::DefaultLabAnalyzer;

    fn extracted(tests: Vec<TestResult>) -> ExtractedReport {
        ExtractedReport {
            tests,
            ..ExtractedReport::default()
        }
    }

    #[test]
    fn engine_verdict_without_model_risk() {
        let report = build_report(
            extracted(vec![TestResult::new("Creatinine", "2.8")]),
            &DefaultLabAnalyzer::default(),
            &ReportOptions::default(),
        );
        assert_eq!(report.risk_source, RiskSource::Engine);
        assert_eq!(report.risk_summary.overall_risk, RiskLevel::High);
        assert_eq!(report.risk_summary.banner_message, "CRITICAL MARKERS DETECTED");
        assert_eq!(report.recommended_specialist, "Nephrologist");
        assert_eq!(report.id, report.report_id);
        assert_eq!(report.urgency, Urgency::Routine);
        assert_eq!(report.report_type, "Medical Report");
        assert_eq!(report.disclaimer, "This is not a medical diagnosis. Consult a doctor.");
        assert!(report.summary.contains("1 of 1"));
    }

    #[test]
    fn model_risk_overrides_banner() {
        let mut input = extracted(vec![TestResult::new("Hemoglobin", "8.0")]);
        input.overall_risk = Some("High".into());
        let report = build_report(input, &DefaultLabAnalyzer::default(), &ReportOptions::default());
        assert_eq!(report.risk_source, RiskSource::Model);
        assert_eq!(report.risk_summary.overall_risk, RiskLevel::High);
        assert_eq!(report.risk_summary.severity_banner_color, BannerColor::Red);
        assert_eq!(report.risk_summary.banner_message, "CRITICAL FINDINGS DETECTED");
        // Counts and per-test results stay the engine's.
        assert_eq!(report.risk_summary.abnormal_count, 1);
        assert_eq!(report.tests[0].classification, LabStatus::Low);
    }

    #[test]
    fn model_risk_wording() {
        let mut summary = DefaultLabAnalyzer::default().analyze(&[], None).risk_summary;
        apply_model_risk(&mut summary, "Moderate to High");
        assert_eq!(summary.overall_risk, RiskLevel::High);
        apply_model_risk(&mut summary, "Moderate");
        assert_eq!(summary.banner_message, "MODERATE DEVIATIONS DETECTED");
        assert_eq!(summary.severity_banner_color, BannerColor::Yellow);
        apply_model_risk(&mut summary, "low");
        assert_eq!(summary.overall_risk, RiskLevel::Low);
        assert_eq!(summary.banner_message, "OPTIMAL HEALTH PROFILE");
    }

    #[test]
    fn model_risk_ignored_when_untrusted() {
        let mut input = extracted(vec![TestResult::new("Creatinine", "2.8")]);
        input.overall_risk = Some("Low".into());
        let options = ReportOptions {
            trust_model_risk: false,
            ..ReportOptions::default()
        };
        let report = build_report(input, &DefaultLabAnalyzer::default(), &options);
        assert_eq!(report.risk_source, RiskSource::Engine);
        assert_eq!(report.risk_summary.overall_risk, RiskLevel::High);
    }

    #[test]
    fn model_specialist_wins() {
        let mut input = extracted(vec![TestResult::new("Creatinine", "2.8")]);
        input.specialist = Some("Urologist".into());
        let report = build_report(input, &DefaultLabAnalyzer::default(), &ReportOptions::default());
        assert_eq!(report.recommended_specialist, "Urologist");
        assert_eq!(report.risk_summary.recommended_specialist, "Nephrologist");
    }

    #[test]
    fn empty_tests_use_safety_fallback() {
        let mut input = extracted(vec![]);
        input.patient.name = Some("R. Sharma".into());
        input.overall_risk = Some("High".into());
        let report = build_report(input, &DefaultLabAnalyzer::default(), &ReportOptions::default());
        assert_eq!(report.report_type, "Report Analysis Unavailable");
        assert_eq!(report.risk_summary.overall_risk, RiskLevel::Low);
        assert_eq!(report.risk_summary.severity_banner_color, BannerColor::Green);
        assert_eq!(report.recommended_specialist, "General Physician");
        assert_eq!(report.lifestyle.len(), 2);
        assert_eq!(report.patient.name.as_deref(), Some("R. Sharma"));
        assert!(report.tests.is_empty());
    }

    #[test]
    fn patient_sex_selects_bands() {
        let mut input = extracted(vec![TestResult::new("Hemoglobin", "12.5")]);
        input.patient.sex = Some("female".into());
        let report = build_report(input, &DefaultLabAnalyzer::default(), &ReportOptions::default());
        assert_eq!(report.tests[0].classification, LabStatus::Borderline);
        assert_eq!(Sex::from_report("female"), Some(Sex::Female));
    }

    #[test]
    fn end_to_end_from_response() {
        let response = r#"```json
{"valid_data": true, "report_type": "Kidney Function Test",
 "patient_info": {"name": "K. Iyer", "age": 61, "sex": "M"},
 "summary": "Your results show an elevated kidney marker.",
 "tests": [{"name": "Serum Creatinine", "value": "2.8", "unit": "mg/dL"},
           {"name": "Urea", "value": "30", "unit": "mg/dL"}, {"bad": 1}],
 "urgency": "urgent"}
```"#;
        let options = ReportOptions {
            filename: Some("kft.png".into()),
            ..ReportOptions::default()
        };
        let report = build_report(
            parse_model_response(response).unwrap(),
            &DefaultLabAnalyzer::default(),
            &options,
        );
        assert_eq!(report.skipped_rows, 1);
        assert_eq!(report.urgency, Urgency::Urgent);
        assert_eq!(report.risk_summary.severe_flags, vec!["Serum Creatinine".to_string()]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["reportType"], "Kidney Function Test");
        assert_eq!(json["riskSummary"]["bannerMessage"], "CRITICAL MARKERS DETECTED");
        assert_eq!(json["riskSource"], "engine");
        assert_eq!(json["patient"]["age"], "61");
        assert_eq!(json["filename"], "kft.png");
        assert_eq!(json["id"], json["reportId"]);
        assert!(json["createdAt"].is_string());
    }
}
