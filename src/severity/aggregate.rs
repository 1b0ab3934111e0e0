use crate::models::enums::{BannerColor, RiskLevel};
use crate::models::AnnotatedTest;

use super::messages::BannerMessages;
use super::policy::SeverityPolicy;
use super::types::RiskSummary;

/// Reduce annotated tests into one verdict.
///
/// Precedence: any severe flag, then the multiple-abnormal threshold, then
/// any abnormal result, then optimal.
pub fn aggregate(tests: &[AnnotatedTest], policy: &SeverityPolicy) -> RiskSummary {
    let abnormal: Vec<&AnnotatedTest> = tests.iter().filter(|t| t.abnormal).collect();
    let abnormal_count = abnormal.len();

    let severe_flags: Vec<String> = abnormal
        .iter()
        .filter(|t| policy.is_severe_marker(&t.name))
        .map(|t| t.name.clone())
        .collect();

    let recommended_specialist = abnormal
        .iter()
        .find_map(|t| t.specialist.clone())
        .unwrap_or_else(|| policy.default_specialist.clone());

    let (overall_risk, severity_banner_color, banner_message) = if !severe_flags.is_empty() {
        (RiskLevel::High, BannerColor::Red, BannerMessages::CRITICAL_MARKERS)
    } else if abnormal_count >= policy.multiple_abnormal_threshold {
        (
            RiskLevel::Moderate,
            BannerColor::Yellow,
            BannerMessages::MULTIPLE_ABNORMALITIES,
        )
    } else if abnormal_count > 0 {
        (RiskLevel::Moderate, BannerColor::Yellow, BannerMessages::MINOR_DEVIATIONS)
    } else {
        (RiskLevel::Low, BannerColor::Green, BannerMessages::OPTIMAL_PROFILE)
    };

    RiskSummary {
        overall_risk,
        banner_message: banner_message.to_string(),
        severity_banner_color,
        recommended_specialist,
        abnormal_count,
        severe_flags,
    }
}
