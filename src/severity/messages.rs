/// Fixed banner wording shown above an analyzed report.
/// Messages stay short and uppercase so the UI can render them verbatim.
pub struct BannerMessages;

impl BannerMessages {
    /// A severe marker is out of range.
    pub const CRITICAL_MARKERS: &'static str = "CRITICAL MARKERS DETECTED";
    /// Three or more abnormal results, none severe.
    pub const MULTIPLE_ABNORMALITIES: &'static str = "MULTIPLE ABNORMALITIES DETECTED";
    pub const MINOR_DEVIATIONS: &'static str = "MINOR DEVIATIONS FOUND";
    pub const OPTIMAL_PROFILE: &'static str = "OPTIMAL HEALTH PROFILE";

    // Used when the extractor's own risk call replaces the engine verdict.
    pub const CRITICAL_FINDINGS: &'static str = "CRITICAL FINDINGS DETECTED";
    pub const MODERATE_DEVIATIONS: &'static str = "MODERATE DEVIATIONS DETECTED";
}

/// Report-level wording outside the banner.
pub struct ReportMessages;

impl ReportMessages {
    pub const DISCLAIMER: &'static str = "This is not a medical diagnosis. Consult a doctor.";

    pub const FALLBACK_REPORT_TYPE: &'static str = "Report Analysis Unavailable";

    pub const FALLBACK_SUMMARY: &'static str = "We were able to process your file, but could not \
        produce a confident clinical summary for this format. Please review the raw values with a \
        healthcare professional.";

    pub const DEFAULT_REPORT_TYPE: &'static str = "Medical Report";

    pub fn fallback_lifestyle() -> Vec<String> {
        vec![
            "Ask your doctor to help interpret these results.".to_string(),
            "Maintain a regular health check-up schedule.".to_string(),
        ]
    }

    /// One-line summary of the engine verdict, used when the extractor gave none.
    pub fn engine_summary(abnormal_count: usize, total: usize, specialist: &str) -> String {
        match abnormal_count {
            0 => format!("All {} reported values are within their reference ranges.", total),
            1 => format!(
                "1 of {} reported values is outside its reference range. \
                 A {} can review it with you.",
                total, specialist,
            ),
            n => format!(
                "{} of {} reported values are outside their reference ranges. \
                 A {} can review them with you.",
                n, total, specialist,
            ),
        }
    }
}
