use serde::Deserialize;

use crate::models::enums::Urgency;
use crate::models::TestResult;

use super::types::{ExtractedReport, PatientInfo};
use super::IntakeError;

/// Parse the extractor's response into a report ready for analysis.
pub fn parse_model_response(response: &str) -> Result<ExtractedReport, IntakeError> {
    let candidate = strip_code_fence(response);
    let root = parse_json_object(candidate)?;

    if root.get("valid_data").and_then(|v| v.as_bool()) == Some(false) {
        return Err(IntakeError::NotLabReport);
    }

    let text = |key: &str| {
        root.get(key)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    };

    let (tests, skipped_rows) =
        parse_array_lenient::<TestResult>(root.get("tests").and_then(|v| v.as_array()));
    if skipped_rows > 0 {
        tracing::warn!(skipped = skipped_rows, kept = tests.len(), "Skipped unreadable test rows");
    }

    let urgency = text("urgency").and_then(|u| match u.parse::<Urgency>() {
        Ok(urgency) => Some(urgency),
        Err(_) => {
            tracing::warn!(urgency = %u, "Unknown urgency");
            None
        }
    });

    let lifestyle: Vec<String> = root
        .get("lifestyle")
        .and_then(|v| v.as_array())
        .map(|tips| {
            tips.iter()
                .filter_map(|t| t.as_str())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    Ok(ExtractedReport {
        report_type: text("report_type"),
        patient: root
            .get("patient_info")
            .map(PatientInfo::from_value)
            .unwrap_or_default(),
        overall_risk: text("overall_risk"),
        summary: text("summary"),
        tests,
        skipped_rows,
        lifestyle,
        specialist: text("specialist"),
        urgency,
    })
}

/// Body of a ```json fence, else of a bare ``` fence, else the whole response.
/// An unclosed fence runs to the end of the text.
fn strip_code_fence(response: &str) -> &str {
    let body_start = if let Some(pos) = response.find("```json") {
        pos + "```json".len()
    } else if let Some(pos) = response.find("```") {
        pos + "```".len()
    } else {
        return response.trim();
    };
    let body = &response[body_start..];
    let end = body.find("```").unwrap_or(body.len());
    body[..end].trim()
}

/// Parse `text` as a JSON object, retrying on the outermost `{...}` span.
fn parse_json_object(text: &str) -> Result<serde_json::Map<String, serde_json::Value>, IntakeError> {
    let parsed = match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) => value,
        Err(first) => {
            let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
                return Err(IntakeError::NoJson);
            };
            if end < start {
                return Err(IntakeError::NoJson);
            }
            tracing::debug!(error = %first, "Retrying on outermost braces");
            serde_json::from_str(&text[start..=end])
                .map_err(|e| IntakeError::JsonParsing(e.to_string()))?
        }
    };
    match parsed {
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(IntakeError::JsonParsing("expected a JSON object".into())),
    }
}

/// Parse an array leniently: skip items that fail to deserialize and count them.
fn parse_array_lenient<T: for<'de> Deserialize<'de>>(
    items: Option<&Vec<serde_json::Value>>,
) -> (Vec<T>, usize) {
    let Some(arr) = items else {
        return (vec![], 0);
    };
    let parsed: Vec<T> = arr
        .iter()
        .filter_map(|v| serde_json::from_value(v.clone()).ok())
        .collect();
    let skipped = arr.len() - parsed.len();
    (parsed, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::Sex;
    use crate::models::TestValue;

    fn sample_response() -> String {
        r#"Here is the analysis:

```json
{
  "valid_data": true,
  "report_type": "Complete Blood Count",
  "patient_info": {"name": "R. Sharma", "age": "34", "sex": "M", "date": "2024-03-02"},
  "overall_risk": "Moderate",
  "summary": "Your results show a reduced oxygen-carrying marker.",
  "tests": [
    {"name": "Hemoglobin", "value": "8.0", "unit": "g/dL", "ref_range": "13-17", "status": "Low"},
    {"name": "WBC", "value": 9600, "unit": "/uL", "ref_range": "4000-11000", "status": "Normal"},
    {"name": "Platelet Count", "value": "2.48 lakhs", "unit": "", "ref_range": "1.5-4.5 lakhs"}
  ],
  "lifestyle": ["Include iron-rich foods.", "Stay hydrated."],
  "specialist": "Hematologist",
  "urgency": "follow-up"
}
```
"#
        .to_string()
    }

    #[test]
    fn parse_full_response() {
        let report = parse_model_response(&sample_response()).unwrap();
        assert_eq!(report.report_type.as_deref(), Some("Complete Blood Count"));
        assert_eq!(report.patient.sex(), Some(Sex::Male));
        assert_eq!(report.overall_risk.as_deref(), Some("Moderate"));
        assert_eq!(report.tests.len(), 3);
        assert_eq!(report.tests[1].value, Some(TestValue::Number(9600.0)));
        assert_eq!(report.tests[0].ref_range.as_deref(), Some("13-17"));
        assert_eq!(report.lifestyle.len(), 2);
        assert_eq!(report.specialist.as_deref(), Some("Hematologist"));
        assert_eq!(report.urgency, Some(Urgency::FollowUp));
        assert_eq!(report.skipped_rows, 0);
    }

    #[test]
    fn bare_fence_is_accepted() {
        let response = "```\n{\"tests\": [{\"name\": \"ESR\", \"value\": \"12\"}]}\n```";
        let report = parse_model_response(response).unwrap();
        assert_eq!(report.tests.len(), 1);
    }

    #[test]
    fn unfenced_json_with_prose_uses_braces() {
        let response = "Sure! {\"summary\": \"ok\", \"tests\": []} Hope this helps.";
        let report = parse_model_response(response).unwrap();
        assert_eq!(report.summary.as_deref(), Some("ok"));
        assert!(report.tests.is_empty());
    }

    #[test]
    fn plain_json_parses_directly() {
        let report = parse_model_response(r#"{"tests": [{"name": "TSH", "value": 2.1}]}"#).unwrap();
        assert_eq!(report.tests[0].name, "TSH");
        assert!(report.patient.sex().is_none());
    }

    #[test]
    fn invalid_data_is_rejected() {
        let err = parse_model_response(r#"{"valid_data": false, "tests": []}"#).unwrap_err();
        assert!(matches!(err, IntakeError::NotLabReport));
    }

    #[test]
    fn no_json_is_error() {
        assert!(matches!(
            parse_model_response("I could not read this image.").unwrap_err(),
            IntakeError::NoJson
        ));
        assert!(matches!(
            parse_model_response("oops { not json }").unwrap_err(),
            IntakeError::JsonParsing(_)
        ));
        assert!(matches!(
            parse_model_response("[1, 2, 3]").unwrap_err(),
            IntakeError::JsonParsing(_)
        ));
    }

    #[test]
    fn malformed_rows_are_skipped_and_counted() {
        let response = r#"{"tests": [
            {"name": "Hemoglobin", "value": "8.0"},
            {"value": "12"},
            {"name": null, "value": "1"},
            {"name": "ALT", "value": {"nested": true}},
            {"name": "AST"}
        ]}"#;
        let report = parse_model_response(response).unwrap();
        let names: Vec<&str> = report.tests.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Hemoglobin", "AST"]);
        assert_eq!(report.skipped_rows, 3);
        assert!(report.tests[1].value.is_none());
    }

    #[test]
    fn unknown_urgency_and_blank_fields_are_dropped() {
        let response = r#"{"urgency": "asap", "specialist": "  ", "tests": []}"#;
        let report = parse_model_response(response).unwrap();
        assert!(report.urgency.is_none());
        assert!(report.specialist.is_none());
    }
}
