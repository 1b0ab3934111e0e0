use std::io::Read;
use std::path::PathBuf;

use clap::Parser;

use crate::config;
use crate::intake::parse_model_response;
use crate::report::{build_report, ReportOptions};
use crate::severity::{DefaultLabAnalyzer, UnitConverter};
use crate::AppError;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "lablens",
    version,
    about = "Classify extracted lab results against reference ranges and rate overall risk"
)]
pub struct Cli {
    /// Extractor response to analyze (fenced or bare JSON). Reads stdin when omitted.
    pub input: Option<PathBuf>,

    /// Reference catalog JSON; overrides LABLENS_CATALOG.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Severity policy JSON; overrides LABLENS_POLICY.
    #[arg(long)]
    pub policy: Option<PathBuf>,

    /// Keep the engine verdict even when the extractor supplies its own risk.
    #[arg(long, default_value_t = false)]
    pub engine_risk: bool,

    /// Original file name to record in the report.
    #[arg(long)]
    pub filename: Option<String>,

    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

impl Cli {
    fn analyzer(&self) -> Result<DefaultLabAnalyzer, AppError> {
        if self.catalog.is_none() && self.policy.is_none() {
            return Ok(config::analyzer_from_env()?);
        }
        let catalog_path = self.catalog.clone().or_else(config::catalog_path);
        let policy_path = self.policy.clone().or_else(config::policy_path);
        let catalog = config::load_catalog(catalog_path.as_deref())?;
        let policy = config::load_policy(policy_path.as_deref())?;
        Ok(DefaultLabAnalyzer::new(catalog, UnitConverter::builtin(), policy))
    }

    fn read_input(&self) -> Result<String, AppError> {
        match &self.input {
            Some(path) => std::fs::read_to_string(path)
                .map_err(|e| AppError::Input(path.display().to_string(), e.to_string())),
            None => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .map_err(|e| AppError::Input("stdin".into(), e.to_string()))?;
                Ok(buf)
            }
        }
    }

    fn options(&self) -> ReportOptions {
        let filename = self.filename.clone().or_else(|| {
            self.input
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
        });
        ReportOptions {
            trust_model_risk: !self.engine_risk,
            filename,
            ..ReportOptions::default()
        }
    }
}

/// Analyze one extractor response and render the report as JSON.
pub fn execute(cli: &Cli) -> Result<String, AppError> {
    let analyzer = cli.analyzer()?;
    let response = cli.read_input()?;
    let extracted = parse_model_response(&response)?;
    let report = build_report(extracted, &analyzer, &cli.options());

    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .map_err(|e| AppError::Output(e.to_string()))?;
    Ok(json)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn cli_for(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("lablens").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn parses_flags() {
        let cli = cli_for(&["report.json", "--engine-risk", "--pretty", "--filename", "cbc.jpg"]);
        assert_eq!(cli.input, Some(PathBuf::from("report.json")));
        assert!(cli.engine_risk);
        assert!(cli.pretty);
        assert_eq!(cli.options().filename.as_deref(), Some("cbc.jpg"));
        assert!(!cli.options().trust_model_risk);
    }

    #[test]
    fn filename_defaults_to_input_name() {
        let cli = cli_for(&["/tmp/reports/cbc.txt"]);
        assert_eq!(cli.options().filename.as_deref(), Some("cbc.txt"));
        assert!(cli.options().trust_model_risk);
    }

    #[test]
    fn execute_renders_report() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("response.txt");
        let mut file = std::fs::File::create(&input).unwrap();
        write!(
            file,
            "```json\n{{\"overall_risk\": \"Low\", \"tests\": [{{\"name\": \"Hemoglobin\", \"value\": \"8.0\"}}]}}\n```"
        )
        .unwrap();

        let cli = cli_for(&[input.to_str().unwrap(), "--engine-risk"]);
        let json: serde_json::Value = serde_json::from_str(&execute(&cli).unwrap()).unwrap();
        assert_eq!(json["riskSummary"]["bannerMessage"], "MINOR DEVIATIONS FOUND");
        assert_eq!(json["tests"][0]["status"], "Low");
        assert_eq!(json["filename"], "response.txt");
    }

    #[test]
    fn execute_uses_catalog_flag() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join("catalog.json");
        std::fs::write(
            &catalog,
            r#"[{"fragment": "ferritin", "M": [24, 336], "F": [11, 307], "unit": "ng/mL",
                "category": "Hematology", "specialist": "Hematologist", "priority": "Medium"}]"#,
        )
        .unwrap();
        let input = dir.path().join("response.json");
        std::fs::write(&input, r#"{"tests": [{"name": "Serum Ferritin", "value": "400"}]}"#).unwrap();

        let cli = cli_for(&[input.to_str().unwrap(), "--catalog", catalog.to_str().unwrap()]);
        let json: serde_json::Value = serde_json::from_str(&execute(&cli).unwrap()).unwrap();
        assert_eq!(json["tests"][0]["status"], "High");
        assert_eq!(json["recommendedSpecialist"], "Hematologist");
    }

    #[test]
    fn missing_input_file_is_error() {
        let cli = cli_for(&["/nonexistent/lablens/response.json"]);
        assert!(matches!(execute(&cli).unwrap_err(), AppError::Input(..)));
    }

    #[test]
    fn rejected_response_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("response.json");
        std::fs::write(&input, r#"{"valid_data": false}"#).unwrap();
        let cli = cli_for(&[input.to_str().unwrap()]);
        assert!(matches!(execute(&cli).unwrap_err(), AppError::Intake(_)));
    }
}
