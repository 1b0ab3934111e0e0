use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::severity::{
    CatalogError, DefaultLabAnalyzer, ReferenceCatalog, SeverityPolicy, UnitConverter,
};

/// Application-level constants
pub const APP_NAME: &str = "Lab-Lens";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// JSON catalog replacing the bundled one.
pub const CATALOG_ENV: &str = "LABLENS_CATALOG";
/// JSON policy document; any subset of fields, the rest keep their defaults.
pub const POLICY_ENV: &str = "LABLENS_POLICY";

/// Filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "lablens=info,lablens_lib=info,warn"
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Policy load failed ({0}): {1}")]
    PolicyLoad(String, String),

    #[error("Policy parse failed ({0}): {1}")]
    PolicyParse(String, String),

    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Catalog override path from the environment, if set.
pub fn catalog_path() -> Option<PathBuf> {
    env_path(CATALOG_ENV)
}

/// Policy override path from the environment, if set.
pub fn policy_path() -> Option<PathBuf> {
    env_path(POLICY_ENV)
}

/// The catalog at `path`, or the bundled one.
pub fn load_catalog(path: Option<&Path>) -> Result<ReferenceCatalog, ConfigError> {
    match path {
        Some(path) => Ok(ReferenceCatalog::load(path)?),
        None => Ok(ReferenceCatalog::builtin()),
    }
}

/// The policy at `path`, or the defaults.
pub fn load_policy(path: Option<&Path>) -> Result<SeverityPolicy, ConfigError> {
    let Some(path) = path else {
        return Ok(SeverityPolicy::default());
    };
    let json = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::PolicyLoad(path.display().to_string(), e.to_string()))?;
    let mut policy: SeverityPolicy = serde_json::from_str(&json)
        .map_err(|e| ConfigError::PolicyParse(path.display().to_string(), e.to_string()))?;
    validate_policy(&policy)?;
    policy.normalize_lists();
    tracing::info!(path = %path.display(), "Loaded severity policy");
    Ok(policy)
}

fn validate_policy(policy: &SeverityPolicy) -> Result<(), ConfigError> {
    if !(0.0..0.5).contains(&policy.borderline_margin) {
        return Err(ConfigError::InvalidPolicy(format!(
            "borderline_margin must be in [0, 0.5), got {}",
            policy.borderline_margin
        )));
    }
    if policy.magnitude_ratio <= 0.0 || policy.magnitude_divisor <= 0.0 {
        return Err(ConfigError::InvalidPolicy(
            "magnitude_ratio and magnitude_divisor must be positive".into(),
        ));
    }
    if policy.multiple_abnormal_threshold < 1 {
        return Err(ConfigError::InvalidPolicy(
            "multiple_abnormal_threshold must be at least 1".into(),
        ));
    }
    if !(policy.qualitative_cutoff.is_finite() && policy.qualitative_cutoff > 0.0) {
        return Err(ConfigError::InvalidPolicy("qualitative_cutoff must be positive".into()));
    }
    if !policy.permissive_band.is_valid() {
        return Err(ConfigError::InvalidPolicy("permissive_band must satisfy low < high".into()));
    }
    Ok(())
}

/// Analyzer built from the environment overrides.
pub fn analyzer_from_env() -> Result<DefaultLabAnalyzer, ConfigError> {
    let catalog = load_catalog(catalog_path().as_deref())?;
    let policy = load_policy(policy_path().as_deref())?;
    tracing::debug!(entries = catalog.len(), match_policy = ?policy.match_policy, "Analyzer configured");
    Ok(DefaultLabAnalyzer::new(catalog, UnitConverter::builtin(), policy))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::severity::MatchPolicy;

    #[test]
    fn app_name_is_lablens() {
        assert_eq!(APP_NAME, "Lab-Lens");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn defaults_without_paths() {
        assert_eq!(load_policy(None).unwrap(), SeverityPolicy::default());
        assert_eq!(load_catalog(None).unwrap().len(), ReferenceCatalog::builtin().len());
    }

    #[test]
    fn partial_policy_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"match_policy": "first_in_order", "severe_markers": ["troponin"]}}"#)
            .unwrap();
        let policy = load_policy(Some(file.path())).unwrap();
        assert_eq!(policy.match_policy, MatchPolicy::FirstInOrder);
        assert_eq!(policy.severe_markers, vec!["troponin".to_string()]);
        assert_eq!(policy.multiple_abnormal_threshold, 3);
    }

    #[test]
    fn out_of_range_margin_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"borderline_margin": 0.75}}"#).unwrap();
        let err = load_policy(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPolicy(_)));
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"multiple_abnormal_threshold": 0}}"#).unwrap();
        let err = load_policy(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPolicy(_)));
    }

    #[test]
    fn zero_qualitative_cutoff_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"qualitative_cutoff": 0}}"#).unwrap();
        assert!(matches!(
            load_policy(Some(file.path())).unwrap_err(),
            ConfigError::InvalidPolicy(_)
        ));
    }

    #[test]
    fn policy_lists_are_lowercased_on_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"severe_markers": ["CRP", "Troponin"], "normal_statuses": ["Normal", "WNL"]}}"#
        )
        .unwrap();
        let policy = load_policy(Some(file.path())).unwrap();
        assert_eq!(policy.severe_markers, vec!["crp".to_string(), "troponin".to_string()]);
        assert!(policy.is_severe_marker("hs-CRP"));
        assert!(policy.is_normal_status("wnl"));
    }

    #[test]
    fn missing_files_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("absent.json");
        assert!(matches!(
            load_policy(Some(absent.as_path())).unwrap_err(),
            ConfigError::PolicyLoad(..)
        ));
        assert!(matches!(
            load_catalog(Some(absent.as_path())).unwrap_err(),
            ConfigError::Catalog(CatalogError::ReferenceDataLoad(..))
        ));
    }

    #[test]
    fn malformed_policy_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"borderline_margin": "wide"}}"#).unwrap();
        assert!(matches!(
            load_policy(Some(file.path())).unwrap_err(),
            ConfigError::PolicyParse(..)
        ));
    }
}
