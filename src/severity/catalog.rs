use std::collections::HashSet;
use std::path::Path;

use crate::models::enums::Sex;

use super::builtin::builtin_entries;
use super::helpers::contains_on_boundary;
use super::policy::MatchPolicy;
use super::types::{CatalogError, ReferenceEntry};

/// Immutable reference catalog. Entry order is significant: it breaks ties
/// under `MatchPolicy::Ranked` and decides outright under `FirstInOrder`.
#[derive(Debug, Clone)]
pub struct ReferenceCatalog {
    entries: Vec<ReferenceEntry>,
}

impl ReferenceCatalog {
    /// The bundled catalog. Its validity is covered by `builtin_catalog_is_valid`.
    pub fn builtin() -> Self {
        Self {
            entries: builtin_entries(),
        }
    }

    /// Build a catalog from entries, rejecting malformed ones.
    pub fn from_entries(entries: Vec<ReferenceEntry>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            validate_entry(entry)?;
            if !seen.insert(entry.fragment.as_str()) {
                return Err(CatalogError::DuplicateFragment(entry.fragment.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// Parse a JSON array of entries.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<ReferenceEntry> = serde_json::from_str(json)
            .map_err(|e| CatalogError::ReferenceDataParse("catalog".into(), e.to_string()))?;
        Self::from_entries(entries)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            CatalogError::ReferenceDataLoad(path.display().to_string(), e.to_string())
        })?;
        let catalog = Self::from_json_str(&json).map_err(|e| match e {
            CatalogError::ReferenceDataParse(_, msg) => {
                CatalogError::ReferenceDataParse(path.display().to_string(), msg)
            }
            other => other,
        })?;
        tracing::info!(path = %path.display(), entries = catalog.len(), "Loaded reference catalog");
        Ok(catalog)
    }

    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the entry for an already-normalized test name.
    pub fn resolve(
        &self,
        normalized_name: &str,
        policy: MatchPolicy,
        short_fragment_len: usize,
    ) -> Option<&ReferenceEntry> {
        match policy {
            MatchPolicy::FirstInOrder => self
                .entries
                .iter()
                .find(|e| normalized_name.contains(e.fragment.as_str())),
            MatchPolicy::Ranked => {
                let mut best: Option<&ReferenceEntry> = None;
                for entry in &self.entries {
                    let fragment = entry.fragment.as_str();
                    let hit = if fragment.len() <= short_fragment_len {
                        contains_on_boundary(normalized_name, fragment)
                    } else {
                        normalized_name.contains(fragment)
                    };
                    // Strictly longer only, so the earlier entry keeps ties.
                    if hit && best.map_or(true, |b| fragment.len() > b.fragment.len()) {
                        best = Some(entry);
                    }
                }
                best
            }
        }
    }

    /// Small catalog for tests (no file I/O).
    #[cfg(test)]
    pub(crate) fn load_test() -> Self {
        use super::types::ReferenceBand;
        use crate::models::enums::Priority;

        let make = |fragment: &str, band: [f64; 2], unit: &str, specialist: &str| ReferenceEntry {
            fragment: fragment.into(),
            male: Some(ReferenceBand::from(band)),
            female: Some(ReferenceBand::from(band)),
            unit: unit.into(),
            category: "Test".into(),
            specialist: specialist.into(),
            priority: Priority::High,
            purpose: None,
            qualitative: false,
        };
        Self {
            entries: vec![
                make("glucose", [70.0, 140.0], "mg/dL", "Endocrinologist"),
                make("fasting glucose", [70.0, 99.0], "mg/dL", "Endocrinologist"),
                make("creatinine", [0.7, 1.3], "mg/dL", "Nephrologist"),
                make("hemoglobin", [13.0, 17.0], "g/dL", "Hematologist"),
                make("wbc", [4.0, 11.0], "x10^9/L", "Hematologist"),
            ],
        }
    }
}

impl Default for ReferenceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_entry(entry: &ReferenceEntry) -> Result<(), CatalogError> {
    if entry.fragment.trim().is_empty() {
        return Err(CatalogError::EmptyFragment);
    }
    if entry.fragment != entry.fragment.to_lowercase() {
        return Err(CatalogError::UppercaseFragment(entry.fragment.clone()));
    }
    for sex in [Sex::Male, Sex::Female] {
        if let Some(band) = entry.band_for(sex) {
            if !band.is_valid() {
                return Err(CatalogError::InvalidBand {
                    fragment: entry.fragment.clone(),
                    sex,
                    low: band.low,
                    high: band.high,
                });
            }
        }
    }
    if !entry.qualitative && entry.male.is_none() && entry.female.is_none() {
        return Err(CatalogError::MissingBands(entry.fragment.clone()));
    }
    Ok(())
}
