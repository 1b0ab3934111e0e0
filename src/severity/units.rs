//! Unit normalization ahead of band comparison.
//!
//! A declared unit is looked up in an explicit conversion table first. The
//! magnitude heuristic (divide by 1000 when the value dwarfs the band) only
//! runs when the declared unit is missing or unknown.

use crate::models::Rescale;

use super::policy::SeverityPolicy;
use super::types::{ReferenceBand, ReferenceEntry};

/// One row of the conversion table. Units are stored normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitConversion {
    /// Catalog unit the value is converted into.
    pub to_unit: String,
    /// Declared units this row accepts.
    pub from_units: Vec<String>,
    /// Restrict the row to entries whose fragment contains this text.
    pub fragment: Option<String>,
    pub factor: f64,
}

impl UnitConversion {
    fn new(to_unit: &str, from_units: &[&str], fragment: Option<&str>, factor: f64) -> Self {
        Self {
            to_unit: normalize_unit(to_unit),
            from_units: from_units.iter().map(|u| normalize_unit(u)).collect(),
            fragment: fragment.map(String::from),
            factor,
        }
    }

    fn applies(&self, to_unit: &str, from_unit: &str, fragment: &str) -> bool {
        self.to_unit == to_unit
            && self.from_units.iter().any(|u| u == from_unit)
            && self.fragment.as_deref().map_or(true, |f| fragment.contains(f))
    }
}

/// Declared unit with its magnitude word dropped, for values whose own
/// text already carried the multiplier ("2.48 lakhs" in "lakhs/cumm").
pub fn strip_magnitude_word(unit: &str) -> String {
    let lower = unit.to_lowercase();
    ["crores", "crore", "lakhs", "lakh"]
        .iter()
        .fold(lower, |u, word| u.replace(word, ""))
}

/// Result of normalizing one parsed value.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub value: f64,
    pub rescale: Option<Rescale>,
}

impl Normalized {
    fn unchanged(value: f64) -> Self {
        Self {
            value,
            rescale: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UnitConverter {
    conversions: Vec<UnitConversion>,
}

impl UnitConverter {
    pub fn new(conversions: Vec<UnitConversion>) -> Self {
        Self { conversions }
    }

    pub fn builtin() -> Self {
        Self::new(vec![
            // Cell counts
            UnitConversion::new("x10^9/L", &["/uL"], None, 0.001),
            UnitConversion::new("x10^9/L", &["x10^3/uL"], None, 1.0),
            UnitConversion::new("x10^9/L", &["lakh/uL"], None, 100.0),
            UnitConversion::new("x10^12/L", &["million/uL", "x10^6/uL"], None, 1.0),
            UnitConversion::new("cells/mcL", &["x10^9/L", "x10^3/uL"], None, 1000.0),
            UnitConversion::new("cells/mcL", &["lakh/uL"], None, 100_000.0),
            // Mass concentration
            UnitConversion::new("g/dL", &["g/L"], None, 0.1),
            // Molar to mass, analyte specific
            UnitConversion::new("mg/dL", &["mmol/L"], Some("glucose"), 18.016),
            UnitConversion::new("mg/dL", &["mmol/L"], Some("urea"), 6.006),
            UnitConversion::new("mg/dL", &["mmol/L"], Some("bun"), 2.801),
            UnitConversion::new("mg/dL", &["mmol/L"], Some("calcium"), 4.008),
            UnitConversion::new("mg/dL", &["mmol/L"], Some("cholesterol"), 38.67),
            UnitConversion::new("mg/dL", &["mmol/L"], Some("triglycerides"), 88.57),
            UnitConversion::new("mg/dL", &["umol/L"], Some("creatinine"), 1.0 / 88.42),
            UnitConversion::new("mg/dL", &["umol/L"], Some("bilirubin"), 1.0 / 17.1),
            UnitConversion::new("mg/dL", &["umol/L"], Some("uric acid"), 1.0 / 59.48),
        ])
    }

    /// Bring `value` into the scale of `entry`'s band.
    pub fn normalize(
        &self,
        entry: &ReferenceEntry,
        band: ReferenceBand,
        value: f64,
        declared_unit: Option<&str>,
        policy: &SeverityPolicy,
    ) -> Normalized {
        let canonical = normalize_unit(&entry.unit);
        let declared = declared_unit.map(normalize_unit).filter(|u| !u.is_empty());

        if let Some(unit) = declared.as_deref() {
            // An explicit matching unit means an extreme value is genuinely extreme.
            if unit == canonical {
                return Normalized::unchanged(value);
            }
            if let Some(conversion) = self
                .conversions
                .iter()
                .find(|c| c.applies(&canonical, unit, &entry.fragment))
            {
                return Normalized {
                    value: value * conversion.factor,
                    rescale: Some(Rescale::UnitTable {
                        from_unit: unit.to_string(),
                        factor: conversion.factor,
                    }),
                };
            }
        }

        if policy.magnitude_heuristic && value > band.high * policy.magnitude_ratio {
            return Normalized {
                value: value / policy.magnitude_divisor,
                rescale: Some(Rescale::MagnitudeHeuristic {
                    divisor: policy.magnitude_divisor,
                }),
            };
        }

        Normalized::unchanged(value)
    }
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Canonical spelling of a unit string for comparison.
/// "x10³/µL", "10^3/cumm" and "thou/mcL" all become "10^3/ul";
/// "lakhs/cumm" becomes "lakh/ul".
pub fn normalize_unit(unit: &str) -> String {
    let mut u: String = unit
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    for (from, to) in [
        ("µ", "u"),
        ("μ", "u"),
        ("×", "x"),
        ("³", "^3"),
        ("⁶", "^6"),
        ("⁹", "^9"),
        ("¹²", "^12"),
        ("lakhs", "lakh"),
        ("cells", ""),
        ("cumm", "ul"),
        ("cmm", "ul"),
        ("mm^3", "ul"),
        ("mm3", "ul"),
        ("mcl", "ul"),
        ("thou/", "10^3/"),
        ("k/", "10^3/"),
        ("x10", "10"),
        ("*10", "10"),
    ] {
        u = u.replace(from, to);
    }
    u
}
