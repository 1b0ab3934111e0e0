use std::sync::LazyLock;

use regex::Regex;

/// Multipliers for locale magnitude words (Indian numbering).
const MAGNITUDE_WORDS: &[(&str, f64)] = &[("crore", 10_000_000.0), ("lakh", 100_000.0)];

/// Report abbreviations expanded before catalog matching, applied in order.
const NAME_REWRITES: &[(&str, &str)] = &[
    ("(f)", "fasting"),
    ("(pp)", "random"),
    ("blood sugar", "glucose"),
    ("glucose fasting", "fasting glucose"),
    ("glucose random", "random glucose"),
    ("glycated hemoglobin", "hba1c"),
    ("glycated haemoglobin", "hba1c"),
    ("glycosylated hemoglobin", "hba1c"),
    ("glycosylated haemoglobin", "hba1c"),
];

/// Numeric token pattern (compiled once via LazyLock).
static RE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)").unwrap());
static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static RE_NEGATED_FINDING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:not|non|no)[\s-]*(?:reactive|detected|present|seen)\b").unwrap()
});
static RE_ABBREVIATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(fbs|rbs|ppbs|sgpt|sgot)\b").unwrap());

/// Parse a free-text magnitude into a number.
/// Handles: "13.5", "9,600", "2.48 lakhs", "< 0.5", "1.2 crore", "120 mg/dL"
pub fn parse_value(raw: &str) -> Option<f64> {
    let mut text = raw.to_lowercase().replace(',', "");

    let mut multiplier = 1.0;
    for (word, factor) in MAGNITUDE_WORDS {
        if text.contains(word) {
            multiplier = *factor;
            text = text.replace(&format!("{word}s"), "").replace(word, "");
            break;
        }
    }

    let caps = RE_NUMBER.captures(&text)?;
    let value = caps.get(1)?.as_str().parse::<f64>().ok()?;
    Some(value * multiplier)
}

/// Whether the value text carries a locale magnitude word.
pub fn has_magnitude_word(raw: &str) -> bool {
    let lower = raw.to_lowercase();
    MAGNITUDE_WORDS.iter().any(|(word, _)| lower.contains(word))
}

/// Read a detection result ("Negative", "Reactive", "Not Detected") as 0/1,
/// falling back to a numeric parse.
pub fn parse_qualitative(raw: &str) -> Option<f64> {
    const NEGATIVE: &[&str] = &["undetected", "negative", "absent", "nil"];
    const POSITIVE: &[&str] = &["positive", "reactive", "detected", "present"];

    // Negations first: "not reactive" contains "reactive".
    let lower = raw.trim().to_lowercase();
    if RE_NEGATED_FINDING.is_match(&lower) || NEGATIVE.iter().any(|w| lower.contains(w)) {
        return Some(0.0);
    }
    if POSITIVE.iter().any(|w| lower.contains(w)) {
        return Some(1.0);
    }
    parse_value(&lower)
}

/// Normalize a report's test name for catalog matching.
pub fn normalize_test_name(name: &str) -> String {
    let mut key = name.to_lowercase();
    for (from, to) in &NAME_REWRITES[..2] {
        key = key.replace(from, to);
    }
    key = RE_WHITESPACE.replace_all(key.trim(), " ").into_owned();
    key = RE_ABBREVIATION
        .replace_all(&key, |caps: &regex::Captures| match &caps[1] {
            "fbs" => "fasting glucose",
            "rbs" | "ppbs" => "random glucose",
            "sgpt" => "alt",
            _ => "ast",
        })
        .into_owned();
    for (from, to) in &NAME_REWRITES[2..] {
        key = key.replace(from, to);
    }
    key
}

/// Whether `needle` occurs in `haystack` with no ASCII alphanumeric on either side.
pub fn contains_on_boundary(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(|c| c.is_ascii_alphanumeric())
            && !after.is_some_and(|c| c.is_ascii_alphanumeric())
    })
}
