//! Canonical forms for reference numbers, counterparty names, amounts and dates

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Legal-form tokens dropped from counterparty names
pub const DEFAULT_BUSINESS_SUFFIXES: &[&str] = &["oy", "ab", "ltd", "inc", "gmbh", "tmi"];

/// Reference number with whitespace and leading zeros removed
///
/// May be empty; an empty reference never matches anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedReference(String);

impl NormalizedReference {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NormalizedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lowercased counterparty name without punctuation or business suffixes
///
/// Never empty: a name that normalizes to nothing is represented as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NormalizedName(String);

impl NormalizedName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize a reference number
///
/// `" 00123 "` becomes `"123"`; `"000"` becomes the empty reference.
pub fn normalize_reference(raw: &str) -> NormalizedReference {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    NormalizedReference(compact.trim_start_matches('0').to_string())
}

/// Normalize a counterparty name
///
/// Lowercases, splits on anything that is not alphanumeric, drops whole tokens
/// listed in `suffixes` and joins the rest with single spaces. Returns `None`
/// when no token survives.
pub fn normalize_name<S: AsRef<str>>(raw: &str, suffixes: &[S]) -> Option<NormalizedName> {
    let lowered = raw.to_lowercase();
    let tokens: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .filter(|token| !suffixes.iter().any(|suffix| suffix.as_ref() == *token))
        .collect();

    if tokens.is_empty() {
        None
    } else {
        Some(NormalizedName(tokens.join(" ")))
    }
}

/// Parse a decimal amount, e.g. `"-50.00"` or `"1e3"`
pub fn parse_amount(raw: &str) -> Option<BigDecimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    BigDecimal::from_str(trimmed).ok()
}

/// Parse a calendar date
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` and RFC 3339 timestamps; only the
/// date part is kept.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(datetime.date());
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|datetime| datetime.date_naive())
}
