//! Validation utilities

use bigdecimal::BigDecimal;

use crate::reconciliation::normalize::normalize_name;
use crate::reconciliation::scorer::MAX_SCORE;
use crate::types::*;

/// Validate that the own company name is usable after normalization
pub fn validate_company_name<S: AsRef<str>>(
    name: &str,
    suffixes: &[S],
) -> ReconciliationResult<()> {
    if name.trim().is_empty() {
        return Err(ReconciliationError::Configuration(
            "Own company name cannot be empty".to_string(),
        ));
    }

    if normalize_name(name, suffixes).is_none() {
        return Err(ReconciliationError::Configuration(format!(
            "Own company name '{}' normalizes to nothing",
            name
        )));
    }

    Ok(())
}

/// Validate that the confidence threshold is a reachable score
pub fn validate_confidence_threshold(threshold: u8) -> ReconciliationResult<()> {
    if threshold > MAX_SCORE {
        return Err(ReconciliationError::Configuration(format!(
            "Confidence threshold must be between 0 and {}, got {}",
            MAX_SCORE, threshold
        )));
    }

    Ok(())
}

/// Validate that the amount tolerance is not negative
pub fn validate_amount_epsilon(epsilon: &BigDecimal) -> ReconciliationResult<()> {
    if *epsilon < BigDecimal::from(0) {
        Err(ReconciliationError::Configuration(
            "Amount epsilon cannot be negative".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate a business suffix token
pub fn validate_business_suffix(suffix: &str) -> ReconciliationResult<()> {
    if suffix.is_empty() {
        return Err(ReconciliationError::Configuration(
            "Business suffix cannot be empty".to_string(),
        ));
    }

    // Names are split on non-alphanumeric characters, so anything else could never match a token
    if !suffix.chars().all(char::is_alphanumeric) {
        return Err(ReconciliationError::Configuration(format!(
            "Business suffix '{}' can only contain alphanumeric characters",
            suffix
        )));
    }

    if suffix.to_lowercase() != suffix {
        return Err(ReconciliationError::Configuration(format!(
            "Business suffix '{}' must be lowercase",
            suffix
        )));
    }

    Ok(())
}
