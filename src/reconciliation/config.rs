//! Matcher configuration

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::normalize::DEFAULT_BUSINESS_SUFFIXES;
use crate::types::*;
use crate::utils::validation::*;

/// Minimum score (signals in agreement) for a scored match
pub const DEFAULT_CONFIDENCE_THRESHOLD: u8 = 2;

/// Maximum distance in days between a transaction date and a document date
pub const DEFAULT_DATE_WINDOW_DAYS: u32 = 14;

fn default_confidence_threshold() -> u8 {
    DEFAULT_CONFIDENCE_THRESHOLD
}

fn default_date_window_days() -> u32 {
    DEFAULT_DATE_WINDOW_DAYS
}

/// Half a cent
fn default_amount_epsilon() -> BigDecimal {
    BigDecimal::new(5i64.into(), 3)
}

fn default_business_suffixes() -> Vec<String> {
    DEFAULT_BUSINESS_SUFFIXES
        .iter()
        .map(|suffix| suffix.to_string())
        .collect()
}

/// Immutable settings for a [`Matcher`](super::Matcher)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Name of the company whose books are being reconciled
    pub own_company_name: String,
    /// Minimum score required to accept a scored match (0..=3)
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: u8,
    /// Date window in days, inclusive
    #[serde(default = "default_date_window_days")]
    pub date_window_days: u32,
    /// Amounts closer than this are considered equal
    #[serde(default = "default_amount_epsilon")]
    pub amount_epsilon: BigDecimal,
    /// Legal-form tokens removed from counterparty names
    #[serde(default = "default_business_suffixes")]
    pub business_suffixes: Vec<String>,
}

impl MatcherConfig {
    /// Create a configuration with default thresholds
    pub fn new(own_company_name: impl Into<String>) -> Self {
        Self {
            own_company_name: own_company_name.into(),
            confidence_threshold: default_confidence_threshold(),
            date_window_days: default_date_window_days(),
            amount_epsilon: default_amount_epsilon(),
            business_suffixes: default_business_suffixes(),
        }
    }

    /// Parse a configuration from JSON; omitted fields take their defaults
    pub fn from_json(json: &str) -> ReconciliationResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the minimum score a match needs
    pub fn with_confidence_threshold(mut self, threshold: u8) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    /// Set how many days apart two dates may be
    pub fn with_date_window_days(mut self, days: u32) -> Self {
        self.date_window_days = days;
        self
    }

    /// Set the amount tolerance
    pub fn with_amount_epsilon(mut self, epsilon: BigDecimal) -> Self {
        self.amount_epsilon = epsilon;
        self
    }

    /// Replace the suffixes stripped from company names
    pub fn with_business_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.business_suffixes = suffixes
            .into_iter()
            .map(|suffix| suffix.into().to_lowercase())
            .collect();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ReconciliationResult<()> {
        for suffix in &self.business_suffixes {
            validate_business_suffix(suffix)?;
        }
        validate_confidence_threshold(self.confidence_threshold)?;
        validate_amount_epsilon(&self.amount_epsilon)?;
        validate_company_name(&self.own_company_name, &self.business_suffixes)?;
        Ok(())
    }
}
