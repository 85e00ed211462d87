//! Heuristic scoring of a single (transaction, attachment) pair

use serde::{Deserialize, Serialize};

use super::config::MatcherConfig;
use super::normalize::NormalizedName;
use super::signals::{amounts_match, dates_match, names_match, NameOutcome};
use crate::traits::MatchRecord;

/// Highest score a candidate can reach
pub const MAX_SCORE: u8 = 3;

/// Score of one candidate together with the signals behind it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateScore {
    /// Final score, 0..=3
    pub score: u8,
    pub amount: bool,
    pub date: bool,
    pub name: NameOutcome,
}

impl CandidateScore {
    /// Score assigned to a candidate that cannot be evaluated
    pub fn unscorable() -> Self {
        Self {
            score: 0,
            amount: false,
            date: false,
            name: NameOutcome::Incomparable,
        }
    }

    /// The counterparty veto zeroed the score
    pub fn vetoed(&self) -> bool {
        self.name == NameOutcome::Mismatch
    }
}

/// Score a bank record against a document record
///
/// One point each for matching amount, date window and counterparty name. A
/// name mismatch overrides everything and forces the score to zero; an
/// incomparable name neither adds nor vetoes.
pub fn score_candidate<B, D>(
    bank: &B,
    document: &D,
    config: &MatcherConfig,
    own_company: &NormalizedName,
) -> CandidateScore
where
    B: MatchRecord,
    D: MatchRecord,
{
    let amount = amounts_match(bank.amount(), document.amount(), &config.amount_epsilon);
    let date = dates_match(&bank.dates(), &document.dates(), config.date_window_days);
    let name = names_match(
        &bank.counterparty_names(),
        &document.counterparty_names(),
        own_company,
        &config.business_suffixes,
    );

    let mut score = u8::from(amount) + u8::from(date);
    if name == NameOutcome::Match {
        score += 1;
    }
    if name == NameOutcome::Mismatch {
        score = 0;
    }

    CandidateScore {
        score,
        amount,
        date,
        name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconciliation::normalize::normalize_name;
    use crate::types::{Attachment, Transaction};
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn score(tx: &Transaction, att: &Attachment) -> CandidateScore {
        let config = MatcherConfig::new("Example Company Oy");
        let own = normalize_name(&config.own_company_name, &config.business_suffixes).unwrap();
        score_candidate(tx, att, &config, &own)
    }

    #[test]
    fn test_all_signals_agree() {
        let tx = Transaction::new("t1", BigDecimal::from(-100), date(2024, 1, 1))
            .with_counterparty("Acme Oy");
        let att = Attachment::new("a1", BigDecimal::from(100))
            .with_due_date(date(2024, 1, 11))
            .with_supplier("acme");

        let result = score(&tx, &att);
        assert_eq!(result.score, MAX_SCORE);
        assert!(result.amount);
        assert!(result.date);
        assert_eq!(result.name, NameOutcome::Match);
    }

    #[test]
    fn test_name_mismatch_vetoes_amount_and_date() {
        let tx = Transaction::new("t1", BigDecimal::from(-200), date(2024, 1, 1))
            .with_counterparty("Matti Meittiläinen");
        let att = Attachment::new("a1", BigDecimal::from(200))
            .with_due_date(date(2024, 1, 4))
            .with_supplier("Matti Meikäläinen");

        let result = score(&tx, &att);
        assert!(result.amount);
        assert!(result.date);
        assert!(result.vetoed());
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_incomparable_name_is_neutral() {
        let tx = Transaction::new("t1", BigDecimal::from(-75), date(2024, 1, 1))
            .with_counterparty("Acme");
        let att = Attachment::new("a1", BigDecimal::from(75))
            .with_invoicing_date(date(2024, 1, 2))
            .with_issuer("Example Company Oy");

        let result = score(&tx, &att);
        assert_eq!(result.name, NameOutcome::Incomparable);
        assert!(!result.vetoed());
        assert_eq!(result.score, 2);
    }

    #[test]
    fn test_missing_fields_score_zero() {
        let result = score(&Transaction::bare("t1"), &Attachment::bare("a1"));
        assert_eq!(result, CandidateScore::unscorable());
    }
}
