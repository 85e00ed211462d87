//! Matching engine: golden reference match, heuristic scoring, resolution

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use super::config::MatcherConfig;
use super::normalize::{normalize_name, normalize_reference, NormalizedName};
use super::scorer::{score_candidate, CandidateScore};
use super::signals::references_match;
use crate::traits::{MatchRecord, RecordSide};
use crate::types::*;

/// How a single invocation of the matcher was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchDecision {
    /// Exactly one candidate shares the anchor's reference number
    Golden { index: usize },
    /// A unique candidate reached the highest score at or above the threshold
    Scored { index: usize, score: u8 },
    /// The best score stayed below the confidence threshold
    NoConfidentMatch { best_score: u8 },
    /// Several candidates share the highest score
    Ambiguous { score: u8, tied: usize },
    /// There were no candidates to consider
    EmptyPool,
}

impl MatchDecision {
    /// Pool index of the selected candidate, if any
    pub fn matched_index(&self) -> Option<usize> {
        match self {
            MatchDecision::Golden { index } | MatchDecision::Scored { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// Score of one pool entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub index: usize,
    pub record_id: String,
    pub score: CandidateScore,
}

/// Full outcome of a matcher invocation
///
/// `scores` is empty when the golden reference stage decided the match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub decision: MatchDecision,
    pub scores: Vec<ScoredCandidate>,
}

impl MatchReport {
    /// Pool index of the selected candidate, if any
    pub fn matched_index(&self) -> Option<usize> {
        self.decision.matched_index()
    }
}

/// Rule-based matcher between bank transactions and documents
#[derive(Debug, Clone)]
pub struct Matcher {
    config: MatcherConfig,
    own_company: NormalizedName,
}

impl Matcher {
    /// Create a matcher, validating the configuration up front
    pub fn new(config: MatcherConfig) -> ReconciliationResult<Self> {
        config.validate()?;
        let own_company = normalize_name(&config.own_company_name, &config.business_suffixes)
            .ok_or_else(|| {
                ReconciliationError::Configuration(format!(
                    "Own company name '{}' normalizes to nothing",
                    config.own_company_name
                ))
            })?;

        Ok(Self {
            config,
            own_company,
        })
    }

    /// Configuration this matcher was built with
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Find the single attachment that belongs to a transaction
    pub fn find_attachment<'a>(
        &self,
        transaction: &Transaction,
        attachments: &'a [Attachment],
    ) -> Option<&'a Attachment> {
        self.find_best(transaction, attachments)
    }

    /// Find the single transaction that belongs to an attachment
    pub fn find_transaction<'a>(
        &self,
        attachment: &Attachment,
        transactions: &'a [Transaction],
    ) -> Option<&'a Transaction> {
        self.find_best(attachment, transactions)
    }

    /// Find the single counterpart of `anchor` in `pool`
    pub fn find_best<'a, A: MatchRecord>(
        &self,
        anchor: &A,
        pool: &'a [A::Counterpart],
    ) -> Option<&'a A::Counterpart> {
        self.evaluate(anchor, pool)
            .matched_index()
            .and_then(|index| pool.get(index))
    }

    /// Run the full matching procedure and report how it was decided
    pub fn evaluate<A: MatchRecord>(&self, anchor: &A, pool: &[A::Counterpart]) -> MatchReport {
        if pool.is_empty() {
            debug!("No candidates for '{}'", anchor.record_id());
            return MatchReport {
                decision: MatchDecision::EmptyPool,
                scores: Vec::new(),
            };
        }

        if let Some(index) = self.golden_match(anchor, pool) {
            debug!(
                "Golden reference match '{}' -> '{}'",
                anchor.record_id(),
                pool[index].record_id()
            );
            return MatchReport {
                decision: MatchDecision::Golden { index },
                scores: Vec::new(),
            };
        }

        let scores: Vec<ScoredCandidate> = pool
            .iter()
            .enumerate()
            .map(|(index, candidate)| {
                let score = self.score(anchor, candidate);
                trace!(
                    "'{}' vs '{}': {:?}",
                    anchor.record_id(),
                    candidate.record_id(),
                    score
                );
                ScoredCandidate {
                    index,
                    record_id: candidate.record_id().to_string(),
                    score,
                }
            })
            .collect();

        let decision = self.resolve(&scores);
        debug!("Match for '{}': {:?}", anchor.record_id(), decision);

        MatchReport { decision, scores }
    }

    /// Index of the only candidate sharing the anchor's reference, if exactly one does
    fn golden_match<A: MatchRecord>(&self, anchor: &A, pool: &[A::Counterpart]) -> Option<usize> {
        let anchor_ref = normalize_reference(anchor.reference().unwrap_or_default());
        if anchor_ref.is_empty() || anchor.record_id().is_empty() {
            return None;
        }

        let hits: Vec<usize> = pool
            .iter()
            .enumerate()
            .filter(|(_, candidate)| !candidate.record_id().is_empty())
            .filter(|(_, candidate)| {
                let candidate_ref = normalize_reference(candidate.reference().unwrap_or_default());
                references_match(&anchor_ref, &candidate_ref)
            })
            .map(|(index, _)| index)
            .collect();

        match hits.as_slice() {
            [index] => Some(*index),
            [] => None,
            _ => {
                warn!(
                    "Reference '{}' of '{}' is shared by {} candidates; falling back to scoring",
                    anchor_ref,
                    anchor.record_id(),
                    hits.len()
                );
                None
            }
        }
    }

    /// Score a candidate with the bank record always on the transaction side
    fn score<A: MatchRecord>(&self, anchor: &A, candidate: &A::Counterpart) -> CandidateScore {
        // Records without an identifier cannot be reported as a match
        if anchor.record_id().is_empty() || candidate.record_id().is_empty() {
            return CandidateScore::unscorable();
        }

        match A::SIDE {
            RecordSide::Bank => score_candidate(anchor, candidate, &self.config, &self.own_company),
            RecordSide::Document => {
                score_candidate(candidate, anchor, &self.config, &self.own_company)
            }
        }
    }

    fn resolve(&self, scores: &[ScoredCandidate]) -> MatchDecision {
        let best_score = scores.iter().map(|c| c.score.score).max().unwrap_or(0);

        if best_score < self.config.confidence_threshold {
            return MatchDecision::NoConfidentMatch { best_score };
        }

        let best: Vec<&ScoredCandidate> = scores
            .iter()
            .filter(|c| c.score.score == best_score)
            .collect();

        match best.as_slice() {
            [only] => MatchDecision::Scored {
                index: only.index,
                score: best_score,
            },
            tied => MatchDecision::Ambiguous {
                score: best_score,
                tied: tied.len(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn matcher() -> Matcher {
        Matcher::new(MatcherConfig::new("Example Company Oy")).unwrap()
    }

    #[test]
    fn test_matcher_rejects_invalid_config() {
        assert!(matches!(
            Matcher::new(MatcherConfig::new("   ")),
            Err(ReconciliationError::Configuration(_))
        ));
        assert!(Matcher::new(MatcherConfig::new("Acme").with_confidence_threshold(9)).is_err());
    }

    #[test]
    fn test_empty_pool() {
        let tx = Transaction::new("t1", BigDecimal::from(-10), date(2024, 1, 1));
        let pool: Vec<Attachment> = Vec::new();
        let report = matcher().evaluate(&tx, &pool);
        assert_eq!(report.decision, MatchDecision::EmptyPool);
        assert_eq!(report.matched_index(), None);
    }

    #[test]
    fn test_golden_match_skips_scoring() {
        let tx = Transaction::new("t1", BigDecimal::from(-50), date(2024, 1, 1))
            .with_reference("0042")
            .with_counterparty("Someone Else");
        let pool = vec![
            Attachment::new("a1", BigDecimal::from(50)).with_reference("41"),
            Attachment::new("a2", BigDecimal::from(999))
                .with_reference("42")
                .with_supplier("Acme"),
        ];

        let report = matcher().evaluate(&tx, &pool);
        assert_eq!(report.decision, MatchDecision::Golden { index: 1 });
        assert!(report.scores.is_empty());
    }

    #[test]
    fn test_reference_collision_falls_back_to_scoring() {
        let tx = Transaction::new("t1", BigDecimal::from(-50), date(2024, 1, 1))
            .with_reference("7");
        let pool = vec![
            Attachment::new("a1", BigDecimal::from(50))
                .with_reference("007")
                .with_due_date(date(2024, 1, 5)),
            Attachment::new("a2", BigDecimal::from(80)).with_reference("7"),
        ];

        let report = matcher().evaluate(&tx, &pool);
        assert_eq!(report.decision, MatchDecision::Scored { index: 0, score: 2 });
        assert_eq!(report.scores.len(), 2);
        assert_eq!(report.scores[1].score.score, 0);
    }

    #[test]
    fn test_below_threshold() {
        let tx = Transaction::new("t1", BigDecimal::from(-50), date(2024, 1, 1));
        let pool = vec![Attachment::new("a1", BigDecimal::from(50))];

        let report = matcher().evaluate(&tx, &pool);
        assert_eq!(
            report.decision,
            MatchDecision::NoConfidentMatch { best_score: 1 }
        );
    }

    #[test]
    fn test_tie_is_ambiguous() {
        let tx = Transaction::new("t1", BigDecimal::from(-50), date(2024, 1, 1));
        let pool = vec![
            Attachment::new("a1", BigDecimal::from(50)).with_due_date(date(2024, 1, 3)),
            Attachment::new("a2", BigDecimal::from(10)).with_due_date(date(2024, 1, 3)),
            Attachment::new("a3", BigDecimal::from(50)).with_invoicing_date(date(2023, 12, 28)),
        ];

        let report = matcher().evaluate(&tx, &pool);
        assert_eq!(report.decision, MatchDecision::Ambiguous { score: 2, tied: 2 });
        assert_eq!(matcher().find_attachment(&tx, &pool), None);
    }

    #[test]
    fn test_unidentified_candidate_is_skipped() {
        let tx = Transaction::new("t1", BigDecimal::from(-50), date(2024, 1, 1))
            .with_reference("99");
        let pool = vec![
            Attachment::new("", BigDecimal::from(50))
                .with_reference("99")
                .with_due_date(date(2024, 1, 2)),
            Attachment::new("a2", BigDecimal::from(50)).with_due_date(date(2024, 1, 9)),
        ];

        let found = matcher().find_attachment(&tx, &pool).unwrap();
        assert_eq!(found.id, "a2");
    }

    #[test]
    fn test_zero_threshold_still_requires_unique_best() {
        let matcher =
            Matcher::new(MatcherConfig::new("Example Company Oy").with_confidence_threshold(0))
                .unwrap();
        let tx = Transaction::bare("t1");
        let pool = vec![Attachment::bare("a1"), Attachment::bare("a2")];

        assert_eq!(
            matcher.evaluate(&tx, &pool).decision,
            MatchDecision::Ambiguous { score: 0, tied: 2 }
        );
        assert_eq!(
            matcher.find_attachment(&tx, &pool[..1]).map(|a| a.id.as_str()),
            Some("a1")
        );
    }
}
