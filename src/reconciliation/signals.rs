//! Signal comparators: reference, amount, date window and counterparty name

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::normalize::{normalize_name, NormalizedName, NormalizedReference};

/// Outcome of comparing counterparty names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameOutcome {
    /// A bank-side name equals one of the document-side names
    Match,
    /// Both sides had names and none of them agree
    Mismatch,
    /// At least one side had no usable name
    Incomparable,
}

/// Both references are non-empty and identical
pub fn references_match(a: &NormalizedReference, b: &NormalizedReference) -> bool {
    !a.is_empty() && !b.is_empty() && a == b
}

/// Absolute amounts differ by less than `epsilon`
///
/// Signs are ignored so a debit of -50.00 matches an invoice total of 50.00.
pub fn amounts_match(
    a: Option<&BigDecimal>,
    b: Option<&BigDecimal>,
    epsilon: &BigDecimal,
) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => (a.abs() - b.abs()).abs() < *epsilon,
        _ => false,
    }
}

/// Any pair of dates lies within `window_days` of each other (inclusive)
pub fn dates_match(a: &[NaiveDate], b: &[NaiveDate], window_days: u32) -> bool {
    a.iter().any(|x| {
        b.iter()
            .any(|y| x.signed_duration_since(*y).num_days().abs() <= i64::from(window_days))
    })
}

/// Compare counterparty names of a bank record and a document
///
/// Document-side names equal to `own_company` are excluded, since the own
/// company usually appears as issuer or recipient on its own paperwork.
pub fn names_match<S: AsRef<str>>(
    bank_names: &[&str],
    document_names: &[&str],
    own_company: &NormalizedName,
    suffixes: &[S],
) -> NameOutcome {
    let bank: BTreeSet<NormalizedName> = bank_names
        .iter()
        .filter_map(|raw| normalize_name(raw, suffixes))
        .collect();

    let document: BTreeSet<NormalizedName> = document_names
        .iter()
        .filter_map(|raw| normalize_name(raw, suffixes))
        .filter(|name| name != own_company)
        .collect();

    if bank.is_empty() || document.is_empty() {
        NameOutcome::Incomparable
    } else if bank.iter().any(|name| document.contains(name)) {
        NameOutcome::Match
    } else {
        NameOutcome::Mismatch
    }
}
