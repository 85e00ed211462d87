//! Reconciliation of bank transactions against invoices and receipts
//!
//! Matching runs in three stages:
//!
//! 1. **Reference check**: a normalized reference number shared with exactly
//!    one candidate is an immediate (golden) match.
//! 2. **Scoring**: each candidate earns a point for amount, date window and
//!    counterparty agreement; a counterparty mismatch vetoes the candidate.
//! 3. **Resolution**: the unique best candidate wins if it reaches the
//!    confidence threshold; ties and low scores yield no match.

pub mod config;
pub mod matcher;
pub mod normalize;
pub mod scorer;
pub mod signals;

pub use config::*;
pub use matcher::*;
pub use normalize::{
    normalize_name, normalize_reference, parse_amount, parse_date, NormalizedName,
    NormalizedReference, DEFAULT_BUSINESS_SUFFIXES,
};
pub use scorer::*;
pub use signals::*;
