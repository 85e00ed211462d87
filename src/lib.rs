//! # Receipt Matcher
//!
//! Deterministic, rule-based matching of bank transactions to their
//! supporting documents (invoices and receipts).
//!
//! ## Features
//!
//! - **Golden match**: reference numbers compared after stripping whitespace and leading zeros
//! - **Heuristic scoring**: amount, ±14 day date window and counterparty name signals
//! - **Veto**: a counterparty mismatch rules a candidate out even if amount and date agree
//! - **Ambiguity handling**: ties and low scores produce no match instead of a guess
//! - **Both directions**: transaction → attachment and attachment → transaction
//! - **Fixture loading**: lenient JSON loader for transaction and attachment records
//!
//! ## Quick Start
//!
//! ```rust
//! use receipt_matcher::{Attachment, Matcher, MatcherConfig, Transaction};
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//!
//! let matcher = Matcher::new(MatcherConfig::new("Example Company Oy")).unwrap();
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let tx = Transaction::new("2001", BigDecimal::from(-100), date).with_counterparty("Acme Oy");
//! let invoices = vec![Attachment::new("3001", BigDecimal::from(100))
//!     .with_due_date(date + chrono::Duration::days(10))
//!     .with_supplier("acme")];
//!
//! let found = matcher.find_attachment(&tx, &invoices);
//! assert_eq!(found.map(|a| a.id.as_str()), Some("3001"));
//! ```

pub mod reconciliation;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use reconciliation::*;
pub use traits::*;
pub use types::*;
