//! Core record types and errors for the matching engine

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A bank transaction as seen on an account statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier for the transaction
    pub id: String,
    /// Signed amount; debits are negative
    pub amount: Option<BigDecimal>,
    /// Booking date
    pub date: Option<NaiveDate>,
    /// Reference number given by the payer, possibly with padding zeros
    pub reference: Option<String>,
    /// Name of the other party
    pub counterparty: Option<String>,
}

impl Transaction {
    /// Create a new transaction with an amount and a booking date
    pub fn new(id: impl Into<String>, amount: BigDecimal, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            amount: Some(amount),
            date: Some(date),
            reference: None,
            counterparty: None,
        }
    }

    /// Create a transaction with only an identifier; every other field is absent
    pub fn bare(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            amount: None,
            date: None,
            reference: None,
            counterparty: None,
        }
    }

    /// Set the reference number
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Set the counterparty name
    pub fn with_counterparty(mut self, counterparty: impl Into<String>) -> Self {
        self.counterparty = Some(counterparty.into());
        self
    }
}

/// A supporting document (invoice or receipt)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Unique identifier for the attachment
    pub id: String,
    /// Document kind, e.g. "invoice" or "receipt"
    pub kind: Option<String>,
    /// Total amount on the document, assumed non-negative
    pub total_amount: Option<BigDecimal>,
    pub invoicing_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub receiving_date: Option<NaiveDate>,
    /// Reference number printed on the document
    pub reference: Option<String>,
    pub supplier: Option<String>,
    pub issuer: Option<String>,
    pub recipient: Option<String>,
}

impl Attachment {
    /// Create a new attachment with a total amount
    pub fn new(id: impl Into<String>, total_amount: BigDecimal) -> Self {
        Self {
            total_amount: Some(total_amount),
            ..Self::bare(id)
        }
    }

    /// Create an attachment with only an identifier; every other field is absent
    pub fn bare(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: None,
            total_amount: None,
            invoicing_date: None,
            due_date: None,
            receiving_date: None,
            reference: None,
            supplier: None,
            issuer: None,
            recipient: None,
        }
    }

    /// Set the document kind, e.g. `invoice` or `receipt`
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Set the invoicing date
    pub fn with_invoicing_date(mut self, date: NaiveDate) -> Self {
        self.invoicing_date = Some(date);
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    /// Set the date the document was received
    pub fn with_receiving_date(mut self, date: NaiveDate) -> Self {
        self.receiving_date = Some(date);
        self
    }

    /// Set the reference number
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Set the supplier name
    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    /// Set the issuer name
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Set the recipient name
    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    /// All dates present on the document, in field order
    pub fn dates(&self) -> Vec<NaiveDate> {
        [self.invoicing_date, self.due_date, self.receiving_date]
            .into_iter()
            .flatten()
            .collect()
    }

    /// All party names present on the document (supplier, issuer, recipient)
    pub fn party_names(&self) -> Vec<&str> {
        [&self.supplier, &self.issuer, &self.recipient]
            .into_iter()
            .filter_map(|name| name.as_deref())
            .collect()
    }
}

/// Errors that can occur while configuring the matcher or loading records
#[derive(Debug, thiserror::Error)]
pub enum ReconciliationError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for matcher operations
pub type ReconciliationResult<T> = Result<T, ReconciliationError>;
