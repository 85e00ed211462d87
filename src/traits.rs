//! Capability traits that let one matcher serve both matching directions

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::types::*;

/// Which side of a reconciliation a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSide {
    /// Bank statement side (transactions)
    Bank,
    /// Document side (invoices, receipts)
    Document,
}

/// Field access the matcher needs from a record
///
/// Implemented by [`Transaction`] and [`Attachment`]. Each implementation names
/// the opposite record kind as its `Counterpart`, so a matcher anchored on one
/// kind always searches a pool of the other.
pub trait MatchRecord: Sized {
    /// Side this record kind sits on
    const SIDE: RecordSide;

    /// Record kind searched for when this kind is the anchor
    type Counterpart: MatchRecord<Counterpart = Self>;

    /// Identifier reported back to callers
    fn record_id(&self) -> &str;

    /// Raw reference number, if any
    fn reference(&self) -> Option<&str>;

    /// Amount to compare, sign included
    fn amount(&self) -> Option<&BigDecimal>;

    /// Every date usable for the date window check
    fn dates(&self) -> Vec<NaiveDate>;

    /// Every raw counterparty name carried by the record
    fn counterparty_names(&self) -> Vec<&str>;
}

impl MatchRecord for Transaction {
    const SIDE: RecordSide = RecordSide::Bank;
    type Counterpart = Attachment;

    fn record_id(&self) -> &str {
        &self.id
    }

    fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    fn amount(&self) -> Option<&BigDecimal> {
        self.amount.as_ref()
    }

    fn dates(&self) -> Vec<NaiveDate> {
        self.date.into_iter().collect()
    }

    fn counterparty_names(&self) -> Vec<&str> {
        self.counterparty.as_deref().into_iter().collect()
    }
}

impl MatchRecord for Attachment {
    const SIDE: RecordSide = RecordSide::Document;
    type Counterpart = Transaction;

    fn record_id(&self) -> &str {
        &self.id
    }

    fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    fn amount(&self) -> Option<&BigDecimal> {
        self.total_amount.as_ref()
    }

    fn dates(&self) -> Vec<NaiveDate> {
        Attachment::dates(self)
    }

    fn counterparty_names(&self) -> Vec<&str> {
        self.party_names()
    }
}
