//! Loading transaction and attachment records from JSON fixtures
//!
//! Loading is lenient per field: a value that cannot be parsed is logged and
//! dropped, so the matcher treats it as absent. Only structural problems
//! (invalid JSON, records that are not objects, duplicate identifiers) fail
//! the whole load.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;

use crate::reconciliation::normalize::{parse_amount, parse_date};
use crate::types::*;

#[derive(Debug, Deserialize)]
struct RawTransaction {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    amount: Value,
    #[serde(default)]
    date: Value,
    #[serde(default)]
    reference: Value,
    #[serde(default)]
    contact: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawAttachmentData {
    total_amount: Value,
    invoicing_date: Value,
    due_date: Value,
    receiving_date: Value,
    reference: Value,
    supplier: Value,
    issuer: Value,
    recipient: Value,
}

#[derive(Debug, Deserialize)]
struct RawAttachment {
    #[serde(default)]
    id: Value,
    #[serde(default, rename = "type")]
    kind: Value,
    #[serde(default)]
    data: Value,
}

#[derive(Debug, Deserialize)]
struct RawFixtureSet {
    #[serde(default)]
    transactions: Vec<Value>,
    #[serde(default)]
    attachments: Vec<Value>,
}

/// Transactions and attachments loaded from a single document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixtureSet {
    pub transactions: Vec<Transaction>,
    pub attachments: Vec<Attachment>,
}

impl FixtureSet {
    /// Parse `{ "transactions": [...], "attachments": [...] }`
    pub fn from_json(json: &str) -> ReconciliationResult<Self> {
        let raw: RawFixtureSet = serde_json::from_str(json)?;
        let transactions: Vec<Transaction> = parse_records("transaction", raw.transactions)?
            .into_iter()
            .map(convert_transaction)
            .collect();
        let attachments: Vec<Attachment> = parse_records("attachment", raw.attachments)?
            .into_iter()
            .map(convert_attachment)
            .collect();

        check_unique_ids("transaction", transactions.iter().map(|t| t.id.as_str()))?;
        check_unique_ids("attachment", attachments.iter().map(|a| a.id.as_str()))?;

        Ok(Self {
            transactions,
            attachments,
        })
    }

    /// Find a transaction by ID
    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Find an attachment by ID
    pub fn attachment(&self, id: &str) -> Option<&Attachment> {
        self.attachments.iter().find(|a| a.id == id)
    }
}

/// Load a JSON array of `{ id, amount, date, reference, contact }` objects
pub fn load_transactions(json: &str) -> ReconciliationResult<Vec<Transaction>> {
    let raw: Vec<Value> = serde_json::from_str(json)?;
    let transactions: Vec<Transaction> = parse_records("transaction", raw)?
        .into_iter()
        .map(convert_transaction)
        .collect();
    check_unique_ids("transaction", transactions.iter().map(|t| t.id.as_str()))?;
    Ok(transactions)
}

/// Load a JSON array of `{ id, type, data: { ... } }` attachment objects
pub fn load_attachments(json: &str) -> ReconciliationResult<Vec<Attachment>> {
    let raw: Vec<Value> = serde_json::from_str(json)?;
    let attachments: Vec<Attachment> = parse_records("attachment", raw)?
        .into_iter()
        .map(convert_attachment)
        .collect();
    check_unique_ids("attachment", attachments.iter().map(|a| a.id.as_str()))?;
    Ok(attachments)
}

/// Decode each array element, rejecting anything that is not a JSON object
fn parse_records<T: DeserializeOwned>(
    kind: &str,
    values: Vec<Value>,
) -> ReconciliationResult<Vec<T>> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            if !value.is_object() {
                return Err(ReconciliationError::MalformedInput(format!(
                    "{} record {} is not an object",
                    kind, index
                )));
            }
            Ok(serde_json::from_value(value)?)
        })
        .collect()
}

fn convert_transaction(raw: RawTransaction) -> Transaction {
    let id = id_value(&raw.id);
    Transaction {
        amount: amount_value(&id, "amount", &raw.amount),
        date: date_value(&id, "date", &raw.date),
        reference: text_value(&id, "reference", &raw.reference),
        counterparty: text_value(&id, "contact", &raw.contact),
        id,
    }
}

fn convert_attachment(raw: RawAttachment) -> Attachment {
    let id = id_value(&raw.id);
    let data = attachment_data(&id, raw.data);
    Attachment {
        kind: text_value(&id, "type", &raw.kind),
        total_amount: amount_value(&id, "total_amount", &data.total_amount),
        invoicing_date: date_value(&id, "invoicing_date", &data.invoicing_date),
        due_date: date_value(&id, "due_date", &data.due_date),
        receiving_date: date_value(&id, "receiving_date", &data.receiving_date),
        reference: text_value(&id, "reference", &data.reference),
        supplier: text_value(&id, "supplier", &data.supplier),
        issuer: text_value(&id, "issuer", &data.issuer),
        recipient: text_value(&id, "recipient", &data.recipient),
        id,
    }
}

fn attachment_data(id: &str, data: Value) -> RawAttachmentData {
    match data {
        Value::Object(_) => serde_json::from_value(data).unwrap_or_default(),
        Value::Null => {
            warn!("Attachment '{}' has no data; document fields are absent", id);
            RawAttachmentData::default()
        }
        other => {
            warn!("Dropping unparseable data of attachment '{}': {}", id, other);
            RawAttachmentData::default()
        }
    }
}

fn check_unique_ids<'a>(
    kind: &str,
    ids: impl Iterator<Item = &'a str>,
) -> ReconciliationResult<()> {
    let mut seen = HashSet::new();
    for id in ids.filter(|id| !id.is_empty()) {
        if !seen.insert(id) {
            return Err(ReconciliationError::MalformedInput(format!(
                "Duplicate {} id '{}'",
                kind, id
            )));
        }
    }
    Ok(())
}

fn id_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => {
            warn!("Record without an id; it will never be matched");
            String::new()
        }
        other => {
            warn!("Unusable record id {}; it will never be matched", other);
            String::new()
        }
    }
}

fn text_value(record_id: &str, field: &str, value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        // Reference numbers are sometimes stored as JSON numbers
        Value::Number(n) => Some(n.to_string()),
        Value::Null => None,
        other => {
            warn!(
                "Record '{}': ignoring non-text {} value {}",
                record_id, field, other
            );
            None
        }
    }
}

fn amount_value(record_id: &str, field: &str, value: &Value) -> Option<BigDecimal> {
    let parsed = match value {
        Value::Null => return None,
        Value::Number(n) => parse_amount(&n.to_string()),
        Value::String(s) if s.trim().is_empty() => return None,
        Value::String(s) => parse_amount(s),
        _ => None,
    };

    if parsed.is_none() {
        warn!(
            "Record '{}': cannot parse {} '{}', treating it as absent",
            record_id, field, value
        );
    }
    parsed
}

fn date_value(record_id: &str, field: &str, value: &Value) -> Option<NaiveDate> {
    let parsed = match value {
        Value::Null => return None,
        Value::String(s) if s.trim().is_empty() => return None,
        Value::String(s) => parse_date(s),
        _ => None,
    };

    if parsed.is_none() {
        warn!(
            "Record '{}': cannot parse {} '{}', treating it as absent",
            record_id, field, value
        );
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_transactions() {
        let json = r#"[
            {"id": 2001, "amount": -50.0, "date": "2024-06-01", "reference": "0042", "contact": "Acme Oy"},
            {"id": "2002", "amount": "-12.30", "date": "2024-06-02", "reference": null}
        ]"#;

        let transactions = load_transactions(json).unwrap();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].id, "2001");
        assert_eq!(transactions[0].amount, Some(BigDecimal::from(-50)));
        assert_eq!(transactions[0].date, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(transactions[0].reference.as_deref(), Some("0042"));
        assert_eq!(transactions[0].counterparty.as_deref(), Some("Acme Oy"));
        assert_eq!(transactions[1].reference, None);
        assert_eq!(transactions[1].counterparty, None);
    }

    #[test]
    fn test_malformed_fields_become_absent() {
        let json = r#"[
            {"id": 1, "amount": "n/a", "date": "yesterday", "reference": ["x"], "contact": ""}
        ]"#;

        let transactions = load_transactions(json).unwrap();
        assert_eq!(transactions[0].amount, None);
        assert_eq!(transactions[0].date, None);
        assert_eq!(transactions[0].reference, None);
        assert_eq!(transactions[0].counterparty.as_deref(), Some(""));
    }

    #[test]
    fn test_load_attachments() {
        let json = r#"[
            {
                "id": 3001,
                "type": "invoice",
                "data": {
                    "total_amount": 100.0,
                    "due_date": "2024-06-10",
                    "reference": 42,
                    "supplier": "Acme",
                    "recipient": "Example Company Oy"
                }
            },
            {"id": 3002, "type": "receipt"}
        ]"#;

        let attachments = load_attachments(json).unwrap();
        assert_eq!(attachments.len(), 2);
        let invoice = &attachments[0];
        assert_eq!(invoice.kind.as_deref(), Some("invoice"));
        assert_eq!(invoice.total_amount, Some(BigDecimal::from(100)));
        assert_eq!(invoice.due_date, NaiveDate::from_ymd_opt(2024, 6, 10));
        assert_eq!(invoice.invoicing_date, None);
        assert_eq!(invoice.reference.as_deref(), Some("42"));
        assert_eq!(invoice.party_names(), vec!["Acme", "Example Company Oy"]);
        assert!(attachments[1].dates().is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"[{"id": 1}, {"id": "1"}]"#;
        assert!(matches!(
            load_transactions(json),
            Err(ReconciliationError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(matches!(
            load_attachments("{not json"),
            Err(ReconciliationError::Json(_))
        ));
    }

    #[test]
    fn test_missing_attachment_data_loads_with_absent_fields() {
        let json = r#"[
            {"id": 1, "type": "receipt", "data": null},
            {"id": 2, "type": "receipt"},
            {"id": 3, "data": "n/a"}
        ]"#;

        let attachments = load_attachments(json).unwrap();
        assert_eq!(attachments.len(), 3);
        assert_eq!(attachments[0].kind.as_deref(), Some("receipt"));
        for attachment in &attachments {
            assert_eq!(attachment.total_amount, None);
            assert!(attachment.dates().is_empty());
            assert!(attachment.party_names().is_empty());
        }
    }

    #[test]
    fn test_non_object_record_rejected() {
        assert!(matches!(
            load_transactions(r#"[{"id": 1}, 5]"#),
            Err(ReconciliationError::MalformedInput(msg)) if msg.contains("record 1")
        ));
        assert!(matches!(
            load_attachments("[null]"),
            Err(ReconciliationError::MalformedInput(_))
        ));
        assert!(matches!(
            FixtureSet::from_json(r#"{"transactions": ["2001"], "attachments": []}"#),
            Err(ReconciliationError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_fixture_set_lookup() {
        let json = r#"{
            "transactions": [{"id": 1, "amount": -5}],
            "attachments": [{"id": 9, "data": {"total_amount": 5}}]
        }"#;

        let fixtures = FixtureSet::from_json(json).unwrap();
        assert!(fixtures.transaction("1").is_some());
        assert!(fixtures.attachment("9").is_some());
        assert!(fixtures.attachment("1").is_none());
    }
}
