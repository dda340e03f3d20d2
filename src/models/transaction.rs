//! Transaction model
//!
//! `RawTransaction` is the loosely-typed record handed over by the
//! persistence layer; `Transaction` is the validated, canonical form the
//! engine works on. Transactions are never mutated by the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::flow::Flow;
use super::ids::TransactionId;
use super::money::Money;

/// Category key used when a record carries no category
pub const UNCATEGORIZED: &str = "uncategorized";

/// A category as supplied, plus the case-insensitive key used for grouping
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryName {
    /// Trimmed, lower-cased grouping key
    pub key: String,
    /// Trimmed label as supplied by the record
    pub original: String,
}

impl CategoryName {
    /// Build a category from a raw label; blank or missing labels become
    /// `uncategorized`
    pub fn new(label: Option<&str>) -> Self {
        match label.map(str::trim).filter(|l| !l.is_empty()) {
            Some(label) => Self {
                key: label.to_lowercase(),
                original: label.to_string(),
            },
            None => Self::uncategorized(),
        }
    }

    /// The default category
    pub fn uncategorized() -> Self {
        Self {
            key: UNCATEGORIZED.to_string(),
            original: UNCATEGORIZED.to_string(),
        }
    }

    /// Canonical display form of the grouping key
    pub fn display_label(&self) -> String {
        title_case(&self.key)
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

/// Upper-case the first letter of every whitespace-separated word
pub fn title_case(key: &str) -> String {
    key.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// An amount as it appears in a raw record: a JSON number or a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for RawAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A transaction record as supplied by the persistence layer
///
/// Field names follow the stored rows (`type`, `details`, `payment_method`,
/// `date`); the canonical names are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default, rename = "type", alias = "flow")]
    pub flow: Option<String>,

    #[serde(default)]
    pub amount: Option<RawAmount>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default, rename = "details", alias = "detail")]
    pub detail: Option<String>,

    #[serde(default, alias = "paymentMethod")]
    pub payment_method: Option<String>,

    #[serde(default, rename = "date", alias = "timestamp")]
    pub timestamp: Option<String>,
}

impl RawTransaction {
    /// Create a raw record with the required fields set
    pub fn new(flow: &str, amount: &str, timestamp: &str) -> Self {
        Self {
            flow: Some(flow.to_string()),
            amount: Some(RawAmount::Text(amount.to_string())),
            timestamp: Some(timestamp.to_string()),
            ..Default::default()
        }
    }

    /// Set the category
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    /// Set the payment method
    pub fn with_payment_method(mut self, method: &str) -> Self {
        self.payment_method = Some(method.to_string());
        self
    }

    /// Set the id
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }
}

/// A validated financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Canonical direction
    pub flow: Flow,

    /// Non-negative amount
    pub amount: Money,

    /// Category (grouping key plus original label)
    pub category: CategoryName,

    /// Free-text sub-label
    pub detail: Option<String>,

    /// Lower-cased payment method key ("cash", "bkash", "bank")
    pub payment_method: Option<String>,

    /// Absolute point in time
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Create a transaction with a generated id
    ///
    /// The caller is responsible for `amount` being non-negative; records
    /// from outside the process should go through the normalizer instead.
    pub fn new(flow: Flow, amount: Money, category: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: TransactionId::generate(),
            flow,
            amount,
            category: CategoryName::new(Some(category)),
            detail: None,
            payment_method: None,
            timestamp,
        }
    }

    /// Set the payment method
    pub fn with_payment_method(mut self, method: &str) -> Self {
        self.payment_method = Some(method.trim().to_lowercase());
        self
    }

    /// Check if this is an inflow
    pub fn is_inflow(&self) -> bool {
        self.flow.is_inflow()
    }

    /// Check if this is an outflow
    pub fn is_outflow(&self) -> bool {
        self.flow.is_outflow()
    }

    /// Check if this is a bank transfer
    pub fn is_transfer(&self) -> bool {
        self.flow.is_transfer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_is_case_insensitive() {
        let a = CategoryName::new(Some("Food"));
        let b = CategoryName::new(Some("  food "));
        assert_eq!(a.key, b.key);
        assert_eq!(a.original, "Food");
        assert_eq!(b.original, "food");
    }

    #[test]
    fn test_missing_category_defaults() {
        assert_eq!(CategoryName::new(None).key, UNCATEGORIZED);
        assert_eq!(CategoryName::new(Some("   ")).key, UNCATEGORIZED);
        assert_eq!(CategoryName::new(None).display_label(), "Uncategorized");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("dining out"), "Dining Out");
        assert_eq!(title_case("food"), "Food");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_raw_transaction_field_aliases() {
        let stored: RawTransaction = serde_json::from_str(
            r#"{"id":"1","type":"income","amount":200,"category":"Salary",
                "details":"March","payment_method":"bank","date":"2024-03-01"}"#,
        )
        .unwrap();
        let canonical: RawTransaction = serde_json::from_str(
            r#"{"id":"1","flow":"income","amount":200,"category":"Salary",
                "detail":"March","paymentMethod":"bank","timestamp":"2024-03-01"}"#,
        )
        .unwrap();

        assert_eq!(stored, canonical);
        assert_eq!(stored.flow.as_deref(), Some("income"));
        assert!(matches!(stored.amount, Some(RawAmount::Number(_))));
    }

    #[test]
    fn test_raw_amount_accepts_strings() {
        let raw: RawTransaction =
            serde_json::from_str(r#"{"type":"expense","amount":"12.50","date":"2024-03-01"}"#)
                .unwrap();
        assert_eq!(raw.amount, Some(RawAmount::Text("12.50".into())));
    }
}
