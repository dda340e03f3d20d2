//! Flow direction of a transaction
//!
//! Legacy records tag direction with free-form labels ("income", "earnings",
//! "expense", "bank_deposit", ...). Those labels are mapped onto a closed
//! enum through a single synonym table; adding a synonym is one table edit.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Direction of an internal bank transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferKind {
    /// Money moved into the bank
    Deposit,
    /// Money taken out of the bank
    Withdrawal,
}

/// Canonical direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "kind", rename_all = "lowercase")]
pub enum Flow {
    /// Money received
    Inflow,
    /// Money spent
    Outflow,
    /// Internal movement, excluded from inflow/outflow totals
    Transfer(TransferKind),
}

/// Synonym table: normalized label -> canonical flow
const FLOW_SYNONYMS: &[(&str, Flow)] = &[
    ("income", Flow::Inflow),
    ("earnings", Flow::Inflow),
    ("earning", Flow::Inflow),
    ("inflow", Flow::Inflow),
    ("expense", Flow::Outflow),
    ("expenses", Flow::Outflow),
    ("outflow", Flow::Outflow),
    ("bank_deposit", Flow::Transfer(TransferKind::Deposit)),
    ("deposit", Flow::Transfer(TransferKind::Deposit)),
    ("bank_withdrawal", Flow::Transfer(TransferKind::Withdrawal)),
    ("withdrawal", Flow::Transfer(TransferKind::Withdrawal)),
];

impl Flow {
    /// Map a raw flow label onto its canonical variant
    ///
    /// Matching ignores case and surrounding whitespace, and treats `-` and
    /// spaces as `_`, so "Bank Deposit" and "bank-deposit" both resolve.
    pub fn from_label(label: &str) -> Result<Self, ValidationError> {
        let normalized: String = label
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        if normalized.is_empty() {
            return Err(ValidationError::MissingFlow);
        }

        FLOW_SYNONYMS
            .iter()
            .find(|(synonym, _)| *synonym == normalized)
            .map(|(_, flow)| *flow)
            .ok_or_else(|| ValidationError::UnknownFlowType(label.trim().to_string()))
    }

    /// Label written back out when records are exported; it parses to `self`
    pub fn label(&self) -> &'static str {
        match self {
            Self::Inflow => "income",
            Self::Outflow => "expense",
            Self::Transfer(TransferKind::Deposit) => "bank_deposit",
            Self::Transfer(TransferKind::Withdrawal) => "bank_withdrawal",
        }
    }

    /// Check if this is an inflow
    pub fn is_inflow(&self) -> bool {
        matches!(self, Self::Inflow)
    }

    /// Check if this is an outflow
    pub fn is_outflow(&self) -> bool {
        matches!(self, Self::Outflow)
    }

    /// Check if this is a bank transfer
    pub fn is_transfer(&self) -> bool {
        matches!(self, Self::Transfer(_))
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inflow => write!(f, "inflow"),
            Self::Outflow => write!(f, "outflow"),
            Self::Transfer(TransferKind::Deposit) => write!(f, "bank deposit"),
            Self::Transfer(TransferKind::Withdrawal) => write!(f, "bank withdrawal"),
        }
    }
}
