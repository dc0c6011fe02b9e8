use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

pub type EntryId = Uuid;

/// Which of the two independent ledgers an entry belongs to.
/// Revenues and expenses share one row shape but are stored separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerKind {
    Revenue,
    Expense,
}

impl LedgerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerKind::Revenue => "revenue",
            LedgerKind::Expense => "expense",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "revenue" => Some(LedgerKind::Revenue),
            "expense" => Some(LedgerKind::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a ledger entry was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Cheque,
    Transfer,
    Card,
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Cheque => "cheque",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Card => "card",
            PaymentMethod::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cash" => Some(PaymentMethod::Cash),
            "cheque" => Some(PaymentMethod::Cheque),
            "transfer" => Some(PaymentMethod::Transfer),
            "card" => Some(PaymentMethod::Card),
            "other" => Some(PaymentMethod::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One recorded revenue or expense transaction.
/// Entries are immutable once created: the ledgers expose insert only,
/// corrections are new entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: EntryId,
    /// Calendar date of the transaction, no time component
    pub date: NaiveDate,
    /// Amount in cents (always positive)
    pub amount_cents: Cents,
    /// Where the money came from or went to
    pub source: String,
    pub payment_method: PaymentMethod,
    /// When we recorded this entry in the system
    pub recorded_at: DateTime<Utc>,
}

impl LedgerEntry {
    pub fn new(
        date: NaiveDate,
        amount_cents: Cents,
        source: impl Into<String>,
        payment_method: PaymentMethod,
    ) -> Self {
        assert!(amount_cents > 0, "Ledger entry amount must be positive");
        Self {
            id: Uuid::new_v4(),
            date,
            amount_cents,
            source: source.into(),
            payment_method,
            recorded_at: Utc::now(),
        }
    }
}
