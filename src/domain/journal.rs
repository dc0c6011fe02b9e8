use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

pub type JournalEntryId = Uuid;

/// Accounting journal code. The wire format keeps the original
/// three-letter codes used on paper journals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JournalCode {
    /// ACH - purchases
    Purchase,
    /// DEP - disbursements
    Disbursement,
    /// VEN - sales
    Sale,
}

impl JournalCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            JournalCode::Purchase => "ACH",
            JournalCode::Disbursement => "DEP",
            JournalCode::Sale => "VEN",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ACH" => Some(JournalCode::Purchase),
            "DEP" => Some(JournalCode::Disbursement),
            "VEN" => Some(JournalCode::Sale),
            _ => None,
        }
    }
}

impl std::fmt::Display for JournalCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One line of the transaction journal. The journal is the only ledger that
/// supports per-row deletion; revenue and expense entries are insert-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: JournalEntryId,
    pub code: JournalCode,
    pub author: String,
    pub recipient: String,
    pub currency: String,
    /// Free-text narrative ("libellés")
    pub label: Option<String>,
    /// Supporting document number ("numéro de la pièce")
    pub document_no: Option<String>,
    pub amount_cents: Cents,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl JournalEntry {
    pub fn new(
        code: JournalCode,
        author: impl Into<String>,
        recipient: impl Into<String>,
        currency: impl Into<String>,
        amount_cents: Cents,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Self {
        assert!(amount_cents > 0, "Journal entry amount must be positive");
        Self {
            id: Uuid::new_v4(),
            code,
            author: author.into(),
            recipient: recipient.into(),
            currency: currency.into(),
            label: None,
            document_no: None,
            amount_cents,
            date,
            time,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_document_no(mut self, document_no: impl Into<String>) -> Self {
        self.document_no = Some(document_no.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_journal_code_roundtrip() {
        for code in [
            JournalCode::Purchase,
            JournalCode::Disbursement,
            JournalCode::Sale,
        ] {
            assert_eq!(JournalCode::from_str(code.as_str()), Some(code));
        }
        assert_eq!(JournalCode::from_str("ven"), Some(JournalCode::Sale));
        assert_eq!(JournalCode::from_str("XYZ"), None);
    }

    #[test]
    fn test_create_journal_entry() {
        let date = NaiveDate::parse_from_str("2024-03-01", "%Y-%m-%d").unwrap();
        let time = NaiveTime::parse_from_str("10:30:00", "%H:%M:%S").unwrap();

        let entry = JournalEntry::new(
            JournalCode::Sale,
            "A. Diallo",
            "Client Kone",
            "XOF",
            50000,
            date,
            time,
        )
        .with_label("Cash sale")
        .with_document_no("PC-0042");

        assert_eq!(entry.code, JournalCode::Sale);
        assert_eq!(entry.amount_cents, 50000);
        assert_eq!(entry.label.as_deref(), Some("Cash sale"));
        assert_eq!(entry.document_no.as_deref(), Some("PC-0042"));
    }
}
