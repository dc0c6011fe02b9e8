use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{apply_rate, Cents};

pub type ContractId = Uuid;

/// Non-refundable deposit rate on contract signature, in percent.
pub const DEPOSIT_RATE_PERCENT: i64 = 20;

/// A signed contract between the business and a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    pub id: ContractId,
    pub client_name: String,
    pub vendor_name: String,
    /// Total contract amount in cents
    pub amount_cents: Cents,
    pub description1: Option<String>,
    pub description2: Option<String>,
    /// Date the contract was signed
    pub signed_on: NaiveDate,
    /// When we recorded this contract in the system
    pub recorded_at: DateTime<Utc>,
}

impl Contract {
    pub fn new(
        client_name: impl Into<String>,
        vendor_name: impl Into<String>,
        amount_cents: Cents,
        signed_on: NaiveDate,
    ) -> Self {
        assert!(amount_cents > 0, "Contract amount must be positive");
        Self {
            id: Uuid::new_v4(),
            client_name: client_name.into(),
            vendor_name: vendor_name.into(),
            amount_cents,
            description1: None,
            description2: None,
            signed_on,
            recorded_at: Utc::now(),
        }
    }

    pub fn with_description1(mut self, description: impl Into<String>) -> Self {
        self.description1 = Some(description.into());
        self
    }

    pub fn with_description2(mut self, description: impl Into<String>) -> Self {
        self.description2 = Some(description.into());
        self
    }

    /// Non-refundable deposit due on signature: 20% of the contract amount.
    pub fn deposit_cents(&self) -> Cents {
        apply_rate(self.amount_cents, DEPOSIT_RATE_PERCENT)
    }

    /// First payment deadline: one week after signature.
    pub fn payment_deadline(&self) -> NaiveDate {
        self.signed_on + Duration::days(7)
    }
}
