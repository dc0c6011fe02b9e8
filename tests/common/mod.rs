// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use comptoir::application::AccountingService;
use comptoir::domain::{LedgerKind, PaymentMethod};
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(AccountingService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = AccountingService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Helper to parse a date string into NaiveDate
pub fn date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Helper to parse a time string into NaiveTime
pub fn time(time_str: &str) -> NaiveTime {
    NaiveTime::parse_from_str(time_str, "%H:%M:%S").unwrap()
}

/// Record a revenue entry with a default source and payment method.
pub async fn add_revenue(service: &AccountingService, day: &str, cents: i64) -> Result<()> {
    service
        .record_entry(
            LedgerKind::Revenue,
            date(day),
            cents,
            "Sales".into(),
            PaymentMethod::Cash,
        )
        .await?;
    Ok(())
}

/// Record an expense entry with a default source and payment method.
pub async fn add_expense(service: &AccountingService, day: &str, cents: i64) -> Result<()> {
    service
        .record_entry(
            LedgerKind::Expense,
            date(day),
            cents,
            "Supplies".into(),
            PaymentMethod::Cash,
        )
        .await?;
    Ok(())
}

/// Test fixture: the March ledger from the results examples.
/// Revenues 100.00 + 50.00, expense 30.00, all in March 2024.
pub async fn seed_march_ledgers(service: &AccountingService) -> Result<()> {
    add_revenue(service, "2024-03-01", 10000).await?;
    add_revenue(service, "2024-03-15", 5000).await?;
    add_expense(service, "2024-03-10", 3000).await?;
    Ok(())
}
