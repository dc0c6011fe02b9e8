mod common;

use anyhow::Result;
use common::{add_expense, add_revenue, date, test_service};
use comptoir::application::AppError;
use comptoir::domain::{LedgerKind, PaymentMethod};

#[tokio::test]
async fn test_record_and_list_revenue() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let entry = service
        .record_entry(
            LedgerKind::Revenue,
            date("2024-03-01"),
            10000,
            "Boutique sales".into(),
            PaymentMethod::Cheque,
        )
        .await?;
    assert_eq!(entry.amount_cents, 10000);

    let entries = service.list_entries(LedgerKind::Revenue).await?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, entry.id);
    assert_eq!(entries[0].source, "Boutique sales");
    assert_eq!(entries[0].payment_method, PaymentMethod::Cheque);
    assert_eq!(entries[0].date, date("2024-03-01"));

    Ok(())
}

#[tokio::test]
async fn test_ledgers_are_independent() -> Result<()> {
    let (service, _temp) = test_service().await?;

    add_revenue(&service, "2024-03-01", 10000).await?;
    add_expense(&service, "2024-03-01", 3000).await?;
    add_expense(&service, "2024-03-02", 2000).await?;

    assert_eq!(service.list_entries(LedgerKind::Revenue).await?.len(), 1);
    assert_eq!(service.list_entries(LedgerKind::Expense).await?.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_list_orders_most_recent_first() -> Result<()> {
    let (service, _temp) = test_service().await?;

    add_revenue(&service, "2024-03-01", 100).await?;
    add_revenue(&service, "2024-03-15", 200).await?;
    add_revenue(&service, "2024-03-10", 300).await?;

    let entries = service.list_entries(LedgerKind::Revenue).await?;
    let dates: Vec<_> = entries.iter().map(|e| e.date).collect();
    assert_eq!(
        dates,
        vec![date("2024-03-15"), date("2024-03-10"), date("2024-03-01")]
    );

    Ok(())
}

#[tokio::test]
async fn test_rejects_non_positive_amount() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let result = service
        .record_entry(
            LedgerKind::Revenue,
            date("2024-03-01"),
            0,
            "Sales".into(),
            PaymentMethod::Cash,
        )
        .await;
    assert!(matches!(result, Err(AppError::InvalidAmount(_))));

    let result = service
        .record_entry(
            LedgerKind::Expense,
            date("2024-03-01"),
            -500,
            "Supplies".into(),
            PaymentMethod::Cash,
        )
        .await;
    assert!(matches!(result, Err(AppError::InvalidAmount(_))));

    Ok(())
}

#[tokio::test]
async fn test_rejects_empty_source() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let result = service
        .record_entry(
            LedgerKind::Revenue,
            date("2024-03-01"),
            1000,
            "  ".into(),
            PaymentMethod::Cash,
        )
        .await;
    assert!(matches!(result, Err(AppError::MissingField("source"))));

    Ok(())
}

#[tokio::test]
async fn test_monthly_summaries_label_and_totals() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service
        .record_entry(
            LedgerKind::Revenue,
            date("2024-03-01"),
            10000,
            "Boutique".into(),
            PaymentMethod::Cash,
        )
        .await?;
    service
        .record_entry(
            LedgerKind::Revenue,
            date("2024-03-20"),
            5000,
            "Atelier".into(),
            PaymentMethod::Transfer,
        )
        .await?;
    service
        .record_entry(
            LedgerKind::Revenue,
            date("2024-04-02"),
            7000,
            "Boutique".into(),
            PaymentMethod::Cash,
        )
        .await?;

    let summaries = service.monthly_ledger_summaries(LedgerKind::Revenue).await?;
    assert_eq!(summaries.len(), 2);

    // Most recent month first
    assert_eq!(summaries[0].label, "Avril 2024");
    assert_eq!(summaries[0].total_cents, 7000);
    assert_eq!(summaries[0].entry_count, 1);

    assert_eq!(summaries[1].label, "Mars 2024");
    assert_eq!(summaries[1].total_cents, 15000);
    assert_eq!(summaries[1].entry_count, 2);
    assert!(summaries[1].sources.contains("Boutique"));
    assert!(summaries[1].sources.contains("Atelier"));

    Ok(())
}

#[tokio::test]
async fn test_monthly_summaries_empty_ledger() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let summaries = service.monthly_ledger_summaries(LedgerKind::Expense).await?;
    assert!(summaries.is_empty());

    Ok(())
}
