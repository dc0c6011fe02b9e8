mod common;

use anyhow::Result;
use common::{date, test_service, time};
use comptoir::application::AppError;
use comptoir::domain::JournalCode;
use uuid::Uuid;

#[tokio::test]
async fn test_record_and_list_journal_entries() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let entry = service
        .record_journal_entry(
            JournalCode::Sale,
            "A. Diallo".into(),
            "Client Kone".into(),
            "XOF".into(),
            Some("Cash sale".into()),
            Some("PC-0042".into()),
            50000,
            date("2024-03-01"),
            time("10:30:00"),
        )
        .await?;

    let entries = service.list_journal_entries().await?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, entry.id);
    assert_eq!(entries[0].code, JournalCode::Sale);
    assert_eq!(entries[0].label.as_deref(), Some("Cash sale"));
    assert_eq!(entries[0].document_no.as_deref(), Some("PC-0042"));
    assert_eq!(entries[0].time, time("10:30:00"));

    Ok(())
}

#[tokio::test]
async fn test_list_orders_by_date_then_time_descending() -> Result<()> {
    let (service, _temp) = test_service().await?;

    for (day, at) in [
        ("2024-03-01", "09:00:00"),
        ("2024-03-02", "08:00:00"),
        ("2024-03-01", "17:45:00"),
    ] {
        service
            .record_journal_entry(
                JournalCode::Purchase,
                "A. Diallo".into(),
                "Supplier".into(),
                "XOF".into(),
                None,
                None,
                1000,
                date(day),
                time(at),
            )
            .await?;
    }

    let entries = service.list_journal_entries().await?;
    let order: Vec<_> = entries
        .iter()
        .map(|e| (e.date, e.time))
        .collect();
    assert_eq!(
        order,
        vec![
            (date("2024-03-02"), time("08:00:00")),
            (date("2024-03-01"), time("17:45:00")),
            (date("2024-03-01"), time("09:00:00")),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_delete_journal_entry() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let entry = service
        .record_journal_entry(
            JournalCode::Disbursement,
            "A. Diallo".into(),
            "Landlord".into(),
            "XOF".into(),
            None,
            None,
            75000,
            date("2024-03-01"),
            time("11:00:00"),
        )
        .await?;

    service.delete_journal_entry(entry.id).await?;
    assert!(service.list_journal_entries().await?.is_empty());

    // Deleting again fails: the row is gone
    let result = service.delete_journal_entry(entry.id).await;
    assert!(matches!(result, Err(AppError::JournalEntryNotFound(_))));

    Ok(())
}

#[tokio::test]
async fn test_delete_unknown_id_fails() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let result = service.delete_journal_entry(Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::JournalEntryNotFound(_))));

    Ok(())
}

#[tokio::test]
async fn test_journal_validation() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let result = service
        .record_journal_entry(
            JournalCode::Sale,
            "".into(),
            "Client".into(),
            "XOF".into(),
            None,
            None,
            1000,
            date("2024-03-01"),
            time("10:00:00"),
        )
        .await;
    assert!(matches!(result, Err(AppError::MissingField("author"))));

    let result = service
        .record_journal_entry(
            JournalCode::Sale,
            "A. Diallo".into(),
            "Client".into(),
            "XOF".into(),
            None,
            None,
            -5,
            date("2024-03-01"),
            time("10:00:00"),
        )
        .await;
    assert!(matches!(result, Err(AppError::InvalidAmount(_))));

    Ok(())
}

#[tokio::test]
async fn test_optional_fields_stay_empty() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service
        .record_journal_entry(
            JournalCode::Sale,
            "A. Diallo".into(),
            "Client".into(),
            "XOF".into(),
            None,
            None,
            1000,
            date("2024-03-01"),
            time("10:00:00"),
        )
        .await?;

    let entries = service.list_journal_entries().await?;
    assert_eq!(entries[0].label, None);
    assert_eq!(entries[0].document_no, None);

    Ok(())
}
