use anyhow::Result;
use std::io::Write;

use crate::application::AccountingService;
use crate::domain::LedgerKind;

/// Exporter for converting ledger data and computed results to CSV.
/// Amounts are exported as raw cents.
pub struct Exporter<'a> {
    service: &'a AccountingService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a AccountingService) -> Self {
        Self { service }
    }

    /// Export daily financial results to CSV format.
    pub async fn export_daily_results_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let results = self.service.daily_results().await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "date",
            "total_revenue",
            "total_expense",
            "gross",
            "tax",
            "surcharge",
            "net",
        ])?;

        let mut count = 0;
        for row in &results {
            csv_writer.write_record(&[
                row.date.format("%Y-%m-%d").to_string(),
                row.total_revenue.to_string(),
                row.total_expense.to_string(),
                row.gross.to_string(),
                row.tax.to_string(),
                row.surcharge.to_string(),
                row.net.to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export monthly financial results to CSV format.
    pub async fn export_monthly_results_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let results = self.service.monthly_results().await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "month",
            "label",
            "total_revenue",
            "total_expense",
            "gross",
            "tax",
            "surcharge",
            "net",
        ])?;

        let mut count = 0;
        for row in &results {
            csv_writer.write_record(&[
                format!("{:04}-{:02}", row.year, row.month),
                row.label.clone(),
                row.total_revenue.to_string(),
                row.total_expense.to_string(),
                row.gross.to_string(),
                row.tax.to_string(),
                row.surcharge.to_string(),
                row.net.to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export one ledger (revenues or expenses) to CSV format.
    pub async fn export_ledger_csv<W: Write>(&self, kind: LedgerKind, writer: W) -> Result<usize> {
        let entries = self.service.list_entries(kind).await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "id",
            "date",
            "amount_cents",
            "source",
            "payment_method",
            "recorded_at",
        ])?;

        let mut count = 0;
        for entry in &entries {
            csv_writer.write_record(&[
                entry.id.to_string(),
                entry.date.format("%Y-%m-%d").to_string(),
                entry.amount_cents.to_string(),
                entry.source.clone(),
                entry.payment_method.as_str().to_string(),
                entry.recorded_at.to_rfc3339(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the transaction journal to CSV format.
    pub async fn export_journal_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let entries = self.service.list_journal_entries().await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "id",
            "code",
            "author",
            "recipient",
            "currency",
            "label",
            "document_no",
            "amount_cents",
            "date",
            "time",
        ])?;

        let mut count = 0;
        for entry in &entries {
            csv_writer.write_record(&[
                entry.id.to_string(),
                entry.code.as_str().to_string(),
                entry.author.clone(),
                entry.recipient.clone(),
                entry.currency.clone(),
                entry.label.clone().unwrap_or_default(),
                entry.document_no.clone().unwrap_or_default(),
                entry.amount_cents.to_string(),
                entry.date.format("%Y-%m-%d").to_string(),
                entry.time.format("%H:%M:%S").to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }
}
