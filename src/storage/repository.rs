use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::domain::{
    Cents, Contract, JournalCode, JournalEntry, JournalEntryId, LedgerEntry, LedgerKind,
    PaymentMethod,
};

use super::{MIGRATION_001_INITIAL, MIGRATION_002_JOURNAL};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Monthly totals for a single ledger, straight from SQL aggregation.
/// `month` is the canonical `YYYY-MM` key produced by strftime.
#[derive(Debug, Clone)]
pub struct MonthlyLedgerTotals {
    pub month: String,
    pub sources: String,
    pub total_cents: Cents,
    pub entry_count: i64,
}

/// Repository for persisting and querying all record types. Owns the single
/// SQLite connection pool for the application process; every store shares it.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::raw_sql(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;

        sqlx::raw_sql(MIGRATION_002_JOURNAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 002")?;

        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    fn ledger_table(kind: LedgerKind) -> &'static str {
        match kind {
            LedgerKind::Revenue => "revenues",
            LedgerKind::Expense => "expenses",
        }
    }

    // ========================
    // Ledger operations
    // ========================

    /// Save a new ledger entry into the revenue or expense table.
    pub async fn save_ledger_entry(&self, kind: LedgerKind, entry: &LedgerEntry) -> Result<()> {
        let query = format!(
            "INSERT INTO {} (id, date, amount_cents, source, payment_method, recorded_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            Self::ledger_table(kind)
        );

        sqlx::query(&query)
            .bind(entry.id.to_string())
            .bind(entry.date.format(DATE_FORMAT).to_string())
            .bind(entry.amount_cents)
            .bind(&entry.source)
            .bind(entry.payment_method.as_str())
            .bind(entry.recorded_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to save {} entry", kind))?;

        Ok(())
    }

    /// List all entries of one ledger, most recent date first.
    pub async fn list_ledger_entries(&self, kind: LedgerKind) -> Result<Vec<LedgerEntry>> {
        let query = format!(
            "SELECT id, date, amount_cents, source, payment_method, recorded_at
             FROM {}
             ORDER BY date DESC, recorded_at DESC",
            Self::ledger_table(kind)
        );

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Failed to list {} entries", kind))?;

        rows.iter().map(Self::row_to_ledger_entry).collect()
    }

    /// Monthly totals for one ledger: `YYYY-MM` key, concatenated sources and
    /// summed amount, most recent month first.
    pub async fn monthly_ledger_totals(&self, kind: LedgerKind) -> Result<Vec<MonthlyLedgerTotals>> {
        let query = format!(
            "SELECT strftime('%Y-%m', date) AS month,
                    GROUP_CONCAT(source, ', ') AS sources,
                    SUM(amount_cents) AS total_cents,
                    COUNT(*) AS entry_count
             FROM {}
             GROUP BY month
             ORDER BY month DESC",
            Self::ledger_table(kind)
        );

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Failed to aggregate {} entries by month", kind))?;

        Ok(rows
            .iter()
            .map(|row| MonthlyLedgerTotals {
                month: row.get("month"),
                sources: row.get("sources"),
                total_cents: row.get("total_cents"),
                entry_count: row.get("entry_count"),
            })
            .collect())
    }

    fn row_to_ledger_entry(row: &sqlx::sqlite::SqliteRow) -> Result<LedgerEntry> {
        let id_str: String = row.get("id");
        let date_str: String = row.get("date");
        let method_str: String = row.get("payment_method");
        let recorded_at_str: String = row.get("recorded_at");

        Ok(LedgerEntry {
            id: Uuid::parse_str(&id_str).context("Invalid entry ID")?,
            date: NaiveDate::parse_from_str(&date_str, DATE_FORMAT).context("Invalid date")?,
            amount_cents: row.get("amount_cents"),
            source: row.get("source"),
            payment_method: PaymentMethod::from_str(&method_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid payment method: {}", method_str))?,
            recorded_at: DateTime::parse_from_rfc3339(&recorded_at_str)
                .context("Invalid recorded_at timestamp")?
                .with_timezone(&Utc),
        })
    }

    // ========================
    // Contract operations
    // ========================

    /// Save a new contract to the database.
    pub async fn save_contract(&self, contract: &Contract) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO contracts (id, client_name, vendor_name, amount_cents, description1, description2, signed_on, recorded_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(contract.id.to_string())
        .bind(&contract.client_name)
        .bind(&contract.vendor_name)
        .bind(contract.amount_cents)
        .bind(&contract.description1)
        .bind(&contract.description2)
        .bind(contract.signed_on.format(DATE_FORMAT).to_string())
        .bind(contract.recorded_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to save contract")?;
        Ok(())
    }

    /// List all contracts, most recently signed first.
    pub async fn list_contracts(&self) -> Result<Vec<Contract>> {
        let rows = sqlx::query(
            r#"
            SELECT id, client_name, vendor_name, amount_cents, description1, description2, signed_on, recorded_at
            FROM contracts
            ORDER BY signed_on DESC, recorded_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list contracts")?;

        rows.iter().map(Self::row_to_contract).collect()
    }

    /// The most recently signed contracts, up to `limit`.
    pub async fn recent_contracts(&self, limit: i64) -> Result<Vec<Contract>> {
        let rows = sqlx::query(
            r#"
            SELECT id, client_name, vendor_name, amount_cents, description1, description2, signed_on, recorded_at
            FROM contracts
            ORDER BY signed_on DESC, recorded_at DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list recent contracts")?;

        rows.iter().map(Self::row_to_contract).collect()
    }

    /// Total number of recorded contracts.
    pub async fn contract_count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM contracts")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count contracts")?;

        Ok(row.get("count"))
    }

    fn row_to_contract(row: &sqlx::sqlite::SqliteRow) -> Result<Contract> {
        let id_str: String = row.get("id");
        let signed_on_str: String = row.get("signed_on");
        let recorded_at_str: String = row.get("recorded_at");

        Ok(Contract {
            id: Uuid::parse_str(&id_str).context("Invalid contract ID")?,
            client_name: row.get("client_name"),
            vendor_name: row.get("vendor_name"),
            amount_cents: row.get("amount_cents"),
            description1: row.get("description1"),
            description2: row.get("description2"),
            signed_on: NaiveDate::parse_from_str(&signed_on_str, DATE_FORMAT)
                .context("Invalid signed_on date")?,
            recorded_at: DateTime::parse_from_rfc3339(&recorded_at_str)
                .context("Invalid recorded_at timestamp")?
                .with_timezone(&Utc),
        })
    }

    // ========================
    // Journal operations
    // ========================

    /// Save a new journal entry to the database.
    pub async fn save_journal_entry(&self, entry: &JournalEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO journal_entries (id, code, author, recipient, currency, label, document_no, amount_cents, date, time)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(entry.id.to_string())
        .bind(entry.code.as_str())
        .bind(&entry.author)
        .bind(&entry.recipient)
        .bind(&entry.currency)
        .bind(&entry.label)
        .bind(&entry.document_no)
        .bind(entry.amount_cents)
        .bind(entry.date.format(DATE_FORMAT).to_string())
        .bind(entry.time.format(TIME_FORMAT).to_string())
        .execute(&self.pool)
        .await
        .context("Failed to save journal entry")?;
        Ok(())
    }

    /// List all journal entries, most recent first.
    pub async fn list_journal_entries(&self) -> Result<Vec<JournalEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, code, author, recipient, currency, label, document_no, amount_cents, date, time
            FROM journal_entries
            ORDER BY date DESC, time DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list journal entries")?;

        rows.iter().map(Self::row_to_journal_entry).collect()
    }

    /// Delete a journal entry by ID. Returns false if no row matched.
    pub async fn delete_journal_entry(&self, id: JournalEntryId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM journal_entries WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to delete journal entry")?;

        Ok(result.rows_affected() > 0)
    }

    fn row_to_journal_entry(row: &sqlx::sqlite::SqliteRow) -> Result<JournalEntry> {
        let id_str: String = row.get("id");
        let code_str: String = row.get("code");
        let date_str: String = row.get("date");
        let time_str: String = row.get("time");

        Ok(JournalEntry {
            id: Uuid::parse_str(&id_str).context("Invalid journal entry ID")?,
            code: JournalCode::from_str(&code_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid journal code: {}", code_str))?,
            author: row.get("author"),
            recipient: row.get("recipient"),
            currency: row.get("currency"),
            label: row.get("label"),
            document_no: row.get("document_no"),
            amount_cents: row.get("amount_cents"),
            date: NaiveDate::parse_from_str(&date_str, DATE_FORMAT).context("Invalid date")?,
            time: NaiveTime::parse_from_str(&time_str, TIME_FORMAT).context("Invalid time")?,
        })
    }
}
