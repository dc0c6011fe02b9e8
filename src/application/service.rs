use chrono::{NaiveDate, NaiveTime};

use crate::domain::{
    compute_daily_results, compute_monthly_results, month_label, Cents, Contract, DailyResult,
    JournalCode, JournalEntry, JournalEntryId, LedgerEntry, LedgerKind, MonthlyResult,
    PaymentMethod,
};
use crate::storage::Repository;

use super::AppError;

/// Observer notified after a contract has been recorded. Registered
/// explicitly on the service; there is no implicit event bus.
pub trait ContractListener: Send + Sync {
    fn contract_recorded(&self, contract: &Contract);
}

/// Dashboard figures for the home view: how many contracts exist and the
/// most recent ones.
pub struct DashboardSummary {
    pub contract_count: i64,
    pub recent_contracts: Vec<Contract>,
}

/// Per-month view of a single ledger: which sources contributed and the
/// total amount, labeled with the French month name.
pub struct LedgerMonthSummary {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub sources: String,
    pub total_cents: Cents,
    pub entry_count: i64,
}

/// Application service providing high-level operations over all stores.
/// This is the primary interface for any client (CLI, TUI, API, etc.).
pub struct AccountingService {
    repo: Repository,
    contract_listeners: Vec<Box<dyn ContractListener>>,
}

impl AccountingService {
    /// Create a new service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self {
            repo,
            contract_listeners: Vec::new(),
        }
    }

    /// Initialize a new database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Register an observer for recorded contracts.
    pub fn register_contract_listener(&mut self, listener: Box<dyn ContractListener>) {
        self.contract_listeners.push(listener);
    }

    // ========================
    // Ledger operations
    // ========================

    /// Record a revenue or expense entry.
    pub async fn record_entry(
        &self,
        kind: LedgerKind,
        date: NaiveDate,
        amount_cents: Cents,
        source: String,
        payment_method: PaymentMethod,
    ) -> Result<LedgerEntry, AppError> {
        if amount_cents <= 0 {
            return Err(AppError::InvalidAmount(
                "Amount must be positive".to_string(),
            ));
        }
        if source.trim().is_empty() {
            return Err(AppError::MissingField("source"));
        }

        let entry = LedgerEntry::new(date, amount_cents, source, payment_method);
        self.repo.save_ledger_entry(kind, &entry).await?;
        Ok(entry)
    }

    /// List all entries of one ledger, most recent date first.
    pub async fn list_entries(&self, kind: LedgerKind) -> Result<Vec<LedgerEntry>, AppError> {
        Ok(self.repo.list_ledger_entries(kind).await?)
    }

    /// Monthly view of one ledger with localized month labels.
    pub async fn monthly_ledger_summaries(
        &self,
        kind: LedgerKind,
    ) -> Result<Vec<LedgerMonthSummary>, AppError> {
        let totals = self.repo.monthly_ledger_totals(kind).await?;

        totals
            .into_iter()
            .map(|row| {
                let (year, month) = parse_month_key(&row.month)?;
                Ok(LedgerMonthSummary {
                    year,
                    month,
                    label: month_label(year, month),
                    sources: row.sources,
                    total_cents: row.total_cents,
                    entry_count: row.entry_count,
                })
            })
            .collect()
    }

    // ========================
    // Results
    // ========================

    /// Per-day financial results over the whole history of both ledgers.
    pub async fn daily_results(&self) -> Result<Vec<DailyResult>, AppError> {
        let revenues = self.repo.list_ledger_entries(LedgerKind::Revenue).await?;
        let expenses = self.repo.list_ledger_entries(LedgerKind::Expense).await?;
        Ok(compute_daily_results(&revenues, &expenses))
    }

    /// Per-month financial results over the whole history of both ledgers.
    pub async fn monthly_results(&self) -> Result<Vec<MonthlyResult>, AppError> {
        let revenues = self.repo.list_ledger_entries(LedgerKind::Revenue).await?;
        let expenses = self.repo.list_ledger_entries(LedgerKind::Expense).await?;
        Ok(compute_monthly_results(&revenues, &expenses))
    }

    // ========================
    // Contract operations
    // ========================

    /// Record a signed contract and notify registered listeners.
    pub async fn record_contract(
        &self,
        client_name: String,
        vendor_name: String,
        amount_cents: Cents,
        description1: Option<String>,
        description2: Option<String>,
        signed_on: NaiveDate,
    ) -> Result<Contract, AppError> {
        if amount_cents <= 0 {
            return Err(AppError::InvalidAmount(
                "Amount must be positive".to_string(),
            ));
        }
        if client_name.trim().is_empty() {
            return Err(AppError::MissingField("client name"));
        }
        if vendor_name.trim().is_empty() {
            return Err(AppError::MissingField("vendor name"));
        }

        let mut contract = Contract::new(client_name, vendor_name, amount_cents, signed_on);
        if let Some(desc) = description1 {
            contract = contract.with_description1(desc);
        }
        if let Some(desc) = description2 {
            contract = contract.with_description2(desc);
        }

        self.repo.save_contract(&contract).await?;

        for listener in &self.contract_listeners {
            listener.contract_recorded(&contract);
        }

        Ok(contract)
    }

    /// List all contracts, most recently signed first.
    pub async fn list_contracts(&self) -> Result<Vec<Contract>, AppError> {
        Ok(self.repo.list_contracts().await?)
    }

    /// Dashboard summary: contract count plus the ten most recent contracts.
    pub async fn dashboard(&self) -> Result<DashboardSummary, AppError> {
        let contract_count = self.repo.contract_count().await?;
        let recent_contracts = self.repo.recent_contracts(10).await?;
        Ok(DashboardSummary {
            contract_count,
            recent_contracts,
        })
    }

    // ========================
    // Journal operations
    // ========================

    /// Record a journal transaction.
    #[allow(clippy::too_many_arguments)]
    pub async fn record_journal_entry(
        &self,
        code: JournalCode,
        author: String,
        recipient: String,
        currency: String,
        label: Option<String>,
        document_no: Option<String>,
        amount_cents: Cents,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<JournalEntry, AppError> {
        if amount_cents <= 0 {
            return Err(AppError::InvalidAmount(
                "Amount must be positive".to_string(),
            ));
        }
        if author.trim().is_empty() {
            return Err(AppError::MissingField("author"));
        }
        if recipient.trim().is_empty() {
            return Err(AppError::MissingField("recipient"));
        }
        if currency.trim().is_empty() {
            return Err(AppError::MissingField("currency"));
        }

        let mut entry = JournalEntry::new(code, author, recipient, currency, amount_cents, date, time);
        if let Some(label) = label {
            entry = entry.with_label(label);
        }
        if let Some(document_no) = document_no {
            entry = entry.with_document_no(document_no);
        }

        self.repo.save_journal_entry(&entry).await?;
        Ok(entry)
    }

    /// List all journal entries, most recent first.
    pub async fn list_journal_entries(&self) -> Result<Vec<JournalEntry>, AppError> {
        Ok(self.repo.list_journal_entries().await?)
    }

    /// Delete a journal entry by ID.
    pub async fn delete_journal_entry(&self, id: JournalEntryId) -> Result<(), AppError> {
        if self.repo.delete_journal_entry(id).await? {
            Ok(())
        } else {
            Err(AppError::JournalEntryNotFound(id.to_string()))
        }
    }
}

/// Split a canonical `YYYY-MM` key into year and month.
fn parse_month_key(key: &str) -> Result<(i32, u32), AppError> {
    let invalid = || AppError::InvalidMonthKey(key.to_string());

    let (year_str, month_str) = key.split_once('-').ok_or_else(|| invalid())?;
    let year: i32 = year_str.parse().map_err(|_| invalid())?;
    let month: u32 = month_str.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month_key() {
        assert!(matches!(parse_month_key("2024-03"), Ok((2024, 3))));
        assert!(matches!(parse_month_key("1999-12"), Ok((1999, 12))));
        assert!(parse_month_key("2024-13").is_err());
        assert!(parse_month_key("2024").is_err());
        assert!(parse_month_key("2024-xx").is_err());
    }
}
