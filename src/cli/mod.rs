use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::application::{AccountingService, ContractListener};
use crate::domain::{format_cents, parse_cents, Contract, JournalCode, LedgerKind, PaymentMethod};

/// Comptoir - Small Business Accounting Ledger
#[derive(Parser)]
#[command(name = "comptoir")]
#[command(about = "A local-first accounting tool: contracts, revenues, expenses and results")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "comptoir.db")]
    pub database: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Revenue ledger commands
    #[command(subcommand)]
    Revenue(LedgerCommands),

    /// Expense ledger commands
    #[command(subcommand)]
    Expense(LedgerCommands),

    /// Contract management commands
    #[command(subcommand)]
    Contract(ContractCommands),

    /// Transaction journal commands
    #[command(subcommand)]
    Journal(JournalCommands),

    /// Daily and monthly financial results
    #[command(subcommand)]
    Results(ResultsCommands),

    /// Export data to CSV
    Export {
        /// What to export: daily-results, monthly-results, revenues, expenses, journal
        export_type: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum LedgerCommands {
    /// Record a new entry
    Add {
        /// Amount (e.g., "50.00" or "50")
        amount: String,

        /// Where the money came from or went to
        #[arg(short, long)]
        source: String,

        /// Payment method: cash, cheque, transfer, card, other
        #[arg(short, long, default_value = "cash")]
        method: String,

        /// Date of the entry (ISO 8601 format: YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List all entries
    List,

    /// Show monthly totals per source
    Monthly,
}

#[derive(Subcommand)]
pub enum ContractCommands {
    /// Record a signed contract
    Record {
        /// Client name
        client: String,

        /// Vendor name
        vendor: String,

        /// Contract amount (e.g., "2500.00")
        amount: String,

        /// First description line
        #[arg(long)]
        description1: Option<String>,

        /// Second description line
        #[arg(long)]
        description2: Option<String>,

        /// Signature date (ISO 8601 format: YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List all contracts
    List,

    /// Show contract count and most recent contracts
    Summary,
}

#[derive(Subcommand)]
pub enum JournalCommands {
    /// Record a journal transaction
    Add {
        /// Journal code: ACH, DEP, VEN
        code: String,

        /// Amount (e.g., "50.00" or "50")
        amount: String,

        /// Who recorded the transaction
        #[arg(long)]
        author: String,

        /// Who the transaction is addressed to
        #[arg(long)]
        recipient: String,

        /// Currency
        #[arg(long, default_value = "XOF")]
        currency: String,

        /// Free-text narrative
        #[arg(short, long)]
        label: Option<String>,

        /// Supporting document number
        #[arg(long)]
        document: Option<String>,

        /// Date of the transaction (ISO 8601 format: YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List all journal entries
    List,

    /// Delete a journal entry
    Delete {
        /// Journal entry ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ResultsCommands {
    /// Per-day results: revenue, expense, gross, tax, surcharge, net
    Daily {
        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Per-month results with localized month labels
    Monthly {
        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
}

/// Listener logging recorded contracts to stderr when --verbose is set.
struct VerboseContractListener;

impl ContractListener for VerboseContractListener {
    fn contract_recorded(&self, contract: &Contract) {
        eprintln!(
            "[contract] {} signed by {} on {} ({})",
            contract.client_name,
            contract.vendor_name,
            contract.signed_on.format("%Y-%m-%d"),
            format_cents(contract.amount_cents)
        );
    }
}

impl Cli {
    async fn service(&self) -> Result<AccountingService> {
        let mut service = AccountingService::connect(&self.database).await?;
        if self.verbose {
            service.register_contract_listener(Box::new(VerboseContractListener));
        }
        Ok(service)
    }

    pub async fn run(self) -> Result<()> {
        match &self.command {
            Commands::Init => {
                AccountingService::init(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Revenue(ledger_cmd) => {
                let service = self.service().await?;
                run_ledger_command(&service, LedgerKind::Revenue, ledger_cmd).await?;
            }

            Commands::Expense(ledger_cmd) => {
                let service = self.service().await?;
                run_ledger_command(&service, LedgerKind::Expense, ledger_cmd).await?;
            }

            Commands::Contract(contract_cmd) => {
                let service = self.service().await?;
                run_contract_command(&service, contract_cmd).await?;
            }

            Commands::Journal(journal_cmd) => {
                let service = self.service().await?;
                run_journal_command(&service, journal_cmd).await?;
            }

            Commands::Results(results_cmd) => {
                let service = self.service().await?;
                run_results_command(&service, results_cmd).await?;
            }

            Commands::Export {
                export_type,
                output,
            } => {
                let service = self.service().await?;
                run_export_command(&service, export_type, output.as_deref()).await?;
            }
        }

        Ok(())
    }
}

async fn run_ledger_command(
    service: &AccountingService,
    kind: LedgerKind,
    cmd: &LedgerCommands,
) -> Result<()> {
    match cmd {
        LedgerCommands::Add {
            amount,
            source,
            method,
            date,
        } => {
            let amount_cents =
                parse_cents(amount).context("Invalid amount format. Use '50.00' or '50'")?;
            let payment_method = PaymentMethod::from_str(method).ok_or_else(|| {
                anyhow::anyhow!(
                    "Invalid payment method '{}'. Valid methods: cash, cheque, transfer, card, other",
                    method
                )
            })?;
            let date = parse_date_or_today(date.as_deref())?;

            let entry = service
                .record_entry(kind, date, amount_cents, source.clone(), payment_method)
                .await?;

            println!(
                "Recorded {}: {} on {} from {} ({})",
                kind,
                format_cents(entry.amount_cents),
                entry.date.format("%Y-%m-%d"),
                entry.source,
                entry.id
            );
        }

        LedgerCommands::List => {
            let entries = service.list_entries(kind).await?;
            if entries.is_empty() {
                println!("No {} entries found.", kind);
            } else {
                println!(
                    "{:<12} {:>12} {:<20} {:<10}",
                    "DATE", "AMOUNT", "SOURCE", "METHOD"
                );
                println!("{}", "-".repeat(58));
                for entry in entries {
                    println!(
                        "{:<12} {:>12} {:<20} {:<10}",
                        entry.date.format("%Y-%m-%d"),
                        format_cents(entry.amount_cents),
                        truncate(&entry.source, 20),
                        entry.payment_method
                    );
                }
            }
        }

        LedgerCommands::Monthly => {
            let summaries = service.monthly_ledger_summaries(kind).await?;
            if summaries.is_empty() {
                println!("No {} entries found.", kind);
            } else {
                println!(
                    "{:<16} {:>8} {:>12} SOURCES",
                    "MONTH", "ENTRIES", "TOTAL"
                );
                println!("{}", "-".repeat(70));
                for summary in summaries {
                    println!(
                        "{:<16} {:>8} {:>12} {}",
                        summary.label,
                        summary.entry_count,
                        format_cents(summary.total_cents),
                        truncate(&summary.sources, 30)
                    );
                }
            }
        }
    }
    Ok(())
}

async fn run_contract_command(service: &AccountingService, cmd: &ContractCommands) -> Result<()> {
    match cmd {
        ContractCommands::Record {
            client,
            vendor,
            amount,
            description1,
            description2,
            date,
        } => {
            let amount_cents =
                parse_cents(amount).context("Invalid amount format. Use '2500.00' or '2500'")?;
            let signed_on = parse_date_or_today(date.as_deref())?;

            let contract = service
                .record_contract(
                    client.clone(),
                    vendor.clone(),
                    amount_cents,
                    description1.clone(),
                    description2.clone(),
                    signed_on,
                )
                .await?;

            println!(
                "Recorded contract: {} with {} for {} ({})",
                contract.client_name,
                contract.vendor_name,
                format_cents(contract.amount_cents),
                contract.id
            );
            println!(
                "  Deposit (20%):    {}",
                format_cents(contract.deposit_cents())
            );
            println!(
                "  Payment deadline: {}",
                contract.payment_deadline().format("%Y-%m-%d")
            );
        }

        ContractCommands::List => {
            let contracts = service.list_contracts().await?;
            if contracts.is_empty() {
                println!("No contracts found.");
            } else {
                println!(
                    "{:<12} {:<20} {:<20} {:>12} {:>12}",
                    "SIGNED", "CLIENT", "VENDOR", "AMOUNT", "DEPOSIT"
                );
                println!("{}", "-".repeat(80));
                for contract in contracts {
                    println!(
                        "{:<12} {:<20} {:<20} {:>12} {:>12}",
                        contract.signed_on.format("%Y-%m-%d"),
                        truncate(&contract.client_name, 20),
                        truncate(&contract.vendor_name, 20),
                        format_cents(contract.amount_cents),
                        format_cents(contract.deposit_cents())
                    );
                }
            }
        }

        ContractCommands::Summary => {
            let summary = service.dashboard().await?;
            println!("Signed contracts: {}", summary.contract_count);
            if !summary.recent_contracts.is_empty() {
                println!();
                println!("Most recent:");
                for contract in &summary.recent_contracts {
                    println!(
                        "  {} - {} signed by {} on {}",
                        format_cents(contract.amount_cents),
                        contract.client_name,
                        contract.vendor_name,
                        contract.signed_on.format("%Y-%m-%d")
                    );
                }
            }
        }
    }
    Ok(())
}

async fn run_journal_command(service: &AccountingService, cmd: &JournalCommands) -> Result<()> {
    match cmd {
        JournalCommands::Add {
            code,
            amount,
            author,
            recipient,
            currency,
            label,
            document,
            date,
        } => {
            let journal_code = JournalCode::from_str(code).ok_or_else(|| {
                anyhow::anyhow!("Invalid journal code '{}'. Valid codes: ACH, DEP, VEN", code)
            })?;
            let amount_cents =
                parse_cents(amount).context("Invalid amount format. Use '50.00' or '50'")?;
            let date = parse_date_or_today(date.as_deref())?;
            let time = current_time();

            let entry = service
                .record_journal_entry(
                    journal_code,
                    author.clone(),
                    recipient.clone(),
                    currency.clone(),
                    label.clone(),
                    document.clone(),
                    amount_cents,
                    date,
                    time,
                )
                .await?;

            println!(
                "Recorded journal entry: {} {} {} -> {} ({})",
                entry.code,
                format_cents(entry.amount_cents),
                entry.author,
                entry.recipient,
                entry.id
            );
        }

        JournalCommands::List => {
            let entries = service.list_journal_entries().await?;
            if entries.is_empty() {
                println!("No journal entries found.");
            } else {
                println!(
                    "{:<36} {:<12} {:<10} {:<5} {:>12} {:<15} {:<15}",
                    "ID", "DATE", "TIME", "CODE", "AMOUNT", "AUTHOR", "RECIPIENT"
                );
                println!("{}", "-".repeat(110));
                for entry in entries {
                    println!(
                        "{:<36} {:<12} {:<10} {:<5} {:>12} {:<15} {:<15}",
                        entry.id,
                        entry.date.format("%Y-%m-%d"),
                        entry.time.format("%H:%M:%S"),
                        entry.code,
                        format_cents(entry.amount_cents),
                        truncate(&entry.author, 15),
                        truncate(&entry.recipient, 15)
                    );
                }
            }
        }

        JournalCommands::Delete { id } => {
            let entry_id = Uuid::parse_str(id)
                .context("Invalid journal entry ID format (expected UUID)")?;
            service.delete_journal_entry(entry_id).await?;
            println!("Deleted journal entry: {}", entry_id);
        }
    }
    Ok(())
}

async fn run_results_command(service: &AccountingService, cmd: &ResultsCommands) -> Result<()> {
    match cmd {
        ResultsCommands::Daily { format } => {
            let results = service.daily_results().await?;

            match format.as_str() {
                "json" => {
                    println!("{}", serde_json::to_string_pretty(&results)?);
                }
                "csv" => {
                    println!("date,total_revenue,total_expense,gross,tax,surcharge,net");
                    for row in &results {
                        println!(
                            "{},{},{},{},{},{},{}",
                            row.date.format("%Y-%m-%d"),
                            row.total_revenue,
                            row.total_expense,
                            row.gross,
                            row.tax,
                            row.surcharge,
                            row.net
                        );
                    }
                }
                _ => {
                    // Table format
                    println!("Daily Results");
                    println!();
                    println!(
                        "{:<12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
                        "DATE", "REVENUE", "EXPENSE", "GROSS", "TAX 18%", "SURCH 5%", "NET"
                    );
                    println!("{}", "-".repeat(90));

                    for row in &results {
                        println!(
                            "{:<12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
                            row.date.format("%Y-%m-%d"),
                            format_cents(row.total_revenue),
                            format_cents(row.total_expense),
                            format_cents(row.gross),
                            format_cents(row.tax),
                            format_cents(row.surcharge),
                            format_cents(row.net)
                        );
                    }
                }
            }
        }

        ResultsCommands::Monthly { format } => {
            let results = service.monthly_results().await?;

            match format.as_str() {
                "json" => {
                    println!("{}", serde_json::to_string_pretty(&results)?);
                }
                "csv" => {
                    println!("month,label,total_revenue,total_expense,gross,tax,surcharge,net");
                    for row in &results {
                        println!(
                            "{:04}-{:02},{},{},{},{},{},{},{}",
                            row.year,
                            row.month,
                            row.label,
                            row.total_revenue,
                            row.total_expense,
                            row.gross,
                            row.tax,
                            row.surcharge,
                            row.net
                        );
                    }
                }
                _ => {
                    // Table format
                    println!("Monthly Results");
                    println!();
                    println!(
                        "{:<16} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
                        "MONTH", "REVENUE", "EXPENSE", "GROSS", "TAX 18%", "SURCH 5%", "NET"
                    );
                    println!("{}", "-".repeat(94));

                    for row in &results {
                        println!(
                            "{:<16} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
                            row.label,
                            format_cents(row.total_revenue),
                            format_cents(row.total_expense),
                            format_cents(row.gross),
                            format_cents(row.tax),
                            format_cents(row.surcharge),
                            format_cents(row.net)
                        );
                    }
                }
            }
        }
    }
    Ok(())
}

async fn run_export_command(
    service: &AccountingService,
    export_type: &str,
    output: Option<&str>,
) -> Result<()> {
    use crate::io::Exporter;
    use std::fs::File;
    use std::io::{stdout, Write};

    let exporter = Exporter::new(service);

    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    let count = match export_type {
        "daily-results" => exporter.export_daily_results_csv(writer).await?,
        "monthly-results" => exporter.export_monthly_results_csv(writer).await?,
        "revenues" => exporter.export_ledger_csv(LedgerKind::Revenue, writer).await?,
        "expenses" => exporter.export_ledger_csv(LedgerKind::Expense, writer).await?,
        "journal" => exporter.export_journal_csv(writer).await?,
        _ => {
            anyhow::bail!(
                "Invalid export type '{}'. Valid types: daily-results, monthly-results, revenues, expenses, journal",
                export_type
            );
        }
    };

    if output.is_some() {
        eprintln!("Exported {} rows", count);
    }

    Ok(())
}

fn parse_date_or_today(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(date_str) => NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .with_context(|| format!("Invalid date format '{}'. Use YYYY-MM-DD", date_str)),
        None => Ok(Local::now().date_naive()),
    }
}

fn current_time() -> NaiveTime {
    use chrono::Timelike;
    // Whole seconds only; the journal stores HH:MM:SS
    Local::now().time().with_nanosecond(0).unwrap()
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
