mod repository;

pub use repository::*;

/// SQL migration for the initial schema (ledgers and contracts)
pub const MIGRATION_001_INITIAL: &str = include_str!("migrations/001_initial.sql");

/// SQL migration for the transaction journal
pub const MIGRATION_002_JOURNAL: &str = include_str!("migrations/002_journal.sql");
