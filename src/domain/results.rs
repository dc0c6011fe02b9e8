use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{apply_rate, Cents, LedgerEntry};

/// Tax rate applied to the gross result, in percent.
pub const TAX_RATE_PERCENT: i64 = 18;

/// Municipal surcharge ("centimes additionnels") applied to the gross result,
/// in percent.
pub const SURCHARGE_RATE_PERCENT: i64 = 5;

/// French month names, indexed by month number 1-12.
const MONTH_NAMES: [&str; 12] = [
    "Janvier",
    "Février",
    "Mars",
    "Avril",
    "Mai",
    "Juin",
    "Juillet",
    "Août",
    "Septembre",
    "Octobre",
    "Novembre",
    "Décembre",
];

/// Display label for a month: French month name followed by the year.
/// Example: (2024, 3) -> "Mars 2024"
pub fn month_label(year: i32, month: u32) -> String {
    format!("{} {}", MONTH_NAMES[(month - 1) as usize], year)
}

/// Net financial result for a single day, derived on demand from the two
/// ledgers and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyResult {
    pub date: NaiveDate,
    pub total_revenue: Cents,
    pub total_expense: Cents,
    pub gross: Cents,
    pub tax: Cents,
    pub surcharge: Cents,
    pub net: Cents,
}

/// Net financial result for a calendar month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyResult {
    pub year: i32,
    pub month: u32,
    /// Localized display label, e.g. "Mars 2024"
    pub label: String,
    pub total_revenue: Cents,
    pub total_expense: Cents,
    pub gross: Cents,
    pub tax: Cents,
    pub surcharge: Cents,
    pub net: Cents,
}

/// Derive gross, tax, surcharge and net from period totals. All three
/// deductions come from the same gross value so displayed figures always
/// satisfy net == gross - tax - surcharge. Deductions are NOT clamped when
/// gross is negative.
fn derive_figures(total_revenue: Cents, total_expense: Cents) -> (Cents, Cents, Cents, Cents) {
    let gross = total_revenue - total_expense;
    let tax = apply_rate(gross, TAX_RATE_PERCENT);
    let surcharge = apply_rate(gross, SURCHARGE_RATE_PERCENT);
    let net = gross - tax - surcharge;
    (gross, tax, surcharge, net)
}

/// Compute per-day results from the two ledgers.
///
/// The output contains exactly one row for every date present in either
/// ledger, in ascending calendar order. A date with entries in only one
/// ledger sums the other side to zero.
pub fn compute_daily_results(
    revenues: &[LedgerEntry],
    expenses: &[LedgerEntry],
) -> Vec<DailyResult> {
    let mut totals: BTreeMap<NaiveDate, (Cents, Cents)> = BTreeMap::new();
    for entry in revenues {
        totals.entry(entry.date).or_default().0 += entry.amount_cents;
    }
    for entry in expenses {
        totals.entry(entry.date).or_default().1 += entry.amount_cents;
    }

    totals
        .into_iter()
        .map(|(date, (total_revenue, total_expense))| {
            let (gross, tax, surcharge, net) = derive_figures(total_revenue, total_expense);
            DailyResult {
                date,
                total_revenue,
                total_expense,
                gross,
                tax,
                surcharge,
                net,
            }
        })
        .collect()
}

/// Compute per-month results from the two ledgers. Same contract as
/// [`compute_daily_results`] with a (year, month) grouping key.
pub fn compute_monthly_results(
    revenues: &[LedgerEntry],
    expenses: &[LedgerEntry],
) -> Vec<MonthlyResult> {
    let mut totals: BTreeMap<(i32, u32), (Cents, Cents)> = BTreeMap::new();
    for entry in revenues {
        let key = (entry.date.year(), entry.date.month());
        totals.entry(key).or_default().0 += entry.amount_cents;
    }
    for entry in expenses {
        let key = (entry.date.year(), entry.date.month());
        totals.entry(key).or_default().1 += entry.amount_cents;
    }

    totals
        .into_iter()
        .map(|((year, month), (total_revenue, total_expense))| {
            let (gross, tax, surcharge, net) = derive_figures(total_revenue, total_expense);
            MonthlyResult {
                year,
                month,
                label: month_label(year, month),
                total_revenue,
                total_expense,
                gross,
                tax,
                surcharge,
                net,
            }
        })
        .collect()
}
