//! Range filtering and totals over an in-memory transaction list.
//!
//! Everything here is a pure function of (entries, mode, now). The
//! reference instant is always supplied by the caller; this module
//! never reads the wall clock, storage, or identity.

use chrono::{DateTime, Datelike, Duration, TimeZone};
use rust_decimal::Decimal;

use crate::models::{Transaction, TxKind};

/// The selected time-range filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeMode {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    All,
}

impl RangeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::All => "all",
        }
    }

    /// Human label for headers and the range selector.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Today",
            Self::Weekly => "Last 7 Days",
            Self::Monthly => "This Month",
            Self::Yearly => "This Year",
            Self::All => "All Time",
        }
    }

    /// Strict parse: unknown text is `None`, and callers must reject it
    /// explicitly rather than silently filtering everything out.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "daily" | "day" | "today" => Some(Self::Daily),
            "weekly" | "week" => Some(Self::Weekly),
            "monthly" | "month" => Some(Self::Monthly),
            "yearly" | "year" => Some(Self::Yearly),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    pub fn all() -> &'static [RangeMode] {
        &[
            Self::Daily,
            Self::Weekly,
            Self::Monthly,
            Self::Yearly,
            Self::All,
        ]
    }

    pub fn next(&self) -> Self {
        let modes = Self::all();
        let idx = modes.iter().position(|m| m == self).unwrap_or(0);
        modes[(idx + 1) % modes.len()]
    }

    pub fn prev(&self) -> Self {
        let modes = Self::all();
        let idx = modes.iter().position(|m| m == self).unwrap_or(0);
        modes[(idx + modes.len() - 1) % modes.len()]
    }
}

impl std::fmt::Display for RangeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Income and expense sums over a filtered subset. Both are positive
/// magnitudes; the balance is derived, so income - expense = balance
/// holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
}

impl Totals {
    pub fn balance(&self) -> Decimal {
        self.income - self.expense
    }
}

/// The filtered view of a ledger for one range mode: the passing
/// entries in their original order, plus the totals over them.
#[derive(Debug)]
pub struct Report<'a> {
    pub entries: Vec<&'a Transaction>,
    pub totals: Totals,
}

/// Whether `txn` falls inside `mode`'s window relative to `now`.
///
/// Calendar modes (daily/monthly/yearly) compare calendar fields in
/// `now`'s timezone. Weekly is a fixed 7x24h lookback with an inclusive
/// lower bound and no upper bound, so a slightly future-dated entry
/// still passes.
pub fn in_range<Tz: TimeZone>(txn: &Transaction, mode: RangeMode, now: &DateTime<Tz>) -> bool {
    match mode {
        RangeMode::All => true,
        RangeMode::Weekly => txn.occurred_at >= now.clone() - Duration::days(7),
        RangeMode::Daily => {
            let t = txn.occurred_at.with_timezone(&now.timezone());
            t.year() == now.year() && t.month() == now.month() && t.day() == now.day()
        }
        RangeMode::Monthly => {
            let t = txn.occurred_at.with_timezone(&now.timezone());
            t.year() == now.year() && t.month() == now.month()
        }
        RangeMode::Yearly => txn.occurred_at.with_timezone(&now.timezone()).year() == now.year(),
    }
}

/// Filter `entries` by `mode`, preserving input order.
pub fn filter_range<'a, Tz: TimeZone>(
    entries: &'a [Transaction],
    mode: RangeMode,
    now: &DateTime<Tz>,
) -> Vec<&'a Transaction> {
    entries
        .iter()
        .filter(|txn| in_range(txn, mode, now))
        .collect()
}

/// Linear accumulation of income and expense magnitudes.
pub fn totals<'a, I>(entries: I) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut sums = Totals::default();
    for txn in entries {
        match txn.kind {
            TxKind::Income => sums.income += txn.amount,
            TxKind::Expense => sums.expense += txn.amount,
        }
    }
    sums
}

/// Filter and total in one pass over the result.
pub fn build<'a, Tz: TimeZone>(
    entries: &'a [Transaction],
    mode: RangeMode,
    now: &DateTime<Tz>,
) -> Report<'a> {
    let filtered = filter_range(entries, mode, now);
    let sums = totals(filtered.iter().copied());
    Report {
        entries: filtered,
        totals: sums,
    }
}

#[cfg(test)]
mod tests;
