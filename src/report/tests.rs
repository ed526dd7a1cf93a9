#![allow(clippy::unwrap_used)]

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{Transaction, TxKind};

fn txn(id: i64, amount: Decimal, kind: TxKind, when: DateTime<Utc>) -> Transaction {
    Transaction {
        id,
        description: format!("Entry {id}"),
        amount,
        kind,
        occurred_at: when,
    }
}

fn at(y: i32, mo: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, 12, 0, 0).unwrap()
}

/// The concrete scenario: two March 2024 entries and one from 2023.
fn sample() -> Vec<Transaction> {
    vec![
        txn(1, dec!(1000), TxKind::Income, at(2024, 3, 1)),
        txn(2, dec!(400), TxKind::Expense, at(2024, 3, 1)),
        txn(3, dec!(5000), TxKind::Income, at(2023, 1, 1)),
    ]
}

// ── RangeMode parsing ─────────────────────────────────────────

#[test]
fn test_parse_known_modes() {
    assert_eq!(RangeMode::parse("daily"), Some(RangeMode::Daily));
    assert_eq!(RangeMode::parse("WEEKLY"), Some(RangeMode::Weekly));
    assert_eq!(RangeMode::parse("month"), Some(RangeMode::Monthly));
    assert_eq!(RangeMode::parse("year"), Some(RangeMode::Yearly));
    assert_eq!(RangeMode::parse("all"), Some(RangeMode::All));
}

#[test]
fn test_parse_unknown_mode_fails_closed() {
    // Unknown text must be rejected, never treated as "match nothing"
    assert_eq!(RangeMode::parse("fortnightly"), None);
    assert_eq!(RangeMode::parse(""), None);
}

#[test]
fn test_mode_roundtrip() {
    for mode in RangeMode::all() {
        assert_eq!(RangeMode::parse(mode.as_str()), Some(*mode));
    }
}

#[test]
fn test_mode_next_prev_cycle() {
    let mut mode = RangeMode::Daily;
    for _ in 0..RangeMode::all().len() {
        mode = mode.next();
    }
    assert_eq!(mode, RangeMode::Daily);
    assert_eq!(RangeMode::Daily.prev(), RangeMode::All);
}

// ── Filtering ─────────────────────────────────────────────────

#[test]
fn test_all_returns_input_unchanged() {
    let entries = sample();
    for now in [at(2024, 3, 15), at(1999, 1, 1), at(2077, 12, 31)] {
        let filtered = filter_range(&entries, RangeMode::All, &now);
        assert_eq!(filtered.len(), entries.len());
        for (got, want) in filtered.iter().zip(entries.iter()) {
            assert_eq!(**got, *want);
        }
    }
}

#[test]
fn test_filtered_is_subset_in_input_order() {
    let entries = sample();
    let now = at(2024, 3, 15);
    for mode in RangeMode::all() {
        let filtered = filter_range(&entries, *mode, &now);
        assert!(filtered.len() <= entries.len());
        // Every filtered element exists in the input, in input order
        let mut cursor = 0;
        for got in &filtered {
            let pos = entries[cursor..]
                .iter()
                .position(|t| *t == **got)
                .map(|p| p + cursor);
            assert!(pos.is_some(), "filtered element not found in order");
            cursor = pos.unwrap() + 1;
        }
    }
}

#[test]
fn test_monthly_concrete_scenario() {
    let entries = sample();
    let now = at(2024, 3, 15);
    let report = build(&entries, RangeMode::Monthly, &now);
    assert_eq!(report.entries.len(), 2);
    assert_eq!(report.entries[0].id, 1);
    assert_eq!(report.entries[1].id, 2);
    assert_eq!(report.totals.income, dec!(1000));
    assert_eq!(report.totals.expense, dec!(400));
    assert_eq!(report.totals.balance(), dec!(600));
}

#[test]
fn test_yearly_concrete_scenario() {
    let entries = sample();
    let now = at(2024, 3, 15);
    let report = build(&entries, RangeMode::Yearly, &now);
    // Same two entries; the 2023 one is out
    assert_eq!(report.entries.len(), 2);
    assert!(report.entries.iter().all(|t| t.id != 3));
    assert_eq!(report.totals.income, dec!(1000));
    assert_eq!(report.totals.expense, dec!(400));
    assert_eq!(report.totals.balance(), dec!(600));
}

#[test]
fn test_all_concrete_scenario() {
    let entries = sample();
    let report = build(&entries, RangeMode::All, &at(2024, 3, 15));
    assert_eq!(report.entries.len(), 3);
    assert_eq!(report.totals.income, dec!(6000));
    assert_eq!(report.totals.expense, dec!(400));
}

#[test]
fn test_daily_same_calendar_day_only() {
    let now = Utc.with_ymd_and_hms(2024, 3, 15, 23, 0, 0).unwrap();
    let today_early = txn(
        1,
        dec!(10),
        TxKind::Income,
        Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap(),
    );
    let yesterday = txn(
        2,
        dec!(10),
        TxKind::Income,
        Utc.with_ymd_and_hms(2024, 3, 14, 23, 59, 59).unwrap(),
    );
    assert!(in_range(&today_early, RangeMode::Daily, &now));
    assert!(!in_range(&yesterday, RangeMode::Daily, &now));
}

#[test]
fn test_daily_follows_the_callers_calendar() {
    // 2024-03-15 01:00 in UTC+10 is still 2024-03-14 in UTC
    let offset = FixedOffset::east_opt(10 * 3600).unwrap();
    let now = offset.with_ymd_and_hms(2024, 3, 15, 1, 0, 0).unwrap();
    let entry = txn(
        1,
        dec!(10),
        TxKind::Income,
        Utc.with_ymd_and_hms(2024, 3, 14, 20, 0, 0).unwrap(),
    );
    // 20:00 UTC on the 14th is 06:00 on the 15th in UTC+10
    assert!(in_range(&entry, RangeMode::Daily, &now));
    // The same instant viewed from a UTC caller is a different day
    let utc_now = Utc.with_ymd_and_hms(2024, 3, 15, 1, 0, 0).unwrap();
    assert!(!in_range(&entry, RangeMode::Daily, &utc_now));
}

#[test]
fn test_weekly_boundary_is_inclusive() {
    let now = at(2024, 3, 15);
    let boundary = txn(1, dec!(10), TxKind::Income, now - Duration::days(7));
    let just_outside = txn(
        2,
        dec!(10),
        TxKind::Income,
        now - Duration::days(7) - Duration::seconds(1),
    );
    assert!(in_range(&boundary, RangeMode::Weekly, &now));
    assert!(!in_range(&just_outside, RangeMode::Weekly, &now));
}

#[test]
fn test_weekly_has_no_upper_bound() {
    // A future-dated entry passes; literal lookback semantics
    let now = at(2024, 3, 15);
    let future = txn(1, dec!(10), TxKind::Income, now + Duration::days(2));
    assert!(in_range(&future, RangeMode::Weekly, &now));
}

#[test]
fn test_monthly_excludes_same_month_other_year() {
    let now = at(2024, 3, 15);
    let last_march = txn(1, dec!(10), TxKind::Income, at(2023, 3, 15));
    assert!(!in_range(&last_march, RangeMode::Monthly, &now));
    assert!(in_range(&last_march, RangeMode::Monthly, &at(2023, 3, 1)));
}

#[test]
fn test_filter_idempotent() {
    let entries = sample();
    let now = at(2024, 3, 15);
    for mode in RangeMode::all() {
        let once: Vec<Transaction> = filter_range(&entries, *mode, &now)
            .into_iter()
            .cloned()
            .collect();
        let twice = filter_range(&once, *mode, &now);
        assert_eq!(twice.len(), once.len());
        for (got, want) in twice.iter().zip(once.iter()) {
            assert_eq!(**got, *want);
        }
    }
}

#[test]
fn test_order_independence() {
    let entries = sample();
    let mut reversed = entries.clone();
    reversed.reverse();
    let now = at(2024, 3, 15);

    for mode in RangeMode::all() {
        let a = build(&entries, *mode, &now);
        let b = build(&reversed, *mode, &now);
        assert_eq!(a.totals, b.totals);
        // Same set of ids, ignoring order
        let mut ids_a: Vec<i64> = a.entries.iter().map(|t| t.id).collect();
        let mut ids_b: Vec<i64> = b.entries.iter().map(|t| t.id).collect();
        ids_a.sort_unstable();
        ids_b.sort_unstable();
        assert_eq!(ids_a, ids_b);
    }
}

#[test]
fn test_empty_list() {
    let now = at(2024, 3, 15);
    for mode in RangeMode::all() {
        let report = build(&[], *mode, &now);
        assert!(report.entries.is_empty());
        assert_eq!(report.totals, Totals::default());
        assert_eq!(report.totals.balance(), Decimal::ZERO);
    }
}

// ── Totals ────────────────────────────────────────────────────

#[test]
fn test_balance_identity_holds() {
    let entries = sample();
    let now = at(2024, 3, 15);
    for mode in RangeMode::all() {
        let report = build(&entries, *mode, &now);
        assert_eq!(
            report.totals.income - report.totals.expense,
            report.totals.balance()
        );
    }
}

#[test]
fn test_totals_exact_for_fractional_amounts() {
    // 0.1 + 0.2 is exactly 0.3 in fixed-point
    let entries = vec![
        txn(1, dec!(0.1), TxKind::Income, at(2024, 3, 1)),
        txn(2, dec!(0.2), TxKind::Income, at(2024, 3, 1)),
        txn(3, dec!(0.3), TxKind::Expense, at(2024, 3, 1)),
    ];
    let sums = totals(&entries);
    assert_eq!(sums.income, dec!(0.3));
    assert_eq!(sums.expense, dec!(0.3));
    assert_eq!(sums.balance(), Decimal::ZERO);
}

#[test]
fn test_totals_many_small_accumulations() {
    let entries: Vec<Transaction> = (0..1000)
        .map(|i| txn(i, dec!(0.01), TxKind::Income, at(2024, 3, 1)))
        .collect();
    assert_eq!(totals(&entries).income, dec!(10.00));
}
