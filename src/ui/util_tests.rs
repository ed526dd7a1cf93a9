#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;

use super::util::*;
use crate::models::{Transaction, TxKind};

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 5), "hell…");
}

#[test]
fn test_truncate_empty() {
    assert_eq!(truncate("", 5), "");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_multibyte() {
    assert_eq!(truncate("héllö wörld", 5), "héll…");
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_small_amount() {
    assert_eq!(format_amount(dec!(4.5)), "$4.50");
}

#[test]
fn test_format_thousands() {
    assert_eq!(format_amount(dec!(1234567.89)), "$1,234,567.89");
}

#[test]
fn test_format_negative() {
    assert_eq!(format_amount(dec!(-42)), "-$42.00");
}

#[test]
fn test_format_zero() {
    assert_eq!(format_amount(dec!(0)), "$0.00");
}

#[test]
fn test_format_rounds_to_cents() {
    assert_eq!(format_amount(dec!(9.999)), "$10.00");
}

// ── format_entry_amount ───────────────────────────────────────

fn entry(amount: rust_decimal::Decimal, kind: TxKind) -> Transaction {
    Transaction {
        id: 1,
        description: "Entry".into(),
        amount,
        kind,
        occurred_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
    }
}

#[test]
fn test_income_gets_plus_sign() {
    assert_eq!(format_entry_amount(&entry(dec!(100), TxKind::Income)), "+$100.00");
}

#[test]
fn test_expense_gets_minus_sign() {
    assert_eq!(format_entry_amount(&entry(dec!(2500), TxKind::Expense)), "-$2,500.00");
}

// ── ListCursor ────────────────────────────────────────────────

fn cursor(index: usize, scroll: usize) -> ListCursor {
    ListCursor { index, scroll }
}

#[test]
fn test_cursor_down_moves() {
    let mut c = ListCursor::default();
    c.down(10, 5);
    assert_eq!(c, cursor(1, 0));
}

#[test]
fn test_cursor_down_at_end_is_noop() {
    let mut c = cursor(9, 5);
    c.down(10, 5);
    assert_eq!(c, cursor(9, 5));
}

#[test]
fn test_cursor_down_advances_scroll_past_page() {
    let mut c = cursor(4, 0);
    c.down(10, 5);
    assert_eq!(c, cursor(5, 1));
}

#[test]
fn test_cursor_down_on_empty_list_is_noop() {
    let mut c = ListCursor::default();
    c.down(0, 5);
    assert_eq!(c, ListCursor::default());
}

#[test]
fn test_cursor_up_clamps_at_zero() {
    let mut c = ListCursor::default();
    c.up();
    assert_eq!(c, cursor(0, 0));
}

#[test]
fn test_cursor_up_pulls_scroll_along() {
    let mut c = cursor(3, 3);
    c.up();
    assert_eq!(c, cursor(2, 2));
}

#[test]
fn test_cursor_top() {
    let mut c = cursor(7, 4);
    c.top();
    assert_eq!(c, cursor(0, 0));
}

#[test]
fn test_cursor_bottom() {
    let mut c = ListCursor::default();
    c.bottom(10, 5);
    assert_eq!(c, cursor(9, 5));
}

#[test]
fn test_cursor_bottom_empty_list() {
    let mut c = cursor(3, 1);
    c.bottom(0, 5);
    assert_eq!(c, cursor(3, 1));
}

#[test]
fn test_cursor_bottom_short_list_keeps_scroll_zero() {
    let mut c = ListCursor::default();
    c.bottom(3, 5);
    assert_eq!(c, cursor(2, 0));
}

#[test]
fn test_cursor_clamp_after_shrink() {
    let mut c = cursor(9, 5);
    c.clamp(4);
    assert_eq!(c, cursor(3, 3));
}

#[test]
fn test_cursor_clamp_to_empty() {
    let mut c = cursor(2, 1);
    c.clamp(0);
    assert_eq!(c, cursor(0, 0));
}
