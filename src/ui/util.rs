use chrono::{DateTime, Local, Utc};
use rust_decimal::Decimal;

use crate::models::{Transaction, TxKind};

/// Dollar display with comma grouping, always two decimal places.
pub(crate) fn format_amount(val: Decimal) -> String {
    let cents = format!("{:.2}", val.abs());
    let (whole, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if val < Decimal::ZERO { "-" } else { "" };
    format!("{sign}${grouped}.{frac}")
}

/// History-row rendering of an amount: "+" for income, "-" for expense.
pub(crate) fn format_entry_amount(txn: &Transaction) -> String {
    match txn.kind {
        TxKind::Income => format!("+{}", format_amount(txn.amount)),
        TxKind::Expense => format!("-{}", format_amount(txn.amount)),
    }
}

/// Render a stored instant in the viewer's local calendar.
pub(crate) fn format_when(when: DateTime<Utc>) -> String {
    when.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Cap `s` at `max` characters, ending in an ellipsis when cut. Counts
/// chars, not bytes, so multi-byte text never splits mid-character.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// Cursor position plus scroll offset over a vertical list. Movement
/// keeps the cursor inside the window of `page` visible rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ListCursor {
    pub(crate) index: usize,
    pub(crate) scroll: usize,
}

impl ListCursor {
    pub(crate) fn down(&mut self, len: usize, page: usize) {
        if self.index + 1 >= len {
            return;
        }
        self.index += 1;
        if self.index >= self.scroll + page {
            self.scroll = (self.index + 1).saturating_sub(page);
        }
    }

    pub(crate) fn up(&mut self) {
        self.index = self.index.saturating_sub(1);
        self.scroll = self.scroll.min(self.index);
    }

    pub(crate) fn top(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn bottom(&mut self, len: usize, page: usize) {
        if len == 0 {
            return;
        }
        self.index = len - 1;
        self.scroll = len.saturating_sub(page.max(1));
    }

    /// Pull the cursor back inside a list that just shrank.
    pub(crate) fn clamp(&mut self, len: usize) {
        if self.index >= len {
            self.index = len.saturating_sub(1);
        }
        self.scroll = self.scroll.min(self.index);
    }
}
