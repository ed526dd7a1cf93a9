use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::models::TxKind;
use crate::report::Report;
use crate::ui::app::{App, FormField, InputMode};
use crate::ui::theme;
use crate::ui::util::{format_amount, format_entry_amount, format_when, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let report = app.report();

    let show_form = app.input_mode == InputMode::Editing;
    let constraints = if show_form {
        vec![
            Constraint::Length(5), // Summary cards
            Constraint::Length(5), // Entry form
            Constraint::Min(5),    // History
        ]
    } else {
        vec![Constraint::Length(5), Constraint::Min(5)]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_summary_cards(f, chunks[0], &report);
    if show_form {
        render_entry_form(f, chunks[1], app);
        render_history(f, chunks[2], app, &report);
    } else {
        render_history(f, chunks[1], app, &report);
    }
}

fn render_summary_cards(f: &mut Frame, area: Rect, report: &Report) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let balance = report.totals.balance();
    render_card(
        f,
        cards[0],
        "Balance",
        balance,
        if balance >= Decimal::ZERO {
            theme::POSITIVE
        } else {
            theme::NEGATIVE
        },
    );
    render_card(f, cards[1], "Income", report.totals.income, theme::POSITIVE);
    render_card(f, cards[2], "Expense", report.totals.expense, theme::NEGATIVE);
}

fn render_card(f: &mut Frame, area: Rect, title: &str, amount: Decimal, color: ratatui::style::Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER))
        .title(Span::styled(format!(" {title} "), theme::title()));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_entry_form(f: &mut Frame, area: Rect, app: &App) {
    let field = |label: &str, value: &str, active: bool| {
        let marker = if active { "> " } else { "  " };
        let style = if active {
            theme::text().add_modifier(Modifier::BOLD)
        } else {
            theme::text()
        };
        Line::from(vec![
            Span::styled(marker.to_string(), Style::default().fg(theme::ACCENT)),
            Span::styled(format!("{label:<13}"), theme::dim()),
            Span::styled(value.to_string(), style),
            Span::styled(
                if active { "_" } else { "" },
                Style::default().fg(theme::ACCENT),
            ),
        ])
    };

    let kind_display = match app.form_kind {
        TxKind::Income => "income   (Space to toggle)",
        TxKind::Expense => "expense  (Space to toggle)",
    };

    let lines = vec![
        field(
            "Description",
            &app.form_description,
            app.form_field == FormField::Description,
        ),
        field("Amount", &app.form_amount, app.form_field == FormField::Amount),
        field("Type", kind_display, app.form_field == FormField::Kind),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .title(Span::styled(
            " New Entry ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_history(f: &mut Frame, area: Rect, app: &App, report: &Report) {
    let title = format!(" History — {} ({}) ", app.range.label(), report.entries.len());

    if report.entries.is_empty() {
        let msg = if app.ledger.is_empty() {
            vec![
                Line::from(""),
                Line::from(Span::styled("No transactions yet", theme::dim())),
                Line::from(""),
                Line::from(Span::styled("Add one with a or :add", theme::dim())),
            ]
        } else {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("No transactions for {}", app.range.label()),
                    theme::dim(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Widen the range with ] or :range all",
                    theme::dim(),
                )),
            ]
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER))
            .title(Span::styled(title, theme::title()));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["When", "Description", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::table_header()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = report
        .entries
        .iter()
        .enumerate()
        .skip(app.entry_cursor.scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let amount_style = if txn.is_income() {
                theme::positive()
            } else {
                theme::negative()
            };

            let style = if i == app.entry_cursor.index {
                theme::cursor_row()
            } else if i % 2 == 1 {
                theme::stripe_row()
            } else {
                theme::text()
            };

            Row::new(vec![
                Cell::from(format_when(txn.occurred_at)),
                Cell::from(truncate(&txn.description, 40)),
                Cell::from(Span::styled(format_entry_amount(txn), amount_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(18),
        Constraint::Min(20),
        Constraint::Length(15),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER))
            .title(Span::styled(title, theme::title())),
    );

    f.render_widget(table, area);
}
