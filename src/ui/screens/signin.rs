use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::app::{App, AuthField};
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let card_height = if app.auth_signup { 12 } else { 10 };
    let card_width = 52.min(area.width.saturating_sub(4));

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(card_height),
            Constraint::Min(1),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(card_width),
            Constraint::Min(1),
        ])
        .split(vertical[1]);
    let card = horizontal[1];

    let title = if app.auth_signup {
        " Create Account "
    } else {
        " Sign In "
    };

    let mut lines = vec![
        Line::from(""),
        field_line("Email", &app.auth_email, app.auth_field == AuthField::Email, false),
    ];
    if app.auth_signup {
        lines.push(field_line(
            "Name",
            &app.auth_name,
            app.auth_field == AuthField::Name,
            false,
        ));
    }
    lines.push(field_line(
        "Password",
        &app.auth_password,
        app.auth_field == AuthField::Password,
        true,
    ));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        if app.auth_signup {
            "  Enter create | Ctrl-s back to sign in"
        } else {
            "  Enter sign in | Ctrl-s create account"
        },
        theme::dim(),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ));

    f.render_widget(Paragraph::new(lines).block(block), card);
}

fn field_line<'a>(label: &'a str, value: &str, focused: bool, masked: bool) -> Line<'a> {
    let shown = if masked {
        "*".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let marker = if focused { "> " } else { "  " };
    let value_style = if focused {
        theme::text().add_modifier(Modifier::BOLD)
    } else {
        theme::text()
    };
    let cursor = if focused { "_" } else { "" };

    Line::from(vec![
        Span::styled(marker, Style::default().fg(theme::ACCENT)),
        Span::styled(format!("{label:<9}"), theme::dim()),
        Span::styled(shown, value_style),
        Span::styled(cursor, Style::default().fg(theme::ACCENT)),
    ])
}
