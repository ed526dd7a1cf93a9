use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::theme;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_header(f, chunks[0], app);
    match app.screen {
        Screen::SignIn => super::screens::signin::render(f, chunks[1], app),
        Screen::Dashboard => super::screens::dashboard::render(f, chunks[1], app),
    }
    render_status_bar(f, chunks[2], app);
    render_command_bar(f, chunks[3], app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let user_part = match &app.current_user {
        Some(user) => format!("{} ({})", user.short_name(), user.email),
        None => "not signed in".into(),
    };
    let left = Span::styled(
        " ZyFin ",
        Style::default()
            .fg(theme::ACCENT)
            .bg(theme::BG)
            .add_modifier(Modifier::BOLD),
    );
    let middle = Span::styled(
        format!(" {user_part} "),
        Style::default().fg(theme::FG).bg(theme::BG),
    );
    let range = Span::styled(
        format!(" [{}] ", app.range.label()),
        Style::default().fg(theme::WARN).bg(theme::BG),
    );

    let bar =
        Paragraph::new(Line::from(vec![left, middle, range])).style(Style::default().bg(theme::BG));
    f.render_widget(bar, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_style = match app.input_mode {
        InputMode::Normal => theme::badge(theme::ACCENT),
        InputMode::Command | InputMode::Editing => theme::badge(theme::POSITIVE),
        InputMode::Confirm => theme::badge(theme::NEGATIVE),
    };

    let info = format!(" {} | {} entries", app.screen, app.ledger.len());

    let right = match app.screen {
        Screen::SignIn => " Tab next field | Enter submit | Ctrl-s toggle sign-up ",
        Screen::Dashboard => " a add | D delete | [/] range | ? help ",
    };

    let available = area.width as usize;
    let used = mode_label.len() + info.len() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::bar()),
        Span::styled(" ".repeat(pad), theme::bar()),
        Span::styled(right, theme::bar()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::text()),
            ]),
            Some(1 + app.command_input.len() as u16),
        ),
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(&app.confirm_message, Style::default().fg(theme::WARN)),
                Span::styled(" [y/N] ", Style::default().fg(theme::NEGATIVE)),
            ]),
            None,
        ),
        InputMode::Editing | InputMode::Normal => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, ? for help",
                    theme::dim(),
                ))
            } else {
                Line::from(Span::styled(&app.status_message, theme::text()))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let section = |label: &'static str| {
        Line::from(Span::styled(
            label,
            Style::default()
                .fg(theme::WARN)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let mut help_text = vec![
        Line::from(Span::styled(
            " ZyFin Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section(" Navigation"),
        Line::from(Span::styled(
            "  j/k or Up/Down   Move cursor           g/G        Top/Bottom",
            theme::text(),
        )),
        Line::from(Span::styled(
            "  [/]              Prev/Next range       Ctrl-d/u   Page Down/Up",
            theme::text(),
        )),
        Line::from(""),
        section(" Actions"),
        Line::from(Span::styled(
            "  :               Command mode           a          Add entry",
            theme::text(),
        )),
        Line::from(Span::styled(
            "  D               Delete entry           Ctrl-q     Quit",
            theme::text(),
        )),
        Line::from(Span::styled(
            "  Enter           Select/Confirm         Esc        Cancel/Back",
            theme::text(),
        )),
        Line::from(""),
        section(" Commands"),
    ];

    // Build command list dynamically from COMMANDS registry
    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        if name.len() <= 2 {
            continue;
        }
        if seen.insert(cmd.description) {
            cmd_lines.push((name, cmd.description));
        }
    }
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<22} {desc}"),
            theme::text(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        theme::dim(),
    )));

    // Center the popup, clamped to terminal height
    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 72.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER))
            .style(Style::default().bg(theme::PANEL)),
    );
    f.render_widget(help, popup_area);
}
