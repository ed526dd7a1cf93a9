use ratatui::style::{Color, Modifier, Style};

// Dark slate backdrop with a teal accent; amounts get their own
// gain/loss hues so the history scans at a glance.
pub(crate) const BG: Color = Color::Rgb(18, 22, 29);
pub(crate) const PANEL: Color = Color::Rgb(33, 39, 49);
pub(crate) const BORDER: Color = Color::Rgb(58, 66, 80);
pub(crate) const FG: Color = Color::Rgb(214, 219, 228);
pub(crate) const MUTED: Color = Color::Rgb(122, 131, 144);
pub(crate) const ACCENT: Color = Color::Rgb(64, 199, 195);
pub(crate) const POSITIVE: Color = Color::Rgb(142, 217, 145);
pub(crate) const NEGATIVE: Color = Color::Rgb(235, 113, 133);
pub(crate) const WARN: Color = Color::Rgb(240, 198, 116);

pub(crate) fn text() -> Style {
    Style::default().fg(FG)
}

pub(crate) fn dim() -> Style {
    Style::default().fg(MUTED)
}

/// Block titles on panels and cards.
pub(crate) fn title() -> Style {
    Style::default().fg(MUTED).add_modifier(Modifier::BOLD)
}

pub(crate) fn table_header() -> Style {
    Style::default().fg(FG).bg(PANEL).add_modifier(Modifier::BOLD)
}

pub(crate) fn cursor_row() -> Style {
    Style::default().fg(BG).bg(ACCENT)
}

pub(crate) fn stripe_row() -> Style {
    Style::default().fg(FG).bg(PANEL)
}

pub(crate) fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub(crate) fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

/// Status bar body.
pub(crate) fn bar() -> Style {
    Style::default().fg(MUTED).bg(PANEL)
}

/// Inverted mode indicator at the left of the status bar.
pub(crate) fn badge(color: Color) -> Style {
    Style::default().fg(BG).bg(color).add_modifier(Modifier::BOLD)
}
