use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, Screen};
use crate::report::RangeMode;
use crate::store::Store;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &Store) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit ZyFin", cmd_quit, r);
    register_command!("quit", "Quit ZyFin", cmd_quit, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("add", "Add a transaction", cmd_add, r);
    register_command!("a", "Add a transaction", cmd_add, r);
    register_command!("delete", "Delete selected transaction", cmd_delete, r);
    register_command!("d", "Delete selected transaction", cmd_delete, r);
    register_command!("range", "Set time range (e.g. :range weekly)", cmd_range, r);
    register_command!("r", "Set time range (e.g. :r weekly)", cmd_range, r);
    register_command!("daily", "Show today only", cmd_daily, r);
    register_command!("weekly", "Show the last 7 days", cmd_weekly, r);
    register_command!("monthly", "Show this calendar month", cmd_monthly, r);
    register_command!("yearly", "Show this calendar year", cmd_yearly, r);
    register_command!("all", "Show all time", cmd_all, r);
    register_command!("signout", "Sign out of the current account", cmd_signout, r);
    register_command!("logout", "Sign out of the current account", cmd_signout, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, store: &Store) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, store)?;
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

fn valid_ranges() -> String {
    RangeMode::all()
        .iter()
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    if app.screen != Screen::Dashboard {
        app.set_status("Sign in first");
        return Ok(());
    }
    app.open_entry_form();
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    if app.screen != Screen::Dashboard {
        app.set_status("Sign in first");
        return Ok(());
    }
    app.request_delete_selected();
    Ok(())
}

fn cmd_range(args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status(format!("Usage: :range <mode>. Modes: {}", valid_ranges()));
        return Ok(());
    }
    // Unknown modes are rejected outright; the current range stays put
    match RangeMode::parse(args) {
        Some(mode) => app.set_range(mode),
        None => app.set_status(format!("Unknown range '{args}'. Modes: {}", valid_ranges())),
    }
    Ok(())
}

fn cmd_daily(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    app.set_range(RangeMode::Daily);
    Ok(())
}

fn cmd_weekly(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    app.set_range(RangeMode::Weekly);
    Ok(())
}

fn cmd_monthly(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    app.set_range(RangeMode::Monthly);
    Ok(())
}

fn cmd_yearly(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    app.set_range(RangeMode::Yearly);
    Ok(())
}

fn cmd_all(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    app.set_range(RangeMode::All);
    Ok(())
}

fn cmd_signout(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    if app.current_user.is_none() {
        app.set_status("Not signed in");
        return Ok(());
    }
    app.request_sign_out();
    Ok(())
}
