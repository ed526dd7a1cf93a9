use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::auth;
use crate::store::Store;
use crate::ui::app::{App, AuthField, FormField, InputMode, PendingAction, Screen};
use crate::ui::commands;

pub(crate) fn as_tui(store: &Store) -> Result<()> {
    let mut app = App::new();
    app.on_user_changed(None, store)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &Store,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // 1 header + 1 status + 1 cmd + 5 cards + 2 borders + 1 table header
            let content_height = f.area().height.saturating_sub(11) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            if app.screen == Screen::SignIn && app.input_mode == InputMode::Normal {
                handle_signin_input(key, app, store)?;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, store)?,
                InputMode::Command => handle_command_input(key, app, store)?,
                InputMode::Editing => handle_form_input(key, app, store)?,
                InputMode::Confirm => handle_confirm_input(key, app, store)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_signin_input(key: event::KeyEvent, app: &mut App, store: &Store) -> Result<()> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.auth_signup = !app.auth_signup;
            app.auth_field = AuthField::Email;
            app.set_status(if app.auth_signup {
                "Creating a new account"
            } else {
                "Signing in to an existing account"
            });
        }
        KeyCode::Tab | KeyCode::Down => {
            app.auth_field = next_auth_field(app.auth_field, app.auth_signup);
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.auth_field = prev_auth_field(app.auth_field, app.auth_signup);
        }
        KeyCode::Enter => submit_auth(app, store)?,
        KeyCode::Esc => {
            app.auth_email.clear();
            app.auth_name.clear();
            app.auth_password.clear();
            app.auth_field = AuthField::Email;
        }
        KeyCode::Backspace => {
            auth_field_value(app).pop();
        }
        KeyCode::Char(c) => {
            auth_field_value(app).push(c);
        }
        _ => {}
    }
    Ok(())
}

fn next_auth_field(field: AuthField, signup: bool) -> AuthField {
    match field {
        AuthField::Email if signup => AuthField::Name,
        AuthField::Email => AuthField::Password,
        AuthField::Name => AuthField::Password,
        AuthField::Password => AuthField::Email,
    }
}

fn prev_auth_field(field: AuthField, signup: bool) -> AuthField {
    match field {
        AuthField::Email => AuthField::Password,
        AuthField::Name => AuthField::Email,
        AuthField::Password if signup => AuthField::Name,
        AuthField::Password => AuthField::Email,
    }
}

fn auth_field_value(app: &mut App) -> &mut String {
    match app.auth_field {
        AuthField::Email => &mut app.auth_email,
        AuthField::Name => &mut app.auth_name,
        AuthField::Password => &mut app.auth_password,
    }
}

fn submit_auth(app: &mut App, store: &Store) -> Result<()> {
    let result = if app.auth_signup {
        auth::sign_up(store, &app.auth_email, &app.auth_name, &app.auth_password)
    } else {
        auth::sign_in(store, &app.auth_email, &app.auth_password)
    };
    match result {
        Ok(user) => app.on_user_changed(Some(user), store)?,
        Err(e) => app.set_status(format!("{e}")),
    }
    Ok(())
}

fn handle_normal_input(key: event::KeyEvent, app: &mut App, _store: &Store) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            let len = app.report().entries.len();
            app.entry_cursor.down(len, app.visible_rows);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.entry_cursor.up();
        }
        KeyCode::Char('g') => app.entry_cursor.top(),
        KeyCode::Char('G') => {
            let len = app.report().entries.len();
            app.entry_cursor.bottom(len, app.visible_rows);
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let len = app.report().entries.len();
            for _ in 0..app.visible_rows / 2 {
                app.entry_cursor.down(len, app.visible_rows);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                app.entry_cursor.up();
            }
        }
        KeyCode::Char('a') => app.open_entry_form(),
        KeyCode::Char('D') => app.request_delete_selected(),
        KeyCode::Char('[') => {
            let prev = app.range.prev();
            app.set_range(prev);
        }
        KeyCode::Char(']') => {
            let next = app.range.next();
            app.set_range(next);
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => {
            app.status_message.clear();
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, store: &Store) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, store)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_form_input(key: event::KeyEvent, app: &mut App, store: &Store) -> Result<()> {
    match key.code {
        KeyCode::Enter => app.submit_entry(store)?,
        KeyCode::Esc => {
            app.clear_form();
            app.input_mode = InputMode::Normal;
            app.set_status("Entry cancelled");
        }
        KeyCode::Tab | KeyCode::Down => {
            app.form_field = match app.form_field {
                FormField::Description => FormField::Amount,
                FormField::Amount => FormField::Kind,
                FormField::Kind => FormField::Description,
            };
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.form_field = match app.form_field {
                FormField::Description => FormField::Kind,
                FormField::Amount => FormField::Description,
                FormField::Kind => FormField::Amount,
            };
        }
        KeyCode::Char(' ') if app.form_field == FormField::Kind => {
            app.form_kind = app.form_kind.toggled();
        }
        KeyCode::Backspace => match app.form_field {
            FormField::Description => {
                app.form_description.pop();
            }
            FormField::Amount => {
                app.form_amount.pop();
            }
            FormField::Kind => {}
        },
        KeyCode::Char(c) => match app.form_field {
            FormField::Description => app.form_description.push(c),
            FormField::Amount => app.form_amount.push(c),
            FormField::Kind => {}
        },
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, store: &Store) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            if let Some(action) = app.pending_action.take() {
                match action {
                    PendingAction::DeleteEntry { id, description } => {
                        app.delete_entry(id, &description, store)?;
                    }
                    PendingAction::SignOut => {
                        app.on_user_changed(None, store)?;
                        app.set_status("Signed out");
                    }
                }
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
        _ => {}
    }
    Ok(())
}
