use anyhow::Result;
use chrono::{Local, Utc};

use crate::ledger::Ledger;
use crate::models::{TxKind, User};
use crate::report::{self, RangeMode, Report};
use crate::store::Store;
use crate::ui::util::ListCursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    SignIn,
    Dashboard,
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SignIn => write!(f, "Sign In"),
            Self::Dashboard => write!(f, "Dashboard"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Fields of the sign-in / sign-up card, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AuthField {
    Email,
    Name,
    Password,
}

/// Fields of the new-entry form, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Description,
    Amount,
    Kind,
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteEntry { id: i64, description: String },
    SignOut,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Session
    pub(crate) current_user: Option<User>,
    pub(crate) ledger: Ledger,
    pub(crate) range: RangeMode,

    // Sign-in card
    pub(crate) auth_signup: bool,
    pub(crate) auth_field: AuthField,
    pub(crate) auth_email: String,
    pub(crate) auth_name: String,
    pub(crate) auth_password: String,

    // New-entry form
    pub(crate) form_field: FormField,
    pub(crate) form_description: String,
    pub(crate) form_amount: String,
    pub(crate) form_kind: TxKind,

    // History list
    pub(crate) entry_cursor: ListCursor,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::SignIn,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            current_user: None,
            ledger: Ledger::empty(),
            range: RangeMode::All,

            auth_signup: false,
            auth_field: AuthField::Email,
            auth_email: String::new(),
            auth_name: String::new(),
            auth_password: String::new(),

            form_field: FormField::Description,
            form_description: String::new(),
            form_amount: String::new(),
            form_kind: TxKind::Expense,

            entry_cursor: ListCursor::default(),

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Single funnel for session changes. `Some` loads that user's
    /// ledger and lands on the dashboard; `None` drops the in-memory
    /// list and returns to the sign-in card.
    pub(crate) fn on_user_changed(&mut self, user: Option<User>, store: &Store) -> Result<()> {
        match user {
            Some(user) => {
                self.ledger = Ledger::new(store.load_transactions(&user.uid)?);
                self.set_status(format!("Welcome, {}", user.short_name()));
                self.current_user = Some(user);
                self.screen = Screen::Dashboard;
            }
            None => {
                self.current_user = None;
                self.ledger = Ledger::empty();
                self.screen = Screen::SignIn;
            }
        }
        self.range = RangeMode::All;
        self.entry_cursor.top();
        self.auth_email.clear();
        self.auth_name.clear();
        self.auth_password.clear();
        self.auth_field = AuthField::Email;
        self.clear_form();
        Ok(())
    }

    /// The dashboard view for the current range, computed fresh against
    /// the wall clock on every call.
    pub(crate) fn report(&self) -> Report<'_> {
        report::build(self.ledger.entries(), self.range, &Local::now())
    }

    pub(crate) fn set_range(&mut self, range: RangeMode) {
        self.range = range;
        self.entry_cursor.top();
        self.set_status(format!("Range: {}", range.label()));
    }

    /// Validate the entry form, append to the ledger, and persist the
    /// whole list. A refused entry leaves the form intact for editing.
    pub(crate) fn submit_entry(&mut self, store: &Store) -> Result<()> {
        let Some(user) = self.current_user.clone() else {
            self.set_status("Sign in first");
            return Ok(());
        };
        let description = self.form_description.clone();
        match self
            .ledger
            .add(&description, &self.form_amount, self.form_kind, Utc::now())
        {
            Ok(_) => {
                store.save_transactions(&user.uid, self.ledger.entries())?;
                self.set_status(format!("Added: {}", description.trim()));
                self.clear_form();
                self.input_mode = InputMode::Normal;
                self.entry_cursor.top();
            }
            Err(e) => self.set_status(format!("{e}")),
        }
        Ok(())
    }

    /// Remove the confirmed entry and persist. An id that is already
    /// gone just clears the prompt.
    pub(crate) fn delete_entry(&mut self, id: i64, description: &str, store: &Store) -> Result<()> {
        let Some(user) = self.current_user.clone() else {
            return Ok(());
        };
        if self.ledger.delete(id) {
            store.save_transactions(&user.uid, self.ledger.entries())?;
            self.set_status(format!("Deleted: {description}"));
        }
        let visible = self.report().entries.len();
        self.entry_cursor.clamp(visible);
        Ok(())
    }

    /// The entry under the cursor in the filtered history, if any.
    pub(crate) fn selected_entry(&self) -> Option<(i64, String)> {
        let report = self.report();
        report
            .entries
            .get(self.entry_cursor.index)
            .map(|txn| (txn.id, txn.description.clone()))
    }

    pub(crate) fn request_delete_selected(&mut self) {
        match self.selected_entry() {
            Some((id, description)) => {
                self.confirm_message = format!("Delete '{description}'?");
                self.pending_action = Some(PendingAction::DeleteEntry { id, description });
                self.input_mode = InputMode::Confirm;
            }
            None => self.set_status("No entry selected"),
        }
    }

    pub(crate) fn request_sign_out(&mut self) {
        if self.current_user.is_none() {
            return;
        }
        self.confirm_message = "Sign out?".into();
        self.pending_action = Some(PendingAction::SignOut);
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn open_entry_form(&mut self) {
        self.clear_form();
        self.input_mode = InputMode::Editing;
        self.set_status("Tab next field | Enter save | Esc cancel");
    }

    pub(crate) fn clear_form(&mut self) {
        self.form_field = FormField::Description;
        self.form_description.clear();
        self.form_amount.clear();
        self.form_kind = TxKind::Expense;
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
