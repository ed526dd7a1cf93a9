use anyhow::{bail, Context, Result};
use chrono::{Local, Utc};
use std::io::Write;

use crate::auth;
use crate::ledger::Ledger;
use crate::models::{TxKind, User};
use crate::report::{self, RangeMode};
use crate::store::Store;
use crate::ui::util::{format_amount, format_entry_amount, format_when};

pub(crate) fn as_cli(args: &[String], store: &Store) -> Result<()> {
    match args[1].as_str() {
        "signup" => cli_signup(&args[2..], store),
        "summary" | "s" => cli_summary(&args[2..], store),
        "list" | "ls" => cli_list(&args[2..], store),
        "add" => cli_add(&args[2..], store),
        "delete" | "rm" => cli_delete(&args[2..], store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("zyfin {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("ZyFin — local-only personal finance tracker");
    println!();
    println!("Usage: zyfin [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  signup <email> <name>         Create an account (prompts for password)");
    println!("  summary                       Print income/expense/balance totals");
    println!("    --range <mode>              daily, weekly, monthly, yearly, all (default: all)");
    println!("  list                          List transactions, newest first");
    println!("    --range <mode>              Same modes as summary");
    println!("  add <amount> <description..>  Add a transaction (positive amount = income");
    println!("    --expense                   Record as an expense instead");
    println!("  delete <id>                   Delete a transaction (asks y/N)");
    println!();
    println!("All commands except signup take --user <email> and prompt for the password.");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Arguments that are not flags. `--user` and `--range` carry a value,
/// so the word after them is consumed too; flags may appear anywhere
/// relative to the positionals.
fn positional_args(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--user" | "--range" => {
                iter.next();
            }
            a if a.starts_with("--") => {}
            a => out.push(a),
        }
    }
    out
}

/// Every data command authenticates; there is no anonymous access to
/// any ledger.
fn authenticate(args: &[String], store: &Store) -> Result<User> {
    let Some(email) = flag_value(args, "--user") else {
        bail!("Missing --user <email>");
    };
    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;
    auth::sign_in(store, email, &password)
}

fn parse_range(args: &[String]) -> Result<RangeMode> {
    let Some(text) = flag_value(args, "--range") else {
        return Ok(RangeMode::All);
    };
    // Unknown modes are an error, never a silent empty result
    match RangeMode::parse(text) {
        Some(mode) => Ok(mode),
        None => {
            let modes: Vec<&str> = RangeMode::all().iter().map(|m| m.as_str()).collect();
            bail!("Unknown range '{text}'. Valid modes: {}", modes.join(", "));
        }
    }
}

fn cli_signup(args: &[String], store: &Store) -> Result<()> {
    let (Some(email), Some(name)) = (args.first(), args.get(1)) else {
        bail!("Usage: zyfin signup <email> <display name>");
    };
    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;
    let confirm = rpassword::prompt_password("Confirm password: ")
        .context("Failed to read password")?;
    if password != confirm {
        bail!("Passwords do not match");
    }
    let user = auth::sign_up(store, email, name, &password)?;
    println!("Created account {} ({})", user.display_name, user.email);
    Ok(())
}

fn cli_summary(args: &[String], store: &Store) -> Result<()> {
    let user = authenticate(args, store)?;
    let range = parse_range(args)?;
    let entries = store.load_transactions(&user.uid)?;
    let report = report::build(&entries, range, &Local::now());

    println!("ZyFin — {} — {}", user.short_name(), range.label());
    println!("{}", "─".repeat(40));
    println!("  Income:   {}", format_amount(report.totals.income));
    println!("  Expense:  {}", format_amount(report.totals.expense));
    println!("  Balance:  {}", format_amount(report.totals.balance()));
    println!("  Entries:  {}", report.entries.len());
    Ok(())
}

fn cli_list(args: &[String], store: &Store) -> Result<()> {
    let user = authenticate(args, store)?;
    let range = parse_range(args)?;
    let entries = store.load_transactions(&user.uid)?;
    let report = report::build(&entries, range, &Local::now());

    if report.entries.is_empty() {
        println!("No transactions for {}", range.label());
        return Ok(());
    }

    println!("{:<15} {:<17} {:<32} Amount", "ID", "When", "Description");
    println!("{}", "─".repeat(78));
    for txn in &report.entries {
        println!(
            "{:<15} {:<17} {:<32} {}",
            txn.id,
            format_when(txn.occurred_at),
            crate::ui::util::truncate(&txn.description, 32),
            format_entry_amount(txn),
        );
    }
    Ok(())
}

fn cli_add(args: &[String], store: &Store) -> Result<()> {
    // Validate arguments before prompting for a password
    let positional = positional_args(args);
    let [amount, rest @ ..] = positional.as_slice() else {
        bail!("Usage: zyfin add <amount> <description..> [--expense] --user <email>");
    };
    if rest.is_empty() {
        bail!("Usage: zyfin add <amount> <description..> [--expense] --user <email>");
    }
    let description = rest.join(" ");
    let kind = if args.iter().any(|a| a == "--expense") {
        TxKind::Expense
    } else {
        TxKind::Income
    };

    let user = authenticate(args, store)?;
    let mut ledger = Ledger::new(store.load_transactions(&user.uid)?);
    let id = ledger
        .add(&description, amount, kind, Utc::now())
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    store.save_transactions(&user.uid, ledger.entries())?;
    println!("Added {kind} {description} (id {id})");
    Ok(())
}

fn cli_delete(args: &[String], store: &Store) -> Result<()> {
    // Validate arguments before prompting for a password
    let Some(id) = positional_args(args)
        .first()
        .and_then(|a| a.parse::<i64>().ok())
    else {
        bail!("Usage: zyfin delete <id> --user <email>");
    };

    let user = authenticate(args, store)?;
    let mut ledger = Ledger::new(store.load_transactions(&user.uid)?);
    let Some(txn) = ledger.find(id) else {
        println!("No transaction with id {id}");
        return Ok(());
    };

    print!("Delete '{}' ({})? [y/N] ", txn.description, format_entry_amount(txn));
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    if !matches!(answer.trim(), "y" | "Y" | "yes") {
        println!("Cancelled");
        return Ok(());
    }

    ledger.delete(id);
    store.save_transactions(&user.uid, ledger.entries())?;
    println!("Deleted {id}");
    Ok(())
}
