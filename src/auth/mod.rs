//! Local email/password accounts.
//!
//! Passwords are stored as bcrypt hashes and never leave this module.
//! Sign-up and sign-in both return the public [User]; the stored
//! [Profile] with its hash stays behind the store boundary.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};

use crate::models::{Profile, User};
use crate::store::Store;

const MIN_PASSWORD_LEN: usize = 8;

/// Canonical form for stored and looked-up emails. Case and surrounding
/// whitespace never distinguish two accounts.
fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        bail!("Invalid email address");
    }
    Ok(email)
}

pub fn sign_up(store: &Store, email: &str, display_name: &str, password: &str) -> Result<User> {
    let email = normalize_email(email)?;
    let display_name = display_name.trim();
    if display_name.is_empty() {
        bail!("Display name cannot be empty");
    }
    if password.len() < MIN_PASSWORD_LEN {
        bail!("Password must be at least {MIN_PASSWORD_LEN} characters");
    }
    if store.find_profile_by_email(&email)?.is_some() {
        bail!("An account with that email already exists");
    }

    let now = Utc::now();
    let profile = Profile {
        uid: mint_uid(store, now)?,
        email,
        display_name: display_name.to_string(),
        password_hash: bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .context("Failed to hash password")?,
        created_at: now.to_rfc3339(),
    };
    store.insert_profile(&profile)?;
    Ok(profile.user())
}

/// Stable uid from the creation instant in milliseconds. Two sign-ups
/// in the same millisecond would collide on the profiles primary key,
/// so bump until the uid is free.
fn mint_uid(store: &Store, now: DateTime<Utc>) -> Result<String> {
    let mut millis = now.timestamp_millis();
    loop {
        let uid = format!("u{millis}");
        if !store.uid_exists(&uid)? {
            return Ok(uid);
        }
        millis += 1;
    }
}

pub fn sign_in(store: &Store, email: &str, password: &str) -> Result<User> {
    let email = normalize_email(email)?;
    let Some(profile) = store.find_profile_by_email(&email)? else {
        bail!("No account with that email");
    };
    let ok = bcrypt::verify(password, &profile.password_hash)
        .context("Failed to verify password")?;
    if !ok {
        bail!("Incorrect password");
    }
    Ok(profile.user())
}

#[cfg(test)]
mod tests;
