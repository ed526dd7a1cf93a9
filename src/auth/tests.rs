#![allow(clippy::unwrap_used)]

use chrono::TimeZone;

use super::*;
use crate::models::Profile;

fn store() -> Store {
    Store::open_in_memory().unwrap()
}

#[test]
fn test_sign_up_then_sign_in() {
    let store = store();
    let created = sign_up(&store, "jane@example.com", "Jane Doe", "hunter2hunter2").unwrap();
    assert_eq!(created.email, "jane@example.com");
    assert_eq!(created.display_name, "Jane Doe");
    assert!(created.uid.starts_with('u'));

    let signed_in = sign_in(&store, "jane@example.com", "hunter2hunter2").unwrap();
    assert_eq!(signed_in, created);
}

#[test]
fn test_email_normalized_on_both_sides() {
    let store = store();
    sign_up(&store, "  Jane@Example.COM ", "Jane", "hunter2hunter2").unwrap();
    let user = sign_in(&store, "JANE@example.com", "hunter2hunter2").unwrap();
    assert_eq!(user.email, "jane@example.com");
}

#[test]
fn test_wrong_password_rejected() {
    let store = store();
    sign_up(&store, "jane@example.com", "Jane", "hunter2hunter2").unwrap();
    assert!(sign_in(&store, "jane@example.com", "wrong-password").is_err());
}

#[test]
fn test_unknown_email_rejected() {
    let store = store();
    assert!(sign_in(&store, "nobody@example.com", "hunter2hunter2").is_err());
}

#[test]
fn test_duplicate_email_rejected() {
    let store = store();
    sign_up(&store, "jane@example.com", "Jane", "hunter2hunter2").unwrap();
    assert!(sign_up(&store, "jane@example.com", "Other Jane", "different-pass").is_err());
}

#[test]
fn test_short_password_rejected() {
    let store = store();
    assert!(sign_up(&store, "jane@example.com", "Jane", "short").is_err());
}

#[test]
fn test_invalid_email_rejected() {
    let store = store();
    assert!(sign_up(&store, "not-an-email", "Jane", "hunter2hunter2").is_err());
    assert!(sign_up(&store, "", "Jane", "hunter2hunter2").is_err());
}

#[test]
fn test_empty_display_name_rejected() {
    let store = store();
    assert!(sign_up(&store, "jane@example.com", "   ", "hunter2hunter2").is_err());
}

#[test]
fn test_mint_uid_from_instant() {
    let store = store();
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let uid = mint_uid(&store, now).unwrap();
    assert_eq!(uid, format!("u{}", now.timestamp_millis()));
}

#[test]
fn test_mint_uid_bumps_past_taken_uid() {
    let store = store();
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let millis = now.timestamp_millis();
    store
        .insert_profile(&Profile {
            uid: format!("u{millis}"),
            email: "first@example.com".into(),
            display_name: "First".into(),
            password_hash: "$2b$12$fake".into(),
            created_at: now.to_rfc3339(),
        })
        .unwrap();

    let uid = mint_uid(&store, now).unwrap();
    assert_eq!(uid, format!("u{}", millis + 1));
}

#[test]
fn test_password_not_stored_in_clear() {
    let store = store();
    sign_up(&store, "jane@example.com", "Jane", "hunter2hunter2").unwrap();
    let profile = store
        .find_profile_by_email("jane@example.com")
        .unwrap()
        .unwrap();
    assert_ne!(profile.password_hash, "hunter2hunter2");
    assert!(profile.password_hash.starts_with("$2"));
}
