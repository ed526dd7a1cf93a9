mod schema;

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;

use crate::models::{Profile, Transaction};

/// Prefix for per-user ledger rows. The row key is this prefix plus the
/// owner's uid, so each user's list lives under its own key and signing
/// in as someone else can never read the wrong list.
const LEDGER_KEY_PREFIX: &str = "zyfin-";

pub fn user_key(uid: &str) -> String {
    format!("{LEDGER_KEY_PREFIX}{uid}")
}

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut store = Self { conn };
        store.migrate().context("Database migration failed")?;
        Ok(store)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&mut self) -> Result<()> {
        // Check if schema_version table exists
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        // Existing database - check version and apply migrations
        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Ledgers ───────────────────────────────────────────────

    /// Load a user's transaction list. A missing row or a payload that
    /// no longer parses both come back as an empty list; a fresh
    /// account and a damaged one start from the same place.
    pub fn load_transactions(&self, uid: &str) -> Result<Vec<Transaction>> {
        let result = self.conn.query_row(
            "SELECT payload FROM ledgers WHERE user_key = ?1",
            params![user_key(uid)],
            |row| row.get::<_, String>(0),
        );
        match result {
            Ok(payload) => Ok(serde_json::from_str(&payload).unwrap_or_default()),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace a user's stored list with `entries`. The whole list is
    /// written every time; the last writer wins.
    pub fn save_transactions(&self, uid: &str, entries: &[Transaction]) -> Result<()> {
        let payload = serde_json::to_string(entries).context("Failed to serialize ledger")?;
        self.conn.execute(
            "INSERT INTO ledgers (user_key, payload, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(user_key) DO UPDATE SET payload = ?2, updated_at = ?3",
            params![user_key(uid), payload, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    // ── Profiles ──────────────────────────────────────────────

    pub fn insert_profile(&self, profile: &Profile) -> Result<()> {
        self.conn.execute(
            "INSERT INTO profiles (uid, email, display_name, password_hash, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                profile.uid,
                profile.email,
                profile.display_name,
                profile.password_hash,
                profile.created_at,
            ],
        )?;
        Ok(())
    }

    pub fn uid_exists(&self, uid: &str) -> Result<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM profiles WHERE uid = ?1)",
            params![uid],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    pub fn find_profile_by_email(&self, email: &str) -> Result<Option<Profile>> {
        let result = self.conn.query_row(
            "SELECT uid, email, display_name, password_hash, created_at
             FROM profiles WHERE email = ?1",
            params![email],
            |row| {
                Ok(Profile {
                    uid: row.get(0)?,
                    email: row.get(1)?,
                    display_name: row.get(2)?,
                    password_hash: row.get(3)?,
                    created_at: row.get(4)?,
                })
            },
        );
        match result {
            Ok(p) => Ok(Some(p)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    #[cfg(test)]
    pub(crate) fn overwrite_payload(&self, uid: &str, payload: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO ledgers (user_key, payload, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(user_key) DO UPDATE SET payload = ?2, updated_at = ?3",
            params![user_key(uid), payload, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}
