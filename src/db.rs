// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::PathBuf;

use crate::config::Config;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Tallybook", "tallybook"));

/// Global categories available to every user.
pub const DEFAULT_CATEGORIES: [(&str, &str); 8] = [
    ("Marketing", "#FF6B6B"),
    ("Software", "#4ECDC4"),
    ("Travel", "#45B7D1"),
    ("Supplies", "#FFA07A"),
    ("Utilities", "#98D8C8"),
    ("Salary", "#F7DC6F"),
    ("Rent", "#BB8FCE"),
    ("Miscellaneous", "#95A5A6"),
];

pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

pub fn db_path(cfg: &Config) -> Result<PathBuf> {
    if let Some(path) = &cfg.db_path {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        return Ok(path.clone());
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("tallybook.sqlite"))
}

pub fn open_or_init(cfg: &Config) -> Result<Connection> {
    let path = db_path(cfg)?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    tracing::debug!(path = %path.display(), "database ready");
    Ok(conn)
}

/// Fresh, fully initialized database that lives only as long as the handle.
pub fn open_in_memory() -> rusqlite::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS users(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    -- user_id NULL marks a global default category
    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        color TEXT NOT NULL DEFAULT '#95A5A6',
        user_id INTEGER,
        FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('purchase','expense','credit')),
        amount TEXT NOT NULL,
        date TEXT NOT NULL,
        vendor_client TEXT,
        category_id INTEGER,
        payment_method TEXT,
        notes TEXT,
        is_reimbursed INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE,
        FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE SET NULL
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_user_date ON transactions(user_id, date);

    CREATE TABLE IF NOT EXISTS recurring_transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('purchase','expense','credit')),
        amount TEXT NOT NULL,
        vendor_client TEXT,
        category_id INTEGER,
        payment_method TEXT,
        notes TEXT,
        frequency TEXT NOT NULL CHECK(frequency IN ('daily','weekly','monthly','quarterly','yearly')),
        start_date TEXT NOT NULL,
        next_due_date TEXT NOT NULL,
        is_active INTEGER NOT NULL DEFAULT 1,
        FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE,
        FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE SET NULL
    );

    CREATE TABLE IF NOT EXISTS credits_tracking(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        client_name TEXT NOT NULL,
        amount TEXT NOT NULL,
        due_date TEXT,
        status TEXT NOT NULL DEFAULT 'pending' CHECK(status IN ('pending','paid','overdue')),
        paid_date TEXT,
        notes TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(user_id) REFERENCES users(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_credits_user_due ON credits_tracking(user_id, due_date);
    "#,
    )?;
    seed_default_categories(conn)?;
    Ok(())
}

/// Inserts the global categories unless some already exist.
fn seed_default_categories(conn: &Connection) -> rusqlite::Result<()> {
    let existing: i64 = conn.query_row(
        "SELECT COUNT(*) FROM categories WHERE user_id IS NULL",
        [],
        |r| r.get(0),
    )?;
    if existing > 0 {
        return Ok(());
    }
    let mut stmt =
        conn.prepare("INSERT INTO categories(name, color, user_id) VALUES (?1, ?2, NULL)")?;
    for (name, color) in DEFAULT_CATEGORIES {
        stmt.execute(params![name, color])?;
    }
    tracing::info!(count = DEFAULT_CATEGORIES.len(), "seeded default categories");
    Ok(())
}

pub fn get_currency_symbol(conn: &Connection) -> rusqlite::Result<String> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='currency_symbol'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v.unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string()))
}

pub fn set_currency_symbol(conn: &Connection, symbol: &str) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('currency_symbol', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![symbol],
    )?;
    Ok(())
}
