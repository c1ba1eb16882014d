// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Registration and login. Passwords are stored as salted bcrypt hashes.

use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{Connection, ErrorCode, OptionalExtension, params};

use crate::error::{Result, TrackerError};
use crate::models::User;

pub const MIN_PASSWORD_LEN: usize = 6;
/// bcrypt only reads the first 72 bytes of its input.
pub const MAX_PASSWORD_BYTES: usize = 72;

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").unwrap());

pub fn register(
    conn: &Connection,
    username: &str,
    email: &str,
    password: &str,
    hash_cost: u32,
) -> Result<i64> {
    let username = username.trim();
    let email = email.trim();
    if username.is_empty() {
        return Err(TrackerError::validation("username must not be empty"));
    }
    if !EMAIL.is_match(email) {
        return Err(TrackerError::validation(format!("invalid email '{}'", email)));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(TrackerError::validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(TrackerError::validation(format!(
            "password must be at most {} bytes",
            MAX_PASSWORD_BYTES
        )));
    }

    let hashed = bcrypt::hash(password, hash_cost)?;
    match conn.execute(
        "INSERT INTO users(username, email, password) VALUES (?1, ?2, ?3)",
        params![username, email, hashed],
    ) {
        Ok(_) => {}
        Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
            tracing::info!(username, "registration rejected: identity taken");
            return Err(TrackerError::DuplicateIdentity);
        }
        Err(e) => return Err(e.into()),
    }
    let id = conn.last_insert_rowid();
    tracing::info!(user_id = id, username, "registered user");
    Ok(id)
}

pub fn authenticate(conn: &Connection, username: &str, password: &str) -> Result<User> {
    let user = find_by_username(conn, username.trim())?;
    match user {
        Some(u) if bcrypt::verify(password, &u.password_hash)? => Ok(u),
        _ => {
            tracing::warn!(username = username.trim(), "failed login");
            Err(TrackerError::InvalidCredentials)
        }
    }
}

pub fn find_by_username(conn: &Connection, username: &str) -> Result<Option<User>> {
    let user = conn
        .query_row(
            "SELECT id, username, email, password, created_at FROM users WHERE username=?1",
            params![username],
            |r| {
                Ok(User {
                    id: r.get(0)?,
                    username: r.get(1)?,
                    email: r.get(2)?,
                    password_hash: r.get(3)?,
                    created_at: r.get(4)?,
                })
            },
        )
        .optional()?;
    Ok(user)
}
