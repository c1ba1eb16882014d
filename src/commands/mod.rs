// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod credits;
pub mod exporter;
pub mod recurring;
pub mod reports;
pub mod settings;
pub mod transactions;
pub mod users;

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::services::identity;
use crate::session::Session;

/// Authenticates the global `--user`/`--password` pair.
pub fn login(conn: &Connection, m: &clap::ArgMatches) -> Result<Session> {
    let user = m
        .get_one::<String>("user")
        .context("--user (or TALLYBOOK_USER) is required")?;
    let password = m
        .get_one::<String>("password")
        .context("--password (or TALLYBOOK_PASSWORD) is required")?;
    let user = identity::authenticate(conn, user, password)?;
    Ok(Session::from(user))
}
