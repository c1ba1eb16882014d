// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::config::Config;
use crate::services::identity;

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("register", sub)) => {
            let username = sub
                .get_one::<String>("user")
                .context("--user is required to register")?;
            let password = sub
                .get_one::<String>("password")
                .context("--password is required to register")?;
            let email = sub.get_one::<String>("email").context("--email is required")?;
            let id = identity::register(conn, username, email, password, cfg.hash_cost)?;
            println!("Registered '{}' (id {})", username.trim(), id);
        }
        Some(("whoami", _)) => {
            let session = super::login(conn, m)?;
            println!("{} (id {})", session.username, session.user_id);
        }
        _ => {}
    }
    Ok(())
}
