// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::db::{self, get_currency_symbol, set_currency_symbol};
use crate::utils::{pretty_table, required};
use anyhow::{Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let rows = vec![
                vec!["database".into(), db::db_path(cfg)?.display().to_string()],
                vec!["currency_symbol".into(), get_currency_symbol(conn)?],
                vec!["hash_cost".into(), cfg.hash_cost.to_string()],
                vec!["log_filter".into(), cfg.log_filter.clone()],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        Some(("set-currency", sub)) => {
            let symbol = required(sub, "symbol")?.trim();
            if symbol.is_empty() {
                bail!("Currency symbol must not be empty");
            }
            set_currency_symbol(conn, symbol)?;
            println!("Currency symbol set to {}", symbol);
        }
        _ => {}
    }
    Ok(())
}
