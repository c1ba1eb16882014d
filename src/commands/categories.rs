// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::get_currency_symbol;
use crate::services::categories;
use crate::session::Session;
use crate::utils::{fmt_money, id_arg, maybe_print_json, opt_text, pretty_table, required};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

#[derive(Serialize)]
struct CategoryRow {
    id: i64,
    name: String,
    color: String,
    default: bool,
    count: u64,
    total: rust_decimal::Decimal,
}

pub fn handle(conn: &Connection, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = required(sub, "name")?;
            let color = opt_text(sub, "color");
            let id = categories::add(conn, session, name, color.as_deref())?;
            println!("Added category '{}' (id {})", name.trim(), id);
        }
        Some(("list", sub)) => {
            let stats = categories::usage_stats(conn, session)?;
            let data: Vec<CategoryRow> = categories::list(conn, session)?
                .into_iter()
                .map(|c| {
                    let usage = stats.get(&c.id).copied().unwrap_or_default();
                    CategoryRow {
                        id: c.id,
                        default: c.is_default(),
                        name: c.name,
                        color: c.color,
                        count: usage.count,
                        total: usage.total,
                    }
                })
                .collect();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let symbol = get_currency_symbol(conn)?;
                let rows = data
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.to_string(),
                            if c.default {
                                format!("{} (default)", c.name)
                            } else {
                                c.name.clone()
                            },
                            c.color.clone(),
                            c.count.to_string(),
                            fmt_money(&c.total, &symbol),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Category", "Color", "Transactions", "Total"], rows)
                );
            }
        }
        Some(("rm", sub)) => {
            let id = id_arg(sub)?;
            categories::delete(conn, session, id)?;
            println!("Removed category {}", id);
        }
        _ => {}
    }
    Ok(())
}
