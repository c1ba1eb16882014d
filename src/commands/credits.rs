// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::get_currency_symbol;
use crate::models::{CreditStatus, NewCredit};
use crate::services::credits;
use crate::session::Session;
use crate::utils::{
    fmt_money, id_arg, maybe_print_json, opt_date, opt_text, parse_decimal, pretty_table, required,
    today,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let credit = NewCredit {
                client_name: required(sub, "client")?.to_string(),
                amount: parse_decimal(required(sub, "amount")?)?,
                due_date: opt_date(sub, "due")?,
                notes: opt_text(sub, "notes"),
            };
            let id = credits::add(conn, session, &credit)?;
            println!("Tracking credit {} for '{}'", id, credit.client_name.trim());
        }
        Some(("list", sub)) => list(conn, session, sub)?,
        Some(("paid", sub)) => {
            let id = id_arg(sub)?;
            let day = today();
            credits::mark_paid(conn, session, id, day)?;
            println!("Credit {} marked paid on {}", id, day);
        }
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let status: Option<CreditStatus> = opt_text(sub, "status").map(|s| s.parse()).transpose()?;
    let data = credits::list(conn, session, status, today())?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No credits to track yet.");
        return Ok(());
    }
    let symbol = get_currency_symbol(conn)?;
    let totals = credits::totals(&data)?;
    println!(
        "Pending {}  |  Paid {}  |  Overdue {}",
        fmt_money(&totals.pending, &symbol),
        fmt_money(&totals.paid, &symbol),
        fmt_money(&totals.overdue, &symbol)
    );
    let rows = data
        .iter()
        .map(|c| {
            vec![
                c.id.to_string(),
                c.client_name.clone(),
                fmt_money(&c.amount, &symbol),
                c.due_date.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
                c.status.to_string(),
                c.paid_date.map(|d| d.to_string()).unwrap_or_default(),
                c.notes.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Client", "Amount", "Due", "Status", "Paid", "Notes"],
            rows
        )
    );
    Ok(())
}
