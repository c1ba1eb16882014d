// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::transactions::category_arg;
use crate::db::get_currency_symbol;
use crate::models::{Frequency, NewRecurring, TransactionKind};
use crate::services::recurring;
use crate::session::Session;
use crate::utils::{
    fmt_money, id_arg, maybe_print_json, opt_date, opt_text, parse_decimal, pretty_table, required,
    today,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, session, sub)?,
        Some(("list", sub)) => list(conn, session, sub)?,
        Some(("pause", sub)) => {
            let id = id_arg(sub)?;
            recurring::set_active(conn, session, id, false, today())?;
            println!("Paused recurring transaction {}", id);
        }
        Some(("resume", sub)) => {
            let id = id_arg(sub)?;
            recurring::set_active(conn, session, id, true, today())?;
            println!("Resumed recurring transaction {}", id);
        }
        Some(("rm", sub)) => {
            let id = id_arg(sub)?;
            recurring::delete(conn, session, id)?;
            println!("Removed recurring transaction {}", id);
        }
        Some(("run", sub)) => {
            let upto = opt_date(sub, "date")?.unwrap_or_else(today);
            let booked = recurring::materialize_due(conn, session, upto)?;
            println!("Booked {} transaction(s) due on or before {}", booked, upto);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let kind: TransactionKind = required(sub, "kind")?.parse()?;
    let frequency: Frequency = required(sub, "frequency")?.parse()?;
    let rec = NewRecurring {
        kind,
        amount: parse_decimal(required(sub, "amount")?)?,
        vendor: opt_text(sub, "vendor"),
        category_id: category_arg(conn, session, sub)?,
        payment_method: opt_text(sub, "payment_method"),
        notes: opt_text(sub, "notes"),
        frequency,
        start_date: opt_date(sub, "start")?.unwrap_or_else(today),
    };
    let id = recurring::add(conn, session, &rec)?;
    println!(
        "Added {} {} {} starting {} (id {})",
        frequency, kind, rec.amount, rec.start_date, id
    );
    Ok(())
}

fn list(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let data = recurring::list(conn, session)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let symbol = get_currency_symbol(conn)?;
    let rows = data
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.vendor.clone().unwrap_or_else(|| "Unnamed".into()),
                r.frequency.to_string(),
                r.kind.to_string(),
                fmt_money(&r.amount, &symbol),
                r.next_due_date.to_string(),
                r.category_name.clone().unwrap_or_default(),
                if r.active { "active".into() } else { "paused".into() },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Vendor/Client", "Frequency", "Type", "Amount", "Next Due", "Category", "Status"],
            rows,
        )
    );
    Ok(())
}
