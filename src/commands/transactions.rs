// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::get_currency_symbol;
use crate::models::{NewTransaction, TransactionFilter, TransactionKind};
use crate::services::{categories, transactions};
use crate::session::Session;
use crate::utils::{
    fmt_money, id_arg, maybe_print_json, opt_date, opt_text, parse_decimal, pretty_table, required, today,
};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, session, sub)?,
        Some(("list", sub)) => list(conn, session, sub)?,
        Some(("rm", sub)) => {
            let id = id_arg(sub)?;
            transactions::delete(conn, session, id)?;
            println!("Removed transaction {}", id);
        }
        _ => {}
    }
    Ok(())
}

/// Resolves `--category` by name among the categories visible to the caller.
pub fn category_arg(
    conn: &Connection,
    session: &Session,
    sub: &clap::ArgMatches,
) -> Result<Option<i64>> {
    match opt_text(sub, "category") {
        Some(name) => categories::id_by_name(conn, session, &name)?
            .map(Some)
            .ok_or_else(|| anyhow!("Category '{}' not found", name)),
        None => Ok(None),
    }
}

fn add(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let kind: TransactionKind = required(sub, "kind")?.parse()?;
    let amount = parse_decimal(required(sub, "amount")?)?;
    let date = opt_date(sub, "date")?.unwrap_or_else(today);
    let tx = NewTransaction {
        kind,
        amount,
        date,
        vendor: opt_text(sub, "vendor"),
        category_id: category_arg(conn, session, sub)?,
        payment_method: opt_text(sub, "payment_method"),
        notes: opt_text(sub, "notes"),
        reimbursed: sub.get_flag("reimbursed"),
    };
    let id = transactions::add(conn, session, &tx)?;
    println!(
        "Recorded {} {} on {} (id {})",
        kind,
        fmt_money(&amount, &get_currency_symbol(conn)?),
        date,
        id
    );
    Ok(())
}

pub fn filter_from(sub: &clap::ArgMatches) -> Result<TransactionFilter> {
    Ok(TransactionFilter {
        kind: opt_text(sub, "kind").map(|k| k.parse()).transpose()?,
        category: opt_text(sub, "category"),
        start: opt_date(sub, "from")?,
        end: opt_date(sub, "to")?,
    })
}

fn list(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let filter = filter_from(sub)?;
    let data = transactions::list(conn, session, &filter)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }
    let symbol = get_currency_symbol(conn)?;
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                t.date.to_string(),
                t.kind.to_string(),
                t.vendor.clone().unwrap_or_else(|| "-".into()),
                t.category.clone().unwrap_or_else(|| "-".into()),
                fmt_money(&t.amount, &symbol),
                t.payment_method.clone().unwrap_or_default(),
                if t.reimbursed { "yes".into() } else { String::new() },
                t.notes.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &[
                "ID", "Date", "Type", "Vendor/Client", "Category", "Amount", "Payment", "Reimbursed",
                "Notes"
            ],
            rows,
        )
    );
    Ok(())
}
