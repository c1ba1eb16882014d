// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::get_currency_symbol;
use crate::services::reports::{self, Period};
use crate::session::Session;
use crate::utils::{fmt_money, maybe_print_json, opt_date, opt_text, pretty_table, today};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;

pub fn handle(conn: &Connection, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("dashboard", sub)) => dashboard(conn, session, sub)?,
        Some(("categories", sub)) => by_category(conn, session, sub)?,
        Some(("monthly", sub)) => monthly(conn, session, sub)?,
        _ => {}
    }
    Ok(())
}

/// `--period` wins when given; otherwise the explicit `--from`/`--to` bounds.
fn bounds(sub: &clap::ArgMatches) -> Result<(Option<NaiveDate>, Option<NaiveDate>)> {
    if let Some(p) = opt_text(sub, "period") {
        let period: Period = p.parse()?;
        return Ok(period.range(today()));
    }
    Ok((opt_date(sub, "from")?, opt_date(sub, "to")?))
}

fn dashboard(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let (start, end) = bounds(sub)?;
    let summary = reports::dashboard_summary(conn, session, start, end)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary)? {
        return Ok(());
    }
    let symbol = get_currency_symbol(conn)?;
    let mut rows: Vec<Vec<String>> = summary
        .by_kind
        .iter()
        .map(|k| vec![k.kind.to_string(), k.count.to_string(), fmt_money(&k.total, &symbol)])
        .collect();
    rows.push(vec!["income".into(), String::new(), fmt_money(&summary.income, &symbol)]);
    rows.push(vec!["expenses".into(), String::new(), fmt_money(&summary.expenses, &symbol)]);
    rows.push(vec![
        "net".into(),
        summary.transaction_count.to_string(),
        fmt_money(&summary.net, &symbol),
    ]);
    println!("{}", pretty_table(&["", "Transactions", "Total"], rows));
    Ok(())
}

fn by_category(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let (start, end) = bounds(sub)?;
    let data = reports::category_breakdown(conn, session, start, end)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let symbol = get_currency_symbol(conn)?;
    let rows = data
        .iter()
        .map(|c| {
            vec![
                c.category.clone().unwrap_or_else(|| "(uncategorized)".into()),
                c.count.to_string(),
                fmt_money(&c.total, &symbol),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Transactions", "Total"], rows));
    Ok(())
}

fn monthly(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let data = reports::monthly_breakdown(conn, session)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let symbol = get_currency_symbol(conn)?;
    let rows = data
        .iter()
        .map(|m| {
            vec![
                m.month.clone(),
                fmt_money(&m.income, &symbol),
                fmt_money(&m.expenses, &symbol),
                fmt_money(&m.net(), &symbol),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Month", "Income", "Expenses", "Net"], rows));
    Ok(())
}
