// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rusqlite::{Connection, ToSql, params};
use rust_decimal::Decimal;

use super::{add_amount, decimal_at};
use crate::error::{Result, TrackerError};
use crate::models::{
    CategoryTotal, DashboardSummary, KindTotal, MonthlyTotals, TransactionKind,
};
use crate::session::Session;

/// Number of months returned by [`monthly_breakdown`].
pub const MONTHLY_WINDOW: usize = 12;

/// Dashboard presets. Each bounded period runs from its first day to `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    AllTime,
    ThisMonth,
    ThisQuarter,
    ThisYear,
}

impl Period {
    pub fn range(self, today: NaiveDate) -> (Option<NaiveDate>, Option<NaiveDate>) {
        let start = match self {
            Period::AllTime => return (None, None),
            Period::ThisMonth => today.with_day(1),
            Period::ThisQuarter => {
                let quarter_start = ((today.month() - 1) / 3) * 3 + 1;
                NaiveDate::from_ymd_opt(today.year(), quarter_start, 1)
            }
            Period::ThisYear => NaiveDate::from_ymd_opt(today.year(), 1, 1),
        };
        (start, Some(today))
    }
}

impl FromStr for Period {
    type Err = TrackerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Period::AllTime),
            "month" => Ok(Period::ThisMonth),
            "quarter" => Ok(Period::ThisQuarter),
            "year" => Ok(Period::ThisYear),
            other => Err(TrackerError::validation(format!(
                "unknown period '{}' (use all|month|quarter|year)",
                other
            ))),
        }
    }
}

fn date_bounds(
    sql: &mut String,
    params_vec: &mut Vec<Box<dyn ToSql>>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) {
    if let Some(s) = start {
        sql.push_str(" AND t.date>=?");
        params_vec.push(Box::new(s));
    }
    if let Some(e) = end {
        sql.push_str(" AND t.date<=?");
        params_vec.push(Box::new(e));
    }
}

/// Totals per kind within the inclusive bounds, plus income, expenses and net.
/// `by_kind` lists only kinds that occur, in purchase, expense, credit order.
pub fn dashboard_summary(
    conn: &Connection,
    session: &Session,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<DashboardSummary> {
    let mut sql = String::from("SELECT t.type, t.amount FROM transactions t WHERE t.user_id=?");
    let mut params_vec: Vec<Box<dyn ToSql>> = vec![Box::new(session.user_id)];
    date_bounds(&mut sql, &mut params_vec, start, end);

    let mut stmt = conn.prepare(&sql)?;
    let mut cur = stmt.query(rusqlite::params_from_iter(params_vec.iter()))?;
    let mut agg: BTreeMap<TransactionKind, (Decimal, u64)> = BTreeMap::new();
    while let Some(r) = cur.next()? {
        let kind: TransactionKind = r.get(0)?;
        let amount = decimal_at(r, 1)?;
        let entry = agg.entry(kind).or_insert((Decimal::ZERO, 0));
        add_amount(&mut entry.0, amount)?;
        entry.1 += 1;
    }

    let mut summary = DashboardSummary::default();
    for (kind, (total, count)) in agg {
        if kind.is_income() {
            add_amount(&mut summary.income, total)?;
        } else {
            add_amount(&mut summary.expenses, total)?;
        }
        summary.transaction_count += count;
        summary.by_kind.push(KindTotal { kind, total, count });
    }
    summary.net = summary.income - summary.expenses;
    Ok(summary)
}

/// Purchase and expense spending grouped by category name and color,
/// largest first. Ties go by category name; uncategorized spending sorts
/// after named categories with the same total.
pub fn category_breakdown(
    conn: &Connection,
    session: &Session,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Vec<CategoryTotal>> {
    let mut sql = String::from(
        "SELECT c.name, c.color, t.amount
         FROM transactions t LEFT JOIN categories c ON t.category_id=c.id
         WHERE t.user_id=? AND t.type IN ('purchase','expense')",
    );
    let mut params_vec: Vec<Box<dyn ToSql>> = vec![Box::new(session.user_id)];
    date_bounds(&mut sql, &mut params_vec, start, end);

    let mut stmt = conn.prepare(&sql)?;
    let mut cur = stmt.query(rusqlite::params_from_iter(params_vec.iter()))?;
    let mut agg: BTreeMap<(Option<String>, Option<String>), (Decimal, u64)> = BTreeMap::new();
    while let Some(r) = cur.next()? {
        let name: Option<String> = r.get(0)?;
        let color: Option<String> = r.get(1)?;
        let amount = decimal_at(r, 2)?;
        let entry = agg.entry((name, color)).or_insert((Decimal::ZERO, 0));
        add_amount(&mut entry.0, amount)?;
        entry.1 += 1;
    }

    let mut items: Vec<CategoryTotal> = agg
        .into_iter()
        .map(|((category, color), (total, count))| CategoryTotal {
            category,
            color,
            total,
            count,
        })
        .collect();
    items.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| match (&a.category, &b.category) {
                (Some(x), Some(y)) => x.cmp(y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            })
    });
    Ok(items)
}

/// Income and expenses per calendar month over the whole ledger, newest
/// month first, at most [`MONTHLY_WINDOW`] months.
pub fn monthly_breakdown(conn: &Connection, session: &Session) -> Result<Vec<MonthlyTotals>> {
    let mut stmt = conn.prepare(
        "SELECT substr(date,1,7) AS month, type, amount
         FROM transactions WHERE user_id=?1",
    )?;
    let mut cur = stmt.query(params![session.user_id])?;
    let mut map: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    while let Some(r) = cur.next()? {
        let month: String = r.get(0)?;
        let kind: TransactionKind = r.get(1)?;
        let amount = decimal_at(r, 2)?;
        let entry = map.entry(month).or_insert((Decimal::ZERO, Decimal::ZERO));
        if kind.is_income() {
            add_amount(&mut entry.0, amount)?;
        } else {
            add_amount(&mut entry.1, amount)?;
        }
    }
    let data = map
        .into_iter()
        .rev()
        .take(MONTHLY_WINDOW)
        .map(|(month, (income, expenses))| MonthlyTotals {
            month,
            income,
            expenses,
        })
        .collect();
    Ok(data)
}
