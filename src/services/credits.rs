// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Client invoices and their status.
//!
//! `pending -> overdue` happens lazily when the due date has passed and the
//! caller reconciles (listing always does). `pending|overdue|paid -> paid`
//! happens through [`mark_paid`]. Nothing ever leaves `paid`.

use chrono::NaiveDate;
use rusqlite::{Connection, ToSql, params};

use super::{add_amount, decimal_at, ensure_positive, non_blank};
use crate::error::{Result, TrackerError};
use crate::models::{CreditRecord, CreditStatus, CreditTotals, NewCredit};
use crate::session::Session;

pub fn add(conn: &Connection, session: &Session, credit: &NewCredit) -> Result<i64> {
    ensure_positive(credit.amount)?;
    let client = credit.client_name.trim();
    if client.is_empty() {
        return Err(TrackerError::validation("client name must not be empty"));
    }
    conn.execute(
        "INSERT INTO credits_tracking(user_id, client_name, amount, due_date, status, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            session.user_id,
            client,
            credit.amount.to_string(),
            credit.due_date,
            CreditStatus::Pending,
            non_blank(credit.notes.as_deref()),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Promotes the caller's pending credits whose due date is strictly before
/// `today` to overdue. Idempotent; concurrent runs converge on the same rows.
pub fn reconcile_overdue(conn: &Connection, session: &Session, today: NaiveDate) -> Result<usize> {
    let n = conn.execute(
        "UPDATE credits_tracking SET status=?1
         WHERE user_id=?2 AND status=?3 AND due_date IS NOT NULL AND due_date<?4",
        params![
            CreditStatus::Overdue,
            session.user_id,
            CreditStatus::Pending,
            today
        ],
    )?;
    if n > 0 {
        tracing::info!(user_id = session.user_id, promoted = n, "credits now overdue");
    }
    Ok(n)
}

/// Reconciles first, so the returned statuses (and the filter) reflect
/// `today`. Ordered by due date, undated credits first.
pub fn list(
    conn: &Connection,
    session: &Session,
    status: Option<CreditStatus>,
    today: NaiveDate,
) -> Result<Vec<CreditRecord>> {
    reconcile_overdue(conn, session, today)?;

    let mut sql = String::from(
        "SELECT id, client_name, amount, due_date, status, paid_date, notes, created_at
         FROM credits_tracking WHERE user_id=?",
    );
    let mut params_vec: Vec<Box<dyn ToSql>> = vec![Box::new(session.user_id)];
    if let Some(s) = status {
        sql.push_str(" AND status=?");
        params_vec.push(Box::new(s));
    }
    sql.push_str(" ORDER BY due_date, id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(params_vec.iter()), |r| {
        Ok(CreditRecord {
            id: r.get(0)?,
            client_name: r.get(1)?,
            amount: decimal_at(r, 2)?,
            due_date: r.get(3)?,
            status: r.get(4)?,
            paid_date: r.get(5)?,
            notes: r.get(6)?,
            created_at: r.get(7)?,
        })
    })?;
    let data = rows.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(data)
}

/// Marks a credit paid on `today` regardless of its current status;
/// re-marking refreshes the paid date.
pub fn mark_paid(conn: &Connection, session: &Session, id: i64, today: NaiveDate) -> Result<()> {
    let n = conn.execute(
        "UPDATE credits_tracking SET status=?1, paid_date=?2 WHERE id=?3 AND user_id=?4",
        params![CreditStatus::Paid, today, id, session.user_id],
    )?;
    if n == 0 {
        return Err(TrackerError::NotFound { entity: "Credit", id });
    }
    tracing::info!(user_id = session.user_id, id, paid_on = %today, "credit paid");
    Ok(())
}

pub fn totals(credits: &[CreditRecord]) -> Result<CreditTotals> {
    let mut acc = CreditTotals::default();
    for c in credits {
        let bucket = match c.status {
            CreditStatus::Pending => &mut acc.pending,
            CreditStatus::Paid => &mut acc.paid,
            CreditStatus::Overdue => &mut acc.overdue,
        };
        add_amount(bucket, c.amount)?;
    }
    Ok(acc)
}
