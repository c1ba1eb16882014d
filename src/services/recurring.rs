// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Recurring templates and their schedule.
//!
//! Templates are never turned into ledger rows behind the caller's back.
//! [`materialize_due`] is the single entry point that does so, and only when
//! invoked.

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};

use super::{categories, decimal_at, ensure_positive, non_blank};
use crate::error::{Result, TrackerError};
use crate::models::{Frequency, NewRecurring, RecurringTransaction, TransactionKind};
use crate::session::Session;

/// Upper bound on occurrences booked for one template in a single run.
pub const MAX_CATCH_UP: u32 = 1024;

pub fn add(conn: &Connection, session: &Session, rec: &NewRecurring) -> Result<i64> {
    ensure_positive(rec.amount)?;
    if let Some(cat_id) = rec.category_id {
        if !categories::is_visible(conn, session, cat_id)? {
            return Err(TrackerError::validation(format!(
                "category {} is not available",
                cat_id
            )));
        }
    }
    conn.execute(
        "INSERT INTO recurring_transactions
         (user_id, type, amount, vendor_client, category_id, payment_method, notes, frequency, start_date, next_due_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
        params![
            session.user_id,
            rec.kind,
            rec.amount.to_string(),
            non_blank(rec.vendor.as_deref()),
            rec.category_id,
            non_blank(rec.payment_method.as_deref()),
            non_blank(rec.notes.as_deref()),
            rec.frequency,
            rec.start_date,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Soonest due first.
pub fn list(conn: &Connection, session: &Session) -> Result<Vec<RecurringTransaction>> {
    let mut stmt = conn.prepare(
        "SELECT r.id, r.type, r.amount, r.vendor_client, r.category_id, c.name, c.color,
                r.payment_method, r.notes, r.frequency, r.start_date, r.next_due_date, r.is_active
         FROM recurring_transactions r LEFT JOIN categories c ON r.category_id=c.id
         WHERE r.user_id=?1
         ORDER BY r.next_due_date, r.id",
    )?;
    let rows = stmt.query_map(params![session.user_id], |r| {
        Ok(RecurringTransaction {
            id: r.get(0)?,
            kind: r.get(1)?,
            amount: decimal_at(r, 2)?,
            vendor: r.get(3)?,
            category_id: r.get(4)?,
            category_name: r.get(5)?,
            category_color: r.get(6)?,
            payment_method: r.get(7)?,
            notes: r.get(8)?,
            frequency: r.get(9)?,
            start_date: r.get(10)?,
            next_due_date: r.get(11)?,
            active: r.get(12)?,
        })
    })?;
    let data = rows.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(data)
}

/// Pause (`false`) or resume (`true`) a template.
///
/// Resuming a paused template moves its next due date to the first scheduled
/// occurrence on or after `today`; occurrences missed while paused are never
/// booked.
pub fn set_active(
    conn: &Connection,
    session: &Session,
    id: i64,
    active: bool,
    today: NaiveDate,
) -> Result<()> {
    let found: Option<(bool, Frequency, NaiveDate, NaiveDate)> = conn
        .query_row(
            "SELECT is_active, frequency, start_date, next_due_date
             FROM recurring_transactions WHERE id=?1 AND user_id=?2",
            params![id, session.user_id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .optional()?;
    let Some((was_active, frequency, start_date, mut next_due)) = found else {
        return Err(TrackerError::NotFound {
            entity: "Recurring transaction",
            id,
        });
    };

    if active && !was_active && next_due < today {
        if let Some(day_before) = today.pred_opt() {
            next_due = frequency
                .index_after(start_date, day_before)
                .and_then(|n| frequency.occurrence(start_date, n))
                .ok_or_else(|| schedule_overflow(id))?;
        }
    }
    conn.execute(
        "UPDATE recurring_transactions SET is_active=?1, next_due_date=?2 WHERE id=?3 AND user_id=?4",
        params![active, next_due, id, session.user_id],
    )?;
    tracing::info!(user_id = session.user_id, id, active, next_due = %next_due, "recurring template toggled");
    Ok(())
}

pub fn delete(conn: &Connection, session: &Session, id: i64) -> Result<()> {
    conn.execute(
        "DELETE FROM recurring_transactions WHERE id=?1 AND user_id=?2",
        params![id, session.user_id],
    )?;
    Ok(())
}

struct DueTemplate {
    id: i64,
    kind: TransactionKind,
    amount: String,
    vendor: Option<String>,
    category_id: Option<i64>,
    payment_method: Option<String>,
    notes: Option<String>,
    frequency: Frequency,
    start_date: NaiveDate,
    next_due_date: NaiveDate,
}

/// Books every elapsed occurrence (on or before `today`) of the caller's
/// active templates into the ledger, dated on its scheduled day, and moves
/// each template's next due date past `today`. Returns the number of ledger
/// rows created. Either everything is booked or nothing is.
pub fn materialize_due(conn: &mut Connection, session: &Session, today: NaiveDate) -> Result<usize> {
    let tx = conn.transaction()?;
    let due: Vec<DueTemplate> = {
        let mut stmt = tx.prepare(
            "SELECT id, type, amount, vendor_client, category_id, payment_method, notes,
                    frequency, start_date, next_due_date
             FROM recurring_transactions
             WHERE user_id=?1 AND is_active=1 AND next_due_date<=?2
             ORDER BY next_due_date, id",
        )?;
        let rows = stmt.query_map(params![session.user_id, today], |r| {
            Ok(DueTemplate {
                id: r.get(0)?,
                kind: r.get(1)?,
                amount: r.get(2)?,
                vendor: r.get(3)?,
                category_id: r.get(4)?,
                payment_method: r.get(5)?,
                notes: r.get(6)?,
                frequency: r.get(7)?,
                start_date: r.get(8)?,
                next_due_date: r.get(9)?,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>()?
    };

    let mut booked = 0usize;
    for t in &due {
        let mut n = t
            .frequency
            .index_after(t.start_date, t.next_due_date)
            .map(|i| i.saturating_sub(1))
            .ok_or_else(|| schedule_overflow(t.id))?;
        let mut date = t.next_due_date;
        let mut count = 0u32;
        while date <= today && count < MAX_CATCH_UP {
            tx.execute(
                "INSERT INTO transactions(user_id, type, amount, date, vendor_client, category_id, payment_method, notes, is_reimbursed)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0)",
                params![
                    session.user_id,
                    t.kind,
                    t.amount,
                    date,
                    t.vendor,
                    t.category_id,
                    t.payment_method,
                    t.notes,
                ],
            )?;
            count += 1;
            n += 1;
            date = t
                .frequency
                .occurrence(t.start_date, n)
                .ok_or_else(|| schedule_overflow(t.id))?;
        }
        tx.execute(
            "UPDATE recurring_transactions SET next_due_date=?1 WHERE id=?2",
            params![date, t.id],
        )?;
        if count == MAX_CATCH_UP && date <= today {
            tracing::warn!(id = t.id, next_due = %date, "catch-up limit reached; run again to continue");
        }
        booked += count as usize;
    }
    tx.commit()?;
    tracing::info!(user_id = session.user_id, templates = due.len(), booked, "materialized recurring transactions");
    Ok(booked)
}

fn schedule_overflow(id: i64) -> TrackerError {
    TrackerError::validation(format!("schedule of recurring transaction {} is out of range", id))
}
