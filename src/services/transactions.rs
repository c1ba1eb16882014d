// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, Row, ToSql, params};

use super::{categories, decimal_at, ensure_positive, non_blank};
use crate::error::{Result, TrackerError};
use crate::models::{NewTransaction, Transaction, TransactionFilter};
use crate::session::Session;

/// Choices offered by forms; any other text is accepted as well.
pub const PAYMENT_METHODS: [&str; 7] = [
    "Credit Card",
    "Debit Card",
    "E-transfer",
    "Cash",
    "Check",
    "PayPal",
    "Bank Transfer",
];

pub fn add(conn: &Connection, session: &Session, tx: &NewTransaction) -> Result<i64> {
    ensure_positive(tx.amount)?;
    if let Some(cat_id) = tx.category_id {
        if !categories::is_visible(conn, session, cat_id)? {
            return Err(TrackerError::validation(format!(
                "category {} is not available",
                cat_id
            )));
        }
    }
    conn.execute(
        "INSERT INTO transactions(user_id, type, amount, date, vendor_client, category_id, payment_method, notes, is_reimbursed)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            session.user_id,
            tx.kind,
            tx.amount.to_string(),
            tx.date,
            non_blank(tx.vendor.as_deref()),
            tx.category_id,
            non_blank(tx.payment_method.as_deref()),
            non_blank(tx.notes.as_deref()),
            tx.reimbursed,
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::debug!(user_id = session.user_id, id, kind = %tx.kind, "recorded transaction");
    Ok(id)
}

/// Most recent first: by date, then by entry time.
pub fn list(
    conn: &Connection,
    session: &Session,
    filter: &TransactionFilter,
) -> Result<Vec<Transaction>> {
    let mut sql = String::from(
        "SELECT t.id, t.type, t.amount, t.date, t.vendor_client, t.category_id, c.name, c.color,
                t.payment_method, t.notes, t.is_reimbursed, t.created_at
         FROM transactions t LEFT JOIN categories c ON t.category_id=c.id
         WHERE t.user_id=?",
    );
    let mut params_vec: Vec<Box<dyn ToSql>> = vec![Box::new(session.user_id)];

    if let Some(kind) = filter.kind {
        sql.push_str(" AND t.type=?");
        params_vec.push(Box::new(kind));
    }
    if let Some(cat) = non_blank(filter.category.as_deref()) {
        sql.push_str(" AND c.name=?");
        params_vec.push(Box::new(cat));
    }
    if let Some(start) = filter.start {
        sql.push_str(" AND t.date>=?");
        params_vec.push(Box::new(start));
    }
    if let Some(end) = filter.end {
        sql.push_str(" AND t.date<=?");
        params_vec.push(Box::new(end));
    }
    sql.push_str(" ORDER BY t.date DESC, t.created_at DESC, t.id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(params_vec.iter()), map_row)?;
    let data = rows.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(data)
}

/// Deleting an id that does not exist, or belongs to someone else, is a no-op.
pub fn delete(conn: &Connection, session: &Session, id: i64) -> Result<()> {
    let n = conn.execute(
        "DELETE FROM transactions WHERE id=?1 AND user_id=?2",
        params![id, session.user_id],
    )?;
    tracing::debug!(user_id = session.user_id, id, removed = n, "delete transaction");
    Ok(())
}

fn map_row(r: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: r.get(0)?,
        kind: r.get(1)?,
        amount: decimal_at(r, 2)?,
        date: r.get(3)?,
        vendor: r.get(4)?,
        category_id: r.get(5)?,
        category: r.get(6)?,
        category_color: r.get(7)?,
        payment_method: r.get(8)?,
        notes: r.get(9)?,
        reimbursed: r.get(10)?,
        created_at: r.get(11)?,
    })
}
