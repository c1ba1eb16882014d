// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::Write;
use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::Connection;

use super::{credits, transactions};
use crate::error::{Result, TrackerError};
use crate::models::{CreditRecord, CreditStatus, Transaction, TransactionFilter};
use crate::session::Session;

pub const TRANSACTION_HEADER: [&str; 10] = [
    "id",
    "type",
    "amount",
    "date",
    "vendor_client",
    "category",
    "category_color",
    "payment_method",
    "notes",
    "is_reimbursed",
];

pub const CREDIT_HEADER: [&str; 8] = [
    "id",
    "client_name",
    "amount",
    "due_date",
    "status",
    "paid_date",
    "notes",
    "created_at",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = TrackerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(TrackerError::validation(format!(
                "unknown format '{}' (use csv|json)",
                other
            ))),
        }
    }
}

fn opt_str<T: ToString>(v: &Option<T>) -> String {
    v.as_ref().map(ToString::to_string).unwrap_or_default()
}

pub fn write_transactions<W: Write>(rows: &[Transaction], format: ExportFormat, mut out: W) -> Result<()> {
    match format {
        ExportFormat::Csv => {
            let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(&mut out);
            wtr.write_record(TRANSACTION_HEADER)?;
            for t in rows {
                wtr.write_record([
                    t.id.to_string(),
                    t.kind.to_string(),
                    t.amount.to_string(),
                    t.date.to_string(),
                    opt_str(&t.vendor),
                    opt_str(&t.category),
                    opt_str(&t.category_color),
                    opt_str(&t.payment_method),
                    opt_str(&t.notes),
                    t.reimbursed.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut out, rows)?;
            out.flush()?;
        }
    }
    Ok(())
}

pub fn write_credits<W: Write>(rows: &[CreditRecord], format: ExportFormat, mut out: W) -> Result<()> {
    match format {
        ExportFormat::Csv => {
            let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(&mut out);
            wtr.write_record(CREDIT_HEADER)?;
            for c in rows {
                wtr.write_record([
                    c.id.to_string(),
                    c.client_name.clone(),
                    c.amount.to_string(),
                    opt_str(&c.due_date),
                    c.status.to_string(),
                    opt_str(&c.paid_date),
                    opt_str(&c.notes),
                    c.created_at.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut out, rows)?;
            out.flush()?;
        }
    }
    Ok(())
}

/// Ledger rows matching `filter`, in listing order. Returns the row count.
pub fn export_transactions<W: Write>(
    conn: &Connection,
    session: &Session,
    filter: &TransactionFilter,
    format: ExportFormat,
    out: W,
) -> Result<usize> {
    let rows = transactions::list(conn, session, filter)?;
    write_transactions(&rows, format, out)?;
    Ok(rows.len())
}

/// Credits as listed on `today` (overdue promotion included).
pub fn export_credits<W: Write>(
    conn: &Connection,
    session: &Session,
    status: Option<CreditStatus>,
    today: NaiveDate,
    format: ExportFormat,
    out: W,
) -> Result<usize> {
    let rows = credits::list(conn, session, status, today)?;
    write_credits(&rows, format, out)?;
    Ok(rows.len())
}
