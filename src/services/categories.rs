// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use super::{add_amount, decimal_at};
use crate::error::{Result, TrackerError};
use crate::models::{Category, CategoryUsage};
use crate::session::Session;

pub const DEFAULT_COLOR: &str = "#95A5A6";

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap());

/// Global categories first, then the user's own, each in creation order.
pub fn list(conn: &Connection, session: &Session) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, color, user_id FROM categories
         WHERE user_id IS NULL OR user_id=?1
         ORDER BY user_id IS NOT NULL, id",
    )?;
    let rows = stmt.query_map(params![session.user_id], |r| {
        Ok(Category {
            id: r.get(0)?,
            name: r.get(1)?,
            color: r.get(2)?,
            user_id: r.get(3)?,
        })
    })?;
    let data = rows.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(data)
}

/// Duplicate names are allowed.
pub fn add(conn: &Connection, session: &Session, name: &str, color: Option<&str>) -> Result<i64> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TrackerError::validation("category name must not be empty"));
    }
    let color = color.map(str::trim).unwrap_or(DEFAULT_COLOR);
    if !HEX_COLOR.is_match(color) {
        return Err(TrackerError::validation(format!(
            "color must look like #RRGGBB, got '{}'",
            color
        )));
    }
    conn.execute(
        "INSERT INTO categories(name, color, user_id) VALUES (?1, ?2, ?3)",
        params![name, color.to_uppercase(), session.user_id],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Removes one of the caller's own categories. Transactions that used it
/// keep their row with the category cleared.
pub fn delete(conn: &Connection, session: &Session, id: i64) -> Result<()> {
    let found: Option<(String, Option<i64>)> = conn
        .query_row(
            "SELECT name, user_id FROM categories WHERE id=?1",
            params![id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?;
    match found {
        Some((name, None)) => Err(TrackerError::ProtectedCategory(name)),
        Some((_, Some(owner))) if owner == session.user_id => {
            conn.execute("DELETE FROM categories WHERE id=?1", params![id])?;
            tracing::info!(user_id = session.user_id, id, "deleted category");
            Ok(())
        }
        _ => Err(TrackerError::NotFound {
            entity: "Category",
            id,
        }),
    }
}

pub fn is_visible(conn: &Connection, session: &Session, id: i64) -> Result<bool> {
    let hit: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM categories WHERE id=?1 AND (user_id IS NULL OR user_id=?2)",
            params![id, session.user_id],
            |r| r.get(0),
        )
        .optional()?;
    Ok(hit.is_some())
}

/// Resolves a visible category by name, preferring the user's own over a
/// global one with the same name.
pub fn id_by_name(conn: &Connection, session: &Session, name: &str) -> Result<Option<i64>> {
    let id = conn
        .query_row(
            "SELECT id FROM categories WHERE name=?1 AND (user_id IS NULL OR user_id=?2)
             ORDER BY user_id IS NULL, id LIMIT 1",
            params![name.trim(), session.user_id],
            |r| r.get(0),
        )
        .optional()?;
    Ok(id)
}

/// Count and sum per category id. Unused categories are absent from the map.
pub fn usage_stats(conn: &Connection, session: &Session) -> Result<HashMap<i64, CategoryUsage>> {
    let mut stmt = conn.prepare(
        "SELECT category_id, amount FROM transactions
         WHERE user_id=?1 AND category_id IS NOT NULL",
    )?;
    let mut cur = stmt.query(params![session.user_id])?;
    let mut stats: HashMap<i64, CategoryUsage> = HashMap::new();
    while let Some(r) = cur.next()? {
        let cat_id: i64 = r.get(0)?;
        let amount: Decimal = decimal_at(r, 1)?;
        let entry = stats.entry(cat_id).or_default();
        entry.count += 1;
        add_amount(&mut entry.total, amount)?;
    }
    Ok(stats)
}
