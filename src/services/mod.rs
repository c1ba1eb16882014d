// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod credits;
pub mod export;
pub mod identity;
pub mod recurring;
pub mod reports;
pub mod transactions;

use rusqlite::Row;
use rusqlite::types::Type;
use rust_decimal::Decimal;

use crate::error::{Result, TrackerError};

/// Amounts are stored as decimal text so sums stay exact.
pub(crate) fn decimal_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    raw.trim()
        .parse::<Decimal>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn ensure_positive(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(TrackerError::validation(format!(
            "amount must be greater than zero, got {}",
            amount
        )));
    }
    Ok(())
}

/// Adds `amount` to a running total. Overflow is reported instead of panicking.
pub(crate) fn add_amount(total: &mut Decimal, amount: Decimal) -> Result<()> {
    *total = total
        .checked_add(amount)
        .ok_or_else(|| TrackerError::validation("amount total exceeds the supported range"))?;
    Ok(())
}

/// Trims free-text input; blank strings are stored as NULL.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
