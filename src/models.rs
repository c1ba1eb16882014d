// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// Generates the string mapping, `FromStr`, `Display` and SQLite conversions
/// for the constrained text enums stored in the schema.
macro_rules! text_enum {
    ($name:ident, $label:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = TrackerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    other => Err(TrackerError::Validation(format!(
                        "unknown {} '{}'",
                        $label, other
                    ))),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                value
                    .as_str()?
                    .parse()
                    .map_err(|e: TrackerError| FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Purchase,
    Expense,
    Credit,
}

text_enum!(TransactionKind, "transaction type", {
    Purchase => "purchase",
    Expense => "expense",
    Credit => "credit",
});

impl TransactionKind {
    /// Credits are income; purchases and expenses are outflows.
    pub fn is_income(self) -> bool {
        matches!(self, TransactionKind::Credit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

text_enum!(Frequency, "frequency", {
    Daily => "daily",
    Weekly => "weekly",
    Monthly => "monthly",
    Quarterly => "quarterly",
    Yearly => "yearly",
});

impl Frequency {
    /// The `n`th scheduled date counted from `start` (n = 0 is `start`).
    ///
    /// Month based schedules are always measured from the anchor, so a
    /// schedule starting on the 31st lands on the last day of short months
    /// and returns to the 31st afterwards.
    pub fn occurrence(self, start: NaiveDate, n: u32) -> Option<NaiveDate> {
        match self {
            Frequency::Daily => start.checked_add_days(chrono::Days::new(u64::from(n))),
            Frequency::Weekly => start.checked_add_days(chrono::Days::new(7 * u64::from(n))),
            Frequency::Monthly => start.checked_add_months(Months::new(n)),
            Frequency::Quarterly => start.checked_add_months(Months::new(n.checked_mul(3)?)),
            Frequency::Yearly => start.checked_add_months(Months::new(n.checked_mul(12)?)),
        }
    }

    /// Index of the first occurrence strictly after `after`.
    pub fn index_after(self, start: NaiveDate, after: NaiveDate) -> Option<u32> {
        if after < start {
            return Some(0);
        }
        let days = (after - start).num_days();
        let months = (after.year() - start.year()) * 12 + after.month() as i32
            - start.month() as i32;
        // Lower bound estimate; the loop below settles the exact index.
        let estimate = match self {
            Frequency::Daily => days,
            Frequency::Weekly => days / 7,
            Frequency::Monthly => i64::from(months),
            Frequency::Quarterly => i64::from(months / 3),
            Frequency::Yearly => i64::from(months / 12),
        };
        let mut n = u32::try_from(estimate.saturating_sub(1).max(0)).ok()?;
        loop {
            if self.occurrence(start, n)? > after {
                return Some(n);
            }
            n = n.checked_add(1)?;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditStatus {
    Pending,
    Paid,
    Overdue,
}

text_enum!(CreditStatus, "status", {
    Pending => "pending",
    Paid => "paid",
    Overdue => "overdue",
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color: String,
    /// `None` marks a global default category shared by every user.
    pub user_id: Option<i64>,
}

impl Category {
    pub fn is_default(&self) -> bool {
        self.user_id.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryUsage {
    pub count: u64,
    pub total: Decimal,
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub vendor: Option<String>,
    pub category_id: Option<i64>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub reimbursed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub vendor: Option<String>,
    pub category_id: Option<i64>,
    pub category: Option<String>,
    pub category_color: Option<String>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub reimbursed: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct NewRecurring {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub vendor: Option<String>,
    pub category_id: Option<i64>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringTransaction {
    pub id: i64,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub vendor: Option<String>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub category_color: Option<String>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub next_due_date: NaiveDate,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct NewCredit {
    pub client_name: String,
    pub amount: Decimal,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditRecord {
    pub id: i64,
    pub client_name: String,
    pub amount: Decimal,
    pub due_date: Option<NaiveDate>,
    pub status: CreditStatus,
    pub paid_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CreditTotals {
    pub pending: Decimal,
    pub paid: Decimal,
    pub overdue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindTotal {
    pub kind: TransactionKind,
    pub total: Decimal,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub by_kind: Vec<KindTotal>,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
    pub transaction_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// `None` groups spending with no category attached.
    pub category: Option<String>,
    pub color: Option<String>,
    pub total: Decimal,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub month: String, // YYYY-MM
    pub income: Decimal,
    pub expenses: Decimal,
}

impl MonthlyTotals {
    pub fn net(&self) -> Decimal {
        self.income - self.expenses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!(" Expense ".parse::<TransactionKind>().unwrap(), TransactionKind::Expense);
        let err = "refund".parse::<TransactionKind>().unwrap_err();
        assert!(matches!(err, TrackerError::Validation(_)));
    }

    #[test]
    fn monthly_occurrences_keep_their_anchor() {
        let start = d(2025, 1, 31);
        assert_eq!(Frequency::Monthly.occurrence(start, 1), Some(d(2025, 2, 28)));
        assert_eq!(Frequency::Monthly.occurrence(start, 2), Some(d(2025, 3, 31)));
        assert_eq!(Frequency::Quarterly.occurrence(start, 1), Some(d(2025, 4, 30)));
        assert_eq!(Frequency::Yearly.occurrence(d(2024, 2, 29), 1), Some(d(2025, 2, 28)));
    }

    #[test]
    fn index_after_is_strict() {
        let start = d(2025, 1, 1);
        assert_eq!(Frequency::Weekly.index_after(start, d(2025, 1, 8)), Some(2));
        assert_eq!(Frequency::Weekly.index_after(start, d(2025, 1, 7)), Some(1));
        assert_eq!(Frequency::Monthly.index_after(start, d(2025, 3, 15)), Some(3));
        assert_eq!(Frequency::Daily.index_after(start, d(2024, 12, 1)), Some(0));
        assert_eq!(Frequency::Daily.index_after(start, start), Some(1));
    }
}
