// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn opt_date(m: &clap::ArgMatches, id: &str) -> Result<Option<NaiveDate>> {
    m.get_one::<String>(id).map(|s| parse_date(s)).transpose()
}

pub fn opt_text(m: &clap::ArgMatches, id: &str) -> Option<String> {
    m.get_one::<String>(id)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

pub fn required<'a>(m: &'a clap::ArgMatches, id: &str) -> Result<&'a str> {
    m.get_one::<String>(id)
        .map(|s| s.as_str())
        .with_context(|| format!("--{} is required", id))
}

pub fn id_arg(m: &clap::ArgMatches) -> Result<i64> {
    m.get_one::<i64>("id").copied().context("--id is required")
}

pub fn fmt_money(d: &Decimal, symbol: &str) -> String {
    if d.is_sign_negative() && !d.is_zero() {
        format!("-{}{:.2}", symbol, d.abs())
    } else {
        format!("{}{:.2}", symbol, d)
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // Arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_formats_two_places() {
        assert_eq!(fmt_money(&Decimal::new(4250, 2), "$"), "$42.50");
        assert_eq!(fmt_money(&Decimal::new(-5, 0), "€"), "-€5.00");
        assert_eq!(fmt_money(&Decimal::ZERO, "$"), "$0.00");
    }

    #[test]
    fn dates_are_trimmed() {
        assert_eq!(
            parse_date(" 2026-10-18 ").unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
        );
        assert!(parse_date("18/10/2026").is_err());
    }
}
