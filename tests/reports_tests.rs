// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use tallybook::db;
use tallybook::error::TrackerError;
use tallybook::models::{NewCredit, NewTransaction, TransactionKind};
use tallybook::services::reports::{self, MONTHLY_WINDOW};
use tallybook::services::{categories, credits, identity, transactions};
use tallybook::session::Session;

fn setup() -> (Connection, Session) {
    let conn = db::open_in_memory().unwrap();
    identity::register(&conn, "alice", "alice@x.com", "secret1", 4).unwrap();
    let user = identity::authenticate(&conn, "alice", "secret1").unwrap();
    (conn, Session::from(user))
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn add(
    conn: &Connection,
    s: &Session,
    kind: TransactionKind,
    amount: &str,
    date: &str,
    category: Option<&str>,
) {
    let category_id = category.map(|name| categories::id_by_name(conn, s, name).unwrap().unwrap());
    transactions::add(
        conn,
        s,
        &NewTransaction {
            kind,
            amount: dec(amount),
            date: d(date),
            vendor: None,
            category_id,
            payment_method: None,
            notes: None,
            reimbursed: false,
        },
    )
    .unwrap();
}

#[test]
fn empty_ledger_reports_zero() {
    let (conn, session) = setup();
    let summary = reports::dashboard_summary(&conn, &session, None, None).unwrap();
    assert!(summary.by_kind.is_empty());
    assert_eq!(summary.income, Decimal::ZERO);
    assert_eq!(summary.expenses, Decimal::ZERO);
    assert_eq!(summary.net, Decimal::ZERO);
    assert_eq!(summary.transaction_count, 0);
    assert!(reports::category_breakdown(&conn, &session, None, None).unwrap().is_empty());
    assert!(reports::monthly_breakdown(&conn, &session).unwrap().is_empty());
}

#[test]
fn dashboard_groups_by_kind_within_bounds() {
    let (conn, session) = setup();
    add(&conn, &session, TransactionKind::Credit, "200", "2026-09-10", None);
    add(&conn, &session, TransactionKind::Credit, "0.10", "2026-10-01", None);
    add(&conn, &session, TransactionKind::Expense, "50", "2026-10-02", Some("Software"));
    add(&conn, &session, TransactionKind::Purchase, "0.20", "2026-10-03", Some("Supplies"));

    let all = reports::dashboard_summary(&conn, &session, None, None).unwrap();
    assert_eq!(all.income, dec("200.10"));
    assert_eq!(all.expenses, dec("50.20"));
    assert_eq!(all.net, all.income - all.expenses);
    assert_eq!(all.net, dec("149.90"));
    assert_eq!(all.transaction_count, 4);
    let kinds: Vec<TransactionKind> = all.by_kind.iter().map(|k| k.kind).collect();
    assert_eq!(
        kinds,
        vec![TransactionKind::Purchase, TransactionKind::Expense, TransactionKind::Credit]
    );
    assert_eq!(all.by_kind[2].count, 2);

    let october = reports::dashboard_summary(&conn, &session, Some(d("2026-10-01")), Some(d("2026-10-02"))).unwrap();
    assert_eq!(october.income, dec("0.10"));
    assert_eq!(october.expenses, dec("50"));
    assert_eq!(october.transaction_count, 2);
}

#[test]
fn category_breakdown_excludes_credits_and_matches_expenses() {
    let (conn, session) = setup();
    add(&conn, &session, TransactionKind::Credit, "999", "2026-10-01", Some("Salary"));
    add(&conn, &session, TransactionKind::Expense, "30", "2026-10-02", Some("Travel"));
    add(&conn, &session, TransactionKind::Purchase, "20", "2026-10-03", Some("Travel"));
    add(&conn, &session, TransactionKind::Expense, "50", "2026-10-04", Some("Marketing"));
    add(&conn, &session, TransactionKind::Expense, "50", "2026-10-05", Some("Utilities"));
    add(&conn, &session, TransactionKind::Expense, "50", "2026-10-06", None);
    add(&conn, &session, TransactionKind::Expense, "5", "2026-10-07", Some("Rent"));

    let items = reports::category_breakdown(&conn, &session, None, None).unwrap();
    assert!(items.iter().all(|c| c.category.as_deref() != Some("Salary")));
    let names: Vec<Option<&str>> = items.iter().map(|c| c.category.as_deref()).collect();
    // equal totals order by name, uncategorized last
    assert_eq!(
        names,
        vec![Some("Marketing"), Some("Travel"), Some("Utilities"), None, Some("Rent")]
    );
    assert_eq!(items[1].count, 2);
    assert_eq!(items[1].color.as_deref(), Some("#45B7D1"));

    let total: Decimal = items.iter().map(|c| c.total).sum();
    let summary = reports::dashboard_summary(&conn, &session, None, None).unwrap();
    assert_eq!(total, summary.expenses);

    let ranged = reports::category_breakdown(&conn, &session, Some(d("2026-10-03")), Some(d("2026-10-04"))).unwrap();
    let ranged_total: Decimal = ranged.iter().map(|c| c.total).sum();
    let ranged_summary = reports::dashboard_summary(&conn, &session, Some(d("2026-10-03")), Some(d("2026-10-04"))).unwrap();
    assert_eq!(ranged_total, ranged_summary.expenses);
}

#[test]
fn monthly_breakdown_separates_income_and_expenses() {
    let (conn, session) = setup();
    add(&conn, &session, TransactionKind::Credit, "200", "2026-09-15", None);
    add(&conn, &session, TransactionKind::Expense, "50", "2026-10-01", None);
    let months = reports::monthly_breakdown(&conn, &session).unwrap();
    assert_eq!(months.len(), 2);
    assert_eq!(months[0].month, "2026-10");
    assert_eq!(months[0].income, Decimal::ZERO);
    assert_eq!(months[0].expenses, dec("50"));
    assert_eq!(months[1].month, "2026-09");
    assert_eq!(months[1].income, dec("200"));
    assert_eq!(months[1].expenses, Decimal::ZERO);

    add(&conn, &session, TransactionKind::Credit, "25", "2026-10-20", None);
    let months = reports::monthly_breakdown(&conn, &session).unwrap();
    assert_eq!(months[0].income, dec("25"));
    assert_eq!(months[0].net(), dec("-25"));
}

#[test]
fn monthly_breakdown_keeps_latest_twelve_months() {
    let (conn, session) = setup();
    for m in 1..=12 {
        add(&conn, &session, TransactionKind::Expense, "1", &format!("2025-{:02}-05", m), None);
    }
    add(&conn, &session, TransactionKind::Credit, "1", "2026-01-05", None);
    let months = reports::monthly_breakdown(&conn, &session).unwrap();
    assert_eq!(months.len(), MONTHLY_WINDOW);
    assert_eq!(months.first().unwrap().month, "2026-01");
    assert_eq!(months.last().unwrap().month, "2025-02");
}

#[test]
fn reports_are_scoped_to_the_caller() {
    let (conn, alice) = setup();
    identity::register(&conn, "bob", "bob@x.com", "secret1", 4).unwrap();
    let bob = Session::from(identity::authenticate(&conn, "bob", "secret1").unwrap());
    add(&conn, &bob, TransactionKind::Expense, "75", "2026-10-01", Some("Travel"));
    let summary = reports::dashboard_summary(&conn, &alice, None, None).unwrap();
    assert_eq!(summary.transaction_count, 0);
    assert!(reports::category_breakdown(&conn, &alice, None, None).unwrap().is_empty());
}

const HUGE: &str = "50000000000000000000000000000";

#[test]
fn totals_beyond_decimal_range_are_rejected_not_panicking() {
    let (conn, session) = setup();
    add(&conn, &session, TransactionKind::Credit, HUGE, "2026-10-01", None);
    add(&conn, &session, TransactionKind::Expense, HUGE, "2026-10-02", Some("Software"));

    // one of each kind still fits
    let summary = reports::dashboard_summary(&conn, &session, None, None).unwrap();
    assert_eq!(summary.net, Decimal::ZERO);

    add(&conn, &session, TransactionKind::Expense, HUGE, "2026-10-03", Some("Software"));
    add(&conn, &session, TransactionKind::Credit, HUGE, "2026-10-04", None);
    assert!(matches!(
        reports::dashboard_summary(&conn, &session, None, None),
        Err(TrackerError::Validation(_))
    ));
    assert!(matches!(
        reports::category_breakdown(&conn, &session, None, None),
        Err(TrackerError::Validation(_))
    ));
    assert!(matches!(
        reports::monthly_breakdown(&conn, &session),
        Err(TrackerError::Validation(_))
    ));
    assert!(matches!(
        categories::usage_stats(&conn, &session),
        Err(TrackerError::Validation(_))
    ));

    for client in ["client1", "client2"] {
        credits::add(
            &conn,
            &session,
            &NewCredit {
                client_name: client.into(),
                amount: dec(HUGE),
                due_date: None,
                notes: None,
            },
        )
        .unwrap();
    }
    let listed = credits::list(&conn, &session, None, d("2026-10-18")).unwrap();
    assert_eq!(listed.len(), 2);
    assert!(matches!(credits::totals(&listed), Err(TrackerError::Validation(_))));
}
