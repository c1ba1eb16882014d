// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use tallybook::db::{self, DEFAULT_CATEGORIES};
use tallybook::error::TrackerError;
use tallybook::models::{NewTransaction, TransactionFilter, TransactionKind};
use tallybook::services::{categories, identity, transactions};
use tallybook::session::Session;

fn login(conn: &Connection, name: &str) -> Session {
    identity::register(conn, name, &format!("{name}@x.com"), "secret1", 4).unwrap();
    Session::from(identity::authenticate(conn, name, "secret1").unwrap())
}

fn spend(conn: &Connection, s: &Session, amount: &str, category_id: Option<i64>) {
    transactions::add(
        conn,
        s,
        &NewTransaction {
            kind: TransactionKind::Expense,
            amount: amount.parse().unwrap(),
            date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
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
fn users_see_globals_plus_their_own() {
    let conn = db::open_in_memory().unwrap();
    let alice = login(&conn, "alice");
    let bob = login(&conn, "bob");
    let mine = categories::add(&conn, &alice, "Coffee", Some("#a0522d")).unwrap();
    categories::add(&conn, &bob, "Books", None).unwrap();

    let seen = categories::list(&conn, &alice).unwrap();
    assert_eq!(seen.len(), DEFAULT_CATEGORIES.len() + 1);
    assert!(seen[..DEFAULT_CATEGORIES.len()].iter().all(|c| c.is_default()));
    let last = seen.last().unwrap();
    assert_eq!(last.id, mine);
    assert_eq!(last.color, "#A0522D");
    assert_eq!(last.user_id, Some(alice.user_id));
    assert!(seen.iter().all(|c| c.name != "Books"));
}

#[test]
fn duplicate_names_are_permitted() {
    let conn = db::open_in_memory().unwrap();
    let alice = login(&conn, "alice");
    let a = categories::add(&conn, &alice, "Software", None).unwrap();
    let b = categories::add(&conn, &alice, "Software", None).unwrap();
    assert_ne!(a, b);
    // Own category wins over the global one of the same name
    assert_eq!(categories::id_by_name(&conn, &alice, "Software").unwrap(), Some(a));
}

#[test]
fn add_validates_name_and_color() {
    let conn = db::open_in_memory().unwrap();
    let alice = login(&conn, "alice");
    assert!(matches!(
        categories::add(&conn, &alice, "  ", None),
        Err(TrackerError::Validation(_))
    ));
    assert!(matches!(
        categories::add(&conn, &alice, "Ads", Some("red")),
        Err(TrackerError::Validation(_))
    ));
}

#[test]
fn defaults_cannot_be_deleted_and_others_are_not_found() {
    let conn = db::open_in_memory().unwrap();
    let alice = login(&conn, "alice");
    let bob = login(&conn, "bob");
    let rent = categories::id_by_name(&conn, &alice, "Rent").unwrap().unwrap();
    assert!(matches!(
        categories::delete(&conn, &alice, rent),
        Err(TrackerError::ProtectedCategory(name)) if name == "Rent"
    ));

    let bobs = categories::add(&conn, &bob, "Books", None).unwrap();
    assert!(matches!(
        categories::delete(&conn, &alice, bobs),
        Err(TrackerError::NotFound { .. })
    ));
    assert!(matches!(
        categories::delete(&conn, &alice, 9999),
        Err(TrackerError::NotFound { .. })
    ));
}

#[test]
fn deleting_a_category_keeps_its_transactions() {
    let conn = db::open_in_memory().unwrap();
    let alice = login(&conn, "alice");
    let coffee = categories::add(&conn, &alice, "Coffee", None).unwrap();
    spend(&conn, &alice, "4.20", Some(coffee));
    categories::delete(&conn, &alice, coffee).unwrap();

    let rows = transactions::list(&conn, &alice, &TransactionFilter::default()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category_id, None);
    assert_eq!(rows[0].category, None);
}

#[test]
fn usage_stats_only_cover_used_categories() {
    let conn = db::open_in_memory().unwrap();
    let alice = login(&conn, "alice");
    let bob = login(&conn, "bob");
    let software = categories::id_by_name(&conn, &alice, "Software").unwrap().unwrap();
    let travel = categories::id_by_name(&conn, &alice, "Travel").unwrap().unwrap();
    spend(&conn, &alice, "10.10", Some(software));
    spend(&conn, &alice, "0.20", Some(software));
    spend(&conn, &alice, "7", None);
    spend(&conn, &bob, "100", Some(software));

    let stats = categories::usage_stats(&conn, &alice).unwrap();
    assert_eq!(stats.len(), 1);
    let usage = stats[&software];
    assert_eq!(usage.count, 2);
    assert_eq!(usage.total, Decimal::new(1030, 2));
    assert!(!stats.contains_key(&travel));
    assert_eq!(stats.get(&travel).copied().unwrap_or_default().count, 0);
}
