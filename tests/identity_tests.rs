// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tallybook::db;
use tallybook::error::TrackerError;
use tallybook::services::identity;
use tallybook::session::Session;

const COST: u32 = 4;

#[test]
fn register_then_authenticate() {
    let conn = db::open_in_memory().unwrap();
    let id = identity::register(&conn, "alice", "alice@x.com", "secret1", COST).unwrap();
    let user = identity::authenticate(&conn, "alice", "secret1").unwrap();
    assert_eq!(user.id, id);
    assert_eq!(user.email, "alice@x.com");
    assert_ne!(user.password_hash, "secret1");

    let session = Session::from(user);
    assert_eq!(session.user_id, id);
    assert_eq!(session.username, "alice");
}

#[test]
fn same_password_hashes_differently_per_user() {
    let conn = db::open_in_memory().unwrap();
    identity::register(&conn, "a", "a@x.com", "secret1", COST).unwrap();
    identity::register(&conn, "b", "b@x.com", "secret1", COST).unwrap();
    let a = identity::find_by_username(&conn, "a").unwrap().unwrap();
    let b = identity::find_by_username(&conn, "b").unwrap().unwrap();
    assert_ne!(a.password_hash, b.password_hash);
}

#[test]
fn duplicate_email_is_rejected_and_first_user_survives() {
    let conn = db::open_in_memory().unwrap();
    let first = identity::register(&conn, "bob", "bob@x.com", "secret1", COST).unwrap();
    let err = identity::register(&conn, "bobby", "bob@x.com", "secret2", COST).unwrap_err();
    assert!(matches!(err, TrackerError::DuplicateIdentity));

    let err = identity::register(&conn, "bob", "other@x.com", "secret2", COST).unwrap_err();
    assert!(matches!(err, TrackerError::DuplicateIdentity));

    let user = identity::authenticate(&conn, "bob", "secret1").unwrap();
    assert_eq!(user.id, first);
    let users: i64 = conn
        .query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))
        .unwrap();
    assert_eq!(users, 1);
}

#[test]
fn wrong_password_or_unknown_user_is_invalid_credentials() {
    let conn = db::open_in_memory().unwrap();
    identity::register(&conn, "carol", "carol@x.com", "secret1", COST).unwrap();
    assert!(matches!(
        identity::authenticate(&conn, "carol", "secret2"),
        Err(TrackerError::InvalidCredentials)
    ));
    assert!(matches!(
        identity::authenticate(&conn, "nobody", "secret1"),
        Err(TrackerError::InvalidCredentials)
    ));
}

#[test]
fn registration_validates_input() {
    let conn = db::open_in_memory().unwrap();
    for (user, email, pw) in [
        ("", "e@x.com", "secret1"),
        ("dave", "not-an-email", "secret1"),
        ("dave", "dave@x.com", "short"),
    ] {
        let err = identity::register(&conn, user, email, pw, COST).unwrap_err();
        assert!(matches!(err, TrackerError::Validation(_)), "{user} {email} {pw}");
    }
}

#[test]
fn passwords_beyond_bcrypt_input_limit_are_rejected() {
    let conn = db::open_in_memory().unwrap();
    let at_limit = "p".repeat(identity::MAX_PASSWORD_BYTES);
    identity::register(&conn, "erin", "erin@x.com", &at_limit, COST).unwrap();
    assert_eq!(
        identity::authenticate(&conn, "erin", &at_limit).unwrap().username,
        "erin"
    );

    let too_long = format!("{}x", at_limit);
    assert!(matches!(
        identity::register(&conn, "frank", "frank@x.com", &too_long, COST),
        Err(TrackerError::Validation(_))
    ));
    assert!(identity::find_by_username(&conn, "frank").unwrap().is_none());
}
