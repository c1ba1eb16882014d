// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::User;

/// The authenticated caller. Every user-scoped service takes one of these
/// and filters by its id; nothing reads the current user from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
    pub username: String,
}

impl From<User> for Session {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
        }
    }
}
