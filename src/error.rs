// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures surfaced by the tracker services.
///
/// Validation and credential failures belong next to the form that caused
/// them; everything wrapping a lower layer is a generic operation failure.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Username or email already exists")]
    DuplicateIdentity,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("Default category '{0}' cannot be deleted")]
    ProtectedCategory(String),
    #[error("Storage failure: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("Export failed: {0}")]
    Export(#[from] csv::Error),
    #[error("Serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrackerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        TrackerError::Validation(msg.into())
    }

    /// True for failures the caller should show inline rather than as a
    /// generic "operation failed" message.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            TrackerError::DuplicateIdentity
                | TrackerError::InvalidCredentials
                | TrackerError::Validation(_)
                | TrackerError::NotFound { .. }
                | TrackerError::ProtectedCategory(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
