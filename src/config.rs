// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use crate::error::{Result, TrackerError};

pub const ENV_DB: &str = "TALLYBOOK_DB";
pub const ENV_HASH_COST: &str = "TALLYBOOK_HASH_COST";
pub const ENV_LOG: &str = "TALLYBOOK_LOG";

pub const DEFAULT_LOG_FILTER: &str = "tallybook=info";

/// Process-level settings. Per-database preferences live in the `settings`
/// table instead (see [`crate::db::get_currency_symbol`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Explicit database location; falls back to the platform data dir.
    pub db_path: Option<PathBuf>,
    /// bcrypt work factor for newly hashed passwords.
    pub hash_cost: u32,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: None,
            hash_cost: bcrypt::DEFAULT_COST,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();
        if let Some(path) = lookup(ENV_DB).filter(|s| !s.trim().is_empty()) {
            cfg.db_path = Some(PathBuf::from(path.trim()));
        }
        if let Some(raw) = lookup(ENV_HASH_COST) {
            let cost: u32 = raw.trim().parse().map_err(|_| {
                TrackerError::validation(format!("{} must be an integer, got '{}'", ENV_HASH_COST, raw))
            })?;
            if !(4..=31).contains(&cost) {
                return Err(TrackerError::validation(format!(
                    "{} must be between 4 and 31, got {}",
                    ENV_HASH_COST, cost
                )));
            }
            cfg.hash_cost = cost;
        }
        if let Some(filter) = lookup(ENV_LOG).filter(|s| !s.trim().is_empty()) {
            cfg.log_filter = filter.trim().to_string();
        }
        Ok(cfg)
    }
}
