// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Installs the global tracing subscriber once. `RUST_LOG` takes precedence
/// over `default_filter`.
pub fn init_tracing(default_filter: &str) {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_filter))
            .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));
        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    });
}
