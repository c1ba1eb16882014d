// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::transactions::filter_from;
use crate::models::CreditStatus;
use crate::services::export::{self, ExportFormat};
use crate::services::{credits, transactions};
use crate::session::Session;
use crate::utils::{opt_text, required, today};
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::fs::File;
use std::io::BufWriter;

pub fn handle(conn: &Connection, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, session, sub),
        Some(("credits", sub)) => export_credits(conn, session, sub),
        _ => Ok(()),
    }
}

fn create(out: &str) -> Result<BufWriter<File>> {
    let file = File::create(out).with_context(|| format!("Create {}", out))?;
    Ok(BufWriter::new(file))
}

// The output file is only created once the rows are in hand.

fn export_transactions(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let format: ExportFormat = required(sub, "format")?.parse()?;
    let filter = filter_from(sub)?;
    let out = required(sub, "out")?.trim();
    let rows = transactions::list(conn, session, &filter)?;
    export::write_transactions(&rows, format, create(out)?)
        .with_context(|| format!("Write {}", out))?;
    println!("Exported {} transaction(s) to {}", rows.len(), out);
    Ok(())
}

fn export_credits(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let format: ExportFormat = required(sub, "format")?.parse()?;
    let status: Option<CreditStatus> = opt_text(sub, "status").map(|s| s.parse()).transpose()?;
    let out = required(sub, "out")?.trim();
    let rows = credits::list(conn, session, status, today())?;
    export::write_credits(&rows, format, create(out)?).with_context(|| format!("Write {}", out))?;
    println!("Exported {} credit(s) to {}", rows.len(), out);
    Ok(())
}
