// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use tallybook::{cli, commands, config::Config, db};

fn main() -> Result<()> {
    let cfg = Config::from_env()?;
    tallybook::init_tracing(&cfg.log_filter);

    let matches = cli::build_cli().get_matches();

    let mut conn = db::open_or_init(&cfg)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path(&cfg)?.display());
        }
        Some(("user", sub)) => commands::users::handle(&conn, &cfg, sub)?,
        Some(("config", sub)) => commands::settings::handle(&conn, &cfg, sub)?,
        Some((name, sub)) => {
            let session = commands::login(&conn, &matches)?;
            match name {
                "tx" => commands::transactions::handle(&conn, &session, sub)?,
                "category" => commands::categories::handle(&conn, &session, sub)?,
                "recurring" => commands::recurring::handle(&mut conn, &session, sub)?,
                "credit" => commands::credits::handle(&conn, &session, sub)?,
                "report" => commands::reports::handle(&conn, &session, sub)?,
                "export" => commands::exporter::handle(&conn, &session, sub)?,
                _ => {}
            }
        }
        None => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
