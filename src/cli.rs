// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl"),
    )
    .arg(Arg::new("jsonl").long("jsonl").action(ArgAction::SetTrue))
}

fn range_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("from").long("from").help("Start date, inclusive (YYYY-MM-DD)"))
        .arg(Arg::new("to").long("to").help("End date, inclusive (YYYY-MM-DD)"))
}

fn entry_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("kind")
            .long("kind")
            .required(true)
            .help("purchase | expense | credit"),
    )
    .arg(Arg::new("amount").long("amount").required(true))
    .arg(Arg::new("vendor").long("vendor").help("Vendor or client"))
    .arg(Arg::new("category").long("category"))
    .arg(
        Arg::new("payment_method")
            .long("payment-method")
            .help("e.g. Credit Card, Debit Card, E-transfer, Cash, Check, PayPal, Bank Transfer"),
    )
    .arg(Arg::new("notes").long("notes"))
}

pub fn build_cli() -> Command {
    Command::new("tallybook")
        .about("Track purchases, expenses, invoices and recurring payments")
        .version(clap::crate_version!())
        .arg(
            Arg::new("user")
                .long("user")
                .env("TALLYBOOK_USER")
                .global(true)
                .help("Username to act as"),
        )
        .arg(
            Arg::new("password")
                .long("password")
                .env("TALLYBOOK_PASSWORD")
                .hide_env_values(true)
                .global(true),
        )
        .subcommand(Command::new("init").about("Create the database and default categories"))
        .subcommand(
            Command::new("user")
                .about("Accounts")
                .subcommand(
                    Command::new("register")
                        .about("Register --user with --password")
                        .arg(Arg::new("email").long("email").required(true)),
                )
                .subcommand(Command::new("whoami").about("Check the supplied credentials")),
        )
        .subcommand(
            Command::new("tx")
                .about("Ledger transactions")
                .subcommand(
                    entry_args(Command::new("add"))
                        .arg(Arg::new("date").long("date").help("Defaults to today"))
                        .arg(
                            Arg::new("reimbursed")
                                .long("reimbursed")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(json_args(range_args(
                    Command::new("list")
                        .arg(Arg::new("kind").long("kind"))
                        .arg(Arg::new("category").long("category")),
                )))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("category")
                .about("Categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("color").long("color").help("#RRGGBB")),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("recurring")
                .about("Recurring transaction templates")
                .subcommand(
                    entry_args(Command::new("add"))
                        .arg(
                            Arg::new("frequency")
                                .long("frequency")
                                .required(true)
                                .help("daily | weekly | monthly | quarterly | yearly"),
                        )
                        .arg(Arg::new("start").long("start").help("Defaults to today")),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(Command::new("pause").arg(id_arg()))
                .subcommand(Command::new("resume").arg(id_arg()))
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(
                    Command::new("run")
                        .about("Book every due occurrence into the ledger")
                        .arg(Arg::new("date").long("date").help("Book up to this day (default today)")),
                ),
        )
        .subcommand(
            Command::new("credit")
                .about("Client invoices")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("client").long("client").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("due").long("due"))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(json_args(
                    Command::new("list").arg(
                        Arg::new("status")
                            .long("status")
                            .help("pending | paid | overdue"),
                    ),
                ))
                .subcommand(Command::new("paid").arg(id_arg())),
        )
        .subcommand(
            Command::new("report")
                .about("Dashboards and breakdowns")
                .subcommand(json_args(range_args(
                    Command::new("dashboard").arg(
                        Arg::new("period")
                            .long("period")
                            .conflicts_with_all(["from", "to"])
                            .help("all | month | quarter | year"),
                    ),
                )))
                .subcommand(json_args(range_args(
                    Command::new("categories").arg(
                        Arg::new("period")
                            .long("period")
                            .conflicts_with_all(["from", "to"]),
                    ),
                )))
                .subcommand(json_args(Command::new("monthly"))),
        )
        .subcommand(
            Command::new("export")
                .about("Write ledger or credits to a file")
                .subcommand(range_args(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv | json"),
                        )
                        .arg(Arg::new("out").long("out").required(true))
                        .arg(Arg::new("kind").long("kind"))
                        .arg(Arg::new("category").long("category")),
                ))
                .subcommand(
                    Command::new("credits")
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true))
                        .arg(Arg::new("status").long("status")),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set-currency")
                        .arg(Arg::new("symbol").long("symbol").required(true)),
                ),
        )
}
