// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, Arg, ArgAction, Command};

const LISTS: [&str; 5] = ["income", "bills", "expenses", "savings", "debt"];

fn list_arg() -> Arg {
    Arg::new("list")
        .long("list")
        .short('l')
        .required(true)
        .value_parser(LISTS)
        .help("Which list the item lives in")
}

fn id_arg() -> Arg {
    Arg::new("id").long("id").required(true).help("Item id (see `item list`)")
}

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    ]
}

fn credentials(cmd: Command) -> Command {
    cmd.arg(Arg::new("email").long("email").required(true))
        .arg(Arg::new("password").long("password").required(true))
}

pub fn build_cli() -> Command {
    Command::new("budgetbook")
        .version(crate_version!())
        .about("Month-by-month personal budget tracker")
        .arg(
            Arg::new("month")
                .long("month")
                .short('m')
                .global(true)
                .value_name("YYYY-MM")
                .help("Budget month to work on (default: the undated current sheet)"),
        )
        .subcommand(Command::new("init").about("Create the local store"))
        .subcommand(credentials(Command::new("signup").about("Create a local account")))
        .subcommand(credentials(Command::new("login").about("Log in and start a session")))
        .subcommand(Command::new("logout").about("End the current session"))
        .subcommand(Command::new("whoami").about("Show the logged-in user"))
        .subcommand(
            Command::new("passwd")
                .about("Change the password of the logged-in user")
                .arg(Arg::new("old").long("old").required(true))
                .arg(Arg::new("new").long("new").required(true)),
        )
        .subcommand(
            Command::new("item")
                .about("Edit line items of the selected month")
                .subcommand(
                    Command::new("add")
                        .arg(list_arg())
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(
                    Command::new("rename")
                        .arg(list_arg())
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(Command::new("rm").arg(list_arg()).arg(id_arg()))
                .subcommand(
                    Command::new("set")
                        .arg(list_arg())
                        .arg(id_arg())
                        .arg(
                            Arg::new("field")
                                .long("field")
                                .required(true)
                                .value_parser(["planned", "actual"]),
                        )
                        .arg(
                            Arg::new("value")
                                .long("value")
                                .required(true)
                                .allow_hyphen_values(true),
                        ),
                )
                .subcommand(
                    Command::new("check")
                        .arg(list_arg())
                        .arg(id_arg())
                        .arg(
                            Arg::new("off")
                                .long("off")
                                .action(ArgAction::SetTrue)
                                .help("Mark as not paid"),
                        ),
                )
                .subcommand(
                    Command::new("tags")
                        .arg(list_arg())
                        .arg(id_arg())
                        .arg(
                            Arg::new("tags")
                                .long("tags")
                                .required(true)
                                .value_delimiter(',')
                                .help("Comma-separated tags; pass \"\" to clear"),
                        ),
                )
                .subcommand(
                    Command::new("classify")
                        .arg(list_arg())
                        .arg(id_arg())
                        .arg(
                            Arg::new("as")
                                .long("as")
                                .value_parser(["needs", "wants", "savings", "debt"])
                                .help("Pin a classification; omit to re-derive from the name"),
                        ),
                )
                .subcommand(
                    Command::new("list")
                        .arg(
                            Arg::new("list")
                                .long("list")
                                .short('l')
                                .value_parser(LISTS),
                        )
                        .args(json_args()),
                ),
        )
        .subcommand(
            Command::new("month")
                .about("Saved months")
                .subcommand(Command::new("list").args(json_args()))
                .subcommand(Command::new("show").args(json_args()))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a saved month")
                        .arg(Arg::new("key").required(true).value_name("YYYY-MM|current")),
                )
                .subcommand(
                    Command::new("compare")
                        .arg(Arg::new("a").required(true).value_name("YYYY-MM"))
                        .arg(Arg::new("b").required(true).value_name("YYYY-MM"))
                        .args(json_args()),
                ),
        )
        .subcommand(
            Command::new("recurring")
                .about("Recurring transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("list")
                                .long("list")
                                .short('l')
                                .default_value("bills")
                                .help("Target list (income|bills|expenses|savings|debt)"),
                        )
                        .arg(
                            Arg::new("frequency")
                                .long("frequency")
                                .default_value("monthly")
                                .value_parser(["daily", "weekly", "monthly", "yearly"]),
                        )
                        .arg(
                            Arg::new("next")
                                .long("next")
                                .value_name("YYYY-MM-DD")
                                .help("First due date (default: today)"),
                        )
                        .arg(
                            Arg::new("manual")
                                .long("manual")
                                .action(ArgAction::SetTrue)
                                .help("Do not apply automatically on session start"),
                        ),
                )
                .subcommand(Command::new("list").args(json_args()))
                .subcommand(Command::new("rm").arg(Arg::new("id").long("id").required(true)))
                .subcommand(
                    Command::new("apply")
                        .about("Apply a template now, regardless of its due date")
                        .arg(Arg::new("id").long("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("target").long("target").required(true)),
                )
                .subcommand(Command::new("list").args(json_args()))
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("index")
                            .long("index")
                            .required(true)
                            .value_parser(clap::value_parser!(usize))
                            .help("Position shown by `goal list`"),
                    ),
                ),
        )
        .subcommand(
            Command::new("alerts")
                .about("Budget alert thresholds")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("expenses_percent").long("expenses-percent"))
                        .arg(Arg::new("bills_percent").long("bills-percent"))
                        .arg(
                            Arg::new("cooldown_minutes")
                                .long("cooldown-minutes")
                                .value_parser(clap::value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("notify")
                                .long("notify")
                                .value_parser(["on", "off"]),
                        ),
                )
                .subcommand(Command::new("check").args(json_args())),
        )
        .subcommand(
            Command::new("report")
                .about("Totals and derived figures for the selected month")
                .subcommand(Command::new("summary").args(json_args()))
                .subcommand(Command::new("rule").about("50/30/20 breakdown").args(json_args()))
                .subcommand(Command::new("savings-rate").args(json_args()))
                .subcommand(Command::new("trends").args(json_args()))
                .subcommand(Command::new("budget-vs-actual").args(json_args())),
        )
        .subcommand(
            Command::new("export")
                .subcommand(
                    Command::new("csv").arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("backup").arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("import").subcommand(
                Command::new("backup").arg(Arg::new("path").long("path").required(true)),
            ),
        )
        .subcommand(
            Command::new("settings")
                .subcommand(
                    Command::new("currency").arg(
                        Arg::new("symbol")
                            .long("set")
                            .help("New currency symbol; omit to show the current one"),
                    ),
                )
                .subcommand(
                    Command::new("dark-mode").arg(
                        Arg::new("state")
                            .required(true)
                            .value_parser(["on", "off", "toggle"]),
                    ),
                ),
        )
}
