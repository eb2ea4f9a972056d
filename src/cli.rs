// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Command, arg};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(arg!(--json "Print JSON"))
        .arg(arg!(--jsonl "Print JSON lines"))
}

pub fn build_cli() -> Command {
    Command::new("quincena")
        .about("Personal finance tracking: cards, installments, recurring expenses")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(arg!(--ephemeral "Run against an in-memory store (nothing persisted)").global(true))
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(arg!(--"type" <TYPE> "income or expense").required(true))
                        .arg(arg!(--amount <AMOUNT>).required(true))
                        .arg(arg!(--description <TEXT>).required(true))
                        .arg(arg!(--date <DATE> "YYYY-MM-DD, default today").required(false))
                        .arg(arg!(--card <ID> "Credit card id").required(false))
                        .arg(arg!(--tags <IDS> "Comma-separated category ids").required(false)),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions")
                        .arg(arg!(--month <MONTH> "YYYY-MM").required(false)),
                ))
                .subcommand(
                    Command::new("delete")
                        .about("Delete a transaction")
                        .arg(arg!(--id <ID>).required(true)),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Categories")
                .subcommand(json_flags(Command::new("list").about("List categories")))
                .subcommand(
                    Command::new("add")
                        .about("Add a custom category")
                        .arg(arg!(--name <NAME>).required(true))
                        .arg(arg!(--color <HEX>).required(false).default_value("#6b7280"))
                        .arg(arg!(--icon <ICON>).required(false).default_value("📦")),
                ),
        )
        .subcommand(
            Command::new("card")
                .about("Credit cards")
                .subcommand(
                    Command::new("add")
                        .about("Register a credit card")
                        .arg(arg!(--bank <BANK>).required(true))
                        .arg(arg!(--name <NAME>).required(true))
                        .arg(arg!(--last4 <DIGITS>).required(true))
                        .arg(arg!(--color <HEX>).required(false).default_value("#6b7280"))
                        .arg(arg!(--"cut-day" <DAY> "Day of month the cycle closes").required(true))
                        .arg(arg!(--"payment-days" <DAYS> "Days after cut to pay").required(true))
                        .arg(arg!(--"annual-rate" <PCT>).required(false).default_value("0"))
                        .arg(arg!(--"moratory-rate" <PCT>).required(false).default_value("0"))
                        .arg(arg!(--"min-payment" <PCT>).required(false).default_value("0"))
                        .arg(arg!(--limit <AMOUNT>).required(true))
                        .arg(arg!(--balance <AMOUNT>).required(false).default_value("0")),
                )
                .subcommand(json_flags(Command::new("list").about("List cards")))
                .subcommand(
                    Command::new("pay")
                        .about("Mark the statement paying in a month as paid")
                        .arg(arg!(--id <ID>).required(true))
                        .arg(arg!(--month <MONTH> "YYYY-MM, default current").required(false))
                        .arg(arg!(--date <DATE> "Paid date, default today").required(false)),
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete a card")
                        .arg(arg!(--id <ID>).required(true)),
                ),
        )
        .subcommand(
            Command::new("installment")
                .about("Installment purchases (meses sin intereses)")
                .subcommand(
                    Command::new("add")
                        .about("Create a purchase and materialize its schedule")
                        .arg(arg!(--name <NAME>).required(true))
                        .arg(arg!(--total <AMOUNT>).required(true))
                        .arg(arg!(--months <N>).required(true))
                        .arg(arg!(--start <DATE> "First payment date").required(true))
                        .arg(arg!(--description <TEXT>).required(false))
                        .arg(arg!(--card <ID> "Credit card id").required(false)),
                )
                .subcommand(json_flags(Command::new("list").about("List purchases")))
                .subcommand(
                    Command::new("update")
                        .about("Edit a purchase; its schedule is rebuilt")
                        .arg(arg!(--id <ID>).required(true))
                        .arg(arg!(--name <NAME>).required(false))
                        .arg(arg!(--total <AMOUNT>).required(false))
                        .arg(arg!(--months <N>).required(false))
                        .arg(arg!(--start <DATE>).required(false))
                        .arg(arg!(--description <TEXT>).required(false))
                        .arg(arg!(--card <ID>).required(false)),
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete a purchase and everything it generated")
                        .arg(arg!(--id <ID>).required(true)),
                )
                .subcommand(
                    Command::new("pay")
                        .about("Mark one payment as paid")
                        .arg(arg!(--payment <ID>).required(true))
                        .arg(arg!(--date <DATE> "Paid date, default today").required(false)),
                )
                .subcommand(
                    Command::new("unpay")
                        .about("Revert a payment to pending")
                        .arg(arg!(--payment <ID>).required(true)),
                ),
        )
        .subcommand(
            Command::new("recurring")
                .about("Recurring monthly expenses")
                .subcommand(
                    Command::new("add")
                        .arg(arg!(--name <NAME>).required(true))
                        .arg(
                            arg!(--"type" <TYPE> "rent, car_loan, mortgage or other")
                                .required(false)
                                .default_value("other"),
                        )
                        .arg(arg!(--amount <AMOUNT>).required(true))
                        .arg(arg!(--day <DAY> "Payment day of month").required(true))
                        .arg(arg!(--start <DATE>).required(true))
                        .arg(arg!(--end <DATE>).required(false))
                        .arg(arg!(--description <TEXT>).required(false)),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("update")
                        .about("Edit an expense; schedule fields trigger regeneration")
                        .arg(arg!(--id <ID>).required(true))
                        .arg(arg!(--name <NAME>).required(false))
                        .arg(arg!(--amount <AMOUNT>).required(false))
                        .arg(arg!(--day <DAY>).required(false))
                        .arg(arg!(--start <DATE>).required(false))
                        .arg(arg!(--end <DATE> "New end date, or 'none' to clear").required(false))
                        .arg(arg!(--active <BOOL> "true or false").required(false)),
                )
                .subcommand(Command::new("delete").arg(arg!(--id <ID>).required(true))),
        )
        .subcommand(
            Command::new("fixed")
                .about("Fixed expenses for the biweekly view")
                .subcommand(
                    Command::new("add")
                        .arg(arg!(--name <NAME>).required(true))
                        .arg(arg!(--amount <AMOUNT>).required(true))
                        .arg(
                            arg!(--frequency <FREQ> "monthly, yearly or biweekly")
                                .required(false)
                                .default_value("monthly"),
                        )
                        .arg(arg!(--start <DATE>).required(true))
                        .arg(arg!(--end <DATE>).required(false)),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("delete").arg(arg!(--id <ID>).required(true))),
        )
        .subcommand(
            Command::new("asset")
                .about("Assets")
                .subcommand(
                    Command::new("add")
                        .arg(
                            arg!(--"type" <TYPE> "cash, bank, investment or other")
                                .required(false)
                                .default_value("other"),
                        )
                        .arg(arg!(--name <NAME>).required(true))
                        .arg(arg!(--value <AMOUNT>).required(true))
                        .arg(arg!(--currency <CCY>).required(false).default_value("MXN"))
                        .arg(
                            arg!(--change <PCT> "Annual value change %")
                                .required(false)
                                .default_value("0"),
                        )
                        .arg(arg!(--date <DATE> "Purchase date, default today").required(false))
                        .arg(arg!(--notes <TEXT>).required(false)),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("delete").arg(arg!(--id <ID>).required(true))),
        )
        .subcommand(
            Command::new("liability")
                .about("Liabilities")
                .subcommand(
                    Command::new("add")
                        .arg(
                            arg!(--"type" <TYPE> "credit_card, loan, mortgage or other")
                                .required(false)
                                .default_value("other"),
                        )
                        .arg(arg!(--name <NAME>).required(true))
                        .arg(arg!(--amount <AMOUNT>).required(true))
                        .arg(arg!(--rate <PCT> "Interest rate").required(false))
                        .arg(arg!(--due <DATE>).required(false)),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("delete").arg(arg!(--id <ID>).required(true))),
        )
        .subcommand(
            Command::new("invest")
                .about("Investments")
                .subcommand(
                    Command::new("add")
                        .arg(arg!(--symbol <SYMBOL>).required(false))
                        .arg(
                            arg!(--"type" <TYPE> "stock, bond, fund or other")
                                .required(false)
                                .default_value("other"),
                        )
                        .arg(arg!(--quantity <QTY>).required(true))
                        .arg(arg!(--price <AMOUNT> "Purchase price").required(true))
                        .arg(arg!(--date <DATE> "Purchase date, default today").required(false))
                        .arg(
                            arg!(--current <AMOUNT> "Current price, default purchase price")
                                .required(false),
                        )
                        .arg(arg!(--notes <TEXT>).required(false)),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("price")
                        .about("Update the current price")
                        .arg(arg!(--id <ID>).required(true))
                        .arg(arg!(--price <AMOUNT>).required(true)),
                )
                .subcommand(json_flags(
                    Command::new("opportunities").about("List investment opportunities"),
                ))
                .subcommand(Command::new("delete").arg(arg!(--id <ID>).required(true))),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregated views")
                .subcommand(json_flags(
                    Command::new("summary")
                        .about("Monthly income/expense summary")
                        .arg(arg!(--month <MONTH> "YYYY-MM, default current").required(false)),
                ))
                .subcommand(json_flags(
                    Command::new("categories")
                        .about("Spending by category")
                        .arg(arg!(--month <MONTH>).required(false))
                        .arg(arg!(--top <N> "Only the N largest buckets").required(false)),
                ))
                .subcommand(json_flags(
                    Command::new("networth").about("Assets minus liabilities"),
                ))
                .subcommand(json_flags(
                    Command::new("biweekly")
                        .about("Availability for a pay period")
                        .arg(arg!(--month <MONTH>).required(false))
                        .arg(arg!(--period <N> "1 (days 1-15) or 2 (day 16 on)").required(true))
                        .arg(arg!(--income <AMOUNT> "Override monthly income").required(false)),
                ))
                .subcommand(json_flags(
                    Command::new("cards")
                        .about("Per-card statement due in a month")
                        .arg(arg!(--month <MONTH>).required(false)),
                ))
                .subcommand(json_flags(
                    Command::new("payments")
                        .about("Everything to pay in a month")
                        .arg(arg!(--month <MONTH>).required(false)),
                )),
        )
        .subcommand(
            Command::new("statement")
                .about("Card statement intake")
                .subcommand(json_flags(
                    Command::new("check")
                        .about("Run the duplicate check without importing")
                        .arg(arg!(--card <ID>).required(true))
                        .arg(
                            arg!(--file <PATH> "Statement file (CSV, or raw for the service)")
                                .required(true),
                        )
                        .arg(arg!(--endpoint <URL> "Extraction service; default from env")
                            .required(false))
                        .arg(arg!(--csv "Treat the file as a local CSV"))
                        .arg(arg!(--"period-start" <DATE>).required(false))
                        .arg(arg!(--"period-end" <DATE>).required(false)),
                ))
                .subcommand(
                    Command::new("import")
                        .about("Extract, check and commit statement rows")
                        .arg(arg!(--card <ID>).required(true))
                        .arg(arg!(--file <PATH>).required(true))
                        .arg(arg!(--endpoint <URL>).required(false))
                        .arg(arg!(--csv "Treat the file as a local CSV"))
                        .arg(arg!(--"period-start" <DATE>).required(false))
                        .arg(arg!(--"period-end" <DATE>).required(false)),
                ),
        )
        .subcommand(
            Command::new("reconcile")
                .about("Roll pending installments whose month arrived into transactions"),
        )
        .subcommand(Command::new("doctor").about("Consistency checks"))
}
