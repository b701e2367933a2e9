//! Shell command - the interactive banking menu
//!
//! Reads a menu option, collects the answers that option needs and calls
//! into the core. Text that is not a number never reaches the core; every
//! core outcome is printed as one confirmation or one failure message.

use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;

use minibank_core::services::demo;
use minibank_core::{
    Error, LogEvent, LoggingService, MinibankContext, NewClient, OperationResult, TransactionKind,
};

use super::{get_context, get_logger, log_event};
use crate::output::{create_table, failure, format_money, success, warning};
use crate::prompt::{LinePrompter, Prompter, TerminalPrompter};

const MENU: &str = "
================ MENU ================
[d]\tDeposit
[s]\tWithdraw
[e]\tStatement
[nc]\tNew account
[lc]\tList accounts
[nu]\tNew client
[q]\tQuit";

/// Options offered by the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Deposit,
    Withdraw,
    Statement,
    NewAccount,
    ListAccounts,
    NewClient,
    Quit,
}

impl MenuOption {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "d" => Some(MenuOption::Deposit),
            "s" => Some(MenuOption::Withdraw),
            "e" => Some(MenuOption::Statement),
            "nc" => Some(MenuOption::NewAccount),
            "lc" => Some(MenuOption::ListAccounts),
            "nu" => Some(MenuOption::NewClient),
            "q" => Some(MenuOption::Quit),
            _ => None,
        }
    }

    fn command(&self) -> &'static str {
        match self {
            MenuOption::Deposit => "deposit",
            MenuOption::Withdraw => "withdraw",
            MenuOption::Statement => "statement",
            MenuOption::NewAccount => "new_account",
            MenuOption::ListAccounts => "list_accounts",
            MenuOption::NewClient => "new_client",
            MenuOption::Quit => "quit",
        }
    }
}

/// Parse an amount typed by the user; a decimal comma is accepted
pub fn parse_amount(text: &str) -> Option<Decimal> {
    text.trim().replace(',', ".").parse().ok()
}

/// Run the shell against stdin/stdout
pub fn run(data_dir: &Path, seed_demo: bool, json: bool) -> Result<()> {
    let mut ctx = get_context(data_dir)?;
    let logger = get_logger(data_dir);

    if seed_demo {
        let seeded = demo::seed(&mut ctx.bank)?;
        log_event(&logger, LogEvent::new("demo_seeded").with_account(seeded.account_number));
        if !json {
            println!(
                "{} client {} with account {}",
                "Demo data loaded:".cyan(),
                seeded.client_id,
                seeded.account_number
            );
        }
    }

    let stdout = io::stdout();
    if atty::is(atty::Stream::Stdin) {
        Shell::new(&mut ctx, TerminalPrompter, stdout.lock())
            .with_json(json)
            .with_logger(logger)
            .run()
    } else {
        let stdin = io::stdin();
        Shell::new(&mut ctx, LinePrompter::new(stdin.lock()), stdout.lock())
            .with_json(json)
            .with_logger(logger)
            .run()
    }
}

/// A failure caught by the shell before reaching the core
fn rejection(code: &str, msg: &str) -> OperationResult<()> {
    OperationResult {
        success: false,
        data: None,
        error: Some(msg.to_string()),
        code: Some(code.to_string()),
    }
}

/// One interactive session over a context
pub struct Shell<'a, P, W> {
    ctx: &'a mut MinibankContext,
    prompter: P,
    out: W,
    json: bool,
    logger: Option<LoggingService>,
}

impl<'a, P: Prompter, W: Write> Shell<'a, P, W> {
    pub fn new(ctx: &'a mut MinibankContext, prompter: P, out: W) -> Self {
        Self {
            ctx,
            prompter,
            out,
            json: false,
            logger: None,
        }
    }

    /// Print outcomes as JSON lines instead of messages
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn with_logger(mut self, logger: Option<LoggingService>) -> Self {
        self.logger = logger;
        self
    }

    /// Loop until the user quits or input runs out
    pub fn run(&mut self) -> Result<()> {
        self.log(LogEvent::new("shell_started"));

        loop {
            if !self.json {
                writeln!(self.out, "{}", MENU)?;
            }
            let Some(choice) = self.prompter.ask("=>")? else {
                break;
            };
            match MenuOption::parse(&choice) {
                Some(MenuOption::Quit) => break,
                Some(option) => {
                    self.log(LogEvent::new("command_executed").with_command(option.command()));
                    self.dispatch(option)?;
                }
                None => self.report_invalid_option()?,
            }
        }

        self.log(LogEvent::new("shell_exited"));
        Ok(())
    }

    fn dispatch(&mut self, option: MenuOption) -> Result<()> {
        match option {
            MenuOption::Deposit => self.transact(TransactionKind::Deposit),
            MenuOption::Withdraw => self.transact(TransactionKind::Withdrawal),
            MenuOption::Statement => self.statement(),
            MenuOption::NewAccount => self.new_account(),
            MenuOption::ListAccounts => self.list_accounts(),
            MenuOption::NewClient => self.new_client(),
            MenuOption::Quit => Ok(()),
        }
    }

    fn transact(&mut self, kind: TransactionKind) -> Result<()> {
        let event = match kind {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdrawal",
        };

        let Some(client_id) = self.prompter.ask("Client ID")? else {
            return Ok(());
        };
        let client_id = client_id.trim().to_string();
        if let Err(e) = self.ctx.bank.primary_account(&client_id).map(|_| ()) {
            return self.report_failure(&format!("{}_rejected", event), &e);
        }

        let prompt = match kind {
            TransactionKind::Deposit => "Deposit amount",
            TransactionKind::Withdrawal => "Withdrawal amount",
        };
        let Some(text) = self.prompter.ask(prompt)? else {
            return Ok(());
        };
        let Some(amount) = parse_amount(&text) else {
            return self.report_invalid_input("Invalid amount! Use numbers only.");
        };

        let result = match kind {
            TransactionKind::Deposit => self.ctx.bank.deposit(&client_id, amount),
            TransactionKind::Withdrawal => self.ctx.bank.withdraw(&client_id, amount),
        };

        match result {
            Ok(receipt) => {
                self.log(
                    LogEvent::new(format!("{}_applied", event)).with_account(receipt.account_number),
                );
                if self.json {
                    return self.print_json(&OperationResult::ok(receipt));
                }
                let msg = match kind {
                    TransactionKind::Deposit => "Deposit completed successfully!",
                    TransactionKind::Withdrawal => "Withdrawal completed successfully!",
                };
                writeln!(self.out, "{}", success(msg))?;
                Ok(())
            }
            Err(e) => self.report_failure(&format!("{}_rejected", event), &e),
        }
    }

    fn statement(&mut self) -> Result<()> {
        let Some(client_id) = self.prompter.ask("Client ID")? else {
            return Ok(());
        };
        let statement = match self.ctx.bank.statement(client_id.trim()) {
            Ok(statement) => statement,
            Err(e) => return self.report_failure("statement_rejected", &e),
        };
        self.log(LogEvent::new("statement_viewed").with_account(statement.account_number));

        if self.json {
            return self.print_json(&OperationResult::ok(statement));
        }

        let symbol = self.ctx.config.currency_symbol.clone();
        writeln!(self.out, "\n================ STATEMENT ================")?;
        if statement.entries.is_empty() {
            writeln!(self.out, "No transactions recorded.")?;
        } else {
            for entry in &statement.entries {
                writeln!(self.out, "{}:\t{}", entry.kind, format_money(&symbol, entry.amount))?;
            }
        }
        writeln!(self.out, "\nBalance:\t\t{}", format_money(&symbol, statement.balance))?;
        writeln!(self.out, "===========================================")?;
        Ok(())
    }

    fn new_client(&mut self) -> Result<()> {
        let Some(id) = self.prompter.ask("National ID (digits only)")? else {
            return Ok(());
        };
        let id = id.trim().to_string();
        if self.ctx.bank.client(&id).is_ok() {
            return self.report_failure("client_rejected", &Error::DuplicateClientIdentifier(id));
        }

        let Some(name) = self.prompter.ask("Full name")? else {
            return Ok(());
        };
        let Some(birth_date) = self.prompter.ask("Birth date (dd-mm-yyyy)")? else {
            return Ok(());
        };
        let Some(address) = self
            .prompter
            .ask("Address (street, number - district - city/state)")?
        else {
            return Ok(());
        };

        let mut details = NewClient::new(id, name.trim()).with_address(address.trim());
        if !birth_date.trim().is_empty() {
            match NewClient::parse_birth_date(&birth_date) {
                Some(date) => details = details.with_birth_date(date),
                None if !self.json => writeln!(
                    self.out,
                    "{}",
                    warning("Birth date not in dd-mm-yyyy format; leaving it blank.")
                )?,
                None => {}
            }
        }

        match self.ctx.bank.register_client(details).cloned() {
            Ok(client) => {
                self.log(LogEvent::new("client_registered"));
                if self.json {
                    return self.print_json(&OperationResult::ok(client));
                }
                writeln!(self.out, "{}", success("Client created successfully!"))?;
                Ok(())
            }
            Err(e) => self.report_failure("client_rejected", &e),
        }
    }

    fn new_account(&mut self) -> Result<()> {
        let Some(client_id) = self.prompter.ask("Client ID")? else {
            return Ok(());
        };
        match self.ctx.bank.open_account(client_id.trim()) {
            Ok(number) => {
                self.log(LogEvent::new("account_opened").with_account(number));
                if self.json {
                    return self.print_json(&OperationResult::ok(
                        serde_json::json!({ "account_number": number }),
                    ));
                }
                writeln!(
                    self.out,
                    "{}",
                    success(&format!("Account {} created successfully!", number))
                )?;
                Ok(())
            }
            Err(e) => self.report_failure("account_rejected", &e),
        }
    }

    fn list_accounts(&mut self) -> Result<()> {
        let accounts = self.ctx.bank.list_accounts();
        self.log(LogEvent::new("accounts_listed"));

        if self.json {
            return self.print_json(&OperationResult::ok(accounts));
        }
        if accounts.is_empty() {
            writeln!(self.out, "{}", failure("No accounts registered."))?;
            return Ok(());
        }

        let mut table = create_table();
        table.set_header(vec!["Branch", "Account", "Holder", "Opened"]);
        for account in &accounts {
            table.add_row(vec![
                account.branch.clone(),
                account.number.to_string(),
                account.holder.clone(),
                account.opened_at.format("%Y-%m-%d %H:%M").to_string(),
            ]);
        }
        writeln!(self.out, "{}", table)?;
        Ok(())
    }

    fn report_failure(&mut self, event: &str, error: &Error) -> Result<()> {
        self.log(LogEvent::new(event).with_core_error(error));
        if self.json {
            return self.print_json(&OperationResult::<()>::fail(error));
        }
        writeln!(self.out, "{}", failure(&error.to_string()))?;
        Ok(())
    }

    fn report_invalid_input(&mut self, msg: &str) -> Result<()> {
        self.log(LogEvent::new("input_rejected").with_error("non-numeric amount"));
        if self.json {
            return self.print_json(&rejection("invalid_input", msg));
        }
        writeln!(self.out, "{}", failure(msg))?;
        Ok(())
    }

    fn report_invalid_option(&mut self) -> Result<()> {
        const MSG: &str = "Invalid operation, please select the desired operation again.";
        if self.json {
            return self.print_json(&rejection("invalid_option", MSG));
        }
        writeln!(self.out, "{}", warning(MSG))?;
        Ok(())
    }

    fn print_json<T: Serialize>(&mut self, value: &T) -> Result<()> {
        writeln!(self.out, "{}", serde_json::to_string(value)?)?;
        Ok(())
    }

    fn log(&self, event: LogEvent) {
        log_event(&self.logger, event);
    }
}
