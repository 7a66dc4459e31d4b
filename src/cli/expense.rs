//! Expense CLI commands
//!
//! Add, list, show, edit and delete expenses in the selected ledger.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_register};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{parse_date_with, Money};
use crate::services::{
    CreateExpenseInput, ExpenseFilter, ExpensePatch, ExpenseService, ExpenseTarget,
};
use crate::storage::LedgerStore;

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Add a new expense
    Add {
        /// Expense date (YYYY-MM-DD unless configured otherwise)
        date: String,
        /// Vendor that was paid
        vendor: String,
        /// Amount, e.g. "4500" or "₹1,250.50"
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category, e.g. Travel
        #[arg(short, long)]
        category: String,
        /// Payment mode, e.g. UPI
        #[arg(short, long)]
        payment_mode: String,
        /// Invoice number
        #[arg(short, long)]
        invoice: Option<String>,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List expenses
    List {
        /// Start date, inclusive
        #[arg(long)]
        from: Option<String>,
        /// End date, inclusive
        #[arg(long)]
        to: Option<String>,
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
        /// Filter by payment mode
        #[arg(short, long)]
        payment_mode: Option<String>,
        /// Filter by part of the vendor name
        #[arg(short, long)]
        vendor: Option<String>,
    },
    /// Show expense details
    Show {
        /// Row index or expense ID (write IDs as exp-xxxxxxxx)
        #[arg(allow_hyphen_values = true)]
        target: String,
    },
    /// Edit an expense in place
    Edit {
        /// Row index or expense ID (write IDs as exp-xxxxxxxx)
        #[arg(allow_hyphen_values = true)]
        target: String,
        /// New date
        #[arg(long)]
        date: Option<String>,
        /// New vendor
        #[arg(short, long)]
        vendor: Option<String>,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New payment mode
        #[arg(short, long)]
        payment_mode: Option<String>,
        /// New invoice number
        #[arg(short, long)]
        invoice: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete an expense; later rows move up by one
    Delete {
        /// Row index or expense ID (write IDs as exp-xxxxxxxx)
        #[arg(allow_hyphen_values = true)]
        target: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    store: &LedgerStore,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    let service = ExpenseService::new(store, settings);
    let currency = settings.currency_symbol.as_str();
    let date_format = settings.date_format.as_str();

    match cmd {
        ExpenseCommands::Add {
            date,
            vendor,
            amount,
            category,
            payment_mode,
            invoice,
            description,
        } => {
            let input = CreateExpenseInput {
                date: parse_date_with(&date, date_format)?,
                vendor,
                category,
                amount: parse_amount(&amount)?,
                payment_mode,
                invoice_no: invoice,
                description,
            };

            let added = service.add(input)?;
            println!("Added expense #{} ({})", added.index, added.record.id.short());
            print!("{}", format_expense_details(&added, currency, date_format));
        }

        ExpenseCommands::List {
            from,
            to,
            category,
            payment_mode,
            vendor,
        } => {
            let filter = ExpenseFilter {
                start_date: parse_optional_date(from.as_deref(), date_format)?,
                end_date: parse_optional_date(to.as_deref(), date_format)?,
                category,
                payment_mode,
                vendor,
            };

            let entries = service.list(&filter)?;
            print!("{}", format_expense_register(&entries, currency, date_format));
        }

        ExpenseCommands::Show { target } => {
            let entry = service.get(&target.parse::<ExpenseTarget>()?)?;
            print!("{}", format_expense_details(&entry, currency, date_format));
        }

        ExpenseCommands::Edit {
            target,
            date,
            vendor,
            amount,
            category,
            payment_mode,
            invoice,
            description,
        } => {
            let patch = ExpensePatch {
                date: parse_optional_date(date.as_deref(), date_format)?,
                vendor,
                category,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                payment_mode,
                invoice_no: invoice,
                description,
            };

            let target: ExpenseTarget = target.parse()?;
            let edited = service.edit(&target, patch)?;
            println!("Updated expense #{}", edited.index);
            print!("{}", format_expense_details(&edited, currency, date_format));
        }

        ExpenseCommands::Delete { target } => {
            let removed = service.remove(&target.parse::<ExpenseTarget>()?)?;
            println!(
                "Deleted expense #{} ({}): {}",
                removed.index,
                removed.record.id.short(),
                removed.record
            );
        }
    }

    Ok(())
}

fn parse_amount(s: &str) -> ExpenseResult<Money> {
    Money::parse(s).map_err(|_| {
        ExpenseError::Validation(format!(
            "Invalid amount: '{}'. Use a number like '4500' or '1250.50'",
            s
        ))
    })
}

fn parse_optional_date(s: Option<&str>, date_format: &str) -> ExpenseResult<Option<NaiveDate>> {
    s.map(|s| parse_date_with(s, date_format)).transpose()
}
