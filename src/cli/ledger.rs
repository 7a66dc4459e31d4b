//! Ledger CLI commands
//!
//! Create ledger files and list the ones in the home directory.

use clap::Subcommand;

use crate::config::LedgerPaths;
use crate::error::ExpenseResult;
use crate::storage::{create_ledger, list_ledgers, load_ledger};

/// Ledger subcommands
#[derive(Subcommand, Debug)]
pub enum LedgerCommands {
    /// Create a new, empty ledger
    New {
        /// Ledger name; ".json" is appended when missing
        name: String,
    },
    /// List ledgers in the home directory
    List,
}

/// Handle a ledger command
pub fn handle_ledger_command(paths: &LedgerPaths, cmd: LedgerCommands) -> ExpenseResult<()> {
    match cmd {
        LedgerCommands::New { name } => {
            paths.ensure_directories()?;
            let store = create_ledger(&paths.ledgers_dir(), &name)?;
            println!("Created ledger: {}", store.path().display());
        }

        LedgerCommands::List => {
            let ledgers = list_ledgers(&paths.ledgers_dir())?;
            if ledgers.is_empty() {
                println!("No ledgers found. Run 'expenses init' to create one.");
                return Ok(());
            }

            for path in ledgers {
                let name = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                match load_ledger(&path) {
                    Ok(ledger) => println!("{:24} {:>6} expense(s)", name, ledger.len()),
                    Err(e) => println!("{:24} unreadable ({})", name, e),
                }
            }
        }
    }

    Ok(())
}
