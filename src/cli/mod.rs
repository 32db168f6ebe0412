pub mod clients;
pub mod init;
pub mod list;
pub mod search;
pub mod status;
pub mod txn;

use clap::{Parser, Subcommand};
use colored::Colorize;
use comfy_table::{Cell, Table as Grid};

use crate::book::Book;
use crate::loader::HeaderPolicy;
use crate::source::DataSource;
use crate::table::Table;

#[derive(Parser)]
#[command(name = "clientbook", about = "Client and transaction ledger over spreadsheet tabs.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure the workbook source and create empty tabs if needed.
    Init {
        /// Source kind: csv, sqlite, xlsx
        #[arg(long)]
        source: Option<String>,
        /// CSV directory, SQLite file or XLSX file
        #[arg(long)]
        location: Option<String>,
    },
    /// List entities from the summary tab.
    List {
        /// Include ended entities
        #[arg(long)]
        all: bool,
    },
    /// Show an entity's details, transactions and monthly totals.
    Search {
        /// Entity name (exact match)
        name: String,
    },
    /// Record a transaction in the history tab.
    AddTxn {
        /// Entity name
        name: String,
        /// Transaction amount
        #[arg(long, allow_hyphen_values = true)]
        amount: f64,
        /// Date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Memo text
        #[arg(long, default_value = "")]
        memo: String,
    },
    /// Manage entities.
    Clients {
        #[command(subcommand)]
        command: ClientsCommands,
    },
    /// Show the configured source and row counts.
    Status,
}

#[derive(Subcommand)]
pub enum ClientsCommands {
    /// Register a new entity.
    Add {
        /// Entity name
        name: String,
        /// Person in charge
        #[arg(long, default_value = "")]
        manager: String,
    },
    /// Mark an entity as ended.
    End {
        /// Entity name
        name: String,
    },
}

/// Load a tab, printing the diagnostic when the source could not be read.
pub(crate) fn load_or_warn<S: DataSource>(book: &mut Book<S>, destination: &str, policy: HeaderPolicy) -> Table {
    let loaded = book.load_table(destination, policy);
    if let Some(msg) = loaded.diagnostic {
        eprintln!("{} {msg}", "Warning:".yellow());
    }
    loaded.table
}

pub(crate) fn render(table: &Table) -> Grid {
    let mut grid = Grid::new();
    grid.set_header(table.columns().iter().map(Cell::new).collect::<Vec<_>>());
    for row in table.rows() {
        grid.add_row(row.values().iter().map(Cell::new).collect::<Vec<_>>());
    }
    grid
}
