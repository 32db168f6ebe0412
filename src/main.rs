mod book;
mod cache;
mod cli;
mod error;
mod fmt;
mod ledger;
mod loader;
mod models;
mod settings;
mod source;
mod table;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, ClientsCommands, Commands};

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { source, location } => cli::init::run(source, location),
        Commands::List { all } => cli::list::run(all),
        Commands::Search { name } => cli::search::run(&name),
        Commands::AddTxn {
            name,
            amount,
            date,
            memo,
        } => cli::txn::add(&name, amount, date.as_deref(), &memo),
        Commands::Clients { command } => match command {
            ClientsCommands::Add { name, manager } => cli::clients::add(&name, &manager),
            ClientsCommands::End { name } => cli::clients::end(&name),
        },
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
