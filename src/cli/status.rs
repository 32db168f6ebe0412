use crate::cli::load_or_warn;
use crate::error::Result;
use crate::ledger::active_entities;
use crate::settings::{load_settings, settings_path};
use crate::source::DataSource;

pub fn run() -> Result<()> {
    let settings = load_settings();
    println!("Settings:   {}", settings_path().display());
    println!("Scan window: {} rows, cache {}s", settings.scan_window, settings.cache_ttl_secs);

    let mut book = settings.open_book()?;
    println!("Source:     {}", book.source().describe());

    let summary = load_or_warn(&mut book, &settings.summary_sheet, settings.summary_policy());
    let history = load_or_warn(&mut book, &settings.history_sheet, settings.history_policy());

    println!();
    println!("Entities:      {} ({} active)", summary.len(), active_entities(&summary).len());
    println!("Transactions:  {}", history.len());
    Ok(())
}
