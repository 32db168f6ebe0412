use crate::cli::{load_or_warn, render};
use crate::error::Result;
use crate::ledger::active_entities;
use crate::settings::load_settings;

pub fn run(all: bool) -> Result<()> {
    let settings = load_settings();
    let mut book = settings.open_book()?;
    let summary = load_or_warn(&mut book, &settings.summary_sheet, settings.summary_policy());
    let shown = if all { summary } else { active_entities(&summary) };

    if shown.is_empty() {
        println!("No entities.");
        return Ok(());
    }
    println!("Entities ({})\n{}", shown.len(), render(&shown));
    Ok(())
}
