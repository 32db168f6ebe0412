use colored::Colorize;

use crate::error::Result;
use crate::ledger::{end_entity, register_entity};
use crate::settings::load_settings;

pub fn add(name: &str, manager: &str) -> Result<()> {
    let settings = load_settings();
    let mut book = settings.open_book()?;
    let summary = book.load_for_write(&settings.summary_sheet, settings.summary_policy())?;
    let updated = register_entity(summary, name, manager)?;
    book.write_table(&settings.summary_sheet, &updated)?;
    println!("Registered {}", name.trim());
    Ok(())
}

pub fn end(name: &str) -> Result<()> {
    let settings = load_settings();
    let mut book = settings.open_book()?;
    let summary = book.load_for_write(&settings.summary_sheet, settings.summary_policy())?;
    let updated = end_entity(summary, name)?;
    book.write_table(&settings.summary_sheet, &updated)?;
    println!("{}", format!("Ended {name}").yellow());
    Ok(())
}
