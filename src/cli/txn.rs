use crate::error::Result;
use crate::fmt::amount as fmt_amount;
use crate::ledger::record_transaction;
use crate::settings::load_settings;

pub fn add(name: &str, amount: f64, date: Option<&str>, memo: &str) -> Result<()> {
    let settings = load_settings();
    let mut book = settings.open_book()?;
    let summary = book.load_for_write(&settings.summary_sheet, settings.summary_policy())?;
    let history = book.load_for_write(&settings.history_sheet, settings.history_policy())?;

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let date = date.unwrap_or(&today);
    let updated = record_transaction(&summary, history, date, name, amount, memo)?;
    book.write_table(&settings.history_sheet, &updated)?;

    println!("Recorded {} for {name} on {date}", fmt_amount(amount));
    Ok(())
}
