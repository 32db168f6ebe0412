use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::load_or_warn;
use crate::error::{ClientbookError, Result};
use crate::fmt::amount;
use crate::ledger::{entity_detail, history_for, monthly_totals, transactions};
use crate::settings::load_settings;

fn or_none(s: &str) -> &str {
    if s.trim().is_empty() { "(none)" } else { s }
}

pub fn run(name: &str) -> Result<()> {
    let settings = load_settings();
    let mut book = settings.open_book()?;
    let summary = load_or_warn(&mut book, &settings.summary_sheet, settings.summary_policy());
    let history = load_or_warn(&mut book, &settings.history_sheet, settings.history_policy());

    let entity = entity_detail(&summary, name)
        .ok_or_else(|| ClientbookError::UnknownEntity(name.to_string()))?;

    println!("{}", entity.name.bold());
    println!("Manager:      {}", or_none(&entity.manager));
    println!("Contact:      {}", or_none(&entity.contact));
    println!("Description:  {}", or_none(&entity.description));
    println!("Status:       {}", or_none(&entity.status).green());

    let txns = transactions(&history_for(&history, name));
    println!();
    if txns.is_empty() {
        println!("No transactions.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Date", "Amount", "Memo"]);
    for t in &txns {
        let amt = if t.amount < 0.0 {
            amount(t.amount).red().to_string()
        } else {
            amount(t.amount)
        };
        table.add_row(vec![Cell::new(&t.date), Cell::new(amt), Cell::new(&t.memo)]);
    }
    println!("Transactions ({})\n{table}", txns.len());

    let mut totals = Table::new();
    totals.set_header(vec!["Month", "Total"]);
    let mut grand = 0.0;
    for (month, total) in monthly_totals(&history, name) {
        grand += total;
        totals.add_row(vec![Cell::new(month), Cell::new(amount(total))]);
    }
    totals.add_row(vec![Cell::new("Total".bold()), Cell::new(amount(grand).bold())]);
    println!("Monthly summary\n{totals}");
    Ok(())
}
