//! Ledger operations over the summary (entities) and history (transactions)
//! tables. Columns are located by keyword so renamed or reordered sheets keep
//! working.

use std::collections::BTreeMap;

use crate::error::{ClientbookError, Result};
use crate::loader::HeaderPolicy;
use crate::models::{is_active_status, Entity, Transaction};
use crate::table::{Row, Table};

pub const NAME_KEYS: &[&str] = &["업체명", "상호", "Name", "Client", "Company"];
pub const MANAGER_KEYS: &[&str] = &["담당자", "Manager", "Owner"];
pub const CONTACT_KEYS: &[&str] = &["연락처", "전화", "Contact", "Phone"];
pub const DESCRIPTION_KEYS: &[&str] = &["내용", "품목", "Description", "Item"];
pub const STATUS_KEYS: &[&str] = &["상태", "비고", "Status", "Note"];
pub const DATE_KEYS: &[&str] = &["일자", "Date"];
pub const AMOUNT_KEYS: &[&str] = &["금액", "Amount"];
pub const MEMO_KEYS: &[&str] = &["적요", "Memo"];

pub const ACTIVE_STATUS: &str = "Active";
pub const ENDED_STATUS: &str = "Ended";

/// Header policy for the summary tab: the row naming the entity column.
pub fn summary_policy() -> HeaderPolicy {
    HeaderPolicy::keywords(NAME_KEYS)
}

/// Header policy for the history tab: the row naming dates or amounts.
pub fn history_policy() -> HeaderPolicy {
    let mut keys = DATE_KEYS.to_vec();
    keys.extend_from_slice(AMOUNT_KEYS);
    HeaderPolicy::keywords(&keys)
}

pub fn parse_amount(raw: &str) -> f64 {
    let s = raw.replace([',', '"', '$', '₩'], "");
    let s = s.trim();
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return -inner.trim().parse::<f64>().unwrap_or(0.0);
    }
    s.parse().unwrap_or(0.0)
}

fn require_column<'a>(table: &'a Table, keys: &[&str]) -> Result<&'a str> {
    table
        .find_column(keys)
        .ok_or_else(|| ClientbookError::MissingColumn(keys.join("/")))
}

fn entity_from_row(table: &Table, row: &Row<'_>) -> Entity {
    Entity {
        name: row.field(table.find_column(NAME_KEYS)).to_string(),
        manager: row.field(table.find_column(MANAGER_KEYS)).to_string(),
        contact: row.field(table.find_column(CONTACT_KEYS)).to_string(),
        description: row.field(table.find_column(DESCRIPTION_KEYS)).to_string(),
        status: row.field(table.find_column(STATUS_KEYS)).to_string(),
    }
}

/// Summary rows whose status does not mark them as ended. Every row counts
/// as active when there is no status column.
pub fn active_entities(summary: &Table) -> Table {
    match summary.find_column(STATUS_KEYS) {
        Some(status) => summary.filter(|r| is_active_status(r.get(status).unwrap_or(""))),
        None => summary.clone(),
    }
}

/// Distinct non-blank entity names in first-seen order.
pub fn entity_names(table: &Table) -> Vec<String> {
    let Some(col) = table.find_column(NAME_KEYS) else {
        return Vec::new();
    };
    let mut names: Vec<String> = Vec::new();
    for row in table.rows() {
        let name = row.field(Some(col));
        if !name.trim().is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// First active summary row for `name`.
pub fn entity_detail(summary: &Table, name: &str) -> Option<Entity> {
    let active = active_entities(summary);
    let col = active.find_column(NAME_KEYS)?;
    let row = active.rows().find(|r| r.get(col) == Some(name))?;
    Some(entity_from_row(&active, &row))
}

/// History rows that belong to `name`. Empty when the history has no entity
/// column.
pub fn history_for(history: &Table, name: &str) -> Table {
    match history.find_column(NAME_KEYS) {
        Some(col) => history.filter(|r| r.get(col) == Some(name)),
        None => Table::new(history.columns().to_vec()),
    }
}

/// Memo column of a history table. Older sheets label it like the summary's
/// note column.
fn memo_column(history: &Table) -> Option<&str> {
    history
        .find_column(MEMO_KEYS)
        .or_else(|| history.find_column(&["비고", "Note"]))
}

pub fn transactions(history: &Table) -> Vec<Transaction> {
    let date = history.find_column(DATE_KEYS);
    let entity = history.find_column(NAME_KEYS);
    let amount = history.find_column(AMOUNT_KEYS);
    let memo = memo_column(history);
    history
        .rows()
        .map(|r| Transaction {
            date: r.field(date).to_string(),
            entity: r.field(entity).to_string(),
            amount: parse_amount(r.field(amount)),
            memo: r.field(memo).to_string(),
        })
        .collect()
}

/// Amount totals per `YYYY-MM`, oldest first. Rows without a usable date are
/// grouped under `"(undated)"`.
pub fn monthly_totals(history: &Table, name: &str) -> Vec<(String, f64)> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for txn in transactions(history).into_iter().filter(|t| t.entity == name) {
        let month = month_key(&txn.date).unwrap_or_else(|| "(undated)".to_string());
        *totals.entry(month).or_default() += txn.amount;
    }
    totals.into_iter().collect()
}

fn month_key(date: &str) -> Option<String> {
    let parsed = chrono::NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .or_else(|_| chrono::NaiveDate::parse_from_str(date.trim(), "%Y/%m/%d"))
        .or_else(|_| chrono::NaiveDate::parse_from_str(date.trim(), "%Y.%m.%d"))
        .ok()?;
    Some(parsed.format("%Y-%m").to_string())
}

fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        format!("{amount}")
    }
}

/// Append a transaction to the history. The entity must be listed in the
/// summary and the date must be `YYYY-MM-DD`.
pub fn record_transaction(
    summary: &Table,
    history: Table,
    date: &str,
    name: &str,
    amount: f64,
    memo: &str,
) -> Result<Table> {
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| ClientbookError::InvalidInput(format!("date must be YYYY-MM-DD: {date}")))?;
    if !entity_names(summary).iter().any(|n| n == name) {
        return Err(ClientbookError::UnknownEntity(name.to_string()));
    }
    let date_col = history.find_column(DATE_KEYS).unwrap_or("Date").to_string();
    let name_col = history.find_column(NAME_KEYS).unwrap_or("Name").to_string();
    let amount_col = history.find_column(AMOUNT_KEYS).unwrap_or("Amount").to_string();
    let memo_col = memo_column(&history).unwrap_or("Memo").to_string();
    let amount = format_amount(amount);
    Ok(history.append_row(&[
        (date_col.as_str(), date),
        (name_col.as_str(), name),
        (amount_col.as_str(), amount.as_str()),
        (memo_col.as_str(), memo),
    ]))
}

/// Add a new entity marked active.
pub fn register_entity(summary: Table, name: &str, manager: &str) -> Result<Table> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ClientbookError::InvalidInput("entity name is blank".to_string()));
    }
    let name_col = summary.find_column(NAME_KEYS).unwrap_or("Name").to_string();
    let manager_col = summary.find_column(MANAGER_KEYS).unwrap_or("Manager").to_string();
    let status_col = summary.find_column(STATUS_KEYS).unwrap_or("Status").to_string();
    Ok(summary.append_row(&[
        (name_col.as_str(), name),
        (manager_col.as_str(), manager),
        (status_col.as_str(), ACTIVE_STATUS),
    ]))
}

/// Mark every summary row for `name` as ended. Rows are never removed.
pub fn end_entity(mut summary: Table, name: &str) -> Result<Table> {
    let name_col = require_column(&summary, NAME_KEYS)?.to_string();
    let status_col = require_column(&summary, STATUS_KEYS)?.to_string();
    if summary.set_where(&name_col, name, &status_col, ENDED_STATUS) == 0 {
        return Err(ClientbookError::UnknownEntity(name.to_string()));
    }
    Ok(summary)
}
