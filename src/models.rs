/// One business counterparty, read from a summary row.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub name: String,
    pub manager: String,
    pub contact: String,
    pub description: String,
    pub status: String,
}

/// Markers that flag an entity as no longer active.
const INACTIVE_MARKERS: &[&str] = &["ended", "terminated", "종료"];

pub fn is_active_status(status: &str) -> bool {
    let lower = status.to_lowercase();
    !INACTIVE_MARKERS.iter().any(|m| lower.contains(m))
}

/// One dated monetary event, read from a history row.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: String,
    pub entity: String,
    pub amount: f64,
    pub memo: String,
}
