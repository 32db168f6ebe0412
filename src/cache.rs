use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::loader::LoadOptions;
use crate::table::Table;

pub const DEFAULT_TTL: Duration = Duration::from_secs(5);

/// Short-lived cache of loaded tables, keyed by destination and load options.
#[derive(Debug)]
pub struct TableCache {
    ttl: Duration,
    entries: HashMap<(String, LoadOptions), (Instant, Table)>,
}

impl TableCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn get(&mut self, destination: &str, options: &LoadOptions) -> Option<Table> {
        let key = (destination.to_string(), options.clone());
        let fresh = match self.entries.get(&key) {
            Some((loaded_at, _)) => loaded_at.elapsed() < self.ttl,
            None => return None,
        };
        if !fresh {
            self.entries.remove(&key);
            return None;
        }
        self.entries.get(&key).map(|(_, t)| t.clone())
    }

    pub fn insert(&mut self, destination: &str, options: &LoadOptions, table: Table) {
        self.entries
            .insert((destination.to_string(), options.clone()), (Instant::now(), table));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Default for TableCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
