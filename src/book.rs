use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::TableCache;
use crate::error::Result;
use crate::loader::{self, HeaderPolicy, LoadOptions};
use crate::source::DataSource;
use crate::table::Table;

/// Outcome of a load. A failed fetch still yields an empty table so a
/// read-only command can carry on; `diagnostic` says what went wrong.
#[derive(Debug)]
pub struct Loaded {
    pub table: Table,
    pub diagnostic: Option<String>,
}

/// A data source plus the read cache in front of it. The cache only saves
/// reads for callers that keep one `Book` across several loads.
pub struct Book<S: DataSource> {
    source: S,
    cache: TableCache,
    scan_window: usize,
}

impl<S: DataSource> Book<S> {
    pub fn new(source: S, ttl: Duration, scan_window: usize) -> Self {
        Self {
            source,
            cache: TableCache::new(ttl),
            scan_window,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn fetch(&mut self, destination: &str, policy: HeaderPolicy) -> Result<Table> {
        let options = LoadOptions {
            policy,
            scan_window: self.scan_window,
        };
        if let Some(table) = self.cache.get(destination, &options) {
            debug!(destination, "cache hit");
            return Ok(table);
        }
        let grid = self.source.read(destination)?;
        let table = loader::load(&grid, &options);
        debug!(destination, cached = self.cache.len(), "fetched from source");
        self.cache.insert(destination, &options, table.clone());
        Ok(table)
    }

    /// Load for display. A failed fetch gives an empty table and a diagnostic.
    pub fn load_table(&mut self, destination: &str, policy: HeaderPolicy) -> Loaded {
        match self.fetch(destination, policy) {
            Ok(table) => Loaded {
                table,
                diagnostic: None,
            },
            Err(e) => {
                warn!(destination, error = %e, "load failed, continuing with an empty table");
                Loaded {
                    table: Table::default(),
                    diagnostic: Some(e.to_string()),
                }
            }
        }
    }

    /// Load a table that is about to be modified and written back. A failed
    /// fetch is an error here, so an unread tab is never overwritten.
    pub fn load_for_write(&mut self, destination: &str, policy: HeaderPolicy) -> Result<Table> {
        self.fetch(destination, policy)
    }

    /// Overwrite `destination` with `table`. The read cache is dropped only
    /// when the write succeeds.
    pub fn write_table(&mut self, destination: &str, table: &Table) -> Result<()> {
        self.source.write(destination, table)?;
        self.cache.clear();
        debug!(destination, rows = table.len(), "write complete, cache cleared");
        Ok(())
    }
}
