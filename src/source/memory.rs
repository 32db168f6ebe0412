use std::cell::Cell as Counter;
use std::collections::HashMap;

use super::DataSource;
use crate::error::{ClientbookError, Result};
use crate::loader::{to_cells, Grid};
use crate::table::Table;

/// In-process workbook for tests. `offline` simulates connectivity loss.
#[derive(Default)]
pub struct MemoryWorkbook {
    pub tabs: HashMap<String, Grid>,
    pub offline: bool,
    reads: Counter<usize>,
}

impl MemoryWorkbook {
    pub fn with_tab(mut self, destination: &str, grid: Grid) -> Self {
        self.tabs.insert(destination.to_string(), grid);
        self
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl DataSource for MemoryWorkbook {
    fn read(&self, destination: &str) -> Result<Grid> {
        self.reads.set(self.reads.get() + 1);
        if self.offline {
            return Err(ClientbookError::unavailable(destination, "connection lost"));
        }
        self.tabs
            .get(destination)
            .cloned()
            .ok_or_else(|| ClientbookError::unavailable(destination, "no such tab"))
    }

    fn write(&mut self, destination: &str, table: &Table) -> Result<()> {
        if self.offline {
            return Err(ClientbookError::unavailable(destination, "connection lost"));
        }
        self.tabs.insert(destination.to_string(), to_cells(table));
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory workbook".to_string()
    }
}
