use std::path::PathBuf;

use calamine::{Data, Reader};
use tracing::debug;

use super::DataSource;
use crate::error::{ClientbookError, Result};
use crate::loader::{Cell, Grid};
use crate::table::Table;

/// Read-only view of an `.xlsx`/`.xls`/`.ods` workbook; destinations are
/// sheet names.
pub struct XlsxWorkbook {
    path: PathBuf,
}

impl XlsxWorkbook {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

pub fn excel_serial_to_date(serial: f64) -> String {
    // Excel epoch is 1899-12-30 (accounting for the 1900 leap year bug)
    chrono::NaiveDate::from_ymd_opt(1899, 12, 30)
        .map(|base| base + chrono::Duration::days(serial as i64))
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| serial.to_string())
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Text(excel_serial_to_date(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

impl DataSource for XlsxWorkbook {
    fn read(&self, destination: &str) -> Result<Grid> {
        let mut workbook = calamine::open_workbook_auto(&self.path)
            .map_err(|e| ClientbookError::unavailable(destination, e))?;
        let range = workbook
            .worksheet_range(destination)
            .map_err(|e| ClientbookError::unavailable(destination, e))?;

        // Ranges start at the first used cell; pad back to A1 so blank
        // leading rows still count against the scan window.
        let (row_off, col_off) = range
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));
        let mut grid: Grid = vec![Vec::new(); row_off];
        for row in range.rows() {
            let mut cells = vec![Cell::Empty; col_off];
            cells.extend(row.iter().map(to_cell));
            grid.push(cells);
        }
        debug!(sheet = destination, rows = grid.len(), "read xlsx sheet");
        Ok(grid)
    }

    fn write(&mut self, destination: &str, _table: &Table) -> Result<()> {
        Err(ClientbookError::unavailable(
            destination,
            "xlsx workbooks are read-only; switch the source to csv or sqlite to save changes",
        ))
    }

    fn describe(&self) -> String {
        format!("XLSX workbook at {} (read-only)", self.path.display())
    }
}
