use std::path::Path;

use rusqlite::Connection;
use tracing::info;

use super::DataSource;
use crate::error::{ClientbookError, Result};
use crate::loader::{Cell, Grid};
use crate::table::Table;

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS cells (
    sheet TEXT NOT NULL,
    row INTEGER NOT NULL,
    col INTEGER NOT NULL,
    value TEXT,
    PRIMARY KEY (sheet, row, col)
);
";

/// Workbook stored as sparse cells in a single SQLite file.
pub struct SqliteWorkbook {
    conn: Connection,
    label: String,
}

impl SqliteWorkbook {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn,
            label: db_path.display().to_string(),
        })
    }

    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn,
            label: ":memory:".to_string(),
        })
    }

    fn read_cells(&self, sheet: &str) -> Result<Grid> {
        let mut stmt = self
            .conn
            .prepare("SELECT row, col, value FROM cells WHERE sheet = ?1 ORDER BY row, col")?;
        let cells: Vec<(i64, i64, Option<String>)> = stmt
            .query_map([sheet], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut grid: Grid = Vec::new();
        for (r, c, value) in cells {
            let (r, c) = (r as usize, c as usize);
            if grid.len() <= r {
                grid.resize(r + 1, Vec::new());
            }
            let row = &mut grid[r];
            if row.len() <= c {
                row.resize(c + 1, Cell::Empty);
            }
            row[c] = match value {
                Some(v) if !v.is_empty() => Cell::Text(v),
                _ => Cell::Empty,
            };
        }
        Ok(grid)
    }

    fn replace_cells(&mut self, sheet: &str, table: &Table) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM cells WHERE sheet = ?1", [sheet])?;
        {
            let mut stmt =
                tx.prepare("INSERT INTO cells (sheet, row, col, value) VALUES (?1, ?2, ?3, ?4)")?;
            for (r, row) in table.to_grid().iter().enumerate() {
                for (c, value) in row.iter().enumerate() {
                    stmt.execute(rusqlite::params![sheet, r as i64, c as i64, value])?;
                }
            }
        }
        tx.commit()?;
        Ok(())
    }
}

impl DataSource for SqliteWorkbook {
    fn read(&self, destination: &str) -> Result<Grid> {
        self.read_cells(destination)
            .map_err(|e| ClientbookError::unavailable(destination, e))
    }

    fn write(&mut self, destination: &str, table: &Table) -> Result<()> {
        self.replace_cells(destination, table)
            .map_err(|e| ClientbookError::unavailable(destination, e))?;
        info!(db = %self.label, sheet = destination, rows = table.len(), "wrote sqlite sheet");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("SQLite workbook at {}", self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::default()
            .append_row(&[("Date", "2024-01-01"), ("Name", "Acme"), ("Amount", "1000")])
            .append_row(&[("Date", "2024-02-01"), ("Name", "Globex")])
    }

    #[test]
    fn test_unknown_sheet_reads_empty() {
        let wb = SqliteWorkbook::in_memory().unwrap();
        assert!(wb.read("0").unwrap().is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let mut wb = SqliteWorkbook::in_memory().unwrap();
        wb.write("0", &sample()).unwrap();
        let grid = wb.read("0").unwrap();
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[0][1], Cell::from("Name"));
        assert_eq!(grid[2][2], Cell::Empty);
    }

    #[test]
    fn test_write_replaces_previous_contents() {
        let mut wb = SqliteWorkbook::in_memory().unwrap();
        wb.write("0", &sample()).unwrap();
        let small = Table::default().append_row(&[("Name", "Initech")]);
        wb.write("0", &small).unwrap();
        let grid = wb.read("0").unwrap();
        assert_eq!(grid, vec![vec![Cell::from("Name")], vec![Cell::from("Initech")]]);
    }

    #[test]
    fn test_sheets_are_independent() {
        let mut wb = SqliteWorkbook::in_memory().unwrap();
        wb.write("0", &sample()).unwrap();
        wb.write("621616384", &Table::default().append_row(&[("Name", "Acme")]))
            .unwrap();
        assert_eq!(wb.read("0").unwrap().len(), 3);
        assert_eq!(wb.read("621616384").unwrap().len(), 2);
    }

    #[test]
    fn test_open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.db");
        {
            let mut wb = SqliteWorkbook::open(&path).unwrap();
            wb.write("0", &sample()).unwrap();
        }
        let wb = SqliteWorkbook::open(&path).unwrap();
        assert_eq!(wb.read("0").unwrap().len(), 3);
        assert!(wb.describe().contains("book.db"));
    }
}
