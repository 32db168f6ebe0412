use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::DataSource;
use crate::error::{ClientbookError, Result};
use crate::loader::{Cell, Grid};
use crate::table::Table;

/// A directory of CSV files, one `<destination>.csv` per tab.
pub struct CsvWorkbook {
    dir: PathBuf,
}

impl CsvWorkbook {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn tab_path(&self, destination: &str) -> PathBuf {
        self.dir.join(format!("{destination}.csv"))
    }

    /// Create the directory and an empty file for each missing tab.
    pub fn ensure_tabs(&self, destinations: &[&str]) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        for dest in destinations {
            let path = self.tab_path(dest);
            if !path.exists() {
                std::fs::write(&path, "")?;
            }
        }
        Ok(())
    }
}

fn read_grid(path: &Path) -> Result<Grid> {
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));
    let mut grid = Vec::new();
    // Byte records so a field in a legacy encoding only spoils that field.
    for result in rdr.byte_records() {
        let record = result?;
        grid.push(
            record
                .iter()
                .map(|f| {
                    if f.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::from(String::from_utf8_lossy(f).into_owned())
                    }
                })
                .collect(),
        );
    }
    Ok(grid)
}

fn write_grid(path: &Path, table: &Table) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_path(path)?;
    for row in table.to_grid() {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

impl DataSource for CsvWorkbook {
    fn read(&self, destination: &str) -> Result<Grid> {
        let path = self.tab_path(destination);
        debug!(path = %path.display(), "reading csv tab");
        read_grid(&path).map_err(|e| ClientbookError::unavailable(destination, e))
    }

    fn write(&mut self, destination: &str, table: &Table) -> Result<()> {
        let path = self.tab_path(destination);
        write_grid(&path, table).map_err(|e| ClientbookError::unavailable(destination, e))?;
        info!(path = %path.display(), rows = table.len(), "wrote csv tab");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("CSV workbook at {}", self.dir.display())
    }
}
