//! Data source backends.
//!
//! A data source exposes named destinations (spreadsheet tabs) that can be
//! read as a raw grid and overwritten with a whole table. Transport errors
//! are reported as `SourceUnavailable` so callers see one failure kind.

pub mod csv_dir;
#[cfg(test)]
pub mod memory;
pub mod sqlite;
#[cfg(feature = "xlsx")]
pub mod xlsx;

use std::path::PathBuf;

use crate::error::{ClientbookError, Result};
use crate::loader::Grid;
use crate::table::Table;

pub use csv_dir::CsvWorkbook;
pub use sqlite::SqliteWorkbook;
#[cfg(feature = "xlsx")]
pub use xlsx::XlsxWorkbook;

pub trait DataSource {
    /// Fetch the raw cells of `destination`.
    fn read(&self, destination: &str) -> Result<Grid>;

    /// Replace the contents of `destination` with `table` (header row first).
    fn write(&mut self, destination: &str, table: &Table) -> Result<()>;

    fn describe(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SourceKind {
    Csv,
    Sqlite,
    #[cfg(feature = "xlsx")]
    Xlsx,
}

impl SourceKind {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Sqlite => "sqlite",
            #[cfg(feature = "xlsx")]
            Self::Xlsx => "xlsx",
        }
    }

    pub fn from_key(key: &str) -> Result<Self> {
        match key {
            "csv" => Ok(Self::Csv),
            "sqlite" => Ok(Self::Sqlite),
            #[cfg(feature = "xlsx")]
            "xlsx" => Ok(Self::Xlsx),
            other => Err(ClientbookError::Settings(format!("unknown source kind: {other}"))),
        }
    }
}

/// Configured workbook, dispatched by kind.
pub enum Workbook {
    Csv(CsvWorkbook),
    Sqlite(SqliteWorkbook),
    #[cfg(feature = "xlsx")]
    Xlsx(XlsxWorkbook),
}

impl Workbook {
    pub fn open(kind: SourceKind, location: PathBuf) -> Result<Self> {
        Ok(match kind {
            SourceKind::Csv => Self::Csv(CsvWorkbook::new(location)),
            SourceKind::Sqlite => Self::Sqlite(SqliteWorkbook::open(&location)?),
            #[cfg(feature = "xlsx")]
            SourceKind::Xlsx => Self::Xlsx(XlsxWorkbook::new(location)),
        })
    }
}

impl DataSource for Workbook {
    fn read(&self, destination: &str) -> Result<Grid> {
        match self {
            Self::Csv(w) => w.read(destination),
            Self::Sqlite(w) => w.read(destination),
            #[cfg(feature = "xlsx")]
            Self::Xlsx(w) => w.read(destination),
        }
    }

    fn write(&mut self, destination: &str, table: &Table) -> Result<()> {
        match self {
            Self::Csv(w) => w.write(destination, table),
            Self::Sqlite(w) => w.write(destination, table),
            #[cfg(feature = "xlsx")]
            Self::Xlsx(w) => w.write(destination, table),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Csv(w) => w.describe(),
            Self::Sqlite(w) => w.describe(),
            #[cfg(feature = "xlsx")]
            Self::Xlsx(w) => w.describe(),
        }
    }
}
