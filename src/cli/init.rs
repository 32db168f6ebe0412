use std::path::PathBuf;

use crate::error::Result;
use crate::settings::{load_settings, save_settings, shellexpand_path};
use crate::source::{CsvWorkbook, SourceKind, Workbook};

pub fn run(source: Option<String>, location: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(kind) = source {
        settings.source = SourceKind::from_key(&kind)?.key().to_string();
    }
    if let Some(loc) = location {
        settings.location = shellexpand_path(&loc);
    }

    let location = PathBuf::from(&settings.location);
    match settings.source_kind()? {
        SourceKind::Csv => {
            CsvWorkbook::new(location.clone())
                .ensure_tabs(&[settings.summary_sheet.as_str(), settings.history_sheet.as_str()])?;
        }
        SourceKind::Sqlite => {
            if let Some(parent) = location.parent() {
                std::fs::create_dir_all(parent)?;
            }
            Workbook::open(SourceKind::Sqlite, location.clone())?;
        }
        #[cfg(feature = "xlsx")]
        SourceKind::Xlsx => {}
    }

    save_settings(&settings)?;
    println!(
        "Initialized clientbook ({}) at {}",
        settings.source,
        location.display()
    );
    Ok(())
}
