use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::book::Book;
use crate::error::{ClientbookError, Result};
use crate::ledger;
use crate::loader::{HeaderPolicy, DEFAULT_SCAN_WINDOW};
use crate::source::{SourceKind, Workbook};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default = "default_summary_sheet")]
    pub summary_sheet: String,
    #[serde(default = "default_history_sheet")]
    pub history_sheet: String,
    #[serde(default = "default_scan_window")]
    pub scan_window: usize,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// `keywords` looks for known column names; `presence` takes the first
    /// non-blank row.
    #[serde(default = "default_header_detection")]
    pub header_detection: String,
}

fn default_source() -> String {
    "csv".to_string()
}

fn default_location() -> String {
    default_data_dir().join("book").to_string_lossy().to_string()
}

fn default_summary_sheet() -> String {
    "621616384".to_string()
}

fn default_history_sheet() -> String {
    "0".to_string()
}

fn default_scan_window() -> usize {
    DEFAULT_SCAN_WINDOW
}

fn default_cache_ttl_secs() -> u64 {
    5
}

fn default_header_detection() -> String {
    "keywords".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: default_source(),
            location: default_location(),
            summary_sheet: default_summary_sheet(),
            history_sheet: default_history_sheet(),
            scan_window: default_scan_window(),
            cache_ttl_secs: default_cache_ttl_secs(),
            header_detection: default_header_detection(),
        }
    }
}

impl Settings {
    pub fn source_kind(&self) -> Result<SourceKind> {
        SourceKind::from_key(&self.source)
    }

    fn policy_or(&self, keyword_policy: HeaderPolicy) -> HeaderPolicy {
        if self.header_detection == "presence" {
            HeaderPolicy::Presence
        } else {
            keyword_policy
        }
    }

    pub fn summary_policy(&self) -> HeaderPolicy {
        self.policy_or(ledger::summary_policy())
    }

    pub fn history_policy(&self) -> HeaderPolicy {
        self.policy_or(ledger::history_policy())
    }

    /// Open the configured workbook behind a fresh read cache.
    pub fn open_book(&self) -> Result<Book<Workbook>> {
        let workbook = Workbook::open(self.source_kind()?, PathBuf::from(&self.location))?;
        Ok(Book::new(
            workbook,
            Duration::from_secs(self.cache_ttl_secs),
            self.scan_window,
        ))
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("clientbook")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("clientbook")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| ClientbookError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .to_string_lossy()
        .to_string()
}
