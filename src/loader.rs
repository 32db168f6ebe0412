use tracing::debug;

use crate::table::Table;

/// Raw cell value as delivered by a data source.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

pub type Grid = Vec<Vec<Cell>>;

/// Tokens that spreadsheet exports use for a missing value.
const EMPTY_SENTINELS: &[&str] = &["nan", "NaN", "None", "null", "NULL", "<NA>", "NaT", "N/A", "#N/A"];

pub const DEFAULT_SCAN_WINDOW: usize = 10;

/// Rule for picking which row of a raw grid holds the column names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HeaderPolicy {
    /// First row with at least one non-empty cell.
    Presence,
    /// First row whose joined text contains any of the keywords.
    Keywords(Vec<String>),
}

impl HeaderPolicy {
    pub fn keywords(words: &[&str]) -> Self {
        HeaderPolicy::Keywords(words.iter().map(|w| w.to_string()).collect())
    }

    fn accepts(&self, row: &[String]) -> bool {
        match self {
            HeaderPolicy::Presence => row.iter().any(|c| !c.trim().is_empty()),
            HeaderPolicy::Keywords(words) => {
                let joined = row.concat();
                words.iter().any(|w| joined.contains(w.as_str()))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoadOptions {
    pub policy: HeaderPolicy,
    pub scan_window: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            policy: HeaderPolicy::Presence,
            scan_window: DEFAULT_SCAN_WINDOW,
        }
    }
}

/// Coerce a raw cell to text, folding empty sentinels to `""`.
pub fn cell_text(cell: &Cell) -> String {
    let text = match cell {
        Cell::Empty => return String::new(),
        Cell::Text(s) => s.clone(),
        Cell::Number(n) if n.is_nan() => return String::new(),
        Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
        Cell::Number(n) => n.to_string(),
        Cell::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
    };
    if EMPTY_SENTINELS.contains(&text.trim()) {
        String::new()
    } else {
        text
    }
}

/// Index of the header row within the first `scan_window` rows, or 0 when no
/// row there qualifies.
pub fn detect_header(rows: &[Vec<String>], options: &LoadOptions) -> usize {
    let found = rows
        .iter()
        .take(options.scan_window)
        .position(|row| options.policy.accepts(row));
    match found {
        Some(idx) => idx,
        None => {
            debug!(
                window = options.scan_window,
                "no header row matched, falling back to row 0"
            );
            0
        }
    }
}

/// Turn a raw grid into a `Table`.
///
/// An empty grid gives an empty table. Data rows are padded with `""` or cut
/// to the header width.
pub fn load(grid: &Grid, options: &LoadOptions) -> Table {
    if grid.is_empty() {
        return Table::default();
    }
    let text: Vec<Vec<String>> = grid
        .iter()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    let header_idx = detect_header(&text, options);
    let mut rows = text.into_iter().skip(header_idx);
    let columns: Vec<String> = rows
        .next()
        .unwrap_or_default()
        .into_iter()
        .map(|c| c.trim().to_string())
        .collect();
    let data: Vec<Vec<String>> = rows.collect();
    debug!(header_idx, columns = columns.len(), rows = data.len(), "loaded grid");

    Table::from_rows(columns, data)
}

/// Grid form of a table, as a source would hand it back after a write.
#[cfg(test)]
pub fn to_cells(table: &Table) -> Grid {
    table
        .to_grid()
        .into_iter()
        .map(|row| row.into_iter().map(Cell::Text).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Grid {
        rows.iter()
            .map(|r| r.iter().map(|c| Cell::from(*c)).collect())
            .collect()
    }

    fn presence(window: usize) -> LoadOptions {
        LoadOptions {
            policy: HeaderPolicy::Presence,
            scan_window: window,
        }
    }

    #[test]
    fn test_presence_skips_blank_leading_row() {
        let g = grid(&[
            &["", "", ""],
            &["Name", "Date", "Amount"],
            &["Acme", "2024-01-01", "1000"],
        ]);
        let t = load(&g, &presence(10));
        assert_eq!(t.columns(), &["Name", "Date", "Amount"]);
        assert_eq!(t.len(), 1);
        let row = t.row(0).unwrap();
        assert_eq!(row.get("Name"), Some("Acme"));
        assert_eq!(row.get("Date"), Some("2024-01-01"));
        assert_eq!(row.get("Amount"), Some("1000"));
    }

    #[test]
    fn test_empty_grid_gives_empty_table() {
        let t = load(&Vec::new(), &LoadOptions::default());
        assert!(t.columns().is_empty());
        assert!(t.is_empty());
    }

    #[test]
    fn test_presence_treats_sentinels_and_whitespace_as_empty() {
        let g = vec![
            vec![Cell::Empty, Cell::Number(f64::NAN), Cell::from("  ")],
            vec![Cell::from("nan"), Cell::from("None")],
            vec![Cell::from("Name"), Cell::from("Amount")],
        ];
        let rows: Vec<Vec<String>> = g.iter().map(|r| r.iter().map(cell_text).collect()).collect();
        assert_eq!(detect_header(&rows, &presence(10)), 2);
    }

    #[test]
    fn test_keyword_policy_skips_title_rows() {
        let g = grid(&[
            &["2024 거래처 현황"],
            &["작성자", "Kim"],
            &["No", "업체명", "담당자"],
            &["1", "Acme", "Lee"],
        ]);
        let opts = LoadOptions {
            policy: HeaderPolicy::keywords(&["업체명", "상호"]),
            scan_window: 10,
        };
        let t = load(&g, &opts);
        assert_eq!(t.columns(), &["No", "업체명", "담당자"]);
        assert_eq!(t.row(0).unwrap().get("업체명"), Some("Acme"));
    }

    #[test]
    fn test_fallback_to_row_zero_when_window_exhausted() {
        let g = grid(&[&["", ""], &["", ""], &["Name", "Amount"], &["Acme", "1"]]);
        let t = load(&g, &presence(2));
        assert_eq!(t.columns(), &["", ""]);
        assert_eq!(t.len(), 3);

        let kw = LoadOptions {
            policy: HeaderPolicy::keywords(&["Balance"]),
            scan_window: 10,
        };
        let rows: Vec<Vec<String>> = g.iter().map(|r| r.iter().map(cell_text).collect()).collect();
        assert_eq!(detect_header(&rows, &kw), 0);
    }

    #[test]
    fn test_keyword_row_beyond_window_falls_back_to_row_zero() {
        let g = grid(&[
            &["거래처 현황", ""],
            &["", ""],
            &["", ""],
            &["업체명", "금액"],
            &["Acme", "1000"],
        ]);
        let opts = LoadOptions {
            policy: HeaderPolicy::keywords(&["업체명"]),
            scan_window: 3,
        };
        let t = load(&g, &opts);
        assert_eq!(t.columns(), &["거래처 현황", ""]);
        assert_eq!(t.len(), 4);
        assert_eq!(t.row(2).unwrap().get("거래처 현황"), Some("업체명"));

        let wider = LoadOptions {
            scan_window: 4,
            ..opts
        };
        assert_eq!(load(&g, &wider).columns(), &["업체명", "금액"]);
    }

    #[test]
    fn test_keyword_matches_across_joined_cells() {
        let rows = vec![
            vec!["Bal".to_string(), "ance".to_string()],
            vec!["Balance".to_string()],
        ];
        let kw = LoadOptions {
            policy: HeaderPolicy::keywords(&["Balance"]),
            scan_window: 10,
        };
        assert_eq!(detect_header(&rows, &kw), 0);
    }

    #[test]
    fn test_header_cells_trimmed() {
        let g = grid(&[&["  Name ", "\tDate"], &["Acme", "2024-01-01"]]);
        let t = load(&g, &presence(10));
        assert_eq!(t.columns(), &["Name", "Date"]);
    }

    #[test]
    fn test_cell_coercion() {
        assert_eq!(cell_text(&Cell::Number(1000.0)), "1000");
        assert_eq!(cell_text(&Cell::Number(12.5)), "12.5");
        assert_eq!(cell_text(&Cell::Bool(true)), "TRUE");
        assert_eq!(cell_text(&Cell::from("NULL")), "");
        assert_eq!(cell_text(&Cell::from(" #N/A ")), "");
        assert_eq!(cell_text(&Cell::from("Nancy")), "Nancy");
    }

    #[test]
    fn test_ragged_rows_padded_and_truncated() {
        let g = grid(&[&["A", "B", "C"], &["1"], &["1", "2", "3", "4"]]);
        let t = load(&g, &presence(10));
        assert_eq!(t.row(0).unwrap().values(), &["1", "", ""]);
        assert_eq!(t.row(1).unwrap().values(), &["1", "2", "3"]);
    }

    #[test]
    fn test_reload_round_trip() {
        let g = grid(&[
            &[""],
            &["Name", "Memo"],
            &["Acme", "null"],
            &["Globex", "first order"],
        ]);
        let opts = presence(10);
        let t = load(&g, &opts);
        let reloaded = load(&to_cells(&t), &opts);
        assert_eq!(reloaded, t);
        assert_eq!(reloaded.row(0).unwrap().get("Memo"), Some(""));
    }
}
