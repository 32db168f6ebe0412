/// Normalized row/column structure produced by the loader.
///
/// Values are stored by position and addressed by column name. Column names
/// are not deduplicated: when two headers share the same text, lookups hit
/// the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Borrowed view of one table row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    values: &'a [String],
}

impl<'a> Row<'a> {
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.values.get(idx).map(String::as_str)
    }

    /// Like `get`, but resolves an optional column name and reads a missing
    /// column as empty.
    pub fn field(&self, column: Option<&str>) -> &'a str {
        column.and_then(|c| self.get(c)).unwrap_or("")
    }

    pub fn values(&self) -> &'a [String] {
        self.values
    }
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from positional rows, padding short rows with `""` and
    /// dropping cells past the header width.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut r| {
                r.resize(width, String::new());
                r
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |values| Row {
            columns: &self.columns,
            values,
        })
    }

    #[allow(dead_code)]
    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|values| Row {
            columns: &self.columns,
            values,
        })
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// First column (in stored order) whose name contains any of `fragments`.
    /// Matching is a case-sensitive substring test.
    pub fn find_column(&self, fragments: &[&str]) -> Option<&str> {
        self.columns
            .iter()
            .find(|col| fragments.iter().any(|f| col.contains(f)))
            .map(String::as_str)
    }

    /// Append one row given as `(column, value)` pairs.
    ///
    /// Columns the table does not have yet are added at the end and existing
    /// rows read `""` for them. Columns absent from `values` read `""` in the
    /// new row.
    pub fn append_row(mut self, values: &[(&str, &str)]) -> Self {
        for (col, _) in values {
            if self.column_index(col).is_none() {
                self.columns.push((*col).to_string());
                for row in &mut self.rows {
                    row.push(String::new());
                }
            }
        }
        let mut row = vec![String::new(); self.columns.len()];
        for (col, value) in values {
            if let Some(idx) = self.column_index(col) {
                row[idx] = (*value).to_string();
            }
        }
        self.rows.push(row);
        self
    }

    /// Set `target` to `value` on every row whose `key_column` equals `key`.
    /// Returns the number of rows updated.
    pub fn set_where(&mut self, key_column: &str, key: &str, target: &str, value: &str) -> usize {
        let (Some(k), Some(t)) = (self.column_index(key_column), self.column_index(target)) else {
            return 0;
        };
        let mut updated = 0;
        for row in &mut self.rows {
            if row[k] == key {
                row[t] = value.to_string();
                updated += 1;
            }
        }
        updated
    }

    /// Rows matching `keep`, with the same columns.
    pub fn filter<F>(&self, keep: F) -> Table
    where
        F: Fn(&Row<'_>) -> bool,
    {
        let rows = self
            .rows()
            .filter(|r| keep(r))
            .map(|r| r.values.to_vec())
            .collect();
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Header row followed by the data rows, as written to a destination.
    pub fn to_grid(&self) -> Vec<Vec<String>> {
        if self.columns.is_empty() && self.rows.is_empty() {
            return Vec::new();
        }
        std::iter::once(self.columns.clone())
            .chain(self.rows.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> Table {
        Table::from_rows(
            cols(&["업체명", "담당자", "상태"]),
            vec![
                cols(&["Acme", "Kim", "거래중"]),
                cols(&["Globex", "Lee", "종료"]),
            ],
        )
    }

    #[test]
    fn test_find_column_matches_substring() {
        let t = Table::new(cols(&["No", "거래처 업체명", "금액"]));
        assert_eq!(t.find_column(&["업체명", "상호"]), Some("거래처 업체명"));
        assert_eq!(t.find_column(&["금액"]), Some("금액"));
    }

    #[test]
    fn test_find_column_column_order_wins_over_fragment_order() {
        let t = Table::new(cols(&["상호", "업체명"]));
        // "업체명" is listed first but "상호" is the earlier column.
        assert_eq!(t.find_column(&["업체명", "상호"]), Some("상호"));
    }

    #[test]
    fn test_find_column_is_case_sensitive_and_returns_none() {
        let t = Table::new(cols(&["Name", "Date"]));
        assert_eq!(t.find_column(&["name"]), None);
        assert_eq!(t.find_column(&["Amount", "Memo"]), None);
        assert_eq!(Table::default().find_column(&["Name"]), None);
    }

    #[test]
    fn test_duplicate_headers_first_wins() {
        let t = Table::from_rows(cols(&["Note", "Note"]), vec![cols(&["a", "b"])]);
        assert_eq!(t.row(0).unwrap().get("Note"), Some("a"));
    }

    #[test]
    fn test_from_rows_pads_and_truncates() {
        let t = Table::from_rows(
            cols(&["A", "B"]),
            vec![cols(&["1"]), cols(&["1", "2", "3"])],
        );
        assert_eq!(t.row(0).unwrap().values(), &cols(&["1", ""])[..]);
        assert_eq!(t.row(1).unwrap().values(), &cols(&["1", "2"])[..]);
    }

    #[test]
    fn test_append_row_known_columns() {
        let t = sample().append_row(&[("업체명", "Initech"), ("상태", "거래중")]);
        assert_eq!(t.len(), 3);
        let row = t.row(2).unwrap();
        assert_eq!(row.get("업체명"), Some("Initech"));
        assert_eq!(row.get("담당자"), Some(""));
        assert_eq!(row.get("상태"), Some("거래중"));
    }

    #[test]
    fn test_append_row_adds_unknown_columns() {
        let t = sample().append_row(&[("업체명", "Initech"), ("연락처", "010-1234")]);
        assert_eq!(t.columns().len(), 4);
        assert_eq!(t.row(0).unwrap().get("연락처"), Some(""));
        assert_eq!(t.row(2).unwrap().get("연락처"), Some("010-1234"));
    }

    #[test]
    fn test_append_to_empty_table() {
        let t = Table::default().append_row(&[("Date", "2024-01-01"), ("Amount", "10")]);
        assert_eq!(t.columns(), &cols(&["Date", "Amount"])[..]);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_set_where_updates_matching_rows() {
        let mut t = sample();
        assert_eq!(t.set_where("업체명", "Acme", "상태", "종료"), 1);
        assert_eq!(t.row(0).unwrap().get("상태"), Some("종료"));
        assert_eq!(t.set_where("업체명", "Nobody", "상태", "종료"), 0);
        assert_eq!(t.set_where("missing", "Acme", "상태", "종료"), 0);
    }

    #[test]
    fn test_filter_keeps_columns() {
        let t = sample().filter(|r| r.get("상태") == Some("종료"));
        assert_eq!(t.len(), 1);
        assert_eq!(t.columns().len(), 3);
        assert_eq!(t.row(0).unwrap().get("업체명"), Some("Globex"));
    }

    #[test]
    fn test_to_grid() {
        let grid = sample().to_grid();
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[0], cols(&["업체명", "담당자", "상태"]));
        assert!(Table::default().to_grid().is_empty());
    }
}
