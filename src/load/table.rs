use tracing::{debug, info};

use super::{csv_reader, open, read_columns, resolve_delimiter, Cells};
use crate::{config::Config, error::Result};

/// A fully materialized file: header names plus every data row as raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Column names in file order.
    pub columns: Vec<String>,
    /// Each data row, one `String` per column.
    pub rows: Vec<Vec<String>>,
}

impl Cells for Table {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn cell(&self, row: usize, col: usize) -> &str {
        &self.rows[row][col]
    }
}

/// Load the whole file into memory. Ragged rows are a parse error.
#[tracing::instrument(level = "debug", skip(config), fields(path = %config.path.display()))]
pub fn read_table(config: &Config) -> Result<Table> {
    let delimiter = resolve_delimiter(config)?;
    let mut rdr = csv_reader(open(&config.path)?, delimiter);
    let columns = read_columns(&mut rdr, &config.path)?;
    debug!(columns = columns.len(), "read header");

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    info!(rows = rows.len(), columns = columns.len(), "loaded table");
    Ok(Table { columns, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn fixture(content: &str) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(content.as_bytes()).unwrap();
        tmp.flush().unwrap();
        tmp
    }

    #[test]
    fn test_reads_rows_and_columns() {
        let tmp = fixture("a,b\n1,2\n3,4\n");
        let table = read_table(&Config::new(tmp.path())).unwrap();
        assert_eq!(table.columns, vec!["a", "b"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.cell(1, 0), "3");
    }

    #[test]
    fn test_empty_field_kept_as_empty_string() {
        let tmp = fixture("a,b\n,2\nNA,null\n");
        let table = read_table(&Config::new(tmp.path())).unwrap();
        assert_eq!(table.rows[0], vec!["", "2"]);
        assert_eq!(table.rows[1], vec!["NA", "null"]);
    }

    #[test]
    fn test_values_are_opaque_text() {
        let tmp = fixture("x;y\n1.50;007\n");
        let table = read_table(&Config::new(tmp.path())).unwrap();
        assert_eq!(table.rows[0], vec!["1.50", "007"]);
    }

    #[test]
    fn test_explicit_separator_wins() {
        // sniffing would pick ',', the caller insists on ';'
        let tmp = fixture("a,b;c\n1,2;3\n");
        let table = read_table(&Config::new(tmp.path()).with_separator(b';')).unwrap();
        assert_eq!(table.columns, vec!["a,b", "c"]);
        assert_eq!(table.rows[0], vec!["1,2", "3"]);
    }

    #[test]
    fn test_quoted_fields() {
        let tmp = fixture("name,note\n\"Smith, J\",\"said \"\"hi\"\"\"\n");
        let table = read_table(&Config::new(tmp.path())).unwrap();
        assert_eq!(table.rows[0], vec!["Smith, J", "said \"hi\""]);
    }

    #[test]
    fn test_header_only() {
        let tmp = fixture("a,b,c\n");
        let table = read_table(&Config::new(tmp.path())).unwrap();
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_missing_file() {
        let err = read_table(&Config::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, Error::Open { .. }));
    }

    #[test]
    fn test_empty_file() {
        let tmp = fixture("");
        let err = read_table(&Config::new(tmp.path())).unwrap_err();
        assert!(matches!(err, Error::Empty { .. }));
    }

    #[test]
    fn test_ragged_row_is_parse_error() {
        let tmp = fixture("a,b\n1,2\n3,4,5\n");
        let err = read_table(&Config::new(tmp.path()).with_separator(b',')).unwrap_err();
        assert!(matches!(err, Error::Csv(_)));
    }
}
