//! An uploaded table and the fingerprint of the file it was read from.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Cell spellings treated as missing, compared case-insensitively after trimming.
const NULL_MARKERS: &[&str] = &["na", "n/a", "nan", "null", "none"];

/// Where a previewed table came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Bare file name; the filename classifier runs on this.
    pub file: String,
    pub path: PathBuf,
    /// `sha256:<hex>` of the raw bytes.
    pub hash: String,
    pub size_bytes: u64,
    /// Delimiter label, see [`DataTable::format`].
    pub format: String,
    pub row_count: usize,
    pub column_count: usize,
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Describe `contents`, read from `path`, after it was parsed into `table`.
    pub fn describe(path: &Path, contents: &[u8], table: &DataTable) -> Self {
        Self {
            file: file_name(path),
            path: path.to_path_buf(),
            hash: content_fingerprint(contents),
            size_bytes: contents.len() as u64,
            format: table.format().to_string(),
            row_count: table.row_count(),
            column_count: table.column_count(),
            loaded_at: Utc::now(),
        }
    }
}

/// Final path component, or an empty string for paths without one.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// SHA-256 fingerprint of raw file contents, prefixed with the algorithm.
pub fn content_fingerprint(contents: &[u8]) -> String {
    format!("sha256:{:x}", Sha256::digest(contents))
}

/// Uploaded rows with every cell kept as text.
#[derive(Debug, Clone)]
pub struct DataTable {
    /// Unique header names in file order.
    pub headers: Vec<String>,
    /// Rows, each exactly `headers.len()` cells wide.
    pub rows: Vec<Vec<String>>,
    /// Field separator the rows were split on.
    pub delimiter: u8,
}

impl DataTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>, delimiter: u8) -> Self {
        Self {
            headers,
            rows,
            delimiter,
        }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cells of column `index`, top to bottom; blank past a short row.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map_or("", String::as_str))
    }

    /// Label for the delimiter: `csv`, `tsv`, `csv-semicolon`, `psv`.
    pub fn format(&self) -> &'static str {
        match self.delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
    }

    /// Whether a cell counts as missing.
    pub fn is_null_value(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || NULL_MARKERS
                .iter()
                .any(|marker| trimmed.eq_ignore_ascii_case(marker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(delimiter: u8) -> DataTable {
        DataTable::new(
            vec!["sku".into(), "qty".into()],
            vec![vec!["A".into(), "3".into()], vec!["B".into()]],
            delimiter,
        )
    }

    #[test]
    fn test_format_follows_delimiter() {
        assert_eq!(table(b',').format(), "csv");
        assert_eq!(table(b'\t').format(), "tsv");
        assert_eq!(table(b';').format(), "csv-semicolon");
        assert_eq!(table(b'|').format(), "psv");
    }

    #[test]
    fn test_column_values_blank_past_short_row() {
        let t = table(b',');
        let values: Vec<&str> = t.column_values(1).collect();
        assert_eq!(values, vec!["3", ""]);
    }

    #[test]
    fn test_describe() {
        let path = Path::new("/uploads/sales_jan.csv");
        let meta = SourceMetadata::describe(path, b"sku,qty\nA,3\n", &table(b','));
        assert_eq!(meta.file, "sales_jan.csv");
        assert_eq!(meta.size_bytes, 12);
        assert_eq!(meta.format, "csv");
        assert_eq!((meta.row_count, meta.column_count), (2, 2));
        // sha256 of the empty string
        assert_eq!(
            content_fingerprint(b""),
            "sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
