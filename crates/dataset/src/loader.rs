//! Delimited dataset loading.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use causalflow_core::{Error, Result};

/// A loaded tabular dataset: ordered column names plus string records.
///
/// The workflows only need column identity and a light sample for prompt
/// grounding; values stay untyped.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Load a delimited file from disk.
    pub fn from_path(path: impl AsRef<Path>, separator: u8) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::dataset(format!("failed to open '{}': {}", path.display(), e)))?;
        Self::from_reader(file, separator)
    }

    /// Load a delimited dataset from any reader.
    pub fn from_reader(reader: impl Read, separator: u8) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(separator)
            .has_headers(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| Error::dataset(format!("failed to read header row: {}", e)))?;
        let columns: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();

        if columns.is_empty() {
            return Err(Error::dataset("dataset has no columns"));
        }
        let mut seen = HashSet::new();
        for column in &columns {
            if column.is_empty() {
                return Err(Error::dataset("dataset has an empty column name"));
            }
            if !seen.insert(column.as_str()) {
                return Err(Error::dataset(format!("duplicate column '{}'", column)));
            }
        }

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record =
                record.map_err(|e| Error::dataset(format!("malformed record: {}", e)))?;
            rows.push(record.iter().map(|field| field.to_string()).collect());
        }

        Ok(Self { columns, rows })
    }

    /// Parse a separator from component input text.
    ///
    /// Empty input falls back to a comma; "tab" and the escaped form are
    /// accepted for tab-separated files.
    pub fn parse_separator(separator: &str) -> Result<u8> {
        match separator {
            "" => Ok(b','),
            "\\t" | "tab" => Ok(b'\t'),
            s if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
            other => Err(Error::invalid_input(format!(
                "separator must be a single ASCII character, got '{}'",
                other
            ))),
        }
    }

    /// Ordered column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// All unordered column pairs: (c_i, c_j) for i < j, in column order.
    ///
    /// This is the deterministic enumeration the pairwise judgment loop
    /// walks, one judgment per pair.
    pub fn variable_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for i in 0..self.columns.len() {
            for j in (i + 1)..self.columns.len() {
                pairs.push((self.columns[i].clone(), self.columns[j].clone()));
            }
        }
        pairs
    }

    /// Compact description used to ground agent prompts.
    pub fn summary(&self) -> String {
        let mut out = format!(
            "{} rows, {} columns: {}",
            self.row_count(),
            self.columns.len(),
            self.columns.join(", ")
        );
        if let Some(first) = self.rows.first() {
            out.push_str("\nfirst row: ");
            out.push_str(&first.join(", "));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_comma_separated() {
        let dataset = Dataset::from_reader("a,b,c\n1,2,3\n4,5,6\n".as_bytes(), b',').unwrap();
        assert_eq!(dataset.columns(), ["a", "b", "c"]);
        assert_eq!(dataset.row_count(), 2);
    }

    #[test]
    fn test_load_semicolon_separated() {
        let dataset = Dataset::from_reader("x;y\n1;2\n".as_bytes(), b';').unwrap();
        assert_eq!(dataset.columns(), ["x", "y"]);
    }

    #[test]
    fn test_duplicate_column_is_rejected() {
        let err = Dataset::from_reader("a,a\n1,2\n".as_bytes(), b',').unwrap_err();
        assert!(matches!(err, Error::Dataset(_)));
    }

    #[test]
    fn test_pairs_follow_column_order() {
        let dataset = Dataset::from_reader("x,y,z\n1,2,3\n".as_bytes(), b',').unwrap();
        let pairs = dataset.variable_pairs();
        assert_eq!(
            pairs,
            vec![
                ("x".to_string(), "y".to_string()),
                ("x".to_string(), "z".to_string()),
                ("y".to_string(), "z".to_string()),
            ]
        );
    }

    #[test]
    fn test_separator_parsing() {
        assert_eq!(Dataset::parse_separator("").unwrap(), b',');
        assert_eq!(Dataset::parse_separator(";").unwrap(), b';');
        assert_eq!(Dataset::parse_separator("tab").unwrap(), b'\t');
        assert_eq!(Dataset::parse_separator("\\t").unwrap(), b'\t');
        assert!(Dataset::parse_separator("::").is_err());
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "age,income").unwrap();
        writeln!(file, "34,51000").unwrap();
        let dataset = Dataset::from_path(file.path(), b',').unwrap();
        assert_eq!(dataset.columns(), ["age", "income"]);
        assert!(dataset.summary().contains("age, income"));
    }
}
