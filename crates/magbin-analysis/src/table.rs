//! In-memory record table and its whitespace-separated text loader
//!
//! A [`RecordTable`] holds one `f64` column per named field, all of equal
//! length. It is built once and never mutated afterwards.
//!
//! # Text format
//!
//! ```text
//! #magIn r50in magMeas r50meas r50SE
//! 21.3   2.10  21.5    2.05    -1
//! 22.8   3.40  23.1    3.90    3.1
//! ```
//!
//! - The first non-blank line is the header; a leading `#` is stripped.
//! - Blank lines and later lines starting with `#` are skipped.
//! - Every data line must hold one finite number per header column.

use std::io::{self, BufRead, Write};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum TableError {
    #[display("failed to read table")]
    Io { source: io::Error },
    #[display("table has no header line")]
    MissingHeader,
    #[display("duplicate column name '{name}'")]
    DuplicateColumn { name: String },
    #[display("line {line}: expected {expected} values, found {found}")]
    RowLength {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[display("line {line}, column '{column}': '{token}' is not a finite number")]
    InvalidValue {
        line: usize,
        column: String,
        token: String,
    },
    #[display("column '{name}' has {found} values, expected {expected}")]
    ColumnLength {
        name: String,
        expected: usize,
        found: usize,
    },
    #[display("column '{name}' holds a non-finite value at row {row}")]
    NonFinite { name: String, row: usize },
}

/// Column-major table of named numeric fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordTable {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
    len: usize,
}

impl RecordTable {
    /// Builds a table from `(name, values)` pairs, keeping their order.
    ///
    /// All columns must have the same length, names must be unique and every
    /// value must be finite.
    pub fn from_columns<I, S>(columns: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut names: Vec<String> = vec![];
        let mut values: Vec<Vec<f64>> = vec![];
        for (name, column) in columns {
            let name = name.into();
            if names.contains(&name) {
                return Err(TableError::DuplicateColumn { name });
            }
            if let Some(row) = column.iter().position(|v| !v.is_finite()) {
                return Err(TableError::NonFinite { name, row });
            }
            if let Some(first) = values.first() {
                if first.len() != column.len() {
                    return Err(TableError::ColumnLength {
                        name,
                        expected: first.len(),
                        found: column.len(),
                    });
                }
            }
            names.push(name);
            values.push(column);
        }

        let len = values.first().map_or(0, Vec::len);
        Ok(Self {
            names,
            columns: values,
            len,
        })
    }

    /// Parses the whitespace-separated text format described in the module docs.
    pub fn parse<R>(reader: R) -> Result<Self, TableError>
    where
        R: BufRead,
    {
        let mut header: Option<Vec<String>> = None;
        let mut columns: Vec<Vec<f64>> = vec![];

        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| TableError::Io { source })?;
            let line_no = idx + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let Some(names) = &header else {
                let names = trimmed
                    .trim_start_matches('#')
                    .split_whitespace()
                    .map(str::to_owned)
                    .collect::<Vec<_>>();
                if names.is_empty() {
                    return Err(TableError::MissingHeader);
                }
                columns = vec![vec![]; names.len()];
                header = Some(names);
                continue;
            };

            if trimmed.starts_with('#') {
                continue;
            }

            let tokens = trimmed.split_whitespace().collect::<Vec<_>>();
            if tokens.len() != names.len() {
                return Err(TableError::RowLength {
                    line: line_no,
                    expected: names.len(),
                    found: tokens.len(),
                });
            }
            for ((token, name), column) in tokens.iter().zip(names).zip(&mut columns) {
                let value = token
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| TableError::InvalidValue {
                        line: line_no,
                        column: name.clone(),
                        token: (*token).to_owned(),
                    })?;
                column.push(value);
            }
        }

        let names = header.ok_or(TableError::MissingHeader)?;
        Self::from_columns(names.into_iter().zip(columns))
    }

    /// Parses a table held in memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use magbin_analysis::table::RecordTable;
    ///
    /// let table = RecordTable::parse_str("#mag size\n10 2\n11 -1\n").unwrap();
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.column("size"), Some(&[2.0, -1.0][..]));
    /// ```
    pub fn parse_str(text: &str) -> Result<Self, TableError> {
        Self::parse(text.as_bytes())
    }

    /// Writes the table in the text format accepted by [`RecordTable::parse`],
    /// with a `#`-prefixed header and `decimals` digits after the point.
    pub fn write<W>(&self, writer: &mut W, decimals: usize) -> io::Result<()>
    where
        W: Write,
    {
        writeln!(writer, "#{}", self.names.join(" "))?;
        for row in 0..self.len {
            let line = self
                .columns
                .iter()
                .map(|column| format!("{:.decimals$}", column[row]))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(writer, "{line}")?;
        }
        Ok(())
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Field names in header order.
    #[must_use]
    pub fn field_names(&self) -> &[String] {
        &self.names
    }

    /// Values of one field, one per record, or `None` for an unknown field.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        let idx = self.names.iter().position(|n| n == name)?;
        Some(&self.columns[idx])
    }
}
