//! Tabular model for uploaded transactions and scored results
//!
//! A [`Table`] is an ordered list of [`Row`]s plus the ordered union of their
//! column names. Uploads are decoded from CSV with column-wise type
//! inference; results are exported back to CSV with the same column order.

use std::collections::HashSet;
use std::io::Read;

use serde_json::{Map, Value};

use crate::{
    errors::{DomainError, DomainResult},
    value::CellValue,
};

/// One record: column name to value, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, CellValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Set a field. Existing keys are overwritten in place, new keys appended.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Merge every field of a JSON object into this row, overriding on conflict.
    pub fn merge_json(&mut self, object: Map<String, Value>) {
        for (key, value) in object {
            self.set(key, CellValue::from_json(value));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Flat JSON object, used as the detection request body
    pub fn to_json_object(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (key, value) in iter {
            row.set(key, value);
        }
        row
    }
}

/// An ordered table of rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Build a table whose columns are the union of row keys in first-seen order.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();
        for key in rows.iter().flat_map(Row::keys) {
            if seen.insert(key.to_string()) {
                columns.push(key.to_string());
            }
        }
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first `n` rows
    pub fn head(&self, n: usize) -> &[Row] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Decode CSV bytes (header row required).
    pub fn from_csv_bytes(bytes: &[u8]) -> DomainResult<Self> {
        Self::from_csv_reader(bytes)
    }

    /// Decode CSV from a reader.
    ///
    /// A column is numeric only when every non-empty cell parses as a finite
    /// number; otherwise all of its non-empty cells stay text. Whole numbers
    /// in a numeric column are kept as exact integers. Empty input yields an
    /// empty table.
    pub fn from_csv_reader<R: Read>(reader: R) -> DomainResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let headers = reader.headers().map_err(invalid_upload)?.clone();
        let columns = dedupe_headers(headers.iter());

        let mut records = Vec::new();
        for record in reader.records() {
            records.push(record.map_err(invalid_upload)?);
        }

        let numeric: Vec<bool> = (0..columns.len())
            .map(|idx| {
                records.iter().all(|record| {
                    let cell = record.get(idx).unwrap_or("").trim();
                    cell.is_empty() || parse_number(cell).is_some()
                })
            })
            .collect();

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .enumerate()
                    .map(|(idx, name)| {
                        let raw = record.get(idx).unwrap_or("");
                        (name.clone(), decode_cell(raw, numeric[idx]))
                    })
                    .collect::<Row>()
            })
            .collect();

        tracing::debug!(
            columns = columns.len(),
            rows = records.len(),
            "decoded CSV upload"
        );

        Ok(Self { columns, rows })
    }

    /// Encode as CSV with a header row. Missing fields export as empty cells.
    pub fn to_csv_string(&self) -> DomainResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        if !self.columns.is_empty() {
            writer.write_record(&self.columns).map_err(export_failed)?;
        }
        for row in &self.rows {
            let record: Vec<String> = self
                .columns
                .iter()
                .map(|column| row.get(column).map(ToString::to_string).unwrap_or_default())
                .collect();
            writer.write_record(&record).map_err(export_failed)?;
        }
        let bytes = writer.into_inner().map_err(|e| DomainError::ExportFailed {
            reason: e.to_string(),
        })?;
        String::from_utf8(bytes).map_err(export_failed)
    }
}

fn decode_cell(raw: &str, numeric_column: bool) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    if numeric_column {
        if let Ok(i) = trimmed.parse::<i64>() {
            return CellValue::Integer(i);
        }
        // Digits past i64 would lose precision as f64
        if is_integer_syntax(trimmed) {
            return CellValue::Text(raw.to_string());
        }
        if let Some(n) = parse_number(trimmed) {
            return CellValue::Number(n);
        }
    }
    CellValue::Text(raw.to_string())
}

fn is_integer_syntax(cell: &str) -> bool {
    let digits = cell.strip_prefix(&['-', '+'][..]).unwrap_or(cell);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn parse_number(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Repeated header names get `.1`, `.2`, ... suffixes so every column stays addressable.
fn dedupe_headers<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut columns = Vec::new();
    for header in headers {
        let mut name = header.to_string();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{header}.{suffix}");
            suffix += 1;
        }
        seen.insert(name.clone());
        columns.push(name);
    }
    columns
}

fn invalid_upload(err: impl std::fmt::Display) -> DomainError {
    DomainError::InvalidUpload {
        reason: err.to_string(),
    }
}

fn export_failed(err: impl std::fmt::Display) -> DomainError {
    DomainError::ExportFailed {
        reason: err.to_string(),
    }
}
