//! CSV connector.
//!
//! The first record is the header. Empty cells read as `Null`. Each column
//! gets a single type inferred from its non-empty cells, tried in order:
//! integer, float, boolean, string. A column holding an integer literal
//! outside the `i64` range stays a string so distinct IDs stay distinct.

use crate::{Connector, ConnectorError, Result};
use ph_anonymize::{Column, Table, Value};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Inferred cell type for a CSV column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Inferred {
    Int,
    Float,
    Bool,
    Str,
}

/// Reads and writes comma-separated files.
#[derive(Debug, Clone)]
pub struct CsvConnector {
    path: PathBuf,
}

impl CsvConnector {
    /// Create a connector for a file path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read a table from any CSV source.
    pub fn read_from<R: Read>(reader: R) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() {
            return Err(ConnectorError::MissingHeader);
        }

        let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for record in reader.records() {
            let record = record?;
            for (column, field) in cells.iter_mut().zip(record.iter()) {
                column.push(field.to_string());
            }
        }

        let rows = cells.first().map_or(0, Vec::len);
        let mut table = Table::with_rows(rows);
        for (name, raw) in headers.into_iter().zip(cells) {
            let kind = infer(&raw);
            let values = raw.iter().map(|cell| convert(cell, kind)).collect();
            table.push_column(Column::new(name, values))?;
        }
        Ok(table)
    }

    /// Write a table to any sink.
    ///
    /// A table with no columns writes nothing.
    pub fn write_to<W: Write>(table: &Table, writer: W) -> Result<()> {
        if table.num_columns() == 0 {
            return Ok(());
        }

        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(table.column_names())?;
        for row in table.rows() {
            writer.write_record(row.iter().map(|value| value.to_string()))?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl Connector for CsvConnector {
    fn read(&self) -> Result<Table> {
        let file = File::open(&self.path)?;
        let table = Self::read_from(BufReader::new(file))?;
        debug!(
            path = %self.path.display(),
            rows = table.num_rows(),
            columns = table.num_columns(),
            "CSV read"
        );
        Ok(table)
    }

    fn write(&self, table: &Table) -> Result<()> {
        let file = File::create(&self.path)?;
        Self::write_to(table, BufWriter::new(file))?;
        debug!(
            path = %self.path.display(),
            rows = table.num_rows(),
            columns = table.num_columns(),
            "CSV written"
        );
        Ok(())
    }
}

fn infer(cells: &[String]) -> Inferred {
    let mut present = cells.iter().filter(|c| !c.is_empty()).peekable();
    if present.peek().is_none() {
        return Inferred::Str;
    }
    let present: Vec<&String> = present.collect();

    if present.iter().all(|c| c.parse::<i64>().is_ok()) {
        Inferred::Int
    } else if present.iter().all(|c| is_float(c) && !is_integer_literal(c)) {
        // Mixed ints and decimals widen to float; an out-of-range int cannot.
        Inferred::Float
    } else if present
        .iter()
        .all(|c| c.eq_ignore_ascii_case("true") || c.eq_ignore_ascii_case("false"))
    {
        Inferred::Bool
    } else {
        Inferred::Str
    }
}

// Require a digit so words like "nan" or "infinity" stay strings.
fn is_float(cell: &str) -> bool {
    cell.bytes().any(|b| b.is_ascii_digit()) && cell.parse::<f64>().is_ok()
}

fn is_integer_literal(cell: &str) -> bool {
    let digits = cell.strip_prefix(['+', '-']).unwrap_or(cell);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) && cell.parse::<i64>().is_err()
}

fn convert(cell: &str, kind: Inferred) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    match kind {
        Inferred::Int => cell.parse().map_or(Value::Null, Value::Int),
        Inferred::Float => cell.parse().map_or(Value::Null, Value::Float),
        Inferred::Bool => Value::Bool(cell.eq_ignore_ascii_case("true")),
        Inferred::Str => Value::Str(cell.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ph_anonymize::ColumnType;

    fn read(input: &str) -> Table {
        CsvConnector::read_from(input.as_bytes()).unwrap()
    }

    #[test]
    fn test_read_infers_types() {
        let table = read("id,name,score,active\n1,alice,1.5,true\n2,bob,2,FALSE\n");

        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.column("id").unwrap().data_type(), ColumnType::Int);
        assert_eq!(table.column("name").unwrap().data_type(), ColumnType::Str);
        assert_eq!(table.column("score").unwrap().data_type(), ColumnType::Float);
        assert_eq!(table.column("active").unwrap().data_type(), ColumnType::Bool);
        assert_eq!(table.get("score", 1), Some(&Value::Float(2.0)));
        assert_eq!(table.get("active", 1), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_empty_cells_are_null() {
        let table = read("id,name\n1,\n,bob\n");
        assert_eq!(table.get("name", 0), Some(&Value::Null));
        assert_eq!(table.get("id", 1), Some(&Value::Null));
        assert_eq!(table.column("id").unwrap().data_type(), ColumnType::Int);
    }

    #[test]
    fn test_word_nan_stays_string() {
        let table = read("label\nnan\ninfinity\n");
        assert_eq!(table.column("label").unwrap().data_type(), ColumnType::Str);
    }

    #[test]
    fn test_oversized_integers_stay_exact() {
        let input = "patient_id\n12345678901234567891\n12345678901234567892\n";
        let table = read(input);

        assert_eq!(table.column("patient_id").unwrap().data_type(), ColumnType::Str);
        assert_ne!(table.get("patient_id", 0), table.get("patient_id", 1));

        let mut out = Vec::new();
        CsvConnector::write_to(&table, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), input);
    }

    #[test]
    fn test_oversized_integer_among_decimals() {
        let table = read("amount\n1.5\n-99999999999999999999\n");
        assert_eq!(table.column("amount").unwrap().data_type(), ColumnType::Str);
        assert_eq!(
            table.get("amount", 1),
            Some(&Value::from("-99999999999999999999"))
        );
    }

    #[test]
    fn test_ints_and_decimals_widen_to_float() {
        let table = read("score\n1\n2.5\n");
        assert_eq!(table.column("score").unwrap().data_type(), ColumnType::Float);
        assert_eq!(table.get("score", 0), Some(&Value::Float(1.0)));
    }

    #[test]
    fn test_header_only() {
        let table = read("id,name\n");
        assert_eq!(table.num_rows(), 0);
        assert_eq!(table.num_columns(), 2);
    }

    #[test]
    fn test_empty_input_is_missing_header() {
        let err = CsvConnector::read_from("".as_bytes()).unwrap_err();
        assert!(matches!(err, ConnectorError::MissingHeader));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = CsvConnector::read_from("a,b\n1,2\n3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ConnectorError::Csv(_)));
    }

    #[test]
    fn test_write_canonical_text() {
        let table = Table::from_columns(vec![
            ("id", vec![Value::from(1), Value::Null]),
            ("score", vec![Value::from(2.0), Value::from(0.5)]),
            ("note", vec![Value::from("a,b"), Value::from("plain")]),
        ])
        .unwrap();

        let mut out = Vec::new();
        CsvConnector::write_to(&table, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text, "id,score,note\n1,2.0,\"a,b\"\n,0.5,plain\n");
    }

    #[test]
    fn test_write_no_columns() {
        let mut out = Vec::new();
        CsvConnector::write_to(&Table::with_rows(3), &mut out).unwrap();
        assert!(out.is_empty());
    }
}
