//! In-memory columnar table.
//!
//! Columns are ordered and uniquely named; all share one row count. The row
//! count is tracked separately so a table keeps it after every column has
//! been suppressed.

use crate::{AnonymizeError, Result, Value};
use serde::{Deserialize, Serialize};

/// Data type of a column, derived from its non-null values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Empty column or all values null.
    Null,
    Bool,
    Int,
    Float,
    Str,
    /// Non-null values of more than one type.
    Mixed,
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ColumnType::Null => "null",
            ColumnType::Bool => "bool",
            ColumnType::Int => "int",
            ColumnType::Float => "float",
            ColumnType::Str => "str",
            ColumnType::Mixed => "mixed",
        };
        write!(f, "{}", s)
    }
}

/// A named column of values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Cell values, one per row.
    pub values: Vec<Value>,
}

impl Column {
    /// Create a new column.
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Number of values in the column.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether the column has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Derive the column's data type.
    pub fn data_type(&self) -> ColumnType {
        let mut seen: Option<ColumnType> = None;
        for value in &self.values {
            let ty = match value {
                Value::Null => continue,
                Value::Bool(_) => ColumnType::Bool,
                Value::Int(_) => ColumnType::Int,
                Value::Float(_) => ColumnType::Float,
                Value::Str(_) => ColumnType::Str,
            };
            match seen {
                None => seen = Some(ty),
                Some(prev) if prev != ty => return ColumnType::Mixed,
                Some(_) => {}
            }
        }
        seen.unwrap_or(ColumnType::Null)
    }
}

/// An ordered set of named columns sharing one row count.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    /// Create an empty table with the given row count and no columns.
    pub fn with_rows(rows: usize) -> Self {
        Self {
            columns: Vec::new(),
            rows,
        }
    }

    /// Build a table from `(name, values)` pairs.
    ///
    /// The first column fixes the row count; an empty list yields a
    /// zero-row, zero-column table.
    pub fn from_columns<N: Into<String>>(columns: Vec<(N, Vec<Value>)>) -> Result<Self> {
        let rows = columns.first().map_or(0, |(_, values)| values.len());
        let mut table = Self::with_rows(rows);
        for (name, values) in columns {
            table.push_column(Column::new(name, values))?;
        }
        Ok(table)
    }

    /// Append a column at the end.
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        let actual = column.len();
        if actual != self.rows {
            return Err(AnonymizeError::ColumnLengthMismatch {
                column: column.name,
                expected: self.rows,
                actual,
            });
        }
        if self.has_column(&column.name) {
            return Err(AnonymizeError::DuplicateColumn(column.name));
        }
        self.columns.push(column);
        Ok(())
    }

    /// Builder form of [`Table::push_column`].
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<Value>) -> Result<Self> {
        self.push_column(Column::new(name, values))?;
        Ok(self)
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Returns whether a column with this name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// All columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Look up a single cell.
    pub fn get(&self, name: &str, row: usize) -> Option<&Value> {
        self.column(name).and_then(|c| c.values.get(row))
    }

    /// Remove a column, preserving the order of the rest.
    pub fn remove_column(&mut self, name: &str) -> Option<Column> {
        let idx = self.columns.iter().position(|c| c.name == name)?;
        Some(self.columns.remove(idx))
    }

    /// Rewrite every value of a column in place.
    ///
    /// Returns the number of values visited, or `None` if the column is
    /// missing. Row count cannot change through this path.
    pub fn map_column<F>(&mut self, name: &str, mut f: F) -> Option<usize>
    where
        F: FnMut(&Value) -> Value,
    {
        let column = self.columns.iter_mut().find(|c| c.name == name)?;
        for value in column.values.iter_mut() {
            *value = f(value);
        }
        Some(column.values.len())
    }

    /// Iterate over rows as vectors of cell references in column order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Value>> + '_ {
        (0..self.rows).map(move |row| self.columns.iter().map(|c| &c.values[row]).collect())
    }
}
