//! Tabular I/O connectors for the Parma Health toolkit.
//!
//! Connectors move [`Table`] values in and out of files. The anonymization
//! engine never touches the filesystem itself; callers read a table through
//! a connector, run the engine, and write the result back.
//!
//! # Example
//!
//! ```no_run
//! use ph_connectors::{connector_for_path, Connector};
//! use std::path::Path;
//!
//! let source = connector_for_path(Path::new("patients.csv")).unwrap();
//! let table = source.read().unwrap();
//! println!("{} rows", table.num_rows());
//! ```

pub mod delimited;
pub mod error;

pub use delimited::CsvConnector;
pub use error::{ConnectorError, Result};

use ph_anonymize::Table;
use std::path::Path;

/// A file-backed table source and sink.
pub trait Connector {
    /// Read the whole file into a table.
    fn read(&self) -> Result<Table>;

    /// Write a table to the file, replacing its contents.
    fn write(&self, table: &Table) -> Result<()>;
}

/// Pick a connector from the file extension.
pub fn connector_for_path(path: &Path) -> Result<Box<dyn Connector>> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_string())
        .unwrap_or_default();

    if extension.eq_ignore_ascii_case("csv") {
        return Ok(Box::new(CsvConnector::new(path)));
    }

    Err(ConnectorError::UnsupportedFormat {
        extension: if extension.is_empty() {
            "(none)".to_string()
        } else {
            format!(".{}", extension)
        },
    })
}
