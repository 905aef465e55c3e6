//! Rule-driven anonymization engine for tabular data.
//!
//! This crate applies declarative, field-level anonymization rules to an
//! in-memory [`Table`]. Each rule names a column and an [`Action`]:
//!
//! - **suppress**: drop the column entirely.
//! - **mask**: replace every value with its salted SHA-256 digest.
//! - **pseudonymize**: same digest as `mask`, named for the intent of
//!   producing a stable surrogate identifier.
//!
//! The engine is pure: it performs no I/O and does not log. Reading and
//! writing tables lives in `ph-connectors`.
//!
//! # Example
//!
//! ```
//! use ph_anonymize::{Action, AnonymizationRule, Anonymizer, AnonymizerConfig, Table, Value};
//!
//! let table = Table::from_columns(vec![
//!     ("name", vec![Value::from("Alice"), Value::from("Bob")]),
//!     ("email", vec![Value::from("a@x.com"), Value::from("b@y.com")]),
//! ])
//! .unwrap();
//!
//! let config = AnonymizerConfig::new(vec![
//!     AnonymizationRule::new("name", Action::Mask),
//!     AnonymizationRule::new("email", Action::Suppress),
//! ]);
//! let engine = Anonymizer::new(config);
//!
//! let result = engine.process_chunk(table);
//! assert!(!result.has_column("email"));
//! assert_eq!(result.num_rows(), 2);
//! ```

pub mod action;
pub mod engine;
pub mod error;
pub mod hash;
pub mod rule;
pub mod table;
pub mod value;

pub use action::Action;
pub use engine::{apply, Anonymizer, RuleOutcome, RuleStatus};
pub use error::{AnonymizeError, Result};
pub use hash::{digest_str, hash_sha256, mask_value, pseudonymize_value, DEFAULT_SALT};
pub use rule::{AnonymizationRule, AnonymizerConfig, RuleParams};
pub use table::{Column, ColumnType, Table};
pub use value::Value;
