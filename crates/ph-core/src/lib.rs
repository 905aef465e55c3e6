//! Parma Health Toolkit core library.
//!
//! Wires the CSV connectors, rule file loading and the anonymization engine
//! into the pipeline behind the `parma` binary.

pub mod config;
pub mod exit_codes;
pub mod logging;
pub mod pipeline;

pub use config::{load_rules, resolve_rules, ConfigError, LoadedRules};
pub use exit_codes::ExitCode;
pub use pipeline::{run, PipelineError, RunSummary};
