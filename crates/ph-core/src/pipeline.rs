//! Read -> anonymize -> write pipeline.

use crate::config::LoadedRules;
use crate::exit_codes::ExitCode;
use ph_anonymize::{Anonymizer, RuleOutcome, RuleStatus};
use ph_connectors::{connector_for_path, Connector, ConnectorError, CsvConnector};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while running the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Connector(#[from] ConnectorError),
}

impl PipelineError {
    /// Map the failure to a process exit code.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            PipelineError::Connector(ConnectorError::UnsupportedFormat { .. }) => {
                ExitCode::ArgsError
            }
            PipelineError::Connector(ConnectorError::Io(_)) => ExitCode::IoError,
            PipelineError::Connector(
                ConnectorError::Csv(_) | ConnectorError::Table(_) | ConnectorError::MissingHeader,
            ) => ExitCode::DataError,
        }
    }
}

/// What a pipeline run did.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Rows written.
    pub rows: usize,
    /// Columns in the input.
    pub columns_in: usize,
    /// Columns written.
    pub columns_out: usize,
    /// Per-rule outcomes; empty for passthrough runs.
    pub outcomes: Vec<RuleOutcome>,
}

impl RunSummary {
    /// Number of rules that were skipped because their field was missing.
    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == RuleStatus::SkippedMissingField)
            .count()
    }
}

/// Read `source`, apply `rules` (if any), write `destination` as CSV.
///
/// Only the source extension selects a connector; the destination is
/// always written as CSV whatever its name.
pub fn run(
    source: &Path,
    destination: &Path,
    rules: Option<&LoadedRules>,
) -> Result<RunSummary, PipelineError> {
    let reader = connector_for_path(source)?;
    let writer = CsvConnector::new(destination);

    let table = reader.read()?;
    let rows = table.num_rows();
    let columns_in = table.num_columns();
    debug!(rows, columns = columns_in, "Source loaded");

    let (table, outcomes) = match rules {
        Some(loaded) => {
            info!(
                rules = loaded.config.len(),
                path = %loaded.path.display(),
                hash = %loaded.content_hash,
                "Applying anonymization rules"
            );
            let engine = Anonymizer::new(loaded.config.clone());
            engine.process_chunk_with_report(table)
        }
        None => (table, Vec::new()),
    };

    for outcome in &outcomes {
        match outcome.status {
            RuleStatus::Applied => info!(
                field = %outcome.field,
                action = %outcome.action,
                cells = outcome.cells_rewritten,
                "Rule applied"
            ),
            RuleStatus::SkippedMissingField => info!(
                field = %outcome.field,
                action = %outcome.action,
                "Rule skipped: field not present"
            ),
        }
    }

    writer.write(&table)?;

    Ok(RunSummary {
        rows,
        columns_in,
        columns_out: table.num_columns(),
        outcomes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ph_anonymize::{Action, AnonymizationRule, AnonymizerConfig};
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn loaded(rules: Vec<AnonymizationRule>) -> LoadedRules {
        LoadedRules {
            config: AnonymizerConfig::new(rules),
            path: PathBuf::from("inline.json"),
            content_hash: String::new(),
        }
    }

    #[test]
    fn test_passthrough() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("in.csv");
        let destination = dir.path().join("out.csv");
        std::fs::write(&source, "id,name\n1,alice\n2,bob\n").unwrap();

        let summary = run(&source, &destination, None).unwrap();
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.columns_out, 2);
        assert!(summary.outcomes.is_empty());
        assert_eq!(
            std::fs::read_to_string(&destination).unwrap(),
            "id,name\n1,alice\n2,bob\n"
        );
    }

    #[test]
    fn test_with_rules() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("in.csv");
        let destination = dir.path().join("out.csv");
        std::fs::write(&source, "name,email\nAlice,a@x.com\n").unwrap();

        let rules = loaded(vec![
            AnonymizationRule::new("email", Action::Suppress),
            AnonymizationRule::new("phone", Action::Mask),
        ]);
        let summary = run(&source, &destination, Some(&rules)).unwrap();

        assert_eq!(summary.columns_in, 2);
        assert_eq!(summary.columns_out, 1);
        assert_eq!(summary.skipped(), 1);
        assert_eq!(
            std::fs::read_to_string(&destination).unwrap(),
            "name\nAlice\n"
        );
    }

    #[test]
    fn test_destination_extension_ignored() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("in.csv");
        let destination = dir.path().join("anon.out");
        std::fs::write(&source, "id\n7\n").unwrap();

        run(&source, &destination, None).unwrap();
        assert_eq!(std::fs::read_to_string(&destination).unwrap(), "id\n7\n");
    }

    #[test]
    fn test_unsupported_source_is_args_error() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("in.txt");
        std::fs::write(&source, "dummy content").unwrap();

        let err = run(&source, &dir.path().join("out.csv"), None).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::ArgsError);
        assert_eq!(
            err.to_string(),
            "Unsupported file type .txt. Only .csv is supported."
        );
    }
}
