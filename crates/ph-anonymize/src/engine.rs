//! Main anonymization engine.
//!
//! The Anonymizer threads a table through its rules in order. A rule whose
//! field is missing from the current table state is skipped, so configs
//! written against a wider schema still apply to narrower inputs.

use crate::{hash, Action, AnonymizationRule, AnonymizerConfig, Table, Value};
use serde::{Deserialize, Serialize};

/// What happened when a single rule was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleStatus {
    /// The rule's action was applied.
    Applied,
    /// The field was not present in the table at that point.
    SkippedMissingField,
}

/// Per-rule outcome of a chunk run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
    /// Target field.
    pub field: String,
    /// Action of the rule.
    pub action: Action,
    /// Applied or skipped.
    pub status: RuleStatus,
    /// Number of cells rewritten (0 for suppress and skipped rules).
    pub cells_rewritten: usize,
}

/// Rule-driven anonymizer.
///
/// Holds only its configuration; safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct Anonymizer {
    config: AnonymizerConfig,
}

impl Anonymizer {
    /// Create an engine for the given config.
    pub fn new(config: AnonymizerConfig) -> Self {
        Self { config }
    }

    /// The engine's config.
    pub fn config(&self) -> &AnonymizerConfig {
        &self.config
    }

    /// Apply every rule to a table chunk.
    pub fn process_chunk(&self, table: Table) -> Table {
        self.process_chunk_with_report(table).0
    }

    /// Apply every rule and report what each one did.
    pub fn process_chunk_with_report(&self, mut table: Table) -> (Table, Vec<RuleOutcome>) {
        let outcomes = self
            .config
            .rules()
            .iter()
            .map(|rule| apply_rule(&mut table, rule))
            .collect();
        (table, outcomes)
    }
}

/// Apply a config to a table without building an engine.
pub fn apply(mut table: Table, config: &AnonymizerConfig) -> Table {
    for rule in config.rules() {
        apply_rule(&mut table, rule);
    }
    table
}

fn apply_rule(table: &mut Table, rule: &AnonymizationRule) -> RuleOutcome {
    let mut outcome = RuleOutcome {
        field: rule.field().to_string(),
        action: rule.action(),
        status: RuleStatus::SkippedMissingField,
        cells_rewritten: 0,
    };

    if !table.has_column(rule.field()) {
        return outcome;
    }

    match rule.action() {
        Action::Suppress => {
            table.remove_column(rule.field());
        }
        Action::Mask => {
            outcome.cells_rewritten = rewrite(table, rule, hash::mask_value);
        }
        Action::Pseudonymize => {
            outcome.cells_rewritten = rewrite(table, rule, hash::pseudonymize_value);
        }
    }
    outcome.status = RuleStatus::Applied;
    outcome
}

/// Replace each cell of the rule's column with its digest; nulls stay null.
fn rewrite(
    table: &mut Table,
    rule: &AnonymizationRule,
    digest: fn(&Value, Option<&str>) -> Option<String>,
) -> usize {
    let salt = rule.salt();
    table
        .map_column(rule.field(), |value| {
            digest(value, salt).map_or(Value::Null, Value::Str)
        })
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{mask_value, ColumnType, RuleParams};

    fn sample_table() -> Table {
        Table::from_columns(vec![
            ("name", vec![Value::from("Alice"), Value::from("Bob")]),
            ("age", vec![Value::from(30), Value::from(25)]),
            (
                "email",
                vec![Value::from("alice@example.com"), Value::from("bob@example.com")],
            ),
        ])
        .unwrap()
    }

    fn engine(rules: Vec<AnonymizationRule>) -> Anonymizer {
        Anonymizer::new(AnonymizerConfig::new(rules))
    }

    #[test]
    fn test_suppress_rule() {
        let result = engine(vec![AnonymizationRule::new("email", Action::Suppress)])
            .process_chunk(sample_table());

        assert!(!result.has_column("email"));
        assert!(result.has_column("name"));
        assert_eq!(result.num_rows(), 2);
    }

    #[test]
    fn test_mask_rule() {
        let input = sample_table();
        let result = engine(vec![AnonymizationRule::new("name", Action::Mask)])
            .process_chunk(input.clone());

        let expected = mask_value(&Value::from("Alice"), Some("default_salt")).unwrap();
        assert_eq!(result.get("name", 0), Some(&Value::Str(expected)));
        assert_eq!(result.column("age"), input.column("age"));
        assert_eq!(result.column("name").unwrap().data_type(), ColumnType::Str);
    }

    #[test]
    fn test_mask_keeps_nulls() {
        let table = Table::from_columns(vec![("name", vec![Value::from("Alice"), Value::Null])])
            .unwrap();
        let result = engine(vec![AnonymizationRule::new("name", Action::Mask)]).process_chunk(table);

        assert!(matches!(result.get("name", 0), Some(Value::Str(_))));
        assert_eq!(result.get("name", 1), Some(&Value::Null));
    }

    #[test]
    fn test_column_order_preserved() {
        let result = engine(vec![
            AnonymizationRule::new("age", Action::Suppress),
            AnonymizationRule::new("email", Action::Mask),
        ])
        .process_chunk(sample_table());

        assert_eq!(result.column_names().collect::<Vec<_>>(), vec!["name", "email"]);
    }

    #[test]
    fn test_report() {
        let (result, report) = engine(vec![
            AnonymizationRule::new("name", Action::Pseudonymize),
            AnonymizationRule::new("missing", Action::Mask),
            AnonymizationRule::new("email", Action::Suppress),
        ])
        .process_chunk_with_report(sample_table());

        assert_eq!(report.len(), 3);
        assert_eq!(report[0].status, RuleStatus::Applied);
        assert_eq!(report[0].cells_rewritten, 2);
        assert_eq!(report[1].status, RuleStatus::SkippedMissingField);
        assert_eq!(report[1].field, "missing");
        assert_eq!(report[2].status, RuleStatus::Applied);
        assert_eq!(report[2].cells_rewritten, 0);
        assert_eq!(result.num_columns(), 2);
    }

    #[test]
    fn test_free_apply_matches_engine() {
        let config = AnonymizerConfig::new(vec![AnonymizationRule::with_params(
            "name",
            Action::Mask,
            RuleParams::with_salt("custom_salt"),
        )]);
        let via_engine = Anonymizer::new(config.clone()).process_chunk(sample_table());
        let via_fn = apply(sample_table(), &config);
        assert_eq!(via_engine, via_fn);
    }

    #[test]
    fn test_empty_config_is_identity() {
        let result = Anonymizer::default().process_chunk(sample_table());
        assert_eq!(result, sample_table());
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Anonymizer>();
    }
}
