//! Anonymization rule configuration.
//!
//! A config is an ordered list of rules. Rules are validated when they are
//! built or deserialized, so an engine never holds an unsupported action.

use crate::{Action, AnonymizeError, Result};
use serde::{Deserialize, Serialize};

/// Recognized per-rule options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleParams {
    /// Overrides the default digest salt for mask/pseudonymize.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,
}

impl RuleParams {
    /// Params with a salt override.
    pub fn with_salt(salt: impl Into<String>) -> Self {
        Self {
            salt: Some(salt.into()),
        }
    }

    fn is_empty(&self) -> bool {
        self.salt.is_none()
    }
}

/// Raw rule shape as it appears in configuration files.
#[derive(Deserialize)]
struct RawRule {
    field: String,
    action: String,
    #[serde(default)]
    params: RuleParams,
}

impl TryFrom<RawRule> for AnonymizationRule {
    type Error = AnonymizeError;

    fn try_from(raw: RawRule) -> Result<Self> {
        AnonymizationRule::parse(raw.field, &raw.action, raw.params)
    }
}

/// One directive: apply `action` to column `field`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRule")]
pub struct AnonymizationRule {
    field: String,
    action: Action,
    #[serde(skip_serializing_if = "RuleParams::is_empty")]
    params: RuleParams,
}

impl AnonymizationRule {
    /// Create a rule with default params.
    pub fn new(field: impl Into<String>, action: Action) -> Self {
        Self::with_params(field, action, RuleParams::default())
    }

    /// Create a rule with explicit params.
    pub fn with_params(field: impl Into<String>, action: Action, params: RuleParams) -> Self {
        Self {
            field: field.into(),
            action,
            params,
        }
    }

    /// Build a rule from an action name.
    ///
    /// Fails with [`AnonymizeError::UnsupportedAction`] when the name is not
    /// one of `suppress`, `mask`, `pseudonymize`, and with
    /// [`AnonymizeError::InvalidRule`] when the field name is empty.
    pub fn parse(field: impl Into<String>, action: &str, params: RuleParams) -> Result<Self> {
        let field = field.into();
        if field.trim().is_empty() {
            return Err(AnonymizeError::InvalidRule(format!(
                "rule with action '{}' has an empty field name",
                action
            )));
        }
        let action = Action::parse_str(action).ok_or_else(|| AnonymizeError::UnsupportedAction {
            field: field.clone(),
            action: action.to_string(),
        })?;
        Ok(Self::with_params(field, action, params))
    }

    /// Target column name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Action to apply.
    pub fn action(&self) -> Action {
        self.action
    }

    /// Salt override, if any.
    pub fn salt(&self) -> Option<&str> {
        self.params.salt.as_deref()
    }
}

impl std::fmt::Display for AnonymizationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.action, self.field)?;
        if self.params.salt.is_some() {
            write!(f, " [custom salt]")?;
        }
        Ok(())
    }
}

/// Ordered rule list applied by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymizerConfig {
    /// Rules in application order.
    #[serde(default)]
    rules: Vec<AnonymizationRule>,
}

impl AnonymizerConfig {
    /// Create a config from rules.
    pub fn new(rules: Vec<AnonymizationRule>) -> Self {
        Self { rules }
    }

    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Append a rule.
    pub fn with_rule(mut self, rule: AnonymizationRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Rules in application order.
    pub fn rules(&self) -> &[AnonymizationRule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns whether the config is the identity transform.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
