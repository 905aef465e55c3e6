//! Anonymization actions.

use serde::{Deserialize, Serialize};

/// Action to apply to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Remove the column entirely.
    Suppress,
    /// Replace every value with its salted digest.
    Mask,
    /// Replace every value with a stable surrogate (same digest as `Mask`).
    Pseudonymize,
}

impl Action {
    /// All supported actions, in declaration order.
    pub const ALL: [Action; 3] = [Action::Suppress, Action::Mask, Action::Pseudonymize];

    /// Parse an action from its configuration name.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "suppress" => Some(Action::Suppress),
            "mask" => Some(Action::Mask),
            "pseudonymize" => Some(Action::Pseudonymize),
            _ => None,
        }
    }

    /// Configuration name of this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Suppress => "suppress",
            Action::Mask => "mask",
            Action::Pseudonymize => "pseudonymize",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_actions() {
        assert_eq!(Action::parse_str("suppress"), Some(Action::Suppress));
        assert_eq!(Action::parse_str("mask"), Some(Action::Mask));
        assert_eq!(Action::parse_str("pseudonymize"), Some(Action::Pseudonymize));
    }

    #[test]
    fn test_parse_unknown_action() {
        assert_eq!(Action::parse_str("encrypt"), None);
        assert_eq!(Action::parse_str("MASK"), None);
        assert_eq!(Action::parse_str(""), None);
    }

    #[test]
    fn test_display_matches_parse() {
        for action in Action::ALL {
            assert_eq!(Action::parse_str(&action.to_string()), Some(action));
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Action::Pseudonymize).unwrap();
        assert_eq!(json, "\"pseudonymize\"");
        let parsed: Action = serde_json::from_str("\"suppress\"").unwrap();
        assert_eq!(parsed, Action::Suppress);
    }
}
