//! Fuzz target for anonymization rule configuration parsing.
//!
//! Parsing must never panic; a config that parses must only hold
//! supported actions.

#![no_main]

use libfuzzer_sys::fuzz_target;
use ph_anonymize::{Action, AnonymizerConfig};

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = serde_json::from_slice::<AnonymizerConfig>(data) {
        for rule in config.rules() {
            assert!(Action::ALL.contains(&rule.action()));
            assert!(!rule.field().trim().is_empty());
        }
    }
});
