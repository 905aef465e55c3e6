//! Fuzz target for CSV reading followed by masking every column.
//!
//! Neither step may panic, and masking must keep the row count.

#![no_main]

use libfuzzer_sys::fuzz_target;
use ph_anonymize::{Action, AnonymizationRule, Anonymizer, AnonymizerConfig};
use ph_connectors::CsvConnector;

fuzz_target!(|data: &[u8]| {
    let Ok(table) = CsvConnector::read_from(data) else {
        return;
    };
    let rules = table
        .column_names()
        .map(|name| AnonymizationRule::new(name, Action::Mask))
        .collect();
    let rows = table.num_rows();
    let result = Anonymizer::new(AnonymizerConfig::new(rules)).process_chunk(table);
    assert_eq!(result.num_rows(), rows);
});
