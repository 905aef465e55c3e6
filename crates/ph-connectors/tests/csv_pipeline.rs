//! File-backed CSV tests: read -> anonymize -> write -> read.

use ph_anonymize::{
    hash_sha256, Action, AnonymizationRule, Anonymizer, AnonymizerConfig, Value,
};
use ph_connectors::{connector_for_path, Connector, ConnectorError, CsvConnector};
use std::fs;
use tempfile::tempdir;

#[test]
fn passthrough_preserves_content() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.csv");
    let output = dir.path().join("output.csv");
    fs::write(&input, "id,name\n1,alice\n2,bob\n3,charlie\n").unwrap();

    let table = CsvConnector::new(&input).read().unwrap();
    CsvConnector::new(&output).write(&table).unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "id,name\n1,alice\n2,bob\n3,charlie\n"
    );
}

#[test]
fn anonymized_output_roundtrips() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("patients.csv");
    let output = dir.path().join("anonymized.csv");
    fs::write(
        &input,
        "name,age,email\nAlice,30,a@x.com\nBob,25,b@y.com\n",
    )
    .unwrap();

    let source = connector_for_path(&input).unwrap();
    let sink = connector_for_path(&output).unwrap();

    let engine = Anonymizer::new(AnonymizerConfig::new(vec![
        AnonymizationRule::new("name", Action::Mask),
        AnonymizationRule::new("email", Action::Suppress),
    ]));
    let result = engine.process_chunk(source.read().unwrap());
    sink.write(&result).unwrap();

    let reread = sink.read().unwrap();
    assert_eq!(reread.column_names().collect::<Vec<_>>(), vec!["name", "age"]);
    assert_eq!(reread.num_rows(), 2);
    assert_eq!(
        reread.get("name", 0),
        Some(&Value::Str(hash_sha256(&Value::from("Alice"), None).unwrap()))
    );
    assert_eq!(reread.get("age", 1), Some(&Value::Int(25)));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = CsvConnector::new(dir.path().join("nope.csv"))
        .read()
        .unwrap_err();
    assert!(matches!(err, ConnectorError::Io(_)));
}

#[test]
fn wide_ids_keep_distinct_pseudonyms() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("ids.csv");
    fs::write(
        &input,
        "patient_id\n12345678901234567891\n12345678901234567892\n",
    )
    .unwrap();

    let engine = Anonymizer::new(AnonymizerConfig::new(vec![AnonymizationRule::new(
        "patient_id",
        Action::Pseudonymize,
    )]));
    let result = engine.process_chunk(CsvConnector::new(&input).read().unwrap());

    assert_eq!(
        result.get("patient_id", 0),
        Some(&Value::Str(
            hash_sha256(&Value::from("12345678901234567891"), None).unwrap()
        ))
    );
    assert_ne!(result.get("patient_id", 0), result.get("patient_id", 1));
}
