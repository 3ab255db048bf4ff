use gridgraph_diff::{ComparatorOptions, DiffError};
use pretty_assertions::assert_eq;
use std::io::Write;

fn write_options(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn defaults_compare_everything() {
    let options = ComparatorOptions::default();
    assert!(options.compare_terminals);
    assert!(options.compare_container_membership);
    assert!(options.compare_names);
    assert_eq!(options.float_tolerance, 0.0);
}

#[test]
fn partial_section_keeps_other_defaults() {
    let options = ComparatorOptions::from_toml_str(
        r#"
[comparator]
compare_terminals = false
float_tolerance = 1e-6
"#,
    )
    .unwrap();
    assert_eq!(
        options,
        ComparatorOptions {
            compare_terminals: false,
            float_tolerance: 1e-6,
            ..Default::default()
        }
    );
}

#[test]
fn empty_document_is_default() {
    assert_eq!(
        ComparatorOptions::from_toml_str("").unwrap(),
        ComparatorOptions::default()
    );
}

#[test]
fn unknown_field_is_rejected() {
    let err = ComparatorOptions::from_toml_str("[comparator]\ncompare_everything = true\n")
        .unwrap_err();
    assert!(matches!(err, DiffError::Toml(_)));
}

#[test]
fn negative_tolerance_is_rejected() {
    let err = ComparatorOptions::from_toml_str("[comparator]\nfloat_tolerance = -1.0\n")
        .unwrap_err();
    assert!(matches!(err, DiffError::Config(_)));
}

#[test]
fn load_from_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let options = ComparatorOptions::load_from(dir.path().join("nonexistent.toml"));
    assert_eq!(options, ComparatorOptions::default());
}

#[test]
fn load_from_file() {
    let file = write_options("[comparator]\ncompare_names = false\n");
    let options = ComparatorOptions::load_from(file.path());
    assert!(!options.compare_names);
    assert!(options.compare_terminals);
}

#[test]
fn load_from_malformed_file_falls_back_to_defaults() {
    let file = write_options("[comparator\ncompare_names = ");
    assert_eq!(
        ComparatorOptions::load_from(file.path()),
        ComparatorOptions::default()
    );
}

#[test]
fn load_from_invalid_values_falls_back_to_defaults() {
    let file = write_options("[comparator]\nfloat_tolerance = -0.5\n");
    assert_eq!(
        ComparatorOptions::load_from(file.path()),
        ComparatorOptions::default()
    );
}

#[test]
fn from_path_reads_the_file() {
    let file = write_options("[comparator]\ncompare_terminals = false\n");
    let options = ComparatorOptions::from_path(file.path()).unwrap();
    assert!(!options.compare_terminals);
    assert!(options.compare_names);
}

#[test]
fn from_path_reports_a_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = ComparatorOptions::from_path(dir.path().join("nonexistent.toml")).unwrap_err();
    assert!(matches!(err, DiffError::Io(_)));
}

#[test]
fn from_path_reports_a_malformed_file() {
    let file = write_options("[comparator\ncompare_names = ");
    let err = ComparatorOptions::from_path(file.path()).unwrap_err();
    assert!(matches!(err, DiffError::Toml(_)));
}

#[test]
fn minimal_skips_optional_groups() {
    let options = ComparatorOptions::minimal();
    assert!(!options.compare_terminals);
    assert!(!options.compare_container_membership);
    assert!(!options.compare_names);
}
