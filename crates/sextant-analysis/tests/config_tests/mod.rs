use std::fs;

use expect_test::expect;
use sextant_analysis::{AnalysisConfig, ConfigError};
use sextant_types::PrimitiveType;
use tempfile::TempDir;

use crate::support::Fixture;

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().expect("Failed to create temporary directory");
    let path = dir.path().join("sextant.toml");
    fs::write(
        &path,
        r#"
integer_fallback = "i64"
float_fallback = "f32"
trait_methods = false
"#,
    )
    .expect("Failed to write config");

    let config = AnalysisConfig::load(&path).unwrap();
    assert_eq!(config.integer_fallback, PrimitiveType::I64);
    assert_eq!(config.float_fallback, PrimitiveType::F32);
    assert!(!config.trait_methods);
    assert!(config.detect_declaration_cycles);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = TempDir::new().expect("Failed to create temporary directory");
    let path = dir.path().join("absent.toml");
    match AnalysisConfig::load(&path) {
        Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected an io error, got {other:?}"),
    }
}

#[test]
fn test_invalid_fallback_message() {
    let err = AnalysisConfig::from_toml_str("float_fallback = \"u8\"").unwrap_err();
    expect!["`float_fallback` must name a float type, found `u8`"].assert_eq(&err.to_string());
}

#[test]
fn test_loaded_config_drives_analysis() {
    let dir = TempDir::new().expect("Failed to create temporary directory");
    let path = dir.path().join("sextant.toml");
    fs::write(&path, "integer_fallback = \"usize\"\n").expect("Failed to write config");
    let config = AnalysisConfig::load(&path).unwrap();

    let fixture = Fixture::new("fn main() { let n = 3; }");
    assert_eq!(fixture.binding_types_with(config), "n: usize");
}
