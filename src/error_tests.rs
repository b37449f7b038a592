//! Tests for PantryError type

use super::*;

#[test]
fn test_config_error_display() {
    let error = PantryError::Config("expected `=`".to_string());
    let msg = error.to_string();
    assert!(msg.contains("Invalid config file"));
    assert!(msg.contains("expected `=`"));
}

#[test]
fn test_logging_error_display() {
    let error = PantryError::Logging("logger already set".to_string());
    assert_eq!(
        error.to_string(),
        "Could not initialize logging: logger already set"
    );
}

#[test]
fn test_io_error_from_std_io_error() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test error");
    let err = PantryError::from(io_err);
    assert!(matches!(err, PantryError::Io(_)));
    assert!(err.to_string().contains("test error"));
}

#[test]
fn test_error_debug() {
    let error = PantryError::Config("bad".to_string());
    let debug_str = format!("{:?}", error);
    assert!(debug_str.contains("Config"));
}
