use std::error::Error;
use bayan_core::errors::{PortalError, PortalResult};

#[test]
fn test_portal_error_display() {
    let not_found = PortalError::NotFound("Appointment slot not found".to_string());
    let validation = PortalError::Validation("Invalid date format".to_string());
    let database = PortalError::Database(eyre::eyre!("Database connection failed"));
    let internal = PortalError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    assert_eq!(
        not_found.to_string(),
        "Resource not found: Appointment slot not found"
    );
    assert_eq!(
        validation.to_string(),
        "Validation error: Invalid date format"
    );
    assert!(database.to_string().contains("Database error:"));
    assert!(internal.to_string().contains("Internal server error:"));
}

#[test]
fn test_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "IO error");
    let portal_error = PortalError::Internal(Box::new(io_error));

    assert!(portal_error.source().is_some());
}

#[test]
fn test_portal_result() {
    let result: PortalResult<i32> = Ok(42);
    assert_eq!(result.unwrap(), 42);

    let result: PortalResult<i32> = Err(PortalError::NotFound("Not found".to_string()));
    assert!(result.is_err());
}

#[test]
fn test_from_trait_implementation() {
    let eyre_error = eyre::eyre!("Database error");
    let portal_error = PortalError::Database(eyre_error);

    assert!(portal_error.to_string().contains("Database error"));
}

#[test]
fn test_box_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "IO error");
    let boxed_error: Box<dyn Error + Send + Sync> = Box::new(io_error);
    let portal_error = PortalError::Internal(boxed_error);

    assert!(portal_error.to_string().contains("IO error"));
}
