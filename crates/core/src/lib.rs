//! # Bayan Core
//!
//! Domain types and pure scheduling logic for the bayan appointment service:
//! wall-clock time-range arithmetic, office-hour validation, and the shared
//! request/response models. Nothing in this crate touches the network or the
//! database.

/// Error taxonomy shared by all crates
pub mod errors;
/// Request, response, and persisted-entity models
pub mod models;
/// `HH:mm` parsing and half-open interval overlap tests
pub mod time;
/// Office-hour and batch payload validation
pub mod validation;
