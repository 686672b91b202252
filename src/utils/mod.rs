//! Utility functions shared across the application.
//!
//! - [`validators`] - Login, password and image URL validation

pub mod validators;
