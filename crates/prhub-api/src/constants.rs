//! API constants.

/// Path prefix all hub routes are registered under.
pub const API_PREFIX: &str = "/api/v1";
