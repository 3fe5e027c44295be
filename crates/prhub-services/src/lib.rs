//! PRHub Services Library
//!
//! Clients for external services the hub depends on. Currently that is the
//! license validation endpoint that authorizes game-server uploads.

pub mod license;

pub use license::{LicenseError, LicenseValidator, Validation};
