//! Application state shared across request handlers.

use prhub_core::Config;
use prhub_services::LicenseValidator;
use prhub_storage::Storage;
use std::sync::Arc;

/// Main application state: configuration plus the storage backend and
/// license validator handles. Handlers receive it as `Arc<AppState>`; there
/// is no other shared mutable state.
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub validator: LicenseValidator,
}

impl AppState {
    /// Public URL for one uploaded file, built from the configured base URL.
    pub fn file_url(&self, server_id: &str, filename: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.public_base_url.trim_end_matches('/'),
            server_id,
            filename
        )
    }
}
