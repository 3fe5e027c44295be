//! Stable per-license server identity.

use uuid::Uuid;

/// Derive the opaque server ID for a license key.
///
/// The ID is a name-based (MD5) UUID over the UTF-8 bytes of the license key,
/// scoped by the deployment namespace UUID. The same (namespace, license)
/// pair always yields the same ID across requests and process restarts, so
/// re-uploads with one license land on one server regardless of the IP and
/// port presented with the request. Pure computation, no error conditions.
pub fn derive_server_id(namespace: &Uuid, license_key: &str) -> String {
    Uuid::new_v3(namespace, license_key.as_bytes()).to_string()
}
