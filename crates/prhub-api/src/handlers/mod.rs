//! Request handlers. Stateless per request; all shared state comes in
//! through `Arc<AppState>`.

pub mod servers;
pub mod upload;
