/// Client error
pub mod client_error;

/// Snapshot error
pub mod snapshot_error;

/// Store error
pub mod store_error;
