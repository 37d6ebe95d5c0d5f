/// Errors when working with the stores
pub mod errors;
/// In-memory store with JSON snapshots
pub mod memory;
/// Support for PostgreSQL
pub mod pgsql;
/// Trait for stores
pub mod store;
