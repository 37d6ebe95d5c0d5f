/// In-memory store with JSON snapshots
pub mod memory_store;
