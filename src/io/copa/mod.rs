/// Errors of the COPA reader
pub mod error;
/// Streaming reader
pub mod reader;
/// Typed records
pub mod record;
