/// Helpers and fixtures for tests
#[cfg(test)]
pub mod tests;
