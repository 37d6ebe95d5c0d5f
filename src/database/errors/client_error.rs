use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Connection error: {0}")]
    ConnectionError(postgres::Error),
    #[error("Migration error: {0}")]
    MigrationError(#[from] refinery::Error),
    #[error("Query error: {0}")]
    QueryError(#[from] postgres::Error),
}
