/// CSV writer for ingestion reports
pub mod writer;
