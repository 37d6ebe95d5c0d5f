/// Reader for UniProt text entries
pub mod reader;
