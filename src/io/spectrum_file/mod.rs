/// Writer for spectrum artifacts
pub mod writer;
