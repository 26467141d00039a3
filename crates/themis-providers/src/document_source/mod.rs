//! Document Source Implementations
//!
//! Both sources decode the same article record format.

pub mod file;
pub mod http;
mod records;

pub use file::JsonFileDocumentSource;
pub use http::HttpDocumentSource;
pub use records::parse_documents;
