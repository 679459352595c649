#![deny(unsafe_code)]

pub mod cda;
pub mod error;

pub use cda::CdaDocument;
pub use error::IngestError;
