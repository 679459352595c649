#![deny(unsafe_code)]

pub mod domain;
pub mod error;
pub mod record;
pub mod section;
pub mod store;

pub use domain::{DOMAIN_CODES, Domain};
pub use error::{ModelError, Result};
pub use record::{Record, RecordSequence};
pub use section::{DocumentSource, Section, SectionSource};
pub use store::DomainStore;
