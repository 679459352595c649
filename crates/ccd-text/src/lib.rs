//! Extraction of coded narrative tables from CCD documents.
//!
//! [`CcdText`] walks the sections of a clinical document, keeps the ones
//! whose code maps to a [`Domain`](ccd_model::Domain), and converts each
//! section's narrative table into records keyed by header text.

#![deny(unsafe_code)]

pub mod aggregator;
pub mod diagnostics;
pub mod markup;
pub mod table;

pub use aggregator::CcdText;
pub use diagnostics::{CollectingSink, DiagnosticSink, ParseFailure, TracingSink};
pub use markup::{Element, MarkupError};
pub use table::{ColumnIndex, TableExtractor, parse_table};
