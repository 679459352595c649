#![deny(unsafe_code)]

use std::path::PathBuf;

use ccd_text::MarkupError;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid document markup: {0}")]
    Markup(#[from] MarkupError),

    #[error("document has no root element")]
    Empty,

    #[error("expected a ClinicalDocument root element, found <{root}>")]
    NotClinicalDocument { root: String },

    #[error("document has no structuredBody component")]
    MissingStructuredBody,
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
