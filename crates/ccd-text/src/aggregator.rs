//! Per-document aggregation of narrative tables into a [`DomainStore`].

use ccd_model::{DocumentSource, Domain, DomainStore, SectionSource};
use tracing::{debug, info, info_span};

use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::table::TableExtractor;

/// Holds the domain tables extracted from one clinical document.
///
/// Call [`CcdText::set_document`] once, then query with
/// [`CcdText::get_field`]. A new document replaces the previous store.
#[derive(Debug, Default)]
pub struct CcdText<D = TracingSink> {
    extractor: TableExtractor<D>,
    store: DomainStore,
}

impl CcdText<TracingSink> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: DiagnosticSink> CcdText<D> {
    pub fn with_sink(sink: D) -> Self {
        Self {
            extractor: TableExtractor::with_sink(sink),
            store: DomainStore::new(),
        }
    }

    pub fn sink(&self) -> &D {
        self.extractor.sink()
    }

    /// Extract every recognized section of `document`.
    ///
    /// Sections are visited in document order. Unrecognized codes and empty
    /// tables are skipped; when two sections share a domain the later one wins.
    pub fn set_document<T>(&mut self, document: &T) -> &DomainStore
    where
        T: DocumentSource + ?Sized,
    {
        let span = info_span!("ccd_text");
        let _guard = span.enter();

        let mut store = DomainStore::new();
        for (position, section) in document.sections().iter().enumerate() {
            let Some(code) = section.code() else {
                debug!(position, "section has no code");
                continue;
            };
            let Some(domain) = Domain::from_code(code) else {
                debug!(position, code, "skipping unrecognized section code");
                continue;
            };
            let markup = match section.table_markup() {
                Some(markup) if !markup.trim().is_empty() => markup,
                _ => {
                    debug!(position, domain = %domain, "section has no table");
                    continue;
                }
            };
            let records = self.extractor.extract(&markup);
            debug!(position, domain = %domain, rows = records.len(), "extracted table");
            if store.insert(domain, records).is_some() {
                debug!(domain = %domain, "replaced earlier section for domain");
            }
        }

        info!(domains = store.len(), "extracted CCD narrative tables");
        self.store = store;
        &self.store
    }

    /// Value at `(domain, row, column)`; `None` when any part is missing.
    pub fn get_field(&self, domain: &str, index: usize, column: &str) -> Option<&str> {
        self.store.field(domain, index, column)
    }

    /// Like [`CcdText::get_field`], with misses reported as an empty string.
    pub fn get_field_or_empty(&self, domain: &str, index: usize, column: &str) -> &str {
        self.get_field(domain, index, column).unwrap_or_default()
    }

    pub fn store(&self) -> &DomainStore {
        &self.store
    }

    pub fn into_store(self) -> DomainStore {
        self.store
    }
}
