use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::Domain;
use crate::record::{Record, RecordSequence};

/// Extracted narrative tables of one document, keyed by domain.
///
/// A domain is absent when no section carried its code or its section had no
/// table. A table that failed to parse is stored with no rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DomainStore {
    domains: BTreeMap<Domain, RecordSequence>,
}

impl DomainStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the rows for a domain, replacing any previous rows.
    pub fn insert(&mut self, domain: Domain, records: RecordSequence) -> Option<RecordSequence> {
        self.domains.insert(domain, records)
    }

    /// Rows for a domain display name such as `"Allergies"`.
    pub fn get(&self, domain_name: &str) -> Option<&[Record]> {
        Domain::from_name(domain_name).and_then(|domain| self.get_domain(domain))
    }

    pub fn get_domain(&self, domain: Domain) -> Option<&[Record]> {
        self.domains.get(&domain).map(Vec::as_slice)
    }

    /// Value at `(domain, row, column)`, or `None` if any step misses.
    pub fn field(&self, domain_name: &str, index: usize, column: &str) -> Option<&str> {
        self.get(domain_name)?.get(index)?.get(column)
    }

    pub fn contains(&self, domain: Domain) -> bool {
        self.domains.contains_key(&domain)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Domains with their rows, in classification-table order.
    pub fn iter(&self) -> impl Iterator<Item = (Domain, &[Record])> {
        self.domains
            .iter()
            .map(|(domain, records)| (*domain, records.as_slice()))
    }
}
