//! Clinical domains recognized in a CCD structured body.
//!
//! Each narrative section of a Continuity of Care Document carries a LOINC
//! section code (`section/code/@code`). Only the nine codes listed in
//! [`DOMAIN_CODES`] are extracted; every other section is ignored.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Clinical domain extracted from a CCD section.
///
/// Variants are declared in classification-table order, which is also the
/// iteration order of a [`DomainStore`](crate::DomainStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Domain {
    /// Problem list (LOINC 11450-4).
    Problems,
    /// Medications (LOINC 10160-0).
    Medications,
    /// Allergies, adverse reactions, alerts (LOINC 48765-2).
    Allergies,
    /// Immunizations (LOINC 11369-6).
    Immunizations,
    /// Vital signs (LOINC 8716-3).
    Vitals,
    /// Procedures (LOINC 47519-4).
    Procedures,
    /// Encounters (LOINC 46240-8).
    Encounters,
    /// Payers (LOINC 48768-6).
    Insurances,
    /// Results (LOINC 30954-2).
    Labs,
}

/// Section code to domain classification table.
pub const DOMAIN_CODES: [(&str, Domain); 9] = [
    ("11450-4", Domain::Problems),
    ("10160-0", Domain::Medications),
    ("48765-2", Domain::Allergies),
    ("11369-6", Domain::Immunizations),
    ("8716-3", Domain::Vitals),
    ("47519-4", Domain::Procedures),
    ("46240-8", Domain::Encounters),
    ("48768-6", Domain::Insurances),
    ("30954-2", Domain::Labs),
];

impl Domain {
    /// All domains in classification-table order.
    pub const ALL: [Domain; 9] = [
        Domain::Problems,
        Domain::Medications,
        Domain::Allergies,
        Domain::Immunizations,
        Domain::Vitals,
        Domain::Procedures,
        Domain::Encounters,
        Domain::Insurances,
        Domain::Labs,
    ];

    /// Resolve a section code to its domain.
    ///
    /// Codes are matched exactly; unknown codes return `None`.
    pub fn from_code(code: &str) -> Option<Domain> {
        DOMAIN_CODES
            .iter()
            .find(|(candidate, _)| *candidate == code)
            .map(|(_, domain)| *domain)
    }

    /// Resolve a display name (`"Allergies"`) to its domain. Case-sensitive.
    pub fn from_name(name: &str) -> Option<Domain> {
        Self::ALL.into_iter().find(|domain| domain.name() == name)
    }

    /// Returns the LOINC section code for this domain.
    pub fn code(&self) -> &'static str {
        match self {
            Domain::Problems => "11450-4",
            Domain::Medications => "10160-0",
            Domain::Allergies => "48765-2",
            Domain::Immunizations => "11369-6",
            Domain::Vitals => "8716-3",
            Domain::Procedures => "47519-4",
            Domain::Encounters => "46240-8",
            Domain::Insurances => "48768-6",
            Domain::Labs => "30954-2",
        }
    }

    /// Returns the display name used as the store key.
    pub fn name(&self) -> &'static str {
        match self {
            Domain::Problems => "Problems",
            Domain::Medications => "Medications",
            Domain::Allergies => "Allergies",
            Domain::Immunizations => "Immunizations",
            Domain::Vitals => "Vitals",
            Domain::Procedures => "Procedures",
            Domain::Encounters => "Encounters",
            Domain::Insurances => "Insurances",
            Domain::Labs => "Labs",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Domain {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Domain::from_name(s).ok_or_else(|| ModelError::UnknownDomain {
            name: s.to_string(),
        })
    }
}
