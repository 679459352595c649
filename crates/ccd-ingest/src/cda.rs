//! Reading of HL7 CDA / CCD `ClinicalDocument` files.
//!
//! Only the top-level sections of the structured body are read:
//! `ClinicalDocument/component/structuredBody/component/section`.

use std::fs;
use std::path::Path;

use ccd_model::{DocumentSource, Section};
use ccd_text::Element;
use ccd_text::markup;
use tracing::debug;

use crate::error::IngestError;

/// A clinical document reduced to its coded sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CdaDocument {
    sections: Vec<Section>,
}

impl CdaDocument {
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let xml = fs::read_to_string(path).map_err(|err| IngestError::io(path, err))?;
        debug!(path = %path.display(), bytes = xml.len(), "read clinical document");
        Self::parse(&xml)
    }

    /// Parse a `ClinicalDocument` from XML text.
    ///
    /// The narrative table of each section is re-serialized so it can be
    /// handed to table extraction as a standalone fragment.
    pub fn parse(xml: &str) -> Result<Self, IngestError> {
        let root = markup::parse(xml)?.ok_or(IngestError::Empty)?;
        if !root.is("ClinicalDocument") {
            return Err(IngestError::NotClinicalDocument {
                root: root.name().to_string(),
            });
        }
        let body = root
            .children_named("component")
            .find_map(|component| component.child("structuredBody"))
            .ok_or(IngestError::MissingStructuredBody)?;

        let sections = body
            .children_named("component")
            .filter_map(|component| component.child("section"))
            .map(read_section)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(sections = sections.len(), "read structured body");
        Ok(Self { sections })
    }
}

impl DocumentSource for CdaDocument {
    type Section = Section;

    fn sections(&self) -> &[Section] {
        &self.sections
    }
}

fn read_section(section: &Element) -> Result<Section, IngestError> {
    let code = section
        .child("code")
        .and_then(|code| code.attribute("code"))
        .map(str::to_string);
    let title = section
        .child("title")
        .map(|title| title.text().trim().to_string());
    let table_markup = section
        .child("text")
        .and_then(|text| text.child("table"))
        .map(Element::to_markup)
        .transpose()?;
    Ok(Section {
        code,
        title,
        table_markup,
    })
}
