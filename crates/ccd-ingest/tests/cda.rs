//! Tests for ClinicalDocument ingestion.

use std::fs;

use ccd_ingest::{CdaDocument, IngestError};
use ccd_model::{DocumentSource, SectionSource};
use ccd_text::{CcdText, CollectingSink, parse_table};

const CCD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<?xml-stylesheet type="text/xsl" href="CDA.xsl"?>
<ClinicalDocument xmlns="urn:hl7-org:v3" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <templateId root="2.16.840.1.113883.10.20.22.1.2"/>
  <title>Continuity of Care Document</title>
  <recordTarget>
    <patientRole><id extension="998991" root="2.16.840.1.113883.4.6"/></patientRole>
  </recordTarget>
  <component>
    <structuredBody>
      <component>
        <section>
          <templateId root="2.16.840.1.113883.10.20.22.2.6.1"/>
          <code code="48765-2" codeSystem="2.16.840.1.113883.6.1"/>
          <title>ALLERGIES, ADVERSE REACTIONS, ALERTS</title>
          <text>
            <table border="1" width="100%">
              <thead>
                <tr><th>Substance</th><th>Reaction</th><th>Status</th></tr>
              </thead>
              <tbody>
                <tr>
                  <td>Penicillin G benzathine</td>
                  <td><content ID="reaction1">Hives</content></td>
                  <td>Active</td>
                </tr>
                <tr>
                  <td>Codeine &amp; derivatives</td>
                  <td><content ID="reaction2">Shortness of Breath</content></td>
                  <td>Active</td>
                </tr>
              </tbody>
            </table>
          </text>
        </section>
      </component>
      <component>
        <section>
          <code code="29545-1" codeSystem="2.16.840.1.113883.6.1"/>
          <title>PHYSICAL EXAM</title>
          <text>
            <table><thead><tr><th>Finding</th></tr></thead>
            <tbody><tr><td>Normal</td></tr></tbody></table>
          </text>
        </section>
      </component>
      <component>
        <section>
          <code code="11450-4" codeSystem="2.16.840.1.113883.6.1"/>
          <title>PROBLEMS</title>
          <text><paragraph>No known problems.</paragraph></text>
        </section>
      </component>
      <component>
        <section>
          <code code="8716-3" codeSystem="2.16.840.1.113883.6.1"/>
          <title>VITAL SIGNS</title>
          <text>
            <table>
              <thead><tr><td>Date</td><td>Height</td><td>Weight</td></tr></thead>
              <tbody><tr><td>2012-10-10</td><td>177 cm</td><td>86 kg</td></tr></tbody>
            </table>
          </text>
        </section>
      </component>
    </structuredBody>
  </component>
</ClinicalDocument>
"#;

#[test]
fn reads_top_level_sections_in_order() {
    let document = CdaDocument::parse(CCD).unwrap();
    let codes: Vec<Option<&str>> = document.sections().iter().map(|s| s.code()).collect();
    assert_eq!(
        codes,
        vec![Some("48765-2"), Some("29545-1"), Some("11450-4"), Some("8716-3")]
    );
    assert_eq!(
        document.sections()[0].title.as_deref(),
        Some("ALLERGIES, ADVERSE REACTIONS, ALERTS")
    );
    assert!(document.sections()[2].table_markup().is_none());
}

#[test]
fn serialized_table_is_a_standalone_fragment() {
    let document = CdaDocument::parse(CCD).unwrap();
    let markup = document.sections()[0].table_markup().unwrap();
    assert!(markup.starts_with("<table"));
    let records = parse_table(&markup).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].get("Substance"), Some("Codeine & derivatives"));
}

#[test]
fn end_to_end_field_queries() {
    let document = CdaDocument::parse(CCD).unwrap();
    let mut ccd = CcdText::with_sink(CollectingSink::new());
    let store = ccd.set_document(&document);

    assert_eq!(store.len(), 2);
    assert_eq!(
        ccd.get_field_or_empty("Allergies", 1, "Reaction"),
        "Shortness of Breath"
    );
    assert_eq!(ccd.get_field_or_empty("Vitals", 0, "Weight"), "86 kg");
    assert_eq!(ccd.get_field_or_empty("Problems", 0, "Problem"), "");
    assert!(ccd.sink().is_empty());
}

#[test]
fn reads_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ccd.xml");
    fs::write(&path, CCD).unwrap();

    let document = CdaDocument::from_path(&path).unwrap();
    assert_eq!(document.sections().len(), 4);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = CdaDocument::from_path(&dir.path().join("missing.xml")).unwrap_err();
    assert!(matches!(err, IngestError::Io { .. }));
}

#[test]
fn rejects_other_root_elements() {
    let err = CdaDocument::parse("<ODM><ClinicalData/></ODM>").unwrap_err();
    assert!(matches!(err, IngestError::NotClinicalDocument { root } if root == "ODM"));
}

#[test]
fn rejects_document_without_structured_body() {
    let err = CdaDocument::parse(
        "<ClinicalDocument><component><nonXMLBody/></component></ClinicalDocument>",
    )
    .unwrap_err();
    assert!(matches!(err, IngestError::MissingStructuredBody));
}

#[test]
fn malformed_document_is_a_markup_error() {
    let err = CdaDocument::parse("<ClinicalDocument><component></ClinicalDocument>").unwrap_err();
    assert!(matches!(err, IngestError::Markup(_)));
}

#[test]
fn empty_document_is_rejected() {
    assert!(matches!(CdaDocument::parse("  "), Err(IngestError::Empty)));
}
