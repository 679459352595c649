//! Tests for ccd-model types.

use ccd_model::{DOMAIN_CODES, Domain, DomainStore, Record, Section, SectionSource};

fn record(cells: &[(&str, &str)]) -> Record {
    cells.iter().copied().collect()
}

#[test]
fn every_table_code_resolves_to_its_domain() {
    let expected = [
        ("11450-4", "Problems"),
        ("10160-0", "Medications"),
        ("48765-2", "Allergies"),
        ("11369-6", "Immunizations"),
        ("8716-3", "Vitals"),
        ("47519-4", "Procedures"),
        ("46240-8", "Encounters"),
        ("48768-6", "Insurances"),
        ("30954-2", "Labs"),
    ];
    assert_eq!(DOMAIN_CODES.len(), expected.len());
    for (code, name) in expected {
        let domain = Domain::from_code(code).expect("known code");
        assert_eq!(domain.name(), name);
        assert_eq!(domain.to_string(), name);
    }
}

#[test]
fn other_codes_are_absent() {
    for code in ["10164-2", "29762-2", "48765", "48765-2 ", "Allergies"] {
        assert_eq!(Domain::from_code(code), None, "code {code}");
    }
}

#[test]
fn store_field_lookup() {
    let mut store = DomainStore::new();
    store.insert(
        Domain::Allergies,
        vec![
            record(&[("Substance", "Penicillin"), ("Reaction", "Hives")]),
            record(&[("Substance", "Codeine"), ("Reaction", "Nausea")]),
        ],
    );

    assert_eq!(store.field("Allergies", 1, "Reaction"), Some("Nausea"));
    assert_eq!(store.field("Allergies", 5, "Missing"), None);
    assert_eq!(store.field("Allergies", 0, "Missing"), None);
    assert_eq!(store.field("Medications", 0, "Substance"), None);
    assert_eq!(store.field("allergies", 0, "Substance"), None);
}

#[test]
fn store_insert_replaces_previous_rows() {
    let mut store = DomainStore::new();
    store.insert(Domain::Allergies, vec![record(&[("A", "1")])]);
    let previous = store.insert(Domain::Allergies, vec![record(&[("B", "2")])]);

    assert_eq!(previous, Some(vec![record(&[("A", "1")])]));
    assert_eq!(store.len(), 1);
    assert_eq!(store.field("Allergies", 0, "A"), None);
    assert_eq!(store.field("Allergies", 0, "B"), Some("2"));
}

#[test]
fn store_iterates_in_table_order() {
    let mut store = DomainStore::new();
    store.insert(Domain::Labs, Vec::new());
    store.insert(Domain::Problems, Vec::new());
    store.insert(Domain::Vitals, Vec::new());

    let order: Vec<Domain> = store.iter().map(|(domain, _)| domain).collect();
    assert_eq!(order, vec![Domain::Problems, Domain::Vitals, Domain::Labs]);
}

#[test]
fn store_serializes_by_display_name_in_column_order() {
    let mut store = DomainStore::new();
    store.insert(
        Domain::Medications,
        vec![record(&[("Name", "Aspirin"), ("Dose", "81mg")])],
    );

    let json = serde_json::to_string(&store).expect("serialize store");
    assert_eq!(json, r#"{"Medications":[{"Name":"Aspirin","Dose":"81mg"}]}"#);
}

#[test]
fn owned_section_accessors() {
    let section = Section::new("8716-3", "<table/>").with_title("Vital Signs");
    assert_eq!(section.code(), Some("8716-3"));
    assert_eq!(section.table_markup().as_deref(), Some("<table/>"));
    assert_eq!(section.title.as_deref(), Some("Vital Signs"));

    let empty = Section::default();
    assert_eq!(empty.code(), None);
    assert!(empty.table_markup().is_none());
}
