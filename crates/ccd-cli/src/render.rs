//! Terminal and JSON rendering of extracted domains.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use std::collections::BTreeMap;

use ccd_model::{DOMAIN_CODES, Domain, DomainStore, Record, Section};

/// Classification table: section code to domain.
pub fn domains_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Code"), header_cell("Domain")]);
    apply_table_style(&mut table);
    for (code, domain) in DOMAIN_CODES {
        table.add_row(vec![Cell::new(code), domain_cell(domain)]);
    }
    table
}

/// One line per extracted domain with its section title and row and column counts.
pub fn summary_table(store: &DomainStore, sections: &[Section]) -> Table {
    let titles = section_titles(sections);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Domain"),
        header_cell("Code"),
        header_cell("Title"),
        header_cell("Records"),
        header_cell("Columns"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    let mut total_records = 0usize;
    for (domain, records) in store.iter() {
        total_records += records.len();
        table.add_row(vec![
            domain_cell(domain),
            Cell::new(domain.code()),
            Cell::new(titles.get(&domain).copied().unwrap_or_default()),
            Cell::new(records.len()),
            Cell::new(column_names(records).join(", ")),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        Cell::new(total_records).add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);
    table
}

/// Title of the section each domain was taken from. A later section with the
/// same domain replaces an earlier one, matching extraction.
pub fn section_titles(sections: &[Section]) -> BTreeMap<Domain, &str> {
    let mut titles = BTreeMap::new();
    for section in sections {
        let Some(domain) = section.code.as_deref().and_then(Domain::from_code) else {
            continue;
        };
        let has_table = section
            .table_markup
            .as_deref()
            .is_some_and(|markup| !markup.trim().is_empty());
        if !has_table {
            continue;
        }
        match section.title.as_deref() {
            Some(title) => titles.insert(domain, title),
            None => titles.remove(&domain),
        };
    }
    titles
}

/// Rows of one domain, one column per distinct header name.
pub fn records_table(records: &[Record]) -> Table {
    let columns = column_names(records);
    let mut table = Table::new();
    let mut header = vec![header_cell("#")];
    header.extend(columns.iter().map(|name| header_cell(name)));
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, record) in records.iter().enumerate() {
        let mut row = vec![dim_cell(index)];
        row.extend(
            columns
                .iter()
                .map(|name| Cell::new(record.get(name).unwrap_or_default())),
        );
        table.add_row(row);
    }
    table
}

/// Column names across all records, in first-seen order.
pub fn column_names(records: &[Record]) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for column in records.iter().flat_map(Record::columns) {
        if !names.contains(&column) {
            names.push(column);
        }
    }
    names
}

/// Store restricted to a single domain, if it was extracted.
pub fn select_domain(store: &DomainStore, domain: Domain) -> DomainStore {
    let mut selected = DomainStore::new();
    if let Some(records) = store.get_domain(domain) {
        selected.insert(domain, records.to_vec());
    }
    selected
}

pub fn to_json(store: &DomainStore) -> serde_json::Result<String> {
    serde_json::to_string_pretty(store)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn domain_cell(domain: Domain) -> Cell {
    Cell::new(domain.name())
        .fg(Color::Green)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}
