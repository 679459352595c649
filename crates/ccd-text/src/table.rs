//! Narrative table to record conversion.
//!
//! A CCD narrative table has a `thead` holding one header row and any number
//! of `tbody` sections holding data rows. Header cell text names the columns;
//! body cells are assigned to columns by position.

use std::collections::HashMap;

use ccd_model::{Record, RecordSequence};
use tracing::trace;

use crate::diagnostics::{DiagnosticSink, ParseFailure, TracingSink};
use crate::markup::{self, Element, MarkupError};

/// Header cell tags, in the order they are tried. The first tag that yields
/// any cells is used for the whole header row.
const HEADER_CELL_TAGS: [&str; 2] = ["td", "th"];

const BODY_CELL_TAG: &str = "td";

/// Positional column names taken from a header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnIndex {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    /// Build the index from a header row, or `None` if the row has no cells.
    pub fn from_header(row: &Element) -> Option<Self> {
        let cells: Vec<&Element> = HEADER_CELL_TAGS
            .iter()
            .map(|tag| row.children_named(tag).collect::<Vec<_>>())
            .find(|cells| !cells.is_empty())?;
        Some(cells.into_iter().map(|cell| cell.text().trim().to_string()).collect())
    }

    pub fn name_at(&self, position: usize) -> Option<&str> {
        self.names.get(position).map(String::as_str)
    }

    /// Position of a column name. A repeated name resolves to its last position.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Build a record from a body row. Cells past the last column are dropped.
    pub fn record(&self, row: &Element) -> Record {
        let mut record = Record::new();
        for (position, cell) in row.children_named(BODY_CELL_TAG).enumerate() {
            let Some(column) = self.name_at(position) else {
                break;
            };
            record.insert(column, cell.text().trim());
        }
        record
    }
}

impl FromIterator<String> for ColumnIndex {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut index = ColumnIndex::default();
        for name in iter {
            index.positions.insert(name.clone(), index.names.len());
            index.names.push(name);
        }
        index
    }
}

/// First row of the first `thead` that has one.
pub fn header_row(table: &Element) -> Option<&Element> {
    table
        .children_named("thead")
        .flat_map(|head| head.children_named("tr"))
        .next()
}

/// Convert an already parsed `table` element into records.
pub fn records_from_table(table: &Element) -> RecordSequence {
    let Some(columns) = header_row(table).and_then(ColumnIndex::from_header) else {
        trace!(element = table.name(), "table has no header cells");
        return Vec::new();
    };
    table
        .children_named("tbody")
        .flat_map(|body| body.children_named("tr"))
        .map(|row| columns.record(row))
        .collect()
}

/// Parse table markup into records, surfacing markup errors.
pub fn parse_table(markup: &str) -> Result<RecordSequence, MarkupError> {
    Ok(markup::parse(markup)?
        .map(|table| records_from_table(&table))
        .unwrap_or_default())
}

/// Converts table markup into records, reporting failures to a sink.
#[derive(Debug, Clone, Default)]
pub struct TableExtractor<D = TracingSink> {
    sink: D,
}

impl TableExtractor<TracingSink> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: DiagnosticSink> TableExtractor<D> {
    pub fn with_sink(sink: D) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    /// Extract records from table markup.
    ///
    /// Malformed markup is reported to the sink and yields no records. A
    /// table without header or body rows yields no records and no report.
    pub fn extract(&self, markup: &str) -> RecordSequence {
        match parse_table(markup) {
            Ok(records) => records,
            Err(error) => {
                self.sink.report(&ParseFailure {
                    markup: markup.to_string(),
                    error,
                });
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(markup: &str) -> Element {
        markup::parse(markup).unwrap().unwrap()
    }

    #[test]
    fn primary_tag_wins_over_alternate() {
        let header = row("<tr><th>Ignored</th><td>Name</td><td>Dose</td></tr>");
        let columns = ColumnIndex::from_header(&header).unwrap();
        assert_eq!(columns.names(), ["Name", "Dose"]);
    }

    #[test]
    fn alternate_tag_used_when_no_primary_cells() {
        let header = row("<tr><th> Name </th><th>Dose</th></tr>");
        let columns = ColumnIndex::from_header(&header).unwrap();
        assert_eq!(columns.names(), ["Name", "Dose"]);
        assert_eq!(columns.position("Dose"), Some(1));
    }

    #[test]
    fn header_without_cells_has_no_index() {
        assert_eq!(ColumnIndex::from_header(&row("<tr/>")), None);
    }

    #[test]
    fn duplicate_names_resolve_to_last_position() {
        let header = row("<tr><td>Date</td><td>Value</td><td>Date</td></tr>");
        let columns = ColumnIndex::from_header(&header).unwrap();
        assert_eq!(columns.len(), 3);
        assert_eq!(columns.position("Date"), Some(2));
        assert_eq!(columns.name_at(0), Some("Date"));
    }

    #[test]
    fn record_drops_excess_cells() {
        let columns: ColumnIndex = ["A".to_string()].into_iter().collect();
        let record = columns.record(&row("<tr><td>1</td><td>2</td></tr>"));
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("A"), Some("1"));
    }
}
