//! Report row building.
//!
//! A report row is the union of the input record's fields and the article's
//! metrics, laid out in the order of an [`OutputSchema`]. Metric values win
//! over input fields with the same column name; schema columns that neither
//! side fills are empty.

use std::fmt;

use serde::Serialize;
use serde::ser::SerializeMap;

use crate::metrics::{METRIC_COLUMNS, MetricRecord, MetricValue};

/// One row of the input table, fields in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputRecord {
    fields: Vec<(String, String)>,
}

impl InputRecord {
    /// Build a record from `(column, value)` pairs.
    pub fn new<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of `column`, if present.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find_map(|(k, v)| (k == column).then_some(v.as_str()))
    }

    /// Column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }
}

/// Ordered list of output column names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSchema {
    columns: Vec<String>,
}

impl OutputSchema {
    /// Schema with exactly these columns.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// The input columns followed by every metric column.
    ///
    /// Used when no expected output header is supplied.
    pub fn from_input_columns<I, S>(input_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut columns: Vec<String> = input_columns.into_iter().map(Into::into).collect();
        for metric in METRIC_COLUMNS {
            if !columns.iter().any(|c| c == metric) {
                columns.push(metric.to_string());
            }
        }
        Self { columns }
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// A single report cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// A value copied from the input record.
    Text(String),
    /// A computed metric.
    Metric(MetricValue),
    /// A schema column with no value.
    Empty,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Metric(v) => fmt::Display::fmt(v, f),
            Self::Empty => Ok(()),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Metric(v) => v.serialize(serializer),
            Self::Empty => serializer.serialize_str(""),
        }
    }
}

/// One report row; cells line up with the schema it was built for.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    cells: Vec<Cell>,
}

impl OutputRow {
    /// Cells in schema order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Pair this row with its schema for keyed serialization.
    pub const fn keyed<'a>(&'a self, schema: &'a OutputSchema) -> KeyedRow<'a> {
        KeyedRow { schema, row: self }
    }
}

/// A row serialized as a `{column: value}` map in schema order.
#[derive(Debug)]
pub struct KeyedRow<'a> {
    schema: &'a OutputSchema,
    row: &'a OutputRow,
}

impl Serialize for KeyedRow<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.schema.len()))?;
        for (column, cell) in self.schema.columns().iter().zip(self.row.cells()) {
            map.serialize_entry(column, cell)?;
        }
        map.end()
    }
}

/// Merge an input record and its metrics into a row shaped by `schema`.
pub fn build_row(schema: &OutputSchema, input: &InputRecord, metrics: &MetricRecord) -> OutputRow {
    let cells = schema
        .columns()
        .iter()
        .map(|column| {
            if let Some(value) = metrics.get(column) {
                Cell::Metric(value)
            } else if let Some(value) = input.get(column) {
                Cell::Text(value.to_string())
            } else {
                Cell::Empty
            }
        })
        .collect();
    OutputRow { cells }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> MetricRecord {
        MetricRecord {
            positive_score: 3,
            negative_score: 1,
            polarity_score: 0.25,
            subjectivity_score: 0.5,
            avg_sentence_length: 12.5,
            percentage_complex_words: 20.0,
            fog_index: 13.0,
            avg_words_per_sentence: 12.5,
            complex_word_count: 5,
            word_count: 25,
            syllables_per_word: 1.8,
            personal_pronouns: 2,
            avg_word_length: 6.2,
        }
    }

    fn input() -> InputRecord {
        InputRecord::new([
            ("URL_ID", "blackassign0001"),
            ("URL", "https://example.com/a"),
        ])
    }

    #[test]
    fn default_schema_appends_metrics() {
        let schema = OutputSchema::from_input_columns(input().columns());
        assert_eq!(schema.len(), 15);
        assert_eq!(schema.columns()[0], "URL_ID");
        assert_eq!(schema.columns()[2], "POSITIVE SCORE");
        assert_eq!(schema.columns()[14], "AVG WORD LENGTH");
    }

    #[test]
    fn row_follows_schema_order() {
        let schema = OutputSchema::new(["FOG INDEX", "URL_ID", "WORD COUNT"]);
        let row = build_row(&schema, &input(), &metrics());
        let rendered: Vec<String> = row.cells().iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["13", "blackassign0001", "25"]);
    }

    #[test]
    fn unknown_schema_columns_are_empty() {
        let schema = OutputSchema::new(["URL_ID", "NOTES"]);
        let row = build_row(&schema, &input(), &metrics());
        assert_eq!(row.cells()[1], Cell::Empty);
        assert_eq!(row.cells()[1].to_string(), "");
    }

    #[test]
    fn fields_outside_schema_are_dropped() {
        let schema = OutputSchema::new(["URL_ID"]);
        let row = build_row(&schema, &input(), &metrics());
        assert_eq!(row.cells().len(), 1);
    }

    #[test]
    fn metrics_override_input_columns() {
        let input = InputRecord::new([("URL_ID", "x"), ("WORD COUNT", "stale")]);
        let schema = OutputSchema::from_input_columns(input.columns());
        assert_eq!(schema.len(), 14);
        let row = build_row(&schema, &input, &metrics());
        assert_eq!(row.cells()[1], Cell::Metric(MetricValue::Count(25)));
    }

    #[test]
    fn keyed_row_serializes_in_schema_order() {
        let schema = OutputSchema::new(["URL_ID", "POLARITY SCORE", "NOTES"]);
        let row = build_row(&schema, &input(), &metrics());
        let json = serde_json::to_string(&row.keyed(&schema)).unwrap();
        assert_eq!(
            json,
            r#"{"URL_ID":"blackassign0001","POLARITY SCORE":0.25,"NOTES":""}"#
        );
    }
}
