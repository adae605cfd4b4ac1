//! Input tables, header schema files, and report writers.
//!
//! Tables are CSV unless the path ends in `.xlsx`, in which case the first
//! worksheet of an Excel workbook is used.

use std::fs::File;
use std::io::{BufWriter, Write};

use calamine::{Data, Reader, Xlsx};
use camino::{Utf8Path, Utf8PathBuf};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::debug;

use crate::error::{TableError, TableResult};
use crate::metrics::MetricValue;
use crate::report::{Cell, InputRecord, KeyedRow, OutputRow, OutputSchema};

/// A parsed input table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputTable {
    /// Where the table was read from.
    pub source: Utf8PathBuf,
    /// Header row, in order.
    pub columns: Vec<String>,
    /// Data rows, in file order.
    pub records: Vec<InputRecord>,
}

impl InputTable {
    /// Fail unless the header contains `column`.
    pub fn require_column(&self, column: &str) -> TableResult<()> {
        if self.columns.iter().any(|c| c == column) {
            Ok(())
        } else {
            Err(TableError::MissingColumn {
                path: self.source.clone(),
                column: column.to_string(),
            })
        }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Whether `path` names an Excel workbook (`.xlsx`, any case).
pub fn is_workbook(path: &Utf8Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"))
}

/// Read a table with a header row from `path`: a workbook or CSV.
pub fn read_input(path: &Utf8Path) -> TableResult<InputTable> {
    if is_workbook(path) {
        return read_workbook_input(path);
    }
    let content = std::fs::read_to_string(path.as_std_path()).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_input(&content, path)
}

/// Parse CSV `content`; `source` is only used for error messages.
///
/// Short rows are padded with empty fields; extra fields beyond the header
/// are ignored.
#[tracing::instrument(skip_all, fields(source = %source))]
pub fn parse_input(content: &str, source: &Utf8Path) -> TableResult<InputTable> {
    let csv_err = |e: csv::Error| TableError::Csv {
        path: source.to_path_buf(),
        source: e,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(clean_header)
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(csv_err)?;
        let fields = columns
            .iter()
            .enumerate()
            .map(|(i, column)| (column.clone(), row.get(i).unwrap_or_default().to_string()));
        records.push(InputRecord::new(fields));
    }

    debug!(columns = columns.len(), rows = records.len(), "input table parsed");
    Ok(InputTable {
        source: source.to_path_buf(),
        columns,
        records,
    })
}

/// Read the first worksheet of an `.xlsx` workbook as an input table.
///
/// The first row is the header. Rows with no values are skipped and numeric
/// cells are rendered without a trailing `.0` (`37`, not `37.0`).
#[tracing::instrument(skip_all, fields(path = %path))]
pub fn read_workbook_input(path: &Utf8Path) -> TableResult<InputTable> {
    let workbook_err = |e: calamine::XlsxError| TableError::WorkbookRead {
        path: path.to_path_buf(),
        source: e,
    };

    let mut workbook: Xlsx<_> = calamine::open_workbook(path.as_std_path()).map_err(workbook_err)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| TableError::EmptyWorkbook(path.to_path_buf()))?
        .map_err(workbook_err)?;

    let mut rows = range.rows();
    let columns: Vec<String> = rows
        .next()
        .map(|header| header.iter().map(|c| clean_header(&c.to_string())).collect())
        .unwrap_or_default();

    let records: Vec<InputRecord> = rows
        .filter(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|row| {
            InputRecord::new(columns.iter().enumerate().map(|(i, column)| {
                let value = row.get(i).map(ToString::to_string).unwrap_or_default();
                (column.clone(), value)
            }))
        })
        .collect();

    debug!(columns = columns.len(), rows = records.len(), "workbook table read");
    Ok(InputTable {
        source: path.to_path_buf(),
        columns,
        records,
    })
}

/// Read an output header from the first line of `path`.
pub fn read_schema(path: &Utf8Path) -> TableResult<OutputSchema> {
    let content = std::fs::read_to_string(path.as_std_path()).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_schema(&content, path)
}

/// Parse an output header: the first line split on `,`, each name trimmed.
pub fn parse_schema(content: &str, source: &Utf8Path) -> TableResult<OutputSchema> {
    let first = content.lines().next().unwrap_or_default();
    let columns: Vec<String> = first.split(',').map(clean_header).collect();
    if columns.iter().all(String::is_empty) {
        return Err(TableError::EmptySchema(source.to_path_buf()));
    }
    Ok(OutputSchema::new(columns))
}

fn clean_header(name: &str) -> String {
    name.trim_start_matches('\u{feff}').trim().to_string()
}

/// Write `rows` as CSV with `schema` as the header row.
#[tracing::instrument(skip_all, fields(path = %path, rows = rows.len()))]
pub fn write_csv(path: &Utf8Path, schema: &OutputSchema, rows: &[OutputRow]) -> TableResult<()> {
    let csv_err = |e: csv::Error| TableError::Csv {
        path: path.to_path_buf(),
        source: e,
    };

    let file = create_output(path)?;
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(schema.columns()).map_err(csv_err)?;
    for row in rows {
        writer
            .write_record(row.cells().iter().map(ToString::to_string))
            .map_err(csv_err)?;
    }
    writer.flush().map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("csv report written");
    Ok(())
}

/// Write the report as a workbook for `.xlsx` paths, CSV otherwise.
pub fn write_report(path: &Utf8Path, schema: &OutputSchema, rows: &[OutputRow]) -> TableResult<()> {
    if is_workbook(path) {
        write_workbook(path, schema, rows)
    } else {
        write_csv(path, schema, rows)
    }
}

/// Write `rows` to a single-sheet workbook with a bold header row.
///
/// Metrics are stored as numbers, input values as text, and empty cells are
/// left blank.
#[tracing::instrument(skip_all, fields(path = %path, rows = rows.len()))]
pub fn write_workbook(path: &Utf8Path, schema: &OutputSchema, rows: &[OutputRow]) -> TableResult<()> {
    let xlsx_err = |e: XlsxError| TableError::WorkbookWrite {
        path: path.to_path_buf(),
        source: e,
    };

    create_parent_dir(path)?;
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    for (col, name) in (0_u16..).zip(schema.columns()) {
        sheet
            .write_string_with_format(0, col, name, &bold)
            .map_err(xlsx_err)?;
    }
    for (row_num, row) in (1_u32..).zip(rows) {
        for (col, cell) in (0_u16..).zip(row.cells()) {
            write_cell(sheet, row_num, col, cell).map_err(xlsx_err)?;
        }
    }
    workbook.save(path.as_std_path()).map_err(xlsx_err)?;
    debug!("workbook report written");
    Ok(())
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, cell: &Cell) -> Result<(), XlsxError> {
    match cell {
        Cell::Text(text) => sheet.write_string(row, col, text)?,
        Cell::Metric(MetricValue::Count(n)) => sheet.write_number(row, col, *n as f64)?,
        Cell::Metric(MetricValue::Score(x)) if x.is_finite() => sheet.write_number(row, col, *x)?,
        Cell::Metric(value) => sheet.write_string(row, col, value.to_string())?,
        Cell::Empty => return Ok(()),
    };
    Ok(())
}

/// Write `rows` as a JSON array of `{column: value}` objects.
#[tracing::instrument(skip_all, fields(path = %path, rows = rows.len()))]
pub fn write_json(path: &Utf8Path, schema: &OutputSchema, rows: &[OutputRow]) -> TableResult<()> {
    let keyed: Vec<KeyedRow<'_>> = rows.iter().map(|row| row.keyed(schema)).collect();
    let mut writer = BufWriter::new(create_output(path)?);
    serde_json::to_writer_pretty(&mut writer, &keyed).map_err(|source| TableError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("json report written");
    Ok(())
}

fn create_parent_dir(path: &Utf8Path) -> TableResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent.as_std_path()).map_err(|source| TableError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

fn create_output(path: &Utf8Path) -> TableResult<File> {
    create_parent_dir(path)?;
    File::create(path.as_std_path()).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })
}
