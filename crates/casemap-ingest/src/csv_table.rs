use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use crate::error::{IngestError, Result};

/// A header row plus raw cell text, as read from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn normalize_header(raw: &str) -> String {
    raw.trim_matches('\u{feff}').trim().to_string()
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

fn parse_error(path: &Path, error: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

/// Read a CSV file with a header row.
///
/// Headers are trimmed and lose any byte-order mark. Cell text is kept
/// verbatim; rows whose cells are all empty are dropped and short rows are
/// padded to the header width.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let file = open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| parse_error(path, &e))?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| parse_error(path, &e))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let mut row: Vec<String> = record.iter().map(String::from).collect();
        row.resize(headers.len().max(row.len()), String::new());
        rows.push(row);
    }
    tracing::debug!(
        path = %path.display(),
        column_count = headers.len(),
        row_count = rows.len(),
        "read csv"
    );
    Ok(CsvTable { headers, rows })
}

/// Write a header and rows to `path`, replacing any existing file.
pub fn write_csv_table<I>(path: &Path, headers: &[String], rows: I) -> Result<()>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let file = File::create(path).map_err(|source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = WriterBuilder::new().from_writer(file);
    let write_error = |e: csv::Error| IngestError::CsvWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    writer.write_record(headers).map_err(write_error)?;
    for row in rows {
        writer.write_record(&row).map_err(write_error)?;
    }
    writer.flush().map_err(|source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
