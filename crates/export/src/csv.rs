use serde::{Deserialize, Serialize, Serializer};
use standings_core::Entry;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

const HEADER: [&str; 4] = ["player", "points", "position", "award"];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Unexpected header: {0}")]
    BadHeader(String),
}

/// One line of the standings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub player: String,
    #[serde(serialize_with = "whole_when_possible")]
    pub points: f64,
    pub position: usize,
    pub award: u32,
}

impl From<&Entry> for TableRow {
    fn from(e: &Entry) -> Self {
        TableRow {
            player: e.player.clone(),
            points: e.points,
            position: e.position,
            award: e.award,
        }
    }
}

// Scores are almost always integers; don't print "5000.0".
fn whole_when_possible<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        s.serialize_i64(*v as i64)
    } else {
        s.serialize_f64(*v)
    }
}

/// Write entries, already in position order, as CSV. The header is always
/// written, even for an empty table.
pub fn write_table<W: Write>(entries: &[Entry], writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(HEADER)?;
    for entry in entries {
        wtr.serialize(TableRow::from(entry))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn table_to_bytes(entries: &[Entry]) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    write_table(entries, &mut buf)?;
    Ok(buf)
}

/// Write the table into a temporary file beside `path` and move it into
/// place, so a concurrent reader sees either the old file or the new one.
/// The temporary file is removed if anything fails.
pub fn write_table_to_path(entries: &[Entry], path: &Path) -> Result<(), ExportError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    write_table(entries, tmp.as_file_mut())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub fn read_table<R: Read>(data: R) -> Result<Vec<TableRow>, ExportError> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(data);
    let headers = rdr.headers()?;
    if headers.iter().ne(HEADER) {
        return Err(ExportError::BadHeader(headers.iter().collect::<Vec<_>>().join(",")));
    }
    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}
