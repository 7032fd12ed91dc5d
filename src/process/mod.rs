// src/process/mod.rs
pub mod normalize;
pub mod utils;

use csv::ReaderBuilder;
use std::{fs::File, io::Read, path::Path};
use tracing::{debug, trace};

use crate::error::Result;

pub use normalize::{normalize, RowPolicy};

#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Where the table came from; used to label errors and log lines.
    pub name: String,
    /// The file's first line, as the scraper wrote it. These are positional
    /// column numbers and carry no meaning; the real header is `rows[1]`.
    pub headers: Vec<String>,
    /// Every remaining line, one `Vec` of cells per line, in file order.
    pub rows: Vec<Vec<String>>,
}

/// Read one scraped CSV from disk, keeping every cell as text.
#[tracing::instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_raw_table<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    read_raw_table(&name, file)
}

/// Parse a scraped CSV from any reader. Rows may differ in width; trailing
/// columns the canonical schema does not use are kept here and dropped later.
pub fn read_raw_table<R: Read>(name: &str, reader: R) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // seasons differ by a few trailing columns
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result?;
        trace!(table = name, idx, width = record.len(), "raw row");
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!(table = name, rows = rows.len(), "loaded raw table");
    Ok(RawTable {
        name: name.to_string(),
        headers,
        rows,
    })
}
