// src/export.rs
//! Writing aggregates out for the plotting side.

use csv::WriterBuilder;
use serde::Serialize;
use std::{
    fmt::Display,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};
use tracing::info;

use crate::analysis::WideTable;
use crate::error::Result;

/// Output encodings the exporters understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Json,
    Csv,
}

/// Where output goes: a file or stdout.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => Ok(Box::new(OutputFile::new(path))),
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// A file that is only created, along with its parent directories, on the
/// first write or flush. A command that fails before producing anything
/// leaves no file behind.
#[derive(Debug)]
pub struct OutputFile {
    path: PathBuf,
    file: Option<io::BufWriter<File>>,
}

impl OutputFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    fn file(&mut self) -> io::Result<&mut io::BufWriter<File>> {
        if self.file.is_none() {
            let with_path = |e: io::Error| {
                io::Error::new(e.kind(), format!("{}: {e}", self.path.display()))
            };
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(with_path)?;
            }
            let file = File::create(&self.path).map_err(with_path)?;
            info!(path = %self.path.display(), "writing output");
            self.file = Some(io::BufWriter::new(file));
        }
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::other("output file not open"))
    }
}

impl Write for OutputFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file()?.flush()
    }
}

pub fn write_json<T, W>(value: &T, mut out: W) -> Result<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// One CSV line per row: the row key, then one cell per column. Absent
/// cells are left empty.
pub fn write_wide_csv<R, C, W>(table: &WideTable<R, C>, out: W) -> Result<()>
where
    R: Ord + Clone + Display,
    C: Ord + Clone + Display,
    W: Write,
{
    let mut wtr = WriterBuilder::new().from_writer(out);

    let mut header = vec![String::new()];
    header.extend(table.columns().iter().map(ToString::to_string));
    wtr.write_record(&header)?;

    for (key, cells) in table.dense_rows() {
        let mut record = vec![key.to_string()];
        record.extend(
            cells
                .into_iter()
                .map(|c| c.map(|v| v.to_string()).unwrap_or_default()),
        );
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Flat records (one struct or tuple per line), header taken from the
/// field names when there are any.
pub fn write_records_csv<T, W>(rows: &[T], out: W) -> Result<()>
where
    T: Serialize,
    W: Write,
{
    let mut wtr = WriterBuilder::new().from_writer(out);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
