use std::fs;
use std::io::{self, BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

use crate::app::CrawlReport;
use crate::domain::PathwayRecord;
use crate::error::CrawlError;

/// Spreadsheet tools need the byte-order mark to pick UTF-8.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub trait RecordSink {
    fn write(&self, records: &[PathwayRecord]) -> Result<(), CrawlError>;
}

impl<T: RecordSink + ?Sized> RecordSink for &T {
    fn write(&self, records: &[PathwayRecord]) -> Result<(), CrawlError> {
        (**self).write(records)
    }
}

#[derive(Debug, Clone)]
pub struct CsvFileSink {
    path: Utf8PathBuf,
}

impl CsvFileSink {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSink for CsvFileSink {
    /// Writes into a temp file next to the target and persists it over the
    /// target, so an existing file is replaced whole or not at all. The temp
    /// file is removed when any step fails.
    fn write(&self, records: &[PathwayRecord]) -> Result<(), CrawlError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        fs::create_dir_all(parent.as_std_path())
            .map_err(|err| CrawlError::Filesystem(err.to_string()))?;
        let temp = tempfile::Builder::new()
            .prefix(".kegg-crawl-")
            .suffix(".csv")
            .tempfile_in(parent.as_std_path())
            .map_err(|err| CrawlError::Filesystem(err.to_string()))?;

        let mut buffer = BufWriter::new(temp);
        buffer
            .write_all(UTF8_BOM)
            .map_err(|err| CrawlError::Filesystem(err.to_string()))?;

        let mut writer = csv::Writer::from_writer(buffer);
        for record in records {
            writer
                .serialize(record)
                .map_err(|err| CrawlError::Csv(err.to_string()))?;
        }
        let temp = writer
            .into_inner()
            .map_err(|err| CrawlError::Csv(err.to_string()))?
            .into_inner()
            .map_err(|err| CrawlError::Filesystem(err.to_string()))?;

        temp.persist(self.path.as_std_path())
            .map_err(|err| CrawlError::Filesystem(format!("persist {}: {err}", self.path)))?;
        Ok(())
    }
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_report(report: &CrawlReport) -> io::Result<()> {
        Self::print_json(report)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}
