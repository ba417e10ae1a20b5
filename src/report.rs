use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{error, info};

use crate::models::ObjectRecord;

/// Base name of the report file inside the output directory
pub const REPORT_BASENAME: &str = "astronomical_object_stats";

/// Column titles of the tabular report
pub const REPORT_HEADER: [&str; 8] = [
    "Image",
    "part number",
    "X Coordinate",
    "Y Coordinate",
    "brightness",
    "Object Type",
    "Area",
    "Radius",
];

/// Persists the complete record set at the end of a run
pub trait ReportWriter {
    /// Write all records; returns the path written
    fn write_report(&self, records: &[ObjectRecord]) -> Result<PathBuf>;

    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }

    /// Writer for this format, targeting `<output_dir>/astronomical_object_stats.<ext>`
    pub fn writer(&self, output_dir: &Path) -> Box<dyn ReportWriter> {
        let path = output_dir.join(format!("{}.{}", REPORT_BASENAME, self.extension()));
        match self {
            ReportFormat::Csv => Box::new(CsvReport::new(path)),
            ReportFormat::Json => Box::new(JsonReport::new(path)),
        }
    }
}

/// Comma-separated report with a fixed header row
#[derive(Debug, Clone)]
pub struct CsvReport {
    path: PathBuf,
}

impl CsvReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportWriter for CsvReport {
    fn write_report(&self, records: &[ObjectRecord]) -> Result<PathBuf> {
        let mut wtr = csv::Writer::from_path(&self.path)
            .with_context(|| format!("cannot create {}", self.path.display()))?;

        wtr.write_record(REPORT_HEADER)?;
        for r in records {
            wtr.write_record([
                r.image_name.clone(),
                r.tile_index.to_string(),
                r.x.to_string(),
                r.y.to_string(),
                r.brightness.to_string(),
                r.object_type.to_string(),
                r.area.to_string(),
                r.radius.to_string(),
            ])?;
        }
        wtr.flush()?;

        Ok(self.path.clone())
    }

    fn name(&self) -> &str {
        "CSV report"
    }
}

/// Pretty-printed JSON array of records
#[derive(Debug, Clone)]
pub struct JsonReport {
    path: PathBuf,
}

impl JsonReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportWriter for JsonReport {
    fn write_report(&self, records: &[ObjectRecord]) -> Result<PathBuf> {
        let file = File::create(&self.path)
            .with_context(|| format!("cannot create {}", self.path.display()))?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, records)?;
        out.flush()?;
        Ok(self.path.clone())
    }

    fn name(&self) -> &str {
        "JSON report"
    }
}

/// Write the report, logging instead of failing. Returns the written path
/// on success; on failure the caller still holds `records` and may retry.
pub fn persist_report(writer: &dyn ReportWriter, records: &[ObjectRecord]) -> Option<PathBuf> {
    match writer.write_report(records) {
        Ok(path) => {
            info!("Statistics saved to {}", path.display());
            Some(path)
        }
        Err(e) => {
            error!("Failed to save report file: {:#}", e);
            None
        }
    }
}
