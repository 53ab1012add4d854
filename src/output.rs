//! Output formatting and export for route analyses.
//!
//! Supports a plain-text report, JSON, and CSV export of note tallies. None
//! of the analysis code depends on this module; callers pick a
//! [`ReportSink`] and hand it finished results.

use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::analyzers::types::{AssignmentResult, NoteFrequency, RouteAnalysis};
use crate::file_info::FileInfo;
use csv::WriterBuilder;

/// Receives finished results for presentation.
pub trait ReportSink {
    fn analysis(&mut self, file: Option<&FileInfo>, analysis: &RouteAnalysis) -> Result<()>;
    fn assignment(&mut self, result: &AssignmentResult) -> Result<()>;
}

/// Human-readable report.
pub struct TextReport<W: Write>(W);

impl<W: Write> TextReport<W> {
    pub fn new(writer: W) -> Self {
        Self(writer)
    }

    pub fn into_inner(self) -> W {
        self.0
    }
}

impl<W: Write> ReportSink for TextReport<W> {
    fn analysis(&mut self, file: Option<&FileInfo>, analysis: &RouteAnalysis) -> Result<()> {
        let out = &mut self.0;

        if let Some(file) = file {
            writeln!(out, "File Name: {}", file.name)?;
            writeln!(out, "File Size: {}", format_file_size(file.size_bytes))?;
            if let Some(modified) = file.last_modified {
                writeln!(
                    out,
                    "Last Modified: {}",
                    modified.format("%Y-%m-%d %H:%M:%S UTC")
                )?;
            }
            writeln!(out)?;
        }

        writeln!(out, "Total Records: {}", analysis.total_record_count())?;
        writeln!(out, "Unique Notes: {}", analysis.unique_note_count())?;

        if !analysis.note_frequencies.is_empty() {
            writeln!(out)?;
            write_table(out, &analysis.note_frequencies, "")?;
        }

        Ok(())
    }

    fn assignment(&mut self, result: &AssignmentResult) -> Result<()> {
        let out = &mut self.0;

        writeln!(out, "Driver Assignment Result")?;
        writeln!(
            out,
            "{} will stop at Stop Number: {}",
            result.original_driver, result.split_stop_number
        )?;
        writeln!(
            out,
            "{} will take {} papers from that point onwards.",
            result.helper_name, result.papers_to_take
        )?;

        if !result.helper_note_frequencies.is_empty() {
            writeln!(out)?;
            writeln!(out, "Newspapers {} needs to take:", result.helper_name)?;
            write_table(out, &result.helper_note_frequencies, "  ")?;
        }

        Ok(())
    }
}

fn write_table<W: Write>(out: &mut W, table: &[NoteFrequency], indent: &str) -> Result<()> {
    let width = table
        .iter()
        .map(|f| f.note.chars().count())
        .max()
        .unwrap_or(0);

    for f in table {
        writeln!(out, "{indent}{:<width$}  {}", f.note, f.count)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct AnalysisReport<'a> {
    file: Option<&'a FileInfo>,
    total_record_count: usize,
    unique_note_count: usize,
    note_frequencies: &'a [NoteFrequency],
}

/// Pretty-printed JSON, one document per result.
pub struct JsonReport<W: Write>(W);

impl<W: Write> JsonReport<W> {
    pub fn new(writer: W) -> Self {
        Self(writer)
    }

    pub fn into_inner(self) -> W {
        self.0
    }
}

impl<W: Write> ReportSink for JsonReport<W> {
    fn analysis(&mut self, file: Option<&FileInfo>, analysis: &RouteAnalysis) -> Result<()> {
        let report = AnalysisReport {
            file,
            total_record_count: analysis.total_record_count(),
            unique_note_count: analysis.unique_note_count(),
            note_frequencies: &analysis.note_frequencies,
        };
        serde_json::to_writer_pretty(&mut self.0, &report)?;
        writeln!(self.0)?;
        Ok(())
    }

    fn assignment(&mut self, result: &AssignmentResult) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.0, result)?;
        writeln!(self.0)?;
        Ok(())
    }
}

/// Formats a byte count with a 1024 base, e.g. `1.5 KB`.
///
/// Values are rounded to two decimals with trailing zeros dropped. Anything
/// from a gigabyte up is expressed in GB.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

/// Writes a note tally to a CSV file with a `note,count` header.
///
/// Overwrites any existing file at `path`.
pub fn write_frequencies_csv(path: &Path, table: &[NoteFrequency]) -> Result<()> {
    debug!(path = %path.display(), rows = table.len(), "Writing note tally CSV");

    let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;
    for row in table {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(path = %path.display(), "Note tally exported");
    Ok(())
}
