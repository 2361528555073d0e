//! Reporting sinks for calculated plans
//!
//! The calculator only produces a [`SipReport`]; presenting it is up to a
//! sink. Three are provided:
//! - [`ConsoleReport`] formatted text for a terminal
//! - [`CsvExporter`] one CSV file per table
//! - [`JsonReport`] the whole report as JSON

mod console;
mod csv_export;
mod format;

use std::io::Write;

use crate::calculator::SipReport;
use crate::error::Result;

pub use console::ConsoleReport;
pub use csv_export::{
    CsvExporter, MONTHLY_FILE, REAL_VALUE_FILE, RETIREMENT_FILE, SUMMARY_FILE, YEARLY_FILE,
};
pub use format::{format_currency, format_metric};

/// Destination for a calculated report
pub trait ReportSink {
    fn write_report(&mut self, report: &SipReport) -> Result<()>;
}

/// Pretty-printed JSON of the full report
pub struct JsonReport<W: Write> {
    out: W,
}

impl<W: Write> JsonReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for JsonReport<W> {
    fn write_report(&mut self, report: &SipReport) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, report)?;
        writeln!(self.out)?;
        Ok(())
    }
}
