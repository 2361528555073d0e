//! One-shot CSV export of a calculated plan

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::format::format_metric;
use super::ReportSink;
use crate::calculator::SipReport;
use crate::error::Result;

pub const SUMMARY_FILE: &str = "summary.csv";
pub const YEARLY_FILE: &str = "yearly_progress.csv";
pub const REAL_VALUE_FILE: &str = "real_value.csv";
pub const MONTHLY_FILE: &str = "monthly_details.csv";
pub const RETIREMENT_FILE: &str = "retirement.csv";

#[derive(Serialize)]
struct SummaryRecord<'a> {
    #[serde(rename = "Metric")]
    metric: &'a str,
    #[serde(rename = "Value")]
    value: String,
}

/// Writes summary, yearly, real-value, monthly and retirement tables into a
/// directory, overwriting files of the same name
#[derive(Debug, Clone)]
pub struct CsvExporter {
    dir: PathBuf,
}

impl CsvExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write_rows<T: Serialize>(&self, file: &str, rows: &[T]) -> Result<()> {
        let path = self.dir.join(file);
        let mut writer = csv::Writer::from_path(&path)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        log::debug!("wrote {} rows to {}", rows.len(), path.display());
        Ok(())
    }
}

impl ReportSink for CsvExporter {
    fn write_report(&mut self, report: &SipReport) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let metrics = report.summary.metrics();
        let summary: Vec<SummaryRecord> = metrics
            .iter()
            .map(|m| SummaryRecord { metric: &m.label, value: format_metric(&m.value) })
            .collect();

        self.write_rows(SUMMARY_FILE, &summary)?;
        self.write_rows(YEARLY_FILE, &report.yearly)?;
        self.write_rows(REAL_VALUE_FILE, &report.real_values)?;
        self.write_rows(MONTHLY_FILE, &report.monthly)?;
        self.write_rows(RETIREMENT_FILE, &report.retirement.years)?;

        log::info!("exported report to {}", self.dir.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{CalculationMode, SipCalculator};
    use crate::plan::SipPlan;
    use chrono::NaiveDate;

    fn line_count(path: &Path) -> usize {
        fs::read_to_string(path).unwrap().lines().count()
    }

    #[test]
    fn test_exports_five_tables() {
        let dir = tempfile::tempdir().unwrap();
        let plan = SipPlan { investment_years: 2.5, ..Default::default() };
        let report = SipCalculator::with_start_date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
            .run(&plan, CalculationMode::Classic, &mut Vec::new())
            .unwrap();

        let mut exporter = CsvExporter::new(dir.path().join("out"));
        exporter.write_report(&report).unwrap();
        let out = exporter.dir();

        // Header line plus one line per record
        assert_eq!(line_count(&out.join(SUMMARY_FILE)), 20);
        assert_eq!(line_count(&out.join(YEARLY_FILE)), 4);
        assert_eq!(line_count(&out.join(REAL_VALUE_FILE)), 4);
        assert_eq!(line_count(&out.join(MONTHLY_FILE)), 31);
        assert_eq!(
            line_count(&out.join(RETIREMENT_FILE)),
            report.retirement.years.len() + 1
        );

        let yearly = fs::read_to_string(out.join(YEARLY_FILE)).unwrap();
        assert!(yearly.starts_with("year,starting_contribution,invested_this_year"));
        let summary = fs::read_to_string(out.join(SUMMARY_FILE)).unwrap();
        assert!(summary.starts_with("Metric,Value"));
    }
}
