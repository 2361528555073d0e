//! Plain-text summary for a terminal

use std::io::Write;

use super::format::{format_currency, format_metric};
use super::ReportSink;
use crate::calculator::SipReport;
use crate::error::Result;

const RULE_WIDTH: usize = 70;

/// Writes the summary metrics and a condensed yearly table
pub struct ConsoleReport<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for ConsoleReport<W> {
    fn write_report(&mut self, report: &SipReport) -> Result<()> {
        let out = &mut self.out;

        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(out, "{:^width$}", report.title(), width = RULE_WIDTH)?;
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

        for metric in report.summary.metrics() {
            writeln!(out, "  {:<40} {:>26}", metric.label, format_metric(&metric.value))?;
        }

        writeln!(out)?;
        writeln!(
            out,
            "{:>4} {:>16} {:>16} {:>16} {:>8}  Phase",
            "Year", "Invested", "Balance", "Gains", "Multi"
        )?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        for row in &report.yearly {
            writeln!(
                out,
                "{:>4} {:>16} {:>16} {:>16} {:>7.2}x  {}{}",
                row.year,
                format_currency(row.total_invested),
                format_currency(row.balance_at_year_end),
                format_currency(row.total_gains),
                row.wealth_multiplier,
                row.phase.label(),
                if row.milestone_reached { " *" } else { "" },
            )?;
        }

        let retirement = &report.retirement;
        writeln!(out)?;
        match retirement.years.first() {
            Some(first) if retirement.outlasted() => writeln!(
                out,
                "Retirement: first-year withdrawal {} lasts beyond {} years",
                format_currency(first.withdrawal),
                retirement.max_years
            )?,
            Some(first) => writeln!(
                out,
                "Retirement: first-year withdrawal {} lasts {} years",
                format_currency(first.withdrawal),
                retirement.years_lasted
            )?,
            None => writeln!(out, "Retirement: no drawdown simulated")?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{CalculationMode, SipCalculator};
    use crate::plan::SipPlan;
    use chrono::NaiveDate;

    #[test]
    fn test_console_lists_metrics_and_years() {
        let plan = SipPlan { investment_years: 3.0, ..Default::default() };
        let report = SipCalculator::with_start_date(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap())
            .run(&plan, CalculationMode::Classic, &mut Vec::new())
            .unwrap();

        let mut console = ConsoleReport::new(Vec::new());
        console.write_report(&report).unwrap();
        let text = String::from_utf8(console.into_inner()).unwrap();

        assert!(text.contains("CLASSIC SIP PROJECTION"));
        assert!(text.contains("Total Amount Invested"));
        assert!(text.contains("Building Phase"));
        assert!(text.contains("Retirement: first-year withdrawal ₹"));
        // Header, rule and one line per year
        assert_eq!(text.lines().filter(|l| l.contains("Building Phase")).count(), 3);
    }

    #[test]
    fn test_console_flags_corpus_that_outlasts_horizon() {
        let plan = SipPlan { investment_years: 3.0, withdrawal_rate_pct: 0.0, ..Default::default() };
        let report = SipCalculator::with_start_date(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap())
            .run(&plan, CalculationMode::Classic, &mut Vec::new())
            .unwrap();
        assert!(report.retirement.outlasted());

        let mut console = ConsoleReport::new(Vec::new());
        console.write_report(&report).unwrap();
        let text = String::from_utf8(console.into_inner()).unwrap();

        assert!(text.contains("Retirement: first-year withdrawal ₹0 lasts beyond 40 years"));
    }
}
