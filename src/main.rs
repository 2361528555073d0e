//! SIP Projection CLI
//!
//! Command-line interface for projecting, goal-solving and exporting plans

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use sip_projection::plan::{load_plan_json, load_plans};
use sip_projection::{
    CalculationMode, ConsoleReport, CsvExporter, JsonReport, LogObserver, ReportSink,
    SipCalculator, SipPlan, SipReport,
};

#[derive(Parser, Debug)]
#[command(
    name = "sip_projection",
    version,
    about = "Project systematic investment plans with step-ups, inflation and retirement drawdown"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    plan: PlanArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Project the plan as given
    Classic,
    /// Solve the monthly investment needed to reach a target corpus
    GoalSip {
        #[arg(long, help = "Target corpus")]
        target: f64,
    },
    /// Solve the number of years needed to reach a target corpus
    GoalYears {
        #[arg(long, help = "Target corpus")]
        target: f64,
    },
}

impl Command {
    fn mode(self) -> CalculationMode {
        match self {
            Command::Classic => CalculationMode::Classic,
            Command::GoalSip { target } => CalculationMode::GoalContribution { target },
            Command::GoalYears { target } => CalculationMode::GoalDuration { target },
        }
    }
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[arg(long, global = true, default_value_t = 10_000.0)]
    monthly_investment: f64,
    #[arg(long, global = true, default_value_t = 12.0, help = "Expected annual return in percent")]
    expected_return: f64,
    #[arg(long, global = true, default_value_t = 20.0)]
    years: f64,
    #[arg(long, global = true, default_value_t = 0.5, help = "Fund expense ratio in percent")]
    expense_ratio: f64,
    #[arg(long, global = true, default_value_t = 10.0, help = "Yearly contribution step-up in percent")]
    step_up: f64,
    #[arg(long, global = true, default_value_t = 6.0, help = "Annual inflation in percent")]
    inflation: f64,
    #[arg(long, global = true, default_value_t = 0.0, help = "Tax on gains in percent")]
    tax: f64,
    #[arg(long, global = true, default_value_t = 0.0)]
    lumpsum: f64,
    #[arg(long, global = true, default_value_t = 4.0, help = "First-year retirement withdrawal in percent of corpus")]
    withdrawal_rate: f64,
    #[arg(long, global = true, default_value_t = 7.0, help = "Annual return after retirement in percent")]
    retirement_return: f64,

    #[arg(long, global = true, conflicts_with = "plans", help = "JSON plan file; replaces the plan flags")]
    plan: Option<PathBuf>,
    #[arg(long, global = true, help = "CSV file of plans to run as a batch")]
    plans: Option<PathBuf>,
}

impl PlanArgs {
    fn to_plan(&self) -> SipPlan {
        SipPlan {
            monthly_investment: self.monthly_investment,
            expected_return_pct: self.expected_return,
            investment_years: self.years,
            fund_expense_ratio_pct: self.expense_ratio,
            yearly_step_up_pct: self.step_up,
            inflation_rate_pct: self.inflation,
            tax_on_gains_pct: self.tax,
            starting_lumpsum: self.lumpsum,
            withdrawal_rate_pct: self.withdrawal_rate,
            return_after_retirement_pct: self.retirement_return,
        }
    }

    fn load(&self) -> anyhow::Result<Vec<SipPlan>> {
        if let Some(path) = &self.plans {
            let plans = load_plans(path)
                .with_context(|| format!("failed to load plans from {}", path.display()))?;
            if plans.is_empty() {
                bail!("no plans found in {}", path.display());
            }
            return Ok(plans);
        }
        if let Some(path) = &self.plan {
            let plan = load_plan_json(path)
                .with_context(|| format!("failed to load plan from {}", path.display()))?;
            return Ok(vec![plan]);
        }
        Ok(vec![self.to_plan()])
    }
}

#[derive(Args, Debug)]
struct OutputArgs {
    #[arg(long, global = true, help = "Cashflow start date (YYYY-MM-DD), defaults to today")]
    start_date: Option<NaiveDate>,
    #[arg(long, global = true, help = "Directory for CSV export")]
    output_dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Print the full report as JSON")]
    json: bool,
}

fn emit(report: &SipReport, output: &OutputArgs, export_dir: Option<&Path>) -> anyhow::Result<()> {
    let stdout = io::stdout().lock();
    if output.json {
        JsonReport::new(stdout).write_report(report)?;
    } else {
        ConsoleReport::new(stdout).write_report(report)?;
    }

    if let Some(dir) = export_dir {
        CsvExporter::new(dir)
            .write_report(report)
            .with_context(|| format!("failed to export report to {}", dir.display()))?;
        if !output.json {
            println!("\nCSV files written to: {}", dir.display());
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mode = cli.command.mode();
    let calculator = match cli.output.start_date {
        Some(date) => SipCalculator::with_start_date(date),
        None => SipCalculator::new(),
    };

    let plans = cli.plan.load()?;
    let batch = plans.len() > 1;
    let mut observer = LogObserver;
    let mut failures = 0;

    let results = calculator.run_batch(&plans, mode, &mut observer);

    for (i, result) in results.into_iter().enumerate() {
        let export_dir = cli.output.output_dir.as_ref().map(|dir| {
            if batch {
                dir.join(format!("plan_{:03}", i + 1))
            } else {
                dir.clone()
            }
        });

        match result {
            Ok(report) => emit(&report, &cli.output, export_dir.as_deref())?,
            Err(e) if batch => {
                log::error!("plan {} skipped: {}", i + 1, e);
                failures += 1;
            }
            Err(e) => return Err(e).context("invalid plan"),
        }
    }

    if failures > 0 {
        bail!("{} of {} plans failed", failures, plans.len());
    }
    Ok(())
}
