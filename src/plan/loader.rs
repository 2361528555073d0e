//! Load plans from a CSV batch file or a single JSON plan

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::Reader;
use serde::Deserialize;

use super::SipPlan;
use crate::error::Result;

/// Raw CSV row. Any omitted column falls back to the [`SipPlan`] default.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "MonthlyInvestment", default)]
    monthly_investment: Option<f64>,
    #[serde(rename = "ExpectedReturnPercent", default)]
    expected_return_pct: Option<f64>,
    #[serde(rename = "InvestmentYears", default)]
    investment_years: Option<f64>,
    #[serde(rename = "FundExpenseRatio", default)]
    fund_expense_ratio_pct: Option<f64>,
    #[serde(rename = "YearlyStepUp", default)]
    yearly_step_up_pct: Option<f64>,
    #[serde(rename = "InflationRate", default)]
    inflation_rate_pct: Option<f64>,
    #[serde(rename = "TaxOnGains", default)]
    tax_on_gains_pct: Option<f64>,
    #[serde(rename = "StartingLumpsum", default)]
    starting_lumpsum: Option<f64>,
    #[serde(rename = "WithdrawalRateInRetirement", default)]
    withdrawal_rate_pct: Option<f64>,
    #[serde(rename = "ReturnAfterRetirement", default)]
    return_after_retirement_pct: Option<f64>,
}

impl CsvRow {
    fn into_plan(self) -> SipPlan {
        let defaults = SipPlan::default();
        SipPlan {
            monthly_investment: self.monthly_investment.unwrap_or(defaults.monthly_investment),
            expected_return_pct: self.expected_return_pct.unwrap_or(defaults.expected_return_pct),
            investment_years: self.investment_years.unwrap_or(defaults.investment_years),
            fund_expense_ratio_pct: self
                .fund_expense_ratio_pct
                .unwrap_or(defaults.fund_expense_ratio_pct),
            yearly_step_up_pct: self.yearly_step_up_pct.unwrap_or(defaults.yearly_step_up_pct),
            inflation_rate_pct: self.inflation_rate_pct.unwrap_or(defaults.inflation_rate_pct),
            tax_on_gains_pct: self.tax_on_gains_pct.unwrap_or(defaults.tax_on_gains_pct),
            starting_lumpsum: self.starting_lumpsum.unwrap_or(defaults.starting_lumpsum),
            withdrawal_rate_pct: self.withdrawal_rate_pct.unwrap_or(defaults.withdrawal_rate_pct),
            return_after_retirement_pct: self
                .return_after_retirement_pct
                .unwrap_or(defaults.return_after_retirement_pct),
        }
    }
}

/// Load every plan from a CSV file with PascalCase headers
pub fn load_plans<P: AsRef<Path>>(path: P) -> Result<Vec<SipPlan>> {
    let file = File::open(path)?;
    load_plans_from_reader(file)
}

/// Load plans from any reader (e.g., string buffer, stdin)
pub fn load_plans_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<SipPlan>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut plans = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        plans.push(row.into_plan());
    }

    log::debug!("loaded {} plans from CSV", plans.len());
    Ok(plans)
}

/// Load a single plan from a JSON object; missing fields take defaults
pub fn load_plan_json<P: AsRef<Path>>(path: P) -> Result<SipPlan> {
    let file = File::open(path)?;
    let plan = serde_json::from_reader(BufReader::new(file))?;
    Ok(plan)
}
