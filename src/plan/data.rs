//! Flat parameter set describing one systematic investment plan

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};

/// Longest horizon a plan may project, in years
pub const MAX_INVESTMENT_YEARS: f64 = 80.0;

/// A systematic investment plan. All rates are percentages (12.0 = 12%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SipPlan {
    /// Contribution made every month in year 1
    pub monthly_investment: f64,

    /// Expected annual return before costs
    pub expected_return_pct: f64,

    /// Investment horizon in years (fractional years truncate to whole months)
    pub investment_years: f64,

    /// Annual fund expense ratio
    pub fund_expense_ratio_pct: f64,

    /// Annual increase applied to the monthly contribution
    pub yearly_step_up_pct: f64,

    /// Annual inflation rate
    pub inflation_rate_pct: f64,

    /// Annual tax drag on gains
    pub tax_on_gains_pct: f64,

    /// One-off investment made at the start
    pub starting_lumpsum: f64,

    /// First-year withdrawal rate applied to the final corpus in retirement
    pub withdrawal_rate_pct: f64,

    /// Annual return earned by the corpus during retirement
    pub return_after_retirement_pct: f64,
}

impl Default for SipPlan {
    fn default() -> Self {
        Self {
            monthly_investment: 10_000.0,
            expected_return_pct: 12.0,
            investment_years: 20.0,
            fund_expense_ratio_pct: 0.5,
            yearly_step_up_pct: 10.0,
            inflation_rate_pct: 6.0,
            tax_on_gains_pct: 0.0,
            starting_lumpsum: 0.0,
            withdrawal_rate_pct: 4.0,
            return_after_retirement_pct: 7.0,
        }
    }
}

impl SipPlan {
    /// Expected return net of fund expenses and tax drag
    pub fn net_return_pct(&self) -> f64 {
        self.expected_return_pct - self.fund_expense_ratio_pct - self.tax_on_gains_pct
    }

    /// Reject plans that cannot be projected. Every parameter must be finite;
    /// then duration is checked, then contribution, lumpsum and net return.
    pub fn validate(&self) -> Result<()> {
        check_finite("investment_years", self.investment_years)?;
        if self.investment_years <= 0.0 {
            return Err(PlanError::NonPositiveDuration(self.investment_years));
        }
        if self.investment_years > MAX_INVESTMENT_YEARS {
            return Err(PlanError::DurationTooLong {
                years: self.investment_years,
                max: MAX_INVESTMENT_YEARS,
            });
        }
        self.validate_contributions()
    }

    /// Same checks as [`SipPlan::validate`] minus the duration, for searches
    /// where the horizon is the unknown.
    pub(crate) fn validate_contributions(&self) -> Result<()> {
        for (field, value) in [
            ("monthly_investment", self.monthly_investment),
            ("expected_return_pct", self.expected_return_pct),
            ("fund_expense_ratio_pct", self.fund_expense_ratio_pct),
            ("yearly_step_up_pct", self.yearly_step_up_pct),
            ("inflation_rate_pct", self.inflation_rate_pct),
            ("tax_on_gains_pct", self.tax_on_gains_pct),
            ("starting_lumpsum", self.starting_lumpsum),
            ("withdrawal_rate_pct", self.withdrawal_rate_pct),
            ("return_after_retirement_pct", self.return_after_retirement_pct),
        ] {
            check_finite(field, value)?;
        }

        if self.monthly_investment < 0.0 {
            return Err(PlanError::NegativeContribution(self.monthly_investment));
        }
        if self.starting_lumpsum < 0.0 {
            return Err(PlanError::NegativeLumpsum(self.starting_lumpsum));
        }
        let net = self.net_return_pct();
        if net <= 0.0 {
            return Err(PlanError::NonPositiveNetReturn(net));
        }
        Ok(())
    }

    /// Total number of whole months in the horizon
    pub fn total_months(&self) -> u32 {
        months_in(self.investment_years)
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PlanError::NonFiniteParameter { field, value })
    }
}

/// Whole months in a horizon of `years`, truncating any partial month
pub(crate) fn months_in(years: f64) -> u32 {
    if years <= 0.0 || !years.is_finite() {
        0
    } else {
        (years * 12.0).floor() as u32
    }
}
