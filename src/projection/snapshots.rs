//! Snapshot records produced by a projection run

use serde::{Deserialize, Serialize};

/// Stage of wealth building, from the gains-to-investment ratio at year end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WealthPhase {
    /// Gains below the amount invested
    Building,
    /// Gains between one and three times the amount invested
    Acceleration,
    /// Gains at least three times the amount invested
    Compounding,
}

impl WealthPhase {
    pub fn from_ratio(gains_to_investment: f64) -> Self {
        if gains_to_investment < 1.0 {
            WealthPhase::Building
        } else if gains_to_investment < 3.0 {
            WealthPhase::Acceleration
        } else {
            WealthPhase::Compounding
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WealthPhase::Building => "Building Phase",
            WealthPhase::Acceleration => "Acceleration Phase",
            WealthPhase::Compounding => "Compounding Phase",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WealthPhase::Building => "Your contributions drive growth",
            WealthPhase::Acceleration => "Compounding kicks in",
            WealthPhase::Compounding => "Returns drive most growth",
        }
    }
}

/// First month in which cumulative gains exceeded cumulative investment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub year: u32,
    pub month: u32,
}

/// One month of the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRow {
    pub year: u32,
    pub month: u32,
    pub contribution: f64,
    pub balance_before_contribution: f64,
    pub monthly_gain: f64,
    pub balance_after_contribution: f64,
    pub total_invested: f64,
    pub total_gains: f64,
}

/// One investment year, closed at month 12 or at the final month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyRow {
    pub year: u32,
    pub starting_contribution: f64,
    pub invested_this_year: f64,
    pub total_invested: f64,
    pub balance_at_year_start: f64,
    pub gains_this_year: f64,
    pub balance_at_year_end: f64,
    pub total_gains: f64,
    pub wealth_multiplier: f64,
    pub gains_to_investment_ratio: f64,
    pub yearly_return_pct: f64,
    pub rolling_cagr_pct: f64,
    pub phase: WealthPhase,
    /// The compounding milestone fell in this year
    pub milestone_reached: bool,
}

/// Year-end position restated in today's money
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealValueRow {
    pub year: u32,
    pub real_balance: f64,
    pub real_invested: f64,
    pub real_gains: f64,
    pub real_wealth_multiplier: f64,
    pub real_cagr_pct: f64,
    pub inflation_loss_this_year: f64,
    pub cumulative_inflation_loss: f64,
    pub purchasing_power_pct: f64,
}

impl RealValueRow {
    /// Deflate a closed year by `(1 + inflation)^year`
    pub fn from_year(row: &YearlyRow, inflation: f64) -> Self {
        let deflator = (1.0 + inflation).powi(row.year as i32);
        let real_balance = row.balance_at_year_end / deflator;
        let real_invested = row.total_invested / deflator;
        let ratio = if real_invested > 0.0 { real_balance / real_invested } else { 0.0 };

        Self {
            year: row.year,
            real_balance,
            real_invested,
            real_gains: real_balance - real_invested,
            real_wealth_multiplier: ratio,
            real_cagr_pct: if real_invested > 0.0 {
                (ratio.powf(1.0 / row.year as f64) - 1.0) * 100.0
            } else {
                0.0
            },
            inflation_loss_this_year: row.gains_this_year * inflation,
            cumulative_inflation_loss: row.balance_at_year_end - real_balance,
            purchasing_power_pct: ratio * 100.0,
        }
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub final_value: f64,
    pub total_invested: f64,
    pub total_step_up: f64,
    pub milestone: Option<Milestone>,

    /// Contribution made in each month, in order
    pub contributions: Vec<f64>,

    /// Detailed rows, empty unless detailed output was requested
    pub monthly: Vec<MonthlyRow>,
    pub yearly: Vec<YearlyRow>,
    pub real_values: Vec<RealValueRow>,
}

impl ProjectionResult {
    pub fn total_gains(&self) -> f64 {
        self.final_value - self.total_invested
    }

    pub fn wealth_multiplier(&self) -> f64 {
        if self.total_invested > 0.0 {
            self.final_value / self.total_invested
        } else {
            0.0
        }
    }
}
