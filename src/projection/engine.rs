//! Month-by-month compounding of a plan with annual contribution step-ups

use super::snapshots::{Milestone, MonthlyRow, ProjectionResult, RealValueRow, WealthPhase, YearlyRow};
use super::state::ProjectionState;
use crate::plan::{months_in, SipPlan};

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Contribution made every month in year 1
    pub monthly_contribution: f64,

    /// Annual return after expenses and tax, in percent
    pub annual_net_return_pct: f64,

    /// Horizon in years, truncated to whole months
    pub years: f64,

    /// Annual increase of the monthly contribution, in percent
    pub step_up_pct: f64,

    /// Amount invested at the start
    pub lumpsum: f64,

    /// Annual inflation in percent, used for the real-value rows
    pub inflation_pct: f64,

    /// Whether to record monthly, yearly and real-value rows
    pub detailed_output: bool,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self::from_plan(&SipPlan::default())
    }
}

impl ProjectionConfig {
    /// Detailed projection of a plan at its net return
    pub fn from_plan(plan: &SipPlan) -> Self {
        Self {
            monthly_contribution: plan.monthly_investment,
            annual_net_return_pct: plan.net_return_pct(),
            years: plan.investment_years,
            step_up_pct: plan.yearly_step_up_pct,
            lumpsum: plan.starting_lumpsum,
            inflation_pct: plan.inflation_rate_pct,
            detailed_output: true,
        }
    }

    /// Monthly rate equivalent to the annual net return under monthly compounding
    pub fn monthly_rate(&self) -> f64 {
        (1.0 + self.annual_net_return_pct / 100.0).powf(1.0 / 12.0) - 1.0
    }

    pub fn total_months(&self) -> u32 {
        months_in(self.years)
    }
}

/// Per-year running totals, reset when a year closes
#[derive(Debug, Clone, Copy)]
struct YearAccumulator {
    starting_contribution: f64,
    balance_at_start: f64,
    invested: f64,
    gains: f64,
}

impl YearAccumulator {
    fn open(state: &ProjectionState) -> Self {
        Self {
            starting_contribution: state.contribution,
            balance_at_start: state.balance,
            invested: 0.0,
            gains: 0.0,
        }
    }
}

/// Compounding simulator
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Final balance only, without recording any rows
    pub fn final_value(&self) -> f64 {
        let config = ProjectionConfig { detailed_output: false, ..self.config.clone() };
        ProjectionEngine::new(config).project().final_value
    }

    /// Run the simulation.
    ///
    /// Each month the balance earns one month of interest and then receives
    /// the contribution. At the close of every year except the final month,
    /// the contribution steps up for the following year. A horizon shorter
    /// than one month returns the lumpsum untouched.
    pub fn project(&self) -> ProjectionResult {
        let config = &self.config;
        let total_months = config.total_months();
        let monthly_rate = config.monthly_rate();
        let step_up = config.step_up_pct / 100.0;
        let inflation = config.inflation_pct / 100.0;
        let detailed = config.detailed_output;

        let mut state = ProjectionState::new(config.lumpsum, config.monthly_contribution);
        let mut result = ProjectionResult {
            final_value: config.lumpsum,
            total_invested: config.lumpsum,
            total_step_up: 0.0,
            milestone: None,
            contributions: Vec::with_capacity(total_months as usize),
            monthly: Vec::new(),
            yearly: Vec::new(),
            real_values: Vec::new(),
        };
        if detailed {
            result.monthly.reserve(total_months as usize);
        }

        let mut year = YearAccumulator::open(&state);

        for _ in 0..total_months {
            state.advance_month();

            let gain = state.credit_interest(monthly_rate);
            state.contribute();

            result.contributions.push(state.contribution);
            year.invested += state.contribution;
            year.gains += gain;

            if result.milestone.is_none() && state.gains_exceed_invested() {
                result.milestone = Some(Milestone {
                    year: state.year,
                    month: state.month_in_year,
                });
            }

            if detailed {
                result.monthly.push(MonthlyRow {
                    year: state.year,
                    month: state.month_in_year,
                    contribution: state.contribution,
                    balance_before_contribution: state.balance - state.contribution,
                    monthly_gain: gain,
                    balance_after_contribution: state.balance,
                    total_invested: state.total_invested,
                    total_gains: state.cumulative_gains,
                });
            }

            let is_last_month = state.projection_month == total_months;
            if state.is_year_end() || is_last_month {
                if detailed {
                    let row = close_year(&state, &year, result.milestone);
                    result.real_values.push(RealValueRow::from_year(&row, inflation));
                    result.yearly.push(row);
                }
                if state.is_year_end() && !is_last_month {
                    state.step_up(step_up);
                }
                year = YearAccumulator::open(&state);
            }
        }

        result.final_value = state.balance;
        result.total_invested = state.total_invested;
        result.total_step_up = state.total_step_up;
        result
    }
}

fn close_year(state: &ProjectionState, year: &YearAccumulator, milestone: Option<Milestone>) -> YearlyRow {
    let invested = state.total_invested;
    let balance = state.balance;
    let (multiplier, ratio) = if invested > 0.0 {
        (balance / invested, (balance - invested) / invested)
    } else {
        (0.0, 0.0)
    };

    YearlyRow {
        year: state.year,
        starting_contribution: year.starting_contribution,
        invested_this_year: year.invested,
        total_invested: invested,
        balance_at_year_start: year.balance_at_start,
        gains_this_year: year.gains,
        balance_at_year_end: balance,
        total_gains: state.cumulative_gains,
        wealth_multiplier: multiplier,
        gains_to_investment_ratio: ratio,
        yearly_return_pct: if invested > 0.0 { (multiplier - 1.0) * 100.0 } else { 0.0 },
        rolling_cagr_pct: if invested > 0.0 {
            (multiplier.powf(1.0 / state.year as f64) - 1.0) * 100.0
        } else {
            0.0
        },
        phase: WealthPhase::from_ratio(ratio),
        milestone_reached: milestone.map_or(false, |m| m.year == state.year),
    }
}
