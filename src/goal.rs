//! Inverse planning: the contribution or horizon needed to reach a target corpus

use crate::error::{PlanError, Result};
use crate::plan::{SipPlan, MAX_INVESTMENT_YEARS};
use crate::projection::{ProjectionConfig, ProjectionEngine};
use crate::returns::{Bisection, Bracket};

/// Bisection steps for both searches. Always run in full.
pub const GOAL_ITERATIONS: u32 = 100;

/// Shortest horizon considered when solving for years
pub const MIN_YEARS: f64 = 0.1;

/// Longest horizon considered when solving for years
pub const MAX_YEARS: f64 = MAX_INVESTMENT_YEARS;

/// Monthly contribution (rounded to a whole currency unit) whose projection
/// reaches `target`, searched over `[0, 2 × target]`.
///
/// Every other parameter comes from `plan`; its own `monthly_investment` is
/// ignored. If the target is unreachable within the bracket the upper bound
/// is returned.
pub fn required_monthly_contribution(target: f64, plan: &SipPlan) -> Result<f64> {
    check_target(target)?;
    SipPlan { monthly_investment: 0.0, ..plan.clone() }.validate()?;

    let base = ProjectionConfig { detailed_output: false, ..ProjectionConfig::from_plan(plan) };
    let root = Bisection::fixed(Bracket::new(0.0, 2.0 * target), GOAL_ITERATIONS).solve(|monthly| {
        let config = ProjectionConfig { monthly_contribution: monthly, ..base.clone() };
        ProjectionEngine::new(config).final_value() - target
    });

    let solved = root.value.round_ties_even();
    log::debug!(
        "required contribution for target {:.0} over {} years: {:.0}",
        target,
        plan.investment_years,
        solved
    );
    Ok(solved)
}

/// Horizon in years (rounded to one decimal) whose projection reaches
/// `target`, searched over `[0.1, 80]`.
///
/// Every other parameter comes from `plan`; its own `investment_years` is
/// ignored. Because the simulator truncates to whole months, the rounded
/// answer can sit a fraction of a month short of the target.
pub fn required_years(target: f64, plan: &SipPlan) -> Result<f64> {
    check_target(target)?;
    plan.validate_contributions()?;

    let base = ProjectionConfig { detailed_output: false, ..ProjectionConfig::from_plan(plan) };
    let root = Bisection::fixed(Bracket::new(MIN_YEARS, MAX_YEARS), GOAL_ITERATIONS).solve(|years| {
        let config = ProjectionConfig { years, ..base.clone() };
        ProjectionEngine::new(config).final_value() - target
    });

    let solved = (root.value * 10.0).round_ties_even() / 10.0;
    log::debug!(
        "required horizon for target {:.0} at {:.0}/month: {:.1} years",
        target,
        plan.monthly_investment,
        solved
    );
    Ok(solved)
}

fn check_target(target: f64) -> Result<()> {
    if target > 0.0 && target.is_finite() {
        Ok(())
    } else {
        Err(PlanError::InvalidTarget(target))
    }
}
