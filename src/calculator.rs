//! Full plan calculation: validation, projection, returns, drawdown and summary
//!
//! Three entry modes share one calculation path:
//! - classic projection of the plan as given
//! - goal based: solve the monthly contribution for a target corpus first
//! - timeline based: solve the horizon for a target corpus first

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::goal;
use crate::observer::{sanity_events, PlanEvent, PlanObserver};
use crate::plan::SipPlan;
use crate::projection::{
    Milestone, MonthlyRow, ProjectionConfig, ProjectionEngine, RealValueRow, YearlyRow,
};
use crate::retirement::{simulate_drawdown, DrawdownConfig, DrawdownResult};
use crate::returns::{self, CashflowSeries};

/// Which question the calculation answers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CalculationMode {
    /// Project the plan as given
    Classic,
    /// Solve the monthly contribution that reaches `target`
    GoalContribution { target: f64 },
    /// Solve the horizon that reaches `target`
    GoalDuration { target: f64 },
}

impl CalculationMode {
    pub fn title(&self) -> &'static str {
        match self {
            CalculationMode::Classic => "CLASSIC SIP PROJECTION",
            CalculationMode::GoalContribution { .. } => "GOAL BASED SIP CALCULATION",
            CalculationMode::GoalDuration { .. } => "TIMELINE BASED SIP CALCULATION",
        }
    }
}

/// How a metric value should be presented
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MetricValue {
    Currency(f64),
    Percent(f64),
    Multiplier(f64),
    Years(u32),
    Milestone(Option<Milestone>),
}

/// A labeled summary figure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: MetricValue,
}

impl Metric {
    fn new(label: impl Into<String>, value: MetricValue) -> Self {
        Self { label: label.into(), value }
    }
}

/// Headline figures of a calculated plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_invested: f64,
    pub final_corpus: f64,
    pub total_gains: f64,
    pub wealth_multiplier: f64,
    pub starting_lumpsum: f64,
    pub total_contributions: f64,
    pub total_step_up: f64,
    pub expected_return_pct: f64,
    pub expense_ratio_pct: f64,
    pub tax_pct: f64,
    pub net_return_pct: f64,
    pub cagr_pct: f64,
    pub xirr_pct: f64,
    pub real_xirr_pct: f64,
    pub inflation_pct: f64,
    pub real_corpus: f64,
    pub inflation_loss: f64,
    pub milestone: Option<Milestone>,
    pub withdrawal_rate_pct: f64,
    pub years_corpus_lasts: u32,
}

impl Summary {
    /// Summary as an ordered list of labeled metrics
    pub fn metrics(&self) -> Vec<Metric> {
        use MetricValue::*;

        vec![
            Metric::new("Total Amount Invested", Currency(self.total_invested)),
            Metric::new("Final Corpus", Currency(self.final_corpus)),
            Metric::new("Total Gains", Currency(self.total_gains)),
            Metric::new("Wealth Multiplier", Multiplier(self.wealth_multiplier)),
            Metric::new("Starting Lumpsum", Currency(self.starting_lumpsum)),
            Metric::new("Total SIP Invested", Currency(self.total_contributions)),
            Metric::new("Total Step-up Amount", Currency(self.total_step_up)),
            Metric::new("Expected Return", Percent(self.expected_return_pct)),
            Metric::new("Fund Expense Ratio", Percent(self.expense_ratio_pct)),
            Metric::new("Tax Impact", Percent(self.tax_pct)),
            Metric::new("Net Return", Percent(self.net_return_pct)),
            Metric::new("CAGR", Percent(self.cagr_pct)),
            Metric::new("Actual Return (XIRR)", Percent(self.xirr_pct)),
            Metric::new("Real Return (After Inflation)", Percent(self.real_xirr_pct)),
            Metric::new("Inflation Rate", Percent(self.inflation_pct)),
            Metric::new("Real Corpus (Today's Value)", Currency(self.real_corpus)),
            Metric::new("Inflation Loss", Currency(self.inflation_loss)),
            Metric::new("Compounding Milestone", Milestone(self.milestone)),
            Metric::new(
                format!("Years Corpus Lasts (@ {:.1}% withdrawal)", self.withdrawal_rate_pct),
                Years(self.years_corpus_lasts),
            ),
        ]
    }
}

/// Everything the reporting side needs from one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipReport {
    pub mode: CalculationMode,
    /// Plan actually projected, with any solved value filled in
    pub plan: SipPlan,
    pub summary: Summary,
    pub yearly: Vec<YearlyRow>,
    pub real_values: Vec<RealValueRow>,
    pub monthly: Vec<MonthlyRow>,
    pub retirement: DrawdownResult,
}

impl SipReport {
    pub fn title(&self) -> &'static str {
        self.mode.title()
    }
}

/// Runs plans end to end.
///
/// The start date anchors the dated cashflows used for XIRR; pin it with
/// [`SipCalculator::with_start_date`] for reproducible output.
#[derive(Debug, Clone)]
pub struct SipCalculator {
    start: NaiveDateTime,
}

impl SipCalculator {
    /// Calculator whose cashflows start today
    pub fn new() -> Self {
        Self::with_start_date(Local::now().date_naive())
    }

    pub fn with_start_date(date: NaiveDate) -> Self {
        Self { start: date.and_time(NaiveTime::MIN) }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Calculate one plan in the given mode.
    ///
    /// Input errors are returned before any projection runs.
    pub fn run(
        &self,
        plan: &SipPlan,
        mode: CalculationMode,
        observer: &mut dyn PlanObserver,
    ) -> Result<SipReport> {
        let plan = match mode {
            CalculationMode::Classic => plan.clone(),
            CalculationMode::GoalContribution { target } => {
                let monthly = goal::required_monthly_contribution(target, plan)?;
                observer.on_event(&PlanEvent::SolvedContribution {
                    target,
                    years: plan.investment_years,
                    monthly,
                    step_up_pct: plan.yearly_step_up_pct,
                });
                SipPlan { monthly_investment: monthly, ..plan.clone() }
            }
            CalculationMode::GoalDuration { target } => {
                let years = goal::required_years(target, plan)?;
                observer.on_event(&PlanEvent::SolvedDuration {
                    target,
                    monthly: plan.monthly_investment,
                    years,
                    step_up_pct: plan.yearly_step_up_pct,
                });
                SipPlan { investment_years: years, ..plan.clone() }
            }
        };

        self.calculate(plan, mode, observer)
    }

    /// Calculate several plans in the same mode; each plan fails on its own
    pub fn run_batch(
        &self,
        plans: &[SipPlan],
        mode: CalculationMode,
        observer: &mut dyn PlanObserver,
    ) -> Vec<Result<SipReport>> {
        plans.iter().map(|plan| self.run(plan, mode, observer)).collect()
    }

    fn calculate(
        &self,
        plan: SipPlan,
        mode: CalculationMode,
        observer: &mut dyn PlanObserver,
    ) -> Result<SipReport> {
        plan.validate()?;
        for event in sanity_events(
            plan.expected_return_pct,
            plan.yearly_step_up_pct,
            plan.fund_expense_ratio_pct,
        ) {
            observer.on_event(&event);
        }

        let projection = ProjectionEngine::new(ProjectionConfig::from_plan(&plan)).project();
        let inflation = plan.inflation_rate_pct / 100.0;
        let years = plan.investment_years;

        let cashflows = CashflowSeries::from_monthly_plan(
            self.start,
            plan.starting_lumpsum,
            &projection.contributions,
            projection.final_value,
        );
        let xirr_pct = returns::xirr(&cashflows);
        let real_xirr_pct = returns::real_xirr(&cashflows, inflation);

        let final_corpus = projection.final_value;
        let total_invested = projection.total_invested;
        let real_corpus = final_corpus / (1.0 + inflation).powf(years);
        let cagr_pct = if total_invested > 0.0 {
            ((final_corpus / total_invested).powf(1.0 / years) - 1.0) * 100.0
        } else {
            0.0
        };

        let retirement = simulate_drawdown(
            &DrawdownConfig::new(final_corpus, plan.withdrawal_rate_pct, plan.inflation_rate_pct)
                .with_return(plan.return_after_retirement_pct),
        );

        let summary = Summary {
            total_invested,
            final_corpus,
            total_gains: projection.total_gains(),
            wealth_multiplier: projection.wealth_multiplier(),
            starting_lumpsum: plan.starting_lumpsum,
            total_contributions: total_invested - plan.starting_lumpsum,
            total_step_up: projection.total_step_up,
            expected_return_pct: plan.expected_return_pct,
            expense_ratio_pct: plan.fund_expense_ratio_pct,
            tax_pct: plan.tax_on_gains_pct,
            net_return_pct: plan.net_return_pct(),
            cagr_pct,
            xirr_pct,
            real_xirr_pct,
            inflation_pct: plan.inflation_rate_pct,
            real_corpus,
            inflation_loss: final_corpus - real_corpus,
            milestone: projection.milestone,
            withdrawal_rate_pct: plan.withdrawal_rate_pct,
            years_corpus_lasts: retirement.years_lasted,
        };

        log::debug!(
            "{}: final corpus {:.0}, xirr {:.2}%, real {:.2}%",
            mode.title(),
            final_corpus,
            xirr_pct,
            real_xirr_pct
        );

        Ok(SipReport {
            mode,
            plan,
            summary,
            yearly: projection.yearly,
            real_values: projection.real_values,
            monthly: projection.monthly,
            retirement,
        })
    }
}

impl Default for SipCalculator {
    fn default() -> Self {
        Self::new()
    }
}
