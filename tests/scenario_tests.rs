//! End-to-end plan calculations through the public API

use approx::assert_abs_diff_eq;
use chrono::{Duration, NaiveDate};
use sip_projection::plan::{load_plan_json, load_plans};
use sip_projection::projection::WealthPhase;
use sip_projection::returns::{Cashflow, CashflowSeries};
use sip_projection::{
    real_xirr, xirr, CalculationMode, CsvExporter, PlanEvent, ReportSink, SipCalculator, SipPlan,
};
use std::fs;

fn reference_plan() -> SipPlan {
    SipPlan {
        monthly_investment: 10_000.0,
        expected_return_pct: 12.0,
        investment_years: 20.0,
        fund_expense_ratio_pct: 0.5,
        yearly_step_up_pct: 10.0,
        inflation_rate_pct: 6.0,
        tax_on_gains_pct: 0.0,
        starting_lumpsum: 50_000.0,
        withdrawal_rate_pct: 4.0,
        return_after_retirement_pct: 7.0,
    }
}

fn calculator() -> SipCalculator {
    SipCalculator::with_start_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
}

#[test]
fn flat_contribution_scenario_lands_in_expected_range() {
    let plan = SipPlan { yearly_step_up_pct: 0.0, ..reference_plan() };
    let report = calculator().run(&plan, CalculationMode::Classic, &mut Vec::new()).unwrap();

    assert_eq!(plan.net_return_pct(), 11.5);
    let final_corpus = report.summary.final_corpus;
    assert!(
        (9_000_000.0..=11_000_000.0).contains(&final_corpus),
        "final corpus {final_corpus}"
    );
    assert_abs_diff_eq!(report.summary.total_invested, 2_450_000.0, epsilon = 1e-6);
}

#[test]
fn stepped_up_scenario() {
    let report = calculator()
        .run(&reference_plan(), CalculationMode::Classic, &mut Vec::new())
        .unwrap();
    let summary = &report.summary;

    assert!((17_000_000.0..=19_000_000.0).contains(&summary.final_corpus));
    assert!(summary.total_step_up > 0.0);
    assert!(summary.xirr_pct > 11.0 && summary.xirr_pct < 11.5, "xirr {}", summary.xirr_pct);
    assert!(summary.real_xirr_pct < summary.xirr_pct);
    assert!(summary.real_corpus < summary.final_corpus);
    assert_abs_diff_eq!(
        summary.inflation_loss,
        summary.final_corpus - summary.real_corpus,
        epsilon = 1e-6
    );

    // Phases never move backwards
    let phases: Vec<WealthPhase> = report.yearly.iter().map(|y| y.phase).collect();
    assert_eq!(phases.first(), Some(&WealthPhase::Building));
    let rank = |p: &WealthPhase| match p {
        WealthPhase::Building => 0,
        WealthPhase::Acceleration => 1,
        WealthPhase::Compounding => 2,
    };
    assert!(phases.windows(2).all(|w| rank(&w[0]) <= rank(&w[1])));

    // Exactly one year carries the milestone flag
    assert_eq!(report.yearly.iter().filter(|y| y.milestone_reached).count(), 1);
}

#[test]
fn two_cashflow_xirr_near_ten_percent() {
    let day0 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    let series = CashflowSeries::new(vec![
        Cashflow::new(-1000.0, day0),
        Cashflow::new(1100.0, day0 + Duration::days(365)),
    ])
    .unwrap();

    assert!((xirr(&series) - 10.0).abs() < 0.5);
    assert_abs_diff_eq!(real_xirr(&series, 0.0), xirr(&series), epsilon = 1e-4);
}

#[test]
fn goal_modes_report_solved_values() {
    let plan = SipPlan::default();
    let mut events = Vec::new();

    let by_contribution = calculator()
        .run(&plan, CalculationMode::GoalContribution { target: 5_000_000.0 }, &mut events)
        .unwrap();
    let by_duration = calculator()
        .run(&plan, CalculationMode::GoalDuration { target: 10_000_000.0 }, &mut events)
        .unwrap();

    assert_eq!(by_contribution.plan.monthly_investment, 2839.0);
    assert_eq!(by_duration.plan.investment_years, 16.4);

    // 16.4 years truncates to 196 months; the target falls inside the next month
    let one_month_more = SipPlan { investment_years: 16.4 + 1.0 / 12.0, ..plan.clone() };
    let next = calculator()
        .run(&one_month_more, CalculationMode::Classic, &mut Vec::new())
        .unwrap();
    assert!(by_duration.summary.final_corpus < 10_000_000.0);
    assert!(next.summary.final_corpus >= 10_000_000.0);
    assert_eq!(next.monthly.len(), 197);
    assert!(matches!(events[0], PlanEvent::SolvedContribution { .. }));
    assert!(matches!(events[1], PlanEvent::SolvedDuration { .. }));
    assert_eq!(by_duration.title(), "TIMELINE BASED SIP CALCULATION");
}

#[test]
fn goal_mode_rejects_missing_target_before_work() {
    let mut events = Vec::new();
    let err = calculator()
        .run(&SipPlan::default(), CalculationMode::GoalDuration { target: 0.0 }, &mut events)
        .unwrap_err();

    assert!(err.to_string().contains("target corpus"));
    assert!(events.is_empty());
}

#[test]
fn loaded_plans_export_to_csv() {
    let dir = tempfile::tempdir().unwrap();
    let plans_path = dir.path().join("plans.csv");
    fs::write(
        &plans_path,
        "MonthlyInvestment,ExpectedReturnPercent,InvestmentYears,YearlyStepUp\n\
         5000,12,10,0\n\
         20000,10,5,5\n",
    )
    .unwrap();
    let json_path = dir.path().join("plan.json");
    fs::write(&json_path, r#"{"monthly_investment": 7500, "investment_years": 3}"#).unwrap();

    let plans = load_plans(&plans_path).unwrap();
    assert_eq!(plans.len(), 2);
    assert_eq!(plans[1].yearly_step_up_pct, 5.0);
    assert_eq!(plans[0].inflation_rate_pct, 6.0);

    let single = load_plan_json(&json_path).unwrap();
    assert_eq!(single.monthly_investment, 7500.0);
    assert_eq!(single.expected_return_pct, 12.0);

    let out = dir.path().join("report");
    let report = calculator().run(&plans[0], CalculationMode::Classic, &mut Vec::new()).unwrap();
    CsvExporter::new(&out).write_report(&report).unwrap();

    for file in [
        "summary.csv",
        "yearly_progress.csv",
        "real_value.csv",
        "monthly_details.csv",
        "retirement.csv",
    ] {
        assert!(out.join(file).exists(), "missing {file}");
    }
    let monthly = fs::read_to_string(out.join("monthly_details.csv")).unwrap();
    assert_eq!(monthly.lines().count(), 121);
}
