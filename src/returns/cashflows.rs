//! Dated cashflow series and their net present value

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};

/// Length of a year used to turn day counts into fractional years
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Average month length used to space monthly contributions (30.4375 days)
pub const AVERAGE_MONTH_SECONDS: i64 = 2_629_800;

/// A single dated amount. Negative = money invested, positive = money received.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cashflow {
    pub amount: f64,
    pub date: NaiveDateTime,
}

impl Cashflow {
    pub fn new(amount: f64, date: NaiveDateTime) -> Self {
        Self { amount, date }
    }
}

/// Cashflows ordered by date, first entry earliest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowSeries {
    flows: Vec<Cashflow>,
}

impl CashflowSeries {
    /// Build a series, rejecting dates that go backwards
    pub fn new(flows: Vec<Cashflow>) -> Result<Self> {
        if let Some(index) = flows
            .windows(2)
            .position(|pair| pair[1].date < pair[0].date)
        {
            return Err(PlanError::UnsortedCashflows { index: index + 1 });
        }
        Ok(Self { flows })
    }

    /// Series for a monthly plan: the lumpsum goes out at `start`, each
    /// contribution one average month after the previous one, and the final
    /// value comes back one average month after the last contribution.
    pub fn from_monthly_plan(
        start: NaiveDateTime,
        lumpsum: f64,
        contributions: &[f64],
        final_value: f64,
    ) -> Self {
        let step = Duration::seconds(AVERAGE_MONTH_SECONDS);
        let mut flows = Vec::with_capacity(contributions.len() + 2);
        let mut date = start;

        flows.push(Cashflow::new(-lumpsum, date));
        for &contribution in contributions {
            date += step;
            flows.push(Cashflow::new(-contribution, date));
        }
        date += step;
        flows.push(Cashflow::new(final_value, date));

        Self { flows }
    }

    pub fn flows(&self) -> &[Cashflow] {
        &self.flows
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        self.flows.first().map(|cf| cf.date)
    }

    /// Fractional years from the first date, counting whole elapsed days
    pub fn years_since_start(&self, date: NaiveDateTime) -> f64 {
        match self.start() {
            Some(start) => (date - start).num_days() as f64 / DAYS_PER_YEAR,
            None => 0.0,
        }
    }

    /// Fractional years between the first and last entries
    pub fn span_years(&self) -> f64 {
        self.flows
            .last()
            .map(|cf| self.years_since_start(cf.date))
            .unwrap_or(0.0)
    }

    /// Sum of all negative entries (a non-positive number)
    pub fn total_outflow(&self) -> f64 {
        self.flows.iter().map(|cf| cf.amount).filter(|&a| a < 0.0).sum()
    }

    /// Sum of all positive entries
    pub fn total_inflow(&self) -> f64 {
        self.flows.iter().map(|cf| cf.amount).filter(|&a| a > 0.0).sum()
    }

    /// Net present value at an annual `rate` (fraction):
    /// `Σ amount / (1 + rate)^(days / 365.25)`
    pub fn npv(&self, rate: f64) -> f64 {
        let Some(start) = self.start() else {
            return 0.0;
        };
        self.flows
            .iter()
            .map(|cf| {
                let years = (cf.date - start).num_days() as f64 / DAYS_PER_YEAR;
                cf.amount / (1.0 + rate).powf(years)
            })
            .sum()
    }

    /// Apply `f(amount, years_since_start)` to every entry, keeping dates
    pub fn map_amounts<F>(&self, f: F) -> Self
    where
        F: Fn(f64, f64) -> f64,
    {
        let flows = self
            .flows
            .iter()
            .map(|cf| Cashflow::new(f(cf.amount, self.years_since_start(cf.date)), cf.date))
            .collect();
        Self { flows }
    }
}
