//! Year-by-year depletion of a retirement corpus under inflation-indexed withdrawals

use serde::{Deserialize, Serialize};

/// Default post-retirement annual return, in percent
pub const DEFAULT_RETURN_AFTER_RETIREMENT_PCT: f64 = 7.0;

/// Default number of retirement years simulated
pub const DEFAULT_MAX_YEARS: u32 = 40;

/// Parameters for a drawdown run. Rates are percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawdownConfig {
    /// Corpus at the start of retirement
    pub corpus: f64,

    /// Share of the starting corpus withdrawn in year 1
    pub withdrawal_rate_pct: f64,

    /// Annual growth of the withdrawal after year 1
    pub inflation_pct: f64,

    /// Annual return earned by the remaining corpus
    pub return_pct: f64,

    /// Horizon cap in years
    pub max_years: u32,
}

impl DrawdownConfig {
    pub fn new(corpus: f64, withdrawal_rate_pct: f64, inflation_pct: f64) -> Self {
        Self {
            corpus,
            withdrawal_rate_pct,
            inflation_pct,
            return_pct: DEFAULT_RETURN_AFTER_RETIREMENT_PCT,
            max_years: DEFAULT_MAX_YEARS,
        }
    }

    pub fn with_return(mut self, return_pct: f64) -> Self {
        self.return_pct = return_pct;
        self
    }

    pub fn with_max_years(mut self, max_years: u32) -> Self {
        self.max_years = max_years;
        self
    }
}

/// One retirement year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawdownRow {
    pub year: u32,
    pub withdrawal: f64,
    pub corpus_at_start: f64,
    /// Floored at zero once the corpus runs out
    pub corpus_at_end: f64,
    /// Withdrawal as a percentage of the corpus at the start of this year
    pub withdrawal_pct_of_corpus: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawdownResult {
    pub years: Vec<DrawdownRow>,
    /// Number of years that ended with a positive corpus
    pub years_lasted: u32,
    /// Horizon the run was capped at
    pub max_years: u32,
}

impl DrawdownResult {
    /// The corpus survived the whole horizon
    pub fn outlasted(&self) -> bool {
        self.years_lasted >= self.max_years
    }
}

/// Simulate withdrawals until the corpus is exhausted or the horizon ends.
///
/// Each year the corpus grows at the return rate and then pays that year's
/// withdrawal, which is the year-1 amount indexed by `(1 + inflation)^(year - 1)`.
pub fn simulate_drawdown(config: &DrawdownConfig) -> DrawdownResult {
    let withdrawal_rate = config.withdrawal_rate_pct / 100.0;
    let inflation = config.inflation_pct / 100.0;
    let growth = config.return_pct / 100.0;

    let first_withdrawal = config.corpus * withdrawal_rate;
    let mut corpus = config.corpus;
    let mut years = Vec::with_capacity(config.max_years as usize);
    let mut years_lasted = 0;

    for year in 1..=config.max_years {
        let withdrawal = first_withdrawal * (1.0 + inflation).powi(year as i32 - 1);
        let corpus_at_start = corpus;
        corpus = corpus * (1.0 + growth) - withdrawal;

        years.push(DrawdownRow {
            year,
            withdrawal,
            corpus_at_start,
            corpus_at_end: corpus.max(0.0),
            withdrawal_pct_of_corpus: if corpus_at_start > 0.0 {
                withdrawal / corpus_at_start * 100.0
            } else {
                0.0
            },
        });

        if corpus > 0.0 {
            years_lasted = year;
        } else {
            log::debug!("corpus exhausted in retirement year {year}");
            break;
        }
    }

    DrawdownResult { years, years_lasted, max_years: config.max_years }
}
