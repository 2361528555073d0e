//! SIP Projection - projection engine for systematic investment plans
//!
//! This library provides:
//! - Month-by-month compounding with annual contribution step-ups
//! - Money-weighted returns (XIRR) in nominal and inflation-adjusted terms
//! - Goal solving for the required contribution or horizon
//! - Retirement drawdown of the final corpus
//! - Console, CSV and JSON reporting of a calculated plan

pub mod error;
pub mod plan;
pub mod returns;
pub mod projection;
pub mod goal;
pub mod retirement;
pub mod observer;
pub mod calculator;
pub mod report;

// Re-export commonly used types
pub use error::{PlanError, Result};
pub use plan::SipPlan;
pub use projection::{ProjectionEngine, ProjectionConfig, ProjectionResult};
pub use returns::{xirr, real_xirr, CashflowSeries, RootFinder};
pub use observer::{LogObserver, PlanEvent, PlanObserver};
pub use calculator::{CalculationMode, SipCalculator, SipReport, Summary};
pub use report::{ConsoleReport, CsvExporter, JsonReport, ReportSink};
