//! Compounding projection of a monthly investment plan

mod state;
mod engine;
mod snapshots;

pub use state::ProjectionState;
pub use engine::{ProjectionEngine, ProjectionConfig};
pub use snapshots::{Milestone, MonthlyRow, ProjectionResult, RealValueRow, WealthPhase, YearlyRow};
