//! Projection engine for monthly school cash flows

mod state;
mod engine;
mod cashflows;

pub use engine::{
    project, round_to_cents, ProjectionConfig, ProjectionEngine,
    ARREARS_RATE_RANGE, CURRENT_ENROLLMENT_RANGE, GROWTH_RATE_RANGE, PROFIT_TARGET_RANGE,
    PROJECTION_MONTHS_RANGE, WAIVER_RATE_RANGE,
};
pub use cashflows::{MonthlyRecord, ProjectionResult, ProjectionSummary, TrendPoint};
