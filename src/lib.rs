//! School Cash Flow - monthly fee revenue and cash flow projections
//!
//! This library provides:
//! - A month-by-month projection of enrollment, revenue and expenses
//! - Waiver and arrears adjustments from gross to realized inflow
//! - Headline metrics (total profit, final student count, average burn)
//! - CSV, JSON and console report writers
//! - A request/response mapping for the HTTP projection service

pub mod error;
pub mod projection;
pub mod report;
pub mod service;

// Re-export commonly used types
pub use error::{CashflowResult, FieldViolation, ProjectionError};
pub use projection::{
    project, MonthlyRecord, ProjectionConfig, ProjectionEngine, ProjectionResult,
    ProjectionSummary, TrendPoint,
};
