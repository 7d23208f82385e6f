//! Core projection engine for monthly school cash flow projections

use std::ops::RangeInclusive;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::cashflows::{MonthlyRecord, ProjectionResult};
use super::state::EnrollmentState;
use crate::error::{CashflowResult, FieldViolation, ProjectionError};

pub const PROFIT_TARGET_RANGE: RangeInclusive<f64> = 0.01..=2.00;
pub const WAIVER_RATE_RANGE: RangeInclusive<f64> = 0.0..=0.30;
pub const ARREARS_RATE_RANGE: RangeInclusive<f64> = 0.0..=0.40;
pub const GROWTH_RATE_RANGE: RangeInclusive<f64> = -0.20..=0.50;
pub const PROJECTION_MONTHS_RANGE: RangeInclusive<u32> = 1..=24;
pub const CURRENT_ENROLLMENT_RANGE: RangeInclusive<u32> = 1..=5000;

/// Configuration for a projection run
///
/// Missing JSON fields fall back to the values of [`ProjectionConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    // Inflow: per-student monthly fees
    pub tuition_base: f64,
    pub transport_fee: f64,
    pub other_fees: f64,

    // Outflow: monthly operating expenses
    pub salaries: f64,
    pub fixed_costs: f64,
    pub marketing: f64,

    /// Profit markup level. Validated but not used by the monthly calculation.
    pub profit_target_multiplier: f64,

    /// Fee waiver/discount policy, applied to gross revenue
    pub waiver_rate: f64,

    /// Share of billed dues expected to remain uncollected, applied after waivers
    pub arrears_rate: f64,

    /// Starting student count
    pub current_enrollment: u32,

    /// Annual enrollment growth, compounded monthly at growth_rate / 12
    pub growth_rate: f64,

    /// Number of months to project
    pub projection_months: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            tuition_base: 5000.0,
            transport_fee: 500.0,
            other_fees: 200.0,
            salaries: 50_000.0,
            fixed_costs: 15_000.0,
            marketing: 2000.0,
            profit_target_multiplier: 0.20,
            waiver_rate: 0.05,
            arrears_rate: 0.12,
            current_enrollment: 500,
            growth_rate: 0.10,
            projection_months: 12,
        }
    }
}

impl ProjectionConfig {
    /// Gross monthly fee billed per student
    pub fn fee_per_student(&self) -> f64 {
        self.tuition_base + self.transport_fee + self.other_fees
    }

    /// Constant monthly expense total
    pub fn monthly_outflow(&self) -> f64 {
        self.salaries + self.fixed_costs + self.marketing
    }

    /// Check every field against its documented range, collecting all violations
    pub fn validate(&self) -> CashflowResult<()> {
        let mut violations = Vec::new();

        let amounts = [
            ("tuition_base", self.tuition_base),
            ("transport_fee", self.transport_fee),
            ("other_fees", self.other_fees),
            ("salaries", self.salaries),
            ("fixed_costs", self.fixed_costs),
            ("marketing", self.marketing),
        ];
        for (field, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                violations.push(FieldViolation {
                    field,
                    reason: format!("must be a non-negative amount, got {}", value),
                });
            }
        }

        let rates = [
            ("profit_target_multiplier", self.profit_target_multiplier, PROFIT_TARGET_RANGE),
            ("waiver_rate", self.waiver_rate, WAIVER_RATE_RANGE),
            ("arrears_rate", self.arrears_rate, ARREARS_RATE_RANGE),
            ("growth_rate", self.growth_rate, GROWTH_RATE_RANGE),
        ];
        for (field, value, range) in rates {
            // NaN fails `contains`
            if !range.contains(&value) {
                violations.push(FieldViolation {
                    field,
                    reason: format!("must be within [{}, {}], got {}", range.start(), range.end(), value),
                });
            }
        }

        // 5000 students at the maximum growth rate reach about 13,300 after 24 months
        if !CURRENT_ENROLLMENT_RANGE.contains(&self.current_enrollment) {
            violations.push(FieldViolation {
                field: "current_enrollment",
                reason: format!(
                    "must be within [{}, {}], got {}",
                    CURRENT_ENROLLMENT_RANGE.start(),
                    CURRENT_ENROLLMENT_RANGE.end(),
                    self.current_enrollment
                ),
            });
        }

        if !PROJECTION_MONTHS_RANGE.contains(&self.projection_months) {
            violations.push(FieldViolation {
                field: "projection_months",
                reason: format!(
                    "must be within [{}, {}], got {}",
                    PROJECTION_MONTHS_RANGE.start(),
                    PROJECTION_MONTHS_RANGE.end(),
                    self.projection_months
                ),
            });
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ProjectionError::InvalidConfiguration { violations })
        }
    }
}

/// Main projection engine
///
/// Holds only a validated, immutable config. Every call to
/// [`ProjectionEngine::project`] recomputes the full sequence from scratch.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine, rejecting out-of-range configs
    pub fn new(config: ProjectionConfig) -> CashflowResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run the month-by-month projection
    pub fn project(&self) -> ProjectionResult {
        let config = &self.config;
        debug!(
            "Projecting {} months from {} students at {:.4} annual growth",
            config.projection_months, config.current_enrollment, config.growth_rate
        );

        let mut result = ProjectionResult::new();
        let mut state = EnrollmentState::new(config.current_enrollment, config.growth_rate);

        for _month in 1..=config.projection_months {
            state.advance_month();

            let row = self.calculate_month(&state);
            trace!("Month {}: {:?}", row.month, row);
            result.add_row(row);
        }

        result
    }

    /// Calculate cash flows for a single month
    fn calculate_month(&self, state: &EnrollmentState) -> MonthlyRecord {
        let config = &self.config;

        let gross_revenue = state.enrollment() * config.fee_per_student();
        let realized_inflow = gross_revenue * (1.0 - config.waiver_rate) * (1.0 - config.arrears_rate);
        let total_outflow = config.monthly_outflow();

        // Net is taken on unrounded figures, then rounded on its own
        let net_cash_flow = realized_inflow - total_outflow;

        MonthlyRecord {
            month: state.projection_month(),
            students: state.students(),
            gross_revenue: round_to_cents(gross_revenue),
            realized_inflow: round_to_cents(realized_inflow),
            total_outflow: round_to_cents(total_outflow),
            net_cash_flow: round_to_cents(net_cash_flow),
        }
    }
}

/// Validate a config and return its monthly records
pub fn project(config: &ProjectionConfig) -> CashflowResult<Vec<MonthlyRecord>> {
    let engine = ProjectionEngine::new(config.clone())?;
    Ok(engine.project().into_records())
}

/// Round to 2 decimals, ties to even on the exact binary value
///
/// Goes through the exact decimal expansion so that values like 2.675
/// (stored just below the tie) round down, as a correctly-rounded
/// formatter does.
pub fn round_to_cents(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}
