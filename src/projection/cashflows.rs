//! Monthly cash flow output structures for projections

use serde::{Deserialize, Serialize};

/// A single row of projection output for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    /// Projection month (1-indexed)
    pub month: u32,

    /// Enrollment after this month's growth, truncated
    pub students: u32,

    // Monetary figures, rounded to cents at emission
    pub gross_revenue: f64,
    pub realized_inflow: f64,
    pub total_outflow: f64,
    pub net_cash_flow: f64,
}

/// One point of the cash flow trend chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: u32,
    pub realized_inflow: f64,
    pub total_outflow: f64,
    pub net_cash_flow: f64,
}

impl From<&MonthlyRecord> for TrendPoint {
    fn from(row: &MonthlyRecord) -> Self {
        Self {
            month: row.month,
            realized_inflow: row.realized_inflow,
            total_outflow: row.total_outflow,
            net_cash_flow: row.net_cash_flow,
        }
    }
}

/// Complete projection result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Monthly rows in chronological order
    pub records: Vec<MonthlyRecord>,
}

impl ProjectionResult {
    pub fn new() -> Self {
        Self { records: Vec::new() }
    }

    /// Add a monthly row
    pub fn add_row(&mut self, row: MonthlyRecord) {
        self.records.push(row);
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        ProjectionSummary::from_records(&self.records)
    }

    /// Series plotted against month: inflow, outflow and net cash flow
    pub fn trend(&self) -> Vec<TrendPoint> {
        self.records.iter().map(TrendPoint::from).collect()
    }

    pub fn into_records(self) -> Vec<MonthlyRecord> {
        self.records
    }
}

/// Headline metrics derived from the monthly rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_months: u32,
    /// Sum of net cash flow over all months
    pub total_projected_profit: f64,
    /// Students in the last projected month
    pub final_student_count: u32,
    /// Mean monthly outflow
    pub avg_monthly_burn: f64,
}

impl ProjectionSummary {
    pub fn from_records(records: &[MonthlyRecord]) -> Self {
        let total_projected_profit: f64 = records.iter().map(|r| r.net_cash_flow).sum();
        let total_outflow: f64 = records.iter().map(|r| r.total_outflow).sum();

        let final_student_count = records.last().map(|r| r.students).unwrap_or(0);
        let avg_monthly_burn = if records.is_empty() {
            0.0
        } else {
            total_outflow / records.len() as f64
        };

        ProjectionSummary {
            total_months: records.len() as u32,
            total_projected_profit,
            final_student_count,
            avg_monthly_burn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn row(month: u32, students: u32, net: f64) -> MonthlyRecord {
        MonthlyRecord {
            month,
            students,
            gross_revenue: net + 100.0,
            realized_inflow: net + 67_000.0,
            total_outflow: 67_000.0,
            net_cash_flow: net,
        }
    }

    #[test]
    fn test_summary_reductions() {
        let mut result = ProjectionResult::new();
        result.add_row(row(1, 504, 2_335_455.0));
        result.add_row(row(2, 508, 2_355_475.46));
        result.add_row(row(3, 512, 2_375_662.75));

        let summary = result.summary();
        assert_eq!(summary.total_months, 3);
        assert_relative_eq!(summary.total_projected_profit, 7_066_593.21, epsilon = 1e-6);
        assert_eq!(summary.final_student_count, 512);
        assert_relative_eq!(summary.avg_monthly_burn, 67_000.0);
    }

    #[test]
    fn test_summary_of_empty_result() {
        let summary = ProjectionResult::new().summary();
        assert_eq!(summary.total_months, 0);
        assert_eq!(summary.total_projected_profit, 0.0);
        assert_eq!(summary.final_student_count, 0);
        assert_eq!(summary.avg_monthly_burn, 0.0);
    }

    #[test]
    fn test_trend_keeps_chart_series_in_month_order() {
        let mut result = ProjectionResult::new();
        result.add_row(row(1, 10, -5.0));
        result.add_row(row(2, 11, 7.5));

        let trend = result.trend();
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].month, 1);
        assert_eq!(trend[1].net_cash_flow, 7.5);
        assert_eq!(trend[1].realized_inflow, 67_007.5);
        assert_eq!(trend[1].total_outflow, 67_000.0);
    }
}
