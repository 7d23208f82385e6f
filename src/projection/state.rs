//! Running enrollment carried across projection months

/// Enrollment state of the school at a point in the projection
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EnrollmentState {
    /// Current projection month (0 before the first month is applied)
    projection_month: u32,

    /// Real-valued enrollment, never truncated between months
    enrollment: f64,

    /// Monthly compounding factor, 1 + annual growth / 12
    monthly_growth_factor: f64,
}

impl EnrollmentState {
    /// Initialize state at projection start
    pub fn new(current_enrollment: u32, annual_growth_rate: f64) -> Self {
        Self {
            projection_month: 0,
            enrollment: f64::from(current_enrollment),
            monthly_growth_factor: 1.0 + annual_growth_rate / 12.0,
        }
    }

    /// Advance to next month, compounding enrollment from the prior month's value
    pub fn advance_month(&mut self) {
        self.projection_month += 1;
        self.enrollment *= self.monthly_growth_factor;
    }

    pub fn projection_month(&self) -> u32 {
        self.projection_month
    }

    pub fn enrollment(&self) -> f64 {
        self.enrollment
    }

    /// Whole students enrolled, truncated toward zero
    ///
    /// Validated configs keep enrollment within (0, 13_319), so the cast is exact.
    pub fn students(&self) -> u32 {
        self.enrollment.trunc() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compounds_from_prior_month() {
        let mut state = EnrollmentState::new(500, 0.10);
        state.advance_month();
        assert_eq!(state.projection_month(), 1);
        assert_relative_eq!(state.enrollment(), 500.0 * (1.0 + 0.10 / 12.0));
        assert_eq!(state.students(), 504);

        state.advance_month();
        assert_relative_eq!(state.enrollment(), 500.0 * (1.0 + 0.10 / 12.0) * (1.0 + 0.10 / 12.0));
        assert_eq!(state.students(), 508);
    }

    #[test]
    fn test_decay_truncates_but_never_goes_negative() {
        let mut state = EnrollmentState::new(1, -0.20);
        for _ in 0..24 {
            state.advance_month();
            assert!(state.enrollment() > 0.0);
        }
        assert_eq!(state.students(), 0);
    }
}
