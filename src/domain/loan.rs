//! Loan state and the monthly amortization transition.
//!
//! A [`Loan`] is a plain value: [`Loan::advance`] consumes one payment period
//! and returns the next state, so a schedule is a fold over months.

use super::error::MortgageError;

/// Months in a year, used to turn an annual percentage into a monthly fraction.
const MONTHLY_RATE_DIVISOR: f64 = 1200.0;
/// Longest term a loan may be amortized over: 100 years.
pub const MAX_TERM_MONTHS: u32 = 1200;

/// Present-value factor of an annuity paying 1 per month for `term_months`
/// at `annual_rate_percent`.
///
/// Undefined for a zero rate; [`Loan::new`] rejects those before calling it.
pub fn amortization_factor(annual_rate_percent: f64, term_months: u32) -> f64 {
    let r = annual_rate_percent / MONTHLY_RATE_DIVISOR;
    let growth = (1.0 + r).powi(term_months as i32);
    (growth - 1.0) / (r * growth)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Loan {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_months: u32,
    pub interest_paid_cumulative: f64,
    pub offset_balance: f64,
    /// Payment that retires the original principal over `term_months`.
    pub monthly_payment: f64,
}

impl Loan {
    pub fn new(
        principal: f64,
        annual_rate_percent: f64,
        term_months: u32,
    ) -> Result<Self, MortgageError> {
        if !annual_rate_percent.is_finite() || annual_rate_percent <= 0.0 {
            return Err(MortgageError::invalid(
                "rate",
                format!("annual rate must be positive, got {annual_rate_percent}"),
            ));
        }
        if term_months == 0 {
            return Err(MortgageError::invalid("term", "term must be at least one month"));
        }
        if term_months > MAX_TERM_MONTHS {
            return Err(MortgageError::invalid(
                "term",
                format!("term must be at most {MAX_TERM_MONTHS} months, got {term_months}"),
            ));
        }
        if !principal.is_finite() || principal < 0.0 {
            return Err(MortgageError::invalid(
                "principal",
                format!("principal must be non-negative, got {principal}"),
            ));
        }

        Ok(Loan {
            principal,
            annual_rate_percent,
            term_months,
            interest_paid_cumulative: 0.0,
            offset_balance: 0.0,
            monthly_payment: principal / amortization_factor(annual_rate_percent, term_months),
        })
    }

    pub fn with_offset(self, offset_balance: f64) -> Self {
        Loan {
            offset_balance,
            ..self
        }
    }

    pub fn deposit_offset(self, amount: f64) -> Self {
        Loan {
            offset_balance: self.offset_balance + amount,
            ..self
        }
    }

    /// Interest charged for the current period. Negative when the offset
    /// balance exceeds the principal.
    pub fn current_interest(&self) -> f64 {
        self.annual_rate_percent / MONTHLY_RATE_DIVISOR * (self.principal - self.offset_balance)
    }

    /// Apply one period's payment and return the next state with the interest
    /// charged for the period.
    ///
    /// Only the part of `payment` above the interest reduces principal; a
    /// payment short of the interest leaves principal unchanged and credits
    /// just the payment to interest paid. Principal is not clamped at zero.
    pub fn advance(self, payment: f64) -> (Self, f64) {
        let interest = self.current_interest();
        let next = Loan {
            interest_paid_cumulative: self.interest_paid_cumulative + interest.min(payment),
            principal: self.principal - (payment - interest).max(0.0),
            ..self
        };
        (next, interest)
    }

    /// In-place form of [`Loan::advance`].
    pub fn apply_payment(&mut self, amount: f64) -> f64 {
        let (next, interest) = self.advance(amount);
        *self = next;
        interest
    }

    pub fn is_paid_off(&self) -> bool {
        self.principal <= 0.0
    }

    pub fn is_covered_by_offset(&self) -> bool {
        self.principal <= self.offset_balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::{prop_assert, proptest};

    fn sample_loan() -> Loan {
        Loan::new(800_000.0, 2.6, 360).unwrap()
    }

    #[test]
    fn monthly_payment_matches_annuity_formula() {
        let loan = sample_loan();
        // 800k over 30 years at 2.6%
        assert_relative_eq!(loan.monthly_payment, 3202.72, epsilon = 0.01);
    }

    #[test]
    fn new_loan_starts_clean() {
        let loan = sample_loan();
        assert_eq!(loan.interest_paid_cumulative, 0.0);
        assert_eq!(loan.offset_balance, 0.0);
        assert_eq!(loan.term_months, 360);
    }

    #[test]
    fn zero_rate_is_rejected() {
        let err = Loan::new(500_000.0, 0.0, 360).unwrap_err();
        assert!(matches!(err, MortgageError::InvalidInput { field, .. } if field == "rate"));
    }

    #[test]
    fn negative_and_nan_rates_are_rejected() {
        assert!(Loan::new(500_000.0, -1.0, 360).is_err());
        assert!(Loan::new(500_000.0, f64::NAN, 360).is_err());
    }

    #[test]
    fn zero_term_is_rejected() {
        let err = Loan::new(500_000.0, 3.0, 0).unwrap_err();
        assert!(matches!(err, MortgageError::InvalidInput { field, .. } if field == "term"));
    }

    #[test]
    fn oversized_terms_are_rejected() {
        assert!(Loan::new(100_000.0, 3.0, MAX_TERM_MONTHS).is_ok());
        for term in [MAX_TERM_MONTHS + 1, 3_000_000_000, u32::MAX] {
            let err = Loan::new(100_000.0, 3.0, term).unwrap_err();
            assert!(matches!(err, MortgageError::InvalidInput { field, .. } if field == "term"));
        }
    }

    #[test]
    fn negative_principal_is_rejected() {
        let err = Loan::new(-1.0, 3.0, 360).unwrap_err();
        assert!(matches!(err, MortgageError::InvalidInput { field, .. } if field == "principal"));
    }

    #[test]
    fn current_interest_uses_offset() {
        let loan = Loan::new(120_000.0, 6.0, 360).unwrap();
        assert_relative_eq!(loan.current_interest(), 600.0, epsilon = 1e-9);

        let offset = loan.with_offset(20_000.0);
        assert_relative_eq!(offset.current_interest(), 500.0, epsilon = 1e-9);
    }

    #[test]
    fn current_interest_goes_negative_when_offset_exceeds_principal() {
        let loan = Loan::new(10_000.0, 6.0, 360).unwrap().with_offset(20_000.0);
        assert!(loan.current_interest() < 0.0);
    }

    #[test]
    fn advance_reduces_principal_by_excess_over_interest() {
        let loan = Loan::new(120_000.0, 6.0, 360).unwrap();
        let (next, interest) = loan.advance(1_000.0);

        assert_relative_eq!(interest, 600.0, epsilon = 1e-9);
        assert_relative_eq!(next.principal, 119_600.0, epsilon = 1e-6);
        assert_relative_eq!(next.interest_paid_cumulative, 600.0, epsilon = 1e-9);
        // the original value is untouched
        assert_eq!(loan.principal, 120_000.0);
    }

    #[test]
    fn short_payment_stalls_principal() {
        let loan = Loan::new(120_000.0, 6.0, 360).unwrap();
        let (next, interest) = loan.advance(250.0);

        assert_relative_eq!(interest, 600.0, epsilon = 1e-9);
        assert_eq!(next.principal, 120_000.0);
        assert_relative_eq!(next.interest_paid_cumulative, 250.0, epsilon = 1e-9);
    }

    #[test]
    fn overshooting_payment_drives_principal_negative() {
        let mut loan = Loan::new(1_000.0, 6.0, 12).unwrap();
        loan.apply_payment(5_000.0);
        assert!(loan.principal < 0.0);
        assert!(loan.is_paid_off());
    }

    #[test]
    fn apply_payment_matches_advance() {
        let loan = sample_loan().with_offset(50_000.0);
        let (expected, expected_interest) = loan.advance(4_000.0);

        let mut mutated = loan;
        let interest = mutated.apply_payment(4_000.0);

        assert_eq!(mutated, expected);
        assert_eq!(interest, expected_interest);
    }

    #[test]
    fn deposit_offset_accumulates() {
        let loan = sample_loan().with_offset(1_000.0).deposit_offset(500.0);
        assert_eq!(loan.offset_balance, 1_500.0);
    }

    #[test]
    fn coverage_checks() {
        let loan = Loan::new(10_000.0, 5.0, 120).unwrap();
        assert!(!loan.is_paid_off());
        assert!(!loan.is_covered_by_offset());
        assert!(loan.with_offset(10_000.0).is_covered_by_offset());
    }

    proptest! {
        #[test]
        fn prop_payment_round_trips_through_factor(
            principal in 1_000u32..5_000_000,
            rate_bp in 1u32..2_000,
            term in 1u32..600,
        ) {
            let rate = rate_bp as f64 / 100.0;
            let loan = Loan::new(principal as f64, rate, term).unwrap();
            let recovered = loan.monthly_payment * amortization_factor(rate, term);
            prop_assert!((recovered - principal as f64).abs() < 1e-6 * principal as f64);
        }

        #[test]
        fn prop_interest_paid_never_decreases(
            principal in 10_000u32..2_000_000,
            rate_bp in 1u32..1_500,
            payments in proptest::collection::vec(-5_000i32..20_000, 1..120),
        ) {
            let mut loan = Loan::new(principal as f64, rate_bp as f64 / 100.0, 360).unwrap();
            for payment in payments {
                let before = loan.interest_paid_cumulative;
                let principal_before = loan.principal;
                loan.apply_payment(payment as f64);
                if loan.principal <= 0.0 {
                    break;
                }
                prop_assert!(loan.interest_paid_cumulative >= before || payment < 0);
                prop_assert!(loan.principal <= principal_before);
            }
        }
    }
}
