use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Multiple of the monthly free income that is offered.
pub const SALARY_MULTIPLIER: i64 = 10;
/// Flat monthly markup, 3%.
pub const MONTHLY_RATE: Decimal = Decimal::from_parts(3, 0, 0, false, 2);
pub const TERM_MONTHS: i64 = 12;

/// Loan amount and total repayment for an approved applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanOffer {
    pub loan_amount: Decimal,
    pub total_to_repay: Decimal,
}

impl LoanOffer {
    pub fn loan_amount_display(&self) -> String {
        format_money(self.loan_amount)
    }

    pub fn total_to_repay_display(&self) -> String {
        format_money(self.total_to_repay)
    }
}

/// `(salary - other_loans) * 10`, repaid with a simple 3%/month markup over 12 months.
///
/// No floor is applied: obligations above the salary yield a negative amount.
/// Inputs must be bounded by [`MAX_AMOUNT`](super::validation::MAX_AMOUNT), as `validate_form` ensures.
pub fn calculate_loan_offer(salary: Decimal, other_loans: Decimal) -> LoanOffer {
    let loan_amount = (salary - other_loans) * Decimal::from(SALARY_MULTIPLIER);
    let markup = Decimal::ONE + MONTHLY_RATE * Decimal::from(TERM_MONTHS);
    LoanOffer {
        loan_amount,
        total_to_repay: loan_amount * markup,
    }
}

/// Two decimal places, half-even rounding.
pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_is_thirty_six_percent() {
        let offer = calculate_loan_offer(Decimal::from(1), Decimal::ZERO);
        assert_eq!(offer.loan_amount, Decimal::from(10));
        assert_eq!(offer.total_to_repay, Decimal::new(1360, 2));
    }

    #[test]
    fn largest_accepted_salary_stays_in_range() {
        let cap = crate::workflows::loan::validation::MAX_AMOUNT;
        let offer = calculate_loan_offer(cap, Decimal::ZERO);
        assert_eq!(offer.loan_amount, cap * Decimal::from(10));
        assert_eq!(
            offer.total_to_repay_display(),
            "13600000000000000.00"
        );
    }

    #[test]
    fn format_money_pads_to_two_places() {
        assert_eq!(format_money(Decimal::from(4500)), "4500.00");
        assert_eq!(format_money(Decimal::new(12345, 3)), "12.34");
        assert_eq!(format_money(Decimal::new(-905, 1)), "-90.50");
    }
}
