mod policy;

pub use policy::{LoanDecision, RejectionReason};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use super::domain::{JobStatus, LoanApplication};
use super::offer::calculate_loan_offer;

pub const MIN_AGE: i32 = 18;
pub const MAX_AGE: i32 = 90;
pub const MIN_MONTHLY_SALARY: i64 = 100;

/// Whole calendar years between `birth_date` and `today`. The birthday itself counts as reached.
pub fn calculate_age(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

/// Apply the reject rules in fixed order; the first match wins.
pub fn check_eligibility(
    age: i32,
    salary: Decimal,
    job_status: JobStatus,
) -> Result<(), RejectionReason> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(RejectionReason::AgeOutOfRange);
    }
    if salary < Decimal::from(MIN_MONTHLY_SALARY) {
        return Err(RejectionReason::SalaryTooLow);
    }
    if job_status == JobStatus::Unemployed {
        return Err(RejectionReason::NotEmployed);
    }
    Ok(())
}

/// Stateless evaluator producing a decision (and offer on approval) for an application.
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityEngine;

impl EligibilityEngine {
    pub fn decide(&self, application: &LoanApplication, today: NaiveDate) -> LoanDecision {
        let age = calculate_age(application.birth_date, today);
        match check_eligibility(age, application.salary, application.job_status) {
            Ok(()) => LoanDecision::Approved {
                offer: calculate_loan_offer(application.salary, application.other_loans),
            },
            Err(reason) => LoanDecision::Rejected { reason },
        }
    }
}
