use serde::{Deserialize, Serialize};

use super::super::offer::LoanOffer;

/// Outcome of the eligibility rules. Only approvals carry an offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum LoanDecision {
    Approved { offer: LoanOffer },
    Rejected { reason: RejectionReason },
}

impl LoanDecision {
    pub fn is_approved(&self) -> bool {
        matches!(self, LoanDecision::Approved { .. })
    }

    pub fn summary(&self) -> String {
        match self {
            LoanDecision::Approved { offer } => format!(
                "approved for {} (repay {})",
                offer.loan_amount_display(),
                offer.total_to_repay_display()
            ),
            LoanDecision::Rejected { reason } => format!("rejected: {}", reason.code()),
        }
    }
}

/// The three hard-coded reject conditions, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    AgeOutOfRange,
    SalaryTooLow,
    NotEmployed,
}

impl RejectionReason {
    pub const fn code(self) -> &'static str {
        match self {
            RejectionReason::AgeOutOfRange => "age out of range",
            RejectionReason::SalaryTooLow => "salary too low",
            RejectionReason::NotEmployed => "must be employed",
        }
    }

    /// Sentence shown on the result page.
    pub const fn applicant_message(self) -> &'static str {
        match self {
            RejectionReason::AgeOutOfRange => "Your age does not meet the requirements.",
            RejectionReason::SalaryTooLow => "Your salary is too low.",
            RejectionReason::NotEmployed => "You must be employed to receive a loan.",
        }
    }
}
