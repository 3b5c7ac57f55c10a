//! Fixed applicant-facing message set.

use super::eligibility::{LoanDecision, RejectionReason};
use super::offer::LoanOffer;
use super::repository::Notice;

/// Number the applicant calls to collect an approved loan.
pub const CONTACT_PHONE: &str = "+77012345678";

pub const APPROVED_SUBJECT: &str = "Your loan has been approved";
pub const REJECTED_SUBJECT: &str = "Your loan has been rejected";

pub fn approval_message(offer: &LoanOffer) -> String {
    format!(
        "Your loan is ready! We can lend you {} rubles for 1 year.",
        offer.loan_amount_display()
    )
}

/// `total_to_repay` is the already formatted amount.
pub fn repayment_message(total_to_repay: &str) -> String {
    format!("You will need to repay {total_to_repay} rubles.")
}

pub fn contact_message() -> String {
    format!("To receive the money, please call {CONTACT_PHONE}")
}

pub fn rejection_message(reason: RejectionReason) -> String {
    format!("Sorry, we cannot help you. {}", reason.applicant_message())
}

/// Email sent to the applicant once a decision exists.
pub fn decision_notice(recipient: &str, decision: &LoanDecision) -> Notice {
    let (subject, body) = match decision {
        LoanDecision::Approved { offer } => (
            APPROVED_SUBJECT,
            format!(
                "Congratulations, your loan of {} rubles has been approved. You will need to repay {} rubles. To receive the money, please call {CONTACT_PHONE}.",
                offer.loan_amount_display(),
                offer.total_to_repay_display()
            ),
        ),
        LoanDecision::Rejected { reason } => (
            REJECTED_SUBJECT,
            format!(
                "Unfortunately, your loan request has been rejected. Reason: {}",
                reason.applicant_message()
            ),
        ),
    };

    Notice {
        recipient: recipient.to_string(),
        subject: subject.to_string(),
        body,
    }
}
