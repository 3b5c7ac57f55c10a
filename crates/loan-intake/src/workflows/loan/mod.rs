//! Loan application intake: form validation, eligibility rules, offer
//! arithmetic, persistence, and the applicant decision notice.

pub mod domain;
pub mod eligibility;
pub mod flow;
pub mod mailer;
pub mod messages;
pub mod offer;
pub mod repository;
pub mod router;
pub mod service;
pub mod sqlite;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationId, JobStatus, LoanApplication, LoanApplicationForm, LoanApplicationRecord,
    DEFAULT_PHONE_PREFIX,
};
pub use eligibility::{
    calculate_age, check_eligibility, EligibilityEngine, LoanDecision, RejectionReason,
};
pub use flow::{FlowState, IntakePage, ResultPage};
pub use mailer::{LogNotifier, SmtpNotifier};
pub use offer::{calculate_loan_offer, LoanOffer};
pub use repository::{ApplicationStore, Notice, Notifier, NotifyError, StoreError};
pub use router::loan_router;
pub use service::{ApplicationServiceError, LoanApplicationService, SubmissionOutcome};
pub use sqlite::SqliteApplicationStore;
pub use validation::{
    parse_amount, validate_email, validate_form, validate_phone, ValidationError,
};
