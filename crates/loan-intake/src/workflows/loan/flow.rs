//! Two-step page flow: the intake form and the decision page.
//!
//! Each front end (HTTP, CLI) holds a [`FlowState`] value and moves it
//! forward with [`FlowState::submitted`] or back with [`FlowState::back`].

use serde::Serialize;

use super::domain::ApplicationId;
use super::eligibility::LoanDecision;
use super::messages::{
    approval_message, contact_message, rejection_message, repayment_message, CONTACT_PHONE,
};
use super::service::{ApplicationServiceError, SubmissionOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum FlowState {
    Intake(IntakePage),
    Result(ResultPage),
}

/// The form page, optionally carrying the inline error from the last attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntakePage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Everything the decision page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultPage {
    pub application_id: ApplicationId,
    pub accepted: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_to_repay: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

impl ResultPage {
    pub fn from_outcome(outcome: &SubmissionOutcome) -> Self {
        match &outcome.decision {
            LoanDecision::Approved { offer } => Self {
                application_id: outcome.application_id,
                accepted: true,
                message: approval_message(offer),
                loan_amount: Some(offer.loan_amount_display()),
                total_to_repay: Some(offer.total_to_repay_display()),
                contact_phone: Some(CONTACT_PHONE.to_string()),
            },
            LoanDecision::Rejected { reason } => Self {
                application_id: outcome.application_id,
                accepted: false,
                message: rejection_message(*reason),
                loan_amount: None,
                total_to_repay: None,
                contact_phone: None,
            },
        }
    }

    /// Plain-text rendering used by the CLI.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.message.clone()];
        if self.accepted {
            if let Some(total) = &self.total_to_repay {
                lines.push(repayment_message(total));
            }
            lines.push(contact_message());
        }
        lines
    }
}

impl FlowState {
    pub fn start() -> Self {
        FlowState::Intake(IntakePage::default())
    }

    /// Apply the result of a submission. Only the intake page accepts submissions;
    /// failures keep the applicant on the form with the error inline.
    pub fn submitted(self, result: Result<SubmissionOutcome, ApplicationServiceError>) -> Self {
        match self {
            FlowState::Intake(_) => match result {
                Ok(outcome) => FlowState::Result(ResultPage::from_outcome(&outcome)),
                Err(err) => FlowState::Intake(IntakePage {
                    error: Some(err.to_string()),
                }),
            },
            state @ FlowState::Result(_) => state,
        }
    }

    /// Leave the decision page for a fresh form.
    pub fn back(self) -> Self {
        FlowState::start()
    }

    pub fn result(&self) -> Option<&ResultPage> {
        match self {
            FlowState::Result(page) => Some(page),
            FlowState::Intake(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FlowState::Intake(page) => page.error.as_deref(),
            FlowState::Result(_) => None,
        }
    }
}
