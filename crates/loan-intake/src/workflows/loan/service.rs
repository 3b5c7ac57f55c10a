use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{ApplicationId, LoanApplicationForm, LoanApplicationRecord};
use super::eligibility::{EligibilityEngine, LoanDecision};
use super::messages::decision_notice;
use super::repository::{ApplicationStore, Notifier, StoreError};
use super::validation::{validate_form, ValidationError};

/// Service composing validation, the store, the eligibility rules, and the notifier.
pub struct LoanApplicationService<S, N> {
    store: Arc<S>,
    notifier: Arc<N>,
    engine: EligibilityEngine,
}

/// Result of an accepted submission: the stored id and the decision reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionOutcome {
    pub application_id: ApplicationId,
    #[serde(flatten)]
    pub decision: LoanDecision,
}

impl<S, N> LoanApplicationService<S, N>
where
    S: ApplicationStore + 'static,
    N: Notifier + 'static,
{
    pub fn new(store: Arc<S>, notifier: Arc<N>) -> Self {
        Self {
            store,
            notifier,
            engine: EligibilityEngine,
        }
    }

    /// Submit a form, evaluating the applicant's age against the local date.
    pub fn submit(
        &self,
        form: LoanApplicationForm,
    ) -> Result<SubmissionOutcome, ApplicationServiceError> {
        self.submit_on(form, Local::now().date_naive())
    }

    /// Validate, store, decide, and notify. Rejections are stored too; only
    /// validation failures and duplicates leave the store untouched.
    pub fn submit_on(
        &self,
        form: LoanApplicationForm,
        today: NaiveDate,
    ) -> Result<SubmissionOutcome, ApplicationServiceError> {
        let application = validate_form(form, today)?;

        if self.store.exists(&application.email, &application.phone)? {
            return Err(ApplicationServiceError::Duplicate);
        }

        let application_id = self.store.insert(&application).map_err(|err| match err {
            StoreError::Duplicate => ApplicationServiceError::Duplicate,
            other => ApplicationServiceError::Store(other),
        })?;

        let decision = self.engine.decide(&application, today);
        info!(%application_id, decision = %decision.summary(), "loan application decided");

        let notice = decision_notice(&application.email, &decision);
        if let Err(err) = self.notifier.notify(&notice) {
            warn!(%application_id, error = %err, "failed to deliver decision notice");
        }

        Ok(SubmissionOutcome {
            application_id,
            decision,
        })
    }

    pub fn get(
        &self,
        application_id: ApplicationId,
    ) -> Result<LoanApplicationRecord, ApplicationServiceError> {
        self.store
            .fetch(application_id)?
            .ok_or(ApplicationServiceError::NotFound(application_id))
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("A user with this phone number or email already exists.")]
    Duplicate,
    #[error("application {0} not found")]
    NotFound(ApplicationId),
    #[error(transparent)]
    Store(#[from] StoreError),
}
