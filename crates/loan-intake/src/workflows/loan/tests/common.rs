use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::loan::domain::{
    ApplicationId, JobStatus, LoanApplication, LoanApplicationForm, LoanApplicationRecord,
};
use crate::workflows::loan::repository::{
    ApplicationStore, Notice, Notifier, NotifyError, StoreError,
};
use crate::workflows::loan::{loan_router, LoanApplicationService};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

pub(super) fn form() -> LoanApplicationForm {
    LoanApplicationForm {
        name: "Ivan Petrov".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1995, 3, 10).expect("valid date"),
        email: "ivan.petrov@example.com".to_string(),
        phone: "+79161234567".to_string(),
        job_status: JobStatus::Employed,
        salary: "500".to_string(),
        other_loans: "50".to_string(),
    }
}

pub(super) fn unemployed_minor_form() -> LoanApplicationForm {
    LoanApplicationForm {
        birth_date: NaiveDate::from_ymd_opt(2008, 1, 1).expect("valid date"),
        job_status: JobStatus::Unemployed,
        salary: "50".to_string(),
        ..form()
    }
}

pub(super) fn application() -> LoanApplication {
    crate::workflows::loan::validate_form(form(), today()).expect("fixture form is valid")
}

pub(super) fn build_service() -> (
    LoanApplicationService<MemoryStore, RecordingNotifier>,
    Arc<MemoryStore>,
    Arc<RecordingNotifier>,
) {
    let store = Arc::new(MemoryStore::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let service = LoanApplicationService::new(store.clone(), notifier.clone());
    (service, store, notifier)
}

/// Emulates the table's UNIQUE constraints on email and phone.
#[derive(Default)]
pub(super) struct MemoryStore {
    records: Mutex<BTreeMap<ApplicationId, LoanApplication>>,
}

impl MemoryStore {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("store mutex poisoned").len()
    }
}

impl ApplicationStore for MemoryStore {
    fn exists(&self, email: &str, phone: &str) -> Result<bool, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard
            .values()
            .any(|record| record.email == email || record.phone == phone))
    }

    fn insert(&self, application: &LoanApplication) -> Result<ApplicationId, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.values().any(|record| {
            record.email == application.email || record.phone == application.phone
        }) {
            return Err(StoreError::Duplicate);
        }
        let id = ApplicationId(guard.len() as i64 + 1);
        guard.insert(id, application.clone());
        Ok(id)
    }

    fn fetch(&self, id: ApplicationId) -> Result<Option<LoanApplicationRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(&id).cloned().map(|application| LoanApplicationRecord {
            id,
            application,
        }))
    }
}

/// Passes the pre-check but loses the race at insert time.
pub(super) struct RacingStore;

impl ApplicationStore for RacingStore {
    fn exists(&self, _email: &str, _phone: &str) -> Result<bool, StoreError> {
        Ok(false)
    }

    fn insert(&self, _application: &LoanApplication) -> Result<ApplicationId, StoreError> {
        Err(StoreError::Duplicate)
    }

    fn fetch(&self, _id: ApplicationId) -> Result<Option<LoanApplicationRecord>, StoreError> {
        Ok(None)
    }
}

pub(super) struct UnavailableStore;

impl ApplicationStore for UnavailableStore {
    fn exists(&self, _email: &str, _phone: &str) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn insert(&self, _application: &LoanApplication) -> Result<ApplicationId, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: ApplicationId) -> Result<Option<LoanApplicationRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub(super) fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notifier mutex poisoned").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) -> Result<(), NotifyError> {
        self.notices
            .lock()
            .expect("notifier mutex poisoned")
            .push(notice.clone());
        Ok(())
    }
}

pub(super) struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn notify(&self, _notice: &Notice) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("connection refused".to_string()))
    }
}

pub(super) fn router_with_service(
    service: LoanApplicationService<MemoryStore, RecordingNotifier>,
) -> axum::Router {
    loan_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
