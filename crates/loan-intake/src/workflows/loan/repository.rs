use serde::{Deserialize, Serialize};

use super::domain::{ApplicationId, LoanApplication, LoanApplicationRecord};

/// Storage abstraction so the service module can be exercised in isolation.
///
/// Implementations must enforce uniqueness of email and phone themselves and
/// report a collision from `insert` as [`StoreError::Duplicate`]; `exists` is
/// only an early, friendlier check.
pub trait ApplicationStore: Send + Sync {
    fn exists(&self, email: &str, phone: &str) -> Result<bool, StoreError>;
    fn insert(&self, application: &LoanApplication) -> Result<ApplicationId, StoreError>;
    fn fetch(&self, id: ApplicationId) -> Result<Option<LoanApplicationRecord>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("an application with this email or phone already exists")]
    Duplicate,
    #[error("stored record is malformed: {0}")]
    Corrupt(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Outbound decision notice hook (SMTP in production, recorders in tests).
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice) -> Result<(), NotifyError>;
}

/// Plaintext message addressed to the applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("invalid mail address: {0}")]
    Address(String),
    #[error("failed to build message: {0}")]
    Build(String),
    #[error("mail transport unavailable: {0}")]
    Transport(String),
}
