use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Store-assigned identifier for a persisted application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub i64);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Employment choice offered on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Employed,
    Unemployed,
}

impl JobStatus {
    pub const fn label(self) -> &'static str {
        match self {
            JobStatus::Employed => "employed",
            JobStatus::Unemployed => "unemployed",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "employed" => Some(Self::Employed),
            "unemployed" => Some(Self::Unemployed),
            _ => None,
        }
    }
}

/// Prefix the phone field is pre-filled with.
pub const DEFAULT_PHONE_PREFIX: &str = "+7";

fn default_phone() -> String {
    DEFAULT_PHONE_PREFIX.to_string()
}

/// Raw intake form as captured from the applicant. Amounts stay free text until validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanApplicationForm {
    pub name: String,
    pub birth_date: NaiveDate,
    pub email: String,
    #[serde(default = "default_phone")]
    pub phone: String,
    pub job_status: JobStatus,
    pub salary: String,
    pub other_loans: String,
}

/// Validated submission ready to be persisted and evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub name: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub phone: String,
    pub job_status: JobStatus,
    pub salary: Decimal,
    pub other_loans: Decimal,
}

/// Row of the `loan_applications` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanApplicationRecord {
    pub id: ApplicationId,
    #[serde(flatten)]
    pub application: LoanApplication,
}
