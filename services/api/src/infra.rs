use chrono::NaiveDate;
use loan_intake::config::MailConfig;
use loan_intake::workflows::loan::{
    JobStatus, LogNotifier, Notice, Notifier, NotifyError, SmtpNotifier,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Notifier picked at startup: SMTP when sender secrets exist, otherwise log-only.
pub(crate) enum ConfiguredNotifier {
    Smtp(SmtpNotifier),
    Log(LogNotifier),
}

impl ConfiguredNotifier {
    pub(crate) fn from_config(mail: Option<&MailConfig>) -> Result<Self, NotifyError> {
        match mail {
            Some(config) => Ok(Self::Smtp(SmtpNotifier::new(config)?)),
            None => {
                warn!("SENDER_EMAIL/SENDER_PASSWORD not set; decision notices will only be logged");
                Ok(Self::Log(LogNotifier))
            }
        }
    }
}

impl Notifier for ConfiguredNotifier {
    fn notify(&self, notice: &Notice) -> Result<(), NotifyError> {
        match self {
            ConfiguredNotifier::Smtp(notifier) => notifier.notify(notice),
            ConfiguredNotifier::Log(notifier) => notifier.notify(notice),
        }
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_job_status(raw: &str) -> Result<JobStatus, String> {
    JobStatus::from_label(raw)
        .ok_or_else(|| format!("unknown job status '{raw}' (expected employed or unemployed)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_reports_format() {
        assert!(parse_date("2024-02-29").is_ok());
        let err = parse_date("29.02.2024").expect_err("wrong format");
        assert!(err.contains("YYYY-MM-DD"));
    }

    #[test]
    fn parse_job_status_is_case_insensitive() {
        assert_eq!(parse_job_status("Employed"), Ok(JobStatus::Employed));
        assert_eq!(parse_job_status(" unemployed "), Ok(JobStatus::Unemployed));
        assert!(parse_job_status("retired").is_err());
    }

    #[test]
    fn missing_mail_config_falls_back_to_log_notifier() {
        let notifier = ConfiguredNotifier::from_config(None).expect("log notifier");
        assert!(matches!(notifier, ConfiguredNotifier::Log(_)));
        let notice = Notice {
            recipient: "ivan@example.com".to_string(),
            subject: "Your loan has been approved".to_string(),
            body: "body".to_string(),
        };
        assert!(notifier.notify(&notice).is_ok());
    }
}
