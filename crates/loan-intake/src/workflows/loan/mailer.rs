//! Notifier implementations: authenticated SMTP submission and a log-only fallback.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::info;

use crate::config::MailConfig;

use super::repository::{Notice, Notifier, NotifyError};

/// Sends notices through a STARTTLS relay, logging in with the sender credentials.
///
/// The send blocks the calling thread until the relay answers.
pub struct SmtpNotifier {
    sender: String,
    transport: SmtpTransport,
}

impl SmtpNotifier {
    pub fn new(config: &MailConfig) -> Result<Self, NotifyError> {
        let transport = SmtpTransport::starttls_relay(&config.smtp_host)
            .map_err(|err| NotifyError::Transport(err.to_string()))?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.sender_address.clone(),
                config.sender_password.clone(),
            ))
            .build();

        Ok(Self {
            sender: config.sender_address.clone(),
            transport,
        })
    }
}

impl Notifier for SmtpNotifier {
    fn notify(&self, notice: &Notice) -> Result<(), NotifyError> {
        let message = build_message(&self.sender, notice)?;
        self.transport
            .send(&message)
            .map_err(|err| NotifyError::Transport(err.to_string()))?;
        info!(recipient = %notice.recipient, subject = %notice.subject, "decision notice sent");
        Ok(())
    }
}

pub(crate) fn build_message(sender: &str, notice: &Notice) -> Result<Message, NotifyError> {
    let from = sender
        .parse::<Mailbox>()
        .map_err(|err| NotifyError::Address(format!("{sender}: {err}")))?;
    let to = notice
        .recipient
        .parse::<Mailbox>()
        .map_err(|err| NotifyError::Address(format!("{}: {err}", notice.recipient)))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(notice.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(notice.body.clone())
        .map_err(|err| NotifyError::Build(err.to_string()))
}

/// Used when no sender credentials are configured: the notice is only logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) -> Result<(), NotifyError> {
        info!(
            recipient = %notice.recipient,
            subject = %notice.subject,
            body = %notice.body,
            "mail not configured; notice logged only"
        );
        Ok(())
    }
}
