//! SMTP email sending with lettre.
//!
//! The transport is built once and reused across sends. Batch delivery
//! isolates failures per recipient: one bad address never aborts the
//! rest of the batch.

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, warn};

use quizdeck_core::config::SmtpConfig;
use quizdeck_core::error::AppError;
use quizdeck_core::result::AppResult;

/// Email message to be sent.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: Option<String>,
    /// Optional file attachment: (filename, content type, bytes).
    pub attachment: Option<(String, String, Vec<u8>)>,
}

impl EmailMessage {
    /// Builds a plain-text message.
    pub fn text(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            text_body: body.into(),
            html_body: None,
            attachment: None,
        }
    }

    /// Adds an HTML alternative body.
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html_body = Some(html.into());
        self
    }

    /// Adds a file attachment.
    pub fn with_attachment(
        mut self,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.attachment = Some((filename.into(), content_type.into(), bytes));
        self
    }
}

/// Outcome of a batch send: who got the mail and who did not.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Number of successfully delivered messages.
    pub sent: usize,
    /// Recipients that failed, with the failure reason.
    pub failed: Vec<(String, String)>,
}

impl BatchOutcome {
    /// True when at least one message was attempted and none succeeded.
    pub fn all_failed(&self) -> bool {
        self.sent == 0 && !self.failed.is_empty()
    }

    /// Total number of attempted deliveries.
    pub fn attempted(&self) -> usize {
        self.sent + self.failed.len()
    }
}

/// Sends email over a shared SMTP transport.
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl std::fmt::Debug for Mailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mailer").field("from", &self.from).finish()
    }
}

impl Mailer {
    /// Builds a mailer from SMTP configuration.
    ///
    /// An empty username disables authentication so local development
    /// relays (MailHog on port 1025) work out of the box.
    pub fn new(config: &SmtpConfig) -> AppResult<Self> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host).port(config.port);

        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        let from = format!("{} <{}>", config.from_name, config.from_address)
            .parse::<Mailbox>()
            .map_err(|e| AppError::mail(format!("Invalid from address: {e}")))?;

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    /// Sends a single message.
    pub async fn send(&self, message: &EmailMessage) -> AppResult<()> {
        let email = self.build_message(message)?;

        self.transport
            .send(email)
            .await
            .map_err(|e| AppError::mail(format!("SMTP delivery to {} failed: {e}", message.to)))?;

        info!(to = %message.to, subject = %message.subject, "email sent");
        Ok(())
    }

    /// Sends a batch of messages, collecting per-recipient outcomes.
    pub async fn send_batch(&self, messages: &[EmailMessage]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for message in messages {
            match self.send(message).await {
                Ok(()) => outcome.sent += 1,
                Err(e) => {
                    warn!(to = %message.to, error = %e, "batch email delivery failed");
                    outcome.failed.push((message.to.clone(), e.to_string()));
                }
            }
        }
        outcome
    }

    fn build_message(&self, message: &EmailMessage) -> AppResult<Message> {
        let to = message
            .to
            .parse::<Mailbox>()
            .map_err(|e| AppError::mail(format!("Invalid recipient {}: {e}", message.to)))?;

        let builder = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&message.subject);

        let text = SinglePart::builder()
            .header(ContentType::TEXT_PLAIN)
            .body(message.text_body.clone());

        let mut body = match &message.html_body {
            Some(html) => MultiPart::alternative()
                .singlepart(text)
                .singlepart(SinglePart::builder().header(ContentType::TEXT_HTML).body(html.clone())),
            None => MultiPart::mixed().singlepart(text),
        };

        if let Some((filename, content_type, bytes)) = &message.attachment {
            let content_type = ContentType::parse(content_type)
                .map_err(|e| AppError::mail(format!("Invalid attachment content type: {e}")))?;
            let part = Attachment::new(filename.clone()).body(bytes.clone(), content_type);
            body = MultiPart::mixed().multipart(body).singlepart(part);
        }

        builder
            .multipart(body)
            .map_err(|e| AppError::mail(format!("Failed to build message: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_outcome_all_failed() {
        let outcome = BatchOutcome {
            sent: 0,
            failed: vec![("a@x.com".into(), "boom".into())],
        };
        assert!(outcome.all_failed());
        assert_eq!(outcome.attempted(), 1);
    }

    #[test]
    fn test_batch_outcome_partial_failure_is_not_all_failed() {
        let outcome = BatchOutcome {
            sent: 2,
            failed: vec![("a@x.com".into(), "boom".into())],
        };
        assert!(!outcome.all_failed());
        assert_eq!(outcome.attempted(), 3);
    }

    #[test]
    fn test_empty_batch_is_not_all_failed() {
        assert!(!BatchOutcome::default().all_failed());
    }

    #[test]
    fn test_mailer_builds_without_credentials() {
        let config = SmtpConfig::default();
        assert!(config.username.is_empty());
        assert!(Mailer::new(&config).is_ok());
    }

    #[test]
    fn test_mailer_builds_with_credentials() {
        let config = SmtpConfig {
            username: "mailer@quizdeck.local".to_string(),
            password: "secret".to_string(),
            ..SmtpConfig::default()
        };
        assert!(Mailer::new(&config).is_ok());
    }

    #[test]
    fn test_mailer_rejects_invalid_from_address() {
        let config = SmtpConfig {
            from_address: "not an address".to_string(),
            ..SmtpConfig::default()
        };
        assert!(Mailer::new(&config).is_err());
    }
}
