//! Outbound SMTP configuration.

use serde::{Deserialize, Serialize};

/// SMTP relay settings for reminder and report mail.
///
/// The defaults target a local development relay (e.g. MailHog) which
/// accepts unauthenticated plaintext connections on port 1025.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    /// SMTP server hostname.
    #[serde(default = "default_host")]
    pub host: String,
    /// SMTP server port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Username for SMTP AUTH. Empty disables authentication.
    #[serde(default)]
    pub username: String,
    /// Password for SMTP AUTH.
    #[serde(default)]
    pub password: String,
    /// Sender address placed in the From header.
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Human-readable sender name.
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            username: String::new(),
            password: String::new(),
            from_address: default_from_address(),
            from_name: default_from_name(),
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    1025
}

fn default_from_address() -> String {
    "noreply@quizdeck.local".to_string()
}

fn default_from_name() -> String {
    "QuizDeck".to_string()
}
