//! Email relays.
//!
//! Each relay forwards a validated [`ContactMessage`] to a third-party
//! mail API with a blocking `ureq` call. Callers on the async runtime run
//! relays inside `spawn_blocking`.

use serde_json::{json, Value};
use thiserror::Error;

use crate::config::RelayConfig;
use super::message::ContactMessage;

/// Relay errors.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Relay has no credentials.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// Relay answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// Request never got an answer.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl From<ureq::Error> for RelayError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(status, response) => RelayError::Status {
                status,
                body: response.into_string().unwrap_or_default(),
            },
            other => RelayError::Transport(other.to_string()),
        }
    }
}

/// A mail delivery backend.
pub trait Relay: Send + Sync {
    /// Name shown in the success message.
    fn name(&self) -> &'static str;

    /// Check if credentials are present. Unconfigured relays are skipped.
    fn is_configured(&self) -> bool;

    /// Deliver one message.
    fn send(&self, message: &ContactMessage) -> Result<(), RelayError>;
}

fn agent(config: &RelayConfig) -> ureq::Agent {
    ureq::AgentBuilder::new().timeout(config.timeout).build()
}

// =============================================================================
// EMAILJS
// =============================================================================

/// EmailJS REST relay.
pub struct EmailJsRelay {
    agent: ureq::Agent,
    endpoint: String,
    service_id: Option<String>,
    template_id: Option<String>,
    user_id: Option<String>,
    to_email: String,
}

impl EmailJsRelay {
    /// Create from relay config.
    pub fn new(config: &RelayConfig) -> Self {
        Self {
            agent: agent(config),
            endpoint: config.emailjs_endpoint.clone(),
            service_id: config.emailjs_service_id.clone(),
            template_id: config.emailjs_template_id.clone(),
            user_id: config.emailjs_user_id.clone(),
            to_email: config.to_email.clone(),
        }
    }

    /// Request body for a message.
    pub fn payload(&self, message: &ContactMessage) -> Value {
        json!({
            "service_id": self.service_id,
            "template_id": self.template_id,
            "user_id": self.user_id,
            "template_params": {
                "from_name": message.name,
                "from_email": message.email,
                "subject": message.subject,
                "message": message.message,
                "to_email": self.to_email,
                "timestamp": message.timestamp(),
            },
        })
    }
}

impl Relay for EmailJsRelay {
    fn name(&self) -> &'static str {
        "EmailJS"
    }

    fn is_configured(&self) -> bool {
        self.service_id.is_some() && self.template_id.is_some() && self.user_id.is_some()
    }

    fn send(&self, message: &ContactMessage) -> Result<(), RelayError> {
        if !self.is_configured() {
            return Err(RelayError::NotConfigured(self.name()));
        }

        self.agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_json(self.payload(message))?;
        Ok(())
    }
}

// =============================================================================
// FORMSPREE
// =============================================================================

/// Formspree form relay.
pub struct FormspreeRelay {
    agent: ureq::Agent,
    endpoint: String,
    form_id: Option<String>,
}

impl FormspreeRelay {
    /// Create from relay config.
    pub fn new(config: &RelayConfig) -> Self {
        Self {
            agent: agent(config),
            endpoint: config.formspree_endpoint.trim_end_matches('/').to_string(),
            form_id: config.formspree_form_id.clone(),
        }
    }

    /// Request body for a message. The body is framed as a terminal
    /// transcript so it reads the same as the site.
    pub fn payload(&self, message: &ContactMessage) -> Value {
        let framed = format!(
            "\nTERMINAL_CONTACT_FORM_SUBMISSION\n\
             ================================\n\
             \n\
             FROM: {name} <{email}>\n\
             SUBJECT: {subject}\n\
             TIMESTAMP: {timestamp}\n\
             SOURCE: NARUTO_PORTFOLIO_CONTACT_FORM\n\
             \n\
             MESSAGE:\n\
             {body}\n\
             \n\
             ================================\n\
             SYSTEM_INFO: SENT_VIA_FORMSPREE_FALLBACK\n",
            name = message.name,
            email = message.email,
            subject = message.subject,
            timestamp = message.timestamp(),
            body = message.message,
        );

        json!({
            "name": message.name,
            "email": message.email,
            "subject": message.subject,
            "message": framed,
        })
    }
}

impl Relay for FormspreeRelay {
    fn name(&self) -> &'static str {
        "Formspree"
    }

    fn is_configured(&self) -> bool {
        self.form_id.is_some()
    }

    fn send(&self, message: &ContactMessage) -> Result<(), RelayError> {
        let Some(form_id) = &self.form_id else {
            return Err(RelayError::NotConfigured(self.name()));
        };

        let url = format!("{}/{}", self.endpoint, form_id);
        self.agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_json(self.payload(message))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::message::ContactRequest;

    fn message() -> ContactMessage {
        ContactRequest {
            name: Some("Naruto".into()),
            email: Some("naruto@konoha.jp".into()),
            subject: None,
            message: Some("Believe it".into()),
        }
        .validate()
        .unwrap()
    }

    fn configured() -> RelayConfig {
        RelayConfig {
            emailjs_service_id: Some("svc".into()),
            emailjs_template_id: Some("tpl".into()),
            emailjs_user_id: Some("pub".into()),
            formspree_form_id: Some("abc123".into()),
            ..RelayConfig::default()
        }
    }

    #[test]
    fn test_emailjs_payload_shape() {
        let relay = EmailJsRelay::new(&configured());
        let body = relay.payload(&message());

        assert_eq!(body["service_id"], "svc");
        assert_eq!(body["template_id"], "tpl");
        assert_eq!(body["user_id"], "pub");
        assert_eq!(body["template_params"]["from_name"], "Naruto");
        assert_eq!(body["template_params"]["from_email"], "naruto@konoha.jp");
        assert_eq!(body["template_params"]["subject"], "Portfolio Contact Form");
        assert_eq!(body["template_params"]["message"], "Believe it");
        assert_eq!(body["template_params"]["to_email"], "ufoundashwin@gmail.com");
        assert!(body["template_params"]["timestamp"].as_str().is_some());
    }

    #[test]
    fn test_formspree_payload_is_framed() {
        let relay = FormspreeRelay::new(&configured());
        let body = relay.payload(&message());

        assert_eq!(body["name"], "Naruto");
        let framed = body["message"].as_str().unwrap();
        assert!(framed.contains("TERMINAL_CONTACT_FORM_SUBMISSION"));
        assert!(framed.contains("FROM: Naruto <naruto@konoha.jp>"));
        assert!(framed.contains("SUBJECT: Portfolio Contact Form"));
        assert!(framed.contains("MESSAGE:\nBelieve it\n"));
        assert!(framed.contains("SYSTEM_INFO: SENT_VIA_FORMSPREE_FALLBACK"));
    }

    #[test]
    fn test_unconfigured_relays() {
        let config = RelayConfig::default();
        let emailjs = EmailJsRelay::new(&config);
        let formspree = FormspreeRelay::new(&config);

        assert!(!emailjs.is_configured());
        assert!(!formspree.is_configured());
        assert!(matches!(emailjs.send(&message()), Err(RelayError::NotConfigured("EmailJS"))));
        assert!(matches!(formspree.send(&message()), Err(RelayError::NotConfigured("Formspree"))));
    }

    #[test]
    fn test_partial_emailjs_credentials_are_unconfigured() {
        let config = RelayConfig {
            emailjs_service_id: Some("svc".into()),
            ..RelayConfig::default()
        };
        assert!(!EmailJsRelay::new(&config).is_configured());
    }
}
