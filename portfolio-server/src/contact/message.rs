//! Contact form submission and validation.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Subject used when the visitor leaves it blank.
pub const DEFAULT_SUBJECT: &str = "Portfolio Contact Form";

/// Contact errors. Display strings are the client-facing messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// Name, email or message missing or empty.
    #[error("Missing required fields")]
    MissingFields,

    /// Email address failed the format check.
    #[error("Invalid email format")]
    InvalidEmail,

    /// Every relay failed or none was configured.
    #[error("Failed to send email. Please try again or contact directly.")]
    DeliveryFailed,

    /// Delivery task could not run.
    #[error("Internal server error")]
    Internal(String),
}

/// Raw form body, as posted.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ContactRequest {
    /// Sender name
    #[serde(default)]
    pub name: Option<String>,
    /// Sender address
    #[serde(default)]
    pub email: Option<String>,
    /// Optional subject
    #[serde(default)]
    pub subject: Option<String>,
    /// Message body
    #[serde(default)]
    pub message: Option<String>,
}

/// A validated submission.
#[derive(Clone, Debug, Serialize)]
pub struct ContactMessage {
    /// Correlation id for logs
    pub id: Uuid,
    /// Sender name
    pub name: String,
    /// Sender address
    pub email: String,
    /// Subject, defaulted when blank
    pub subject: String,
    /// Message body
    pub message: String,
    /// When the submission was accepted
    pub received_at: DateTime<Local>,
}

impl ContactMessage {
    /// Local time in the `M/D/YYYY, h:mm:ss AM` form relays display.
    pub fn timestamp(&self) -> String {
        self.received_at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
    }
}

impl ContactRequest {
    /// Validate and stamp the submission.
    pub fn validate(self) -> Result<ContactMessage, ContactError> {
        let (name, email, message) = match (
            present(self.name),
            present(self.email),
            present(self.message),
        ) {
            (Some(name), Some(email), Some(message)) => (name, email, message),
            _ => return Err(ContactError::MissingFields),
        };

        if !is_valid_email(&email) {
            return Err(ContactError::InvalidEmail);
        }

        Ok(ContactMessage {
            id: Uuid::new_v4(),
            name,
            email,
            subject: present(self.subject).unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
            message,
            received_at: Local::now(),
        })
    }
}

fn present(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

/// Check `local@domain.tld` shape: exactly one `@`, no whitespace, and a dot
/// in the domain with at least one character on each side.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, subject: Option<&str>, message: &str) -> ContactRequest {
        ContactRequest {
            name: Some(name.into()),
            email: Some(email.into()),
            subject: subject.map(Into::into),
            message: Some(message.into()),
        }
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(is_valid_email("x@y.z"));

        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@.co"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("a@b@c.d"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_missing_message() {
        let mut req = request("A", "a@b.co", None, "x");
        req.message = None;
        assert_eq!(req.validate().unwrap_err(), ContactError::MissingFields);
    }

    #[test]
    fn test_empty_name_is_missing() {
        let req = request("", "a@b.co", None, "hello");
        assert_eq!(req.validate().unwrap_err(), ContactError::MissingFields);
    }

    #[test]
    fn test_missing_fields_checked_before_format() {
        let req = request("", "not-an-email", None, "hello");
        assert_eq!(req.validate().unwrap_err(), ContactError::MissingFields);
    }

    #[test]
    fn test_invalid_email() {
        let req = request("A", "a@b", None, "hello");
        assert_eq!(req.validate().unwrap_err(), ContactError::InvalidEmail);
    }

    #[test]
    fn test_subject_defaults() {
        let msg = request("A", "a@b.co", None, "hello").validate().unwrap();
        assert_eq!(msg.subject, DEFAULT_SUBJECT);

        let msg = request("A", "a@b.co", Some(""), "hello").validate().unwrap();
        assert_eq!(msg.subject, DEFAULT_SUBJECT);

        let msg = request("A", "a@b.co", Some("Hi"), "hello").validate().unwrap();
        assert_eq!(msg.subject, "Hi");
    }

    #[test]
    fn test_each_submission_gets_new_id() {
        let a = request("A", "a@b.co", None, "1").validate().unwrap();
        let b = request("A", "a@b.co", None, "1").validate().unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ContactError::MissingFields.to_string(), "Missing required fields");
        assert_eq!(ContactError::InvalidEmail.to_string(), "Invalid email format");
        assert_eq!(
            ContactError::DeliveryFailed.to_string(),
            "Failed to send email. Please try again or contact directly."
        );
    }
}
