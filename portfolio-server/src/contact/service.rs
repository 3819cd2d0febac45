//! Contact delivery with relay fallback.

use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::config::RelayConfig;
use super::message::{ContactError, ContactMessage, ContactRequest};
use super::relay::{EmailJsRelay, FormspreeRelay, Relay};

/// Successful delivery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delivery {
    /// Submission id
    pub id: Uuid,
    /// Relay that accepted the message
    pub relay: &'static str,
}

impl Delivery {
    /// Client-facing success message.
    pub fn message(&self) -> String {
        format!("Email sent successfully via {}!", self.relay)
    }
}

/// Validates submissions and walks the relay chain.
#[derive(Clone)]
pub struct ContactService {
    relays: Vec<Arc<dyn Relay>>,
}

impl ContactService {
    /// Service with an explicit relay order.
    pub fn new(relays: Vec<Arc<dyn Relay>>) -> Self {
        Self { relays }
    }

    /// EmailJS first, Formspree as fallback.
    pub fn from_config(config: &RelayConfig) -> Self {
        let emailjs: Arc<dyn Relay> = Arc::new(EmailJsRelay::new(config));
        let formspree: Arc<dyn Relay> = Arc::new(FormspreeRelay::new(config));
        let service = Self::new(vec![emailjs, formspree]);
        for relay in &service.relays {
            if !relay.is_configured() {
                warn!(relay = relay.name(), "Relay has no credentials and will be skipped");
            }
        }
        service
    }

    /// Validate and deliver one submission.
    ///
    /// Validation failures never reach a relay.
    pub async fn submit(&self, request: ContactRequest) -> Result<Delivery, ContactError> {
        let message = request.validate()?;
        let relays = self.relays.clone();

        tokio::task::spawn_blocking(move || deliver(&relays, &message))
            .await
            .map_err(|e| ContactError::Internal(e.to_string()))?
    }
}

impl std::fmt::Debug for ContactService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.relays.iter().map(|r| r.name()).collect();
        f.debug_struct("ContactService").field("relays", &names).finish()
    }
}

/// Try each configured relay in order; first success wins.
#[instrument(skip_all, fields(submission = %message.id))]
pub fn deliver(relays: &[Arc<dyn Relay>], message: &ContactMessage) -> Result<Delivery, ContactError> {
    for relay in relays {
        if !relay.is_configured() {
            continue;
        }

        match relay.send(message) {
            Ok(()) => {
                info!(relay = relay.name(), "Contact message delivered");
                return Ok(Delivery { id: message.id, relay: relay.name() });
            }
            Err(e) => {
                warn!(relay = relay.name(), error = %e, "Relay failed, trying next");
            }
        }
    }

    warn!("All relays failed");
    Err(ContactError::DeliveryFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use crate::contact::relay::RelayError;

    struct MockRelay {
        name: &'static str,
        configured: bool,
        fail_with: Option<u16>,
        calls: AtomicUsize,
    }

    impl MockRelay {
        fn ok(name: &'static str) -> Arc<Self> {
            Arc::new(Self { name, configured: true, fail_with: None, calls: AtomicUsize::new(0) })
        }

        fn failing(name: &'static str, status: u16) -> Arc<Self> {
            Arc::new(Self { name, configured: true, fail_with: Some(status), calls: AtomicUsize::new(0) })
        }

        fn unconfigured(name: &'static str) -> Arc<Self> {
            Arc::new(Self { name, configured: false, fail_with: None, calls: AtomicUsize::new(0) })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Relay for MockRelay {
        fn name(&self) -> &'static str {
            self.name
        }

        fn is_configured(&self) -> bool {
            self.configured
        }

        fn send(&self, _message: &ContactMessage) -> Result<(), RelayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.fail_with {
                Some(status) => Err(RelayError::Status { status, body: String::new() }),
                None => Ok(()),
            }
        }
    }

    fn chain(relays: &[&Arc<MockRelay>]) -> ContactService {
        ContactService::new(relays.iter().map(|r| Arc::clone(*r) as Arc<dyn Relay>).collect())
    }

    fn valid_request() -> ContactRequest {
        ContactRequest {
            name: Some("A".into()),
            email: Some("a@b.co".into()),
            subject: None,
            message: Some("hello".into()),
        }
    }

    #[tokio::test]
    async fn test_first_relay_success() {
        let first = MockRelay::ok("EmailJS");
        let second = MockRelay::ok("Formspree");
        let service = chain(&[&first, &second]);

        let delivery = service.submit(valid_request()).await.unwrap();
        assert_eq!(delivery.relay, "EmailJS");
        assert_eq!(delivery.message(), "Email sent successfully via EmailJS!");
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 0);
    }

    #[tokio::test]
    async fn test_falls_back_to_second_relay() {
        let first = MockRelay::failing("EmailJS", 500);
        let second = MockRelay::ok("Formspree");
        let service = chain(&[&first, &second]);

        let delivery = service.submit(valid_request()).await.unwrap();
        assert_eq!(delivery.message(), "Email sent successfully via Formspree!");
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
    }

    #[tokio::test]
    async fn test_all_relays_fail() {
        let first = MockRelay::failing("EmailJS", 401);
        let second = MockRelay::failing("Formspree", 503);
        let service = chain(&[&first, &second]);

        let err = service.submit(valid_request()).await.unwrap_err();
        assert_eq!(err, ContactError::DeliveryFailed);
    }

    #[tokio::test]
    async fn test_unconfigured_relay_is_skipped() {
        let first = MockRelay::unconfigured("EmailJS");
        let second = MockRelay::ok("Formspree");
        let service = chain(&[&first, &second]);

        let delivery = service.submit(valid_request()).await.unwrap();
        assert_eq!(delivery.relay, "Formspree");
        assert_eq!(first.calls(), 0);
    }

    #[tokio::test]
    async fn test_no_relays_configured() {
        let service = ContactService::from_config(&RelayConfig::default());
        let err = service.submit(valid_request()).await.unwrap_err();
        assert_eq!(err, ContactError::DeliveryFailed);
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_relay() {
        let relay = MockRelay::ok("EmailJS");
        let service = chain(&[&relay]);

        let mut request = valid_request();
        request.message = None;
        assert_eq!(service.submit(request).await.unwrap_err(), ContactError::MissingFields);

        let mut request = valid_request();
        request.email = Some("nope".into());
        assert_eq!(service.submit(request).await.unwrap_err(), ContactError::InvalidEmail);

        assert_eq!(relay.calls(), 0);
    }
}
