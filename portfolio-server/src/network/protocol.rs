//! Protocol Messages
//!
//! JSON bodies exchanged with the site. Field names match what the
//! front-end already sends and reads.

use serde::{Deserialize, Serialize};

use crate::contact::Delivery;
use crate::projects::Project;

// =============================================================================
// CLIENT -> SERVER
// =============================================================================

/// Terminal command line.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TerminalRequest {
    /// Raw input as typed
    #[serde(default)]
    pub command: String,
}

// =============================================================================
// SERVER -> CLIENT
// =============================================================================

/// Successful contact submission.
#[derive(Debug, Clone, Serialize)]
pub struct SendEmailResponse {
    /// Always `true`
    pub success: bool,
    /// Names the relay that accepted the message
    pub message: String,
}

impl From<Delivery> for SendEmailResponse {
    fn from(delivery: Delivery) -> Self {
        Self { success: true, message: delivery.message() }
    }
}

/// Error body for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Client-facing message
    pub error: String,
}

/// Filtered project list.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectList<'a> {
    /// Matching projects in catalog order
    pub projects: Vec<&'a Project>,
    /// Number of matches
    pub count: usize,
}

impl<'a> ProjectList<'a> {
    /// Wrap a filter result.
    pub fn new(projects: Vec<&'a Project>) -> Self {
        let count = projects.len();
        Self { projects, count }
    }
}

/// Liveness probe.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"`
    pub status: &'static str,
    /// Crate version
    pub version: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;
    use crate::projects::PROJECTS;

    #[test]
    fn test_send_email_response_from_delivery() {
        let delivery = Delivery { id: Uuid::new_v4(), relay: "Formspree" };
        let body = serde_json::to_value(SendEmailResponse::from(delivery)).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Email sent successfully via Formspree!");
    }

    #[test]
    fn test_terminal_request_defaults_command() {
        let req: TerminalRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.command, "");
    }

    #[test]
    fn test_project_list_counts() {
        let list = ProjectList::new(PROJECTS.iter().take(2).collect());
        let body = serde_json::to_value(&list).unwrap();
        assert_eq!(body["count"], 2);
        assert!(body["projects"][0]["githubUrl"].is_string());
    }
}
