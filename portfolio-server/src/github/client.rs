//! GitHub REST client.
//!
//! Unauthenticated, blocking. Two calls per refresh: the user profile (for
//! the public repository count) and the latest public events.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::GithubConfig;

/// Events requested per refresh.
pub const EVENTS_PER_PAGE: u32 = 8;

/// GitHub errors.
#[derive(Debug, Error)]
pub enum GithubError {
    /// Non-success status.
    #[error("GitHub returned HTTP {0}")]
    Status(u16),

    /// Request never got an answer.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Body did not decode.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<ureq::Error> for GithubError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(status, _) => GithubError::Status(status),
            other => GithubError::Transport(other.to_string()),
        }
    }
}

impl From<std::io::Error> for GithubError {
    fn from(e: std::io::Error) -> Self {
        GithubError::Decode(e.to_string())
    }
}

/// Subset of `GET /users/{user}`.
#[derive(Clone, Debug, Deserialize)]
pub struct GithubUser {
    /// Login name
    pub login: String,
    /// Public repository count
    #[serde(default)]
    pub public_repos: u32,
}

/// Repository reference on an event.
#[derive(Clone, Debug, Deserialize)]
pub struct EventRepo {
    /// `owner/name`
    pub name: String,
}

/// Commit summary inside a push payload.
#[derive(Clone, Debug, Deserialize)]
pub struct EventCommit {
    /// Commit message
    #[serde(default)]
    pub message: String,
}

/// Fields of the event payload the feed uses.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EventPayload {
    /// Push commits
    #[serde(default)]
    pub commits: Option<Vec<EventCommit>>,
    /// What a create event created
    #[serde(default)]
    pub ref_type: Option<String>,
    /// Issue / pull request action
    #[serde(default)]
    pub action: Option<String>,
}

/// One public event.
#[derive(Clone, Debug, Deserialize)]
pub struct GithubEvent {
    /// Event type, e.g. `PushEvent`
    #[serde(rename = "type")]
    pub kind: String,
    /// Repository
    pub repo: EventRepo,
    /// When it happened
    pub created_at: DateTime<Utc>,
    /// Payload
    #[serde(default)]
    pub payload: EventPayload,
}

/// Where activity comes from.
pub trait ActivitySource: Send + Sync {
    /// Fetch the profile and recent events.
    fn fetch(&self) -> Result<(GithubUser, Vec<GithubEvent>), GithubError>;
}

/// Live GitHub API client.
pub struct GithubClient {
    agent: ureq::Agent,
    api_base: String,
    username: String,
}

impl GithubClient {
    /// Create from config.
    pub fn new(config: &GithubConfig) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout(config.timeout)
                .user_agent(concat!("portfolio-server/", env!("CARGO_PKG_VERSION")))
                .build(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            username: config.username.clone(),
        }
    }

    /// Profile URL.
    pub fn user_url(&self) -> String {
        format!("{}/users/{}", self.api_base, self.username)
    }

    /// Public events URL.
    pub fn events_url(&self) -> String {
        format!(
            "{}/users/{}/events/public?per_page={}",
            self.api_base, self.username, EVENTS_PER_PAGE
        )
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, GithubError> {
        debug!(url, "GitHub request");
        let response = self
            .agent
            .get(url)
            .set("Accept", "application/vnd.github+json")
            .call()?;
        Ok(response.into_json()?)
    }
}

impl ActivitySource for GithubClient {
    fn fetch(&self) -> Result<(GithubUser, Vec<GithubEvent>), GithubError> {
        let user = self.get_json(&self.user_url())?;
        let events = self.get_json(&self.events_url())?;
        Ok((user, events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let config = GithubConfig {
            api_base: "https://api.example.com/".into(),
            username: "octo".into(),
            ..GithubConfig::default()
        };
        let client = GithubClient::new(&config);

        assert_eq!(client.user_url(), "https://api.example.com/users/octo");
        assert_eq!(
            client.events_url(),
            "https://api.example.com/users/octo/events/public?per_page=8"
        );
    }

    #[test]
    fn test_event_decodes_with_sparse_payload() {
        let raw = r#"[
            {"type": "WatchEvent", "repo": {"name": "a/b"}, "created_at": "2024-05-01T10:00:00Z", "payload": {"action": "started"}},
            {"type": "PublicEvent", "repo": {"name": "a/c"}, "created_at": "2024-05-01T11:00:00Z"}
        ]"#;
        let events: Vec<GithubEvent> = serde_json::from_str(raw).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].payload.action.as_deref(), Some("started"));
        assert!(events[1].payload.commits.is_none());
    }

    #[test]
    fn test_user_decodes() {
        let user: GithubUser = serde_json::from_str(r#"{"login": "octo", "public_repos": 12, "id": 1}"#).unwrap();
        assert_eq!(user.public_repos, 12);
    }
}
