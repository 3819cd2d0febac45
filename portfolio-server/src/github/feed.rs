//! Activity feed cache and background refresh.

use std::sync::Arc;
use std::time::Duration;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{info, warn};

use super::client::ActivitySource;
use super::format::{format_event, FALLBACK_LINES};

/// What the activity panel shows.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActivityFeed {
    /// Terminal lines, newest first
    pub lines: Vec<String>,
    /// Public repository count from the last successful fetch
    pub repositories: u32,
    /// Lines came from GitHub rather than the fallback
    pub live: bool,
    /// Last refresh attempt
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for ActivityFeed {
    fn default() -> Self {
        Self {
            lines: FALLBACK_LINES.iter().map(|l| l.to_string()).collect(),
            repositories: 0,
            live: false,
            updated_at: None,
        }
    }
}

/// Shared, refreshable feed.
#[derive(Clone, Default)]
pub struct ActivityCache {
    inner: Arc<RwLock<ActivityFeed>>,
}

impl ActivityCache {
    /// Cache holding the fallback feed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current feed.
    pub async fn snapshot(&self) -> ActivityFeed {
        self.inner.read().await.clone()
    }

    /// Public repository count.
    pub async fn repositories(&self) -> u32 {
        self.inner.read().await.repositories
    }

    /// Fetch once and store the result. Failures install the fallback lines
    /// and keep the last known repository count.
    pub async fn refresh(&self, source: Arc<dyn ActivitySource>) {
        let fetched = tokio::task::spawn_blocking(move || source.fetch()).await;
        let now = Utc::now();
        let mut feed = self.inner.write().await;

        match fetched {
            Ok(Ok((user, events))) => {
                info!(events = events.len(), repos = user.public_repos, "GitHub activity refreshed");
                feed.lines = events.iter().map(format_event).collect();
                feed.repositories = user.public_repos;
                feed.live = true;
            }
            Ok(Err(e)) => {
                warn!(error = %e, "GitHub fetch failed, using fallback feed");
                feed.lines = ActivityFeed::default().lines;
                feed.live = false;
            }
            Err(e) => {
                warn!(error = %e, "GitHub fetch task failed, using fallback feed");
                feed.lines = ActivityFeed::default().lines;
                feed.live = false;
            }
        }
        feed.updated_at = Some(now);
    }

    /// Refresh now and then every `period` until the task is aborted.
    pub fn spawn_poller(&self, source: Arc<dyn ActivitySource>, period: Duration) -> JoinHandle<()> {
        let cache = self.clone();
        tokio::spawn(async move {
            let mut ticker = interval(period);
            loop {
                ticker.tick().await;
                cache.refresh(Arc::clone(&source)).await;
            }
        })
    }
}

impl std::fmt::Debug for ActivityCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityCache").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use crate::github::client::{EventPayload, EventRepo, GithubError, GithubEvent, GithubUser};

    struct StubSource {
        fail: AtomicBool,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self { fail: AtomicBool::new(fail), calls: AtomicUsize::new(0) })
        }
    }

    impl ActivitySource for StubSource {
        fn fetch(&self) -> Result<(GithubUser, Vec<GithubEvent>), GithubError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(GithubError::Status(403));
            }
            let user = GithubUser { login: "octo".into(), public_repos: 21 };
            let events = vec![GithubEvent {
                kind: "WatchEvent".into(),
                repo: EventRepo { name: "octo/hello".into() },
                created_at: Utc::now(),
                payload: EventPayload::default(),
            }];
            Ok((user, events))
        }
    }

    #[tokio::test]
    async fn test_starts_with_fallback() {
        let feed = ActivityCache::new().snapshot().await;
        assert_eq!(feed.lines.len(), 4);
        assert!(!feed.live);
        assert_eq!(feed.repositories, 0);
        assert!(feed.updated_at.is_none());
    }

    #[tokio::test]
    async fn test_successful_refresh() {
        let cache = ActivityCache::new();
        cache.refresh(StubSource::new(false)).await;

        let feed = cache.snapshot().await;
        assert!(feed.live);
        assert_eq!(feed.repositories, 21);
        assert_eq!(feed.lines.len(), 1);
        assert!(feed.lines[0].contains("STAR_EVENT | hello"));
    }

    #[tokio::test]
    async fn test_failure_keeps_repo_count() {
        let cache = ActivityCache::new();
        let source = StubSource::new(false);
        cache.refresh(source.clone()).await;

        source.fail.store(true, Ordering::SeqCst);
        cache.refresh(source).await;

        let feed = cache.snapshot().await;
        assert!(!feed.live);
        assert_eq!(feed.lines, ActivityFeed::default().lines);
        assert_eq!(cache.repositories().await, 21);
        assert!(feed.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_poller_refreshes_repeatedly() {
        let cache = ActivityCache::new();
        let source = StubSource::new(false);
        let handle = cache.spawn_poller(source.clone(), Duration::from_millis(40));

        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.abort();

        // First tick fires immediately, later ones on the period
        assert!(source.calls.load(Ordering::SeqCst) >= 2);
        assert!(cache.snapshot().await.live);
    }
}
