//! GitHub Activity
//!
//! Recent public activity rendered as terminal lines, refreshed in the
//! background. Never fails outward: on any error the feed shows a fixed
//! fallback.

pub mod client;
pub mod format;
pub mod feed;

pub use client::{ActivitySource, GithubClient, GithubError, GithubEvent, GithubUser};
pub use format::{format_event, FALLBACK_LINES};
pub use feed::{ActivityCache, ActivityFeed};
