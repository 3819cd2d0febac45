//! Terminal-style activity lines.

use chrono::{Local, TimeZone};

use super::client::GithubEvent;

/// Longest commit message shown before truncation.
pub const MAX_COMMIT_MESSAGE: usize = 40;

/// Lines shown when GitHub is unreachable.
pub const FALLBACK_LINES: [&str; 4] = [
    "[12:34:56] PUSH_EVENT | naruto-portfolio | 2 commits | 'Added real-time GitHub integration'",
    "[11:22:33] CREATE_EVENT | new-project | Created repository",
    "[10:15:42] STAR_EVENT | emergency-exit-system | Repository starred",
    "[09:45:21] PUSH_EVENT | taskpilot | 1 commit | 'Updated documentation'",
];

/// Format an event with the server's local clock.
pub fn format_event(event: &GithubEvent) -> String {
    format_event_in(event, &Local)
}

/// Format an event with times shown in `tz`.
pub fn format_event_in<Tz>(event: &GithubEvent, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let time = event.created_at.with_timezone(tz).format("%H:%M:%S").to_string();
    let repo = event
        .repo
        .name
        .split_once('/')
        .map_or(event.repo.name.as_str(), |(_, name)| name);
    let payload = &event.payload;

    match event.kind.as_str() {
        "PushEvent" => {
            let commits = payload.commits.as_deref().unwrap_or_default();
            let count = commits.len().max(1);
            let message = commits
                .first()
                .map_or("Updated code", |c| c.message.as_str());
            format!(
                "[{time}] PUSH_EVENT | {repo} | {count} commit{} | \"{}\"",
                if count > 1 { "s" } else { "" },
                truncate(message, MAX_COMMIT_MESSAGE),
            )
        }
        "CreateEvent" => format!(
            "[{time}] CREATE_EVENT | {repo} | Created {}",
            payload.ref_type.as_deref().unwrap_or("repository")
        ),
        "WatchEvent" => format!("[{time}] STAR_EVENT | {repo} | Repository starred"),
        "ForkEvent" => format!("[{time}] FORK_EVENT | {repo} | Repository forked"),
        "IssuesEvent" => format!(
            "[{time}] ISSUE_EVENT | {repo} | {} issue",
            payload.action.as_deref().unwrap_or("updated")
        ),
        "PullRequestEvent" => format!(
            "[{time}] PR_EVENT | {repo} | {} pull request",
            payload.action.as_deref().unwrap_or("updated")
        ),
        other => format!("[{time}] {} | {repo}", other.to_uppercase()),
    }
}

fn truncate(message: &str, max: usize) -> String {
    if message.chars().count() > max {
        let head: String = message.chars().take(max).collect();
        format!("{head}...")
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::github::client::{EventCommit, EventPayload, EventRepo};

    fn event(kind: &str, payload: EventPayload) -> GithubEvent {
        GithubEvent {
            kind: kind.to_string(),
            repo: EventRepo { name: "Itaxh1/naruto-portfolio".into() },
            created_at: "2024-05-01T09:05:07Z".parse().unwrap(),
            payload,
        }
    }

    fn commits(messages: &[&str]) -> EventPayload {
        EventPayload {
            commits: Some(messages.iter().map(|m| EventCommit { message: m.to_string() }).collect()),
            ..EventPayload::default()
        }
    }

    #[test]
    fn test_push_single_commit() {
        let line = format_event_in(&event("PushEvent", commits(&["Fix camera"])), &Utc);
        assert_eq!(line, "[09:05:07] PUSH_EVENT | naruto-portfolio | 1 commit | \"Fix camera\"");
    }

    #[test]
    fn test_push_truncates_long_message() {
        let long = "a".repeat(45);
        let line = format_event_in(&event("PushEvent", commits(&[long.as_str(), "second"])), &Utc);
        assert!(line.contains("| 2 commits |"));
        assert!(line.ends_with(&format!("\"{}...\"", "a".repeat(40))));
    }

    #[test]
    fn test_push_message_at_limit_is_not_truncated() {
        let exact = "b".repeat(40);
        let line = format_event_in(&event("PushEvent", commits(&[exact.as_str()])), &Utc);
        assert!(line.ends_with(&format!("\"{exact}\"")));
    }

    #[test]
    fn test_push_without_commits() {
        let line = format_event_in(&event("PushEvent", EventPayload::default()), &Utc);
        assert!(line.ends_with("| 1 commit | \"Updated code\""));
    }

    #[test]
    fn test_other_event_kinds() {
        let create = EventPayload { ref_type: Some("branch".into()), ..EventPayload::default() };
        assert_eq!(
            format_event_in(&event("CreateEvent", create), &Utc),
            "[09:05:07] CREATE_EVENT | naruto-portfolio | Created branch"
        );
        assert!(format_event_in(&event("WatchEvent", EventPayload::default()), &Utc)
            .ends_with("STAR_EVENT | naruto-portfolio | Repository starred"));
        assert!(format_event_in(&event("ForkEvent", EventPayload::default()), &Utc)
            .ends_with("FORK_EVENT | naruto-portfolio | Repository forked"));

        let opened = EventPayload { action: Some("opened".into()), ..EventPayload::default() };
        assert!(format_event_in(&event("IssuesEvent", opened.clone()), &Utc)
            .ends_with("ISSUE_EVENT | naruto-portfolio | opened issue"));
        assert!(format_event_in(&event("PullRequestEvent", opened), &Utc)
            .ends_with("PR_EVENT | naruto-portfolio | opened pull request"));

        assert_eq!(
            format_event_in(&event("DeleteEvent", EventPayload::default()), &Utc),
            "[09:05:07] DELETEEVENT | naruto-portfolio"
        );
    }

    #[test]
    fn test_repo_without_owner() {
        let mut e = event("ForkEvent", EventPayload::default());
        e.repo.name = "solo".into();
        assert!(format_event_in(&e, &Utc).contains("| solo |"));
    }
}
