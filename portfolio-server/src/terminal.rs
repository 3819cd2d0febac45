//! Terminal Commands
//!
//! The home page's fake shell. Commands are matched case-insensitively
//! after trimming; the echo and the not-found message use the input as
//! typed.

use serde::Serialize;

/// Commands listed by `help`, in listing order.
pub const COMMANDS: [&str; 8] = [
    "help", "about", "skills", "projects", "contact", "clear", "whoami", "status",
];

/// What the terminal should do with its scrollback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TerminalReply {
    /// Append these lines
    Append {
        /// Echoed prompt followed by the response
        lines: Vec<String>,
    },
    /// Replace the scrollback with these lines
    Clear {
        /// New scrollback
        lines: Vec<String>,
    },
}

impl TerminalReply {
    /// Lines carried by either variant.
    pub fn lines(&self) -> &[String] {
        match self {
            TerminalReply::Append { lines } | TerminalReply::Clear { lines } => lines,
        }
    }
}

/// Run one command. `repositories` is the live public repository count.
pub fn respond(input: &str, repositories: u32) -> TerminalReply {
    let command = input.trim().to_lowercase();

    let response = match command.as_str() {
        "help" => format!("AVAILABLE_COMMANDS: {}", COMMANDS.join(", ")),
        "about" => "FULL_STACK_ENGINEER | OREGON_STATE_UNIVERSITY_GRADUATE | 2+_YEARS_EXPERIENCE".to_string(),
        "skills" => "PYTHON | TYPESCRIPT | REACT | NODE.JS | FLASK | NEXT.JS | DOCKER | GCP".to_string(),
        "projects" => format!(
            "{repositories}_REPOSITORIES | 4_LIVE_DEPLOYMENTS | CHECK_/PROJECTS_FOR_DETAILS"
        ),
        "contact" => "EMAIL: ufoundashwin@gmail.com | LINKEDIN: ashwinkumar99 | GITHUB: Itaxh1".to_string(),
        "status" => "STATUS: ACTIVELY_SEEKING_OPPORTUNITIES | MASTER'S_COMPLETED | AVAILABLE_IMMEDIATELY".to_string(),
        "whoami" => "ASHWIN_KUMAR | SOFTWARE_ENGINEER | PROBLEM_SOLVER | CODE_ARCHITECT".to_string(),
        "clear" => {
            return TerminalReply::Clear { lines: vec!["TERMINAL_CLEARED".to_string()] };
        }
        _ => format!("COMMAND_NOT_FOUND: {input} | TYPE 'help' FOR_AVAILABLE_COMMANDS"),
    };

    TerminalReply::Append { lines: vec![format!("> {input}"), response] }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_commands() {
        let reply = respond("help", 0);
        assert_eq!(
            reply.lines(),
            &[
                "> help".to_string(),
                "AVAILABLE_COMMANDS: help, about, skills, projects, contact, clear, whoami, status".to_string(),
            ]
        );
    }

    #[test]
    fn test_commands_are_case_insensitive() {
        let reply = respond("  WhoAmI ", 0);
        assert_eq!(reply.lines()[0], ">   WhoAmI ");
        assert_eq!(reply.lines()[1], "ASHWIN_KUMAR | SOFTWARE_ENGINEER | PROBLEM_SOLVER | CODE_ARCHITECT");
    }

    #[test]
    fn test_projects_uses_repository_count() {
        let reply = respond("projects", 23);
        assert_eq!(
            reply.lines()[1],
            "23_REPOSITORIES | 4_LIVE_DEPLOYMENTS | CHECK_/PROJECTS_FOR_DETAILS"
        );
    }

    #[test]
    fn test_clear_replaces_scrollback() {
        assert_eq!(
            respond("CLEAR", 0),
            TerminalReply::Clear { lines: vec!["TERMINAL_CLEARED".to_string()] }
        );
    }

    #[test]
    fn test_unknown_command_echoes_input() {
        let reply = respond("sudo rm", 0);
        assert_eq!(reply.lines()[1], "COMMAND_NOT_FOUND: sudo rm | TYPE 'help' FOR_AVAILABLE_COMMANDS");
    }

    #[test]
    fn test_every_listed_command_is_known() {
        for command in COMMANDS {
            let reply = respond(command, 1);
            assert!(!reply.lines().last().unwrap().starts_with("COMMAND_NOT_FOUND"), "{command}");
        }
    }

    #[test]
    fn test_reply_serializes_with_action_tag() {
        let value = serde_json::to_value(respond("clear", 0)).unwrap();
        assert_eq!(value["action"], "clear");
        assert_eq!(value["lines"][0], "TERMINAL_CLEARED");
    }
}
