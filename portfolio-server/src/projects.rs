//! Project Catalog
//!
//! Fixed list of showcased projects with category/status/search filtering.

use serde::{Deserialize, Serialize};

/// Project area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Server-side systems
    Backend,
    /// Browser-facing work
    Frontend,
    /// Both ends
    FullStack,
    /// Machine learning
    #[serde(rename = "AI_ML")]
    AiMl,
    /// Libraries and frameworks
    Framework,
}

impl Category {
    /// Filter buttons, in display order, after `ALL`.
    pub const ALL: [Category; 5] = [
        Category::Backend,
        Category::Frontend,
        Category::FullStack,
        Category::AiMl,
        Category::Framework,
    ];

    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Backend => "BACKEND",
            Category::Frontend => "FRONTEND",
            Category::FullStack => "FULL_STACK",
            Category::AiMl => "AI_ML",
            Category::Framework => "FRAMEWORK",
        }
    }
}

/// Delivery status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Deployed
    Live,
    /// Under active work
    Active,
    /// Finished
    Complete,
    /// Not yet usable
    Development,
}

impl Status {
    /// Filter buttons, in display order, after `ALL`.
    pub const ALL: [Status; 4] = [Status::Live, Status::Active, Status::Complete, Status::Development];

    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Live => "LIVE",
            Status::Active => "ACTIVE",
            Status::Complete => "COMPLETE",
            Status::Development => "DEVELOPMENT",
        }
    }
}

/// Project difficulty label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Complexity {
    /// Mid-sized
    Intermediate,
    /// Large
    Advanced,
}

/// Vanity counters.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ProjectStats {
    /// View count label, e.g. `2.1K`
    pub views: &'static str,
    /// Stars
    pub stars: u32,
    /// Forks
    pub forks: u32,
}

/// One catalog entry.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Stable id
    pub id: u32,
    /// Display name
    pub name: &'static str,
    /// Summary
    pub description: &'static str,
    /// Area
    pub category: Category,
    /// Difficulty
    pub complexity: Complexity,
    /// Status
    pub status: Status,
    /// Technology tags
    pub technologies: &'static [&'static str],
    /// Deployed URL, if any
    pub live_url: Option<&'static str>,
    /// Source URL
    pub github_url: &'static str,
    /// Counters
    pub stats: ProjectStats,
    /// Duration label
    pub timeline: &'static str,
    /// Year
    pub year: &'static str,
    /// Last update label
    pub last_updated: &'static str,
    /// Feature tags
    pub highlights: &'static [&'static str],
}

impl Project {
    /// Case-insensitive substring match over name, description and
    /// technologies.
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.technologies.iter().any(|t| t.to_lowercase().contains(&needle))
    }
}

/// The catalog.
pub static PROJECTS: [Project; 6] = [
    Project {
        id: 1,
        name: "EMERGENCY_EXIT_SYSTEM",
        description: "Real-time emergency management system with intelligent routing algorithms and automated alert systems for optimal emergency response coordination.",
        category: Category::Backend,
        complexity: Complexity::Advanced,
        status: Status::Live,
        technologies: &["PYTHON", "FLASK", "GCP", "REAL_TIME", "ALGORITHMS"],
        live_url: Some("https://emergency-exit-system-654928681850.us-central1.run.app"),
        github_url: "https://github.com/Itaxh1/Emergency-Exit-System",
        stats: ProjectStats { views: "2.1K", stars: 12, forks: 4 },
        timeline: "3_MONTHS",
        year: "2024",
        last_updated: "MAY_9",
        highlights: &["REAL_TIME_MONITORING", "AUTOMATED_ALERTS", "INTELLIGENT_ROUTING", "SCALABLE_ARCHITECTURE"],
    },
    Project {
        id: 2,
        name: "TASKPILOT",
        description: "Intelligent task management system with workflow automation, progress tracking, and analytics for productivity optimization.",
        category: Category::Backend,
        complexity: Complexity::Intermediate,
        status: Status::Complete,
        technologies: &["PYTHON", "AUTOMATION", "ANALYTICS", "WORKFLOW"],
        live_url: None,
        github_url: "https://github.com/Itaxh1/TaskPilot",
        stats: ProjectStats { views: "1.8K", stars: 8, forks: 3 },
        timeline: "2_MONTHS",
        year: "2024",
        last_updated: "MAY_8",
        highlights: &["WORKFLOW_AUTOMATION", "PROGRESS_TRACKING", "ANALYTICS_DASHBOARD", "USER_INTERFACE"],
    },
    Project {
        id: 3,
        name: "JOBTRACKER",
        description: "Modern job application tracking system with status management, interview scheduling, and comprehensive analytics dashboard.",
        category: Category::FullStack,
        complexity: Complexity::Advanced,
        status: Status::Active,
        technologies: &["TYPESCRIPT", "REACT", "NODEJS", "ANALYTICS"],
        live_url: None,
        github_url: "https://github.com/Itaxh1/JobTracker",
        stats: ProjectStats { views: "2.5K", stars: 15, forks: 7 },
        timeline: "4_MONTHS",
        year: "2024",
        last_updated: "MAY_8",
        highlights: &["APPLICATION_TRACKING", "INTERVIEW_SCHEDULING", "ANALYTICS_DASHBOARD", "TYPESCRIPT_ARCHITECTURE"],
    },
    Project {
        id: 4,
        name: "DEEPSEEKER_AI",
        description: "RAG-based intelligent content retrieval system with vector database integration and advanced AI capabilities.",
        category: Category::AiMl,
        complexity: Complexity::Advanced,
        status: Status::Development,
        technologies: &["PYTHON", "RAG", "AI_ML", "VECTOR_DB"],
        live_url: None,
        github_url: "https://github.com/Itaxh1/deepseeker",
        stats: ProjectStats { views: "1.2K", stars: 6, forks: 2 },
        timeline: "3_MONTHS",
        year: "2024",
        last_updated: "APR_15",
        highlights: &["RAG_IMPLEMENTATION", "VECTOR_DATABASE", "AI_INTEGRATION", "CONTENT_RETRIEVAL"],
    },
    Project {
        id: 5,
        name: "SCARR_FRAMEWORK",
        description: "Python optimization framework with multicore profiling capabilities for performance analysis and enhancement.",
        category: Category::Framework,
        complexity: Complexity::Advanced,
        status: Status::Complete,
        technologies: &["PYTHON", "MULTIPROCESSING", "PERFORMANCE", "PROFILING"],
        live_url: None,
        github_url: "https://github.com/Itaxh1/scarr-framework",
        stats: ProjectStats { views: "900", stars: 4, forks: 1 },
        timeline: "2_MONTHS",
        year: "2023",
        last_updated: "DEC_20",
        highlights: &["MULTICORE_PROFILING", "PERFORMANCE_OPTIMIZATION", "PYTHON_FRAMEWORK", "ANALYSIS_TOOLS"],
    },
    Project {
        id: 6,
        name: "NARUTO_PORTFOLIO",
        description: "Interactive 3D portfolio experience built with Three.js, featuring immersive design and creative storytelling.",
        category: Category::Frontend,
        complexity: Complexity::Advanced,
        status: Status::Live,
        technologies: &["NEXTJS", "THREEJS", "TYPESCRIPT", "3D"],
        live_url: Some("/village"),
        github_url: "https://github.com/Itaxh1/naruto-portfolio",
        stats: ProjectStats { views: "3.1K", stars: 18, forks: 5 },
        timeline: "4_MONTHS",
        year: "2024",
        last_updated: "JUN_1",
        highlights: &["3D_EXPERIENCE", "THREEJS_INTEGRATION", "INTERACTIVE_DESIGN", "CREATIVE_STORYTELLING"],
    },
];

/// Filter selection. `None` and `"ALL"` both mean no restriction.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProjectQuery {
    /// Category wire name
    #[serde(default)]
    pub category: Option<String>,
    /// Status wire name
    #[serde(default)]
    pub status: Option<String>,
    /// Search term
    #[serde(default)]
    pub q: Option<String>,
}

fn selected(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty() && *v != "ALL")
}

/// Apply category, then status, then search. Unknown category or status
/// names match nothing.
pub fn filter_projects<'a>(projects: &'a [Project], query: &ProjectQuery) -> Vec<&'a Project> {
    let category = selected(&query.category);
    let status = selected(&query.status);
    let search = query.q.as_deref().filter(|q| !q.is_empty());

    projects
        .iter()
        .filter(|p| category.map_or(true, |c| p.category.as_str() == c))
        .filter(|p| status.map_or(true, |s| p.status.as_str() == s))
        .filter(|p| search.map_or(true, |q| p.matches_search(q)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(category: Option<&str>, status: Option<&str>, q: Option<&str>) -> ProjectQuery {
        ProjectQuery {
            category: category.map(Into::into),
            status: status.map(Into::into),
            q: q.map(Into::into),
        }
    }

    fn names(found: Vec<&Project>) -> Vec<&'static str> {
        found.into_iter().map(|p| p.name).collect()
    }

    #[test]
    fn test_all_returns_everything() {
        assert_eq!(filter_projects(&PROJECTS, &ProjectQuery::default()).len(), 6);
        assert_eq!(filter_projects(&PROJECTS, &query(Some("ALL"), Some("ALL"), Some(""))).len(), 6);
    }

    #[test]
    fn test_category_filter() {
        let found = filter_projects(&PROJECTS, &query(Some("BACKEND"), None, None));
        assert_eq!(names(found), vec!["EMERGENCY_EXIT_SYSTEM", "TASKPILOT"]);
    }

    #[test]
    fn test_status_filter() {
        let found = filter_projects(&PROJECTS, &query(None, Some("LIVE"), None));
        assert_eq!(names(found), vec!["EMERGENCY_EXIT_SYSTEM", "NARUTO_PORTFOLIO"]);
    }

    #[test]
    fn test_combined_filters() {
        let found = filter_projects(&PROJECTS, &query(Some("BACKEND"), Some("COMPLETE"), None));
        assert_eq!(names(found), vec!["TASKPILOT"]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_technologies() {
        let found = filter_projects(&PROJECTS, &query(None, None, Some("typescript")));
        assert_eq!(names(found), vec!["JOBTRACKER", "NARUTO_PORTFOLIO"]);

        let found = filter_projects(&PROJECTS, &query(None, None, Some("Vector")));
        assert_eq!(names(found), vec!["DEEPSEEKER_AI"]);
    }

    #[test]
    fn test_unknown_category_matches_nothing() {
        assert!(filter_projects(&PROJECTS, &query(Some("GAMES"), None, None)).is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(&PROJECTS[3]).unwrap();
        assert_eq!(value["category"], "AI_ML");
        assert_eq!(value["status"], "DEVELOPMENT");
        assert_eq!(value["liveUrl"], serde_json::Value::Null);
        assert_eq!(value["lastUpdated"], "APR_15");
    }

    #[test]
    fn test_filter_lists_cover_catalog() {
        for project in PROJECTS.iter() {
            assert!(Category::ALL.contains(&project.category));
            assert!(Status::ALL.contains(&project.status));
        }
    }
}
