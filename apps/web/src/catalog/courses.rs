use crate::models::chat::ChatRole;
use crate::view::page::Page;

/// One progress bar on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEntry {
    pub title: &'static str,
    pub percent: u8,
    pub accent: &'static str,
}

pub const INTRO_NO_CODE: &str = "Introduction to No-Code";
pub const BUILDING_APPS: &str = "Building Apps Without Code";
pub const AUTOMATING_WORKFLOWS: &str = "Automating Workflows";

const fn entry(title: &'static str, percent: u8, accent: &'static str) -> ProgressEntry {
    ProgressEntry {
        title,
        percent,
        accent,
    }
}

static INITIAL_PROGRESS: [ProgressEntry; 3] = [
    entry(INTRO_NO_CODE, 0, "accent-green"),
    entry(BUILDING_APPS, 0, "accent-blue"),
    entry(AUTOMATING_WORKFLOWS, 0, "accent-purple"),
];

static RETURNING_PROGRESS: [ProgressEntry; 3] = [
    entry(INTRO_NO_CODE, 80, "accent-green"),
    entry(BUILDING_APPS, 50, "accent-blue"),
    entry(AUTOMATING_WORKFLOWS, 20, "accent-purple"),
];

/// Seed for a freshly signed-up learner: every course at 0%.
pub fn initial_progress() -> Vec<ProgressEntry> {
    INITIAL_PROGRESS.to_vec()
}

/// Seed for the returning-learner login: 80/50/20.
pub fn returning_progress() -> Vec<ProgressEntry> {
    RETURNING_PROGRESS.to_vec()
}

/// A card on the course catalog page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogCourse {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub landing: Page,
    /// Title of the seeded progress entry shown on the landing page ring.
    pub progress_title: &'static str,
    pub accent: &'static str,
}

pub static CATALOG: [CatalogCourse; 3] = [
    CatalogCourse {
        id: "vibe-coding",
        title: "Vibe Coding Fundamentals",
        description: "Learn the basics of instructing AI models to write code for you",
        landing: Page::VibeCodingCourse,
        progress_title: INTRO_NO_CODE,
        accent: "accent-orange",
    },
    CatalogCourse {
        id: "nocode-platforms",
        title: "No-Code Development Platforms",
        description: "Explore platforms that let you build applications visually",
        landing: Page::NoCodePlatformsCourse,
        progress_title: BUILDING_APPS,
        accent: "accent-pink",
    },
    CatalogCourse {
        id: "ai-agents",
        title: "Building AI Agents & Workflows",
        description: "Discover how to create automated agents and integrated workflows",
        landing: Page::AiAgentsCourse,
        progress_title: AUTOMATING_WORKFLOWS,
        accent: "accent-blue",
    },
];

/// Catalog entry whose landing page is `page`.
pub fn course_for_landing(page: Page) -> Option<&'static CatalogCourse> {
    if !page.is_course_landing() {
        return None;
    }
    CATALOG.iter().find(|c| c.landing == page)
}

/// Canned tutor conversation shown by the chat widgets.
pub static TUTOR_TRANSCRIPT: [(ChatRole, &str); 4] = [
    (ChatRole::User, "Hi there!"),
    (ChatRole::Assistant, "How can I assist you today?"),
    (ChatRole::User, "Can you explain no-code platforms?"),
    (
        ChatRole::Assistant,
        "No-code platforms allow you to build applications using visual interfaces instead of writing code...",
    ),
];

pub const TUTOR_GREETING: &str = "How can I assist you today?";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_presets() {
        let initial: Vec<u8> = initial_progress().iter().map(|p| p.percent).collect();
        assert_eq!(initial, vec![0, 0, 0]);

        let returning: Vec<u8> = returning_progress().iter().map(|p| p.percent).collect();
        assert_eq!(returning, vec![80, 50, 20]);

        let titles: Vec<&str> = initial_progress().iter().map(|p| p.title).collect();
        let returning_titles: Vec<&str> = returning_progress().iter().map(|p| p.title).collect();
        assert_eq!(titles, returning_titles);
    }

    #[test]
    fn test_catalog_landings_are_distinct() {
        assert_eq!(
            course_for_landing(Page::NoCodePlatformsCourse).unwrap().id,
            "nocode-platforms"
        );
        assert!(course_for_landing(Page::Dashboard).is_none());
        assert!(CATALOG.iter().all(|c| c.landing.is_course_landing()));
    }
}
