use thiserror::Error;

use super::courses::ProgressEntry;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email or password. Try test@example.com / password or sarah@example.com / demo123")]
    InvalidCredentials,
}

/// Built-in demonstration login.
#[derive(Debug, PartialEq, Eq)]
pub struct DemoAccount {
    pub id: u32,
    pub name: &'static str,
    pub email: &'static str,
    password: &'static str,
    pub progress: &'static [ProgressEntry],
    /// Lesson ids of the bundled vibe-coding course already completed.
    pub completed_lessons: &'static [&'static str],
}

pub static DEMO_ACCOUNTS: [DemoAccount; 2] = [
    DemoAccount {
        id: 1,
        name: "Alex Johnson",
        email: "test@example.com",
        password: "password",
        progress: &[
            ProgressEntry { title: "Vibe Coding Fundamentals", percent: 75, accent: "accent-orange" },
            ProgressEntry { title: "Advanced No-Code Development", percent: 45, accent: "accent-pink" },
            ProgressEntry { title: "Database Design Mastery", percent: 90, accent: "accent-green" },
            ProgressEntry { title: "API Integration Workshop", percent: 30, accent: "accent-blue" },
            ProgressEntry { title: "UI/UX Design Principles", percent: 60, accent: "accent-purple" },
        ],
        completed_lessons: &["1.1"],
    },
    DemoAccount {
        id: 2,
        name: "Sarah Chen",
        email: "sarah@example.com",
        password: "demo123",
        progress: &[
            ProgressEntry { title: "Vibe Coding Fundamentals", percent: 100, accent: "accent-orange" },
            ProgressEntry { title: "Advanced No-Code Development", percent: 80, accent: "accent-pink" },
            ProgressEntry { title: "Database Design Mastery", percent: 65, accent: "accent-green" },
            ProgressEntry { title: "API Integration Workshop", percent: 95, accent: "accent-blue" },
            ProgressEntry { title: "UI/UX Design Principles", percent: 40, accent: "accent-purple" },
        ],
        completed_lessons: &["1.1", "1.2", "2.1", "2.2", "3.1", "3.2", "4.1", "4.2", "5.1", "5.2"],
    },
];

/// Email matches case-insensitively, password exactly. Surrounding whitespace
/// is not stripped from either.
pub fn authenticate(email: &str, password: &str) -> Result<&'static DemoAccount, AuthError> {
    DEMO_ACCOUNTS
        .iter()
        .find(|a| a.email.eq_ignore_ascii_case(email) && a.password == password)
        .ok_or(AuthError::InvalidCredentials)
}
