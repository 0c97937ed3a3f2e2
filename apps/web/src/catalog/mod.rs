pub mod accounts;
pub mod courses;
pub mod lessons;

pub use accounts::{authenticate, DemoAccount};
pub use courses::{initial_progress, returning_progress, ProgressEntry, CATALOG};
pub use lessons::{lookup_lesson, LessonContent, VIBE_CODING};
