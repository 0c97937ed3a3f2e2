use serde::{Deserialize, Serialize};

/// Every page the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Page {
    #[serde(rename = "dashboard")]
    Dashboard,
    #[serde(rename = "lesson")]
    Lesson,
    #[serde(rename = "signup")]
    Signup,
    #[serde(rename = "courses")]
    Courses,
    #[serde(rename = "course-detail")]
    CourseDetail,
    #[serde(rename = "vibe-coding-course")]
    VibeCodingCourse,
    #[serde(rename = "nocode-platforms-course")]
    NoCodePlatformsCourse,
    #[serde(rename = "ai-agents-course")]
    AiAgentsCourse,
    #[serde(rename = "vibe-coding-workspace")]
    VibeCodingWorkspace,
}

impl Page {
    #[cfg(test)]
    pub const ALL: [Page; 9] = [
        Page::Dashboard,
        Page::Lesson,
        Page::Signup,
        Page::Courses,
        Page::CourseDetail,
        Page::VibeCodingCourse,
        Page::NoCodePlatformsCourse,
        Page::AiAgentsCourse,
        Page::VibeCodingWorkspace,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Lesson => "lesson",
            Page::Signup => "signup",
            Page::Courses => "courses",
            Page::CourseDetail => "course-detail",
            Page::VibeCodingCourse => "vibe-coding-course",
            Page::NoCodePlatformsCourse => "nocode-platforms-course",
            Page::AiAgentsCourse => "ai-agents-course",
            Page::VibeCodingWorkspace => "vibe-coding-workspace",
        }
    }

    #[cfg(test)]
    pub fn from_slug(slug: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|p| p.slug() == slug)
    }

    /// Everything except the signup page requires an authenticated session.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Page::Signup)
    }

    pub fn is_course_landing(&self) -> bool {
        matches!(
            self,
            Page::VibeCodingCourse | Page::NoCodePlatformsCourse | Page::AiAgentsCourse
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trips_through_serde() {
        for page in Page::ALL {
            let json = serde_json::to_value(page).unwrap();
            assert_eq!(json, serde_json::Value::String(page.slug().to_string()));
            assert_eq!(Page::from_slug(page.slug()), Some(page));
        }
        assert_eq!(Page::from_slug("admin"), None);
    }

    #[test]
    fn test_only_signup_is_public() {
        let public: Vec<Page> = Page::ALL.into_iter().filter(|p| !p.is_protected()).collect();
        assert_eq!(public, vec![Page::Signup]);
    }
}
