//! The bundled "Vibe Coding Fundamentals" course: five modules of two lessons,
//! available without the remote store.

/// Interactive panel shown under a lesson's key points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Video { url: &'static str },
    Quiz,
    Playground,
    Matrix,
}

/// What the learner does in a lesson. Each kind carries only what its panels need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonActivity {
    VideoQuiz { video_url: &'static str },
    PromptLab,
    ComparisonMatrix,
    DebuggingChallenge,
    GuidedWizard,
}

impl LessonActivity {
    pub fn label(&self) -> &'static str {
        match self {
            LessonActivity::VideoQuiz { .. } => "Video + Quiz",
            LessonActivity::PromptLab => "Prompt lab (write & test)",
            LessonActivity::ComparisonMatrix => "Comparative matrix + poll",
            LessonActivity::DebuggingChallenge => "Debugging challenge",
            LessonActivity::GuidedWizard => "Guided wizard + code sandbox",
        }
    }

    pub fn panels(&self) -> Vec<Panel> {
        match *self {
            LessonActivity::VideoQuiz { video_url } => {
                vec![Panel::Video { url: video_url }, Panel::Quiz]
            }
            LessonActivity::PromptLab
            | LessonActivity::DebuggingChallenge
            | LessonActivity::GuidedWizard => vec![Panel::Playground],
            LessonActivity::ComparisonMatrix => vec![Panel::Matrix],
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct LessonContent {
    pub id: &'static str,
    pub title: &'static str,
    pub duration: &'static str,
    pub activity: LessonActivity,
    pub description: &'static str,
    pub key_points: &'static [&'static str],
}

#[derive(Debug, PartialEq)]
pub struct ModuleContent {
    pub id: &'static str,
    pub title: &'static str,
    pub lessons: &'static [LessonContent],
}

#[derive(Debug, PartialEq)]
pub struct CourseContent {
    pub title: &'static str,
    pub tagline: &'static str,
    pub overview: &'static str,
    pub modules: &'static [ModuleContent],
}

pub static VIBE_CODING: CourseContent = CourseContent {
    title: "Vibe Coding Fundamentals",
    tagline: "Learn the art of natural-language programming",
    overview: "Use simple prompts to guide AI coding assistants through a four-step workflow: prompt → generate → refine → review.",
    modules: &[
        ModuleContent {
            id: "1",
            title: "Introduction to Vibe Coding",
            lessons: &[
                LessonContent {
                    id: "1.1",
                    title: "What is vibe coding?",
                    duration: "15 min",
                    activity: LessonActivity::VideoQuiz {
                        video_url: "https://example.com/video1",
                    },
                    description: "Discover the revolutionary approach to programming using natural language and AI assistants.",
                    key_points: &[
                        "Understanding natural-language programming",
                        "Benefits of AI-assisted development",
                        "The four-step workflow: prompt → generate → refine → review",
                    ],
                },
                LessonContent {
                    id: "1.2",
                    title: "Key tools & risks",
                    duration: "20 min",
                    activity: LessonActivity::VideoQuiz {
                        video_url: "https://example.com/video2",
                    },
                    description: "Learn about essential AI coding tools and potential pitfalls to avoid.",
                    key_points: &[
                        "Popular AI coding assistants",
                        "Common risks and limitations",
                        "Best practices for safe AI coding",
                    ],
                },
            ],
        },
        ModuleContent {
            id: "2",
            title: "Crafting Effective Prompts",
            lessons: &[
                LessonContent {
                    id: "2.1",
                    title: "Anatomy of a prompt",
                    duration: "25 min",
                    activity: LessonActivity::PromptLab,
                    description: "Master the structure and components of effective AI prompts.",
                    key_points: &[
                        "Context setting and role definition",
                        "Clear instruction formatting",
                        "Example patterns and templates",
                    ],
                },
                LessonContent {
                    id: "2.2",
                    title: "Prompt refinement cycle",
                    duration: "30 min",
                    activity: LessonActivity::PromptLab,
                    description: "Learn iterative techniques to improve prompt effectiveness.",
                    key_points: &[
                        "Testing and validation methods",
                        "Common refinement patterns",
                        "Measuring prompt success",
                    ],
                },
            ],
        },
        ModuleContent {
            id: "3",
            title: "Choosing an AI Coding Assistant",
            lessons: &[
                LessonContent {
                    id: "3.1",
                    title: "Copilot vs. CodeWhisperer vs. Replit",
                    duration: "20 min",
                    activity: LessonActivity::ComparisonMatrix,
                    description: "Compare popular AI coding assistants and their strengths.",
                    key_points: &[
                        "Feature comparison matrix",
                        "Use case recommendations",
                        "Integration capabilities",
                    ],
                },
                LessonContent {
                    id: "3.2",
                    title: "Budget & performance trade-offs",
                    duration: "15 min",
                    activity: LessonActivity::ComparisonMatrix,
                    description: "Understand cost vs. performance considerations.",
                    key_points: &[
                        "Pricing models comparison",
                        "Performance benchmarks",
                        "ROI calculations",
                    ],
                },
            ],
        },
        ModuleContent {
            id: "4",
            title: "Code Refinement Techniques",
            lessons: &[
                LessonContent {
                    id: "4.1",
                    title: "Iterative testing",
                    duration: "35 min",
                    activity: LessonActivity::DebuggingChallenge,
                    description: "Practice systematic approaches to code testing and improvement.",
                    key_points: &[
                        "Test-driven refinement",
                        "Automated testing integration",
                        "Performance optimization",
                    ],
                },
                LessonContent {
                    id: "4.2",
                    title: "Identifying bugs in AI-generated code",
                    duration: "40 min",
                    activity: LessonActivity::DebuggingChallenge,
                    description: "Develop skills to spot and fix common AI coding errors.",
                    key_points: &[
                        "Common AI coding mistakes",
                        "Debugging strategies",
                        "Code review techniques",
                    ],
                },
            ],
        },
        ModuleContent {
            id: "5",
            title: "Final Project: Build a Mini-App",
            lessons: &[
                LessonContent {
                    id: "5.1",
                    title: "Define requirements",
                    duration: "30 min",
                    activity: LessonActivity::GuidedWizard,
                    description: "Learn to create clear project specifications for AI assistants.",
                    key_points: &[
                        "Requirements gathering",
                        "User story creation",
                        "Technical specification writing",
                    ],
                },
                LessonContent {
                    id: "5.2",
                    title: "Prompt, generate, refine, deploy",
                    duration: "45 min",
                    activity: LessonActivity::GuidedWizard,
                    description: "Apply the complete vibe coding workflow to build a real application.",
                    key_points: &[
                        "End-to-end development process",
                        "Deployment strategies",
                        "Project documentation",
                    ],
                },
            ],
        },
    ],
};

fn default_module() -> &'static ModuleContent {
    &VIBE_CODING.modules[0]
}

/// First lesson with a matching id, else lesson 1.1. Never fails.
pub fn lookup_lesson(id: &str) -> &'static LessonContent {
    VIBE_CODING
        .modules
        .iter()
        .flat_map(|m| m.lessons.iter())
        .find(|l| l.id == id)
        .unwrap_or(&default_module().lessons[0])
}

/// The module holding the lesson `lookup_lesson(id)` resolves to.
pub fn module_of_lesson(id: &str) -> &'static ModuleContent {
    let lesson = lookup_lesson(id);
    VIBE_CODING
        .modules
        .iter()
        .find(|m| m.lessons.iter().any(|l| l.id == lesson.id))
        .unwrap_or_else(default_module)
}

pub fn all_lessons() -> impl Iterator<Item = &'static LessonContent> {
    VIBE_CODING.modules.iter().flat_map(|m| m.lessons.iter())
}

/// Lessons before and after `id` in course order, across module boundaries.
pub fn adjacent_lessons(
    id: &str,
) -> (Option<&'static LessonContent>, Option<&'static LessonContent>) {
    let current = lookup_lesson(id);
    let lessons: Vec<&'static LessonContent> = all_lessons().collect();
    let Some(pos) = lessons.iter().position(|l| l.id == current.id) else {
        return (None, None);
    };
    let previous = pos.checked_sub(1).map(|p| lessons[p]);
    let next = lessons.get(pos + 1).copied();
    (previous, next)
}

/// Modules with the lessons whose title contains `query` (case-insensitive).
/// Modules without a match are left out; an empty query keeps everything.
pub fn filter_lessons(
    query: &str,
) -> Vec<(&'static ModuleContent, Vec<&'static LessonContent>)> {
    let needle = query.trim().to_lowercase();
    VIBE_CODING
        .modules
        .iter()
        .filter_map(|module| {
            let lessons: Vec<_> = module
                .lessons
                .iter()
                .filter(|l| needle.is_empty() || l.title.to_lowercase().contains(&needle))
                .collect();
            (!lessons.is_empty()).then_some((module, lessons))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_shape() {
        assert_eq!(VIBE_CODING.modules.len(), 5);
        assert!(VIBE_CODING.modules.iter().all(|m| m.lessons.len() == 2));
        assert_eq!(all_lessons().count(), 10);
    }

    #[test]
    fn test_lookup_lesson_finds_each_id() {
        for lesson in all_lessons() {
            assert_eq!(lookup_lesson(lesson.id).title, lesson.title);
        }
        assert_eq!(lookup_lesson("4.2").title, "Identifying bugs in AI-generated code");
    }

    #[test]
    fn test_lookup_lesson_unknown_id_falls_back_to_first_lesson() {
        let first = lookup_lesson("1.1");
        for id in ["9.9", "", "1.3", "abc"] {
            assert_eq!(lookup_lesson(id), first);
        }
        assert_eq!(lookup_lesson("9.9").title, "What is vibe coding?");
    }

    #[test]
    fn test_module_of_lesson() {
        assert_eq!(module_of_lesson("3.1").title, "Choosing an AI Coding Assistant");
        assert_eq!(module_of_lesson("5.2").id, "5");
        assert_eq!(module_of_lesson("nope").id, "1");
    }

    #[test]
    fn test_adjacent_lessons_cross_module_boundary() {
        let (prev, next) = adjacent_lessons("1.2");
        assert_eq!(prev.unwrap().id, "1.1");
        assert_eq!(next.unwrap().id, "2.1");

        let (prev, _) = adjacent_lessons("1.1");
        assert!(prev.is_none());
        let (_, next) = adjacent_lessons("5.2");
        assert!(next.is_none());
    }

    #[test]
    fn test_filter_lessons() {
        assert_eq!(filter_lessons("").len(), 5);

        let hits = filter_lessons("  PROMPT ");
        let ids: Vec<&str> = hits
            .iter()
            .flat_map(|(_, lessons)| lessons.iter().map(|l| l.id))
            .collect();
        assert_eq!(ids, vec!["2.1", "2.2", "5.2"]);
        assert_eq!(hits[0].0.id, "2");

        assert!(filter_lessons("quantum").is_empty());
    }

    #[test]
    fn test_activity_panels() {
        let video = lookup_lesson("1.1").activity;
        assert_eq!(
            video.panels(),
            vec![
                Panel::Video {
                    url: "https://example.com/video1"
                },
                Panel::Quiz
            ]
        );
        assert_eq!(LessonActivity::PromptLab.panels(), vec![Panel::Playground]);
        assert_eq!(LessonActivity::GuidedWizard.panels(), vec![Panel::Playground]);
        assert_eq!(LessonActivity::ComparisonMatrix.panels(), vec![Panel::Matrix]);
        assert_eq!(lookup_lesson("4.1").activity.label(), "Debugging challenge");
    }
}
