//! Three-pane lesson workspace for the bundled course: module navigator,
//! the selected lesson, and the tutor.

use askama::Template;

use super::html::{transcript, Bubble, LessonRow, ModuleRow, Ring};
use crate::catalog::lessons::{adjacent_lessons, filter_lessons, module_of_lesson, Panel};
use crate::catalog::{LessonContent, VIBE_CODING};
use crate::view::ViewState;

struct PanelView {
    kind: &'static str,
    video_url: &'static str,
}

impl From<Panel> for PanelView {
    fn from(panel: Panel) -> Self {
        let (kind, video_url) = match panel {
            Panel::Video { url } => ("video", url),
            Panel::Quiz => ("quiz", ""),
            Panel::Playground => ("playground", ""),
            Panel::Matrix => ("matrix", ""),
        };
        Self { kind, video_url }
    }
}

#[derive(Template)]
#[template(path = "workspace.html")]
pub struct WorkspaceTemplate<'a> {
    course_title: &'static str,
    tagline: &'static str,
    query: &'a str,
    modules: Vec<ModuleRow>,
    lesson: &'static LessonContent,
    module_label: String,
    completed: bool,
    panels: Vec<PanelView>,
    previous: Option<&'static LessonContent>,
    next: Option<&'static LessonContent>,
    ring: Ring,
    transcript: Vec<Bubble>,
    draft: &'a str,
}

impl<'a> WorkspaceTemplate<'a> {
    pub fn new(state: &'a ViewState) -> Self {
        let lesson = state.current_lesson();
        let module = module_of_lesson(lesson.id);
        let (previous, next) = adjacent_lessons(lesson.id);
        Self {
            course_title: VIBE_CODING.title,
            tagline: VIBE_CODING.tagline,
            query: &state.search_query,
            modules: navigator(state),
            lesson,
            module_label: format!("Module {}: {}", module.id, module.title),
            completed: state.is_lesson_completed(lesson.id),
            panels: lesson.activity.panels().into_iter().map(PanelView::from).collect(),
            previous,
            next,
            ring: Ring::new(state.progress_for("Vibe Coding"), "ring-orange"),
            transcript: transcript(),
            draft: &state.chat_draft,
        }
    }
}

/// Module list. A module shows its lessons when expanded, or whenever a
/// search is active so matches stay visible.
fn navigator(state: &ViewState) -> Vec<ModuleRow> {
    let searching = !state.search_query.trim().is_empty();
    let selected = state.current_lesson().id;
    filter_lessons(&state.search_query)
        .into_iter()
        .map(|(module, lessons)| {
            let expanded = searching || state.expanded_module_id == module.id;
            let lessons = if expanded {
                lessons
                    .into_iter()
                    .map(|lesson| {
                        let mark = if state.is_lesson_completed(lesson.id) {
                            "✓ "
                        } else {
                            ""
                        };
                        LessonRow {
                            id: lesson.id,
                            label: format!("{mark}{} · {}", lesson.title, lesson.duration),
                            class: if lesson.id == selected {
                                "lesson selected"
                            } else {
                                "lesson"
                            },
                        }
                    })
                    .collect()
            } else {
                Vec::new()
            };
            ModuleRow {
                id: module.id,
                label: format!("{}. {}", module.id, module.title),
                class: "module",
                expanded,
                lessons,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Page;

    fn workspace() -> ViewState {
        ViewState::default()
            .login()
            .navigate(Page::VibeCodingWorkspace)
    }

    fn render(state: &ViewState) -> String {
        WorkspaceTemplate::new(state).render().unwrap()
    }

    #[test]
    fn test_unknown_lesson_renders_first_lesson() {
        let html = render(&workspace().select_lesson("9.9"));
        assert!(html.contains("<h2>What is vibe coding?</h2>"));
        assert!(html.contains("Module 1: Introduction to Vibe Coding"));
        assert!(html.contains("panel video"));
        assert!(html.contains("panel quiz"));
    }

    #[test]
    fn test_panels_follow_activity() {
        let html = render(&workspace().select_lesson("3.1"));
        assert!(html.contains("panel matrix"));
        assert!(!html.contains("panel video"));

        let html = render(&workspace().select_lesson("5.2"));
        assert!(html.contains("panel playground"));
    }

    #[test]
    fn test_pager_at_course_edges() {
        let html = render(&workspace().select_lesson("1.1"));
        assert!(!html.contains(">Previous</button>"));
        assert!(html.contains("name=\"lesson_id\" value=\"1.2\""));

        let html = render(&workspace().select_lesson("5.2"));
        assert!(html.contains(">Previous</button>"));
        assert!(!html.contains(">Next</button>"));
    }

    #[test]
    fn test_search_expands_matching_modules() {
        let html = render(&workspace().set_search("refinement"));
        assert!(html.contains("Prompt refinement cycle"));
        assert!(!html.contains("4. Code Refinement Techniques"));
        assert!(!html.contains("Anatomy of a prompt"));

        let html = render(&workspace().set_search("quantum"));
        assert!(html.contains("No lessons match your search."));
    }

    #[test]
    fn test_search_query_is_escaped_in_the_box() {
        let html = render(&workspace().set_search("<script>"));
        assert!(html.contains("value=\"&lt;script&gt;\""));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_collapsed_navigator_hides_lessons() {
        let html = render(&workspace().select_lesson("4.1"));
        assert!(!html.contains("Iterative testing · 35 min"));

        let html = render(&workspace().toggle_module("4"));
        assert!(html.contains("Iterative testing · 35 min"));
    }

    #[test]
    fn test_completed_lessons_are_marked() {
        let state = ViewState::default()
            .login_with_credentials("sarah@example.com", "demo123")
            .navigate(Page::VibeCodingWorkspace)
            .toggle_module("1");
        let html = render(&state);
        assert!(html.contains("✓ What is vibe coding?"));
        assert!(html.contains("badge done"));
    }
}
