use askama::Template;

use super::html::{LessonRow, ModuleRow, Ring};
use super::APP_NAME;
use crate::catalog::courses::{course_for_landing, CatalogCourse, TUTOR_GREETING};
use crate::catalog::{CATALOG, VIBE_CODING};
use crate::view::{Page, ViewState};

/// Catalog grid, or the locked notice for a signed-out session.
#[derive(Template)]
#[template(path = "courses.html")]
pub struct CoursesTemplate {
    app_name: &'static str,
    authenticated: bool,
    catalog: &'static [CatalogCourse],
}

impl CoursesTemplate {
    pub fn new(state: &ViewState) -> Self {
        Self {
            app_name: APP_NAME,
            authenticated: state.authenticated,
            catalog: &CATALOG,
        }
    }
}

/// Overview of the bundled course with an accordion of its modules.
#[derive(Template)]
#[template(path = "course_detail.html")]
pub struct CourseDetailTemplate {
    title: &'static str,
    modules: Vec<ModuleRow>,
    ring: Ring,
    greeting: &'static str,
}

impl CourseDetailTemplate {
    pub fn new(state: &ViewState) -> Self {
        let selected = state.current_lesson().id;
        let modules = VIBE_CODING
            .modules
            .iter()
            .map(|module| {
                let expanded = state.expanded_module_id == module.id;
                let lessons = if expanded {
                    module
                        .lessons
                        .iter()
                        .map(|lesson| LessonRow {
                            id: lesson.id,
                            label: format!("{} · {}", lesson.title, lesson.duration),
                            class: if lesson.id == selected {
                                "lesson selected"
                            } else {
                                "lesson"
                            },
                        })
                        .collect()
                } else {
                    Vec::new()
                };
                ModuleRow {
                    id: module.id,
                    label: format!("Module {}: {}", module.id, module.title),
                    class: if expanded { "module expanded" } else { "module" },
                    expanded,
                    lessons,
                }
            })
            .collect();

        Self {
            title: VIBE_CODING.title,
            modules,
            ring: Ring::new(50, "ring-green"),
            greeting: TUTOR_GREETING,
        }
    }
}

/// Landing page for one catalog course. The ring shows the learner's seeded
/// progress for the matching entry.
#[derive(Template)]
#[template(path = "course_landing.html")]
pub struct LandingTemplate {
    course: &'static CatalogCourse,
    start: &'static str,
    ring: Ring,
}

impl LandingTemplate {
    pub fn new(state: &ViewState, page: Page) -> Option<Self> {
        let course = course_for_landing(page)?;
        let start = match page {
            Page::VibeCodingCourse => Page::VibeCodingWorkspace,
            _ => Page::Lesson,
        };
        Some(Self {
            course,
            start: start.slug(),
            ring: Ring::new(state.progress_for(course.progress_title), course.accent),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landing(state: &ViewState, page: Page) -> String {
        LandingTemplate::new(state, page).unwrap().render().unwrap()
    }

    #[test]
    fn test_courses_locked_when_unauthenticated() {
        let html = CoursesTemplate::new(&ViewState::default()).render().unwrap();
        assert!(html.contains("Courses Locked"));
        assert!(html.contains("value=\"signup\""));
        assert!(!html.contains("course-card"));
    }

    #[test]
    fn test_courses_grid_links_to_landings() {
        let html = CoursesTemplate::new(&ViewState::default().login())
            .render()
            .unwrap();
        for course in CATALOG.iter() {
            assert!(html.contains(&course.title.replace('&', "&amp;")));
            assert!(html.contains(&format!("value=\"{}\"", course.landing.slug())));
        }
    }

    #[test]
    fn test_course_detail_expands_only_selected_module() {
        let state = ViewState::default().login().toggle_module("2");
        let html = CourseDetailTemplate::new(&state).render().unwrap();
        assert_eq!(html.matches("class=\"module expanded\"").count(), 1);
        assert!(html.contains("Anatomy of a prompt"));
        assert!(!html.contains("Iterative testing"));

        let html = CourseDetailTemplate::new(&state.toggle_module("2"))
            .render()
            .unwrap();
        assert!(!html.contains("module expanded"));
    }

    #[test]
    fn test_landing_ring_uses_seeded_progress() {
        let state = ViewState::default().login();
        let html = landing(&state, Page::NoCodePlatformsCourse);
        assert!(html.contains("No-Code Development Platforms"));
        assert!(html.contains("<span class=\"ring-label\">50%</span>"));
        assert!(html.contains("stroke-dashoffset=\"125.6\""));

        let html = landing(&state, Page::VibeCodingCourse);
        assert!(html.contains("<span class=\"ring-label\">80%</span>"));
        assert!(html.contains("value=\"vibe-coding-workspace\""));

        let fresh = ViewState::default().sign_up(Default::default());
        let html = landing(&fresh, Page::AiAgentsCourse);
        assert!(html.contains("<span class=\"ring-label\">0%</span>"));
    }

    #[test]
    fn test_landing_needs_a_landing_page() {
        assert!(LandingTemplate::new(&ViewState::default().login(), Page::Dashboard).is_none());
    }
}
